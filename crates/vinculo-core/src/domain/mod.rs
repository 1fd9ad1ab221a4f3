//! Domain entities - the core business objects.

mod category;
mod generated;
mod post;
mod session;
pub mod slug;
mod user;
pub mod validation;

pub use category::{Category, CategoryNames, seed_categories};
pub use generated::{GeneratedContent, GenerationRequest, TargetLength, Tone};
pub use post::{
    Language, NewPost, Post, PostStats, PostStatus, PostUpdate, Translation, TranslationUpdate,
    Translations,
};
pub use session::{AdminProfile, AdminRole, Session, has_admin_role};
pub use user::User;
