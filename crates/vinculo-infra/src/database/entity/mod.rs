//! SeaORM entities for the content store and admin tables.

pub mod admin_profile;
pub mod blog_post;
pub mod category;
pub mod category_translation;
pub mod enums;
pub mod post_category;
pub mod post_translation;
pub mod user;
