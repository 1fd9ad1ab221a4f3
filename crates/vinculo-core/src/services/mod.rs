//! Application services built on the ports.

mod blog;
pub mod catalog;
pub mod generator;

pub use blog::BlogService;
pub use catalog::{
    BlogCatalog, BlogContext, CatalogState, CatalogView, ContentOrigin, filter_by_category,
    search_posts,
};
pub use generator::DraftGenerator;
