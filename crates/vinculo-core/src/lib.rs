//! # Vinculo Core
//!
//! The domain layer of the Vinculo bilingual blog.
//! Content model, error taxonomy, ports and the application services built
//! on top of them. No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, GenerationError, RepoError};
