//! # Vinculo Shared
//!
//! Wire types shared between the API server and its clients (the public
//! site and the admin panel).

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse, FunctionError};
