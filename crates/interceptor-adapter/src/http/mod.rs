/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod database;
pub mod error;
pub mod modules;
pub mod tasks;

pub use error::{InterceptorError, Result};

pub use client::{ClientConfig, DEFAULT_BASE_URL, InterceptorClient};
