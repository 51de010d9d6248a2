/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public interceptor adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod api;
pub mod http;
pub mod types;

pub use api::ResourceApi;

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    DEFAULT_BASE_URL,
    InterceptorClient,
    InterceptorError,
    Result,
};

// Re-export all types
pub use types::*;
