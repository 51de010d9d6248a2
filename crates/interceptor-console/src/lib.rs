/*
[INPUT]:  Public API exports for interceptor-console crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod console;
pub mod error;
pub mod form;
pub mod nav;
pub mod sync;
pub mod transfer;
pub mod view;

// Re-export main types for convenience
pub use config::ConsoleConfig;
pub use console::{Console, ConsoleEvent};
pub use error::{ConsoleError, FormError, TransferError};
pub use view::{SharedView, ViewState, lock_view};
