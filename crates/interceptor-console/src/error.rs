/*
[INPUT]:  Form validation, drag transfer and API failures
[OUTPUT]: Typed error enums surfaced to the TUI status line and CLI
[POS]:    Error handling layer - console library errors
[UPDATE]: When adding new operator-visible failure modes
*/

use interceptor_adapter::InterceptorError;
use thiserror::Error;

/// Submission-time validation failures of a module form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Interface options have not arrived yet
    #[error("argument `{argument}` is still loading its options")]
    Unresolved { argument: String },

    /// Interface lookup failed or returned nothing to choose
    #[error("argument `{argument}` has no interface selected: {reason}")]
    NoSelection { argument: String, reason: String },

    /// Text supplied for a typed argument does not parse
    #[error("argument `{argument}` expects {expected}, got `{value}`")]
    InvalidValue {
        argument: String,
        expected: &'static str,
        value: String,
    },

    #[error("module has no argument named `{0}`")]
    UnknownArgument(String),
}

/// Failures of the drag transfer gesture
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("argument `{argument}` ({type_name}) does not accept dropped values")]
    Rejected { argument: String, type_name: String },

    #[error("dropped payload is empty")]
    EmptyPayload,

    #[error("nothing has been picked up to drop")]
    NothingPickedUp,
}

/// Errors of operator actions driven through the console
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error("service request failed: {0}")]
    Api(#[from] InterceptorError),

    #[error("no module is open")]
    NoModuleSelected,

    #[error("no task is open")]
    NoTaskSelected,

    #[error("`{0}` is not in the current list")]
    UnknownItem(String),
}
