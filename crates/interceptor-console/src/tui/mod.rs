/*
[INPUT]:  Console facade, background console events, and log buffer
[OUTPUT]: Ratatui-based TUI for browsing modules, tasks and the database
[POS]:    TUI module for the interceptor-console binary
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub use runtime::{LogBuffer, LogBufferHandle, LogWriterFactory, run_tui_with_log};
pub(crate) use runtime::LOG_BUFFER_CAPACITY;
