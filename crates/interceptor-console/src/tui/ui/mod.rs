/*
[INPUT]:  TUI app state and shared view for UI components
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: 2026-10-16 Workspace panels for sidebar, content and database
*/

mod content;
mod database;
mod layout;
mod logs;
mod sidebar;

pub(in crate::tui) use content::draw_content;
pub(in crate::tui) use database::draw_database;
pub(in crate::tui) use layout::draw_tabs;
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use sidebar::draw_sidebar;
