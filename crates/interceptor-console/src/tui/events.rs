/*
[INPUT]:  Crossterm key events and the focused pane
[OUTPUT]: Console actions and AppState updates
[POS]:    TUI event routing
[UPDATE]: When changing keybindings
*/

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use interceptor_console::form::Control;
use interceptor_console::view::ContentBody;
use interceptor_console::lock_view;

use super::app::{AppState, Focus, Tab};

/// What the content pane currently holds, for key dispatch
enum ContentKind {
    Form,
    Task,
    Other,
}

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) async fn handle_key_event(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    let on_workspace = app.current_tab != Tab::Logs;
    if on_workspace && app.focus == Focus::Content {
        if let ContentKind::Form = content_kind(app) {
            if handle_form_key(app, key).await {
                return false;
            }
        }
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('1') => app.set_tab(Tab::Modules),
        KeyCode::Char('2') => app.set_tab(Tab::Tasks),
        KeyCode::Char('3') => app.set_tab(Tab::Logs),
        KeyCode::Tab => app.next_focus(),
        KeyCode::BackTab => app.previous_focus(),
        KeyCode::Char('r') => {
            app.console.refresh_sidebar();
            app.status_message = "refreshing list".to_string();
        }
        _ if !on_workspace => {}
        _ => match app.focus {
            Focus::Sidebar => handle_sidebar_key(app, key.code),
            Focus::Content => handle_content_key(app, key.code).await,
            Focus::Database => handle_database_key(app, key.code).await,
        },
    }
    false
}

fn content_kind(app: &AppState) -> ContentKind {
    match &lock_view(&app.view).content.body {
        ContentBody::Module(_) => ContentKind::Form,
        ContentBody::Task(_) => ContentKind::Task,
        _ => ContentKind::Other,
    }
}

fn handle_sidebar_key(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Up => app.move_sidebar(-1),
        KeyCode::Down => app.move_sidebar(1),
        KeyCode::Enter => {
            if let Err(err) = app.open_sidebar_entry() {
                app.status_message = format!("open failed: {err}");
            }
        }
        _ => {}
    }
}

async fn handle_content_key(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Esc => app.focus = Focus::Sidebar,
        KeyCode::Char('x') => {
            if let ContentKind::Task = content_kind(app) {
                match app.console.stop_task().await {
                    Ok(name) => app.status_message = format!("stop requested: {name}"),
                    Err(err) => app.status_message = format!("stop task failed: {err}"),
                }
            }
        }
        _ => {}
    }
}

async fn handle_database_key(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Up => app.move_database(-1),
        KeyCode::Down => app.move_database(1),
        KeyCode::Left => app.switch_database_tab(false),
        KeyCode::Right => app.switch_database_tab(true),
        KeyCode::Enter => {
            if let Err(err) = app.open_host() {
                app.status_message = format!("open host failed: {err}");
            }
        }
        KeyCode::Char('y') => {
            if let Err(err) = app.pick_up_host() {
                app.status_message = format!("pick up failed: {err}");
            }
        }
        KeyCode::Char('D') => match app.console.reset_database().await {
            Ok(()) => app.status_message = "database reset".to_string(),
            Err(err) => app.status_message = format!("database reset failed: {err}"),
        },
        _ => {}
    }
}

/// Form editing keys; returns `false` when the key should fall through
async fn handle_form_key(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('v') {
            match app.console.drop_on_focused() {
                Ok(value) => app.status_message = format!("dropped: {value}"),
                Err(err) => app.status_message = format!("drop failed: {err}"),
            }
            return true;
        }
        return false;
    }

    match key.code {
        KeyCode::Enter => {
            match app.console.start_module().await {
                Ok(task) => app.status_message = format!("New task created: {task}"),
                Err(err) => app.status_message = format!("start module failed: {err}"),
            }
            true
        }
        KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => false,
        code => {
            let mut view = lock_view(&app.view);
            let Some(form) = view.content.body.module_form_mut() else {
                return false;
            };
            match code {
                KeyCode::Up => form.focus_previous(),
                KeyCode::Down => form.focus_next(),
                code => {
                    let Some(widget) = form.focused_mut() else {
                        return true;
                    };
                    let is_toggle = matches!(widget.control(), Control::Toggle(_));
                    match code {
                        KeyCode::Char(' ') if is_toggle => widget.toggle(),
                        KeyCode::Left => widget.select_previous(),
                        KeyCode::Right => widget.select_next(),
                        KeyCode::Backspace => widget.pop_char(),
                        KeyCode::Char(ch) => {
                            widget.push_char(ch);
                        }
                        _ => {}
                    }
                }
            }
            true
        }
    }
}
