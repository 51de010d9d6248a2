/*
[INPUT]:  Console facade, shared view state and log buffer
[OUTPUT]: AppState holding tab, focus and list cursors for the TUI
[POS]:    TUI app state and cursor management
[UPDATE]: When adding tabs, panes or cursor-driven actions
*/

use anyhow::{Result, anyhow};
use ratatui::widgets::ListState;

use interceptor_console::view::{Category, DatabaseTab, Keyed};
use interceptor_console::{Console, SharedView, lock_view};

use crate::tui::LogBufferHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tab {
    Modules,
    Tasks,
    Logs,
}

/// Pane receiving keyboard input on the workspace tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    Sidebar,
    Content,
    Database,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Sidebar => Focus::Content,
            Focus::Content => Focus::Database,
            Focus::Database => Focus::Sidebar,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Sidebar => Focus::Database,
            Focus::Content => Focus::Sidebar,
            Focus::Database => Focus::Content,
        }
    }
}

pub(super) struct AppState {
    pub(super) console: Console,
    pub(super) view: SharedView,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) current_tab: Tab,
    pub(super) focus: Focus,
    pub(super) sidebar_state: ListState,
    pub(super) database_state: ListState,
    pub(super) status_message: String,
}

impl AppState {
    pub(super) fn new(console: Console, log_buffer: LogBufferHandle) -> Self {
        let view = console.view();
        Self {
            console,
            view,
            log_buffer,
            current_tab: Tab::Modules,
            focus: Focus::Sidebar,
            sidebar_state: ListState::default(),
            database_state: ListState::default(),
            status_message: "Ready".to_string(),
        }
    }

    pub(super) fn set_tab(&mut self, tab: Tab) {
        let category = match tab {
            Tab::Modules => Some(Category::Modules),
            Tab::Tasks => Some(Category::Tasks),
            Tab::Logs => None,
        };
        self.current_tab = tab;
        if let Some(category) = category {
            if lock_view(&self.view).category != category {
                self.console.select_category(category);
                self.sidebar_state.select(None);
                self.status_message = format!("{category} loaded");
            }
            self.focus = Focus::Sidebar;
        }
    }

    pub(super) fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub(super) fn previous_focus(&mut self) {
        self.focus = self.focus.previous();
    }

    pub(super) fn move_sidebar(&mut self, delta: isize) {
        let len = lock_view(&self.view).sidebar.entries().len();
        move_cursor(&mut self.sidebar_state, len, delta);
    }

    pub(super) fn move_database(&mut self, delta: isize) {
        let len = {
            let view = lock_view(&self.view);
            match view.database.tab {
                DatabaseTab::Hosts => view.database.hosts.entries().len(),
                DatabaseTab::Services => view.database.services.entries().len(),
                DatabaseTab::Credentials => view.database.credentials.entries().len(),
            }
        };
        move_cursor(&mut self.database_state, len, delta);
    }

    pub(super) fn switch_database_tab(&mut self, forward: bool) {
        let current = lock_view(&self.view).database.tab;
        let tab = if forward {
            current.next()
        } else {
            current.previous()
        };
        self.console.select_database_tab(tab);
        self.database_state.select(None);
    }

    /// Activate the sidebar entry under the cursor
    pub(super) fn open_sidebar_entry(&mut self) -> Result<()> {
        let key = {
            let view = lock_view(&self.view);
            let index = self.sidebar_state.selected().unwrap_or(0);
            view.sidebar
                .entries()
                .get(index)
                .map(Keyed::key)
                .ok_or_else(|| anyhow!("nothing selected"))?
        };
        self.console.select_item(&key)?;
        self.focus = Focus::Content;
        self.status_message = format!("opened {key}");
        Ok(())
    }

    /// Host id under the database cursor, when the hosts tab is shown
    pub(super) fn host_under_cursor(&self) -> Result<String> {
        let view = lock_view(&self.view);
        if view.database.tab != DatabaseTab::Hosts {
            return Err(anyhow!("switch to the Hosts tab first"));
        }
        let index = self.database_state.selected().unwrap_or(0);
        view.database
            .hosts
            .entries()
            .get(index)
            .map(|host| host.id.clone())
            .ok_or_else(|| anyhow!("no host selected"))
    }

    pub(super) fn open_host(&mut self) -> Result<()> {
        let id = self.host_under_cursor()?;
        self.console.select_host(&id)?;
        self.status_message = format!("host {id} selected");
        Ok(())
    }

    pub(super) fn pick_up_host(&mut self) -> Result<()> {
        let id = self.host_under_cursor()?;
        let payload = self.console.pick_up_host(&id)?;
        self.status_message = format!("picked up host {}; Ctrl+V drops it", payload.raw());
        Ok(())
    }

    /// Clamp cursors after lists changed under them
    pub(super) fn clamp_cursors(&mut self) {
        let (sidebar_len, database_len) = {
            let view = lock_view(&self.view);
            let database_len = match view.database.tab {
                DatabaseTab::Hosts => view.database.hosts.entries().len(),
                DatabaseTab::Services => view.database.services.entries().len(),
                DatabaseTab::Credentials => view.database.credentials.entries().len(),
            };
            (view.sidebar.entries().len(), database_len)
        };
        clamp_cursor(&mut self.sidebar_state, sidebar_len);
        clamp_cursor(&mut self.database_state, database_len);
    }
}

fn move_cursor(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, (len - 1) as isize) as usize;
    state.select(Some(next));
}

fn clamp_cursor(state: &mut ListState, len: usize) {
    match state.selected() {
        _ if len == 0 => state.select(None),
        None => state.select(Some(0)),
        Some(selected) if selected >= len => state.select(Some(len - 1)),
        Some(_) => {}
    }
}
