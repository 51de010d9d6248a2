/*
[INPUT]:  Reconciled fetch results and operator selections
[OUTPUT]: ViewState shared between pollers and the UI thread
[POS]:    View layer - everything the operator currently sees
[UPDATE]: When adding panes or navigation axes
*/

mod list;
mod task;

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use interceptor_adapter::{Credential, Host, Service};

use crate::form::ModuleForm;
use crate::sync::{Epoch, EpochCounter};

pub use list::{Keyed, ListPane, SidebarEntry};
pub use task::{TaskMerge, TaskOutputView, TaskPhase};

/// View state shared by the UI and every poll chain
pub type SharedView = Arc<Mutex<ViewState>>;

/// Lock the view, recovering from a poisoned mutex
///
/// Never hold the guard across an `.await`.
pub fn lock_view(view: &SharedView) -> MutexGuard<'_, ViewState> {
    view.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sidebar category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Modules,
    Tasks,
}

impl Category {
    pub fn title(self) -> &'static str {
        match self {
            Category::Modules => "Modules",
            Category::Tasks => "Tasks",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Database browser tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatabaseTab {
    #[default]
    Hosts,
    Services,
    Credentials,
}

impl DatabaseTab {
    pub const ALL: [DatabaseTab; 3] = [
        DatabaseTab::Hosts,
        DatabaseTab::Services,
        DatabaseTab::Credentials,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DatabaseTab::Hosts => "Hosts",
            DatabaseTab::Services => "Services",
            DatabaseTab::Credentials => "Credentials",
        }
    }

    pub fn next(self) -> Self {
        match self {
            DatabaseTab::Hosts => DatabaseTab::Services,
            DatabaseTab::Services => DatabaseTab::Credentials,
            DatabaseTab::Credentials => DatabaseTab::Hosts,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            DatabaseTab::Hosts => DatabaseTab::Credentials,
            DatabaseTab::Services => DatabaseTab::Hosts,
            DatabaseTab::Credentials => DatabaseTab::Services,
        }
    }
}

/// What the main content pane shows
#[derive(Debug, Clone, Default)]
pub enum ContentBody {
    #[default]
    Empty,
    Loading(String),
    Module(ModuleForm),
    Task(TaskOutputView),
    Failed { title: String, reason: String },
}

impl ContentBody {
    pub fn module_form(&self) -> Option<&ModuleForm> {
        match self {
            ContentBody::Module(form) => Some(form),
            _ => None,
        }
    }

    pub fn module_form_mut(&mut self) -> Option<&mut ModuleForm> {
        match self {
            ContentBody::Module(form) => Some(form),
            _ => None,
        }
    }

    pub fn task(&self) -> Option<&TaskOutputView> {
        match self {
            ContentBody::Task(task) => Some(task),
            _ => None,
        }
    }

    pub fn task_mut(&mut self) -> Option<&mut TaskOutputView> {
        match self {
            ContentBody::Task(task) => Some(task),
            _ => None,
        }
    }
}

/// Content pane bound to at most one selected item at a time
#[derive(Debug, Default)]
pub struct ContentPane {
    epoch: EpochCounter,
    pub body: ContentBody,
}

impl ContentPane {
    /// Unbind the previous item and show `body` for the new one
    pub fn bind(&mut self, body: ContentBody) -> Epoch {
        self.body = body;
        self.epoch.advance()
    }

    pub fn clear(&mut self) -> Epoch {
        self.bind(ContentBody::Empty)
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch.current()
    }

    pub fn is_bound(&self, epoch: Epoch) -> bool {
        self.epoch.is_current(epoch)
    }

    /// Body of the binding `epoch`, or nothing if it has been superseded
    pub fn body_for(&mut self, epoch: Epoch) -> Option<&mut ContentBody> {
        if self.epoch.is_current(epoch) {
            Some(&mut self.body)
        } else {
            None
        }
    }
}

/// Detail panel of the selected host
#[derive(Debug, Default)]
pub struct HostDetail {
    epoch: EpochCounter,
    pub host: Option<Host>,
    pub error: Option<String>,
}

impl HostDetail {
    pub fn bind(&mut self) -> Epoch {
        self.host = None;
        self.error = None;
        self.epoch.advance()
    }

    pub fn is_bound(&self, epoch: Epoch) -> bool {
        self.epoch.is_current(epoch)
    }
}

#[derive(Debug, Default)]
pub struct DatabasePane {
    pub tab: DatabaseTab,
    pub hosts: ListPane<Host>,
    pub services: ListPane<Service>,
    pub credentials: ListPane<Credential>,
    pub detail: HostDetail,
}

/// Everything rendered by the console
#[derive(Debug, Default)]
pub struct ViewState {
    pub category: Category,
    pub sidebar: ListPane<SidebarEntry>,
    pub content: ContentPane,
    pub database: DatabasePane,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedView {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn sidebar_mut(&mut self) -> &mut ListPane<SidebarEntry> {
        &mut self.sidebar
    }

    pub fn hosts_mut(&mut self) -> &mut ListPane<Host> {
        &mut self.database.hosts
    }

    pub fn services_mut(&mut self) -> &mut ListPane<Service> {
        &mut self.database.services
    }

    pub fn credentials_mut(&mut self) -> &mut ListPane<Credential> {
        &mut self.database.credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebinding_content_supersedes_previous_epoch() {
        let mut content = ContentPane::default();
        let first = content.bind(ContentBody::Loading("nmap".to_string()));
        let second = content.bind(ContentBody::Loading("task-1".to_string()));

        assert!(content.body_for(first).is_none());
        assert!(content.body_for(second).is_some());
    }

    #[test]
    fn database_tabs_cycle() {
        for tab in DatabaseTab::ALL {
            assert_eq!(tab.next().previous(), tab);
        }
        assert_eq!(DatabaseTab::Credentials.next(), DatabaseTab::Hosts);
    }

    #[test]
    fn poisoned_view_is_still_usable() {
        let view = ViewState::shared();
        let poisoned = view.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoned.lock().unwrap();
            panic!("poison");
        })
        .join();

        lock_view(&view).category = Category::Tasks;
        assert_eq!(lock_view(&view).category, Category::Tasks);
    }
}
