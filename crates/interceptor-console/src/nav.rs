/*
[INPUT]:  Operator selections (category, item, database tab, host)
[OUTPUT]: Pane rebinding and the poll chains that feed each pane
[POS]:    Navigation layer - owns every live poll chain of the console
[UPDATE]: When adding navigation axes or changing which panes poll
*/

use std::sync::Arc;

use interceptor_adapter::ResourceApi;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::console::ConsoleEvent;
use crate::error::ConsoleError;
use crate::sync::{
    Epoch, HostDetailReconciler, LIST_POLL_INTERVAL, ListReconciler, ModuleFormReconciler,
    PollHandle, Poller, TASK_POLL_INTERVAL, TaskOutputReconciler,
};
use crate::view::{
    Category, ContentBody, DatabaseTab, SharedView, SidebarEntry, TaskOutputView, ViewState,
    lock_view,
};

/// Current selection on every axis plus the chains bound to it
///
/// Each pane has at most one chain. Replacing a selection cancels the old
/// chain and advances the pane epoch before the new chain is spawned.
pub struct NavigationState {
    api: Arc<dyn ResourceApi>,
    view: SharedView,
    events: UnboundedSender<ConsoleEvent>,
    sidebar_poll: Option<PollHandle>,
    content_poll: Option<PollHandle>,
    database_poll: Option<PollHandle>,
    detail_poll: Option<PollHandle>,
}

impl NavigationState {
    pub fn new(
        api: Arc<dyn ResourceApi>,
        view: SharedView,
        events: UnboundedSender<ConsoleEvent>,
    ) -> Self {
        Self {
            api,
            view,
            events,
            sidebar_poll: None,
            content_poll: None,
            database_poll: None,
            detail_poll: None,
        }
    }

    /// Switch the sidebar category; the content pane is emptied
    pub fn select_category(&mut self, category: Category) {
        cancel(&mut self.content_poll);
        cancel(&mut self.sidebar_poll);
        let epoch = {
            let mut view = lock_view(&self.view);
            view.category = category;
            view.content.clear();
            view.sidebar.rebind()
        };
        info!(category = %category, "category selected");
        self.sidebar_poll = Some(self.spawn_sidebar(category, epoch));
    }

    /// Force the sidebar to re-render on its next fetch, keeping the selection
    pub fn refresh_sidebar(&mut self) {
        cancel(&mut self.sidebar_poll);
        let (category, epoch) = {
            let mut view = lock_view(&self.view);
            (view.category, view.sidebar.invalidate())
        };
        debug!(category = %category, "refreshing sidebar");
        self.sidebar_poll = Some(self.spawn_sidebar(category, epoch));
    }

    fn spawn_sidebar(&self, category: Category, epoch: Epoch) -> PollHandle {
        let api = self.api.clone();
        let reconciler = ListReconciler::new(self.view.clone(), epoch, ViewState::sidebar_mut);
        match category {
            Category::Modules => Poller::start(
                "sidebar:modules",
                LIST_POLL_INTERVAL,
                move || {
                    let api = api.clone();
                    async move {
                        api.list_modules().await.map(|modules| {
                            modules
                                .into_iter()
                                .map(SidebarEntry::from)
                                .collect::<Vec<_>>()
                        })
                    }
                },
                reconciler,
            ),
            Category::Tasks => Poller::start(
                "sidebar:tasks",
                LIST_POLL_INTERVAL,
                move || {
                    let api = api.clone();
                    async move {
                        api.list_tasks().await.map(|tasks| {
                            tasks
                                .into_iter()
                                .map(SidebarEntry::from)
                                .collect::<Vec<_>>()
                        })
                    }
                },
                reconciler,
            ),
        }
    }

    /// Activate a sidebar entry and bind the content pane to it
    pub fn select_item(&mut self, key: &str) -> Result<(), ConsoleError> {
        let category = {
            let mut view = lock_view(&self.view);
            if !view.sidebar.activate(key) {
                return Err(ConsoleError::UnknownItem(key.to_string()));
            }
            view.category
        };
        cancel(&mut self.content_poll);
        info!(category = %category, item = %key, "item selected");

        let api = self.api.clone();
        let name = key.to_string();
        self.content_poll = Some(match category {
            Category::Modules => {
                let epoch = lock_view(&self.view)
                    .content
                    .bind(ContentBody::Loading(name.clone()));
                let token = CancellationToken::new();
                let reconciler = ModuleFormReconciler::new(
                    api.clone(),
                    self.view.clone(),
                    epoch,
                    token.child_token(),
                );
                Poller::once_with_token(
                    format!("module:{name}"),
                    token,
                    move || {
                        let api = api.clone();
                        let name = name.clone();
                        async move { api.get_module(&name).await }
                    },
                    reconciler,
                )
            }
            Category::Tasks => {
                let epoch = lock_view(&self.view)
                    .content
                    .bind(ContentBody::Task(TaskOutputView::new(name.clone())));
                let reconciler =
                    TaskOutputReconciler::new(self.view.clone(), epoch, self.events.clone());
                Poller::start(
                    format!("task:{name}"),
                    TASK_POLL_INTERVAL,
                    move || {
                        let api = api.clone();
                        let name = name.clone();
                        async move { api.get_task(&name).await }
                    },
                    reconciler,
                )
            }
        });
        Ok(())
    }

    /// Re-render the active sidebar entry from scratch
    pub fn reopen_item(&mut self) -> Result<(), ConsoleError> {
        let active = lock_view(&self.view).sidebar.active_key().map(str::to_string);
        match active {
            Some(key) => self.select_item(&key),
            None => Err(ConsoleError::UnknownItem(String::new())),
        }
    }

    /// Switch the database browser tab; only hosts keep polling
    pub fn select_database_tab(&mut self, tab: DatabaseTab) {
        cancel(&mut self.database_poll);
        cancel(&mut self.detail_poll);
        let epoch = {
            let mut view = lock_view(&self.view);
            view.database.tab = tab;
            view.database.detail.bind();
            match tab {
                DatabaseTab::Hosts => view.database.hosts.rebind(),
                DatabaseTab::Services => view.database.services.rebind(),
                DatabaseTab::Credentials => view.database.credentials.rebind(),
            }
        };
        info!(tab = tab.title(), "database tab selected");

        let api = self.api.clone();
        let view = self.view.clone();
        self.database_poll = Some(match tab {
            DatabaseTab::Hosts => Poller::start(
                "database:hosts",
                LIST_POLL_INTERVAL,
                move || {
                    let api = api.clone();
                    async move { api.list_hosts().await }
                },
                ListReconciler::new(view, epoch, ViewState::hosts_mut),
            ),
            DatabaseTab::Services => Poller::once(
                "database:services",
                move || {
                    let api = api.clone();
                    async move { api.list_services().await }
                },
                ListReconciler::new(view, epoch, ViewState::services_mut),
            ),
            DatabaseTab::Credentials => Poller::once(
                "database:credentials",
                move || {
                    let api = api.clone();
                    async move { api.list_credentials().await }
                },
                ListReconciler::new(view, epoch, ViewState::credentials_mut),
            ),
        });
    }

    /// Activate a host row and load its detail
    pub fn select_host(&mut self, id: &str) -> Result<(), ConsoleError> {
        if !lock_view(&self.view).database.hosts.activate(id) {
            return Err(ConsoleError::UnknownItem(id.to_string()));
        }
        cancel(&mut self.detail_poll);
        let epoch = lock_view(&self.view).database.detail.bind();

        let api = self.api.clone();
        let host_id = id.to_string();
        self.detail_poll = Some(Poller::once(
            format!("host:{id}"),
            move || {
                let api = api.clone();
                let host_id = host_id.clone();
                async move { api.get_host(&host_id).await }
            },
            HostDetailReconciler::new(self.view.clone(), epoch),
        ));
        Ok(())
    }

    pub fn current_database_tab(&self) -> DatabaseTab {
        lock_view(&self.view).database.tab
    }

    /// Cancel every chain; the view keeps its last rendering
    pub fn shutdown(&mut self) {
        for slot in [
            &mut self.sidebar_poll,
            &mut self.content_poll,
            &mut self.database_poll,
            &mut self.detail_poll,
        ] {
            cancel(slot);
        }
        debug!("navigation poll chains cancelled");
    }
}

impl Drop for NavigationState {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn cancel(slot: &mut Option<PollHandle>) {
    if let Some(handle) = slot.take() {
        handle.cancel();
    }
}
