/*
[INPUT]:  ResourceApi implementation and operator actions
[OUTPUT]: Console facade driving navigation, submissions and drag transfer
[POS]:    Application layer - single entry point for the TUI and tests
[UPDATE]: When adding operator actions
*/

use std::sync::Arc;

use interceptor_adapter::ResourceApi;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{info, warn};

use crate::error::{ConsoleError, FormError, TransferError};
use crate::form::FormNotice;
use crate::nav::NavigationState;
use crate::transfer::DragPayload;
use crate::view::{Category, ContentBody, DatabaseTab, SharedView, ViewState, lock_view};

/// Notifications raised by background poll chains
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    /// A watched task reported it is no longer running
    TaskStopped { name: String },
}

pub struct Console {
    api: Arc<dyn ResourceApi>,
    view: SharedView,
    nav: NavigationState,
    picked: Option<DragPayload>,
}

impl Console {
    /// Create a console and the receiver for its background events
    ///
    /// Must be called inside a tokio runtime; navigation spawns poll tasks.
    pub fn new(api: Arc<dyn ResourceApi>) -> (Self, UnboundedReceiver<ConsoleEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let view = ViewState::shared();
        let nav = NavigationState::new(api.clone(), view.clone(), events_tx);
        (
            Self {
                api,
                view,
                nav,
                picked: None,
            },
            events_rx,
        )
    }

    pub fn view(&self) -> SharedView {
        self.view.clone()
    }

    pub fn api(&self) -> Arc<dyn ResourceApi> {
        self.api.clone()
    }

    /// Initial screen: module list and host browser
    pub fn open(&mut self) {
        self.nav.select_category(Category::Modules);
        self.nav.select_database_tab(DatabaseTab::Hosts);
    }

    pub fn select_category(&mut self, category: Category) {
        self.nav.select_category(category);
    }

    pub fn select_item(&mut self, key: &str) -> Result<(), ConsoleError> {
        self.nav.select_item(key)
    }

    pub fn refresh_sidebar(&mut self) {
        self.nav.refresh_sidebar();
    }

    pub fn select_database_tab(&mut self, tab: DatabaseTab) {
        self.nav.select_database_tab(tab);
    }

    pub fn select_host(&mut self, id: &str) -> Result<(), ConsoleError> {
        self.nav.select_host(id)
    }

    pub fn handle_event(&mut self, event: ConsoleEvent) {
        match event {
            ConsoleEvent::TaskStopped { name } => {
                info!(task = %name, "refreshing task list after stop");
                if lock_view(&self.view).category == Category::Tasks {
                    self.nav.refresh_sidebar();
                }
            }
        }
    }

    /// Submit the open module form and return the created task name
    ///
    /// The outcome is also recorded as the form notice, unless the operator
    /// navigated away while the request was in flight.
    pub async fn start_module(&mut self) -> Result<String, ConsoleError> {
        let (epoch, submission) = {
            let mut view = lock_view(&self.view);
            let epoch = view.content.epoch();
            let form = view
                .content
                .body
                .module_form_mut()
                .ok_or(ConsoleError::NoModuleSelected)?;
            match form.submission() {
                Ok(submission) => (epoch, submission),
                Err(err) => {
                    form.set_notice(FormNotice::Failed(err.to_string()));
                    return Err(err.into());
                }
            }
        };

        info!(module = %submission.module, arguments = submission.args.len(), "starting module");
        let result = self
            .api
            .start_module(&submission.module, &submission.args)
            .await;

        let notice = match &result {
            Ok(task) => {
                info!(module = %submission.module, task = %task, "task created");
                FormNotice::Created(task.clone())
            }
            Err(err) => {
                warn!(module = %submission.module, error = %err, "module start failed");
                FormNotice::Failed(err.to_string())
            }
        };
        if let Some(form) = lock_view(&self.view)
            .content
            .body_for(epoch)
            .and_then(ContentBody::module_form_mut)
        {
            form.set_notice(notice);
        }

        Ok(result?)
    }

    /// Stop the open task and re-render it from scratch
    pub async fn stop_task(&mut self) -> Result<String, ConsoleError> {
        let name = lock_view(&self.view)
            .content
            .body
            .task()
            .map(|task| task.name().to_string())
            .ok_or(ConsoleError::NoTaskSelected)?;

        self.api.stop_task(&name).await?;
        info!(task = %name, "stop requested");
        self.nav.select_item(&name)?;
        Ok(name)
    }

    /// Pick up a host row as drag payload
    pub fn pick_up_host(&mut self, id: &str) -> Result<DragPayload, ConsoleError> {
        let payload = lock_view(&self.view)
            .database
            .hosts
            .get(id)
            .map(DragPayload::from_host)
            .ok_or_else(|| ConsoleError::UnknownItem(id.to_string()))?;
        self.picked = Some(payload.clone());
        Ok(payload)
    }

    pub fn picked(&self) -> Option<&DragPayload> {
        self.picked.as_ref()
    }

    /// Drop the picked payload onto an argument of the open form
    pub fn drop_on(&mut self, argument: &str) -> Result<String, ConsoleError> {
        let payload = self.picked.as_ref().ok_or(TransferError::NothingPickedUp)?;
        let mut view = lock_view(&self.view);
        let form = view
            .content
            .body
            .module_form_mut()
            .ok_or(ConsoleError::NoModuleSelected)?;
        let widget = form
            .widget_mut(argument)
            .ok_or_else(|| FormError::UnknownArgument(argument.to_string()))?;
        Ok(widget.accept_drop(payload)?)
    }

    /// Drop the picked payload onto the focused argument of the open form
    pub fn drop_on_focused(&mut self) -> Result<String, ConsoleError> {
        let argument = lock_view(&self.view)
            .content
            .body
            .module_form()
            .and_then(|form| form.focused())
            .map(|widget| widget.name().to_string())
            .ok_or(ConsoleError::NoModuleSelected)?;
        self.drop_on(&argument)
    }

    /// Clear the discovery database and re-render the current database tab
    pub async fn reset_database(&mut self) -> Result<(), ConsoleError> {
        self.api.reset_database().await?;
        info!("database reset");
        let tab = self.nav.current_database_tab();
        self.nav.select_database_tab(tab);
        Ok(())
    }

    pub fn shutdown(&mut self) {
        self.nav.shutdown();
    }
}
