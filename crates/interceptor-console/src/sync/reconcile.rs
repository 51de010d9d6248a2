/*
[INPUT]:  Fetched lists, task snapshots, module info and lookups
[OUTPUT]: Reconcile implementations that write into ViewState under epoch guard
[POS]:    Sync layer - glue between poll chains and view panes
[UPDATE]: When adding a pane fed by polling
[UPDATE]: 2026-10-15 Stream task output to plain writers for headless watch
*/

use std::io::Write;
use std::sync::Arc;

use interceptor_adapter::{Host, InterceptorError, Interface, Module, ResourceApi, TaskStatus};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::epoch::Epoch;
use super::poller::{PollControl, Poller, Reconcile};
use crate::console::ConsoleEvent;
use crate::form::{ArgWidget, InterfaceSelect, ModuleForm};
use crate::view::{
    ContentBody, Keyed, ListPane, SharedView, TaskMerge, TaskOutputView, ViewState, lock_view,
};

/// Projection from the view to one list pane
pub type PaneSelector<T> = fn(&mut ViewState) -> &mut ListPane<T>;

/// Applies the additions-only policy to a list pane
pub struct ListReconciler<T> {
    view: SharedView,
    epoch: Epoch,
    pane: PaneSelector<T>,
}

impl<T> ListReconciler<T> {
    pub fn new(view: SharedView, epoch: Epoch, pane: PaneSelector<T>) -> Self {
        Self { view, epoch, pane }
    }
}

impl<T> Reconcile<Vec<T>> for ListReconciler<T>
where
    T: Keyed + Clone + Send + 'static,
{
    fn reconcile(&mut self, fetched: Vec<T>) -> PollControl {
        let mut view = lock_view(&self.view);
        let pane = (self.pane)(&mut *view);
        if !pane.is_bound(self.epoch) {
            return PollControl::Stop;
        }
        let count = fetched.len();
        if pane.refresh(fetched) {
            debug!(entries = count, renders = pane.render_count(), "list re-rendered");
        }
        PollControl::Continue
    }
}

/// Feeds task snapshots into the content pane until the task stops
pub struct TaskOutputReconciler {
    view: SharedView,
    epoch: Epoch,
    events: UnboundedSender<ConsoleEvent>,
}

impl TaskOutputReconciler {
    pub fn new(view: SharedView, epoch: Epoch, events: UnboundedSender<ConsoleEvent>) -> Self {
        Self {
            view,
            epoch,
            events,
        }
    }
}

impl Reconcile<TaskStatus> for TaskOutputReconciler {
    fn reconcile(&mut self, fetched: TaskStatus) -> PollControl {
        let mut view = lock_view(&self.view);
        let Some(task) = view
            .content
            .body_for(self.epoch)
            .and_then(ContentBody::task_mut)
        else {
            return PollControl::Stop;
        };

        match task.merge(fetched) {
            TaskMerge::Stopped => {
                let name = task.name().to_string();
                drop(view);
                info!(task = %name, "task stopped");
                // Receiver is gone only during shutdown
                let _ = self.events.send(ConsoleEvent::TaskStopped { name });
                PollControl::Stop
            }
            _ => PollControl::Continue,
        }
    }
}

/// Streams task output to a writer, printing only what has not been printed yet
pub struct TaskOutputWriter<W> {
    view: TaskOutputView,
    printed: usize,
    out: W,
}

impl<W: Write + Send + 'static> TaskOutputWriter<W> {
    pub fn new(name: impl Into<String>, out: W) -> Self {
        Self {
            view: TaskOutputView::new(name),
            printed: 0,
            out,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush_new_output(&mut self) -> std::io::Result<()> {
        let output = self.view.output();
        if output.len() > self.printed && output.is_char_boundary(self.printed) {
            self.out.write_all(output[self.printed..].as_bytes())?;
            self.printed = output.len();
        }
        self.out.flush()
    }
}

impl<W: Write + Send + 'static> Reconcile<TaskStatus> for TaskOutputWriter<W> {
    fn reconcile(&mut self, fetched: TaskStatus) -> PollControl {
        let merge = self.view.merge(fetched);
        let mut control = PollControl::Continue;
        if merge == TaskMerge::Stopped {
            control = PollControl::Stop;
        }
        if let Err(err) = self.flush_new_output() {
            warn!(error = %err, "failed to write task output");
            return PollControl::Stop;
        }
        if control == PollControl::Stop {
            if let Err(err) = writeln!(self.out, "[{}]", self.view.title()) {
                warn!(error = %err, "failed to write task trailer");
            }
        }
        control
    }
}

/// Installs a freshly fetched module form and dispatches its interface lookups
pub struct ModuleFormReconciler {
    api: Arc<dyn ResourceApi>,
    view: SharedView,
    epoch: Epoch,
    lookups: CancellationToken,
}

impl ModuleFormReconciler {
    pub fn new(
        api: Arc<dyn ResourceApi>,
        view: SharedView,
        epoch: Epoch,
        lookups: CancellationToken,
    ) -> Self {
        Self {
            api,
            view,
            epoch,
            lookups,
        }
    }
}

impl Reconcile<Module> for ModuleFormReconciler {
    fn reconcile(&mut self, fetched: Module) -> PollControl {
        let form = ModuleForm::build(fetched);
        let pending = form.pending_lookups();
        {
            let mut view = lock_view(&self.view);
            let Some(body) = view.content.body_for(self.epoch) else {
                return PollControl::Stop;
            };
            *body = ContentBody::Module(form);
        }

        for argument in pending {
            let api = self.api.clone();
            let label = format!("interfaces:{argument}");
            // Lookups end with the parent token, not with this reconciler
            Poller::once_with_token(
                label,
                self.lookups.child_token(),
                move || {
                    let api = api.clone();
                    async move { api.list_interfaces().await }
                },
                InterfaceLookupReconciler::new(self.view.clone(), self.epoch, argument),
            )
            .detach();
        }
        PollControl::Stop
    }

    fn on_error(&mut self, error: &InterceptorError) -> PollControl {
        let mut view = lock_view(&self.view);
        if let Some(body) = view.content.body_for(self.epoch) {
            let title = match body {
                ContentBody::Loading(title) => title.clone(),
                _ => String::new(),
            };
            *body = ContentBody::Failed {
                title,
                reason: error.to_string(),
            };
        }
        PollControl::Stop
    }
}

/// Populates one interface chooser of the bound module form
pub struct InterfaceLookupReconciler {
    view: SharedView,
    epoch: Epoch,
    argument: String,
}

impl InterfaceLookupReconciler {
    pub fn new(view: SharedView, epoch: Epoch, argument: String) -> Self {
        Self {
            view,
            epoch,
            argument,
        }
    }

    fn with_select(&self, apply: impl FnOnce(&mut InterfaceSelect)) {
        let mut view = lock_view(&self.view);
        let select = view
            .content
            .body_for(self.epoch)
            .and_then(ContentBody::module_form_mut)
            .and_then(|form| form.widget_mut(&self.argument))
            .and_then(ArgWidget::interface_select_mut);
        match select {
            Some(select) => apply(select),
            None => debug!(argument = %self.argument, "dropping interface lookup for unbound form"),
        }
    }
}

impl Reconcile<Vec<Interface>> for InterfaceLookupReconciler {
    fn reconcile(&mut self, fetched: Vec<Interface>) -> PollControl {
        self.with_select(|select| select.populate(fetched));
        PollControl::Stop
    }

    fn on_error(&mut self, error: &InterceptorError) -> PollControl {
        let reason = error.to_string();
        self.with_select(|select| select.fail(reason));
        PollControl::Stop
    }
}

/// Fills the host detail panel
pub struct HostDetailReconciler {
    view: SharedView,
    epoch: Epoch,
}

impl HostDetailReconciler {
    pub fn new(view: SharedView, epoch: Epoch) -> Self {
        Self { view, epoch }
    }
}

impl Reconcile<Host> for HostDetailReconciler {
    fn reconcile(&mut self, fetched: Host) -> PollControl {
        let mut view = lock_view(&self.view);
        let detail = &mut view.database.detail;
        if detail.is_bound(self.epoch) {
            detail.host = Some(fetched);
        }
        PollControl::Stop
    }

    fn on_error(&mut self, error: &InterceptorError) -> PollControl {
        let mut view = lock_view(&self.view);
        let detail = &mut view.database.detail;
        if detail.is_bound(self.epoch) {
            detail.error = Some(error.to_string());
        }
        PollControl::Stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewState;

    fn status(running: bool, full: &str, new: Option<&str>) -> TaskStatus {
        TaskStatus {
            name: "task-9".to_string(),
            running,
            full_output: full.to_string(),
            new_output: new.map(str::to_string),
        }
    }

    fn host(id: &str) -> Host {
        Host {
            id: id.to_string(),
            ipv4: None,
            ipv6: None,
            mac: None,
        }
    }

    #[test]
    fn list_reconciler_ignores_superseded_epoch() {
        let view = ViewState::shared();
        let stale = lock_view(&view).database.hosts.rebind();
        let current = lock_view(&view).database.hosts.rebind();

        let mut old = ListReconciler::new(view.clone(), stale, ViewState::hosts_mut);
        assert_eq!(old.reconcile(vec![host("1")]), PollControl::Stop);
        assert!(lock_view(&view).database.hosts.entries().is_empty());

        let mut live = ListReconciler::new(view.clone(), current, ViewState::hosts_mut);
        assert_eq!(live.reconcile(vec![host("1")]), PollControl::Continue);
        assert_eq!(lock_view(&view).database.hosts.entries().len(), 1);
    }

    #[test]
    fn task_reconciler_reports_stop() {
        let view = ViewState::shared();
        let epoch = lock_view(&view)
            .content
            .bind(ContentBody::Task(TaskOutputView::new("task-9")));
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut reconciler = TaskOutputReconciler::new(view.clone(), epoch, tx);

        assert_eq!(
            reconciler.reconcile(status(true, "a\n", None)),
            PollControl::Continue
        );
        assert_eq!(
            reconciler.reconcile(status(false, "a\nb\n", None)),
            PollControl::Stop
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            ConsoleEvent::TaskStopped {
                name: "task-9".to_string()
            }
        );
        assert_eq!(
            lock_view(&view).content.body.task().unwrap().output(),
            "a\nb\n"
        );
    }

    #[test]
    fn task_reconciler_stops_when_content_rebound() {
        let view = ViewState::shared();
        let epoch = lock_view(&view)
            .content
            .bind(ContentBody::Task(TaskOutputView::new("task-9")));
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let mut reconciler = TaskOutputReconciler::new(view.clone(), epoch, tx);

        lock_view(&view).content.clear();
        assert_eq!(
            reconciler.reconcile(status(true, "late\n", None)),
            PollControl::Stop
        );
        assert!(matches!(lock_view(&view).content.body, ContentBody::Empty));
    }

    #[test]
    fn writer_prints_each_byte_once() {
        let mut writer = TaskOutputWriter::new("task-9", Vec::new());
        writer.reconcile(status(true, "a\n", None));
        writer.reconcile(status(true, "a\nb\n", Some("b\n")));
        writer.reconcile(status(true, "a\nb\n", Some("")));
        assert_eq!(
            writer.reconcile(status(false, "a\nb\nc\n", None)),
            PollControl::Stop
        );

        let printed = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(printed, "a\nb\nc\n[task-9 (stopped)]\n");
    }

    /// Accepts `budget` writes, then refuses every later one
    struct ShortSink {
        written: Vec<u8>,
        budget: usize,
    }

    impl Write for ShortSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.budget == 0 {
                return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
            }
            self.budget -= 1;
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_stops_cleanly_when_trailer_cannot_be_written() {
        let sink = ShortSink {
            written: Vec::new(),
            budget: 1,
        };
        let mut writer = TaskOutputWriter::new("task-9", sink);
        assert_eq!(
            writer.reconcile(status(false, "done\n", None)),
            PollControl::Stop
        );
        assert_eq!(writer.into_inner().written, b"done\n");
    }

    #[test]
    fn host_detail_error_is_recorded_for_bound_epoch() {
        let view = ViewState::shared();
        let epoch = lock_view(&view).database.detail.bind();
        let mut reconciler = HostDetailReconciler::new(view.clone(), epoch);

        reconciler.on_error(&InterceptorError::InvalidResponse("nope".to_string()));
        assert!(lock_view(&view).database.detail.error.is_some());
        assert!(lock_view(&view).database.detail.host.is_none());
    }
}
