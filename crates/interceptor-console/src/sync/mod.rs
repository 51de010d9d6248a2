/*
[INPUT]:  Fetch closures and the shared view
[OUTPUT]: Poll chains, staleness epochs and pane reconcilers
[POS]:    Sync layer - keeps the view consistent with the remote service
[UPDATE]: When adding polling cadences or reconcilers
*/

mod epoch;
mod poller;
mod reconcile;

use std::time::Duration;

pub use epoch::{Epoch, EpochCounter};
pub use poller::{PollControl, PollHandle, Poller, Reconcile};
pub use reconcile::{
    HostDetailReconciler, InterfaceLookupReconciler, ListReconciler, ModuleFormReconciler,
    PaneSelector, TaskOutputReconciler, TaskOutputWriter,
};

/// Cadence of the module, task and host list refresh
pub const LIST_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Cadence of the live task output refresh
pub const TASK_POLL_INTERVAL: Duration = Duration::from_millis(500);
