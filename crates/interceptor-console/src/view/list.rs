/*
[INPUT]:  Fetched resource lists (modules, tasks, hosts, services, credentials)
[OUTPUT]: ListPane with exclusive selection and additions-only staleness check
[POS]:    View layer - list panes refreshed by periodic polling
[UPDATE]: When changing the re-render policy of polled lists
*/

use std::collections::HashSet;

use interceptor_adapter::{Credential, Host, ModuleSummary, Service, TaskSummary};

use crate::sync::{Epoch, EpochCounter};

/// Stable identity of a list entry
pub trait Keyed {
    fn key(&self) -> String;
}

impl Keyed for Host {
    fn key(&self) -> String {
        self.id.clone()
    }
}

impl Keyed for Service {
    fn key(&self) -> String {
        self.id.clone()
    }
}

impl Keyed for Credential {
    fn key(&self) -> String {
        self.id.clone()
    }
}

/// Sidebar row for a module or task name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub name: String,
}

impl Keyed for SidebarEntry {
    fn key(&self) -> String {
        self.name.clone()
    }
}

impl From<ModuleSummary> for SidebarEntry {
    fn from(summary: ModuleSummary) -> Self {
        Self { name: summary.name }
    }
}

impl From<TaskSummary> for SidebarEntry {
    fn from(summary: TaskSummary) -> Self {
        Self { name: summary.name }
    }
}

/// Rendered list plus the single active entry
///
/// A fetched snapshot replaces the rendered one only when it contains a key
/// that is not rendered yet. Removals alone never trigger a re-render.
#[derive(Debug)]
pub struct ListPane<T> {
    epoch: EpochCounter,
    entries: Vec<T>,
    active: Option<String>,
    loaded: bool,
    render_count: u64,
}

impl<T> Default for ListPane<T> {
    fn default() -> Self {
        Self {
            epoch: EpochCounter::new(),
            entries: Vec::new(),
            active: None,
            loaded: false,
            render_count: 0,
        }
    }
}

impl<T: Keyed + Clone> ListPane<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch.current()
    }

    pub fn is_bound(&self, epoch: Epoch) -> bool {
        self.epoch.is_current(epoch)
    }

    /// Detach in-flight pollers and clear the pane for a new data source
    pub fn rebind(&mut self) -> Epoch {
        self.entries.clear();
        self.active = None;
        self.loaded = false;
        self.epoch.advance()
    }

    /// Detach in-flight pollers but keep the rendered rows; the next fetch re-renders
    pub fn invalidate(&mut self) -> Epoch {
        self.loaded = false;
        self.epoch.advance()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Number of full renders since creation
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.key() == key)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.iter().find(|entry| entry.key() == key)
    }

    /// Whether `fetched` must replace the rendered list
    pub fn is_stale(&self, fetched: &[T]) -> bool {
        if !self.loaded {
            return true;
        }
        let rendered: HashSet<String> = self.entries.iter().map(Keyed::key).collect();
        fetched.iter().any(|entry| !rendered.contains(&entry.key()))
    }

    /// Replace the rendered list; the active key survives if still present
    pub fn render(&mut self, fetched: Vec<T>) {
        self.entries = fetched;
        self.loaded = true;
        self.render_count += 1;
        if let Some(active) = &self.active {
            if !self.contains(active) {
                self.active = None;
            }
        }
    }

    /// Apply the additions-only policy; returns whether a render happened
    pub fn refresh(&mut self, fetched: Vec<T>) -> bool {
        if self.is_stale(&fetched) {
            self.render(fetched);
            true
        } else {
            false
        }
    }

    /// Make `key` the only active entry; unknown keys leave the selection untouched
    pub fn activate(&mut self, key: &str) -> bool {
        if self.contains(key) {
            self.active = Some(key.to_string());
            true
        } else {
            false
        }
    }

    pub fn deactivate(&mut self) {
        self.active = None;
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&T> {
        self.active.as_deref().and_then(|key| self.get(key))
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.active.as_deref() == Some(key)
    }
}
