/*
[INPUT]:  Successive TaskStatus snapshots of one task
[OUTPUT]: Append-only output buffer with Awaiting/Running/Stopped phases
[POS]:    View layer - live task output pane
[UPDATE]: When changing how incremental output is merged
*/

use interceptor_adapter::TaskStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPhase {
    /// No snapshot received yet
    Awaiting,
    Running,
    Stopped,
}

/// What a merge did to the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskMerge {
    /// First snapshot rendered the whole output
    Rendered,
    /// Incremental output appended to the buffer
    Appended,
    /// Nothing new this cycle
    Unchanged,
    /// Final render; no further cycles are needed
    Stopped,
}

#[derive(Debug, Clone)]
pub struct TaskOutputView {
    name: String,
    phase: TaskPhase,
    output: String,
    appended_chunks: u64,
}

impl TaskOutputView {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phase: TaskPhase::Awaiting,
            output: String::new(),
            appended_chunks: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> TaskPhase {
        self.phase
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn is_running(&self) -> bool {
        self.phase == TaskPhase::Running
    }

    /// Header line, e.g. `task-3 (stopped)`
    pub fn title(&self) -> String {
        match self.phase {
            TaskPhase::Stopped => format!("{} (stopped)", self.name),
            _ => self.name.clone(),
        }
    }

    pub fn appended_chunks(&self) -> u64 {
        self.appended_chunks
    }

    /// Fold one snapshot into the buffer
    ///
    /// Rendered output is never truncated while the task runs. Once the task
    /// reports stopped, the server's full output wins if it is at least as long
    /// as what has been rendered.
    pub fn merge(&mut self, fetched: TaskStatus) -> TaskMerge {
        match self.phase {
            TaskPhase::Stopped => TaskMerge::Unchanged,
            TaskPhase::Awaiting => {
                self.output = fetched.full_output;
                if fetched.running {
                    self.phase = TaskPhase::Running;
                    TaskMerge::Rendered
                } else {
                    self.phase = TaskPhase::Stopped;
                    TaskMerge::Stopped
                }
            }
            TaskPhase::Running if !fetched.running => {
                if fetched.full_output.len() >= self.output.len() {
                    self.output = fetched.full_output;
                }
                self.phase = TaskPhase::Stopped;
                TaskMerge::Stopped
            }
            TaskPhase::Running => match fetched.new_output {
                Some(chunk) if !chunk.is_empty() => {
                    self.output.push_str(&chunk);
                    self.appended_chunks += 1;
                    TaskMerge::Appended
                }
                _ => TaskMerge::Unchanged,
            },
        }
    }
}
