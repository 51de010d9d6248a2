/*
[INPUT]:  Selection changes of a view pane
[OUTPUT]: Monotonic generation tokens used to discard late async results
[POS]:    Sync layer - staleness guard shared by every pane
[UPDATE]: When panes gain new binding rules
*/

/// Generation marker captured when an async render is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(u64);

impl Epoch {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Per-pane generation counter; advancing it unbinds every in-flight render
#[derive(Debug, Default)]
pub struct EpochCounter {
    current: Epoch,
}

impl EpochCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Epoch {
        self.current
    }

    /// Invalidate everything dispatched so far and return the new generation
    pub fn advance(&mut self) -> Epoch {
        self.current = Epoch(self.current.0.wrapping_add(1));
        self.current
    }

    pub fn is_current(&self, epoch: Epoch) -> bool {
        self.current == epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_invalidates_previous_epochs() {
        let mut counter = EpochCounter::new();
        let first = counter.advance();
        assert!(counter.is_current(first));

        let second = counter.advance();
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
        assert!(second > first);
    }
}
