//! Cooperative repeating tasks
//!
//! A [`RepeatingTask`] is polled by its host loop and reports when it is due.
//! Starting an already scheduled task is a no-op, so a task never runs more
//! than once per poll no matter how often it was started.

/// Scheduling state of a task
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TaskState {
    Cancelled,
    /// `None` means due on the next poll
    Scheduled { next_due_ms: Option<u64> },
}

/// A "repeat until cancelled" task with a fixed interval
#[derive(Clone, Debug)]
pub struct RepeatingTask {
    name: &'static str,
    /// Minimum time between runs; 0 runs on every poll
    interval_ms: u64,
    state: TaskState,
}

impl RepeatingTask {
    /// Create a task in the cancelled state
    pub fn new(name: &'static str, interval_ms: u64) -> Self {
        Self {
            name,
            interval_ms,
            state: TaskState::Cancelled,
        }
    }

    /// Schedule the task. Returns `false` if it was already scheduled.
    pub fn start(&mut self) -> bool {
        if self.is_scheduled() {
            return false;
        }
        self.state = TaskState::Scheduled { next_due_ms: None };
        log::debug!("Task '{}' scheduled every {} ms", self.name, self.interval_ms);
        true
    }

    /// Stop scheduling. Returns `false` if it was not scheduled.
    pub fn cancel(&mut self) -> bool {
        if !self.is_scheduled() {
            return false;
        }
        self.state = TaskState::Cancelled;
        log::debug!("Task '{}' cancelled", self.name);
        true
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self.state, TaskState::Scheduled { .. })
    }

    /// Whether the task should run now. Advances the schedule when it does.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let TaskState::Scheduled { next_due_ms } = &mut self.state else {
            return false;
        };

        let due = match *next_due_ms {
            Some(due) if now_ms < due => return false,
            Some(due) => due,
            None => now_ms,
        };

        let mut next = due.saturating_add(self.interval_ms);

        // Re-anchor if too far behind instead of running a burst of catch-up ticks
        let max_behind = self.interval_ms.saturating_mul(2);
        if now_ms > next.saturating_add(max_behind) {
            next = now_ms.saturating_add(self.interval_ms);
        }

        *next_due_ms = Some(next);
        true
    }
}
