//! Cancellable scheduled tasks
//!
//! The controller never sleeps or holds closures. It asks a `Scheduler` for
//! a one-shot or repeating task and gets back a `TaskHandle`; the host
//! delivers the handle back when the task fires. Cancelled tasks must not
//! fire, and the controller also drops any handle it no longer tracks.

use std::collections::BTreeMap;

/// Opaque id for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(pub i32);

/// Timer and deferred-transition backend
pub trait Scheduler {
    /// Fire every `period_ms` until cancelled
    fn schedule_repeating(&mut self, period_ms: u32) -> TaskHandle;
    /// Fire once after `delay_ms`
    fn schedule_once(&mut self, delay_ms: u32) -> TaskHandle;
    fn cancel(&mut self, handle: TaskHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ManualTask {
    period_ms: Option<u32>,
    /// Absolute time of the next firing
    due_ms: u64,
}

/// Scheduler driven by explicit time advances.
///
/// Hosts without an event loop (the native demo, tests) call
/// `advance(ms)` to collect the handles that came due, then deliver each
/// to the controller.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_id: i32,
    tasks: BTreeMap<TaskHandle, ManualTask>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_active(&self, handle: TaskHandle) -> bool {
        self.tasks.contains_key(&handle)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    fn insert(&mut self, period_ms: Option<u32>, delay_ms: u32) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.tasks.insert(
            handle,
            ManualTask {
                period_ms,
                due_ms: self.now_ms + u64::from(delay_ms),
            },
        );
        handle
    }

    /// Move the clock forward, returning the next task to fire at or before
    /// the target time. Call repeatedly until `None`, delivering each handle
    /// before asking again so cancellations made by the receiver apply.
    pub fn next_due(&mut self, until_ms: u64) -> Option<TaskHandle> {
        let (&handle, &task) = self
            .tasks
            .iter()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(h, t)| (t.due_ms, **h))?;

        self.now_ms = self.now_ms.max(task.due_ms);
        match task.period_ms {
            Some(period) => {
                if let Some(entry) = self.tasks.get_mut(&handle) {
                    entry.due_ms += u64::from(period.max(1));
                }
            }
            None => {
                self.tasks.remove(&handle);
            }
        }
        Some(handle)
    }

    /// Finish an advance started with `next_due`
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, period_ms: u32) -> TaskHandle {
        self.insert(Some(period_ms), period_ms)
    }

    fn schedule_once(&mut self, delay_ms: u32) -> TaskHandle {
        self.insert(None, delay_ms)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.tasks.remove(&handle);
    }
}
