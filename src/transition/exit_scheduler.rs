use std::time::Duration;

use smallvec::SmallVec;
use tracing::{debug, trace};

/// Handle to one scheduled prune.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExitToken(u64);

#[derive(Debug, Clone, PartialEq)]
struct ExitTask {
    token: ExitToken,
    due: Duration,
    identities: SmallVec<[String; 4]>,
}

/// Delayed, cancellable removal of exiting identities.
///
/// Time is whatever monotonic clock the caller passes in, so tests can drive
/// it step by step. The scheduler only decides *when*; the registry still
/// re-checks at prune time that each identity is exiting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExitScheduler {
    next_token: u64,
    tasks: Vec<ExitTask>,
}

impl ExitScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a prune of `identities` at `now + delay`.
    ///
    /// Returns `None` when there is nothing to schedule.
    pub fn schedule<I>(&mut self, identities: I, now: Duration, delay: Duration) -> Option<ExitToken>
    where
        I: IntoIterator<Item = String>,
    {
        let identities: SmallVec<[String; 4]> = identities.into_iter().collect();
        if identities.is_empty() {
            return None;
        }
        let token = ExitToken(self.next_token);
        self.next_token += 1;
        let due = now.saturating_add(delay);
        debug!(
            token = token.0,
            count = identities.len(),
            due_ms = due.as_millis() as u64,
            "scheduled exit prune"
        );
        self.tasks.push(ExitTask {
            token,
            due,
            identities,
        });
        Some(token)
    }

    /// Cancels a pending prune. Returns whether it was still pending.
    pub fn cancel(&mut self, token: ExitToken) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.token != token);
        before != self.tasks.len()
    }

    /// Drops `identity` from every pending prune. Returns whether any
    /// prune referenced it.
    pub fn revive(&mut self, identity: &str) -> bool {
        let mut found = false;
        for task in &mut self.tasks {
            let before = task.identities.len();
            task.identities.retain(|id| id != identity);
            found |= before != task.identities.len();
        }
        self.tasks.retain(|task| !task.identities.is_empty());
        if found {
            trace!(identity, "revived identity removed from pending prune");
        }
        found
    }

    pub fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            debug!(count = self.tasks.len(), "cancelled pending exit prunes");
        }
        self.tasks.clear();
    }

    /// Removes and returns the identities of every prune due at `now`, in
    /// scheduling order.
    pub fn take_due(&mut self, now: Duration) -> Vec<String> {
        let mut due = Vec::new();
        self.tasks.retain_mut(|task| {
            if task.due <= now {
                due.extend(task.identities.drain(..));
                false
            } else {
                true
            }
        });
        due
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_pending(&self, identity: &str) -> bool {
        self.tasks
            .iter()
            .any(|task| task.identities.iter().any(|id| id == identity))
    }

    /// Earliest pending deadline, for hosts that arm a real timer.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.iter().map(|task| task.due).min()
    }
}
