//! Registry of abortable effect tasks, keyed by [`EffectId`].

use skyservices_core::effect::EffectId;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::task::AbortHandle;

/// Tracks the tasks spawned under `Effect::Cancellable` so that
/// `Effect::Cancel` can abort them.
///
/// Finished tasks are pruned lazily whenever a new task is registered under
/// the same id.
#[derive(Debug, Default)]
pub(crate) struct CancellationRegistry {
    tasks: Mutex<HashMap<EffectId, Vec<AbortHandle>>>,
}

impl CancellationRegistry {
    /// Register a spawned task under `id`
    pub(crate) fn register(&self, id: &EffectId, handle: AbortHandle) {
        let mut tasks = self
            .tasks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let handles = tasks.entry(id.clone()).or_default();
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    /// Abort every unfinished task registered under `id`
    ///
    /// Returns the number of tasks that were still running.
    pub(crate) fn cancel(&self, id: &EffectId) -> usize {
        let handles = self
            .tasks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(id)
            .unwrap_or_default();

        let mut aborted = 0;
        for handle in handles {
            if !handle.is_finished() {
                handle.abort();
                aborted += 1;
            }
        }
        aborted
    }

    /// Number of unfinished tasks registered under `id`
    pub(crate) fn pending(&self, id: &EffectId) -> usize {
        self.tasks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(id)
            .map_or(0, |handles| handles.iter().filter(|h| !h.is_finished()).count())
    }
}
