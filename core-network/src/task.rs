//! Cancellation primitives and the single-slot task discipline.
//!
//! A repository owns exactly one live [`TaskHandle`] through a
//! [`TaskSlot`]; storing a new handle cancels and discards the prior one,
//! so no two pipelines run concurrently against the same repository
//! instance. Cancelling a handle marks its token and aborts the spawned
//! task, which guarantees the pipeline's callbacks never fire afterwards.

use std::future::Future;
use std::sync::Mutex;
use tokio::task::AbortHandle;
pub use tokio_util::sync::CancellationToken;

/// A handle representing an in-flight operation that can be cancelled
/// before completion. Cancellation is idempotent; cancelling an already
/// completed task is a no-op.
pub trait Cancellable: Send + Sync {
    fn cancel(&self);
    fn is_cancelled(&self) -> bool;
}

/// Handle to one spawned pipeline task.
#[derive(Clone)]
pub struct TaskHandle {
    token: CancellationToken,
    abort: AbortHandle,
}

impl TaskHandle {
    /// Spawn a pipeline onto the current Tokio runtime.
    ///
    /// The factory receives the task's cancellation token; the pipeline is
    /// expected to re-check it immediately before dispatching network work
    /// and before invoking any callback.
    pub fn spawn<F, Fut>(make: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let join = tokio::spawn(make(token.clone()));
        Self {
            token,
            abort: join.abort_handle(),
        }
    }

    /// Token shared with the spawned pipeline.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Cancellable for TaskHandle {
    fn cancel(&self) {
        // Mark first so a pipeline racing the abort still sees the token.
        self.token.cancel();
        self.abort.abort();
    }

    fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Single-slot holder for a repository's current task.
#[derive(Default)]
pub struct TaskSlot {
    current: Mutex<Option<TaskHandle>>,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel and discard whatever task is currently held.
    pub fn cancel(&self) {
        let mut slot = self.lock();
        if let Some(previous) = slot.take() {
            previous.cancel();
        }
    }

    /// Store `handle` as the current task, cancelling the prior one first.
    pub fn replace(&self, handle: TaskHandle) {
        let mut slot = self.lock();
        if let Some(previous) = slot.take() {
            previous.cancel();
        }
        *slot = Some(handle);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<TaskHandle>> {
        match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_replace_cancels_previous_task() {
        let slot = TaskSlot::new();

        let first_finished = Arc::new(AtomicBool::new(false));
        let flag = first_finished.clone();
        let first = TaskHandle::spawn(move |_| async move {
            std::future::pending::<()>().await;
            // Aborted before this line can run.
            flag.store(true, Ordering::SeqCst);
        });
        slot.replace(first.clone());

        let second = TaskHandle::spawn(|_| async {});
        slot.replace(second.clone());

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!first_finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let handle = TaskHandle::spawn(|token| async move {
            token.cancelled().await;
        });

        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancel_after_completion_is_noop() {
        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();
        let handle = TaskHandle::spawn(move |_| async move {
            flag.store(true, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(done.load(Ordering::SeqCst));

        handle.cancel();
        assert!(handle.is_cancelled());
    }
}
