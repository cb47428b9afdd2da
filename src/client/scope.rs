//! View-bound request scope
//!
//! Fetches issued on behalf of a view run inside a [`ViewScope`]. Closing
//! the scope (explicitly or by dropping it) aborts every in-flight fetch, and
//! a fetch that settles after the close never applies its result.

use futures_util::future::{AbortHandle, Abortable};
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

#[derive(Default)]
struct ScopeState {
    closed: bool,
    handles: Vec<AbortHandle>,
}

/// Lifetime of a view's outstanding requests
pub struct ViewScope {
    state: Arc<Mutex<ScopeState>>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ScopeState::default())),
        }
    }

    /// Whether the owning view has been torn down
    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).closed
    }

    /// Spawn `fut` as an abortable task and hand its output to `apply`.
    ///
    /// `apply` runs under the scope lock, so once [`close`](Self::close)
    /// returns no further `apply` can start. Returns `None` when the scope is
    /// already closed.
    pub fn spawn<F, T, A>(&self, label: &'static str, fut: F, apply: A) -> Option<JoinHandle<()>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
        A: FnOnce(T) + Send + 'static,
    {
        let (handle, registration) = AbortHandle::new_pair();
        {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            if state.closed {
                tracing::debug!(request = label, "Scope closed, not spawning request");
                return None;
            }
            state.handles.push(handle);
        }

        let state = Arc::clone(&self.state);
        Some(tokio::spawn(async move {
            match Abortable::new(fut, registration).await {
                Ok(output) => {
                    let guard = state.lock().unwrap_or_else(|e| e.into_inner());
                    if guard.closed {
                        tracing::debug!(request = label, "Dropping response for closed view");
                        return;
                    }
                    apply(output);
                    drop(guard);
                }
                Err(_aborted) => {
                    tracing::debug!(request = label, "Request aborted");
                }
            }
        }))
    }

    /// Abort all in-flight requests and refuse new ones
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.closed {
            return;
        }
        state.closed = true;
        for handle in state.handles.drain(..) {
            handle.abort();
        }
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_apply_runs_while_open() {
        let scope = ViewScope::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let task = scope
            .spawn("test", async { 5usize }, move |n| {
                counter.fetch_add(n, Ordering::SeqCst);
            })
            .unwrap();
        task.await.unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_close_aborts_pending_request() {
        let scope = ViewScope::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = oneshot::channel::<usize>();

        let counter = Arc::clone(&hits);
        let task = scope
            .spawn("pending", async move { rx.await.unwrap_or(0) }, move |n| {
                counter.fetch_add(n + 1, Ordering::SeqCst);
            })
            .unwrap();

        scope.close();
        // The response arrives after teardown
        let _ = tx.send(1);
        task.await.unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(scope.is_closed());
    }

    #[tokio::test]
    async fn test_drop_aborts_pending_request() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        let task = {
            let scope = ViewScope::new();
            scope
                .spawn(
                    "slow",
                    async {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                    },
                    move |_| {
                        counter.fetch_add(1, Ordering::SeqCst);
                    },
                )
                .unwrap()
        };

        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("aborted task should finish promptly")
            .unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_spawn_after_close_is_refused() {
        let scope = ViewScope::new();
        scope.close();
        scope.close();

        let spawned = scope.spawn("late", async {}, |_| panic!("must not run"));
        assert!(spawned.is_none());
    }
}
