// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Trailing-edge debouncer.

use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Coalesces bursts of triggers into one action.
///
/// Every [`call`](Self::call) restarts the quiet period. The action runs
/// once the quiet period elapses with no further call. Calls that arrive
/// while the action is running open a new window after it returns.
///
/// # Examples
///
/// ```
/// use std::ops::ControlFlow;
/// use std::time::Duration;
/// use homeeasy_lib::scheduler::Debouncer;
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (debouncer, pending) = Debouncer::new(Duration::from_millis(50));
/// let handle = pending.spawn(CancellationToken::new(), || async {
///     println!("settled");
///     ControlFlow::Break(())
/// });
///
/// debouncer.call();
/// debouncer.call();
/// handle.await.unwrap();
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer {
    trigger: mpsc::UnboundedSender<()>,
    cooldown: Duration,
}

/// The not yet started side of a [`Debouncer`].
#[derive(Debug)]
pub struct DebounceLoop {
    triggers: mpsc::UnboundedReceiver<()>,
    cooldown: Duration,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet period.
    ///
    /// Triggers are buffered until the returned [`DebounceLoop`] is spawned.
    #[must_use]
    pub fn new(cooldown: Duration) -> (Self, DebounceLoop) {
        let (trigger, triggers) = mpsc::unbounded_channel();
        (
            Self { trigger, cooldown },
            DebounceLoop { triggers, cooldown },
        )
    }

    /// Requests the action, restarting the quiet period.
    ///
    /// Returns `false` if the loop has stopped.
    pub fn call(&self) -> bool {
        self.trigger.send(()).is_ok()
    }

    /// Returns the quiet period.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }
}

impl DebounceLoop {
    /// Starts the loop on the current tokio runtime.
    ///
    /// The loop ends when `shutdown` is cancelled, when every [`Debouncer`]
    /// handle is dropped, or when the action returns `ControlFlow::Break`.
    pub fn spawn<F, Fut>(self, shutdown: CancellationToken, action: F) -> JoinHandle<()>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send + 'static,
    {
        tokio::spawn(self.run(shutdown, action))
    }

    async fn run<F, Fut>(mut self, shutdown: CancellationToken, mut action: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ControlFlow<()>>,
    {
        loop {
            tokio::select! {
                biased;
                () = shutdown.cancelled() => return,
                trigger = self.triggers.recv() => {
                    if trigger.is_none() {
                        return;
                    }
                }
            }

            // Wait for a full quiet period
            loop {
                tokio::select! {
                    biased;
                    () = shutdown.cancelled() => return,
                    trigger = self.triggers.recv() => match trigger {
                        Some(()) => tracing::trace!("Debounce window restarted"),
                        None => return,
                    },
                    () = tokio::time::sleep(self.cooldown) => break,
                }
            }

            if action().await.is_break() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting(counter: &Arc<AtomicU32>) -> impl FnMut() -> std::future::Ready<ControlFlow<()>> + use<> {
        let counter = Arc::clone(counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(ControlFlow::Continue(()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_fires_once_after_last_call() {
        let counter = Arc::new(AtomicU32::new(0));
        let (debouncer, pending) = Debouncer::new(Duration::from_secs(60));
        let _handle = pending.spawn(CancellationToken::new(), counting(&counter));

        for _ in 0..5 {
            debouncer.call();
            tokio::time::sleep(Duration::from_secs(10)).await;
        }
        // 10 s after the last call
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(49)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_fire_separately() {
        let counter = Arc::new(AtomicU32::new(0));
        let (debouncer, pending) = Debouncer::new(Duration::from_secs(5));
        let _handle = pending.spawn(CancellationToken::new(), counting(&counter));

        debouncer.call();
        tokio::time::sleep(Duration::from_secs(6)).await;
        debouncer.call();
        tokio::time::sleep(Duration::from_secs(6)).await;

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_drops_pending_action() {
        let counter = Arc::new(AtomicU32::new(0));
        let token = CancellationToken::new();
        let (debouncer, pending) = Debouncer::new(Duration::from_secs(5));
        let handle = pending.spawn(token.clone(), counting(&counter));

        debouncer.call();
        tokio::time::sleep(Duration::from_secs(1)).await;
        token.cancel();
        handle.await.unwrap();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert!(!debouncer.call());
    }

    #[tokio::test]
    async fn loop_ends_when_handles_dropped() {
        let counter = Arc::new(AtomicU32::new(0));
        let (debouncer, pending) = Debouncer::new(Duration::from_secs(5));
        let handle = pending.spawn(CancellationToken::new(), counting(&counter));

        drop(debouncer);
        handle.await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
