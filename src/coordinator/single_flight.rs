// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collapses concurrent calls onto one execution.

use parking_lot::Mutex;
use tokio::sync::watch;

/// A slot for at most one in-flight operation whose result is shared.
///
/// The first caller starts the operation and every caller that arrives
/// before it completes receives the same result. A caller that arrives
/// after completion starts a new operation.
#[derive(Debug)]
pub(crate) struct SingleFlight<R> {
    slot: Mutex<Option<watch::Receiver<Option<R>>>>,
}

impl<R: Clone> SingleFlight<R> {
    pub(crate) fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Joins the running flight, or calls `start` with the sender that
    /// must publish the result of a new one.
    pub(crate) fn join_or_start<F>(&self, start: F) -> watch::Receiver<Option<R>>
    where
        F: FnOnce(watch::Sender<Option<R>>),
    {
        let mut slot = self.slot.lock();
        if let Some(running) = slot.as_ref().filter(|rx| in_flight(rx)) {
            tracing::debug!("Joining in-flight operation");
            return running.clone();
        }

        let (tx, rx) = watch::channel(None);
        *slot = Some(rx.clone());
        start(tx);
        rx
    }
}

/// A flight is running while it has neither published nor been dropped.
fn in_flight<R>(rx: &watch::Receiver<Option<R>>) -> bool {
    rx.borrow().is_none() && rx.has_changed().is_ok()
}

/// Waits for a flight's result.
///
/// Returns `None` if the flight was dropped without publishing.
pub(crate) async fn wait<R: Clone>(mut rx: watch::Receiver<Option<R>>) -> Option<R> {
    rx.wait_for(Option::is_some)
        .await
        .ok()
        .and_then(|result| result.clone())
}
