// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for snapshot subscriptions.
//!
//! This module provides the core types for managing subscription callbacks:
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::state::Snapshot;

/// Unique identifier for a subscription.
///
/// This ID is returned when creating a subscription and can be used to
/// unsubscribe later. IDs are unique within a coordinator's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a new subscription ID with the given value.
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Type alias for snapshot callbacks.
type SnapshotCallback = Arc<dyn Fn(&Snapshot) + Send + Sync>;

/// Registry for snapshot subscription callbacks.
///
/// It uses `parking_lot::RwLock` for interior mutability. Callbacks are
/// wrapped in `Arc` so dispatch can copy the current set and release the
/// lock before calling out; a callback may therefore subscribe or
/// unsubscribe without deadlocking.
///
/// # Delivery rules
///
/// - Callbacks run synchronously in subscription order.
/// - A callback removed with [`unsubscribe`](Self::unsubscribe) is not
///   called again, even by a dispatch that is already running, unless that
///   dispatch has already reached it.
/// - A panicking callback is logged and skipped; remaining callbacks still
///   run.
pub struct CallbackRegistry {
    /// Counter for generating unique subscription IDs.
    next_id: AtomicU64,
    /// Snapshot callbacks, ordered by subscription.
    callbacks: RwLock<BTreeMap<SubscriptionId, SnapshotCallback>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            callbacks: RwLock::new(BTreeMap::new()),
        }
    }

    /// Generates a new unique subscription ID.
    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers a callback for new snapshots.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed. Removing an ID
    /// twice is harmless.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.callbacks.write().clear();
    }

    /// Dispatches a snapshot to every registered callback.
    ///
    /// Returns the number of callbacks that completed without panicking.
    pub fn dispatch(&self, snapshot: &Snapshot) -> usize {
        let targets: Vec<(SubscriptionId, SnapshotCallback)> = self
            .callbacks
            .read()
            .iter()
            .map(|(id, callback)| (*id, Arc::clone(callback)))
            .collect();

        let mut delivered = 0;
        for (id, callback) in targets {
            // Skip anything unsubscribed since the copy was taken
            if !self.callbacks.read().contains_key(&id) {
                continue;
            }
            match catch_unwind(AssertUnwindSafe(|| callback(snapshot))) {
                Ok(()) => delivered += 1,
                Err(panic) => {
                    let reason = panic_message(panic.as_ref());
                    tracing::error!(
                        subscription = %id,
                        sequence = snapshot.sequence(),
                        reason = %reason,
                        "Subscriber panicked while handling snapshot"
                    );
                }
            }
        }
        delivered
    }

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DeviceState, StateCache};
    use std::sync::atomic::AtomicU32;

    fn snapshot() -> Snapshot {
        StateCache::new().store(DeviceState::default())
    }

    #[test]
    fn subscription_id_display() {
        let id = SubscriptionId::new(42);
        assert_eq!(id.to_string(), "Sub(42)");
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CallbackRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.callback_count(), 0);
    }

    #[test]
    fn dispatch_reaches_subscriber() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let id = registry.subscribe(move |_snapshot| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(registry.dispatch(&snapshot()), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        assert!(registry.unsubscribe(id));
        assert!(registry.is_empty());

        // Dispatch again - counter should not change
        assert_eq!(registry.dispatch(&snapshot()), 0);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let registry = CallbackRegistry::new();
        let id = registry.subscribe(|_| {});

        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        assert!(!registry.unsubscribe(SubscriptionId::new(999)));
    }

    #[test]
    fn panicking_subscriber_does_not_stop_delivery() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        registry.subscribe(|_| panic!("subscriber failure"));
        registry.subscribe(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(registry.dispatch(&snapshot()), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(registry.callback_count(), 2);
    }

    #[test]
    fn unsubscribe_during_dispatch_skips_later_subscriber() {
        let registry = Arc::new(CallbackRegistry::new());
        let counter = Arc::new(AtomicU32::new(0));

        // The second subscription is created after the first, so it is
        // dispatched later; the first removes it mid-dispatch.
        let later = Arc::new(parking_lot::Mutex::new(None::<SubscriptionId>));
        let registry_clone = Arc::clone(&registry);
        let later_clone = Arc::clone(&later);
        registry.subscribe(move |_| {
            if let Some(id) = *later_clone.lock() {
                registry_clone.unsubscribe(id);
            }
        });

        let counter_clone = counter.clone();
        let id = registry.subscribe(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        *later.lock() = Some(id);

        assert_eq!(registry.dispatch(&snapshot()), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn dispatch_in_subscription_order() {
        let registry = CallbackRegistry::new();
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

        for tag in 0..3 {
            let order = Arc::clone(&order);
            registry.subscribe(move |_| order.lock().push(tag));
        }

        registry.dispatch(&snapshot());
        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn registry_clear() {
        let registry = CallbackRegistry::new();
        registry.subscribe(|_| {});
        registry.subscribe(|_| {});
        assert_eq!(registry.callback_count(), 2);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_debug() {
        let registry = CallbackRegistry::new();
        registry.subscribe(|_| {});

        let debug = format!("{registry:?}");
        assert!(debug.contains("CallbackRegistry"));
        assert!(debug.contains("callback_count"));
    }
}
