// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-slot state cache.

use parking_lot::RwLock;

use super::{DeviceState, Snapshot};

/// Holds the latest [`Snapshot`].
///
/// The coordinator is the only writer; any number of readers may call
/// [`get`](Self::get) concurrently. Writes replace the whole snapshot under
/// the lock, so a reader never sees a partially updated state.
///
/// The sequence counter survives [`clear`](Self::clear), so sequence numbers
/// never repeat within one cache.
#[derive(Debug, Default)]
pub struct StateCache {
    inner: RwLock<CacheSlot>,
}

#[derive(Debug, Default)]
struct CacheSlot {
    snapshot: Option<Snapshot>,
    last_sequence: u64,
}

impl StateCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current snapshot, if any.
    #[must_use]
    pub fn get(&self) -> Option<Snapshot> {
        self.inner.read().snapshot.clone()
    }

    /// Stores a new state and returns the resulting fresh snapshot.
    pub fn store(&self, state: DeviceState) -> Snapshot {
        let mut slot = self.inner.write();
        slot.last_sequence += 1;
        let snapshot = Snapshot::new(state, slot.last_sequence);
        slot.snapshot = Some(snapshot.clone());
        snapshot
    }

    /// Flags the current snapshot as stale.
    ///
    /// Returns `true` if a fresh snapshot was flagged.
    pub fn mark_stale(&self) -> bool {
        let mut slot = self.inner.write();
        match slot.snapshot.as_mut() {
            Some(snapshot) if snapshot.is_fresh() => {
                snapshot.mark_stale();
                true
            }
            _ => false,
        }
    }

    /// Drops the snapshot.
    pub fn clear(&self) {
        self.inner.write().snapshot = None;
    }

    /// Returns the sequence number of the last stored snapshot (0 if none).
    #[must_use]
    pub fn last_sequence(&self) -> u64 {
        self.inner.read().last_sequence
    }
}
