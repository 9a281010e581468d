// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached snapshot of the device state.

use chrono::{DateTime, Utc};

use super::DeviceState;

/// The last accepted [`DeviceState`] plus bookkeeping.
///
/// The sequence number grows by one on every accepted update, whether it
/// came from a poll, a write confirmation or a push. Comparing sequence
/// numbers tells a writer whether a read already reflects its change.
///
/// A snapshot turns stale when a later refresh or write fails; the state it
/// carries is still the last thing the device reported.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    state: DeviceState,
    sequence: u64,
    fresh: bool,
    updated_at: DateTime<Utc>,
}

impl Snapshot {
    pub(crate) fn new(state: DeviceState, sequence: u64) -> Self {
        Self {
            state,
            sequence,
            fresh: true,
            updated_at: Utc::now(),
        }
    }

    /// Returns the device state.
    #[must_use]
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Returns the sequence number of this snapshot.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns `false` if an operation failed after this snapshot was taken.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// Returns when the device reported this state.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn mark_stale(&mut self) {
        self.fresh = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snapshot_is_fresh() {
        let snapshot = Snapshot::new(DeviceState::default(), 1);
        assert!(snapshot.is_fresh());
        assert_eq!(snapshot.sequence(), 1);
        assert_eq!(snapshot.state(), &DeviceState::default());
    }

    #[test]
    fn stale_keeps_state_and_sequence() {
        let mut snapshot = Snapshot::new(DeviceState::default(), 7);
        let before = snapshot.updated_at();
        snapshot.mark_stale();
        assert!(!snapshot.is_fresh());
        assert_eq!(snapshot.sequence(), 7);
        assert_eq!(snapshot.updated_at(), before);
    }
}
