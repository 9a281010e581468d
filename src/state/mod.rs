// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state management types.
//!
//! This module provides the state value object and the cache the
//! coordinator keeps it in. [`DeviceState`] describes the unit at one
//! instant, [`Snapshot`] wraps the last accepted state with a sequence
//! number and a freshness flag, and [`StateCache`] holds the latest
//! snapshot.
//!
//! # Examples
//!
//! ```
//! use homeeasy_lib::state::{DeviceState, StateCache};
//!
//! let cache = StateCache::new();
//! assert!(cache.get().is_none());
//!
//! let snapshot = cache.store(DeviceState::default());
//! assert_eq!(snapshot.sequence(), 1);
//! assert!(snapshot.is_fresh());
//! ```

mod cache;
mod device_state;
mod snapshot;

pub use cache::StateCache;
pub use device_state::DeviceState;
pub use snapshot::Snapshot;
