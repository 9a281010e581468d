// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state coordination.
//!
//! The [`Coordinator`] is the single owner of a device connection. It
//! combines the transport, the state cache, the refresh timers and the
//! subscriber registry:
//!
//! ```text
//! poll timer ─┐
//! debounce ───┼─> refresh (single flight) ─> transport ─> cache ─> subscribers
//! caller ─────┘                                              ^
//! push ──────────────────────────────────────────────────────┘
//! ```
//!
//! # Connection lifecycle
//!
//! Connections open lazily on the first refresh or send and are reused
//! until a transport call fails. A failure moves the coordinator back to
//! [`ConnectionState::Disconnected`] without retrying; the next operation
//! reconnects. Retries are therefore bounded by the polling cadence.
//!
//! # Failures
//!
//! A failed refresh keeps the cached snapshot but flags it stale, and is
//! reported only to its callers. Subscribers see successful updates only.

mod builder;
mod coordinator_config;
mod device_coordinator;
mod link;
mod single_flight;

pub use builder::CoordinatorBuilder;
pub use coordinator_config::{CoordinatorConfig, ViewToggles};
pub use device_coordinator::Coordinator;
pub use link::ConnectionState;
