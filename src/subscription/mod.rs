// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for snapshot updates.
//!
//! This module provides a callback-based subscription system for receiving
//! a notification every time the coordinator accepts a new device state,
//! whether it came from a poll, a write confirmation or a push.
//!
//! # Overview
//!
//! - [`SubscriptionId`] - A unique identifier for a subscription, used to unsubscribe
//! - [`CallbackRegistry`] - Registry that manages callbacks and dispatches snapshots
//!
//! Failed refreshes are never dispatched; only the caller of the failing
//! operation sees the error.
//!
//! # Usage
//!
//! ```no_run
//! # use homeeasy_lib::{Coordinator, transport::Transport};
//! # fn example<T: Transport>(coordinator: &Coordinator<T>) -> homeeasy_lib::Result<()> {
//! let id = coordinator.subscribe(|snapshot| {
//!     println!("state #{}: {:?}", snapshot.sequence(), snapshot.state());
//! })?;
//!
//! // Later, unsubscribe
//! coordinator.unsubscribe(id);
//! # Ok(())
//! # }
//! ```

mod callback;

pub use callback::{CallbackRegistry, SubscriptionId};
