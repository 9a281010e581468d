// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Timers that decide when the coordinator refreshes on its own.
//!
//! Two independent tasks drive refreshes without caller intervention:
//!
//! - [`spawn_periodic`] - polls on a fixed interval (default 30 s)
//! - [`Debouncer`] - confirms writes once the user stops changing
//!   controls (default 60 s quiet period)
//!
//! Neither task knows about the other. Whichever fires first calls
//! `refresh`, and the coordinator's single-flight rule folds a tick that
//! lands on an in-flight refresh into that refresh.

mod debouncer;
mod periodic;

pub use debouncer::{DebounceLoop, Debouncer};
pub use periodic::spawn_periodic;
