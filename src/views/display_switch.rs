// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! On/off switch for the unit's display panel.

use crate::coordinator::Coordinator;
use crate::error::Result;
use crate::state::Snapshot;
use crate::transport::Transport;

use super::BoundView;

/// Switch for the display panel.
///
/// Not every unit reports a display flag. [`is_on`](Self::is_on) returns
/// `None` both before the first refresh and for such units, and
/// [`available`](Self::available) stays `false` for them.
pub struct DisplaySwitch<T: Transport> {
    view: BoundView<T, Option<bool>, bool>,
}

impl<T: Transport> DisplaySwitch<T> {
    /// Creates the switch.
    #[must_use]
    pub fn new(coordinator: Coordinator<T>) -> Self {
        Self {
            view: BoundView::new(
                coordinator,
                |state| state.display,
                |state, on: bool| {
                    state.display = Some(on);
                    Ok(())
                },
            ),
        }
    }

    /// Display state as reported by the device.
    #[must_use]
    pub fn is_on(&self) -> Option<bool> {
        self.view.get().flatten()
    }

    /// `true` while a fresh snapshot exists and it reports a display flag.
    #[must_use]
    pub fn available(&self) -> bool {
        self.view.available() && self.is_on().is_some()
    }

    /// Turns the display on.
    ///
    /// # Errors
    ///
    /// See [`Coordinator::try_send`].
    pub async fn turn_on(&self) -> Result<Snapshot> {
        self.view.set(true).await
    }

    /// Turns the display off.
    ///
    /// # Errors
    ///
    /// See [`Coordinator::try_send`].
    pub async fn turn_off(&self) -> Result<Snapshot> {
        self.view.set(false).await
    }
}

impl<T: Transport> Clone for DisplaySwitch<T> {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
        }
    }
}

impl<T: Transport> std::fmt::Debug for DisplaySwitch<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplaySwitch")
            .field("is_on", &self.is_on())
            .finish_non_exhaustive()
    }
}
