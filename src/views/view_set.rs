// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::coordinator::{Coordinator, ViewToggles};
use crate::transport::Transport;

use super::{ClimateView, DisplaySwitch, FlowSelect};

/// The views enabled for one device.
///
/// Toggles are read once at construction.
pub struct ViewSet<T: Transport> {
    /// Thermostat controls.
    pub climate: Option<ClimateView<T>>,
    /// Horizontal louver select.
    pub horizontal_flow: Option<FlowSelect<T>>,
    /// Vertical louver select.
    pub vertical_flow: Option<FlowSelect<T>>,
    /// Display panel switch.
    pub display: Option<DisplaySwitch<T>>,
}

impl<T: Transport> ViewSet<T> {
    /// Creates the views enabled in `toggles`.
    #[must_use]
    pub fn new(coordinator: &Coordinator<T>, toggles: &ViewToggles) -> Self {
        let set = Self {
            climate: toggles
                .climate
                .then(|| ClimateView::new(coordinator.clone())),
            horizontal_flow: toggles
                .horizontal_flow
                .then(|| FlowSelect::horizontal(coordinator.clone())),
            vertical_flow: toggles
                .vertical_flow
                .then(|| FlowSelect::vertical(coordinator.clone())),
            display: toggles
                .display
                .then(|| DisplaySwitch::new(coordinator.clone())),
        };
        tracing::debug!(views = set.len(), "Views created");
        set
    }

    /// Creates the views enabled in the coordinator's own configuration.
    #[must_use]
    pub fn from_config(coordinator: &Coordinator<T>) -> Self {
        Self::new(coordinator, &coordinator.config().views)
    }

    /// Number of enabled views.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.climate.is_some())
            + usize::from(self.horizontal_flow.is_some())
            + usize::from(self.vertical_flow.is_some())
            + usize::from(self.display.is_some())
    }

    /// Returns `true` if every view is disabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Transport> std::fmt::Debug for ViewSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewSet")
            .field("climate", &self.climate)
            .field("horizontal_flow", &self.horizontal_flow)
            .field("vertical_flow", &self.vertical_flow)
            .field("display", &self.display)
            .finish()
    }
}
