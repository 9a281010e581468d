// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Option selects for the louver position of each axis.

use std::fmt;

use crate::coordinator::Coordinator;
use crate::error::Result;
use crate::state::Snapshot;
use crate::transport::Transport;
use crate::types::{HorizontalFlow, VerticalFlow};

use super::BoundView;

/// The louver axis a [`FlowSelect`] controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowAxis {
    /// Left/right louvers.
    Horizontal,
    /// Up/down louvers.
    Vertical,
}

impl fmt::Display for FlowAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

/// Selects the air-flow position of one axis by name.
///
/// Writes are confirmed with an immediate refresh.
///
/// # Examples
///
/// ```no_run
/// use homeeasy_lib::views::FlowSelect;
/// use homeeasy_lib::{Coordinator, transport::Transport};
///
/// # async fn example<T: Transport>(coordinator: Coordinator<T>) -> homeeasy_lib::Result<()> {
/// let vertical = FlowSelect::vertical(coordinator);
/// assert!(vertical.options().contains(&"Top_Center"));
///
/// vertical.select_option("Swing").await?;
/// # Ok(())
/// # }
/// ```
pub struct FlowSelect<T: Transport> {
    axis: FlowAxis,
    view: BoundView<T, &'static str, String>,
}

impl<T: Transport> FlowSelect<T> {
    /// Creates the select for the horizontal axis.
    #[must_use]
    pub fn horizontal(coordinator: Coordinator<T>) -> Self {
        Self {
            axis: FlowAxis::Horizontal,
            view: BoundView::new(
                coordinator,
                |state| state.horizontal_flow.name(),
                |state, option: String| {
                    state.horizontal_flow = option.parse()?;
                    Ok(())
                },
            ),
        }
    }

    /// Creates the select for the vertical axis.
    #[must_use]
    pub fn vertical(coordinator: Coordinator<T>) -> Self {
        Self {
            axis: FlowAxis::Vertical,
            view: BoundView::new(
                coordinator,
                |state| state.vertical_flow.name(),
                |state, option: String| {
                    state.vertical_flow = option.parse()?;
                    Ok(())
                },
            ),
        }
    }

    /// Returns the controlled axis.
    #[must_use]
    pub fn axis(&self) -> FlowAxis {
        self.axis
    }

    /// Returns `true` while the coordinator holds a fresh snapshot.
    #[must_use]
    pub fn available(&self) -> bool {
        self.view.available()
    }

    /// Position names in device code order.
    #[must_use]
    pub fn options(&self) -> Vec<&'static str> {
        match self.axis {
            FlowAxis::Horizontal => HorizontalFlow::ALL.iter().map(|f| f.name()).collect(),
            FlowAxis::Vertical => VerticalFlow::ALL.iter().map(|f| f.name()).collect(),
        }
    }

    /// Currently reported position name.
    #[must_use]
    pub fn current_option(&self) -> Option<&'static str> {
        self.view.get()
    }

    /// Moves the louvers to the named position and refreshes.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidState` without any I/O if `option` is not one
    /// of [`options`](Self::options); otherwise see
    /// [`Coordinator::send_and_confirm`].
    pub async fn select_option(&self, option: &str) -> Result<Snapshot> {
        tracing::debug!(axis = %self.axis, option, "Selecting air flow");
        self.view.set_and_confirm(option.to_string()).await
    }
}

impl<T: Transport> Clone for FlowSelect<T> {
    fn clone(&self) -> Self {
        Self {
            axis: self.axis,
            view: self.view.clone(),
        }
    }
}

impl<T: Transport> fmt::Debug for FlowSelect<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowSelect")
            .field("axis", &self.axis)
            .field("current", &self.current_option())
            .finish_non_exhaustive()
    }
}
