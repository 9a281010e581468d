// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Presentation views over the coordinator.
//!
//! A view holds no state. It projects a field of the cached snapshot into
//! a presentation value and turns presentation input into a state mutator
//! for the coordinator. All views are built on [`BoundView`].
//!
//! # Views
//!
//! - [`ClimateView`] - Mode, target temperature, fan and swing
//! - [`FlowSelect`] - Louver position per axis, by name
//! - [`DisplaySwitch`] - Display panel on/off
//! - [`ViewSet`] - The views enabled by [`ViewToggles`](crate::ViewToggles)

mod bound;
mod climate;
mod display_switch;
mod flow_select;
mod view_set;

pub use bound::{BoundView, ReadFn, WriteFn};
pub use climate::{ClimateView, HvacAction, HvacMode, SwingMode};
pub use display_switch::DisplaySwitch;
pub use flow_select::{FlowAxis, FlowSelect};
pub use view_set::ViewSet;
