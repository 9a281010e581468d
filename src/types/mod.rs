// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for the HVAC unit's state.
//!
//! Every enumeration here is closed: decoding a device code or parsing a
//! presentation name that is not a declared member fails with a
//! [`ValueError`](crate::error::ValueError) instead of being clamped or
//! mapped to a fallback.
//!
//! # Types
//!
//! - [`Mode`] - Operating mode (Auto/Cool/Dry/Fan/Heat)
//! - [`FanSpeed`] - Fan speed, nine levels
//! - [`HorizontalFlow`] / [`VerticalFlow`] - Louver positions per axis
//! - [`TemperatureScale`] - Celsius/Fahrenheit display flag

mod air_flow;
mod fan_speed;
mod mode;
mod temperature;

pub use air_flow::{HorizontalFlow, VerticalFlow};
pub use fan_speed::FanSpeed;
pub use mode::Mode;
pub use temperature::{
    DESIRED_TEMPERATURE_STEP, MAX_DESIRED_TEMPERATURE, MIN_DESIRED_TEMPERATURE, TemperatureScale,
    check_desired_temperature,
};
