// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state value object.

use crate::error::ValueError;
use crate::types::{
    FanSpeed, HorizontalFlow, Mode, TemperatureScale, VerticalFlow, check_desired_temperature,
};

/// State of the HVAC unit at one instant.
///
/// This is a plain value: writers copy it, change the fields they care
/// about, and hand the copy to the coordinator. Fields are public so that
/// mutators can use struct update syntax; [`validate`](Self::validate)
/// checks the invariants before anything reaches the device.
///
/// # Examples
///
/// ```
/// use homeeasy_lib::state::DeviceState;
/// use homeeasy_lib::types::Mode;
///
/// let current = DeviceState::default();
/// let wanted = DeviceState {
///     power: true,
///     mode: Mode::Cool,
///     desired_temperature: 22,
///     ..current
/// };
/// assert!(wanted.validate().is_ok());
///
/// let too_hot = DeviceState { desired_temperature: 40, ..current };
/// assert!(too_hot.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeviceState {
    /// Whether the unit is running.
    pub power: bool,
    /// Operating mode.
    pub mode: Mode,
    /// Indoor fan speed.
    pub fan_speed: FanSpeed,
    /// Horizontal louver position.
    pub horizontal_flow: HorizontalFlow,
    /// Vertical louver position.
    pub vertical_flow: VerticalFlow,
    /// Room temperature measured by the unit.
    pub indoor_temperature: f32,
    /// Target temperature, 16 to 31 in steps of 1.
    pub desired_temperature: u8,
    /// Scale used on the unit's own display.
    pub temperature_scale: TemperatureScale,
    /// Display panel flag. `None` when the unit has no controllable
    /// display, which is not the same as a display that is off.
    pub display: Option<bool>,
}

impl DeviceState {
    /// Creates a state with default values: off, auto mode, 24 degrees.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks the state's invariants.
    ///
    /// Enumerated fields are valid by construction; this checks the
    /// target temperature bounds and that the reported room temperature is
    /// a finite number.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the target temperature is
    /// outside [16, 31], or `ValueError::NonFiniteTemperature` if the room
    /// temperature is NaN or infinite.
    pub fn validate(&self) -> Result<(), ValueError> {
        check_desired_temperature(self.desired_temperature)?;
        if !self.indoor_temperature.is_finite() {
            return Err(ValueError::NonFiniteTemperature);
        }
        Ok(())
    }

    /// Returns `true` if the unit reports a controllable display panel.
    #[must_use]
    pub fn has_display(&self) -> bool {
        self.display.is_some()
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            power: false,
            mode: Mode::Auto,
            fan_speed: FanSpeed::Auto,
            horizontal_flow: HorizontalFlow::Stop,
            vertical_flow: VerticalFlow::Stop,
            indoor_temperature: 0.0,
            desired_temperature: 24,
            temperature_scale: TemperatureScale::Celsius,
            display: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let state = DeviceState::new();
        assert!(!state.power);
        assert_eq!(state.mode, Mode::Auto);
        assert_eq!(state.desired_temperature, 24);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn out_of_range_target_rejected() {
        let state = DeviceState {
            desired_temperature: 40,
            ..DeviceState::default()
        };
        assert_eq!(
            state.validate(),
            Err(ValueError::OutOfRange {
                min: 16,
                max: 31,
                actual: 40
            })
        );
    }

    #[test]
    fn non_finite_room_temperature_rejected() {
        let state = DeviceState {
            indoor_temperature: f32::NAN,
            ..DeviceState::default()
        };
        assert_eq!(state.validate(), Err(ValueError::NonFiniteTemperature));
    }

    #[test]
    fn missing_display_differs_from_off() {
        let without = DeviceState::default();
        let off = DeviceState {
            display: Some(false),
            ..without
        };
        assert!(!without.has_display());
        assert!(off.has_display());
        assert_ne!(without, off);
    }
}
