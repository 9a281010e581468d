// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature bounds and display scale.

use std::fmt;

use crate::error::ValueError;

/// Lowest settable target temperature.
pub const MIN_DESIRED_TEMPERATURE: u8 = 16;

/// Highest settable target temperature.
pub const MAX_DESIRED_TEMPERATURE: u8 = 31;

/// Step between settable target temperatures.
pub const DESIRED_TEMPERATURE_STEP: u8 = 1;

/// Checks that a target temperature is within
/// [`MIN_DESIRED_TEMPERATURE`]..=[`MAX_DESIRED_TEMPERATURE`].
///
/// # Errors
///
/// Returns `ValueError::OutOfRange` otherwise. The value is never clamped.
///
/// # Examples
///
/// ```
/// use homeeasy_lib::types::check_desired_temperature;
///
/// assert!(check_desired_temperature(25).is_ok());
/// assert!(check_desired_temperature(40).is_err());
/// ```
pub fn check_desired_temperature(value: u8) -> Result<u8, ValueError> {
    if (MIN_DESIRED_TEMPERATURE..=MAX_DESIRED_TEMPERATURE).contains(&value) {
        Ok(value)
    } else {
        Err(ValueError::OutOfRange {
            min: u16::from(MIN_DESIRED_TEMPERATURE),
            max: u16::from(MAX_DESIRED_TEMPERATURE),
            actual: u16::from(value),
        })
    }
}

/// Scale the unit uses on its own display panel.
///
/// The device reports this as a single flag; `true` means Fahrenheit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum TemperatureScale {
    /// Degrees Celsius.
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureScale {
    /// Returns the unit symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    /// Returns the device flag for this scale.
    #[must_use]
    pub const fn is_fahrenheit(self) -> bool {
        matches!(self, Self::Fahrenheit)
    }
}

impl From<bool> for TemperatureScale {
    fn from(fahrenheit: bool) -> Self {
        if fahrenheit {
            Self::Fahrenheit
        } else {
            Self::Celsius
        }
    }
}

impl fmt::Display for TemperatureScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
