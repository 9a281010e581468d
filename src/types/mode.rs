// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating mode of the HVAC unit.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Operating mode reported and accepted by the unit.
///
/// The mode is independent of power: a unit that is off still remembers
/// the mode it will resume in.
///
/// # Examples
///
/// ```
/// use homeeasy_lib::types::Mode;
///
/// let mode = Mode::try_from(1_u8).unwrap();
/// assert_eq!(mode, Mode::Cool);
/// assert_eq!(mode.name(), "Cool");
///
/// // Codes outside the declared members are rejected, never clamped
/// assert!(Mode::try_from(7_u8).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum Mode {
    /// Automatic heat/cool selection.
    #[default]
    Auto,
    /// Cooling.
    Cool,
    /// Dehumidifying.
    Dry,
    /// Fan only, no heat exchange.
    Fan,
    /// Heating.
    Heat,
}

impl Mode {
    /// All modes in code order.
    pub const ALL: [Self; 5] = [Self::Auto, Self::Cool, Self::Dry, Self::Fan, Self::Heat];

    /// Returns the device code of this mode.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Auto => 0,
            Self::Cool => 1,
            Self::Dry => 2,
            Self::Fan => 3,
            Self::Heat => 4,
        }
    }

    /// Returns the display name of this mode.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Cool => "Cool",
            Self::Dry => "Dry",
            Self::Fan => "Fan",
            Self::Heat => "Heat",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Mode {
    type Error = ValueError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.code() == code)
            .ok_or(ValueError::InvalidCode { kind: "mode", code })
    }
}

impl FromStr for Mode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValueError::UnknownOption {
                kind: "mode",
                option: s.to_string(),
            })
    }
}
