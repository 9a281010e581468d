// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan speed levels.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Indoor fan speed, one of nine levels.
///
/// | Code | Name |
/// |------|------|
/// | 0 | Auto |
/// | 1 | Lowest |
/// | 2 | Low |
/// | 3 | Mid-low |
/// | 4 | Mid-high |
/// | 5 | High |
/// | 6 | Highest |
/// | 7 | Quiet |
/// | 8 | Turbo |
///
/// # Examples
///
/// ```
/// use homeeasy_lib::types::FanSpeed;
///
/// let speed: FanSpeed = "Mid-low".parse().unwrap();
/// assert_eq!(speed, FanSpeed::MidLow);
/// assert_eq!(speed.code(), 3);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum FanSpeed {
    /// The unit picks the speed.
    #[default]
    Auto,
    /// Lowest speed.
    Lowest,
    /// Low speed.
    Low,
    /// Between low and medium.
    MidLow,
    /// Between medium and high.
    MidHigh,
    /// High speed.
    High,
    /// Highest regular speed.
    Highest,
    /// Night / silent operation.
    Quiet,
    /// Boost above the highest regular speed.
    Turbo,
}

impl FanSpeed {
    /// All speeds in code order.
    pub const ALL: [Self; 9] = [
        Self::Auto,
        Self::Lowest,
        Self::Low,
        Self::MidLow,
        Self::MidHigh,
        Self::High,
        Self::Highest,
        Self::Quiet,
        Self::Turbo,
    ];

    /// Returns the device code of this speed.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the display name of this speed.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Lowest => "Lowest",
            Self::Low => "Low",
            Self::MidLow => "Mid-low",
            Self::MidHigh => "Mid-high",
            Self::High => "High",
            Self::Highest => "Highest",
            Self::Quiet => "Quiet",
            Self::Turbo => "Turbo",
        }
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for FanSpeed {
    type Error = ValueError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(ValueError::InvalidCode {
                kind: "fan speed",
                code,
            })
    }
}

impl FromStr for FanSpeed {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|speed| speed.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValueError::UnknownOption {
                kind: "fan speed",
                option: s.to_string(),
            })
    }
}
