// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Louver positions for horizontal and vertical air flow.
//!
//! Each axis has its own set of positions. Both axes share `Stop` (louver
//! held where it is) and `Swing` (louver sweeps back and forth), which is
//! what the climate view's swing mode is built from.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Horizontal (left/right) louver position.
///
/// # Examples
///
/// ```
/// use homeeasy_lib::types::HorizontalFlow;
///
/// let flow: HorizontalFlow = "Left_Center".parse().unwrap();
/// assert_eq!(flow, HorizontalFlow::LeftCenter);
/// assert!(HorizontalFlow::try_from(9_u8).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum HorizontalFlow {
    /// Louver held in place.
    #[default]
    Stop,
    /// Full sweep.
    Swing,
    /// Fixed left.
    Left,
    /// Fixed left of center.
    LeftCenter,
    /// Fixed center.
    Center,
    /// Fixed right of center.
    RightCenter,
    /// Fixed right.
    Right,
    /// Split to both sides.
    LeftRight,
    /// Wide sweep.
    SwingWide,
}

impl HorizontalFlow {
    /// All positions in code order.
    pub const ALL: [Self; 9] = [
        Self::Stop,
        Self::Swing,
        Self::Left,
        Self::LeftCenter,
        Self::Center,
        Self::RightCenter,
        Self::Right,
        Self::LeftRight,
        Self::SwingWide,
    ];

    /// Returns the device code of this position.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the option name of this position.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stop => "Stop",
            Self::Swing => "Swing",
            Self::Left => "Left",
            Self::LeftCenter => "Left_Center",
            Self::Center => "Center",
            Self::RightCenter => "Right_Center",
            Self::Right => "Right",
            Self::LeftRight => "Left_Right",
            Self::SwingWide => "Swing_Wide",
        }
    }
}

/// Vertical (up/down) louver position.
///
/// # Examples
///
/// ```
/// use homeeasy_lib::types::VerticalFlow;
///
/// assert_eq!(VerticalFlow::try_from(6_u8).unwrap(), VerticalFlow::Bottom);
/// assert!(VerticalFlow::try_from(7_u8).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum VerticalFlow {
    /// Louver held in place.
    #[default]
    Stop,
    /// Full sweep.
    Swing,
    /// Fixed top.
    Top,
    /// Fixed above center.
    TopCenter,
    /// Fixed center.
    Center,
    /// Fixed below center.
    BottomCenter,
    /// Fixed bottom.
    Bottom,
}

impl VerticalFlow {
    /// All positions in code order.
    pub const ALL: [Self; 7] = [
        Self::Stop,
        Self::Swing,
        Self::Top,
        Self::TopCenter,
        Self::Center,
        Self::BottomCenter,
        Self::Bottom,
    ];

    /// Returns the device code of this position.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the option name of this position.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stop => "Stop",
            Self::Swing => "Swing",
            Self::Top => "Top",
            Self::TopCenter => "Top_Center",
            Self::Center => "Center",
            Self::BottomCenter => "Bottom_Center",
            Self::Bottom => "Bottom",
        }
    }
}

impl fmt::Display for HorizontalFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for VerticalFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for HorizontalFlow {
    type Error = ValueError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(ValueError::InvalidCode {
                kind: "horizontal flow",
                code,
            })
    }
}

impl TryFrom<u8> for VerticalFlow {
    type Error = ValueError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(ValueError::InvalidCode {
                kind: "vertical flow",
                code,
            })
    }
}

// Option names are matched exactly; they are presentation identifiers.
impl FromStr for HorizontalFlow {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flow| flow.name() == s)
            .ok_or_else(|| ValueError::UnknownOption {
                kind: "horizontal flow",
                option: s.to_string(),
            })
    }
}

impl FromStr for VerticalFlow {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flow| flow.name() == s)
            .ok_or_else(|| ValueError::UnknownOption {
                kind: "vertical flow",
                option: s.to_string(),
            })
    }
}
