// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat-style view of the HVAC unit.

use std::fmt;

use crate::coordinator::Coordinator;
use crate::error::{Error, Result};
use crate::state::{DeviceState, Snapshot};
use crate::transport::Transport;
use crate::types::{
    DESIRED_TEMPERATURE_STEP, FanSpeed, HorizontalFlow, MAX_DESIRED_TEMPERATURE,
    MIN_DESIRED_TEMPERATURE, Mode, TemperatureScale, VerticalFlow, check_desired_temperature,
};

use super::BoundView;

/// Operating mode as a thermostat shows it: power and mode combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HvacMode {
    /// Unit is powered off.
    Off,
    /// Powered on in automatic mode.
    Auto,
    /// Powered on, cooling.
    Cool,
    /// Powered on, dehumidifying.
    Dry,
    /// Powered on, fan only.
    FanOnly,
    /// Powered on, heating.
    Heat,
}

impl HvacMode {
    /// All modes, in presentation order.
    pub const ALL: [Self; 6] = [
        Self::Off,
        Self::Auto,
        Self::Cool,
        Self::Dry,
        Self::FanOnly,
        Self::Heat,
    ];

    fn from_state(state: &DeviceState) -> Self {
        if !state.power {
            return Self::Off;
        }
        match state.mode {
            Mode::Auto => Self::Auto,
            Mode::Cool => Self::Cool,
            Mode::Dry => Self::Dry,
            Mode::Fan => Self::FanOnly,
            Mode::Heat => Self::Heat,
        }
    }

    fn apply(self, state: &mut DeviceState) {
        let mode = match self {
            Self::Off => {
                state.power = false;
                return;
            }
            Self::Auto => Mode::Auto,
            Self::Cool => Mode::Cool,
            Self::Dry => Mode::Dry,
            Self::FanOnly => Mode::Fan,
            Self::Heat => Mode::Heat,
        };
        state.power = true;
        state.mode = mode;
    }
}

/// What the unit is doing right now, derived from mode and temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HvacAction {
    /// Powered off.
    Off,
    /// Heating towards the target.
    Heating,
    /// Cooling towards the target.
    Cooling,
    /// Dehumidifying.
    Drying,
    /// Moving air only.
    Fan,
    /// On, target reached.
    Idle,
}

impl HvacAction {
    fn from_state(state: &DeviceState) -> Self {
        if !state.power {
            return Self::Off;
        }
        let room = state.indoor_temperature;
        let target = f32::from(state.desired_temperature);

        match state.mode {
            Mode::Heat if room < target => Self::Heating,
            Mode::Cool if room > target => Self::Cooling,
            Mode::Dry => Self::Drying,
            Mode::Fan => Self::Fan,
            _ => Self::Idle,
        }
    }
}

/// Louver swing, mapped onto the stop/swing positions of both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwingMode {
    /// Both axes stopped.
    Off,
    /// Horizontal axis swinging.
    Horizontal,
    /// Vertical axis swinging.
    Vertical,
    /// Both axes swinging.
    Both,
}

impl SwingMode {
    /// All swing modes.
    pub const ALL: [Self; 4] = [Self::Off, Self::Horizontal, Self::Vertical, Self::Both];

    const fn flows(self) -> (HorizontalFlow, VerticalFlow) {
        match self {
            Self::Off => (HorizontalFlow::Stop, VerticalFlow::Stop),
            Self::Horizontal => (HorizontalFlow::Swing, VerticalFlow::Stop),
            Self::Vertical => (HorizontalFlow::Stop, VerticalFlow::Swing),
            Self::Both => (HorizontalFlow::Swing, VerticalFlow::Swing),
        }
    }

    /// Louvers parked at a fixed position read as `Off`.
    fn from_state(state: &DeviceState) -> Self {
        let current = (state.horizontal_flow, state.vertical_flow);
        Self::ALL
            .into_iter()
            .find(|mode| mode.flows() == current)
            .unwrap_or(Self::Off)
    }

    fn apply(self, state: &mut DeviceState) {
        (state.horizontal_flow, state.vertical_flow) = self.flows();
    }
}

impl fmt::Display for SwingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "off",
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Both => "both",
        };
        f.write_str(name)
    }
}

/// Thermostat controls: mode, target temperature, fan and swing.
///
/// # Examples
///
/// ```no_run
/// use homeeasy_lib::views::{ClimateView, HvacMode};
/// use homeeasy_lib::{Coordinator, transport::Transport};
///
/// # async fn example<T: Transport>(coordinator: Coordinator<T>) -> homeeasy_lib::Result<()> {
/// let climate = ClimateView::new(coordinator);
///
/// climate.set_hvac_mode(HvacMode::Cool).await?;
/// climate.set_target_temperature(22).await?;
/// climate.set_fan_mode("Mid-low").await?;
/// # Ok(())
/// # }
/// ```
pub struct ClimateView<T: Transport> {
    hvac_mode: BoundView<T, HvacMode, HvacMode>,
    target: BoundView<T, u8, u8>,
    fan: BoundView<T, FanSpeed, FanSpeed>,
    swing: BoundView<T, SwingMode, SwingMode>,
}

impl<T: Transport> ClimateView<T> {
    /// Lowest settable target temperature.
    pub const MIN_TEMPERATURE: u8 = MIN_DESIRED_TEMPERATURE;
    /// Highest settable target temperature.
    pub const MAX_TEMPERATURE: u8 = MAX_DESIRED_TEMPERATURE;
    /// Target temperature increment.
    pub const TEMPERATURE_STEP: u8 = DESIRED_TEMPERATURE_STEP;

    /// Creates the view.
    #[must_use]
    pub fn new(coordinator: Coordinator<T>) -> Self {
        Self {
            hvac_mode: BoundView::new(
                coordinator.clone(),
                HvacMode::from_state,
                |state, mode: HvacMode| {
                    mode.apply(state);
                    Ok(())
                },
            ),
            target: BoundView::new(
                coordinator.clone(),
                |state| state.desired_temperature,
                |state, target: u8| {
                    state.desired_temperature = check_desired_temperature(target)?;
                    Ok(())
                },
            ),
            fan: BoundView::new(
                coordinator.clone(),
                |state| state.fan_speed,
                |state, speed: FanSpeed| {
                    state.fan_speed = speed;
                    Ok(())
                },
            ),
            swing: BoundView::new(
                coordinator,
                SwingMode::from_state,
                |state, swing: SwingMode| {
                    swing.apply(state);
                    Ok(())
                },
            ),
        }
    }

    fn state(&self) -> Option<DeviceState> {
        self.hvac_mode
            .coordinator()
            .current_snapshot()
            .map(|snapshot| *snapshot.state())
    }

    /// Returns `true` while the coordinator holds a fresh snapshot.
    #[must_use]
    pub fn available(&self) -> bool {
        self.hvac_mode.available()
    }

    /// Current mode, `Off` when the unit is powered down.
    #[must_use]
    pub fn hvac_mode(&self) -> Option<HvacMode> {
        self.hvac_mode.get()
    }

    /// Modes this view can set.
    #[must_use]
    pub fn hvac_modes(&self) -> &'static [HvacMode] {
        &HvacMode::ALL
    }

    /// Sets the mode; any mode but `Off` also powers the unit on.
    ///
    /// # Errors
    ///
    /// See [`Coordinator::try_send`].
    pub async fn set_hvac_mode(&self, mode: HvacMode) -> Result<Snapshot> {
        self.hvac_mode.set(mode).await
    }

    /// Current activity. `Off` when no state is cached.
    #[must_use]
    pub fn hvac_action(&self) -> HvacAction {
        self.state()
            .map_or(HvacAction::Off, |state| HvacAction::from_state(&state))
    }

    /// Room temperature reported by the unit.
    #[must_use]
    pub fn current_temperature(&self) -> Option<f32> {
        self.state().map(|state| state.indoor_temperature)
    }

    /// Target temperature.
    #[must_use]
    pub fn target_temperature(&self) -> Option<u8> {
        self.target.get()
    }

    /// Sets the target temperature.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidState` without any I/O if `target` is outside
    /// [`MIN_TEMPERATURE`](Self::MIN_TEMPERATURE)..=[`MAX_TEMPERATURE`](Self::MAX_TEMPERATURE);
    /// otherwise see [`Coordinator::try_send`].
    pub async fn set_target_temperature(&self, target: u8) -> Result<Snapshot> {
        self.target.set(target).await
    }

    /// Display unit. Celsius when no state is cached.
    #[must_use]
    pub fn temperature_unit(&self) -> TemperatureScale {
        self.state()
            .map(|state| state.temperature_scale)
            .unwrap_or_default()
    }

    /// Current fan speed name.
    #[must_use]
    pub fn fan_mode(&self) -> Option<&'static str> {
        self.fan.get().map(FanSpeed::name)
    }

    /// Fan speed names, slowest first after `Auto`.
    #[must_use]
    pub fn fan_modes(&self) -> Vec<&'static str> {
        FanSpeed::ALL.iter().map(|speed| speed.name()).collect()
    }

    /// Sets the fan speed by name.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidState` without any I/O for an unknown name;
    /// otherwise see [`Coordinator::try_send`].
    pub async fn set_fan_mode(&self, name: &str) -> Result<Snapshot> {
        let speed: FanSpeed = name.parse().map_err(Error::InvalidState)?;
        self.fan.set(speed).await
    }

    /// Current swing mode.
    #[must_use]
    pub fn swing_mode(&self) -> Option<SwingMode> {
        self.swing.get()
    }

    /// Sets both louver axes from a swing mode.
    ///
    /// # Errors
    ///
    /// See [`Coordinator::try_send`].
    pub async fn set_swing_mode(&self, swing: SwingMode) -> Result<Snapshot> {
        self.swing.set(swing).await
    }

    /// Powers the unit on, keeping the current mode.
    ///
    /// # Errors
    ///
    /// See [`Coordinator::send`].
    pub async fn turn_on(&self) -> Result<Snapshot> {
        self.hvac_mode.coordinator().send(|state| state.power = true).await
    }

    /// Powers the unit off.
    ///
    /// # Errors
    ///
    /// See [`Coordinator::send`].
    pub async fn turn_off(&self) -> Result<Snapshot> {
        self.hvac_mode.set(HvacMode::Off).await
    }
}

impl<T: Transport> Clone for ClimateView<T> {
    fn clone(&self) -> Self {
        Self {
            hvac_mode: self.hvac_mode.clone(),
            target: self.target.clone(),
            fan: self.fan.clone(),
            swing: self.swing.clone(),
        }
    }
}

impl<T: Transport> fmt::Debug for ClimateView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClimateView")
            .field("hvac_mode", &self.hvac_mode())
            .field("target_temperature", &self.target_temperature())
            .finish_non_exhaustive()
    }
}
