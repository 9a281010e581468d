// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for a device coordinator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for one coordinator.
///
/// Durations serialize as whole seconds, so [`validate`](Self::validate)
/// only accepts whole seconds. Every field except `address` may be omitted
/// when deserializing.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use homeeasy_lib::CoordinatorConfig;
///
/// let config = CoordinatorConfig::new("192.168.1.40")
///     .with_poll_interval(Duration::from_secs(15))
///     .with_refresh_cooldown(Duration::from_secs(30));
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.request_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Network address of the device.
    pub address: String,
    /// Interval between scheduled refreshes.
    #[serde(default = "default_poll_interval", with = "duration_secs")]
    pub poll_interval: Duration,
    /// Quiet period after the last write before its confirmation refresh.
    #[serde(default = "default_refresh_cooldown", with = "duration_secs")]
    pub refresh_cooldown: Duration,
    /// Deadline for each transport call.
    #[serde(default = "default_request_timeout", with = "duration_secs")]
    pub request_timeout: Duration,
    /// Which views a [`ViewSet`](crate::views::ViewSet) creates.
    #[serde(default)]
    pub views: ViewToggles,
}

impl CoordinatorConfig {
    /// Default interval between scheduled refreshes.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
    /// Default quiet period for write confirmations.
    pub const DEFAULT_REFRESH_COOLDOWN: Duration = Duration::from_secs(60);
    /// Default deadline for each transport call.
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration with default timings.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            refresh_cooldown: Self::DEFAULT_REFRESH_COOLDOWN,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            views: ViewToggles::default(),
        }
    }

    /// Sets the interval between scheduled refreshes.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the quiet period for write confirmations.
    #[must_use]
    pub fn with_refresh_cooldown(mut self, cooldown: Duration) -> Self {
        self.refresh_cooldown = cooldown;
        self
    }

    /// Sets the deadline for each transport call.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets which views are created.
    #[must_use]
    pub fn with_views(mut self, views: ViewToggles) -> Self {
        self.views = views;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if the address is blank or a
    /// duration is zero or not a whole number of seconds.
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(Error::InvalidConfiguration(
                "device address is empty".to_string(),
            ));
        }

        for (name, value) in [
            ("poll_interval", self.poll_interval),
            ("refresh_cooldown", self.refresh_cooldown),
            ("request_timeout", self.request_timeout),
        ] {
            if value.is_zero() {
                return Err(Error::InvalidConfiguration(format!(
                    "{name} must be greater than zero"
                )));
            }
            if value.subsec_nanos() != 0 {
                return Err(Error::InvalidConfiguration(format!(
                    "{name} must be a whole number of seconds, got {value:?}"
                )));
            }
        }

        Ok(())
    }
}

/// Per-view enable flags.
///
/// Read once when a [`ViewSet`](crate::views::ViewSet) is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ViewToggles {
    /// Climate control view.
    pub climate: bool,
    /// Horizontal air-flow select.
    pub horizontal_flow: bool,
    /// Vertical air-flow select.
    pub vertical_flow: bool,
    /// Display panel switch.
    pub display: bool,
}

impl ViewToggles {
    /// Disables every view.
    #[must_use]
    pub fn none() -> Self {
        Self {
            climate: false,
            horizontal_flow: false,
            vertical_flow: false,
            display: false,
        }
    }
}

impl Default for ViewToggles {
    fn default() -> Self {
        Self {
            climate: true,
            horizontal_flow: true,
            vertical_flow: true,
            display: true,
        }
    }
}

fn default_poll_interval() -> Duration {
    CoordinatorConfig::DEFAULT_POLL_INTERVAL
}

fn default_refresh_cooldown() -> Duration {
    CoordinatorConfig::DEFAULT_REFRESH_COOLDOWN
}

fn default_request_timeout() -> Duration {
    CoordinatorConfig::DEFAULT_REQUEST_TIMEOUT
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
