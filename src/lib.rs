// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `HomeEasy` Lib - Keeps a networked HVAC unit's state in sync with its consumers.
//!
//! This library provides an async coordinator that owns one device
//! connection, polls and caches the unit's state, and shares it with any
//! number of subscribers while serializing writes back to the device.
//!
//! # Supported Features
//!
//! - **Single-flight refresh**: Concurrent refreshes share one round-trip
//! - **Debounced write confirmation**: Bursts of writes are confirmed once
//! - **Lazy reconnect**: Failures drop the connection; the next call reconnects
//! - **Push updates**: Unsolicited reports take the same path as polls
//! - **Views**: Climate, air-flow selects and display switch over the cache
//!
//! The wire protocol is not part of this crate. Plug it in by implementing
//! [`Transport`](transport::Transport).
//!
//! # Quick Start
//!
//! ```no_run
//! use homeeasy_lib::views::{ClimateView, HvacMode};
//! use homeeasy_lib::{Coordinator, CoordinatorConfig, transport::Transport};
//!
//! async fn run<T: Transport>(transport: T) -> homeeasy_lib::Result<()> {
//!     // Returns (coordinator, first_snapshot) tuple
//!     let (coordinator, first) =
//!         Coordinator::builder(transport, CoordinatorConfig::new("192.168.1.40"))
//!             .build()
//!             .await?;
//!     println!("room is at {}", first.state().indoor_temperature);
//!
//!     coordinator.subscribe(|snapshot| {
//!         println!("update #{}", snapshot.sequence());
//!     })?;
//!
//!     let climate = ClimateView::new(coordinator.clone());
//!     climate.set_hvac_mode(HvacMode::Heat).await?;
//!     climate.set_target_temperature(23).await?;
//!
//!     coordinator.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration from a file
//!
//! ```
//! use homeeasy_lib::CoordinatorConfig;
//!
//! let config: CoordinatorConfig = serde_json::from_str(
//!     r#"{ "address": "192.168.1.40", "poll_interval": 15 }"#,
//! ).unwrap();
//!
//! assert_eq!(config.poll_interval.as_secs(), 15);
//! assert_eq!(config.refresh_cooldown.as_secs(), 60);
//! ```

pub mod coordinator;
pub mod error;
pub mod scheduler;
pub mod state;
pub mod subscription;
pub mod transport;
pub mod types;
pub mod views;

pub use coordinator::{
    ConnectionState, Coordinator, CoordinatorBuilder, CoordinatorConfig, ViewToggles,
};
pub use error::{Error, Result, TransportError, ValueError};
pub use state::{DeviceState, Snapshot};
pub use subscription::SubscriptionId;
pub use types::{FanSpeed, HorizontalFlow, Mode, TemperatureScale, VerticalFlow};
