// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport abstraction for talking to the HVAC unit.
//!
//! The wire protocol lives outside this crate. A [`Transport`] turns one
//! socket connection into structured [`DeviceState`] values and back; the
//! coordinator owns the transport exclusively and is the only caller.
//!
//! Transports that receive unsolicited status reports hand them to the
//! [`PushSink`] given to [`Transport::attach_push`]. The coordinator treats
//! a push exactly like a successful poll.
//!
//! # Implementing a transport
//!
//! ```
//! use homeeasy_lib::error::TransportError;
//! use homeeasy_lib::state::DeviceState;
//! use homeeasy_lib::transport::Transport;
//!
//! /// A transport that always reports the same state.
//! struct Fixed(DeviceState);
//!
//! impl Transport for Fixed {
//!     async fn connect(&mut self, _address: &str) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//!
//!     async fn disconnect(&mut self) {}
//!
//!     async fn request_status(&mut self) -> Result<DeviceState, TransportError> {
//!         Ok(self.0)
//!     }
//!
//!     async fn send(&mut self, state: &DeviceState) -> Result<(), TransportError> {
//!         self.0 = *state;
//!         Ok(())
//!     }
//! }
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::error::{Error, TransportError};
use crate::state::DeviceState;

/// A connection to one HVAC unit.
///
/// Every method may suspend. None of them is called concurrently with
/// another on the same transport: the coordinator serializes all access.
pub trait Transport: Send + 'static {
    /// Opens the connection to the device at `address`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the device cannot be reached.
    fn connect(&mut self, address: &str)
    -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Closes the connection. Must be safe to call on a half-open or
    /// already closed connection.
    fn disconnect(&mut self) -> impl Future<Output = ()> + Send;

    /// Requests the current state from the device.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request fails or the reply cannot
    /// be decoded into a [`DeviceState`].
    fn request_status(
        &mut self,
    ) -> impl Future<Output = Result<DeviceState, TransportError>> + Send;

    /// Transmits a full desired state to the device.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the state cannot be delivered.
    fn send(
        &mut self,
        state: &DeviceState,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Registers the sink for unsolicited state reports.
    ///
    /// Called once when the coordinator is built. Transports without push
    /// support keep the default, which drops the sink.
    fn attach_push(&mut self, sink: PushSink) {
        drop(sink);
    }
}

/// Delivers unsolicited device states to the coordinator.
///
/// Cheap to clone; every clone feeds the same coordinator.
#[derive(Debug, Clone)]
pub struct PushSink {
    tx: mpsc::UnboundedSender<DeviceState>,
}

impl PushSink {
    pub(crate) fn new(tx: mpsc::UnboundedSender<DeviceState>) -> Self {
        Self { tx }
    }

    /// Hands a pushed state to the coordinator.
    ///
    /// Returns `false` if the coordinator is gone.
    pub fn push(&self, state: DeviceState) -> bool {
        self.tx.send(state).is_ok()
    }

    /// Returns `true` if the coordinator no longer accepts pushes.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Runs a transport call with a deadline.
pub(crate) async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, TransportError>
where
    F: Future<Output = Result<T, TransportError>>,
{
    let limit_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);

    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| TransportError::Timeout(limit_ms))?
}

/// Checks that a device answers at `address`.
///
/// Connects, requests one status report, validates it and disconnects
/// again, whatever the outcome. Useful for configuration forms that want
/// to test an address before creating a coordinator.
///
/// # Errors
///
/// - `Error::NotConnected` if the connect fails
/// - `Error::Transport` if the status request fails
/// - `Error::InvalidState` if the reported state is invalid
pub async fn probe<T: Transport>(
    transport: &mut T,
    address: &str,
    timeout: Duration,
) -> Result<DeviceState, Error> {
    tracing::debug!(address = %address, "Probing device");

    let connected = with_timeout(timeout, transport.connect(address)).await;
    let result = match connected {
        Ok(()) => with_timeout(timeout, transport.request_status())
            .await
            .map_err(Error::Transport)
            .and_then(|state| {
                state.validate()?;
                Ok(state)
            }),
        Err(e) => Err(Error::NotConnected(e)),
    };

    transport.disconnect().await;

    match &result {
        Ok(_) => tracing::debug!(address = %address, "Probe succeeded"),
        Err(e) => tracing::debug!(address = %address, error = %e, "Probe failed"),
    }
    result
}
