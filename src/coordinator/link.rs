// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection lifecycle around the transport.

use std::fmt;
use std::time::Duration;

use tokio::sync::watch;

use crate::error::{Error, Result};
use crate::state::DeviceState;
use crate::transport::{Transport, with_timeout};

/// Connection state of a coordinator.
///
/// `Disconnected` is both the initial state and the state after any
/// transport failure. The next refresh or send reconnects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No connection is open.
    #[default]
    Disconnected,
    /// A connect attempt is running.
    Connecting,
    /// The connection is open and was usable on the last call.
    Connected,
}

impl ConnectionState {
    /// Returns true if the connection is open.
    #[must_use]
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        };
        f.write_str(name)
    }
}

/// The transport plus the state machine that decides when to reconnect.
///
/// Connections are opened lazily and reused until a call fails. A failed
/// call drops the connection and is not retried.
pub(crate) struct Link<T> {
    transport: T,
    address: String,
    timeout: Duration,
    state: watch::Sender<ConnectionState>,
}

impl<T: Transport> Link<T> {
    pub(crate) fn new(
        transport: T,
        address: String,
        timeout: Duration,
    ) -> (Self, watch::Receiver<ConnectionState>) {
        let (state, observer) = watch::channel(ConnectionState::Disconnected);
        (
            Self {
                transport,
                address,
                timeout,
                state,
            },
            observer,
        )
    }

    fn set_state(&self, state: ConnectionState) {
        let previous = self.state.send_replace(state);
        if previous != state {
            tracing::debug!(address = %self.address, from = %previous, to = %state, "Connection state changed");
        }
    }

    async fn ensure_connected(&mut self) -> Result<()> {
        if self.state.borrow().is_connected() {
            return Ok(());
        }

        self.set_state(ConnectionState::Connecting);
        match with_timeout(self.timeout, self.transport.connect(&self.address)).await {
            Ok(()) => {
                self.set_state(ConnectionState::Connected);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(address = %self.address, error = %e, "Failed to connect");
                self.drop_connection().await;
                Err(Error::NotConnected(e))
            }
        }
    }

    /// Connects if needed and requests one status report.
    pub(crate) async fn request_status(&mut self) -> Result<DeviceState> {
        self.ensure_connected().await?;

        match with_timeout(self.timeout, self.transport.request_status()).await {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::warn!(address = %self.address, error = %e, "Status request failed");
                self.drop_connection().await;
                Err(Error::Transport(e))
            }
        }
    }

    /// Connects if needed and transmits `state`.
    pub(crate) async fn send(&mut self, state: &DeviceState) -> Result<()> {
        self.ensure_connected().await?;

        match with_timeout(self.timeout, self.transport.send(state)).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::warn!(address = %self.address, error = %e, "Send failed");
                self.drop_connection().await;
                Err(Error::Transport(e))
            }
        }
    }

    async fn drop_connection(&mut self) {
        if tokio::time::timeout(self.timeout, self.transport.disconnect())
            .await
            .is_err()
        {
            tracing::warn!(address = %self.address, "Disconnect timed out");
        }
        self.set_state(ConnectionState::Disconnected);
    }

    /// Closes any open or half-open connection.
    pub(crate) async fn close(&mut self) {
        if *self.state.borrow() != ConnectionState::Disconnected {
            self.drop_connection().await;
        }
    }
}
