// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builder for [`Coordinator`].

use crate::error::Result;
use crate::state::Snapshot;
use crate::transport::Transport;

use super::coordinator_config::CoordinatorConfig;
use super::device_coordinator::Coordinator;

/// Builder for creating a [`Coordinator`].
///
/// Both build methods must be called inside a tokio runtime, since they
/// start the coordinator's background tasks.
pub struct CoordinatorBuilder<T> {
    transport: T,
    config: CoordinatorConfig,
}

impl<T: Transport> CoordinatorBuilder<T> {
    pub(crate) fn new(transport: T, config: CoordinatorConfig) -> Self {
        Self { transport, config }
    }

    /// Builds the coordinator and performs the first refresh.
    ///
    /// A device that cannot be read is not worth coordinating: if the first
    /// refresh fails, the coordinator is shut down and the error returned.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidConfiguration` if the configuration is invalid
    /// - any error of [`Coordinator::refresh`]
    pub async fn build(self) -> Result<(Coordinator<T>, Snapshot)> {
        let coordinator = self.build_without_refresh()?;

        match coordinator.refresh().await {
            Ok(snapshot) => Ok((coordinator, snapshot)),
            Err(e) => {
                tracing::warn!(
                    address = %coordinator.config().address,
                    error = %e,
                    "First refresh failed, stopping coordinator"
                );
                coordinator.shutdown().await;
                Err(e)
            }
        }
    }

    /// Builds the coordinator without contacting the device.
    ///
    /// The cache stays empty until the first scheduled or manual refresh.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if the configuration is invalid.
    pub fn build_without_refresh(self) -> Result<Coordinator<T>> {
        self.config.validate()?;
        Ok(Coordinator::start(self.transport, self.config))
    }
}

impl<T> std::fmt::Debug for CoordinatorBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinatorBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
