// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory transport shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use homeeasy_lib::error::TransportError;
use homeeasy_lib::state::DeviceState;
use homeeasy_lib::transport::{PushSink, Transport};
use homeeasy_lib::{Coordinator, CoordinatorConfig, Mode};
use parking_lot::Mutex;
use tokio::sync::Semaphore;

/// A fake HVAC unit. Clone the handle to inspect the device while the
/// coordinator owns its [`MockTransport`].
#[derive(Clone, Default)]
pub struct MockDevice {
    shared: Arc<Shared>,
}

#[derive(Default)]
struct Shared {
    state: Mutex<DeviceState>,
    sent: Mutex<Vec<DeviceState>>,
    push: Mutex<Option<PushSink>>,
    gate: Mutex<Option<Arc<Semaphore>>>,
    connects: AtomicU32,
    disconnects: AtomicU32,
    requests: AtomicU32,
    sends: AtomicU32,
    failing_connects: AtomicU32,
    failing_requests: AtomicU32,
    failing_sends: AtomicU32,
}

/// Holds status requests until released.
pub struct RequestGate(Arc<Semaphore>);

impl RequestGate {
    /// Lets `n` waiting or future requests through.
    pub fn release(&self, n: usize) {
        self.0.add_permits(n);
    }
}

/// The transport half of a [`MockDevice`].
pub struct MockTransport {
    shared: Arc<Shared>,
}

/// The state the fake unit reports until told otherwise.
pub fn initial_state() -> DeviceState {
    DeviceState {
        power: false,
        mode: Mode::Auto,
        desired_temperature: 24,
        indoor_temperature: 22.5,
        ..DeviceState::default()
    }
}

/// A configuration whose poll timer stays out of the way of most tests.
pub fn quiet_config() -> CoordinatorConfig {
    CoordinatorConfig::new("10.0.0.2")
        .with_poll_interval(std::time::Duration::from_secs(3600))
}

fn take_failure(counter: &AtomicU32) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

impl MockDevice {
    pub fn new(state: DeviceState) -> Self {
        let device = Self::default();
        *device.shared.state.lock() = state;
        device
    }

    pub fn transport(&self) -> MockTransport {
        MockTransport {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Builds a coordinator and performs the first refresh.
    pub async fn coordinator(&self, config: CoordinatorConfig) -> Coordinator<MockTransport> {
        Coordinator::builder(self.transport(), config)
            .build()
            .await
            .unwrap()
            .0
    }

    pub fn state(&self) -> DeviceState {
        *self.shared.state.lock()
    }

    pub fn set_state(&self, state: DeviceState) {
        *self.shared.state.lock() = state;
    }

    pub fn sent(&self) -> Vec<DeviceState> {
        self.shared.sent.lock().clone()
    }

    pub fn connects(&self) -> u32 {
        self.shared.connects.load(Ordering::SeqCst)
    }

    pub fn disconnects(&self) -> u32 {
        self.shared.disconnects.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> u32 {
        self.shared.requests.load(Ordering::SeqCst)
    }

    pub fn sends(&self) -> u32 {
        self.shared.sends.load(Ordering::SeqCst)
    }

    pub fn fail_next_connects(&self, n: u32) {
        self.shared.failing_connects.store(n, Ordering::SeqCst);
    }

    pub fn fail_next_requests(&self, n: u32) {
        self.shared.failing_requests.store(n, Ordering::SeqCst);
    }

    pub fn fail_next_sends(&self, n: u32) {
        self.shared.failing_sends.store(n, Ordering::SeqCst);
    }

    /// Makes every status request wait for a permit.
    pub fn hold_requests(&self) -> RequestGate {
        let semaphore = Arc::new(Semaphore::new(0));
        *self.shared.gate.lock() = Some(Arc::clone(&semaphore));
        RequestGate(semaphore)
    }

    /// Emits an unsolicited report.
    pub fn push(&self, state: DeviceState) -> bool {
        self.shared
            .push
            .lock()
            .as_ref()
            .is_some_and(|sink| sink.push(state))
    }
}

impl Transport for MockTransport {
    async fn connect(&mut self, _address: &str) -> Result<(), TransportError> {
        self.shared.connects.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.shared.failing_connects) {
            return Err(TransportError::ConnectionFailed("refused".to_string()));
        }
        Ok(())
    }

    async fn disconnect(&mut self) {
        self.shared.disconnects.fetch_add(1, Ordering::SeqCst);
    }

    async fn request_status(&mut self) -> Result<DeviceState, TransportError> {
        self.shared.requests.fetch_add(1, Ordering::SeqCst);

        let gate = self.shared.gate.lock().clone();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }

        if take_failure(&self.shared.failing_requests) {
            return Err(TransportError::Closed);
        }
        Ok(*self.shared.state.lock())
    }

    async fn send(&mut self, state: &DeviceState) -> Result<(), TransportError> {
        self.shared.sends.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.shared.failing_sends) {
            return Err(TransportError::Io("broken pipe".to_string()));
        }

        self.shared.sent.lock().push(*state);
        *self.shared.state.lock() = *state;
        Ok(())
    }

    fn attach_push(&mut self, sink: PushSink) {
        *self.shared.push.lock() = Some(sink);
    }
}
