// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device state coordinator.

use std::ops::ControlFlow;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result, ValueError};
use crate::scheduler::{Debouncer, spawn_periodic};
use crate::state::{DeviceState, Snapshot, StateCache};
use crate::subscription::{CallbackRegistry, SubscriptionId};
use crate::transport::{PushSink, Transport};

use super::builder::CoordinatorBuilder;
use super::coordinator_config::CoordinatorConfig;
use super::link::{ConnectionState, Link};
use super::single_flight::{self, SingleFlight};

/// Keeps one device's state current for any number of consumers.
///
/// The coordinator owns the transport, caches the last reported state and
/// notifies subscribers whenever a new state is accepted. Refreshes run on
/// a fixed interval, after writes (debounced) and on demand. Concurrent
/// refreshes share a single transport round-trip.
///
/// The handle is cheap to clone; all clones drive the same device. Background
/// tasks stop when [`shutdown`](Self::shutdown) is called or the last handle
/// is dropped.
///
/// # Examples
///
/// ```no_run
/// use homeeasy_lib::{Coordinator, CoordinatorConfig, transport::Transport};
///
/// # async fn example<T: Transport>(transport: T) -> homeeasy_lib::Result<()> {
/// let config = CoordinatorConfig::new("192.168.1.40");
/// let (coordinator, first) = Coordinator::builder(transport, config).build().await?;
/// println!("target: {}", first.state().desired_temperature);
///
/// coordinator.send(|state| state.desired_temperature = 22).await?;
/// coordinator.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct Coordinator<T: Transport> {
    inner: Arc<Inner<T>>,
}

struct Inner<T: Transport> {
    config: CoordinatorConfig,
    link: tokio::sync::Mutex<Link<T>>,
    connection: watch::Receiver<ConnectionState>,
    cache: StateCache,
    callbacks: CallbackRegistry,
    flight: SingleFlight<Result<Snapshot>>,
    // Serializes cache store + fan-out so notifications follow completion order
    publish: Mutex<()>,
    confirm: Debouncer,
    shutdown: CancellationToken,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl<T: Transport> Clone for Coordinator<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> std::fmt::Debug for Coordinator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("address", &self.inner.config.address)
            .field("connection", &*self.inner.connection.borrow())
            .field("sequence", &self.inner.cache.last_sequence())
            .field("subscribers", &self.inner.callbacks.callback_count())
            .field("stopped", &self.inner.shutdown.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Coordinator<T> {
    /// Creates a builder for a coordinator around `transport`.
    #[must_use]
    pub fn builder(transport: T, config: CoordinatorConfig) -> CoordinatorBuilder<T> {
        CoordinatorBuilder::new(transport, config)
    }

    /// Starts the background tasks. Must run inside a tokio runtime.
    pub(crate) fn start(mut transport: T, config: CoordinatorConfig) -> Self {
        let (push_tx, push_rx) = mpsc::unbounded_channel();
        transport.attach_push(PushSink::new(push_tx));

        let (link, connection) =
            Link::new(transport, config.address.clone(), config.request_timeout);
        let (confirm, confirm_loop) = Debouncer::new(config.refresh_cooldown);
        let shutdown = CancellationToken::new();

        let inner = Arc::new(Inner {
            config,
            link: tokio::sync::Mutex::new(link),
            connection,
            cache: StateCache::new(),
            callbacks: CallbackRegistry::new(),
            flight: SingleFlight::new(),
            publish: Mutex::new(()),
            confirm,
            shutdown: shutdown.clone(),
            tasks: Mutex::new(Vec::new()),
        });

        let weak = Arc::downgrade(&inner);
        let poll = {
            let weak = weak.clone();
            spawn_periodic(inner.config.poll_interval, shutdown.clone(), move || {
                refresh_in_background(weak.clone(), "poll")
            })
        };
        let confirmation = {
            let weak = weak.clone();
            confirm_loop.spawn(shutdown.clone(), move || {
                refresh_in_background(weak.clone(), "confirm")
            })
        };
        let pushes = tokio::spawn(listen_for_pushes(weak, push_rx, shutdown));
        *inner.tasks.lock() = vec![poll, confirmation, pushes];

        tracing::info!(
            address = %inner.config.address,
            poll_interval_secs = inner.config.poll_interval.as_secs(),
            refresh_cooldown_secs = inner.config.refresh_cooldown.as_secs(),
            "Coordinator started"
        );

        Self { inner }
    }

    /// Returns the configuration the coordinator was built with.
    #[must_use]
    pub fn config(&self) -> &CoordinatorConfig {
        &self.inner.config
    }

    /// Fetches the device state and notifies subscribers.
    ///
    /// Connects first if needed. A call made while another refresh is in
    /// flight waits for that refresh and returns its result instead of
    /// issuing a second request.
    ///
    /// # Errors
    ///
    /// - `Error::NotConnected` if the connect attempt fails
    /// - `Error::Transport` if the status request fails
    /// - `Error::InvalidState` if the device reports an invalid state
    /// - `Error::CoordinatorStopped` after [`shutdown`](Self::shutdown)
    pub async fn refresh(&self) -> Result<Snapshot> {
        self.inner.ensure_running()?;
        Arc::clone(&self.inner).refresh().await
    }

    /// Applies `mutator` to the cached state and transmits the result.
    ///
    /// A confirmation refresh is scheduled once the quiet period passes
    /// with no further write. Returns the snapshot the write was based on;
    /// subscribers learn the device's actual state from the confirmation.
    ///
    /// # Errors
    ///
    /// - `Error::NoCachedState` before the first successful refresh
    /// - `Error::InvalidState` if the new state fails validation (no I/O)
    /// - `Error::NotConnected` if the connect attempt fails
    /// - `Error::Transport` if the transmission fails
    /// - `Error::CoordinatorStopped` after [`shutdown`](Self::shutdown)
    pub async fn send<F>(&self, mutator: F) -> Result<Snapshot>
    where
        F: FnOnce(&mut DeviceState),
    {
        self.try_send(|state| {
            mutator(state);
            Ok(())
        })
        .await
    }

    /// Like [`send`](Self::send), with a mutator that can reject its input.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send). A mutator error becomes
    /// `Error::InvalidState` and nothing is transmitted.
    pub async fn try_send<F>(&self, mutator: F) -> Result<Snapshot>
    where
        F: FnOnce(&mut DeviceState) -> std::result::Result<(), ValueError>,
    {
        let (base, candidate) = self.inner.prepare(mutator)?;
        let result = self.inner.transmit(&candidate).await;
        self.inner.schedule_confirmation(&result);
        result.map(|()| base)
    }

    /// Transmits like [`try_send`](Self::try_send), then refreshes at once.
    ///
    /// Returns the snapshot of the confirming refresh.
    ///
    /// # Errors
    ///
    /// As [`try_send`](Self::try_send) and [`refresh`](Self::refresh).
    pub async fn send_and_confirm<F>(&self, mutator: F) -> Result<Snapshot>
    where
        F: FnOnce(&mut DeviceState) -> std::result::Result<(), ValueError>,
    {
        let (_, candidate) = self.inner.prepare(mutator)?;
        let result = self.inner.transmit(&candidate).await;
        if result.is_err() {
            self.inner.schedule_confirmation(&result);
        }
        result?;
        self.refresh().await
    }

    /// Registers a callback for every accepted state.
    ///
    /// Callbacks run on the coordinator's task right after the cache is
    /// updated. A panicking callback is logged and does not affect others.
    ///
    /// # Errors
    ///
    /// Returns `Error::CoordinatorStopped` after [`shutdown`](Self::shutdown).
    pub fn subscribe<F>(&self, callback: F) -> Result<SubscriptionId>
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        self.inner.ensure_running()?;
        let id = self.inner.callbacks.subscribe(callback);

        // Lost a race with shutdown
        if self.inner.shutdown.is_cancelled() {
            self.inner.callbacks.unsubscribe(id);
            return Err(Error::CoordinatorStopped);
        }

        tracing::debug!(subscription = %id, "Subscriber added");
        Ok(id)
    }

    /// Removes a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.inner.callbacks.unsubscribe(id);
        if removed {
            tracing::debug!(subscription = %id, "Subscriber removed");
        }
        removed
    }

    /// Returns the cached snapshot without waiting.
    ///
    /// `None` before the first successful refresh and after shutdown.
    #[must_use]
    pub fn current_snapshot(&self) -> Option<Snapshot> {
        self.inner.cache.get()
    }

    /// Returns `true` while the cached snapshot is fresh.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.inner.cache.get().is_some_and(|s| s.is_fresh())
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        *self.inner.connection.borrow()
    }

    /// Returns a receiver that observes connection state changes.
    #[must_use]
    pub fn watch_connection(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection.clone()
    }

    /// Returns `true` once [`shutdown`](Self::shutdown) has been called.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.inner.shutdown.is_cancelled()
    }

    /// Stops the coordinator.
    ///
    /// Cancels the timers and any in-flight operation, waits for background
    /// tasks to finish, disconnects, and drops the cache and every
    /// subscriber. Later operations fail with `Error::CoordinatorStopped`.
    pub async fn shutdown(&self) {
        if self.inner.shutdown.is_cancelled() {
            return;
        }
        tracing::info!(address = %self.inner.config.address, "Stopping coordinator");
        self.inner.shutdown.cancel();

        let tasks = std::mem::take(&mut *self.inner.tasks.lock());
        for task in tasks {
            if let Err(e) = task.await
                && e.is_panic()
            {
                tracing::error!(error = %e, "Coordinator task panicked");
            }
        }

        self.inner.link.lock().await.close().await;

        {
            let _publish = self.inner.publish.lock();
            self.inner.callbacks.clear();
            self.inner.cache.clear();
        }
        tracing::info!(address = %self.inner.config.address, "Coordinator stopped");
    }
}

impl<T: Transport> Inner<T> {
    fn ensure_running(&self) -> Result<()> {
        if self.shutdown.is_cancelled() {
            Err(Error::CoordinatorStopped)
        } else {
            Ok(())
        }
    }

    async fn refresh(self: Arc<Self>) -> Result<Snapshot> {
        let flight = self.flight.join_or_start(|tx| {
            let inner = Arc::clone(&self);
            tokio::spawn(async move {
                tracing::debug!(address = %inner.config.address, "Refresh started");
                let result = tokio::select! {
                    biased;
                    () = inner.shutdown.cancelled() => Err(Error::CoordinatorStopped),
                    result = inner.fetch() => result,
                };
                tx.send_replace(Some(result));
            });
        });

        single_flight::wait(flight)
            .await
            .unwrap_or(Err(Error::CoordinatorStopped))
    }

    async fn fetch(&self) -> Result<Snapshot> {
        let reported = self.link.lock().await.request_status().await;

        match reported.and_then(|state| {
            state.validate()?;
            Ok(state)
        }) {
            Ok(state) => self.publish(state),
            Err(e) => {
                if self.cache.mark_stale() {
                    tracing::debug!(address = %self.config.address, "Cached state marked stale");
                }
                Err(e)
            }
        }
    }

    /// Stores `state` and notifies subscribers, in completion order.
    fn publish(&self, state: DeviceState) -> Result<Snapshot> {
        let _publish = self.publish.lock();
        self.ensure_running()?;

        let snapshot = self.cache.store(state);
        let notified = self.callbacks.dispatch(&snapshot);
        tracing::debug!(
            address = %self.config.address,
            sequence = snapshot.sequence(),
            notified,
            "State updated"
        );
        Ok(snapshot)
    }

    fn accept_push(&self, state: DeviceState) {
        if let Err(e) = state.validate() {
            tracing::warn!(address = %self.config.address, error = %e, "Dropping invalid pushed state");
            return;
        }
        if let Ok(snapshot) = self.publish(state) {
            tracing::debug!(sequence = snapshot.sequence(), "Accepted pushed state");
        }
    }

    fn prepare<F>(&self, mutator: F) -> Result<(Snapshot, DeviceState)>
    where
        F: FnOnce(&mut DeviceState) -> std::result::Result<(), ValueError>,
    {
        self.ensure_running()?;
        let base = self.cache.get().ok_or(Error::NoCachedState)?;

        let mut candidate = *base.state();
        mutator(&mut candidate)?;
        candidate.validate()?;
        Ok((base, candidate))
    }

    async fn transmit(&self, candidate: &DeviceState) -> Result<()> {
        let result = tokio::select! {
            biased;
            () = self.shutdown.cancelled() => Err(Error::CoordinatorStopped),
            result = async { self.link.lock().await.send(candidate).await } => result,
        };

        if matches!(result, Err(Error::NotConnected(_) | Error::Transport(_)))
            && self.cache.mark_stale()
        {
            tracing::debug!(address = %self.config.address, "Cached state marked stale");
        }
        result
    }

    /// Schedules the debounced confirmation after a transmission attempt.
    fn schedule_confirmation(&self, result: &Result<()>) {
        match result {
            Ok(()) | Err(Error::NotConnected(_) | Error::Transport(_)) => {
                if self.confirm.call() {
                    tracing::debug!(
                        cooldown_secs = self.confirm.cooldown().as_secs(),
                        "Confirmation refresh scheduled"
                    );
                }
            }
            Err(_) => {}
        }
    }
}

impl<T: Transport> Drop for Inner<T> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn refresh_in_background<T: Transport>(
    inner: Weak<Inner<T>>,
    trigger: &'static str,
) -> ControlFlow<()> {
    let Some(inner) = inner.upgrade() else {
        return ControlFlow::Break(());
    };

    match inner.refresh().await {
        Ok(snapshot) => {
            tracing::trace!(trigger, sequence = snapshot.sequence(), "Background refresh done");
        }
        Err(Error::CoordinatorStopped) => return ControlFlow::Break(()),
        // Already logged where the transport failed
        Err(e) if e.is_transport() => {
            tracing::debug!(trigger, error = %e, "Background refresh failed");
        }
        Err(e) => tracing::error!(trigger, error = %e, "Background refresh failed"),
    }
    ControlFlow::Continue(())
}

async fn listen_for_pushes<T: Transport>(
    inner: Weak<Inner<T>>,
    mut pushes: mpsc::UnboundedReceiver<DeviceState>,
    shutdown: CancellationToken,
) {
    loop {
        let state = tokio::select! {
            biased;
            () = shutdown.cancelled() => break,
            pushed = pushes.recv() => match pushed {
                Some(state) => state,
                None => break,
            },
        };

        let Some(inner) = inner.upgrade() else {
            break;
        };
        inner.accept_push(state);
    }
    tracing::trace!("Push listener stopped");
}
