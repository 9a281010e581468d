// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generic projection of one device property.

use crate::coordinator::Coordinator;
use crate::error::{Result, ValueError};
use crate::state::{DeviceState, Snapshot};
use crate::subscription::SubscriptionId;
use crate::transport::Transport;

/// Reads a presentation value out of a state.
pub type ReadFn<V> = fn(&DeviceState) -> V;

/// Writes a presentation input into a state.
pub type WriteFn<I> = fn(&mut DeviceState, I) -> std::result::Result<(), ValueError>;

/// A device property bound to a coordinator.
///
/// `V` is the value consumers see, `I` the input they write. The view
/// holds no state of its own: reads go to the coordinator's cache and
/// writes go through [`Coordinator::try_send`].
///
/// # Examples
///
/// ```no_run
/// use homeeasy_lib::views::BoundView;
/// use homeeasy_lib::{Coordinator, transport::Transport};
///
/// # async fn example<T: Transport>(coordinator: Coordinator<T>) -> homeeasy_lib::Result<()> {
/// let power = BoundView::new(
///     coordinator,
///     |state| state.power,
///     |state, on: bool| {
///         state.power = on;
///         Ok(())
///     },
/// );
///
/// if power.get() == Some(false) {
///     power.set(true).await?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct BoundView<T: Transport, V, I> {
    coordinator: Coordinator<T>,
    read: ReadFn<V>,
    write: WriteFn<I>,
}

impl<T: Transport, V, I> BoundView<T, V, I> {
    /// Binds a read projection and a write mutator to `coordinator`.
    #[must_use]
    pub fn new(coordinator: Coordinator<T>, read: ReadFn<V>, write: WriteFn<I>) -> Self {
        Self {
            coordinator,
            read,
            write,
        }
    }

    /// Returns the coordinator this view is bound to.
    #[must_use]
    pub fn coordinator(&self) -> &Coordinator<T> {
        &self.coordinator
    }

    /// Projects the cached state. `None` before the first refresh.
    #[must_use]
    pub fn get(&self) -> Option<V> {
        self.coordinator
            .current_snapshot()
            .map(|snapshot| (self.read)(snapshot.state()))
    }

    /// Returns `true` while the coordinator holds a fresh snapshot.
    #[must_use]
    pub fn available(&self) -> bool {
        self.coordinator.is_available()
    }

    /// Writes `input`; confirmation follows after the debounce period.
    ///
    /// # Errors
    ///
    /// See [`Coordinator::try_send`].
    pub async fn set(&self, input: I) -> Result<Snapshot> {
        let write = self.write;
        self.coordinator
            .try_send(move |state| write(state, input))
            .await
    }

    /// Writes `input` and refreshes immediately.
    ///
    /// # Errors
    ///
    /// See [`Coordinator::send_and_confirm`].
    pub async fn set_and_confirm(&self, input: I) -> Result<Snapshot> {
        let write = self.write;
        self.coordinator
            .send_and_confirm(move |state| write(state, input))
            .await
    }

    /// Calls `listener` with the projected value on every accepted state.
    ///
    /// # Errors
    ///
    /// Returns `Error::CoordinatorStopped` after shutdown.
    pub fn subscribe<F>(&self, listener: F) -> Result<SubscriptionId>
    where
        F: Fn(V) + Send + Sync + 'static,
        V: 'static,
    {
        let read = self.read;
        self.coordinator
            .subscribe(move |snapshot| listener(read(snapshot.state())))
    }

    /// Removes a listener added with [`subscribe`](Self::subscribe).
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.coordinator.unsubscribe(id)
    }
}

impl<T: Transport, V, I> Clone for BoundView<T, V, I> {
    fn clone(&self) -> Self {
        Self {
            coordinator: self.coordinator.clone(),
            read: self.read,
            write: self.write,
        }
    }
}

impl<T: Transport, V, I> std::fmt::Debug for BoundView<T, V, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundView")
            .field("coordinator", &self.coordinator)
            .finish_non_exhaustive()
    }
}
