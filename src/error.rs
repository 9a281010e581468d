// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `homeeasy_lib` library.
//!
//! This module provides the error hierarchy returned by the coordinator:
//! value validation, transport communication, and coordinator lifecycle.
//! Every error is returned to the direct caller; none of them is ever
//! broadcast to subscribers.

use thiserror::Error;

/// The main error type for this library.
///
/// The type is `Clone` because a single in-flight refresh shares its result
/// with every caller that joined it.
#[derive(Debug, Error, Clone)]
pub enum Error {
    /// The connect attempt failed. The coordinator stays disconnected and
    /// the next operation retries the connect.
    #[error("device is not connected: {0}")]
    NotConnected(TransportError),

    /// A request or send failed on an already-open connection. The
    /// coordinator dropped the connection.
    #[error("transport error: {0}")]
    Transport(TransportError),

    /// A state failed local validation. No I/O was attempted.
    #[error("invalid state: {0}")]
    InvalidState(#[from] ValueError),

    /// A write was attempted before the first successful refresh.
    #[error("no cached state, the device has not been refreshed yet")]
    NoCachedState,

    /// The coordinator has been shut down.
    #[error("coordinator has been stopped")]
    CoordinatorStopped,

    /// The coordinator configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl Error {
    /// Returns `true` if this error came from the transport (connect,
    /// request or send).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::NotConnected(_) | Self::Transport(_))
    }
}

/// Errors related to value validation and constraints.
///
/// These errors occur when a state or a presentation value does not fit
/// the device's declared ranges and members.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A device code is not one of the enumeration's declared members.
    #[error("invalid {kind} code: {code}")]
    InvalidCode {
        /// The enumeration the code was decoded into.
        kind: &'static str,
        /// The offending code.
        code: u8,
    },

    /// A presentation name is not one of the enumeration's declared members.
    #[error("unknown {kind} option: {option}")]
    UnknownOption {
        /// The enumeration the name was parsed into.
        kind: &'static str,
        /// The offending name.
        option: String,
    },

    /// A reported temperature is NaN or infinite.
    #[error("temperature is not a finite number")]
    NonFiniteTemperature,
}

/// Errors reported by a [`Transport`](crate::transport::Transport)
/// implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The device address could not be used.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The call did not complete in time.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The device refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Socket level failure.
    #[error("I/O error: {0}")]
    Io(String),

    /// The connection was closed by the peer.
    #[error("connection closed")]
    Closed,
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::BrokenPipe
            | std::io::ErrorKind::UnexpectedEof => Self::Closed,
            _ => Self::Io(err.to_string()),
        }
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 16,
            max: 31,
            actual: 40,
        };
        assert_eq!(err.to_string(), "value 40 is out of range [16, 31]");
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::InvalidCode {
            kind: "mode",
            code: 9,
        };
        let err: Error = value_err.into();
        assert!(matches!(
            err,
            Error::InvalidState(ValueError::InvalidCode { code: 9, .. })
        ));
    }

    #[test]
    fn unknown_option_display() {
        let err = ValueError::UnknownOption {
            kind: "vertical flow",
            option: "Sideways".to_string(),
        };
        assert_eq!(err.to_string(), "unknown vertical flow option: Sideways");
    }

    #[test]
    fn transport_errors_are_classified() {
        assert!(Error::NotConnected(TransportError::Closed).is_transport());
        assert!(Error::Transport(TransportError::Timeout(10)).is_transport());
        assert!(!Error::NoCachedState.is_transport());
        assert!(!Error::CoordinatorStopped.is_transport());
    }

    #[test]
    fn io_error_conversion() {
        let reset = std::io::Error::from(std::io::ErrorKind::ConnectionReset);
        assert_eq!(TransportError::from(reset), TransportError::Closed);

        let other = std::io::Error::other("boom");
        assert!(matches!(TransportError::from(other), TransportError::Io(_)));
    }

    #[test]
    fn error_is_clone() {
        let err = Error::Transport(TransportError::Rejected("busy".to_string()));
        let copy = err.clone();
        assert_eq!(err.to_string(), copy.to_string());
    }
}
