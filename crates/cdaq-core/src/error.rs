//! Error types for the acquisition client.
//!
//! Two layers, mirroring the driver boundary:
//!
//! - [`DriverFault`] is the structured error a [`DaqTask`](crate::task::DaqTask)
//!   implementation reports for a failed driver operation.
//! - [`AcquireError`] is the library-level enum consolidating construction,
//!   naming, lifecycle, and driver failures.
//!
//! Construction-time errors (`InvalidAddress`, `InvalidSensorType`) are fatal
//! to the caller: the session is never usable. `IndexOutOfRange` is fatal only
//! to that naming call. A driver fault during `read_samples` is *never*
//! surfaced as an `Err`; it is logged and reported as a tag on the returned
//! reading (see `cdaq-acquire`).

use crate::state::SessionState;
use thiserror::Error;

/// Category of a driver-reported failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverFaultKind {
    /// Channel binding or parameter rejection.
    Configuration,
    /// Sample clock / timing configuration failure.
    Timing,
    /// Failure while draining samples from the input buffer.
    Read,
    /// Bounded read wait expired before enough samples arrived.
    Timeout,
    /// Task start/stop/close failure.
    Lifecycle,
    /// Underlying hardware fault.
    Hardware,
    /// Anything the driver could not classify.
    Unknown,
}

impl std::fmt::Display for DriverFaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DriverFaultKind::Configuration => "configuration",
            DriverFaultKind::Timing => "timing",
            DriverFaultKind::Read => "read",
            DriverFaultKind::Timeout => "timeout",
            DriverFaultKind::Lifecycle => "lifecycle",
            DriverFaultKind::Hardware => "hardware",
            DriverFaultKind::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

/// Structured failure reported across the driver boundary.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("driver {kind} fault: {message}")]
pub struct DriverFault {
    pub kind: DriverFaultKind,
    pub message: String,
}

impl DriverFault {
    pub fn new(kind: DriverFaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Convenience alias for results using the library error type.
pub type AcquireResult<T> = std::result::Result<T, AcquireError>;

/// Primary error type for the acquisition client.
#[derive(Error, Debug)]
pub enum AcquireError {
    /// Slot index outside the cage. Construction-fatal.
    #[error("Invalid cage position {position}. Must be 1, 2, 3, or 4.")]
    InvalidAddress { position: u8 },

    /// Unrecognized thermocouple code. Construction-fatal.
    #[error("Invalid thermocouple type '{given}'. Must be one of B, E, J, K, N, R, S, T.")]
    InvalidSensorType { given: String },

    /// Channel index outside the registry. The session remains usable.
    #[error("Invalid channel index {index}. Must be less than {channel_count}.")]
    IndexOutOfRange { index: usize, channel_count: usize },

    /// Lifecycle operation called in a state that does not permit it.
    #[error("Cannot {operation} a session in the {from} state")]
    InvalidTransition {
        from: SessionState,
        operation: &'static str,
    },

    /// Configuration table failed to deserialize.
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Driver failure during construction or lifecycle control.
    #[error(transparent)]
    Driver(#[from] DriverFault),

    /// Fault-log I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
