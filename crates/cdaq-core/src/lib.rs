//! `cdaq-core`
//!
//! Shared types and driver traits for the cdaq analog acquisition client.
//!
//! This crate carries everything the session layer (`cdaq-acquire`) and
//! driver bindings (`cdaq-driver-mock`, or any vendor binding) agree on:
//!
//! - [`task::DaqDriver`] / [`task::DaqTask`]: the driver boundary. The
//!   vendor runtime samples continuously into its own buffer; the library
//!   only drains fixed-size blocks.
//! - [`measurement::MeasurementKind`]: the voltage/temperature lookup table
//!   (channel count, labels, reduction, rounding).
//! - [`sample::SampleBlock`] and [`sample::reduce`]: the channels × samples
//!   matrix one read produces and its per-channel scalar reduction.
//! - [`config::Address`] / [`config::SessionConfig`]: addressing and tuning,
//!   with documented per-transport defaults.
//! - [`error::AcquireError`]: the library error taxonomy.
//! - [`fault_log::FaultLog`]: the append-only log absorbing swallowed read
//!   faults.

pub mod config;
pub mod error;
pub mod fault_log;
pub mod measurement;
pub mod sample;
pub mod state;
pub mod task;

pub use config::{Address, SessionConfig};
pub use error::{AcquireError, AcquireResult, DriverFault, DriverFaultKind};
pub use fault_log::FaultLog;
pub use measurement::{
    AcquisitionMode, MeasurementKind, TemperatureUnit, TerminalConfig, ThermocoupleType,
};
pub use sample::{reduce, SampleBlock};
pub use state::SessionState;
pub use task::{ChannelGroup, DaqDriver, DaqTask, InputBinding, ReadTimeout};
