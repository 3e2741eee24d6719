//! Driver boundary traits.
//!
//! The vendor driver/runtime that performs physical sampling and buffering is
//! not reimplemented here; it is specified as a pair of object-safe traits.
//! Any compliant binding satisfies the library. `cdaq-driver-mock` is the
//! in-tree implementation used by tests and demos.

use crate::error::DriverFault;
use crate::measurement::{AcquisitionMode, TemperatureUnit, TerminalConfig, ThermocoupleType};
use crate::sample::SampleBlock;
use std::time::Duration;

/// How long a blocking read waits for the requested sample count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadTimeout {
    /// Wait forever. The default; acquisition is assumed always-available.
    Infinite,
    /// Fail the read with a timeout fault after the given duration.
    Bounded(Duration),
}

impl Default for ReadTimeout {
    fn default() -> Self {
        ReadTimeout::Infinite
    }
}

/// Input binding for one channel group, derived from the measurement kind.
#[derive(Debug, Clone, PartialEq)]
pub enum InputBinding {
    Voltage {
        terminal: TerminalConfig,
    },
    Thermocouple {
        sensor: ThermocoupleType,
        unit: TemperatureUnit,
    },
}

/// Fully-specified channel group handed to the driver in one bind call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelGroup {
    /// Driver channel specification, e.g. `cDAQ1Mod2/ai0:31`.
    pub channel_spec: String,
    pub input: InputBinding,
}

/// One hardware task: a bound channel group with its own buffer and clock.
///
/// Exclusively owned by the session that configured it. Implementations need
/// `Send` (sessions may live on worker threads) but not `Sync`: exactly one
/// read may be outstanding per task, which `&mut self` enforces.
pub trait DaqTask: Send {
    /// Bind the channel group. Called once, before timing configuration.
    fn bind_channels(&mut self, group: &ChannelGroup) -> Result<(), DriverFault>;

    /// Configure the sample clock: rate, mode, and driver buffer depth.
    fn configure_timing(
        &mut self,
        rate_hz: f64,
        mode: AcquisitionMode,
        samples_per_channel: usize,
    ) -> Result<(), DriverFault>;

    /// Set the driver-side input buffer capacity, in samples per channel.
    fn set_input_buffer_size(&mut self, samples_per_channel: usize) -> Result<(), DriverFault>;

    /// Begin driver-side sampling.
    fn start(&mut self) -> Result<(), DriverFault>;

    /// Halt driver-side sampling. The task can be started again.
    fn stop(&mut self) -> Result<(), DriverFault>;

    /// Release the hardware resources. Terminal.
    fn close(&mut self) -> Result<(), DriverFault>;

    /// Block until `block.samples_per_channel()` samples per channel have
    /// been drained into `block`, or the timeout expires.
    ///
    /// On failure the driver may have partially filled the block; the caller
    /// is expected to have zero-initialized it.
    fn read_many(&mut self, block: &mut SampleBlock, timeout: ReadTimeout)
        -> Result<(), DriverFault>;
}

/// Entry point of a driver binding: creates task handles.
pub trait DaqDriver: Send + Sync {
    fn create_task(&self) -> Result<Box<dyn DaqTask>, DriverFault>;
}
