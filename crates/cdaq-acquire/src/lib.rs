//! `cdaq-acquire`
//!
//! Acquisition sessions for multi-channel analog input modules (32-channel
//! voltage, 8-channel thermocouple), addressed either by cDAQ cage slot or
//! by network device string.
//!
//! A session is configured once against a [`DaqDriver`] binding, then read
//! in a loop: the driver samples continuously into its own buffer, each
//! blocking read drains a fixed-size block, and the block is reduced to one
//! scalar per channel (RMS for voltage, mean for temperature).
//!
//! ```rust,no_run
//! use cdaq_acquire::{Address, AnalogInput, ThermocoupleType};
//! # fn demo(driver: &dyn cdaq_acquire::DaqDriver) -> cdaq_acquire::AcquireResult<()> {
//! let mut daq = AnalogInput::thermocouple(driver, Address::Slot(2), ThermocoupleType::J)?;
//! daq.start()?;
//! let reading = daq.read_samples()?;
//! println!("{:?}", reading.values);
//! daq.stop()?;
//! daq.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! Reads never fail on a driver fault. The fault is logged, appended to the
//! process fault log, and tagged on the returned [`Reading`]; the values
//! degrade to the zero-initialized buffer. See [`Reading::is_degraded`].

mod session;

pub use session::{AnalogInput, Reading, DEFAULT_READ_SAMPLES};

// The core vocabulary, re-exported so most callers depend on this crate only.
pub use cdaq_core::{
    AcquireError, AcquireResult, AcquisitionMode, Address, DaqDriver, DaqTask, DriverFault,
    DriverFaultKind, FaultLog, MeasurementKind, ReadTimeout, SessionConfig, SessionState,
    TerminalConfig, ThermocoupleType,
};
