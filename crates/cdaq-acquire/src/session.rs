//! Acquisition sessions.
//!
//! [`AnalogInput`] is the single parameterized session component replacing
//! the original client's four near-duplicate classes: measurement kind
//! (voltage/temperature) and address (cage slot / network device) are
//! constructor parameters, and channel count, units, labels, and reduction
//! all derive from the kind.
//!
//! A session exclusively owns one driver task handle and walks the explicit
//! lifecycle `Configured -> Started -> Stopped -> Closed`. Reads are
//! best-effort: a driver fault during a read never fails the call (see
//! [`Reading`]).

use cdaq_core::{
    reduce, AcquireError, AcquireResult, Address, ChannelGroup, DaqDriver, DaqTask, DriverFault,
    FaultLog, InputBinding, MeasurementKind, SampleBlock, SessionConfig, SessionState,
    TemperatureUnit, ThermocoupleType,
};
use tracing::{debug, warn};

/// Samples per channel drained by [`AnalogInput::read_samples`].
pub const DEFAULT_READ_SAMPLES: usize = 500;

/// One reduced reading: a scalar per channel, in channel-index order.
///
/// `fault` tags a degraded reading. When the driver reports an error during
/// the blocking read, the call does not fail: the fault is appended to the
/// fault log and the values are reduced from the zero-initialized, possibly
/// partially-filled block. Callers that ignore `fault` get the original
/// best-effort behavior, including all-zero readings after a total fault.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub values: Vec<f64>,
    pub fault: Option<DriverFault>,
}

impl Reading {
    /// True when the values came from a faulted (zeroed/partial) read.
    pub fn is_degraded(&self) -> bool {
        self.fault.is_some()
    }
}

/// One configured multi-channel analog input session.
pub struct AnalogInput {
    kind: MeasurementKind,
    address: Address,
    config: SessionConfig,
    names: Vec<String>,
    task: Box<dyn DaqTask>,
    state: SessionState,
    fault_log: FaultLog,
}

impl std::fmt::Debug for AnalogInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalogInput")
            .field("kind", &self.kind)
            .field("address", &self.address)
            .field("config", &self.config)
            .field("names", &self.names)
            .field("state", &self.state)
            .field("fault_log", &self.fault_log)
            .finish_non_exhaustive()
    }
}

impl AnalogInput {
    /// Configure a voltage session with transport-appropriate defaults.
    pub fn voltage(driver: &dyn DaqDriver, address: Address) -> AcquireResult<Self> {
        let config = SessionConfig::defaults_for(&address);
        Self::configure(driver, address, MeasurementKind::Voltage, config)
    }

    /// Configure a thermocouple session with transport-appropriate defaults.
    pub fn thermocouple(
        driver: &dyn DaqDriver,
        address: Address,
        sensor: ThermocoupleType,
    ) -> AcquireResult<Self> {
        let config = SessionConfig::defaults_for(&address).with_thermocouple_type(sensor);
        Self::configure(driver, address, MeasurementKind::Temperature, config)
    }

    /// Validate the address, bind the channel group, and configure timing.
    ///
    /// Acquires exclusive ownership of one task handle; it is released by
    /// [`close`](Self::close) (or best-effort on drop). Construction-time
    /// driver rejections propagate as [`AcquireError::Driver`] and the
    /// half-configured task is closed.
    pub fn configure(
        driver: &dyn DaqDriver,
        address: Address,
        kind: MeasurementKind,
        config: SessionConfig,
    ) -> AcquireResult<Self> {
        Self::configure_with_fault_log(driver, address, kind, config, FaultLog::new())
    }

    /// [`configure`](Self::configure) with an explicit fault-log target.
    /// Tests point this at a temp directory.
    pub fn configure_with_fault_log(
        driver: &dyn DaqDriver,
        address: Address,
        kind: MeasurementKind,
        config: SessionConfig,
        fault_log: FaultLog,
    ) -> AcquireResult<Self> {
        address.validate()?;

        let mut task = driver.create_task()?;
        if let Err(fault) = Self::bind_and_time(task.as_mut(), &address, kind, &config) {
            // Release the half-configured handle before surfacing the error.
            if let Err(close_fault) = task.close() {
                warn!(%close_fault, "failed to close task after configuration error");
            }
            return Err(fault.into());
        }

        let names = (0..kind.channel_count())
            .map(|i| kind.default_label(i))
            .collect();

        debug!(
            ?kind,
            ?address,
            rate_hz = config.sampling_freq_hz,
            buffer = config.buffer_size,
            "session configured"
        );

        Ok(Self {
            kind,
            address,
            config,
            names,
            task,
            state: SessionState::Configured,
            fault_log,
        })
    }

    fn bind_and_time(
        task: &mut dyn DaqTask,
        address: &Address,
        kind: MeasurementKind,
        config: &SessionConfig,
    ) -> Result<(), DriverFault> {
        let input = match kind {
            MeasurementKind::Voltage => InputBinding::Voltage {
                terminal: config.terminal_config,
            },
            MeasurementKind::Temperature => InputBinding::Thermocouple {
                sensor: config.thermocouple_type,
                unit: TemperatureUnit::Celsius,
            },
        };
        let group = ChannelGroup {
            channel_spec: address.channel_spec(kind),
            input,
        };

        task.bind_channels(&group)?;
        task.configure_timing(
            config.sampling_freq_hz,
            config.acquisition_mode,
            config.buffer_size,
        )?;
        task.set_input_buffer_size(config.buffer_size)
    }

    pub fn kind(&self) -> MeasurementKind {
        self.kind
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of physical channels. Fixed by the measurement kind.
    pub fn channel_count(&self) -> usize {
        self.kind.channel_count()
    }

    /// Display labels, one per channel, in channel-index order.
    pub fn channel_names(&self) -> &[String] {
        &self.names
    }

    /// Rename one channel. The registry is independent of the sampling
    /// path; labels are never consulted during acquisition or reduction.
    pub fn set_channel_name(
        &mut self,
        index: usize,
        name: impl Into<String>,
    ) -> AcquireResult<()> {
        if index >= self.names.len() {
            return Err(AcquireError::IndexOutOfRange {
                index,
                channel_count: self.names.len(),
            });
        }
        self.names[index] = name.into();
        Ok(())
    }

    /// Begin driver-side sampling. Valid from Configured or Stopped.
    pub fn start(&mut self) -> AcquireResult<()> {
        match self.state {
            SessionState::Configured | SessionState::Stopped => {
                self.task.start()?;
                self.state = SessionState::Started;
                debug!(?self.address, "session started");
                Ok(())
            }
            from => Err(AcquireError::InvalidTransition {
                from,
                operation: "start",
            }),
        }
    }

    /// Halt driver-side sampling. Valid only from Started.
    pub fn stop(&mut self) -> AcquireResult<()> {
        match self.state {
            SessionState::Started => {
                self.task.stop()?;
                self.state = SessionState::Stopped;
                debug!(?self.address, "session stopped");
                Ok(())
            }
            from => Err(AcquireError::InvalidTransition {
                from,
                operation: "stop",
            }),
        }
    }

    /// Release the task handle. Valid from any non-Closed state; terminal.
    pub fn close(&mut self) -> AcquireResult<()> {
        match self.state {
            SessionState::Closed => Err(AcquireError::InvalidTransition {
                from: SessionState::Closed,
                operation: "close",
            }),
            _ => {
                self.task.close()?;
                self.state = SessionState::Closed;
                debug!(?self.address, "session closed");
                Ok(())
            }
        }
    }

    /// Blocking read of [`DEFAULT_READ_SAMPLES`] samples per channel,
    /// reduced to one scalar per channel.
    pub fn read_samples(&mut self) -> AcquireResult<Reading> {
        self.read_samples_n(DEFAULT_READ_SAMPLES)
    }

    /// Blocking read of `samples_per_channel` samples per channel.
    ///
    /// Valid only while Started; anything else (including a closed session)
    /// fails with [`AcquireError::InvalidTransition`]. Blocks until the
    /// driver delivers the requested count or the configured timeout
    /// expires. A driver fault does not fail the call: it is logged,
    /// appended to the fault log, and returned as [`Reading::fault`]
    /// alongside values reduced from the zeroed/partial block.
    pub fn read_samples_n(&mut self, samples_per_channel: usize) -> AcquireResult<Reading> {
        if self.state != SessionState::Started {
            return Err(AcquireError::InvalidTransition {
                from: self.state,
                operation: "read",
            });
        }

        let mut block = SampleBlock::zeroed(self.kind.channel_count(), samples_per_channel);
        let fault = match self.task.read_many(&mut block, self.config.read_timeout()) {
            Ok(()) => None,
            Err(fault) => {
                warn!(%fault, "read fault swallowed; reading degrades to zeroed buffer");
                self.fault_log.record(&fault.to_string());
                Some(fault)
            }
        };

        Ok(Reading {
            values: reduce(&block, self.kind),
            fault,
        })
    }
}

impl Drop for AnalogInput {
    fn drop(&mut self) {
        if self.state != SessionState::Closed {
            if let Err(fault) = self.task.close() {
                warn!(%fault, "failed to close task on drop");
            }
        }
    }
}
