//! Session addressing and tuning configuration.
//!
//! Replaces the original client's module-level mutable defaults with an
//! explicit [`SessionConfig`] carried at construction. Defaults differ by
//! transport: slot-addressed cage modules sample slowly into a deep buffer,
//! network-addressed devices faster into a shallow one.

use crate::error::{AcquireError, AcquireResult};
use crate::measurement::{AcquisitionMode, MeasurementKind, TerminalConfig, ThermocoupleType};
use crate::task::ReadTimeout;
use serde::Deserialize;
use std::time::Duration;

/// Physical addressing of one input module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Address {
    /// Slot index in the local cDAQ cage (1-4).
    Slot(u8),
    /// Network-addressed device string, e.g. `cDAQ9189-1D71297Mod1`.
    Device(String),
}

impl Address {
    /// Validate the address. Slot indices must be 1-4; device strings are
    /// accepted as-is (the driver rejects unknown devices at bind time).
    pub fn validate(&self) -> AcquireResult<()> {
        match self {
            Address::Slot(1..=4) => Ok(()),
            Address::Slot(position) => Err(AcquireError::InvalidAddress {
                position: *position,
            }),
            Address::Device(_) => Ok(()),
        }
    }

    /// Driver channel specification covering every channel of `kind`.
    pub fn channel_spec(&self, kind: MeasurementKind) -> String {
        match self {
            Address::Slot(position) => format!("cDAQ1Mod{}/{}", position, kind.channel_range()),
            Address::Device(device) => format!("{}/{}", device, kind.channel_range()),
        }
    }

    pub fn is_slot(&self) -> bool {
        matches!(self, Address::Slot(_))
    }
}

fn default_sampling_freq_hz() -> f64 {
    SessionConfig::SLOT_DEFAULT_RATE_HZ
}

fn default_buffer_size() -> usize {
    SessionConfig::SLOT_DEFAULT_BUFFER
}

/// Tuning parameters for one acquisition session.
///
/// Deserializable from a TOML table; absent fields take the slot-transport
/// defaults. Use [`SessionConfig::defaults_for`] to pick defaults from an
/// address programmatically.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionConfig {
    /// Sample clock rate in Hz.
    #[serde(default = "default_sampling_freq_hz")]
    pub sampling_freq_hz: f64,

    /// Driver buffer depth, in samples per channel. Also used as the
    /// driver-side input buffer capacity.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Terminal grounding mode for voltage channels.
    #[serde(default)]
    pub terminal_config: TerminalConfig,

    /// Sample clock mode.
    #[serde(default)]
    pub acquisition_mode: AcquisitionMode,

    /// Sensor type for thermocouple sessions. Ignored by voltage sessions.
    #[serde(default)]
    pub thermocouple_type: ThermocoupleType,

    /// Upper bound on one blocking read, in milliseconds. `None` waits
    /// forever, which is the default.
    #[serde(default)]
    pub read_timeout_ms: Option<u64>,
}

impl SessionConfig {
    pub const SLOT_DEFAULT_RATE_HZ: f64 = 500.0;
    pub const SLOT_DEFAULT_BUFFER: usize = 100_000;
    pub const NETWORK_DEFAULT_RATE_HZ: f64 = 5_000.0;
    pub const NETWORK_DEFAULT_BUFFER: usize = 5_000;

    /// Defaults for a slot-addressed cage module: 500 Hz into a
    /// 100 000-sample buffer.
    pub fn slot_defaults() -> Self {
        Self {
            sampling_freq_hz: Self::SLOT_DEFAULT_RATE_HZ,
            buffer_size: Self::SLOT_DEFAULT_BUFFER,
            terminal_config: TerminalConfig::default(),
            acquisition_mode: AcquisitionMode::default(),
            thermocouple_type: ThermocoupleType::default(),
            read_timeout_ms: None,
        }
    }

    /// Defaults for a network-addressed device: 5 000 Hz into a
    /// 5 000-sample buffer.
    pub fn network_defaults() -> Self {
        Self {
            sampling_freq_hz: Self::NETWORK_DEFAULT_RATE_HZ,
            buffer_size: Self::NETWORK_DEFAULT_BUFFER,
            ..Self::slot_defaults()
        }
    }

    /// Transport-appropriate defaults for `address`.
    pub fn defaults_for(address: &Address) -> Self {
        if address.is_slot() {
            Self::slot_defaults()
        } else {
            Self::network_defaults()
        }
    }

    /// Deserialize and validate a configuration table.
    pub fn from_toml(value: toml::Value) -> AcquireResult<Self> {
        Ok(value.try_into()?)
    }

    /// Read timeout as the driver-facing enum.
    pub fn read_timeout(&self) -> ReadTimeout {
        match self.read_timeout_ms {
            None => ReadTimeout::Infinite,
            Some(ms) => ReadTimeout::Bounded(Duration::from_millis(ms)),
        }
    }

    pub fn with_sampling_freq_hz(mut self, rate_hz: f64) -> Self {
        self.sampling_freq_hz = rate_hz;
        self
    }

    pub fn with_buffer_size(mut self, samples_per_channel: usize) -> Self {
        self.buffer_size = samples_per_channel;
        self
    }

    pub fn with_terminal_config(mut self, terminal: TerminalConfig) -> Self {
        self.terminal_config = terminal;
        self
    }

    pub fn with_acquisition_mode(mut self, mode: AcquisitionMode) -> Self {
        self.acquisition_mode = mode;
        self
    }

    pub fn with_thermocouple_type(mut self, sensor: ThermocoupleType) -> Self {
        self.thermocouple_type = sensor;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout_ms = timeout.map(|d| d.as_millis() as u64);
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::slot_defaults()
    }
}
