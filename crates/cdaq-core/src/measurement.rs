//! Measurement kinds and channel-group parameters.
//!
//! [`MeasurementKind`] is the lookup table that collapses the original
//! per-quantity duplication: channel count, default label, reduction rule,
//! and rounding precision are all derived from the kind.

use crate::error::AcquireError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Physical quantity a session acquires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    /// 32-channel analog voltage input, reduced to per-channel RMS.
    Voltage,
    /// 8-channel thermocouple input, reduced to per-channel mean.
    Temperature,
}

impl MeasurementKind {
    /// Number of physical channels exposed by a module of this kind.
    /// Fixed by the hardware; never changes after construction.
    pub fn channel_count(self) -> usize {
        match self {
            MeasurementKind::Voltage => 32,
            MeasurementKind::Temperature => 8,
        }
    }

    /// Decimal digits the reduced reading is rounded to.
    pub fn rounding_decimals(self) -> u32 {
        match self {
            MeasurementKind::Voltage => 5,
            MeasurementKind::Temperature => 2,
        }
    }

    /// Default display label for channel `index` (0-based).
    pub fn default_label(self, index: usize) -> String {
        match self {
            MeasurementKind::Voltage => format!("Voltage Channel {}", index + 1),
            MeasurementKind::Temperature => format!("Thermo Channel {}", index + 1),
        }
    }

    /// `ai0:N` channel range covering every channel of the module.
    pub fn channel_range(self) -> String {
        format!("ai0:{}", self.channel_count() - 1)
    }
}

/// Thermocouple sensor types accepted by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThermocoupleType {
    B,
    E,
    J,
    K,
    N,
    R,
    S,
    T,
}

impl Default for ThermocoupleType {
    fn default() -> Self {
        ThermocoupleType::J
    }
}

impl ThermocoupleType {
    pub fn as_str(self) -> &'static str {
        match self {
            ThermocoupleType::B => "B",
            ThermocoupleType::E => "E",
            ThermocoupleType::J => "J",
            ThermocoupleType::K => "K",
            ThermocoupleType::N => "N",
            ThermocoupleType::R => "R",
            ThermocoupleType::S => "S",
            ThermocoupleType::T => "T",
        }
    }
}

impl FromStr for ThermocoupleType {
    type Err = AcquireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(ThermocoupleType::B),
            "E" => Ok(ThermocoupleType::E),
            "J" => Ok(ThermocoupleType::J),
            "K" => Ok(ThermocoupleType::K),
            "N" => Ok(ThermocoupleType::N),
            "R" => Ok(ThermocoupleType::R),
            "S" => Ok(ThermocoupleType::S),
            "T" => Ok(ThermocoupleType::T),
            other => Err(AcquireError::InvalidSensorType {
                given: other.to_string(),
            }),
        }
    }
}

/// Input terminal grounding configuration for voltage channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalConfig {
    /// Referenced single-ended.
    Rse,
    /// Non-referenced single-ended. Noise-rejecting; the default.
    Nrse,
    /// Differential.
    Differential,
    /// Pseudo-differential.
    PseudoDifferential,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        TerminalConfig::Nrse
    }
}

/// Temperature unit for thermocouple channels. The configurator always binds
/// Celsius; the other variants exist for drivers that expose the full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl Default for TemperatureUnit {
    fn default() -> Self {
        TemperatureUnit::Celsius
    }
}

/// Sample clock mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionMode {
    /// Free-running acquisition into the driver buffer. The default.
    Continuous,
    /// Acquire a fixed number of samples, then stop.
    Finite,
}

impl Default for AcquisitionMode {
    fn default() -> Self {
        AcquisitionMode::Continuous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_counts_fixed_per_kind() {
        assert_eq!(MeasurementKind::Voltage.channel_count(), 32);
        assert_eq!(MeasurementKind::Temperature.channel_count(), 8);
    }

    #[test]
    fn channel_ranges() {
        assert_eq!(MeasurementKind::Voltage.channel_range(), "ai0:31");
        assert_eq!(MeasurementKind::Temperature.channel_range(), "ai0:7");
    }

    #[test]
    fn default_labels_are_one_based() {
        assert_eq!(
            MeasurementKind::Voltage.default_label(0),
            "Voltage Channel 1"
        );
        assert_eq!(
            MeasurementKind::Temperature.default_label(7),
            "Thermo Channel 8"
        );
    }

    #[test]
    fn thermocouple_codes_parse() {
        for code in ["B", "E", "J", "K", "N", "R", "S", "T"] {
            let parsed: ThermocoupleType = code.parse().unwrap();
            assert_eq!(parsed.as_str(), code);
        }
    }

    #[test]
    fn bad_thermocouple_codes_rejected() {
        for code in ["A", "X", "j", "BB", ""] {
            let err = code.parse::<ThermocoupleType>().unwrap_err();
            assert!(matches!(
                err,
                AcquireError::InvalidSensorType { ref given } if given == code
            ));
        }
    }
}
