//! Integration tests for `AnalogInput` against the mock driver binding.

use cdaq_acquire::{
    AcquireError, AcquisitionMode, Address, AnalogInput, DriverFaultKind, FaultLog,
    MeasurementKind, ReadTimeout, SessionConfig, SessionState, TerminalConfig, ThermocoupleType,
};
use cdaq_core::InputBinding;
use cdaq_driver_mock::{FaultPlan, MockDaq, SignalPattern};

fn temp_fault_log(dir: &tempfile::TempDir) -> FaultLog {
    FaultLog::at_path(dir.path().join("error_log.txt"))
}

// ---------------------------------------------------------------------------
// Construction and validation
// ---------------------------------------------------------------------------

#[test]
fn all_valid_slots_configure() {
    let driver = MockDaq::new();
    for position in 1..=4u8 {
        assert!(AnalogInput::voltage(&driver, Address::Slot(position)).is_ok());
        assert!(
            AnalogInput::thermocouple(&driver, Address::Slot(position), ThermocoupleType::J)
                .is_ok()
        );
    }
}

#[test]
fn invalid_slots_fail_with_invalid_address() {
    let driver = MockDaq::new();
    for position in [0u8, 5, 9, 200] {
        let err = AnalogInput::voltage(&driver, Address::Slot(position)).unwrap_err();
        assert!(matches!(
            err,
            AcquireError::InvalidAddress { position: p } if p == position
        ));
    }
}

#[test]
fn thermocouple_codes_parse_into_sessions() {
    let driver = MockDaq::new();
    for code in ["B", "E", "J", "K", "N", "R", "S", "T"] {
        let sensor: ThermocoupleType = code.parse().unwrap();
        assert!(AnalogInput::thermocouple(&driver, Address::Slot(1), sensor).is_ok());
    }

    // A bad code never reaches the configurator.
    let err = "Q".parse::<ThermocoupleType>().unwrap_err();
    assert!(matches!(err, AcquireError::InvalidSensorType { ref given } if given == "Q"));
}

#[test]
fn slot_voltage_binds_full_channel_range() {
    let driver = MockDaq::new();
    let _session = AnalogInput::voltage(&driver, Address::Slot(3)).unwrap();

    let group = driver.state().bound_group.unwrap();
    assert_eq!(group.channel_spec, "cDAQ1Mod3/ai0:31");
    assert!(matches!(
        group.input,
        InputBinding::Voltage {
            terminal: TerminalConfig::Nrse
        }
    ));
}

#[test]
fn network_thermocouple_binds_device_string_and_celsius() {
    let driver = MockDaq::new();
    let address = Address::Device("cDAQ9189-1D71297Mod1".into());
    let _session =
        AnalogInput::thermocouple(&driver, address, ThermocoupleType::K).unwrap();

    let group = driver.state().bound_group.unwrap();
    assert_eq!(group.channel_spec, "cDAQ9189-1D71297Mod1/ai0:7");
    assert!(matches!(
        group.input,
        InputBinding::Thermocouple {
            sensor: ThermocoupleType::K,
            unit: cdaq_core::TemperatureUnit::Celsius,
        }
    ));
}

#[test]
fn timing_and_buffer_reach_the_driver() {
    let driver = MockDaq::new();
    let config = SessionConfig::slot_defaults()
        .with_sampling_freq_hz(2_000.0)
        .with_buffer_size(20_000)
        .with_acquisition_mode(AcquisitionMode::Finite);
    let _session = AnalogInput::configure(
        &driver,
        Address::Slot(1),
        MeasurementKind::Voltage,
        config,
    )
    .unwrap();

    let state = driver.state();
    assert_eq!(state.timing, Some((2_000.0, AcquisitionMode::Finite, 20_000)));
    assert_eq!(state.input_buffer_size, Some(20_000));
}

#[test]
fn transport_defaults_applied_by_convenience_constructors() {
    let driver = MockDaq::new();

    let slot = AnalogInput::voltage(&driver, Address::Slot(1)).unwrap();
    assert_eq!(slot.config().sampling_freq_hz, 500.0);
    assert_eq!(slot.config().buffer_size, 100_000);

    let network = AnalogInput::voltage(&driver, Address::Device("dev".into())).unwrap();
    assert_eq!(network.config().sampling_freq_hz, 5_000.0);
    assert_eq!(network.config().buffer_size, 5_000);
}

#[test]
fn bind_rejection_fails_construction_and_releases_the_task() {
    let driver = MockDaq::new().with_fault_plan(FaultPlan {
        fail_bind: true,
        ..FaultPlan::none()
    });
    let err = AnalogInput::voltage(&driver, Address::Slot(1)).unwrap_err();
    assert!(matches!(err, AcquireError::Driver(_)));
    assert_eq!(driver.state().closes, 1);
}

// ---------------------------------------------------------------------------
// Channel counts and naming registry
// ---------------------------------------------------------------------------

#[test]
fn channel_count_fixed_per_kind_regardless_of_tuning() {
    let driver = MockDaq::new();
    let config = SessionConfig::slot_defaults()
        .with_sampling_freq_hz(9_999.0)
        .with_buffer_size(123);

    let voltage = AnalogInput::configure(
        &driver,
        Address::Slot(1),
        MeasurementKind::Voltage,
        config.clone(),
    )
    .unwrap();
    assert_eq!(voltage.channel_count(), 32);
    assert_eq!(voltage.channel_names().len(), 32);

    let thermo = AnalogInput::configure(
        &driver,
        Address::Slot(2),
        MeasurementKind::Temperature,
        config,
    )
    .unwrap();
    assert_eq!(thermo.channel_count(), 8);
    assert_eq!(thermo.channel_names().len(), 8);
}

#[test]
fn default_channel_names_are_kind_specific() {
    let driver = MockDaq::new();
    let voltage = AnalogInput::voltage(&driver, Address::Slot(1)).unwrap();
    assert_eq!(voltage.channel_names()[0], "Voltage Channel 1");
    assert_eq!(voltage.channel_names()[31], "Voltage Channel 32");

    let thermo =
        AnalogInput::thermocouple(&driver, Address::Slot(2), ThermocoupleType::J).unwrap();
    assert_eq!(thermo.channel_names()[0], "Thermo Channel 1");
    assert_eq!(thermo.channel_names()[7], "Thermo Channel 8");
}

#[test]
fn set_channel_name_roundtrip() {
    let driver = MockDaq::new();
    let mut session = AnalogInput::voltage(&driver, Address::Slot(1)).unwrap();
    session.set_channel_name(0, "Probe A").unwrap();
    assert_eq!(session.channel_names()[0], "Probe A");
    // Other slots untouched.
    assert_eq!(session.channel_names()[1], "Voltage Channel 2");
}

#[test]
fn set_channel_name_rejects_out_of_range_index() {
    let driver = MockDaq::new();
    let mut session =
        AnalogInput::thermocouple(&driver, Address::Slot(1), ThermocoupleType::J).unwrap();
    let err = session.set_channel_name(8, "x").unwrap_err();
    assert!(matches!(
        err,
        AcquireError::IndexOutOfRange {
            index: 8,
            channel_count: 8
        }
    ));
    // The session stays usable after a naming error.
    session.set_channel_name(7, "Last").unwrap();
    assert_eq!(session.channel_names()[7], "Last");
}

// ---------------------------------------------------------------------------
// Lifecycle state machine
// ---------------------------------------------------------------------------

#[test]
fn full_lifecycle_walk() {
    let driver = MockDaq::new().with_pattern(SignalPattern::Constant(1.0));
    let mut session = AnalogInput::voltage(&driver, Address::Slot(1)).unwrap();
    assert_eq!(session.state(), SessionState::Configured);

    session.start().unwrap();
    assert_eq!(session.state(), SessionState::Started);

    session.read_samples().unwrap();

    session.stop().unwrap();
    assert_eq!(session.state(), SessionState::Stopped);

    // Restart from Stopped is legal.
    session.start().unwrap();
    session.stop().unwrap();

    session.close().unwrap();
    assert_eq!(session.state(), SessionState::Closed);

    let state = driver.state();
    assert_eq!(state.starts, 2);
    assert_eq!(state.stops, 2);
    assert_eq!(state.closes, 1);
}

#[test]
fn illegal_transitions_rejected() {
    let driver = MockDaq::new();
    let mut session = AnalogInput::voltage(&driver, Address::Slot(1)).unwrap();

    // Configured: read and stop are illegal.
    assert!(matches!(
        session.read_samples().unwrap_err(),
        AcquireError::InvalidTransition {
            from: SessionState::Configured,
            operation: "read"
        }
    ));
    assert!(matches!(
        session.stop().unwrap_err(),
        AcquireError::InvalidTransition {
            from: SessionState::Configured,
            operation: "stop"
        }
    ));

    // Started: start again is illegal.
    session.start().unwrap();
    assert!(matches!(
        session.start().unwrap_err(),
        AcquireError::InvalidTransition {
            from: SessionState::Started,
            operation: "start"
        }
    ));

    // Closed is terminal.
    session.close().unwrap();
    for (result, operation) in [
        (session.start().unwrap_err(), "start"),
        (session.stop().unwrap_err(), "stop"),
        (session.close().unwrap_err(), "close"),
        (session.read_samples().unwrap_err(), "read"),
    ] {
        assert!(matches!(
            result,
            AcquireError::InvalidTransition {
                from: SessionState::Closed,
                operation: op
            } if op == operation
        ));
    }

    // Exactly one driver-level close happened.
    assert_eq!(driver.state().closes, 1);
}

#[test]
fn start_failure_propagates_and_state_unchanged() {
    let driver = MockDaq::new().with_fault_plan(FaultPlan {
        fail_start: true,
        ..FaultPlan::none()
    });
    let mut session = AnalogInput::voltage(&driver, Address::Slot(1)).unwrap();
    let err = session.start().unwrap_err();
    assert!(matches!(err, AcquireError::Driver(_)));
    assert_eq!(session.state(), SessionState::Configured);
}

#[test]
fn drop_closes_an_open_session() {
    let driver = MockDaq::new();
    {
        let mut session = AnalogInput::voltage(&driver, Address::Slot(1)).unwrap();
        session.start().unwrap();
    }
    assert_eq!(driver.state().closes, 1);

    // An explicitly closed session is not closed twice.
    {
        let mut session = AnalogInput::voltage(&driver, Address::Slot(1)).unwrap();
        session.close().unwrap();
    }
    assert_eq!(driver.state().closes, 2);
}

// ---------------------------------------------------------------------------
// Streaming reads and reduction
// ---------------------------------------------------------------------------

#[test]
fn voltage_read_reduces_to_rms_per_channel() {
    let driver = MockDaq::new().with_pattern(SignalPattern::Constant(3.0));
    let mut session = AnalogInput::voltage(&driver, Address::Slot(4)).unwrap();
    session.start().unwrap();

    let reading = session.read_samples().unwrap();
    assert_eq!(reading.values.len(), 32);
    assert!(reading.values.iter().all(|&v| v == 3.00000));
    assert!(!reading.is_degraded());
}

#[test]
fn alternating_signal_has_unit_rms() {
    let driver = MockDaq::new().with_pattern(SignalPattern::Alternating(1.0));
    let mut session = AnalogInput::voltage(&driver, Address::Slot(1)).unwrap();
    session.start().unwrap();

    let reading = session.read_samples().unwrap();
    assert!(reading.values.iter().all(|&v| v == 1.00000));
}

#[test]
fn thermocouple_read_reduces_to_mean_per_channel() {
    let driver = MockDaq::new().with_pattern(SignalPattern::Noise {
        mean: 22.0,
        amplitude: 0.4,
        seed: 11,
    });
    let mut session =
        AnalogInput::thermocouple(&driver, Address::Slot(2), ThermocoupleType::J).unwrap();
    session.start().unwrap();

    let reading = session.read_samples().unwrap();
    assert_eq!(reading.values.len(), 8);
    // Mean of bounded noise stays inside the noise band, rounded to 2 places.
    for &value in &reading.values {
        assert!((21.6..=22.4).contains(&value), "value {value} out of band");
        assert_eq!(value, (value * 100.0).round() / 100.0);
    }
}

#[test]
fn channel_axis_order_matches_configured_range() {
    let driver = MockDaq::new().with_pattern(SignalPattern::ChannelIndex);
    let mut session = AnalogInput::voltage(&driver, Address::Slot(1)).unwrap();
    session.start().unwrap();

    let reading = session.read_samples().unwrap();
    for (index, &value) in reading.values.iter().enumerate() {
        // RMS of a constant |c| is c.
        assert_eq!(value, index as f64);
    }
}

#[test]
fn explicit_sample_count_is_honored() {
    let driver = MockDaq::new().with_pattern(SignalPattern::Constant(2.0));
    let mut session = AnalogInput::voltage(&driver, Address::Slot(1)).unwrap();
    session.start().unwrap();

    let reading = session.read_samples_n(50).unwrap();
    assert_eq!(reading.values.len(), 32);
    assert!(reading.values.iter().all(|&v| v == 2.00000));
}

#[test]
fn bounded_timeout_is_passed_to_the_driver() {
    let driver = MockDaq::new();
    let config = SessionConfig::slot_defaults()
        .with_read_timeout(Some(std::time::Duration::from_millis(250)));
    let mut session = AnalogInput::configure(
        &driver,
        Address::Slot(1),
        MeasurementKind::Voltage,
        config,
    )
    .unwrap();
    session.start().unwrap();
    session.read_samples().unwrap();

    assert_eq!(
        driver.state().last_read_timeout,
        Some(ReadTimeout::Bounded(std::time::Duration::from_millis(250)))
    );
}

// ---------------------------------------------------------------------------
// Best-effort fault handling
// ---------------------------------------------------------------------------

#[test]
fn faulted_read_degrades_instead_of_failing() {
    let dir = tempfile::tempdir().unwrap();
    let driver = MockDaq::new()
        .with_pattern(SignalPattern::Constant(3.0))
        .with_fault_plan(FaultPlan::fail_read(1));
    let mut session = AnalogInput::configure_with_fault_log(
        &driver,
        Address::Slot(1),
        MeasurementKind::Voltage,
        SessionConfig::slot_defaults(),
        temp_fault_log(&dir),
    )
    .unwrap();
    session.start().unwrap();

    // First read faults: the call still succeeds, values reduce from the
    // zeroed buffer, and the fault is tagged on the reading.
    let degraded = session.read_samples().unwrap();
    assert!(degraded.is_degraded());
    assert_eq!(degraded.fault.as_ref().unwrap().kind, DriverFaultKind::Read);
    assert_eq!(degraded.values.len(), 32);
    assert!(degraded.values.iter().all(|&v| v == 0.0));

    // The fault was appended to the log, one well-formed line.
    let contents = std::fs::read_to_string(dir.path().join("error_log.txt")).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("- Error occurred: driver read fault: simulated acquisition failure"));

    // The loop keeps going: the next read is healthy.
    let healthy = session.read_samples().unwrap();
    assert!(!healthy.is_degraded());
    assert!(healthy.values.iter().all(|&v| v == 3.00000));
}

#[test]
fn timed_out_read_reports_timeout_fault() {
    let dir = tempfile::tempdir().unwrap();
    let driver = MockDaq::new().with_fault_plan(FaultPlan::timeout_read(1));
    let config = SessionConfig::slot_defaults()
        .with_read_timeout(Some(std::time::Duration::from_millis(100)));
    let mut session = AnalogInput::configure_with_fault_log(
        &driver,
        Address::Slot(1),
        MeasurementKind::Voltage,
        config,
        temp_fault_log(&dir),
    )
    .unwrap();
    session.start().unwrap();

    let reading = session.read_samples().unwrap();
    assert_eq!(
        reading.fault.as_ref().unwrap().kind,
        DriverFaultKind::Timeout
    );
}

#[test]
fn repeated_faults_append_one_line_each() {
    let dir = tempfile::tempdir().unwrap();
    let driver = MockDaq::new().with_fault_plan(FaultPlan {
        fail_every_read: true,
        ..FaultPlan::none()
    });
    let mut session = AnalogInput::configure_with_fault_log(
        &driver,
        Address::Slot(1),
        MeasurementKind::Temperature,
        SessionConfig::slot_defaults(),
        temp_fault_log(&dir),
    )
    .unwrap();
    session.start().unwrap();

    for _ in 0..3 {
        let reading = session.read_samples().unwrap();
        assert!(reading.is_degraded());
        assert_eq!(reading.values.len(), 8);
    }

    let contents = std::fs::read_to_string(dir.path().join("error_log.txt")).unwrap();
    assert_eq!(contents.lines().count(), 3);
}
