//! Read a thermocouple module and a voltage module through the mock driver.
//!
//! With real hardware, swap `MockDaq` for a vendor `DaqDriver` binding; the
//! session code is identical.

use anyhow::Result;
use cdaq_acquire::{Address, AnalogInput, ThermocoupleType};
use cdaq_driver_mock::{MockDaq, SignalPattern};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    // Thermocouple module in cage position 2.
    let thermo_driver = MockDaq::new().with_pattern(SignalPattern::Noise {
        mean: 21.5,
        amplitude: 0.3,
        seed: 1,
    });
    let mut daq = AnalogInput::thermocouple(&thermo_driver, Address::Slot(2), ThermocoupleType::J)?;
    daq.start()?;

    let data = daq.read_samples()?;
    println!("Received Thermocouple Data:");
    println!("{:?}", data.values);

    daq.stop()?;
    daq.close()?;

    // Voltage module in cage position 4.
    let voltage_driver = MockDaq::new().with_pattern(SignalPattern::Alternating(1.0));
    let mut daq = AnalogInput::voltage(&voltage_driver, Address::Slot(4))?;
    daq.start()?;

    let data = daq.read_samples()?;
    println!("Received Voltage Data:");
    println!("{:?}", data.values);

    daq.stop()?;
    daq.close()?;

    Ok(())
}
