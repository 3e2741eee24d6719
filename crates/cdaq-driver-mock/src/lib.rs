//! `cdaq-driver-mock`
//!
//! In-process implementation of the [`cdaq_core::DaqDriver`] boundary for
//! tests and demos. No hardware: reads are filled from a configurable
//! [`SignalPattern`], faults are injected from a [`FaultPlan`], and every
//! driver call is recorded in a shared [`MockState`] that tests can inspect.
//!
//! # Example
//!
//! ```rust,ignore
//! let driver = MockDaq::new()
//!     .with_pattern(SignalPattern::Constant(3.0))
//!     .with_fault_plan(FaultPlan::fail_read(1));
//!
//! let session = AnalogInput::voltage(&driver, Address::Slot(2))?;
//! // ... exercise the session, then assert on driver.state()
//! assert_eq!(driver.state().reads, 1);
//! ```

mod faults;
mod pattern;

pub use faults::FaultPlan;
pub use pattern::SignalPattern;

use cdaq_core::{
    AcquisitionMode, ChannelGroup, DaqDriver, DaqTask, DriverFault, ReadTimeout, SampleBlock,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Everything the mock has been asked to do, for test assertions.
///
/// Shared between the driver and the tasks it creates; when several tasks
/// share one driver the snapshot reflects the most recent calls.
#[derive(Debug, Clone, Default)]
pub struct MockState {
    /// Channel group from the last bind call.
    pub bound_group: Option<ChannelGroup>,
    /// (rate_hz, mode, samples_per_channel) from the last timing call.
    pub timing: Option<(f64, AcquisitionMode, usize)>,
    /// Capacity from the last input-buffer call.
    pub input_buffer_size: Option<usize>,
    /// Timeout passed to the most recent read.
    pub last_read_timeout: Option<ReadTimeout>,
    /// Total `read_many` calls, including faulted ones.
    pub reads: u32,
    pub starts: u32,
    pub stops: u32,
    pub closes: u32,
}

/// Mock driver binding. Cheap to construct per test.
#[derive(Default)]
pub struct MockDaq {
    pattern: SignalPattern,
    plan: FaultPlan,
    state: Arc<Mutex<MockState>>,
}

impl MockDaq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waveform successful reads produce.
    pub fn with_pattern(mut self, pattern: SignalPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Faults to inject.
    pub fn with_fault_plan(mut self, plan: FaultPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Snapshot of everything recorded so far.
    pub fn state(&self) -> MockState {
        self.state.lock().clone()
    }
}

impl DaqDriver for MockDaq {
    fn create_task(&self) -> Result<Box<dyn DaqTask>, DriverFault> {
        Ok(Box::new(MockTask {
            pattern: self.pattern.clone(),
            plan: self.plan.clone(),
            state: Arc::clone(&self.state),
        }))
    }
}

struct MockTask {
    pattern: SignalPattern,
    plan: FaultPlan,
    state: Arc<Mutex<MockState>>,
}

impl DaqTask for MockTask {
    fn bind_channels(&mut self, group: &ChannelGroup) -> Result<(), DriverFault> {
        self.plan.check_bind()?;
        self.state.lock().bound_group = Some(group.clone());
        Ok(())
    }

    fn configure_timing(
        &mut self,
        rate_hz: f64,
        mode: AcquisitionMode,
        samples_per_channel: usize,
    ) -> Result<(), DriverFault> {
        self.state.lock().timing = Some((rate_hz, mode, samples_per_channel));
        Ok(())
    }

    fn set_input_buffer_size(&mut self, samples_per_channel: usize) -> Result<(), DriverFault> {
        self.state.lock().input_buffer_size = Some(samples_per_channel);
        Ok(())
    }

    fn start(&mut self) -> Result<(), DriverFault> {
        self.plan.check_start()?;
        self.state.lock().starts += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DriverFault> {
        self.state.lock().stops += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), DriverFault> {
        self.state.lock().closes += 1;
        Ok(())
    }

    fn read_many(
        &mut self,
        block: &mut SampleBlock,
        timeout: ReadTimeout,
    ) -> Result<(), DriverFault> {
        let read_number = {
            let mut state = self.state.lock();
            state.reads += 1;
            state.last_read_timeout = Some(timeout);
            state.reads
        };

        // Faulted reads leave the caller's zero-initialized block untouched.
        self.plan.check_read(read_number)?;

        tracing::debug!(
            read_number,
            channels = block.channels(),
            samples = block.samples_per_channel(),
            "mock read"
        );
        self.pattern.fill(block);
        Ok(())
    }
}
