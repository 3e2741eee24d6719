//! Fault injection for resilience tests.

use cdaq_core::{DriverFault, DriverFaultKind};

/// Which mock operations fail, and how.
///
/// Read indices are 1-based counts of `read_many` calls on the task, so
/// `fail_reads: vec![1]` faults the first read and lets later ones succeed.
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    /// Reject the channel bind call.
    pub fail_bind: bool,
    /// Reject the start call.
    pub fail_start: bool,
    /// Read numbers that fail with a read fault.
    pub fail_reads: Vec<u32>,
    /// Read numbers that fail with a timeout fault.
    pub timeout_reads: Vec<u32>,
    /// Every read fails with a read fault.
    pub fail_every_read: bool,
}

impl FaultPlan {
    /// Plan with no injected faults.
    pub fn none() -> Self {
        Self::default()
    }

    /// Fail only read number `n` (1-based).
    pub fn fail_read(n: u32) -> Self {
        Self {
            fail_reads: vec![n],
            ..Self::default()
        }
    }

    /// Time out only read number `n` (1-based).
    pub fn timeout_read(n: u32) -> Self {
        Self {
            timeout_reads: vec![n],
            ..Self::default()
        }
    }

    pub(crate) fn check_bind(&self) -> Result<(), DriverFault> {
        if self.fail_bind {
            return Err(DriverFault::new(
                DriverFaultKind::Configuration,
                "simulated channel bind rejection",
            ));
        }
        Ok(())
    }

    pub(crate) fn check_start(&self) -> Result<(), DriverFault> {
        if self.fail_start {
            return Err(DriverFault::new(
                DriverFaultKind::Lifecycle,
                "simulated start failure",
            ));
        }
        Ok(())
    }

    pub(crate) fn check_read(&self, read_number: u32) -> Result<(), DriverFault> {
        if self.timeout_reads.contains(&read_number) {
            return Err(DriverFault::new(
                DriverFaultKind::Timeout,
                "simulated read timeout",
            ));
        }
        if self.fail_every_read || self.fail_reads.contains(&read_number) {
            return Err(DriverFault::new(
                DriverFaultKind::Read,
                "simulated acquisition failure",
            ));
        }
        Ok(())
    }
}
