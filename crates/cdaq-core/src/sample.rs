//! Sample blocks and per-channel reduction.
//!
//! A [`SampleBlock`] is the channels × samples matrix one blocking read
//! drains from the driver buffer. It is zero-initialized before the read so
//! a faulted, partially-filled block still reduces to a well-formed (if
//! degraded) reading. Blocks are ephemeral: produced per read, reduced
//! immediately, not retained.

use crate::measurement::MeasurementKind;

/// Channels × samples matrix of raw readings for one read operation.
///
/// Row-major per channel: channel `c` occupies
/// `data[c * samples_per_channel .. (c + 1) * samples_per_channel]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBlock {
    channels: usize,
    samples_per_channel: usize,
    data: Vec<f64>,
}

impl SampleBlock {
    /// Zero-initialized block for `channels` channels of
    /// `samples_per_channel` samples each.
    pub fn zeroed(channels: usize, samples_per_channel: usize) -> Self {
        Self {
            channels,
            samples_per_channel,
            data: vec![0.0; channels * samples_per_channel],
        }
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn samples_per_channel(&self) -> usize {
        self.samples_per_channel
    }

    /// Samples for channel `index`. Panics if `index >= channels`.
    pub fn channel(&self, index: usize) -> &[f64] {
        let start = index * self.samples_per_channel;
        &self.data[start..start + self.samples_per_channel]
    }

    /// Mutable samples for channel `index`. Panics if `index >= channels`.
    pub fn channel_mut(&mut self, index: usize) -> &mut [f64] {
        let start = index * self.samples_per_channel;
        &mut self.data[start..start + self.samples_per_channel]
    }

    /// The whole matrix as one mutable slice, for drivers that fill it
    /// channel-interleaved-free (channel-major) in a single write.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

/// Collapse a block along the time axis into one scalar per channel.
///
/// Voltage: root-mean-square, rounded to 5 decimals. Temperature: arithmetic
/// mean, rounded to 2 decimals. The temperature path is deliberately a plain
/// mean even though the original hardware client labelled it RMS; callers
/// depend on the mean semantics.
///
/// Output order matches channel index and is stable across reads. Pure
/// function of the block.
pub fn reduce(block: &SampleBlock, kind: MeasurementKind) -> Vec<f64> {
    let decimals = kind.rounding_decimals();
    (0..block.channels())
        .map(|c| {
            let samples = block.channel(c);
            let value = match kind {
                MeasurementKind::Voltage => rms(samples),
                MeasurementKind::Temperature => mean(samples),
            };
            round_to(value, decimals)
        })
        .collect()
}

fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mean_square = samples.iter().map(|x| x * x).sum::<f64>() / samples.len() as f64;
    mean_square.sqrt()
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
