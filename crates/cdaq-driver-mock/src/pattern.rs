//! Deterministic signal patterns for simulated reads.

use cdaq_core::SampleBlock;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Waveform a successful mock read writes into the sample block.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalPattern {
    /// Every sample on every channel is `value`.
    Constant(f64),
    /// Samples alternate `+amplitude`, `-amplitude` along the time axis.
    Alternating(f64),
    /// Every sample on channel `c` is `c as f64`. Useful for asserting
    /// channel-axis ordering.
    ChannelIndex,
    /// Uniform noise in `[mean - amplitude, mean + amplitude]`, seeded so
    /// repeated test runs see identical data.
    Noise { mean: f64, amplitude: f64, seed: u64 },
}

impl Default for SignalPattern {
    fn default() -> Self {
        SignalPattern::Constant(0.0)
    }
}

impl SignalPattern {
    pub fn fill(&self, block: &mut SampleBlock) {
        match self {
            SignalPattern::Constant(value) => {
                block.as_mut_slice().fill(*value);
            }
            SignalPattern::Alternating(amplitude) => {
                for c in 0..block.channels() {
                    for (i, sample) in block.channel_mut(c).iter_mut().enumerate() {
                        *sample = if i % 2 == 0 { *amplitude } else { -amplitude };
                    }
                }
            }
            SignalPattern::ChannelIndex => {
                for c in 0..block.channels() {
                    block.channel_mut(c).fill(c as f64);
                }
            }
            SignalPattern::Noise {
                mean,
                amplitude,
                seed,
            } => {
                let mut rng = ChaCha8Rng::seed_from_u64(*seed);
                for sample in block.as_mut_slice() {
                    *sample = rng.gen_range(mean - amplitude..=mean + amplitude);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_fills_every_sample() {
        let mut block = SampleBlock::zeroed(4, 16);
        SignalPattern::Constant(3.0).fill(&mut block);
        assert!(block.channel(3).iter().all(|&x| x == 3.0));
    }

    #[test]
    fn alternating_flips_sign_per_sample() {
        let mut block = SampleBlock::zeroed(1, 4);
        SignalPattern::Alternating(1.0).fill(&mut block);
        assert_eq!(block.channel(0), &[1.0, -1.0, 1.0, -1.0]);
    }

    #[test]
    fn channel_index_encodes_ordering() {
        let mut block = SampleBlock::zeroed(3, 2);
        SignalPattern::ChannelIndex.fill(&mut block);
        assert_eq!(block.channel(0), &[0.0, 0.0]);
        assert_eq!(block.channel(2), &[2.0, 2.0]);
    }

    #[test]
    fn noise_is_bounded_and_reproducible() {
        let pattern = SignalPattern::Noise {
            mean: 20.0,
            amplitude: 0.5,
            seed: 7,
        };
        let mut first = SampleBlock::zeroed(2, 64);
        let mut second = SampleBlock::zeroed(2, 64);
        pattern.fill(&mut first);
        pattern.fill(&mut second);
        assert_eq!(first, second);
        assert!(first
            .channel(0)
            .iter()
            .all(|&x| (19.5..=20.5).contains(&x)));
    }
}
