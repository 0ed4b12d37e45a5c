//! Band energy reduction over a magnitude snapshot.

use std::ops::Range;

/// Fraction of bins below which a bin counts as bass
const LOW_FRACTION: f64 = 0.10;

/// Fraction of bins below which a bin counts as mid
const MID_FRACTION: f64 = 0.50;

/// Averaged byte magnitudes per frequency band, each in [0, 255]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandEnergies {
    pub average: f32,
    pub low: f32,  // Bass (bottom 10% of bins)
    pub mid: f32,  // Mids (next 40%)
    pub high: f32, // Treble (top 50%)
}

impl BandEnergies {
    /// All-zero energies (silence, or no signal)
    pub const ZERO: Self = Self {
        average: 0.0,
        low: 0.0,
        mid: 0.0,
        high: 0.0,
    };

    /// Bass energy normalized to [0, 1]
    pub fn bass_intensity(&self) -> f32 {
        self.low / 255.0
    }
}

/// Bin ranges of the three bands for a snapshot of `len` bins
///
/// Ranges are disjoint and together cover `0..len`.
pub fn band_ranges(len: usize) -> [Range<usize>; 3] {
    let low_bound = (len as f64 * LOW_FRACTION).floor() as usize;
    let mid_bound = (len as f64 * MID_FRACTION).floor() as usize;
    [0..low_bound, low_bound..mid_bound, mid_bound..len]
}

/// Reduce a magnitude snapshot to band energies
///
/// An empty snapshot yields all zeros; so does any band with no bins.
pub fn reduce(snapshot: &[u8]) -> BandEnergies {
    let len = snapshot.len();
    if len == 0 {
        return BandEnergies::ZERO;
    }

    let [low, mid, _] = band_ranges(len);

    let mut sum = 0u32;
    let mut low_sum = 0u32;
    let mut mid_sum = 0u32;
    let mut high_sum = 0u32;

    for (i, &value) in snapshot.iter().enumerate() {
        let value = value as u32;
        sum += value;
        if i < low.end {
            low_sum += value;
        } else if i < mid.end {
            mid_sum += value;
        } else {
            high_sum += value;
        }
    }

    let low_count = low.len();
    let mid_count = mid.len();
    let high_count = len - mid.end;

    BandEnergies {
        average: sum as f32 / len as f32,
        low: band_mean(low_sum, low_count),
        mid: band_mean(mid_sum, mid_count),
        high: band_mean(high_sum, high_count),
    }
}

fn band_mean(sum: u32, count: usize) -> f32 {
    if count == 0 {
        0.0
    } else {
        sum as f32 / count as f32
    }
}
