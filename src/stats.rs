//! Distribution statistics over terminal values.
//!
//! Quantiles use linear interpolation between closest ranks: for a sorted
//! set of `n` values the `p` quantile sits at rank `h = p * (n - 1)` and is
//! interpolated between `floor(h)` and `ceil(h)`.

use serde::{Deserialize, Serialize};

/// Quantile of an already sorted, non-empty slice. `p` is clamped to [0, 1].
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }
    let p = p.clamp(0.0, 1.0);
    let idx = p * (n - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi || hi >= n {
        return Some(sorted[lo.min(n - 1)]);
    }
    let w = idx - lo as f64;
    Some(sorted[lo] * (1.0 - w) + sorted[hi] * w)
}

/// Quantile of an unsorted set; non-finite values are ignored.
pub fn quantile(values: &[f64], p: f64) -> Option<f64> {
    quantile_sorted(&sorted_finite(values), p)
}

fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// 25th / 50th / 75th percentiles of a set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
}

impl Quartiles {
    /// `None` when there is no finite value to rank
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted_finite(values);
        Some(Self {
            q25: quantile_sorted(&sorted, 0.25)?,
            q50: quantile_sorted(&sorted, 0.50)?,
            q75: quantile_sorted(&sorted, 0.75)?,
        })
    }

    pub fn interquartile_range(&self) -> f64 {
        self.q75 - self.q25
    }
}

/// One equal-width bucket of the end value distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Count values into `bins` equal-width buckets spanning [min, max].
///
/// Buckets are half-open except the last, which also holds `max`. A set with
/// a single distinct value gets one bucket. Non-finite values are dropped.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
    let (Some(min), Some(max)) = (
        finite.iter().copied().reduce(f64::min),
        finite.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };

    if max == min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: finite.len(),
        }];
    }

    let bins = bins.max(1);
    // Halved span stays finite even when max - min overflows
    let half_width = (max / 2.0 - min / 2.0) / bins as f64;
    let edge = |i: usize| min + half_width * i as f64 + half_width * i as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: edge(i),
            upper: if i + 1 == bins { max } else { edge(i + 1) },
            count: 0,
        })
        .collect();

    for v in finite {
        let idx = (((v / 2.0 - min / 2.0) / half_width) as usize).min(bins - 1);
        out[idx].count += 1;
    }

    out
}
