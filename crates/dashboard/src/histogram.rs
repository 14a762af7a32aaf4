//! Equal-width price histogram.

use alloc::vec::Vec;
use staystat_core::{Error, Result};

/// One histogram bin covering `[lower, upper)`; the last bin also holds `upper`.
#[derive(Clone, Debug, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Counts of values per equal-width bin between the smallest and largest value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bins `values` into `bin_count` equal-width bins.
    ///
    /// No values give no bins. When every value is equal the histogram has
    /// a single bin. NaN values are skipped.
    pub fn compute<I>(values: I, bin_count: usize) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        if bin_count == 0 {
            return Err(Error::invalid_argument("histogram needs at least one bin"));
        }
        let values: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
        let (min, max) = match values.iter().copied().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((libm::fmin(lo, v), libm::fmax(hi, v))),
        }) {
            Some(range) => range,
            None => return Ok(Self::default()),
        };

        if min == max {
            return Ok(Self {
                bins: alloc::vec![HistogramBin {
                    lower: min,
                    upper: max,
                    count: values.len(),
                }],
            });
        }

        let width = (max - min) / bin_count as f64;
        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                lower: min + width * i as f64,
                upper: if i + 1 == bin_count {
                    max
                } else {
                    min + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for v in values {
            let idx = libm::floor((v - min) / width) as usize;
            bins[idx.min(bin_count - 1)].count += 1;
        }
        Ok(Self { bins })
    }

    /// Total number of binned values.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}
