//! Sample reductions: the median used by the report and the distribution
//! summary logged for jitter investigation.

use hdrhistogram::Histogram;
use std::time::Duration;

/// Returns the middle element of an odd-length collection. The slice is
/// partially reordered just enough to put the middle element in its sorted
/// position; no full sort is performed.
pub fn median<T: Ord + Copy>(samples: &mut [T]) -> T {
    assert!(
        samples.len() % 2 == 1,
        "median requires an odd sample count, got {}",
        samples.len()
    );
    let half = samples.len() / 2;
    let (_, mid, _) = samples.select_nth_unstable(half);
    *mid
}

/// Summary statistics of one cell's run-to-run sample distribution, in
/// microseconds.
#[derive(Debug, Clone)]
pub struct SummaryStats {
    pub count: u64,
    pub mean: f64,
    pub stdev: f64,
    pub min: u64,
    pub median: u64,
    pub max: u64,
}

impl SummaryStats {
    pub fn new(hist: &Histogram<u64>) -> Self {
        Self {
            count: hist.len(),
            mean: hist.mean(),
            stdev: hist.stdev(),
            min: hist.min(),
            median: hist.value_at_quantile(0.50),
            max: hist.max(),
        }
    }
}

/// Collects duration samples into a histogram, as microseconds, and reduces
/// them to a [`SummaryStats`].
pub fn sample_summary(samples: &[Duration]) -> SummaryStats {
    let mut hist = Histogram::<u64>::new(3).expect("histogram construction cannot fail");
    for s in samples {
        hist.saturating_record(s.as_micros().min(u64::MAX as u128) as u64);
    }
    SummaryStats::new(&hist)
}
