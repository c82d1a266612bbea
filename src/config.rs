//! Compile-time tunables. Tailor per platform and compiler; the rule of thumb
//! for the production configuration is a total runtime of minutes to hours.

use std::mem::size_of;
use std::time::Duration;

/// Number of independent runs. Must be odd so the median is the middle sample.
/// More runs reduce the variance of the reported medians.
pub const TOTAL_RUNS: usize = if cfg!(debug_assertions) { 3 } else { 31 };

/// Iterations of each timed loop. Large enough to average out clock granularity.
pub const TOTAL_PASSES: usize = if cfg!(debug_assertions) {
    100_000
} else {
    100_000_000
};

/// Must be a power of two; array lengths are evaluated up through
/// `MAX_ARRAY_SIZE_X2 / 2`. On modern processors the by-value cost typically
/// kicks in around array size 256.
pub const MAX_ARRAY_SIZE_X2: usize = 4096;

/// Element widths evaluated, starting at 1 byte and doubling through `u64`.
pub const ELEM_SIZES_TO_EVAL: usize = log2_usize(size_of::<u64>()) + 1;

/// Cap on the number of elements summed by a single `compute_value` call.
/// Keep small: the extra work exists to defeat dead-code elimination, and its
/// cost must not scale with the container length.
pub const VALUES_TO_SUM_MAX: u64 = 4;

/// Slot count of the scratch buffer written by `random_work`.
pub const WORK_SLOTS: usize = 16;

/// Seed of the shared generator.
pub const RAND_SEED: u64 = 42;

/// Unit used for the durations in the report.
pub const REPORT_UNIT: TimeUnit = TimeUnit::Millis;

const fn log2_usize(power_of_two: usize) -> usize {
    crate::pow2::log2(power_of_two) as usize
}

/// Report durations are printed as integer counts of this unit, with no
/// suffix. The unit is documented, not embedded per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Millis,
    Micros,
}

impl TimeUnit {
    pub fn count(self, d: Duration) -> u128 {
        match self {
            TimeUnit::Millis => d.as_millis(),
            TimeUnit::Micros => d.as_micros(),
        }
    }
}
