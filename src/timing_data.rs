//! Collection and reporting of trial timings.

use crate::{exp2, log2, median, sample_summary, TimeUnit, TrialTimes};
use std::io::{self, Write};
use std::time::Duration;

/// The two reported calling conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassMode {
    ByRef,
    ByVal,
}

impl PassMode {
    /// Label used in the report's data lines.
    pub fn label(self) -> &'static str {
        match self {
            PassMode::ByRef => "by ref",
            PassMode::ByVal => "by val",
        }
    }
}

/// Samples of one timed-loop variant, indexed by
/// `[elem_size_idx][arr_size_idx][run]` where the first two indices are
/// `log2(sizeof(T))` and `log2(array size)`.
#[derive(Debug, Clone)]
struct SampleGrid(Vec<Vec<Vec<Option<Duration>>>>);

impl SampleGrid {
    fn new(elem_sizes: usize, arr_sizes: usize, runs: usize) -> Self {
        Self(vec![vec![vec![None; runs]; arr_sizes]; elem_sizes])
    }

    fn set(&mut self, elem_idx: usize, arr_idx: usize, run: usize, value: Duration) {
        let cell = &mut self.0[elem_idx][arr_idx][run];
        assert!(
            cell.is_none(),
            "timing cell ({elem_idx}, {arr_idx}, {run}) written twice"
        );
        *cell = Some(value);
    }

    fn cell(&self, elem_idx: usize, arr_idx: usize) -> &[Option<Duration>] {
        &self.0[elem_idx][arr_idx]
    }

    /// All samples of one cell. Panics if any run has not been recorded.
    fn samples(&self, elem_idx: usize, arr_idx: usize) -> Vec<Duration> {
        self.0[elem_idx][arr_idx]
            .iter()
            .map(|c| c.expect("timing cell read before all runs were recorded"))
            .collect()
    }
}

/// The full timing table: baseline, by-ref and by-val sample grids plus the
/// report over them.
#[derive(Debug, Clone)]
pub struct TimingData {
    elem_size_count: usize,
    arr_size_count: usize,
    runs: usize,
    unit: TimeUnit,
    baselines: SampleGrid,
    by_refs: SampleGrid,
    by_vals: SampleGrid,
}

impl TimingData {
    pub fn new(elem_size_count: usize, arr_size_count: usize, runs: usize, unit: TimeUnit) -> Self {
        assert!(runs % 2 == 1, "run count must be odd, got {runs}");
        Self {
            elem_size_count,
            arr_size_count,
            runs,
            unit,
            baselines: SampleGrid::new(elem_size_count, arr_size_count, runs),
            by_refs: SampleGrid::new(elem_size_count, arr_size_count, runs),
            by_vals: SampleGrid::new(elem_size_count, arr_size_count, runs),
        }
    }

    /// Stores the three loop times for one cell. `elem_size` is in bytes;
    /// both it and `arr_size` must be powers of two within the table bounds,
    /// `run` must be below the run count, and the cell must not have been
    /// written before.
    pub fn record_times(&mut self, elem_size: usize, arr_size: usize, run: usize, times: TrialTimes) {
        let elem_idx = log2(elem_size) as usize;
        let arr_idx = log2(arr_size) as usize;
        assert!(
            elem_idx < self.elem_size_count,
            "element size {elem_size} out of table bounds"
        );
        assert!(
            arr_idx < self.arr_size_count,
            "array size {arr_size} out of table bounds"
        );
        assert!(run < self.runs, "run index {run} out of bounds");
        self.baselines.set(elem_idx, arr_idx, run, times.baseline);
        self.by_refs.set(elem_idx, arr_idx, run, times.by_ref);
        self.by_vals.set(elem_idx, arr_idx, run, times.by_val);
    }

    /// Recorded baseline samples at a coordinate; `None` entries are runs not
    /// yet recorded.
    pub fn baseline_samples(&self, elem_size: usize, arr_size: usize) -> &[Option<Duration>] {
        self.baselines
            .cell(log2(elem_size) as usize, log2(arr_size) as usize)
    }

    /// Recorded by-ref or by-val samples at a coordinate.
    pub fn pass_samples(
        &self,
        mode: PassMode,
        elem_size: usize,
        arr_size: usize,
    ) -> &[Option<Duration>] {
        self.grid(mode)
            .cell(log2(elem_size) as usize, log2(arr_size) as usize)
    }

    /// Writes the header and every data line: all "by ref" rows, then all
    /// "by val" rows, each in ascending element-size order and, within an
    /// element size, ascending array-size order.
    pub fn write_report(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Param Pass Type, Array Size, sizeof(T), Time")?;
        self.write_mode(out, PassMode::ByRef)?;
        self.write_mode(out, PassMode::ByVal)?;
        Ok(())
    }

    fn grid(&self, mode: PassMode) -> &SampleGrid {
        match mode {
            PassMode::ByRef => &self.by_refs,
            PassMode::ByVal => &self.by_vals,
        }
    }

    fn write_mode(&self, out: &mut impl Write, mode: PassMode) -> io::Result<()> {
        for elem_idx in 0..self.elem_size_count {
            let elem_size = exp2(elem_idx as u32);
            for arr_idx in 0..self.arr_size_count {
                let arr_size = exp2(arr_idx as u32);
                let mut baseline = self.baselines.samples(elem_idx, arr_idx);
                let mut timed = self.grid(mode).samples(elem_idx, arr_idx);
                log::debug!(
                    "{} arr_size={arr_size} elem_size={elem_size}: {:?}",
                    mode.label(),
                    sample_summary(&timed)
                );
                let baseline_median = median(&mut baseline);
                let timed_median = median(&mut timed);
                // System noise can push a timed median below baseline; clamp
                // instead of wrapping.
                let adjusted = timed_median.saturating_sub(baseline_median);
                writeln!(
                    out,
                    "{}, {}, {}, {}",
                    mode.label(),
                    arr_size,
                    elem_size,
                    self.unit.count(adjusted)
                )?;
            }
        }
        Ok(())
    }
}
