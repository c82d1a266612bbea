use param_pass_timing::{PassMode, TimeUnit, TimingData, TrialTimes};
use std::time::Duration;

const ELEM_SIZES: [usize; 4] = [1, 2, 4, 8];
const ARR_SIZES: [usize; 3] = [1, 2, 4];

fn times(baseline: u64, by_ref: u64, by_val: u64) -> TrialTimes {
    TrialTimes {
        baseline: Duration::from_micros(baseline),
        by_ref: Duration::from_micros(by_ref),
        by_val: Duration::from_micros(by_val),
    }
}

fn fill(data: &mut TimingData, runs: usize) {
    for run in 0..runs {
        for (elem_idx, &elem) in ELEM_SIZES.iter().enumerate() {
            for (arr_idx, &arr) in ARR_SIZES.iter().enumerate() {
                let offset = (7 * elem_idx + arr_idx) as u64;
                data.record_times(elem, arr, run, times(10, 10 + offset, 10 + 2 * offset));
            }
        }
    }
}

#[test]
fn every_cell_holds_exactly_run_count_samples() {
    let runs = 5;
    let mut data = TimingData::new(4, 3, runs, TimeUnit::Micros);
    fill(&mut data, runs);

    for &elem in &ELEM_SIZES {
        for &arr in &ARR_SIZES {
            let baseline = data.baseline_samples(elem, arr);
            assert_eq!(baseline.len(), runs);
            assert!(baseline.iter().all(|s| s.is_some()));
            for mode in [PassMode::ByRef, PassMode::ByVal] {
                let samples = data.pass_samples(mode, elem, arr);
                assert_eq!(samples.len(), runs);
                assert!(samples.iter().all(|s| s.is_some()));
            }
        }
    }
}

#[test]
#[should_panic(expected = "written twice")]
fn recording_a_cell_twice_is_rejected() {
    let mut data = TimingData::new(4, 3, 3, TimeUnit::Micros);
    data.record_times(1, 1, 0, times(1, 2, 3));
    data.record_times(1, 1, 0, times(1, 2, 3));
}

#[test]
#[should_panic]
fn non_power_of_two_array_sizes_are_rejected() {
    let mut data = TimingData::new(4, 3, 3, TimeUnit::Micros);
    data.record_times(1, 3, 0, times(1, 2, 3));
}

#[test]
#[should_panic(expected = "out of bounds")]
fn run_index_beyond_the_run_count_is_rejected() {
    let mut data = TimingData::new(4, 3, 3, TimeUnit::Micros);
    data.record_times(1, 1, 3, times(1, 2, 3));
}

#[test]
#[should_panic(expected = "must be odd")]
fn even_run_counts_are_rejected() {
    TimingData::new(4, 3, 4, TimeUnit::Micros);
}

#[test]
fn report_covers_every_coordinate_in_order_with_adjusted_values() {
    let runs = 3;
    let mut data = TimingData::new(4, 3, runs, TimeUnit::Micros);
    fill(&mut data, runs);

    let mut out = Vec::new();
    data.write_report(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.next(), Some("Param Pass Type, Array Size, sizeof(T), Time"));

    let data_lines: Vec<&str> = lines.collect();
    assert_eq!(data_lines.len(), 2 * ELEM_SIZES.len() * ARR_SIZES.len());

    let mut expected = Vec::new();
    for mode in ["by ref", "by val"] {
        for (elem_idx, &elem) in ELEM_SIZES.iter().enumerate() {
            for (arr_idx, &arr) in ARR_SIZES.iter().enumerate() {
                let offset = (7 * elem_idx + arr_idx) as u64;
                let adjusted = if mode == "by ref" { offset } else { 2 * offset };
                expected.push(format!("{mode}, {arr}, {elem}, {adjusted}"));
            }
        }
    }
    assert_eq!(data_lines, expected);
}

#[test]
fn report_uses_the_median_sample_of_each_cell() {
    // One outlier run per cell must not shift the reported value.
    let mut data = TimingData::new(1, 1, 3, TimeUnit::Micros);
    data.record_times(1, 1, 0, times(5, 900, 905));
    data.record_times(1, 1, 1, times(5, 14, 16));
    data.record_times(1, 1, 2, times(5, 13, 17));

    let mut out = Vec::new();
    data.write_report(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("by ref, 1, 1, 9"), "report was: {text}");
    assert!(text.contains("by val, 1, 1, 12"), "report was: {text}");
}

#[test]
fn adjusted_durations_clamp_to_zero_when_timed_below_baseline() {
    let mut data = TimingData::new(1, 1, 1, TimeUnit::Micros);
    data.record_times(1, 1, 0, times(100, 40, 100));

    let mut out = Vec::new();
    data.write_report(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("by ref, 1, 1, 0"), "report was: {text}");
}

#[test]
#[should_panic(expected = "before all runs")]
fn reporting_with_unpopulated_cells_is_rejected() {
    let mut data = TimingData::new(1, 1, 3, TimeUnit::Micros);
    data.record_times(1, 1, 0, times(1, 2, 3));
    let mut out = Vec::new();
    let _ = data.write_report(&mut out);
}
