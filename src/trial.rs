//! Timed trial loops and the non-inlined call targets under measurement.

use crate::{random_work, Elem, Lcg, RandomArray, WorkBuffer};
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Elapsed times of the three loops for one (element type, array size, run)
/// combination.
#[derive(Debug, Clone, Copy)]
pub struct TrialTimes {
    pub baseline: Duration,
    pub by_ref: Duration,
    pub by_val: Duration,
}

// The two call targets below are the load-bearing part of the experiment:
// `#[inline(never)]` keeps the call boundary, and routing the parameter
// through `black_box` keeps the copy (by-val) and the indirection (by-ref)
// from being proven equivalent and merged. The surrounding loops stay fully
// optimized.

#[inline(never)]
fn by_val<T: Elem, const N: usize>(
    arr: RandomArray<T, N>,
    rng: &mut Lcg,
    work: &mut WorkBuffer,
) -> u64 {
    // arr arrives by value; all N elements were copied into the call
    let arr = black_box(arr);
    random_work(rng, work);
    arr.compute_value(rng)
}

#[inline(never)]
fn by_ref<T: Elem, const N: usize>(
    arr: &RandomArray<T, N>,
    rng: &mut Lcg,
    work: &mut WorkBuffer,
) -> u64 {
    // arr arrives by reference; dereferenced, never copied
    let arr = black_box(arr);
    random_work(rng, work);
    arr.compute_value(rng)
}

/// Times `passes` iterations of the loop body done inline, with no call
/// boundary and no copy. This measures everything except the
/// parameter-passing mechanism, so subtracting it from the by-ref and by-val
/// times isolates the cost of the call itself.
pub fn time_baseline<T: Elem, const N: usize>(
    arr: &RandomArray<T, N>,
    rng: &mut Lcg,
    work: &mut WorkBuffer,
    passes: usize,
) -> Duration {
    let mut sum = 0u64;
    let start = Instant::now();
    for _ in 0..passes {
        random_work(rng, work);
        sum = sum.wrapping_add(arr.compute_value(rng));
    }
    let elapsed = start.elapsed();
    black_box(sum);
    elapsed
}

/// Times `passes` calls through the by-reference target. Returns the elapsed
/// time and the accumulated sum; the caller must keep the sum observable.
pub fn time_by_ref<T: Elem, const N: usize>(
    arr: &RandomArray<T, N>,
    rng: &mut Lcg,
    work: &mut WorkBuffer,
    passes: usize,
) -> (Duration, u64) {
    let mut sum = 0u64;
    let start = Instant::now();
    for _ in 0..passes {
        sum = sum.wrapping_add(by_ref(arr, rng, work));
    }
    (start.elapsed(), sum)
}

/// Times `passes` calls through the by-value target; the container is copied
/// on every call. Returns the elapsed time and the accumulated sum; the
/// caller must keep the sum observable.
pub fn time_by_val<T: Elem, const N: usize>(
    arr: &RandomArray<T, N>,
    rng: &mut Lcg,
    work: &mut WorkBuffer,
    passes: usize,
) -> (Duration, u64) {
    let mut sum = 0u64;
    let start = Instant::now();
    for _ in 0..passes {
        sum = sum.wrapping_add(by_val(*arr, rng, work));
    }
    (start.elapsed(), sum)
}
