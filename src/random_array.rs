//! The fixed-size container whose passing cost is under measurement.

use crate::{Lcg, VALUES_TO_SUM_MAX};

/// Element types the evaluation ranges over: the fixed-width unsigned
/// integers from 8 through 64 bits.
pub trait Elem: Copy + 'static {
    fn from_rand(r: u64) -> Self;
    fn widen(self) -> u64;
}

macro_rules! impl_elem {
    ($($t:ty),*) => {
        $(
            impl Elem for $t {
                #[inline]
                fn from_rand(r: u64) -> Self {
                    r as $t
                }

                #[inline]
                fn widen(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_elem!(u8, u16, u32, u64);

/// Stack-allocated array of `N` pseudo-random elements, immutable after
/// construction. `Copy` so the by-value call target receives a full copy of
/// all `N` elements.
#[derive(Debug, Clone, Copy)]
pub struct RandomArray<T, const N: usize> {
    arr: [T; N],
}

impl<T: Elem, const N: usize> RandomArray<T, N> {
    /// Fills every slot by drawing from the shared generator. Construction
    /// order relative to other generator uses affects the exact values.
    pub fn new(rng: &mut Lcg) -> Self {
        Self {
            arr: std::array::from_fn(|_| T::from_rand(rng.next_u64())),
        }
    }

    /// Sums a few randomly chosen elements, widened to `u64`. The number of
    /// elements touched is capped by [`VALUES_TO_SUM_MAX`] independently of
    /// `N`, so this cost varies with the container length only through copy
    /// and cache effects.
    pub fn compute_value(&self, rng: &mut Lcg) -> u64 {
        let num_values_to_sum = rng.next_u64() % VALUES_TO_SUM_MAX;
        let mut sum = 0u64;
        for _ in 0..num_values_to_sum {
            let slot = (rng.next_u64() as usize) % N;
            sum = sum.wrapping_add(self.arr[slot].widen());
        }
        sum
    }
}
