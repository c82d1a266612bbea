//! Side work performed inside every timed loop body.

use crate::{Lcg, WORK_SLOTS};

/// Scratch accumulators written by [`random_work`]. The buffer exists only so
/// the random-work step has an observable effect the optimizer must preserve.
#[derive(Debug, Clone)]
pub struct WorkBuffer {
    slots: [u64; WORK_SLOTS],
}

impl WorkBuffer {
    pub fn new() -> Self {
        Self {
            slots: [0; WORK_SLOTS],
        }
    }

    pub fn slots(&self) -> &[u64; WORK_SLOTS] {
        &self.slots
    }
}

impl Default for WorkBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws a slot and a value, then folds a derived value into the buffer.
///
/// Invoked in every timed inner-loop body (baseline, by-ref and by-val) so
/// all three code paths carry an equivalent, non-elidable side effect. Without
/// this, the optimizer could prove one path's body redundant and skip it,
/// corrupting the comparison.
#[inline]
pub fn random_work(rng: &mut Lcg, work: &mut WorkBuffer) {
    let slot = (rng.next_u64() as usize) % WORK_SLOTS;
    let random = rng.next_u64();
    work.slots[slot] = work.slots[slot].wrapping_add(random ^ (random << 1));
}
