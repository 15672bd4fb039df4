//! The iteration engine: a shared traversal cursor over the counts array plus pluggable
//! policies that decide where the traversal pauses to emit a step.

use crate::core::counter::Counter;
use crate::Histogram;

/// An iterator that yields at percentile levels tightening toward 100%.
pub mod percentile;

/// An iterator that yields at fixed-size value steps.
pub mod linear;

/// An iterator that yields at exponentially growing value steps.
pub mod log;

/// An iterator that yields every value with a recorded count.
pub mod recorded;

/// An iterator that yields every value slot.
pub mod all;

/// One emitted step of a histogram traversal, carrying the step's value, counts and running
/// aggregates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationValue<T: Counter> {
    value_iterated_to: u64,
    value_iterated_from: u64,
    count_at_value: T,
    count_since_last_iteration: u64,
    total_count_to_this_value: u64,
    total_value_to_this_value: u64,
    percentile: f64,
    percentile_level_iterated_to: f64,
}

impl<T: Counter> IterationValue<T> {
    /// The value this step reports. By default the highest value equivalent to the slot the
    /// cursor stopped at; linear and logarithmic iteration report their step level instead.
    pub fn value_iterated_to(&self) -> u64 {
        self.value_iterated_to
    }

    /// The value reported by the previous step, or 0 for the first step.
    pub fn value_iterated_from(&self) -> u64 {
        self.value_iterated_from
    }

    /// The count at the slot the cursor stopped at.
    pub fn count_at_value(&self) -> T {
        self.count_at_value
    }

    /// The count accumulated since the previous emitted step. Saturates at `u64::max_value()`.
    pub fn count_since_last_iteration(&self) -> u64 {
        self.count_since_last_iteration
    }

    /// The total count of recorded values at or below this step's value.
    pub fn total_count_to_this_value(&self) -> u64 {
        self.total_count_to_this_value
    }

    /// The sum of `count * highest equivalent value` over every slot up to and including this
    /// step's. Saturates at `u64::max_value()`.
    pub fn total_value_to_this_value(&self) -> u64 {
        self.total_value_to_this_value
    }

    /// The percentage of recorded values at or below this step's value.
    pub fn percentile(&self) -> f64 {
        self.percentile
    }

    /// The percentile level the traversal was aiming for when it emitted this step. Only the
    /// percentile iteration distinguishes this from `percentile()`.
    pub fn percentile_level_iterated_to(&self) -> f64 {
        self.percentile_level_iterated_to
    }
}

/// The traversal state shared by every iteration flavor: a position in the counts array and the
/// running aggregates emitted steps are built from.
pub struct Cursor<T: Counter> {
    pub(crate) array_total_count: u64,
    pub(crate) current_index: usize,
    pub(crate) current_value_at_index: u64,
    pub(crate) next_value_at_index: u64,
    pub(crate) prev_value_iterated_to: u64,
    pub(crate) total_count_to_current_index: u64,
    pub(crate) total_value_to_current_index: u64,
    pub(crate) count_at_this_value: T,
    pub(crate) count_since_last_iteration: u64,
    pub(crate) fresh_sub_bucket: bool,
}

/// Decides where a traversal pauses to emit a step. Each iteration flavor supplies its own
/// target predicate and target advancement, and may override how long iteration continues and
/// which value and percentile level an emitted step reports.
pub trait IterationPolicy<T: Counter> {
    /// Has the cursor reached the next point this flavor wants to report?
    fn reached_target(&mut self, cursor: &Cursor<T>, hist: &Histogram<T>) -> bool;

    /// Move the reporting target past the step that was just emitted.
    fn advance(&mut self, cursor: &Cursor<T>, hist: &Histogram<T>);

    /// Is there anything left to emit? By default, iteration continues while recorded counts
    /// remain ahead of the cursor.
    fn has_next(&mut self, cursor: &Cursor<T>, _hist: &Histogram<T>) -> bool {
        cursor.total_count_to_current_index < cursor.array_total_count
    }

    /// The value reported for the current step.
    fn value_iterated_to(&self, cursor: &Cursor<T>, hist: &Histogram<T>) -> u64 {
        hist.highest_equivalent(cursor.current_value_at_index)
    }

    /// The percentile level reported for the current step.
    fn percentile_iterated_to(&self, cursor: &Cursor<T>) -> f64 {
        100.0 * cursor.total_count_to_current_index as f64 / cursor.array_total_count as f64
    }
}

/// The base iterator for a `Histogram`, parameterized by the policy that picks the steps.
///
/// One peculiarity inherited from the original HdrHistogram design: a slot that was just
/// reported is revisited before the cursor moves on, so a policy whose target does not move past
/// the slot (recorded values, all values) must track which index it last reported.
pub struct HistogramIterator<'a, T: 'a + Counter, P: IterationPolicy<T>> {
    hist: &'a Histogram<T>,
    cursor: Cursor<T>,
    policy: P,
}

impl<'a, T: 'a + Counter, P: IterationPolicy<T>> HistogramIterator<'a, T, P> {
    fn new(hist: &'a Histogram<T>, policy: P) -> HistogramIterator<'a, T, P> {
        HistogramIterator {
            hist,
            cursor: Cursor {
                // the total is snapshotted here; mutating the histogram mid-iteration is not
                // supported
                array_total_count: hist.count(),
                current_index: 0,
                current_value_at_index: 0,
                next_value_at_index: 1_u64 << hist.unit_magnitude,
                prev_value_iterated_to: 0,
                total_count_to_current_index: 0,
                total_value_to_current_index: 0,
                count_at_this_value: T::zero(),
                count_since_last_iteration: 0,
                fresh_sub_bucket: true,
            },
            policy,
        }
    }
}

impl<'a, T: 'a + Counter, P: IterationPolicy<T>> Iterator for HistogramIterator<'a, T, P> {
    type Item = IterationValue<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.policy.has_next(&self.cursor, self.hist) {
            return None;
        }

        while self.cursor.current_index < self.hist.distinct_values() {
            self.cursor.count_at_this_value = self.hist.counts[self.cursor.current_index];

            // accumulate each slot only the first time the cursor rests on it
            if self.cursor.fresh_sub_bucket {
                let count = self.cursor.count_at_this_value.as_u64();
                let highest = self
                    .hist
                    .highest_equivalent(self.cursor.current_value_at_index);
                self.cursor.total_count_to_current_index = self
                    .cursor
                    .total_count_to_current_index
                    .saturating_add(count);
                self.cursor.total_value_to_current_index = self
                    .cursor
                    .total_value_to_current_index
                    .saturating_add(count.saturating_mul(highest));
                self.cursor.count_since_last_iteration = self
                    .cursor
                    .count_since_last_iteration
                    .saturating_add(count);
                self.cursor.fresh_sub_bucket = false;
            }

            if self.policy.reached_target(&self.cursor, self.hist) {
                let value_iterated_to = self.policy.value_iterated_to(&self.cursor, self.hist);
                let step = IterationValue {
                    value_iterated_to,
                    value_iterated_from: self.cursor.prev_value_iterated_to,
                    count_at_value: self.cursor.count_at_this_value,
                    count_since_last_iteration: self.cursor.count_since_last_iteration,
                    total_count_to_this_value: self.cursor.total_count_to_current_index,
                    total_value_to_this_value: self.cursor.total_value_to_current_index,
                    percentile: 100.0 * self.cursor.total_count_to_current_index as f64
                        / self.cursor.array_total_count as f64,
                    percentile_level_iterated_to: self.policy.percentile_iterated_to(&self.cursor),
                };

                self.cursor.prev_value_iterated_to = value_iterated_to;
                self.cursor.count_since_last_iteration = 0;
                self.policy.advance(&self.cursor, self.hist);

                // note that the cursor stays on this slot; it is revisited on the next call
                return Some(step);
            }

            // move to the next sub bucket slot
            self.cursor.current_index += 1;
            self.cursor.current_value_at_index = self.hist.value_for(self.cursor.current_index);
            self.cursor.next_value_at_index = self.hist.value_for(self.cursor.current_index + 1);
            self.cursor.fresh_sub_bucket = true;
        }
        None
    }
}
