use crate::core::counter::Counter;
use crate::iterators::{Cursor, HistogramIterator, IterationPolicy};
use crate::Histogram;

/// An iterator that yields at fixed-size steps through the histogram's value range.
pub struct Iter {
    // > 0
    value_units_per_bucket: u64,
    current_step_highest_value_reporting_level: u64,
    current_step_lowest_value_reporting_level: u64,
}

impl Iter {
    /// Construct a new linear iterator. See `Histogram::iter_linear` for details.
    pub fn new<T: Counter>(
        hist: &Histogram<T>,
        value_units_per_bucket: u64,
    ) -> HistogramIterator<'_, T, Iter> {
        assert!(
            value_units_per_bucket > 0,
            "value_units_per_bucket must be > 0"
        );

        // won't underflow because value_units_per_bucket > 0
        let highest = value_units_per_bucket - 1;
        HistogramIterator::new(
            hist,
            Iter {
                value_units_per_bucket,
                current_step_highest_value_reporting_level: highest,
                current_step_lowest_value_reporting_level: hist.lowest_equivalent(highest),
            },
        )
    }
}

impl<T: Counter> IterationPolicy<T> for Iter {
    fn reached_target(&mut self, cursor: &Cursor<T>, hist: &Histogram<T>) -> bool {
        cursor.current_value_at_index >= self.current_step_lowest_value_reporting_level
            || cursor.current_index >= hist.distinct_values() - 1
    }

    fn advance(&mut self, _: &Cursor<T>, hist: &Histogram<T>) {
        self.current_step_highest_value_reporting_level += self.value_units_per_bucket;
        self.current_step_lowest_value_reporting_level =
            hist.lowest_equivalent(self.current_step_highest_value_reporting_level);
    }

    fn has_next(&mut self, cursor: &Cursor<T>, _: &Histogram<T>) -> bool {
        // Keep stepping while the step level is still inside the current sub bucket: a sub
        // bucket wider than the linear step must be reported once per step it spans, not once
        // in total. The difference is subtle but important for the step count.
        cursor.total_count_to_current_index < cursor.array_total_count
            || self.current_step_highest_value_reporting_level < cursor.next_value_at_index
    }

    fn value_iterated_to(&self, _: &Cursor<T>, _: &Histogram<T>) -> u64 {
        self.current_step_highest_value_reporting_level
    }
}
