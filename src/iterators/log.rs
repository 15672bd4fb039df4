use crate::core::counter::Counter;
use crate::iterators::{Cursor, HistogramIterator, IterationPolicy};
use crate::Histogram;

/// An iterator that yields at exponentially growing steps through the histogram's value range.
pub struct Iter {
    // > 1.0
    log_base: f64,
    next_value_reporting_level: f64,
    current_step_highest_value_reporting_level: u64,
    current_step_lowest_value_reporting_level: u64,
}

impl Iter {
    /// Construct a new logarithmic iterator. See `Histogram::iter_log` for details.
    pub fn new<T: Counter>(
        hist: &Histogram<T>,
        value_units_in_first_bucket: u64,
        log_base: f64,
    ) -> HistogramIterator<'_, T, Iter> {
        assert!(
            value_units_in_first_bucket > 0,
            "value_units_in_first_bucket must be > 0"
        );
        assert!(log_base > 1.0, "log_base must be > 1.0");

        let highest = value_units_in_first_bucket - 1;
        HistogramIterator::new(
            hist,
            Iter {
                log_base,
                next_value_reporting_level: value_units_in_first_bucket as f64,
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
        self.next_value_reporting_level *= self.log_base;
        // won't underflow: the reporting level starts at 1 or above and only grows
        self.current_step_highest_value_reporting_level = self.next_value_reporting_level as u64 - 1;
        self.current_step_lowest_value_reporting_level =
            hist.lowest_equivalent(self.current_step_highest_value_reporting_level);
    }

    fn has_next(&mut self, cursor: &Cursor<T>, hist: &Histogram<T>) -> bool {
        // as with linear iteration, a sub bucket wider than the current step spans several
        // reporting levels and must be reported at each of them
        cursor.total_count_to_current_index < cursor.array_total_count
            || hist.lowest_equivalent(self.next_value_reporting_level as u64)
                < cursor.next_value_at_index
    }

    fn value_iterated_to(&self, _: &Cursor<T>, _: &Histogram<T>) -> u64 {
        self.current_step_highest_value_reporting_level
    }
}
