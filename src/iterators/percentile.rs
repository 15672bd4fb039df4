use crate::core::counter::Counter;
use crate::iterators::{Cursor, HistogramIterator, IterationPolicy};
use crate::Histogram;

/// An iterator that yields at percentile levels that tighten toward 100%.
pub struct Iter {
    ticks_per_half_distance: u32,
    percentile_level_to_iterate_to: f64,
    reached_last_recorded_value: bool,
}

impl Iter {
    /// Construct a new percentile iterator. See `Histogram::iter_percentiles` for details.
    pub fn new<T: Counter>(
        hist: &Histogram<T>,
        ticks_per_half_distance: u32,
    ) -> HistogramIterator<'_, T, Iter> {
        assert!(
            ticks_per_half_distance > 0,
            "ticks_per_half_distance must be > 0"
        );

        HistogramIterator::new(
            hist,
            Iter {
                ticks_per_half_distance,
                percentile_level_to_iterate_to: 0.0,
                reached_last_recorded_value: false,
            },
        )
    }
}

impl<T: Counter> IterationPolicy<T> for Iter {
    fn reached_target(&mut self, cursor: &Cursor<T>, _: &Histogram<T>) -> bool {
        if cursor.count_at_this_value == T::zero() {
            return false;
        }

        let current_percentile = 100.0 * cursor.total_count_to_current_index as f64
            / cursor.array_total_count as f64;
        current_percentile >= self.percentile_level_to_iterate_to
    }

    fn advance(&mut self, _: &Cursor<T>, _: &Histogram<T>) {
        // the terminal tick stays at 100%
        if self.percentile_level_to_iterate_to >= 100.0 {
            return;
        }

        // Ticks keep a fixed size within each half-distance to 100% and halve when a
        // half-distance is crossed. Compared to a tick size that shrinks continuously, this
        // keeps the emitted levels easy to read while still following the exponentially
        // shrinking tail.
        //
        // The number of halvings so far is 1 at 50%, 2 at 75%, 3 at 87.5% and so on;
        // 2^(halvings + 1) half-distances ticked at the configured rate gives the current total
        // tick count across 0-100%.
        let halvings = (100.0 / (100.0 - self.percentile_level_to_iterate_to)).log2() as u32 + 1;
        let ticks = 1_u64
            .checked_shl(halvings)
            .and_then(|slices| u64::from(self.ticks_per_half_distance).checked_mul(slices));

        match ticks {
            Some(ticks) => {
                let next = self.percentile_level_to_iterate_to + 100.0 / ticks as f64;
                // very close to 100% the increment can vanish below the f64 resolution; jump
                // straight to the end rather than stall
                self.percentile_level_to_iterate_to = if next == self.percentile_level_to_iterate_to
                {
                    100.0
                } else {
                    next
                };
            }
            None => self.percentile_level_to_iterate_to = 100.0,
        }
    }

    fn has_next(&mut self, cursor: &Cursor<T>, _: &Histogram<T>) -> bool {
        if cursor.total_count_to_current_index < cursor.array_total_count {
            return true;
        }

        // one extra tick at 100% once the recorded data is exhausted
        if !self.reached_last_recorded_value && cursor.array_total_count > 0 {
            self.percentile_level_to_iterate_to = 100.0;
            self.reached_last_recorded_value = true;
            true
        } else {
            false
        }
    }

    fn percentile_iterated_to(&self, _: &Cursor<T>) -> f64 {
        self.percentile_level_to_iterate_to
    }
}
