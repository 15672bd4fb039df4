use crate::core::counter::Counter;
use crate::iterators::{Cursor, HistogramIterator, IterationPolicy};
use crate::Histogram;

/// An iterator that yields every value with a recorded count, skipping empty slots.
pub struct Iter {
    visited_index: Option<usize>,
}

impl Iter {
    /// Construct a new recorded-values iterator. See `Histogram::iter_recorded` for details.
    pub fn new<T: Counter>(hist: &Histogram<T>) -> HistogramIterator<'_, T, Iter> {
        HistogramIterator::new(hist, Iter { visited_index: None })
    }
}

impl<T: Counter> IterationPolicy<T> for Iter {
    fn reached_target(&mut self, cursor: &Cursor<T>, _: &Histogram<T>) -> bool {
        cursor.count_at_this_value != T::zero() && self.visited_index != Some(cursor.current_index)
    }

    fn advance(&mut self, cursor: &Cursor<T>, _: &Histogram<T>) {
        self.visited_index = Some(cursor.current_index);
    }
}
