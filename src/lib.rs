//! A High Dynamic Range (HDR) histogram: recording and analyzing of sampled value counts across
//! a wide, configurable integer range, with a configurable number of significant digits of
//! precision maintained uniformly across that whole range.
//!
//! The histogram is built for latency and throughput measurement in performance sensitive code.
//! Recording a value is a constant-time operation (an or, a leading-zeros count, a shift and an
//! array increment), performs no allocation, and touches a fixed amount of memory that depends
//! only on the configured range and precision, never on how many samples have been recorded.
//! Analysis extracts arbitrary percentiles, counts and summary statistics without access to the
//! raw samples.
//!
//! For example, a histogram configured to track values between 1 and 3,600,000,000 with 3
//! significant digits will quantize no value by more than 1/1,000th of its magnitude. Used for
//! response times in microseconds that gives 1 microsecond resolution up to 1 millisecond,
//! 1 millisecond resolution up to a second, and still 3.6 second resolution at the full one hour
//! mark, all from a counts array of a couple hundred kilobytes.
//!
//! # Recording samples
//!
//! A histogram is created with one of the `::new` constructors on [`Histogram`]. `new` fixes only
//! the precision and leaves the range open, auto-resizing the counts array whenever a value
//! beyond the current range arrives. `new_with_max` and `new_with_bounds` fix the range up front,
//! which keeps recording strictly allocation free and makes out-of-range recording an error
//! instead.
//!
//! ```
//! use hdrhist::Histogram;
//!
//! // track [1 msec..1 hour] with 2 significant digits
//! let mut hist = Histogram::<u64>::new_with_bounds(1, 60 * 60 * 1000, 2).unwrap();
//!
//! hist.record(54_321).expect("value 54321 should be in range");
//!
//! // samples can also be recorded with +=, which panics if the value is out of range
//! hist += 54_321;
//!
//! // when the measured operation is subject to coordinated omission, the correcting
//! // record method backfills the samples a stalled load generator failed to issue.
//! // here the expected interval between samples is 10 msec:
//! hist.record_correct(54_321, 10).expect("value 54321 should be in range");
//! ```
//!
//! The `u64` annotation picks the counter type backing the bins. A narrower type shrinks the
//! histogram's footprint at the risk of a hot bin pinning at the counter's maximum.
//!
//! # Querying samples
//!
//! ```
//! use hdrhist::Histogram;
//!
//! let mut hist = Histogram::<u64>::new(3).unwrap();
//! for v in 1..=1000_u64 {
//!     hist.record(v).unwrap();
//! }
//!
//! assert_eq!(hist.count(), 1000);
//! assert!(hist.equivalent(hist.value_at_percentile(99.9), 999));
//! assert!(hist.equivalent(hist.median(), 500));
//! ```
//!
//! Several iterators give quick overviews of the distribution: [`Histogram::iter_percentiles`]
//! walks percentile levels that tighten toward 100%, [`Histogram::iter_linear`] and
//! [`Histogram::iter_log`] walk fixed-size and exponentially growing value steps, and
//! [`Histogram::iter_recorded`] visits every non-empty bin. A ready-made percentile distribution
//! report (plain text or CSV) is available through
//! [`Histogram::output_percentile_distribution`].
//!
//! # Limitations
//!
//! The histogram is a single-writer structure: mutation assumes exclusive access, and iterators
//! snapshot the total count at construction and must not outlive a mutation. Merging two
//! histograms and binary encoding interoperable with other HDR implementations are not provided.

use std::cmp;
use std::mem;
use std::ops::AddAssign;
use std::ops::RangeInclusive;

mod core;
pub mod errors;
pub mod format;
pub mod iterators;

pub use crate::core::counter::Counter;
pub use crate::errors::{CreationError, RecordError};
pub use crate::format::Format;

#[cfg(test)]
mod tests;

/// An HDR histogram over `u64` values with counters of type `T`.
///
/// The counts array is laid out as `bucket_count` overlapping logarithmic buckets of
/// `sub_bucket_count` linear slots each. Every bucket covers twice the range of its predecessor
/// at half the resolution, and only contributes its upper half of slots since its lower half is
/// already expressible (at better resolution) by the buckets before it. Bucket 0 is the
/// exception and keeps both halves. A value maps to its slot with a handful of bit operations,
/// which is what keeps recording constant-time.
#[derive(Debug, Clone)]
pub struct Histogram<T: Counter> {
    auto_resize: bool,

    lowest_discernible_value: u64,
    highest_trackable_value: u64,
    significant_value_digits: u8,

    bucket_count: u32,
    sub_bucket_count: usize,
    sub_bucket_half_count: usize,
    sub_bucket_half_count_magnitude: u32,
    sub_bucket_mask: u64,

    unit_magnitude: u32,
    leading_zero_count_base: u32,

    // raw as recorded; snapped to equivalence bounds when read back out
    max_value: u64,
    min_non_zero_value: u64,

    total_count: u64,
    counts: Vec<T>,
}

// construction

impl<T: Counter> Histogram<T> {
    /// Construct an auto-resizing histogram with a lowest discernible value of 1 and an
    /// auto-adjusting highest trackable value.
    ///
    /// `sigfig` is the number of significant decimal digits to which the histogram maintains
    /// value resolution and separation, between 0 and 5.
    pub fn new(sigfig: u8) -> Result<Histogram<T>, CreationError> {
        let mut h = Self::new_with_bounds(1, 2, sigfig)?;
        h.auto_resize = true;
        Ok(h)
    }

    /// Construct a histogram given the highest value to be tracked and a number of significant
    /// decimal digits. The histogram tracks (distinguishes from 0) values as low as 1, and
    /// recording a value above `high` fails rather than resizing.
    ///
    /// `high` must be at least 2.
    pub fn new_with_max(high: u64, sigfig: u8) -> Result<Histogram<T>, CreationError> {
        Self::new_with_bounds(1, high, sigfig)
    }

    /// Construct a histogram given the lowest and highest values to be tracked and a number of
    /// significant decimal digits.
    ///
    /// Providing a `low` above 1 is useful when the value units are much finer than the accuracy
    /// actually needed, e.g. nanosecond values that only need microsecond accuracy would pass
    /// `low = 1000` and save the histogram the slots it would otherwise spend below that.
    /// `low` must be at least 1 and `high` at least `2 * low`.
    pub fn new_with_bounds(low: u64, high: u64, sigfig: u8) -> Result<Histogram<T>, CreationError> {
        if low < 1 {
            return Err(CreationError::LowIsZero);
        }
        if low > u64::max_value() / 2 {
            return Err(CreationError::LowExceedsMax);
        }
        if high < 2 * low {
            return Err(CreationError::HighLessThanTwiceLow);
        }
        if sigfig > 5 {
            return Err(CreationError::SigFigExceedsMax);
        }

        // With e.g. 3 decimal digits the expectation is +/- 1 unit at 1000, which also makes
        // +/- 2 units acceptable at 2000 but not at 1999. Single unit resolution must therefore
        // stretch to 2 * 10^sigfig, and the sub bucket count is that rounded up to a power of
        // two for clean shift-based indexing.
        let largest_value_with_single_unit_resolution = 2 * 10_u64.pow(u32::from(sigfig));
        let sub_bucket_count_magnitude =
            (largest_value_with_single_unit_resolution as f64).log2().ceil() as u32;
        let sub_bucket_half_count_magnitude = cmp::max(sub_bucket_count_magnitude, 1) - 1;

        let unit_magnitude = (low as f64).log2().floor() as u32;
        if unit_magnitude + sub_bucket_half_count_magnitude > 61 {
            return Err(CreationError::CannotRepresentSigFigBeyondLow);
        }

        let sub_bucket_count = 1_usize << (sub_bucket_half_count_magnitude + 1);
        let sub_bucket_half_count = sub_bucket_count / 2;
        let sub_bucket_mask = (sub_bucket_count as u64 - 1) << unit_magnitude;

        let mut h = Histogram {
            auto_resize: false,

            lowest_discernible_value: low,
            highest_trackable_value: high,
            significant_value_digits: sigfig,

            bucket_count: 0, // set by cover() below
            sub_bucket_count,
            sub_bucket_half_count,
            sub_bucket_half_count_magnitude,
            sub_bucket_mask,

            unit_magnitude,
            // the bits the largest value in bucket 0 occupies, subtracted from the value width
            leading_zero_count_base: 64 - unit_magnitude - (sub_bucket_half_count_magnitude + 1),

            max_value: 0,
            min_non_zero_value: u64::max_value(),

            total_count: 0,
            counts: Vec::new(), // set below once the length is known
        };

        let len = h.cover(high)?;
        h.counts = vec![T::zero(); len];
        Ok(h)
    }

    /// Construct a histogram with the same configuration as `source` but no recorded data.
    /// The new histogram shares the source's auto-resize setting and counts array length, so
    /// the two always accept the same values.
    pub fn new_from<F: Counter>(source: &Histogram<F>) -> Histogram<T> {
        let mut h = Self::new_with_bounds(
            source.lowest_discernible_value,
            source.highest_trackable_value,
            source.significant_value_digits,
        )
        .expect("source histogram configuration is valid");

        h.auto_resize = source.auto_resize;
        h.bucket_count = source.bucket_count;
        h.counts.resize(source.counts.len(), T::zero());
        h
    }

    /// Record `bucket_count` for covering `value` and return the matching counts array length.
    fn cover(&mut self, value: u64) -> Result<usize, CreationError> {
        let buckets = self.buckets_to_cover(value);
        let len = self.len_for_buckets(buckets)?;
        self.bucket_count = buckets;
        Ok(len)
    }

    fn buckets_to_cover(&self, value: u64) -> u32 {
        // the k'th bucket can express from 0 * 2^k to sub_bucket_count * 2^k in units of 2^k
        let mut smallest_untrackable = (self.sub_bucket_count as u64) << self.unit_magnitude;

        // always have at least 1 bucket
        let mut buckets = 1;
        while smallest_untrackable <= value {
            if smallest_untrackable > u64::max_value() / 2 {
                // the next bucket straddles the top of the u64 range, so it is the last one
                return buckets + 1;
            }
            smallest_untrackable <<= 1;
            buckets += 1;
        }
        buckets
    }

    /// Each bucket past the first contributes half a sub bucket's worth of slots (its lower half
    /// is covered by its predecessors); bucket 0 contributes both halves.
    fn len_for_buckets(&self, buckets: u32) -> Result<usize, CreationError> {
        let len = (u64::from(buckets) + 1) * (self.sub_bucket_half_count as u64);
        if len > usize::max_value() as u64 {
            return Err(CreationError::UsizeTypeTooSmall);
        }
        Ok(len as usize)
    }
}

impl<T: Counter> Default for Histogram<T> {
    /// An auto-resizing histogram with 3 significant digits.
    fn default() -> Histogram<T> {
        Self::new(3).expect("default configuration is valid")
    }
}

// configuration accessors

impl<T: Counter> Histogram<T> {
    /// Get the configured lowest discernible value.
    pub fn low(&self) -> u64 {
        self.lowest_discernible_value
    }

    /// Get the highest trackable value. Grows when an auto-resizing histogram records a value
    /// beyond the previous bound.
    pub fn high(&self) -> u64 {
        self.highest_trackable_value
    }

    /// Get the configured number of significant decimal digits.
    pub fn sigfig(&self) -> u8 {
        self.significant_value_digits
    }

    /// Get the total number of recorded samples.
    pub fn count(&self) -> u64 {
        self.total_count
    }

    /// Returns true if no values have been recorded since construction or the last `reset`.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Get the number of logarithmic buckets the histogram currently spans.
    pub fn buckets(&self) -> u32 {
        self.bucket_count
    }

    /// Get the current length of the counts array, i.e. the number of distinct value slots.
    pub fn distinct_values(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if this histogram grows its range instead of rejecting out-of-range values.
    pub fn is_auto_resize(&self) -> bool {
        self.auto_resize
    }

    /// Control whether the histogram auto-resizes (and auto-adjusts its highest trackable value)
    /// when a value beyond the current range is recorded.
    pub fn auto(&mut self, enabled: bool) {
        self.auto_resize = enabled;
    }

    /// A conservative estimate of the histogram's memory footprint.
    pub fn estimated_footprint_in_bytes(&self) -> usize {
        512 + self.counts.capacity() * mem::size_of::<T>()
    }
}

// recording

impl<T: Counter> Histogram<T> {
    /// Record a single occurrence of `value`.
    ///
    /// Fails if `value` exceeds the highest trackable value and auto-resize is disabled.
    pub fn record(&mut self, value: u64) -> Result<(), RecordError> {
        self.record_n(value, T::one())
    }

    /// Record `count` occurrences of `value`.
    ///
    /// The counter for the value saturates at the counter type's maximum rather than wrapping.
    /// Fails if `value` exceeds the highest trackable value and auto-resize is disabled.
    pub fn record_n(&mut self, value: u64, count: T) -> Result<(), RecordError> {
        let index = self.index_for(value);
        let recorded = match self.counts.get_mut(index) {
            Some(c) => {
                *c = c.saturating_add(count);
                true
            }
            None => false,
        };

        if !recorded {
            if !self.auto_resize {
                return Err(RecordError::ValueOutOfRangeResizeDisabled);
            }
            self.resize(value)
                .map_err(|_| RecordError::ResizeFailedUsizeTypeTooSmall)?;
            self.highest_trackable_value = self.highest_equivalent(value);

            let index = self.index_for(value);
            let c = &mut self.counts[index];
            *c = c.saturating_add(count);
        }

        self.update_min_max(value);
        self.total_count = self.total_count.saturating_add(count.as_u64());
        Ok(())
    }

    /// Record `value`, compensating for coordinated omission.
    ///
    /// When the code being measured stalls for longer than `interval` (the expected interval
    /// between samples), the samples that should have been taken during the stall are missing
    /// from the data. This method backfills them: in addition to `value` it records
    /// `value - interval`, `value - 2 * interval`, and so on down to `interval`.
    ///
    /// This is an at-recording correction; [`Histogram::clone_correct`] is the equivalent
    /// post-recording correction. The two are mutually exclusive, only one of them should be
    /// applied to a given data set.
    pub fn record_correct(&mut self, value: u64, interval: u64) -> Result<(), RecordError> {
        self.record_correct_n(value, T::one(), interval)
    }

    /// Record `count` occurrences of `value`, compensating for coordinated omission. See
    /// [`Histogram::record_correct`].
    ///
    /// On failure, backfilled values before the failing one remain recorded.
    pub fn record_correct_n(
        &mut self,
        value: u64,
        count: T,
        interval: u64,
    ) -> Result<(), RecordError> {
        self.record_n(value, count)?;
        if interval == 0 || value <= interval {
            return Ok(());
        }

        let mut missing = value - interval;
        while missing >= interval {
            self.record_n(missing, count)?;
            missing -= interval;
        }
        Ok(())
    }

    /// Get a copy of this histogram, corrected for coordinated omission as if every recorded
    /// value had been recorded with [`Histogram::record_correct`] at the given expected
    /// `interval`.
    pub fn clone_correct(&self, interval: u64) -> Histogram<T> {
        let mut h = Histogram::new_from(self);
        for step in self.iter_recorded() {
            h.record_correct_n(step.value_iterated_to(), step.count_at_value(), interval)
                .expect("same configuration tracks the same values");
        }
        h
    }

    /// Reset the contents of the histogram. The counts array keeps its current length.
    pub fn reset(&mut self) {
        for c in self.counts.iter_mut() {
            *c = T::zero();
        }
        self.total_count = 0;
        self.max_value = 0;
        self.min_non_zero_value = u64::max_value();
    }

    /// Grow the counts array to cover `new_high`. Never shrinks.
    fn resize(&mut self, new_high: u64) -> Result<(), CreationError> {
        let len = self.cover(new_high)?;
        if len > self.counts.len() {
            self.counts.resize(len, T::zero());
        }
        Ok(())
    }

    fn update_min_max(&mut self, value: u64) {
        if value > self.max_value {
            self.max_value = value;
        }
        if value != 0 && value < self.min_non_zero_value {
            self.min_non_zero_value = value;
        }
    }
}

/// Record a single value via `+=`.
///
/// Panics if the value cannot be recorded; use [`Histogram::record`] to handle the error
/// instead.
impl<T: Counter> AddAssign<u64> for Histogram<T> {
    fn add_assign(&mut self, value: u64) {
        self.record(value).unwrap();
    }
}

// index arithmetic

impl<T: Counter> Histogram<T> {
    /// The lowest (and therefore highest precision) bucket that can represent the value.
    fn bucket_for(&self, value: u64) -> u32 {
        // Number of powers of two by which the value exceeds the biggest value bucket 0 can
        // hold, which is the bucket index since each successive bucket doubles the range.
        // Or-ing in the mask maps every small value to bucket 0.
        self.leading_zero_count_base - (value | self.sub_bucket_mask).leading_zeros()
    }

    fn sub_bucket_for(&self, value: u64, bucket: u32) -> usize {
        // For bucket 0 this is just the value in units, anywhere in [0, sub_bucket_count). For
        // any later bucket it always lands in the top half: had it landed in the bottom half it
        // would have been expressible in the previous bucket and bucket_for would have said so.
        (value >> (bucket + self.unit_magnitude)) as usize
    }

    fn index_for(&self, value: u64) -> usize {
        let bucket = self.bucket_for(value);
        let sub_bucket = self.sub_bucket_for(value, bucket);

        // The first slot the bucket actually uses sits halfway through its sub bucket range.
        // Bucket 0 owns the lower half of the array as well, which is exactly the room the
        // subtraction needs for its below-halfway sub bucket indexes.
        let base = (bucket as usize + 1) << self.sub_bucket_half_count_magnitude;
        base + sub_bucket - self.sub_bucket_half_count
    }

    /// The value a counts-array index stands for (the lowest value of its equivalence range).
    pub fn value_for(&self, index: usize) -> u64 {
        let mut bucket = (index >> self.sub_bucket_half_count_magnitude) as isize - 1;
        let mut sub_bucket = (index & (self.sub_bucket_half_count - 1)) + self.sub_bucket_half_count;
        if bucket < 0 {
            // lower half of bucket 0
            sub_bucket -= self.sub_bucket_half_count;
            bucket = 0;
        }
        (sub_bucket as u64) << (bucket as u32 + self.unit_magnitude)
    }
}

// equivalence arithmetic

impl<T: Counter> Histogram<T> {
    /// Get the size (in value units) of the range of values that are equivalent to the given
    /// value within the histogram's resolution, i.e. that share a single counter.
    pub fn equivalent_range_len(&self, value: u64) -> u64 {
        let bucket = self.bucket_for(value);
        let sub_bucket = self.sub_bucket_for(value, bucket);
        // a sub bucket index beyond the sub bucket count belongs to the next (coarser) bucket
        let adjusted = if sub_bucket >= self.sub_bucket_count {
            bucket + 1
        } else {
            bucket
        };
        1_u64 << (self.unit_magnitude + adjusted)
    }

    /// Get the lowest value that is equivalent to the given value within the histogram's
    /// resolution.
    pub fn lowest_equivalent(&self, value: u64) -> u64 {
        let bucket = self.bucket_for(value);
        let sub_bucket = self.sub_bucket_for(value, bucket);
        (sub_bucket as u64) << (bucket + self.unit_magnitude)
    }

    /// Get the highest value that is equivalent to the given value within the histogram's
    /// resolution.
    pub fn highest_equivalent(&self, value: u64) -> u64 {
        match self
            .lowest_equivalent(value)
            .checked_add(self.equivalent_range_len(value))
        {
            Some(next) => next - 1,
            None => u64::max_value(),
        }
    }

    /// Get a value that lies in the middle (rounded up) of the range of values equivalent to the
    /// given value.
    pub fn median_equivalent(&self, value: u64) -> u64 {
        self.lowest_equivalent(value)
            .saturating_add(self.equivalent_range_len(value) >> 1)
    }

    /// Get the next value that is not equivalent to the given value within the histogram's
    /// resolution. Saturates at `u64::max_value()` for the topmost equivalence range.
    pub fn next_non_equivalent(&self, value: u64) -> u64 {
        self.lowest_equivalent(value)
            .saturating_add(self.equivalent_range_len(value))
    }

    /// The full range of values equivalent to the given value within the histogram's resolution.
    pub fn equivalent_range(&self, value: u64) -> RangeInclusive<u64> {
        self.lowest_equivalent(value)..=self.highest_equivalent(value)
    }

    /// Determine if two values are equivalent within the histogram's resolution, i.e. whether
    /// samples recorded for them are counted in a common counter.
    pub fn equivalent(&self, value1: u64, value2: u64) -> bool {
        self.lowest_equivalent(value1) == self.lowest_equivalent(value2)
    }
}

// statistics and queries

impl<T: Counter> Histogram<T> {
    /// Get the lowest recorded value level in the histogram, or 0 if no values have been
    /// recorded.
    pub fn min(&self) -> u64 {
        if self.total_count == 0 || self.counts[0] != T::zero() {
            0
        } else {
            self.min_nz()
        }
    }

    /// Get the highest recorded value level in the histogram, or 0 if no values have been
    /// recorded.
    pub fn max(&self) -> u64 {
        if self.max_value == 0 {
            0
        } else {
            self.highest_equivalent(self.max_value)
        }
    }

    /// Get the lowest recorded non-zero value level in the histogram, or `u64::max_value()` if
    /// no non-zero values have been recorded.
    pub fn min_nz(&self) -> u64 {
        if self.min_non_zero_value == u64::max_value() {
            u64::max_value()
        } else {
            self.lowest_equivalent(self.min_non_zero_value)
        }
    }

    /// Get the computed mean of all recorded values, or 0 if the histogram is empty.
    pub fn mean(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }

        self.iter_recorded().fold(0.0, |total, step| {
            total
                + self.median_equivalent(step.value_iterated_to()) as f64
                    * step.count_at_value().as_f64()
                    / self.total_count as f64
        })
    }

    /// Get the computed standard deviation of all recorded values, or 0 if the histogram is
    /// empty.
    pub fn stdev(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }

        let mean = self.mean();
        let square_deviation_sum = self.iter_recorded().fold(0.0, |total, step| {
            let dev = self.median_equivalent(step.value_iterated_to()) as f64 - mean;
            total + dev * dev * step.count_since_last_iteration() as f64
        });
        (square_deviation_sum / self.total_count as f64).sqrt()
    }

    /// Get the value at a given percentile, or 0 if the histogram is empty.
    ///
    /// For `percentile > 0` this is the value that the given percentage of the recorded entries
    /// are smaller than or equivalent to; for `percentile == 0` it is the value that all entries
    /// are larger than or equivalent to. Percentiles above 100 are treated as 100.
    pub fn value_at_percentile(&self, percentile: f64) -> u64 {
        // Nudge the requested percentile down one ulp so a request landing exactly on a step
        // boundary still selects that step, then clamp into the meaningful range.
        let requested = percentile.next_down().clamp(0.0, 100.0);

        // make sure to reach at least the first recorded entry
        let threshold = cmp::max(
            1,
            ((requested / 100.0) * self.total_count as f64).ceil() as u64,
        );

        let mut total = 0_u64;
        for (index, count) in self.counts.iter().enumerate() {
            total = total.saturating_add(count.as_u64());
            if total >= threshold {
                let value = self.value_for(index);
                return if percentile == 0.0 {
                    self.lowest_equivalent(value)
                } else {
                    self.highest_equivalent(value)
                };
            }
        }
        0
    }

    /// Get the value at the 50'th percentile.
    pub fn median(&self) -> u64 {
        self.value_at_percentile(50.0)
    }

    /// Get the percentage of recorded values that are smaller than or equivalent to `value`.
    /// Returns 100 if the histogram is empty.
    pub fn percentile_below(&self, value: u64) -> f64 {
        if self.total_count == 0 {
            return 100.0;
        }

        let target = cmp::min(self.index_for(value), self.counts.len() - 1);
        let total = self.counts[..=target]
            .iter()
            .fold(0_u64, |t, c| t.saturating_add(c.as_u64()));
        100.0 * total as f64 / self.total_count as f64
    }

    /// Get the count of recorded values within `[low, high]`, inclusive to within the
    /// histogram's resolution: the range is widened to
    /// `[lowest_equivalent(low), highest_equivalent(high)]`.
    pub fn count_between(&self, low: u64, high: u64) -> u64 {
        let low_index = self.index_for(low);
        let high_index = cmp::min(self.index_for(high), self.counts.len() - 1);
        if low_index > high_index {
            return 0;
        }
        self.counts[low_index..=high_index]
            .iter()
            .fold(0_u64, |t, c| t.saturating_add(c.as_u64()))
    }

    /// Get the count of recorded values equivalent to `value` (a single counter lookup).
    pub fn count_at(&self, value: u64) -> T {
        self.counts[cmp::min(self.index_for(value), self.counts.len() - 1)]
    }
}

// comparison

/// Two histograms compare equal when they are configured with the same lowest discernible value
/// and precision and hold the same data: equal totals, extrema and per-value counts. Their
/// counts arrays may differ in length (one may have auto-resized further than the other).
impl<T: Counter, F: Counter> PartialEq<Histogram<F>> for Histogram<T> {
    fn eq(&self, other: &Histogram<F>) -> bool {
        if self.lowest_discernible_value != other.lowest_discernible_value
            || self.significant_value_digits != other.significant_value_digits
        {
            return false;
        }
        if self.total_count != other.total_count {
            return false;
        }
        if self.max() != other.max() {
            return false;
        }
        if self.min_nz() != other.min_nz() {
            return false;
        }

        // Same configuration means the same index mapping, so slots can be compared directly;
        // any length difference from auto-resize can only hold zeros past the shared prefix.
        let longest = cmp::max(self.counts.len(), other.counts.len());
        (0..longest).all(|i| {
            let a = self.counts.get(i).map_or(0, |c| c.as_u64());
            let b = other.counts.get(i).map_or(0, |c| c.as_u64());
            a == b
        })
    }
}

// iteration

impl<T: Counter> Histogram<T> {
    /// Iterate through histogram values at percentile levels. The iteration starts at 0% and
    /// reduces its distance to 100% according to `ticks_per_half_distance`, ultimately emitting
    /// one final tick at 100% when all recorded values are exhausted.
    pub fn iter_percentiles<'a>(
        &'a self,
        ticks_per_half_distance: u32,
    ) -> iterators::HistogramIterator<'a, T, iterators::percentile::Iter> {
        iterators::percentile::Iter::new(self, ticks_per_half_distance)
    }

    /// Iterate through histogram values in linear steps of `value_units_per_bucket`, terminating
    /// once all recorded values are exhausted.
    pub fn iter_linear<'a>(
        &'a self,
        value_units_per_bucket: u64,
    ) -> iterators::HistogramIterator<'a, T, iterators::linear::Iter> {
        iterators::linear::Iter::new(self, value_units_per_bucket)
    }

    /// Iterate through histogram values at logarithmically increasing levels, starting with
    /// `value_units_in_first_bucket` and growing by `log_base` each step, terminating once all
    /// recorded values are exhausted.
    pub fn iter_log<'a>(
        &'a self,
        value_units_in_first_bucket: u64,
        log_base: f64,
    ) -> iterators::HistogramIterator<'a, T, iterators::log::Iter> {
        iterators::log::Iter::new(self, value_units_in_first_bucket, log_base)
    }

    /// Iterate through all recorded histogram values at the finest granularity the histogram
    /// supports, stepping through every value with a non-zero count.
    pub fn iter_recorded<'a>(
        &'a self,
    ) -> iterators::HistogramIterator<'a, T, iterators::recorded::Iter> {
        iterators::recorded::Iter::new(self)
    }

    /// Iterate through every histogram value slot, whether or not it has a recorded count.
    pub fn iter_all<'a>(&'a self) -> iterators::HistogramIterator<'a, T, iterators::all::Iter> {
        iterators::all::Iter::new(self)
    }
}
