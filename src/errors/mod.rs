/// Errors that can occur when creating a histogram.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum CreationError {
    /// Lowest discernible value must be >= 1.
    LowIsZero,
    /// Lowest discernible value must be <= `u64::max_value() / 2` because the histogram must be
    /// able to hold at least one doubling of it below the highest trackable value.
    LowExceedsMax,
    /// Highest trackable value must be >= 2 * lowest discernible value for the bucket layout to
    /// have anywhere to put a second bucket. In practice high is much larger than 2 * low.
    HighLessThanTwiceLow,
    /// Number of significant digits must be in the range `[0, 5]`. Each additional digit grows the
    /// counts array by roughly 10x, and 5 digits is already finer than the noise floor of any
    /// realistic measurement.
    SigFigExceedsMax,
    /// Cannot maintain the requested precision above the lowest discernible value. The exponent of
    /// the largest power of two no bigger than the lowest value, plus the bits needed for the
    /// requested significant figures, must leave room in a 64-bit value. Decrease the significant
    /// figures, the lowest discernible value, or both.
    CannotRepresentSigFigBeyondLow,
    /// The `usize` type is too small to represent the desired counts array. Use fewer significant
    /// figures or a lower max.
    UsizeTypeTooSmall,
}

/// Errors that can occur while recording a value and its associated count.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum RecordError {
    /// The value to record is not representable in this histogram and resizing is disabled.
    /// Configure a higher maximum value or enable resizing. Only possible when resizing is
    /// disabled.
    ValueOutOfRangeResizeDisabled,
    /// Auto resizing is enabled and must be used to represent the provided value, but the
    /// histogram cannot be resized because `usize` cannot represent sufficient length. Configure
    /// this histogram to use fewer significant digits. Only possible when resizing is enabled.
    ResizeFailedUsizeTypeTooSmall,
}
