use crate::Histogram;

pub fn histo64(low: u64, high: u64, sigfig: u8) -> Histogram<u64> {
    Histogram::<u64>::new_with_bounds(low, high, sigfig).unwrap()
}
