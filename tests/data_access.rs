//! Statistics and iteration over a hypothetical latency scenario: 100 seconds of perfect 1 msec
//! results sampled 100 times per second, followed by a 100 second stall and a single 100 second
//! result, recorded in microseconds with a 10 msec expected interval between samples.

use hdrhist::Histogram;
use rand::Rng;

macro_rules! assert_near {
    ($a: expr, $b: expr, $tolerance: expr) => {{
        let a = $a as f64;
        let b = $b as f64;
        let tol = $tolerance as f64;
        assert!(
            (a - b).abs() <= b * tol,
            "assertion failed: `(left ~= right)` (left: `{}`, right: `{}`, tolerance: `{:.5}%`)",
            a,
            b,
            100.0 * tol
        );
    }};
}

const TRACKABLE_MAX: u64 = 3600 * 1000 * 1000;
const SIGFIG: u8 = 3;
const INTERVAL: u64 = 10_000; // 10 msec expected interval

struct Loaded {
    hist: Histogram<u64>,
    raw: Histogram<u64>,
    post: Histogram<u64>,
}

fn load_histograms() -> Loaded {
    let mut hist = Histogram::new_with_max(TRACKABLE_MAX, SIGFIG).unwrap();
    let mut raw = Histogram::new_with_max(TRACKABLE_MAX, SIGFIG).unwrap();

    for _ in 0..10_000 {
        hist.record_correct(1_000, INTERVAL).unwrap();
        raw.record(1_000).unwrap();
    }
    hist.record_correct(100_000_000, INTERVAL).unwrap();
    raw.record(100_000_000).unwrap();

    let post = raw.clone_correct(INTERVAL);

    Loaded { hist, raw, post }
}

#[test]
fn total_count() {
    let Loaded { hist, raw, .. } = load_histograms();

    assert_eq!(raw.count(), 10_001);
    assert_eq!(hist.count(), 20_000);
}

#[test]
fn max_value() {
    let Loaded { hist, .. } = load_histograms();
    assert!(hist.equivalent(hist.max(), 100_000_000));
}

#[test]
fn min_value() {
    let Loaded { hist, .. } = load_histograms();
    assert!(hist.equivalent(hist.min(), 1_000));
    assert!(hist.equivalent(hist.min_nz(), 1_000));
}

#[test]
fn mean() {
    let Loaded { hist, raw, post } = load_histograms();

    // direct average of the raw results
    let expected_raw_mean = (10_000.0 * 1_000.0 + 1.0 * 100_000_000.0) / 10_001.0;
    // 1 msec for half the time, 50 sec on average for the other half
    let expected_mean = (1_000.0 + 50_000_000.0) / 2.0;

    assert_near!(raw.mean(), expected_raw_mean, 0.001);
    assert_near!(hist.mean(), expected_mean, 0.001);
    assert_near!(post.mean(), expected_mean, 0.001);
}

#[test]
fn stdev() {
    let Loaded { hist, raw, .. } = load_histograms();

    let expected_raw_mean = (10_000.0 * 1_000.0 + 1.0 * 100_000_000.0) / 10_001.0;
    let expected_raw_stdev = ((10_000.0 * (1_000_f64 - expected_raw_mean).powi(2)
        + (100_000_000_f64 - expected_raw_mean).powi(2))
        / 10_001.0)
        .sqrt();

    let expected_mean = (1_000.0 + 50_000_000.0) / 2.0;
    let mut expected_square_deviation_sum = 10_000.0 * (1_000_f64 - expected_mean).powi(2);
    let mut value = 10_000.0;
    while value <= 100_000_000.0 {
        expected_square_deviation_sum += (value - expected_mean).powi(2);
        value += 10_000.0;
    }
    let expected_stdev = (expected_square_deviation_sum / 20_000.0).sqrt();

    assert_near!(raw.stdev(), expected_raw_stdev, 0.001);
    assert_near!(hist.stdev(), expected_stdev, 0.001);
}

#[test]
fn percentiles() {
    let Loaded { hist, raw, .. } = load_histograms();

    assert_near!(raw.value_at_percentile(30.0), 1_000.0, 0.001);
    assert_near!(raw.value_at_percentile(99.0), 1_000.0, 0.001);
    assert_near!(raw.value_at_percentile(99.999), 100_000_000.0, 0.001);
    assert_near!(raw.value_at_percentile(100.0), 100_000_000.0, 0.001);

    assert_near!(hist.value_at_percentile(30.0), 1_000.0, 0.001);
    assert_near!(hist.value_at_percentile(50.0), 1_000.0, 0.001);
    assert_near!(hist.value_at_percentile(75.0), 50_000_000.0, 0.001);
    assert_near!(hist.value_at_percentile(90.0), 80_000_000.0, 0.001);
    assert_near!(hist.value_at_percentile(99.0), 98_000_000.0, 0.001);
    assert_near!(hist.value_at_percentile(99.999), 100_000_000.0, 0.001);
    assert_near!(hist.value_at_percentile(100.0), 100_000_000.0, 0.001);
}

#[test]
fn percentile_at_or_below_value() {
    let Loaded { hist, raw, .. } = load_histograms();

    assert_near!(99.99, raw.percentile_below(5_000), 0.0001);
    assert_near!(50.0, hist.percentile_below(5_000), 0.0001);
    assert_near!(100.0, hist.percentile_below(100_000_000), 0.0001);
}

#[test]
fn percentile_below_round_trips_through_value_at_percentile() {
    let Loaded { hist, .. } = load_histograms();

    for &value in &[1_000, 100_000_000] {
        let reported = hist.value_at_percentile(hist.percentile_below(value));
        assert!(hist.equivalent(value, reported));
    }
}

#[test]
fn count_between_values() {
    let Loaded { hist, raw, .. } = load_histograms();

    assert_eq!(raw.count_between(1_000, 1_000), 10_000);
    assert_eq!(raw.count_between(5_000, 150_000_000), 1);
    assert_eq!(hist.count_between(5_000, 150_000_000), 10_000);
}

#[test]
fn count_at_value() {
    let Loaded { hist, raw, .. } = load_histograms();

    assert_eq!(raw.count_between(10_000, 10_010), 0);
    assert_eq!(hist.count_between(10_000, 10_010), 1);
    assert_eq!(raw.count_at(1_000), 10_000);
    assert_eq!(hist.count_at(1_000), 10_000);
}

#[test]
fn percentile_iter_values_match_value_at_percentile() {
    let Loaded { hist, .. } = load_histograms();

    for step in hist.iter_percentiles(5) {
        assert_eq!(
            step.value_iterated_to(),
            hist.highest_equivalent(hist.value_at_percentile(step.percentile()))
        );
    }
}

#[test]
fn linear_iter() {
    let Loaded { hist, raw, .. } = load_histograms();

    // iterate the raw data in linear buckets of 100 msec
    let mut num = 0;
    for (i, step) in raw.iter_linear(100_000).enumerate() {
        match i {
            0 => assert_eq!(step.count_since_last_iteration(), 10_000),
            999 => assert_eq!(step.count_since_last_iteration(), 1),
            _ => assert_eq!(step.count_since_last_iteration(), 0),
        }
        num += 1;
    }
    assert_eq!(num, 1_000);

    // 10 msec buckets over the corrected data: the value resolution is coarse enough that some
    // linear buckets land inside a single equivalence range, so individual step counts wobble,
    // but the sum over all steps must come out exact
    let mut num = 0;
    let mut total_added = 0;
    for (i, step) in hist.iter_linear(10_000).enumerate() {
        if i == 0 {
            assert_eq!(step.count_since_last_iteration(), 10_000);
        }
        total_added += step.count_since_last_iteration();
        num += 1;
    }
    assert_eq!(num, 10_000);
    assert_eq!(total_added, 20_000);

    // At 1 msec buckets the final populated equivalence range is wider than the step, and the
    // iteration must run through the whole range rather than stopping at its first step; that
    // padding is where the extra 7 steps come from.
    let mut num = 0;
    let mut total_added = 0;
    for step in hist.iter_linear(1_000) {
        total_added += step.count_since_last_iteration();
        num += 1;
    }
    assert_eq!(num, 100_007);
    assert_eq!(total_added, 20_000);
}

#[test]
fn log_iter() {
    let Loaded { hist, raw, .. } = load_histograms();

    // logarithmic buckets starting at 10 msec, doubling
    let mut num = 0;
    for (i, step) in raw.iter_log(10_000, 2.0).enumerate() {
        match i {
            0 => assert_eq!(step.count_since_last_iteration(), 10_000),
            14 => assert_eq!(step.count_since_last_iteration(), 1),
            _ => assert_eq!(step.count_since_last_iteration(), 0),
        }
        num += 1;
    }
    assert_eq!(num - 1, 14);

    let mut num = 0;
    let mut total_added = 0;
    for (i, step) in hist.iter_log(10_000, 2.0).enumerate() {
        if i == 0 {
            assert_eq!(step.count_since_last_iteration(), 10_000);
        }
        total_added += step.count_since_last_iteration();
        num += 1;
    }
    assert_eq!(num - 1, 14);
    assert_eq!(total_added, 20_000);
}

#[test]
fn recorded_iter() {
    let Loaded { hist, raw, .. } = load_histograms();

    let mut num = 0;
    for (i, step) in raw.iter_recorded().enumerate() {
        match i {
            0 => assert_eq!(step.count_since_last_iteration(), 10_000),
            _ => assert_eq!(step.count_since_last_iteration(), 1),
        }
        num += 1;
    }
    assert_eq!(num, 2);

    let mut total_added = 0;
    for (i, step) in hist.iter_recorded().enumerate() {
        if i == 0 {
            assert_eq!(step.count_since_last_iteration(), 10_000);
        }
        assert!(step.count_at_value() != 0);
        assert_eq!(step.count_at_value(), step.count_since_last_iteration());
        total_added += step.count_since_last_iteration();
    }
    assert_eq!(total_added, 20_000);
}

#[test]
fn all_values_iter() {
    let Loaded { hist, raw, .. } = load_histograms();

    let mut num = 0;
    let mut total_added = 0;
    for (i, step) in raw.iter_all().enumerate() {
        if i == 1_000 {
            assert_eq!(step.count_since_last_iteration(), 10_000);
        } else if raw.equivalent(step.value_iterated_to(), 100_000_000) {
            assert_eq!(step.count_since_last_iteration(), 1);
        } else {
            assert_eq!(step.count_since_last_iteration(), 0);
        }
        assert!(raw.equivalent(raw.value_for(i), step.value_iterated_to()));
        total_added += step.count_since_last_iteration();
        num += 1;
    }
    assert_eq!(num, raw.distinct_values());
    assert_eq!(total_added, 10_001);
}

#[test]
fn value_duplication_through_all_values() {
    let Loaded { hist, .. } = load_histograms();

    let mut values = Vec::new();
    let mut counts = Vec::new();
    for step in hist.iter_all() {
        if step.count_since_last_iteration() > 0 {
            values.push(step.value_iterated_to());
            counts.push(step.count_since_last_iteration());
        }
    }

    let mut replayed = Histogram::<u64>::new_with_max(TRACKABLE_MAX, SIGFIG).unwrap();
    for (value, count) in values.iter().zip(counts.iter()) {
        replayed.record_n(*value, *count).unwrap();
    }

    assert!(replayed == hist, "histograms should be equal after re-recording");
}

#[test]
fn value_at_percentile_matches_percentile_iter_sequence() {
    let mut h = Histogram::<u64>::new_with_bounds(1, u64::max_value(), 3).unwrap();

    for &length in &[1_u64, 5, 10, 50, 100, 1_000, 10_000, 100_000] {
        h.reset();
        for v in 1..=length {
            h.record(v).unwrap();
        }
        assert_eq!(length, h.count());

        for step in h.iter_percentiles(1_000) {
            assert_eq!(
                step.value_iterated_to(),
                h.value_at_percentile(step.percentile()),
                "length {} percentile {}",
                length,
                step.percentile()
            );
        }
    }
}

#[test]
fn value_at_percentile_matches_percentile_iter_random() {
    let mut h = Histogram::<u64>::new_with_bounds(1, u64::max_value(), 3).unwrap();
    let mut rng = rand::thread_rng();

    for &length in &[10_usize, 100, 1_000, 10_000] {
        h.reset();
        for _ in 0..length {
            h.record(random_varied_magnitude(&mut rng)).unwrap();
        }
        assert_eq!(length as u64, h.count());

        for step in h.iter_percentiles(1_000) {
            assert_eq!(
                step.value_iterated_to(),
                h.value_at_percentile(step.percentile()),
                "length {} percentile {}",
                length,
                step.percentile()
            );
        }
    }
}

/// A random `u64` whose bit length is itself uniformly distributed. A plain random u64 is almost
/// always huge; this scatters values across the magnitudes.
fn random_varied_magnitude<R: Rng>(rng: &mut R) -> u64 {
    match rng.gen_range(0..=64_u32) {
        0 => 0,
        64 => u64::max_value(),
        bits => rng.gen_range(0..1_u64 << bits),
    }
}
