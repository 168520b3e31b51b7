//! Domain-specific assertion macros for arqlog harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! series and which position broke the expectation.

/// Assert the sequence numbers of a series, in order.
///
/// ```rust
/// assert_sns!(series, ["0", "1", "2"]);
/// ```
#[macro_export]
macro_rules! assert_sns {
    ($series:expr, [$($sn:expr),* $(,)?]) => {{
        let series: &[arqlog_core::LogEntry] = &$series;
        let actual: Vec<&str> = series.iter().map(|e| e.sn.as_str()).collect();
        let expected: Vec<&str> = vec![$($sn),*];
        pretty_assertions::assert_eq!(actual, expected, "sequence numbers differ");
    }};
}

/// Assert that a validation result is the given `Mismatch` variant pattern.
///
/// ```rust
/// assert_mismatch!(validate(&s, &c), Mismatch::LengthMismatch { .. });
/// ```
#[macro_export]
macro_rules! assert_mismatch {
    ($result:expr, $pattern:pat) => {{
        match $result {
            Err($pattern) => {}
            other => panic!(
                "assert_mismatch! failed:\n  expected: Err({})\n  actual:   {:?}",
                stringify!($pattern),
                other
            ),
        }
    }};
}

/// Assert two millisecond delays agree to within a nanosecond.
pub fn assert_delay_ms(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "delay mismatch:\n  expected: {expected} ms\n  actual:   {actual} ms"
    );
}
