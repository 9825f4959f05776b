//! Sexagesimal timecode parsing
//!
//! Accepts any number of colon-separated components, least significant
//! last: `SS.ss`, `MM:SS.ss`, `H:MM:SS.ss`. Each component is weighted by a
//! power of 60 and summed, so out-of-range fields such as `0:75` are
//! accepted and simply carry over.

/// Timecode used when a row has no timecode column at all
pub const DEFAULT_TIMECODE: &str = "0:00:00.00";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimecodeError {
    #[error("Invalid timecode component {component:?} in {input:?}")]
    InvalidComponent { input: String, component: String },

    #[error("Timecode {input:?} is not a finite offset")]
    NotFinite { input: String },

    #[error("Timecode {input:?} is negative")]
    Negative { input: String },
}

/// Parse a timecode into seconds
pub fn parse_timecode(input: &str) -> Result<f64, TimecodeError> {
    let mut total = 0.0;

    for (power, component) in input.split(':').rev().enumerate() {
        let value: f64 = component
            .trim()
            .parse()
            .map_err(|_| TimecodeError::InvalidComponent {
                input: input.to_string(),
                component: component.to_string(),
            })?;
        total += value * 60f64.powi(power as i32);
    }

    if !total.is_finite() {
        return Err(TimecodeError::NotFinite {
            input: input.to_string(),
        });
    }
    if total < 0.0 {
        return Err(TimecodeError::Negative {
            input: input.to_string(),
        });
    }

    Ok(total)
}

/// Parse a start/end pair, degrading both to zero if either is malformed
pub fn parse_window(start: &str, end: &str) -> (f64, f64) {
    match (parse_timecode(start), parse_timecode(end)) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("{}; using a zero-length window at 0", e);
            (0.0, 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0:00:00.00", 0.0)]
    #[case("00:02.50", 2.5)]
    #[case("1:02:03.5", 3723.5)]
    #[case("12.25", 12.25)]
    #[case("0:75", 75.0)]
    #[case(" 1 : 30 ", 90.0)]
    fn test_parse_valid(#[case] input: &str, #[case] expected: f64) {
        let secs = parse_timecode(input).unwrap();
        assert!((secs - expected).abs() < 1e-9, "{input} -> {secs}");
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("1::2")]
    #[case("1:2:")]
    #[case("nan")]
    #[case("inf")]
    #[case("-1:05")]
    fn test_parse_malformed(#[case] input: &str) {
        assert!(parse_timecode(input).is_err(), "{input:?} should be rejected");
    }

    #[test]
    fn test_default_timecode_is_zero() {
        assert_eq!(parse_timecode(DEFAULT_TIMECODE).unwrap(), 0.0);
    }

    #[test]
    fn test_window_degrades_both_on_bad_start() {
        assert_eq!(parse_window("garbage", "0:05.0"), (0.0, 0.0));
    }

    #[test]
    fn test_window_degrades_both_on_bad_end() {
        assert_eq!(parse_window("0:01.0", ""), (0.0, 0.0));
    }

    #[test]
    fn test_window_keeps_reversed_offsets() {
        assert_eq!(parse_window("0:05", "0:03"), (5.0, 3.0));
    }
}
