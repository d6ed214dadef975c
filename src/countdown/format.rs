//! Rendering of the remaining time

/// Text written into every display once a countdown has finished
pub const STOP_TEXT: &str = "Stop";

/// Render remaining seconds as `eta M:SS`
///
/// Minutes are not padded and grow past 59; seconds always take two digits.
pub fn format_eta(remaining_seconds: u64) -> String {
    let minutes = remaining_seconds / 60;
    let seconds = remaining_seconds - minutes * 60;
    format!("eta {}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_eta(0), "eta 0:00");
    }

    #[test]
    fn pads_single_digit_seconds() {
        assert_eq!(format_eta(9), "eta 0:09");
        assert_eq!(format_eta(65), "eta 1:05");
    }

    #[test]
    fn formats_whole_minutes() {
        assert_eq!(format_eta(60), "eta 1:00");
        assert_eq!(format_eta(119), "eta 1:59");
    }

    #[test]
    fn minutes_are_not_wrapped_into_hours() {
        assert_eq!(format_eta(90 * 60 + 7), "eta 90:07");
    }

    proptest! {
        #[test]
        fn seconds_component_is_two_digits_in_range(s in 0u64..10_000_000) {
            let rendered = format_eta(s);
            let (_, secs) = rendered.rsplit_once(':').unwrap();
            prop_assert_eq!(secs.len(), 2);
            let value: u64 = secs.parse().unwrap();
            prop_assert!(value <= 59);
        }

        #[test]
        fn fresh_reset_renders_whole_minutes(m in 0u64..10_000) {
            prop_assert_eq!(format_eta(m * 60), format!("eta {}:00", m));
        }
    }
}
