//! Time label formatting

/// Format remaining seconds as `MM:SS`.
///
/// Minutes are not rolled over into hours, so an hour and a half shows as
/// `90:00` and anything past 99 minutes widens the minutes field.
pub fn format_remaining(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_common_values() {
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(80), "01:20");
        assert_eq!(format_remaining(599), "09:59");
        assert_eq!(format_remaining(3600), "60:00");
        assert_eq!(format_remaining(6001), "100:01");
    }

    proptest! {
        #[test]
        fn minutes_and_seconds_recombine(s in any::<u64>()) {
            let text = format_remaining(s);
            let (mins, secs) = text.split_once(':').unwrap();
            prop_assert!(mins.len() >= 2);
            prop_assert_eq!(secs.len(), 2);
            let mins: u64 = mins.parse().unwrap();
            let secs: u64 = secs.parse().unwrap();
            prop_assert!(secs < 60);
            prop_assert_eq!(mins, s / 60);
            prop_assert_eq!(secs, s % 60);
        }
    }
}
