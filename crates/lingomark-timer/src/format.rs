//! Countdown display formatting.

/// Render remaining seconds as `H:MM:SS` from one hour up, `M:SS` below.
pub fn format_remaining(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_below_an_hour() {
        assert_eq!(format_remaining(0), "0:00");
        assert_eq!(format_remaining(7), "0:07");
        assert_eq!(format_remaining(65), "1:05");
        assert_eq!(format_remaining(300), "5:00");
        assert_eq!(format_remaining(3599), "59:59");
    }

    #[test]
    fn formats_hours() {
        assert_eq!(format_remaining(3600), "1:00:00");
        assert_eq!(format_remaining(3661), "1:01:01");
        assert_eq!(format_remaining(36_000 + 59), "10:00:59");
    }
}
