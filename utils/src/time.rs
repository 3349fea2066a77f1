//! Time formatting helpers.

/// Format a duration in seconds to a human-readable string.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// Relative age of an event, e.g. `"4m 10s ago"`.
pub fn format_age(event_secs: u64, now_secs: u64) -> String {
    format!("{} ago", format_duration(now_secs.saturating_sub(event_secs)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_unit() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(250), "4m 10s");
        assert_eq!(format_duration(7_260), "2h 1m");
        assert_eq!(format_duration(90_000), "1d 1h");
    }

    #[test]
    fn age_saturates_for_future_events() {
        assert_eq!(format_age(1_000, 1_600), "10m 0s ago");
        assert_eq!(format_age(2_000, 1_000), "0s ago");
    }
}
