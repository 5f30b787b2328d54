use std::time::{SystemTime, UNIX_EPOCH};

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

/// Coarse "time since" text for an activity timestamp.
pub fn format_age(then: u64, now: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    const MONTH: u64 = 30 * DAY;

    let elapsed = now.saturating_sub(then);
    if elapsed < MINUTE {
        "just now".to_owned()
    } else if elapsed < HOUR {
        format!("{}m ago", elapsed / MINUTE)
    } else if elapsed < DAY {
        format!("{}h ago", elapsed / HOUR)
    } else if elapsed < MONTH {
        format!("{}d ago", elapsed / DAY)
    } else {
        format!("{}mo ago", elapsed / MONTH)
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_buckets() {
        assert_eq!(format_age(1_000, 1_030), "just now");
        assert_eq!(format_age(1_000, 1_000 + 5 * 60), "5m ago");
        assert_eq!(format_age(0, 3 * 3600 + 10), "3h ago");
        assert_eq!(format_age(0, 2 * 86_400), "2d ago");
        assert_eq!(format_age(0, 95 * 86_400), "3mo ago");
        assert_eq!(format_age(500, 100), "just now");
    }

    #[test]
    fn percent() {
        assert_eq!(format_percent(0.92), "92%");
        assert_eq!(format_percent(1.0), "100%");
    }
}
