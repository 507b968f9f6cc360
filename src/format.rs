//! Display Formatting
//!
//! Small text helpers shared by the CLI tables and the browser screens.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::GeoPoint;

/// Emergency numbers shown beside the alert feed: (service, number)
pub const EMERGENCY_CONTACTS: [(&str, &str); 3] = [
    ("Emergency Services", "911"),
    ("Poison Control", "1-800-222-1222"),
    ("Mental Health Crisis", "988"),
];

/// Shown under every prediction result
pub const MEDICAL_DISCLAIMER: &str = "This prediction is for informational purposes only and is not a medical diagnosis. \
Always consult a qualified healthcare provider about your symptoms.";

/// Parse a backend timestamp: RFC 3339, naive ISO 8601 (assumed UTC) or a bare date
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Relative age label: "Just now", "N hours ago", "N days ago"
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - then).num_hours();

    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        plural(hours, "hour")
    } else {
        plural(hours / 24, "day")
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// [`time_ago`] for a raw timestamp; unparseable input is shown as-is
pub fn time_ago_str(value: Option<&str>, now: DateTime<Utc>) -> String {
    match value {
        Some(raw) => parse_timestamp(raw)
            .map(|then| time_ago(then, now))
            .unwrap_or_else(|| raw.to_string()),
        None => String::new(),
    }
}

/// Calendar date ("Jan 15, 2024") for a raw timestamp
pub fn short_date(value: Option<&str>) -> String {
    value
        .and_then(parse_timestamp)
        .map(|ts| ts.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// "1.2k" style count for badges
pub fn compact_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }

    // Round before choosing the suffix
    let thousands = (count as f64 / 100.0).round() / 10.0;
    if thousands < 1_000.0 {
        trim_decimal(thousands, "k")
    } else {
        trim_decimal(count as f64 / 1_000_000.0, "M")
    }
}

fn trim_decimal(value: f64, suffix: &str) -> String {
    let rendered = format!("{:.1}", value);
    let rendered = rendered.strip_suffix(".0").unwrap_or(&rendered);
    format!("{}{}", rendered, suffix)
}

/// Turn-by-turn directions link for a destination
pub fn directions_url(destination: GeoPoint) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        destination.latitude, destination.longitude
    )
}

/// `tel:` link with formatting characters stripped
pub fn tel_link(phone: &str) -> String {
    let digits: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{}", digits)
}

/// Distance label in miles
pub fn miles(distance: f64) -> String {
    format!("{:.1} miles away", distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_time_ago_bands() {
        assert_eq!(time_ago(now() - Duration::minutes(59), now()), "Just now");
        assert_eq!(time_ago(now() - Duration::hours(2), now()), "2 hours ago");
        assert_eq!(time_ago(now() - Duration::hours(23), now()), "23 hours ago");
        assert_eq!(time_ago(now() - Duration::hours(49), now()), "2 days ago");
        assert_eq!(time_ago(now() - Duration::minutes(61), now()), "1 hour ago");
        assert_eq!(time_ago(now() - Duration::hours(30), now()), "1 day ago");
    }

    #[test]
    fn test_future_timestamp_is_just_now() {
        assert_eq!(time_ago(now() + Duration::hours(3), now()), "Just now");
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-15T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15T10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15T10:00:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15 10:00:00"), Some(expected));
        assert!(parse_timestamp("2024-01-15").is_some());
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_time_ago_str_passthrough() {
        assert_eq!(time_ago_str(Some("2 hours ago"), now()), "2 hours ago");
        assert_eq!(time_ago_str(Some("2024-01-15T09:00:00"), now()), "3 hours ago");
        assert_eq!(time_ago_str(None, now()), "");
    }

    #[test]
    fn test_short_date() {
        assert_eq!(short_date(Some("2024-01-05T12:00:00")), "Jan 5, 2024");
        assert_eq!(short_date(None), "");
    }

    #[test]
    fn test_compact_count() {
        assert_eq!(compact_count(999), "999");
        assert_eq!(compact_count(1_000), "1k");
        assert_eq!(compact_count(1_240), "1.2k");
        assert_eq!(compact_count(3_400_000), "3.4M");
        assert_eq!(compact_count(999_949), "999.9k");
        assert_eq!(compact_count(999_950), "1M");
        assert_eq!(compact_count(999_999), "1M");
    }

    #[test]
    fn test_links() {
        assert_eq!(
            directions_url(GeoPoint::new(40.7648, -73.954)),
            "https://www.google.com/maps/dir/?api=1&destination=40.7648,-73.954"
        );
        assert_eq!(tel_link("+1-212-746-5454"), "tel:+12127465454");
        assert_eq!(tel_link("(212) 555 0100"), "tel:2125550100");
    }
}
