//! Date and duration formatting helpers.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serenity::all::Timestamp;

use crate::server::error::internal::InternalError;

/// Formats an uptime as the largest non-zero units down to seconds.
///
/// # Examples
/// - 3 seconds → `"3 seconds"`
/// - 1 hour 2 minutes 3 seconds → `"1 hours, 2 minutes, 3 seconds"`
pub fn format_uptime(duration: chrono::Duration) -> String {
    let total = duration.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total / 3_600) % 24;
    let minutes = (total / 60) % 60;
    let seconds = total % 60;

    if days > 0 {
        format!(
            "{} days, {} hours, {} minutes, {} seconds",
            days, hours, minutes, seconds
        )
    } else if hours > 0 {
        format!("{} hours, {} minutes, {} seconds", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{} minutes, {} seconds", minutes, seconds)
    } else {
        format!("{} seconds", seconds)
    }
}

/// Returns the academic year a date belongs to.
///
/// Academic years run September to August and are named after the calendar year they
/// end in, so 1 September 2025 belongs to 2026.
pub fn academic_year(date: NaiveDate) -> i32 {
    if date.month() >= 9 {
        date.year() + 1
    } else {
        date.year()
    }
}

/// Converts a calendar date to a Unix timestamp at midnight UTC.
pub fn date_to_unix(date: NaiveDate) -> i64 {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
        .timestamp()
}

/// Converts a chrono timestamp into a Discord embed timestamp.
pub fn to_discord_timestamp(time: DateTime<Utc>) -> Result<Timestamp, InternalError> {
    Timestamp::from_unix_timestamp(time.timestamp()).map_err(|e| {
        InternalError::InvalidDiscordTimestamp {
            timestamp: time.timestamp(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_seconds_only() {
        assert_eq!(format_uptime(chrono::Duration::seconds(42)), "42 seconds");
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(
            format_uptime(chrono::Duration::seconds(125)),
            "2 minutes, 5 seconds"
        );
    }

    #[test]
    fn formats_hours_with_zero_minutes() {
        assert_eq!(
            format_uptime(chrono::Duration::seconds(3_601)),
            "1 hours, 0 minutes, 1 seconds"
        );
    }

    #[test]
    fn formats_days() {
        let duration = chrono::Duration::days(2) + chrono::Duration::seconds(3_723);
        assert_eq!(
            format_uptime(duration),
            "2 days, 1 hours, 2 minutes, 3 seconds"
        );
    }

    #[test]
    fn academic_year_rolls_over_in_september() {
        let august = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
        let september = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();

        assert_eq!(academic_year(august), 2025);
        assert_eq!(academic_year(september), 2026);
    }

    #[test]
    fn date_to_unix_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
        assert_eq!(date_to_unix(date), 86_400);
    }
}
