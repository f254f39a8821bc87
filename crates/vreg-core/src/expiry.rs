//! Document expiry classification
//!
//! The traffic-light rules used across the registry: a document more than
//! 30 days from expiry is green, within 30 days is yellow, and expired
//! (today or earlier) is red. A vehicle's overall status is the worst of
//! its document statuses. The backend applies the same rules server-side;
//! these functions exist so views can classify without a round trip.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of days below which a valid document counts as expiring soon
pub const EXPIRING_SOON_DAYS: i64 = 30;

/// Traffic-light status of an expiry-dated document.
///
/// Ordered by severity so that `max` picks the worst status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryStatus {
    Green,
    Yellow,
    Red,
}

impl ExpiryStatus {
    /// Human label shown next to the status
    pub fn label(&self) -> &'static str {
        match self {
            ExpiryStatus::Green => "Good",
            ExpiryStatus::Yellow => "Expiring Soon",
            ExpiryStatus::Red => "Expired",
        }
    }

    /// The more severe of two statuses
    pub fn worst(self, other: ExpiryStatus) -> ExpiryStatus {
        self.max(other)
    }
}

impl std::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Days from `on` until `expiry`, negative once past
pub fn days_remaining(expiry: NaiveDate, on: NaiveDate) -> i64 {
    (expiry - on).num_days()
}

/// Classify a document by its expiry date as of `on`.
///
/// Expiring on `on` itself already counts as red.
pub fn classify(expiry: NaiveDate, on: NaiveDate) -> ExpiryStatus {
    let days = days_remaining(expiry, on);
    if days > EXPIRING_SOON_DAYS {
        ExpiryStatus::Green
    } else if days >= 1 {
        ExpiryStatus::Yellow
    } else {
        ExpiryStatus::Red
    }
}

/// Worst status across any number of documents, green when empty
pub fn overall<I>(statuses: I) -> ExpiryStatus
where
    I: IntoIterator<Item = ExpiryStatus>,
{
    statuses
        .into_iter()
        .max()
        .unwrap_or(ExpiryStatus::Green)
}

/// Format a day count the way the dashboard does
pub fn format_days_remaining(days: i64) -> String {
    if days < 0 {
        format!("Expired {} days ago", -days)
    } else if days == 0 {
        "Expires today".to_string()
    } else if days == 1 {
        "1 day remaining".to_string()
    } else {
        format!("{} days remaining", days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_classify_boundaries() {
        let today = date(2025, 6, 1);

        // 31 days out is the first green day
        assert_eq!(classify(today + Duration::days(31), today), ExpiryStatus::Green);
        assert_eq!(classify(today + Duration::days(30), today), ExpiryStatus::Yellow);
        assert_eq!(classify(today + Duration::days(1), today), ExpiryStatus::Yellow);

        // Expiring today is already red
        assert_eq!(classify(today, today), ExpiryStatus::Red);
        assert_eq!(classify(today - Duration::days(1), today), ExpiryStatus::Red);
    }

    #[test]
    fn test_classify_typical_dates() {
        let today = date(2025, 6, 1);
        assert_eq!(classify(date(2025, 5, 31), today), ExpiryStatus::Red);
        assert_eq!(classify(date(2025, 6, 16), today), ExpiryStatus::Yellow);
        assert_eq!(classify(date(2025, 7, 16), today), ExpiryStatus::Green);
    }

    #[test]
    fn test_worst_picks_more_severe() {
        assert_eq!(
            ExpiryStatus::Green.worst(ExpiryStatus::Yellow),
            ExpiryStatus::Yellow
        );
        assert_eq!(
            ExpiryStatus::Yellow.worst(ExpiryStatus::Red),
            ExpiryStatus::Red
        );
        assert_eq!(
            ExpiryStatus::Green.worst(ExpiryStatus::Green),
            ExpiryStatus::Green
        );
    }

    #[test]
    fn test_overall_across_documents() {
        assert_eq!(
            overall([ExpiryStatus::Green, ExpiryStatus::Red, ExpiryStatus::Yellow]),
            ExpiryStatus::Red
        );
        assert_eq!(overall([]), ExpiryStatus::Green);
    }

    #[test]
    fn test_days_remaining_sign() {
        let today = date(2025, 6, 1);
        assert_eq!(days_remaining(date(2025, 6, 4), today), 3);
        assert_eq!(days_remaining(date(2025, 5, 29), today), -3);
        assert_eq!(days_remaining(today, today), 0);
    }

    #[test]
    fn test_format_days_remaining() {
        assert_eq!(format_days_remaining(-4), "Expired 4 days ago");
        assert_eq!(format_days_remaining(0), "Expires today");
        assert_eq!(format_days_remaining(1), "1 day remaining");
        assert_eq!(format_days_remaining(12), "12 days remaining");
    }

    #[test]
    fn test_status_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&ExpiryStatus::Yellow).unwrap(),
            "\"yellow\""
        );
        let parsed: ExpiryStatus = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(parsed, ExpiryStatus::Red);
    }
}
