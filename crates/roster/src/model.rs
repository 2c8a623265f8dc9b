//! The user record and its derived fields.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Seconds in one day, used for whole-day differences.
const SECS_PER_DAY: i64 = 86_400;

/// One synthetic user.
///
/// Only the stored attributes live on the struct. `full_name`,
/// `email_domain`, `days_since_registered` and `registration_year` are
/// computed on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Sequential identifier, starting at 1.
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// City of residence; absent when unknown.
    pub city: Option<String>,
    /// RFC 3339 timestamp, e.g. `2021-05-03T10:11:12.345Z`.
    pub registered_date: String,
}

impl User {
    /// Creates a user from its stored fields.
    pub fn new(
        id: u64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        city: Option<String>,
        registered_date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            city,
            registered_date: registered_date.into(),
        }
    }

    /// First and last name joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The part of the email after `@`, if there is one.
    pub fn email_domain(&self) -> Option<&str> {
        self.email.split_once('@').map(|(_, domain)| domain)
    }

    /// Parsed registration instant; `None` when the stored text is not RFC 3339.
    pub fn registered_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.registered_date)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Whole days between registration and `now`, in either direction.
    pub fn days_since_registered(&self, now: DateTime<Utc>) -> Option<i64> {
        self.registered_at()
            .map(|at| (now - at).num_seconds().abs() / SECS_PER_DAY)
    }

    /// Calendar year of registration.
    pub fn registration_year(&self) -> Option<i32> {
        self.registered_at().map(|at| at.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> User {
        User::new(
            7,
            "Ada",
            "Lovelace",
            "ada.lovelace@example.com",
            Some("London".to_string()),
            "2021-03-01T06:00:00.000Z",
        )
    }

    #[test]
    fn full_name_joins_with_single_space() {
        assert_eq!(sample().full_name(), "Ada Lovelace");
    }

    #[test]
    fn full_name_tracks_field_changes() {
        let mut user = sample();
        user.last_name = "King".to_string();
        assert_eq!(user.full_name(), "Ada King");
    }

    #[test]
    fn email_domain_after_at() {
        assert_eq!(sample().email_domain(), Some("example.com"));
        let mut user = sample();
        user.email = "no-at-sign".to_string();
        assert_eq!(user.email_domain(), None);
    }

    #[test]
    fn days_since_registered_floors() {
        let user = sample();
        let now = Utc.with_ymd_and_hms(2021, 3, 11, 5, 59, 59).unwrap();
        assert_eq!(user.days_since_registered(now), Some(9));
        let now = Utc.with_ymd_and_hms(2021, 3, 11, 6, 0, 0).unwrap();
        assert_eq!(user.days_since_registered(now), Some(10));
    }

    #[test]
    fn days_since_registered_uses_absolute_difference() {
        let user = sample();
        let before = Utc.with_ymd_and_hms(2021, 2, 27, 6, 0, 0).unwrap();
        assert_eq!(user.days_since_registered(before), Some(2));
    }

    #[test]
    fn registration_year_and_unparseable_date() {
        assert_eq!(sample().registration_year(), Some(2021));

        let mut user = sample();
        user.registered_date = "last tuesday".to_string();
        assert_eq!(user.registered_at(), None);
        assert_eq!(user.registration_year(), None);
        assert_eq!(user.days_since_registered(Utc::now()), None);
    }

    #[test]
    fn serde_uses_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["registeredDate"], "2021-03-01T06:00:00.000Z");
        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }
}
