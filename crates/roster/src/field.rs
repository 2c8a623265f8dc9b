//! The closed set of user fields and the accessor over them.
//!
//! Sorting, searching and filtering name fields through [`Field`]. Names
//! coming from the presentation layer are parsed with [`str::parse`], which
//! rejects anything outside the set instead of yielding an empty value.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use roster_seeker::{Number, Timestamp, Value};

use crate::error::RosterError;
use crate::model::User;

/// A stored or derived user field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Id,
    FirstName,
    LastName,
    FullName,
    Email,
    EmailDomain,
    City,
    RegisteredDate,
    DaysSinceRegistered,
    RegistrationYear,
}

impl Field {
    /// Every field, in table column order.
    pub const ALL: [Field; 10] = [
        Field::Id,
        Field::FirstName,
        Field::LastName,
        Field::FullName,
        Field::Email,
        Field::EmailDomain,
        Field::City,
        Field::RegisteredDate,
        Field::DaysSinceRegistered,
        Field::RegistrationYear,
    ];

    /// Fields searched when the caller does not name any.
    pub const SEARCH_DEFAULT: [Field; 5] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::City,
        Field::FullName,
    ];

    /// The camelCase name used at the presentation boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::EmailDomain => "emailDomain",
            Field::City => "city",
            Field::RegisteredDate => "registeredDate",
            Field::DaysSinceRegistered => "daysSinceRegistered",
            Field::RegistrationYear => "registrationYear",
        }
    }

    /// Returns `true` for fields computed from other fields.
    pub fn is_derived(self) -> bool {
        matches!(
            self,
            Field::FullName
                | Field::EmailDomain
                | Field::DaysSinceRegistered
                | Field::RegistrationYear
        )
    }

    /// Returns `true` for fields whose value changes as time passes.
    pub fn depends_on_clock(self) -> bool {
        matches!(self, Field::DaysSinceRegistered)
    }

    /// Reads this field from `user`, evaluating time-dependent fields at `now`.
    pub fn value(self, user: &User, now: DateTime<Utc>) -> Value<'_> {
        match self {
            Field::Id => Value::Number(Number::U64(user.id)),
            Field::FirstName => Value::text(&user.first_name),
            Field::LastName => Value::text(&user.last_name),
            Field::FullName => Value::owned(user.full_name()),
            Field::Email => Value::text(&user.email),
            Field::EmailDomain => Value::opt_text(user.email_domain()),
            Field::City => Value::opt_text(user.city.as_deref()),
            Field::RegisteredDate => user
                .registered_at()
                .map_or(Value::None, |at| {
                    Value::Timestamp(Timestamp::from_millis(at.timestamp_millis()))
                }),
            Field::DaysSinceRegistered => Value::from(user.days_since_registered(now)),
            Field::RegistrationYear => Value::from(user.registration_year().map(i64::from)),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| RosterError::UnknownField(s.to_string()))
    }
}
