//! CSV and JSON export of user records.
//!
//! Records are first flattened into [`ExportRecord`], which resolves derived
//! fields to concrete values, then serialized. Both formats share the same
//! column order.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};
use crate::model::User;

/// CSV output for an empty record set.
pub const NO_DATA: &str = "No data to export";

/// Column names in export order.
pub const COLUMNS: [&str; 8] = [
    "id",
    "firstName",
    "lastName",
    "fullName",
    "email",
    "city",
    "registeredDate",
    "daysSinceRegistered",
];

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// The name accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(RosterError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// One user with derived fields resolved, in export column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub city: Option<String>,
    /// `YYYY-MM-DD`, or the stored text when it does not parse.
    pub registered_date: String,
    pub days_since_registered: Option<i64>,
}

impl ExportRecord {
    /// Flattens `user`, evaluating time-dependent fields at `now`.
    pub fn from_user(user: &User, now: DateTime<Utc>) -> Self {
        let registered_date = match user.registered_at() {
            Some(at) => at.format("%Y-%m-%d").to_string(),
            None => user.registered_date.clone(),
        };

        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            full_name: user.full_name(),
            email: user.email.clone(),
            city: user.city.clone(),
            registered_date,
            days_since_registered: user.days_since_registered(now),
        }
    }
}

/// Top-level JSON export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub export_date: String,
    pub total_records: usize,
    pub data: Vec<ExportRecord>,
}

/// Lists what is wrong with a record's stored fields.
pub fn quality_issues(user: &User) -> Vec<&'static str> {
    let mut issues = Vec::new();
    if user.first_name.trim().is_empty() {
        issues.push("firstName");
    }
    if user.last_name.trim().is_empty() {
        issues.push("lastName");
    }
    let email_ok = user
        .email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        });
    if !email_ok {
        issues.push("email");
    }
    if user.city.as_deref().map_or(true, |c| c.trim().is_empty()) {
        issues.push("city");
    }
    if user.registered_at().is_none() {
        issues.push("registeredDate");
    }
    issues
}

/// Flattens users into export records, logging a warning for each record
/// with missing or malformed fields.
pub fn to_records(users: &[&User], now: DateTime<Utc>) -> Vec<ExportRecord> {
    users
        .iter()
        .map(|user| {
            let issues = quality_issues(user);
            if !issues.is_empty() {
                tracing::warn!(
                    id = user.id,
                    fields = ?issues,
                    "exporting record with missing or malformed fields"
                );
            }
            ExportRecord::from_user(user, now)
        })
        .collect()
}

/// Serializes `users` in the requested format.
pub fn export(users: &[&User], format: ExportFormat, now: DateTime<Utc>) -> Result<String> {
    let records = to_records(users, now);
    match format {
        ExportFormat::Json => to_json(records, now),
        ExportFormat::Csv => to_csv(&records),
    }
}

/// Pretty-printed JSON document with export timestamp and record count.
pub fn to_json(records: Vec<ExportRecord>, now: DateTime<Utc>) -> Result<String> {
    let document = ExportDocument {
        export_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        total_records: records.len(),
        data: records,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// CSV with a header row and `\n` line endings.
///
/// Fields holding a comma, quote or newline are quoted, with inner quotes
/// doubled. An empty input yields [`NO_DATA`].
pub fn to_csv(records: &[ExportRecord]) -> Result<String> {
    if records.is_empty() {
        return Ok(NO_DATA.to_string());
    }

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);

    for record in records {
        wtr.serialize(record)
            .map_err(|e| RosterError::Csv(e.to_string()))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| RosterError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| RosterError::Csv(e.to_string()))
}
