//! Roster - synthetic user records behind a sortable, searchable data service.
//!
//! A [`DataService`] generates a deterministic collection of [`User`]s once
//! and then answers read-only requests over it:
//!
//! - Sorting by any [`Field`], stored or derived, with cached full-collection
//!   orderings
//! - Multi-term search across several fields
//! - Structured queries through [`roster_seeker::Query`]
//! - CSV and JSON export, aggregate [`Stats`] and pagination
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use roster::{DataService, Dir, Field, FixedClock, ServiceConfig};
//!
//! let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
//! let service = DataService::with_clock(ServiceConfig::new().record_count(50), FixedClock(now))?;
//!
//! let newest = service.sort(Field::RegisteredDate, Dir::Desc, None);
//! assert_eq!(newest.len(), 50);
//!
//! let hits = service.search("gmail", None);
//! assert!(hits.iter().all(|u| u.email.contains("gmail")));
//!
//! let csv = service.export_data("csv", Some(&newest[..10]))?;
//! assert_eq!(csv.lines().count(), 11);
//! # Ok::<(), roster::RosterError>(())
//! ```
//!
//! Field names coming from outside are parsed, never trusted:
//!
//! ```rust
//! use roster::{Field, RosterError};
//!
//! assert_eq!("daysSinceRegistered".parse::<Field>().unwrap(), Field::DaysSinceRegistered);
//! assert!(matches!("age".parse::<Field>(), Err(RosterError::UnknownField(_))));
//! ```

mod cache;
mod clock;
mod config;
mod error;
mod export;
mod field;
mod generator;
mod model;
mod page;
mod service;
mod stats;

pub use cache::{SortCache, SortKey, DEFAULT_CAPACITY};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ServiceConfig, DEFAULT_RECORD_COUNT, DEFAULT_SEED};
pub use error::{Result, RosterError};
pub use export::{
    quality_issues, to_csv, to_json, to_records, ExportDocument, ExportFormat, ExportRecord,
    COLUMNS, NO_DATA,
};
pub use field::Field;
pub use generator::{default_window_start, Generator};
pub use model::User;
pub use page::{page_size_options, paginate, Page};
pub use service::DataService;
pub use stats::{CityCount, Stats, TOP_CITIES};

pub use roster_seeker::{Dir, OrderBy, Query};
