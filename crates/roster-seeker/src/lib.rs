//! Seeker - ordering, filtering and term search over in-memory collections.
//!
//! Seeker works on plain slices of structs. Callers hand it an accessor
//! function that maps a field key to a [`Value`]; the key type is generic, so
//! a domain crate can use a closed enum of its fields instead of strings.
//!
//! - Null-aware, type-aware total ordering with stable tie-breaking
//! - Case-insensitive text comparison and matching
//! - Clause groups: AND, OR, NOT with fixed combination semantics
//! - Multi-term free-text search across several fields
//! - Pagination with limit and offset
//!
//! # Quick Start
//!
//! ```rust
//! use roster_seeker::{sort_stable, Dir, Number, OrderBy, Query, Value};
//!
//! #[derive(Clone, Copy, PartialEq)]
//! enum Col {
//!     Name,
//!     Score,
//! }
//!
//! struct Row {
//!     name: String,
//!     score: Option<i64>,
//! }
//!
//! fn accessor<'a>(row: &'a Row, col: &Col) -> Value<'a> {
//!     match col {
//!         Col::Name => Value::text(&row.name),
//!         Col::Score => Value::from(row.score),
//!     }
//! }
//!
//! let rows = vec![
//!     Row { name: "b".into(), score: Some(2) },
//!     Row { name: "a".into(), score: None },
//!     Row { name: "c".into(), score: Some(1) },
//! ];
//!
//! let refs: Vec<&Row> = rows.iter().collect();
//! let sorted = sort_stable(&refs, &[OrderBy::asc(Col::Score)], accessor);
//! let names: Vec<&str> = sorted.iter().map(|r| r.name.as_str()).collect();
//! assert_eq!(names, ["c", "b", "a"]);
//!
//! let query = Query::new().search("B", vec![Col::Name]).build();
//! assert_eq!(query.count(&rows, accessor), 1);
//! ```
//!
//! # Ordering Semantics
//!
//! | Kind | Order |
//! |------|-------|
//! | Text | ASCII case-insensitive |
//! | Number | numeric, NaN last |
//! | Timestamp | chronological |
//! | None | after everything (ascending) |
//!
//! Descending order reverses the key comparison only; items with equal keys
//! always keep their input order.

mod clause;
mod error;
mod op;
mod ordering;
mod query;
mod search;
mod value;

pub use clause::{Clause, ClauseValue};
pub use error::{Result, SeekerError};
pub use op::Op;
pub use ordering::{
    compare_rows, compare_text, compare_values, sort_positions, sort_stable, Dir, OrderBy,
};
pub use query::{Group, Query};
pub use search::TextSearch;
pub use value::{Number, Timestamp, Value};
