//! Value ordering and the stable sort built on it.
//!
//! Sorting never touches the input: [`sort_stable`] returns a new vector and
//! [`sort_positions`] returns the permutation, which callers can cache.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::SeekerError;
use crate::value::Value;

/// Sort direction.
///
/// Ascending puts missing values last, descending puts them first. Either
/// way, items whose keys tie keep their input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    #[default]
    Asc,
    Desc,
}

impl Dir {
    /// Orients a key comparison. Never applied to the position tie-break.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        if self == Dir::Desc {
            ordering.reverse()
        } else {
            ordering
        }
    }

    /// The lower-case name, `asc` or `desc`.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `asc`, `ascending`, `desc` and `descending` in any ASCII case.
impl FromStr for Dir {
    type Err = SeekerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") || s.eq_ignore_ascii_case("ascending") {
            Ok(Dir::Asc)
        } else if s.eq_ignore_ascii_case("desc") || s.eq_ignore_ascii_case("descending") {
            Ok(Dir::Desc)
        } else {
            Err(SeekerError::UnknownDirection(s.to_string()))
        }
    }
}

/// One sort key: a field and the direction to order it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy<K> {
    pub field: K,
    pub dir: Dir,
}

impl<K> OrderBy<K> {
    /// Creates a key on `field` in `dir`.
    pub fn new(field: K, dir: Dir) -> Self {
        OrderBy { field, dir }
    }

    /// Ascending on `field`.
    pub fn asc(field: K) -> Self {
        Self::new(field, Dir::Asc)
    }

    /// Descending on `field`.
    pub fn desc(field: K) -> Self {
        Self::new(field, Dir::Desc)
    }

    /// Compares two values of this key's field in this key's direction.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Ordering {
        self.dir.apply(compare_values(a, b))
    }
}

/// Total order over values.
///
/// - Text compares ASCII case-insensitively.
/// - Numbers compare numerically, NaN last.
/// - Timestamps compare chronologically.
/// - `None` sorts after every present value.
/// - Values of different kinds order by kind: number, timestamp, text.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::Text(a), Value::Text(b)) => compare_text(a, b),
        (Value::Number(a), Value::Number(b)) => a.total_cmp(*b),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        _ => a.kind_rank().cmp(&b.kind_rank()),
    }
}

/// ASCII case-insensitive comparison that does not allocate.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

/// Compares two key rows using a list of ordering clauses.
///
/// The first clause is the primary key, the second breaks its ties, and so
/// on. Returns `Equal` when every clause ties.
pub fn compare_rows<K>(a: &[Value<'_>], b: &[Value<'_>], orderings: &[OrderBy<K>]) -> Ordering {
    for (i, order_by) in orderings.iter().enumerate() {
        let ordering = order_by.compare(&a[i], &b[i]);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Returns the positions of `items` in sorted order.
///
/// Every sort key is extracted once per item. Items whose keys all tie keep
/// their input order in both directions.
pub fn sort_positions<'a, T, K, F>(
    items: &[&'a T],
    orderings: &[OrderBy<K>],
    accessor: F,
) -> Vec<usize>
where
    for<'b> F: Fn(&'b T, &K) -> Value<'b>,
{
    let mut keyed: Vec<(usize, Vec<Value<'a>>)> = items
        .iter()
        .enumerate()
        .map(|(pos, item)| {
            let keys = orderings
                .iter()
                .map(|o| accessor(*item, &o.field))
                .collect();
            (pos, keys)
        })
        .collect();

    keyed.sort_by(|(pa, ka), (pb, kb)| compare_rows(ka, kb, orderings).then(pa.cmp(pb)));
    keyed.into_iter().map(|(pos, _)| pos).collect()
}

/// Returns a new vector holding `items` in sorted order.
pub fn sort_stable<'a, T, K, F>(
    items: &[&'a T],
    orderings: &[OrderBy<K>],
    accessor: F,
) -> Vec<&'a T>
where
    for<'b> F: Fn(&'b T, &K) -> Value<'b>,
{
    if orderings.is_empty() {
        return items.to_vec();
    }
    sort_positions(items, orderings, accessor)
        .into_iter()
        .map(|pos| items[pos])
        .collect()
}
