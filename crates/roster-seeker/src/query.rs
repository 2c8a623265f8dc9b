//! Structured queries: clause groups, free-text search, ordering and a
//! result window.

use regex::Regex;

use crate::clause::{Clause, ClauseValue};
use crate::error::Result;
use crate::op::Op;
use crate::ordering::{sort_stable, Dir, OrderBy};
use crate::search::TextSearch;
use crate::value::Value;

/// The role a clause plays in deciding a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// Every `Require` clause must hold.
    Require,
    /// At least one `Either` clause must hold, when there are any.
    Either,
    /// No `Exclude` clause may hold.
    Exclude,
}

/// A reusable description of which items to keep and in what order.
///
/// An item matches when all of the following hold:
///
/// ```text
/// every Require clause
/// and (some Either clause, or no Either clauses)
/// and no Exclude clause
/// and the text search, if any
/// ```
///
/// Matches are then ordered (input order when no orderings are set), the
/// first `offset` are skipped and at most `limit` are kept.
///
/// ```
/// use roster_seeker::{Dir, Number, Query, Value};
///
/// struct Venue {
///     city: String,
///     seats: u64,
/// }
///
/// fn accessor<'a>(v: &'a Venue, field: &&str) -> Value<'a> {
///     match *field {
///         "city" => Value::text(&v.city),
///         "seats" => Value::Number(Number::U64(v.seats)),
///         _ => Value::None,
///     }
/// }
///
/// let venues = vec![
///     Venue { city: "Austin".into(), seats: 300 },
///     Venue { city: "Boston".into(), seats: 1200 },
///     Venue { city: "austin".into(), seats: 800 },
/// ];
///
/// let query = Query::new()
///     .and_eq("city", "AUSTIN")
///     .order_by("seats", Dir::Desc)
///     .build();
///
/// let seats: Vec<u64> = query.filter(&venues, accessor).iter().map(|v| v.seats).collect();
/// assert_eq!(seats, [800, 300]);
/// ```
#[derive(Debug, Clone)]
pub struct Query<K> {
    clauses: Vec<(Group, Clause<K>)>,
    search: Option<TextSearch<K>>,
    orderings: Vec<OrderBy<K>>,
    offset: usize,
    limit: Option<usize>,
}

impl<K> Default for Query<K> {
    fn default() -> Self {
        Query {
            clauses: Vec::new(),
            search: None,
            orderings: Vec::new(),
            offset: 0,
            limit: None,
        }
    }
}

impl<K> Query<K> {
    /// An empty query: matches everything, keeps input order.
    pub fn new() -> Self {
        Query::default()
    }

    /// Adds a clause to `group`.
    pub fn clause(mut self, group: Group, field: K, op: Op, value: impl Into<ClauseValue>) -> Self {
        self.clauses.push((group, Clause::new(field, op, value)));
        self
    }

    /// Adds a clause every match must satisfy.
    pub fn and(self, field: K, op: Op, value: impl Into<ClauseValue>) -> Self {
        self.clause(Group::Require, field, op, value)
    }

    /// Adds a clause to the alternatives, one of which must hold.
    pub fn or(self, field: K, op: Op, value: impl Into<ClauseValue>) -> Self {
        self.clause(Group::Either, field, op, value)
    }

    /// Adds a clause no match may satisfy.
    pub fn not(self, field: K, op: Op, value: impl Into<ClauseValue>) -> Self {
        self.clause(Group::Exclude, field, op, value)
    }

    /// Requires `field` to equal `value`.
    pub fn and_eq(self, field: K, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Eq, value)
    }

    /// Requires `field` to contain `needle`, ignoring case.
    pub fn and_contains(self, field: K, needle: &str) -> Self {
        self.and(field, Op::Contains, needle)
    }

    /// Requires `field` to match `pattern`; fails if the pattern does not
    /// compile.
    pub fn and_regex(self, field: K, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        Ok(self.and(field, Op::Regex, regex))
    }

    /// Accepts items whose `field` equals `value`.
    pub fn or_eq(self, field: K, value: impl Into<ClauseValue>) -> Self {
        self.or(field, Op::Eq, value)
    }

    /// Rejects items whose `field` equals `value`.
    pub fn not_eq(self, field: K, value: impl Into<ClauseValue>) -> Self {
        self.not(field, Op::Eq, value)
    }

    /// Rejects items whose `field` contains `needle`.
    pub fn not_contains(self, field: K, needle: &str) -> Self {
        self.not(field, Op::Contains, needle)
    }

    /// Keeps only items where every term of `input` appears in one of
    /// `fields`.
    pub fn search(mut self, input: &str, fields: Vec<K>) -> Self {
        self.search = Some(TextSearch::new(input, fields));
        self
    }

    /// Appends a sort key; earlier keys take precedence.
    pub fn order_by(mut self, field: K, dir: Dir) -> Self {
        self.orderings.push(OrderBy::new(field, dir));
        self
    }

    /// Appends an ascending sort key.
    pub fn order_asc(self, field: K) -> Self {
        self.order_by(field, Dir::Asc)
    }

    /// Appends a descending sort key.
    pub fn order_desc(self, field: K) -> Self {
        self.order_by(field, Dir::Desc)
    }

    /// Skips the first `n` ordered matches.
    pub fn offset(mut self, n: usize) -> Self {
        self.offset = n;
        self
    }

    /// Keeps at most `n` matches.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Finishes the builder chain.
    pub fn build(self) -> Self {
        self
    }

    /// Clauses in `group`, in the order they were added.
    pub fn clauses(&self, group: Group) -> impl Iterator<Item = &Clause<K>> {
        self.clauses
            .iter()
            .filter(move |(g, _)| *g == group)
            .map(|(_, clause)| clause)
    }

    /// The free-text search, if one was set.
    pub fn text_search(&self) -> Option<&TextSearch<K>> {
        self.search.as_ref()
    }

    /// Sort keys in precedence order.
    pub fn orderings(&self) -> &[OrderBy<K>] {
        &self.orderings
    }

    /// The `(offset, limit)` applied after ordering.
    pub fn window(&self) -> (usize, Option<usize>) {
        (self.offset, self.limit)
    }

    /// Returns `true` when no clause or search term narrows the result.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty() && self.search.as_ref().map_or(true, TextSearch::is_empty)
    }

    /// Decides whether one item matches, ignoring ordering and window.
    pub fn matches<T, F>(&self, item: &T, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &K) -> Value<'a>,
    {
        let mut either: Option<bool> = None;
        for (group, clause) in &self.clauses {
            let hit = clause.matches(&accessor(item, &clause.field));
            match group {
                Group::Require if !hit => return false,
                Group::Exclude if hit => return false,
                Group::Either => either = Some(either.unwrap_or(false) || hit),
                _ => {}
            }
        }
        if either == Some(false) {
            return false;
        }

        self.search
            .as_ref()
            .map_or(true, |search| search.matches(item, &accessor))
    }

    /// Matching items, ordered and windowed.
    pub fn filter<'a, T, F>(&self, items: &'a [T], accessor: F) -> Vec<&'a T>
    where
        for<'b> F: Fn(&'b T, &K) -> Value<'b>,
    {
        let matching: Vec<&'a T> = items
            .iter()
            .filter(|item| self.matches(*item, &accessor))
            .collect();

        sort_stable(&matching, &self.orderings, &accessor)
            .into_iter()
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }

    /// Number of matching items; ordering and window do not apply.
    pub fn count<T, F>(&self, items: &[T], accessor: F) -> usize
    where
        for<'a> F: Fn(&'a T, &K) -> Value<'a>,
    {
        items
            .iter()
            .filter(|item| self.matches(*item, &accessor))
            .count()
    }

    /// Returns `true` if any item matches.
    pub fn any<T, F>(&self, items: &[T], accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &K) -> Value<'a>,
    {
        items.iter().any(|item| self.matches(item, &accessor))
    }

    /// First matching item in input order.
    pub fn find<'a, T, F>(&self, items: &'a [T], accessor: F) -> Option<&'a T>
    where
        for<'b> F: Fn(&'b T, &K) -> Value<'b>,
    {
        items.iter().find(|item| self.matches(*item, &accessor))
    }
}
