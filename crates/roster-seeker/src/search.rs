//! Free-text search across several fields.
//!
//! A [`TextSearch`] splits its input into lower-cased terms. An item matches
//! when every term is found, as a case-insensitive substring, in at least one
//! of the searched fields. Terms may be satisfied by different fields.

use crate::value::Value;

/// Multi-term, multi-field substring search.
///
/// ```
/// use roster_seeker::{TextSearch, Value};
///
/// struct Contact {
///     name: String,
///     email: String,
/// }
///
/// fn accessor<'a>(c: &'a Contact, field: &&str) -> Value<'a> {
///     match *field {
///         "name" => Value::text(&c.name),
///         "email" => Value::text(&c.email),
///         _ => Value::None,
///     }
/// }
///
/// let contacts = vec![
///     Contact { name: "John Smith".into(), email: "js@gmail.com".into() },
///     Contact { name: "John Doe".into(), email: "jd@yahoo.com".into() },
/// ];
///
/// let search = TextSearch::new("john GMAIL", vec!["name", "email"]);
/// let found = search.filter(&contacts, accessor);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].name, "John Smith");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSearch<K> {
    terms: Vec<String>,
    fields: Vec<K>,
}

impl<K> TextSearch<K> {
    /// Builds a search from raw input text and the fields to look in.
    pub fn new(input: &str, fields: Vec<K>) -> Self {
        let terms = input
            .trim()
            .to_ascii_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        TextSearch { terms, fields }
    }

    /// The lower-cased search terms.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// The fields each term is checked against.
    pub fn fields(&self) -> &[K] {
        &self.fields
    }

    /// Returns `true` when the input held no terms, so every item matches.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Tests a single item.
    pub fn matches<T, F>(&self, item: &T, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &K) -> Value<'a>,
    {
        if self.terms.is_empty() {
            return true;
        }

        // Each field is lowered once per item, not once per term.
        let haystacks: Vec<String> = self
            .fields
            .iter()
            .filter_map(|field| match accessor(item, field) {
                Value::Text(s) => Some(s.to_ascii_lowercase()),
                Value::Number(n) => Some(n.to_f64().to_string()),
                _ => None,
            })
            .collect();

        self.terms
            .iter()
            .all(|term| haystacks.iter().any(|h| h.contains(term.as_str())))
    }

    /// Returns references to matching items in input order.
    pub fn filter<'a, T, F>(&self, items: &'a [T], accessor: F) -> Vec<&'a T>
    where
        for<'b> F: Fn(&'b T, &K) -> Value<'b>,
    {
        items
            .iter()
            .filter(|item| self.matches(*item, &accessor))
            .collect()
    }
}
