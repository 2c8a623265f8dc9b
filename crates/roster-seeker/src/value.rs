//! What an accessor hands back for one field of one item.
//!
//! Stored text is borrowed from the item; text computed on the fly (a joined
//! name, a formatted date) is owned, which is why [`Value::Text`] wraps a
//! [`Cow`].

use std::borrow::Cow;
use std::cmp::Ordering;

/// A field value as seen by ordering, clauses and search.
///
/// ```
/// use roster_seeker::{Number, Value};
///
/// struct Person {
///     first: String,
///     last: String,
///     age: Option<i64>,
/// }
///
/// fn accessor<'a>(p: &'a Person, field: &&str) -> Value<'a> {
///     match *field {
///         "first" => Value::text(&p.first),
///         "name" => Value::owned(format!("{} {}", p.first, p.last)),
///         "age" => Value::from(p.age),
///         _ => Value::None,
///     }
/// }
///
/// let p = Person { first: "Ada".into(), last: "Lovelace".into(), age: None };
/// assert_eq!(accessor(&p, &"name").as_str(), Some("Ada Lovelace"));
/// assert!(accessor(&p, &"age").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Text(Cow<'a, str>),
    Number(Number),
    Timestamp(Timestamp),
    /// Absent, null or unparseable.
    None,
}

impl<'a> Value<'a> {
    /// Borrowed text.
    pub fn text(s: &'a str) -> Self {
        Value::Text(Cow::Borrowed(s))
    }

    /// Text computed for this read.
    pub fn owned(s: String) -> Self {
        Value::Text(Cow::Owned(s))
    }

    /// `None` becomes [`Value::None`].
    pub fn opt_text(s: Option<&'a str>) -> Self {
        s.map_or(Value::None, Value::text)
    }

    /// Returns `true` if the value is missing.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` if this is a timestamp.
    pub fn is_timestamp(&self) -> bool {
        matches!(self, Value::Timestamp(_))
    }

    /// The text, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Where this kind sits when values of different kinds are ordered:
    /// numbers, then timestamps, then text, then missing values.
    pub(crate) fn kind_rank(&self) -> u8 {
        match self {
            Value::Number(_) => 0,
            Value::Timestamp(_) => 1,
            Value::Text(_) => 2,
            Value::None => 3,
        }
    }
}

impl From<Option<i64>> for Value<'_> {
    fn from(n: Option<i64>) -> Self {
        n.map_or(Value::None, |n| Value::Number(Number::I64(n)))
    }
}

/// A number in whichever representation the field stores.
///
/// Values of different representations compare through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    /// Converts to `f64`, losing precision past 2^53.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Numeric comparison; `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (a, b) => a.to_f64().partial_cmp(&b.to_f64()),
        }
    }

    /// Like [`compare`](Self::compare), with NaN after every number.
    pub fn total_cmp(self, other: Number) -> Ordering {
        self.compare(other)
            .unwrap_or_else(|| self.to_f64().is_nan().cmp(&other.to_f64().is_nan()))
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

macro_rules! number_from {
    ($($ty:ty => $variant:ident as $repr:ty),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(<$repr>::from(n))
                }
            }
        )*
    };
}

number_from! {
    i32 => I64 as i64,
    i64 => I64 as i64,
    u32 => U64 as u64,
    u64 => U64 as u64,
    f64 => F64 as f64,
}

/// Milliseconds since the Unix epoch, UTC.
///
/// ```
/// use roster_seeker::Timestamp;
///
/// assert!(Timestamp(1_000) < Timestamp::from_millis(2_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a timestamp from epoch milliseconds.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Returns the epoch milliseconds.
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrowed_and_owned_text_are_equal() {
        assert_eq!(Value::text("abc"), Value::owned("abc".to_string()));
    }

    #[test]
    fn missing_values() {
        assert!(Value::opt_text(None).is_none());
        assert!(Value::from(None::<i64>).is_none());
        assert_eq!(Value::opt_text(Some("x")).as_str(), Some("x"));
        assert_eq!(Value::from(Some(3i64)), Value::Number(Number::I64(3)));
    }

    #[test]
    fn kind_ranks() {
        let ranks = [
            Value::Number(Number::I64(9)),
            Value::Timestamp(Timestamp(0)),
            Value::text("a"),
            Value::None,
        ]
        .map(|v| v.kind_rank());
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn mixed_representations() {
        assert_eq!(Number::I64(5).compare(Number::U64(10)), Some(Ordering::Less));
        assert_eq!(Number::I64(5).compare(Number::F64(5.0)), Some(Ordering::Equal));
        assert_eq!(Number::from(7u32).compare(Number::from(6i32)), Some(Ordering::Greater));
    }

    #[test]
    fn nan_after_numbers() {
        let nan = Number::F64(f64::NAN);
        assert_eq!(nan.compare(Number::F64(1.0)), None);
        assert_eq!(nan.total_cmp(Number::I64(1)), Ordering::Greater);
        assert_eq!(Number::U64(1).total_cmp(nan), Ordering::Less);
        assert_eq!(nan.total_cmp(nan), Ordering::Equal);
    }

    #[test]
    fn timestamp_millis() {
        assert_eq!(Timestamp::from_millis(5_000).as_millis(), 5_000);
    }
}
