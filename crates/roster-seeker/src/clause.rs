//! Single-field predicates.

use std::cmp::Ordering;

use regex::Regex;

use crate::op::Op;
use crate::value::{Number, Timestamp, Value};

/// `field op value`, evaluated against whatever the accessor yields for
/// `field`.
///
/// ```
/// use roster_seeker::{Clause, Op, Value};
///
/// let clause = Clause::new("city", Op::Contains, "lake");
/// assert!(clause.matches(&Value::text("Salt Lake City")));
/// assert!(!clause.matches(&Value::None));
/// ```
#[derive(Debug, Clone)]
pub struct Clause<K> {
    pub field: K,
    pub op: Op,
    pub value: ClauseValue,
}

impl<K> Clause<K> {
    /// Creates a clause on `field`.
    pub fn new(field: K, op: Op, value: impl Into<ClauseValue>) -> Self {
        Clause {
            field,
            op,
            value: value.into(),
        }
    }

    /// Tests the clause against one field value.
    ///
    /// A missing value, or a value of a different kind than the operand,
    /// never matches; not even under `Ne`.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match (field_value, &self.value) {
            (Value::Text(text), ClauseValue::Text(operand)) => text_holds(self.op, text, operand),
            (Value::Text(text), ClauseValue::Regex(re)) => self.op == Op::Regex && re.is_match(text),
            (Value::Number(n), ClauseValue::Number(operand)) => {
                self.op.is_number_op() && ordering_holds(self.op, n.compare(*operand))
            }
            (Value::Timestamp(ts), ClauseValue::Timestamp(operand)) => {
                self.op.is_timestamp_op() && ordering_holds(self.op, Some(ts.cmp(operand)))
            }
            _ => false,
        }
    }
}

fn ordering_holds(op: Op, ordering: Option<Ordering>) -> bool {
    ordering.is_some_and(|o| op.eval_ordering(o))
}

fn text_holds(op: Op, text: &str, operand: &str) -> bool {
    let text = text.to_ascii_lowercase();
    let operand = operand.to_ascii_lowercase();
    match op {
        Op::Eq => text == operand,
        Op::Ne => text != operand,
        Op::StartsWith => text.starts_with(&operand),
        Op::EndsWith => text.ends_with(&operand),
        Op::Contains => text.contains(&operand),
        _ => false,
    }
}

/// The operand side of a clause. Owns its data so queries can outlive the
/// items they run over.
#[derive(Debug, Clone)]
pub enum ClauseValue {
    Text(String),
    Number(Number),
    Timestamp(Timestamp),
    Regex(Regex),
}

macro_rules! clause_value_from {
    ($($ty:ty => |$v:ident| $body:expr;)*) => {
        $(
            impl From<$ty> for ClauseValue {
                fn from($v: $ty) -> Self {
                    $body
                }
            }
        )*
    };
}

clause_value_from! {
    String => |s| ClauseValue::Text(s);
    &str => |s| ClauseValue::Text(s.to_string());
    Number => |n| ClauseValue::Number(n);
    Timestamp => |t| ClauseValue::Timestamp(t);
    Regex => |r| ClauseValue::Regex(r);
    i64 => |n| ClauseValue::Number(Number::I64(n));
    i32 => |n| ClauseValue::Number(Number::I64(i64::from(n)));
    u64 => |n| ClauseValue::Number(Number::U64(n));
    f64 => |n| ClauseValue::Number(Number::F64(n));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_ignores_case() {
        let city = Value::text("Portland");
        assert!(Clause::new("city", Op::Eq, "portland").matches(&city));
        assert!(Clause::new("city", Op::StartsWith, "PORT").matches(&city));
        assert!(Clause::new("city", Op::EndsWith, "LAND").matches(&city));
        assert!(Clause::new("city", Op::Contains, "tla").matches(&city));
        assert!(!Clause::new("city", Op::Ne, "PORTLAND").matches(&city));
        assert!(!Clause::new("city", Op::Gt, "a").matches(&city));
    }

    #[test]
    fn numbers_compare_across_representations() {
        let year = Value::Number(Number::U64(2021));
        assert!(Clause::new("year", Op::Gte, 2021i64).matches(&year));
        assert!(Clause::new("year", Op::Lt, 2021.5).matches(&year));
        assert!(!Clause::new("year", Op::Contains, 2021i64).matches(&year));
        assert!(!Clause::new("year", Op::Eq, f64::NAN).matches(&year));
    }

    #[test]
    fn timestamps() {
        let at = Value::Timestamp(Timestamp(1_000));
        assert!(Clause::new("at", Op::Before, Timestamp(2_000)).matches(&at));
        assert!(Clause::new("at", Op::After, Timestamp(500)).matches(&at));
        assert!(!Clause::new("at", Op::After, Timestamp(1_000)).matches(&at));
        assert!(Clause::new("at", Op::Lte, Timestamp(1_000)).matches(&at));
    }

    #[test]
    fn regex_only_under_regex_op() {
        let re = Regex::new(r"^[a-z.]+@proton\.me$").unwrap();
        let email = Value::text("grace.h@proton.me");
        assert!(Clause::new("email", Op::Regex, re.clone()).matches(&email));
        assert!(!Clause::new("email", Op::Contains, re).matches(&email));
    }

    #[test]
    fn missing_and_mismatched_values() {
        let clause = Clause::new("city", Op::Ne, "x");
        assert!(!clause.matches(&Value::None));
        assert!(!clause.matches(&Value::Number(Number::I64(1))));
    }
}
