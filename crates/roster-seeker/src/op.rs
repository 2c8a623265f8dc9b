//! Clause operators.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::SeekerError;

/// How a clause compares a field against its operand.
///
/// `Eq` and `Ne` apply to every kind of value. The text operators apply to
/// text only, the range operators to numbers and timestamps, and `Before` /
/// `After` to timestamps only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal. Text equality ignores ASCII case.
    Eq,
    Ne,
    StartsWith,
    EndsWith,
    Contains,
    /// Matches a compiled regular expression.
    Regex,
    Gt,
    Gte,
    Lt,
    Lte,
    /// Strictly earlier than.
    Before,
    /// Strictly later than.
    After,
}

impl Op {
    /// Every operator, in declaration order.
    pub const ALL: [Op; 12] = [
        Op::Eq,
        Op::Ne,
        Op::StartsWith,
        Op::EndsWith,
        Op::Contains,
        Op::Regex,
        Op::Gt,
        Op::Gte,
        Op::Lt,
        Op::Lte,
        Op::Before,
        Op::After,
    ];

    /// Returns `true` if the operator applies to text.
    pub fn is_text_op(self) -> bool {
        matches!(self, Op::Eq | Op::Ne) || self.is_pattern()
    }

    /// Returns `true` if the operator applies to numbers.
    pub fn is_number_op(self) -> bool {
        self.admits_ordering() && !matches!(self, Op::Before | Op::After)
    }

    /// Returns `true` if the operator applies to timestamps.
    pub fn is_timestamp_op(self) -> bool {
        self.admits_ordering()
    }

    fn is_pattern(self) -> bool {
        matches!(
            self,
            Op::StartsWith | Op::EndsWith | Op::Contains | Op::Regex
        )
    }

    fn admits_ordering(self) -> bool {
        !self.is_pattern()
    }

    /// Decides the clause from `field.cmp(operand)`.
    ///
    /// Pattern operators never hold on an ordering.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        use Ordering::{Equal, Greater, Less};
        match (self, ordering) {
            (Op::Eq, Equal) | (Op::Ne, Less | Greater) => true,
            (Op::Gt | Op::After, Greater) | (Op::Lt | Op::Before, Less) => true,
            (Op::Gte, Equal | Greater) | (Op::Lte, Equal | Less) => true,
            _ => false,
        }
    }

    /// The lower-case name accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::StartsWith => "startswith",
            Op::EndsWith => "endswith",
            Op::Contains => "contains",
            Op::Regex => "regex",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::Before => "before",
            Op::After => "after",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Op {
    type Err = SeekerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Op::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SeekerError::UnknownOperator(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert!(Op::Contains.is_text_op());
        assert!(Op::Eq.is_text_op());
        assert!(!Op::Gt.is_text_op());

        assert!(Op::Gte.is_number_op());
        assert!(!Op::Before.is_number_op());
        assert!(!Op::Regex.is_number_op());

        assert!(Op::After.is_timestamp_op());
        assert!(Op::Ne.is_timestamp_op());
        assert!(!Op::EndsWith.is_timestamp_op());
    }

    #[test]
    fn orderings() {
        use Ordering::*;
        let table = [
            (Op::Eq, [false, true, false]),
            (Op::Ne, [true, false, true]),
            (Op::Gt, [false, false, true]),
            (Op::Gte, [false, true, true]),
            (Op::Lt, [true, false, false]),
            (Op::Lte, [true, true, false]),
            (Op::Before, [true, false, false]),
            (Op::After, [false, false, true]),
            (Op::Contains, [false, false, false]),
        ];
        for (op, expected) in table {
            let got = [Less, Equal, Greater].map(|o| op.eval_ordering(o));
            assert_eq!(got, expected, "{op}");
        }
    }

    #[test]
    fn names_parse_back() {
        for op in Op::ALL {
            assert_eq!(op.to_string().parse::<Op>().unwrap(), op);
        }
        assert_eq!("StartsWith".parse::<Op>().unwrap(), Op::StartsWith);
        assert!(matches!(
            "like".parse::<Op>(),
            Err(SeekerError::UnknownOperator(s)) if s == "like"
        ));
    }
}
