//! Comparison operators for filter clauses.
//!
//! The [`Op`] enum defines every operator a selection entry may name,
//! organized by the property kinds they apply to. Operators travel through
//! shareable links as their display strings (`"does not contain"`, `"<="`),
//! so [`Op::as_str`] and [`FromStr`] are inverses.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::SeekerError;

/// Comparison operator for a filter clause.
///
/// Operators are grouped by the property kinds that offer them:
/// - **Text**: `Contains`, `NotContains`, `StartsWith`, `EndsWith`, `Matches`
/// - **Numeric**: `Eq`, `Ne`, `Lt`, `Lte`, `Gt`, `Gte`
/// - **Enumerated**: `Contains`, `NotEmpty`, `Empty`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    // Text operators
    /// Substring (text) or membership (enumerated).
    Contains,
    /// Negated substring.
    NotContains,
    /// Prefix match.
    StartsWith,
    /// Suffix match.
    EndsWith,
    /// Case-insensitive regular expression.
    Matches,

    // Numeric comparison operators
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,

    // Enumerated presence operators
    /// Label list present and non-empty.
    NotEmpty,
    /// Label list absent or empty.
    Empty,
}

impl Op {
    /// Operators offered by text properties, in display order.
    pub const TEXT: &'static [Op] = &[
        Op::Contains,
        Op::NotContains,
        Op::StartsWith,
        Op::EndsWith,
        Op::Matches,
    ];

    /// Operators offered by numeric properties, in display order.
    pub const NUMERIC: &'static [Op] = &[Op::Eq, Op::Ne, Op::Lt, Op::Lte, Op::Gt, Op::Gte];

    /// Operators offered by enumerated properties, in display order.
    pub const ENUMERATED: &'static [Op] = &[Op::Contains, Op::NotEmpty, Op::Empty];

    /// Returns `true` if this operator is valid for text properties.
    pub fn is_text_op(self) -> bool {
        Op::TEXT.contains(&self)
    }

    /// Returns `true` if this operator is valid for numeric properties.
    pub fn is_numeric_op(self) -> bool {
        Op::NUMERIC.contains(&self)
    }

    /// Returns `true` if this operator is valid for enumerated properties.
    pub fn is_enum_op(self) -> bool {
        Op::ENUMERATED.contains(&self)
    }

    /// Evaluates a numeric comparison given an ordering result.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false, // Not an ordering-based operator
        }
    }

    /// Returns the display name of this operator, as stored in links.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Contains => "contains",
            Op::NotContains => "does not contain",
            Op::StartsWith => "starts with",
            Op::EndsWith => "ends with",
            Op::Matches => "matches",
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::NotEmpty => "not empty",
            Op::Empty => "empty",
        }
    }
}

impl FromStr for Op {
    type Err = SeekerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s {
            "contains" => Op::Contains,
            "does not contain" => Op::NotContains,
            "starts with" => Op::StartsWith,
            "ends with" => Op::EndsWith,
            "matches" => Op::Matches,
            "==" => Op::Eq,
            "!=" => Op::Ne,
            "<" => Op::Lt,
            "<=" => Op::Lte,
            ">" => Op::Gt,
            ">=" => Op::Gte,
            "not empty" => Op::NotEmpty,
            "empty" => Op::Empty,
            other => return Err(SeekerError::UnknownOperator(other.to_string())),
        };
        Ok(op)
    }
}

impl Serialize for Op {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
