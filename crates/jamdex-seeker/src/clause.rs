//! Compiled single-record tests.
//!
//! A [`Clause`] is what one selection entry compiles to once the schema has
//! resolved its leaf property and the operator and value passed the
//! completeness guard: a field path plus a [`Test`]. Incomplete entries
//! never become clauses (see [`Schema::compile`](crate::Schema::compile)).

use regex::{Regex, RegexBuilder};

use crate::error::Result;
use crate::op::Op;
use crate::value::{Number, Value};

/// A single compiled filter predicate.
///
/// # Example
///
/// ```
/// use jamdex_seeker::{Clause, Op, Value};
///
/// let clause = Clause::text(vec!["name".into()], Op::Contains, "Loop").unwrap();
/// assert!(clause.matches(&Value::Text("Time LOOPER")));
/// assert!(!clause.matches(&Value::Text("Tower")));
/// ```
#[derive(Debug, Clone)]
pub struct Clause {
    /// Path of the field the test reads.
    pub field: Vec<String>,
    /// The test applied to the field value.
    pub test: Test,
}

/// The comparison a clause performs.
#[derive(Debug, Clone)]
pub enum Test {
    /// Case-insensitive string test; the needle is already lower-cased.
    Text { op: Op, needle: String },
    /// Case-insensitive regular expression.
    Pattern(Regex),
    /// Numeric comparison against a finite operand.
    Numeric { op: Op, operand: Number },
    /// Label membership or presence.
    Labels {
        op: Op,
        label: String,
        /// Label a record holds when its field is absent or empty.
        absent_label: Option<String>,
    },
}

impl Clause {
    /// Builds a text clause.
    ///
    /// `Matches` compiles `needle` as a case-insensitive regex; the other
    /// text operators lower-case it.
    pub fn text(field: Vec<String>, op: Op, needle: &str) -> Result<Self> {
        let test = match op {
            Op::Matches => Test::Pattern(RegexBuilder::new(needle).case_insensitive(true).build()?),
            _ => Test::Text {
                op,
                needle: needle.to_lowercase(),
            },
        };
        Ok(Clause { field, test })
    }

    /// Builds a numeric comparison clause.
    pub fn numeric(field: Vec<String>, op: Op, operand: impl Into<Number>) -> Self {
        Clause {
            field,
            test: Test::Numeric {
                op,
                operand: operand.into(),
            },
        }
    }

    /// Builds an enumerated clause.
    ///
    /// `label` is the membership target for `Contains`; the presence
    /// operators carry it but do not read it.
    pub fn labels(
        field: Vec<String>,
        op: Op,
        label: impl Into<String>,
        absent_label: Option<String>,
    ) -> Self {
        Clause {
            field,
            test: Test::Labels {
                op,
                label: label.into(),
                absent_label,
            },
        }
    }

    /// Evaluates this clause against a field value.
    ///
    /// A value the test cannot read (e.g. `None` for a numeric test) does
    /// not match.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match &self.test {
            Test::Text { op, needle } => {
                let haystack = field_value.as_str().unwrap_or("").to_lowercase();
                match_text(*op, &haystack, needle)
            }
            Test::Pattern(regex) => field_value.as_str().is_some_and(|s| regex.is_match(s)),
            Test::Numeric { op, operand } => field_value
                .as_number()
                .and_then(|n| n.compare(*operand)) // None for NaN
                .is_some_and(|ordering| op.eval_ordering(ordering)),
            Test::Labels {
                op,
                label,
                absent_label,
            } => match_labels(*op, field_value, label, absent_label.as_deref()),
        }
    }
}

fn match_text(op: Op, haystack: &str, needle: &str) -> bool {
    match op {
        Op::Contains => haystack.contains(needle),
        Op::NotContains => !haystack.contains(needle),
        Op::StartsWith => haystack.starts_with(needle),
        Op::EndsWith => haystack.ends_with(needle),
        _ => true,
    }
}

fn match_labels(op: Op, value: &Value<'_>, label: &str, absent: Option<&str>) -> bool {
    let present = value.has_labels();
    match op {
        Op::NotEmpty => present,
        Op::Empty => !present,
        Op::Contains if present => value.has_label(label),
        Op::Contains => absent == Some(label),
        _ => true,
    }
}
