//! Query compilation and execution.
//!
//! A [`Query`] is the conjunction of every clause compiled from a selection
//! list. Entries that compile to nothing (unset, unknown or incomplete) are
//! dropped, so an empty query matches every record.

use crate::clause::Clause;
use crate::record::Game;
use crate::schema::Schema;
use crate::selection::SelectionEntry;
use crate::traits::Seekable;
use crate::value::Value;

/// A compiled filter: all clauses must match.
///
/// # Example
///
/// ```
/// use jamdex_seeker::{Query, Schema, Property, InputProps, SelectionEntry, Seekable, Value, Number};
///
/// struct Entry { votes: u32 }
///
/// impl Seekable for Entry {
///     fn seeker_field_value(&self, path: &[String]) -> Value<'_> {
///         match path {
///             [f] if f == "votes" => Value::Number(Number::from(self.votes)),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let schema = Schema::new(vec![Property::numeric("votes", "Votes", InputProps::default())]);
/// let selections = vec![SelectionEntry::new(["votes"]).with_operator(">=").with_value("5")];
/// let query = Query::compile(&schema, &selections);
///
/// let entries = vec![Entry { votes: 3 }, Entry { votes: 8 }];
/// let results = query.filter(&entries, Entry::accessor);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].votes, 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    clauses: Vec<Clause>,
}

impl Query {
    /// Creates a new empty query.
    ///
    /// An empty query matches all items.
    pub fn new() -> Self {
        Query::default()
    }

    /// Compiles a selection list against a schema.
    ///
    /// Entries with no top-level property are skipped; the others compile
    /// through [`Schema::compile`] and only constraining clauses are kept,
    /// in selection order.
    pub fn compile(schema: &Schema, selections: &[SelectionEntry]) -> Self {
        let clauses: Vec<Clause> = selections
            .iter()
            .filter(|entry| entry.property_name().is_some())
            .filter_map(|entry| schema.compile(entry))
            .collect();
        tracing::debug!(
            selections = selections.len(),
            clauses = clauses.len(),
            "compiled filter query"
        );
        Query { clauses }
    }

    /// Adds a clause.
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Returns the compiled clauses.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns true if the query has no clauses (matches everything).
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single item matches this query.
    ///
    /// Clauses are evaluated in order and evaluation stops at the first
    /// failure.
    pub fn matches<T, F>(&self, item: &T, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &[String]) -> Value<'a>,
    {
        self.clauses
            .iter()
            .all(|clause| clause.matches(&accessor(item, &clause.field)))
    }

    /// Returns the query as a single-record predicate.
    pub fn predicate<'q, T, F>(&'q self, accessor: F) -> impl Fn(&T) -> bool + 'q
    where
        T: 'q,
        F: 'q,
        for<'a> F: Fn(&'a T, &[String]) -> Value<'a>,
    {
        move |item: &T| self.matches(item, &accessor)
    }

    /// Filters a slice, returning references to matching items in their
    /// original order.
    pub fn filter<'a, T, F>(&self, items: &'a [T], accessor: F) -> Vec<&'a T>
    where
        for<'b> F: Fn(&'b T, &[String]) -> Value<'b>,
    {
        if self.clauses.is_empty() {
            return items.iter().collect();
        }
        items
            .iter()
            .filter(|item| self.matches(*item, &accessor))
            .collect()
    }

    /// Filters and clones matching items.
    pub fn filter_cloned<T, F>(&self, items: &[T], accessor: F) -> Vec<T>
    where
        T: Clone,
        for<'a> F: Fn(&'a T, &[String]) -> Value<'a>,
    {
        self.filter(items, accessor).into_iter().cloned().collect()
    }

    /// Counts the number of matching items.
    pub fn count<T, F>(&self, items: &[T], accessor: F) -> usize
    where
        for<'a> F: Fn(&'a T, &[String]) -> Value<'a>,
    {
        items
            .iter()
            .filter(|item| self.matches(*item, &accessor))
            .count()
    }

    /// Returns `true` if any item matches.
    pub fn any<T, F>(&self, items: &[T], accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &[String]) -> Value<'a>,
    {
        items.iter().any(|item| self.matches(item, &accessor))
    }

    /// Finds the first matching item.
    pub fn find<'a, T, F>(&self, items: &'a [T], accessor: F) -> Option<&'a T>
    where
        for<'b> F: Fn(&'b T, &[String]) -> Value<'b>,
    {
        items.iter().find(|item| self.matches(*item, &accessor))
    }

    /// Finds the first matching item and returns its index.
    pub fn position<T, F>(&self, items: &[T], accessor: F) -> Option<usize>
    where
        for<'a> F: Fn(&'a T, &[String]) -> Value<'a>,
    {
        items.iter().position(|item| self.matches(item, &accessor))
    }
}

/// Filters games by a selection list.
///
/// This is the one call a front end needs: compile `selections` against
/// `schema` and return the matching games in dataset order.
pub fn apply<'a>(games: &'a [Game], schema: &Schema, selections: &[SelectionEntry]) -> Vec<&'a Game> {
    Query::compile(schema, selections).filter(games, Game::accessor)
}
