//! Jamdex Seeker - schema-driven filtering of game-jam results.
//!
//! A filter is a list of [`SelectionEntry`] rows the user builds against a
//! [`Schema`]. Each row names a property by path, an operator and a value;
//! [`Query::compile`] turns the list into a conjunction of [`Clause`]s and
//! [`Query::filter`] runs it over any collection through an accessor.
//!
//! Compilation is fail-open: a row that is unset, incomplete, names an
//! unknown property or operator, or carries an unusable value compiles to
//! nothing and so restricts nothing.
//!
//! # Quick Start
//!
//! ```rust
//! use jamdex_seeker::{Query, Schema, Property, InputProps, SelectionEntry, Seekable, Value, Number};
//!
//! struct Entry {
//!     title: String,
//!     votes: u64,
//! }
//!
//! impl Seekable for Entry {
//!     fn seeker_field_value(&self, path: &[String]) -> Value<'_> {
//!         match path {
//!             [f] if f == "title" => Value::Text(&self.title),
//!             [f] if f == "votes" => Value::Number(Number::from(self.votes)),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let schema = Schema::new(vec![
//!     Property::text("title", "Title"),
//!     Property::numeric("votes", "Votes", InputProps::default()),
//! ]);
//!
//! let entries = vec![
//!     Entry { title: "Loop Hero".into(), votes: 40 },
//!     Entry { title: "Loopdeloop".into(), votes: 3 },
//!     Entry { title: "Mars".into(), votes: 90 },
//! ];
//!
//! let selections = vec![
//!     SelectionEntry::new(["title"]).with_operator("contains").with_value("LOOP"),
//!     SelectionEntry::new(["votes"]).with_operator(">").with_value("10"),
//!     // incomplete rows are ignored
//!     SelectionEntry::new(["votes"]).with_operator("<"),
//! ];
//!
//! let results = Query::compile(&schema, &selections).filter(&entries, Entry::accessor);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].title, "Loop Hero");
//! ```
//!
//! # Property Kinds and Operators
//!
//! | Kind | Operators |
//! |------|-----------|
//! | Text | `contains`, `does not contain`, `starts with`, `ends with`, `matches` |
//! | Numeric | `==`, `!=`, `<`, `<=`, `>`, `>=` |
//! | Enumerated | `contains`, `not empty`, `empty` |
//! | Nested | none; the next path segment picks a child |
//!
//! Text tests are case-insensitive. A missing text field reads as the empty
//! string; a missing numeric field fails every comparison.
//! Enumerated rows stay inactive until a label is picked, whatever the
//! operator.
//!
//! # Game Results
//!
//! [`Dataset`] loads the crawler's JSON, [`jam_schema`] derives the schema
//! for it and [`apply`] filters it in one call. [`Location`] carries the
//! selection list and page through a URL query string.

mod clause;
mod error;
mod location;
mod op;
mod query;
mod record;
mod registry;
mod schema;
mod selection;
mod traits;
mod value;

// Re-export public API
pub use clause::{Clause, Test};
pub use error::{Result, SeekerError};
pub use location::{Location, FILTERS_PARAM, PAGE_PARAM};
pub use op::Op;
pub use query::{apply, Query};
pub use record::{Author, CoverKind, Dataset, Game, Rank};
pub use registry::{
    distinct_labels, jam_schema, rank_categories, CategorySource, RegistryOptions, SchemaCache,
};
pub use schema::{InputProps, Property, PropertyKind, Schema};
pub use selection::{parse_token, to_token, FilterValue, SelectionEntry};
pub use traits::Seekable;
pub use value::{Number, Value};
