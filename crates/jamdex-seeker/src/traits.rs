//! The [`Seekable`] trait: path-based field access for filterable records.

use crate::value::Value;

/// Trait for records that can be filtered by path.
///
/// A path is the sequence of property names a selection walked through
/// the schema: `["name"]` for a flat property, `["ranks", "Overall",
/// "place"]` for a leaf two levels deep. Implementations return
/// [`Value::None`] for any path they cannot resolve on this record.
///
/// # Example
///
/// ```
/// use jamdex_seeker::{Seekable, Value, Number};
///
/// struct Entry {
///     title: String,
///     votes: u32,
/// }
///
/// impl Seekable for Entry {
///     fn seeker_field_value(&self, path: &[String]) -> Value<'_> {
///         match path {
///             [field] if field == "title" => Value::Text(&self.title),
///             [field] if field == "votes" => Value::Number(Number::from(self.votes)),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let entry = Entry { title: "Loop".into(), votes: 12 };
/// assert_eq!(entry.seeker_field_value(&["title".into()]), Value::Text("Loop"));
/// ```
pub trait Seekable {
    /// Returns the value at `path` for clause comparison.
    fn seeker_field_value(&self, path: &[String]) -> Value<'_>;

    /// Returns a static accessor function suitable for use with
    /// [`Query::filter`](crate::Query::filter).
    fn accessor<'a>(item: &'a Self, path: &[String]) -> Value<'a>
    where
        Self: Sized,
    {
        item.seeker_field_value(path)
    }
}
