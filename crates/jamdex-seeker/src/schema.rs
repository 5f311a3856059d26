//! Filter schema: the declarative tree of filterable properties, and the
//! compiler that turns a selection entry into a [`Clause`].
//!
//! # Compilation
//!
//! ```text
//! entry.path[0] ──► top-level property
//!                    │ nested? read entry.path[1] ──► child
//!                    │            nested? read entry.path[2] ──► ...
//!                    ▼
//!                  leaf (text / numeric / enumerated)
//!                    │ guard: operator offered by the leaf kind,
//!                    │        value usable by that operator
//!                    ▼
//!                  Clause { field: entry.path[..=depth], test }
//! ```
//!
//! Any step that cannot proceed yields `None`: the entry constrains
//! nothing. Nested properties never test records themselves.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::clause::Clause;
use crate::op::Op;
use crate::selection::{FilterValue, SelectionEntry};

/// One filterable dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Path segment identifying this property among its siblings.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Kind-specific metadata.
    pub kind: PropertyKind,
}

/// The closed set of property kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    /// Free text, matched case-insensitively.
    Text,
    /// Numeric comparison; `input` is advisory only.
    Numeric { input: InputProps },
    /// Membership in a label list.
    Enumerated {
        values: Vec<String>,
        /// Label offered for records whose field is absent.
        absent_label: Option<String>,
    },
    /// Container of child properties, selected by the next path segment.
    Nested { children: Vec<Property> },
}

/// Advisory numeric input constraints for selector UIs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct InputProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl InputProps {
    /// Returns `true` when no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.step.is_none()
    }
}

impl Property {
    /// Creates a text property.
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Property {
            name: name.into(),
            label: label.into(),
            kind: PropertyKind::Text,
        }
    }

    /// Creates a numeric property.
    pub fn numeric(name: impl Into<String>, label: impl Into<String>, input: InputProps) -> Self {
        Property {
            name: name.into(),
            label: label.into(),
            kind: PropertyKind::Numeric { input },
        }
    }

    /// Creates an enumerated property.
    pub fn enumerated(
        name: impl Into<String>,
        label: impl Into<String>,
        values: Vec<String>,
    ) -> Self {
        Property {
            name: name.into(),
            label: label.into(),
            kind: PropertyKind::Enumerated {
                values,
                absent_label: None,
            },
        }
    }

    /// Creates a nested property.
    pub fn nested(
        name: impl Into<String>,
        label: impl Into<String>,
        children: Vec<Property>,
    ) -> Self {
        Property {
            name: name.into(),
            label: label.into(),
            kind: PropertyKind::Nested { children },
        }
    }

    /// Names the label that records with an absent field hold.
    ///
    /// Only meaningful for enumerated properties; other kinds are returned
    /// unchanged.
    pub fn with_absent_label(mut self, label: impl Into<String>) -> Self {
        if let PropertyKind::Enumerated { absent_label, .. } = &mut self.kind {
            *absent_label = Some(label.into());
        }
        self
    }

    /// Operators a selector may offer for this property.
    pub fn operators(&self) -> &'static [Op] {
        self.kind.operators()
    }

    /// Finds a direct child by name (nested properties only).
    pub fn child(&self, name: &str) -> Option<&Property> {
        match &self.kind {
            PropertyKind::Nested { children } => children.iter().find(|c| c.name == name),
            _ => None,
        }
    }

    /// Compiles the leaf-level test for `entry`.
    ///
    /// `field` is the path that resolved to this property. Returns `None`
    /// when the operator or value is incomplete for this kind, and always
    /// for nested properties.
    fn compile_leaf(&self, field: &[String], entry: &SelectionEntry) -> Option<Clause> {
        let op = entry
            .operator
            .as_deref()
            .and_then(|s| s.parse::<Op>().ok())
            .filter(|op| self.kind.offers(*op))?;
        let value = entry.value.as_ref();

        match &self.kind {
            PropertyKind::Text => {
                let needle = value.and_then(FilterValue::as_text).filter(|s| !s.is_empty())?;
                match Clause::text(field.to_vec(), op, &needle) {
                    Ok(clause) => Some(clause),
                    Err(err) => {
                        tracing::warn!(error = %err, field = ?field, "ignoring text filter");
                        None
                    }
                }
            }
            PropertyKind::Numeric { .. } => {
                let operand = value.and_then(FilterValue::as_finite_number)?;
                Some(Clause::numeric(field.to_vec(), op, operand))
            }
            PropertyKind::Enumerated { absent_label, .. } => {
                // Every enumerated operator waits for a picked label, the
                // presence checks included.
                let label = match value {
                    Some(FilterValue::Text(s)) if !s.is_empty() => s.clone(),
                    _ => return None,
                };
                Some(Clause::labels(
                    field.to_vec(),
                    op,
                    label,
                    absent_label.clone(),
                ))
            }
            PropertyKind::Nested { .. } => None,
        }
    }
}

impl PropertyKind {
    /// Stable type tag used in the schema contract.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyKind::Text => "text",
            PropertyKind::Numeric { .. } => "numeric",
            PropertyKind::Enumerated { .. } => "enumerated",
            PropertyKind::Nested { .. } => "nested",
        }
    }

    /// Returns `true` if this kind offers `op`.
    pub fn offers(&self, op: Op) -> bool {
        match self {
            PropertyKind::Text => op.is_text_op(),
            PropertyKind::Numeric { .. } => op.is_numeric_op(),
            PropertyKind::Enumerated { .. } => op.is_enum_op(),
            PropertyKind::Nested { .. } => false,
        }
    }

    /// Operators this kind recognizes; nested kinds have none.
    pub fn operators(&self) -> &'static [Op] {
        match self {
            PropertyKind::Text => Op::TEXT,
            PropertyKind::Numeric { .. } => Op::NUMERIC,
            PropertyKind::Enumerated { .. } => Op::ENUMERATED,
            PropertyKind::Nested { .. } => &[],
        }
    }
}

impl Serialize for Property {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Property", 6)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("label", &self.label)?;
        state.serialize_field("type", self.kind.type_name())?;
        match &self.kind {
            PropertyKind::Text => {
                state.serialize_field("operators", Op::TEXT)?;
            }
            PropertyKind::Numeric { input } => {
                state.serialize_field("operators", Op::NUMERIC)?;
                if input.is_empty() {
                    state.skip_field("input")?;
                } else {
                    state.serialize_field("input", input)?;
                }
            }
            PropertyKind::Enumerated { values, .. } => {
                state.serialize_field("operators", Op::ENUMERATED)?;
                state.serialize_field("values", values)?;
            }
            PropertyKind::Nested { children } => {
                state.serialize_field("children", children)?;
            }
        }
        state.end()
    }
}

/// Ordered list of top-level properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    properties: Vec<Property>,
}

impl Schema {
    /// Creates a schema from top-level properties.
    pub fn new(properties: Vec<Property>) -> Self {
        Schema { properties }
    }

    /// Top-level properties, in display order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Finds a top-level property by name.
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Resolves as much of `path` as the schema allows.
    ///
    /// Descends through nested properties one segment at a time and
    /// returns the deepest property reached with the number of segments
    /// consumed, or `None` if the first segment names no property. The
    /// result may still be a nested property when the path stops short.
    pub fn resolve<'s>(&'s self, path: &[String]) -> Option<(&'s Property, usize)> {
        let mut property = self.get(path.first()?)?;
        let mut depth = 1;
        while let Some(segment) = path.get(depth).filter(|s| !s.is_empty()) {
            match property.child(segment) {
                Some(child) => {
                    property = child;
                    depth += 1;
                }
                None => break,
            }
        }
        Some((property, depth))
    }

    /// Compiles one selection entry into a clause.
    ///
    /// Returns `None` when the entry does not constrain records: the
    /// property is unset or unknown, the path stops at a nested property
    /// or names a missing child, or the operator/value are incomplete for
    /// the resolved leaf.
    pub fn compile(&self, entry: &SelectionEntry) -> Option<Clause> {
        let Some(name) = entry.property_name() else {
            tracing::trace!("skipping filter with no property");
            return None;
        };
        let Some((property, depth)) = self.resolve(&entry.path) else {
            tracing::debug!(property = name, "unknown filter property; matching everything");
            return None;
        };
        if matches!(property.kind, PropertyKind::Nested { .. }) {
            tracing::debug!(%entry, depth, "filter path stops at nested property; matching everything");
            return None;
        }

        let clause = property.compile_leaf(&entry.path[..depth], entry);
        if clause.is_none() {
            tracing::debug!(%entry, "incomplete filter; matching everything");
        }
        clause
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.properties.serialize(serializer)
    }
}
