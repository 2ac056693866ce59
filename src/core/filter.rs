//! Filter clauses, their evaluation, and the ordered clause store
//!
//! A clause is `{ key, op, value }`. Clauses combine with AND semantics.
//! A clause with an empty key, no operator or no value is vacuous: it stays
//! in the set but lets every record through.

use crate::core::field::FieldValue;
use crate::core::record::Record;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Filter operators (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    Contains,
    StartsWith,
    EndsWith,
    In,
}

/// Value class an operator expects, used only to decide which operators a
/// filter builder offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Any,
    Number,
    String,
    Array,
}

/// Error returned when parsing an unknown operator name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter operator '{0}'")]
pub struct UnknownOperator(pub String);

impl Operator {
    /// Every operator, in the order a builder lists them
    pub const ALL: [Operator; 10] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Lt,
        Operator::Ge,
        Operator::Le,
        Operator::Contains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::In,
    ];

    /// Wire name (`eq`, `startswith`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::Ge => "ge",
            Operator::Le => "le",
            Operator::Contains => "contains",
            Operator::StartsWith => "startswith",
            Operator::EndsWith => "endswith",
            Operator::In => "in",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Operator::Eq => "Equals",
            Operator::Ne => "Not Equals",
            Operator::Gt => "Greater Than",
            Operator::Lt => "Less Than",
            Operator::Ge => "Greater Than or Equal",
            Operator::Le => "Less Than or Equal",
            Operator::Contains => "Contains",
            Operator::StartsWith => "Starts With",
            Operator::EndsWith => "Ends With",
            Operator::In => "In List",
        }
    }

    pub fn value_kind(self) -> ValueKind {
        match self {
            Operator::Eq | Operator::Ne => ValueKind::Any,
            Operator::Gt | Operator::Lt | Operator::Ge | Operator::Le => ValueKind::Number,
            Operator::Contains | Operator::StartsWith | Operator::EndsWith => ValueKind::String,
            Operator::In => ValueKind::Array,
        }
    }

    /// Apply the operator to a stored field value (`None` when absent)
    ///
    /// Only `contains` ignores case. `in` matches when the stored value is an
    /// array holding the clause value; a scalar field never matches.
    pub fn apply(self, stored: Option<&FieldValue>, value: &FieldValue) -> bool {
        match self {
            Operator::Eq => stored.is_some_and(|s| s.strict_eq(value)),
            Operator::Ne => !Operator::Eq.apply(stored, value),
            Operator::Gt => ordering(stored, value) == Some(Ordering::Greater),
            Operator::Lt => ordering(stored, value) == Some(Ordering::Less),
            Operator::Ge => matches!(
                ordering(stored, value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::Le => matches!(
                ordering(stored, value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Operator::Contains => stored.is_some_and(|s| {
                s.to_text()
                    .to_lowercase()
                    .contains(&value.to_text().to_lowercase())
            }),
            Operator::StartsWith => {
                stored.is_some_and(|s| s.to_text().starts_with(&value.to_text()))
            }
            Operator::EndsWith => stored.is_some_and(|s| s.to_text().ends_with(&value.to_text())),
            Operator::In => stored
                .and_then(FieldValue::as_array)
                .is_some_and(|items| items.iter().any(|item| item.strict_eq(value))),
        }
    }
}

fn ordering(stored: Option<&FieldValue>, value: &FieldValue) -> Option<Ordering> {
    stored.and_then(|s| s.compare(value))
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

/// A single filter condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FilterClause {
    /// Field name the clause applies to
    #[serde(default)]
    pub key: String,

    /// Operator; an empty string on the wire means "not chosen yet"
    #[serde(default, deserialize_with = "deserialize_op")]
    pub op: Option<Operator>,

    /// Value compared against the field; an explicit `null` is kept as
    /// [`FieldValue::Null`], only an absent value leaves the clause vacuous
    #[serde(
        default,
        deserialize_with = "deserialize_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<FieldValue>,
}

fn deserialize_value<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    FieldValue::deserialize(deserializer).map(Some)
}

fn deserialize_op<'de, D>(deserializer: D) -> Result<Option<Operator>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(name) => name.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl FilterClause {
    /// Create a complete clause
    pub fn new(key: impl Into<String>, op: Operator, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            op: Some(op),
            value: Some(value.into()),
        }
    }

    /// Whether the clause names both a field and an operator
    pub fn is_active(&self) -> bool {
        !self.key.is_empty() && self.op.is_some()
    }

    /// Evaluate this clause against a record
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        evaluate(record, self)
    }
}

/// Evaluate one clause against one record
///
/// Returns `true` when the clause is vacuous (missing key, operator or value).
pub fn evaluate<R: Record>(record: &R, clause: &FilterClause) -> bool {
    let (Some(op), Some(value)) = (clause.op, clause.value.as_ref()) else {
        return true;
    };
    if clause.key.is_empty() {
        return true;
    }
    let stored = record.field_value(&clause.key);
    op.apply(stored.as_ref(), value)
}

/// Ordered clause store
///
/// Insertion order is kept and duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    clauses: Vec<FilterClause>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause at the end
    pub fn add(&mut self, clause: FilterClause) {
        self.clauses.push(clause);
    }

    /// Remove the clause at `index`, returning it, or `None` if out of range
    pub fn remove_at(&mut self, index: usize) -> Option<FilterClause> {
        (index < self.clauses.len()).then(|| self.clauses.remove(index))
    }

    pub fn clear(&mut self) {
        self.clauses.clear();
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterClause> {
        self.clauses.iter()
    }

    pub fn as_slice(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// Clauses that name both a field and an operator
    pub fn active(&self) -> impl Iterator<Item = &FilterClause> {
        self.clauses.iter().filter(|c| c.is_active())
    }

    /// AND of every clause
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.clauses.iter().all(|clause| evaluate(record, clause))
    }

    pub fn into_vec(self) -> Vec<FilterClause> {
        self.clauses
    }
}

impl From<Vec<FilterClause>> for FilterSet {
    fn from(clauses: Vec<FilterClause>) -> Self {
        Self { clauses }
    }
}

impl FromIterator<FilterClause> for FilterSet {
    fn from_iter<I: IntoIterator<Item = FilterClause>>(iter: I) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a FilterClause;
    type IntoIter = std::slice::Iter<'a, FilterClause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}
