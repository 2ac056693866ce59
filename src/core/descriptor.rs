//! Filter-builder contract: which operators a UI may offer for which field
//!
//! Operator compatibility is a closed mapping from [`FieldType`] to an
//! operator set. It restricts what a builder accepts; evaluation itself does
//! not look at field types.

use crate::core::error::{ListResult, QueryError};
use crate::core::field::FieldValue;
use crate::core::filter::{FilterClause, FilterSet, Operator};
use serde::{Deserialize, Serialize};

const ORDERED_OPS: &[Operator] = &[
    Operator::Eq,
    Operator::Ne,
    Operator::Gt,
    Operator::Lt,
    Operator::Ge,
    Operator::Le,
];
const BOOLEAN_OPS: &[Operator] = &[Operator::Eq, Operator::Ne];
const ARRAY_OPS: &[Operator] = &[Operator::Contains, Operator::In];
const TEXT_OPS: &[Operator] = &[
    Operator::Eq,
    Operator::Ne,
    Operator::Contains,
    Operator::StartsWith,
    Operator::EndsWith,
];

/// Type tag of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
    Status,
    Number,
    Date,
    DateTime,
    Boolean,
    Array,
}

impl FieldType {
    /// Operators a builder offers for this field type
    pub fn compatible_operators(self) -> &'static [Operator] {
        match self {
            FieldType::Number | FieldType::Date | FieldType::DateTime => ORDERED_OPS,
            FieldType::Boolean => BOOLEAN_OPS,
            FieldType::Array => ARRAY_OPS,
            FieldType::String | FieldType::Status => TEXT_OPS,
        }
    }

    pub fn accepts(self, op: Operator) -> bool {
        self.compatible_operators().contains(&op)
    }
}

/// A field the filter builder can target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterFieldDescriptor {
    pub id: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
}

impl FilterFieldDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field_type,
        }
    }
}

/// Builds clauses against a static list of field descriptors
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    fields: Vec<FilterFieldDescriptor>,
}

impl FilterBuilder {
    pub fn new(fields: Vec<FilterFieldDescriptor>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FilterFieldDescriptor] {
        &self.fields
    }

    fn descriptor(&self, field_id: &str) -> Option<&FilterFieldDescriptor> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Type of a field; unknown fields are treated as strings
    pub fn field_type(&self, field_id: &str) -> FieldType {
        self.descriptor(field_id)
            .map(|f| f.field_type)
            .unwrap_or_default()
    }

    /// Display label of a field, falling back to its id
    pub fn label_for<'a>(&'a self, field_id: &'a str) -> &'a str {
        self.descriptor(field_id)
            .map(|f| f.label.as_str())
            .unwrap_or(field_id)
    }

    pub fn operators_for(&self, field_id: &str) -> &'static [Operator] {
        self.field_type(field_id).compatible_operators()
    }

    /// Validate a draft clause
    ///
    /// The draft must name a field and an operator the field's type offers.
    /// The value may still be missing, which leaves the clause vacuous.
    pub fn build(&self, draft: FilterClause) -> ListResult<FilterClause> {
        if draft.key.is_empty() {
            return Err(QueryError::InvalidClause {
                key: draft.key,
                message: "no field selected".to_string(),
            }
            .into());
        }
        let Some(op) = draft.op else {
            return Err(QueryError::InvalidClause {
                key: draft.key,
                message: "no operator selected".to_string(),
            }
            .into());
        };
        let field_type = self.field_type(&draft.key);
        if !field_type.accepts(op) {
            return Err(QueryError::InvalidClause {
                message: format!("operator '{}' is not offered for {:?} fields", op, field_type),
                key: draft.key,
            }
            .into());
        }
        Ok(draft)
    }

    /// Build a complete clause from its parts
    pub fn clause(
        &self,
        key: impl Into<String>,
        op: Operator,
        value: impl Into<FieldValue>,
    ) -> ListResult<FilterClause> {
        self.build(FilterClause::new(key, op, value))
    }

    /// A copy of `current` with a validated draft appended
    pub fn append(&self, current: &FilterSet, draft: FilterClause) -> ListResult<FilterSet> {
        let clause = self.build(draft)?;
        let mut next = current.clone();
        next.add(clause);
        Ok(next)
    }

    /// Short human description of a clause, e.g. `Status Equals Draft`
    pub fn describe(&self, clause: &FilterClause) -> String {
        let op = clause.op.map(Operator::label).unwrap_or("?");
        let value = clause
            .value
            .as_ref()
            .map(FieldValue::to_text)
            .unwrap_or_default();
        format!("{} {} {}", self.label_for(&clause.key), op, value)
            .trim_end()
            .to_string()
    }
}
