//! Field/value criteria translated into SQL predicates.

use std::str::FromStr;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select};

use dns_controlplane_core::error::{CoreError, CoreResult};

/// Right-hand side of a criterion pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriterionValue {
    /// Equality, or `LIKE` when the text contains `%`
    Text(String),
    Integer(i64),
    Bool(bool),
    /// `IS NULL`
    Null,
}

impl From<&str> for CriterionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CriterionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for CriterionValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for CriterionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for CriterionValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for CriterionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<CriterionValue>> From<Option<T>> for CriterionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Ordered list of `(field, value)` pairs, AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criterion {
    pairs: Vec<(String, CriterionValue)>,
}

impl Criterion {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Criterion matching a single id.
    #[must_use]
    pub fn id(id: &str) -> Self {
        Self::new().with("id", id)
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<CriterionValue>) -> Self {
        self.pairs.push((field.into(), value.into()));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CriterionValue)> {
        self.pairs.iter().map(|(field, value)| (field.as_str(), value))
    }

    /// Add one predicate per pair to `query`.
    ///
    /// # Errors
    /// `CoreError::InvalidField` when a field does not name a column of `E`.
    pub(crate) fn apply<E: EntityTrait>(&self, mut query: Select<E>) -> CoreResult<Select<E>> {
        for (field, value) in self.iter() {
            let column = E::Column::from_str(field)
                .map_err(|_| CoreError::InvalidField(field.to_string()))?;

            query = match value {
                CriterionValue::Null => query.filter(column.is_null()),
                CriterionValue::Text(text) if text.contains('%') => {
                    query.filter(column.like(text.as_str()))
                }
                CriterionValue::Text(text) => query.filter(column.eq(text.as_str())),
                CriterionValue::Integer(number) => query.filter(column.eq(*number)),
                CriterionValue::Bool(flag) => query.filter(column.eq(*flag)),
            };
        }
        Ok(query)
    }
}
