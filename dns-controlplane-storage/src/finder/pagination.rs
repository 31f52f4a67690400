//! Marker (keyset) pagination over a composite sort key.

use std::fmt;
use std::str::FromStr;

use sea_orm::sea_query::{Condition, NullOrdering, Order};
use sea_orm::{
    ColumnTrait, ConnectionTrait, IdenStatic, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, Value,
};
use uuid::Uuid;

use dns_controlplane_core::error::{CoreError, CoreResult};
use dns_controlplane_core::types::RequestContext;

use super::{find_one, Criterion, FinderEntity};

/// Sort key used when a page request names none.
pub const DEFAULT_SORT_KEY: &str = "created_at";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    fn order(self) -> Order {
        match self {
            Self::Asc => Order::Asc,
            Self::Desc => Order::Desc,
        }
    }

    /// NULL sorts lowest: first ascending, last descending.
    fn nulls(self) -> NullOrdering {
        match self {
            Self::Asc => NullOrdering::First,
            Self::Desc => NullOrdering::Last,
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for SortDir {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(CoreError::ValueError(format!(
                "Unknown sort direction, must be 'desc' or 'asc': {other}"
            ))),
        }
    }
}

/// Page request for `find` operations.
///
/// `marker` is the id of the last row of the previous page; `limit: None`
/// returns every remaining row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub marker: Option<String>,
    pub limit: Option<u64>,
    pub sort_key: Option<String>,
    pub sort_dir: SortDir,
}

impl PageRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn sort_key(mut self, sort_key: impl Into<String>) -> Self {
        self.sort_key = Some(sort_key.into());
        self
    }

    #[must_use]
    pub fn sort_dir(mut self, sort_dir: SortDir) -> Self {
        self.sort_dir = sort_dir;
        self
    }
}

/// `[sort_key, id, created_at]` with duplicates removed, order kept.
fn sort_columns<E: FinderEntity>(sort_column: E::Column) -> Vec<E::Column> {
    let mut columns: Vec<E::Column> = Vec::with_capacity(3);
    for column in [sort_column, E::id_column(), E::created_at_column()] {
        if !columns
            .iter()
            .any(|existing| IdenStatic::as_str(existing) == IdenStatic::as_str(&column))
        {
            columns.push(column);
        }
    }
    columns
}

fn is_null(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(None)
            | Value::TinyInt(None)
            | Value::SmallInt(None)
            | Value::Int(None)
            | Value::BigInt(None)
            | Value::TinyUnsigned(None)
            | Value::SmallUnsigned(None)
            | Value::Unsigned(None)
            | Value::BigUnsigned(None)
            | Value::Float(None)
            | Value::Double(None)
            | Value::String(None)
            | Value::Char(None)
            | Value::Bytes(None)
    )
}

/// `column` equal to `value`, NULL matching NULL.
fn same_as<C: ColumnTrait>(column: C, value: Value) -> Condition {
    let expr = if is_null(&value) {
        column.is_null()
    } else {
        column.eq(value)
    };
    Condition::all().add(expr)
}

/// `column` strictly after `value`; NULL sorts before every value.
///
/// `None` when nothing can follow (a NULL marker value in descending order).
fn past<C: ColumnTrait>(column: C, value: Value, dir: SortDir) -> Option<Condition> {
    match (dir, is_null(&value)) {
        (SortDir::Asc, true) => Some(Condition::all().add(column.is_not_null())),
        (SortDir::Asc, false) => Some(Condition::all().add(column.gt(value))),
        (SortDir::Desc, true) => None,
        (SortDir::Desc, false) => Some(
            Condition::any()
                .add(column.lt(value))
                .add(column.is_null()),
        ),
    }
}

/// Rows strictly after `marker` in the composite ordering.
fn after_marker<E: FinderEntity>(
    columns: &[E::Column],
    marker: &E::Model,
    dir: SortDir,
) -> Condition {
    let mut any = Condition::any();
    for (i, column) in columns.iter().enumerate() {
        let Some(tail) = past(*column, marker.get(*column), dir) else {
            continue;
        };
        let mut all = Condition::all();
        for previous in &columns[..i] {
            all = all.add(same_as(*previous, marker.get(*previous)));
        }
        any = any.add(all.add(tail));
    }
    any
}

/// Apply marker, ordering and limit to an already filtered query.
///
/// The marker is resolved with `find_one` under the same context, so a row
/// hidden from the caller cannot be used as a cursor.
pub(crate) async fn paginate<E, C>(
    conn: &C,
    ctx: &RequestContext,
    query: Select<E>,
    page: &PageRequest,
) -> CoreResult<Select<E>>
where
    E: FinderEntity,
    C: ConnectionTrait,
{
    let sort_key = page.sort_key.as_deref().unwrap_or(DEFAULT_SORT_KEY);
    let sort_column = E::Column::from_str(sort_key)
        .map_err(|_| CoreError::InvalidSortKey(sort_key.to_string()))?;

    if page.limit == Some(0) {
        return Err(CoreError::ValueError(
            "limit must be a positive integer".to_string(),
        ));
    }

    let columns = sort_columns::<E>(sort_column);
    let mut query = query;

    if let Some(marker) = page.marker.as_deref() {
        Uuid::parse_str(marker).map_err(|_| CoreError::InvalidMarker(marker.to_string()))?;

        let marker_row = find_one::<E, C>(conn, ctx, &Criterion::id(marker))
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    CoreError::MarkerNotFound(marker.to_string())
                } else {
                    e
                }
            })?;

        query = query.filter(after_marker::<E>(&columns, &marker_row, page.sort_dir));
    }

    for column in columns {
        query = query.order_by_with_nulls(column, page.sort_dir.order(), page.sort_dir.nulls());
    }

    Ok(query.limit(page.limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_dir_parses_case_insensitively() {
        assert_eq!("ASC".parse::<SortDir>().unwrap(), SortDir::Asc);
        assert_eq!("desc".parse::<SortDir>().unwrap(), SortDir::Desc);
        assert!(matches!(
            "sideways".parse::<SortDir>(),
            Err(CoreError::ValueError(_))
        ));
    }

    #[test]
    fn sort_columns_drop_duplicates() {
        use crate::entity::domain;

        let columns = sort_columns::<domain::Entity>(domain::Column::Name);
        let names: Vec<_> = columns.iter().map(IdenStatic::as_str).collect();
        assert_eq!(names, vec!["name", "id", "created_at"]);

        let columns = sort_columns::<domain::Entity>(domain::Column::CreatedAt);
        let names: Vec<_> = columns.iter().map(IdenStatic::as_str).collect();
        assert_eq!(names, vec!["created_at", "id"]);
    }
}
