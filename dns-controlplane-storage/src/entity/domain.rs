//! `SeaORM` entity for the `domains` table.

use sea_orm::entity::prelude::*;

use crate::finder::FinderEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "domains")]
/// Database row model for a zone.
///
/// `deleted` holds `"0"` for live rows and the dash-stripped id once
/// soft-deleted, so `(name, deleted)` stays unique across deletions.
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub email: String,
    pub ttl: i32,
    pub serial: i64,
    pub refresh: i32,
    pub retry: i32,
    pub expire: i32,
    pub minimum: i32,
    pub status: String,
    pub description: Option<String>,
    pub deleted: String,
    pub deleted_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl FinderEntity for Entity {
    fn id_column() -> Column {
        Column::Id
    }

    fn created_at_column() -> Column {
        Column::CreatedAt
    }

    fn tenant_column() -> Option<Column> {
        Some(Column::TenantId)
    }

    fn deleted_column() -> Option<Column> {
        Some(Column::Deleted)
    }
}
