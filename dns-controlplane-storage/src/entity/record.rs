//! `SeaORM` entity for the `records` table.

use sea_orm::entity::prelude::*;

use crate::finder::FinderEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub tenant_id: String,
    pub domain_id: String,
    pub recordset_id: String,
    pub data: String,
    pub priority: Option<i32>,
    pub hash: String,
    pub description: Option<String>,
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
}
