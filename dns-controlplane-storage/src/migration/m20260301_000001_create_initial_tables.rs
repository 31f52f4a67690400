use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).string().not_null().primary_key().to_owned()
}

fn timestamps(table: &mut TableCreateStatement) -> &mut TableCreateStatement {
    table
        .col(ColumnDef::new(Timestamps::CreatedAt).string().not_null())
        .col(ColumnDef::new(Timestamps::UpdatedAt).string().not_null())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // quotas
        manager
            .create_table(
                timestamps(
                    Table::create()
                        .table(Quota::Table)
                        .if_not_exists()
                        .col(id_col(Quota::Id))
                        .col(ColumnDef::new(Quota::TenantId).string().not_null())
                        .col(ColumnDef::new(Quota::Resource).string().not_null())
                        .col(ColumnDef::new(Quota::HardLimit).big_integer().not_null()),
                )
                .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("unique_quota")
                    .table(Quota::Table)
                    .col(Quota::TenantId)
                    .col(Quota::Resource)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // servers
        manager
            .create_table(
                timestamps(
                    Table::create()
                        .table(Server::Table)
                        .if_not_exists()
                        .col(id_col(Server::Id))
                        .col(ColumnDef::new(Server::Name).string().not_null().unique_key()),
                )
                .to_owned(),
            )
            .await?;

        // tlds
        manager
            .create_table(
                timestamps(
                    Table::create()
                        .table(Tld::Table)
                        .if_not_exists()
                        .col(id_col(Tld::Id))
                        .col(ColumnDef::new(Tld::Name).string().not_null().unique_key())
                        .col(ColumnDef::new(Tld::Description).string().null()),
                )
                .to_owned(),
            )
            .await?;

        // tsigkeys
        manager
            .create_table(
                timestamps(
                    Table::create()
                        .table(TsigKey::Table)
                        .if_not_exists()
                        .col(id_col(TsigKey::Id))
                        .col(ColumnDef::new(TsigKey::Name).string().not_null().unique_key())
                        .col(ColumnDef::new(TsigKey::Algorithm).string().not_null())
                        .col(ColumnDef::new(TsigKey::Secret).string().not_null()),
                )
                .to_owned(),
            )
            .await?;

        // domains
        manager
            .create_table(
                timestamps(
                    Table::create()
                        .table(Domain::Table)
                        .if_not_exists()
                        .col(id_col(Domain::Id))
                        .col(ColumnDef::new(Domain::TenantId).string().not_null())
                        .col(ColumnDef::new(Domain::Name).string().not_null())
                        .col(ColumnDef::new(Domain::Email).string().not_null())
                        .col(ColumnDef::new(Domain::Ttl).integer().not_null().default(3600))
                        .col(ColumnDef::new(Domain::Serial).big_integer().not_null())
                        .col(ColumnDef::new(Domain::Refresh).integer().not_null().default(3600))
                        .col(ColumnDef::new(Domain::Retry).integer().not_null().default(600))
                        .col(ColumnDef::new(Domain::Expire).integer().not_null().default(86400))
                        .col(ColumnDef::new(Domain::Minimum).integer().not_null().default(3600))
                        .col(
                            ColumnDef::new(Domain::Status)
                                .string()
                                .not_null()
                                .default("ACTIVE"),
                        )
                        .col(ColumnDef::new(Domain::Description).string().null())
                        .col(ColumnDef::new(Domain::Deleted).string().not_null().default("0"))
                        .col(ColumnDef::new(Domain::DeletedAt).string().null()),
                )
                .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("unique_domain_name")
                    .table(Domain::Table)
                    .col(Domain::Name)
                    .col(Domain::Deleted)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("domains_tenant_id")
                    .table(Domain::Table)
                    .col(Domain::TenantId)
                    .to_owned(),
            )
            .await?;

        // recordsets
        manager
            .create_table(
                timestamps(
                    Table::create()
                        .table(RecordSet::Table)
                        .if_not_exists()
                        .col(id_col(RecordSet::Id))
                        .col(ColumnDef::new(RecordSet::TenantId).string().not_null())
                        .col(ColumnDef::new(RecordSet::DomainId).string().not_null())
                        .col(ColumnDef::new(RecordSet::Name).string().not_null())
                        .col(ColumnDef::new(RecordSet::RecordType).string().not_null())
                        .col(ColumnDef::new(RecordSet::Ttl).integer().null())
                        .col(ColumnDef::new(RecordSet::Description).string().null()),
                )
                .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("unique_recordset")
                    .table(RecordSet::Table)
                    .col(RecordSet::DomainId)
                    .col(RecordSet::Name)
                    .col(RecordSet::RecordType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // records
        manager
            .create_table(
                timestamps(
                    Table::create()
                        .table(Record::Table)
                        .if_not_exists()
                        .col(id_col(Record::Id))
                        .col(ColumnDef::new(Record::TenantId).string().not_null())
                        .col(ColumnDef::new(Record::DomainId).string().not_null())
                        .col(ColumnDef::new(Record::RecordsetId).string().not_null())
                        .col(ColumnDef::new(Record::Data).text().not_null())
                        .col(ColumnDef::new(Record::Priority).integer().null())
                        .col(ColumnDef::new(Record::Hash).string().not_null().unique_key())
                        .col(ColumnDef::new(Record::Description).string().null()),
                )
                .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("records_recordset_id")
                    .table(Record::Table)
                    .col(Record::RecordsetId)
                    .to_owned(),
            )
            .await?;

        // blacklists
        manager
            .create_table(
                timestamps(
                    Table::create()
                        .table(Blacklist::Table)
                        .if_not_exists()
                        .col(id_col(Blacklist::Id))
                        .col(
                            ColumnDef::new(Blacklist::Pattern)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Blacklist::Description).string().null()),
                )
                .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Blacklist::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Record::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RecordSet::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Domain::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TsigKey::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tld::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Server::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Quota::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Timestamps {
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Quota {
    #[sea_orm(iden = "quotas")]
    Table,
    Id,
    TenantId,
    Resource,
    HardLimit,
}

#[derive(DeriveIden)]
enum Server {
    #[sea_orm(iden = "servers")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Tld {
    #[sea_orm(iden = "tlds")]
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum TsigKey {
    #[sea_orm(iden = "tsigkeys")]
    Table,
    Id,
    Name,
    Algorithm,
    Secret,
}

#[derive(DeriveIden)]
enum Domain {
    #[sea_orm(iden = "domains")]
    Table,
    Id,
    TenantId,
    Name,
    Email,
    Ttl,
    Serial,
    Refresh,
    Retry,
    Expire,
    Minimum,
    Status,
    Description,
    Deleted,
    DeletedAt,
}

#[derive(DeriveIden)]
enum RecordSet {
    #[sea_orm(iden = "recordsets")]
    Table,
    Id,
    TenantId,
    DomainId,
    Name,
    RecordType,
    Ttl,
    Description,
}

#[derive(DeriveIden)]
enum Record {
    #[sea_orm(iden = "records")]
    Table,
    Id,
    TenantId,
    DomainId,
    RecordsetId,
    Data,
    Priority,
    Hash,
    Description,
}

#[derive(DeriveIden)]
enum Blacklist {
    #[sea_orm(iden = "blacklists")]
    Table,
    Id,
    Pattern,
    Description,
}
