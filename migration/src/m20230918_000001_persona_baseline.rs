use sea_orm_migration::prelude::*;

use crate::revision::{Revision, Revisioned};

const REVISION: Revision = Revision::new("d5645c915d0e", None);

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        REVISION.id
    }
}

impl Revisioned for Migration {
    fn revision(&self) -> Revision {
        REVISION
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Persona::Table)
                    .col(
                        ColumnDef::new(Persona::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Persona::Name).string().not_null())
                    .col(ColumnDef::new(Persona::SystemText).text())
                    .col(ColumnDef::new(Persona::ToolsText).text())
                    .col(ColumnDef::new(Persona::HintText).text())
                    .col(ColumnDef::new(Persona::DefaultPersona).boolean().not_null())
                    .col(ColumnDef::new(Persona::Deleted).boolean().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Persona::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Persona {
    Table,
    Id,
    Name,
    SystemText,
    ToolsText,
    HintText,
    DefaultPersona,
    Deleted,
    RetrievalEnabled,
}
