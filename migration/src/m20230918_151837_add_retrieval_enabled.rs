use sea_orm_migration::prelude::*;

use crate::{
    m20230918_000001_persona_baseline::Persona,
    revision::{Revision, Revisioned},
};

const REVISION: Revision = Revision::new("dba7f71618f5", Some("d5645c915d0e"));

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
    // No default, so this fails on a populated table.
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Persona::Table)
                    .add_column(ColumnDef::new(Persona::RetrievalEnabled).boolean().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Persona::Table)
                    .drop_column(Persona::RetrievalEnabled)
                    .to_owned(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{
        DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Statement, Transaction,
    };

    use super::*;

    fn postgres(exec_results: usize) -> DatabaseConnection {
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results((0..exec_results).map(|_| MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }))
            .into_connection()
    }

    fn statement(sql: &str) -> Transaction {
        Transaction::one(Statement::from_string(DatabaseBackend::Postgres, sql))
    }

    #[test]
    fn revises_the_baseline() {
        assert_eq!(Migration.name(), "dba7f71618f5");
        assert_eq!(Migration.revision().down_revision, Some("d5645c915d0e"));
        assert!(Migration.revision().branch_labels.is_empty());
        assert!(Migration.revision().depends_on.is_empty());
    }

    #[tokio::test]
    async fn upgrade_adds_required_column_without_default() {
        let db = postgres(1);
        Migration.up(&SchemaManager::new(&db)).await.unwrap();

        assert_eq!(
            db.into_transaction_log(),
            [statement(
                r#"ALTER TABLE "persona" ADD COLUMN "retrieval_enabled" bool NOT NULL"#
            )]
        );
    }

    #[tokio::test]
    async fn downgrade_drops_column() {
        let db = postgres(1);
        Migration.down(&SchemaManager::new(&db)).await.unwrap();

        assert_eq!(
            db.into_transaction_log(),
            [statement(
                r#"ALTER TABLE "persona" DROP COLUMN "retrieval_enabled""#
            )]
        );
    }

    #[tokio::test]
    async fn database_errors_pass_through() {
        let message = r#"column "retrieval_enabled" of relation "persona" already exists"#;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Custom(message.to_owned())])
            .into_connection();

        let err = Migration.up(&SchemaManager::new(&db)).await.unwrap_err();
        assert!(matches!(&err, DbErr::Custom(m) if m == message), "{err}");
    }
}
