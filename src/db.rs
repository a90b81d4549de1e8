use anyhow::{Context, Result};
use migration::{MigrationStatus, Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, log::LevelFilter};

pub struct Db {
    dc: DatabaseConnection,
}

impl From<DatabaseConnection> for Db {
    fn from(dc: DatabaseConnection) -> Self {
        Self { dc }
    }
}

impl Db {
    pub async fn connect(db_url: &str) -> Result<Self> {
        let mut conn_options = ConnectOptions::new(db_url);
        conn_options.sqlx_logging_level(LevelFilter::Debug);
        conn_options.sqlx_logging(true);

        let dc = Database::connect(conn_options)
            .await
            .context("can't connect to database")?;
        Ok(Self { dc })
    }

    pub async fn upgrade(&self, steps: Option<u32>) -> Result<()> {
        info!(?steps, "upgrading schema");
        Migrator::up(&self.dc, steps).await?;
        let revision = self.current_revision().await?;
        info!(?revision, "schema upgraded");
        Ok(())
    }

    pub async fn downgrade(&self, steps: u32) -> Result<()> {
        info!(steps, "downgrading schema");
        Migrator::down(&self.dc, Some(steps)).await?;
        let revision = self.current_revision().await?;
        info!(?revision, "schema downgraded");
        Ok(())
    }

    /// Every known revision in apply order, with whether it is applied.
    pub async fn status(&self) -> Result<Vec<(String, bool)>> {
        let migrations = Migrator::get_migration_with_status(&self.dc).await?;
        Ok(migrations
            .iter()
            .map(|m| {
                (
                    m.name().to_owned(),
                    matches!(m.status(), MigrationStatus::Applied),
                )
            })
            .collect())
    }

    pub async fn current_revision(&self) -> Result<Option<String>> {
        let applied = Migrator::get_applied_migrations(&self.dc).await?;
        Ok(applied.last().map(|m| m.name().to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory() -> Db {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1);
        Database::connect(options).await.unwrap().into()
    }

    #[tokio::test]
    async fn fresh_database_has_everything_pending() {
        let db = memory().await;
        assert_eq!(
            db.status().await.unwrap(),
            [
                ("d5645c915d0e".to_owned(), false),
                ("dba7f71618f5".to_owned(), false)
            ]
        );
        assert_eq!(db.current_revision().await.unwrap(), None);
    }

    #[tokio::test]
    async fn upgrade_and_downgrade_move_current_revision() {
        let db = memory().await;

        db.upgrade(Some(1)).await.unwrap();
        assert_eq!(
            db.current_revision().await.unwrap().as_deref(),
            Some("d5645c915d0e")
        );

        db.downgrade(1).await.unwrap();
        assert_eq!(db.current_revision().await.unwrap(), None);
    }
}
