use anyhow::Result;
use migration::MigratorTrait;
use models::db::connect_from_env;
use sea_orm::DatabaseConnection;

/// Connect and migrate, or return None when the environment has no database
/// configured so the caller can skip.
pub async fn test_db() -> Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let db = connect_from_env().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("migrations notice: {}", e);
    }
    Ok(Some(db))
}
