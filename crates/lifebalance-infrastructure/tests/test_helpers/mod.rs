use lifebalance_infrastructure::persistence::Database;
use sqlx::SqlitePool;

pub async fn setup_in_memory_db() -> SqlitePool {
    let db = Database::in_memory().await.expect("open in-memory db");
    db.run_migrations().await.expect("run migrations");
    db.pool().clone()
}
