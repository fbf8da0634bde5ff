use std::sync::Arc;

use uuid::Uuid;

use almoner_core::db::{self, DbPool};

/// Creates a fresh on-disk SQLite database under tests/output/ and returns
/// a migrated connection pool for it. Each caller gets its own file so the
/// tests can run in parallel.
pub fn setup_test_db(test_id: &str) -> Arc<DbPool> {
    let dir = format!("./tests/output/{}-{}", test_id, Uuid::new_v4());
    std::fs::create_dir_all(&dir).expect("Failed to create test database directory");

    let db_path = format!("{}/inventory.db", dir);
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");
    pool
}
