//! SQLite connection pooling and schema migrations.

use std::time::Duration;

use diesel::SqliteConnection;
use diesel::expression::functions::declare_sql_function;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sql_types::Text;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::repository::errors::{RepositoryError, RepositoryResult};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[declare_sql_function]
extern "SQL" {
    /// Lower-cases every Unicode letter. SQLite's built-in `lower` and `LIKE`
    /// only fold ASCII.
    fn unicode_lower(text: Text) -> Text;
}

/// Registers the crate's SQL functions on every new pooled connection.
#[derive(Debug, Clone, Copy)]
struct CatalogFunctions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for CatalogFunctions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        unicode_lower_utils::register_impl(conn, |text: String| text.to_lowercase())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds a pool and verifies the store is reachable.
pub fn establish_connection_pool(database_url: &str) -> RepositoryResult<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Ok(Pool::builder()
        .connection_customizer(Box::new(CatalogFunctions))
        .build(manager)?)
}

/// Builds a pool without touching the store.
///
/// Connections are opened on demand, so the server can start while the store
/// is unreachable; requests then fail with [`RepositoryError::Unavailable`]
/// once `connection_timeout` elapses.
pub fn lazy_connection_pool(database_url: &str, connection_timeout: Duration) -> DbPool {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .min_idle(Some(0))
        .connection_timeout(connection_timeout)
        .connection_customizer(Box::new(CatalogFunctions))
        .build_unchecked(manager)
}

/// Applies every pending embedded migration.
pub fn run_migrations(pool: &DbPool) -> RepositoryResult<()> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| RepositoryError::Migration(e.to_string()))?;
    if !applied.is_empty() {
        log::info!("Applied {} migration(s)", applied.len());
    }
    Ok(())
}
