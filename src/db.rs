use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;

/// Shared r2d2 pool over the SQLite database.
pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// A single checked-out connection.
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(Debug, Clone, Copy)]
struct ConnectionOptions;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(
            "PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;",
        )
        .map_err(r2d2::Error::QueryError)
    }
}

/// Build a connection pool for `database_url` with WAL and foreign keys
/// enabled on every connection.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
}
