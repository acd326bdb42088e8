//! Database access: the async connection pool used by repositories and the
//! embedded migrations applied by `migrate` and `database.auto_migrate`.

pub mod migrations;
mod pool;

pub use migrations::MIGRATIONS;
pub use pool::{AsyncDbPool, establish_async_connection_pool};
