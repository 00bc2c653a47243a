pub mod connection;
pub mod courses;
pub mod events;
pub mod league;
pub mod players;
pub mod scores;
pub mod setup;

pub use connection::{DbConn, DbPool, create_memory_pool, create_pool, get_connection};
pub use league::SqliteLeague;
