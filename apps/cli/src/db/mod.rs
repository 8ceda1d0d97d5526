//! Local SQLite collection.

pub mod collection;
pub mod error;
pub mod schema;

pub use collection::{field_checksum, SqliteCollection, StoredNote};
pub use error::DbError;
