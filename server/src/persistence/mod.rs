//! Person storage.
//!
//! Two interchangeable backends implement [`traits::PersonRepository`]:
//! [`CsvPersonRepository`] (flat file, lazily cached, append-only) and
//! [`sqlite::SqlitePersonRepository`]. [`PersonRepositoryFactory`] binds a
//! configured [`person::DataSourceType`] to one of them.

mod backend;
mod csv_store;
mod factory;
pub mod sqlite;
pub mod traits;

pub use backend::PersonBackend;
pub use csv_store::CsvPersonRepository;
pub use factory::PersonRepositoryFactory;

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(String),
    #[error("Color code table is missing or empty")]
    MissingColorTable,
    #[error("Record codec error: {0}")]
    Codec(#[from] person::CodecError),
    #[error(transparent)]
    UnsupportedDataSource(#[from] person::UnsupportedDataSource),
}
