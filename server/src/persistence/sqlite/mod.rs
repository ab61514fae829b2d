//! SQLite-backed person storage.
//!
//! ## Database setup
//!
//! [`Database`] wraps a `sqlx::SqlitePool` configured with:
//! - **WAL mode**: one writer and multiple concurrent readers.
//! - **Embedded migrations**: `sqlx::migrate!` runs `migrations/001_initial_schema.sql`
//!   automatically when [`Database::open`] is called. The schema is idempotent.
//!
//! ## Repository
//!
//! [`SqlitePersonRepository`] holds a cloned `SqlitePool` and implements
//! [`crate::persistence::traits::PersonRepository`]. Identity comes from the
//! `persons.id` autoincrement column.
//!
//! ## CSV import
//!
//! [`import_csv_to_sqlite`] replaces the whole `persons` table with the
//! contents of the flat file. It is destructive and only runs when asked for
//! (startup flag or the `import` command).

mod database;
mod import_csv;
#[cfg(test)]
mod integration_tests;
mod person_repo;

pub use database::Database;
pub use import_csv::import_csv_to_sqlite;
pub use person_repo::SqlitePersonRepository;
