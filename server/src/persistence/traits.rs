//! Async repository contract shared by every person backend.
//!
//! Methods return `impl Future + Send` rather than using `async fn` so that
//! the futures are guaranteed `Send` and can be driven from `tokio::spawn`.
//! Dropping a returned future is the only cancellation mechanism; neither
//! backend checks for cancellation once a call is underway.

use person::Person;
use std::future::Future;

use super::PersistenceError;

/// Read and append access to person records.
///
/// "Not found" is a normal outcome: lookups return `Ok(None)` or an empty
/// `Vec`, never an error.
pub trait PersonRepository: Send + Sync {
    /// Every known record, in a stable backend-specific order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Person>, PersistenceError>> + Send;

    /// Exact match on `id`.
    fn get_by_id(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<Person>, PersistenceError>> + Send;

    /// Case-insensitive exact match on the resolved color name. A blank
    /// `color` matches nothing.
    fn get_by_color(
        &self,
        color: &str,
    ) -> impl Future<Output = Result<Vec<Person>, PersistenceError>> + Send;

    /// Persist `person` and return the stored form with its assigned `id`.
    /// Any `id` already set on the input is ignored.
    fn add(&self, person: Person) -> impl Future<Output = Result<Person, PersistenceError>> + Send;
}
