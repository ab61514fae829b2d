use person::{DataSourceType, Person};
use std::sync::Arc;

use super::sqlite::SqlitePersonRepository;
use super::traits::PersonRepository;
use super::{CsvPersonRepository, PersistenceError};

/// The repository handed to the request layer.
///
/// The set of backends is closed, so an enum keeps dispatch static while
/// still letting callers hold one concrete type.
#[derive(Clone)]
pub enum PersonBackend {
    Csv(Arc<CsvPersonRepository>),
    Database(SqlitePersonRepository),
}

impl PersonBackend {
    pub fn source(&self) -> DataSourceType {
        match self {
            Self::Csv(_) => DataSourceType::Csv,
            Self::Database(_) => DataSourceType::Database,
        }
    }
}

impl PersonRepository for PersonBackend {
    async fn get_all(&self) -> Result<Vec<Person>, PersistenceError> {
        match self {
            Self::Csv(repo) => repo.get_all().await,
            Self::Database(repo) => repo.get_all().await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Person>, PersistenceError> {
        match self {
            Self::Csv(repo) => repo.get_by_id(id).await,
            Self::Database(repo) => repo.get_by_id(id).await,
        }
    }

    async fn get_by_color(&self, color: &str) -> Result<Vec<Person>, PersistenceError> {
        match self {
            Self::Csv(repo) => repo.get_by_color(color).await,
            Self::Database(repo) => repo.get_by_color(color).await,
        }
    }

    async fn add(&self, person: Person) -> Result<Person, PersistenceError> {
        match self {
            Self::Csv(repo) => repo.add(person).await,
            Self::Database(repo) => repo.add(person).await,
        }
    }
}
