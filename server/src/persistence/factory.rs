use person::{DataSourceType, UnsupportedDataSource};
use std::sync::Arc;

use super::sqlite::SqlitePersonRepository;
use super::{CsvPersonRepository, PersistenceError, PersonBackend};

/// Binds a [`DataSourceType`] to one of the already-constructed backends.
///
/// Both repositories are built up front and shared, so every backend handed
/// out for `Csv` sees the same cache.
#[derive(Clone)]
pub struct PersonRepositoryFactory {
    csv: Arc<CsvPersonRepository>,
    database: SqlitePersonRepository,
}

impl PersonRepositoryFactory {
    pub fn new(csv: Arc<CsvPersonRepository>, database: SqlitePersonRepository) -> Self {
        Self { csv, database }
    }

    pub fn create_repository(&self, source: DataSourceType) -> PersonBackend {
        match source {
            DataSourceType::Csv => PersonBackend::Csv(Arc::clone(&self.csv)),
            DataSourceType::Database => PersonBackend::Database(self.database.clone()),
        }
    }

    /// Like [`Self::create_repository`] for a raw discriminator (an `i32`
    /// or a name), failing with "Unsupported data source" when it names no
    /// known backend.
    pub fn create_repository_for<D>(&self, source: D) -> Result<PersonBackend, PersistenceError>
    where
        D: TryInto<DataSourceType, Error = UnsupportedDataSource>,
    {
        let source = source.try_into()?;
        tracing::debug!(%source, "Selected person repository");
        Ok(self.create_repository(source))
    }

    pub fn csv(&self) -> &Arc<CsvPersonRepository> {
        &self.csv
    }

    pub fn database(&self) -> &SqlitePersonRepository {
        &self.database
    }
}
