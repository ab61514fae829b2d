//! Request layer: one subcommand per repository operation, rendered as JSON.

use clap::{Args, Subcommand};
use person::Person;

use crate::persistence::sqlite::import_csv_to_sqlite;
use crate::persistence::traits::PersonRepository;
use crate::persistence::{PersistenceError, PersonBackend, PersonRepositoryFactory};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every person.
    List,
    /// Show one person by id.
    Get { id: i64 },
    /// List persons with the given color (case-insensitive).
    Color { name: String },
    /// Add a person and print it with its assigned id.
    Add(NewPerson),
    /// Replace the database contents with the CSV file.
    Import,
}

#[derive(Debug, Args)]
pub struct NewPerson {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub zip_code: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Name and Lastname are required.")]
    MissingName,
    #[error("Person {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("Failed to render output: {0}")]
    Json(#[from] serde_json::Error),
}

impl NewPerson {
    /// Check the names and build the record to store.
    fn into_person(self) -> Result<Person, CommandError> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(CommandError::MissingName);
        }
        Ok(Person {
            id: 0,
            first_name: Some(self.first_name),
            last_name: Some(self.last_name),
            zip_code: self.zip_code,
            city: self.city,
            color: self.color,
        })
    }
}

/// Select the backend named by `source`, then run the CSV import if asked.
///
/// The import wipes the database, so an unsupported `source` must fail
/// before it starts.
pub async fn open_backend(
    factory: &PersonRepositoryFactory,
    source: &str,
    import: bool,
) -> Result<PersonBackend, PersistenceError> {
    let backend = factory.create_repository_for(source)?;
    if import {
        import_csv_to_sqlite(factory.csv(), factory.database().pool()).await?;
    }
    Ok(backend)
}

/// Run `command` against `repo` and return the text to print.
///
/// `import` always reads the factory's CSV repository and writes its
/// database, whichever backend `repo` is.
pub async fn execute<R: PersonRepository>(
    command: Command,
    repo: &R,
    factory: &PersonRepositoryFactory,
) -> Result<String, CommandError> {
    let output = match command {
        Command::List => serde_json::to_string_pretty(&repo.get_all().await?)?,
        Command::Get { id } => {
            let person = repo.get_by_id(id).await?.ok_or(CommandError::NotFound(id))?;
            serde_json::to_string_pretty(&person)?
        }
        Command::Color { name } => serde_json::to_string_pretty(&repo.get_by_color(&name).await?)?,
        Command::Add(new_person) => {
            let stored = repo.add(new_person.into_person()?).await?;
            serde_json::to_string_pretty(&stored)?
        }
        Command::Import => {
            let report = import_csv_to_sqlite(factory.csv(), factory.database().pool()).await?;
            serde_json::to_string_pretty(&serde_json::json!({
                "deleted": report.deleted,
                "imported": report.imported,
            }))?
        }
    };
    Ok(output)
}
