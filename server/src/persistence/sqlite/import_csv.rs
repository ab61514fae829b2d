use person::Person;
use sqlx::{SqlitePool, Transaction};
use tracing::info;

use crate::persistence::traits::PersonRepository;
use crate::persistence::{CsvPersonRepository, PersistenceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows removed from `persons` before the insert.
    pub deleted: u64,
    pub imported: u64,
}

/// Replace every row in `persons` with the records of the CSV repository.
///
/// The delete is committed on its own before the insert transaction starts.
/// If the insert fails, the table stays empty and the error is returned
/// unchanged.
pub async fn import_csv_to_sqlite(
    csv: &CsvPersonRepository,
    pool: &SqlitePool,
) -> Result<ImportReport, PersistenceError> {
    info!(path = %csv.path().display(), "Starting CSV to SQLite import");

    let people = csv.get_all().await?;

    let deleted = sqlx::query("DELETE FROM persons")
        .execute(pool)
        .await?
        .rows_affected();
    info!(deleted, "Cleared persons table");

    let mut tx = pool.begin().await?;
    insert_persons(&mut tx, &people).await?;
    tx.commit().await?;

    let report = ImportReport {
        deleted,
        imported: people.len() as u64,
    };

    info!(
        deleted = report.deleted,
        imported = report.imported,
        "CSV to SQLite import completed"
    );

    Ok(report)
}

async fn insert_persons(
    tx: &mut Transaction<'_, sqlx::Sqlite>,
    people: &[Person],
) -> Result<(), PersistenceError> {
    for person in people {
        sqlx::query(
            r#"
            INSERT INTO persons (id, first_name, last_name, zip_code, city, color)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(person.id)
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(&person.zip_code)
        .bind(&person.city)
        .bind(&person.color)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
