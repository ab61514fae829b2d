//! SQLite-backed implementation of [`PersonRepository`].

use person::Person;
use sqlx::SqlitePool;

use crate::persistence::traits::PersonRepository;
use crate::persistence::PersistenceError;

const SELECT_PERSON: &str =
    "SELECT id, first_name, last_name, zip_code, city, color FROM persons";

/// Row type for person queries, mapped via `sqlx::FromRow`.
#[derive(sqlx::FromRow)]
struct PersonRow {
    id: i64,
    first_name: Option<String>,
    last_name: Option<String>,
    zip_code: Option<String>,
    city: Option<String>,
    color: Option<String>,
}

impl From<PersonRow> for Person {
    fn from(r: PersonRow) -> Self {
        Self {
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
            zip_code: r.zip_code,
            city: r.city,
            color: r.color,
        }
    }
}

/// SQLite implementation of [`PersonRepository`].
///
/// Only reads and inserts go through here; the import routine is the one
/// place that deletes rows.
#[derive(Clone)]
pub struct SqlitePersonRepository {
    pool: SqlitePool,
}

impl SqlitePersonRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl PersonRepository for SqlitePersonRepository {
    async fn get_all(&self) -> Result<Vec<Person>, PersistenceError> {
        let rows: Vec<PersonRow> = sqlx::query_as(&format!("{SELECT_PERSON} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Person::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Person>, PersistenceError> {
        let row: Option<PersonRow> = sqlx::query_as(&format!("{SELECT_PERSON} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Person::from))
    }

    async fn get_by_color(&self, color: &str) -> Result<Vec<Person>, PersistenceError> {
        if color.trim().is_empty() {
            return Ok(Vec::new());
        }

        // SQLite's lower() only folds ASCII, so the comparison happens here.
        let rows: Vec<PersonRow> = sqlx::query_as(&format!(
            "{SELECT_PERSON} WHERE color IS NOT NULL ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(Person::from)
            .filter(|p| p.has_color(color))
            .collect())
    }

    async fn add(&self, person: Person) -> Result<Person, PersistenceError> {
        let result = sqlx::query(
            r#"
            INSERT INTO persons (first_name, last_name, zip_code, city, color)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(&person.zip_code)
        .bind(&person.city)
        .bind(&person.color)
        .execute(&self.pool)
        .await?;

        let stored = person.with_id(result.last_insert_rowid());
        tracing::debug!(id = stored.id, "Inserted person into SQLite");
        Ok(stored)
    }
}
