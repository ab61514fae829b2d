//! Flat-file person repository.
//!
//! The file is read and parsed once, on first access, into an in-memory
//! cache that serves every later read. Appends go to the end of the file and
//! to the cache; nothing else ever invalidates the cache.

use person::{ColorTable, Person, RecordCodec};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use super::traits::PersonRepository;
use super::PersistenceError;

pub struct CsvPersonRepository {
    path: PathBuf,
    codec: RecordCodec,
    cache: OnceLock<RwLock<Vec<Person>>>,
    /// Serialises the first load; never held once the cache is populated.
    load_lock: Mutex<()>,
}

impl CsvPersonRepository {
    /// Create a repository over the file at `path`.
    ///
    /// Fails with [`PersistenceError::MissingColorTable`] when no color table
    /// (or an empty one) is supplied. The file itself is not touched until
    /// the first read or write.
    pub fn new(path: PathBuf, colors: Option<Arc<ColorTable>>) -> Result<Self, PersistenceError> {
        let colors = match colors {
            Some(colors) if !colors.is_empty() => colors,
            _ => return Err(PersistenceError::MissingColorTable),
        };

        Ok(Self {
            path,
            codec: RecordCodec::new(colors)?,
            cache: OnceLock::new(),
            load_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Copy `source` into place if the backing file does not exist yet.
    /// Returns `true` when a copy was made.
    pub fn seed_from(&self, source: &Path) -> Result<bool, PersistenceError> {
        if self.path.exists() || !source.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(source, &self.path)?;
        info!(
            source = %source.display(),
            path = %self.path.display(),
            "Seeded person CSV from defaults"
        );
        Ok(true)
    }

    /// Return the cache, reading and parsing the file first if needed.
    ///
    /// Concurrent first callers queue on `load_lock`; only one of them reads
    /// the file. A failed read leaves the cache empty so a later call retries.
    async fn ensure_loaded(&self) -> Result<&RwLock<Vec<Person>>, PersistenceError> {
        if let Some(cache) = self.cache.get() {
            return Ok(cache);
        }

        let _guard = self.load_lock.lock().await;
        if let Some(cache) = self.cache.get() {
            return Ok(cache);
        }

        let text = tokio::fs::read_to_string(&self.path).await?;
        let people = self.codec.parse_document(&text);
        let lines = text.lines().count();
        if lines > people.len() {
            debug!(
                skipped = lines - people.len(),
                "Skipped CSV lines with fewer than four fields"
            );
        }
        info!(
            path = %self.path.display(),
            count = people.len(),
            "Loaded person records from CSV"
        );

        Ok(self.cache.get_or_init(|| RwLock::new(people)))
    }

    async fn append_line(&self, line: &str) -> Result<(), PersistenceError> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("\n{line}").as_bytes()).await?;
        file.sync_data().await?;
        Ok(())
    }
}

impl PersonRepository for CsvPersonRepository {
    async fn get_all(&self) -> Result<Vec<Person>, PersistenceError> {
        let cache = self.ensure_loaded().await?;
        let people = cache.read().await;
        Ok(people.clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Person>, PersistenceError> {
        let cache = self.ensure_loaded().await?;
        let people = cache.read().await;
        Ok(people.iter().find(|p| p.id == id).cloned())
    }

    async fn get_by_color(&self, color: &str) -> Result<Vec<Person>, PersistenceError> {
        let cache = self.ensure_loaded().await?;
        let people = cache.read().await;
        Ok(people.iter().filter(|p| p.has_color(color)).cloned().collect())
    }

    async fn add(&self, person: Person) -> Result<Person, PersistenceError> {
        let cache = self.ensure_loaded().await?;

        // The write guard spans id allocation and the file append, so the
        // file order matches the cache order and a failed write leaves the
        // cache untouched.
        let mut people = cache.write().await;
        let id = people.iter().map(|p| p.id).max().map_or(1, |max| max + 1);
        let stored = person.with_id(id);

        self.append_line(&self.codec.format_line(&stored)).await?;
        people.push(stored.clone());

        info!(id = stored.id, path = %self.path.display(), "Appended person to CSV");
        Ok(stored)
    }
}
