//! Configuration for the person server
//!
//! Every value comes from an environment variable with a fallback:
//! - PERSON_DATA_DIR (default ./data)
//! - PERSON_CSV_PATH (default <data dir>/sample-input.csv)
//! - PERSON_DATABASE_PATH (default <data dir>/persons.db)
//! - PERSON_DATABASE_MAX_CONNECTIONS (default 5)
//! - PERSON_DATA_SOURCE (required, `csv` or `database`)
//! - PERSON_IMPORT_ON_STARTUP (`true` or `1` enables the CSV import)
//! - PERSON_COLOR_MAPPING_PATH (default <crate>/defaults/colors.json)

use person::ColorTable;
use std::path::{Path, PathBuf};

const DEV_DATA_DIR: &str = "./data";
const CSV_FILE_NAME: &str = "sample-input.csv";
const DATABASE_FILE_NAME: &str = "persons.db";
const COLOR_MAPPING_FILE_NAME: &str = "colors.json";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

const DATA_DIR_VAR: &str = "PERSON_DATA_DIR";
const CSV_PATH_VAR: &str = "PERSON_CSV_PATH";
const DATABASE_PATH_VAR: &str = "PERSON_DATABASE_PATH";
const DATABASE_MAX_CONNECTIONS_VAR: &str = "PERSON_DATABASE_MAX_CONNECTIONS";
const DATA_SOURCE_VAR: &str = "PERSON_DATA_SOURCE";
const IMPORT_ON_STARTUP_VAR: &str = "PERSON_IMPORT_ON_STARTUP";
const COLOR_MAPPING_PATH_VAR: &str = "PERSON_COLOR_MAPPING_PATH";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PERSON_DATA_SOURCE is not set; expected `csv` or `database`")]
    MissingDataSource,
    #[error("Failed to read color mapping {path}: {source}")]
    ColorMappingRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid color mapping {path}: {source}")]
    ColorMappingParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

fn non_blank_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get the data directory holding the CSV file and the SQLite database.
pub fn get_data_dir() -> PathBuf {
    non_blank_var(DATA_DIR_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEV_DATA_DIR))
}

pub fn get_csv_path(data_dir: &Path) -> PathBuf {
    non_blank_var(CSV_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join(CSV_FILE_NAME))
}

pub fn get_database_path(data_dir: &Path) -> PathBuf {
    non_blank_var(DATABASE_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join(DATABASE_FILE_NAME))
}

/// Pool size for the SQLite database. A single CLI command rarely needs
/// more than one connection; the headroom covers WAL readers during an
/// import. Zero or unparsable values fall back to the default.
pub fn get_database_max_connections() -> u32 {
    parse_max_connections(non_blank_var(DATABASE_MAX_CONNECTIONS_VAR).as_deref())
}

fn parse_max_connections(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS)
}

/// The raw backend discriminator. Parsing is left to the repository factory
/// so that unknown values fail with the factory's error.
pub fn get_data_source() -> Result<String, ConfigError> {
    non_blank_var(DATA_SOURCE_VAR).ok_or(ConfigError::MissingDataSource)
}

pub fn get_import_on_startup() -> bool {
    std::env::var(IMPORT_ON_STARTUP_VAR)
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    value == "1" || value.eq_ignore_ascii_case("true")
}

/// Get the directory containing the bundled color table and sample CSV.
///
/// This is always relative to the crate, not configurable.
pub fn get_defaults_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("defaults")
}

pub fn get_color_mapping_path() -> PathBuf {
    non_blank_var(COLOR_MAPPING_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| get_defaults_dir().join(COLOR_MAPPING_FILE_NAME))
}

/// Load the color code table from a JSON object such as `{"1": "blau"}`.
///
/// A missing file is not an error here: it yields `None`, and the CSV
/// repository refuses to start without a table.
pub fn load_color_table(path: &Path) -> Result<Option<ColorTable>, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Color mapping file not found");
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::ColorMappingRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let table: ColorTable =
        serde_json::from_str(&text).map_err(|source| ConfigError::ColorMappingParse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_defaults_dir() {
        let dir = get_defaults_dir();
        assert!(dir.ends_with("server/defaults"));
    }

    #[test]
    fn test_paths_default_under_data_dir() {
        // Note: assumes PERSON_CSV_PATH and PERSON_DATABASE_PATH are not set
        let data_dir = Path::new("/tmp/person-data");
        if std::env::var(CSV_PATH_VAR).is_err() {
            assert_eq!(get_csv_path(data_dir), data_dir.join("sample-input.csv"));
        }
        if std::env::var(DATABASE_PATH_VAR).is_err() {
            assert_eq!(get_database_path(data_dir), data_dir.join("persons.db"));
        }
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" 1 "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("yes"));
    }

    #[test]
    fn test_parse_max_connections() {
        assert_eq!(parse_max_connections(None), DEFAULT_DATABASE_MAX_CONNECTIONS);
        assert_eq!(parse_max_connections(Some("8")), 8);
        assert_eq!(parse_max_connections(Some(" 2 ")), 2);
        assert_eq!(parse_max_connections(Some("0")), DEFAULT_DATABASE_MAX_CONNECTIONS);
        assert_eq!(parse_max_connections(Some("viele")), DEFAULT_DATABASE_MAX_CONNECTIONS);
    }

    #[test]
    fn test_bundled_color_mapping_loads_in_order() {
        let table = load_color_table(&get_defaults_dir().join("colors.json"))
            .unwrap()
            .unwrap();
        assert_eq!(table.len(), 7);
        assert_eq!(table.name_for(1), Some("blau"));
        assert_eq!(table.name_for(7), Some("weiß"));
        let codes: Vec<i32> = table.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_missing_color_mapping_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_color_table(&dir.path().join("colors.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_malformed_color_mapping_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colors.json");
        std::fs::write(&path, r#"{"eins": "blau"}"#).unwrap();

        let result = load_color_table(&path);
        assert!(matches!(result, Err(ConfigError::ColorMappingParse { .. })));
    }

    // Environment variable overrides are not tested here to avoid test pollution
}
