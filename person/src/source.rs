//! Backend discriminator read from configuration.

use std::fmt;
use std::str::FromStr;

/// Which storage backend serves person records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSourceType {
    /// Flat delimited text file.
    Csv,
    /// Relational store.
    Database,
}

/// Raised for any discriminator outside the known backends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported data source: {0}")]
pub struct UnsupportedDataSource(pub String);

impl DataSourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Database => "database",
        }
    }
}

impl fmt::Display for DataSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i32> for DataSourceType {
    type Error = UnsupportedDataSource;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Csv),
            1 => Ok(Self::Database),
            other => Err(UnsupportedDataSource(other.to_string())),
        }
    }
}

impl FromStr for DataSourceType {
    type Err = UnsupportedDataSource;

    /// Accepts the backend name in any case, or its numeric value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("csv") {
            return Ok(Self::Csv);
        }
        if trimmed.eq_ignore_ascii_case("database") {
            return Ok(Self::Database);
        }
        match trimmed.parse::<i32>() {
            Ok(value) => Self::try_from(value),
            Err(_) => Err(UnsupportedDataSource(s.to_string())),
        }
    }
}

impl TryFrom<&str> for DataSourceType {
    type Error = UnsupportedDataSource;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_ignore_case() {
        assert_eq!("csv".parse::<DataSourceType>(), Ok(DataSourceType::Csv));
        assert_eq!("CSV".parse::<DataSourceType>(), Ok(DataSourceType::Csv));
        assert_eq!(
            " Database ".parse::<DataSourceType>(),
            Ok(DataSourceType::Database)
        );
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!("0".parse::<DataSourceType>(), Ok(DataSourceType::Csv));
        assert_eq!("1".parse::<DataSourceType>(), Ok(DataSourceType::Database));
    }

    #[test]
    fn test_out_of_range_value() {
        let err = DataSourceType::try_from(999).unwrap_err();
        assert!(err.to_string().contains("Unsupported data source"));

        let err = "7".parse::<DataSourceType>().unwrap_err();
        assert!(err.to_string().contains("Unsupported data source"));
    }

    #[test]
    fn test_unknown_name() {
        let err = DataSourceType::try_from("json").unwrap_err();
        assert_eq!(err, UnsupportedDataSource("json".to_string()));
        assert!(err.to_string().contains("Unsupported data source"));
    }

    #[test]
    fn test_display_roundtrip() {
        for source in [DataSourceType::Csv, DataSourceType::Database] {
            assert_eq!(source.to_string().parse::<DataSourceType>(), Ok(source));
        }
    }
}
