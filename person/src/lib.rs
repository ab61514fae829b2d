//! Domain types for the person record service.
//!
//! This crate owns everything that does not depend on a storage engine:
//! the [`Person`] record, the [`ColorTable`] that maps numeric color codes to
//! names, the [`DataSourceType`] discriminator used to pick a backend, and the
//! [`RecordCodec`] that reads and writes the flat-file line format.

pub mod color;
pub mod person;
pub mod record;
pub mod source;

pub use color::ColorTable;
pub use person::Person;
pub use record::{CodecError, RecordCodec};
pub use source::{DataSourceType, UnsupportedDataSource};
