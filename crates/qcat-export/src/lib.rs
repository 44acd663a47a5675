//! Flat-file persistence for normalized category results.
//!
//! Each category can be written as a pretty-printed JSON record list, a CSV
//! table, or both. Both formats use the field order of
//! [`qcat_core::CanonicalProduct`].

pub mod error;
pub mod writer;

pub use error::ExportError;
pub use writer::{export_category, file_stem, write_csv, write_json, ExportedFiles};
