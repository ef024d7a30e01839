//! Filter script document I/O
//!
//! This crate reads and writes MeshLab `.mlx` filter script documents,
//! turning them into the `mlxscript-core` data model and back. Parsing is
//! strict: structural, schema and type failures are reported with the
//! offending element and line instead of being silently defaulted.

pub mod mlx;
pub mod error;

mod markup;

pub use error::*;
pub use mlx::{ScriptReader, ScriptWriter};

use mlxscript_core::FilterScript;
use std::path::Path;

/// Read a filter script document from a file
pub fn read_script<P: AsRef<Path>>(path: P) -> Result<FilterScript> {
    ScriptReader::read_script(path)
}

/// Parse a filter script document from text
pub fn parse_script(input: &str) -> Result<FilterScript> {
    ScriptReader::parse(input)
}

/// Write a filter script document to a file
pub fn write_script<P: AsRef<Path>>(script: &FilterScript, path: P) -> Result<()> {
    ScriptWriter::write_script(script, path)
}

/// Serialize a filter script to document text
pub fn to_document(script: &FilterScript) -> String {
    ScriptWriter::to_document(script)
}
