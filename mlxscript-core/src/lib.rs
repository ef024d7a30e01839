//! Core data structures for MeshLab filter scripts
//!
//! This crate provides the in-memory model of a filter script: an ordered
//! sequence of named filters, each carrying zero or more typed parameters.
//! Reading and writing the `.mlx` document format lives in `mlxscript-io`.

pub mod param;
pub mod filter;
pub mod script;
pub mod decimation;
pub mod error;

pub use param::*;
pub use filter::*;
pub use script::*;
pub use decimation::*;
pub use error::*;

/// Common result type for mlxscript model operations
pub type Result<T> = std::result::Result<T, Error>;
