//! quick-schema: a shorthand compiler for database column schemas
//!
//! Table columns are described with terse positional descriptors such as
//! `["userName", "s=64", "$f", "guest"]` and compiled into structured column
//! records keyed by name. A small registry binds compiled schemas to model
//! definitions across several logical databases.

pub mod error;
pub mod model;
pub mod parser;
pub mod registry;
mod util;

use std::path::PathBuf;

use anyhow::Result;
use log::info;

pub use error::{RegistryError, SchemaError};
pub use model::{compile, compile_strict, CompileOptions, CompiledSchema};
pub use parser::{normalize, Descriptor};
pub use registry::Registry;

/// Options for compiling a descriptor file
#[derive(Debug, Clone)]
pub struct CompileFileOptions {
    /// Path to a JSON file holding the descriptor list
    pub input_path: PathBuf,
    /// Compile options applied to the whole list
    pub compile: CompileOptions,
    /// Reject descriptors that would only degrade silently
    pub strict: bool,
}

/// Read a JSON descriptor list from disk and compile it
pub fn compile_file(options: &CompileFileOptions) -> Result<CompiledSchema> {
    let path = &options.input_path;
    let text = std::fs::read_to_string(path).map_err(|source| SchemaError::DescriptorReadError {
        path: path.clone(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| SchemaError::DescriptorParseError {
            path: path.clone(),
            source,
        })?;

    let descriptors = parser::parse_descriptors(value);
    info!(
        "Compiling {} descriptors from {}",
        descriptors.len(),
        path.display()
    );

    let schema = if options.strict {
        compile_strict(&descriptors, &options.compile)?
    } else {
        compile(&descriptors, &options.compile)
    };

    info!("Compiled schema with {} columns", schema.len());
    Ok(schema)
}
