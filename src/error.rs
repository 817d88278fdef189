//! Error types for quick-schema

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or validating column descriptors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid descriptor for column '{column}': {reason}")]
    InvalidDescriptor { column: String, reason: String },

    #[error("Failed to read descriptor file: {path}")]
    DescriptorReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse descriptor file: {path}")]
    DescriptorParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while registering databases and models
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("db: {database} not init!")]
    DatabaseNotInitialized { database: String },

    #[error("table: {table} already registered!")]
    DuplicateTable { table: String },

    #[error("model {table} has been already registered!")]
    DuplicateModel { table: String },

    #[error("model: {model} does not exist")]
    ModelNotFound { model: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}
