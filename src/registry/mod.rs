//! Database and model registry

mod config;
mod model;
#[allow(clippy::module_inception)]
mod registry;

pub use config::{
    DatabaseConfig, DatabaseModules, InitOptions, TableColumns, TableConfig, TableModule,
};
pub use model::{Database, ModelDefinition};
pub use registry::Registry;
