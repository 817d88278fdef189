//! Registered databases and model definitions

use serde::Serialize;
use serde_json::{Map, Value};

use super::DatabaseConfig;
use crate::model::CompiledSchema;

/// An initialized logical database
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    pub name: String,
    pub url: String,
    pub settings: Map<String, Value>,
    /// Tables defined on this database, in registration order
    pub tables: Vec<String>,
}

impl Database {
    pub(crate) fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            name: config.name.clone(),
            url: config.url.clone(),
            settings: config.settings.clone(),
            tables: Vec::new(),
        }
    }
}

/// Table definition bound to a database
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDefinition {
    pub database: String,
    pub table_name: String,
    pub columns: CompiledSchema,
    /// Values copied from the schema module
    pub attributes: Map<String, Value>,
    /// Maintain `createdAt` / `updatedAt`
    pub timestamps: bool,
    /// Use the table name as given, without pluralizing
    pub freeze_table_name: bool,
}

impl ModelDefinition {
    pub fn new(database: &str, table_name: &str, columns: CompiledSchema) -> Self {
        Self {
            database: database.to_string(),
            table_name: table_name.to_string(),
            columns,
            attributes: Map::new(),
            timestamps: true,
            freeze_table_name: true,
        }
    }

    /// `<database>.<table>`
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.database, &self.table_name)
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

pub(crate) fn qualified_name(database: &str, table_name: &str) -> String {
    format!("{}.{}", database, table_name)
}
