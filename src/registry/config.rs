//! Registry inputs: database configs, table modules and init options

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{ColumnRecord, CompileOptions, CompiledSchema};
use crate::parser::{parse_descriptors, Descriptor};

/// Connection settings of one logical database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Logical database name; not kept in the stored settings
    pub name: String,
    #[serde(default)]
    pub url: String,
    /// Any other connection settings, kept as given
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl DatabaseConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            settings: Map::new(),
        }
    }
}

/// Options for [`Registry::init`](super::Registry::init)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitOptions {
    /// Also register each model under its bare table name
    #[serde(rename = "saveTableWithNoDB")]
    pub save_table_with_no_db: bool,
}

/// Column list of a table config
#[derive(Debug, Clone, PartialEq)]
pub enum TableColumns {
    /// Terse descriptors, compiled on registration
    Shorthand(Vec<Descriptor>),
    /// Columns already written out as `{ name: { ...record } }`
    Structured(CompiledSchema),
}

impl TableColumns {
    /// Resolve into a schema, compiling shorthand descriptors
    pub fn into_schema(self, options: &CompileOptions) -> CompiledSchema {
        match self {
            TableColumns::Shorthand(descriptors) => crate::model::compile(&descriptors, options),
            TableColumns::Structured(schema) => schema,
        }
    }
}

impl From<Value> for TableColumns {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(columns) => TableColumns::Structured(
                columns
                    .iter()
                    .map(|(name, record)| {
                        let record = match record {
                            Value::Object(object) => ColumnRecord::from_object(object),
                            _ => ColumnRecord::default(),
                        };
                        (name.clone(), record)
                    })
                    .collect(),
            ),
            other => TableColumns::Shorthand(parse_descriptors(other)),
        }
    }
}

/// `[tableName, columns, options?]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Value>")]
pub struct TableConfig {
    pub table_name: String,
    pub columns: TableColumns,
    pub options: CompileOptions,
}

impl TableConfig {
    pub fn new(table_name: impl Into<String>, columns: Vec<Descriptor>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: TableColumns::Shorthand(columns),
            options: CompileOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }
}

impl TryFrom<Vec<Value>> for TableConfig {
    type Error = String;

    fn try_from(parts: Vec<Value>) -> Result<Self, Self::Error> {
        let mut parts = parts.into_iter();
        let table_name = match parts.next() {
            Some(Value::String(name)) => name,
            Some(other) => return Err(format!("table name must be a string, got {}", other)),
            None => return Err("table config is empty".to_string()),
        };
        let columns = TableColumns::from(parts.next().unwrap_or(Value::Array(Vec::new())));
        let options = match parts.next() {
            None | Some(Value::Null) => CompileOptions::default(),
            Some(value) => serde_json::from_value(value)
                .map_err(|e| format!("invalid options for table {}: {}", table_name, e))?,
        };
        Ok(Self {
            table_name,
            columns,
            options,
        })
    }
}

/// One schema module: the table config plus any other exported values
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TableModule {
    #[serde(default)]
    pub config: Option<TableConfig>,
    /// Values copied onto the registered model
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Table modules belonging to one logical database
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DatabaseModules {
    pub database: String,
    #[serde(default)]
    pub modules: Vec<TableModule>,
}
