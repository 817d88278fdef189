//! Multi-database model registry

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, info};
use serde_json::{Map, Value};

use super::model::qualified_name;
use super::{
    Database, DatabaseConfig, DatabaseModules, InitOptions, ModelDefinition, TableConfig,
    TableModule,
};
use crate::error::RegistryError;

type Result<T> = std::result::Result<T, RegistryError>;

/// Databases and the models defined on them.
///
/// Models are looked up by `<database>.<table>`, and also by bare table name
/// when [`InitOptions::save_table_with_no_db`] is set.
#[derive(Debug, Default)]
pub struct Registry {
    options: InitOptions,
    configs: HashMap<String, DatabaseConfig>,
    databases: IndexMap<String, Database>,
    models: HashMap<String, Arc<ModelDefinition>>,
}

impl Registry {
    pub fn new(options: InitOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Register connection configs, then define every module's table.
    pub fn init(
        configs: Vec<DatabaseConfig>,
        modules: Vec<DatabaseModules>,
        options: InitOptions,
    ) -> Result<Self> {
        let mut registry = Self::new(options);

        for config in configs {
            registry.configure(config);
        }

        for group in modules {
            registry.open_database(&group.database)?;
            for module in group.modules {
                registry.load_module(&group.database, module)?;
            }
        }

        Ok(registry)
    }

    /// Register or replace the config of a database.
    pub fn configure(&mut self, config: DatabaseConfig) {
        self.configs.insert(config.name.clone(), config);
    }

    /// Initialize a configured database. Opening it again is a no-op.
    pub fn open_database(&mut self, name: &str) -> Result<&Database> {
        if !self.databases.contains_key(name) {
            let config =
                self.configs
                    .get(name)
                    .ok_or_else(|| RegistryError::DatabaseNotInitialized {
                        database: name.to_string(),
                    })?;
            info!("Initialized database '{}'", name);
            self.databases
                .insert(name.to_string(), Database::from_config(config));
        }
        Ok(&self.databases[name])
    }

    /// Define the table of a schema module. Modules without a config are
    /// skipped.
    pub fn load_module(
        &mut self,
        database: &str,
        module: TableModule,
    ) -> Result<Option<Arc<ModelDefinition>>> {
        match module.config {
            Some(config) => self.define(database, config, module.attributes).map(Some),
            None => {
                debug!("Skipping module without config in database '{}'", database);
                Ok(None)
            }
        }
    }

    /// Compile a table config and register the resulting model.
    pub fn define(
        &mut self,
        database: &str,
        config: TableConfig,
        attributes: Map<String, Value>,
    ) -> Result<Arc<ModelDefinition>> {
        if !self.databases.contains_key(database) {
            return Err(RegistryError::DatabaseNotInitialized {
                database: database.to_string(),
            });
        }

        let qualified = qualified_name(database, &config.table_name);
        if self.models.contains_key(&qualified) {
            return Err(RegistryError::DuplicateTable { table: qualified });
        }
        if self.options.save_table_with_no_db && self.models.contains_key(&config.table_name) {
            return Err(RegistryError::DuplicateModel {
                table: config.table_name,
            });
        }

        let columns = config.columns.into_schema(&config.options);
        let mut model = ModelDefinition::new(database, &config.table_name, columns);
        model.attributes = attributes;
        let model = Arc::new(model);

        if self.options.save_table_with_no_db {
            self.models
                .insert(config.table_name.clone(), Arc::clone(&model));
        }
        self.models.insert(qualified.clone(), Arc::clone(&model));
        if let Some(db) = self.databases.get_mut(database) {
            db.tables.push(config.table_name);
        }

        debug!(
            "Registered model '{}' with {} columns",
            qualified,
            model.columns.len()
        );
        Ok(model)
    }

    pub fn database(&self, name: &str) -> Option<&Database> {
        self.databases.get(name)
    }

    pub fn databases(&self) -> impl Iterator<Item = &Database> {
        self.databases.values()
    }

    pub fn model(&self, name: &str) -> Result<Arc<ModelDefinition>> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::ModelNotFound {
                model: name.to_string(),
            })
    }

    /// Registered models with their lookup keys. A model indexed under both
    /// its qualified and bare name appears twice.
    pub fn models(&self) -> impl Iterator<Item = (&str, &Arc<ModelDefinition>)> {
        self.models.iter().map(|(key, model)| (key.as_str(), model))
    }
}
