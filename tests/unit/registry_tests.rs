//! Unit tests for the database and model registry

use serde_json::{json, Map, Value};

use quick_schema::model::{ColumnType, ColumnTypeSpec};
use quick_schema::registry::{
    DatabaseConfig, DatabaseModules, InitOptions, Registry, TableColumns, TableConfig, TableModule,
};
use quick_schema::RegistryError;

/// Helper to build database configs from JSON
fn configs(value: Value) -> Vec<DatabaseConfig> {
    serde_json::from_value(value).unwrap()
}

/// Helper to build module groups from JSON
fn modules(value: Value) -> Vec<DatabaseModules> {
    serde_json::from_value(value).unwrap()
}

fn shop_modules() -> Vec<DatabaseModules> {
    modules(json!([
        {
            "database": "shop",
            "modules": [
                {
                    "config": ["orders", [["id", "u"], ["totalCents", "i", "$f", 0]]],
                    "label": "Orders",
                    "pageSize": 50
                },
                {
                    "config": ["customers", ["id,bi", "fullName,s=128,$f"], {"setPrimaryKey": true}]
                },
                { "helpers": ["no config here"] }
            ]
        }
    ]))
}

// ============================================================================
// Init Tests
// ============================================================================

#[test]
fn test_init_registers_models_under_qualified_names() {
    let registry = Registry::init(
        configs(json!([{ "name": "shop", "url": "postgres://localhost/shop" }])),
        shop_modules(),
        InitOptions::default(),
    )
    .unwrap();

    let orders = registry.model("shop.orders").unwrap();
    assert_eq!(orders.table_name, "orders");
    assert_eq!(orders.database, "shop");
    assert_eq!(orders.qualified_name(), "shop.orders");
    assert!(orders.timestamps);
    assert!(orders.freeze_table_name);
    assert_eq!(
        orders.columns.get("id").unwrap().column_type,
        Some(ColumnTypeSpec::Plain(ColumnType::Uuid))
    );
    assert_eq!(
        orders.columns.get("totalCents").unwrap().field.as_deref(),
        Some("total_cents")
    );

    let customers = registry.model("shop.customers").unwrap();
    assert_eq!(customers.columns.len(), 2);
    assert!(customers.columns.get("id").unwrap().is_primary_key());
}

#[test]
fn test_init_copies_module_attributes() {
    let registry = Registry::init(
        configs(json!([{ "name": "shop", "url": "postgres://localhost/shop" }])),
        shop_modules(),
        InitOptions::default(),
    )
    .unwrap();

    let orders = registry.model("shop.orders").unwrap();
    assert_eq!(orders.attribute("label"), Some(&json!("Orders")));
    assert_eq!(orders.attribute("pageSize"), Some(&json!(50)));
    assert_eq!(orders.attribute("config"), None);
}

#[test]
fn test_init_skips_modules_without_config() {
    let registry = Registry::init(
        configs(json!([{ "name": "shop", "url": "" }])),
        shop_modules(),
        InitOptions::default(),
    )
    .unwrap();

    assert_eq!(registry.models().count(), 2);
    assert_eq!(
        registry.database("shop").unwrap().tables,
        vec!["orders".to_string(), "customers".to_string()]
    );
}

#[test]
fn test_init_keeps_database_settings() {
    let registry = Registry::init(
        configs(json!([{ "name": "shop", "url": "postgres://db/shop", "pool": 5 }])),
        vec![],
        InitOptions::default(),
    )
    .unwrap();

    // Configured but never opened: no modules referenced it
    assert!(registry.database("shop").is_none());

    let mut registry = registry;
    let db = registry.open_database("shop").unwrap();
    assert_eq!(db.url, "postgres://db/shop");
    assert_eq!(db.settings.get("pool"), Some(&json!(5)));
    assert!(!db.settings.contains_key("name"));
}

#[test]
fn test_init_unconfigured_database_fails() {
    let err = Registry::init(vec![], shop_modules(), InitOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::DatabaseNotInitialized { ref database } if database == "shop"
    ));
    assert_eq!(err.to_string(), "db: shop not init!");
}

// ============================================================================
// Lookup Tests
// ============================================================================

#[test]
fn test_bare_name_lookup_requires_option() {
    let registry = Registry::init(
        configs(json!([{ "name": "shop", "url": "" }])),
        shop_modules(),
        InitOptions::default(),
    )
    .unwrap();
    assert!(matches!(
        registry.model("orders"),
        Err(RegistryError::ModelNotFound { .. })
    ));

    let registry = Registry::init(
        configs(json!([{ "name": "shop", "url": "" }])),
        shop_modules(),
        InitOptions {
            save_table_with_no_db: true,
        },
    )
    .unwrap();
    let bare = registry.model("orders").unwrap();
    let qualified = registry.model("shop.orders").unwrap();
    assert_eq!(bare, qualified);
}

#[test]
fn test_unknown_model_error_message() {
    let registry = Registry::new(InitOptions::default());
    let err = registry.model("nope").unwrap_err();
    assert_eq!(err.to_string(), "model: nope does not exist");
}

// ============================================================================
// Define Tests
// ============================================================================

fn registry_with(databases: &[&str], options: InitOptions) -> Registry {
    let mut registry = Registry::new(options);
    for name in databases {
        registry.configure(DatabaseConfig::new(*name, format!("sqlite://{}", name)));
        registry.open_database(name).unwrap();
    }
    registry
}

#[test]
fn test_define_duplicate_table_fails() {
    let mut registry = registry_with(&["main"], InitOptions::default());
    let config = TableConfig::new("users", vec!["id,i".into()]);
    registry.define("main", config.clone(), Map::new()).unwrap();

    let err = registry.define("main", config, Map::new()).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateTable { ref table } if table == "main.users"));
}

#[test]
fn test_same_table_in_two_databases() {
    let mut registry = registry_with(&["a", "b"], InitOptions::default());
    let config = TableConfig::new("users", vec!["id,i".into()]);
    registry.define("a", config.clone(), Map::new()).unwrap();
    registry.define("b", config, Map::new()).unwrap();
    assert!(registry.model("a.users").is_ok());
    assert!(registry.model("b.users").is_ok());
}

#[test]
fn test_bare_name_collision_fails() {
    let mut registry = registry_with(
        &["a", "b"],
        InitOptions {
            save_table_with_no_db: true,
        },
    );
    let config = TableConfig::new("users", vec!["id,i".into()]);
    registry.define("a", config.clone(), Map::new()).unwrap();

    let err = registry.define("b", config, Map::new()).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateModel { ref table } if table == "users"));
    // The failed definition left nothing behind
    assert!(registry.model("b.users").is_err());
    assert_eq!(registry.database("b").unwrap().tables.len(), 0);
}

#[test]
fn test_define_on_unopened_database_fails() {
    let mut registry = Registry::new(InitOptions::default());
    registry.configure(DatabaseConfig::new("main", "sqlite://main"));
    let err = registry
        .define("main", TableConfig::new("users", vec![]), Map::new())
        .unwrap_err();
    assert!(matches!(err, RegistryError::DatabaseNotInitialized { .. }));
}

#[test]
fn test_define_honours_compile_options() {
    let mut registry = registry_with(&["main"], InitOptions::default());
    let config: TableConfig = serde_json::from_value(json!([
        "events",
        [["kind", "s"], ["payload", "t"]],
        {"setPrimaryKey": false, "allowNull": true}
    ]))
    .unwrap();
    let model = registry.define("main", config, Map::new()).unwrap();

    assert!(model.columns.primary_key().is_none());
    assert_eq!(model.columns.get("kind").unwrap().allow_null, Some(true));
}

// ============================================================================
// Table Config Parsing Tests
// ============================================================================

#[test]
fn test_structured_columns_are_not_compiled() {
    let config: TableConfig = serde_json::from_value(json!([
        "legacy",
        {
            "id": { "type": "INTEGER", "primaryKey": true, "autoIncrement": true },
            "title": { "type": "STRING", "allowNull": false }
        }
    ]))
    .unwrap();

    let TableColumns::Structured(schema) = &config.columns else {
        panic!("expected structured columns, got {:?}", config.columns);
    };
    assert_eq!(schema.len(), 2);
    let id = schema.get("id").unwrap();
    assert!(id.is_primary_key());
    assert_eq!(id.column_type, Some(ColumnTypeSpec::Plain(ColumnType::Integer)));
    assert_eq!(id.options.get("autoIncrement"), Some(&json!(true)));
}

#[test]
fn test_table_config_rejects_bad_table_name() {
    let result: Result<TableConfig, _> = serde_json::from_value(json!([42, []]));
    assert!(result.is_err());

    let result: Result<TableConfig, _> = serde_json::from_value(json!([]));
    assert!(result.is_err());
}

#[test]
fn test_table_module_without_config() {
    let module: TableModule = serde_json::from_value(json!({ "find": "by-id" })).unwrap();
    assert!(module.config.is_none());
    assert_eq!(module.attributes.get("find"), Some(&json!("by-id")));
}
