//! Compile Tests
//!
//! Tests that compile descriptor files from disk end to end.

use pretty_assertions::assert_eq;
use serde_json::json;

use quick_schema::CompileOptions;

use crate::common::TestContext;

// ============================================================================
// Successful Compile Tests
// ============================================================================

#[test]
fn test_compile_descriptor_file() {
    let ctx = TestContext::with_descriptors(&json!([
        ["id", "u"],
        "displayName,s=64,$f",
        ["isAdmin", "Boolean", false],
        ["bio", "t", "$t", null, {"comment": "free text"}]
    ]));

    let schema = ctx.compile_successfully();
    assert_eq!(
        serde_json::to_value(&schema).unwrap(),
        json!({
            "id": {
                "type": "UUID",
                "allowNull": true,
                "defaultValue": "UUIDV4",
                "primaryKey": true
            },
            "displayName": { "field": "display_name", "type": "STRING(64)", "allowNull": false },
            "isAdmin": { "field": "is_admin", "type": "Boolean", "defaultValue": false },
            "bio": { "type": "TEXT", "allowNull": true, "defaultValue": null, "comment": "free text" }
        })
    );
}

#[test]
fn test_compile_with_options() {
    let ctx = TestContext::with_descriptors(&json!([["tag", "s"], ["note", "t"]]));
    let result = ctx.compile(
        CompileOptions {
            set_primary_key: false,
            allow_null: true,
        },
        false,
    );
    assert!(result.success, "{:?}", result.errors);

    let schema = result.schema.unwrap();
    assert!(schema.primary_key().is_none());
    assert!(schema.iter().all(|(_, record)| record.allow_null == Some(true)));
}

#[test]
fn test_lenient_compile_keeps_unknown_keywords() {
    let ctx = TestContext::with_descriptors(&json!([["id", "serial"], ["body", "s=max"]]));
    let schema = ctx.compile_successfully();
    assert_eq!(
        serde_json::to_value(&schema).unwrap(),
        json!({
            "id": { "type": "serial", "allowNull": true, "primaryKey": true },
            "body": { "type": "STRING(max)" }
        })
    );
}

// ============================================================================
// Failing Compile Tests
// ============================================================================

#[test]
fn test_strict_compile_reports_column() {
    let ctx = TestContext::with_descriptors(&json!([["id", "i"], ["body", "s=max"]]));
    let result = ctx.compile(CompileOptions::default(), true);
    assert!(!result.success);
    assert!(
        result.errors.iter().any(|e| e.contains("'body'")),
        "{:?}",
        result.errors
    );
}

#[test]
fn test_missing_file_fails() {
    let ctx = TestContext::with_descriptors(&json!([]));
    std::fs::remove_file(&ctx.input_path).unwrap();

    let result = ctx.compile(CompileOptions::default(), false);
    assert!(!result.success);
    assert!(
        result.errors[0].starts_with("Failed to read descriptor file"),
        "{:?}",
        result.errors
    );
}

#[test]
fn test_invalid_json_fails() {
    let ctx = TestContext::with_raw_input("[[\"id\", \"i\"],");
    let result = ctx.compile(CompileOptions::default(), false);
    assert!(!result.success);
    assert!(
        result.errors[0].starts_with("Failed to parse descriptor file"),
        "{:?}",
        result.errors
    );
}
