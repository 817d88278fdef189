//! Common test utilities for quick-schema tests

use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tempfile::TempDir;

use quick_schema::{CompileFileOptions, CompileOptions, CompiledSchema};

/// Test context with temporary directory for isolated test execution
pub struct TestContext {
    /// Kept to prevent temp directory cleanup until TestContext is dropped
    _temp_dir: TempDir,
    pub input_path: PathBuf,
}

impl TestContext {
    /// Create a new test context holding a descriptor file with the given JSON
    pub fn with_descriptors(descriptors: &Value) -> Self {
        let text = serde_json::to_string_pretty(descriptors).expect("Failed to encode descriptors");
        Self::with_raw_input(&text)
    }

    /// Create a new test context holding a descriptor file with raw text
    pub fn with_raw_input(text: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let input_path = temp_dir.path().join("columns.json");
        fs::write(&input_path, text).expect("Failed to write descriptor file");

        Self {
            _temp_dir: temp_dir,
            input_path,
        }
    }

    /// Compile the descriptor file using the quick-schema library
    pub fn compile(&self, compile: CompileOptions, strict: bool) -> CompileResult {
        match quick_schema::compile_file(&CompileFileOptions {
            input_path: self.input_path.clone(),
            compile,
            strict,
        }) {
            Ok(schema) => CompileResult {
                success: true,
                schema: Some(schema),
                errors: vec![],
            },
            Err(e) => CompileResult {
                success: false,
                schema: None,
                errors: e.chain().map(|cause| cause.to_string()).collect(),
            },
        }
    }

    /// Compile with default options and return the schema, panicking on failure
    pub fn compile_successfully(&self) -> CompiledSchema {
        let result = self.compile(CompileOptions::default(), false);
        assert!(result.success, "Compile failed: {:?}", result.errors);
        result
            .schema
            .expect("Compile succeeded but no schema returned")
    }
}

/// Result of a compile operation
#[derive(Debug)]
pub struct CompileResult {
    pub success: bool,
    pub schema: Option<CompiledSchema>,
    pub errors: Vec<String>,
}
