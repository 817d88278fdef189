//! Compile column descriptors into a name-keyed schema
//!
//! Each descriptor is walked slot by slot:
//!
//! 1. name (`"userName"` or `["userName", "uname"]`)
//! 2. type keyword (`"s"`, `"s=64"`) or a direct type value
//! 3. nullability flag (`"$t"`, `"$f"`, booleans) or default value
//! 4. default value, only when slot 3 was a flag
//! 5. passthrough options object (an array merges by index)
//!
//! An object where a default value is expected is read as slot 5.
//!
//! Compilation itself never fails. Inputs that only degrade silently (missing
//! names, unknown type keywords other than `Boolean`, non-numeric sizes) are
//! reported as [`CompileWarning`]s, and [`compile_strict`] turns the first one
//! into an error.

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::parser::{
    storage_field, DefaultSlot, Descriptor, NameSlot, NullDefaultSlot, SlotCursor, TypeSlot,
};
use crate::util::key_text;

use super::{ColumnRecord, ColumnType, ColumnTypeSpec, CompiledSchema, DefaultValue, SizeArg};

/// Options for one compile call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Mark the first descriptor as primary key
    pub set_primary_key: bool,
    /// Baseline nullability for every column except the primary key
    pub allow_null: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            set_primary_key: true,
            allow_null: false,
        }
    }
}

/// Input that compiled, but probably not the way the author meant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileWarning {
    /// Descriptor at `index` has no usable name; its record is keyed under `""`
    EmptyName { index: usize },
    /// Type keyword missing from the keyword table, passed through as written
    UnresolvedType { column: String, keyword: String },
    /// Size suffix that is not a positive integer, passed through as written
    NonNumericSize { column: String, size: String },
}

impl CompileWarning {
    pub fn into_error(self) -> SchemaError {
        let column = match &self {
            CompileWarning::EmptyName { index } => format!("#{}", index),
            CompileWarning::UnresolvedType { column, .. }
            | CompileWarning::NonNumericSize { column, .. } => column.clone(),
        };
        SchemaError::InvalidDescriptor {
            column,
            reason: self.to_string(),
        }
    }
}

impl fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileWarning::EmptyName { index } => {
                write!(f, "descriptor #{} has no column name", index)
            }
            CompileWarning::UnresolvedType { column, keyword } => {
                write!(f, "unknown type keyword '{}' on column '{}'", keyword, column)
            }
            CompileWarning::NonNumericSize { column, size } => {
                write!(f, "non-numeric size '{}' on column '{}'", size, column)
            }
        }
    }
}

/// Compiled schema plus everything that degraded on the way
#[derive(Debug, Clone, Default)]
pub struct Compilation {
    pub schema: CompiledSchema,
    pub warnings: Vec<CompileWarning>,
}

/// Compile descriptors into a schema.
pub fn compile(descriptors: &[Descriptor], options: &CompileOptions) -> CompiledSchema {
    compile_with_warnings(descriptors, options).schema
}

/// Compile descriptors, rejecting the first descriptor that would only
/// degrade silently.
pub fn compile_strict(
    descriptors: &[Descriptor],
    options: &CompileOptions,
) -> Result<CompiledSchema, SchemaError> {
    let compilation = compile_with_warnings(descriptors, options);
    match compilation.warnings.into_iter().next() {
        Some(warning) => Err(warning.into_error()),
        None => Ok(compilation.schema),
    }
}

/// Compile descriptors and collect warnings.
pub fn compile_with_warnings(descriptors: &[Descriptor], options: &CompileOptions) -> Compilation {
    let mut builder = ColumnBuilder::new(options);
    let mut schema = CompiledSchema::new();

    for (index, descriptor) in descriptors.iter().enumerate() {
        let (name, record) = builder.build_column(index, descriptor);
        debug!("Compiled column '{}': {:?}", name, record);
        schema.insert(name, record);
    }

    for warning in &builder.warnings {
        warn!("{}", warning);
    }

    Compilation {
        schema,
        warnings: builder.warnings,
    }
}

/// Array in the options slot: elements merge under their index as key
fn indexed_options(items: Vec<Value>) -> Map<String, Value> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, value)| (i.to_string(), value))
        .collect()
}

/// Per-call compile state
struct ColumnBuilder<'a> {
    options: &'a CompileOptions,
    primary_key_set: bool,
    warnings: Vec<CompileWarning>,
}

impl<'a> ColumnBuilder<'a> {
    fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            primary_key_set: !options.set_primary_key,
            warnings: Vec::new(),
        }
    }

    fn build_column(&mut self, index: usize, descriptor: &Descriptor) -> (String, ColumnRecord) {
        let mut cursor = descriptor.cursor();
        let mut record = ColumnRecord::default();

        if !self.primary_key_set {
            record.primary_key = Some(true);
            record.allow_null = Some(true);
            self.primary_key_set = true;
        }

        if self.options.allow_null && !record.is_primary_key() {
            record.allow_null = Some(true);
        }

        let mut name = match NameSlot::classify(cursor.pop()) {
            NameSlot::Identifier(name) => {
                record.field = storage_field(&name);
                name
            }
            NameSlot::WithField { name, field } => {
                record.field = field;
                name
            }
            NameSlot::Missing => String::new(),
        };

        self.fill_slots(&mut cursor, &mut record, &mut name);

        if name.is_empty() {
            self.warnings.push(CompileWarning::EmptyName { index });
        }

        (name, record)
    }

    /// Slots 2 to 5. Returns as soon as the cursor runs dry.
    fn fill_slots(&mut self, cursor: &mut SlotCursor, record: &mut ColumnRecord, name: &mut String) {
        let Some(value) = cursor.pop() else {
            return;
        };
        let type_slot = TypeSlot::classify(value);
        self.apply_type(&type_slot, record, name);

        let Some(value) = cursor.pop() else {
            return;
        };
        let captured = match NullDefaultSlot::classify(value, &type_slot) {
            NullDefaultSlot::BooleanDefault(b) => Some(Value::Bool(b)),
            NullDefaultSlot::NullFlag(flag) => {
                record.allow_null = Some(flag);
                None
            }
            NullDefaultSlot::DefaultLiteral(value) => Some(value),
        };

        // A flag hands the default to slot 4; either way an object is options
        let default = match captured {
            Some(value) => Some(value),
            None => cursor.pop(),
        };
        match default.map(DefaultSlot::classify) {
            Some(DefaultSlot::Options(options)) => cursor.requeue(options),
            Some(DefaultSlot::Literal(value)) => {
                record.default_value = Some(DefaultValue::Literal(value))
            }
            None => {}
        }

        let extra = match cursor.pop() {
            Some(Value::Object(extra)) => extra,
            Some(Value::Array(items)) => indexed_options(items),
            _ => return,
        };
        if let Some(renamed) = extra.get("name").filter(|v| !v.is_null()) {
            *name = key_text(renamed);
        }
        record.merge(&extra);
    }

    fn apply_type(&mut self, type_slot: &TypeSlot, record: &mut ColumnRecord, column: &str) {
        match type_slot {
            TypeSlot::Keyword(keyword) => {
                let spec = keyword.resolve();

                // Bare `Boolean` is understood by the nullability slot
                match &spec {
                    ColumnTypeSpec::Unresolved { keyword: kw, .. } if !keyword.is_boolean() => {
                        self.warnings.push(CompileWarning::UnresolvedType {
                            column: column.to_string(),
                            keyword: kw.clone(),
                        });
                    }
                    _ => {}
                }
                if let Some(SizeArg::Raw(size)) = &keyword.size {
                    self.warnings.push(CompileWarning::NonNumericSize {
                        column: column.to_string(),
                        size: size.clone(),
                    });
                }

                // Only the bare UUID type gets the generator default
                if spec == ColumnTypeSpec::Plain(ColumnType::Uuid) {
                    record.default_value = Some(DefaultValue::UuidV4);
                }
                record.column_type = Some(spec);
            }
            TypeSlot::Direct(value) => {
                record.column_type = Some(ColumnTypeSpec::Direct(value.clone()));
            }
            TypeSlot::Absent => {}
        }
    }
}
