//! Column model and descriptor compilation

mod builder;
mod column;
mod schema;

pub use builder::{
    compile, compile_strict, compile_with_warnings, Compilation, CompileOptions, CompileWarning,
};
pub use column::{ColumnRecord, ColumnType, ColumnTypeSpec, DefaultValue, SizeArg, UUIDV4_MARKER};
pub use schema::CompiledSchema;
