//! Column record types produced by the descriptor compiler

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Abstract column type a keyword resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    String,
    StringBinary,
    Text,
    CiText,
    TsVector,
    Integer,
    BigInt,
    Real,
    Double,
    Decimal,
    Float,
    Date,
    Boolean,
    Uuid,
}

impl ColumnType {
    /// Canonical type name used in compiled output
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::String => "STRING",
            ColumnType::StringBinary => "STRING.BINARY",
            ColumnType::Text => "TEXT",
            ColumnType::CiText => "CITEXT",
            ColumnType::TsVector => "TSVECTOR",
            ColumnType::Integer => "INTEGER",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Real => "REAL",
            ColumnType::Double => "DOUBLE",
            ColumnType::Decimal => "DECIMAL",
            ColumnType::Float => "FLOAT",
            ColumnType::Date => "DATE",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Uuid => "UUID",
        }
    }

    /// Inverse of [`type_name`](Self::type_name)
    pub fn from_type_name(name: &str) -> Option<Self> {
        let column_type = match name {
            "STRING" => ColumnType::String,
            "STRING.BINARY" => ColumnType::StringBinary,
            "TEXT" => ColumnType::Text,
            "CITEXT" => ColumnType::CiText,
            "TSVECTOR" => ColumnType::TsVector,
            "INTEGER" => ColumnType::Integer,
            "BIGINT" => ColumnType::BigInt,
            "REAL" => ColumnType::Real,
            "DOUBLE" => ColumnType::Double,
            "DECIMAL" => ColumnType::Decimal,
            "FLOAT" => ColumnType::Float,
            "DATE" => ColumnType::Date,
            "BOOLEAN" => ColumnType::Boolean,
            "UUID" => ColumnType::Uuid,
            _ => return None,
        };
        Some(column_type)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Size argument from a `keyword=size` type slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeArg {
    /// Positive integer size
    Length(u64),
    /// Anything that did not parse as a positive integer, kept verbatim
    Raw(String),
}

impl fmt::Display for SizeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeArg::Length(n) => write!(f, "{}", n),
            SizeArg::Raw(s) => f.write_str(s),
        }
    }
}

/// Type assigned to a column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnTypeSpec {
    /// A table keyword without a size
    Plain(ColumnType),
    /// A table keyword invoked as a parameterized type
    Sized { base: ColumnType, size: SizeArg },
    /// A keyword missing from the keyword table, passed through as written
    Unresolved {
        keyword: String,
        size: Option<SizeArg>,
    },
    /// A concrete type token supplied directly by the caller
    Direct(Value),
}

impl ColumnTypeSpec {
    /// Read back a serialized type. Canonical names (`UUID`, `STRING(64)`)
    /// become table types again; anything else is a direct type token.
    pub fn from_value(value: &Value) -> Self {
        let Value::String(name) = value else {
            return ColumnTypeSpec::Direct(value.clone());
        };
        if let Some(base) = ColumnType::from_type_name(name) {
            return ColumnTypeSpec::Plain(base);
        }
        let sized = name
            .strip_suffix(')')
            .and_then(|rest| rest.split_once('('))
            .and_then(|(base, size)| Some((ColumnType::from_type_name(base)?, size)));
        match sized {
            Some((base, size)) => ColumnTypeSpec::Sized {
                base,
                size: match size.parse::<u64>() {
                    Ok(n) if n > 0 => SizeArg::Length(n),
                    _ => SizeArg::Raw(size.to_string()),
                },
            },
            None => ColumnTypeSpec::Direct(value.clone()),
        }
    }

    /// Resolved column type, if the spec came from the keyword table
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            ColumnTypeSpec::Plain(t) | ColumnTypeSpec::Sized { base: t, .. } => Some(*t),
            _ => None,
        }
    }

    /// Size argument of a parameterized type
    pub fn size(&self) -> Option<&SizeArg> {
        match self {
            ColumnTypeSpec::Sized { size, .. } => Some(size),
            ColumnTypeSpec::Unresolved { size, .. } => size.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnTypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnTypeSpec::Plain(t) => write!(f, "{}", t),
            ColumnTypeSpec::Sized { base, size } => write!(f, "{}({})", base, size),
            ColumnTypeSpec::Unresolved {
                keyword,
                size: None,
            } => f.write_str(keyword),
            ColumnTypeSpec::Unresolved {
                keyword,
                size: Some(size),
            } => write!(f, "{}({})", keyword, size),
            ColumnTypeSpec::Direct(Value::String(s)) => f.write_str(s),
            ColumnTypeSpec::Direct(v) => write!(f, "{}", v),
        }
    }
}

impl Serialize for ColumnTypeSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ColumnTypeSpec::Direct(v) => v.serialize(serializer),
            other => serializer.collect_str(other),
        }
    }
}

/// Marker name of the UUID v4 default generator
pub const UUIDV4_MARKER: &str = "UUIDV4";

/// Default value of a column
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Literal value, stored without coercion
    Literal(Value),
    /// Generate a fresh version 4 UUID per row
    UuidV4,
}

impl DefaultValue {
    /// Produce the value a new row receives.
    ///
    /// Literals are returned as is; the UUID marker generates a new UUID on
    /// each call.
    pub fn materialize(&self) -> Value {
        match self {
            DefaultValue::Literal(v) => v.clone(),
            DefaultValue::UuidV4 => Value::String(uuid::Uuid::new_v4().to_string()),
        }
    }
}

impl Serialize for DefaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DefaultValue::Literal(v) => v.serialize(serializer),
            DefaultValue::UuidV4 => serializer.serialize_str(UUIDV4_MARKER),
        }
    }
}

/// Structured definition of a single column.
///
/// The logical name is not part of the record; it is the key the record is
/// stored under in a [`CompiledSchema`](super::CompiledSchema).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct ColumnRecord {
    /// Physical storage identifier, when it differs from the logical name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnTypeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_null: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<bool>,
    /// Passthrough options merged from the extra-options slot
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl ColumnRecord {
    /// Build a record from an already structured column object.
    ///
    /// A `name` key is ignored; records are keyed by name in the schema.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let mut record = Self::default();
        record.merge(object);
        record
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key == Some(true)
    }

    /// Shallow-merge an options object into the record.
    ///
    /// Known keys overwrite the typed fields. A known key holding a value of
    /// the wrong shape clears the typed field and is kept as a passthrough
    /// option. All other keys are passthrough options. `name` is skipped.
    pub fn merge(&mut self, object: &Map<String, Value>) {
        for (key, value) in object {
            let accepted = match key.as_str() {
                "name" => continue,
                "field" => match value {
                    Value::String(s) => {
                        self.field = Some(s.clone());
                        true
                    }
                    Value::Null => {
                        self.field = None;
                        true
                    }
                    _ => {
                        self.field = None;
                        false
                    }
                },
                "type" => {
                    self.column_type = match value {
                        Value::Null => None,
                        v => Some(ColumnTypeSpec::from_value(v)),
                    };
                    true
                }
                "allowNull" => merge_flag(&mut self.allow_null, value),
                "primaryKey" => merge_flag(&mut self.primary_key, value),
                "defaultValue" => {
                    self.default_value = Some(match value {
                        Value::String(s) if s == UUIDV4_MARKER => DefaultValue::UuidV4,
                        v => DefaultValue::Literal(v.clone()),
                    });
                    true
                }
                _ => false,
            };

            if accepted {
                self.options.remove(key);
            } else {
                self.options.insert(key.clone(), value.clone());
            }
        }
    }
}

fn merge_flag(slot: &mut Option<bool>, value: &Value) -> bool {
    match value {
        Value::Bool(b) => {
            *slot = Some(*b);
            true
        }
        Value::Null => {
            *slot = None;
            true
        }
        _ => {
            *slot = None;
            false
        }
    }
}

impl From<Map<String, Value>> for ColumnRecord {
    fn from(object: Map<String, Value>) -> Self {
        Self::from_object(&object)
    }
}
