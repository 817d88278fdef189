//! Positional slot model
//!
//! Descriptor slots are consumed left to right through a [`SlotCursor`]. Each
//! slot position classifies the popped value into one of its admissible
//! shapes; the compiler then acts on the variant instead of inspecting raw
//! values.

use std::collections::VecDeque;

use serde_json::Value;

use super::type_keyword::{TypeKeyword, BOOLEAN_KEYWORD};
use crate::util::{is_truthy, key_text};

/// Sentinel for an explicitly nullable column
pub const NULLABLE_SENTINEL: &str = "$t";

/// Sentinel for an explicitly non-nullable column
pub const NOT_NULLABLE_SENTINEL: &str = "$f";

/// Remaining slots of a descriptor
#[derive(Debug, Clone, Default)]
pub struct SlotCursor {
    slots: VecDeque<Value>,
}

impl SlotCursor {
    pub fn new(slots: Vec<Value>) -> Self {
        Self {
            slots: slots.into(),
        }
    }

    /// Consume the next slot
    pub fn pop(&mut self) -> Option<Value> {
        self.slots.pop_front()
    }

    /// Put a consumed value back in front so the next position reads it
    pub fn requeue(&mut self, value: Value) {
        self.slots.push_front(value);
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.slots.len()
    }
}

/// Slot 1: column name
#[derive(Debug, Clone, PartialEq)]
pub enum NameSlot {
    /// Plain name; the storage field is derived by normalization
    Identifier(String),
    /// `[name, field]` pair with an explicit storage field
    WithField { name: String, field: Option<String> },
    /// No usable name
    Missing,
}

impl NameSlot {
    pub fn classify(value: Option<Value>) -> Self {
        match value {
            Some(Value::String(name)) => NameSlot::Identifier(name),
            Some(Value::Array(pair)) if !pair.is_empty() => {
                let mut pair = pair.into_iter();
                let name = pair.next().map(|v| key_text(&v)).unwrap_or_default();
                let field = pair.next().filter(is_truthy).map(|v| key_text(&v));
                NameSlot::WithField { name, field }
            }
            _ => NameSlot::Missing,
        }
    }
}

/// Slot 2: column type
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSlot {
    /// Keyword string, optionally sized
    Keyword(TypeKeyword),
    /// Any other truthy value, used as the type verbatim
    Direct(Value),
    /// Falsy value, no type
    Absent,
}

impl TypeSlot {
    pub fn classify(value: Value) -> Self {
        match value {
            Value::String(raw) => TypeSlot::Keyword(TypeKeyword::parse(&raw)),
            other if is_truthy(&other) => TypeSlot::Direct(other),
            _ => TypeSlot::Absent,
        }
    }

    /// Whether the keyword (before table lookup) is `Boolean`
    fn is_boolean_keyword(&self) -> bool {
        matches!(self, TypeSlot::Keyword(kw) if kw.keyword == BOOLEAN_KEYWORD)
    }
}

/// Slot 3: nullability flag or default value
#[derive(Debug, Clone, PartialEq)]
pub enum NullDefaultSlot {
    /// A `Boolean` column's flag, read as its default value
    BooleanDefault(bool),
    /// Explicit nullability
    NullFlag(bool),
    /// Anything else is the default value
    DefaultLiteral(Value),
}

impl NullDefaultSlot {
    pub fn classify(value: Value, type_slot: &TypeSlot) -> Self {
        if type_slot.is_boolean_keyword() {
            match &value {
                Value::Bool(b) => return NullDefaultSlot::BooleanDefault(*b),
                Value::String(s) if s == "true" => return NullDefaultSlot::BooleanDefault(true),
                Value::String(s) if s == "false" => return NullDefaultSlot::BooleanDefault(false),
                _ => {}
            }
        }

        match &value {
            Value::Bool(flag) => NullDefaultSlot::NullFlag(*flag),
            Value::String(s) if s == NULLABLE_SENTINEL || s == "true" => {
                NullDefaultSlot::NullFlag(true)
            }
            Value::String(s) if s == NOT_NULLABLE_SENTINEL || s == "false" => {
                NullDefaultSlot::NullFlag(false)
            }
            _ => NullDefaultSlot::DefaultLiteral(value),
        }
    }
}

/// Default value from slot 3 or 4, or the options object arriving early
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultSlot {
    /// An object; goes back on the cursor as the extra-options slot
    Options(Value),
    /// Default value, stored without coercion
    Literal(Value),
}

impl DefaultSlot {
    pub fn classify(value: Value) -> Self {
        if value.is_object() {
            DefaultSlot::Options(value)
        } else {
            DefaultSlot::Literal(value)
        }
    }
}
