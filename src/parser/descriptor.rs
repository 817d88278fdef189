//! Column descriptor input
//!
//! A descriptor is either a positional array of slots:
//!
//! ```json
//! ["userName", "s=64", "$f", "guest", { "unique": true }]
//! ```
//!
//! or the same slots written as one comma-separated string:
//!
//! ```json
//! "userName, s=64, $f, guest"
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::slots::SlotCursor;

/// One terse column specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "Value")]
pub enum Descriptor {
    /// Comma-separated slots, split and trimmed before compiling
    Inline(String),
    /// Positional slots
    Slots(Vec<Value>),
}

impl Descriptor {
    /// Positional slots of this descriptor
    pub fn slots(&self) -> Vec<Value> {
        match self {
            Descriptor::Inline(text) => text
                .split(',')
                .map(|segment| Value::String(segment.trim().to_string()))
                .collect(),
            Descriptor::Slots(slots) => slots.clone(),
        }
    }

    pub fn cursor(&self) -> SlotCursor {
        SlotCursor::new(self.slots())
    }
}

impl From<Value> for Descriptor {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Descriptor::Inline(text),
            Value::Array(slots) => Descriptor::Slots(slots),
            other => Descriptor::Slots(vec![other]),
        }
    }
}

impl From<&str> for Descriptor {
    fn from(text: &str) -> Self {
        Descriptor::Inline(text.to_string())
    }
}

impl From<Vec<Value>> for Descriptor {
    fn from(slots: Vec<Value>) -> Self {
        Descriptor::Slots(slots)
    }
}

/// Turn a JSON descriptor list into descriptors.
///
/// A top-level array yields one descriptor per element; any other value is a
/// single descriptor.
pub fn parse_descriptors(value: Value) -> Vec<Descriptor> {
    match value {
        Value::Array(items) => items.into_iter().map(Descriptor::from).collect(),
        other => vec![Descriptor::from(other)],
    }
}
