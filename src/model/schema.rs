//! Compiled schema representation

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ColumnRecord;

/// Name-keyed column records in descriptor order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompiledSchema {
    columns: IndexMap<String, ColumnRecord>,
}

impl CompiledSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its logical name.
    ///
    /// A repeated name replaces the earlier record and keeps its position.
    pub fn insert(&mut self, name: String, record: ColumnRecord) -> Option<ColumnRecord> {
        self.columns.insert(name, record)
    }

    pub fn get(&self, name: &str) -> Option<&ColumnRecord> {
        self.columns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnRecord)> {
        self.columns.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// First column flagged as primary key
    pub fn primary_key(&self) -> Option<(&str, &ColumnRecord)> {
        self.iter().find(|(_, record)| record.is_primary_key())
    }
}

impl FromIterator<(String, ColumnRecord)> for CompiledSchema {
    fn from_iter<I: IntoIterator<Item = (String, ColumnRecord)>>(iter: I) -> Self {
        let mut schema = Self::new();
        for (name, record) in iter {
            schema.insert(name, record);
        }
        schema
    }
}

impl IntoIterator for CompiledSchema {
    type Item = (String, ColumnRecord);
    type IntoIter = indexmap::map::IntoIter<String, ColumnRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}
