//! Tabular data access for placeholder resolution

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Read-only lookup into a row-oriented, column-addressed data source
///
/// Implementations own storage and concurrency; the interpolation engine
/// only ever reads through this interface, one cell at a time.
pub trait ColumnSource {
    /// Value at `row` in the column called `name`
    ///
    /// `None` when the column does not exist or `row` is out of bounds.
    fn get(&self, name: &str, row: usize) -> Option<Value>;
}

/// Simple in-memory column store
///
/// Mainly for tests and small static sources; real rendering layers
/// implement [`ColumnSource`] over their own storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnData {
    columns: HashMap<String, Vec<Value>>,
}

impl ColumnData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a column
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<Value>) {
        self.columns.insert(name.into(), values);
    }

    /// Build from a JSON object of arrays: `{"foo": [10, 1.002], ...}`
    ///
    /// Non-object input yields an empty store; non-array columns become
    /// empty columns.
    pub fn from_json(json: &serde_json::Value) -> Self {
        let mut data = Self::new();
        if let Some(obj) = json.as_object() {
            for (name, column) in obj {
                let values = column
                    .as_array()
                    .map(|vals| vals.iter().map(Value::from_json).collect())
                    .unwrap_or_default();
                data.insert(name.clone(), values);
            }
        }
        data
    }

    /// Length of a column, if it exists
    pub fn column_len(&self, name: &str) -> Option<usize> {
        self.columns.get(name).map(|c| c.len())
    }
}

impl ColumnSource for ColumnData {
    fn get(&self, name: &str, row: usize) -> Option<Value> {
        self.columns.get(name)?.get(row).cloned()
    }
}
