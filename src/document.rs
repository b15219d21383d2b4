//! In-memory configuration documents.
//!
//! A [`Document`] is a key/value tree backed by a [`toml::Table`]. Keys are
//! dot-delimited paths (`"player-stats.health"`); values are TOML primitives,
//! arrays of primitives, or nested tables. Accessors navigate the tree by
//! path so callers never touch intermediate tables directly.

use serde::{Deserialize, Serialize};
use toml::{Table, Value};

/// A parsed configuration document owned by the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Table);

impl Document {
    /// An empty document (what the store returns for absent files).
    pub fn new() -> Self {
        Self(Table::new())
    }

    pub fn from_table(table: Table) -> Self {
        Self(table)
    }

    pub fn as_table(&self) -> &Table {
        &self.0
    }

    pub fn into_table(self) -> Table {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Navigate by dotted key path (e.g. `"groups.default"`).
    ///
    /// Returns `None` if any intermediate segment is missing or is not a
    /// table.
    pub fn get(&self, dotted_key: &str) -> Option<&Value> {
        let (path, leaf) = match dotted_key.rsplit_once('.') {
            Some((p, l)) => (Some(p), l),
            None => (None, dotted_key),
        };

        let tbl = match path {
            Some(path) => {
                let mut current = &self.0;
                for segment in path.split('.') {
                    current = current.get(segment)?.as_table()?;
                }
                current
            }
            None => &self.0,
        };

        tbl.get(leaf)
    }

    /// Whether a value exists at `dotted_key`.
    pub fn contains(&self, dotted_key: &str) -> bool {
        self.get(dotted_key).is_some()
    }

    /// Boolean value at `dotted_key`, or `None` if absent or not a boolean.
    pub fn get_bool(&self, dotted_key: &str) -> Option<bool> {
        self.get(dotted_key)?.as_bool()
    }

    /// String value at `dotted_key`.
    pub fn get_str(&self, dotted_key: &str) -> Option<&str> {
        self.get(dotted_key)?.as_str()
    }

    /// String-array value at `dotted_key`. Non-string elements are skipped.
    pub fn get_str_array(&self, dotted_key: &str) -> Option<Vec<&str>> {
        let array = self.get(dotted_key)?.as_array()?;
        Some(array.iter().filter_map(Value::as_str).collect())
    }

    /// Set `dotted_key = value`, creating intermediate tables as needed.
    ///
    /// An intermediate segment holding a non-table value is replaced by a
    /// table (the write wins, matching overlay semantics).
    pub fn set<V: Into<Value>>(&mut self, dotted_key: &str, value: V) {
        let segments: Vec<&str> = dotted_key.split('.').collect();
        let mut current = &mut self.0;

        for segment in &segments[..segments.len() - 1] {
            if !current.get(*segment).is_some_and(Value::is_table) {
                current.insert(segment.to_string(), Value::Table(Table::new()));
            }
            current = current
                .get_mut(*segment)
                .and_then(Value::as_table_mut)
                .expect("intermediate segment was just ensured to be a table");
        }

        let leaf = segments.last().expect("split produces at least one segment");
        current.insert(leaf.to_string(), value.into());
    }
}

impl From<Table> for Document {
    fn from(table: Table) -> Self {
        Self(table)
    }
}

fn dotted(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Flatten a table into `(dotted_key, value)` leaf pairs.
///
/// Nested tables are recursed into; arrays and scalars are leaves. Used by
/// the store to patch documents into on-disk files key by key.
pub(crate) fn flatten(table: &Table) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    flatten_into(table, "", &mut out);
    out
}

fn flatten_into(table: &Table, prefix: &str, out: &mut Vec<(String, Value)>) {
    for (key, value) in table {
        match value {
            Value::Table(nested) => flatten_into(nested, &dotted(prefix, key), out),
            other => out.push((dotted(prefix, key), other.clone())),
        }
    }
}
