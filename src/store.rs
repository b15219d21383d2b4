//! Document loading and saving.
//!
//! The store is the boundary between cached [`Document`]s and their on-disk
//! files. Loading never fails the caller: an absent, unreadable, or
//! unparsable file yields an empty document (with a logged warning), so
//! first-run setups work without pre-created files. Saving patches the
//! existing file through `toml_edit`, so user comments and formatting
//! survive a save, and creates parent directories as needed.

use std::path::Path;

use crate::document::{self, Document};
use crate::error::ConfregError;

/// Loads and saves documents at explicit file paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentStore;

impl DocumentStore {
    pub fn new() -> Self {
        Self
    }

    /// Load the document at `path`.
    ///
    /// Returns an empty document if the file is absent, unreadable, or not
    /// valid TOML. Never fails the caller.
    pub fn load(&self, path: &Path) -> Document {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Document::new(),
            Err(e) => {
                log::warn!("Could not read {}: {e}", path.display());
                return Document::new();
            }
        };

        match content.parse::<toml::Table>() {
            Ok(table) => Document::from_table(table),
            Err(e) => {
                log::warn!("Could not parse {}: {e}", path.display());
                Document::new()
            }
        }
    }

    /// Save `document` to `path`.
    ///
    /// Reads the existing file (if any) and patches every leaf value of
    /// `document` into it, preserving comments, formatting, and keys not
    /// present in the document. Creates parent directories if needed.
    pub fn save(&self, document: &Document, path: &Path) -> Result<(), ConfregError> {
        let existing = match std::fs::read_to_string(path) {
            Ok(c) => Some(c),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(ConfregError::IoError {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        let content = patch_document(existing.as_deref(), document, path);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfregError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        std::fs::write(path, &content).map_err(|e| ConfregError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Pure function: patch a TOML document string so every leaf of `document`
/// is present with its cached value.
///
/// `content` is `None` when the file does not exist yet. Unparsable existing
/// content is discarded (same policy as [`DocumentStore::load`]).
fn patch_document(content: Option<&str>, document: &Document, path: &Path) -> String {
    let base = content.unwrap_or_default();
    let mut doc: toml_edit::DocumentMut = match base.parse() {
        Ok(d) => d,
        Err(e) => {
            log::warn!("Discarding unparsable content of {}: {e}", path.display());
            toml_edit::DocumentMut::new()
        }
    };

    for (key, value) in document::flatten(document.as_table()) {
        set_dotted(&mut doc, &key, to_edit_value(&value));
    }

    doc.to_string()
}

/// Set `dotted_key = value` in a `toml_edit` document, creating intermediate
/// tables as needed. A non-table intermediate is replaced by a table.
fn set_dotted(doc: &mut toml_edit::DocumentMut, dotted_key: &str, value: toml_edit::Value) {
    let segments: Vec<&str> = dotted_key.split('.').collect();
    let mut current: &mut toml_edit::Item = doc.as_item_mut();

    for segment in &segments[..segments.len() - 1] {
        if !current.get(segment).is_some_and(toml_edit::Item::is_table_like) {
            current[segment] = toml_edit::Item::Table(toml_edit::Table::new());
        }
        current = &mut current[segment];
    }

    let leaf = segments.last().unwrap();
    current[*leaf] = toml_edit::value(value);
}

fn to_edit_value(value: &toml::Value) -> toml_edit::Value {
    match value {
        toml::Value::String(s) => s.as_str().into(),
        toml::Value::Integer(i) => (*i).into(),
        toml::Value::Float(f) => (*f).into(),
        toml::Value::Boolean(b) => (*b).into(),
        toml::Value::Datetime(dt) => (*dt).into(),
        toml::Value::Array(items) => {
            let array: toml_edit::Array = items.iter().map(to_edit_value).collect();
            toml_edit::Value::Array(array)
        }
        toml::Value::Table(table) => {
            let inline: toml_edit::InlineTable = table
                .iter()
                .map(|(k, v)| (k.clone(), to_edit_value(v)))
                .collect();
            toml_edit::Value::InlineTable(inline)
        }
    }
}
