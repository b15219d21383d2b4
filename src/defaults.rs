//! Baseline key specifications.
//!
//! A [`DefaultSpec`] is an ordered list of `(dotted path, value)` pairs that
//! must be present in a document of a given config name. Application is
//! set-if-absent: a default never overwrites a value the user already has.
//! The registry maps config names to specs declaratively, so new configs get
//! defaults without touching the defaulting logic.

use toml::Value;

use crate::document::Document;

/// Ordered `(dotted path, default value)` entries for one config name.
#[derive(Debug, Clone, Default)]
pub struct DefaultSpec {
    entries: Vec<(String, Value)>,
}

impl DefaultSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `(path, value)` entry. Entries apply in insertion order.
    pub fn entry<V: Into<Value>>(mut self, path: &str, value: V) -> Self {
        self.entries.push((path.to_string(), value.into()));
        self
    }

    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set each entry in `document` iff no value exists at its path.
    ///
    /// Returns the number of keys added.
    pub fn apply(&self, document: &mut Document) -> usize {
        let mut added = 0;
        for (path, value) in &self.entries {
            if !document.contains(path) {
                document.set(path, value.clone());
                added += 1;
            }
        }
        added
    }
}

/// Built-in baseline for the distinguished `config` document.
pub fn config_defaults() -> DefaultSpec {
    DefaultSpec::new()
        .entry("first-start", true)
        .entry("player.ender-chest", true)
        .entry("player.inventory", true)
        .entry("player.stats", true)
        .entry("player-stats.can-fly", true)
        .entry("player-stats.display-name", false)
        .entry("player-stats.exhaustion", true)
        .entry("player-stats.exp", true)
        .entry("player-stats.food", true)
        .entry("player-stats.flying", true)
        .entry("player-stats.gamemode", false)
        .entry("player-stats.health", true)
        .entry("player-stats.level", true)
        .entry("player-stats.potion-effects", true)
        .entry("player-stats.saturation", true)
}

/// Built-in baseline for the distinguished `worlds` document.
pub fn worlds_defaults() -> DefaultSpec {
    DefaultSpec::new().entry(
        "groups.default",
        Value::Array(vec![
            "world".into(),
            "world_nether".into(),
            "world_the_end".into(),
        ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_fills_missing_keys() {
        let mut doc = Document::new();
        let added = config_defaults().apply(&mut doc);
        assert_eq!(added, 15);
        assert_eq!(doc.get_bool("first-start"), Some(true));
        assert_eq!(doc.get_bool("player-stats.health"), Some(true));
        assert_eq!(doc.get_bool("player-stats.display-name"), Some(false));
    }

    #[test]
    fn apply_never_overwrites_existing_values() {
        let mut doc = Document::new();
        doc.set("player-stats.health", false);
        config_defaults().apply(&mut doc);
        assert_eq!(doc.get_bool("player-stats.health"), Some(false));
    }

    #[test]
    fn apply_is_idempotent() {
        let mut once = Document::new();
        config_defaults().apply(&mut once);

        let mut twice = once.clone();
        let added = config_defaults().apply(&mut twice);
        assert_eq!(added, 0);
        assert_eq!(twice, once);
    }

    #[test]
    fn empty_spec_leaves_document_unchanged() {
        let mut doc = Document::new();
        doc.set("anything", 1);
        let before = doc.clone();
        assert_eq!(DefaultSpec::new().apply(&mut doc), 0);
        assert_eq!(doc, before);
    }

    #[test]
    fn worlds_defaults_declare_the_default_group() {
        let mut doc = Document::new();
        worlds_defaults().apply(&mut doc);
        let groups = doc.get_str_array("groups.default").unwrap();
        assert_eq!(groups, vec!["world", "world_nether", "world_the_end"]);
    }

    #[test]
    fn entries_preserve_declaration_order() {
        let spec = DefaultSpec::new().entry("b", 1).entry("a", 2);
        let paths: Vec<&str> = spec.entries().iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["b", "a"]);
    }
}
