//! The configuration registry: named documents, baseline defaulting, the
//! reload protocol, and persistence.
//!
//! The registry owns one entry per registered config name — the file path
//! plus the cached [`Document`] — and keeps the cache consistent with disk
//! across reload/save cycles. Names compare case-insensitively. Two names
//! are distinguished: `config`, which carries the one-shot `first-start`
//! flag, and `worlds`, whose defaults apply only while that flag is set.
//!
//! The hosting application constructs a registry at startup, registers its
//! configs, and calls [`shutdown`](ConfigRegistry::shutdown) when it stops.
//! All operations are synchronous and expected to run on the host's main
//! control thread.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::defaults::{self, DefaultSpec};
use crate::document::Document;
use crate::error::ConfregError;
use crate::reporter::{ConsoleReporter, Reporter};
use crate::store::DocumentStore;

/// Name of the document carrying the `first-start` flag.
pub const CONFIG: &str = "config";
/// Name of the document whose defaults are gated by `first-start`.
pub const WORLDS: &str = "worlds";
/// The one-shot migration flag inside the `config` document.
pub const FIRST_START: &str = "first-start";

struct Entry {
    path: PathBuf,
    document: Option<Document>,
}

/// Registry of named configuration documents.
pub struct ConfigRegistry {
    entries: HashMap<String, Entry>,
    defaults: HashMap<String, DefaultSpec>,
    store: DocumentStore,
    reporter: Box<dyn Reporter>,
}

fn normalize(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl ConfigRegistry {
    /// A registry reporting through `reporter`, seeded with the built-in
    /// default specs for `config` and `worlds`.
    pub fn new(reporter: Box<dyn Reporter>) -> Self {
        let mut default_specs = HashMap::new();
        default_specs.insert(CONFIG.to_string(), defaults::config_defaults());
        default_specs.insert(WORLDS.to_string(), defaults::worlds_defaults());

        Self {
            entries: HashMap::new(),
            defaults: default_specs,
            store: DocumentStore::new(),
            reporter,
        }
    }

    /// A registry reporting to the process console via the `log` facade.
    pub fn with_console() -> Self {
        Self::new(Box::new(ConsoleReporter))
    }

    /// Declare a [`DefaultSpec`] for `name`, replacing any existing one.
    ///
    /// The built-in specs for `config` and `worlds` are pre-declared;
    /// configs without a spec are loaded and saved unchanged.
    pub fn declare_defaults(&mut self, name: &str, spec: DefaultSpec) {
        self.defaults.insert(normalize(name), spec);
    }

    /// Record `name` → `path` in the handle table.
    ///
    /// Names compare case-insensitively; re-registering an existing name
    /// overwrites the path reference (the cached document, if any, stays
    /// until the next reload). With `load_immediately`, the full reload
    /// protocol runs before returning. Returns the stored path.
    pub fn register<P: Into<PathBuf>>(
        &mut self,
        name: &str,
        path: P,
        load_immediately: bool,
    ) -> Result<PathBuf, ConfregError> {
        if name.trim().is_empty() {
            return Err(ConfregError::InvalidName);
        }
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ConfregError::InvalidPath);
        }

        let key = normalize(name);
        match self.entries.get_mut(&key) {
            Some(entry) => entry.path = path.clone(),
            None => {
                self.entries.insert(
                    key.clone(),
                    Entry {
                        path: path.clone(),
                        document: None,
                    },
                );
            }
        }

        if load_immediately {
            self.reload(&key)?;
        }
        Ok(path)
    }

    /// Registered file path for `name`, or `None` if unregistered.
    pub fn file_path(&self, name: &str) -> Option<&Path> {
        self.entries.get(&normalize(name)).map(|e| e.path.as_path())
    }

    /// Cached document for `name`.
    ///
    /// `None` for unregistered names, and for registered names that have
    /// not been loaded yet.
    pub fn document(&self, name: &str) -> Option<&Document> {
        self.entries.get(&normalize(name))?.document.as_ref()
    }

    /// Mutable access to the cached document for `name`.
    ///
    /// Edits stay in memory until the config is saved; a reload discards
    /// them by design.
    pub fn document_mut(&mut self, name: &str) -> Option<&mut Document> {
        self.entries.get_mut(&normalize(name))?.document.as_mut()
    }

    /// Registered names, in no particular order.
    pub fn registered_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Boolean value at `path` in the `config` document.
    ///
    /// `false` if `config` is not registered or loaded, or the path is
    /// absent or not a boolean.
    pub fn bool_setting(&self, path: &str) -> bool {
        self.document(CONFIG)
            .and_then(|doc| doc.get_bool(path))
            .unwrap_or(false)
    }

    /// Run the reload protocol for every registered name.
    ///
    /// Order is unspecified; no config's reload depends on another's having
    /// run first (the `first-start` check falls back to disk when `config`
    /// is not yet cached).
    pub fn reload_all(&mut self) -> Result<(), ConfregError> {
        let names = self.registered_names();
        for name in names {
            self.reload(&name)?;
        }
        Ok(())
    }

    /// The reload protocol for one name.
    ///
    /// Applies defaults (unconditionally, except for `worlds` which is
    /// gated on `first-start`), persists them, then loads the document from
    /// disk into the cache, replacing any prior cached document. If the
    /// defaulting save failed, the defaulted in-memory document is
    /// installed instead of the stale on-disk content.
    pub fn reload(&mut self, name: &str) -> Result<(), ConfregError> {
        let key = normalize(name);
        let path = match self.entries.get(&key) {
            Some(entry) => entry.path.clone(),
            None => return Err(ConfregError::NotRegistered(name.to_string())),
        };

        let unsaved = if key != WORLDS {
            self.apply_defaults(&key, &path)
        } else if self.first_start() {
            let unsaved = self.apply_defaults(&key, &path);
            self.clear_first_start();
            unsaved
        } else {
            None
        };

        let document = match unsaved {
            Some(defaulted) => defaulted,
            None => self.store.load(&path),
        };
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.document = Some(document);
        }
        Ok(())
    }

    /// Persist the cached document for `name` to its registered path.
    ///
    /// Does nothing if `name` is unregistered or has no cached document.
    /// An I/O failure is reported and swallowed; the next save or reload
    /// retries naturally.
    pub fn save(&self, name: &str) {
        let key = normalize(name);
        let Some(entry) = self.entries.get(&key) else {
            return;
        };
        let Some(document) = entry.document.as_ref() else {
            return;
        };
        if let Err(e) = self.store.save(document, &entry.path) {
            self.reporter
                .report(&format!("Error saving {key}.toml: {e}"), true);
        }
    }

    /// Persist every registered config best-effort, then clear the handle
    /// table and document cache.
    ///
    /// A failure on one config is reported and does not abort the rest.
    pub fn shutdown(&mut self) {
        self.reporter.report("Saving configs for shutdown.", false);
        for name in self.registered_names() {
            self.save(&name);
        }
        self.entries.clear();
    }

    /// Default-application for one name: load the on-disk document, fill in
    /// missing baseline keys, persist.
    ///
    /// Returns `Some(document)` when persisting failed — the caller installs
    /// the defaulted in-memory copy instead of re-reading stale disk content.
    /// Returns `None` when disk is up to date.
    fn apply_defaults(&self, key: &str, path: &Path) -> Option<Document> {
        let mut document = self.store.load(path);
        if let Some(spec) = self.defaults.get(key) {
            spec.apply(&mut document);
        }

        match self.store.save(&document, path) {
            Ok(()) => None,
            Err(e) => {
                self.reporter
                    .report(&format!("Error saving {key}.toml: {e}"), true);
                Some(document)
            }
        }
    }

    /// Current value of the `first-start` gate.
    ///
    /// Read from the cached `config` document when loaded; otherwise from
    /// disk on demand, so reload order does not matter. An absent key or
    /// absent file counts as `true` (the flag's declared default). An
    /// unregistered `config` counts as `false`, with a reported warning —
    /// without it the flag could never be flipped and the transition would
    /// lose its one-shot guarantee.
    fn first_start(&self) -> bool {
        if let Some(doc) = self.document(CONFIG) {
            return doc.get_bool(FIRST_START).unwrap_or(true);
        }
        match self.file_path(CONFIG) {
            Some(path) => self.store.load(path).get_bool(FIRST_START).unwrap_or(true),
            None => {
                self.reporter.report(
                    "Skipping 'worlds' defaults: no 'config' registered to check first-start.",
                    true,
                );
                false
            }
        }
    }

    /// Flip `first-start` to `false` and persist `config` immediately, so
    /// the one-shot transition survives a restart.
    fn clear_first_start(&mut self) {
        let Some(path) = self.entries.get(CONFIG).map(|e| e.path.clone()) else {
            return;
        };

        match self.document_mut(CONFIG) {
            Some(doc) => {
                doc.set(FIRST_START, false);
                self.save(CONFIG);
            }
            // config registered but not loaded yet: flip directly on disk
            None => {
                let mut doc = self.store.load(&path);
                doc.set(FIRST_START, false);
                if let Err(e) = self.store.save(&doc, &path) {
                    self.reporter
                        .report(&format!("Error saving {CONFIG}.toml: {e}"), true);
                }
            }
        }
    }
}
