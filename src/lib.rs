//! Named-document configuration registry with baseline defaulting, reload,
//! and persistence.
//!
//! Confreg manages a set of named configuration documents for a host
//! application: each name maps to a TOML file on disk, and the registry
//! loads, completes, caches, and saves those documents through one small
//! API.
//!
//! ```no_run
//! use confreg::ConfigRegistry;
//!
//! let mut registry = ConfigRegistry::with_console();
//! registry.register("config", "plugins/app/config.toml", true)?;
//! registry.register("worlds", "plugins/app/worlds.toml", true)?;
//!
//! if registry.bool_setting("player.inventory") {
//!     // ...
//! }
//!
//! registry.shutdown();
//! # Ok::<(), confreg::ConfregError>(())
//! ```
//!
//! # Defaulting
//!
//! Every config name can declare a [`DefaultSpec`]: an ordered list of
//! `(dotted path, value)` pairs that must exist in its document. On each
//! reload, missing paths are filled in and the completed document is
//! persisted; paths the user already set are **never** overwritten, so a
//! partial config file is completed rather than clobbered. The built-in
//! specs for the distinguished `config` and `worlds` documents are
//! pre-declared; [`declare_defaults`](ConfigRegistry::declare_defaults)
//! adds more.
//!
//! # The first-start transition
//!
//! The `worlds` defaults are a one-shot migration: they apply only while
//! the `config` document's `first-start` flag is `true`. The first reload
//! of `worlds` that finds the flag set applies the defaults, flips the flag
//! to `false`, and persists `config` immediately, so the transition
//! survives a restart and never re-runs — even if an admin later empties
//! the defaulted keys.
//!
//! # Reload and persistence
//!
//! [`reload`](ConfigRegistry::reload) always re-reads from disk and
//! replaces the cached document, discarding un-persisted in-memory edits by
//! design; [`save`](ConfigRegistry::save) goes the other way.
//! [`shutdown`](ConfigRegistry::shutdown) saves every registered config
//! best-effort and clears the registry. Saves patch the existing file
//! rather than rewriting it, so user comments and formatting survive.
//!
//! Save failures are reported through the host's [`Reporter`] and never
//! abort the surrounding operation; lookups on unregistered names return
//! `None` or a fallback rather than erroring. The registry is
//! single-threaded by design — the host serializes calls into it.

pub mod error;

mod defaults;
mod document;
mod registry;
mod reporter;
mod store;

#[cfg(test)]
mod fixtures;

pub use defaults::{DefaultSpec, config_defaults, worlds_defaults};
pub use document::Document;
pub use error::ConfregError;
pub use registry::{CONFIG, ConfigRegistry, FIRST_START, WORLDS};
pub use reporter::{ConsoleReporter, Reporter};
pub use store::DocumentStore;
