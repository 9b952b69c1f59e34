//! PrefStore - flat key-value preference memory
//!
//! Persists a user's preference record between runs as a single JSON object.
//! The document is read once when opened and rewritten wholesale on save.
//!
//! # Example
//!
//! ```ignore
//! use prefstore::PreferenceStore;
//!
//! let mut store = PreferenceStore::open("preferences.json");
//! store.set("wake_time", serde_json::json!("06:30"))?;
//! assert_eq!(store.get("wake_time"), Some(&serde_json::json!("06:30")));
//! ```

pub mod cli;
pub mod config;
mod store;

pub use store::{PreferenceStore, Preferences, StoreError};

/// Default file name for the preference document
pub const DEFAULT_FILE_NAME: &str = "preferences.json";
