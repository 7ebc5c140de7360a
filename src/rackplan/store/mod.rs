//! # Storage Layer
//!
//! The editor never talks to a concrete store. It depends on the [`KvStore`]
//! port: a string-keyed store of JSON documents with `get`, `set` and `remove`.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage
//!   - One document per key: `<data dir>/<key>.json`
//!   - Writes are atomic (temporary file, then rename)
//!
//! - [`memory::MemStore`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures and hold raw (possibly malformed) values
//!
//! ## Keys
//!
//! ```text
//! rackplan.grid       # {"cellCount": 10, "width": 800.0, "height": 800.0}
//! rackplan.shelves    # [{"id": "...", "orientation": "horizontal", "row": 0, ...}]
//! ```
//!
//! Reads go through [`load_json`], which treats a missing key and a value that
//! does not parse the same way: the caller gets `None` and falls back to its
//! default. Only writes surface errors.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

pub mod fs;
pub mod memory;

pub const GRID_KEY: &str = "rackplan.grid";
pub const SHELVES_KEY: &str = "rackplan.shelves";

/// Abstract key-value persistence port.
///
/// Values are JSON documents stored as raw strings.
pub trait KvStore {
    /// Raw value for `key`, `Ok(None)` if absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Loads and decodes `key`, or `None` when the key is absent, unreadable or malformed.
pub fn load_json<S: KvStore + ?Sized, T: DeserializeOwned>(store: &S, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "failed to read stored value, using default");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "stored value is malformed, using default");
            None
        }
    }
}

pub fn save_json<S: KvStore + ?Sized, T: Serialize + ?Sized>(
    store: &mut S,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
