use super::KvStore;
use crate::error::{RackError, Result};
use std::collections::HashMap;

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemStore {
    values: HashMap<String, String>,
    simulate_write_error: bool,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set`/`remove` fail, for error-path tests.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(RackError::Store("Simulated write error".to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(RackError::Store("Simulated write error".to_string()));
        }
        self.values.remove(key);
        Ok(())
    }
}
