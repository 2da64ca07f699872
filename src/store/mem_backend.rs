use super::backend::KvBackend;
use crate::error::{Result, WallzError};
use std::cell::RefCell;
use std::collections::HashMap;

/// Process-lifetime in-memory backend.
///
/// Substituted for [`super::fs_backend::FsBackend`] when no durable data
/// directory is available (headless execution, sandboxed tests, denied
/// permissions). Same read/write semantics, no persistence across restarts.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `KvBackend` trait to use `&self` for all methods.
pub struct MemBackend {
    table: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self {
            table: RefCell::new(HashMap::new()),
            simulate_write_error: RefCell::new(false),
        }
    }
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper to plant a raw value directly, bypassing the store's
    /// serialization (e.g. to simulate a corrupt payload).
    pub fn set_raw(&self, key: &str, value: &str) {
        self.table
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl KvBackend for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let table = self.table.borrow();
        Ok(table.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(WallzError::Store("Simulated write error".to_string()));
        }
        let mut table = self.table.borrow_mut();
        table.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
