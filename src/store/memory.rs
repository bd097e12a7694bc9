//! Implements the `Store` trait in memory.

use crate::store::Store;
use crate::Result;
use std::collections::HashMap;

/// A `Store` that holds its data in a `HashMap`. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates a store that already holds `data`.
    pub fn new(data: HashMap<String, String>) -> Self {
        Self { data }
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<()> {
        self.data.remove(key);
        Ok(())
    }
}
