use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::DocError;
use crate::traits::DocStore;

/// In-memory DocStore for tests. BTreeMap gives the same key-ordered scan
/// behavior as the redb backend.
#[derive(Default)]
pub struct MemStore {
    docs: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocStore for MemStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DocError> {
        let docs = self.docs.read().map_err(|e| DocError::Storage(e.to_string()))?;
        Ok(docs.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), DocError> {
        let mut docs = self.docs.write().map_err(|e| DocError::Storage(e.to_string()))?;
        docs.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), DocError> {
        let mut docs = self.docs.write().map_err(|e| DocError::Storage(e.to_string()))?;
        docs.remove(key);
        Ok(())
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, DocError> {
        let docs = self.docs.read().map_err(|e| DocError::Storage(e.to_string()))?;
        Ok(docs
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
