use std::path::Path;
use std::sync::Arc;

use redb::{Database, TableDefinition};

use crate::error::DocError;
use crate::traits::DocStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("docs");

/// RedbStore is a DocStore implementation backed by redb — a pure-Rust
/// embedded database. One write transaction per call; redb provides the
/// isolation between concurrent requests.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, DocError> {
        let db = Database::create(path).map_err(|e| DocError::Storage(e.to_string()))?;

        // Ensure the table exists by doing a write transaction.
        let write_txn = db
            .begin_write()
            .map_err(|e| DocError::Storage(e.to_string()))?;
        {
            let _table = write_txn
                .open_table(TABLE)
                .map_err(|e| DocError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| DocError::Storage(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl DocStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DocError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| DocError::Storage(e.to_string()))?;
        let table = read_txn
            .open_table(TABLE)
            .map_err(|e| DocError::Storage(e.to_string()))?;

        match table.get(key) {
            Ok(Some(val)) => Ok(Some(val.value().to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(DocError::Storage(e.to_string())),
        }
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), DocError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| DocError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| DocError::Storage(e.to_string()))?;
            table
                .insert(key, value)
                .map_err(|e| DocError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| DocError::Storage(e.to_string()))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), DocError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| DocError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| DocError::Storage(e.to_string()))?;
            table
                .remove(key)
                .map_err(|e| DocError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| DocError::Storage(e.to_string()))?;
        Ok(())
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, DocError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| DocError::Storage(e.to_string()))?;
        let table = read_txn
            .open_table(TABLE)
            .map_err(|e| DocError::Storage(e.to_string()))?;

        let mut results = Vec::new();
        let iter = table
            .range(prefix..)
            .map_err(|e| DocError::Storage(e.to_string()))?;

        for entry in iter {
            let entry = entry.map_err(|e| DocError::Storage(e.to_string()))?;
            let key = entry.0.value().to_string();
            if !key.starts_with(prefix) {
                break;
            }
            let value = entry.1.value().to_vec();
            results.push((key, value));
        }

        Ok(results)
    }
}
