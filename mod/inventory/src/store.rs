use std::sync::Arc;

use stockroom_core::new_id;
use stockroom_doc::{DocError, DocStore};

use crate::model::{CreateRequest, InventoryRecord, StoredRecord, UpdateRequest};

/// Key prefix for inventory documents in the doc store.
const KEY_PREFIX: &str = "inventory:";

fn key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}")
}

/// Persistent storage for inventory records, backed by a DocStore.
///
/// Each operation is a single document read/write; the store holds no state
/// beyond the injected handle. Missing ids are not errors — get/update
/// return `Ok(None)` and delete returns `Ok(())` either way.
pub struct InventoryStore {
    db: Arc<dyn DocStore>,
}

impl InventoryStore {
    pub fn new(db: Arc<dyn DocStore>) -> Self {
        Self { db }
    }

    /// Insert a new record with a fresh id. Returns the stored record.
    pub fn create(&self, req: CreateRequest) -> Result<InventoryRecord, DocError> {
        let record = InventoryRecord {
            id: new_id(),
            prodname: req.prodname,
            qty: req.qty,
            price: req.price,
            status: req.status,
        };
        let stored = StoredRecord {
            record,
            version: 0,
        };
        self.write(&stored)?;
        Ok(stored.record)
    }

    /// Look up one record by id, version stripped.
    pub fn get(&self, id: &str) -> Result<Option<InventoryRecord>, DocError> {
        match self.db.get(&key(id))? {
            Some(bytes) => Ok(Some(decode(&bytes)?.record)),
            None => Ok(None),
        }
    }

    /// Return every record in the collection, version stripped, in the
    /// store's key order. Ordering is not part of the contract.
    pub fn list(&self) -> Result<Vec<InventoryRecord>, DocError> {
        self.db
            .scan(KEY_PREFIX)?
            .into_iter()
            .map(|(_, bytes)| Ok(decode(&bytes)?.record))
            .collect()
    }

    /// Overwrite the four payload fields of the record identified by
    /// `req.id` with exactly the caller-supplied values, bumping the
    /// internal version.
    ///
    /// Returns the **pre-update** snapshot — the record as it was before the
    /// write. This is the documented contract of the update endpoint, not an
    /// accident.
    pub fn update(&self, req: UpdateRequest) -> Result<Option<InventoryRecord>, DocError> {
        let Some(bytes) = self.db.get(&key(&req.id))? else {
            return Ok(None);
        };
        let prior = decode(&bytes)?;

        let stored = StoredRecord {
            record: InventoryRecord {
                id: prior.record.id.clone(),
                prodname: req.prodname,
                qty: req.qty,
                price: req.price,
                status: req.status,
            },
            version: prior.version + 1,
        };
        self.write(&stored)?;
        Ok(Some(prior.record))
    }

    /// Remove the record identified by id. Removing a missing id succeeds.
    pub fn delete(&self, id: &str) -> Result<(), DocError> {
        self.db.delete(&key(id))
    }

    fn write(&self, stored: &StoredRecord) -> Result<(), DocError> {
        let bytes =
            serde_json::to_vec(stored).map_err(|e| DocError::Serialization(e.to_string()))?;
        self.db.put(&key(&stored.record.id), &bytes)
    }
}

fn decode(bytes: &[u8]) -> Result<StoredRecord, DocError> {
    serde_json::from_slice(bytes).map_err(|e| DocError::Serialization(e.to_string()))
}
