pub mod api;
pub mod model;
pub mod store;

use std::sync::Arc;

use axum::Router;
use stockroom_core::Module;
use stockroom_doc::DocStore;

use store::InventoryStore;

/// The Inventory module — CRUD over a single collection of inventory
/// records.
///
/// Five thin operations, each a direct request→store→response mapping with
/// no business rules in between. The store handle is injected; the module
/// holds no other state.
pub struct InventoryModule {
    store: Arc<InventoryStore>,
}

impl InventoryModule {
    pub fn new(db: Arc<dyn DocStore>) -> Self {
        Self {
            store: Arc::new(InventoryStore::new(db)),
        }
    }

    /// Direct store access, for embedding and tests.
    pub fn store(&self) -> &Arc<InventoryStore> {
        &self.store
    }
}

impl Module for InventoryModule {
    fn name(&self) -> &str {
        "inventory"
    }

    fn routes(&self) -> Router {
        api::router(Arc::clone(&self.store))
    }
}
