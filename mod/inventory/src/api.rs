use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use stockroom_core::ServiceError;

use crate::model::{CreateRequest, InventoryRecord, UpdateRequest};
use crate::store::InventoryStore;

type StoreState = Arc<InventoryStore>;

/// Build the inventory module router.
///
/// Routes (merged at the application root):
/// - `POST   /inventory`       — create a record
/// - `GET    /inventory/:id`   — get one record, or `null`
/// - `GET    /inventories`     — list all records
/// - `PUT    /inventory`       — overwrite a record, returns the pre-update snapshot or `null`
/// - `DELETE /inventory/:id`   — delete a record, always `{}`
pub fn router(store: Arc<InventoryStore>) -> Router {
    Router::new()
        .route("/inventory", post(create_inventory).put(update_inventory))
        .route(
            "/inventory/{id}",
            get(get_inventory).delete(delete_inventory),
        )
        .route("/inventories", get(list_inventories))
        .with_state(store)
}

// ---------------------------------------------------------------------------
// POST /inventory
// ---------------------------------------------------------------------------

async fn create_inventory(
    State(store): State<StoreState>,
    Json(req): Json<CreateRequest>,
) -> Result<Json<InventoryRecord>, ServiceError> {
    let record = store
        .create(req)
        .map_err(|e| ServiceError::storage("Fail!", e))?;
    Ok(Json(record))
}

// ---------------------------------------------------------------------------
// GET /inventory/:id
// ---------------------------------------------------------------------------

async fn get_inventory(
    State(store): State<StoreState>,
    Path(id): Path<String>,
) -> Result<Json<Option<InventoryRecord>>, ServiceError> {
    // A missing id is a successful `null`, not an error.
    let record = store
        .get(&id)
        .map_err(|e| ServiceError::storage("Error retrieving inventory", e))?;
    Ok(Json(record))
}

// ---------------------------------------------------------------------------
// GET /inventories
// ---------------------------------------------------------------------------

async fn list_inventories(
    State(store): State<StoreState>,
) -> Result<Json<Vec<InventoryRecord>>, ServiceError> {
    let records = store
        .list()
        .map_err(|e| ServiceError::storage("Error!", e))?;
    Ok(Json(records))
}

// ---------------------------------------------------------------------------
// PUT /inventory
// ---------------------------------------------------------------------------

async fn update_inventory(
    State(store): State<StoreState>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<Option<InventoryRecord>>, ServiceError> {
    // Returns the record as it was before the write (or `null` if no match).
    let prior = store
        .update(req)
        .map_err(|e| ServiceError::storage("Error updating inventory", e))?;
    Ok(Json(prior))
}

// ---------------------------------------------------------------------------
// DELETE /inventory/:id
// ---------------------------------------------------------------------------

async fn delete_inventory(
    State(store): State<StoreState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    store
        .delete(&id)
        .map_err(|e| ServiceError::storage("Error deleting inventory", e))?;
    // The body never distinguishes "deleted" from "nothing to delete".
    Ok(Json(serde_json::json!({})))
}
