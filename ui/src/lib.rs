//! Stockroom client engine.
//!
//! The inventory SPA's entire state machine lives here: one state
//! container, an HTTP client for the five inventory endpoints, and the
//! action handlers that connect them. Rust owns all state and logic; a
//! rendering layer (web page, terminal, anything) only snapshots
//! [`state::AppState`] and draws it, re-rendering on [`app::InventoryApp`]
//! change notifications.

pub mod api;
pub mod app;
pub mod model;
pub mod state;

pub use api::{ApiError, HttpApi, InventoryApi};
pub use app::InventoryApp;
pub use model::Item;
pub use state::{AppState, ItemForm};
