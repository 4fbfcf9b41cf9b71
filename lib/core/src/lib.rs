pub mod config;
pub mod error;
pub mod module;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use module::Module;

/// Generate a new random ID (UUIDv4, no dashes).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string().replace('-', "")
}
