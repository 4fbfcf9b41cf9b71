pub mod error;
pub mod mem;
pub mod redb;
pub mod traits;

pub use error::DocError;
pub use mem::MemStore;
pub use redb::RedbStore;
pub use traits::DocStore;
