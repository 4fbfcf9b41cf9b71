use crate::error::DocError;

/// DocStore provides a flat document-storage interface.
///
/// Documents are opaque byte blobs (JSON in practice) addressed by a
/// namespaced key: `inventory:{id}`. The store assigns no ids and parses no
/// documents — id generation and (de)serialization belong to the layer
/// above.
pub trait DocStore: Send + Sync {
    /// Get the document for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DocError>;

    /// Store a document under a key, overwriting any previous value.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), DocError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), DocError>;

    /// Scan all documents whose key starts with a prefix.
    /// Returns (key, value) pairs in key order.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, DocError>;
}
