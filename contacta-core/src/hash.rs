//! SHA-256 hashing for content addressing.

use sha2::{Digest, Sha256};

/// Calculate the SHA-256 hash of in-memory data.
pub fn sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Incremental SHA-256 over a sequence of length-prefixed fields.
///
/// Each field is prefixed with its length so that `["ab", "c"]` and
/// `["a", "bc"]` hash differently.
#[derive(Default)]
pub struct FieldHasher {
    inner: Sha256,
}

impl FieldHasher {
    /// Start a new hash.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one field.
    pub fn field(&mut self, bytes: &[u8]) -> &mut Self {
        self.inner.update((bytes.len() as u64).to_le_bytes());
        self.inner.update(bytes);
        self
    }

    /// Hex digest of everything fed so far.
    pub fn finish(self) -> String {
        hex::encode(self.inner.finalize())
    }
}
