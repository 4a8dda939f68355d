/// An owned, canonically encoded CBOR data item.
///
/// Produced by [`encode_to_canonical`](crate::encode_to_canonical) and
/// [`Encoder::into_canonical`](crate::Encoder::into_canonical). Equal values encode to equal bytes,
/// so these bytes are suitable for hashing and equality checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalCbor {
    bytes: Vec<u8>,
}

impl CanonicalCbor {
    #[inline]
    pub(crate) const fn new_unchecked(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Borrow the canonical bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume and return the canonical bytes.
    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Length in bytes of the encoding.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` iff the encoding is empty; construction rejects empty output, so this is
    /// always `false`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Compute the SHA-256 digest of the canonical bytes.
    #[cfg(feature = "sha2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "sha2")))]
    #[must_use]
    pub fn sha256(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};
        let mut h = Sha256::new();
        h.update(&self.bytes);
        let out = h.finalize();
        let mut digest = [0u8; 32];
        digest.copy_from_slice(out.as_slice());
        digest
    }
}

impl AsRef<[u8]> for CanonicalCbor {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<CanonicalCbor> for Vec<u8> {
    fn from(canon: CanonicalCbor) -> Self {
        canon.bytes
    }
}
