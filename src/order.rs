use core::cmp::Ordering;

/// Ordering applied to the encoded keys of a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyOrder {
    /// Bytewise lexicographic order of the encoded keys; a key that is a strict prefix of another
    /// sorts first. This is the RFC 8949 core deterministic order.
    #[default]
    Lexicographic,
    /// Shorter encoded key first, then bytewise. This is the RFC 7049 canonical order.
    LengthFirst,
}

impl KeyOrder {
    /// Compare two encoded keys under this order.
    #[inline]
    #[must_use]
    pub fn compare(self, a: &[u8], b: &[u8]) -> Ordering {
        match self {
            Self::Lexicographic => a.cmp(b),
            Self::LengthFirst => cmp_length_first(a, b),
        }
    }
}

/// Compare two encoded keys: shorter encoding first, then lexicographic bytes.
#[inline]
#[must_use]
pub fn cmp_length_first(a: &[u8], b: &[u8]) -> Ordering {
    match a.len().cmp(&b.len()) {
        Ordering::Equal => a.cmp(b),
        other => other,
    }
}

/// Stable-sort `(encoded key, value)` pairs by key.
///
/// Distinct source keys with identical encodings keep their input order.
pub fn sort_pairs<V>(pairs: &mut [(Vec<u8>, V)], order: KeyOrder) {
    pairs.sort_by(|a, b| order.compare(&a.0, &b.0));
}
