use tracing::debug;

use crate::cache::FieldCache;
use crate::canonical::CanonicalCbor;
use crate::codec::CborEncode;
use crate::extension::MarshalCbor;
use crate::float::{reduce_f32, reduce_f64, FloatRepr};
use crate::options::{EncodeOptions, RecordKeyOrder};
use crate::order::sort_pairs;
use crate::profile::{
    minimal_additional_info, Major, AI_EIGHT_BYTES, AI_FOUR_BYTES, AI_ONE_BYTE, AI_TWO_BYTES,
    SIMPLE_FALSE, SIMPLE_FLOAT32, SIMPLE_FLOAT64, SIMPLE_NULL, SIMPLE_TRUE,
};
use crate::record::CborRecord;
use crate::{wire, CborError};

#[cfg(feature = "simdutf8")]
fn checked_text(bytes: &[u8]) -> Option<&str> {
    simdutf8::basic::from_utf8(bytes).ok()
}

#[cfg(not(feature = "simdutf8"))]
fn checked_text(bytes: &[u8]) -> Option<&str> {
    core::str::from_utf8(bytes).ok()
}

struct VecSink {
    buf: Vec<u8>,
}

impl VecSink {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    #[inline]
    fn write_u8(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    #[inline]
    fn position(&self) -> usize {
        self.buf.len()
    }

    fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

/// Canonical CBOR encoder writing into an in-memory buffer.
///
/// An encoder borrows the [`FieldCache`] used to resolve record fields and carries the
/// [`EncodeOptions`] that select key orderings. Composite writes (`seq`, `map_entries`, `record`,
/// `fields`) are all-or-nothing: on error the buffer is rolled back to where the item started.
pub struct Encoder<'c> {
    sink: VecSink,
    cache: &'c FieldCache,
    options: EncodeOptions,
}

impl Encoder<'static> {
    /// Create an encoder backed by the process-wide [`FieldCache`] with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(FieldCache::global(), EncodeOptions::default())
    }
}

impl Default for Encoder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> Encoder<'c> {
    /// Create an encoder with an explicit cache and options.
    #[must_use]
    pub fn with_options(cache: &'c FieldCache, options: EncodeOptions) -> Self {
        Self {
            sink: VecSink::with_capacity(options.initial_capacity),
            cache,
            options,
        }
    }

    /// The options this encoder was built with.
    #[must_use]
    pub const fn options(&self) -> EncodeOptions {
        self.options
    }

    /// The field cache this encoder resolves records through.
    #[must_use]
    pub const fn cache(&self) -> &'c FieldCache {
        self.cache
    }

    /// Return the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sink.position()
    }

    /// Returns `true` if no bytes have been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sink.position() == 0
    }

    /// Borrow the bytes emitted so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.sink.buf
    }

    /// Consume and return the encoded bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.sink.into_vec()
    }

    /// Consume and return the encoded bytes as [`CanonicalCbor`].
    ///
    /// # Errors
    ///
    /// Returns [`CborError::Malformed`] unless the buffer holds exactly one complete data item:
    /// an empty encoder, a header whose items were never written, or several top-level items are
    /// all rejected.
    pub fn into_canonical(self) -> Result<CanonicalCbor, CborError> {
        let bytes = self.into_vec();
        wire::check_single_item(&bytes)?;
        Ok(CanonicalCbor::new_unchecked(bytes))
    }

    fn nested(&self) -> Encoder<'c> {
        Encoder {
            sink: VecSink::with_capacity(16),
            cache: self.cache,
            options: self.options,
        }
    }

    /// Write an item header: the major type plus the shortest field holding `magnitude`.
    ///
    /// This is the single place where canonical field widths are chosen; every integer and every
    /// length prefix goes through it.
    #[allow(clippy::cast_possible_truncation)]
    pub fn write_item(&mut self, major: Major, magnitude: u64) {
        let ai = minimal_additional_info(magnitude);
        self.sink.write_u8(major.initial_byte(ai));
        match ai {
            AI_ONE_BYTE => self.sink.write_u8(magnitude as u8),
            AI_TWO_BYTES => self.sink.write(&(magnitude as u16).to_be_bytes()),
            AI_FOUR_BYTES => self.sink.write(&(magnitude as u32).to_be_bytes()),
            AI_EIGHT_BYTES => self.sink.write(&magnitude.to_be_bytes()),
            _ => {}
        }
    }

    #[inline]
    fn write_len(&mut self, major: Major, len: usize) {
        // usize is at most 64 bits on every supported target.
        self.write_item(major, len as u64);
    }

    fn write_simple(&mut self, code: u8) {
        debug_assert!(matches!(code, SIMPLE_FALSE | SIMPLE_TRUE | SIMPLE_NULL));
        self.sink.write_u8(Major::Simple.initial_byte(code));
    }

    /// Roll the buffer back to `start` if `res` failed.
    fn guard(&mut self, start: usize, res: Result<(), CborError>) -> Result<(), CborError> {
        if res.is_err() {
            self.sink.truncate(start);
        }
        res
    }

    /// Encode CBOR null.
    ///
    /// # Errors
    ///
    /// Never fails; returns `Result` for uniformity with the other writers.
    pub fn null(&mut self) -> Result<(), CborError> {
        self.write_simple(SIMPLE_NULL);
        Ok(())
    }

    /// Encode a CBOR boolean.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn bool(&mut self, v: bool) -> Result<(), CborError> {
        self.write_simple(if v { SIMPLE_TRUE } else { SIMPLE_FALSE });
        Ok(())
    }

    /// Encode a signed integer. Negative values are written as major 1 with magnitude `-1 - v`.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn int(&mut self, v: i64) -> Result<(), CborError> {
        if v < 0 {
            self.write_item(Major::Negative, (-1 - v).unsigned_abs());
        } else {
            self.write_item(Major::Unsigned, v.unsigned_abs());
        }
        Ok(())
    }

    /// Encode an unsigned integer.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn uint(&mut self, v: u64) -> Result<(), CborError> {
        self.write_item(Major::Unsigned, v);
        Ok(())
    }

    /// Encode a 128-bit signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`CborError::UnsupportedValue`] if the magnitude does not fit in 64 bits.
    pub fn int_i128(&mut self, v: i128) -> Result<(), CborError> {
        let (major, magnitude) = if v < 0 {
            (Major::Negative, -1 - v)
        } else {
            (Major::Unsigned, v)
        };
        let magnitude = u64::try_from(magnitude).map_err(|_| CborError::unsupported_value(v))?;
        self.write_item(major, magnitude);
        Ok(())
    }

    /// Encode a 128-bit unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`CborError::UnsupportedValue`] if the value exceeds `u64::MAX`.
    pub fn uint_u128(&mut self, v: u128) -> Result<(), CborError> {
        let magnitude = u64::try_from(v).map_err(|_| CborError::unsupported_value(v))?;
        self.write_item(Major::Unsigned, magnitude);
        Ok(())
    }

    fn float(&mut self, repr: FloatRepr) {
        match repr {
            FloatRepr::Single(bits) => {
                self.sink.write_u8(Major::Simple.initial_byte(SIMPLE_FLOAT32));
                self.sink.write(&bits.to_be_bytes());
            }
            FloatRepr::Double(bits) => {
                self.sink.write_u8(Major::Simple.initial_byte(SIMPLE_FLOAT64));
                self.sink.write(&bits.to_be_bytes());
            }
        }
    }

    /// Encode an `f32` as a 4-byte float.
    ///
    /// # Errors
    ///
    /// Returns [`CborError::UnsupportedValue`] for NaN.
    pub fn f32(&mut self, v: f32) -> Result<(), CborError> {
        let repr = reduce_f32(v)?;
        self.float(repr);
        Ok(())
    }

    /// Encode an `f64`, using the 4-byte form whenever it is exact.
    ///
    /// # Errors
    ///
    /// Returns [`CborError::UnsupportedValue`] for NaN.
    pub fn f64(&mut self, v: f64) -> Result<(), CborError> {
        let repr = reduce_f64(v)?;
        self.float(repr);
        Ok(())
    }

    /// Encode a text string.
    ///
    /// # Errors
    ///
    /// Never fails: `str` is valid UTF-8 by construction.
    pub fn text(&mut self, s: &str) -> Result<(), CborError> {
        self.write_len(Major::Text, s.len());
        self.sink.write(s.as_bytes());
        Ok(())
    }

    /// Encode bytes that are meant to be text, validating them as UTF-8 first.
    ///
    /// # Errors
    ///
    /// Returns [`CborError::InvalidText`] if `bytes` are not well-formed UTF-8; nothing is written.
    pub fn text_bytes(&mut self, bytes: &[u8]) -> Result<(), CborError> {
        let Some(s) = checked_text(bytes) else {
            debug!(len = bytes.len(), "rejected text that is not valid UTF-8");
            return Err(CborError::invalid_text(bytes));
        };
        self.text(s)
    }

    /// Encode a byte string.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn bytes(&mut self, b: &[u8]) -> Result<(), CborError> {
        self.write_len(Major::Bytes, b.len());
        self.sink.write(b);
        Ok(())
    }

    /// Write an array header; the caller must follow it with `len` items.
    pub fn array_header(&mut self, len: usize) {
        self.write_len(Major::Array, len);
    }

    /// Write a map header; the caller must follow it with `len` canonically ordered pairs.
    pub fn map_header(&mut self, len: usize) {
        self.write_len(Major::Map, len);
    }

    /// Encode a definite-length array of the given items, in order.
    ///
    /// # Errors
    ///
    /// Returns the first element error; the array is rolled back.
    pub fn seq<'v, T, I>(&mut self, items: I) -> Result<(), CborError>
    where
        T: CborEncode + ?Sized + 'v,
        I: IntoIterator<Item = &'v T>,
        I::IntoIter: ExactSizeIterator,
    {
        let start = self.sink.position();
        let mut items = items.into_iter();
        self.array_header(items.len());
        let res = items.try_for_each(|item| item.encode(self));
        self.guard(start, res)
    }

    /// Encode a map, sorting entries by their encoded keys.
    ///
    /// Every key is encoded on its own first; the output is independent of iteration order.
    ///
    /// # Errors
    ///
    /// Returns the first key or value error; the map is rolled back.
    pub fn map_entries<'v, K, V, I>(&mut self, entries: I) -> Result<(), CborError>
    where
        K: CborEncode + ?Sized + 'v,
        V: CborEncode + ?Sized + 'v,
        I: IntoIterator<Item = (&'v K, &'v V)>,
    {
        let start = self.sink.position();
        let res = self.map_entries_inner(entries);
        self.guard(start, res)
    }

    fn map_entries_inner<'v, K, V, I>(&mut self, entries: I) -> Result<(), CborError>
    where
        K: CborEncode + ?Sized + 'v,
        V: CborEncode + ?Sized + 'v,
        I: IntoIterator<Item = (&'v K, &'v V)>,
    {
        let mut pairs: Vec<(Vec<u8>, &'v V)> = Vec::new();
        for (key, value) in entries {
            pairs.push((self.encode_key(key)?, value));
        }
        sort_pairs(&mut pairs, self.options.map_key_order);
        self.write_pairs(&pairs)
    }

    fn encode_key<K: CborEncode + ?Sized>(&self, key: &K) -> Result<Vec<u8>, CborError> {
        let mut enc = self.nested();
        key.encode(&mut enc)?;
        Ok(enc.into_vec())
    }

    fn write_pairs<V>(&mut self, pairs: &[(Vec<u8>, &V)]) -> Result<(), CborError>
    where
        V: CborEncode + ?Sized,
    {
        self.map_header(pairs.len());
        for (key, value) in pairs {
            self.sink.write(key);
            value.encode(self)?;
        }
        Ok(())
    }

    /// Encode a record as a map of its contributed fields.
    ///
    /// Field descriptors come from the encoder's [`FieldCache`]. Fields flagged omit-if-empty
    /// whose value is empty are left out, and the map header counts only emitted fields.
    ///
    /// # Errors
    ///
    /// Returns the first field error; the record is rolled back.
    pub fn record<R: CborRecord + ?Sized>(&mut self, record: &R) -> Result<(), CborError> {
        let descriptors = self.cache.fields_of(record);
        let mut entries: Vec<(&str, &dyn CborEncode)> = Vec::with_capacity(descriptors.len());
        for desc in descriptors.iter() {
            let Some(value) = record.field(desc.slot) else {
                continue;
            };
            if desc.omit_empty && value.is_empty_value() {
                continue;
            }
            entries.push((desc.name, value));
        }
        self.fields(&entries)
    }

    /// Encode a map keyed by text field names.
    ///
    /// Entries are sorted by encoded key under [`RecordKeyOrder::Canonical`] and kept as given
    /// under [`RecordKeyOrder::Declaration`].
    ///
    /// # Errors
    ///
    /// Returns the first value error; the map is rolled back.
    pub fn fields(&mut self, entries: &[(&str, &dyn CborEncode)]) -> Result<(), CborError> {
        let start = self.sink.position();
        let res = match self.options.record_key_order {
            RecordKeyOrder::Declaration => self.fields_in_order(entries),
            RecordKeyOrder::Canonical => {
                let mut pairs: Vec<(Vec<u8>, &dyn CborEncode)> = entries
                    .iter()
                    .map(|&(name, value)| (self.text_key(name), value))
                    .collect();
                sort_pairs(&mut pairs, self.options.map_key_order);
                self.write_pairs(&pairs)
            }
        };
        self.guard(start, res)
    }

    fn fields_in_order(&mut self, entries: &[(&str, &dyn CborEncode)]) -> Result<(), CborError> {
        self.map_header(entries.len());
        for &(name, value) in entries {
            self.text(name)?;
            value.encode(self)?;
        }
        Ok(())
    }

    fn text_key(&self, name: &str) -> Vec<u8> {
        let mut enc = self.nested();
        enc.write_len(Major::Text, name.len());
        enc.sink.write(name.as_bytes());
        enc.into_vec()
    }

    /// Splice the output of a value's [`MarshalCbor`] hook.
    ///
    /// # Errors
    ///
    /// Returns [`CborError::Marshaler`] if the hook fails.
    pub fn marshaler<M: MarshalCbor + ?Sized>(&mut self, value: &M) -> Result<(), CborError> {
        match value.marshal_cbor() {
            Ok(bytes) => {
                self.sink.write(&bytes);
                Ok(())
            }
            Err(source) => {
                let type_name = value.type_name();
                debug!(type_name, error = %source, "marshal_cbor hook failed");
                Err(CborError::Marshaler { type_name, source })
            }
        }
    }

    /// Encode any [`CborEncode`] value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded.
    pub fn value<T: CborEncode + ?Sized>(&mut self, value: &T) -> Result<(), CborError> {
        value.encode(self)
    }
}
