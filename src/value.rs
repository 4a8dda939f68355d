use std::borrow::Cow;
use std::fmt;

use crate::codec::{CborArrayElem, CborEncode};
use crate::encode::Encoder;
use crate::extension::MarshalCbor;
use crate::CborError;

/// A dynamically shaped value.
///
/// `Value` is the closed set of shapes the encoder understands, for data whose shape is only known
/// at runtime: heterogeneous arrays, maps with mixed key types, or values assembled from another
/// format. Statically typed data can be embedded with [`Value::Typed`].
#[derive(Clone)]
pub enum Value<'a> {
    /// Absent value; encodes as CBOR null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Single-precision float; always encoded with 4 bytes.
    F32(f32),
    /// Double-precision float; reduced to 4 bytes when exact.
    F64(f64),
    /// Text, held as bytes and validated as UTF-8 at encode time.
    Text(Cow<'a, [u8]>),
    /// Byte string.
    Bytes(Cow<'a, [u8]>),
    /// Ordered sequence.
    Array(Vec<Value<'a>>),
    /// Key/value mapping; encoded with keys in canonical order.
    Map(Vec<(Value<'a>, Value<'a>)>),
    /// Record-shaped mapping keyed by field names, ordered per
    /// [`RecordKeyOrder`](crate::RecordKeyOrder).
    Fields(Vec<(Cow<'a, str>, Value<'a>)>),
    /// A statically typed value.
    Typed(&'a dyn CborEncode),
    /// A value supplying its own encoding.
    Marshaler(&'a dyn MarshalCbor),
    /// A value of a shape the encoder cannot represent; encoding it fails.
    Unsupported(Cow<'static, str>),
}

impl<'a> Value<'a> {
    /// Text value from a string.
    #[must_use]
    pub fn text(s: impl Into<Cow<'a, str>>) -> Self {
        match s.into() {
            Cow::Borrowed(s) => Self::Text(Cow::Borrowed(s.as_bytes())),
            Cow::Owned(s) => Self::Text(Cow::Owned(s.into_bytes())),
        }
    }

    /// Text value from raw bytes, checked as UTF-8 when encoded.
    #[must_use]
    pub fn text_bytes(b: impl Into<Cow<'a, [u8]>>) -> Self {
        Self::Text(b.into())
    }

    /// Byte string value.
    #[must_use]
    pub fn bytes(b: impl Into<Cow<'a, [u8]>>) -> Self {
        Self::Bytes(b.into())
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl CborEncode for Value<'_> {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        match self {
            Self::Null => enc.null(),
            Self::Bool(b) => enc.bool(*b),
            Self::Int(i) => enc.int(*i),
            Self::Uint(u) => enc.uint(*u),
            Self::F32(f) => enc.f32(*f),
            Self::F64(f) => enc.f64(*f),
            Self::Text(b) => enc.text_bytes(b),
            Self::Bytes(b) => enc.bytes(b),
            Self::Array(items) => enc.seq(items),
            Self::Map(pairs) => enc.map_entries(pairs.iter().map(|(k, v)| (k, v))),
            Self::Fields(fields) => {
                let entries: Vec<(&str, &dyn CborEncode)> = fields
                    .iter()
                    .map(|(name, value)| (name.as_ref(), value as &dyn CborEncode))
                    .collect();
                enc.fields(&entries)
            }
            Self::Typed(v) => v.encode(enc),
            Self::Marshaler(m) => enc.marshaler(*m),
            Self::Unsupported(name) => Err(CborError::unsupported_type(name.clone())),
        }
    }

    #[allow(clippy::float_cmp)]
    fn is_empty_value(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !*b,
            Self::Int(i) => *i == 0,
            Self::Uint(u) => *u == 0,
            Self::F32(f) => *f == 0.0,
            Self::F64(f) => *f == 0.0,
            Self::Text(b) | Self::Bytes(b) => b.is_empty(),
            Self::Array(items) => items.is_empty(),
            Self::Map(pairs) => pairs.is_empty(),
            Self::Fields(fields) => fields.is_empty(),
            Self::Typed(v) => v.is_empty_value(),
            Self::Marshaler(_) | Self::Unsupported(_) => false,
        }
    }
}

impl CborArrayElem for Value<'_> {}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Self::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            Self::F32(v) => f.debug_tuple("F32").field(v).finish(),
            Self::F64(v) => f.debug_tuple("F64").field(v).finish(),
            Self::Text(b) => f
                .debug_tuple("Text")
                .field(&String::from_utf8_lossy(b))
                .finish(),
            Self::Bytes(b) => f.debug_tuple("Bytes").field(b).finish(),
            Self::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Self::Map(pairs) => f.debug_tuple("Map").field(pairs).finish(),
            Self::Fields(fields) => f.debug_tuple("Fields").field(fields).finish(),
            Self::Typed(_) => f.write_str("Typed(..)"),
            Self::Marshaler(m) => f.debug_tuple("Marshaler").field(&m.type_name()).finish(),
            Self::Unsupported(name) => f.debug_tuple("Unsupported").field(name).finish(),
        }
    }
}

impl From<bool> for Value<'_> {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Value<'_> {
            fn from(v: $t) -> Self {
                Self::Int(i64::from(v))
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Value<'_> {
            fn from(v: $t) -> Self {
                Self::Uint(u64::from(v))
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64);
from_unsigned!(u8, u16, u32, u64);

impl From<f32> for Value<'_> {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

impl From<f64> for Value<'_> {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Self::text(v)
    }
}

impl From<String> for Value<'_> {
    fn from(v: String) -> Self {
        Self::text(v)
    }
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(v: &'a [u8]) -> Self {
        Self::Bytes(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for Value<'_> {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(Cow::Owned(v))
    }
}

impl<'a> From<Vec<Value<'a>>> for Value<'a> {
    fn from(v: Vec<Value<'a>>) -> Self {
        Self::Array(v)
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
