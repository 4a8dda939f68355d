use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::ffi::{OsStr, OsString};
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender, SyncSender};
use std::sync::Arc;

use crate::encode::Encoder;
use crate::CborError;

/// Encode a value into canonical CBOR using the streaming encoder.
///
/// Implementations exist for the standard scalar, string, sequence, map, and smart-pointer types;
/// `#[derive(CborEncode)]` covers user-defined records and enums.
pub trait CborEncode {
    /// Encode `self` into the provided encoder.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError>;

    /// Whether this value counts as empty for omit-if-empty record fields.
    ///
    /// Zero numbers, `false`, empty strings and containers, and absent optionals are empty;
    /// everything else is not.
    fn is_empty_value(&self) -> bool {
        false
    }
}

/// Marker trait for values that encode as CBOR array elements.
///
/// `u8` deliberately does not implement it, so that `Vec<u8>`, `[u8]`, and `[u8; N]` encode as
/// byte strings rather than arrays of integers.
pub trait CborArrayElem {}

/// Encode a value into a fresh byte vector using the process-wide field cache.
///
/// # Errors
///
/// Returns an error if encoding fails. No partial output is ever returned.
pub fn encode_to_vec<T: CborEncode + ?Sized>(value: &T) -> Result<Vec<u8>, CborError> {
    let mut enc = Encoder::new();
    value.encode(&mut enc)?;
    Ok(enc.into_vec())
}

/// Encode a value into owned canonical CBOR bytes.
///
/// # Errors
///
/// Returns an error if encoding fails, or [`CborError::Malformed`] if a `MarshalCbor` hook spliced
/// in bytes that are not exactly one complete item.
pub fn encode_to_canonical<T: CborEncode + ?Sized>(
    value: &T,
) -> Result<crate::CanonicalCbor, CborError> {
    let mut enc = Encoder::new();
    value.encode(&mut enc)?;
    enc.into_canonical()
}

/// A borrowed list of named values that encodes as a record-shaped map.
///
/// Keys are ordered per the encoder's [`RecordKeyOrder`](crate::RecordKeyOrder). Derived enum
/// variants with named fields encode through this.
#[derive(Clone, Copy)]
pub struct FieldsRef<'a>(pub &'a [(&'a str, &'a dyn CborEncode)]);

impl CborEncode for FieldsRef<'_> {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.fields(self.0)
    }

    fn is_empty_value(&self) -> bool {
        self.0.is_empty()
    }
}

impl CborArrayElem for FieldsRef<'_> {}

impl CborEncode for () {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.null()
    }

    fn is_empty_value(&self) -> bool {
        true
    }
}

impl CborEncode for bool {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.bool(*self)
    }

    fn is_empty_value(&self) -> bool {
        !*self
    }
}

macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl CborEncode for $t {
            fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
                enc.int(i64::from(*self))
            }

            fn is_empty_value(&self) -> bool {
                *self == 0
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl CborEncode for $t {
            fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
                enc.uint(u64::from(*self))
            }

            fn is_empty_value(&self) -> bool {
                *self == 0
            }
        }
    )*};
}

impl_signed!(i8, i16, i32, i64);
impl_unsigned!(u8, u16, u32, u64);

impl CborEncode for isize {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.int_i128(*self as i128)
    }

    fn is_empty_value(&self) -> bool {
        *self == 0
    }
}

impl CborEncode for usize {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.uint_u128(*self as u128)
    }

    fn is_empty_value(&self) -> bool {
        *self == 0
    }
}

impl CborEncode for i128 {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.int_i128(*self)
    }

    fn is_empty_value(&self) -> bool {
        *self == 0
    }
}

impl CborEncode for u128 {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.uint_u128(*self)
    }

    fn is_empty_value(&self) -> bool {
        *self == 0
    }
}

impl CborEncode for f32 {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.f32(*self)
    }

    fn is_empty_value(&self) -> bool {
        *self == 0.0
    }
}

impl CborEncode for f64 {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.f64(*self)
    }

    fn is_empty_value(&self) -> bool {
        *self == 0.0
    }
}

impl CborEncode for char {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        let mut buf = [0u8; 4];
        enc.text(self.encode_utf8(&mut buf))
    }
}

impl CborEncode for str {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.text(self)
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl CborEncode for String {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.text(self)
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl CborEncode for OsStr {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.text_bytes(self.as_encoded_bytes())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl CborEncode for OsString {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        self.as_os_str().encode(enc)
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl CborEncode for Path {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        self.as_os_str().encode(enc)
    }

    fn is_empty_value(&self) -> bool {
        self.as_os_str().is_empty()
    }
}

impl CborEncode for PathBuf {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        self.as_os_str().encode(enc)
    }

    fn is_empty_value(&self) -> bool {
        self.as_os_str().is_empty()
    }
}

impl CborEncode for [u8] {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.bytes(self)
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl CborEncode for Vec<u8> {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.bytes(self)
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<const N: usize> CborEncode for [u8; N] {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.bytes(self)
    }

    fn is_empty_value(&self) -> bool {
        N == 0
    }
}

impl<T: CborEncode + CborArrayElem> CborEncode for [T] {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.seq(self)
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: CborEncode + CborArrayElem> CborEncode for Vec<T> {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.seq(self)
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: CborEncode + CborArrayElem, const N: usize> CborEncode for [T; N] {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.seq(self)
    }

    fn is_empty_value(&self) -> bool {
        N == 0
    }
}

impl<T: CborEncode> CborEncode for VecDeque<T> {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.seq(self)
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: CborEncode> CborEncode for BTreeSet<T> {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.seq(self)
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K: CborEncode, V: CborEncode, S: BuildHasher> CborEncode for HashMap<K, V, S> {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.map_entries(self)
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K: CborEncode, V: CborEncode> CborEncode for BTreeMap<K, V> {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        enc.map_entries(self)
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: CborEncode> CborEncode for Option<T> {
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        match self {
            Some(v) => v.encode(enc),
            None => enc.null(),
        }
    }

    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

macro_rules! impl_deref {
    ($($ptr:ty),*) => {$(
        impl<T: CborEncode + ?Sized> CborEncode for $ptr {
            fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
                (**self).encode(enc)
            }

            fn is_empty_value(&self) -> bool {
                (**self).is_empty_value()
            }
        }
    )*};
}

impl_deref!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

impl<T> CborEncode for Cow<'_, T>
where
    T: CborEncode + ToOwned + ?Sized,
{
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
        (**self).encode(enc)
    }

    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

macro_rules! impl_tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: CborEncode),+> CborEncode for ($($name,)+) {
            fn encode(&self, enc: &mut Encoder<'_>) -> Result<(), CborError> {
                enc.seq(&[$(&self.$idx as &dyn CborEncode),+])
            }
        }

        impl<$($name: CborEncode),+> CborArrayElem for ($($name,)+) {}
    };
}

impl_tuple!(A.0);
impl_tuple!(A.0, B.1);
impl_tuple!(A.0, B.1, C.2);
impl_tuple!(A.0, B.1, C.2, D.3);

macro_rules! impl_unsupported {
    ($($ty:ty => [$($gen:ident),*]),* $(,)?) => {$(
        impl<$($gen),*> CborEncode for $ty {
            fn encode(&self, _enc: &mut Encoder<'_>) -> Result<(), CborError> {
                Err(CborError::unsupported_type(core::any::type_name::<Self>()))
            }
        }
    )*};
}

impl_unsupported!(
    Sender<T> => [T],
    SyncSender<T> => [T],
    Receiver<T> => [T],
    fn() -> R => [R],
    fn(A) -> R => [A, R],
    fn(A, B) -> R => [A, B, R],
);

macro_rules! impl_array_elem {
    ($($t:ty),*) => {$(impl CborArrayElem for $t {})*};
}

impl_array_elem!(
    (),
    bool,
    i8,
    i16,
    i32,
    i64,
    isize,
    i128,
    u16,
    u32,
    u64,
    usize,
    u128,
    f32,
    f64,
    char,
    str,
    String,
    OsStr,
    OsString,
    Path,
    PathBuf,
    [u8]
);

impl CborArrayElem for Vec<u8> {}
impl<const N: usize> CborArrayElem for [u8; N] {}
impl<T: CborArrayElem> CborArrayElem for [T] {}
impl<T: CborArrayElem> CborArrayElem for Vec<T> {}
impl<T: CborArrayElem, const N: usize> CborArrayElem for [T; N] {}
impl<T> CborArrayElem for VecDeque<T> {}
impl<T> CborArrayElem for BTreeSet<T> {}
impl<K, V, S> CborArrayElem for HashMap<K, V, S> {}
impl<K, V> CborArrayElem for BTreeMap<K, V> {}
// Only a bare `u8` is a byte; anything wrapping one is an array element.
impl<T> CborArrayElem for Option<T> {}
impl<T: ?Sized> CborArrayElem for &T {}
impl<T: ?Sized> CborArrayElem for &mut T {}
impl<T: ?Sized> CborArrayElem for Box<T> {}
impl<T: ?Sized> CborArrayElem for Rc<T> {}
impl<T: ?Sized> CborArrayElem for Arc<T> {}
impl<T: ToOwned + ?Sized> CborArrayElem for Cow<'_, T> {}
