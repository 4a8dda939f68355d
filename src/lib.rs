//! # detcbor
//!
//! Deterministic canonical CBOR encoding for arbitrary Rust values.
//!
//! ## Design principles
//!
//! - **Equal values produce equal bytes.**
//!   Output never depends on memory addresses, hash-map iteration order, or anything else that can
//!   vary between runs, so encodings can be hashed, compared, and signed.
//! - **One writer for every header.**
//!   Every integer and every length prefix goes through [`Encoder::write_item`], which always
//!   picks the shortest field that holds the value.
//! - **All or nothing.**
//!   An encode call returns either the complete encoding or an error; partial output is never
//!   observable.
//!
//! ## Canonical form
//!
//! - Integers and lengths use the minimal header: immediate below 24, then 1, 2, 4, or 8 bytes.
//! - Negative integers are written as major type 1 with magnitude `-1 - n`.
//! - Floats are written as single precision (`0xfa`) whenever that is exact, double precision
//!   (`0xfb`) otherwise. Both zeros encode as `fa00000000`. NaN is rejected.
//! - Map entries are sorted by the bytes of their encoded keys (see [`KeyOrder`]); record fields
//!   are sorted the same way by default (see [`RecordKeyOrder`]).
//! - Only definite-length items are produced. No tags are produced.
//!
//! ## Records
//!
//! `#[derive(CborEncode)]` on a struct with named fields encodes it as a map keyed by field name.
//! Only `pub` fields are encoded. Field attributes adjust the key:
//!
//! ```ignore
//! #[derive(CborEncode)]
//! pub struct Event {
//!     #[cbor(rename = "ts")]
//!     pub timestamp: u64,
//!     #[cbor(omit_empty)]
//!     pub tags: Vec<String>,
//!     #[cbor(skip)]
//!     pub scratch: u32,
//! }
//! ```
//!
//! Field descriptors are computed once per type and memoized in a [`FieldCache`].
//!
//! ## Feature flags
//!
//! - `sha2` *(default)*: enables [`CanonicalCbor::sha256`].
//! - `serde`: enables `to_vec` and `to_value` for any `serde::Serialize` value.
//! - `simdutf8`: enables SIMD-accelerated UTF-8 validation where supported.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod cache;
mod canonical;
mod codec;
mod encode;
mod error;
mod extension;
mod float;
mod options;
mod order;
pub mod profile;
mod record;
#[cfg(feature = "serde")]
mod serde_impl;
mod value;
mod wire;

pub use crate::cache::FieldCache;
pub use crate::canonical::CanonicalCbor;
pub use crate::codec::{
    encode_to_canonical, encode_to_vec, CborArrayElem, CborEncode, FieldsRef,
};
pub use crate::encode::Encoder;
pub use crate::error::{BoxError, CborError, ErrorCode};
pub use crate::extension::MarshalCbor;
pub use crate::options::{EncodeOptions, RecordKeyOrder, DEFAULT_INITIAL_CAPACITY};
pub use crate::order::KeyOrder;
pub use crate::profile::{encoded_header_len, Major};
pub use crate::record::{
    fields_for, parse_tag, CborRecord, DeclaredField, Directive, FieldDescriptor,
};
pub use crate::value::Value;

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub use crate::serde_impl::{to_value, to_vec};

pub use detcbor_derive::CborEncode;

/// Encode a value into canonical CBOR.
///
/// Uses the process-wide [`FieldCache`] and [`EncodeOptions::default`].
///
/// # Errors
///
/// Returns the first error met while walking the value. No bytes are returned on error.
pub fn marshal<T: CborEncode + ?Sized>(value: &T) -> Result<Vec<u8>, CborError> {
    encode_to_vec(value)
}

/// Encode a value into canonical CBOR with an explicit cache and options.
///
/// # Errors
///
/// Returns the first error met while walking the value. No bytes are returned on error.
pub fn marshal_with<T: CborEncode + ?Sized>(
    value: &T,
    cache: &FieldCache,
    options: EncodeOptions,
) -> Result<Vec<u8>, CborError> {
    let mut enc = Encoder::with_options(cache, options);
    value.encode(&mut enc)?;
    Ok(enc.into_vec())
}
