use std::borrow::Cow;
use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error returned by [`MarshalCbor`](crate::MarshalCbor) hooks.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A stable, string-free identifier for the reason an encode call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The value has a shape the encoder has no rule for.
    UnsupportedType,
    /// The value has a supported type but an unencodable value (NaN, out-of-range integer).
    UnsupportedValue,
    /// Text is not well-formed UTF-8.
    InvalidText,
    /// A value's own `MarshalCbor` hook failed.
    Marshaler,
    /// The encoded bytes are not exactly one complete data item.
    Malformed,
}

/// An encoding failure.
///
/// Every encode call either returns complete canonical bytes or exactly one of these.
#[derive(Debug, Error)]
pub enum CborError {
    /// The dispatcher encountered a shape it has no rule for (channel, function, ...).
    #[error("cbor: unsupported type: {type_name}")]
    UnsupportedType {
        /// Name of the offending type.
        type_name: Cow<'static, str>,
    },

    /// A value of a supported type that is nonetheless illegal to encode.
    #[error("cbor: unsupported value: {value}")]
    UnsupportedValue {
        /// Display form of the rejected value.
        value: String,
    },

    /// Text that is not well-formed UTF-8.
    #[error("cbor: string is not valid UTF-8: {text}")]
    InvalidText {
        /// The offending text, with invalid sequences replaced by U+FFFD.
        text: String,
    },

    /// A `MarshalCbor` hook returned an error.
    #[error("cbor: marshal_cbor hook failed for type {type_name}: {source}")]
    Marshaler {
        /// Type whose hook failed.
        type_name: &'static str,
        /// The hook's error.
        #[source]
        source: BoxError,
    },

    /// Bytes offered as canonical output are not exactly one complete data item.
    #[error("cbor: output is not a single complete item at offset {offset}: {reason}")]
    Malformed {
        /// Byte offset where the problem was found.
        offset: usize,
        /// What was wrong.
        reason: &'static str,
    },
}

impl CborError {
    /// Construct an [`CborError::UnsupportedType`] error.
    #[must_use]
    pub fn unsupported_type(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
        }
    }

    /// Construct an [`CborError::UnsupportedValue`] error.
    #[must_use]
    pub fn unsupported_value(value: impl ToString) -> Self {
        Self::UnsupportedValue {
            value: value.to_string(),
        }
    }

    /// Construct an [`CborError::InvalidText`] error from the offending bytes.
    #[must_use]
    pub fn invalid_text(bytes: &[u8]) -> Self {
        Self::InvalidText {
            text: String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// Construct a [`CborError::Malformed`] error.
    #[must_use]
    pub const fn malformed(offset: usize, reason: &'static str) -> Self {
        Self::Malformed { offset, reason }
    }

    /// Return the stable error code.
    #[inline]
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedType { .. } => ErrorCode::UnsupportedType,
            Self::UnsupportedValue { .. } => ErrorCode::UnsupportedValue,
            Self::InvalidText { .. } => ErrorCode::InvalidText,
            Self::Marshaler { .. } => ErrorCode::Marshaler,
            Self::Malformed { .. } => ErrorCode::Malformed,
        }
    }
}
