use crate::error::BoxError;

/// A value that produces its own complete CBOR encoding.
///
/// The returned bytes are spliced into the output verbatim: the encoder neither validates nor
/// canonicalizes them. A failing hook surfaces as [`CborError::Marshaler`](crate::CborError::Marshaler)
/// tagged with [`type_name`](MarshalCbor::type_name).
///
/// Types opt in with `#[derive(CborEncode)] #[cbor(marshal)]`, or through
/// [`Value::Marshaler`](crate::Value::Marshaler).
pub trait MarshalCbor {
    /// Return the complete encoded form of `self`.
    ///
    /// # Errors
    ///
    /// Any error is wrapped with the owning type's name and returned to the caller.
    fn marshal_cbor(&self) -> Result<Vec<u8>, BoxError>;

    /// Type name reported when the hook fails.
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
