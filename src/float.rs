use crate::CborError;

/// The canonical wire width chosen for a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatRepr {
    /// Emit as a 4-byte float with these bits.
    Single(u32),
    /// Emit as an 8-byte float with these bits.
    Double(u64),
}

/// Pick the canonical representation of an `f64`.
///
/// A value that survives `f64 -> f32 -> f64` unchanged is emitted as single precision. Both zeros
/// collapse to `+0.0`; NaN is rejected.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
pub fn reduce_f64(value: f64) -> Result<FloatRepr, CborError> {
    if value.is_nan() {
        return Err(CborError::unsupported_value("NaN"));
    }
    if value == 0.0 {
        return Ok(FloatRepr::Single(0));
    }
    let single = value as f32;
    if f64::from(single) == value {
        return Ok(FloatRepr::Single(single.to_bits()));
    }
    Ok(FloatRepr::Double(value.to_bits()))
}

/// Pick the canonical representation of an `f32`; always single precision.
#[allow(clippy::float_cmp)]
pub fn reduce_f32(value: f32) -> Result<FloatRepr, CborError> {
    if value.is_nan() {
        return Err(CborError::unsupported_value("NaN"));
    }
    if value == 0.0 {
        return Ok(FloatRepr::Single(0));
    }
    Ok(FloatRepr::Single(value.to_bits()))
}
