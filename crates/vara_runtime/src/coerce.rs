//! Numeric coercion rules shared by constructors and element accessors.

use crate::core::value::Value;
use crate::errors::messages;
use vara_core::error::ScriptError;

/// Largest element count a view will accept.
pub const MAX_VIEW_LENGTH: i64 = 0x3fff_ffff;

/// Coerce a script value to a number, rejecting everything that is not an
/// int or a float.
pub fn to_number(v: &Value) -> Result<f64, ScriptError> {
    if v.is_int() {
        Ok(v.as_i64() as f64)
    } else if v.is_f64() {
        Ok(v.as_f64())
    } else {
        Err(ScriptError::type_error(format!(
            "Expected number, got {}",
            v.type_name()
        )))
    }
}

/// Coerce a script value to a view length or byte offset.
///
/// Values already in unsigned 32-bit range pass through. Everything else is
/// narrowed through `i32`, so fractions truncate, NaN becomes zero, and
/// out-of-range magnitudes saturate. Negative results and results above
/// [`MAX_VIEW_LENGTH`] are rejected.
pub fn to_length(v: &Value) -> Result<i64, ScriptError> {
    let length = if v.is_int() && (0..=u32::MAX as i64).contains(&v.as_i64()) {
        v.as_i64()
    } else {
        to_number(v)? as i32 as i64
    };
    if length < 0 {
        return Err(ScriptError::range_error(messages::LENGTH_NEGATIVE));
    }
    if length > MAX_VIEW_LENGTH {
        return Err(ScriptError::range_error(messages::LENGTH_TOO_LARGE));
    }
    Ok(length)
}
