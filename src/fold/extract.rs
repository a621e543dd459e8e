//! Literal extractors
//!
//! Turn the raw source text of a literal into a native 64-bit value plus an
//! in-range verdict, expressed as a [`Slot`]. The scanner has already
//! validated the shape of the text, so anything unparseable here (empty
//! digits, stray characters) is an internal invariant violation rather than
//! a user error, and surfaces as [`CompileError::Internal`].

use std::num::IntErrorKind;

use crate::ast::{IntBase, Slot};
use crate::error::{CompileError, Result};

/// Digits of an integer literal: base prefix skipped, separators stripped.
fn int_digits(text: &str, base: IntBase) -> String {
    text[base.prefix_len()..].replace('_', "")
}

/// Parse an integer literal as i64. `Overflow` when the textual value lies
/// outside `[i64::MIN, i64::MAX]`.
pub fn extract_i64(text: &str, base: IntBase) -> Result<Slot<i64>> {
    match i64::from_str_radix(&int_digits(text, base), base.radix()) {
        Ok(v) => Ok(Slot::Defined(v)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Ok(Slot::Overflow),
            _ => Err(CompileError::internal(format!(
                "malformed integer literal {text:?}"
            ))),
        },
    }
}

/// Parse an integer literal as u64. `Overflow` when the textual value lies
/// outside `[0, u64::MAX]`.
pub fn extract_u64(text: &str, base: IntBase) -> Result<Slot<u64>> {
    match u64::from_str_radix(&int_digits(text, base), base.radix()) {
        Ok(v) => Ok(Slot::Defined(v)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Ok(Slot::Overflow),
            _ => Err(CompileError::internal(format!(
                "malformed integer literal {text:?}"
            ))),
        },
    }
}

/// Parse a real literal as f64. `Overflow` when the magnitude rounds outside
/// the finite range (the conversion saturates to ±∞).
pub fn extract_f64(text: &str) -> Result<Slot<f64>> {
    match text.replace('_', "").parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Slot::Defined(v)),
        Ok(_) => Ok(Slot::Overflow),
        Err(_) => Err(CompileError::internal(format!(
            "malformed real literal {text:?}"
        ))),
    }
}
