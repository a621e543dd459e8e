//! Constant-value annotations
//!
//! A literal expression in IEC 61131-3 does not have a single data type
//! until semantic analysis resolves one: `1 AND 0` may be a BOOL, a BYTE,
//! a WORD or an LWORD, and `1 + 2` may be signed or unsigned. The folding
//! pass therefore stores up to four candidate constant values per AST node,
//! one per representation, each tracked independently so that an overflow
//! in one representation does not discard the others.

use serde::{Deserialize, Serialize};

/// One candidate constant value of type `T`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Slot<T> {
    /// Never assigned for this representation.
    #[default]
    Undefined,
    /// Evaluation succeeded; the value is exact for this representation.
    Defined(T),
    /// Evaluation was attempted but the result does not fit `T`.
    /// For `f64` this includes NaN and both infinities.
    Overflow,
}

impl<T: Copy> Slot<T> {
    pub fn is_defined(&self) -> bool {
        matches!(self, Slot::Defined(_))
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self, Slot::Overflow)
    }

    /// The value, when the slot is defined.
    pub fn value(&self) -> Option<T> {
        match self {
            Slot::Defined(v) => Some(*v),
            _ => None,
        }
    }
}

impl Slot<u64> {
    pub fn is_zero(&self) -> bool {
        matches!(self, Slot::Defined(0))
    }
}

impl Slot<i64> {
    pub fn is_zero(&self) -> bool {
        matches!(self, Slot::Defined(0))
    }
}

impl Slot<f64> {
    /// True for both positive and negative zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Slot::Defined(v) if *v == 0.0)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Undefined => write!(f, "undefined"),
            Slot::Defined(v) => write!(f, "{v}"),
            Slot::Overflow => write!(f, "overflow"),
        }
    }
}

/// The candidate-value quadruple attached to every AST node.
///
/// All four slots default to undefined; the folding pass fills in whichever
/// representations apply. Downstream passes read the slot matching the
/// resolved data type and must not read a value out of an overflowed slot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConstValues {
    pub as_bool: Slot<bool>,
    pub as_int: Slot<i64>,
    pub as_uint: Slot<u64>,
    pub as_real: Slot<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_undefined() {
        let cv = ConstValues::default();
        assert_eq!(cv.as_bool, Slot::Undefined);
        assert_eq!(cv.as_int, Slot::Undefined);
        assert_eq!(cv.as_uint, Slot::Undefined);
        assert_eq!(cv.as_real, Slot::Undefined);
    }

    #[test]
    fn test_is_defined() {
        assert!(Slot::Defined(5i64).is_defined());
        assert!(!Slot::<i64>::Undefined.is_defined());
        assert!(!Slot::<i64>::Overflow.is_defined());
    }

    #[test]
    fn test_is_overflow() {
        assert!(Slot::<u64>::Overflow.is_overflow());
        assert!(!Slot::Defined(0u64).is_overflow());
    }

    #[test]
    fn test_value() {
        assert_eq!(Slot::Defined(42u64).value(), Some(42));
        assert_eq!(Slot::<u64>::Undefined.value(), None);
        assert_eq!(Slot::<u64>::Overflow.value(), None);
    }

    #[test]
    fn test_is_zero_int() {
        assert!(Slot::Defined(0i64).is_zero());
        assert!(!Slot::Defined(1i64).is_zero());
        assert!(!Slot::<i64>::Undefined.is_zero());
        assert!(!Slot::<i64>::Overflow.is_zero());
    }

    #[test]
    fn test_is_zero_real_includes_negative_zero() {
        assert!(Slot::Defined(0.0f64).is_zero());
        assert!(Slot::Defined(-0.0f64).is_zero());
        assert!(!Slot::Defined(0.5f64).is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Slot::<i64>::Undefined), "undefined");
        assert_eq!(format!("{}", Slot::<i64>::Overflow), "overflow");
        assert_eq!(format!("{}", Slot::Defined(-3i64)), "-3");
    }
}
