//! Overflow pre-condition tests
//!
//! Every integer predicate answers "would `a op b` leave the 64-bit range?"
//! by testing the operands against the type limits, without performing the
//! operation. The pre-condition form works identically on wrapping and
//! trapping targets, which a check-the-result form does not.
//!
//! Floating point is the exception: the operation runs first and the result
//! is inspected. IEC 61131-3 §2.5.1.5.2 makes exceeding the range of the
//! output type an error, so ±∞ counts as overflow, as does NaN.

/// res = a + b
pub fn add_overflows_u64(a: u64, b: u64) -> bool {
    u64::MAX - a < b
}

/// res = a - b
pub fn sub_overflows_u64(a: u64, b: u64) -> bool {
    b > a
}

/// res = a * b
pub fn mul_overflows_u64(a: u64, b: u64) -> bool {
    a != 0 && u64::MAX / a < b
}

/// res = a / b
pub fn div_overflows_u64(_a: u64, b: u64) -> bool {
    b == 0
}

/// res = a + b
pub fn add_overflows_i64(a: i64, b: i64) -> bool {
    (b > 0 && a > i64::MAX - b) || (b < 0 && a < i64::MIN - b)
}

/// res = a - b
pub fn sub_overflows_i64(a: i64, b: i64) -> bool {
    (b > 0 && a < i64::MIN + b) || (b < 0 && a > i64::MAX + b)
}

/// res = a * b, tested one sign quadrant at a time against the limit
/// divided by the other operand
pub fn mul_overflows_i64(a: i64, b: i64) -> bool {
    (a > 0 && b > 0 && a > i64::MAX / b)
        || (a > 0 && b <= 0 && b < i64::MIN / a)
        || (a <= 0 && b > 0 && a < i64::MIN / b)
        || (a <= 0 && b <= 0 && a != 0 && b < i64::MAX / a)
}

/// res = a / b
pub fn div_overflows_i64(a: i64, b: i64) -> bool {
    b == 0 || (a == i64::MIN && b == -1)
}

/// res = a MOD b. Division by zero is not listed here: the standard defines
/// `IN1 MOD IN2` as `IF IN2 = 0 THEN 0 ELSE IN1 - (IN1/IN2)*IN2`, so a zero
/// divisor yields zero rather than overflow. The one remaining corner is
/// INT64_MIN MOD -1, where the embedded division overflows.
pub fn rem_overflows_i64(a: i64, b: i64) -> bool {
    a == i64::MIN && b == -1
}

/// res = -a
pub fn neg_overflows_i64(a: i64) -> bool {
    a == i64::MIN
}

/// Post-condition test for f64 results: NaN and ±∞ are overflow.
pub fn real_overflows(v: f64) -> bool {
    v.is_nan() || v.is_infinite()
}
