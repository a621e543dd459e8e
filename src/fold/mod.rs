//! Constant folding
//!
//! Determines the value of every subexpression built only from literals and
//! constant operators, and stores the result in the expression node itself
//! (`2 + 3` gets the constant 5 attached to the add node).
//!
//! Because a literal expression can still denote several data types (`1
//! AND 0` may be a BOOL or any bit string, `1 + 2` signed or unsigned), the
//! pass computes up to four results per node, one per candidate
//! representation (bool / i64 / u64 / f64), each with its own
//! defined/overflow state. See [`crate::ast::ConstValues`].
//!
//! This pass prints no overflow errors. Some of a node's four results may
//! overflow while others do not, and only data-type checking knows which
//! representation the expression actually has, so error reporting is
//! deferred to that pass; here the overflow state is merely recorded. The
//! single diagnostic this pass can emit is a startup warning when the host
//! floating-point implementation is not IEC 60559.

pub mod extract;
pub mod overflow;

use crate::ast::{BinOp, ConstValues, Expr, ExprKind, IntBase, Slot, UnOp};
use crate::error::Result;
use extract::{extract_f64, extract_i64, extract_u64};
use overflow::{
    add_overflows_i64, add_overflows_u64, div_overflows_i64, div_overflows_u64,
    mul_overflows_i64, mul_overflows_u64, neg_overflows_i64, real_overflows, rem_overflows_i64,
    sub_overflows_i64, sub_overflows_u64,
};

/// The constant-folding pass.
///
/// Owns the two pass-wide counters: `error_count` (kept for parity with the
/// other analysis passes; this pass never raises an error by design) and
/// `warning_found` (set by the IEC 60559 startup check).
pub struct ConstantFolder {
    error_count: usize,
    warning_found: bool,
}

impl ConstantFolder {
    pub fn new() -> Self {
        let mut folder = Self {
            error_count: 0,
            warning_found: false,
        };
        if !real64_is_iec559() {
            eprintln!(
                "warning: the platform running the compiler does not implement IEC 60559 \
                 floating point numbers; overflow detection on REAL/LREAL literals may be \
                 imprecise"
            );
            folder.warning_found = true;
        }
        folder
    }

    /// Run the pass over `expr`, annotating every node in place. Returns the
    /// number of errors accumulated, which is always zero: overflow is
    /// recorded in the annotations, never reported from here.
    pub fn fold(&mut self, expr: &mut Expr) -> Result<usize> {
        self.fold_expr(expr)?;
        Ok(self.error_count)
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_found(&self) -> bool {
        self.warning_found
    }

    /// Strict post-order: children first, then this node's annotation is
    /// computed from theirs. Non-literal leaves stay unannotated, which
    /// makes every expression over them stay unannotated too.
    fn fold_expr(&mut self, expr: &mut Expr) -> Result<()> {
        let cvalues = match &mut expr.kind {
            ExprKind::Int { text, base } => seed_integer(text, *base)?,
            ExprKind::Real { text } => seed_real(text)?,
            ExprKind::Bool(value) => ConstValues {
                as_bool: Slot::Defined(*value),
                ..ConstValues::default()
            },

            ExprKind::TypedInt { value, .. } => {
                self.fold_expr(value)?;
                // Propagation only; the type name is the type checker's input
                ConstValues {
                    as_int: copy_defined(value.cvalues.as_int),
                    as_uint: copy_defined(value.cvalues.as_uint),
                    ..ConstValues::default()
                }
            }
            ExprKind::TypedReal { value, .. } => {
                self.fold_expr(value)?;
                ConstValues {
                    as_real: copy_defined(value.cvalues.as_real),
                    ..ConstValues::default()
                }
            }
            ExprKind::TypedBool { value, .. } => {
                self.fold_expr(value)?;
                ConstValues {
                    as_bool: copy_defined(value.cvalues.as_bool),
                    ..ConstValues::default()
                }
            }
            // Accepted but deliberately left unannotated
            ExprKind::BitString { value, .. } => {
                self.fold_expr(value)?;
                ConstValues::default()
            }

            ExprKind::Var(_) => ConstValues::default(),
            ExprKind::Call { args, .. } => {
                for arg in args {
                    self.fold_expr(arg)?;
                }
                ConstValues::default()
            }
            ExprKind::Index { base, index } => {
                self.fold_expr(base)?;
                self.fold_expr(index)?;
                ConstValues::default()
            }

            ExprKind::Binary { op, lhs, rhs } => {
                self.fold_expr(lhs)?;
                self.fold_expr(rhs)?;
                fold_binary(*op, &lhs.cvalues, &rhs.cvalues)
            }
            ExprKind::Unary { op, expr: operand } => {
                self.fold_expr(operand)?;
                fold_unary(*op, &operand.cvalues)
            }
        };
        expr.cvalues = cvalues;
        Ok(())
    }
}

impl Default for ConstantFolder {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the host f64 behaves as an IEC 60559 (IEEE 754) binary64. Rust
/// guarantees this, so the probe is expected to always pass; it exists
/// because the pass's contract names the check, and `warning_found` makes
/// the outcome observable.
fn real64_is_iec559() -> bool {
    let zero = 0.0f64;
    f64::RADIX == 2
        && f64::MANTISSA_DIGITS == 53
        && f64::MAX_EXP == 1024
        && (1.0 / zero).is_infinite()
        && (zero / zero).is_nan()
}

/// An integer literal seeds both integer slots; whichever cannot represent
/// the textual value is marked overflow, independently. Values 0 and 1
/// additionally seed the bool slot, since the standard admits them as
/// boolean literals.
fn seed_integer(text: &str, base: IntBase) -> Result<ConstValues> {
    let as_int = extract_i64(text, base)?;
    let as_uint = extract_u64(text, base)?;
    let as_bool = match as_uint {
        Slot::Defined(0) => Slot::Defined(false),
        Slot::Defined(1) => Slot::Defined(true),
        _ => Slot::Undefined,
    };
    Ok(ConstValues {
        as_bool,
        as_int,
        as_uint,
        as_real: Slot::Undefined,
    })
}

/// A real literal seeds only the f64 slot.
fn seed_real(text: &str) -> Result<ConstValues> {
    Ok(ConstValues {
        as_real: extract_f64(text)?,
        ..ConstValues::default()
    })
}

/// Copy a slot across a propagation-only node: defined values carry over,
/// anything else leaves the target undefined.
fn copy_defined<T: Copy>(slot: Slot<T>) -> Slot<T> {
    match slot {
        Slot::Defined(v) => Slot::Defined(v),
        _ => Slot::Undefined,
    }
}

/// Combine two same-typed operand slots. The transfer runs only when both
/// are defined; an absent or overflowed operand slot leaves the result slot
/// undefined rather than tainting it, because the other representations of
/// the same node are still independently usable.
fn transfer<T: Copy, U>(l: Slot<T>, r: Slot<T>, f: impl FnOnce(T, T) -> Slot<U>) -> Slot<U> {
    match (l, r) {
        (Slot::Defined(a), Slot::Defined(b)) => f(a, b),
        _ => Slot::Undefined,
    }
}

/// Unary counterpart of [`transfer`].
fn transfer1<T: Copy, U>(v: Slot<T>, f: impl FnOnce(T) -> Slot<U>) -> Slot<U> {
    match v {
        Slot::Defined(a) => f(a),
        _ => Slot::Undefined,
    }
}

fn uint_arith(
    l: &ConstValues,
    r: &ConstValues,
    overflows: impl FnOnce(u64, u64) -> bool,
    apply: impl FnOnce(u64, u64) -> u64,
) -> Slot<u64> {
    transfer(l.as_uint, r.as_uint, |a, b| {
        if overflows(a, b) {
            Slot::Overflow
        } else {
            Slot::Defined(apply(a, b))
        }
    })
}

fn int_arith(
    l: &ConstValues,
    r: &ConstValues,
    overflows: impl FnOnce(i64, i64) -> bool,
    apply: impl FnOnce(i64, i64) -> i64,
) -> Slot<i64> {
    transfer(l.as_int, r.as_int, |a, b| {
        if overflows(a, b) {
            Slot::Overflow
        } else {
            Slot::Defined(apply(a, b))
        }
    })
}

/// f64 transfers operate first and inspect the result.
fn real_arith(l: &ConstValues, r: &ConstValues, apply: impl FnOnce(f64, f64) -> f64) -> Slot<f64> {
    transfer(l.as_real, r.as_real, |a, b| real_slot(apply(a, b)))
}

fn real_slot(v: f64) -> Slot<f64> {
    if real_overflows(v) {
        Slot::Overflow
    } else {
        Slot::Defined(v)
    }
}

fn fold_binary(op: BinOp, l: &ConstValues, r: &ConstValues) -> ConstValues {
    let mut cv = ConstValues::default();
    match op {
        // Logical on BOOL, bitwise on the unsigned representation
        BinOp::Or => {
            cv.as_bool = transfer(l.as_bool, r.as_bool, |a, b| Slot::Defined(a || b));
            cv.as_uint = transfer(l.as_uint, r.as_uint, |a, b| Slot::Defined(a | b));
        }
        BinOp::Xor => {
            cv.as_bool = transfer(l.as_bool, r.as_bool, |a, b| Slot::Defined(a ^ b));
            cv.as_uint = transfer(l.as_uint, r.as_uint, |a, b| Slot::Defined(a ^ b));
        }
        BinOp::And => {
            cv.as_bool = transfer(l.as_bool, r.as_bool, |a, b| Slot::Defined(a && b));
            cv.as_uint = transfer(l.as_uint, r.as_uint, |a, b| Slot::Defined(a & b));
        }

        BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge => {
            cv.as_bool = fold_compare(op, l, r);
        }

        BinOp::Add => {
            cv.as_uint = uint_arith(l, r, add_overflows_u64, u64::wrapping_add);
            cv.as_int = int_arith(l, r, add_overflows_i64, i64::wrapping_add);
            cv.as_real = real_arith(l, r, |a, b| a + b);
        }
        BinOp::Sub => {
            cv.as_uint = uint_arith(l, r, sub_overflows_u64, u64::wrapping_sub);
            cv.as_int = int_arith(l, r, sub_overflows_i64, i64::wrapping_sub);
            cv.as_real = real_arith(l, r, |a, b| a - b);
        }
        BinOp::Mul => {
            cv.as_uint = uint_arith(l, r, mul_overflows_u64, u64::wrapping_mul);
            cv.as_int = int_arith(l, r, mul_overflows_i64, i64::wrapping_mul);
            cv.as_real = real_arith(l, r, |a, b| a * b);
        }

        // A divisor slot that is defined zero marks the result slot on its
        // own, whether or not the dividend folded.
        BinOp::Div => {
            cv.as_uint = if r.as_uint.is_zero() {
                Slot::Overflow
            } else {
                uint_arith(l, r, div_overflows_u64, u64::wrapping_div)
            };
            cv.as_int = if r.as_int.is_zero() {
                Slot::Overflow
            } else {
                int_arith(l, r, div_overflows_i64, i64::wrapping_div)
            };
            cv.as_real = if r.as_real.is_zero() {
                Slot::Overflow
            } else {
                real_arith(l, r, |a, b| a / b)
            };
        }

        // IN1 MOD IN2 = IF IN2 = 0 THEN 0 ELSE IN1 - (IN1/IN2)*IN2, so a
        // zero divisor produces a defined zero. Only the integer
        // representations participate; MOD is defined on ANY_INT.
        BinOp::Mod => {
            cv.as_uint = if r.as_uint.is_zero() {
                Slot::Defined(0)
            } else {
                uint_arith(l, r, |_, _| false, u64::wrapping_rem)
            };
            cv.as_int = if r.as_int.is_zero() {
                Slot::Defined(0)
            } else {
                int_arith(l, r, rem_overflows_i64, i64::wrapping_rem)
            };
        }

        // REAL base with an integer exponent. When the exponent fits both
        // integer representations, both dispatches run; the results agree.
        // A non-integer exponent leaves the node unfolded.
        BinOp::Power => {
            if let Slot::Defined(base) = l.as_real {
                if let Slot::Defined(exp) = r.as_int {
                    cv.as_real = real_slot(base.powf(exp as f64));
                }
                if let Slot::Defined(exp) = r.as_uint {
                    cv.as_real = real_slot(base.powf(exp as f64));
                }
            }
        }
    }
    cv
}

/// Relational operators dispatch over all four representations and always
/// produce a BOOL. The representations a node can carry never disagree on
/// an ordering (both integer slots defined means both operands are
/// non-negative), so the first defined pair decides.
fn fold_compare(op: BinOp, l: &ConstValues, r: &ConstValues) -> Slot<bool> {
    if let (Slot::Defined(a), Slot::Defined(b)) = (l.as_bool, r.as_bool) {
        return Slot::Defined(compare(op, &a, &b));
    }
    if let (Slot::Defined(a), Slot::Defined(b)) = (l.as_uint, r.as_uint) {
        return Slot::Defined(compare(op, &a, &b));
    }
    if let (Slot::Defined(a), Slot::Defined(b)) = (l.as_int, r.as_int) {
        return Slot::Defined(compare(op, &a, &b));
    }
    if let (Slot::Defined(a), Slot::Defined(b)) = (l.as_real, r.as_real) {
        return Slot::Defined(compare(op, &a, &b));
    }
    Slot::Undefined
}

fn compare<T: PartialOrd>(op: BinOp, a: &T, b: &T) -> bool {
    match op {
        BinOp::Eq => a == b,
        BinOp::Ne => a != b,
        BinOp::Lt => a < b,
        BinOp::Gt => a > b,
        BinOp::Le => a <= b,
        BinOp::Ge => a >= b,
        _ => unreachable!("not a relational operator: {op}"),
    }
}

fn fold_unary(op: UnOp, v: &ConstValues) -> ConstValues {
    let mut cv = ConstValues::default();
    match op {
        UnOp::Not => {
            cv.as_bool = transfer1(v.as_bool, |a| Slot::Defined(!a));
            cv.as_uint = transfer1(v.as_uint, |a| Slot::Defined(!a));
        }
        UnOp::Neg => {
            cv.as_int = transfer1(v.as_int, |a| {
                if neg_overflows_i64(a) {
                    Slot::Overflow
                } else {
                    Slot::Defined(-a)
                }
            });
            // No negative value is representable unsigned; only -0 folds
            cv.as_uint = transfer1(v.as_uint, |a| {
                if a == 0 {
                    Slot::Defined(0)
                } else {
                    Slot::Overflow
                }
            });
            cv.as_real = transfer1(v.as_real, |a| real_slot(-a));
            // INT64_MIN = -(INT64_MAX + 1): the positive magnitude does not
            // fit the operand's i64 slot, but its u64 slot still identifies
            // it exactly, so the negation is representable after all.
            if v.as_uint == Slot::Defined(i64::MIN.unsigned_abs()) {
                cv.as_int = Slot::Defined(i64::MIN);
            }
        }
    }
    cv
}
