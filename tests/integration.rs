//! Integration tests for the STC front-end
//!
//! Drives the full pipeline (tokenize, parse, constant-fold) over source
//! fragments and checks the annotations the folding pass leaves behind:
//! - the candidate-value quadruple at the root of each expression
//! - per-representation overflow independence
//! - the IEC 61131-3 corner cases (MOD by zero, INT64_MIN negation)
//! - idempotence of the pass

use stc::ast::{ConstValues, Expr, Slot};
use stc::fold::ConstantFolder;
use stc::lexer::tokenize;
use stc::parser::parse;

/// Tokenize, parse, and fold a source fragment.
fn fold_expr(source: &str) -> Expr {
    let tokens = tokenize(source).expect("tokenize");
    let mut expr = parse(tokens).expect("parse");
    let errors = ConstantFolder::new().fold(&mut expr).expect("fold");
    assert_eq!(errors, 0, "the folding pass never raises errors");
    expr
}

/// Root annotation of a folded source fragment.
fn root(source: &str) -> ConstValues {
    fold_expr(source).cvalues
}

// ============================================
// Root annotations, slot by slot
// ============================================

#[test]
fn test_integer_addition() {
    let cv = root("2 + 3");
    assert_eq!(cv.as_bool, Slot::Undefined);
    assert_eq!(cv.as_uint, Slot::Defined(5));
    assert_eq!(cv.as_int, Slot::Defined(5));
    assert_eq!(cv.as_real, Slot::Undefined);
}

#[test]
fn test_real_subtraction() {
    let cv = root("22.2 - 5.0");
    assert_eq!(cv.as_bool, Slot::Undefined);
    assert_eq!(cv.as_uint, Slot::Undefined);
    assert_eq!(cv.as_int, Slot::Undefined);
    assert_eq!(cv.as_real, Slot::Defined(17.2));
}

#[test]
fn test_signed_overflow_keeps_unsigned_result() {
    let cv = root("9223372036854775807 + 1");
    assert_eq!(cv.as_bool, Slot::Undefined);
    assert_eq!(cv.as_uint, Slot::Defined(9223372036854775808));
    assert_eq!(cv.as_int, Slot::Overflow);
    assert_eq!(cv.as_real, Slot::Undefined);
}

#[test]
fn test_one_and_zero_is_bool_and_bitstring() {
    let cv = root("1 AND 0");
    assert_eq!(cv.as_bool, Slot::Defined(false));
    assert_eq!(cv.as_uint, Slot::Defined(0));
    assert_eq!(cv.as_int, Slot::Undefined);
    assert_eq!(cv.as_real, Slot::Undefined);
}

#[test]
fn test_division_by_zero() {
    let cv = root("5 / 0");
    assert_eq!(cv.as_bool, Slot::Undefined);
    assert_eq!(cv.as_uint, Slot::Overflow);
    assert_eq!(cv.as_int, Slot::Overflow);
    assert_eq!(cv.as_real, Slot::Undefined);
}

#[test]
fn test_mod_by_zero_absorbs_to_zero() {
    let cv = root("5 MOD 0");
    assert_eq!(cv.as_bool, Slot::Undefined);
    assert_eq!(cv.as_uint, Slot::Defined(0));
    assert_eq!(cv.as_int, Slot::Defined(0));
    assert_eq!(cv.as_real, Slot::Undefined);
}

#[test]
fn test_negated_int64_min() {
    let cv = root("-9223372036854775808");
    assert_eq!(cv.as_bool, Slot::Undefined);
    assert_eq!(cv.as_uint, Slot::Overflow);
    assert_eq!(cv.as_int, Slot::Defined(i64::MIN));
    assert_eq!(cv.as_real, Slot::Undefined);
}

#[test]
fn test_power_with_integer_exponent() {
    let cv = root("2.0 ** 10");
    assert_eq!(cv.as_bool, Slot::Undefined);
    assert_eq!(cv.as_uint, Slot::Undefined);
    assert_eq!(cv.as_int, Slot::Undefined);
    assert_eq!(cv.as_real, Slot::Defined(1024.0));
}

#[test]
fn test_real_division_by_zero() {
    let cv = root("1.0 / 0.0");
    assert_eq!(cv.as_bool, Slot::Undefined);
    assert_eq!(cv.as_uint, Slot::Undefined);
    assert_eq!(cv.as_int, Slot::Undefined);
    assert_eq!(cv.as_real, Slot::Overflow);
}

// ============================================
// Universal invariants
// ============================================

#[test]
fn test_idempotence() {
    let sources = [
        "2 + 3",
        "22.2 - 5.0",
        "9223372036854775807 + 1",
        "1 AND 0",
        "5 / 0",
        "5 MOD 0",
        "-9223372036854775808",
        "2.0 ** 10",
        "x + f(1) * a[2]",
        "INT#-5 < 3",
    ];
    for source in sources {
        let mut expr = fold_expr(source);
        let before = serde_json::to_string(&expr).unwrap();
        ConstantFolder::new().fold(&mut expr).unwrap();
        let after = serde_json::to_string(&expr).unwrap();
        assert_eq!(before, after, "second fold changed annotations for {source:?}");
    }
}

#[test]
fn test_literal_seeding_totality() {
    for (text, value) in [
        ("0", 0i64),
        ("1", 1),
        ("42", 42),
        ("9223372036854775807", i64::MAX),
    ] {
        let cv = root(text);
        assert_eq!(cv.as_int, Slot::Defined(value), "i64 seeding of {text}");
        assert_eq!(cv.as_uint, Slot::Defined(value as u64), "u64 seeding of {text}");
    }
    // Representable unsigned but not signed
    let cv = root("18446744073709551615");
    assert_eq!(cv.as_uint, Slot::Defined(u64::MAX));
    assert_eq!(cv.as_int, Slot::Overflow);
    // Representable in neither
    let cv = root("18446744073709551616");
    assert_eq!(cv.as_uint, Slot::Overflow);
    assert_eq!(cv.as_int, Slot::Overflow);
}

#[test]
fn test_defined_results_are_exact() {
    assert_eq!(root("123456789 * 1000").as_int, Slot::Defined(123_456_789_000));
    assert_eq!(root("1000000 - 1").as_uint, Slot::Defined(999_999));
    assert_eq!(root("0.5 + 0.25").as_real, Slot::Defined(0.75));
}

#[test]
fn test_mod_by_zero_for_any_constant_dividend() {
    for source in ["0 MOD 0", "1 MOD 0", "18446744073709551615 MOD 0"] {
        let cv = root(source);
        assert_eq!(cv.as_uint, Slot::Defined(0), "u64 of {source}");
    }
}

#[test]
fn test_div_by_zero_marks_wherever_operand_defined() {
    // Dividend folds only as i64; both integer result slots still mark
    let cv = root("(0 - 1) / 0");
    assert_eq!(cv.as_int, Slot::Overflow);
    assert_eq!(cv.as_uint, Slot::Overflow);
    assert_eq!(cv.as_real, Slot::Undefined);
}

#[test]
fn test_negation_corner_via_subexpression() {
    let cv = root("-(9223372036854775807 + 1)");
    assert_eq!(cv.as_int, Slot::Defined(i64::MIN));
}

// ============================================
// Pipeline behavior
// ============================================

#[test]
fn test_case_insensitive_source() {
    assert_eq!(root("1 and 0").as_bool, Slot::Defined(false));
    assert_eq!(root("true xor false").as_bool, Slot::Defined(true));
    assert_eq!(root("7 Mod 3").as_int, Slot::Defined(1));
}

#[test]
fn test_comments_and_separators() {
    let cv = root("1_000 (* thousand *) + 2_000");
    assert_eq!(cv.as_int, Slot::Defined(3000));
}

#[test]
fn test_no_startup_warning_on_ieee754_host() {
    let folder = ConstantFolder::new();
    assert!(!folder.warning_found());
    assert_eq!(folder.error_count(), 0);
}

#[test]
fn test_deeply_nested_expression() {
    let cv = root("((((1 + 2) * 3) - 4) / 5)");
    assert_eq!(cv.as_int, Slot::Defined(1));
    assert_eq!(cv.as_uint, Slot::Defined(1));
}

#[test]
fn test_mixed_constant_and_variable_subtrees() {
    // The constant subtree folds even though the whole expression cannot
    let expr = fold_expr("limit > 2 * 500");
    assert_eq!(expr.cvalues, ConstValues::default());
    if let stc::ast::ExprKind::Binary { rhs, .. } = &expr.kind {
        assert_eq!(rhs.cvalues.as_int, Slot::Defined(1000));
    } else {
        panic!("expected Binary at root");
    }
}

#[test]
fn test_lexer_error_surfaces() {
    assert!(tokenize("1 ? 2").is_err());
}

#[test]
fn test_parser_error_surfaces() {
    let tokens = tokenize("1 +").unwrap();
    assert!(parse(tokens).is_err());
}
