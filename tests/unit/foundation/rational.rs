use super::*;

#[test]
fn muldiv_reduces_to_lowest_terms() {
    assert_eq!(muldiv(30000, 1001, 2, 1).unwrap(), (60000, 1001));
    assert_eq!(muldiv(24, 1, 2, 4).unwrap(), (12, 1));
    assert_eq!(muldiv(1, 24, 1, 2).unwrap(), (1, 48));
}

#[test]
fn muldiv_leaves_variable_rate_alone() {
    assert_eq!(muldiv(0, 0, 3, 7).unwrap(), (0, 0));
    assert_eq!(muldiv(5, 0, 3, 7).unwrap(), (5, 0));
}

#[test]
fn muldiv_rejects_zero_divisor() {
    assert!(matches!(
        muldiv(1, 2, 1, 0),
        Err(ClipweaveError::Conflict(_))
    ));
}

#[test]
fn muldiv_reports_overflow_instead_of_wrapping() {
    let err = muldiv(i64::MAX, 1, 3, 1).unwrap_err();
    assert!(matches!(err, ClipweaveError::Overflow(_)));
    // Large operands that cancel are fine.
    assert_eq!(muldiv(i64::MAX, 3, 3, i64::MAX).unwrap(), (1, 1));
}

#[test]
fn reduce_moves_sign_to_numerator() {
    assert_eq!(reduce(4, -8), (-1, 2));
    assert_eq!(reduce(0, 5), (0, 1));
    assert_eq!(reduce(7, 0), (7, 0));
}
