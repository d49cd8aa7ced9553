use crate::foundation::error::{ClipweaveError, ClipweaveResult};

/// Greatest common divisor of two magnitudes.
pub(crate) fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Reduce `num/den` to lowest terms, keeping the sign on the numerator.
///
/// A zero denominator is left untouched: it marks a variable rate.
pub fn reduce(num: i64, den: i64) -> (i64, i64) {
    if den == 0 {
        return (num, den);
    }
    let g = gcd(num.unsigned_abs().into(), den.unsigned_abs().into());
    if g <= 1 {
        return normalize_sign(num, den);
    }
    // g divides both magnitudes, so the quotients fit back into i64.
    let g = g as i64;
    normalize_sign(num / g, den / g)
}

fn normalize_sign(num: i64, den: i64) -> (i64, i64) {
    if den < 0 {
        match (num.checked_neg(), den.checked_neg()) {
            (Some(n), Some(d)) => (n, d),
            _ => (num, den),
        }
    } else {
        (num, den)
    }
}

/// Multiply the fraction `num/den` by `mul/div` and reduce the result.
///
/// Used both for frame-rate adjustment at construction time and for rescaling the per-frame
/// `_DurationNum`/`_DurationDen` tags at production time. A zero denominator is returned as-is.
pub fn muldiv(num: i64, den: i64, mul: i64, div: i64) -> ClipweaveResult<(i64, i64)> {
    if den == 0 {
        return Ok((num, den));
    }
    if div == 0 {
        return Err(ClipweaveError::conflict(
            "rational rescale divisor must be non-zero",
        ));
    }

    let n = i128::from(num) * i128::from(mul);
    let d = i128::from(den) * i128::from(div);
    let g = gcd(n.unsigned_abs(), d.unsigned_abs()).max(1) as i128;
    let (mut n, mut d) = (n / g, d / g);
    if d < 0 {
        n = -n;
        d = -d;
    }

    match (i64::try_from(n), i64::try_from(d)) {
        (Ok(n), Ok(d)) => Ok((n, d)),
        _ => Err(ClipweaveError::overflow(format!(
            "rational {num}/{den} * {mul}/{div} does not fit in 64 bits"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rational.rs"]
mod tests;
