//! Extended Euclidean algorithm over the 512-bit integer domain

use super::element::FieldElement;
use crate::bigint::BigValue;
use crate::error::Result;

/// gcd(a, b) with Bezout coefficients: a*x + b*y = gcd
///
/// The remainders are exact integers; the coefficients can go negative, so
/// they are carried as field elements and the identity holds modulo p.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bezout {
    pub gcd: BigValue,
    pub x: FieldElement,
    pub y: FieldElement,
}

/// Iterative extended Euclid carrying (old_r, r), (old_s, s), (old_t, t)
///
/// Each round divides the previous two remainders and applies the same
/// quotient to all three pairs. Stops when the running remainder hits zero.
pub fn extended_euclidean(a: &BigValue, b: &BigValue) -> Result<Bezout> {
    let (mut old_r, mut r) = (*a, *b);
    let (mut old_s, mut s) = (FieldElement::one(), FieldElement::zero());
    let (mut old_t, mut t) = (FieldElement::zero(), FieldElement::one());

    while !r.is_zero() {
        let (quotient, remainder) = old_r.div_rem(&r)?;
        let q = FieldElement::new(quotient);

        old_r = r;
        r = remainder;

        let next_s = old_s - q * s;
        old_s = s;
        s = next_s;

        let next_t = old_t - q * t;
        old_t = t;
        t = next_t;
    }

    Ok(Bezout {
        gcd: old_r,
        x: old_s,
        y: old_t,
    })
}
