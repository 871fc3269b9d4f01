//! Elements of F_p, p = 2^255 - 19
//!
//! Every public operation returns a canonical value in [0, p). Raw sums and
//! products are formed in the 512-bit `BigValue` and brought back with
//! `reduce_to_field`.

use super::config::{CONSTANTS, P, REDUCTION_WINDOW};
use super::euclid::extended_euclidean;
use crate::bigint::BigValue;
use crate::error::{Error, InversionFailure, Result};
use crate::scalar::Scalar;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Brings any value below `p * 2^257` into [0, p)
#[inline]
pub fn reduce_to_field(value: &BigValue) -> BigValue {
    value.reduce(&P, REDUCTION_WINDOW)
}

/// Element of F_p
///
/// # Example
/// ```
/// use x25519_ladder::field::FieldElement;
///
/// let a = FieldElement::from_u64(10);
/// let b = FieldElement::from_u64(20);
/// assert_eq!(a * b, FieldElement::from_u64(200));
/// assert_eq!(a * a.inverse().unwrap(), FieldElement::one());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldElement {
    value: BigValue,
}

impl FieldElement {
    /// Creates an element from any 512-bit value, reducing it modulo p
    pub fn new(value: BigValue) -> Self {
        let reduced = if value.compare(&P) == Ordering::Less {
            value
        } else {
            // Full division handles inputs beyond the windowed reduction's range.
            value.div_rem(&P).map(|(_, r)| r).unwrap_or_default()
        };
        Self { value: reduced }
    }

    pub fn from_u64(val: u64) -> Self {
        Self::new(BigValue::from_u64(val))
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::from_u64(1)
    }

    /// Parses a big-endian hex string and reduces it modulo p
    pub fn from_hex(hex: &str) -> Result<Self> {
        Ok(Self::new(BigValue::from_hex(hex)?))
    }

    /// Decodes up to 64 big-endian bytes and reduces modulo p
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self> {
        Self::check_len(bytes)?;
        Ok(Self::new(BigValue::from_be_bytes(bytes)))
    }

    /// Decodes up to 64 little-endian bytes (the X25519 wire order) and
    /// reduces modulo p
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self> {
        Self::check_len(bytes)?;
        Ok(Self::new(BigValue::from_le_bytes(bytes)))
    }

    fn check_len(bytes: &[u8]) -> Result<()> {
        if bytes.len() > BigValue::BITS / 8 {
            return Err(Error::OutOfRange(format!(
                "{} bytes exceed the {}-bit working width",
                bytes.len(),
                BigValue::BITS
            )));
        }
        Ok(())
    }

    /// 32-byte little-endian encoding
    pub fn to_le_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.value.to_le_bytes()[..32]);
        out
    }

    /// The canonical integer value in [0, p)
    pub fn value(&self) -> &BigValue {
        &self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Lowercase hex, zero-padded to `ceil(min_bits / 8)` digit pairs
    pub fn to_hex(&self, min_bits: usize) -> String {
        self.value.to_hex(min_bits)
    }

    pub fn square(&self) -> Self {
        *self * *self
    }

    /// Multiplicative inverse through the extended Euclidean algorithm
    ///
    /// Fails with `NonInvertible(Zero)` for zero. The gcd and the product
    /// check can only fail on an arithmetic bug; they surface as
    /// `NonInvertible` instead of handing back a wrong value.
    pub fn inverse(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::NonInvertible(InversionFailure::Zero));
        }

        let bezout = extended_euclidean(&self.value, &P)?;
        if !bezout.gcd.is_one() {
            return Err(Error::NonInvertible(InversionFailure::GcdNotOne));
        }

        let inverse = bezout.x;
        if *self * inverse != Self::one() {
            return Err(Error::NonInvertible(InversionFailure::CheckFailed));
        }
        Ok(inverse)
    }

    /// self^exponent by left-to-right square-and-multiply
    ///
    /// Not constant-time: the multiply step only runs for set bits.
    pub fn pow(&self, exponent: &Scalar) -> Self {
        let mut result = Self::one();
        for bit in exponent.bits_msb_first() {
            result = result.square();
            if bit {
                result = result * *self;
            }
        }
        result
    }

    /// Euler's criterion: zero or n^((p-1)/2) = 1
    pub fn is_square(&self) -> bool {
        self.is_zero() || self.pow(&CONSTANTS.euler_exponent) == Self::one()
    }

    /// Both square roots of self, as (r, p - r)
    ///
    /// Uses the p = 5 (mod 8) shortcut: r = n^((p+3)/8) is a root of n or of
    /// -n, and in the second case r * sqrt(-1) is a root of n. This does not
    /// carry over to other moduli (they need Tonelli-Shanks).
    ///
    /// Zero yields (0, 0); a non-residue fails with `NoRoot`.
    pub fn sqrt(&self) -> Result<(Self, Self)> {
        if self.is_zero() {
            return Ok((Self::zero(), Self::zero()));
        }

        let candidate = self.pow(&CONSTANTS.sqrt_exponent);
        let check = candidate.square();

        let root = if check == *self {
            candidate
        } else if check == -*self {
            candidate * CONSTANTS.sqrt_minus_one
        } else {
            return Err(Error::NoRoot);
        };

        Ok((root, -root))
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let (sum, _) = self.value.add_with_carry(&other.value);
        Self {
            value: reduce_to_field(&sum),
        }
    }
}

/// a - b with a single conditional addition of p
///
/// Both operands are canonical, so after adding p once to a smaller
/// minuend it is guaranteed to be at least the subtrahend.
impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        let mut minuend = self.value;
        if minuend.compare(&other.value) == Ordering::Less {
            minuend = minuend.add_with_carry(&P).0;
            debug_assert!(minuend.compare(&other.value) != Ordering::Less);
        }
        let (diff, _) = minuend.sub_with_borrow(&other.value);
        Self {
            value: reduce_to_field(&diff),
        }
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let product = self.value.mul_wide(&other.value);
        Self {
            value: reduce_to_field(&product),
        }
    }
}

// -a = p - a, with -0 = 0
impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self {
        if self.is_zero() {
            return self;
        }
        Self {
            value: P.sub_with_borrow(&self.value).0,
        }
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x{})", self.to_hex(256))
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex(256))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p_minus(k: u64) -> FieldElement {
        FieldElement::new(P.sub_with_borrow(&BigValue::from_u64(k)).0)
    }

    #[test]
    fn test_canonical_construction() {
        assert_eq!(FieldElement::new(P), FieldElement::zero());
        assert_eq!(
            FieldElement::new(P.add_with_carry(&BigValue::one()).0),
            FieldElement::one()
        );
        let max = BigValue::from_limbs([u64::MAX; 8]);
        assert!(FieldElement::new(max).value().compare(&P) == Ordering::Less);
    }

    #[test]
    fn test_addition_wraps() {
        assert_eq!(p_minus(1) + FieldElement::from_u64(2), FieldElement::one());
        assert_eq!(
            FieldElement::from_u64(3) + FieldElement::from_u64(4),
            FieldElement::from_u64(7)
        );
    }

    #[test]
    fn test_subtraction_wraps() {
        assert_eq!(FieldElement::zero() - FieldElement::one(), p_minus(1));
        assert_eq!(
            FieldElement::from_u64(2) - p_minus(1),
            FieldElement::from_u64(3)
        );
        assert_eq!(
            FieldElement::from_u64(9) - FieldElement::from_u64(4),
            FieldElement::from_u64(5)
        );
    }

    #[test]
    fn test_subtraction_extreme_operands() {
        // Largest possible gap: 0 - (p - 1) needs exactly one addition of p.
        assert_eq!(FieldElement::zero() - p_minus(1), FieldElement::one());
    }

    #[test]
    fn test_multiplication_reduces() {
        // (p - 1)^2 = 1
        assert_eq!(p_minus(1) * p_minus(1), FieldElement::one());
        assert_eq!(
            FieldElement::from_u64(1 << 32) * FieldElement::from_u64(1 << 32),
            FieldElement::new(BigValue::from_limbs([0, 1, 0, 0, 0, 0, 0, 0]))
        );
    }

    #[test]
    fn test_negation() {
        assert_eq!(-FieldElement::zero(), FieldElement::zero());
        assert_eq!(-FieldElement::one(), p_minus(1));
        assert_eq!(-(-FieldElement::from_u64(5)), FieldElement::from_u64(5));
    }

    #[test]
    fn test_inverse_known_values() {
        let two = FieldElement::from_u64(2);
        let half = FieldElement::new(P.shr(1).add_with_carry(&BigValue::one()).0);

        assert_eq!(FieldElement::one().inverse().unwrap(), FieldElement::one());
        assert_eq!(two.inverse().unwrap(), half);
        assert_eq!(half.inverse().unwrap(), two);
    }

    #[test]
    fn test_inverse_of_zero_fails() {
        assert_eq!(
            FieldElement::zero().inverse(),
            Err(Error::NonInvertible(InversionFailure::Zero))
        );
    }

    #[test]
    fn test_pow() {
        let e = |n: u64| Scalar::from_u64(n);
        assert_eq!(FieldElement::one().pow(&e(3)), FieldElement::one());
        assert_eq!(FieldElement::from_u64(2).pow(&e(4)), FieldElement::from_u64(16));
        assert_eq!(FieldElement::from_u64(3).pow(&e(5)), FieldElement::from_u64(243));
        assert_eq!(FieldElement::from_u64(7).pow(&Scalar::zero()), FieldElement::one());
        assert_eq!(FieldElement::zero().pow(&e(5)), FieldElement::zero());
    }

    #[test]
    fn test_euler_criterion() {
        assert_eq!(
            FieldElement::from_u64(7).pow(&CONSTANTS.euler_exponent),
            p_minus(1)
        );
        assert_eq!(
            FieldElement::from_u64(9).pow(&CONSTANTS.euler_exponent),
            FieldElement::one()
        );
        assert!(FieldElement::from_u64(9).is_square());
        assert!(!FieldElement::from_u64(2).is_square());
        assert!(FieldElement::zero().is_square());
    }

    #[test]
    fn test_sqrt_of_zero() {
        assert_eq!(
            FieldElement::zero().sqrt().unwrap(),
            (FieldElement::zero(), FieldElement::zero())
        );
    }

    #[test]
    fn test_sqrt_of_minus_one() {
        let (r1, r2) = p_minus(1).sqrt().unwrap();
        assert_eq!(r1.square(), p_minus(1));
        assert_eq!(r2, -r1);
    }

    #[test]
    fn test_sqrt_non_residue() {
        assert_eq!(FieldElement::from_u64(2).sqrt(), Err(Error::NoRoot));
    }

    #[test]
    fn test_hex() {
        assert_eq!(FieldElement::zero().to_hex(256), "0".repeat(64));
        assert_eq!(FieldElement::zero().to_hex(0), "0");
        assert_eq!(FieldElement::from_u64(15).to_hex(9), "000f");
        assert_eq!(
            FieldElement::from_hex("0x10").unwrap(),
            FieldElement::from_u64(16)
        );
    }

    #[test]
    fn test_le_bytes() {
        let nine = FieldElement::from_u64(9);
        let bytes = nine.to_le_bytes();
        assert_eq!(bytes[0], 9);
        assert!(bytes[1..].iter().all(|&b| b == 0));
        assert_eq!(FieldElement::from_le_bytes(&bytes).unwrap(), nine);
        assert!(FieldElement::from_le_bytes(&[0u8; 65]).is_err());
    }
}
