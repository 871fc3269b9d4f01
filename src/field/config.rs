//! Curve25519 field and curve parameters
//!
//! The modulus and reduction window are compile-time constants so that the
//! arithmetic layer never touches lazily-initialised state. Everything derived
//! from them lives in `CONSTANTS`, built once on first use and never mutated.

use super::element::FieldElement;
use crate::bigint::BigValue;
use crate::scalar::Scalar;
use once_cell::sync::Lazy;

/// p = 2^255 - 19
pub const P: BigValue = BigValue::from_limbs([
    0xFFFF_FFFF_FFFF_FFED,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0x7FFF_FFFF_FFFF_FFFF,
    0,
    0,
    0,
    0,
]);

/// Bit positions the modulus is slid through during reduction
///
/// p occupies 255 bits, so `p << 256` still fits in the 512-bit width and
/// any value below `p * 2^257` (every raw sum or product of canonical
/// elements) reduces in 257 rounds.
pub const REDUCTION_WINDOW: usize = BigValue::BITS - 256;

/// Montgomery coefficient A in v^2 = u^3 + A*u^2 + u
pub const CURVE_A: u64 = 486662;

/// (A - 2) / 4, paired with AA in the doubling formula
pub const A24: u64 = 121665;

/// u-coordinate of the standard base point
pub const BASE_POINT_U: u64 = 9;

/// Immutable parameter table for the Curve25519 field and curve
#[derive(Clone, Debug)]
pub struct Curve25519Config {
    pub modulus: BigValue,
    pub a: FieldElement,
    pub a24: FieldElement,
    pub base_point_u: FieldElement,
    /// 2^((p-1)/4), a square root of -1 (valid because p = 5 mod 8)
    pub sqrt_minus_one: FieldElement,
    /// (p+3)/8, the candidate-root exponent
    pub sqrt_exponent: Scalar,
    /// (p-1)/2, Euler's criterion exponent
    pub euler_exponent: Scalar,
}

impl Curve25519Config {
    fn build() -> Self {
        let p_minus_one = P.sub_with_borrow(&BigValue::one()).0;
        let p_plus_three = P.add_with_carry(&BigValue::from_u64(3)).0;

        let quarter = Scalar::from(&p_minus_one.shr(2));
        let sqrt_minus_one = FieldElement::from_u64(2).pow(&quarter);
        debug_assert_eq!(
            sqrt_minus_one.square(),
            -FieldElement::one(),
            "2^((p-1)/4) must square to -1"
        );

        Self {
            modulus: P,
            a: FieldElement::from_u64(CURVE_A),
            a24: FieldElement::from_u64(A24),
            base_point_u: FieldElement::from_u64(BASE_POINT_U),
            sqrt_minus_one,
            sqrt_exponent: Scalar::from(&p_plus_three.shr(3)),
            euler_exponent: Scalar::from(&p_minus_one.shr(1)),
        }
    }
}

/// Process-wide parameter table
pub static CONSTANTS: Lazy<Curve25519Config> = Lazy::new(Curve25519Config::build);
