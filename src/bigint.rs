//! Fixed-width big integer with compile-time sizing
//!
//! `BigInt<N>` holds N little-endian 64-bit limbs (limbs[0] is least
//! significant). The field layer uses `BigValue = BigInt<8>`: 512 bits, wide
//! enough to hold the product of two 256-bit operands before reduction.
//!
//! Nothing here knows about a field. Every operation is an owned-value
//! transform: operands are taken by reference and never mutated.

use crate::encoding::parse_hex;
use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;

/// A big integer with N 64-bit limbs (N * 64 bits total)
///
/// # Examples
/// ```
/// use x25519_ladder::bigint::BigValue;
/// let a = BigValue::from_u64(6);
/// let b = BigValue::from_u64(7);
/// assert_eq!(a.mul_wide(&b), BigValue::from_u64(42));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BigInt<const N: usize> {
    limbs: [u64; N],
}

/// 512-bit working integer for the Curve25519 field
pub type BigValue = BigInt<8>;

impl<const N: usize> BigInt<N> {
    /// Number of bits this BigInt can represent
    pub const BITS: usize = N * 64;

    #[inline]
    pub const fn zero() -> Self {
        Self { limbs: [0; N] }
    }

    #[inline]
    pub const fn one() -> Self {
        Self::from_u64(1)
    }

    /// Creates a BigInt seeded with a small value in the lowest limb
    #[inline]
    pub const fn from_u64(val: u64) -> Self {
        let mut limbs = [0; N];
        limbs[0] = val;
        Self { limbs }
    }

    /// Creates a BigInt from an array of limbs in little-endian order
    pub const fn from_limbs(limbs: [u64; N]) -> Self {
        Self { limbs }
    }

    #[inline]
    pub const fn limbs(&self) -> &[u64; N] {
        &self.limbs
    }

    /// Parses a big-endian hex string, with or without a `0x` prefix
    ///
    /// Fails with `InvalidHex` on bad digits and `OutOfRange` when the value
    /// needs more than `N * 64` bits.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let bytes = parse_hex(hex)?;
        let significant = bytes.iter().skip_while(|&&b| b == 0).count();
        if significant > N * 8 {
            return Err(Error::OutOfRange(format!(
                "{} does not fit in {} bits",
                hex,
                Self::BITS
            )));
        }
        Ok(Self::from_be_bytes(&bytes))
    }

    /// Creates a BigInt from big-endian bytes; bytes beyond `N * 8` are dropped
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let mut limbs = [0u64; N];
        for (i, &byte) in bytes.iter().rev().enumerate() {
            let limb_idx = i / 8;
            if limb_idx < N {
                limbs[limb_idx] |= (byte as u64) << ((i % 8) * 8);
            }
        }
        Self { limbs }
    }

    /// Creates a BigInt from little-endian bytes; bytes beyond `N * 8` are dropped
    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        let mut limbs = [0u64; N];
        for (i, &byte) in bytes.iter().enumerate() {
            let limb_idx = i / 8;
            if limb_idx < N {
                limbs[limb_idx] |= (byte as u64) << ((i % 8) * 8);
            }
        }
        Self { limbs }
    }

    /// Returns all `N * 8` bytes, least significant first
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.limbs.iter().flat_map(|limb| limb.to_le_bytes()).collect()
    }

    /// Returns all `N * 8` bytes, most significant first
    pub fn to_be_bytes(&self) -> Vec<u8> {
        self.limbs
            .iter()
            .rev()
            .flat_map(|limb| limb.to_be_bytes())
            .collect()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&limb| limb == 0)
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.limbs[0] == 1 && self.limbs[1..].iter().all(|&limb| limb == 0)
    }

    /// Position of the highest set bit plus one; 0 for zero
    pub fn bit_length(&self) -> usize {
        for i in (0..N).rev() {
            if self.limbs[i] != 0 {
                return (i + 1) * 64 - self.limbs[i].leading_zeros() as usize;
            }
        }
        0
    }

    /// Bit `idx` counting from the least significant; false past the width
    pub fn get_bit(&self, idx: usize) -> bool {
        if idx >= Self::BITS {
            return false;
        }
        (self.limbs[idx / 64] >> (idx % 64)) & 1 == 1
    }

    fn set_bit(&mut self, idx: usize) {
        self.limbs[idx / 64] |= 1u64 << (idx % 64);
    }

    /// Compares most significant limb first; the first differing limb decides
    pub fn compare(&self, other: &Self) -> Ordering {
        for i in (0..N).rev() {
            match self.limbs[i].cmp(&other.limbs[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    /// Limb-wise addition; returns (sum mod 2^BITS, carry out of the top limb)
    pub fn add_with_carry(&self, other: &Self) -> (Self, bool) {
        let mut result = Self::zero();
        let mut carry = false;

        for i in 0..N {
            let (sum1, overflow1) = self.limbs[i].overflowing_add(other.limbs[i]);
            let (sum2, overflow2) = sum1.overflowing_add(carry as u64);
            result.limbs[i] = sum2;
            carry = overflow1 || overflow2;
        }

        (result, carry)
    }

    /// Limb-wise subtraction; returns (difference mod 2^BITS, borrow out)
    pub fn sub_with_borrow(&self, other: &Self) -> (Self, bool) {
        let mut result = Self::zero();
        let mut borrow = false;

        for i in 0..N {
            let (diff1, underflow1) = self.limbs[i].overflowing_sub(other.limbs[i]);
            let (diff2, underflow2) = diff1.overflowing_sub(borrow as u64);
            result.limbs[i] = diff2;
            borrow = underflow1 || underflow2;
        }

        (result, borrow)
    }

    /// Circular left rotation across the whole width
    ///
    /// Whole-limb moves are applied first, then the sub-limb remainder with
    /// the carry taken from the next less significant limb.
    pub fn rotate_left(&self, n: usize) -> Self {
        let n = n % Self::BITS;
        let limb_shift = n / 64;
        let bit_shift = n % 64;

        let mut moved = [0u64; N];
        for (i, &limb) in self.limbs.iter().enumerate() {
            moved[(i + limb_shift) % N] = limb;
        }
        if bit_shift == 0 {
            return Self { limbs: moved };
        }

        let mut limbs = [0u64; N];
        for i in 0..N {
            let lower = moved[(i + N - 1) % N];
            limbs[i] = (moved[i] << bit_shift) | (lower >> (64 - bit_shift));
        }
        Self { limbs }
    }

    /// Circular right rotation across the whole width
    pub fn rotate_right(&self, n: usize) -> Self {
        let n = n % Self::BITS;
        if n == 0 {
            return *self;
        }
        self.rotate_left(Self::BITS - n)
    }

    /// Logical left shift. Returns (result, bits pushed out of the top limb)
    ///
    /// The overflow word is only meaningful for shifts below 64.
    pub fn shl(&self, bits: usize) -> (Self, u64) {
        if bits == 0 {
            return (*self, 0);
        }
        if bits >= Self::BITS {
            return (Self::zero(), 0);
        }

        let limb_shift = bits / 64;
        let bit_shift = bits % 64;
        let mut result = Self::zero();

        for i in limb_shift..N {
            let src = i - limb_shift;
            let mut v = self.limbs[src] << bit_shift;
            if bit_shift != 0 && src > 0 {
                v |= self.limbs[src - 1] >> (64 - bit_shift);
            }
            result.limbs[i] = v;
        }

        let overflow = if bit_shift == 0 {
            0
        } else {
            self.limbs[N - 1] >> (64 - bit_shift)
        };
        (result, overflow)
    }

    /// Logical right shift
    pub fn shr(&self, bits: usize) -> Self {
        if bits == 0 {
            return *self;
        }
        if bits >= Self::BITS {
            return Self::zero();
        }

        let limb_shift = bits / 64;
        let bit_shift = bits % 64;
        let mut result = Self::zero();

        for i in 0..(N - limb_shift) {
            let src = i + limb_shift;
            result.limbs[i] = self.limbs[src] >> bit_shift;
            if bit_shift != 0 && src + 1 < N {
                result.limbs[i] |= self.limbs[src + 1] << (64 - bit_shift);
            }
        }

        result
    }

    /// Schoolbook conditional-accumulate multiplication
    ///
    /// Walks every bit position of the width: when the low bit of the
    /// (right-rotating) multiplier is set, the (left-rotating) multiplicand is
    /// added into the accumulator. The result is the exact product when
    /// `self.bit_length() + other.bit_length() <= BITS`; callers reduce.
    pub fn mul_wide(&self, other: &Self) -> Self {
        let mut multiplier = *self;
        let mut addend = *other;
        let mut acc = Self::zero();

        for _ in 0..Self::BITS {
            if multiplier.limbs[0] & 1 == 1 {
                acc = acc.add_with_carry(&addend).0;
            }
            multiplier = multiplier.rotate_right(1);
            addend = addend.rotate_left(1);
        }

        acc
    }

    /// Restoring binary long division: returns (quotient, remainder)
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self)> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if self.compare(divisor) == Ordering::Less {
            return Ok((Self::zero(), *self));
        }

        let mut quotient = Self::zero();
        let mut remainder = Self::zero();

        for i in (0..Self::BITS).rev() {
            let (shifted, overflow) = remainder.shl(1);
            remainder = shifted;
            if self.get_bit(i) {
                remainder.limbs[0] |= 1;
            }

            // A bit pushed out of the top means remainder > divisor already.
            if overflow != 0 || remainder.compare(divisor) != Ordering::Less {
                remainder = remainder.sub_with_borrow(divisor).0;
                quotient.set_bit(i);
            }
        }

        Ok((quotient, remainder))
    }

    /// self mod modulus by full long division
    pub fn modulo(&self, modulus: &Self) -> Result<Self> {
        Ok(self.div_rem(modulus)?.1)
    }

    /// Shift-and-conditionally-subtract reduction
    ///
    /// Aligns `modulus << window` and, for each of the `window + 1`
    /// alignments, subtracts it whenever the accumulator is not below it,
    /// then moves the modulus one bit right. Always runs exactly
    /// `window + 1` rounds.
    ///
    /// Requires `modulus.bit_length() + window <= BITS`; the result is fully
    /// reduced whenever `self < modulus * 2^(window + 1)`.
    pub fn reduce(&self, modulus: &Self, window: usize) -> Self {
        debug_assert!(modulus.bit_length() + window <= Self::BITS);

        let mut shifted = modulus.rotate_left(window);
        let mut acc = *self;

        for _ in 0..=window {
            if acc.compare(&shifted) != Ordering::Less {
                acc = acc.sub_with_borrow(&shifted).0;
            }
            shifted = shifted.rotate_right(1);
        }

        acc
    }

    /// Lowercase big-endian hex without leading zeros ("0" for zero),
    /// left-padded to `ceil(min_bits / 8)` digit pairs
    pub fn to_hex(&self, min_bits: usize) -> String {
        let full: String = self.limbs.iter().rev().map(|l| format!("{:016x}", l)).collect();
        let trimmed = full.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };

        let nibbles = 2 * min_bits.div_ceil(8);
        format!("{:0>width$}", digits, width = nibbles)
    }

    /// 256-bit zero-padded hex, the `keepZeros` form of the string encoding
    pub fn to_hex_keep_zeros(&self) -> String {
        self.to_hex(256)
    }
}

impl<const N: usize> Default for BigInt<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> PartialOrd for BigInt<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for BigInt<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl<const N: usize> fmt::Debug for BigInt<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt<{}>(0x", N)?;
        for &limb in self.limbs.iter().rev() {
            write!(f, "{:016x}", limb)?;
        }
        write!(f, ")")
    }
}

impl<const N: usize> fmt::Display for BigInt<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_one() {
        let zero = BigValue::zero();
        let one = BigValue::one();

        assert!(zero.is_zero());
        assert!(!one.is_zero());
        assert!(one.is_one());
        assert!(!zero.is_one());
    }

    #[test]
    fn test_addition_with_carry() {
        let a = BigValue::from_u64(u64::MAX);
        let (sum, carry) = a.add_with_carry(&BigValue::one());

        assert_eq!(sum.limbs[0], 0);
        assert_eq!(sum.limbs[1], 1);
        assert!(!carry);

        let max = BigValue::from_limbs([u64::MAX; 8]);
        let (wrapped, carry) = max.add_with_carry(&BigValue::one());
        assert!(wrapped.is_zero());
        assert!(carry);
    }

    #[test]
    fn test_subtraction_borrow_across_limbs() {
        let a = BigValue::from_limbs([0, 1, 0, 0, 0, 0, 0, 0]);
        let (diff, borrow) = a.sub_with_borrow(&BigValue::one());
        assert_eq!(diff, BigValue::from_u64(u64::MAX));
        assert!(!borrow);

        let (_, borrow) = BigValue::zero().sub_with_borrow(&BigValue::one());
        assert!(borrow);
    }

    #[test]
    fn test_comparison() {
        let zero = BigValue::zero();
        let one = BigValue::one();
        let two = BigValue::from_u64(2);

        assert_eq!(zero.compare(&one), Ordering::Less);
        assert_eq!(zero.compare(&zero), Ordering::Equal);
        assert_eq!(one.compare(&zero), Ordering::Greater);
        assert_eq!(two.compare(&one), Ordering::Greater);

        // The most significant differing limb decides.
        let high = BigValue::from_limbs([0, 0, 0, 0, 0, 0, 0, 1]);
        let low = BigValue::from_limbs([u64::MAX, u64::MAX, 0, 0, 0, 0, 0, 0]);
        assert_eq!(high.compare(&low), Ordering::Greater);
        assert_eq!(low.compare(&high), Ordering::Less);
    }

    #[test]
    fn test_rotations() {
        let fifteen = BigValue::from_u64(15);
        assert_eq!(fifteen.to_hex(0), "f");

        let r = fifteen.rotate_left(1).rotate_left(1);
        assert_eq!(r.to_hex(0), "3c");
        assert_eq!(r.rotate_right(1).rotate_right(1).to_hex(0), "f");

        assert_eq!(fifteen.rotate_left(2).to_hex(0), "3c");
        assert_eq!(fifteen.rotate_left(32).to_hex(0), "f00000000");
        assert_eq!(fifteen.rotate_left(32).rotate_right(32), fifteen);

        // Whole-limb move plus a sub-limb remainder.
        assert_eq!(fifteen.rotate_left(68).to_hex(0), "f00000000000000000");
        assert_eq!(fifteen.rotate_left(68).rotate_right(68), fifteen);
    }

    #[test]
    fn test_rotation_wraps_around() {
        let top = BigValue::from_limbs([0, 0, 0, 0, 0, 0, 0, 1 << 63]);
        assert_eq!(top.rotate_left(1), BigValue::one());
        assert_eq!(BigValue::one().rotate_right(1), top);
        assert_eq!(top.rotate_left(BigValue::BITS), top);
    }

    #[test]
    fn test_shift_left_cross_limb_carry() {
        let a = BigValue::from_u64(1 << 63);
        let (shifted, overflow) = a.shl(1);

        assert_eq!(shifted.limbs()[0], 0);
        assert_eq!(shifted.limbs()[1], 1);
        assert_eq!(overflow, 0);

        let top = BigValue::from_limbs([0, 0, 0, 0, 0, 0, 0, 1 << 63]);
        let (shifted, overflow) = top.shl(1);
        assert!(shifted.is_zero());
        assert_eq!(overflow, 1);
    }

    #[test]
    fn test_shift_right() {
        let a = BigValue::from_limbs([0, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(a.shr(1), BigValue::from_u64(1 << 63));
        assert_eq!(a.shr(64), BigValue::one());
        assert!(a.shr(65).is_zero());
    }

    #[test]
    fn test_multiplication() {
        let six = BigValue::from_u64(6);
        let seven = BigValue::from_u64(7);
        assert_eq!(six.mul_wide(&seven).to_hex(0), "2a");

        let mut x = BigValue::from_u64(37283).mul_wide(&BigValue::from_u64(234235));
        assert_eq!(x.to_hex(0), "20886c0d1");
        for factor in [2352342u64, 7988878, 9293234] {
            x = x.mul_wide(&BigValue::from_u64(factor));
        }
        assert_eq!(x.to_hex(0), "13400fd270d1e82c1acb4f95a8");
    }

    #[test]
    fn test_multiplication_full_width() {
        // (2^256 - 1)^2 = 2^512 - 2^257 + 1
        let a = BigValue::from_limbs([u64::MAX, u64::MAX, u64::MAX, u64::MAX, 0, 0, 0, 0]);
        let square = a.mul_wide(&a);
        assert_eq!(
            square,
            BigValue::from_limbs([1, 0, 0, 0, u64::MAX - 1, u64::MAX, u64::MAX, u64::MAX])
        );
    }

    #[test]
    fn test_division() {
        let (quot, rem) = BigValue::from_u64(100)
            .div_rem(&BigValue::from_u64(7))
            .unwrap();

        assert_eq!(quot, BigValue::from_u64(14));
        assert_eq!(rem, BigValue::from_u64(2));
    }

    #[test]
    fn test_division_wide_divisor() {
        let top = BigValue::from_limbs([0, 0, 0, 0, 0, 0, 0, 1 << 63]);
        let dividend = BigValue::from_limbs([u64::MAX; 8]);
        let (quot, rem) = dividend.div_rem(&top).unwrap();
        assert_eq!(quot, BigValue::one());
        let mut expected = [u64::MAX; 8];
        expected[7] = u64::MAX >> 1;
        assert_eq!(rem, BigValue::from_limbs(expected));
    }

    #[test]
    fn test_division_by_zero() {
        let result = BigValue::from_u64(5).div_rem(&BigValue::zero());
        assert_eq!(result, Err(Error::DivisionByZero));
    }

    #[test]
    fn test_reduce_matches_modulo() {
        let modulus = BigValue::from_u64(97);
        let value = BigValue::from_hex("123456789abcdef0123456789abcdef").unwrap();
        let window = BigValue::BITS - modulus.bit_length();

        assert_eq!(
            value.reduce(&modulus, window),
            value.modulo(&modulus).unwrap()
        );
        assert_eq!(modulus.reduce(&modulus, window), BigValue::zero());
    }

    #[test]
    fn test_to_hex_padding() {
        let zero = BigValue::zero();
        let one = BigValue::one();
        let fifteen = BigValue::from_u64(15);

        assert_eq!(zero.to_hex(256), "0".repeat(64));
        assert_eq!(zero.to_hex(0), "0");
        assert_eq!(one.to_hex_keep_zeros(), format!("{}1", "0".repeat(63)));
        assert_eq!(one.to_hex(0), "1");
        for bits in 1..=8 {
            assert_eq!(fifteen.to_hex(bits), "0f", "{} bits", bits);
        }
        assert_eq!(fifteen.to_hex(9), "000f");
        assert_eq!(format!("{}", fifteen), "0xf");
    }

    #[test]
    fn test_hex_round_trip_and_bounds() {
        let p_hex = format!("7{}ed", "f".repeat(61));
        let value = BigValue::from_hex(&format!("0x{}", p_hex)).unwrap();
        assert_eq!(value.to_hex(0), p_hex);
        assert_eq!(value.bit_length(), 255);

        let too_wide = format!("1{}", "0".repeat(128));
        assert!(matches!(
            BigValue::from_hex(&too_wide),
            Err(Error::OutOfRange(_))
        ));
        assert!(matches!(BigValue::from_hex("12g4"), Err(Error::InvalidHex(_))));
    }

    #[test]
    fn test_be_bytes_conversion() {
        let num = BigValue::from_u64(0x123456789ABCDEF0);
        let bytes = num.to_be_bytes();

        assert_eq!(bytes.len(), 64);
        assert_eq!(&bytes[56..], &[0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0]);
        assert_eq!(BigValue::from_be_bytes(&bytes), num);
        assert_eq!(BigValue::from_le_bytes(&num.to_le_bytes()), num);
    }
}
