//! Arbitrary-length nonnegative integers for ladder scalars and exponents
//!
//! Unlike `BigInt<N>`, a `Scalar` has no fixed width: its own bit length
//! decides how many ladder steps (or square-and-multiply rounds) it drives.

use crate::bigint::BigInt;
use crate::encoding::parse_hex;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Nonnegative integer stored as little-endian bytes without trailing zeros
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Scalar {
    bytes: Vec<u8>,
}

impl Scalar {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_u64(val: u64) -> Self {
        Self::from_le_bytes(&val.to_le_bytes())
    }

    pub fn from_u128(val: u128) -> Self {
        Self::from_le_bytes(&val.to_le_bytes())
    }

    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        let mut bytes = bytes.to_vec();
        while bytes.last() == Some(&0) {
            bytes.pop();
        }
        Self { bytes }
    }

    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let reversed: Vec<u8> = bytes.iter().rev().copied().collect();
        Self::from_le_bytes(&reversed)
    }

    /// 2^k
    pub fn pow2(k: usize) -> Self {
        let mut bytes = vec![0u8; k / 8 + 1];
        bytes[k / 8] = 1 << (k % 8);
        Self { bytes }
    }

    pub fn is_zero(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Little-endian bytes with no trailing zeros (empty for zero)
    pub fn as_le_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bit_length(&self) -> usize {
        match self.bytes.last() {
            Some(&top) => self.bytes.len() * 8 - top.leading_zeros() as usize,
            None => 0,
        }
    }

    pub fn bit(&self, idx: usize) -> bool {
        self.bytes
            .get(idx / 8)
            .is_some_and(|&byte| (byte >> (idx % 8)) & 1 == 1)
    }

    /// Bits from the most significant set bit down to bit 0
    pub fn bits_msb_first(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_length()).rev().map(move |i| self.bit(i))
    }

    /// X25519-style clamp: reduce mod 2^255, clear the low three bits and
    /// set bit 254
    ///
    /// The ladder never clamps on its own; this is for callers deriving
    /// public keys from raw secrets.
    pub fn clamped(&self) -> Self {
        let mut bytes = [0u8; 32];
        for (dst, src) in bytes.iter_mut().zip(self.bytes.iter()) {
            *dst = *src;
        }
        bytes[0] &= 0xf8;
        bytes[31] &= 0x7f;
        bytes[31] |= 0x40;
        Self::from_le_bytes(&bytes)
    }

    pub fn plus_one(&self) -> Self {
        let mut bytes = self.bytes.clone();
        for byte in bytes.iter_mut() {
            let (sum, overflow) = byte.overflowing_add(1);
            *byte = sum;
            if !overflow {
                return Self { bytes };
            }
        }
        bytes.push(1);
        Self { bytes }
    }

    pub fn doubled(&self) -> Self {
        let mut bytes = Vec::with_capacity(self.bytes.len() + 1);
        let mut carry = 0u8;
        for &byte in &self.bytes {
            bytes.push((byte << 1) | carry);
            carry = byte >> 7;
        }
        bytes.push(carry);
        Self::from_le_bytes(&bytes)
    }

    /// Lowercase big-endian hex without leading zeros ("0" for zero)
    pub fn to_hex(&self) -> String {
        let be: Vec<u8> = self.bytes.iter().rev().copied().collect();
        let full = hex::encode(be);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    fn from_decimal(digits: &str) -> Result<Self> {
        let mut bytes: Vec<u8> = Vec::new();
        for c in digits.chars().filter(|&c| c != '_') {
            let digit = c
                .to_digit(10)
                .ok_or_else(|| Error::InvalidNumber(digits.to_string()))?;

            // bytes = bytes * 10 + digit
            let mut carry = digit;
            for byte in bytes.iter_mut() {
                let v = (*byte as u32) * 10 + carry;
                *byte = v as u8;
                carry = v >> 8;
            }
            while carry > 0 {
                bytes.push(carry as u8);
                carry >>= 8;
            }
        }
        Ok(Self::from_le_bytes(&bytes))
    }
}

impl<const N: usize> From<&BigInt<N>> for Scalar {
    fn from(value: &BigInt<N>) -> Self {
        Self::from_le_bytes(&value.to_le_bytes())
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

/// Parses decimal, or hex with a `0x` prefix
impl FromStr for Scalar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with("0x") || s.starts_with("0X") {
            let be = parse_hex(s)?;
            return Ok(Self::from_be_bytes(&be));
        }
        if s.is_empty() {
            return Err(Error::InvalidNumber(s.to_string()));
        }
        Self::from_decimal(s)
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar(0x{})", self.to_hex())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}
