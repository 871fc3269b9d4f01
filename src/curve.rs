//! Montgomery curve v^2 = u^3 + 486662 u^2 + u over F_p (Curve25519)
//!
//! Points are carried by their u-coordinate alone, in projective form
//! (X : Z) with u = X / Z. Z = 0 is the point at infinity. Scalar
//! multiplication uses the Montgomery ladder and is NOT constant-time.

use crate::error::Result;
use crate::field::{FieldElement, CONSTANTS};
use crate::scalar::Scalar;
use log::{debug, trace};
use std::fmt;
use std::ops::RangeInclusive;

/// u-coordinate of a curve point in projective (X : Z) form
///
/// `==` compares the raw coordinates; use [`ProjectivePoint::same_point`]
/// to compare equivalence classes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ProjectivePoint {
    pub x: FieldElement,
    pub z: FieldElement,
}

/// A point with both affine coordinates
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AffinePoint {
    pub u: FieldElement,
    pub v: FieldElement,
}

impl ProjectivePoint {
    pub fn new(x: FieldElement, z: FieldElement) -> Self {
        Self { x, z }
    }

    /// (u : 1)
    pub fn from_affine(u: FieldElement) -> Self {
        Self::new(u, FieldElement::one())
    }

    /// (1 : 0)
    pub fn identity() -> Self {
        Self::new(FieldElement::one(), FieldElement::zero())
    }

    /// The standard base point, u = 9
    pub fn base_point() -> Self {
        Self::from_affine(CONSTANTS.base_point_u)
    }

    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// X1 * Z2 == X2 * Z1
    pub fn same_point(&self, other: &Self) -> bool {
        self.x * other.z == other.x * self.z
    }

    /// 2P
    ///
    /// A = X+Z, B = X-Z, E = A^2 - B^2 (= 4XZ),
    /// X2 = A^2 * B^2, Z2 = E * (A^2 + a24*E) with a24 = (A-2)/4,
    /// which equals E * (B^2 + ((A+2)/4) * E). An input with Z = 0 or
    /// X = 0 yields Z2 = 0.
    pub fn double(&self) -> Self {
        let a = self.x + self.z;
        let aa = a.square();
        let b = self.x - self.z;
        let bb = b.square();
        let e = aa - bb;

        Self {
            x: aa * bb,
            z: e * (aa + CONSTANTS.a24 * e),
        }
    }

    /// P_m + P_n given the difference P_m - P_n
    ///
    /// X = Zd * ((Xm-Zm)(Xn+Zn) + (Xm+Zm)(Xn-Zn))^2
    /// Z = Xd * ((Xm-Zm)(Xn+Zn) - (Xm+Zm)(Xn-Zn))^2
    pub fn differential_add(&self, other: &Self, difference: &Self) -> Self {
        let da = (self.x - self.z) * (other.x + other.z);
        let cb = (self.x + self.z) * (other.x - other.z);

        Self {
            x: difference.z * (da + cb).square(),
            z: difference.x * (da - cb).square(),
        }
    }

    /// P_{k+1} from P_k (self) and P_{k-1}
    ///
    /// Adds the base point; the difference P_k - P_1 is the supplied P_{k-1}.
    pub fn add_one(&self, previous: &Self) -> Self {
        self.differential_add(&Self::base_point(), previous)
    }

    /// u = X / Z; fails with `NonInvertible` at infinity
    pub fn affine_u(&self) -> Result<FieldElement> {
        Ok(self.x * self.z.inverse()?)
    }
}

impl fmt::Display for ProjectivePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return write!(f, "O (point at infinity)");
        }
        write!(f, "({} : {})", self.x, self.z)
    }
}

/// n * P for the point P with u-coordinate `base_u`
///
/// Seeds (R0, R1) = (1P, 2P) for the top bit of n, then for each lower
/// bit keeps R1 - R0 = P: a set bit moves R0 to R0+R1 and doubles R1, a
/// clear bit moves R1 to R0+R1 and doubles R0. The number of steps is the
/// bit length of n. n = 0 gives the identity, n = 1 gives (base_u : 1).
pub fn scalar_multiply(base_u: FieldElement, n: &Scalar) -> ProjectivePoint {
    let mut bits = n.bits_msb_first();
    if bits.next().is_none() {
        debug!("ladder: zero scalar, returning identity");
        return ProjectivePoint::identity();
    }
    debug!("ladder: {} bit scalar", n.bit_length());

    let base = ProjectivePoint::from_affine(base_u);
    let mut r0 = base;
    let mut r1 = base.double();

    for (step, bit) in bits.enumerate() {
        let sum = r0.differential_add(&r1, &base);
        if bit {
            r0 = sum;
            r1 = r1.double();
        } else {
            r1 = sum;
            r0 = r0.double();
        }
        trace!("ladder step {}: bit={} R0={}", step, bit as u8, r0);
    }

    r0
}

/// Affine u-coordinate of n * base point
pub fn public_key(n: &Scalar) -> Result<FieldElement> {
    scalar_multiply(CONSTANTS.base_point_u, n).affine_u()
}

/// X25519 on 32-byte little-endian strings
///
/// The scalar is clamped and the top bit of the u-coordinate is masked
/// before the ladder runs. A result at infinity fails with `NonInvertible`.
pub fn x25519(scalar: &[u8; 32], u: &[u8; 32]) -> Result<[u8; 32]> {
    let n = Scalar::from_le_bytes(scalar).clamped();
    let mut u_bytes = *u;
    u_bytes[31] &= 0x7f;
    let u = FieldElement::from_le_bytes(&u_bytes)?;

    let shared = scalar_multiply(u, &n).affine_u()?;
    Ok(shared.to_le_bytes())
}

/// u^3 + A u^2 + u
pub fn curve_rhs(u: FieldElement) -> FieldElement {
    let uu = u.square();
    uu * u + CONSTANTS.a * uu + u
}

/// Both v-coordinates for u, as (v, -v)
///
/// Fails with `NoRoot` when u is not the u-coordinate of a curve point.
pub fn recover_v(u: FieldElement) -> Result<(FieldElement, FieldElement)> {
    curve_rhs(u).sqrt()
}

pub fn is_on_curve(point: &AffinePoint) -> bool {
    point.v.square() == curve_rhs(point.u)
}

/// Every affine point whose u lies in `range`
///
/// Values of u with no point are skipped; u with v = 0 contributes one
/// point, every other valid u contributes (u, v) and (u, -v).
pub fn curve_points(range: RangeInclusive<u64>) -> Vec<AffinePoint> {
    let mut points = Vec::new();
    for raw in range {
        let u = FieldElement::from_u64(raw);
        let Ok((v1, v2)) = recover_v(u) else {
            continue;
        };
        points.push(AffinePoint { u, v: v1 });
        if v2 != v1 {
            points.push(AffinePoint { u, v: v2 });
        }
    }
    points
}
