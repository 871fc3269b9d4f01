//! Curve25519 key-exchange arithmetic (didactic, NOT constant-time)
//!
//! Layers, leaf first:
//! - `bigint`: fixed-width integers with rotation, reduction and long division
//! - `field`: F_p with p = 2^255 - 19 (inverse, exponentiation, square root)
//! - `curve`: Montgomery ladder over the u-coordinate
//!
//! ```
//! use x25519_ladder::curve::public_key;
//! use x25519_ladder::scalar::Scalar;
//!
//! let u = public_key(&Scalar::from_u64(2)).unwrap();
//! assert_eq!(
//!     u.to_hex(256),
//!     "20d342d51873f1b7d9750c687d1571148f3f5ced1e350b5c5cae469cdd684efb"
//! );
//! ```
//!
//! Timing depends on the data. Do not use this for real keys.

pub mod bigint;
pub mod curve;
pub mod encoding;
pub mod error;
pub mod field;
pub mod scalar;

pub use bigint::{BigInt, BigValue};
pub use curve::{
    curve_points, is_on_curve, public_key, recover_v, scalar_multiply, x25519, AffinePoint,
    ProjectivePoint,
};
pub use error::{Error, InversionFailure, Result};
pub use field::{FieldElement, CONSTANTS};
pub use scalar::Scalar;
