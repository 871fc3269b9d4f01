//! The prime field F_p with p = 2^255 - 19
//!
//! - `config`: the modulus and the immutable curve parameter table
//! - `element`: `FieldElement` arithmetic, inverse, exponentiation, square root
//! - `euclid`: extended Euclidean algorithm backing the inverse

pub mod config;
pub mod element;
pub mod euclid;

pub use config::{Curve25519Config, CONSTANTS, P};
pub use element::{reduce_to_field, FieldElement};
pub use euclid::{extended_euclidean, Bezout};
