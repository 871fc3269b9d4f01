//! Error types shared by every arithmetic layer

/// Why an inversion could not produce a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InversionFailure {
    /// The zero element has no inverse
    Zero,
    /// The extended Euclidean algorithm returned a gcd other than one
    GcdNotOne,
    /// `n * n^-1` did not come back as one
    CheckFailed,
}

impl std::fmt::Display for InversionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InversionFailure::Zero => write!(f, "zero has no inverse"),
            InversionFailure::GcdNotOne => write!(f, "gcd with the modulus is not one"),
            InversionFailure::CheckFailed => write!(f, "n * inverse did not reduce to one"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("division by zero")]
    DivisionByZero,
    #[error("value is not invertible: {0}")]
    NonInvertible(InversionFailure),
    #[error("no roots: value is a quadratic non-residue")]
    NoRoot,
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    #[error("not a nonnegative integer: {0}")]
    InvalidNumber(String),
    #[error("value out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, Error>;
