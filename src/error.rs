//! Error types.

use core::fmt;

/// Errors produced by this crate.
///
/// Signature verification is deliberately not represented here: `verify`
/// returns a plain `bool` (see [`crate::ecdsa::verify`]), matching the
/// boundary spec.md draws between a cryptographic predicate and an I/O
/// or encoding failure.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Curve discriminant `4a³ + 27b²` was zero.
    InvalidParameters,
    /// Requested the modular inverse of a non-invertible element.
    ///
    /// [`crate::field::FieldElement::inv`] reports this case as `None`
    /// rather than this variant: every call site in this crate's group
    /// law and ECDSA code inverts a value already checked non-zero, so
    /// the error never actually arises internally. It is kept in the
    /// enum for API completeness against spec §7's error-kind list.
    NoModularInverse,
    /// Malformed hex, wrong length, unrecognized tag byte, or a coordinate
    /// not on the curve.
    InvalidEncoding,
    /// A compressed key's sole `y` candidate disagreed with the tag's parity.
    InvalidParity,
    /// AES-GCM authentication failed on decrypt.
    AeadFailure,
    /// The nonce parsed from a hybrid ciphertext did not match the one
    /// re-derived from the shared secret.
    NonceMismatch,
    /// The system CSPRNG returned an error.
    RandomnessFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidParameters => "invalid curve parameters: discriminant is zero",
            Self::NoModularInverse => "no modular inverse exists",
            Self::InvalidEncoding => "invalid encoding",
            Self::InvalidParity => "compressed point parity does not match its y coordinate",
            Self::AeadFailure => "AEAD authentication failed",
            Self::NonceMismatch => "nonce mismatch",
            Self::RandomnessFailure => "random number generator failed",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for Error {}

/// Result type alias used throughout this crate.
pub type Result<T> = core::result::Result<T, Error>;
