//! Educational short-Weierstrass elliptic-curve cryptography over prime
//! fields, wired end-to-end for secp256k1.
//!
//! This crate favors a readable, directly-auditable implementation over
//! performance or side-channel resistance: all arithmetic is variable
//! time, and no constant-time or blinding countermeasures are applied
//! anywhere in the call graph. It must not be used to protect secrets
//! against an attacker who can observe timing, memory access patterns,
//! or power draw.
//!
//! The module layout mirrors the dependency chain: [`field`] underlies
//! [`curve`], which underlies [`point`]; [`context`] binds a curve to a
//! base point and order; [`keys`] builds on `context` and `point`;
//! [`ecdsa`], [`ecdh`], and [`hybrid`] build on `keys`.

pub mod context;
pub mod curve;
pub mod ecdh;
pub mod ecdsa;
pub mod error;
pub mod field;
pub mod hybrid;
pub mod keys;
pub mod point;

pub use context::EccContext;
pub use curve::Curve;
pub use ecdsa::Signature;
pub use error::{Error, Result};
pub use field::FieldElement;
pub use keys::{PrivateKey, PublicKey};
pub use point::Point;
