//! Private and public keys, and their SEC1-style encodings.

use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};

use crate::context::EccContext;
use crate::error::{Error, Result};
use crate::point::Point;

/// Width in bytes of a secp256k1 field element or scalar encoding.
const COORD_LEN: usize = 32;

/// A secret scalar `d` with `1 <= d < n`, bound to the context it was
/// generated under.
///
/// `num-bigint`'s `BigUint` keeps its limbs in a heap `Vec` with no hook
/// for wiping them on drop, so this type cannot offer genuine
/// zeroize-on-drop; it instead withholds `Debug`/`Display` so a stray
/// `{:?}` or log line can't leak `d`. Byte buffers that carry `d` across
/// an encoding boundary (hex decode, stdin) are `Zeroize`d by their
/// callers once consumed — see `src/bin/becc.rs`.
#[derive(Clone)]
pub struct PrivateKey {
    ctx: Arc<EccContext>,
    d: BigUint,
}

impl PrivateKey {
    /// Generates a fresh private key by sampling `d` uniformly from
    /// `[1, n - 1]` (spec §4.4). Fails upward if the CSPRNG fails.
    pub fn generate(ctx: &Arc<EccContext>, rng: &mut (impl RngCore + CryptoRng)) -> Result<Self> {
        Ok(Self {
            ctx: ctx.clone(),
            d: ctx.random_scalar(rng)?,
        })
    }

    /// Wraps an existing scalar as a private key.
    ///
    /// Returns [`Error::InvalidEncoding`] unless `1 <= d < n`.
    pub fn from_scalar(ctx: &Arc<EccContext>, d: BigUint) -> Result<Self> {
        if d.is_zero() || &d >= ctx.n() {
            return Err(Error::InvalidEncoding);
        }
        Ok(Self { ctx: ctx.clone(), d })
    }

    /// Parses a private key from its 32-byte big-endian scalar encoding.
    pub fn from_bytes(ctx: &Arc<EccContext>, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != COORD_LEN {
            return Err(Error::InvalidEncoding);
        }
        Self::from_scalar(ctx, BigUint::from_bytes_be(bytes))
    }

    /// The context this key was generated under.
    pub fn context(&self) -> &Arc<EccContext> {
        &self.ctx
    }

    /// The secret scalar `d`.
    pub fn scalar(&self) -> &BigUint {
        &self.d
    }

    /// Derives the corresponding public key `Q = d·G`.
    pub fn public_key(&self) -> PublicKey {
        let q = self.ctx.g().scalar_mul(&BigInt::from(self.d.clone()));
        PublicKey {
            ctx: self.ctx.clone(),
            q,
        }
    }

    /// The 32-byte big-endian encoding of `d`.
    pub fn to_bytes(&self) -> [u8; COORD_LEN] {
        biguint_to_fixed_bytes(&self.d)
    }
}

/// A public key `Q = d·G`, bound to the context it was derived under.
///
/// `Q` is never the identity: [`PublicKey::from_compressed`] and
/// [`PublicKey::from_uncompressed`] reject encodings that would decode
/// to it, and [`PrivateKey::public_key`] can only produce the identity
/// if `d ≡ 0 (mod n)`, which [`PrivateKey::from_scalar`] already excludes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    ctx: Arc<EccContext>,
    q: Point,
}

impl PublicKey {
    /// The context this key belongs to.
    pub fn context(&self) -> &Arc<EccContext> {
        &self.ctx
    }

    /// The underlying curve point.
    pub fn point(&self) -> &Point {
        &self.q
    }

    /// Wraps a point as a public key, rejecting the identity.
    pub fn from_point(ctx: &Arc<EccContext>, q: Point) -> Result<Self> {
        if q.is_identity() {
            return Err(Error::InvalidEncoding);
        }
        Ok(Self { ctx: ctx.clone(), q })
    }

    /// Compressed SEC1 encoding: a `02`/`03` parity tag followed by the
    /// 32-byte big-endian `x` coordinate (spec §4.4, §6).
    pub fn to_compressed(&self) -> [u8; 1 + COORD_LEN] {
        let x = self.q.x().expect("public keys are never the identity");
        let y = self.q.y().expect("public keys are never the identity");
        let tag = if is_even(y.value()) { 0x02 } else { 0x03 };

        let mut out = [0u8; 1 + COORD_LEN];
        out[0] = tag;
        out[1..].copy_from_slice(&biguint_to_fixed_bytes(x.value()));
        out
    }

    /// Uncompressed SEC1 encoding: `04` followed by the 32-byte `x` and
    /// `y` coordinates.
    pub fn to_uncompressed(&self) -> [u8; 1 + 2 * COORD_LEN] {
        let x = self.q.x().expect("public keys are never the identity");
        let y = self.q.y().expect("public keys are never the identity");

        let mut out = [0u8; 1 + 2 * COORD_LEN];
        out[0] = 0x04;
        out[1..1 + COORD_LEN].copy_from_slice(&biguint_to_fixed_bytes(x.value()));
        out[1 + COORD_LEN..].copy_from_slice(&biguint_to_fixed_bytes(y.value()));
        out
    }

    /// Parses a compressed (33-byte) or uncompressed (65-byte) SEC1
    /// encoding, dispatching on length and leading tag byte.
    pub fn from_sec1(ctx: &Arc<EccContext>, bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            1 + COORD_LEN => Self::from_compressed(ctx, bytes),
            1 + 2 * COORD_LEN => Self::from_uncompressed(ctx, bytes),
            _ => Err(Error::InvalidEncoding),
        }
    }

    /// Parses a compressed SEC1 encoding.
    ///
    /// Returns [`Error::InvalidParity`] if `x` is on the curve but
    /// neither of its two `y` candidates has the parity the tag demands
    /// (which cannot happen for a correctly-formed encoding, but would
    /// indicate a non-canonical or corrupted one).
    pub fn from_compressed(ctx: &Arc<EccContext>, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 1 + COORD_LEN {
            return Err(Error::InvalidEncoding);
        }
        let tag = bytes[0];
        let want_even = match tag {
            0x02 => true,
            0x03 => false,
            _ => return Err(Error::InvalidEncoding),
        };

        let x_int = BigInt::from(BigUint::from_bytes_be(&bytes[1..]));
        let x = ctx.curve().field_element(&x_int);
        let candidates = ctx.curve().y_candidates(&x);

        let y = candidates
            .into_iter()
            .find(|y| is_even(y.value()) == want_even)
            .ok_or(Error::InvalidParity)?;

        let q = Point::affine(ctx.curve().clone(), x, y).ok_or(Error::InvalidEncoding)?;
        Self::from_point(ctx, q)
    }

    /// Parses an uncompressed SEC1 encoding.
    pub fn from_uncompressed(ctx: &Arc<EccContext>, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 1 + 2 * COORD_LEN || bytes[0] != 0x04 {
            return Err(Error::InvalidEncoding);
        }

        let x_int = BigInt::from(BigUint::from_bytes_be(&bytes[1..1 + COORD_LEN]));
        let y_int = BigInt::from(BigUint::from_bytes_be(&bytes[1 + COORD_LEN..]));
        let x = ctx.curve().field_element(&x_int);
        let y = ctx.curve().field_element(&y_int);

        let q = Point::affine(ctx.curve().clone(), x, y).ok_or(Error::InvalidEncoding)?;
        Self::from_point(ctx, q)
    }
}

fn is_even(n: &BigUint) -> bool {
    (n % 2u8).is_zero()
}

fn biguint_to_fixed_bytes(n: &BigUint) -> [u8; COORD_LEN] {
    let bytes = n.to_bytes_be();
    assert!(bytes.len() <= COORD_LEN, "value does not fit in the field width");
    let mut out = [0u8; COORD_LEN];
    out[COORD_LEN - bytes.len()..].copy_from_slice(&bytes);
    out
}
