//! Named curve parameters bundled with a base point and order.

use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};

use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::point::Point;

/// A curve together with its conventional base point `G` and order `n`.
///
/// spec §6 fixes secp256k1 as the only registered curve; `EccContext` is
/// general enough to hold others, but [`EccContext::secp256k1`] is the
/// only constructor this crate exposes. Callers share one context behind
/// an `Arc` rather than rebuilding it per key (spec §3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EccContext {
    curve: Arc<Curve>,
    g: Point,
    n: BigUint,
}

impl EccContext {
    fn new(p: BigUint, a: BigInt, b: BigInt, gx: BigInt, gy: BigInt, n: BigUint) -> Self {
        let curve = Arc::new(Curve::new(&a, &b, &p).expect("hardcoded curve parameters are valid"));
        let gx = curve.field_element(&gx);
        let gy = curve.field_element(&gy);
        let g = Point::affine(curve.clone(), gx, gy).expect("hardcoded base point lies on the curve");
        Self { curve, g, n }
    }

    /// The secp256k1 curve (spec §6): `y² = x³ + 7 (mod p)`, cofactor `h = 1`.
    pub fn secp256k1() -> Arc<Self> {
        let p = hex_to_biguint("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F");
        let gx = hex_to_bigint("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");
        let gy = hex_to_bigint("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8");
        let n = hex_to_biguint("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");

        Arc::new(Self::new(p, BigInt::zero(), BigInt::from(7), gx, gy, n))
    }

    /// The curve this context operates over.
    pub fn curve(&self) -> &Arc<Curve> {
        &self.curve
    }

    /// The conventional generator `G`.
    pub fn g(&self) -> &Point {
        &self.g
    }

    /// The order `n` of `G` (and, since `h = 1`, of the whole group).
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Draws a uniformly random scalar `d` with `1 <= d < n`, as spec §4.4
    /// describes: draw a value from `[0, n - 1)` and add 1, failing
    /// upward if the CSPRNG fails.
    pub fn random_scalar(&self, rng: &mut (impl RngCore + CryptoRng)) -> Result<BigUint> {
        Ok(random_below(&(&self.n - BigUint::one()), rng)? + BigUint::one())
    }
}

/// Draws a value uniformly from `[0, bound)` by rejection sampling.
///
/// Panics if `bound` is zero. Returns [`Error::RandomnessFailure`] if the
/// underlying RNG reports an error.
fn random_below(bound: &BigUint, rng: &mut impl RngCore) -> Result<BigUint> {
    assert!(!bound.is_zero(), "sampling range must be non-empty");

    let bits = bound.bits();
    let byte_len = ((bits + 7) / 8) as usize;
    let excess_bits = (byte_len as u64 * 8) - bits;
    let mask = if excess_bits == 0 { 0xFFu8 } else { 0xFFu8 >> excess_bits };

    loop {
        let mut buf = vec![0u8; byte_len];
        rng.try_fill_bytes(&mut buf).map_err(|_| Error::RandomnessFailure)?;
        if let Some(first) = buf.first_mut() {
            *first &= mask;
        }
        let candidate = BigUint::from_bytes_be(&buf);
        if candidate < *bound {
            return Ok(candidate);
        }
    }
}

fn hex_to_biguint(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).expect("hardcoded hex constant is valid")
}

fn hex_to_bigint(s: &str) -> BigInt {
    BigInt::parse_bytes(s.as_bytes(), 16).expect("hardcoded hex constant is valid")
}
