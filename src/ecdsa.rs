//! ECDSA signing and verification, including RFC 6979 deterministic nonces.

use hmac::{Hmac, Mac};
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::keys::{PrivateKey, PublicKey};

type HmacSha256 = Hmac<Sha256>;

/// Width in bytes of a secp256k1 scalar or coordinate encoding.
const COORD_LEN: usize = 32;

/// An ECDSA signature `(r, s)` with `1 <= r, s < n` (spec §3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// The 64-byte `R(32) ∥ S(32)` big-endian encoding (spec §6).
    pub fn to_bytes(&self) -> [u8; 2 * COORD_LEN] {
        let mut out = [0u8; 2 * COORD_LEN];
        out[..COORD_LEN].copy_from_slice(&biguint_to_fixed_bytes(&self.r));
        out[COORD_LEN..].copy_from_slice(&biguint_to_fixed_bytes(&self.s));
        out
    }

    /// Parses a 64-byte `R(32) ∥ S(32)` encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 2 * COORD_LEN {
            return Err(Error::InvalidEncoding);
        }
        Ok(Self {
            r: BigUint::from_bytes_be(&bytes[..COORD_LEN]),
            s: BigUint::from_bytes_be(&bytes[COORD_LEN..]),
        })
    }

    /// The `r` component.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// The `s` component.
    pub fn s(&self) -> &BigUint {
        &self.s
    }
}

/// `z = int(H(m)) mod n`, truncating the hash to `bitlen(n)` bits first
/// when the hash is wider (spec §4.5). For SHA-256 with the 256-bit
/// secp256k1 order this truncation is a no-op.
fn hash_to_scalar(message: &[u8], n: &BigUint) -> BigUint {
    let digest = Sha256::digest(message);
    let qlen = n.bits();
    let z = BigUint::from_bytes_be(&digest);
    let hlen_bits = (digest.len() as u64) * 8;
    if hlen_bits > qlen {
        z >> (hlen_bits - qlen)
    } else {
        z
    }
}

fn apply_low_s(s: BigUint, n: &BigUint, low_s: bool) -> BigUint {
    if low_s && s > n / 2u8 {
        n - s
    } else {
        s
    }
}

/// Signs `message` with a fresh random nonce per spec §4.5.
///
/// Retries internally on the (vanishingly unlikely) nonce failure cases;
/// this cannot loop forever for a correctly-formed context. Fails
/// upward with [`Error::RandomnessFailure`] if the CSPRNG fails.
pub fn sign(
    sk: &PrivateKey,
    message: &[u8],
    low_s: bool,
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<Signature> {
    let ctx = sk.context();
    let n = ctx.n();
    let z = hash_to_scalar(message, n);

    loop {
        let k = ctx.random_scalar(rng)?;
        let r_point = ctx.g().scalar_mul(&BigInt::from(k.clone()));
        if r_point.is_identity() {
            continue;
        }
        let r = r_point.x().expect("non-identity point has an x coordinate").value() % n;
        if r.is_zero() {
            continue;
        }

        let k_inv = match mod_inverse_unsigned(&k, n) {
            Some(v) => v,
            None => continue,
        };
        let s = (&k_inv * (&z + &r * sk.scalar())) % n;
        if s.is_zero() {
            continue;
        }

        return Ok(Signature {
            r,
            s: apply_low_s(s, n, low_s),
        });
    }
}

/// Signs `message` deterministically per RFC 6979, using the procedure in
/// spec §4.5 bit-for-bit.
pub fn sign_deterministic(sk: &PrivateKey, message: &[u8], low_s: bool) -> Signature {
    let ctx = sk.context();
    let n = ctx.n();
    let z = hash_to_scalar(message, n);

    let rlen = ((n.bits() + 7) / 8) as usize;
    let int2octets_d = biguint_to_width(sk.scalar(), rlen);
    let bits2octets_h = bits2octets(&z, n, rlen);

    let mut v = vec![0x01u8; 32];
    let mut k = vec![0x00u8; 32];

    k = hmac_sha256(&k, &[&v, &[0x00], &int2octets_d, &bits2octets_h]);
    v = hmac_sha256(&k, &[&v]);
    k = hmac_sha256(&k, &[&v, &[0x01], &int2octets_d, &bits2octets_h]);
    v = hmac_sha256(&k, &[&v]);

    loop {
        let mut t = Vec::with_capacity(rlen);
        while t.len() < rlen {
            v = hmac_sha256(&k, &[&v]);
            t.extend_from_slice(&v);
        }

        let candidate_k = bits_to_int(&t, n.bits());

        let valid = (|| {
            if candidate_k.is_zero() || &candidate_k >= n {
                return None;
            }
            let r_point = ctx.g().scalar_mul(&BigInt::from(candidate_k.clone()));
            if r_point.is_identity() {
                return None;
            }
            let r = r_point.x().expect("non-identity point has an x coordinate").value() % n;
            if r.is_zero() {
                return None;
            }
            let k_inv = mod_inverse_unsigned(&candidate_k, n)?;
            let s = (&k_inv * (&z + &r * sk.scalar())) % n;
            if s.is_zero() {
                return None;
            }
            Some((r, s))
        })();

        if let Some((r, s)) = valid {
            return Signature {
                r,
                s: apply_low_s(s, n, low_s),
            };
        }

        k = hmac_sha256(&k, &[&v, &[0x00]]);
        v = hmac_sha256(&k, &[&v]);
    }
}

/// Verifies `signature` against `message` under `pk`, per spec §4.5.
///
/// Returns `false` — never an error — for every rejection reason;
/// signature verification is a pure boolean predicate (spec §7).
pub fn verify(pk: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    let ctx = pk.context();
    let n = ctx.n();

    if signature.r.is_zero() || &signature.r >= n || signature.s.is_zero() || &signature.s >= n {
        return false;
    }

    let z = hash_to_scalar(message, n);
    let w = match mod_inverse_unsigned(&signature.s, n) {
        Some(w) => w,
        None => return false,
    };

    let u1 = (&z * &w) % n;
    let u2 = (&signature.r * &w) % n;

    let point = ctx
        .g()
        .scalar_mul(&BigInt::from(u1))
        .add(&pk.point().scalar_mul(&BigInt::from(u2)));

    if point.is_identity() {
        return false;
    }

    (point.x().expect("non-identity point has an x coordinate").value() % n) == signature.r
}

/// `bits2octets` from RFC 6979: reduce the hash-derived integer `z`
/// modulo `n`, then left-pad to `rlen` bytes.
fn bits2octets(z: &BigUint, n: &BigUint, rlen: usize) -> Vec<u8> {
    biguint_to_width(&(z % n), rlen)
}

/// Takes the leftmost `qlen` bits of `t` as a big-endian integer.
fn bits_to_int(t: &[u8], qlen: u64) -> BigUint {
    let total_bits = (t.len() as u64) * 8;
    let value = BigUint::from_bytes_be(t);
    if total_bits > qlen {
        value >> (total_bits - qlen)
    } else {
        value
    }
}

fn hmac_sha256(key: &[u8], parts: &[&[u8]]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    for part in parts {
        mac.update(part);
    }
    mac.finalize().into_bytes().to_vec()
}

fn mod_inverse_unsigned(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    crate::field::mod_inverse(&BigInt::from(a.clone()), &BigInt::from(m.clone()))
        .map(|v| v.to_biguint().expect("mod_inverse result is reduced non-negative"))
}

fn biguint_to_fixed_bytes(n: &BigUint) -> [u8; COORD_LEN] {
    let bytes = biguint_to_width(n, COORD_LEN);
    let mut out = [0u8; COORD_LEN];
    out.copy_from_slice(&bytes);
    out
}

fn biguint_to_width(n: &BigUint, width: usize) -> Vec<u8> {
    let bytes = n.to_bytes_be();
    assert!(bytes.len() <= width, "value does not fit in the requested width");
    let mut out = vec![0u8; width];
    out[width - bytes.len()..].copy_from_slice(&bytes);
    out
}
