//! Elliptic-Curve Diffie–Hellman shared-secret derivation.

use num_bigint::BigInt;

use crate::keys::{PrivateKey, PublicKey};

/// Computes the ECDH shared secret `S = d·Q`, returned as its 33-byte
/// compressed-point encoding (spec §4.6).
///
/// The library standardizes on the compressed-point representation
/// rather than a raw x-coordinate; callers who need the latter can strip
/// the leading parity byte themselves.
///
/// # Panics
///
/// Panics if `sk` and `pk` belong to different curves, via the same
/// cross-curve assertion [`crate::point::Point::add`] enforces.
pub fn shared_secret(sk: &PrivateKey, pk: &PublicKey) -> [u8; 33] {
    let s = pk.point().scalar_mul(&BigInt::from(sk.scalar().clone()));
    let shared = PublicKey::from_point(sk.context(), s).expect(
        "d*Q is the identity only if d ≡ 0 (mod n), which PrivateKey's invariant excludes",
    );
    shared.to_compressed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EccContext;
    use rand_core::OsRng;

    #[test]
    fn shared_secret_is_symmetric() {
        let ctx = EccContext::secp256k1();
        let a = PrivateKey::generate(&ctx, &mut OsRng).unwrap();
        let b = PrivateKey::generate(&ctx, &mut OsRng).unwrap();

        let from_a = shared_secret(&a, &b.public_key());
        let from_b = shared_secret(&b, &a.public_key());
        assert_eq!(from_a, from_b);
    }

    #[test]
    fn shared_secret_is_compressed_point_of_peer_scaled_by_self() {
        let ctx = EccContext::secp256k1();
        let a = PrivateKey::generate(&ctx, &mut OsRng).unwrap();
        let b_pub = PrivateKey::generate(&ctx, &mut OsRng).unwrap().public_key();

        let secret = shared_secret(&a, &b_pub);
        assert_eq!(secret.len(), 33);
        assert!(secret[0] == 0x02 || secret[0] == 0x03);
    }
}
