//! ECDSA signing/verification invariants and concrete vectors (spec §8).

use becc::context::EccContext;
use becc::ecdsa;
use becc::keys::PrivateKey;
use becc::Signature;
use hex_literal::hex;
use num_traits::Num;
use rand_core::OsRng;

fn test_key() -> PrivateKey {
    let ctx = EccContext::secp256k1();
    let d = num_bigint::BigUint::from_str_radix(
        "3ce3262f2fba436f7cc4ed0914a6471a2a73fb1accc5f2852951a483efeba817",
        16,
    )
    .unwrap();
    PrivateKey::from_scalar(&ctx, d).unwrap()
}

#[test]
fn random_sign_then_verify_round_trips() {
    let sk = test_key();
    let pk = sk.public_key();

    let sig = ecdsa::sign(&sk, b"djowigocpv", false, &mut OsRng).unwrap();
    assert!(ecdsa::verify(&pk, b"djowigocpv", &sig));
    assert!(!ecdsa::verify(&pk, b"djowigocpvx", &sig));
}

#[test]
fn deterministic_signing_is_reproducible_across_calls() {
    let sk = test_key();
    let a = ecdsa::sign_deterministic(&sk, b"djowigocpv", true);
    let b = ecdsa::sign_deterministic(&sk, b"djowigocpv", true);
    assert_eq!(a, b);
}

/// spec §8 vector 1: a fixed random-nonce signature on `"djowigocpv"` that
/// must verify, and must not verify against a tampered message
/// (`examples/original_source/ecc_test.go:13-18,172-189`).
#[test]
fn fixed_random_signature_matches_spec_vector_one() {
    let sk = test_key();
    let pk = sk.public_key();

    let r = hex!("7d843d8a81020f433906c1fcc7cddeeb15f647635c95861cdb86953ad08a6321");
    let s = hex!("bc1a4bf12a593c39b3067b8f4364a1132adacfbcf453f29ca0de7121541010bf");
    let mut bytes = [0u8; 64];
    bytes[..32].copy_from_slice(&r);
    bytes[32..].copy_from_slice(&s);
    let sig = Signature::from_bytes(&bytes).unwrap();

    assert!(ecdsa::verify(&pk, b"djowigocpv", &sig));
    assert!(!ecdsa::verify(&pk, b"djowigocpvx", &sig));
}

/// spec §8 vector 2: the low-s deterministic signature on `"djowigocpv"`
/// must match bit-exactly, `r` and `s` both
/// (`examples/original_source/ecc_test.go:172-173`).
#[test]
fn deterministic_signature_matches_spec_vector_two_bit_exactly() {
    let sk = test_key();
    let sig = ecdsa::sign_deterministic(&sk, b"djowigocpv", true);

    let r = hex!("7d843d8a81020f433906c1fcc7cddeeb15f647635c95861cdb86953ad08a6321");
    let s = hex!("43e5b40ed5a6c3c64cf98470bc9b5eeb8fd40d29baf4ad9f1ef3ed6b7c263082");
    let mut expected = [0u8; 64];
    expected[..32].copy_from_slice(&r);
    expected[32..].copy_from_slice(&s);

    assert_eq!(sig.to_bytes(), expected);
}

#[test]
fn low_s_keeps_s_at_most_half_order() {
    let sk = test_key();
    let sig = ecdsa::sign_deterministic(&sk, b"djowigocpv", true);
    assert!(sig.s() <= &(sk.context().n() / 2u8));
}

#[test]
fn malleable_counterpart_also_verifies() {
    let sk = test_key();
    let pk = sk.public_key();
    let sig = ecdsa::sign_deterministic(&sk, b"djowigocpv", false);

    let bytes = sig.to_bytes();
    let flipped_s = sk.context().n() - sig.s();
    let mut flipped_bytes = bytes;
    flipped_bytes[32..].copy_from_slice(&{
        let mut padded = [0u8; 32];
        let raw = flipped_s.to_bytes_be();
        padded[32 - raw.len()..].copy_from_slice(&raw);
        padded
    });
    let flipped = becc::Signature::from_bytes(&flipped_bytes).unwrap();

    assert!(ecdsa::verify(&pk, b"djowigocpv", &sig));
    assert!(ecdsa::verify(&pk, b"djowigocpv", &flipped));
}
