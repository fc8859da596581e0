//! Hybrid encryption round-trip and tamper-detection (spec §8 vector 6).

use becc::context::EccContext;
use becc::error::Error;
use becc::hybrid::{decrypt, encrypt};
use becc::keys::PrivateKey;
use rand_core::OsRng;

#[test]
fn round_trip_recovers_plaintext() {
    let ctx = EccContext::secp256k1();
    let sk = PrivateKey::generate(&ctx, &mut OsRng).unwrap();
    let pk = sk.public_key();

    let plaintext = b"this is a test plaintext";
    let blob = encrypt(&pk, plaintext, &mut OsRng).unwrap();
    assert_eq!(decrypt(&sk, &blob).unwrap(), plaintext);
}

#[test]
fn each_encryption_uses_a_fresh_ephemeral_key() {
    let ctx = EccContext::secp256k1();
    let pk = PrivateKey::generate(&ctx, &mut OsRng).unwrap().public_key();

    let a = encrypt(&pk, b"same plaintext", &mut OsRng).unwrap();
    let b = encrypt(&pk, b"same plaintext", &mut OsRng).unwrap();
    assert_ne!(a, b);
}

#[test]
fn tampering_ciphertext_is_rejected() {
    let ctx = EccContext::secp256k1();
    let sk = PrivateKey::generate(&ctx, &mut OsRng).unwrap();
    let pk = sk.public_key();

    let mut blob = encrypt(&pk, b"this is a test plaintext", &mut OsRng).unwrap();
    let last = blob.len() - 1;
    blob[last] ^= 0x01;

    assert_eq!(decrypt(&sk, &blob).unwrap_err(), Error::AeadFailure);
}

#[test]
fn tampering_nonce_prefix_is_rejected() {
    let ctx = EccContext::secp256k1();
    let sk = PrivateKey::generate(&ctx, &mut OsRng).unwrap();
    let pk = sk.public_key();

    let mut blob = encrypt(&pk, b"this is a test plaintext", &mut OsRng).unwrap();
    blob[33] ^= 0x01; // first byte of the nonce field
    assert_eq!(decrypt(&sk, &blob).unwrap_err(), Error::NonceMismatch);
}

#[test]
fn truncated_blob_is_invalid_encoding() {
    let ctx = EccContext::secp256k1();
    let sk = PrivateKey::generate(&ctx, &mut OsRng).unwrap();
    assert_eq!(decrypt(&sk, &[0u8; 5]).unwrap_err(), Error::InvalidEncoding);
}
