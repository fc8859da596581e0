//! Hybrid public-key encryption: ephemeral ECDH + HKDF-Expand + AES-256-GCM.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use hkdf::Hkdf;
use rand_core::{CryptoRng, RngCore};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::ecdh::shared_secret;
use crate::error::{Error, Result};
use crate::keys::{PrivateKey, PublicKey};

/// Literal HKDF info string, load-bearing for interoperability with
/// existing ciphertext.
const HKDF_INFO: &[u8] = b"becc hybrid file encryption v1";

const EPHEMERAL_PUB_LEN: usize = 33;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

/// Encrypts `plaintext` for `recipient`, returning the envelope
/// `ePub_compressed(33) ∥ nonce(12) ∥ ciphertext+tag` (spec §4.7).
pub fn encrypt(
    recipient: &PublicKey,
    plaintext: &[u8],
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<Vec<u8>> {
    let ephemeral = PrivateKey::generate(recipient.context(), rng)?;
    let ephemeral_pub = ephemeral.public_key();

    let secret = shared_secret(&ephemeral, recipient);
    let (key, nonce) = derive_key_and_nonce(&secret);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| Error::AeadFailure)?;

    let mut out = Vec::with_capacity(EPHEMERAL_PUB_LEN + NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&ephemeral_pub.to_compressed());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypts a `blob` produced by [`encrypt`] using the recipient's
/// private key.
///
/// Recomputes the nonce from the shared secret and requires it to match
/// the wire nonce before attempting decryption (spec §4.7, §9 "Open
/// question — nonce redundancy"); a mismatch is reported as
/// [`Error::NonceMismatch`] rather than silently re-deriving.
pub fn decrypt(recipient: &PrivateKey, blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < EPHEMERAL_PUB_LEN + NONCE_LEN {
        return Err(Error::InvalidEncoding);
    }

    let ephemeral_pub_bytes = &blob[..EPHEMERAL_PUB_LEN];
    let wire_nonce = &blob[EPHEMERAL_PUB_LEN..EPHEMERAL_PUB_LEN + NONCE_LEN];
    let ciphertext = &blob[EPHEMERAL_PUB_LEN + NONCE_LEN..];

    let ephemeral_pub = PublicKey::from_compressed(recipient.context(), ephemeral_pub_bytes)?;
    let secret = shared_secret(recipient, &ephemeral_pub);
    let (key, nonce) = derive_key_and_nonce(&secret);

    if nonce != wire_nonce {
        return Err(Error::NonceMismatch);
    }

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
    cipher
        .decrypt(Nonce::from_slice(&nonce), ciphertext)
        .map_err(|_| Error::AeadFailure)
}

/// `HKDF-Expand(SHA-256, secret, info, L=44)` split into a 32-byte AES
/// key and a 12-byte nonce, with no salt/extract step: the shared secret
/// is used directly as the pseudorandom key (spec §4.7).
fn derive_key_and_nonce(secret: &[u8]) -> ([u8; KEY_LEN], [u8; NONCE_LEN]) {
    let hkdf = Hkdf::<Sha256>::from_prk(secret).expect("33-byte ECDH secret is long enough for a PRK");
    let mut okm = [0u8; KEY_LEN + NONCE_LEN];
    hkdf.expand(HKDF_INFO, &mut okm)
        .expect("okm length fits within SHA-256's 255*32-byte HKDF-Expand limit");

    let mut key = [0u8; KEY_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    key.copy_from_slice(&okm[..KEY_LEN]);
    nonce.copy_from_slice(&okm[KEY_LEN..]);
    okm.zeroize();
    (key, nonce)
}
