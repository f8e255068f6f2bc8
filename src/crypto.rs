//! Cryptographic primitives backing the token codec.
//!
//! Per-token key derivation via HMAC-SHA256, AES-256-GCM sealing, and keyed
//! authentication over the assembled wire message. Every derived key is used
//! for exactly one encryption and one MAC.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::ConfigError;

type HmacSha256 = Hmac<Sha256>;

pub(crate) const SALT_LEN: usize = 16;
pub(crate) const MAC_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

/// The long-lived session secret.
///
/// Caller-supplied bytes are hashed into a fixed-width master key; the raw
/// secret is not retained. The master key never appears in any token and is
/// wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    master: [u8; KEY_LEN],
}

impl SecretKey {
    /// Builds a secret key from arbitrary caller-supplied bytes.
    ///
    /// An empty secret is a fatal misconfiguration, not a default.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, ConfigError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        let mut hasher = Sha256::new();
        hasher.update(secret);
        let mut master = [0u8; KEY_LEN];
        master.copy_from_slice(&hasher.finalize());
        Ok(Self { master })
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// Confirms the OS entropy source is usable before any token is issued.
///
/// A weak salt source would undermine the entire per-token key derivation, so
/// an unavailable CSPRNG fails construction outright instead of degrading
/// silently.
pub(crate) fn probe_entropy() -> Result<(), ConfigError> {
    let mut buf = [0u8; SALT_LEN];
    OsRng.try_fill_bytes(&mut buf).map_err(|err| {
        tracing::error!(%err, "OS entropy source unavailable; refusing to construct codec");
        ConfigError::EntropyUnavailable(err.to_string())
    })
}

/// Draws a fresh 128-bit salt. Never reused; transmitted in the clear.
pub(crate) fn fresh_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derives the single-use token key from the wire text of the salt and
/// expiration fields, keyed by the master secret.
///
/// Binding the expiration into the key means tampering with the plaintext
/// expiration field invalidates the key used to authenticate the rest of the
/// message, independently of the MAC check itself.
pub(crate) fn derive_key(secret: &SecretKey, salt_text: &str, expiry_text: &str) -> [u8; KEY_LEN] {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(&secret.master)
        .expect("HMAC accepts any key size");
    mac.update(salt_text.as_bytes());
    mac.update(b"~");
    mac.update(expiry_text.as_bytes());

    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&mac.finalize().into_bytes());
    key
}

/// Encrypts the payload under a derived key.
///
/// Returns `nonce || ciphertext`. The nonce is drawn fresh per call; since the
/// key itself is single-use, nonce reuse under a key cannot occur.
pub(crate) fn seal(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let ciphertext = cipher.encrypt(nonce, plaintext)?;

    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypts a `nonce || ciphertext` blob. Any malformation or authentication
/// failure yields `None`.
pub(crate) fn open(key: &[u8; KEY_LEN], blob: &[u8]) -> Option<Vec<u8>> {
    if blob.len() < NONCE_LEN {
        return None;
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    cipher.decrypt(nonce, ciphertext).ok()
}

/// Computes the keyed authentication code over the wire message.
pub(crate) fn sign(key: &[u8; KEY_LEN], message: &[u8]) -> [u8; MAC_LEN] {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key).expect("HMAC accepts any key size");
    mac.update(message);

    let mut tag = [0u8; MAC_LEN];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    tag
}

/// Verifies an authentication code in constant time.
pub(crate) fn verify(key: &[u8; KEY_LEN], message: &[u8], tag: &[u8]) -> bool {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key).expect("HMAC accepts any key size");
    mac.update(message);
    mac.verify_slice(tag).is_ok()
}
