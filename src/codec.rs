//! The secure cookie token codec.
//!
//! A token is four text-safe fields joined by `~`, a character outside both
//! the URL-safe base64 alphabet and the decimal digits:
//!
//! ```text
//! <salt_b64url>~<expiry_decimal_or_empty>~<ciphertext_b64url>~<mac_b64url>
//! ```
//!
//! Encoding derives a single-use key from a fresh salt, the expiration field,
//! and the long-lived secret, then encrypts the serialized session data and
//! authenticates the first three fields under that same key. Decoding verifies
//! each step in turn and resolves *any* failure to empty session data: the
//! input is attacker-controlled, and the caller must not be able to tell a
//! tampered token from an expired one from no session at all.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use time::{Duration, OffsetDateTime};

use crate::config::SessionConfig;
use crate::crypto::{self, SecretKey};
use crate::error::{ConfigError, EncodeError};
use crate::{SessionData, payload};

const SEP: char = '~';

/// Stateless encoder/decoder for self-contained session tokens.
///
/// Immutable after construction; safe to share across request-handling tasks
/// without locking.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    secret: SecretKey,
    config: SessionConfig,
}

impl TokenCodec {
    /// Builds a codec from a secret and configuration.
    ///
    /// Fails when the OS entropy source is unavailable: issuing tokens with a
    /// weak salt source would quietly void the per-token key guarantee.
    pub fn new(secret: SecretKey, config: SessionConfig) -> Result<Self, ConfigError> {
        crypto::probe_entropy()?;
        Ok(Self { secret, config })
    }

    /// Encodes session data into a token string suitable for direct use as a
    /// cookie value.
    ///
    /// Expiration is resolved in priority order: an explicit expiry from the
    /// caller, then the configured default duration, then none. An explicit
    /// expiry already in the past clears the data before encoding, so a stale
    /// cookie value never carries residual private data.
    pub fn encode(
        &self,
        data: &SessionData,
        explicit_expiry: Option<OffsetDateTime>,
    ) -> Result<String, EncodeError> {
        let now = OffsetDateTime::now_utc();

        let expiry = match explicit_expiry {
            Some(at) => Some(at),
            None => self.config.default_duration.map(|d| now + d),
        };

        let cleared;
        let data = match explicit_expiry {
            Some(at) if at <= now => {
                cleared = SessionData::new();
                &cleared
            }
            _ => data,
        };

        let expiry_field = match expiry {
            Some(at) => at.unix_timestamp().to_string(),
            None => String::new(),
        };
        let salt_field = URL_SAFE_NO_PAD.encode(crypto::fresh_salt());
        let key = crypto::derive_key(&self.secret, &salt_field, &expiry_field);

        let plaintext = payload::encode(data, self.config.compress_over)?;
        let blob = crypto::seal(&key, &plaintext).map_err(|_| EncodeError::Cipher)?;

        let mut token = format!(
            "{salt_field}{SEP}{expiry_field}{SEP}{}",
            URL_SAFE_NO_PAD.encode(blob)
        );
        let mac = crypto::sign(&key, token.as_bytes());
        token.push(SEP);
        token.push_str(&URL_SAFE_NO_PAD.encode(mac));

        if token.len() > self.config.max_cookie_bytes {
            return Err(EncodeError::TooLarge {
                len: token.len(),
                max: self.config.max_cookie_bytes,
            });
        }

        Ok(token)
    }

    /// Recovers session data from a token.
    ///
    /// Never fails: a missing, malformed, tampered, wrongly-keyed, or expired
    /// token all decode to empty session data.
    pub fn decode(&self, token: &str) -> SessionData {
        if token.is_empty() {
            // No prior session; a legitimate, common case.
            return SessionData::new();
        }

        self.try_decode(token).unwrap_or_default()
    }

    /// Produces a token that always decodes to empty data and whose past
    /// expiration causes the browser to drop the cookie.
    pub fn destroy(&self) -> Result<String, EncodeError> {
        let past = OffsetDateTime::now_utc() - Duration::seconds(1);
        self.encode(&SessionData::new(), Some(past))
    }

    fn try_decode(&self, token: &str) -> Option<SessionData> {
        let mut fields = token.split(SEP);
        let (Some(salt), Some(expiry), Some(ciphertext), Some(mac), None) = (
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
        ) else {
            tracing::warn!("session token has wrong field count; treating as no session");
            return None;
        };

        // The key is derived from the fields exactly as received; if either
        // was tampered with, the derived key is wrong and the MAC check below
        // fails.
        let key = crypto::derive_key(&self.secret, salt, expiry);

        let signed = &token[..token.len() - mac.len() - 1];
        let tag = URL_SAFE_NO_PAD.decode(mac).ok()?;
        if !crypto::verify(&key, signed.as_bytes(), &tag) {
            tracing::warn!("session token failed authentication; treating as no session");
            return None;
        }

        if !expiry.is_empty() {
            // Authenticated, so this parses unless we produced a bad token.
            let at = expiry.parse::<i64>().ok()?;
            if at <= OffsetDateTime::now_utc().unix_timestamp() {
                tracing::debug!("session token expired; treating as no session");
                return None;
            }
        }

        let blob = URL_SAFE_NO_PAD.decode(ciphertext).ok()?;
        let plaintext = crypto::open(&key, &blob)?;
        match payload::decode(&plaintext) {
            Ok(data) => Some(data),
            Err(err) => {
                // MAC already verified, so this is a bug rather than an
                // attack; the fail-safe policy applies all the same.
                tracing::warn!(%err, "authenticated session payload failed to decode");
                None
            }
        }
    }
}
