//! Stateless cookie session persistence.
//!
//! This crate implements server-side-storage-free sessions: all session state
//! is carried inside a single cookie value, produced by a codec that encrypts,
//! authenticates, and (optionally) expires the data. A token is fully
//! self-describing; no server-side record is needed to interpret it, so there
//! is nothing to replicate across nodes and nothing to clean up.
//!
//! The caller is responsible for cookie transport: read the `Cookie` header,
//! hand the value to [`TokenCodec::decode`], and write whatever
//! [`TokenCodec::encode`] returns into `Set-Cookie`. Decoding is fail-safe by
//! design — a tampered, expired, wrongly-keyed, or malformed token is
//! indistinguishable from no session at all.
//!
//! # Security
//! The secret key is the sole long-lived secret; compromising it voids the
//! confidentiality and authenticity of all past and future tokens. Two encodes
//! of identical data produce different tokens (fresh salt per encode), so
//! tokens cannot be compared or linked.
//!
//! An attacker who holds a valid, unexpired token can replay it until it
//! expires. That is a fundamental limitation of the cookie-only design, not a
//! protocol weakness: there is no server-side record to revoke.

mod codec;
mod config;
mod crypto;
mod error;
mod payload;
mod store;

/// Session data: string keys mapped to plain JSON values.
///
/// Plain values only, by construction; there is no way to smuggle an object
/// reference, callable, or resource handle through this type, and the decoder
/// never reconstructs anything but data.
pub type SessionData = serde_json::Map<String, serde_json::Value>;

pub use crate::codec::TokenCodec;
pub use crate::config::SessionConfig;
pub use crate::crypto::SecretKey;
pub use crate::error::{ConfigError, EncodeError};
pub use crate::store::{CookieTokenStorage, SessionStorage};
