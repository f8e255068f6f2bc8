//! Pluggable session persistence strategies.
//!
//! Where session data lives is a capability chosen at construction time: the
//! cookie token codec is one strategy, a server-side store returning an opaque
//! id would be another. Callers program against [`SessionStorage`] and select
//! a concrete implementation explicitly.

use std::fmt::Debug;

use time::OffsetDateTime;

use crate::SessionData;
use crate::codec::TokenCodec;
use crate::config::SessionConfig;
use crate::crypto::SecretKey;
use crate::error::{ConfigError, EncodeError};

/// A strategy for persisting session data across requests.
///
/// `store` returns the cookie value to emit, `load` recovers data from the
/// value a client sent back, and `destroy` returns the value that renders the
/// session permanently unusable.
pub trait SessionStorage: Debug + Send + Sync {
    fn store(
        &self,
        data: &SessionData,
        expires_at: Option<OffsetDateTime>,
    ) -> Result<String, EncodeError>;

    fn load(&self, value: &str) -> SessionData;

    fn destroy(&self) -> Result<String, EncodeError>;
}

/// The cookie-only strategy: the entire session lives inside the cookie value
/// as a self-contained encrypted token. No server-side record exists, so there
/// is nothing to enumerate and nothing to coordinate across nodes.
#[derive(Debug, Clone)]
pub struct CookieTokenStorage {
    codec: TokenCodec,
}

impl CookieTokenStorage {
    pub fn new(secret: SecretKey, config: SessionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            codec: TokenCodec::new(secret, config)?,
        })
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }
}

impl SessionStorage for CookieTokenStorage {
    fn store(
        &self,
        data: &SessionData,
        expires_at: Option<OffsetDateTime>,
    ) -> Result<String, EncodeError> {
        self.codec.encode(data, expires_at)
    }

    fn load(&self, value: &str) -> SessionData {
        self.codec.decode(value)
    }

    fn destroy(&self) -> Result<String, EncodeError> {
        self.codec.destroy()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn storage() -> CookieTokenStorage {
        CookieTokenStorage::new(
            SecretKey::new("test-secret").expect("secret key builds successfully"),
            SessionConfig::default(),
        )
        .expect("storage builds successfully")
    }

    #[test]
    fn storage_roundtrips_through_the_trait() {
        let storage = storage();
        let storage: &dyn SessionStorage = &storage;

        let mut data = SessionData::new();
        data.insert("user".into(), json!("alice"));

        let value = storage
            .store(&data, None)
            .expect("session stores successfully");
        assert_eq!(storage.load(&value), data);
    }

    #[test]
    fn destroyed_session_loads_empty() {
        let storage = storage();
        let value = storage.destroy().expect("session destroys successfully");

        assert!(storage.load(&value).is_empty());
    }
}
