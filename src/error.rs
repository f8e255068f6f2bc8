use std::io;

/// Fatal construction-time failures.
///
/// The codec refuses to construct rather than run with a missing secret or a
/// degraded entropy source.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("secret_key must not be empty")]
    EmptySecret,

    #[error("OS entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Hard errors surfaced by [`encode`](crate::TokenCodec::encode).
///
/// These indicate caller mistakes or local resource failures, never hostile
/// input. Decoding has no error type at all: every decode failure resolves to
/// empty session data.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("session data failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("payload compression failed: {0}")]
    Io(#[from] io::Error),

    #[error("cipher failure while sealing session payload")]
    Cipher,

    #[error("encoded cookie is {len} bytes, exceeding the {max} byte limit")]
    TooLarge { len: usize, max: usize },
}
