use time::Duration;

/// Codec configuration.
///
/// The secret key is deliberately not part of this value; it is passed
/// separately at construction so a config can be logged or compared without
/// touching key material.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub(crate) default_duration: Option<Duration>,
    pub(crate) max_cookie_bytes: usize,
    pub(crate) compress_over: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_duration: None,
            max_cookie_bytes: 4096,
            compress_over: 512,
        }
    }
}

impl SessionConfig {
    /// Expiration applied when the caller supplies no explicit expiry.
    /// An explicit expiry always wins over this default.
    #[must_use]
    pub fn with_default_duration(mut self, default_duration: Duration) -> Self {
        self.default_duration = Some(default_duration);
        self
    }

    #[must_use]
    pub fn without_default_duration(mut self) -> Self {
        self.default_duration = None;
        self
    }

    /// Hard ceiling on the finished token length. Browsers silently drop
    /// oversized cookies, so exceeding this is a hard encode error.
    #[must_use]
    pub fn with_max_cookie_bytes(mut self, max_cookie_bytes: usize) -> Self {
        self.max_cookie_bytes = max_cookie_bytes;
        self
    }

    /// Payload size above which the serializer attempts compression before
    /// encryption.
    #[must_use]
    pub fn with_compress_over(mut self, compress_over: usize) -> Self {
        self.compress_over = compress_over;
        self
    }
}
