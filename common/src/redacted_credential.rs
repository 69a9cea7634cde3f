//! Credential wrapper that keeps the account key out of logs.

use crate::RedactError;

use std::fmt;

use serde::ser::Error;
use zeroize::Zeroize;

/// The account key sent with every fetch.
///
/// `Debug` and `Display` never show the value, the buffer is zeroized on drop
/// and serde serialization is refused. Callers that really need the text
/// (request headers, the status line shown to the key's owner) go through
/// [`RedactedCredential::as_str`].
#[derive(Clone, Default)]
pub struct RedactedCredential {
    inner: String,
}

impl RedactedCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self { inner: key.into() }
    }

    /// Raw key value, for the request header and the status line only.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Key length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Exact textual comparison with another key.
    pub fn matches(&self, other: &RedactedCredential) -> bool {
        self.inner == other.inner
    }
}

impl From<&str> for RedactedCredential {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for RedactedCredential {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl fmt::Debug for RedactedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedCredential([REDACTED], {} chars)", self.inner.len())
    }
}

impl fmt::Display for RedactedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED CREDENTIAL]")
    }
}

impl Drop for RedactedCredential {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl serde::Serialize for RedactedCredential {
    #[track_caller]
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::refused("RedactedCredential")))
    }
}
