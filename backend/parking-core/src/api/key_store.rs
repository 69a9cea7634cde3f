//! The active account key and what the API last said about it.

use common::RedactedCredential;

/// Whether the active key has been validated against the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationStatus {
    /// Rejected by the API, or never validated.
    Fail,
    /// Accepted by the API.
    Success,
    /// Loaded from the secret file, not yet validated.
    ApiChanged,
    /// The built-in fallback key is active.
    Default,
}

/// Holds the credential the fetch engine sends.
///
/// Only [`crate::api::FetchEngine`] mutates a key store; everyone else reads
/// through the engine.
#[derive(Debug, Clone)]
pub struct KeyStore {
    credential: RedactedCredential,
    status: AuthenticationStatus,
}

impl KeyStore {
    pub fn new() -> Self {
        Self {
            credential: RedactedCredential::default(),
            status: AuthenticationStatus::Fail,
        }
    }

    pub fn credential(&self) -> &RedactedCredential {
        &self.credential
    }

    pub fn status(&self) -> AuthenticationStatus {
        self.status
    }

    pub(crate) fn install(&mut self, credential: RedactedCredential, status: AuthenticationStatus) {
        self.credential = credential;
        self.status = status;
    }

    /// Swap in `credential` without touching the status. Returns the previous key.
    pub(crate) fn replace_credential(&mut self, credential: RedactedCredential) -> RedactedCredential {
        std::mem::replace(&mut self.credential, credential)
    }

    pub(crate) fn set_status(&mut self, status: AuthenticationStatus) {
        self.status = status;
    }

    /// Status after a 200: a default key stays default, anything else is validated.
    pub(crate) fn mark_valid(&mut self) {
        if self.status != AuthenticationStatus::Default {
            self.status = AuthenticationStatus::Success;
        }
    }

    /// Status after a 401: a default key stays default, anything else failed.
    pub(crate) fn mark_rejected(&mut self) {
        if self.status != AuthenticationStatus::Default {
            self.status = AuthenticationStatus::Fail;
        }
    }

    /// Human-readable line describing the key and its status.
    pub fn status_message(&self) -> String {
        let key = self.credential.as_str();
        match self.status {
            AuthenticationStatus::Fail => {
                format!("You have not authenticated your API key. Your API key is {key}")
            }
            AuthenticationStatus::Success => format!(
                "You have authenticated your API key successfully. Your API key is {key}"
            ),
            AuthenticationStatus::ApiChanged => format!(
                "You have loaded your API key ({key}) but have not authenticated it! \
                 Use `update` command to authenticate."
            ),
            AuthenticationStatus::Default => String::from(
                "You have not authenticated your personal API key. Currently you have access \
                 to the API but you are using our default key!",
            ),
        }
    }
}

impl Default for KeyStore {
    fn default() -> Self {
        Self::new()
    }
}
