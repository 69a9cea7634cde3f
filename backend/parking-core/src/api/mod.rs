//! Authenticated fetch engine.
//!
//! One request is in flight at a time. [`FetchEngine::begin_fetch`] hands the
//! request to a background tokio task that reports back over a oneshot
//! channel; [`FetchEngine::await_response`] waits on that channel for at most
//! the configured timeout. A timed-out request is never cancelled: its
//! receiver is dropped and the eventual result is discarded by the task.
//!
//! # Retry policy
//! - Empty result (timeout, transport failure, blank body): retry
//! - 503 and unrecognised statuses: logged, retry
//! - 401: abort immediately, an invalid key cannot become valid by retrying
//! - Key not representable as a header value: abort before anything is sent
//! - Budget exhausted: [`ApiError::EmptyResponse`]

pub mod attempt;
pub mod key_store;

pub use attempt::{AttemptOutcome, FetchAttempt};
pub use key_store::{AuthenticationStatus, KeyStore};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::storage::{self, FileStorage};

use attempt::RetryState;

use common::{ErrorLocation, HttpStatusCode, RedactedCredential, StatusClass};

use std::path::Path;
use std::time::Duration;

use log::{debug, info, trace, warn};
use reqwest::Client;
use reqwest::header::{HeaderName, HeaderValue};
use tokio::sync::oneshot;
use url::Url;

/// Upper bound on how long a superseded background request may linger.
const REQUEST_LIFETIME: Duration = Duration::from_secs(30);

type RawResponse = Result<(HttpStatusCode, String), ApiError>;

pub struct FetchEngine {
    client: Client,
    endpoint: Url,
    auth_header: HeaderName,
    timeout: Duration,
    max_attempts: u32,
    default_key: RedactedCredential,
    key_store: KeyStore,
    storage: FileStorage,
    pending: Option<oneshot::Receiver<RawResponse>>,
    attempts: Vec<FetchAttempt>,
}

impl FetchEngine {
    /// Build an engine for the configured endpoint, persisting bodies through `storage`.
    ///
    /// # Errors
    /// [`ApiError::Client`] if the endpoint, header name or HTTP client is unusable.
    pub fn new(config: &ApiConfig, storage: FileStorage) -> Result<Self, ApiError> {
        let endpoint = Url::parse(&config.base_url).map_err(|e| ApiError::Client {
            message: format!("invalid endpoint {}: {e}", config.base_url),
            location: ErrorLocation::caller(),
        })?;

        let auth_header =
            HeaderName::from_bytes(config.auth_header.as_bytes()).map_err(|e| ApiError::Client {
                message: format!("invalid header name {}: {e}", config.auth_header),
                location: ErrorLocation::caller(),
            })?;

        let client = Client::builder()
            .timeout(REQUEST_LIFETIME)
            .build()
            .map_err(|e| ApiError::Client {
                message: e.to_string(),
                location: ErrorLocation::caller(),
            })?;

        Ok(Self {
            client,
            endpoint,
            auth_header,
            timeout: config.timeout(),
            max_attempts: config.fetch_attempts.max(1),
            default_key: RedactedCredential::new(config.default_api_key.clone()),
            key_store: KeyStore::new(),
            storage,
            pending: None,
            attempts: Vec::new(),
        })
    }

    pub fn key_store(&self) -> &KeyStore {
        &self.key_store
    }

    pub fn status(&self) -> AuthenticationStatus {
        self.key_store.status()
    }

    pub fn api_key(&self) -> &str {
        self.key_store.credential().as_str()
    }

    pub fn status_message(&self) -> String {
        self.key_store.status_message()
    }

    /// Attempts made by the most recent `fetch_with_retry`.
    pub fn attempts(&self) -> &[FetchAttempt] {
        &self.attempts
    }

    pub fn has_pending_request(&self) -> bool {
        self.pending.is_some()
    }

    pub fn data_path(&self) -> std::path::PathBuf {
        self.storage.path()
    }

    /// Dispatch a GET with the current key on a background task.
    ///
    /// Replaces any request already in flight; the superseded task keeps
    /// running but nobody listens to it any more. A key that cannot be sent
    /// as a header value resolves the channel with
    /// [`ApiError::InvalidCredential`] without spawning. Must be called from
    /// within a tokio runtime.
    pub fn begin_fetch(&mut self) {
        let (sender, receiver) = oneshot::channel::<RawResponse>();

        match HeaderValue::from_str(self.key_store.credential().as_str()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                let request = self
                    .client
                    .get(self.endpoint.clone())
                    .header(self.auth_header.clone(), value);

                tokio::spawn(async move {
                    let result = match request.send().await {
                        Ok(response) => {
                            let status = HttpStatusCode(response.status().as_u16());
                            match response.text().await {
                                Ok(body) => Ok((status, body)),
                                Err(e) => Err(ApiError::from(e)),
                            }
                        }
                        Err(e) => Err(ApiError::from(e)),
                    };

                    if sender.send(result).is_err() {
                        trace!("Discarding result of superseded fetch");
                    }
                });
                debug!("Fetch dispatched to {}", self.endpoint);
            }
            Err(_) => {
                warn!("API key is not a valid header value, nothing sent");
                if sender.send(Err(ApiError::invalid_credential())).is_err() {
                    trace!("Receiver gone before the key was rejected");
                }
            }
        }

        if self.pending.replace(receiver).is_some() {
            debug!("Superseded an in-flight fetch");
        }
    }

    /// Wait for the in-flight request, at most the configured timeout.
    ///
    /// Timeouts and transport failures are reported through the log and the
    /// attempt record, and yield an empty string.
    ///
    /// # Errors
    /// - [`ApiError::Unauthorized`] on 401
    /// - [`ApiError::ServerNotReady`] on 503
    /// - [`ApiError::UnknownResponse`] on any other non-200 status
    /// - [`ApiError::InvalidCredential`] if the key could not be sent
    pub async fn await_response(&mut self) -> Result<String, ApiError> {
        let Some(pending) = self.pending.take() else {
            return self.empty_attempt(ApiError::transport("no request in flight"));
        };

        match tokio::time::timeout(self.timeout, pending).await {
            Err(_) => {
                let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                self.empty_attempt(ApiError::timeout(timeout_ms))
            }
            Ok(Err(_)) => {
                self.empty_attempt(ApiError::transport("fetch task ended without a result"))
            }
            Ok(Ok(Err(error))) if error.is_retryable() => self.empty_attempt(error),
            Ok(Ok(Err(error))) => {
                self.record(AttemptOutcome::from_error(&error));
                Err(error)
            }
            Ok(Ok(Ok((status, body)))) => {
                if status.class() == StatusClass::Valid {
                    self.record(AttemptOutcome::Body);
                } else {
                    self.record(AttemptOutcome::Http(status));
                }
                self.classify(status, body)
            }
        }
    }

    /// Log and record a failure that counts as an empty result.
    fn empty_attempt(&mut self, error: ApiError) -> Result<String, ApiError> {
        warn!("{} ({}): {error}", error.user_message(), error.error_category());
        self.record(AttemptOutcome::from_error(&error));
        Ok(String::new())
    }

    fn classify(&mut self, status: HttpStatusCode, body: String) -> Result<String, ApiError> {
        match status.class() {
            StatusClass::Valid => {
                self.key_store.mark_valid();
                Ok(body)
            }
            StatusClass::Unauthorized => {
                self.key_store.mark_rejected();
                Err(ApiError::from_status(status))
            }
            StatusClass::ServerNotReady | StatusClass::Unknown => Err(ApiError::from_status(status)),
        }
    }

    fn record(&mut self, outcome: AttemptOutcome) {
        let index = self.attempts.len() as u32 + 1;
        self.attempts.push(FetchAttempt { index, outcome });
    }

    /// Run the retry loop and persist the body on success.
    ///
    /// Starts a request if none is in flight.
    ///
    /// # Errors
    /// - [`ApiError::Unauthorized`] as soon as a 401 is seen
    /// - [`ApiError::EmptyResponse`] when the attempt budget runs out
    /// - [`ApiError::FileWrite`] when the body cannot be saved
    pub async fn fetch_with_retry(&mut self) -> Result<String, ApiError> {
        self.attempts.clear();
        if self.pending.is_none() {
            self.begin_fetch();
        }

        let mut state = RetryState::Attempting(1);
        loop {
            state = match state {
                RetryState::Attempting(attempt) => self.attempt(attempt).await,
                RetryState::Succeeded(body) => {
                    self.storage
                        .write_data_to_file(&body)
                        .map_err(ApiError::file_write)?;
                    info!(
                        "Fetched {} bytes after {} attempt(s)",
                        body.len(),
                        self.attempts.len()
                    );
                    return Ok(body);
                }
                RetryState::Aborted(error) => {
                    warn!("Fetch aborted ({}): {}", error.error_category(), error);
                    return Err(error);
                }
                RetryState::Exhausted(attempts) => {
                    warn!("Fetch gave up after {attempts} attempt(s)");
                    return Err(ApiError::empty_response(attempts));
                }
            };
        }
    }

    async fn attempt(&mut self, attempt: u32) -> RetryState {
        match self.await_response().await {
            Ok(body) => {
                let body = body.trim();
                if !body.is_empty() {
                    return RetryState::Succeeded(body.to_string());
                }
            }
            Err(error) if !error.is_retryable() => return RetryState::Aborted(error),
            Err(error) => warn!("{}", error.user_message()),
        }

        if attempt < self.max_attempts {
            debug!("Attempt {attempt}/{} came back empty, retrying", self.max_attempts);
            self.begin_fetch();
            RetryState::Attempting(attempt + 1)
        } else {
            RetryState::Exhausted(attempt)
        }
    }

    /// Fetch fresh data with the current key (the `update` command).
    pub async fn refresh(&mut self) -> Result<String, ApiError> {
        self.begin_fetch();
        self.fetch_with_retry().await
    }

    /// Validate `candidate` by fetching with it; keep it only if the fetch succeeds.
    ///
    /// A candidate that cannot be sent as a header value is refused before
    /// any state changes. On failure the previous key is restored; its status
    /// is restored too, except after a 401, which leaves `Fail`.
    ///
    /// # Errors
    /// - [`ApiError::InvalidCredential`] if the candidate cannot be sent
    /// - the fetch error, after the previous key has been restored
    pub async fn try_authenticate(&mut self, candidate: &str) -> Result<(), ApiError> {
        if HeaderValue::from_str(candidate).is_err() {
            warn!("Refusing API key that is not a valid header value");
            return Err(ApiError::invalid_credential());
        }

        let candidate = RedactedCredential::from(candidate);
        let is_different = !self.key_store.credential().matches(&candidate);
        let is_default = candidate.matches(&self.default_key);
        let previous_status = self.key_store.status();
        let previous = self.key_store.replace_credential(candidate);

        self.begin_fetch();
        match self.fetch_with_retry().await {
            Ok(_) => {
                if is_different {
                    let status = if is_default {
                        AuthenticationStatus::Default
                    } else {
                        AuthenticationStatus::Success
                    };
                    self.key_store.set_status(status);
                }
                info!("API key accepted ({} chars)", self.key_store.credential().len());
                Ok(())
            }
            Err(error) => {
                warn!("API key not accepted, restoring previous key: {error}");
                self.key_store.replace_credential(previous);
                if !matches!(error, ApiError::Unauthorized { .. }) {
                    self.key_store.set_status(previous_status);
                }
                Err(error)
            }
        }
    }

    /// Boolean form of [`FetchEngine::try_authenticate`].
    pub async fn authenticate(&mut self, candidate: &str) -> bool {
        self.try_authenticate(candidate).await.is_ok()
    }

    /// Load the key stored in `directory/file`.
    ///
    /// # Errors
    /// - [`ApiError::NoFileFound`] if the file is missing or unreadable
    /// - [`ApiError::EmptySecretFile`] if it is blank; with `use_default_on_empty`
    ///   the default key is installed before the error is returned
    pub fn load_credential(
        &mut self,
        file: &str,
        directory: &Path,
        use_default_on_empty: bool,
    ) -> Result<(), ApiError> {
        let contents = match storage::read_string_from_text(file, directory) {
            Ok(contents) => contents,
            Err(error) => {
                debug!("Secret file unavailable: {error}");
                return Err(ApiError::no_file_found(error.path()));
            }
        };

        let key = contents.trim();
        if key.is_empty() {
            if use_default_on_empty {
                self.load_default_credential();
            }
            return Err(ApiError::empty_secret_file(directory.join(file)));
        }

        self.key_store
            .install(RedactedCredential::from(key), AuthenticationStatus::ApiChanged);
        info!("Loaded API key from {} ({} chars)", directory.join(file).display(), key.len());
        Ok(())
    }

    /// Fall back to the built-in key.
    pub fn load_default_credential(&mut self) {
        self.key_store
            .install(self.default_key.clone(), AuthenticationStatus::Default);
        info!("Using default API key");
    }
}
