//! HTTP client with cookie-based session handling.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue, SET_COOKIE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, trace, warn};

use myplant_core::error::InvalidInputError;
use myplant_core::{BaseUrl, Credential, Credentials, Error, Result, User};
use myplant_store::{CredentialStore, StoreConfig};

use crate::endpoints::{self, LoginData, LoginResponse};

/// Settings for constructing a [`MyPlantClient`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Root URL every endpoint path is appended to.
    pub base_url: BaseUrl,
    /// Overall per-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Client for the MyPlant API.
///
/// Cloning is cheap; clones share the HTTP connection pool and the
/// credential store.
///
/// Every request except `/login` requires a stored credential. The
/// credential is sent as the `pb_auth` cookie, and any `pb_auth` cookie the
/// server sets on a response replaces it.
#[derive(Clone)]
pub struct MyPlantClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: ClientConfig,
    store: CredentialStore,
}

impl MyPlantClient {
    /// Create a client for `base_url` backed by the best available
    /// credential storage on this machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: BaseUrl) -> Result<Self> {
        let store = CredentialStore::detect(&StoreConfig::default());
        Self::from_config(ClientConfig::new(base_url), store)
    }

    /// Create a client for `base_url` using the given credential store.
    pub fn with_store(base_url: BaseUrl, store: CredentialStore) -> Result<Self> {
        Self::from_config(ClientConfig::new(base_url), store)
    }

    /// Create a client from a full configuration.
    pub fn from_config(config: ClientConfig, store: CredentialStore) -> Result<Self> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("myplant/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        debug!(base_url = %config.base_url, backend = store.active_backend(), "Created client");

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                store,
            }),
        })
    }

    /// Returns the base URL this client talks to.
    pub fn base_url(&self) -> &BaseUrl {
        &self.inner.config.base_url
    }

    /// Returns the credential store.
    pub fn store(&self) -> &CredentialStore {
        &self.inner.store
    }

    /// Log in with a username (email) and password.
    ///
    /// On success the session cookie and, if the server sent one, the user
    /// profile are persisted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the server rejects the login.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        self.login_with(&Credentials::new(username, password)).await
    }

    /// Log in with prepared [`Credentials`].
    #[instrument(skip(self, credentials), fields(base_url = %self.inner.config.base_url, username = %credentials.username()))]
    pub async fn login_with(&self, credentials: &Credentials) -> Result<LoginResponse> {
        info!("Logging in");

        let response = self
            .request(Method::POST, endpoints::LOGIN, None)?
            .json(&credentials.login_body())
            .send()
            .await?;

        let status = response.status();
        trace!(status = %status, "Login response");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                status: status.as_u16(),
                body,
            });
        }

        let (credential, header) = extract_credential(response.headers());
        let data: LoginData = decode(response).await?;

        match &credential {
            Some(credential) => {
                self.inner.store.save(credential, data.profile().as_ref());
                info!(backend = self.inner.store.active_backend(), "Session stored");
            }
            None => warn!("Login succeeded without a session cookie; nothing stored"),
        }

        Ok(LoginResponse {
            data,
            credential,
            header,
        })
    }

    /// Forget the stored session and profile. Makes no network call.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        self.inner.store.clear();
        info!("Logged out");
    }

    /// The stored session credential, if any.
    pub fn session(&self) -> Option<Credential> {
        self.inner.store.load()
    }

    /// The cached user profile, if any.
    pub fn user(&self) -> Option<User> {
        self.inner.store.load_profile()
    }

    /// Send a request with the stored session and return the decoded body.
    ///
    /// An empty response body decodes to [`Value::Null`].
    ///
    /// # Errors
    ///
    /// - [`Error::NotAuthenticated`] if no credential is stored and `path`
    ///   is not the login path. No request is sent.
    /// - [`Error::Request`] if the server answers with a non-success status.
    /// - [`Error::Decode`] if the body is not JSON.
    pub async fn authenticated_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        self.dispatch(method, path, body).await
    }

    #[instrument(skip(self, body), fields(base_url = %self.inner.config.base_url))]
    pub(crate) async fn dispatch<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let credential = self.inner.store.load();
        if credential.is_none() && !endpoints::is_login(path) {
            debug!("No stored credential");
            return Err(Error::NotAuthenticated);
        }

        debug!("Sending request");
        let mut request = self.request(method, path, credential.as_ref())?;
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        // Servers may rotate the session on any response, including errors.
        self.refresh_credential(response.headers(), credential.as_ref());

        let status = response.status();
        trace!(status = %status, "Response");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Request {
                status: status.as_u16(),
                body,
            });
        }

        decode(response).await
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        credential: Option<&Credential>,
    ) -> Result<reqwest::RequestBuilder> {
        let url = self.inner.config.base_url.endpoint(path);
        Ok(self
            .inner
            .http
            .request(method, url)
            .headers(session_headers(credential)?))
    }

    fn refresh_credential(&self, headers: &HeaderMap, current: Option<&Credential>) {
        if let (Some(fresh), _) = extract_credential(headers) {
            if current == Some(&fresh) {
                trace!("Server re-sent the current credential");
                return;
            }
            debug!("Refreshing stored credential");
            self.inner.store.save(&fresh, None);
        }
    }
}

impl fmt::Debug for MyPlantClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MyPlantClient")
            .field("config", &self.inner.config)
            .field("store", &self.inner.store)
            .finish_non_exhaustive()
    }
}

/// Headers sent on every request.
fn session_headers(credential: Option<&Credential>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(credential) = credential {
        let mut value = HeaderValue::from_str(&credential.cookie_header())
            .map_err(|_| InvalidInputError::HeaderValue { header: "Cookie" })?;
        value.set_sensitive(true);
        headers.insert(COOKIE, value);
    }

    Ok(headers)
}

/// Find the session cookie among the `Set-Cookie` headers.
///
/// Returns the credential and the raw header it came from. When no header
/// carries a session, the first `Set-Cookie` value is returned instead.
fn extract_credential(headers: &HeaderMap) -> (Option<Credential>, Option<String>) {
    let values: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();

    match Credential::from_set_cookies(values.iter().copied()) {
        Some((credential, raw)) => (Some(credential), Some(raw.to_string())),
        None => (None, values.first().map(|raw| raw.to_string())),
    }
}

/// Decode a success body as JSON. Empty bodies decode as `null`.
async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}
