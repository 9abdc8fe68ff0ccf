//! reqwest implementation of [`StoryBackend`].

use async_trait::async_trait;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::domain::backend::{
    AuthReply, BackendError, BackendReply, BackendResult, GenerateReply, GenerateRequest,
    LoginRequest, LogoutReply, SessionReply, SignupRequest, StoriesReply, StoryBackend,
};
use crate::domain::cookies::BackendCookies;

/// JSON-over-HTTP client for the PlotPilot backend.
///
/// One [`Client`] (and its connection pool) is shared by every visitor;
/// per-visitor state travels only in the `Cookie` header. No request timeout
/// is set: a call lasts as long as the backend takes to answer.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Creates a client for the backend at `base_url`.
    ///
    /// A base path such as `http://host/plotpilot` is kept: endpoints resolve
    /// to `http://host/plotpilot/api/...`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidUrl`] if `base_url` is not an absolute
    /// `http`/`https` URL, and [`BackendError::Network`] if the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| BackendError::InvalidUrl(e.to_string()))?;

        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(BackendError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                base_url.scheme()
            )));
        }

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// The resolved base URL, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|e| BackendError::InvalidUrl(e.to_string()))
    }

    /// Sends one request and decodes the JSON reply whatever its status.
    async fn call<B, T>(
        &self,
        method: Method,
        path: &str,
        cookies: &BackendCookies,
        body: Option<&B>,
    ) -> BackendResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;

        let mut request = self.client.request(method.clone(), url);
        if let Some(cookie) = cookies.header_value() {
            request = request.header(COOKIE, cookie);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        debug!("{} {} -> {}", method, path, status);

        let mut updated = cookies.clone();
        for header in response.headers().get_all(SET_COOKIE) {
            if let Ok(value) = header.to_str() {
                updated.apply_set_cookie(value);
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let body = serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode {
            status,
            message: e.to_string(),
        })?;

        Ok(BackendReply {
            status,
            body,
            cookies: updated,
        })
    }
}

#[async_trait]
impl StoryBackend for HttpBackend {
    async fn login(
        &self,
        cookies: &BackendCookies,
        request: &LoginRequest,
    ) -> BackendResult<AuthReply> {
        self.call(Method::POST, "api/login", cookies, Some(request))
            .await
    }

    async fn signup(
        &self,
        cookies: &BackendCookies,
        request: &SignupRequest,
    ) -> BackendResult<AuthReply> {
        self.call(Method::POST, "api/signup", cookies, Some(request))
            .await
    }

    async fn check_session(&self, cookies: &BackendCookies) -> BackendResult<SessionReply> {
        self.call::<(), _>(Method::GET, "api/check-session", cookies, None)
            .await
    }

    async fn logout(&self, cookies: &BackendCookies) -> BackendResult<LogoutReply> {
        self.call::<(), _>(Method::POST, "api/logout", cookies, None)
            .await
    }

    async fn generate(
        &self,
        cookies: &BackendCookies,
        request: &GenerateRequest,
    ) -> BackendResult<GenerateReply> {
        self.call(Method::POST, "api/generate", cookies, Some(request))
            .await
    }

    async fn my_stories(&self, cookies: &BackendCookies) -> BackendResult<StoriesReply> {
        self.call::<(), _>(Method::GET, "api/my-stories", cookies, None)
            .await
    }
}
