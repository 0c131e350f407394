//! HTTP client for the Vayuhu PHP backend.

use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use vayuhu_core::{GatewayError, GatewayResult, SessionProvider};
use vayuhu_shared::Session;
use vayuhu_store::app_config::ApiConfig;

use crate::envelope;

/// Talks to the backend on behalf of whoever holds the current session.
///
/// Every request carries `Authorization: Bearer <token>` once someone has signed in.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    session: Arc<dyn SessionProvider>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Arc<dyn SessionProvider>) -> GatewayResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<Session> {
        self.session.current()
    }

    pub(crate) fn sessions(&self) -> &Arc<dyn SessionProvider> {
        &self.session
    }

    /// The active session, or `Unauthenticated`.
    pub(crate) fn require_session(&self) -> GatewayResult<Session> {
        self.session.current().ok_or(GatewayError::Unauthenticated)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.bearer() {
            Some(bearer) => request.header(reqwest::header::AUTHORIZATION, bearer),
            None => request,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> GatewayResult<T> {
        let request = self.http.get(self.url(path)).query(query);
        self.send(path, request).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.url(path)).json(body);
        self.send(path, request).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> GatewayResult<T> {
        let request = self.http.post(self.url(path)).multipart(form);
        self.send(path, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> GatewayResult<T> {
        debug!(path, "Calling backend");

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            debug!(path, status = status.as_u16(), "Backend returned an error status");
            return Err(envelope::status_error(status.as_u16(), &text));
        }

        let body: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))?;
        envelope::decode(body)
    }
}
