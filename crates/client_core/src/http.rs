//! The configured HTTP client every call group goes through.

use std::sync::Arc;

use reqwest::{multipart::Form, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::error::message_from_body;
use tracing::{debug, warn};
use url::Url;

use crate::{
    error::{ClientError, Result},
    resources::{ApplicationsApi, AuthApi, JobsApi, ResumesApi, SavedJobsApi},
    session::{StoredSession, TokenStore},
};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        Self::with_http(Client::new(), base_url, tokens)
    }

    pub fn with_http(http: Client, base_url: &str, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        Url::parse(trimmed).map_err(|source| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            http,
            base_url: trimmed.to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn jobs(&self) -> JobsApi<'_> {
        JobsApi::new(self)
    }

    pub fn applications(&self) -> ApplicationsApi<'_> {
        ApplicationsApi::new(self)
    }

    pub fn resumes(&self) -> ResumesApi<'_> {
        ResumesApi::new(self)
    }

    pub fn saved_jobs(&self) -> SavedJobsApi<'_> {
        SavedJobsApi::new(self)
    }

    pub async fn session(&self) -> Result<Option<StoredSession>> {
        self.tokens.load().await
    }

    pub(crate) async fn store_session(&self, session: &StoredSession) -> Result<()> {
        self.tokens.save(session).await
    }

    pub(crate) async fn clear_session(&self) -> Result<()> {
        self.tokens.clear().await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds a request for `path` (relative to the api root) with the
    /// bearer token attached when one is stored.
    async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let builder = self.http.request(method, self.url(path));
        Ok(match self.tokens.load().await? {
            Some(session) => builder.bearer_auth(session.token),
            None => builder,
        })
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response> {
        let response = builder
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: path.to_string(),
                source,
            })?;

        let status = response.status();
        debug!(endpoint = path, %status, "response received");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = message_from_body(&body);
        warn!(endpoint = path, %status, "request rejected: {}", message.as_deref().unwrap_or(&body));
        Err(ClientError::Status {
            endpoint: path.to_string(),
            status,
            message,
        })
    }

    async fn decode<R: DeserializeOwned>(response: Response, path: &str) -> Result<R> {
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: path.to_string(),
                source,
            })?;
        serde_json::from_str(&body).map_err(|source| ClientError::Decode {
            endpoint: path.to_string(),
            source,
        })
    }

    pub(crate) async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.get_with_query(path, &[]).await
    }

    pub(crate) async fn get_with_query<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<R> {
        let builder = self.request(Method::GET, path).await?.query(query);
        let response = self.send(builder, path).await?;
        Self::decode(response, path).await
    }

    pub(crate) async fn post<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R> {
        let builder = self.request(Method::POST, path).await?.json(body);
        let response = self.send(builder, path).await?;
        Self::decode(response, path).await
    }

    /// POST whose response body is not needed.
    pub(crate) async fn post_discard<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<()> {
        let builder = self.request(Method::POST, path).await?.json(body);
        self.send(builder, path).await?;
        Ok(())
    }

    pub(crate) async fn patch<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R> {
        let builder = self.request(Method::PATCH, path).await?.json(body);
        let response = self.send(builder, path).await?;
        Self::decode(response, path).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, path).await?;
        self.send(builder, path).await?;
        Ok(())
    }

    pub(crate) async fn post_multipart<R: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<R> {
        let builder = self.request(Method::POST, path).await?.multipart(form);
        let response = self.send(builder, path).await?;
        Self::decode(response, path).await
    }
}
