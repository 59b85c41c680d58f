use super::certificates::CertificateOperations;
use super::credentials::CredentialOperations;
use super::info::InfoOperations;
use super::interpolation::InterpolationOperations;
use super::permissions::PermissionOperations;
use super::task::CredHubTask;
use crate::auth::CredHubAuth;
use crate::config::{ClientOptions, SslConfiguration};
use crate::http::{HttpTransport, TransportBackend, TransportRequest, TransportResponse};
use crate::utils::errors::{CredHubError, Result};
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

/// CredHub error body, e.g. `{"error": "The request could not be completed..."}`
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

/// Build `<base url><path>?<query>`, keeping any path prefix of the base URL
pub(crate) fn endpoint(base_url: &Url, path: &str, query: &[(&str, &str)]) -> Url {
    let mut url = base_url.clone();
    let prefix = base_url.path().trim_end_matches('/');
    url.set_path(&format!("{prefix}{path}"));
    url.set_query(None);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    url
}

/// `<prefix>/<id><suffix>` with `id` percent-encoded as exactly one path
/// segment, so ids containing `/`, `?` or `#` cannot address another resource
pub(crate) fn resource_path(prefix: &str, id: &str, suffix: &str) -> Result<String> {
    if id.trim().is_empty() || id == "." || id == ".." {
        return Err(CredHubError::InvalidInput(format!(
            "Invalid resource id '{id}'"
        )));
    }

    let mut scratch = Url::parse("http://localhost/")
        .map_err(|e| CredHubError::InvalidInput(format!("Invalid resource id '{id}': {e}")))?;
    scratch
        .path_segments_mut()
        .map_err(|_| CredHubError::InvalidInput(format!("Invalid resource id '{id}'")))?
        .pop_if_empty()
        .push(id);

    Ok(format!("{prefix}{}{suffix}", scratch.path()))
}

/// Map a non-2xx response to an API error
pub(crate) fn api_error(response: &TransportResponse) -> CredHubError {
    let status = response.status;
    let message = serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.error.or(body.error_description))
        .or_else(|| {
            let text = response.body_text();
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    CredHubError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Entry point to the CredHub API: one base URL, one configured transport
/// and one authentication method, shared by every operation.
///
/// Cloning is cheap and clones share the transport's connection pool.
#[derive(Debug, Clone)]
pub struct CredHubTemplate {
    base_url: Url,
    transport: Arc<dyn HttpTransport>,
    auth: CredHubAuth,
}

impl CredHubTemplate {
    /// Template over an already-built transport
    pub fn new(base_url: &str, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            transport,
            auth: CredHubAuth::default(),
        })
    }

    pub fn builder(base_url: &str) -> CredHubTemplateBuilder {
        CredHubTemplateBuilder::new(base_url)
    }

    pub fn with_auth(mut self, auth: CredHubAuth) -> Self {
        self.auth = auth;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    pub fn credentials(&self) -> CredentialOperations<'_> {
        CredentialOperations::new(self)
    }

    pub fn interpolation(&self) -> InterpolationOperations<'_> {
        InterpolationOperations::new(self)
    }

    pub fn certificates(&self) -> CertificateOperations<'_> {
        CertificateOperations::new(self)
    }

    pub fn permissions(&self) -> PermissionOperations<'_> {
        PermissionOperations::new(self)
    }

    pub fn info(&self) -> InfoOperations<'_> {
        InfoOperations::new(self)
    }

    /// Run an operation as a cancellable background task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F, Fut, T>(&self, operation: F) -> CredHubTask<T>
    where
        F: FnOnce(CredHubTemplate) -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        CredHubTask::spawn(operation(self.clone()))
    }

    pub(crate) fn url(&self, path: &str, query: &[(&str, &str)]) -> Url {
        endpoint(&self.base_url, path, query)
    }

    /// Generic GET request to the CredHub API
    pub(crate) async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<R> {
        let response = self
            .exchange(Method::GET, self.url(path, query), None)
            .await?;
        decode(&response)
    }

    /// Generic POST request to the CredHub API
    pub(crate) async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_vec(body)?;
        let response = self
            .exchange(Method::POST, self.url(path, &[]), Some(body))
            .await?;
        decode(&response)
    }

    /// Generic PUT request to the CredHub API
    pub(crate) async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_vec(body)?;
        let response = self
            .exchange(Method::PUT, self.url(path, &[]), Some(body))
            .await?;
        decode(&response)
    }

    /// DELETE request; any response body is ignored
    pub(crate) async fn delete(&self, path: &str, query: &[(&str, &str)]) -> Result<()> {
        self.exchange(Method::DELETE, self.url(path, query), None)
            .await?;
        Ok(())
    }

    /// Send one request and fail on non-2xx statuses
    async fn exchange(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<TransportResponse> {
        let mut request = TransportRequest::new(method, url);
        request
            .headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        if body.is_some() {
            request
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(authorization) = self
            .auth
            .authorization(self.transport.as_ref(), &self.base_url)
            .await?
        {
            request.headers.insert(AUTHORIZATION, authorization);
        }
        request.body = body;

        let response = self.transport.execute(request).await?;
        self.handle_response(response).await
    }

    /// Handle HTTP response from CredHub
    async fn handle_response(&self, response: TransportResponse) -> Result<TransportResponse> {
        if response.status.is_success() {
            return Ok(response);
        }

        if response.status == StatusCode::UNAUTHORIZED {
            self.auth.rejected().await;
        }

        let err = api_error(&response);
        tracing::debug!("CredHub request failed: {err}");
        Err(err)
    }
}

fn decode<R: DeserializeOwned>(response: &TransportResponse) -> Result<R> {
    Ok(serde_json::from_slice(&response.body)?)
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url)
        .map_err(|e| CredHubError::Config(format!("Invalid CredHub URL '{base_url}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(CredHubError::Config(format!(
            "CredHub URL must be an http or https URL, got '{base_url}'"
        )));
    }
    Ok(url)
}

/// Assembles a [`CredHubTemplate`] from options, TLS material and an
/// explicitly chosen transport backend (or a caller-supplied transport).
#[derive(Debug)]
pub struct CredHubTemplateBuilder {
    base_url: String,
    options: ClientOptions,
    ssl: SslConfiguration,
    auth: CredHubAuth,
    backend: Option<TransportBackend>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl CredHubTemplateBuilder {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            options: ClientOptions::default(),
            ssl: SslConfiguration::default(),
            auth: CredHubAuth::default(),
            backend: None,
            transport: None,
        }
    }

    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    pub fn ssl(mut self, ssl: SslConfiguration) -> Self {
        self.ssl = ssl;
        self
    }

    pub fn auth(mut self, auth: CredHubAuth) -> Self {
        self.auth = auth;
        self
    }

    pub fn backend(mut self, backend: TransportBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Use a ready-made transport; options and TLS settings are then ignored
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<CredHubTemplate> {
        let base_url = parse_base_url(&self.base_url)?;

        let transport = match (self.transport, self.backend) {
            (Some(transport), _) => transport,
            (None, Some(backend)) => {
                tracing::debug!("Building {backend} transport for {base_url}");
                backend.create(&self.options, &self.ssl)?
            }
            (None, None) => {
                return Err(CredHubError::Config(
                    "No HTTP transport configured: choose a backend or supply a transport"
                        .to_string(),
                ))
            }
        };

        Ok(CredHubTemplate {
            base_url,
            transport,
            auth: self.auth,
        })
    }
}
