use crate::credhub::info::ServerInfo;
use crate::credhub::template::endpoint;
use crate::http::{HttpTransport, TransportRequest};
use crate::utils::errors::{CredHubError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::Deserialize;
use std::fmt;
use tokio::sync::Mutex;

/// Tokens are refreshed this long before the server says they expire
const EXPIRY_MARGIN_SECS: i64 = 30;

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// OAuth2 client-credentials grant against the UAA that guards CredHub
pub struct ClientCredentialsProvider {
    client_id: String,
    client_secret: String,
    token_uri: Option<Url>,
    cached: Mutex<Option<AccessToken>>,
}

impl ClientCredentialsProvider {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_uri: Option<Url>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_uri,
            cached: Mutex::new(None),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Current access token, fetching a new one when the cached token is
    /// missing or about to expire
    pub async fn access_token(
        &self,
        transport: &dyn HttpTransport,
        base_url: &Url,
    ) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                tracing::trace!("Using cached UAA token");
                return Ok(token.value.clone());
            }
        }

        let token_uri = match &self.token_uri {
            Some(uri) => uri.clone(),
            None => discover_token_uri(transport, base_url).await?,
        };

        let token = self.request_token(transport, token_uri).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    /// Drop the cached token, e.g. after CredHub rejected it
    pub async fn invalidate(&self) {
        if self.cached.lock().await.take().is_some() {
            tracing::debug!("Discarded cached UAA token");
        }
    }

    async fn request_token(
        &self,
        transport: &dyn HttpTransport,
        token_uri: Url,
    ) -> Result<AccessToken> {
        let form = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "client_credentials")
            .append_pair("response_type", "token")
            .finish();

        let mut request = TransportRequest::new(Method::POST, token_uri);
        request
            .headers
            .insert(AUTHORIZATION, basic_authorization(&self.client_id, &self.client_secret)?);
        request.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        request
            .headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        request.body = Some(form.into_bytes());

        let response = transport.execute(request).await?;
        if !response.status.is_success() {
            return Err(CredHubError::Auth(format!(
                "UAA token request failed: {} - {}",
                response.status,
                response.body_text()
            )));
        }

        let token: TokenResponse = serde_json::from_slice(&response.body)
            .map_err(|e| CredHubError::Auth(format!("Invalid response from UAA: {e}")))?;

        tracing::info!("Obtained UAA token for client {}", self.client_id);
        Ok(AccessToken {
            value: token.access_token,
            expires_at: token_expiry(Utc::now(), token.expires_in.unwrap_or(0)),
        })
    }
}

/// Lifetimes past what chrono can represent saturate at the latest instant;
/// negative lifetimes mean already expired.
fn token_expiry(now: DateTime<Utc>, expires_in: i64) -> DateTime<Utc> {
    Duration::try_seconds(expires_in.max(0))
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl fmt::Debug for ClientCredentialsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsProvider")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

/// `<auth-server url>/oauth/token`, as advertised by CredHub's `/info`
async fn discover_token_uri(transport: &dyn HttpTransport, base_url: &Url) -> Result<Url> {
    let mut request = TransportRequest::new(Method::GET, endpoint(base_url, "/info", &[]));
    request
        .headers
        .insert(ACCEPT, HeaderValue::from_static("application/json"));

    let response = transport.execute(request).await?;
    if !response.status.is_success() {
        return Err(CredHubError::Auth(format!(
            "Could not discover UAA from CredHub /info: {}",
            response.status
        )));
    }

    let info: ServerInfo = serde_json::from_slice(&response.body)?;
    let uri = format!("{}/oauth/token", info.auth_server.url.trim_end_matches('/'));
    tracing::debug!("Discovered UAA token endpoint: {uri}");

    Url::parse(&uri)
        .map_err(|e| CredHubError::Auth(format!("Invalid UAA URL '{uri}' from /info: {e}")))
}

fn basic_authorization(client_id: &str, client_secret: &str) -> Result<HeaderValue> {
    let encoded = STANDARD.encode(format!("{client_id}:{client_secret}"));
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
        .map_err(|e| CredHubError::Auth(format!("Invalid client credentials: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}
