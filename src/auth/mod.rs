pub mod uaa;

use crate::http::HttpTransport;
use crate::utils::errors::{CredHubError, Result};
use reqwest::header::HeaderValue;
use reqwest::Url;
use std::fmt;
use std::sync::Arc;

pub use uaa::ClientCredentialsProvider;

/// How requests to CredHub are authenticated
#[derive(Clone, Default)]
pub enum CredHubAuth {
    /// The client certificate from the key store is the only credential
    #[default]
    MutualTls,
    /// A pre-issued OAuth2 bearer token
    BearerToken(String),
    /// Tokens obtained from UAA with the client-credentials grant
    ClientCredentials(Arc<ClientCredentialsProvider>),
}

impl CredHubAuth {
    pub fn bearer(token: impl Into<String>) -> Self {
        CredHubAuth::BearerToken(token.into())
    }

    /// Client credentials with the token endpoint discovered from `/info`
    pub fn client_credentials(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        CredHubAuth::ClientCredentials(Arc::new(ClientCredentialsProvider::new(
            client_id,
            client_secret,
            None,
        )))
    }

    pub fn client_credentials_with_token_uri(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_uri: Url,
    ) -> Self {
        CredHubAuth::ClientCredentials(Arc::new(ClientCredentialsProvider::new(
            client_id,
            client_secret,
            Some(token_uri),
        )))
    }

    /// `Authorization` header value for the next request, if any
    pub(crate) async fn authorization(
        &self,
        transport: &dyn HttpTransport,
        base_url: &Url,
    ) -> Result<Option<HeaderValue>> {
        let token = match self {
            CredHubAuth::MutualTls => return Ok(None),
            CredHubAuth::BearerToken(token) => token.clone(),
            CredHubAuth::ClientCredentials(provider) => {
                provider.access_token(transport, base_url).await?
            }
        };

        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| CredHubError::Auth(format!("Token is not a valid header value: {e}")))?;
        value.set_sensitive(true);
        Ok(Some(value))
    }

    /// Called when CredHub answers 401
    pub(crate) async fn rejected(&self) {
        if let CredHubAuth::ClientCredentials(provider) = self {
            provider.invalidate().await;
        }
    }
}

impl fmt::Debug for CredHubAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredHubAuth::MutualTls => write!(f, "MutualTls"),
            CredHubAuth::BearerToken(_) => write!(f, "BearerToken(***)"),
            CredHubAuth::ClientCredentials(provider) => {
                f.debug_tuple("ClientCredentials").field(provider).finish()
            }
        }
    }
}
