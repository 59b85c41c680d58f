use super::{tls, HttpTransport, TransportRequest, TransportResponse};
use crate::config::{ClientOptions, SslConfiguration};
use crate::utils::errors::{CredHubError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// HTTP transport backed by a pooled `reqwest::Client` over rustls
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport honoring the given timeouts and TLS material
    pub fn new(options: &ClientOptions, ssl: &SslConfiguration) -> Result<Self> {
        options.validate()?;

        let mut builder = Client::builder()
            .use_rustls_tls()
            .connect_timeout(options.connection_timeout())
            .read_timeout(options.read_timeout());

        if let Some(material) = tls::load(ssl)? {
            for root in material.roots {
                builder = builder.add_root_certificate(root);
            }
            if let Some(identity) = material.identity {
                builder = builder.identity(identity);
            }
        }

        let client = builder
            .build()
            .map_err(|e| CredHubError::Config(format!("Failed to create HTTP client: {e}")))?;

        tracing::info!(
            "Created HTTP transport (connect timeout {:?}, read timeout {:?}, custom TLS: {})",
            options.connection_timeout(),
            options.read_timeout(),
            ssl.is_configured()
        );

        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. one shared with the rest of an application
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        tracing::debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        tracing::debug!("Response status: {status}");
        tracing::trace!("Response body: {} bytes", body.len());

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
