pub mod reqwest_transport;
pub mod tls;

use crate::config::{ClientOptions, SslConfiguration};
use crate::utils::errors::Result;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};
use std::fmt;
use std::sync::Arc;

pub use reqwest_transport::ReqwestTransport;

/// A single HTTP exchange to be performed by a transport
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

/// A fully received HTTP response. Non-2xx statuses are still responses.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Anything that can send an HTTP request and hand back the response.
///
/// Implementations must be safe to share between concurrent callers and must
/// keep each request paired with its own response.
#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// The HTTP backends this crate can build. Callers pick one explicitly.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportBackend {
    #[default]
    Reqwest,
}

impl TransportBackend {
    /// Build a configured transport. The result is ready to use; there is no
    /// separate start step.
    pub fn create(
        self,
        options: &ClientOptions,
        ssl: &SslConfiguration,
    ) -> Result<Arc<dyn HttpTransport>> {
        match self {
            TransportBackend::Reqwest => Ok(Arc::new(ReqwestTransport::new(options, ssl)?)),
        }
    }
}

impl fmt::Display for TransportBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportBackend::Reqwest => write!(f, "reqwest"),
        }
    }
}
