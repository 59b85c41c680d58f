use super::template::CredHubTemplate;
use crate::utils::errors::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthServerInfo {
    pub url: String,
}

/// Body of `GET /info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub app: AppInfo,
    #[serde(rename = "auth-server")]
    pub auth_server: AuthServerInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("UP")
    }
}

pub struct InfoOperations<'a> {
    template: &'a CredHubTemplate,
}

impl<'a> InfoOperations<'a> {
    pub(crate) fn new(template: &'a CredHubTemplate) -> Self {
        Self { template }
    }

    pub async fn info(&self) -> Result<ServerInfo> {
        self.template.get("/info", &[]).await
    }

    pub async fn version(&self) -> Result<VersionInfo> {
        self.template.get("/version", &[]).await
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        self.template.get("/health", &[]).await
    }
}
