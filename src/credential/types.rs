use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Credential types understood by CredHub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialType {
    Value,
    Json,
    Password,
    User,
    Certificate,
    Rsa,
    Ssh,
}

impl CredentialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialType::Value => "value",
            CredentialType::Json => "json",
            CredentialType::Password => "password",
            CredentialType::User => "user",
            CredentialType::Certificate => "certificate",
            CredentialType::Rsa => "rsa",
            CredentialType::Ssh => "ssh",
        }
    }

    /// Types the server can generate values for
    pub fn is_generatable(&self) -> bool {
        !matches!(self, CredentialType::Value | CredentialType::Json)
    }
}

impl fmt::Display for CredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CredentialType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "value" => Ok(CredentialType::Value),
            "json" => Ok(CredentialType::Json),
            "password" => Ok(CredentialType::Password),
            "user" => Ok(CredentialType::User),
            "certificate" => Ok(CredentialType::Certificate),
            "rsa" => Ok(CredentialType::Rsa),
            "ssh" => Ok(CredentialType::Ssh),
            other => Err(format!("Unknown credential type: {other}")),
        }
    }
}

/// How a write or generate request treats an existing credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    Overwrite,
    NoOverwrite,
    Converge,
}
