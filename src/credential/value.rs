use super::types::CredentialType;
use crate::utils::errors::{CredHubError, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::Deref;

/// A typed credential value and the CredHub type tag it is stored under
pub trait CredentialValue: Serialize + DeserializeOwned + Send + Sync + 'static {
    fn credential_type() -> CredentialType;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueCredential(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordCredential(pub String);

/// Arbitrary JSON object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonCredential(pub Map<String, Value>);

impl JsonCredential {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Build from any JSON value that is an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CredHubError::InvalidInput(format!(
                "JSON credentials must be objects, got: {other}"
            ))),
        }
    }
}

impl Deref for JsonCredential {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

impl UserCredential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: password.into(),
            password_hash: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CertificateCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

impl CertificateCredential {
    /// Expiry of the leaf certificate, if one is present and parseable
    pub fn not_after(&self) -> Result<Option<DateTime<Utc>>> {
        use x509_parser::prelude::*;

        let Some(cert_pem) = self.certificate.as_deref() else {
            return Ok(None);
        };

        let (_, pem) = parse_x509_pem(cert_pem.as_bytes()).map_err(|e| {
            CredHubError::InvalidInput(format!("Failed to parse PEM certificate: {e}"))
        })?;
        let (_, cert) = parse_x509_certificate(&pem.contents).map_err(|e| {
            CredHubError::InvalidInput(format!("Failed to parse X.509 certificate: {e}"))
        })?;

        Ok(DateTime::from_timestamp(
            cert.validity().not_after.timestamp(),
            0,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RsaCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SshCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_fingerprint: Option<String>,
}

macro_rules! credential_value {
    ($ty:ty, $kind:expr) => {
        impl CredentialValue for $ty {
            fn credential_type() -> CredentialType {
                $kind
            }
        }
    };
}

credential_value!(ValueCredential, CredentialType::Value);
credential_value!(PasswordCredential, CredentialType::Password);
credential_value!(JsonCredential, CredentialType::Json);
credential_value!(UserCredential, CredentialType::User);
credential_value!(CertificateCredential, CredentialType::Certificate);
credential_value!(RsaCredential, CredentialType::Rsa);
credential_value!(SshCredential, CredentialType::Ssh);
