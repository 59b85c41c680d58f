use super::name::CredentialName;
use super::types::CredentialType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored credential version as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialDetails<T> {
    pub id: String,
    pub name: CredentialName,
    #[serde(rename = "type")]
    pub credential_type: CredentialType,
    pub value: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CredentialDetailsData<T> {
    pub data: Vec<CredentialDetails<T>>,
}

/// Name-only search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSummary {
    pub name: CredentialName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CredentialSummaryData {
    pub credentials: Vec<CredentialSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPath {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CredentialPathData {
    pub paths: Vec<CredentialPath>,
}
