use super::name::CredentialName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One version of a certificate credential in the certificates API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateVersion {
    pub id: String,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub transitional: bool,
    #[serde(default)]
    pub certificate_authority: bool,
    #[serde(default)]
    pub self_signed: bool,
    #[serde(default)]
    pub generated: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateSummary {
    pub id: String,
    pub name: CredentialName,
    #[serde(default)]
    pub signed_by: Option<String>,
    #[serde(default)]
    pub signs: Vec<String>,
    #[serde(default)]
    pub versions: Vec<CertificateVersion>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CertificateSummaryData {
    pub certificates: Vec<CertificateSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CertificateRegenerateRequest {
    pub set_as_transitional: bool,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct BulkRegenerateRequest<'a> {
    pub signed_by: &'a CredentialName,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BulkRegenerateResponse {
    pub regenerated_credentials: Vec<CredentialName>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TransitionalVersionRequest<'a> {
    pub version: Option<&'a str>,
}
