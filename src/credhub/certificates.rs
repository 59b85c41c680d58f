use super::template::{resource_path, CredHubTemplate};
use crate::credential::certificate::{
    BulkRegenerateRequest, BulkRegenerateResponse, CertificateRegenerateRequest,
    CertificateSummaryData, TransitionalVersionRequest,
};
use crate::credential::{CertificateCredential, CertificateSummary, CredentialDetails, CredentialName};
use crate::utils::errors::{CredHubError, Result};

const CERTIFICATES_PATH: &str = "/api/v1/certificates";
const BULK_REGENERATE_PATH: &str = "/api/v1/bulk-regenerate";

/// Certificate-specific operations: listing, rotation and transitional versions
pub struct CertificateOperations<'a> {
    template: &'a CredHubTemplate,
}

impl<'a> CertificateOperations<'a> {
    pub(crate) fn new(template: &'a CredHubTemplate) -> Self {
        Self { template }
    }

    pub async fn get_all(&self) -> Result<Vec<CertificateSummary>> {
        let data: CertificateSummaryData = self.template.get(CERTIFICATES_PATH, &[]).await?;
        Ok(data.certificates)
    }

    pub async fn get_by_name(&self, name: &CredentialName) -> Result<CertificateSummary> {
        let data: CertificateSummaryData = self
            .template
            .get(CERTIFICATES_PATH, &[("name", name.name())])
            .await?;

        data.certificates
            .into_iter()
            .next()
            .ok_or_else(|| CredHubError::Api {
                status: 404,
                message: format!("Certificate {name} not found"),
            })
    }

    /// Regenerate a certificate by its certificate id
    pub async fn regenerate(
        &self,
        certificate_id: &str,
        set_as_transitional: bool,
    ) -> Result<CredentialDetails<CertificateCredential>> {
        let path = resource_path(CERTIFICATES_PATH, certificate_id, "/regenerate")?;
        self.template
            .post(&path, &CertificateRegenerateRequest { set_as_transitional })
            .await
    }

    /// Regenerate every certificate signed by the given CA; returns their names
    pub async fn bulk_regenerate(&self, signed_by: &CredentialName) -> Result<Vec<CredentialName>> {
        tracing::debug!("Regenerating all certificates signed by {signed_by}");
        let response: BulkRegenerateResponse = self
            .template
            .post(BULK_REGENERATE_PATH, &BulkRegenerateRequest { signed_by })
            .await?;
        Ok(response.regenerated_credentials)
    }

    /// Mark a version as transitional, or clear the flag with `None`
    pub async fn update_transitional_version(
        &self,
        certificate_id: &str,
        version_id: Option<&str>,
    ) -> Result<Vec<CredentialDetails<CertificateCredential>>> {
        let path =
            resource_path(CERTIFICATES_PATH, certificate_id, "/update_transitional_version")?;
        self.template
            .put(&path, &TransitionalVersionRequest { version: version_id })
            .await
    }
}
