use super::template::{resource_path, CredHubTemplate};
use crate::credential::details::{CredentialDetailsData, CredentialPathData, CredentialSummaryData};
use crate::credential::{
    CredentialDetails, CredentialName, CredentialPath, CredentialRequest, CredentialSummary,
    CredentialValue, GenerationParameters, ParametersRequest,
};
use crate::utils::errors::{CredHubError, Result};
use serde::de::DeserializeOwned;
use serde_json::json;

const DATA_PATH: &str = "/api/v1/data";
const REGENERATE_PATH: &str = "/api/v1/regenerate";

/// Credential CRUD against `/api/v1/data`
pub struct CredentialOperations<'a> {
    template: &'a CredHubTemplate,
}

impl<'a> CredentialOperations<'a> {
    pub(crate) fn new(template: &'a CredHubTemplate) -> Self {
        Self { template }
    }

    /// Write a new version of a credential with a caller-supplied value
    pub async fn write<T: CredentialValue>(
        &self,
        request: &CredentialRequest<T>,
    ) -> Result<CredentialDetails<T>> {
        tracing::debug!(
            "Writing {} credential {}",
            request.credential_type,
            request.name
        );
        self.template.put(DATA_PATH, request).await
    }

    /// Have the server generate a new credential value
    pub async fn generate<P: GenerationParameters>(
        &self,
        request: &ParametersRequest<P>,
    ) -> Result<CredentialDetails<P::Value>> {
        request.parameters.validate()?;
        tracing::debug!(
            "Generating {} credential {}",
            request.credential_type,
            request.name
        );
        self.template.post(DATA_PATH, request).await
    }

    /// Regenerate a previously generated credential with its original parameters
    pub async fn regenerate<T: DeserializeOwned>(
        &self,
        name: &CredentialName,
    ) -> Result<CredentialDetails<T>> {
        tracing::debug!("Regenerating credential {name}");
        self.template
            .post(REGENERATE_PATH, &json!({ "name": name }))
            .await
    }

    /// Get a specific credential version by its id
    pub async fn get_by_id<T: DeserializeOwned>(&self, id: &str) -> Result<CredentialDetails<T>> {
        if id.trim().is_empty() {
            return Err(CredHubError::InvalidInput(
                "Credential id must not be empty".to_string(),
            ));
        }
        let path = resource_path(DATA_PATH, id, "")?;
        self.template.get(&path, &[]).await
    }

    /// Get the current version of a credential
    pub async fn get_by_name<T: DeserializeOwned>(
        &self,
        name: &CredentialName,
    ) -> Result<CredentialDetails<T>> {
        let data: CredentialDetailsData<T> = self
            .template
            .get(DATA_PATH, &[("name", name.name()), ("current", "true")])
            .await?;

        data.data
            .into_iter()
            .next()
            .ok_or_else(|| CredHubError::Api {
                status: 404,
                message: format!("Credential {name} not found"),
            })
    }

    /// Get credential versions, newest first, optionally limited to `versions`
    pub async fn get_by_name_with_history<T: DeserializeOwned>(
        &self,
        name: &CredentialName,
        versions: Option<u32>,
    ) -> Result<Vec<CredentialDetails<T>>> {
        let versions = versions.map(|v| v.to_string());
        let mut query = vec![("name", name.name())];
        if let Some(v) = versions.as_deref() {
            query.push(("versions", v));
        }

        let data: CredentialDetailsData<T> = self.template.get(DATA_PATH, &query).await?;
        Ok(data.data)
    }

    /// Find credentials whose name contains `name_like`
    pub async fn find_by_name(&self, name_like: &str) -> Result<Vec<CredentialSummary>> {
        let data: CredentialSummaryData = self
            .template
            .get(DATA_PATH, &[("name-like", name_like)])
            .await?;
        Ok(data.credentials)
    }

    /// Find credentials stored under a path prefix
    pub async fn find_by_path(&self, path: &str) -> Result<Vec<CredentialSummary>> {
        let data: CredentialSummaryData =
            self.template.get(DATA_PATH, &[("path", path)]).await?;
        Ok(data.credentials)
    }

    /// List every path that holds credentials
    pub async fn get_all_paths(&self) -> Result<Vec<CredentialPath>> {
        let data: CredentialPathData = self.template.get(DATA_PATH, &[("paths", "true")]).await?;
        Ok(data.paths)
    }

    /// Delete every version of a credential
    pub async fn delete_by_name(&self, name: &CredentialName) -> Result<()> {
        tracing::debug!("Deleting credential {name}");
        self.template
            .delete(DATA_PATH, &[("name", name.name())])
            .await
    }
}
