use super::template::CredHubTemplate;
use crate::credential::CredentialDetails;
use crate::interpolation::ServicesData;
use crate::utils::errors::Result;
use serde_json::Value;
use std::collections::HashMap;

const INTERPOLATE_PATH: &str = "/api/v1/interpolate";

pub struct InterpolationOperations<'a> {
    template: &'a CredHubTemplate,
}

impl<'a> InterpolationOperations<'a> {
    pub(crate) fn new(template: &'a CredHubTemplate) -> Self {
        Self { template }
    }

    /// Let the server replace `credhub-ref` entries in a service binding document
    pub async fn interpolate_service_data(&self, services: &ServicesData) -> Result<ServicesData> {
        self.template.post(INTERPOLATE_PATH, services).await
    }

    /// Resolve references client-side by reading each referenced credential.
    ///
    /// A document without references is returned as-is with no request made.
    pub async fn resolve_service_data(&self, services: &ServicesData) -> Result<ServicesData> {
        let names = services.references()?;
        if names.is_empty() {
            return Ok(services.clone());
        }

        let credentials = self.template.credentials();
        let mut values = HashMap::with_capacity(names.len());
        for name in names {
            let details: CredentialDetails<Value> = credentials.get_by_name(&name).await?;
            tracing::debug!("Resolved reference {name}");
            values.insert(name, details.value);
        }

        services.resolved(&values)
    }
}
