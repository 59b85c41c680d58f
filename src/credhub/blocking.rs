use super::template::CredHubTemplate;
use crate::credential::{
    CredentialDetails, CredentialName, CredentialRequest, CredentialValue, GenerationParameters,
    ParametersRequest,
};
use crate::interpolation::ServicesData;
use crate::utils::errors::Result;
use serde::de::DeserializeOwned;
use std::future::Future;
use tokio::runtime::{Builder, Runtime};

/// Synchronous facade over a [`CredHubTemplate`].
///
/// Owns a current-thread runtime and blocks the calling thread for each
/// operation. Must not be used from inside an async context.
pub struct BlockingCredHub {
    runtime: Runtime,
    template: CredHubTemplate,
}

impl BlockingCredHub {
    pub fn new(template: CredHubTemplate) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { runtime, template })
    }

    pub fn template(&self) -> &CredHubTemplate {
        &self.template
    }

    /// Run any template operation to completion on the owned runtime
    pub fn call<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(CredHubTemplate) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.runtime.block_on(operation(self.template.clone()))
    }

    pub fn write<T: CredentialValue>(
        &self,
        request: &CredentialRequest<T>,
    ) -> Result<CredentialDetails<T>> {
        self.runtime
            .block_on(self.template.credentials().write(request))
    }

    pub fn generate<P: GenerationParameters>(
        &self,
        request: &ParametersRequest<P>,
    ) -> Result<CredentialDetails<P::Value>> {
        self.runtime
            .block_on(self.template.credentials().generate(request))
    }

    pub fn get_by_id<T: DeserializeOwned>(&self, id: &str) -> Result<CredentialDetails<T>> {
        self.runtime
            .block_on(self.template.credentials().get_by_id(id))
    }

    pub fn get_by_name<T: DeserializeOwned>(
        &self,
        name: &CredentialName,
    ) -> Result<CredentialDetails<T>> {
        self.runtime
            .block_on(self.template.credentials().get_by_name(name))
    }

    pub fn delete_by_name(&self, name: &CredentialName) -> Result<()> {
        self.runtime
            .block_on(self.template.credentials().delete_by_name(name))
    }

    pub fn interpolate_service_data(&self, services: &ServicesData) -> Result<ServicesData> {
        self.runtime
            .block_on(self.template.interpolation().interpolate_service_data(services))
    }
}

impl std::fmt::Debug for BlockingCredHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingCredHub")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}
