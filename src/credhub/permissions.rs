use super::template::{resource_path, CredHubTemplate};
use crate::permission::{Actor, Permission};
use crate::utils::errors::Result;

const PERMISSIONS_PATH: &str = "/api/v2/permissions";

pub struct PermissionOperations<'a> {
    template: &'a CredHubTemplate,
}

impl<'a> PermissionOperations<'a> {
    pub(crate) fn new(template: &'a CredHubTemplate) -> Self {
        Self { template }
    }

    pub async fn get_permission(&self, id: &str) -> Result<Permission> {
        let path = resource_path(PERMISSIONS_PATH, id, "")?;
        self.template.get(&path, &[]).await
    }

    pub async fn get_permission_by_path_and_actor(
        &self,
        path: &str,
        actor: &Actor,
    ) -> Result<Permission> {
        self.template
            .get(
                PERMISSIONS_PATH,
                &[("path", path), ("actor", actor.identity())],
            )
            .await
    }

    pub async fn add_permission(&self, permission: &Permission) -> Result<Permission> {
        permission.validate()?;
        tracing::debug!(
            "Granting {:?} on {} to {}",
            permission.operations,
            permission.path,
            permission.actor
        );
        self.template.post(PERMISSIONS_PATH, permission).await
    }

    pub async fn update_permission(&self, id: &str, permission: &Permission) -> Result<Permission> {
        permission.validate()?;
        let path = resource_path(PERMISSIONS_PATH, id, "")?;
        self.template.put(&path, permission).await
    }

    pub async fn delete_permission(&self, id: &str) -> Result<()> {
        let path = resource_path(PERMISSIONS_PATH, id, "")?;
        self.template.delete(&path, &[]).await
    }
}
