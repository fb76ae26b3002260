use crate::errors::CatalogError;
use crate::permissions::{Permission, Role};
use crate::resources::{item_path, CatalogResource, ResourceApi, ResourceId};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: ResourceId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CatalogResource for User {
    const NAME: &'static str = "users";
    const PATH: &'static str = "/users";
    const ENVELOPE_KEY: &'static str = "users";
    const MANAGE: Option<Permission> = Some(Permission::ManageUsers);
}

#[derive(Debug, Serialize)]
struct RoleChange {
    role: Role,
}

impl ResourceApi<'_, User> {
    /// Changes a user's role on behalf of `acting_role`
    pub async fn assign_role(
        &self,
        acting_role: Role,
        id: &ResourceId,
        role: Role,
    ) -> Result<User, CatalogError> {
        self.client.authorize(acting_role, Permission::ManageRoles)?;
        let path = format!("{}/role", item_path(User::PATH, id));
        let user = self.client.api().patch(&path, &RoleChange { role }).await?;
        info!("Assigned role {} to user {}", role, id);
        Ok(user)
    }
}
