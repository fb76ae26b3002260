use crate::permissions::Permission;
use crate::resources::{CatalogResource, ResourceId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: ResourceId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<ResourceId>,
}

impl CatalogResource for Teacher {
    const NAME: &'static str = "teachers";
    const PATH: &'static str = "/teachers";
    const ENVELOPE_KEY: &'static str = "teachers";
    const MANAGE: Option<Permission> = Some(Permission::ManageTeachers);
}
