use crate::permissions::Permission;
use crate::resources::{CatalogResource, ResourceId};
use serde::{Deserialize, Serialize};

/// A course category shown in the catalog navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: ResourceId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CatalogResource for Category {
    const NAME: &'static str = "categories";
    const PATH: &'static str = "/categories";
    const ENVELOPE_KEY: &'static str = "categories";
    const MANAGE: Option<Permission> = Some(Permission::ManageCategories);
}

/// Payload for creating or renaming a category
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
