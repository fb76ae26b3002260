use crate::permissions::Permission;
use crate::resources::{CatalogResource, ResourceId};
use serde::{Deserialize, Serialize};

/// A difficulty level (beginner, intermediate, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: ResourceId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sort position, lower is easier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl CatalogResource for Level {
    const NAME: &'static str = "levels";
    const PATH: &'static str = "/levels";
    const ENVELOPE_KEY: &'static str = "levels";
    const MANAGE: Option<Permission> = Some(Permission::ManageLevels);
}
