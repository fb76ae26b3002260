use crate::permissions::Permission;
use crate::resources::{CatalogResource, ResourceId};
use serde::{Deserialize, Serialize};

/// A lesson topic inside a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: ResourceId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl CatalogResource for Subject {
    const NAME: &'static str = "subjects";
    const PATH: &'static str = "/subjects";
    const ENVELOPE_KEY: &'static str = "subjects";
    const MANAGE: Option<Permission> = Some(Permission::ManageSubjects);
}
