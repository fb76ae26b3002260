use crate::permissions::Permission;
use crate::resources::{CatalogResource, ResourceId};
use serde::{Deserialize, Serialize};

/// A subscription plan offered on the pricing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: ResourceId,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Length of one billing period in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl CatalogResource for Plan {
    const NAME: &'static str = "plans";
    const PATH: &'static str = "/plans";
    const ENVELOPE_KEY: &'static str = "plans";
    const MANAGE: Option<Permission> = Some(Permission::ManagePlans);
}
