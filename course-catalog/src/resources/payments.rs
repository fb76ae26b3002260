use crate::permissions::Permission;
use crate::resources::{CatalogResource, ResourceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
    #[serde(other)]
    Unknown,
}

/// A payment recorded by the checkout flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: ResourceId,
    pub user_id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<ResourceId>,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CatalogResource for Payment {
    const NAME: &'static str = "payments";
    const PATH: &'static str = "/payments";
    const ENVELOPE_KEY: &'static str = "payments";
    // Read-only from the dashboards; refunds go through the provider
    const MANAGE: Option<Permission> = None;
}
