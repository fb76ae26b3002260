use crate::permissions::Permission;
use crate::resources::{CatalogResource, ListQuery, ResourceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubscriptionStatus {
    Active,
    Pending,
    Cancelled,
    Expired,
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "ACTIVE",
            SubscriptionStatus::Pending => "PENDING",
            SubscriptionStatus::Cancelled => "CANCELLED",
            SubscriptionStatus::Expired => "EXPIRED",
            SubscriptionStatus::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: ResourceId,
    pub user_id: ResourceId,
    pub plan_id: ResourceId,
    pub status: SubscriptionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl Subscription {
    /// Whether the subscription grants access at `now`
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active && self.end_date.map_or(true, |end| end > now)
    }
}

impl CatalogResource for Subscription {
    const NAME: &'static str = "subscriptions";
    const PATH: &'static str = "/subscriptions";
    const ENVELOPE_KEY: &'static str = "subscriptions";
    const MANAGE: Option<Permission> = Some(Permission::ManageSubscriptions);
}

/// Typed filters of the subscription listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionFilter {
    pub user_id: Option<ResourceId>,
    pub plan_id: Option<ResourceId>,
    pub status: Option<SubscriptionStatus>,
}

impl SubscriptionFilter {
    pub fn apply(self, mut query: ListQuery) -> ListQuery {
        if let Some(id) = self.user_id {
            query = query.filter("userId", id);
        }
        if let Some(id) = self.plan_id {
            query = query.filter("planId", id);
        }
        if let Some(status) = self.status {
            query = query.filter("status", status.as_str());
        }
        query
    }
}
