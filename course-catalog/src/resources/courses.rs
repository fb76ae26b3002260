use crate::config::LimitsConfig;
use crate::permissions::Permission;
use crate::resources::{CatalogResource, ListQuery, ResourceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: ResourceId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in the platform currency, absent for free courses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CatalogResource for Course {
    const NAME: &'static str = "courses";
    const PATH: &'static str = "/courses";
    const ENVELOPE_KEY: &'static str = "courses";
    const MANAGE: Option<Permission> = Some(Permission::ManageCourses);

    fn max_page_size(limits: &LimitsConfig) -> u32 {
        limits.courses_max_page_size
    }
}

/// Typed filters of the course listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseFilter {
    pub category_id: Option<ResourceId>,
    pub level_id: Option<ResourceId>,
    pub teacher_id: Option<ResourceId>,
    pub search: Option<String>,
}

impl CourseFilter {
    /// Adds every set field to the query as a filter
    pub fn apply(self, mut query: ListQuery) -> ListQuery {
        if let Some(id) = self.category_id {
            query = query.filter("categoryId", id);
        }
        if let Some(id) = self.level_id {
            query = query.filter("levelId", id);
        }
        if let Some(id) = self.teacher_id {
            query = query.filter("teacherId", id);
        }
        if let Some(search) = self.search.filter(|s| !s.trim().is_empty()) {
            query = query.filter("search", search);
        }
        query
    }
}
