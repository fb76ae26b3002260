use crate::client::CatalogClient;
use crate::config::LimitsConfig;
use crate::errors::CatalogError;
use crate::permissions::{Permission, Role};
use adaptive_list::{FilterValue, ListRequestIntent, Pagination, QueryShape};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use tokio_util::sync::CancellationToken;

// Reexport modules
pub mod categories;
pub mod courses;
pub mod levels;
pub mod payments;
pub mod plans;
pub mod subjects;
pub mod subscriptions;
pub mod teachers;
pub mod users;

/// Identifier of a catalog record; the API uses both numeric ids and UUID strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{}", n),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(value: i64) -> Self {
        ResourceId::Number(value)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        ResourceId::Text(value.to_string())
    }
}

impl From<ResourceId> for FilterValue {
    fn from(value: ResourceId) -> Self {
        match value {
            ResourceId::Number(n) => FilterValue::Number(n),
            ResourceId::Text(s) => FilterValue::Text(s),
        }
    }
}

/// A collection exposed by the catalog API
pub trait CatalogResource: DeserializeOwned + Send + 'static {
    /// Human-readable name used in error messages
    const NAME: &'static str;
    /// Collection endpoint
    const PATH: &'static str;
    /// Array key of the enveloped list response
    const ENVELOPE_KEY: &'static str;
    /// Permission required to create, update or delete records.
    /// `None` marks a read-only collection.
    const MANAGE: Option<Permission>;

    /// Largest page size the endpoint accepts
    fn max_page_size(limits: &LimitsConfig) -> u32 {
        limits.max_page_size
    }
}

/// Page/limit/filters of a list call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub filters: Vec<(String, FilterValue)>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }
}

/// One decoded page of a collection
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    pub items: Vec<R>,
    pub pagination: Pagination,
    pub shape: QueryShape,
}

/// CRUD access to one collection
pub struct ResourceApi<'a, R> {
    client: &'a CatalogClient,
    _resource: PhantomData<R>,
}

impl<'a, R: CatalogResource> ResourceApi<'a, R> {
    pub(crate) fn new(client: &'a CatalogClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// Turns a list query into a fetch intent with this resource's path, envelope and page size cap
    pub fn intent(&self, query: ListQuery) -> ListRequestIntent {
        let limits = &self.client.config.limits;
        ListRequestIntent::new(R::PATH)
            .with_envelope_key(R::ENVELOPE_KEY)
            .with_max_limit(R::max_page_size(limits))
            .with_limit(query.limit.unwrap_or(limits.default_page_size))
            .with_page(query.page.unwrap_or(1))
            .with_filters(query.filters)
    }

    pub async fn list(&self, query: ListQuery) -> Result<Page<R>, CatalogError> {
        self.list_with_cancel(query, &CancellationToken::new())
            .await
    }

    pub async fn list_with_cancel(
        &self,
        query: ListQuery,
        cancel: &CancellationToken,
    ) -> Result<Page<R>, CatalogError> {
        let outcome = self
            .client
            .fetcher()
            .fetch_list_with_cancel(self.intent(query), cancel)
            .await?;

        let items = outcome
            .items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<R>, _>>()
            .map_err(|source| CatalogError::Decode {
                resource: R::NAME,
                source,
            })?;
        debug!(
            "Listed {} {} via {} shape",
            items.len(),
            R::NAME,
            outcome.shape
        );

        Ok(Page {
            items,
            pagination: outcome.pagination,
            shape: outcome.shape,
        })
    }

    pub async fn get(&self, id: &ResourceId) -> Result<R, CatalogError> {
        Ok(self.client.api().get(&item_path(R::PATH, id)).await?)
    }

    /// Creates a record on behalf of `role`
    pub async fn create<B>(&self, role: Role, payload: &B) -> Result<R, CatalogError>
    where
        B: Serialize + ?Sized,
    {
        self.ensure_can_manage(role)?;
        Ok(self.client.api().post(R::PATH, payload).await?)
    }

    /// Partially updates a record on behalf of `role`
    pub async fn update<B>(
        &self,
        role: Role,
        id: &ResourceId,
        payload: &B,
    ) -> Result<R, CatalogError>
    where
        B: Serialize + ?Sized,
    {
        self.ensure_can_manage(role)?;
        Ok(self.client.api().patch(&item_path(R::PATH, id), payload).await?)
    }

    pub async fn remove(&self, role: Role, id: &ResourceId) -> Result<(), CatalogError> {
        self.ensure_can_manage(role)?;
        Ok(self.client.api().delete(&item_path(R::PATH, id)).await?)
    }

    /// Fails unless `role` may create, update or delete this resource
    pub fn ensure_can_manage(&self, role: Role) -> Result<(), CatalogError> {
        match R::MANAGE {
            Some(permission) => self.client.authorize(role, permission),
            None => Err(CatalogError::ReadOnly { resource: R::NAME }),
        }
    }
}

pub(crate) fn item_path(collection: &str, id: &ResourceId) -> String {
    format!("{}/{}", collection.trim_end_matches('/'), id)
}
