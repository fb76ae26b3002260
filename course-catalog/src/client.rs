use crate::config::CatalogConfig;
use crate::errors::CatalogError;
use crate::permissions::{Permission, Role};
use crate::resources::categories::Category;
use crate::resources::courses::Course;
use crate::resources::levels::Level;
use crate::resources::payments::Payment;
use crate::resources::plans::Plan;
use crate::resources::subjects::Subject;
use crate::resources::subscriptions::Subscription;
use crate::resources::teachers::Teacher;
use crate::resources::users::User;
use crate::resources::{CatalogResource, ResourceApi};
use adaptive_list::{AdaptiveListFetcher, ApiClient, ApiClientBuilder, TokenProvider};
use log::{error, info};
use std::sync::Arc;

/// Entry point to the catalog API: one configured HTTP client shared by every resource
#[derive(Clone)]
pub struct CatalogClient {
    pub config: Arc<CatalogConfig>,
    api: Arc<ApiClient>,
    fetcher: AdaptiveListFetcher,
}

impl CatalogClient {
    /// Creates an anonymous client
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        Self::build(config, None)
    }

    /// Creates a client that authenticates with the provider's bearer token
    pub fn with_token_provider(
        config: CatalogConfig,
        provider: Arc<dyn TokenProvider>,
    ) -> Result<Self, CatalogError> {
        Self::build(config, Some(provider))
    }

    fn build(
        config: CatalogConfig,
        provider: Option<Arc<dyn TokenProvider>>,
    ) -> Result<Self, CatalogError> {
        let mut builder = ApiClientBuilder::new()
            .with_timeout(config.request_timeout())
            .with_connect_timeout(config.connect_timeout());
        if let Some(provider) = provider {
            builder = builder.with_token_provider(provider);
        }

        let api = builder
            .with_base_url(&config.api_url)
            .and_then(|b| b.build())
            .map_err(|e| {
                error!("Failed to create catalog client for {}: {}", config.api_url, e);
                CatalogError::Config(format!("invalid API client settings: {}", e))
            })?;
        info!("Catalog client targeting {}", api.base_url());

        let api = Arc::new(api);
        Ok(Self {
            config: Arc::new(config),
            fetcher: AdaptiveListFetcher::new(api.clone()),
            api,
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn fetcher(&self) -> &AdaptiveListFetcher {
        &self.fetcher
    }

    /// Checks the role/permission table before an operation is attempted
    pub fn authorize(&self, role: Role, permission: Permission) -> Result<(), CatalogError> {
        if role.can(permission) {
            Ok(())
        } else {
            Err(CatalogError::Forbidden { role, permission })
        }
    }

    pub fn resource<R: CatalogResource>(&self) -> ResourceApi<'_, R> {
        ResourceApi::new(self)
    }

    pub fn categories(&self) -> ResourceApi<'_, Category> {
        self.resource()
    }

    pub fn levels(&self) -> ResourceApi<'_, Level> {
        self.resource()
    }

    pub fn courses(&self) -> ResourceApi<'_, Course> {
        self.resource()
    }

    pub fn subjects(&self) -> ResourceApi<'_, Subject> {
        self.resource()
    }

    pub fn plans(&self) -> ResourceApi<'_, Plan> {
        self.resource()
    }

    pub fn subscriptions(&self) -> ResourceApi<'_, Subscription> {
        self.resource()
    }

    pub fn payments(&self) -> ResourceApi<'_, Payment> {
        self.resource()
    }

    pub fn teachers(&self) -> ResourceApi<'_, Teacher> {
        self.resource()
    }

    pub fn users(&self) -> ResourceApi<'_, User> {
        self.resource()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::InMemoryTokenStore;
    use crate::resources::ListQuery;
    use crate::test_utils::TestFixture;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[test]
    fn test_invalid_api_url() {
        let config = CatalogConfig {
            api_url: "not a url".to_string(),
            ..Default::default()
        };
        let result = CatalogClient::new(config);
        assert!(matches!(result, Err(CatalogError::Config(_))));
    }

    #[test]
    fn test_authorize() {
        let client = CatalogClient::new(CatalogConfig::default()).unwrap();
        assert!(client.authorize(Role::Owner, Permission::ManageRoles).is_ok());
        assert!(matches!(
            client.authorize(Role::Teacher, Permission::ManageUsers),
            Err(CatalogError::Forbidden {
                role: Role::Teacher,
                permission: Permission::ManageUsers
            })
        ));
    }

    #[test]
    fn test_clones_share_config() {
        let client = CatalogClient::new(CatalogConfig::default()).unwrap();
        let other = client.clone();
        assert_eq!(Arc::as_ptr(&client.config), Arc::as_ptr(&other.config));
    }

    #[tokio::test]
    async fn test_expired_token_is_dropped() {
        let fixture = TestFixture::new().await;
        let store = Arc::new(InMemoryTokenStore::with_token("stale"));
        let client = CatalogClient::with_token_provider(fixture.config.clone(), store.clone())
            .expect("Failed to create client");

        Mock::given(method("GET"))
            .and(path("/courses"))
            .and(header("authorization", "Bearer stale"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})),
            )
            .expect(1)
            .mount(&fixture.api_mock)
            .await;

        let result = client.courses().list(ListQuery::new()).await;

        assert!(result.is_err());
        assert!(!store.is_signed_in());
        fixture.api_mock.verify().await;
    }
}
