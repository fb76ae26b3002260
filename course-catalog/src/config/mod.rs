pub use crate::config::limits::LimitsConfig;
use confique::Config;
use std::path::Path;
use std::time::Duration;

pub mod limits;

/// Main configuration structure for the catalog client
#[derive(Debug, Config, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Base URL of the catalog REST API (default: http://localhost:3000)
    #[config(env = "CATALOG_API_URL", default = "http://localhost:3000")]
    pub api_url: String,

    /// Total timeout of a single request in seconds (default: 30)
    #[config(env = "CATALOG_REQUEST_TIMEOUT", default = 30)]
    pub request_timeout: u64,

    /// Connect timeout in seconds (default: 5)
    #[config(env = "CATALOG_CONNECT_TIMEOUT", default = 5)]
    pub connect_timeout: u64,

    /// Page size limits
    #[config(nested)]
    pub limits: LimitsConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            request_timeout: 30,
            connect_timeout: 5,
            limits: LimitsConfig::default(),
        }
    }
}

impl CatalogConfig {
    /// Loads the configuration from `CATALOG_*` environment variables over the defaults
    pub fn load() -> Result<Self, confique::Error> {
        Self::builder().env().load()
    }

    /// Loads the configuration from environment variables, then a TOML file, then the defaults
    pub fn load_with_file(path: impl AsRef<Path>) -> Result<Self, confique::Error> {
        Self::builder().env().file(path.as_ref()).load()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    #[cfg(test)]
    pub fn for_test_with_mock(api_mock: &wiremock::MockServer) -> Self {
        Self {
            api_url: api_mock.uri(),
            request_timeout: 5,
            connect_timeout: 1,
            limits: LimitsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn clear_env() {
        for (name, _value) in std::env::vars() {
            if name.starts_with("CATALOG_") {
                std::env::remove_var(name);
            }
        }
    }

    #[test]
    fn test_config_sources() {
        // Environment is process wide, so the scenarios run sequentially in one test
        clear_env();
        let config = CatalogConfig::load().unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.limits.courses_max_page_size, 50);

        std::env::set_var("CATALOG_API_URL", "https://api.example.com");
        std::env::set_var("CATALOG_LIMITS_MAX_PAGE_SIZE", "250");
        let config = CatalogConfig::load().unwrap();
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.limits.max_page_size, 250);
        assert_eq!(config.limits.default_page_size, 10);

        let path = std::env::temp_dir().join(format!("catalog-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "api_url = \"https://file.example.com\"\nrequest_timeout = 12\n\n\
             [limits]\ncourses_max_page_size = 25"
        )
        .unwrap();
        drop(file);

        // Environment wins over the file
        let config = CatalogConfig::load_with_file(&path).unwrap();
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.request_timeout, 12);
        assert_eq!(config.limits.courses_max_page_size, 25);

        clear_env();
        let config = CatalogConfig::load_with_file(&path).unwrap();
        assert_eq!(config.api_url, "https://file.example.com");
        assert_eq!(config.limits.max_page_size, 100);

        std::env::set_var("CATALOG_REQUEST_TIMEOUT", "soon");
        assert!(CatalogConfig::load().is_err());

        clear_env();
        std::fs::remove_file(&path).unwrap();
    }
}
