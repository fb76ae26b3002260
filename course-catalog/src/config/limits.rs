use confique::Config;

/// Page size limits applied to list requests
#[derive(Debug, Config, Clone, PartialEq)]
pub struct LimitsConfig {
    /// Page size used when the caller doesn't ask for one (default: 10)
    #[config(env = "CATALOG_LIMITS_DEFAULT_PAGE_SIZE", default = 10)]
    pub default_page_size: u32,

    /// Largest page size accepted by the courses endpoint (default: 50)
    #[config(env = "CATALOG_LIMITS_COURSES_MAX_PAGE_SIZE", default = 50)]
    pub courses_max_page_size: u32,

    /// Largest page size accepted by every other collection (default: 100)
    #[config(env = "CATALOG_LIMITS_MAX_PAGE_SIZE", default = 100)]
    pub max_page_size: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            courses_max_page_size: 50,
            max_page_size: 100,
        }
    }
}
