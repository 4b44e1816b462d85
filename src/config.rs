use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Remote recipe catalog access
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Ingredient recognition service
    #[serde(default)]
    pub recognition: RecognitionConfig,
    /// On-device storage for favorites
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Configuration for the recipe catalog
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,
    /// API key passed as the `apiKey` query parameter (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Number of results requested per keyword search
    #[serde(default = "default_search_count")]
    pub search_count: u32,
    /// Number of recipes requested for the random feed
    #[serde(default = "default_random_count")]
    pub random_count: u32,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

/// Endpoint paths relative to the catalog base URL
#[derive(Debug, Deserialize, Clone)]
pub struct EndpointsConfig {
    #[serde(default = "default_random_endpoint")]
    pub random: String,
    #[serde(default = "default_search_endpoint")]
    pub search: String,
    /// Path template, `{id}` is replaced by the recipe id
    #[serde(default = "default_information_endpoint")]
    pub information: String,
}

/// Configuration for the ingredient recognition service
#[derive(Debug, Deserialize, Clone)]
pub struct RecognitionConfig {
    #[serde(default = "default_recognition_base_url")]
    pub base_url: String,
    #[serde(default = "default_recognition_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for local persistence
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one file per stored key
    #[serde(default = "default_storage_dir")]
    pub dir: String,
    /// Key under which the favorites collection is stored
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_base_url(),
            api_key: None,
            timeout: default_timeout(),
            search_count: default_search_count(),
            random_count: default_random_count(),
            endpoints: EndpointsConfig::default(),
        }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            random: default_random_endpoint(),
            search: default_search_endpoint(),
            information: default_information_endpoint(),
        }
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            base_url: default_recognition_base_url(),
            endpoint: default_recognition_endpoint(),
            timeout: default_timeout(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            favorites_key: default_favorites_key(),
        }
    }
}

impl CatalogConfig {
    /// API key from configuration, falling back to `SPOONACULAR_API_KEY`
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var("SPOONACULAR_API_KEY").ok())
    }
}

// Default value functions
fn default_catalog_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_search_count() -> u32 {
    5
}

fn default_random_count() -> u32 {
    10
}

fn default_random_endpoint() -> String {
    "/recipes/random".to_string()
}

fn default_search_endpoint() -> String {
    "/recipes/complexSearch".to_string()
}

fn default_information_endpoint() -> String {
    "/recipes/{id}/information".to_string()
}

fn default_recognition_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_recognition_endpoint() -> String {
    "/api/process-image".to_string()
}

fn default_storage_dir() -> String {
    ".recipe-scout".to_string()
}

fn default_favorites_key() -> String {
    "favorites".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_SCOUT__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_SCOUT__CATALOG__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables, see [`AppConfig::load`]
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_SCOUT__CATALOG__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE_SCOUT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
