use crate::catalog::{wire, RecipeCatalog};
use crate::config::{CatalogConfig, EndpointsConfig};
use crate::model::Recipe;
use crate::RecipeError;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use std::time::Duration;

/// Recipe catalog backed by the Spoonacular REST API
pub struct SpoonacularCatalog {
    client: Client,
    api_key: String,
    base_url: String,
    endpoints: EndpointsConfig,
}

impl SpoonacularCatalog {
    /// Create a new catalog client from configuration
    pub fn new(config: &CatalogConfig) -> Result<Self, RecipeError> {
        // Try config first, then fall back to environment variable
        let api_key = config.resolve_api_key().ok_or_else(|| {
            RecipeError::BuilderError(
                "SPOONACULAR_API_KEY not found in config or environment".to_string(),
            )
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(SpoonacularCatalog {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            endpoints: config.endpoints.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        SpoonacularCatalog {
            client: Client::new(),
            api_key,
            base_url,
            endpoints: EndpointsConfig::default(),
        }
    }

    /// GET `path` with the API key and `params`, returning the body of a 2xx response
    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<String, RecipeError> {
        debug!("GET {}{}", self.base_url, path);

        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        // Check for HTTP errors
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RecipeError::GatewayError(format!(
                "{} returned {}: {}",
                path, status, error_text
            )));
        }

        Ok(response.text().await?)
    }

    fn information_path(&self, id: i64) -> String {
        self.endpoints.information.replace("{id}", &id.to_string())
    }
}

#[async_trait]
impl RecipeCatalog for SpoonacularCatalog {
    fn catalog_name(&self) -> &str {
        "spoonacular"
    }

    async fn get_random(&self, count: u32) -> Result<Vec<Recipe>, RecipeError> {
        let params = [
            ("number", count.to_string()),
            ("addRecipeInformation", "true".to_string()),
            ("instructionsRequired", "true".to_string()),
        ];

        let result = self
            .get(&self.endpoints.random, &params)
            .await
            .and_then(|body| wire::parse_random(&body));
        result.map_err(|e| {
            error!("Error fetching random recipes: {}", e);
            e
        })
    }

    async fn search(&self, query: &str, count: u32) -> Result<Vec<Recipe>, RecipeError> {
        let params = [
            ("query", query.to_string()),
            ("number", count.to_string()),
            ("instructionsRequired", "true".to_string()),
            ("addRecipeInformation", "true".to_string()),
            ("fillIngredients", "true".to_string()),
        ];

        let result = self
            .get(&self.endpoints.search, &params)
            .await
            .and_then(|body| wire::parse_search(&body));
        result.map_err(|e| {
            error!("Error searching recipes for '{}': {}", query, e);
            e
        })
    }

    async fn get_full_information(&self, id: i64) -> Result<Recipe, RecipeError> {
        let params = [
            ("instructionsRequired", "true".to_string()),
            ("addRecipeInformation", "true".to_string()),
        ];

        let path = self.information_path(id);
        let result = self
            .get(&path, &params)
            .await
            .and_then(|body| wire::parse_information(&body));
        result.map_err(|e| {
            error!("Error fetching recipe information for {}: {}", id, e);
            e
        })
    }
}
