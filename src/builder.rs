use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::aggregate::unique_equipment;
use crate::catalog::{search_by_ingredients, RecipeCatalog, SpoonacularCatalog};
use crate::config::AppConfig;
use crate::favorites::{FavoritesStore, FileStore, KeyValueStore, MemoryStore};
use crate::recognition::{ImageSource, IngredientRecognizer, IngredientSelection};
use crate::{Recipe, RecipeError};

/// Where favorites are persisted
#[derive(Debug, Clone, Default)]
pub enum StorageBackend {
    /// One JSON file per key under the configured directory (default)
    #[default]
    File,
    /// Kept in memory for the lifetime of the client
    Memory,
}

/// A recipe prepared for the detail view
#[derive(Debug, Clone)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    /// Distinct equipment used by the steps
    pub equipment: Vec<String>,
    pub is_favorite: bool,
}

/// Builder for configuring a [`RecipeScout`] client
#[derive(Debug, Default)]
pub struct RecipeScoutBuilder {
    config: Option<AppConfig>,
    api_key: Option<String>,
    base_url: Option<String>,
    recognition_url: Option<String>,
    storage_dir: Option<String>,
    storage: StorageBackend,
    timeout: Option<Duration>,
}

impl RecipeScoutBuilder {
    /// Start from an explicit configuration instead of `config.toml` and the environment
    ///
    /// # Example
    /// ```
    /// use recipe_scout::{AppConfig, RecipeScout};
    ///
    /// let builder = RecipeScout::builder().config(AppConfig::default());
    /// ```
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the catalog API key
    ///
    /// # Example
    /// ```
    /// use recipe_scout::RecipeScout;
    ///
    /// let builder = RecipeScout::builder().api_key("your-api-key");
    /// ```
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Point the client at another catalog host (proxies, test servers)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Base URL of the ingredient recognition service
    pub fn recognition_url(mut self, url: impl Into<String>) -> Self {
        self.recognition_url = Some(url.into());
        self
    }

    /// Directory for the on-disk favorites store
    pub fn storage_dir(mut self, dir: impl Into<String>) -> Self {
        self.storage_dir = Some(dir.into());
        self.storage = StorageBackend::File;
        self
    }

    /// Keep favorites in memory only
    pub fn in_memory_storage(mut self) -> Self {
        self.storage = StorageBackend::Memory;
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_scout::RecipeScout;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeScout::builder().timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns `RecipeError` if:
    /// - The configuration cannot be loaded
    /// - No catalog API key is available
    /// - An HTTP client cannot be created
    pub fn build(self) -> Result<RecipeScout, RecipeError> {
        let mut config = match self.config {
            Some(config) => config,
            None => AppConfig::load()?,
        };

        if let Some(key) = self.api_key {
            config.catalog.api_key = Some(key);
        }
        if let Some(url) = self.base_url {
            config.catalog.base_url = url;
        }
        if let Some(url) = self.recognition_url {
            config.recognition.base_url = url;
        }
        if let Some(dir) = self.storage_dir {
            config.storage.dir = dir;
        }
        if let Some(timeout) = self.timeout {
            config.catalog.timeout = timeout.as_secs().max(1);
            config.recognition.timeout = timeout.as_secs().max(1);
        }

        let catalog = SpoonacularCatalog::new(&config.catalog)?;
        let recognizer = IngredientRecognizer::new(&config.recognition)?;

        let backend: Arc<dyn KeyValueStore> = match self.storage {
            StorageBackend::File => Arc::new(FileStore::new(&config.storage.dir)),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
        };
        debug!("Favorites stored via {:?} backend", self.storage);

        Ok(RecipeScout {
            catalog: Box::new(catalog),
            favorites: FavoritesStore::with_key(backend, config.storage.favorites_key.clone()),
            recognizer,
            config,
        })
    }
}

/// Main entry point: catalog queries, ingredient scans and favorites behind one handle
pub struct RecipeScout {
    catalog: Box<dyn RecipeCatalog>,
    favorites: FavoritesStore,
    recognizer: IngredientRecognizer,
    config: AppConfig,
}

impl RecipeScout {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use recipe_scout::RecipeScout;
    ///
    /// let builder = RecipeScout::builder();
    /// ```
    pub fn builder() -> RecipeScoutBuilder {
        RecipeScoutBuilder::default()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &dyn RecipeCatalog {
        self.catalog.as_ref()
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Random feed using the configured count
    pub async fn random(&self) -> Result<Vec<Recipe>, RecipeError> {
        self.catalog.get_random(self.config.catalog.random_count).await
    }

    /// Keyword search using the configured count
    pub async fn search(&self, query: &str) -> Result<Vec<Recipe>, RecipeError> {
        self.catalog
            .search(query, self.config.catalog.search_count)
            .await
    }

    pub async fn search_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<Recipe>, RecipeError> {
        search_by_ingredients(self.catalog.as_ref(), ingredients).await
    }

    /// Detect ingredients in a photo
    pub async fn scan(&self, image: ImageSource) -> Result<IngredientSelection, RecipeError> {
        let detected = self.recognizer.recognize(image).await?;
        Ok(IngredientSelection::new(detected))
    }

    /// Detect ingredients in a photo and search with all of them selected
    pub async fn scan_and_search(&self, image: ImageSource) -> Result<Vec<Recipe>, RecipeError> {
        let selection = self.scan(image).await?;
        self.search_by_ingredients(selection.selected()).await
    }

    /// Everything the detail view needs, fetching full information when `recipe` lacks steps
    pub async fn detail(&self, recipe: Recipe) -> Result<RecipeDetail, RecipeError> {
        let recipe = self.catalog.ensure_full(recipe).await?;
        let is_favorite = self.favorites.contains(recipe.id).await;
        Ok(RecipeDetail {
            equipment: unique_equipment(&recipe).into_iter().collect(),
            is_favorite,
            recipe,
        })
    }

    /// Detail for a recipe handed over as serialized JSON
    pub async fn detail_from_json(&self, json: &str) -> Result<RecipeDetail, RecipeError> {
        self.detail(Recipe::from_json(json)?).await
    }

    /// Toggle the favorite state of `recipe`, returning the new state
    pub async fn toggle_favorite(&self, recipe: Recipe) -> Result<bool, RecipeError> {
        self.favorites.toggle(recipe).await
    }
}
