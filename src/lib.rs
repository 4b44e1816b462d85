//! Recipe discovery core: random and keyword recipe queries against a remote
//! catalog, ingredient-photo searches and an on-device favorites collection.

pub mod aggregate;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod model;
pub mod recognition;
pub mod uniffi_bindings;

// Re-export main types
pub use aggregate::{first_group_steps, unique_equipment, unique_step_ingredients};
pub use builder::{RecipeDetail, RecipeScout, RecipeScoutBuilder, StorageBackend};
pub use catalog::{merge_by_id, RecipeCatalog, SpoonacularCatalog};
pub use crate::config::AppConfig;
pub use error::RecipeError;
pub use favorites::{Favorites, FavoritesStore, FileStore, KeyValueStore, MemoryStore};
pub use model::{Ingredient, InstructionGroup, Recipe, Step, StepItem, StepLength};
pub use recognition::{ImageSource, IngredientRecognizer, IngredientSelection};

fn default_catalog() -> Result<(SpoonacularCatalog, AppConfig), RecipeError> {
    let config = AppConfig::load()?;
    let catalog = SpoonacularCatalog::new(&config.catalog)?;
    Ok((catalog, config))
}

/// Fetch the random feed using `config.toml` / environment configuration
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipes = recipe_scout::random_recipes(10).await?;
/// # Ok(())
/// # }
/// ```
pub async fn random_recipes(count: u32) -> Result<Vec<Recipe>, RecipeError> {
    let (catalog, _) = default_catalog()?;
    catalog.get_random(count).await
}

/// Keyword search using `config.toml` / environment configuration
pub async fn search_recipes(query: &str, count: u32) -> Result<Vec<Recipe>, RecipeError> {
    let (catalog, _) = default_catalog()?;
    catalog.search(query, count).await
}

/// One search per ingredient, merged by recipe id
pub async fn search_recipes_with_ingredients(
    ingredients: &[String],
) -> Result<Vec<Recipe>, RecipeError> {
    if ingredients.is_empty() {
        return Ok(Vec::new());
    }
    let (catalog, _) = default_catalog()?;
    catalog::search_by_ingredients(&catalog, ingredients).await
}

/// Full information for a single recipe
pub async fn recipe_information(id: i64) -> Result<Recipe, RecipeError> {
    let (catalog, _) = default_catalog()?;
    catalog.get_full_information(id).await
}
