mod merge;
mod spoonacular;
mod wire;

pub use merge::{merge_by_id, search_by_ingredients, INGREDIENT_SEARCH_COUNT};
pub use spoonacular::SpoonacularCatalog;

use async_trait::async_trait;
use log::debug;

use crate::model::Recipe;
use crate::RecipeError;

/// Access to a remote recipe catalog. Every call goes to the network; nothing is cached.
#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    /// Get the catalog name (e.g., "spoonacular")
    fn catalog_name(&self) -> &str;

    /// Fetch `count` random recipes with instructions and ingredients populated
    async fn get_random(&self, count: u32) -> Result<Vec<Recipe>, RecipeError>;

    /// Keyword search returning at most `count` recipes in canonical shape
    async fn search(&self, query: &str, count: u32) -> Result<Vec<Recipe>, RecipeError>;

    /// Fetch one recipe with complete instructions and ingredients
    async fn get_full_information(&self, id: i64) -> Result<Recipe, RecipeError>;

    /// Return the recipe unchanged when it is fully loaded, otherwise refetch it by id
    async fn ensure_full(&self, recipe: Recipe) -> Result<Recipe, RecipeError> {
        if recipe.is_fully_loaded() {
            return Ok(recipe);
        }
        debug!(
            "Recipe {} has no analyzed instructions, fetching full information",
            recipe.id
        );
        self.get_full_information(recipe.id).await
    }
}
