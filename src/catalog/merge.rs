use std::collections::HashMap;

use futures::future::try_join_all;
use log::{debug, error};

use crate::catalog::RecipeCatalog;
use crate::model::Recipe;
use crate::RecipeError;

/// Results requested from the catalog for each ingredient
pub const INGREDIENT_SEARCH_COUNT: u32 = 5;

/// Search once per ingredient, concurrently, and merge the results by recipe id.
///
/// All searches must succeed; the first failure fails the whole batch and the
/// remaining in-flight searches are dropped. An empty ingredient list returns
/// an empty result without touching the catalog.
pub async fn search_by_ingredients<C>(
    catalog: &C,
    ingredients: &[String],
) -> Result<Vec<Recipe>, RecipeError>
where
    C: RecipeCatalog + ?Sized,
{
    if ingredients.is_empty() {
        return Ok(Vec::new());
    }

    debug!(
        "Searching {} for {} ingredients",
        catalog.catalog_name(),
        ingredients.len()
    );

    let searches = ingredients
        .iter()
        .map(|ingredient| catalog.search(ingredient, INGREDIENT_SEARCH_COUNT));

    let results = try_join_all(searches).await.map_err(|e| {
        error!("Error searching recipes with ingredients: {}", e);
        e
    })?;

    Ok(merge_by_id(results.into_iter().flatten()))
}

/// Collapse recipes sharing an id. A later record replaces an earlier one,
/// but keeps the position where that id was first seen.
pub fn merge_by_id<I>(recipes: I) -> Vec<Recipe>
where
    I: IntoIterator<Item = Recipe>,
{
    let mut positions: HashMap<i64, usize> = HashMap::new();
    let mut merged: Vec<Recipe> = Vec::new();

    for recipe in recipes {
        match positions.get(&recipe.id) {
            Some(&index) => merged[index] = recipe,
            None => {
                positions.insert(recipe.id, merged.len());
                merged.push(recipe);
            }
        }
    }

    merged
}
