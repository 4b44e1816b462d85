//! Response shapes of the catalog endpoints and their normalization into [`Recipe`].
//!
//! The endpoints disagree on which fields they fill in and sometimes send
//! `null` for lists, so everything here is optional until normalized.

use serde::Deserialize;

use crate::model::{Ingredient, InstructionGroup, Recipe};
use crate::RecipeError;

#[derive(Debug, Deserialize)]
struct RandomResponse {
    recipes: Option<Vec<CatalogRecipe>>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Option<Vec<CatalogRecipe>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogRecipe {
    id: Option<i64>,
    title: Option<String>,
    image: Option<String>,
    ready_in_minutes: Option<u32>,
    servings: Option<u32>,
    source_url: Option<String>,
    summary: Option<String>,
    instructions: Option<String>,
    extended_ingredients: Option<Vec<CatalogIngredient>>,
    analyzed_instructions: Option<Vec<InstructionGroup>>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogIngredient {
    id: Option<i64>,
    name: Option<String>,
    amount: Option<f64>,
    unit: Option<String>,
    image: Option<String>,
}

impl CatalogRecipe {
    fn into_recipe(self) -> Result<Recipe, RecipeError> {
        let id = self.id.ok_or_else(|| {
            RecipeError::InvalidRecipeData(format!(
                "recipe '{}' has no id",
                self.title.as_deref().unwrap_or_default()
            ))
        })?;

        Ok(Recipe {
            id,
            title: self.title.unwrap_or_default(),
            image: self.image,
            ready_in_minutes: self.ready_in_minutes,
            servings: self.servings,
            source_url: self.source_url,
            summary: self.summary,
            instructions: self.instructions,
            extended_ingredients: self
                .extended_ingredients
                .unwrap_or_default()
                .into_iter()
                .map(CatalogIngredient::into_ingredient)
                .collect(),
            analyzed_instructions: self.analyzed_instructions.unwrap_or_default(),
        })
    }
}

impl CatalogIngredient {
    fn into_ingredient(self) -> Ingredient {
        Ingredient {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            amount: self.amount.unwrap_or_default(),
            unit: self.unit.unwrap_or_default(),
            image: self.image,
        }
    }
}

fn decode<'a, T: Deserialize<'a>>(body: &'a str, endpoint: &str) -> Result<T, RecipeError> {
    serde_json::from_str(body).map_err(|e| {
        RecipeError::GatewayError(format!("invalid response shape from {}: {}", endpoint, e))
    })
}

/// A list entry without an id is a malformed response, not bad caller data
fn normalize_all(
    recipes: Vec<CatalogRecipe>,
    endpoint: &str,
) -> Result<Vec<Recipe>, RecipeError> {
    recipes
        .into_iter()
        .map(|recipe| {
            recipe.into_recipe().map_err(|e| match e {
                RecipeError::InvalidRecipeData(msg) => RecipeError::GatewayError(format!(
                    "invalid response shape from {}: {}",
                    endpoint, msg
                )),
                other => other,
            })
        })
        .collect()
}

/// Body of the random endpoint: `{ "recipes": [...] }`
pub(crate) fn parse_random(body: &str) -> Result<Vec<Recipe>, RecipeError> {
    let response: RandomResponse = decode(body, "random")?;
    let recipes = response.recipes.ok_or_else(|| {
        RecipeError::GatewayError("random response is missing 'recipes'".to_string())
    })?;
    normalize_all(recipes, "random")
}

/// Body of the search endpoint: `{ "results": [...] }`
pub(crate) fn parse_search(body: &str) -> Result<Vec<Recipe>, RecipeError> {
    let response: SearchResponse = decode(body, "search")?;
    let results = response.results.ok_or_else(|| {
        RecipeError::GatewayError("search response is missing 'results'".to_string())
    })?;
    normalize_all(results, "search")
}

/// Body of the information endpoint: a single recipe object
pub(crate) fn parse_information(body: &str) -> Result<Recipe, RecipeError> {
    let recipe: CatalogRecipe = decode(body, "information")?;
    recipe.into_recipe()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_defaults_missing_lists() {
        let body = r#"{
            "results": [
                {"id": 1, "title": "Omelette", "image": "o.jpg", "readyInMinutes": 10, "servings": 1},
                {"id": 2, "title": "Pancakes", "analyzedInstructions": null, "extendedIngredients": null}
            ],
            "offset": 0,
            "number": 2,
            "totalResults": 120
        }"#;

        let recipes = parse_search(body).unwrap();
        assert_eq!(recipes.len(), 2);
        assert!(recipes.iter().all(|r| r.analyzed_instructions.is_empty()));
        assert!(recipes.iter().all(|r| r.extended_ingredients.is_empty()));
        assert_eq!(recipes[0].ready_in_minutes, Some(10));
        assert_eq!(recipes[1].servings, None);
    }

    #[test]
    fn test_search_missing_results_is_gateway_error() {
        let err = parse_search(r#"{"status": "failure"}"#).unwrap_err();
        assert!(matches!(err, RecipeError::GatewayError(_)));
    }

    #[test]
    fn test_random_parses_recipes() {
        let body = r#"{"recipes": [{
            "id": 42,
            "title": "Shakshuka",
            "extendedIngredients": [{"id": 1123, "name": "egg", "amount": 4, "unit": "", "image": null}],
            "analyzedInstructions": [{"name": "", "steps": [{"number": 1, "step": "Crack eggs.", "ingredients": [], "equipment": [{"id": 1, "name": "pan", "image": "pan.png"}]}]}]
        }]}"#;

        let recipes = parse_random(body).unwrap();
        assert_eq!(recipes.len(), 1);
        assert!(recipes[0].is_fully_loaded());
        assert_eq!(recipes[0].extended_ingredients[0].amount, 4.0);
        assert_eq!(recipes[0].extended_ingredients[0].image, None);
    }

    #[test]
    fn test_ingredient_nulls_are_defaulted() {
        let body = r#"{"id": 5, "extendedIngredients": [{"id": null, "name": "salt", "amount": null, "unit": null}]}"#;
        let recipe = parse_information(body).unwrap();
        let salt = &recipe.extended_ingredients[0];
        assert_eq!(salt.id, 0);
        assert_eq!(salt.name, "salt");
        assert_eq!(salt.amount, 0.0);
        assert!(salt.unit.is_empty());
    }

    #[test]
    fn test_recipe_without_id_is_invalid() {
        let err = parse_information(r#"{"title": "Mystery"}"#).unwrap_err();
        assert!(matches!(err, RecipeError::InvalidRecipeData(_)));
        assert!(err.to_string().contains("Mystery"));
    }

    #[test]
    fn test_list_entry_without_id_is_gateway_error() {
        let err = parse_search(r#"{"results": [{"title": "no id"}]}"#).unwrap_err();
        assert!(matches!(err, RecipeError::GatewayError(_)));

        let err = parse_random(r#"{"recipes": [{"id": 1}, {"title": "no id"}]}"#).unwrap_err();
        assert!(matches!(err, RecipeError::GatewayError(_)));
    }

    #[test]
    fn test_non_json_is_gateway_error() {
        let err = parse_random("<html>rate limited</html>").unwrap_err();
        assert!(err.is_gateway_failure());
    }
}
