//! UniFFI bindings for recipe-scout
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! It wraps the async Rust API with synchronous functions that manage their own tokio runtime.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    AppConfig, FavoritesStore, FileStore, Ingredient, InstructionGroup, Recipe, RecipeError,
    RecipeScout, Step, StepItem, StepLength,
};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible recipe structure
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub source_url: Option<String>,
    pub summary: Option<String>,
    pub instructions: Option<String>,
    pub extended_ingredients: Vec<FfiIngredient>,
    pub analyzed_instructions: Vec<FfiInstructionGroup>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiIngredient {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiInstructionGroup {
    pub name: String,
    pub steps: Vec<FfiStep>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiStep {
    pub number: u32,
    pub step: String,
    pub ingredients: Vec<FfiStepItem>,
    pub equipment: Vec<FfiStepItem>,
    /// Length as number and unit, e.g. 15 "minutes"
    pub length_number: Option<u32>,
    pub length_unit: Option<String>,
}

/// Ingredient or equipment reference inside a step
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiStepItem {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
}

impl From<Recipe> for FfiRecipe {
    fn from(recipe: Recipe) -> Self {
        FfiRecipe {
            id: recipe.id,
            title: recipe.title,
            image: recipe.image,
            ready_in_minutes: recipe.ready_in_minutes,
            servings: recipe.servings,
            source_url: recipe.source_url,
            summary: recipe.summary,
            instructions: recipe.instructions,
            extended_ingredients: recipe
                .extended_ingredients
                .into_iter()
                .map(Into::into)
                .collect(),
            analyzed_instructions: recipe
                .analyzed_instructions
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<FfiRecipe> for Recipe {
    fn from(ffi: FfiRecipe) -> Self {
        Recipe {
            id: ffi.id,
            title: ffi.title,
            image: ffi.image,
            ready_in_minutes: ffi.ready_in_minutes,
            servings: ffi.servings,
            source_url: ffi.source_url,
            summary: ffi.summary,
            instructions: ffi.instructions,
            extended_ingredients: ffi
                .extended_ingredients
                .into_iter()
                .map(Into::into)
                .collect(),
            analyzed_instructions: ffi
                .analyzed_instructions
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<Ingredient> for FfiIngredient {
    fn from(ingredient: Ingredient) -> Self {
        FfiIngredient {
            id: ingredient.id,
            name: ingredient.name,
            amount: ingredient.amount,
            unit: ingredient.unit,
            image: ingredient.image,
        }
    }
}

impl From<FfiIngredient> for Ingredient {
    fn from(ffi: FfiIngredient) -> Self {
        Ingredient {
            id: ffi.id,
            name: ffi.name,
            amount: ffi.amount,
            unit: ffi.unit,
            image: ffi.image,
        }
    }
}

impl From<InstructionGroup> for FfiInstructionGroup {
    fn from(group: InstructionGroup) -> Self {
        FfiInstructionGroup {
            name: group.name,
            steps: group.steps.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<FfiInstructionGroup> for InstructionGroup {
    fn from(ffi: FfiInstructionGroup) -> Self {
        InstructionGroup {
            name: ffi.name,
            steps: ffi.steps.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Step> for FfiStep {
    fn from(step: Step) -> Self {
        let (length_number, length_unit) = match step.length {
            Some(length) => (Some(length.number), Some(length.unit)),
            None => (None, None),
        };
        FfiStep {
            number: step.number,
            step: step.step,
            ingredients: step.ingredients.into_iter().map(Into::into).collect(),
            equipment: step.equipment.into_iter().map(Into::into).collect(),
            length_number,
            length_unit,
        }
    }
}

impl From<FfiStep> for Step {
    fn from(ffi: FfiStep) -> Self {
        Step {
            number: ffi.number,
            step: ffi.step,
            ingredients: ffi.ingredients.into_iter().map(Into::into).collect(),
            equipment: ffi.equipment.into_iter().map(Into::into).collect(),
            length: ffi.length_number.map(|number| StepLength {
                number,
                unit: ffi.length_unit.unwrap_or_default(),
            }),
        }
    }
}

impl From<StepItem> for FfiStepItem {
    fn from(item: StepItem) -> Self {
        FfiStepItem {
            id: item.id,
            name: item.name,
            image: item.image,
        }
    }
}

impl From<FfiStepItem> for StepItem {
    fn from(ffi: FfiStepItem) -> Self {
        StepItem {
            id: ffi.id,
            name: ffi.name,
            image: ffi.image,
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiRecipeError {
    /// The recipe catalog could not be reached or answered badly
    GatewayError { message: String },
    /// Local storage failed
    PersistenceError { message: String },
    /// Recipe payload was malformed
    InvalidRecipeData { message: String },
    /// Ingredient recognition failed
    RecognitionError { message: String },
    /// Configuration error
    ConfigError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiRecipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiRecipeError::GatewayError { message } => write!(f, "Gateway error: {}", message),
            FfiRecipeError::PersistenceError { message } => {
                write!(f, "Persistence error: {}", message)
            }
            FfiRecipeError::InvalidRecipeData { message } => {
                write!(f, "Invalid recipe data: {}", message)
            }
            FfiRecipeError::RecognitionError { message } => {
                write!(f, "Recognition error: {}", message)
            }
            FfiRecipeError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiRecipeError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiRecipeError {}

impl From<RecipeError> for FfiRecipeError {
    fn from(err: RecipeError) -> Self {
        match err {
            RecipeError::GatewayError(msg) => FfiRecipeError::GatewayError { message: msg },
            RecipeError::FetchError(e) => FfiRecipeError::GatewayError {
                message: e.to_string(),
            },
            RecipeError::PersistenceError(msg) => {
                FfiRecipeError::PersistenceError { message: msg }
            }
            RecipeError::InvalidRecipeData(msg) => {
                FfiRecipeError::InvalidRecipeData { message: msg }
            }
            RecipeError::RecognitionError(msg) => {
                FfiRecipeError::RecognitionError { message: msg }
            }
            RecipeError::BuilderError(msg) => FfiRecipeError::ConfigError { message: msg },
            RecipeError::ConfigError(e) => FfiRecipeError::ConfigError {
                message: e.to_string(),
            },
        }
    }
}

/// Client configuration; unset fields fall back to config.toml and the environment
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiClientConfig {
    /// Optional catalog API key (uses SPOONACULAR_API_KEY if not specified)
    pub api_key: Option<String>,
    /// Optional catalog base URL
    pub base_url: Option<String>,
    /// Optional recognition service base URL
    pub recognition_url: Option<String>,
    /// Directory for favorites; the app's documents directory on a device
    pub storage_dir: Option<String>,
    /// Optional timeout in seconds (uses default if not specified)
    pub timeout_seconds: Option<u64>,
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiRecipeError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiRecipeError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

fn create_client(config: Option<FfiClientConfig>) -> Result<RecipeScout, FfiRecipeError> {
    let config = config.unwrap_or_default();
    let mut builder = RecipeScout::builder();

    if let Some(api_key) = config.api_key {
        builder = builder.api_key(api_key);
    }

    if let Some(base_url) = config.base_url {
        builder = builder.base_url(base_url);
    }

    if let Some(url) = config.recognition_url {
        builder = builder.recognition_url(url);
    }

    if let Some(dir) = config.storage_dir {
        builder = builder.storage_dir(dir);
    }

    if let Some(timeout_secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }

    Ok(builder.build()?)
}

/// Favorites only touch local storage, so no catalog key is needed
fn create_favorites(config: Option<FfiClientConfig>) -> Result<FavoritesStore, FfiRecipeError> {
    let mut storage = AppConfig::load().map_err(RecipeError::from)?.storage;
    if let Some(dir) = config.and_then(|c| c.storage_dir) {
        storage.dir = dir;
    }
    Ok(FavoritesStore::with_key(
        Arc::new(FileStore::new(storage.dir)),
        storage.favorites_key,
    ))
}

fn into_ffi(recipes: Vec<Recipe>) -> Vec<FfiRecipe> {
    recipes.into_iter().map(Into::into).collect()
}

/// Fetch random recipes
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn random_recipes(
    count: u32,
    config: Option<FfiClientConfig>,
) -> Result<Vec<FfiRecipe>, FfiRecipeError> {
    let client = create_client(config)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let recipes = client.catalog().get_random(count).await?;
        Ok(into_ffi(recipes))
    })
}

/// Search recipes by keyword
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn search_recipes(
    query: String,
    count: u32,
    config: Option<FfiClientConfig>,
) -> Result<Vec<FfiRecipe>, FfiRecipeError> {
    let client = create_client(config)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let recipes = client.catalog().search(&query, count).await?;
        Ok(into_ffi(recipes))
    })
}

/// One search per ingredient, merged by recipe id
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn search_recipes_with_ingredients(
    ingredients: Vec<String>,
    config: Option<FfiClientConfig>,
) -> Result<Vec<FfiRecipe>, FfiRecipeError> {
    if ingredients.is_empty() {
        return Ok(Vec::new());
    }

    let client = create_client(config)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let recipes = client.search_by_ingredients(&ingredients).await?;
        Ok(into_ffi(recipes))
    })
}

/// Full information for one recipe
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn recipe_information(
    id: i64,
    config: Option<FfiClientConfig>,
) -> Result<FfiRecipe, FfiRecipeError> {
    let client = create_client(config)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let recipe = client.catalog().get_full_information(id).await?;
        Ok(recipe.into())
    })
}

/// Detect ingredient names in the photo at `image_path`
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn recognize_ingredients(
    image_path: String,
    config: Option<FfiClientConfig>,
) -> Result<Vec<String>, FfiRecipeError> {
    let client = create_client(config)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let selection = client
            .scan(crate::ImageSource::Path(image_path))
            .await?;
        Ok(selection.detected().to_vec())
    })
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn load_favorites(config: Option<FfiClientConfig>) -> Result<Vec<FfiRecipe>, FfiRecipeError> {
    let favorites = create_favorites(config)?;
    let rt = create_runtime()?;
    Ok(rt.block_on(async { into_ffi(favorites.list().await) }))
}

/// Add a favorite and return the updated collection
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn add_favorite(
    recipe: FfiRecipe,
    config: Option<FfiClientConfig>,
) -> Result<Vec<FfiRecipe>, FfiRecipeError> {
    let favorites = create_favorites(config)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let favorites = favorites.add(recipe.into()).await?;
        Ok(into_ffi(favorites.into_vec()))
    })
}

/// Remove a favorite and return the updated collection
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn remove_favorite(
    id: i64,
    config: Option<FfiClientConfig>,
) -> Result<Vec<FfiRecipe>, FfiRecipeError> {
    let favorites = create_favorites(config)?;
    let rt = create_runtime()?;
    rt.block_on(async {
        let favorites = favorites.remove(id).await?;
        Ok(into_ffi(favorites.into_vec()))
    })
}

/// Toggle a favorite, returning whether it is a favorite afterwards
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn toggle_favorite(
    recipe: FfiRecipe,
    config: Option<FfiClientConfig>,
) -> Result<bool, FfiRecipeError> {
    let favorites = create_favorites(config)?;
    let rt = create_runtime()?;
    rt.block_on(async { Ok(favorites.toggle(recipe.into()).await?) })
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn is_favorite(id: i64, config: Option<FfiClientConfig>) -> Result<bool, FfiRecipeError> {
    let favorites = create_favorites(config)?;
    let rt = create_runtime()?;
    Ok(rt.block_on(async { favorites.contains(id).await }))
}

/// Distinct equipment names used by the recipe's steps
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn unique_equipment(recipe: FfiRecipe) -> Vec<String> {
    crate::unique_equipment(&recipe.into()).into_iter().collect()
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
