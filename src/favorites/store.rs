use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::favorites::KeyValueStore;
use crate::model::Recipe;
use crate::RecipeError;

const DEFAULT_KEY: &str = "favorites";

/// The user's bookmarked recipes, at most one record per id.
///
/// Serialized as a plain JSON array of recipes. Updates return a new
/// collection instead of mutating this one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(Vec<Recipe>);

impl Favorites {
    /// Build a collection, dropping later records whose id was already seen
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        let mut seen = HashSet::new();
        Favorites(
            recipes
                .into_iter()
                .filter(|recipe| seen.insert(recipe.id))
                .collect(),
        )
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.iter().any(|recipe| recipe.id == id)
    }

    pub fn get(&self, id: i64) -> Option<&Recipe> {
        self.0.iter().find(|recipe| recipe.id == id)
    }

    /// Collection with `recipe` appended, or an unchanged copy if its id is present
    pub fn with(&self, recipe: Recipe) -> Self {
        if self.contains(recipe.id) {
            return self.clone();
        }
        let mut recipes = self.0.clone();
        recipes.push(recipe);
        Favorites(recipes)
    }

    /// Collection without any record carrying `id`
    pub fn without(&self, id: i64) -> Self {
        Favorites(
            self.0
                .iter()
                .filter(|recipe| recipe.id != id)
                .cloned()
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.0.iter()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Recipe> {
        self.0
    }
}

/// Favorites persisted as a single serialized value in a [`KeyValueStore`].
///
/// Every operation is a read-modify-write against storage with no locking;
/// concurrent toggles race and the last write wins.
#[derive(Clone)]
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl FavoritesStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self::with_key(Arc::new(store), DEFAULT_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        FavoritesStore {
            store,
            key: key.into(),
        }
    }

    /// Current collection. Missing or unreadable storage yields an empty collection.
    pub async fn load(&self) -> Favorites {
        match self.try_load().await {
            Ok(favorites) => favorites,
            Err(e) => {
                warn!("Error loading favorites, starting empty: {}", e);
                Favorites::default()
            }
        }
    }

    async fn try_load(&self) -> Result<Favorites, RecipeError> {
        let Some(blob) = self.store.get(&self.key).await? else {
            debug!("No favorites stored under '{}'", self.key);
            return Ok(Favorites::default());
        };

        let recipes: Vec<Recipe> = serde_json::from_str(&blob)
            .map_err(|e| RecipeError::InvalidRecipeData(format!("favorites blob: {}", e)))?;
        Ok(Favorites::from_recipes(recipes))
    }

    async fn load_for_update(&self) -> Result<Favorites, RecipeError> {
        self.try_load().await.map_err(|e| {
            error!("Refusing to overwrite unreadable favorites: {}", e);
            e
        })
    }

    async fn save(&self, favorites: &Favorites) -> Result<(), RecipeError> {
        let result = match serde_json::to_string(favorites) {
            Ok(blob) => self.store.set(&self.key, &blob).await,
            Err(e) => Err(RecipeError::PersistenceError(e.to_string())),
        };
        result.map_err(|e| {
            error!("Error saving favorites: {}", e);
            e
        })
    }

    pub async fn list(&self) -> Vec<Recipe> {
        self.load().await.into_vec()
    }

    pub async fn contains(&self, id: i64) -> bool {
        self.load().await.contains(id)
    }

    /// Add `recipe` unless its id is already a favorite, then persist.
    ///
    /// Storage that cannot be read is left untouched and the read error returned.
    pub async fn add(&self, recipe: Recipe) -> Result<Favorites, RecipeError> {
        let current = self.load_for_update().await?;
        if current.contains(recipe.id) {
            debug!("Recipe {} is already a favorite", recipe.id);
            return Ok(current);
        }

        let id = recipe.id;
        let updated = current.with(recipe);
        self.save(&updated).await?;
        info!("Added recipe {} to favorites", id);
        Ok(updated)
    }

    /// Drop every record with `id`, then persist
    pub async fn remove(&self, id: i64) -> Result<Favorites, RecipeError> {
        let updated = self.load_for_update().await?.without(id);
        self.save(&updated).await?;
        info!("Removed recipe {} from favorites", id);
        Ok(updated)
    }

    /// Flip membership of `recipe`, returning whether it is a favorite afterwards
    pub async fn toggle(&self, recipe: Recipe) -> Result<bool, RecipeError> {
        if self.contains(recipe.id).await {
            self.remove(recipe.id).await?;
            Ok(false)
        } else {
            self.add(recipe).await?;
            Ok(true)
        }
    }
}
