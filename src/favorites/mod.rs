mod backends;
mod store;

pub use backends::{FileStore, MemoryStore};
pub use store::{Favorites, FavoritesStore};

use async_trait::async_trait;

use crate::RecipeError;

/// Minimal on-device key-value storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Stored value for `key`, `None` when absent
    async fn get(&self, key: &str) -> Result<Option<String>, RecipeError>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<(), RecipeError>;
}
