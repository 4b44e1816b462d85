use thiserror::Error;

/// Errors that can occur while talking to the recipe catalog, the
/// recognition service or the local favorites storage
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The catalog answered with a non-success status or an unexpected shape
    #[error("Recipe catalog error: {0}")]
    GatewayError(String),

    /// The HTTP request itself failed
    #[error("Failed to reach service: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Reading or writing the local key-value store failed
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    /// A recipe payload was malformed or missing where full detail was expected
    #[error("Invalid recipe data: {0}")]
    InvalidRecipeData(String),

    /// The ingredient recognition service could not process the image
    #[error("Ingredient recognition failed: {0}")]
    RecognitionError(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl RecipeError {
    /// True for failures of the remote recipe catalog, transport errors included
    pub fn is_gateway_failure(&self) -> bool {
        matches!(
            self,
            RecipeError::GatewayError(_) | RecipeError::FetchError(_)
        )
    }
}

impl From<std::io::Error> for RecipeError {
    fn from(err: std::io::Error) -> Self {
        RecipeError::PersistenceError(err.to_string())
    }
}
