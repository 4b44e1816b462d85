use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::fs;

use crate::config::RecognitionConfig;
use crate::RecipeError;

/// Represents the source of an image for ingredient recognition
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image from a file path
    Path(String),
    /// Raw image bytes, e.g. straight from the camera
    Bytes(Vec<u8>),
    /// Image as base64-encoded data
    Base64(String),
}

impl ImageSource {
    async fn into_bytes(self) -> Result<Vec<u8>, RecipeError> {
        match self {
            ImageSource::Path(path) => fs::read(&path).await.map_err(|e| {
                RecipeError::RecognitionError(format!("failed to read image {}: {}", path, e))
            }),
            ImageSource::Bytes(bytes) => Ok(bytes),
            ImageSource::Base64(data) => STANDARD.decode(data.trim()).map_err(|e| {
                RecipeError::RecognitionError(format!("invalid base64 image: {}", e))
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecognitionResponse {
    ingredients: Option<Vec<String>>,
    error: Option<String>,
}

/// Client for the service that turns a photo into ingredient names
pub struct IngredientRecognizer {
    client: Client,
    url: String,
}

impl IngredientRecognizer {
    pub fn new(config: &RecognitionConfig) -> Result<Self, RecipeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(IngredientRecognizer {
            client,
            url: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                config.endpoint
            ),
        })
    }

    /// Upload the image as `multipart/form-data` and return the detected ingredient names
    pub async fn recognize(&self, image: ImageSource) -> Result<Vec<String>, RecipeError> {
        let bytes = image.into_bytes().await?;
        if bytes.is_empty() {
            return Err(RecipeError::RecognitionError("image is empty".to_string()));
        }

        let part = Part::bytes(bytes)
            .file_name("photo.jpg")
            .mime_str("image/jpeg")?;
        let form = Form::new().part("file", part);

        debug!("Sending image to recognition service at {}", self.url);

        let response = self.client.post(&self.url).multipart(form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RecipeError::RecognitionError(format!(
                "service returned {}: {}",
                status, error_text
            )));
        }

        let body: RecognitionResponse = response.json().await.map_err(|e| {
            RecipeError::RecognitionError(format!("unexpected response: {}", e))
        })?;

        match body {
            RecognitionResponse {
                ingredients: Some(ingredients),
                ..
            } => {
                debug!("Recognized {} ingredients", ingredients.len());
                Ok(ingredients)
            }
            RecognitionResponse {
                error: Some(error), ..
            } => Err(RecipeError::RecognitionError(error)),
            _ => Err(RecipeError::RecognitionError(
                "Failed to process image".to_string(),
            )),
        }
    }
}

/// Which of the detected ingredients the user wants to cook with.
/// Everything detected starts out selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientSelection {
    detected: Vec<String>,
    selected: Vec<String>,
}

impl IngredientSelection {
    pub fn new(detected: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for name in detected {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        IngredientSelection {
            selected: unique.clone(),
            detected: unique,
        }
    }

    /// Deselect `name` if selected, select it otherwise
    pub fn toggle(&mut self, name: &str) {
        if let Some(index) = self.selected.iter().position(|s| s == name) {
            self.selected.remove(index);
        } else {
            self.selected.push(name.to_string());
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|s| s == name)
    }

    pub fn detected(&self) -> &[String] {
        &self.detected
    }

    /// Selected names in the order they were selected
    pub fn selected(&self) -> &[String] {
        &self.selected
    }
}
