use serde::{Deserialize, Deserializer, Serialize};

/// Canonical recipe shape shared by every catalog endpoint and the favorites blob.
///
/// `id` is the only equality key used for deduplication. Field names follow the
/// catalog's camelCase JSON so a stored favorite round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extended_ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub analyzed_instructions: Vec<InstructionGroup>,
}

/// One line of the recipe's ingredient list
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// A named block of ordered steps. Most recipes carry exactly one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InstructionGroup {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Step {
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub step: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<StepItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub equipment: Vec<StepItem>,
    #[serde(default)]
    pub length: Option<StepLength>,
}

/// Ingredient or piece of equipment referenced by a step
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StepItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StepLength {
    pub number: u32,
    pub unit: String,
}

/// Catalog payloads send `null` where a list or string is absent
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

const UNKNOWN: &str = "?";

impl Recipe {
    /// A recipe is fully loaded once it carries analyzed instructions.
    /// Anything else must be refreshed from the catalog before showing detail.
    pub fn is_fully_loaded(&self) -> bool {
        !self.analyzed_instructions.is_empty()
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled Recipe"
        } else {
            &self.title
        }
    }

    pub fn ready_in_minutes_label(&self) -> String {
        self.ready_in_minutes
            .map(|m| m.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    pub fn servings_label(&self) -> String {
        self.servings
            .map(|s| s.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Parse a recipe handed over as serialized JSON
    pub fn from_json(json: &str) -> Result<Self, crate::RecipeError> {
        serde_json::from_str(json).map_err(|e| crate::RecipeError::InvalidRecipeData(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, crate::RecipeError> {
        serde_json::to_string(self).map_err(|e| crate::RecipeError::InvalidRecipeData(e.to_string()))
    }
}

impl Ingredient {
    /// Renders as "{amount} {unit} {name}", e.g. "2 cups flour"
    pub fn display_line(&self) -> String {
        let amount = format_amount(self.amount);
        [amount.as_str(), self.unit.as_str(), self.name.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Step {
    pub fn length_label(&self) -> Option<String> {
        self.length
            .as_ref()
            .map(|len| format!("{} {}", len.number, len.unit))
    }
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        let rounded = (amount * 100.0).round() / 100.0;
        format!("{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_recipe() {
        let json = r#"{
            "id": 715538,
            "title": "Bruschetta",
            "image": "https://img.example.com/715538.jpg",
            "readyInMinutes": 35,
            "servings": 6,
            "sourceUrl": "https://example.com/bruschetta",
            "summary": "Fresh and simple",
            "instructions": "Toast bread. Top it.",
            "extendedIngredients": [
                {"id": 11529, "name": "tomato", "amount": 2.0, "unit": "", "image": "tomato.png"}
            ],
            "analyzedInstructions": [
                {"name": "", "steps": [
                    {"number": 1, "step": "Toast the bread.",
                     "ingredients": [{"id": 18064, "name": "bread", "image": "bread.jpg"}],
                     "equipment": [{"id": 404789, "name": "oven", "image": "oven.jpg"}],
                     "length": {"number": 5, "unit": "minutes"}}
                ]}
            ]
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.id, 715538);
        assert_eq!(recipe.ready_in_minutes, Some(35));
        assert_eq!(recipe.extended_ingredients.len(), 1);
        assert!(recipe.is_fully_loaded());
        let step = &recipe.analyzed_instructions[0].steps[0];
        assert_eq!(step.equipment[0].name, "oven");
        assert_eq!(step.length_label().as_deref(), Some("5 minutes"));
    }

    #[test]
    fn test_missing_fields_default() {
        let recipe: Recipe = serde_json::from_str(r#"{"id": 7, "title": "Toast"}"#).unwrap();
        assert!(recipe.extended_ingredients.is_empty());
        assert!(recipe.analyzed_instructions.is_empty());
        assert!(!recipe.is_fully_loaded());
        assert_eq!(recipe.ready_in_minutes_label(), "?");
        assert_eq!(recipe.servings_label(), "?");
    }

    #[test]
    fn test_nulls_default_to_empty() {
        let json = r#"{"id": 7, "title": null, "analyzedInstructions": null,
            "extendedIngredients": [{"id": null, "name": "salt", "amount": null, "unit": null}]}"#;
        let recipe = Recipe::from_json(json).unwrap();
        assert_eq!(recipe.title, "");
        assert!(!recipe.is_fully_loaded());
        assert_eq!(recipe.extended_ingredients[0].display_line(), "0 salt");
    }

    #[test]
    fn test_display_title_fallback() {
        let recipe = Recipe {
            id: 1,
            title: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(recipe.display_title(), "Untitled Recipe");
    }

    #[test]
    fn test_ingredient_display_line() {
        let flour = Ingredient {
            name: "flour".to_string(),
            amount: 2.0,
            unit: "cups".to_string(),
            ..Default::default()
        };
        assert_eq!(flour.display_line(), "2 cups flour");

        let eggs = Ingredient {
            name: "eggs".to_string(),
            amount: 1.5,
            ..Default::default()
        };
        assert_eq!(eggs.display_line(), "1.5 eggs");
    }

    #[test]
    fn test_json_round_trip_keeps_camel_case() {
        let recipe = Recipe {
            id: 3,
            title: "Soup".to_string(),
            ready_in_minutes: Some(20),
            ..Default::default()
        };
        let json = recipe.to_json().unwrap();
        assert!(json.contains("\"readyInMinutes\":20"));
        assert_eq!(Recipe::from_json(&json).unwrap(), recipe);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = Recipe::from_json("not json").unwrap_err();
        assert!(matches!(err, crate::RecipeError::InvalidRecipeData(_)));
    }
}
