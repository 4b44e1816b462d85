use recipe_scout::{random_recipes, recipe_information, search_recipes_with_ingredients};
use std::env;

#[tokio::test]
#[ignore] // This test requires network access and SPOONACULAR_API_KEY
async fn test_random_then_detail() {
    env::set_var("RUST_LOG", "debug");
    let _ = env_logger::try_init();

    match random_recipes(2).await {
        Ok(recipes) => {
            println!("Fetched {} random recipes", recipes.len());
            assert_eq!(recipes.len(), 2);

            let full = recipe_information(recipes[0].id).await.unwrap();
            println!("Title: {}", full.display_title());
            assert_eq!(full.id, recipes[0].id);
        }
        Err(e) => {
            panic!("Failed to fetch random recipes: {e}");
        }
    }
}

#[tokio::test]
#[ignore] // This test requires network access and SPOONACULAR_API_KEY
async fn test_ingredient_search_has_unique_ids() {
    let ingredients = vec!["egg".to_string(), "flour".to_string()];
    let recipes = search_recipes_with_ingredients(&ingredients).await.unwrap();

    let mut ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}
