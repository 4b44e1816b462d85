use mockito::Matcher;
use recipe_scout::{RecipeCatalog, RecipeError, SpoonacularCatalog};

fn catalog(server: &mockito::ServerGuard) -> SpoonacularCatalog {
    SpoonacularCatalog::with_base_url("test_key".to_string(), server.url())
}

#[tokio::test]
async fn test_random_recipes_are_fully_loaded() {
    let mut server = mockito::Server::new_async().await;
    let body = r#"
    {
        "recipes": [
            {
                "id": 663050,
                "title": "Tex-Mex Burger",
                "image": "https://img.spoonacular.com/recipes/663050-556x370.jpg",
                "readyInMinutes": 45,
                "servings": 4,
                "sourceUrl": "https://example.com/tex-mex-burger",
                "summary": "A <b>spicy</b> burger",
                "instructions": "Grill. Assemble.",
                "extendedIngredients": [
                    {"id": 10023572, "name": "ground beef", "amount": 1.0, "unit": "pound", "image": "beef.png"},
                    {"id": 1009159, "name": "lime zest", "amount": 0.5, "unit": "tsp", "image": "zest.png"}
                ],
                "analyzedInstructions": [
                    {
                        "name": "",
                        "steps": [
                            {
                                "number": 1,
                                "step": "Preheat the grill.",
                                "ingredients": [],
                                "equipment": [{"id": 404706, "name": "grill", "image": "grill.jpg"}]
                            },
                            {
                                "number": 2,
                                "step": "Grill patties for 8 minutes.",
                                "ingredients": [{"id": 10023572, "name": "ground beef", "image": "beef.png"}],
                                "equipment": [{"id": 404706, "name": "grill", "image": "grill.jpg"}],
                                "length": {"number": 8, "unit": "minutes"}
                            }
                        ]
                    }
                ]
            }
        ]
    }
    "#;

    let mock = server
        .mock("GET", "/recipes/random")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("apiKey".into(), "test_key".into()),
            Matcher::UrlEncoded("number".into(), "1".into()),
            Matcher::UrlEncoded("addRecipeInformation".into(), "true".into()),
            Matcher::UrlEncoded("instructionsRequired".into(), "true".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let recipes = catalog(&server).get_random(1).await.unwrap();
    mock.assert_async().await;

    assert_eq!(recipes.len(), 1);
    let burger = &recipes[0];
    assert!(burger.is_fully_loaded());
    assert_eq!(burger.servings_label(), "4");
    assert_eq!(burger.extended_ingredients[1].display_line(), "0.5 tsp lime zest");

    let equipment = recipe_scout::unique_equipment(burger);
    assert_eq!(equipment.len(), 1);
    assert!(equipment.contains("grill"));
}

#[tokio::test]
async fn test_search_normalizes_sparse_results() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::UrlEncoded("query".into(), "lentil soup".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "results": [
                    {"id": 1, "title": "Red Lentil Soup", "image": "1.jpg"},
                    {"id": 2, "title": "Lentil Stew", "readyInMinutes": 50, "analyzedInstructions": null}
                ],
                "offset": 0,
                "number": 5,
                "totalResults": 2
            }"#,
        )
        .create_async()
        .await;

    let recipes = catalog(&server).search("lentil soup", 5).await.unwrap();

    assert_eq!(recipes.len(), 2);
    for recipe in &recipes {
        assert!(recipe.analyzed_instructions.is_empty());
        assert!(recipe.extended_ingredients.is_empty());
        assert!(!recipe.is_fully_loaded());
    }
    assert_eq!(recipes[0].ready_in_minutes_label(), "?");
    assert_eq!(recipes[1].ready_in_minutes_label(), "50");
}

#[tokio::test]
async fn test_search_empty_results() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"results": [], "offset": 0, "number": 5, "totalResults": 0}"#)
        .create_async()
        .await;

    let recipes = catalog(&server).search("zzzz", 5).await.unwrap();
    assert!(recipes.is_empty());
}

#[tokio::test]
async fn test_unauthorized_is_gateway_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"status": "failure", "code": 401, "message": "You are not authorized."}"#)
        .create_async()
        .await;

    let err = catalog(&server).search("pasta", 5).await.unwrap_err();
    assert!(err.is_gateway_failure());
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_unexpected_shape_is_gateway_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/random")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"results": []}"#)
        .create_async()
        .await;

    let err = catalog(&server).get_random(3).await.unwrap_err();
    assert!(matches!(err, RecipeError::GatewayError(_)));
}

#[tokio::test]
async fn test_full_information_without_id_is_invalid() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/12/information")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"title": "Broken"}"#)
        .create_async()
        .await;

    let err = catalog(&server).get_full_information(12).await.unwrap_err();
    assert!(matches!(err, RecipeError::InvalidRecipeData(_)));
}

#[tokio::test]
async fn test_unreachable_catalog_is_gateway_failure() {
    // Nothing listens on the discard port
    let catalog =
        SpoonacularCatalog::with_base_url("k".to_string(), "http://127.0.0.1:9".to_string());
    let err = catalog.get_random(1).await.unwrap_err();
    assert!(matches!(err, RecipeError::FetchError(_)));
    assert!(err.is_gateway_failure());
}
