use log::error;
use std::env;
use std::process::ExitCode;

use recipe_scout::{
    first_group_steps, ImageSource, Recipe, RecipeDetail, RecipeError, RecipeScout, Step,
};

const USAGE: &str = "Usage: recipe-scout <command> [args]

Commands:
  random                 Show random recipes
  search <query>         Search recipes by keyword
  scan <image>           Detect ingredients in a photo and search with them
  show <id>              Show full detail for a recipe
  favorites              List favorite recipes
  favorite <id>          Toggle a recipe in favorites";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    match run(command, &args[1..]).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: &str, args: &[String]) -> Result<(), RecipeError> {
    let scout = RecipeScout::builder().build()?;

    match command {
        "random" => print_list(&scout.random().await?),
        "search" => {
            let query = args.join(" ");
            print_list(&scout.search(&query).await?);
        }
        "scan" => {
            let path = required(args, "image path")?;
            let selection = scout.scan(ImageSource::Path(path.to_string())).await?;
            println!("Detected: {}", selection.detected().join(", "));
            print_list(&scout.search_by_ingredients(selection.selected()).await?);
        }
        "show" => {
            let id = parse_id(required(args, "recipe id")?)?;
            let detail = scout
                .detail(Recipe {
                    id,
                    ..Default::default()
                })
                .await?;
            print_detail(&detail);
        }
        "favorites" => {
            let favorites = scout.favorites().list().await;
            if favorites.is_empty() {
                println!("No favorite recipes yet");
            } else {
                print_list(&favorites);
            }
        }
        "favorite" => {
            let id = parse_id(required(args, "recipe id")?)?;
            let existing = scout.favorites().load().await.get(id).cloned();
            let recipe = match existing {
                Some(recipe) => recipe,
                None => scout.catalog().get_full_information(id).await?,
            };
            let title = recipe.display_title().to_string();
            if scout.toggle_favorite(recipe).await? {
                println!("Added \"{}\" to favorites", title);
            } else {
                println!("Removed \"{}\" from favorites", title);
            }
        }
        other => {
            return Err(RecipeError::BuilderError(format!(
                "unknown command '{}'\n\n{}",
                other, USAGE
            )));
        }
    }

    Ok(())
}

fn required<'a>(args: &'a [String], what: &str) -> Result<&'a str, RecipeError> {
    args.first()
        .map(String::as_str)
        .ok_or_else(|| RecipeError::BuilderError(format!("missing {}\n\n{}", what, USAGE)))
}

fn parse_id(value: &str) -> Result<i64, RecipeError> {
    value
        .parse()
        .map_err(|_| RecipeError::InvalidRecipeData(format!("'{}' is not a recipe id", value)))
}

fn print_list(recipes: &[Recipe]) {
    for recipe in recipes {
        println!(
            "{:>8}  {}  ({} min, {} servings)",
            recipe.id,
            recipe.display_title(),
            recipe.ready_in_minutes_label(),
            recipe.servings_label()
        );
    }
}

fn print_detail(detail: &RecipeDetail) {
    let recipe = &detail.recipe;
    let marker = if detail.is_favorite { " ♥" } else { "" };
    println!("{}{}", recipe.display_title(), marker);
    println!(
        "{} minutes, {} servings",
        recipe.ready_in_minutes_label(),
        recipe.servings_label()
    );

    println!("\nIngredients:");
    if recipe.extended_ingredients.is_empty() {
        println!("  No ingredients information available");
    }
    for ingredient in &recipe.extended_ingredients {
        println!("  - {}", ingredient.display_line());
    }

    if !detail.equipment.is_empty() {
        println!("\nEquipment:");
        for name in &detail.equipment {
            println!("  - {}", name);
        }
    }

    println!("\nInstructions:");
    let steps = first_group_steps(recipe);
    if steps.is_empty() {
        println!("  No instructions available");
    }
    for step in steps {
        print_step(step);
    }
}

fn print_step(step: &Step) {
    println!("  {}. {}", step.number, step.step);
    if !step.ingredients.is_empty() {
        let names: Vec<&str> = step.ingredients.iter().map(|i| i.name.as_str()).collect();
        println!("     Ingredients: {}", names.join(", "));
    }
    if !step.equipment.is_empty() {
        let names: Vec<&str> = step.equipment.iter().map(|e| e.name.as_str()).collect();
        println!("     Equipment: {}", names.join(", "));
    }
    if let Some(length) = step.length_label() {
        println!("     Time: {}", length);
    }
}
