//! Derived views over a recipe's analyzed instructions.
//!
//! Only the first instruction group is considered; that is the group the
//! detail view renders.

use std::collections::BTreeSet;

use crate::model::{Recipe, Step, StepItem};

/// Steps of the first instruction group, empty when the recipe has none
pub fn first_group_steps(recipe: &Recipe) -> &[Step] {
    recipe
        .analyzed_instructions
        .first()
        .map(|group| group.steps.as_slice())
        .unwrap_or(&[])
}

/// Distinct equipment names used by any step. Names are compared case-sensitively.
pub fn unique_equipment(recipe: &Recipe) -> BTreeSet<String> {
    collect_names(recipe, |step| &step.equipment)
}

/// Distinct ingredient names mentioned by any step
pub fn unique_step_ingredients(recipe: &Recipe) -> BTreeSet<String> {
    collect_names(recipe, |step| &step.ingredients)
}

fn collect_names<F>(recipe: &Recipe, items: F) -> BTreeSet<String>
where
    F: Fn(&Step) -> &Vec<StepItem>,
{
    first_group_steps(recipe)
        .iter()
        .flat_map(|step| items(step).iter())
        .map(|item| item.name.clone())
        .collect()
}
