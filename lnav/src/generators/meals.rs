//! Rule-based meal plan generator

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::domain::{Artifact, DayMeals, MealPlan, MealSlot, ShoppingList, Weekday};

/// Stand-in text for an avoided ingredient
pub const AVOID_PLACEHOLDER: &str = "alternative ingredient";

const STAPLES: [&str; 9] = [
    "Oats",
    "Rice",
    "Lentils",
    "Mixed vegetables",
    "Fruits",
    "Milk / Plant milk",
    "Spices",
    "Oil",
    "Yogurt / Plant yogurt",
];

/// Build a seven-day plan repeating one breakfast/lunch/dinner triple
///
/// The diet picks a variant first, then a `low` budget replaces all three
/// meals regardless of diet. Avoided ingredients are replaced last.
pub fn generate_meal_plan(diet_type: &str, budget_level: &str, avoid_ingredients: &[String]) -> MealPlan {
    debug!(%diet_type, %budget_level, avoid = avoid_ingredients.len(), "generate_meal_plan: called");

    let (mut breakfast, mut lunch, mut dinner) = (
        "Oatmeal with fruits",
        "Grilled chicken with veggies",
        "Rice, lentils, and salad",
    );

    match diet_type.trim().to_lowercase().as_str() {
        "vegetarian" => {
            debug!("generate_meal_plan: vegetarian variant");
            lunch = "Paneer / tofu with veggies";
            dinner = "Dal, rice, and mixed veg";
        }
        "vegan" => {
            debug!("generate_meal_plan: vegan variant");
            breakfast = "Overnight oats with plant milk and fruits";
            lunch = "Tofu stir-fry with vegetables";
            dinner = "Chickpea curry with rice";
        }
        _ => {
            debug!("generate_meal_plan: balanced variant");
        }
    }

    if budget_level.trim().eq_ignore_ascii_case("low") {
        debug!("generate_meal_plan: low budget override");
        breakfast = "Homemade oats with banana";
        lunch = "Rice + lentils";
        dinner = "Simple vegetable curry + rice";
    }

    let pattern = avoid_pattern(avoid_ingredients);
    let mut day = DayMeals::new();
    day.insert(MealSlot::Breakfast, strip_avoided(breakfast, pattern.as_ref()));
    day.insert(MealSlot::Lunch, strip_avoided(lunch, pattern.as_ref()));
    day.insert(MealSlot::Dinner, strip_avoided(dinner, pattern.as_ref()));

    MealPlan {
        days: Weekday::ALL.iter().map(|d| (*d, day.clone())).collect(),
    }
}

/// Substitute plan used when the generated plan fails validation
pub fn fallback_meal_plan() -> MealPlan {
    generate_meal_plan("balanced", "low", &[])
}

/// Staple ingredients to buy
///
/// The list is fixed and does not look at the plan, structured or freeform.
pub fn generate_shopping_list(_meals: &Artifact<MealPlan>) -> ShoppingList {
    ShoppingList {
        items: STAPLES.iter().map(|s| s.to_string()).collect(),
    }
}

/// One case-insensitive alternation over every non-blank avoided ingredient
///
/// Longer terms come first so "plant milk" wins over "milk".
fn avoid_pattern(avoid_ingredients: &[String]) -> Option<Regex> {
    let mut needles: Vec<&str> = avoid_ingredients
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .collect();
    if needles.is_empty() {
        return None;
    }
    needles.sort_by_key(|n| std::cmp::Reverse(n.len()));

    let alternation = needles.iter().map(|n| regex::escape(n)).collect::<Vec<_>>().join("|");
    match RegexBuilder::new(&alternation).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(error = %e, "Could not build avoid pattern, ingredients left in place");
            None
        }
    }
}

/// Replace every match in a single pass; inserted placeholders are never re-scanned
fn strip_avoided(description: &str, pattern: Option<&Regex>) -> String {
    match pattern {
        Some(re) => re.replace_all(description, AVOID_PLACEHOLDER).into_owned(),
        None => description.to_string(),
    }
}
