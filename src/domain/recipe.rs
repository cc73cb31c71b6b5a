//! Recipe domain models.
//!
//! [`RecipeSummary`] is what the list endpoints return and what a card shows.
//! [`RecipeDetail`] is built from a single lookup record, including the
//! numbered ingredient/measure columns flattened into display strings.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Highest numbered `strIngredientN` / `strMeasureN` column the API exposes.
///
/// Columns past this index are never read.
pub const MAX_INGREDIENT_FIELDS: usize = 20;

/// Deserializes an explicit JSON `null` as `T::default()`.
///
/// The API sends `null` for absent optional columns; pair with
/// `#[serde(default)]` to also cover a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A recipe as it appears in search, letter and region listings.
///
/// Region listings (`filter.php`) omit the category, hence the `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default, deserialize_with = "null_as_default")]
    pub thumbnail_url: String,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
}

impl RecipeSummary {
    /// Category label for card display, `"N/A"` when the listing has none.
    #[must_use]
    pub fn category_label(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or("N/A")
    }
}

/// Full recipe record shown in the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    pub area: String,
    pub category: String,
    pub instructions: String,
    /// `"ingredient (measure)"` strings in source order.
    pub ingredients: Vec<String>,
    pub video_url: Option<String>,
    pub tags: Vec<String>,
    pub source_url: Option<String>,
}

impl RecipeDetail {
    /// Builds a detail record from a raw `lookup.php` meal object.
    ///
    /// Missing or `null` text fields become empty strings; blank URLs become
    /// `None`. Ingredients are derived with [`collect_ingredients`].
    #[must_use]
    pub fn from_raw(raw: &Map<String, Value>) -> Self {
        Self {
            id: text_field(raw, "idMeal"),
            name: text_field(raw, "strMeal"),
            thumbnail_url: text_field(raw, "strMealThumb"),
            area: text_field(raw, "strArea"),
            category: text_field(raw, "strCategory"),
            instructions: text_field(raw, "strInstructions"),
            ingredients: collect_ingredients(raw),
            video_url: optional_field(raw, "strYoutube"),
            tags: text_field(raw, "strTags")
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
            source_url: optional_field(raw, "strSource"),
        }
    }
}

/// Flattens the numbered ingredient/measure columns of a raw meal record.
///
/// Scans `strIngredient1..=20` with the matching `strMeasureN`, keeps only
/// pairs whose ingredient is non-blank and formats each as `"name (measure)"`,
/// or just `"name"` when the measure is blank or missing. Order follows the
/// column numbers.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use zmeals::domain::recipe::collect_ingredients;
///
/// let raw = json!({
///     "strIngredient1": "Chicken",
///     "strMeasure1": " 1 whole ",
///     "strIngredient2": "",
///     "strIngredient3": "Salt",
///     "strMeasure3": null,
/// });
/// let ingredients = collect_ingredients(raw.as_object().unwrap());
/// assert_eq!(ingredients, vec!["Chicken (1 whole)", "Salt"]);
/// ```
#[must_use]
pub fn collect_ingredients(raw: &Map<String, Value>) -> Vec<String> {
    (1..=MAX_INGREDIENT_FIELDS)
        .filter_map(|i| {
            let ingredient = text_field(raw, &format!("strIngredient{i}"));
            let ingredient = ingredient.trim();
            if ingredient.is_empty() {
                return None;
            }

            let measure = text_field(raw, &format!("strMeasure{i}"));
            let measure = measure.trim();
            Some(if measure.is_empty() {
                ingredient.to_string()
            } else {
                format!("{ingredient} ({measure})")
            })
        })
        .collect()
}

fn text_field(raw: &Map<String, Value>, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn optional_field(raw: &Map<String, Value>, key: &str) -> Option<String> {
    let value = text_field(raw, key);
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("fixture must be an object")
    }

    #[test]
    fn ingredients_keep_source_order_and_skip_blanks() {
        let meal = raw(json!({
            "strIngredient1": "Flour",
            "strMeasure1": "200g",
            "strIngredient2": "  ",
            "strMeasure2": "1 tsp",
            "strIngredient3": "Eggs",
            "strMeasure3": "2",
            "strIngredient4": null,
            "strIngredient5": "Milk",
            "strMeasure5": "",
        }));

        assert_eq!(
            collect_ingredients(&meal),
            vec!["Flour (200g)", "Eggs (2)", "Milk"]
        );
    }

    #[test]
    fn ingredients_past_twenty_are_ignored() {
        let mut meal = Map::new();
        for i in 1..=22 {
            meal.insert(format!("strIngredient{i}"), json!(format!("item{i}")));
            meal.insert(format!("strMeasure{i}"), json!(format!("{i}g")));
        }

        let ingredients = collect_ingredients(&meal);
        assert_eq!(ingredients.len(), MAX_INGREDIENT_FIELDS);
        assert_eq!(ingredients.first().map(String::as_str), Some("item1 (1g)"));
        assert_eq!(ingredients.last().map(String::as_str), Some("item20 (20g)"));
        assert!(!ingredients.iter().any(|i| i.starts_with("item21")));
    }

    #[test]
    fn detail_from_raw_maps_fields() {
        let meal = raw(json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strMealThumb": "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
            "strArea": "Japanese",
            "strCategory": "Chicken",
            "strInstructions": "Preheat oven to 350.",
            "strTags": "Meat, Casserole",
            "strYoutube": "https://www.youtube.com/watch?v=4aZr5hZXP_s",
            "strSource": "",
            "strIngredient1": "soy sauce",
            "strMeasure1": "3/4 cup",
        }));

        let detail = RecipeDetail::from_raw(&meal);
        assert_eq!(detail.id, "52772");
        assert_eq!(detail.area, "Japanese");
        assert_eq!(detail.ingredients, vec!["soy sauce (3/4 cup)"]);
        assert_eq!(detail.tags, vec!["Meat", "Casserole"]);
        assert_eq!(
            detail.video_url.as_deref(),
            Some("https://www.youtube.com/watch?v=4aZr5hZXP_s")
        );
        assert!(detail.source_url.is_none());
    }

    #[test]
    fn category_label_falls_back_to_na() {
        let summary = RecipeSummary {
            id: "1".into(),
            name: "Poutine".into(),
            thumbnail_url: String::new(),
            category: None,
        };
        assert_eq!(summary.category_label(), "N/A");
    }
}
