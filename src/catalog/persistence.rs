use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MealError, Result};
use crate::models::{FoodCatalogEntry, FoodCategory, FoodTags, NutrientVector};

/// Load catalog entries from a JSON or CSV file, dispatching on the
/// file extension. Unknown extensions are treated as JSON.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<FoodCatalogEntry>> {
    match path.as_ref().extension().and_then(|e| e.to_str()) {
        Some("csv") => load_catalog_csv(path),
        _ => load_catalog_json(path),
    }
}

/// Load catalog entries from a JSON array of [`FoodCatalogEntry`].
pub fn load_catalog_json<P: AsRef<Path>>(path: P) -> Result<Vec<FoodCatalogEntry>> {
    let content = fs::read_to_string(path)?;
    let entries: Vec<FoodCatalogEntry> = serde_json::from_str(&content)?;
    Ok(entries)
}

/// One flat CSV row; list-valued tags use `|` separators.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,

    #[serde(rename = "Category")]
    category: String,

    #[serde(rename = "Calories")]
    calories: f64,

    #[serde(rename = "Carbs")]
    carbs: f64,

    #[serde(rename = "Protein")]
    protein: f64,

    #[serde(rename = "Fat")]
    fat: f64,

    #[serde(rename = "Calcium", default)]
    calcium: f64,

    #[serde(rename = "Potassium", default)]
    potassium: f64,

    #[serde(rename = "Sodium", default)]
    sodium: f64,

    #[serde(rename = "Magnesium", default)]
    magnesium: f64,

    #[serde(rename = "Iron", default)]
    iron: f64,

    #[serde(rename = "Phosphorus", default)]
    phosphorus: f64,

    #[serde(rename = "Allergens", default)]
    allergens: String,

    #[serde(rename = "Religious", default)]
    religious: String,

    #[serde(rename = "Flavors", default)]
    flavors: String,

    #[serde(rename = "SpiceLevel", default)]
    spice_level: u8,

    #[serde(rename = "CookingMethod", default)]
    cooking_method: String,
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_category(raw: &str) -> Result<FoodCategory> {
    FoodCategory::ALL
        .into_iter()
        .find(|c| c.name().eq_ignore_ascii_case(raw.trim()))
        .ok_or_else(|| MealError::InvalidInput(format!("unknown food category: {}", raw)))
}

impl CsvRow {
    fn into_entry(self) -> Result<FoodCatalogEntry> {
        let category = parse_category(&self.category)?;
        Ok(FoodCatalogEntry {
            name: self.name,
            category,
            per_100g: NutrientVector {
                calories: self.calories,
                carbs: self.carbs,
                protein: self.protein,
                fat: self.fat,
                calcium: self.calcium,
                potassium: self.potassium,
                sodium: self.sodium,
                magnesium: self.magnesium,
                iron: self.iron,
                phosphorus: self.phosphorus,
            },
            tags: FoodTags {
                allergens: split_tags(&self.allergens),
                religious: split_tags(&self.religious),
                flavors: split_tags(&self.flavors),
                spice_level: self.spice_level,
                cooking_method: self.cooking_method.trim().to_string(),
            },
        })
    }
}

/// Load catalog entries from a headed CSV file.
pub fn load_catalog_csv<P: AsRef<Path>>(path: P) -> Result<Vec<FoodCatalogEntry>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut entries = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        entries.push(row?.into_entry()?);
    }
    Ok(entries)
}

/// Write any serializable value as pretty-printed JSON.
pub fn export_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
