pub mod persistence;

pub use persistence::{export_json, load_catalog, load_catalog_csv, load_catalog_json};

use std::collections::HashMap;

use crate::error::{MealError, Result};
use crate::models::{FoodCatalogEntry, FoodCategory};

/// Read-only view over the food catalog for one optimization run.
///
/// Entries keep their insertion order so that index-based random picks
/// are reproducible under a fixed seed.
pub struct FoodCatalog {
    entries: Vec<FoodCatalogEntry>,
    by_key: HashMap<String, usize>,
}

impl FoodCatalog {
    /// Build a catalog from entries.
    ///
    /// Deduplicates by lowercase name (last occurrence wins) and rejects
    /// an empty result, so a misconfigured run fails before any
    /// generation is produced.
    pub fn new(entries: Vec<FoodCatalogEntry>) -> Result<Self> {
        let mut deduped: Vec<FoodCatalogEntry> = Vec::with_capacity(entries.len());
        let mut by_key: HashMap<String, usize> = HashMap::new();

        for entry in entries {
            if !entry.is_valid() {
                return Err(MealError::InvalidInput(format!(
                    "invalid catalog entry: {}",
                    entry.name
                )));
            }
            match by_key.get(&entry.key()) {
                Some(&idx) => deduped[idx] = entry,
                None => {
                    by_key.insert(entry.key(), deduped.len());
                    deduped.push(entry);
                }
            }
        }

        if deduped.is_empty() {
            return Err(MealError::EmptyCatalog);
        }

        Ok(Self {
            entries: deduped,
            by_key,
        })
    }

    /// Get an entry by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&FoodCatalogEntry> {
        self.by_key
            .get(&name.to_lowercase())
            .map(|&idx| &self.entries[idx])
    }

    pub fn entries(&self) -> &[FoodCatalogEntry] {
        &self.entries
    }

    pub fn staples(&self) -> Vec<&FoodCatalogEntry> {
        self.entries.iter().filter(|e| e.is_staple()).collect()
    }

    pub fn non_staples(&self) -> Vec<&FoodCatalogEntry> {
        self.entries.iter().filter(|e| !e.is_staple()).collect()
    }

    pub fn by_category(&self, category: FoodCategory) -> Vec<&FoodCatalogEntry> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
