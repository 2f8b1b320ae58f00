use crate::core::errors::CatalogError;
use crate::core::stats::StatTable;
use crate::data::type_chart::ElementType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesData {
    pub id: u32,
    pub name: String,
    #[serde(alias = "type")]
    pub types: Vec<ElementType>,
    pub base_stats: StatTable,
    #[serde(default)]
    pub abilities: Vec<String>,
    /// Move ids this species may be given.
    #[serde(default)]
    pub learnset: Vec<String>,
}

/// Read-only species lookup, keyed by lowercase name.
#[derive(Clone, Debug, Default)]
pub struct SpeciesCatalog {
    species: HashMap<String, SpeciesData>,
}

impl SpeciesCatalog {
    pub fn new() -> Self {
        Self {
            species: HashMap::new(),
        }
    }

    pub fn insert(&mut self, data: SpeciesData) {
        self.species.insert(data.name.to_lowercase(), data);
    }

    pub fn get(&self, name: &str) -> Option<&SpeciesData> {
        self.species.get(&name.trim().to_lowercase())
    }

    pub fn get_by_id(&self, id: u32) -> Option<&SpeciesData> {
        self.species.values().find(|s| s.id == id)
    }

    pub fn as_map(&self) -> &HashMap<String, SpeciesData> {
        &self.species
    }

    /// Species sorted by id, for stable listings.
    pub fn sorted(&self) -> Vec<&SpeciesData> {
        let mut list: Vec<&SpeciesData> = self.species.values().collect();
        list.sort_by_key(|s| s.id);
        list
    }

    /// Accepts a list, a map of species, or an object wrapping either under `species`.
    pub fn load_from_json_str(json: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json)?;
        let inner = match value {
            Value::Object(mut obj) if obj.contains_key("species") => obj.remove("species").unwrap_or(Value::Null),
            other => other,
        };
        let list: Vec<SpeciesData> = match inner {
            Value::Object(map) => map
                .into_iter()
                .map(|(_, data)| serde_json::from_value::<SpeciesData>(data))
                .collect::<Result<Vec<_>, _>>()?,
            other => serde_json::from_value(other)?,
        };
        let mut db = Self::new();
        for data in list {
            db.insert(data);
        }
        Ok(db)
    }

    pub fn load_from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::load_from_json_str(&content)
    }

    pub fn load_default() -> Result<Self, CatalogError> {
        const DEFAULT_SPECIES_JSON: &str = include_str!("../../data/species.json");
        Self::load_from_json_str(DEFAULT_SPECIES_JSON)
    }
}
