use crate::core::errors::CatalogError;
use crate::core::state::{MoveCategory, MoveSlot};
use crate::data::type_chart::ElementType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveData {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub move_type: ElementType,
    pub category: MoveCategory,
    pub pp: Option<i32>,
    pub power: Option<i32>,
    pub accuracy: Option<i32>,
    pub priority: Option<i32>,
}

impl MoveData {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Fresh slot at full PP.
    pub fn to_slot(&self) -> MoveSlot {
        MoveSlot {
            name: self.display_name().to_string(),
            power: self.power.unwrap_or(0).max(0),
            accuracy: self.accuracy.unwrap_or(100),
            pp: self.pp.unwrap_or(1).max(0),
            move_type: self.move_type,
            category: self.category,
            priority: self.priority.unwrap_or(0),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MoveCatalog {
    moves: HashMap<String, MoveData>,
}

impl MoveCatalog {
    pub fn new() -> Self {
        Self {
            moves: HashMap::new(),
        }
    }

    pub fn minimal() -> Self {
        let mut db = Self::new();
        let mut add = |id: &str, name: &str, move_type: ElementType, category: MoveCategory, power: i32, pp: i32, priority: i32| {
            db.insert(MoveData {
                id: id.to_string(),
                name: Some(name.to_string()),
                move_type,
                category,
                pp: Some(pp),
                power: Some(power),
                accuracy: Some(100),
                priority: Some(priority),
            });
        };
        add("tackle", "Tackle", ElementType::Normal, MoveCategory::Physical, 40, 35, 0);
        add("quick-attack", "Quick Attack", ElementType::Normal, MoveCategory::Physical, 40, 30, 1);
        add("ember", "Ember", ElementType::Fire, MoveCategory::Special, 40, 25, 0);
        add("water-gun", "Water Gun", ElementType::Water, MoveCategory::Special, 40, 25, 0);
        add("vine-whip", "Vine Whip", ElementType::Grass, MoveCategory::Physical, 45, 25, 0);
        add("thunder-shock", "Thunder Shock", ElementType::Electric, MoveCategory::Special, 40, 30, 0);
        add("growl", "Growl", ElementType::Normal, MoveCategory::Status, 0, 40, 0);
        db
    }

    pub fn load_default() -> Result<Self, CatalogError> {
        const DEFAULT_MOVES_YAML: &str = include_str!("../../data/moves.yaml");
        Self::load_from_yaml_str(DEFAULT_MOVES_YAML)
    }

    pub fn insert(&mut self, move_data: MoveData) {
        self.moves.insert(move_data.id.clone(), move_data);
    }

    pub fn get(&self, move_id: &str) -> Option<&MoveData> {
        self.moves.get(move_id)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Accepts either a map keyed by id or a plain list of moves. The shape is
    /// decided by the document's top level, so errors come from the form used.
    pub fn load_from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let document: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let moves: Vec<MoveData> = if document.is_mapping() {
            serde_yaml::from_value::<HashMap<String, MoveData>>(document)?
                .into_values()
                .collect()
        } else {
            serde_yaml::from_value(document)?
        };

        let mut db = Self::new();
        for move_data in moves {
            db.insert(move_data);
        }
        Ok(db)
    }

    pub fn load_from_yaml_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::load_from_yaml_str(&content)
    }
}
