use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The eighteen elemental types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl ElementType {
    pub const ALL: [ElementType; 18] = [
        ElementType::Normal,
        ElementType::Fire,
        ElementType::Water,
        ElementType::Electric,
        ElementType::Grass,
        ElementType::Ice,
        ElementType::Fighting,
        ElementType::Poison,
        ElementType::Ground,
        ElementType::Flying,
        ElementType::Psychic,
        ElementType::Bug,
        ElementType::Rock,
        ElementType::Ghost,
        ElementType::Dragon,
        ElementType::Dark,
        ElementType::Steel,
        ElementType::Fairy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Normal => "normal",
            ElementType::Fire => "fire",
            ElementType::Water => "water",
            ElementType::Electric => "electric",
            ElementType::Grass => "grass",
            ElementType::Ice => "ice",
            ElementType::Fighting => "fighting",
            ElementType::Poison => "poison",
            ElementType::Ground => "ground",
            ElementType::Flying => "flying",
            ElementType::Psychic => "psychic",
            ElementType::Bug => "bug",
            ElementType::Rock => "rock",
            ElementType::Ghost => "ghost",
            ElementType::Dragon => "dragon",
            ElementType::Dark => "dark",
            ElementType::Steel => "steel",
            ElementType::Fairy => "fairy",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        ElementType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| format!("Unknown element type '{}'.", s))
    }
}

static STANDARD_CHART: Lazy<TypeChart> = Lazy::new(TypeChart::new);

/// Attack-type keyed matchup chart. Pairs missing from an entry are neutral.
#[derive(Clone, Debug)]
pub struct TypeChart {
    chart: HashMap<ElementType, HashMap<ElementType, f32>>,
}

impl TypeChart {
    pub fn new() -> Self {
        use ElementType::*;

        let mut chart = HashMap::new();
        let mut add_entry = |attacking: ElementType, matchups: &[(ElementType, f32)]| {
            chart.insert(attacking, matchups.iter().copied().collect::<HashMap<_, _>>());
        };

        add_entry(Normal, &[(Rock, 0.5), (Ghost, 0.0), (Steel, 0.5)]);
        add_entry(Fire, &[(Fire, 0.5), (Water, 0.5), (Grass, 2.0), (Ice, 2.0), (Bug, 2.0), (Rock, 0.5), (Dragon, 0.5), (Steel, 2.0)]);
        add_entry(Water, &[(Fire, 2.0), (Water, 0.5), (Grass, 0.5), (Ground, 2.0), (Rock, 2.0), (Dragon, 0.5)]);
        add_entry(Electric, &[(Water, 2.0), (Electric, 0.5), (Grass, 0.5), (Ground, 0.0), (Flying, 2.0), (Dragon, 0.5)]);
        add_entry(Grass, &[(Fire, 0.5), (Water, 2.0), (Grass, 0.5), (Poison, 0.5), (Ground, 2.0), (Flying, 0.5), (Bug, 0.5), (Rock, 2.0), (Dragon, 0.5), (Steel, 0.5)]);
        add_entry(Ice, &[(Fire, 0.5), (Water, 0.5), (Grass, 2.0), (Ice, 0.5), (Ground, 2.0), (Flying, 2.0), (Dragon, 2.0), (Steel, 0.5)]);
        add_entry(Fighting, &[(Normal, 2.0), (Ice, 2.0), (Poison, 0.5), (Flying, 0.5), (Psychic, 0.5), (Bug, 0.5), (Rock, 2.0), (Ghost, 0.0), (Dark, 2.0), (Steel, 2.0), (Fairy, 0.5)]);
        add_entry(Poison, &[(Grass, 2.0), (Poison, 0.5), (Ground, 0.5), (Rock, 0.5), (Ghost, 0.5), (Steel, 0.0), (Fairy, 2.0)]);
        add_entry(Ground, &[(Fire, 2.0), (Electric, 2.0), (Grass, 0.5), (Poison, 2.0), (Flying, 0.0), (Bug, 0.5), (Rock, 2.0), (Steel, 2.0)]);
        add_entry(Flying, &[(Electric, 0.5), (Grass, 2.0), (Fighting, 2.0), (Bug, 2.0), (Rock, 0.5), (Steel, 0.5)]);
        add_entry(Psychic, &[(Fighting, 2.0), (Poison, 2.0), (Psychic, 0.5), (Dark, 0.0), (Steel, 0.5)]);
        add_entry(Bug, &[(Fire, 0.5), (Grass, 2.0), (Fighting, 0.5), (Poison, 0.5), (Flying, 0.5), (Psychic, 2.0), (Ghost, 0.5), (Dark, 2.0), (Steel, 0.5), (Fairy, 0.5)]);
        add_entry(Rock, &[(Fire, 2.0), (Ice, 2.0), (Fighting, 0.5), (Ground, 0.5), (Flying, 2.0), (Bug, 2.0), (Steel, 0.5)]);
        add_entry(Ghost, &[(Normal, 0.0), (Psychic, 2.0), (Ghost, 2.0), (Dark, 0.5)]);
        add_entry(Dragon, &[(Dragon, 2.0), (Steel, 0.5), (Fairy, 0.0)]);
        add_entry(Dark, &[(Fighting, 0.5), (Psychic, 2.0), (Ghost, 2.0), (Dark, 0.5), (Fairy, 0.5)]);
        add_entry(Steel, &[(Fire, 0.5), (Water, 0.5), (Electric, 0.5), (Ice, 2.0), (Rock, 2.0), (Steel, 0.5), (Fairy, 2.0)]);
        add_entry(Fairy, &[(Fighting, 2.0), (Poison, 0.5), (Bug, 2.0), (Dragon, 2.0), (Dark, 2.0), (Steel, 0.5)]);

        Self { chart }
    }

    /// The standard chart, built once and shared by the engine and the move policies.
    pub fn shared() -> &'static TypeChart {
        &STANDARD_CHART
    }

    /// Multiplier for a single attacking/defending pair: 0, 0.5, 1 or 2.
    pub fn multiplier_for(&self, attacking: ElementType, defending: ElementType) -> f32 {
        self.chart
            .get(&attacking)
            .and_then(|entry| entry.get(&defending))
            .copied()
            .unwrap_or(1.0)
    }

    /// Product of the per-type lookups over every defending type.
    pub fn effectiveness(&self, move_type: ElementType, target_types: &[ElementType]) -> f32 {
        target_types
            .iter()
            .map(|t| self.multiplier_for(move_type, *t))
            .product()
    }
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlisted_pairs_are_neutral() {
        let chart = TypeChart::new();
        assert_eq!(chart.multiplier_for(ElementType::Normal, ElementType::Fire), 1.0);
        assert_eq!(chart.multiplier_for(ElementType::Fairy, ElementType::Fairy), 1.0);
    }

    #[test]
    fn immunities_are_zero() {
        let chart = TypeChart::new();
        assert_eq!(chart.multiplier_for(ElementType::Normal, ElementType::Ghost), 0.0);
        assert_eq!(chart.multiplier_for(ElementType::Electric, ElementType::Ground), 0.0);
        assert_eq!(chart.multiplier_for(ElementType::Dragon, ElementType::Fairy), 0.0);
        assert_eq!(chart.multiplier_for(ElementType::Poison, ElementType::Steel), 0.0);
    }

    #[test]
    fn dual_types_multiply() {
        let chart = TypeChart::new();
        assert_eq!(chart.effectiveness(ElementType::Ice, &[ElementType::Grass, ElementType::Flying]), 4.0);
        assert_eq!(chart.effectiveness(ElementType::Fire, &[ElementType::Water, ElementType::Rock]), 0.25);
        assert_eq!(chart.effectiveness(ElementType::Ground, &[ElementType::Fire, ElementType::Flying]), 0.0);
        assert_eq!(chart.effectiveness(ElementType::Water, &[ElementType::Fire]), 2.0);
    }

    #[test]
    fn single_lookups_stay_in_range() {
        let chart = TypeChart::new();
        for attacking in ElementType::ALL {
            for defending in ElementType::ALL {
                let m = chart.multiplier_for(attacking, defending);
                assert!([0.0, 0.5, 1.0, 2.0].contains(&m), "{attacking} vs {defending} = {m}");
            }
        }
    }

    #[test]
    fn shared_chart_is_built_once() {
        let first = TypeChart::shared();
        let second = TypeChart::shared();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.multiplier_for(ElementType::Water, ElementType::Fire), 2.0);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Fire".parse::<ElementType>(), Ok(ElementType::Fire));
        assert_eq!(" psychic ".parse::<ElementType>(), Ok(ElementType::Psychic));
        assert!("shadow".parse::<ElementType>().is_err());
    }
}
