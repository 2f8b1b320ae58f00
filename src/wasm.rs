use crate::core::battle::BattleEngine;
use crate::core::factory::{create_combatant, validate_combatant, CreateCombatantOptions};
use crate::core::replay::state_at_index;
use crate::core::state::{BattleEvent, Combatant, Side, StatusCondition};
use crate::core::stats::StatTable;
use crate::data::items::HeldItem;
use crate::data::moves::MoveCatalog;
use crate::data::natures::Nature;
use crate::data::species::SpeciesCatalog;
use js_sys::Math;
use once_cell::sync::Lazy;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

static SPECIES_DB: Lazy<SpeciesCatalog> =
    Lazy::new(|| SpeciesCatalog::load_default().unwrap_or_else(|_| SpeciesCatalog::new()));
static MOVE_DB: Lazy<MoveCatalog> =
    Lazy::new(|| MoveCatalog::load_default().unwrap_or_else(|_| MoveCatalog::minimal()));

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCombatantOptionsWire {
    moves: Option<Vec<String>>,
    name: Option<String>,
    level: Option<u32>,
    ivs: Option<StatTable>,
    evs: Option<StatTable>,
    nature: Option<String>,
    ability: Option<String>,
    item: Option<String>,
    status: Option<StatusCondition>,
}

impl TryFrom<CreateCombatantOptionsWire> for CreateCombatantOptions {
    type Error = String;

    fn try_from(wire: CreateCombatantOptionsWire) -> Result<Self, Self::Error> {
        let nature = wire.nature.as_deref().map(str::parse::<Nature>).transpose()?;
        let item = wire.item.as_deref().map(str::parse::<HeldItem>).transpose()?;
        Ok(Self {
            moves: wire.moves.filter(|moves| !moves.is_empty()),
            name: wire.name,
            level: wire.level,
            ivs: wire.ivs,
            evs: wire.evs,
            nature,
            ability: wire.ability,
            item,
            status: wire.status,
        })
    }
}

fn js_err(message: impl ToString) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn side_from_js(side: u8) -> Result<Side, JsValue> {
    Side::try_from(side).map_err(js_err)
}

fn combatant_from_js(value: JsValue) -> Result<Combatant, JsValue> {
    let combatant: Combatant = serde_wasm_bindgen::from_value(value).map_err(js_err)?;
    validate_combatant(&combatant).map_err(js_err)?;
    Ok(combatant)
}

/// A live battle held on the Rust side; JS drives it one call at a time.
#[wasm_bindgen]
pub struct WasmBattle {
    engine: BattleEngine,
}

#[wasm_bindgen]
impl WasmBattle {
    #[wasm_bindgen(constructor)]
    pub fn new(combatant1: JsValue, combatant2: JsValue) -> Result<WasmBattle, JsValue> {
        let combatant1 = combatant_from_js(combatant1)?;
        let combatant2 = combatant_from_js(combatant2)?;
        Ok(Self {
            engine: BattleEngine::new(combatant1, combatant2),
        })
    }

    pub fn initialize(&mut self) -> Result<JsValue, JsValue> {
        self.engine.initialize().map_err(js_err)?;
        self.get_state()
    }

    #[wasm_bindgen(js_name = executeMove)]
    pub fn execute_move(&mut self, side: u8, move_index: usize) -> Result<JsValue, JsValue> {
        let side = side_from_js(side)?;
        let mut rng = || Math::random();
        let outcome = self
            .engine
            .execute_move(side, move_index, &mut rng)
            .map_err(js_err)?;
        serde_wasm_bindgen::to_value(&outcome.event).map_err(js_err)
    }

    /// Returns the events appended by the round.
    #[wasm_bindgen(js_name = runRound)]
    pub fn run_round(&mut self) -> Result<JsValue, JsValue> {
        let mut rng = || Math::random();
        let outcome = self.engine.run_round(&mut rng).map_err(js_err)?;
        serde_wasm_bindgen::to_value(&outcome.events).map_err(js_err)
    }

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.engine.state()).map_err(js_err)
    }

    #[wasm_bindgen(js_name = getLog)]
    pub fn get_log(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.engine.state().log).map_err(js_err)
    }

    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.engine.is_finished()
    }
}

#[wasm_bindgen(js_name = createCombatant)]
pub fn create_combatant_wasm(species_name: String, options: JsValue) -> Result<JsValue, JsValue> {
    let wire: CreateCombatantOptionsWire = if options.is_undefined() || options.is_null() {
        CreateCombatantOptionsWire::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(js_err)?
    };
    let species = SPECIES_DB
        .get(species_name.as_str())
        .ok_or_else(|| js_err(format!("Unknown species: {}", species_name)))?;
    let options = CreateCombatantOptions::try_from(wire).map_err(js_err)?;
    let combatant = create_combatant(species, options, &MOVE_DB).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&combatant).map_err(js_err)
}

#[wasm_bindgen(js_name = stateAtIndex)]
pub fn state_at_index_wasm(
    combatant1: JsValue,
    combatant2: JsValue,
    log: JsValue,
    index: usize,
) -> Result<JsValue, JsValue> {
    let combatant1 = combatant_from_js(combatant1)?;
    let combatant2 = combatant_from_js(combatant2)?;
    let log: Vec<BattleEvent> = serde_wasm_bindgen::from_value(log).map_err(js_err)?;
    let frame = state_at_index(&combatant1, &combatant2, &log, index);
    serde_wasm_bindgen::to_value(&frame).map_err(js_err)
}
