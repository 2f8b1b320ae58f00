use crate::core::state::{BattleEvent, Combatant, Side};
use serde::{Deserialize, Serialize};

/// Both combatants as they stood after a given log index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayFrame {
    pub combatant1: Combatant,
    pub combatant2: Combatant,
}

impl ReplayFrame {
    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::One => &self.combatant1,
            Side::Two => &self.combatant2,
        }
    }

    fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::One => &mut self.combatant1,
            Side::Two => &mut self.combatant2,
        }
    }
}

/// Rebuilds HP after `log[index]` from the initial snapshots alone.
///
/// Recorded `defender_hp_after` values are applied verbatim. Events that lack
/// one fall back to subtracting `damage`. An index past the end of the log is
/// clamped to the last event.
pub fn state_at_index(
    initial1: &Combatant,
    initial2: &Combatant,
    log: &[BattleEvent],
    index: usize,
) -> ReplayFrame {
    let mut frame = ReplayFrame {
        combatant1: initial1.clone(),
        combatant2: initial2.clone(),
    };
    frame.combatant1.restore_full_hp();
    frame.combatant2.restore_full_hp();

    let end = log.len().min(index.saturating_add(1));
    for event in &log[..end] {
        let Some(defender_side) = event.defender() else {
            continue;
        };
        let defender = frame.combatant_mut(defender_side);
        defender.current_hp = match event.defender_hp_after {
            Some(hp_after) => hp_after,
            None => (defender.current_hp - event.damage).max(0),
        };
    }
    frame
}

/// The exported replay unit: both initial snapshots plus the ordered log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleReplay {
    pub combatant1: Combatant,
    pub combatant2: Combatant,
    pub log: Vec<BattleEvent>,
}

impl BattleReplay {
    pub fn new(combatant1: Combatant, combatant2: Combatant, log: Vec<BattleEvent>) -> Self {
        Self {
            combatant1,
            combatant2,
            log,
        }
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn frame_at(&self, index: usize) -> ReplayFrame {
        state_at_index(&self.combatant1, &self.combatant2, &self.log, index)
    }

    /// Frame after the whole log, or the starting frame for an empty log.
    pub fn final_frame(&self) -> ReplayFrame {
        self.frame_at(self.log.len().saturating_sub(1))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Step-through view over a replay. `position` is `None` before the first event.
#[derive(Clone, Debug)]
pub struct ReplayCursor<'a> {
    replay: &'a BattleReplay,
    position: Option<usize>,
}

impl<'a> ReplayCursor<'a> {
    pub fn new(replay: &'a BattleReplay) -> Self {
        Self {
            replay,
            position: None,
        }
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn current_event(&self) -> Option<&'a BattleEvent> {
        self.position.and_then(|idx| self.replay.log.get(idx))
    }

    pub fn is_at_end(&self) -> bool {
        match self.position {
            Some(idx) => idx + 1 >= self.replay.len(),
            None => self.replay.is_empty(),
        }
    }

    /// Advances one event. Returns `false` when already at the end.
    pub fn forward(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.position = Some(self.position.map_or(0, |idx| idx + 1));
        true
    }

    /// Steps back one event. Returns `false` when already before the first event.
    pub fn back(&mut self) -> bool {
        match self.position {
            None => false,
            Some(0) => {
                self.position = None;
                true
            }
            Some(idx) => {
                self.position = Some(idx - 1);
                true
            }
        }
    }

    pub fn seek(&mut self, index: usize) {
        self.position = if self.replay.is_empty() {
            None
        } else {
            Some(index.min(self.replay.len() - 1))
        };
    }

    pub fn rewind(&mut self) {
        self.position = None;
    }

    pub fn frame(&self) -> ReplayFrame {
        match self.position {
            Some(idx) => self.replay.frame_at(idx),
            None => state_at_index(&self.replay.combatant1, &self.replay.combatant2, &[], 0),
        }
    }
}
