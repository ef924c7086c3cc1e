//! Authoritative in-memory pet state and the care/decay/progression rules
//! that mutate it. All vital arithmetic is clamped; nothing here can fail.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    CARE_COIN_BONUS, CARE_XP_REWARD, CENTER_UNLOCK_LEVEL, DECAY_FOOD_STEP, DECAY_HEALTH_STEP,
    DECAY_HYGIENE_STEP, DEFAULT_COINS, DEFAULT_PET_NAME, DEFAULT_VITAL, HEALTH_RECOVERY_GATE,
    HEALTH_RECOVERY_STEP, LOG_CENTER_UNLOCKED, LOG_CLEANED, LOG_EVOLVED, LOG_FED, LOG_LEVEL_UP,
    LOG_POKEDEX_REGISTERED, VITAL_LOW_THRESHOLD, VITAL_MAX, VITAL_MIN, XP_LEVEL_THRESHOLD,
};
use crate::items::{InventoryItem, ItemKind};
use crate::species::{self, Rarity, SpeciesId};

/// Events raised by a single mutation, stored inline; a single grant can
/// at most level up a handful of times.
pub type PetEventSet = SmallVec<[PetEvent; 4]>;

/// Notable side effect of a state mutation, surfaced so the UI layer can
/// celebrate or navigate without re-deriving it from state diffs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetEvent {
    LevelUp { level: u32 },
    CenterUnlocked,
    Evolved { from: SpeciesId, to: SpeciesId },
}

/// The three bounded care stats. Every write path clamps to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: f32,
    pub hygiene: f32,
    pub food: f32,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            health: DEFAULT_VITAL,
            hygiene: DEFAULT_VITAL,
            food: DEFAULT_VITAL,
        }
    }
}

impl Vitals {
    /// All three vitals set to the same level, clamped.
    #[must_use]
    pub fn uniform(level: f32) -> Self {
        let level = level.clamp(VITAL_MIN, VITAL_MAX);
        Self {
            health: level,
            hygiene: level,
            food: level,
        }
    }

    pub fn clamp(&mut self) {
        self.health = self.health.clamp(VITAL_MIN, VITAL_MAX);
        self.hygiene = self.hygiene.clamp(VITAL_MIN, VITAL_MAX);
        self.food = self.food.clamp(VITAL_MIN, VITAL_MAX);
    }

    #[must_use]
    pub fn in_bounds(&self) -> bool {
        let ok = |v: f32| (VITAL_MIN..=VITAL_MAX).contains(&v);
        ok(self.health) && ok(self.hygiene) && ok(self.food)
    }
}

/// One pokedex entry. Unique per species id; evolutions and captures of an
/// already-registered species never duplicate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRecord {
    pub species: SpeciesId,
    pub name: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub xp_reward: f32,
    #[serde(default)]
    pub date_caught: String,
}

/// The authoritative record for the active pet plus the player's economy
/// and capture log. Mutated only through the rule methods below (and the
/// shop/capture modules); every mutation leaves the invariants intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetState {
    /// Storage key of the active pet, assigned at hatch.
    pub pet_id: Option<String>,
    pub name: String,
    pub species: SpeciesId,
    pub vitals: Vitals,
    pub current_xp: f32,
    pub current_level: u32,
    pub coins: i64,
    pub inventory: Vec<InventoryItem>,
    pub pokedex: Vec<CaptureRecord>,
    pub seen_center_tutorial: bool,
    pub shown_center_unlock_warning: bool,
    pub seen_pokedex_tutorial: bool,
    /// Monotonic source for inventory entry ids.
    pub next_item_id: u64,
    /// Localizable log keys describing what happened this session.
    #[serde(skip)]
    pub logs: Vec<String>,
}

impl Default for PetState {
    fn default() -> Self {
        Self {
            pet_id: None,
            name: DEFAULT_PET_NAME.to_string(),
            species: species::BULBASAUR,
            vitals: Vitals::default(),
            current_xp: 0.0,
            current_level: 1,
            coins: DEFAULT_COINS,
            inventory: Vec::new(),
            pokedex: Vec::new(),
            seen_center_tutorial: false,
            shown_center_unlock_warning: false,
            seen_pokedex_tutorial: false,
            next_item_id: 1,
            logs: Vec::new(),
        }
    }
}

impl PetState {
    /// One decay tick: hunger and hygiene drift down by a fixed step, and
    /// health follows once either is at or below the low threshold.
    pub fn decay_tick(&mut self) {
        self.vitals.food = (self.vitals.food - DECAY_FOOD_STEP).max(VITAL_MIN);
        self.vitals.hygiene = (self.vitals.hygiene - DECAY_HYGIENE_STEP).max(VITAL_MIN);
        if self.vitals.food <= VITAL_LOW_THRESHOLD || self.vitals.hygiene <= VITAL_LOW_THRESHOLD {
            self.vitals.health = (self.vitals.health - DECAY_HEALTH_STEP).max(VITAL_MIN);
        }
    }

    /// Apply `ticks` decay ticks in a row (session catch-up after idle time).
    pub fn advance_ticks(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.decay_tick();
        }
    }

    /// Feed the pet: hunger refilled, coin bonus, conditional health
    /// recovery, fixed XP grant. Always succeeds.
    pub fn feed(&mut self, today: &str) -> PetEventSet {
        self.vitals.food = VITAL_MAX;
        self.coins += CARE_COIN_BONUS;
        self.recover_health();
        self.logs.push(LOG_FED.to_string());
        self.gain_xp(CARE_XP_REWARD, today)
    }

    /// Clean the pet: hygiene refilled, otherwise identical to [`Self::feed`].
    pub fn clean(&mut self, today: &str) -> PetEventSet {
        self.vitals.hygiene = VITAL_MAX;
        self.coins += CARE_COIN_BONUS;
        self.recover_health();
        self.logs.push(LOG_CLEANED.to_string());
        self.gain_xp(CARE_XP_REWARD, today)
    }

    /// Health climbs back only when the pet is both well fed and clean.
    fn recover_health(&mut self) {
        if self.vitals.food > HEALTH_RECOVERY_GATE && self.vitals.hygiene > HEALTH_RECOVERY_GATE {
            self.vitals.health = (self.vitals.health + HEALTH_RECOVERY_STEP).min(VITAL_MAX);
        }
    }

    /// Grant XP, carrying any overflow past a level into the next one.
    /// Crossing a threshold raises [`PetEvent::LevelUp`], may unlock the
    /// care center, and may trigger an evolution; `today` dates the pokedex
    /// entry an evolution creates.
    pub fn gain_xp(&mut self, amount: f32, today: &str) -> PetEventSet {
        let mut events = PetEventSet::new();
        self.current_xp += amount.max(0.0);
        while self.current_xp >= XP_LEVEL_THRESHOLD {
            self.current_xp -= XP_LEVEL_THRESHOLD;
            self.current_level += 1;
            self.logs.push(LOG_LEVEL_UP.to_string());
            events.push(PetEvent::LevelUp {
                level: self.current_level,
            });
            if self.current_level == CENTER_UNLOCK_LEVEL {
                self.logs.push(LOG_CENTER_UNLOCKED.to_string());
                events.push(PetEvent::CenterUnlocked);
            }
            if let Some(evolved) = species::evolution_at(self.species, self.current_level) {
                self.apply_evolution(evolved, today, &mut events);
            }
        }
        self.current_xp = self.current_xp.clamp(VITAL_MIN, XP_LEVEL_THRESHOLD);
        events
    }

    fn apply_evolution(&mut self, evolved: SpeciesId, today: &str, events: &mut PetEventSet) {
        let previous = self.species;
        self.species = evolved;
        // A species-default name follows the evolution; a nickname sticks.
        if self.name == species::display_name(previous) {
            self.name = species::display_name(evolved).to_string();
        }
        self.logs.push(LOG_EVOLVED.to_string());
        events.push(PetEvent::Evolved {
            from: previous,
            to: evolved,
        });
        self.add_to_pokedex(CaptureRecord {
            species: evolved,
            name: species::display_name(evolved).to_string(),
            rarity: Rarity::Evolved,
            xp_reward: 0.0,
            date_caught: today.to_string(),
        });
    }

    /// Register a capture record, idempotent per species id. Returns true
    /// when the species was newly registered.
    pub fn add_to_pokedex(&mut self, record: CaptureRecord) -> bool {
        if self.pokedex.iter().any(|r| r.species == record.species) {
            return false;
        }
        self.logs.push(LOG_POKEDEX_REGISTERED.to_string());
        self.pokedex.push(record);
        true
    }

    /// Whether the care center is available (level gate).
    #[must_use]
    pub fn is_center_unlocked(&self) -> bool {
        self.current_level >= CENTER_UNLOCK_LEVEL
    }

    /// How many inventory entries of `kind` the player currently owns.
    #[must_use]
    pub fn owned_count(&self, kind: ItemKind) -> usize {
        self.inventory.iter().filter(|item| item.kind == kind).count()
    }

    /// Next unique inventory entry id.
    pub(crate) fn allocate_item_id(&mut self) -> u64 {
        let id = self.next_item_id;
        self.next_item_id += 1;
        id
    }
}
