//! Document shapes for the remote per-user store and the conversions
//! between them and [`PetState`].
//!
//! The store is a document database keyed by user id, so the shapes here
//! stay flat and camelCase to match what the backing service holds. Loads
//! are lossy by design: a missing or malformed field falls back to its
//! hardcoded default instead of failing the whole document.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::constants::{DEFAULT_COINS, DEFAULT_PET_NAME, DEFAULT_VITAL};
use crate::items::InventoryItem;
use crate::species::{self, SpeciesId};
use crate::state::{CaptureRecord, PetState, Vitals};

fn default_name() -> String {
    DEFAULT_PET_NAME.to_string()
}

const fn default_species() -> SpeciesId {
    species::BULBASAUR
}

const fn default_vital() -> f32 {
    DEFAULT_VITAL
}

const fn default_level() -> u32 {
    1
}

const fn default_coins() -> i64 {
    DEFAULT_COINS
}

const fn default_item_id() -> u64 {
    1
}

/// A benched pet kept under the account document while another pet is
/// active. Only the per-pet fields travel; economy and pokedex stay on the
/// account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredPet {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_species")]
    pub species: SpeciesId,
    #[serde(default = "default_vital")]
    pub health: f32,
    #[serde(default = "default_vital")]
    pub hygiene: f32,
    #[serde(default = "default_vital")]
    pub food: f32,
    pub current_xp: f32,
    #[serde(default = "default_level")]
    pub current_level: u32,
}

impl Default for StoredPet {
    fn default() -> Self {
        Self {
            name: default_name(),
            species: default_species(),
            health: DEFAULT_VITAL,
            hygiene: DEFAULT_VITAL,
            food: DEFAULT_VITAL,
            current_xp: 0.0,
            current_level: 1,
        }
    }
}

impl StoredPet {
    #[must_use]
    pub fn from_state(state: &PetState) -> Self {
        Self {
            name: state.name.clone(),
            species: state.species,
            health: state.vitals.health,
            hygiene: state.vitals.hygiene,
            food: state.vitals.food,
            current_xp: state.current_xp,
            current_level: state.current_level,
        }
    }

    /// Rebuild an active state from this record, keeping the account-level
    /// fields (coins, inventory, pokedex, tutorial flags) from `account`.
    #[must_use]
    pub fn into_state(self, pet_id: String, account: &PetState) -> PetState {
        let mut state = account.clone();
        state.pet_id = Some(pet_id);
        state.name = self.name;
        state.species = self.species;
        state.vitals = Vitals {
            health: self.health,
            hygiene: self.hygiene,
            food: self.food,
        };
        state.vitals.clamp();
        state.current_xp = self.current_xp;
        state.current_level = self.current_level;
        state.logs = Vec::new();
        state
    }
}

/// The whole per-user document as the store holds it. Vitals are flattened
/// because the service mirrors scalar fields, not nested objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PetDocument {
    pub pet_id: Option<String>,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_species")]
    pub species: SpeciesId,
    #[serde(default = "default_vital")]
    pub health: f32,
    #[serde(default = "default_vital")]
    pub hygiene: f32,
    #[serde(default = "default_vital")]
    pub food: f32,
    pub current_xp: f32,
    #[serde(default = "default_level")]
    pub current_level: u32,
    #[serde(default = "default_coins")]
    pub coins: i64,
    pub inventory: Vec<InventoryItem>,
    pub pokedex: Vec<CaptureRecord>,
    pub seen_center_tutorial: bool,
    pub shown_center_unlock_warning: bool,
    pub seen_pokedex_tutorial: bool,
    #[serde(default = "default_item_id")]
    pub next_item_id: u64,
    pub stored_pets: BTreeMap<String, StoredPet>,
}

impl Default for PetDocument {
    fn default() -> Self {
        Self::from_state(&PetState::default(), BTreeMap::new())
    }
}

fn field<T>(map: &serde_json::Map<String, Value>, key: &str, fallback: T) -> T
where
    T: DeserializeOwned,
{
    map.get(key)
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or(fallback)
}

impl PetDocument {
    #[must_use]
    pub fn from_state(state: &PetState, stored_pets: BTreeMap<String, StoredPet>) -> Self {
        Self {
            pet_id: state.pet_id.clone(),
            name: state.name.clone(),
            species: state.species,
            health: state.vitals.health,
            hygiene: state.vitals.hygiene,
            food: state.vitals.food,
            current_xp: state.current_xp,
            current_level: state.current_level,
            coins: state.coins,
            inventory: state.inventory.clone(),
            pokedex: state.pokedex.clone(),
            seen_center_tutorial: state.seen_center_tutorial,
            shown_center_unlock_warning: state.shown_center_unlock_warning,
            seen_pokedex_tutorial: state.seen_pokedex_tutorial,
            next_item_id: state.next_item_id,
            stored_pets,
        }
    }

    /// Field-by-field lossy load. A field that is absent or fails to parse
    /// takes its hardcoded default; only a non-object document falls back
    /// entirely.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        let defaults = Self::default();
        let mut doc = Self {
            pet_id: field(map, "petId", defaults.pet_id),
            name: field(map, "name", defaults.name),
            species: field(map, "species", defaults.species),
            health: field(map, "health", defaults.health),
            hygiene: field(map, "hygiene", defaults.hygiene),
            food: field(map, "food", defaults.food),
            current_xp: field(map, "currentXp", defaults.current_xp),
            current_level: field(map, "currentLevel", defaults.current_level),
            coins: field(map, "coins", defaults.coins),
            inventory: field(map, "inventory", defaults.inventory),
            pokedex: field(map, "pokedex", defaults.pokedex),
            seen_center_tutorial: field(map, "seenCenterTutorial", defaults.seen_center_tutorial),
            shown_center_unlock_warning: field(
                map,
                "shownCenterUnlockWarning",
                defaults.shown_center_unlock_warning,
            ),
            seen_pokedex_tutorial: field(
                map,
                "seenPokedexTutorial",
                defaults.seen_pokedex_tutorial,
            ),
            next_item_id: field(map, "nextItemId", defaults.next_item_id),
            stored_pets: field(map, "storedPets", defaults.stored_pets),
        };
        doc.normalize();
        doc
    }

    /// Clamp numeric fields back into range after an untrusted load.
    fn normalize(&mut self) {
        self.health = self.health.clamp(0.0, 1.0);
        self.hygiene = self.hygiene.clamp(0.0, 1.0);
        self.food = self.food.clamp(0.0, 1.0);
        self.current_xp = self.current_xp.clamp(0.0, 1.0);
        self.current_level = self.current_level.max(1);
        // Ids already handed out must never be reissued.
        let highest = self.inventory.iter().map(|item| item.id).max().unwrap_or(0);
        self.next_item_id = self.next_item_id.max(highest.saturating_add(1));
    }

    /// Split into the active in-memory state and the benched-pet map.
    #[must_use]
    pub fn into_parts(self) -> (PetState, BTreeMap<String, StoredPet>) {
        let state = PetState {
            pet_id: self.pet_id,
            name: self.name,
            species: self.species,
            vitals: Vitals {
                health: self.health,
                hygiene: self.hygiene,
                food: self.food,
            },
            current_xp: self.current_xp,
            current_level: self.current_level,
            coins: self.coins,
            inventory: self.inventory,
            pokedex: self.pokedex,
            seen_center_tutorial: self.seen_center_tutorial,
            shown_center_unlock_warning: self.shown_center_unlock_warning,
            seen_pokedex_tutorial: self.seen_pokedex_tutorial,
            next_item_id: self.next_item_id,
            logs: Vec::new(),
        };
        (state, self.stored_pets)
    }
}
