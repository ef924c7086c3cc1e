//! A logged-in play session: owns the active [`PetState`], the benched
//! pets, the storage handle, and the session RNG.
//!
//! Every mutating operation applies the rule in memory first, then writes
//! the whole document back. A failed write is logged and surfaced through
//! the returned `Result`; the in-memory state stays authoritative, so the
//! next successful write repairs the remote copy.
use chrono::Local;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::BTreeMap;

use crate::PetStorage;
use crate::capture::{self, BallKind, CaptureOutcome};
use crate::constants::{
    CATCHUP_TICK_CAP, DECAY_TICK_SECS, HATCH_VITAL, LOG_HATCHED, LOG_SWAPPED, SWAP_FRESH_VITAL,
};
use crate::items::{self, ItemKind, PurchaseOutcome, UseOutcome};
use crate::map::{self, MapRegion, SpawnConfig};
use crate::species::{self, Rarity, SpeciesId};
use crate::state::{CaptureRecord, PetEventSet, PetState, Vitals};
use crate::storage::{PetDocument, StoredPet};

/// Capture-date format used across the pokedex.
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Today's date in pokedex format.
#[must_use]
pub fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

pub struct PetSession<S: PetStorage> {
    user_id: String,
    state: PetState,
    stored_pets: BTreeMap<String, StoredPet>,
    storage: S,
    rng: ChaCha20Rng,
}

impl<S: PetStorage> PetSession<S> {
    /// Open a session for `user_id`, loading the stored document or
    /// starting from defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the document read itself fails; a
    /// missing document is not an error.
    pub fn login(storage: S, user_id: &str) -> Result<Self, S::Error> {
        Self::login_with_rng(storage, user_id, ChaCha20Rng::from_entropy())
    }

    /// [`Self::login`] with a caller-provided RNG, for deterministic play.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the document read fails.
    pub fn login_with_rng(storage: S, user_id: &str, rng: ChaCha20Rng) -> Result<Self, S::Error> {
        let document = storage.load_pet(user_id)?.unwrap_or_default();
        let (state, stored_pets) = document.into_parts();
        Ok(Self {
            user_id: user_id.to_string(),
            state,
            stored_pets,
            storage,
            rng,
        })
    }

    #[must_use]
    pub fn state(&self) -> &PetState {
        &self.state
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn stored_pets(&self) -> &BTreeMap<String, StoredPet> {
        &self.stored_pets
    }

    /// Drain the accumulated log keys for display.
    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.state.logs)
    }

    fn persist(&self) -> Result<(), S::Error> {
        let document = PetDocument::from_state(&self.state, self.stored_pets.clone());
        if let Err(error) = self.storage.save_pet(&self.user_id, &document) {
            log::warn!("pet save failed for {}: {error}", self.user_id);
            return Err(error);
        }
        Ok(())
    }

    /// Hatch a fresh starter, replacing the active pet. Vitals start full
    /// and the species is registered in the pokedex.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the save fails; the hatch has still
    /// been applied in memory.
    pub fn hatch(&mut self, starter: SpeciesId, name: Option<String>) -> Result<(), S::Error> {
        let pet_id = format!("pet-{:08x}", self.rng.r#gen::<u32>());
        let date = today();
        self.state.pet_id = Some(pet_id);
        self.state.species = starter;
        self.state.name =
            name.unwrap_or_else(|| species::display_name(starter).to_string());
        self.state.vitals = Vitals::uniform(HATCH_VITAL);
        self.state.current_xp = 0.0;
        self.state.current_level = 1;
        self.state.logs.push(LOG_HATCHED.to_string());
        self.state.add_to_pokedex(CaptureRecord {
            species: starter,
            name: species::display_name(starter).to_string(),
            rarity: Rarity::Starter,
            xp_reward: 0.0,
            date_caught: date,
        });
        self.persist()
    }

    /// Catch up on decay after idle time, one tick per elapsed interval.
    /// Capped once every vital has already hit the floor, so a garbage
    /// idle duration cannot stall the session.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the save fails.
    pub fn catch_up(&mut self, idle_secs: u64) -> Result<(), S::Error> {
        let ticks = (idle_secs / DECAY_TICK_SECS).min(u64::from(CATCHUP_TICK_CAP));
        self.advance_ticks(u32::try_from(ticks).unwrap_or(CATCHUP_TICK_CAP))
    }

    /// # Errors
    ///
    /// Returns the storage error when the save fails.
    pub fn advance_ticks(&mut self, ticks: u32) -> Result<(), S::Error> {
        if ticks == 0 {
            return Ok(());
        }
        self.state.advance_ticks(ticks);
        self.persist()
    }

    /// # Errors
    ///
    /// Returns the storage error when the save fails; the feed has still
    /// been applied in memory.
    pub fn feed(&mut self) -> Result<PetEventSet, S::Error> {
        let events = self.state.feed(&today());
        self.persist()?;
        Ok(events)
    }

    /// # Errors
    ///
    /// Returns the storage error when the save fails.
    pub fn clean(&mut self) -> Result<PetEventSet, S::Error> {
        let events = self.state.clean(&today());
        self.persist()?;
        Ok(events)
    }

    /// # Errors
    ///
    /// Returns the storage error when the save fails. Rejected purchases
    /// skip the write entirely.
    pub fn buy_item(&mut self, kind: ItemKind) -> Result<PurchaseOutcome, S::Error> {
        let outcome = items::buy_item(&mut self.state, kind);
        if outcome == PurchaseOutcome::Purchased {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Returns the storage error when the save fails.
    pub fn use_item(&mut self, item_id: u64) -> Result<UseOutcome, S::Error> {
        let outcome = items::use_item(&mut self.state, item_id);
        if outcome != UseOutcome::NotOwned {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Roll a wild spawn for the region's table.
    pub fn roll_spawn(&mut self, region: &MapRegion) -> Option<SpawnConfig> {
        map::select_spawn_with_rng(region.spawns, &mut self.rng).copied()
    }

    /// Scatter spawn points for the region screen.
    pub fn roll_spawn_points(&mut self) -> Vec<(f32, f32)> {
        map::scatter_spawn_points(&mut self.rng)
    }

    /// Full capture attempt against an encountered spawn. The device is
    /// spent up front; `minigame_passed` gates the roll.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the save fails.
    pub fn attempt_capture(
        &mut self,
        ball: BallKind,
        minigame_passed: bool,
        spawn: &SpawnConfig,
    ) -> Result<CaptureOutcome, S::Error> {
        let outcome = capture::attempt_capture_with_rng(
            &mut self.state,
            ball,
            minigame_passed,
            spawn.species,
            spawn.xp_reward,
            &today(),
            &mut self.rng,
        );
        if outcome != CaptureOutcome::NoDevice {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Bench the active pet and make `pet_id` active. A pet seen for the
    /// first time starts with fresh-but-not-full vitals. No-op when the
    /// pet is already active.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the save fails.
    pub fn swap_active(&mut self, pet_id: &str, species: SpeciesId) -> Result<(), S::Error> {
        if self.state.pet_id.as_deref() == Some(pet_id) {
            return Ok(());
        }
        if let Some(current_id) = self.state.pet_id.clone() {
            self.stored_pets
                .insert(current_id, StoredPet::from_state(&self.state));
        }
        let incoming = self.stored_pets.remove(pet_id).unwrap_or_else(|| StoredPet {
            name: species::display_name(species).to_string(),
            species,
            health: SWAP_FRESH_VITAL,
            hygiene: SWAP_FRESH_VITAL,
            food: SWAP_FRESH_VITAL,
            current_xp: 0.0,
            current_level: 1,
        });
        self.state = incoming.into_state(pet_id.to_string(), &self.state);
        self.state.logs.push(LOG_SWAPPED.to_string());
        self.persist()
    }

    /// Discard the session. In-memory state is dropped; the last
    /// successful write is what the next login sees.
    pub fn logout(self) -> S {
        self.storage
    }
}
