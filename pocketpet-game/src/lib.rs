//! PocketPet Game Engine
//!
//! Platform-agnostic core game logic for the PocketPet virtual-pet and
//! creature-collection game. This crate provides the pet simulation, shop
//! economy, capture rules, and persistence shapes without UI or
//! platform-specific dependencies.

pub mod auth;
pub mod capture;
pub mod constants;
pub mod items;
pub mod map;
pub mod minigames;
pub mod session;
pub mod species;
pub mod state;
pub mod storage;

#[cfg(test)]
pub(crate) mod tests_support;

// Re-export commonly used types
pub use auth::{AuthClient, AuthError, UserId, validate_credentials, validate_email, validate_password};
pub use capture::{
    BallKind, CaptureOutcome, attempt_capture_with_rng, rarity_for_reward, resolve_roll_with_rng,
    spend_device,
};
pub use items::{
    InventoryItem, ItemKind, PurchaseOutcome, SHOP_CATALOG, UseOutcome, buy_item, use_item,
};
pub use map::{
    MapRegion, REGIONS, SpawnConfig, region_or_default, scatter_spawn_points,
    select_spawn_with_rng,
};
pub use minigames::{
    CatchMinigame, CookingFlow, CookingStep, WashingFlow, WashingStep, balance_fallen,
    balance_step, balance_survived, blow_triggered, dry_shake_triggered, hatch_complete,
    rapid_tap_passed, reaction_hit, ring_zone_hit, shake_triggered,
};
pub use session::{PetSession, today};
pub use species::{PoseTag, Rarity, SpeciesId};
pub use state::{CaptureRecord, PetEvent, PetEventSet, PetState, Vitals};
pub use storage::{PetDocument, StoredPet};

/// Trait for abstracting the per-user document store
/// Platform-specific implementations should provide this
pub trait PetStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the user's pet document
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read. A missing document
    /// is `Ok(None)`.
    fn load_pet(&self, user_id: &str) -> Result<Option<PetDocument>, Self::Error>;

    /// Write the whole pet document back, merge semantics, last writer wins
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save_pet(&self, user_id: &str, document: &PetDocument) -> Result<(), Self::Error>;

    /// Delete the user's pet document
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be deleted.
    fn delete_pet(&self, user_id: &str) -> Result<(), Self::Error>;
}

/// Composition root tying an auth backend to a pet document store.
pub struct PetEngine<A, S>
where
    A: AuthClient,
    S: PetStorage,
{
    auth: A,
    storage: S,
}

impl<A, S> PetEngine<A, S>
where
    A: AuthClient,
    S: PetStorage,
{
    pub const fn new(auth: A, storage: S) -> Self {
        Self { auth, storage }
    }

    /// Register a new account. Credentials are validated locally before
    /// the backend is asked.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] from local validation or the backend.
    pub fn sign_up(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        validate_credentials(email, password)?;
        self.auth.sign_up(email, password)
    }

    /// Sign an existing account in.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] from local validation or the backend.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        validate_credentials(email, password)?;
        self.auth.sign_in(email, password)
    }

    pub fn sign_out(&self) {
        self.auth.sign_out();
    }

    /// Open a play session for a signed-in user, loading their document or
    /// starting fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored document cannot be read.
    pub fn open_session(&self, user: &UserId) -> Result<PetSession<S>, anyhow::Error>
    where
        S: Clone,
        S::Error: Into<anyhow::Error>,
    {
        PetSession::login(self.storage.clone(), &user.0).map_err(Into::into)
    }

    /// Wipe a user's stored pet document.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_account_data(&self, user: &UserId) -> Result<(), S::Error> {
        self.storage.delete_pet(&user.0)
    }
}
