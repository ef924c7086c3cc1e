//! End-to-end play session: sign up, hatch, care, shop, capture, swap,
//! and a reload to prove everything persisted.
use pocketpet_game::auth::{AuthClient, AuthError, UserId};
use pocketpet_game::capture::{BallKind, CaptureOutcome};
use pocketpet_game::session::PetSession;
use pocketpet_game::species;
use pocketpet_game::storage::PetDocument;
use pocketpet_game::{
    ItemKind, PetEngine, PetEvent, PetStorage, PurchaseOutcome, Rarity, SpawnConfig, UseOutcome,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Default)]
struct MemoryStorage {
    saves: Rc<RefCell<HashMap<String, PetDocument>>>,
}

impl PetStorage for MemoryStorage {
    type Error = Infallible;

    fn load_pet(&self, user_id: &str) -> Result<Option<PetDocument>, Self::Error> {
        Ok(self.saves.borrow().get(user_id).cloned())
    }

    fn save_pet(&self, user_id: &str, document: &PetDocument) -> Result<(), Self::Error> {
        self.saves
            .borrow_mut()
            .insert(user_id.to_string(), document.clone());
        Ok(())
    }

    fn delete_pet(&self, user_id: &str) -> Result<(), Self::Error> {
        self.saves.borrow_mut().remove(user_id);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct OpenAuth;

impl AuthClient for OpenAuth {
    fn sign_up(&self, email: &str, _password: &str) -> Result<UserId, AuthError> {
        Ok(UserId(format!("uid-{email}")))
    }

    fn sign_in(&self, email: &str, _password: &str) -> Result<UserId, AuthError> {
        Ok(UserId(format!("uid-{email}")))
    }

    fn sign_out(&self) {}
}

fn open_session(storage: MemoryStorage, user: &UserId, seed: u64) -> PetSession<MemoryStorage> {
    PetSession::login_with_rng(storage, &user.0, ChaCha20Rng::seed_from_u64(seed))
        .expect("memory storage never fails")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("storage offline")]
struct StorageOffline;

#[derive(Clone, Copy, Default)]
struct OfflineStorage;

impl PetStorage for OfflineStorage {
    type Error = StorageOffline;

    fn load_pet(&self, _user_id: &str) -> Result<Option<PetDocument>, Self::Error> {
        Ok(None)
    }

    fn save_pet(&self, _user_id: &str, _document: &PetDocument) -> Result<(), Self::Error> {
        Err(StorageOffline)
    }

    fn delete_pet(&self, _user_id: &str) -> Result<(), Self::Error> {
        Err(StorageOffline)
    }
}

#[test]
fn full_care_cycle_survives_a_relogin() {
    init_logging();
    let storage = MemoryStorage::default();
    let engine = PetEngine::new(OpenAuth, storage.clone());
    let user = engine.sign_up("ash@pallet.town", "pikachu!").unwrap();

    let mut session = open_session(storage.clone(), &user, 0xCAFE);
    session.hatch(species::CHARMANDER, None).unwrap();
    assert_eq!(session.state().name, "Charmander");
    assert!(session.state().vitals.health >= 1.0 - 1e-6);

    // Let the pet get hungry and dirty, then care for it.
    session.advance_ticks(60).unwrap();
    assert!(session.state().vitals.food < 0.5);
    session.feed().unwrap();
    session.clean().unwrap();
    assert!(session.state().vitals.food >= 1.0 - 1e-6);
    assert!(session.state().vitals.hygiene >= 1.0 - 1e-6);

    // Two care actions so far: 0.5 XP. Care up to the first level.
    let mut unlocked_center = false;
    while session.state().current_level < 2 {
        let events = session.feed().unwrap();
        unlocked_center |= events.contains(&PetEvent::CenterUnlocked);
    }
    assert!(unlocked_center);
    assert!(session.state().is_center_unlocked());

    // Care coins accumulate; spend some in the shop.
    assert_eq!(
        session.buy_item(ItemKind::Potion).unwrap(),
        PurchaseOutcome::Purchased
    );
    let potion_id = session.state().inventory[0].id;
    assert_eq!(session.use_item(potion_id).unwrap(), UseOutcome::Restored);
    assert!(session.state().inventory.is_empty());

    drop(session);
    let reloaded = open_session(storage, &user, 0xCAFE);
    assert_eq!(reloaded.state().current_level, 2);
    assert_eq!(reloaded.state().species, species::CHARMANDER);
    assert!(reloaded.state().pokedex.iter().any(|r| r.rarity == Rarity::Starter));
}

#[test]
fn evolution_arrives_through_steady_care() {
    let storage = MemoryStorage::default();
    let user = UserId("uid-trainer".to_string());
    let mut session = open_session(storage, &user, 1);
    session.hatch(species::CHARMANDER, None).unwrap();

    while session.state().current_level < 5 {
        session.feed().unwrap();
    }
    assert_eq!(session.state().species, species::CHARIZARD);
    assert_eq!(session.state().name, "Charizard");
    let registered: Vec<_> = session.state().pokedex.iter().map(|r| r.species).collect();
    assert!(registered.contains(&species::CHARMELEON));
    assert!(registered.contains(&species::CHARIZARD));
}

#[test]
fn offline_saves_warn_but_the_session_keeps_playing() {
    init_logging();
    let mut session =
        PetSession::login_with_rng(OfflineStorage, "uid-offline", ChaCha20Rng::seed_from_u64(5))
            .expect("reads return empty");
    session.hatch(species::BULBASAUR, None).unwrap_err();
    assert!(session.state().pet_id.is_some());

    assert_eq!(session.feed(), Err(StorageOffline));
    assert!(session.state().vitals.food >= 1.0 - 1e-6);
    assert_eq!(session.clean(), Err(StorageOffline));
    assert_eq!(session.state().coins, 220);
}

#[test]
fn capture_and_swap_share_the_account_economy() {
    let storage = MemoryStorage::default();
    let user = UserId("uid-trainer".to_string());
    let mut session = open_session(storage.clone(), &user, 0xD1CE);
    session.hatch(species::BULBASAUR, Some("Bolha".to_string())).unwrap();
    let first_id = session.state().pet_id.clone().unwrap();

    assert_eq!(
        session.buy_item(ItemKind::MasterBall).unwrap(),
        PurchaseOutcome::Purchased
    );
    let coins_after_shopping = session.state().coins;
    let spawn = SpawnConfig {
        species: species::DRAGONITE,
        rarity: Rarity::Rare,
        xp_reward: 0.4,
    };
    let outcome = session.attempt_capture(BallKind::Master, true, &spawn).unwrap();
    assert!(matches!(
        outcome,
        CaptureOutcome::Caught {
            newly_registered: true,
            ..
        }
    ));
    assert_eq!(session.state().coins, coins_after_shopping + 100);

    session.swap_active("pet-dragon", species::DRAGONITE).unwrap();
    assert_eq!(session.state().coins, coins_after_shopping + 100);
    assert!(session.stored_pets().contains_key(&first_id));

    // The benched pet comes back exactly as it was left.
    session.swap_active(&first_id, species::BULBASAUR).unwrap();
    assert_eq!(session.state().name, "Bolha");

    drop(session);
    let reloaded = open_session(storage, &user, 0xD1CE);
    assert!(reloaded.stored_pets().contains_key("pet-dragon"));
    assert!(
        reloaded
            .state()
            .pokedex
            .iter()
            .any(|r| r.species == species::DRAGONITE)
    );
}
