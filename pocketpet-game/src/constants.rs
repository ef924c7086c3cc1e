//! Centralized balance and tuning constants for PocketPet game logic.
//!
//! These values define the deterministic math for the pet simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_LEVEL_UP: &str = "log.level-up";
pub(crate) const LOG_EVOLVED: &str = "log.evolved";
pub(crate) const LOG_CENTER_UNLOCKED: &str = "log.center-unlocked";
pub(crate) const LOG_FED: &str = "log.care.fed";
pub(crate) const LOG_CLEANED: &str = "log.care.cleaned";
pub(crate) const LOG_ITEM_PURCHASED: &str = "log.shop.purchased";
pub(crate) const LOG_ITEM_FUNDS: &str = "log.shop.insufficient-funds";
pub(crate) const LOG_ITEM_LIMIT: &str = "log.shop.limit-reached";
pub(crate) const LOG_ITEM_USED: &str = "log.item.used";
pub(crate) const LOG_CAPTURE_SUCCESS: &str = "log.capture.success";
pub(crate) const LOG_CAPTURE_ESCAPED: &str = "log.capture.escaped";
pub(crate) const LOG_CAPTURE_FLED: &str = "log.capture.fled";
pub(crate) const LOG_POKEDEX_REGISTERED: &str = "log.pokedex.registered";
pub(crate) const LOG_HATCHED: &str = "log.hatched";
pub(crate) const LOG_SWAPPED: &str = "log.swapped";

// Vital bounds and decay ---------------------------------------------------
pub(crate) const VITAL_MIN: f32 = 0.0;
pub(crate) const VITAL_MAX: f32 = 1.0;
pub(crate) const VITAL_LOW_THRESHOLD: f32 = 0.1;
pub(crate) const DECAY_FOOD_STEP: f32 = 0.01;
pub(crate) const DECAY_HYGIENE_STEP: f32 = 0.01;
pub(crate) const DECAY_HEALTH_STEP: f32 = 0.02;
/// Wall-clock interval between decay ticks.
pub const DECAY_TICK_SECS: u64 = 15;
/// Every vital has reached its floor within this many ticks from any
/// state; idle catch-up never needs more.
pub(crate) const CATCHUP_TICK_CAP: u32 = 150;

// Care actions -------------------------------------------------------------
pub(crate) const CARE_COIN_BONUS: i64 = 10;
pub(crate) const CARE_XP_REWARD: f32 = 0.25;
pub(crate) const HEALTH_RECOVERY_STEP: f32 = 0.1;
pub(crate) const HEALTH_RECOVERY_GATE: f32 = 0.8;

// Progression --------------------------------------------------------------
pub(crate) const XP_LEVEL_THRESHOLD: f32 = 1.0;
pub(crate) const CENTER_UNLOCK_LEVEL: u32 = 2;

// Capture ------------------------------------------------------------------
pub(crate) const CAPTURE_COIN_REWARD: i64 = 100;
pub(crate) const POKE_BALL_CATCH_PCT: u32 = 35;
pub(crate) const ULTRA_BALL_CATCH_PCT: u32 = 65;
pub(crate) const LEGENDARY_REWARD_FLOOR: f32 = 0.3;
pub(crate) const RARE_REWARD_FLOOR: f32 = 0.1;

// Spawn selection ----------------------------------------------------------
pub(crate) const SPAWN_LEGENDARY_PCT: u32 = 5;
pub(crate) const SPAWN_RARE_PCT: u32 = 20;
pub(crate) const SPAWN_POINT_COUNT: usize = 5;
pub(crate) const SPAWN_MIN_DISTANCE: f32 = 0.12;
pub(crate) const SPAWN_SCATTER_MAX_ATTEMPTS: u32 = 200;

// Catch minigames ----------------------------------------------------------
pub(crate) const RING_ZONE_MIN_SCALE: f32 = 0.8;
pub(crate) const RING_ZONE_MAX_SCALE: f32 = 1.2;
pub(crate) const RAPID_TAP_TARGET: u32 = 20;
pub(crate) const RAPID_TAP_WINDOW_TICKS: u32 = 40;
pub(crate) const REACTION_WINDOW_MS: u64 = 650;
pub(crate) const BALANCE_EDGE_LIMIT: f32 = 150.0;
pub(crate) const BALANCE_SURVIVAL_TICKS: u32 = 50;
pub(crate) const BALANCE_TILT_GAIN: f32 = 2.0;

// Care flows ---------------------------------------------------------------
pub(crate) const HATCH_TAP_TARGET: u32 = 10;
pub(crate) const COOKING_BERRY_COUNT: usize = 3;
pub(crate) const SEASONING_OSCILLATION_STEP: f32 = 0.035;
pub(crate) const SEASONING_ZONE_MIN: f32 = 0.4;
pub(crate) const SEASONING_ZONE_MAX: f32 = 0.6;
pub(crate) const SCRUB_EDGE_STEP: f32 = 0.008;
pub(crate) const COOLING_BLOW_STEP: f32 = 0.02;
pub(crate) const WASH_SCRUB_TARGET: f32 = 5_000.0;

// Gesture thresholds -------------------------------------------------------
pub(crate) const SHAKE_G_FORCE_THRESHOLD: f32 = 2.6;
pub(crate) const BLOW_AMPLITUDE_THRESHOLD: i32 = 500;
pub(crate) const DRY_SHAKE_DELTA_THRESHOLD: f32 = 800.0;

// Session defaults ---------------------------------------------------------
pub(crate) const DEFAULT_PET_NAME: &str = "PocketPet";
pub(crate) const DEFAULT_VITAL: f32 = 0.7;
pub(crate) const DEFAULT_COINS: i64 = 200;
pub(crate) const HATCH_VITAL: f32 = 1.0;
pub(crate) const SWAP_FRESH_VITAL: f32 = 0.8;

// Auth ---------------------------------------------------------------------
pub(crate) const PASSWORD_MIN_LEN: usize = 8;

#[cfg(test)]
pub(crate) const FLOAT_EPSILON: f32 = 1e-6;
