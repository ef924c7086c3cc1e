//! Capture resolution: device tiers, the success roll, and the rewards
//! granted when a wild creature is caught.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CAPTURE_COIN_REWARD, LEGENDARY_REWARD_FLOOR, LOG_CAPTURE_ESCAPED, LOG_CAPTURE_FLED,
    LOG_CAPTURE_SUCCESS, POKE_BALL_CATCH_PCT, RARE_REWARD_FLOOR, ULTRA_BALL_CATCH_PCT,
};
use crate::items::ItemKind;
use crate::species::{self, Rarity, SpeciesId};
use crate::state::{CaptureRecord, PetEventSet, PetState};

/// Capture device tier. Higher tiers trade coins for better odds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallKind {
    Poke,
    Ultra,
    Master,
}

impl BallKind {
    /// Success percentage rolled against a uniform 1..=100 draw. The top
    /// tier never rolls.
    #[must_use]
    pub const fn catch_pct(self) -> u32 {
        match self {
            Self::Poke => POKE_BALL_CATCH_PCT,
            Self::Ultra => ULTRA_BALL_CATCH_PCT,
            Self::Master => 100,
        }
    }

    #[must_use]
    pub const fn item_kind(self) -> ItemKind {
        match self {
            Self::Poke => ItemKind::PokeBall,
            Self::Ultra => ItemKind::UltraBall,
            Self::Master => ItemKind::MasterBall,
        }
    }

    #[must_use]
    pub const fn from_item(kind: ItemKind) -> Option<Self> {
        match kind {
            ItemKind::PokeBall => Some(Self::Poke),
            ItemKind::UltraBall => Some(Self::Ultra),
            ItemKind::MasterBall => Some(Self::Master),
            _ => None,
        }
    }
}

/// Result of one capture attempt. The device is spent in every variant
/// except [`CaptureOutcome::NoDevice`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureOutcome {
    Caught {
        species: SpeciesId,
        newly_registered: bool,
        events: PetEventSet,
    },
    /// Minigame passed but the roll failed.
    Escaped,
    /// Minigame failed or aborted; no roll happened.
    Fled,
    /// No matching capture device in the inventory.
    NoDevice,
}

/// Rarity tier a capture reward implies.
#[must_use]
pub fn rarity_for_reward(xp_reward: f32) -> Rarity {
    if xp_reward > LEGENDARY_REWARD_FLOOR {
        Rarity::Legendary
    } else if xp_reward > RARE_REWARD_FLOOR {
        Rarity::Rare
    } else {
        Rarity::Common
    }
}

/// Remove one capture device of `ball`'s kind from the inventory. Returns
/// false when none is owned. The device is spent when the attempt starts,
/// before any minigame or roll.
pub fn spend_device(state: &mut PetState, ball: BallKind) -> bool {
    let kind = ball.item_kind();
    if let Some(index) = state.inventory.iter().position(|item| item.kind == kind) {
        state.inventory.remove(index);
        true
    } else {
        false
    }
}

/// Resolve the post-minigame capture roll and apply rewards on success.
pub fn resolve_roll_with_rng(
    state: &mut PetState,
    ball: BallKind,
    target: SpeciesId,
    xp_reward: f32,
    today: &str,
    rng: &mut impl Rng,
) -> CaptureOutcome {
    let caught = match ball {
        BallKind::Master => true,
        _ => rng.gen_range(1..=100) < ball.catch_pct(),
    };
    if !caught {
        state.logs.push(LOG_CAPTURE_ESCAPED.to_string());
        return CaptureOutcome::Escaped;
    }

    state.coins += CAPTURE_COIN_REWARD;
    let events = state.gain_xp(xp_reward, today);
    let newly_registered = state.add_to_pokedex(CaptureRecord {
        species: target,
        name: species::display_name(target).to_string(),
        rarity: rarity_for_reward(xp_reward),
        xp_reward,
        date_caught: today.to_string(),
    });
    state.logs.push(LOG_CAPTURE_SUCCESS.to_string());
    CaptureOutcome::Caught {
        species: target,
        newly_registered,
        events,
    }
}

/// Full capture attempt: spend the device, gate on the minigame result,
/// then roll. The device is consumed regardless of outcome once owned.
pub fn attempt_capture_with_rng(
    state: &mut PetState,
    ball: BallKind,
    minigame_passed: bool,
    target: SpeciesId,
    xp_reward: f32,
    today: &str,
    rng: &mut impl Rng,
) -> CaptureOutcome {
    if !spend_device(state, ball) {
        return CaptureOutcome::NoDevice;
    }
    if !minigame_passed {
        state.logs.push(LOG_CAPTURE_FLED.to_string());
        return CaptureOutcome::Fled;
    }
    resolve_roll_with_rng(state, ball, target, xp_reward, today, rng)
}
