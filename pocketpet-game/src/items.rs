//! Shop catalog, inventory entries, and the purchase/consume rules.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    LOG_ITEM_FUNDS, LOG_ITEM_LIMIT, LOG_ITEM_PURCHASED, LOG_ITEM_USED, VITAL_MAX,
};
use crate::state::PetState;

/// Everything the shop sells. Capture devices are consumed through the
/// capture flow, not [`use_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    FullHeal,
    Potion,
    FullHeart,
    FullClean,
    FullHunger,
    PokeBall,
    UltraBall,
    MasterBall,
    Identifier,
    Map,
}

/// Shop listing order.
pub const SHOP_CATALOG: [ItemKind; 10] = [
    ItemKind::Map,
    ItemKind::Identifier,
    ItemKind::Potion,
    ItemKind::FullHeal,
    ItemKind::FullHeart,
    ItemKind::FullClean,
    ItemKind::FullHunger,
    ItemKind::PokeBall,
    ItemKind::UltraBall,
    ItemKind::MasterBall,
];

impl ItemKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullHeal => "full_heal",
            Self::Potion => "potion",
            Self::FullHeart => "full_heart",
            Self::FullClean => "full_clean",
            Self::FullHunger => "full_hunger",
            Self::PokeBall => "poke_ball",
            Self::UltraBall => "ultra_ball",
            Self::MasterBall => "master_ball",
            Self::Identifier => "identifier",
            Self::Map => "map",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::FullHeal => "Full Heal",
            Self::Potion => "Standard Potion",
            Self::FullHeart => "Full Heart",
            Self::FullClean => "Full Clean",
            Self::FullHunger => "Full Food",
            Self::PokeBall => "Poke Ball",
            Self::UltraBall => "Ultra Ball",
            Self::MasterBall => "Master Ball",
            Self::Identifier => "Identifier",
            Self::Map => "Adventure Map",
        }
    }

    /// Price in coins.
    #[must_use]
    pub const fn price(self) -> i64 {
        match self {
            Self::Potion => 10,
            Self::PokeBall => 20,
            Self::FullClean => 30,
            Self::FullHunger => 35,
            Self::FullHeart => 40,
            Self::FullHeal | Self::UltraBall => 50,
            Self::Map => 150,
            Self::MasterBall => 200,
            Self::Identifier => 300,
        }
    }

    /// Maximum owned count enforced by the shop.
    #[must_use]
    pub const fn limit(self) -> usize {
        match self {
            Self::Map => 1,
            _ => 5,
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::FullHeal => "icons/full_heal.png",
            Self::Potion => "icons/potion.png",
            Self::FullHeart => "icons/full_heart.png",
            Self::FullClean => "icons/full_clean.png",
            Self::FullHunger => "icons/full_hunger.png",
            Self::PokeBall => "icons/poke_ball.png",
            Self::UltraBall => "icons/ultra_ball.png",
            Self::MasterBall => "icons/master_ball.png",
            Self::Identifier => "icons/identifier.png",
            Self::Map => "icons/map.png",
        }
    }

    #[must_use]
    pub const fn is_capture_device(self) -> bool {
        matches!(self, Self::PokeBall | Self::UltraBall | Self::MasterBall)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SHOP_CATALOG
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}

/// One owned inventory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: u64,
    pub kind: ItemKind,
    pub name: String,
    pub icon: String,
}

impl InventoryItem {
    #[must_use]
    pub fn new(id: u64, kind: ItemKind) -> Self {
        Self {
            id,
            kind,
            name: kind.display_name().to_string(),
            icon: kind.icon().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOutcome {
    Purchased,
    InsufficientFunds,
    LimitReached,
}

/// Effect of consuming an inventory entry. Non-consumable kinds report the
/// UI-side effect to trigger; the entry is removed either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseOutcome {
    Restored,
    OpenedMap,
    Identified,
    NoEffect,
    NotOwned,
}

/// Buy one item of `kind`. Rejects without mutation when the player cannot
/// afford it or already owns the kind's limit.
pub fn buy_item(state: &mut PetState, kind: ItemKind) -> PurchaseOutcome {
    if state.coins < kind.price() {
        state.logs.push(LOG_ITEM_FUNDS.to_string());
        return PurchaseOutcome::InsufficientFunds;
    }
    if state.owned_count(kind) >= kind.limit() {
        state.logs.push(LOG_ITEM_LIMIT.to_string());
        return PurchaseOutcome::LimitReached;
    }
    state.coins -= kind.price();
    let id = state.allocate_item_id();
    state.inventory.push(InventoryItem::new(id, kind));
    state.logs.push(LOG_ITEM_PURCHASED.to_string());
    PurchaseOutcome::Purchased
}

/// Consume the inventory entry with `item_id`, dispatching on its kind.
/// The entry is removed exactly once; a missing id is a no-op.
pub fn use_item(state: &mut PetState, item_id: u64) -> UseOutcome {
    let Some(index) = state.inventory.iter().position(|item| item.id == item_id) else {
        return UseOutcome::NotOwned;
    };
    let kind = state.inventory[index].kind;
    let outcome = match kind {
        ItemKind::FullHeal => {
            state.vitals.health = VITAL_MAX;
            state.vitals.food = VITAL_MAX;
            state.vitals.hygiene = VITAL_MAX;
            UseOutcome::Restored
        }
        ItemKind::Potion => {
            state.vitals.health = (state.vitals.health + 0.3).min(VITAL_MAX);
            UseOutcome::Restored
        }
        ItemKind::FullHeart => {
            state.vitals.health = VITAL_MAX;
            UseOutcome::Restored
        }
        ItemKind::FullClean => {
            state.vitals.hygiene = VITAL_MAX;
            UseOutcome::Restored
        }
        ItemKind::FullHunger => {
            state.vitals.food = VITAL_MAX;
            UseOutcome::Restored
        }
        ItemKind::Map => UseOutcome::OpenedMap,
        ItemKind::Identifier => UseOutcome::Identified,
        ItemKind::PokeBall | ItemKind::UltraBall | ItemKind::MasterBall => UseOutcome::NoEffect,
    };
    state.inventory.remove(index);
    state.logs.push(LOG_ITEM_USED.to_string());
    outcome
}
