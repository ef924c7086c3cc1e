//! Exploration maps: per-region spawn tables, the rarity roll, and spawn
//! point scattering.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    SPAWN_LEGENDARY_PCT, SPAWN_MIN_DISTANCE, SPAWN_POINT_COUNT, SPAWN_RARE_PCT,
    SPAWN_SCATTER_MAX_ATTEMPTS,
};
use crate::species::{self, Rarity, SpeciesId};

/// One possible wild encounter on a region's table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    pub species: SpeciesId,
    pub rarity: Rarity,
    /// XP granted on a successful capture; also drives the pokedex rarity
    /// label and coin-free reward scaling.
    pub xp_reward: f32,
}

const fn spawn(species: SpeciesId, rarity: Rarity, xp_reward: f32) -> SpawnConfig {
    SpawnConfig {
        species,
        rarity,
        xp_reward,
    }
}

/// A map region the player can explore once they own the Adventure Map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub id: &'static str,
    pub background: &'static str,
    pub spawns: &'static [SpawnConfig],
}

pub const REGIONS: [MapRegion; 5] = [
    MapRegion {
        id: "forest",
        background: "maps/forest.png",
        spawns: &[
            spawn(species::AZURILL, Rarity::Common, 0.05),
            spawn(species::CHINCHOU, Rarity::Common, 0.05),
            spawn(species::PSYDUCK, Rarity::Common, 0.05),
            spawn(species::PETILIL, Rarity::Common, 0.05),
            spawn(species::BEEDRILL, Rarity::Rare, 0.15),
            spawn(species::RIBOMBEE, Rarity::Rare, 0.15),
            spawn(species::CRAMORANT, Rarity::Rare, 0.15),
            spawn(species::DRAGONITE, Rarity::Rare, 0.40),
            spawn(species::MEW, Rarity::Legendary, 0.60),
        ],
    },
    MapRegion {
        id: "village",
        background: "maps/village.png",
        spawns: &[
            spawn(species::AZURILL, Rarity::Common, 0.05),
            spawn(species::BIDOOF, Rarity::Common, 0.04),
            spawn(species::LEDIAN, Rarity::Common, 0.05),
            spawn(species::MAGIKARP, Rarity::Common, 0.03),
            spawn(species::CHATOT, Rarity::Rare, 0.12),
            spawn(species::JIGGLYPUFF, Rarity::Rare, 0.12),
            spawn(species::PETILIL, Rarity::Rare, 0.10),
            spawn(species::CRAMORANT, Rarity::Rare, 0.15),
            spawn(species::RIOLU, Rarity::Rare, 0.20),
            spawn(species::STARMIE, Rarity::Rare, 0.35),
        ],
    },
    MapRegion {
        id: "woods",
        background: "maps/woods.png",
        spawns: &[
            spawn(species::MAGIKARP, Rarity::Common, 0.03),
            spawn(species::LEDIAN, Rarity::Common, 0.05),
            spawn(species::WHISMUR, Rarity::Common, 0.05),
            spawn(species::ONIX, Rarity::Rare, 0.18),
            spawn(species::ABSOL, Rarity::Rare, 0.25),
            spawn(species::RIOLU, Rarity::Rare, 0.20),
            spawn(species::GARDEVOIR, Rarity::Rare, 0.30),
            spawn(species::DRAGONITE, Rarity::Rare, 0.45),
            spawn(species::GARCHOMP, Rarity::Rare, 0.50),
        ],
    },
    MapRegion {
        id: "ocean",
        background: "maps/ocean.png",
        spawns: &[
            spawn(species::MAGIKARP, Rarity::Common, 0.03),
            spawn(species::AZURILL, Rarity::Common, 0.05),
            spawn(species::PSYDUCK, Rarity::Common, 0.06),
            spawn(species::BIDOOF, Rarity::Common, 0.04),
            spawn(species::CHATOT, Rarity::Uncommon, 0.08),
            spawn(species::CHINCHOU, Rarity::Rare, 0.15),
            spawn(species::OCTILLERY, Rarity::Rare, 0.20),
            spawn(species::CRAMORANT, Rarity::Rare, 0.15),
            spawn(species::STARMIE, Rarity::Rare, 0.35),
        ],
    },
    MapRegion {
        id: "cave",
        background: "maps/cave.png",
        spawns: &[
            spawn(species::WHISMUR, Rarity::Common, 0.05),
            spawn(species::BIDOOF, Rarity::Common, 0.04),
            spawn(species::RIOLU, Rarity::Rare, 0.20),
            spawn(species::JIGGLYPUFF, Rarity::Rare, 0.12),
            spawn(species::ONIX, Rarity::Rare, 0.18),
            spawn(species::CHANDELURE, Rarity::Rare, 0.25),
            spawn(species::ABSOL, Rarity::Rare, 0.25),
            spawn(species::SPIRITOMB, Rarity::Rare, 0.30),
            spawn(species::METAGROSS, Rarity::Rare, 0.50),
            spawn(species::GARCHOMP, Rarity::Rare, 0.55),
        ],
    },
];

/// Region lookup by id, falling back to the first region.
#[must_use]
pub fn region_or_default(id: &str) -> &'static MapRegion {
    REGIONS.iter().find(|r| r.id == id).unwrap_or(&REGIONS[0])
}

/// Roll the rarity bucket for a spawn: 1..=100, the top 5 are legendary,
/// the next 20 rare, everything else common. Uncommon creatures are never
/// targeted directly; they surface through the fallback draw only.
pub fn roll_spawn_rarity(rng: &mut impl Rng) -> Rarity {
    let roll = rng.gen_range(1..=100_u32);
    if roll <= SPAWN_LEGENDARY_PCT {
        Rarity::Legendary
    } else if roll <= SPAWN_LEGENDARY_PCT + SPAWN_RARE_PCT {
        Rarity::Rare
    } else {
        Rarity::Common
    }
}

/// Pick a spawn from `spawns`: roll a rarity bucket, draw uniformly from
/// that bucket, and fall back to a uniform draw over the whole table when
/// the bucket is empty. Returns `None` only for an empty table.
pub fn select_spawn_with_rng<'a>(
    spawns: &'a [SpawnConfig],
    rng: &mut impl Rng,
) -> Option<&'a SpawnConfig> {
    if spawns.is_empty() {
        return None;
    }
    let target = roll_spawn_rarity(rng);
    let matching: Vec<&SpawnConfig> = spawns.iter().filter(|s| s.rarity == target).collect();
    if matching.is_empty() {
        spawns.get(rng.gen_range(0..spawns.len()))
    } else {
        Some(matching[rng.gen_range(0..matching.len())])
    }
}

/// Scatter up to [`SPAWN_POINT_COUNT`] points in the unit square, keeping a
/// minimum pairwise distance. Bounded rejection sampling; a crowded board
/// may yield fewer points.
pub fn scatter_spawn_points(rng: &mut impl Rng) -> Vec<(f32, f32)> {
    scatter_points(SPAWN_POINT_COUNT, SPAWN_MIN_DISTANCE, rng)
}

pub fn scatter_points(count: usize, min_distance: f32, rng: &mut impl Rng) -> Vec<(f32, f32)> {
    let mut points: Vec<(f32, f32)> = Vec::with_capacity(count);
    let mut attempts = 0;
    while points.len() < count && attempts < SPAWN_SCATTER_MAX_ATTEMPTS {
        attempts += 1;
        let candidate = (rng.gen_range(0.1..0.9_f32), rng.gen_range(0.15..0.85_f32));
        let too_close = points.iter().any(|&(x, y)| {
            let dx = x - candidate.0;
            let dy = y - candidate.1;
            (dx * dx + dy * dy).sqrt() < min_distance
        });
        if !too_close {
            points.push(candidate);
        }
    }
    points
}
