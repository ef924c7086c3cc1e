//! Static species catalog: names, sprite assets, starters, and the
//! evolution chain. Pure lookups with an explicit unknown fallback.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier selecting which creature's assets and evolution
/// chain apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesId(pub u32);

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Starters and their evolutions.
pub const BULBASAUR: SpeciesId = SpeciesId(1);
pub const CHARMANDER: SpeciesId = SpeciesId(2);
pub const PIKACHU: SpeciesId = SpeciesId(3);
pub const CHARMELEON: SpeciesId = SpeciesId(4);
pub const CHARIZARD: SpeciesId = SpeciesId(5);

// Wild species found on the exploration maps.
pub const AZURILL: SpeciesId = SpeciesId(10);
pub const CHINCHOU: SpeciesId = SpeciesId(11);
pub const PSYDUCK: SpeciesId = SpeciesId(12);
pub const PETILIL: SpeciesId = SpeciesId(13);
pub const BEEDRILL: SpeciesId = SpeciesId(14);
pub const RIBOMBEE: SpeciesId = SpeciesId(15);
pub const CRAMORANT: SpeciesId = SpeciesId(16);
pub const DRAGONITE: SpeciesId = SpeciesId(17);
pub const MEW: SpeciesId = SpeciesId(18);
pub const BIDOOF: SpeciesId = SpeciesId(19);
pub const LEDIAN: SpeciesId = SpeciesId(20);
pub const MAGIKARP: SpeciesId = SpeciesId(21);
pub const CHATOT: SpeciesId = SpeciesId(22);
pub const JIGGLYPUFF: SpeciesId = SpeciesId(23);
pub const RIOLU: SpeciesId = SpeciesId(24);
pub const STARMIE: SpeciesId = SpeciesId(25);
pub const WHISMUR: SpeciesId = SpeciesId(26);
pub const ONIX: SpeciesId = SpeciesId(27);
pub const ABSOL: SpeciesId = SpeciesId(28);
pub const GARDEVOIR: SpeciesId = SpeciesId(29);
pub const GARCHOMP: SpeciesId = SpeciesId(30);
pub const OCTILLERY: SpeciesId = SpeciesId(31);
pub const CHANDELURE: SpeciesId = SpeciesId(32);
pub const SPIRITOMB: SpeciesId = SpeciesId(33);
pub const METAGROSS: SpeciesId = SpeciesId(34);

/// Species selectable when hatching a starter egg.
pub const STARTERS: [SpeciesId; 3] = [BULBASAUR, CHARMANDER, PIKACHU];

/// (species, level required, evolved form)
const EVOLUTIONS: &[(SpeciesId, u32, SpeciesId)] =
    &[(CHARMANDER, 3, CHARMELEON), (CHARMELEON, 5, CHARIZARD)];

/// Visual state tag for sprite selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PoseTag {
    #[default]
    Happy,
    Dirty,
    Wet,
}

impl PoseTag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Dirty => "dirty",
            Self::Wet => "wet",
        }
    }
}

impl fmt::Display for PoseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PoseTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(Self::Happy),
            "dirty" => Ok(Self::Dirty),
            "wet" => Ok(Self::Wet),
            _ => Err(()),
        }
    }
}

/// Rarity classification on discoverable creatures. Controls the XP and
/// coin reward of capturing them and how a pokedex entry was earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
    /// Starter hatched by the player; never rolled on a map.
    Starter,
    /// Entry created by an evolution rather than a capture.
    Evolved,
}

impl Rarity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Legendary => "legendary",
            Self::Starter => "starter",
            Self::Evolved => "evolved",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common" => Ok(Self::Common),
            "uncommon" => Ok(Self::Uncommon),
            "rare" => Ok(Self::Rare),
            "legendary" => Ok(Self::Legendary),
            "starter" => Ok(Self::Starter),
            "evolved" => Ok(Self::Evolved),
            _ => Err(()),
        }
    }
}

/// Display name for a species, `"Unknown"` when the id is not cataloged.
#[must_use]
pub fn display_name(species: SpeciesId) -> &'static str {
    match species {
        BULBASAUR => "Bulbasaur",
        CHARMANDER => "Charmander",
        PIKACHU => "Pikachu",
        CHARMELEON => "Charmeleon",
        CHARIZARD => "Charizard",
        AZURILL => "Azurill",
        CHINCHOU => "Chinchou",
        PSYDUCK => "Psyduck",
        PETILIL => "Petilil",
        BEEDRILL => "Beedrill",
        RIBOMBEE => "Ribombee",
        CRAMORANT => "Cramorant",
        DRAGONITE => "Dragonite",
        MEW => "Mew",
        BIDOOF => "Bidoof",
        LEDIAN => "Ledian",
        MAGIKARP => "Magikarp",
        CHATOT => "Chatot",
        JIGGLYPUFF => "Jigglypuff",
        RIOLU => "Riolu",
        STARMIE => "Starmie",
        WHISMUR => "Whismur",
        ONIX => "Onix",
        ABSOL => "Absol",
        GARDEVOIR => "Gardevoir",
        GARCHOMP => "Garchomp",
        OCTILLERY => "Octillery",
        CHANDELURE => "Chandelure",
        SPIRITOMB => "Spiritomb",
        METAGROSS => "Metagross",
        _ => "Unknown",
    }
}

/// Sprite asset reference for a species in a given pose. Only the three
/// starters carry pose variants; everything else has a single sprite.
/// Unknown species resolve to a placeholder asset.
#[must_use]
pub fn sprite(species: SpeciesId, pose: PoseTag) -> String {
    if display_name(species) == "Unknown" {
        return String::from("sprites/missingno.png");
    }
    let slug = display_name(species).to_ascii_lowercase();
    if STARTERS.contains(&species) {
        format!("sprites/{slug}_{pose}.png")
    } else {
        format!("sprites/{slug}.png")
    }
}

/// Whether `species` is known to the catalog.
#[must_use]
pub fn is_known(species: SpeciesId) -> bool {
    display_name(species) != "Unknown"
}

/// Evolved form the species reaches at `level`, if any.
#[must_use]
pub fn evolution_at(species: SpeciesId, level: u32) -> Option<SpeciesId> {
    EVOLUTIONS
        .iter()
        .find(|(from, required, _)| *from == species && level >= *required)
        .map(|(_, _, to)| *to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_names_resolve() {
        assert_eq!(display_name(BULBASAUR), "Bulbasaur");
        assert_eq!(display_name(PIKACHU), "Pikachu");
        assert_eq!(display_name(SpeciesId(999)), "Unknown");
    }

    #[test]
    fn starters_carry_pose_variants() {
        assert_eq!(sprite(PIKACHU, PoseTag::Wet), "sprites/pikachu_wet.png");
        assert_eq!(sprite(PIKACHU, PoseTag::Happy), "sprites/pikachu_happy.png");
        assert_eq!(sprite(DRAGONITE, PoseTag::Dirty), "sprites/dragonite.png");
    }

    #[test]
    fn unknown_species_fall_back_to_placeholder() {
        assert_eq!(sprite(SpeciesId(999), PoseTag::Happy), "sprites/missingno.png");
        assert!(!is_known(SpeciesId(0)));
    }

    #[test]
    fn evolution_chain_thresholds() {
        assert_eq!(evolution_at(CHARMANDER, 2), None);
        assert_eq!(evolution_at(CHARMANDER, 3), Some(CHARMELEON));
        assert_eq!(evolution_at(CHARMELEON, 4), None);
        assert_eq!(evolution_at(CHARMELEON, 5), Some(CHARIZARD));
        assert_eq!(evolution_at(CHARIZARD, 99), None);
        assert_eq!(evolution_at(BULBASAUR, 99), None);
    }

    #[test]
    fn pose_tags_round_trip_through_str() {
        for pose in [PoseTag::Happy, PoseTag::Dirty, PoseTag::Wet] {
            assert_eq!(pose.as_str().parse::<PoseTag>(), Ok(pose));
        }
        assert!("sleepy".parse::<PoseTag>().is_err());
    }

    #[test]
    fn rarity_round_trips_through_str() {
        for rarity in [
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Legendary,
            Rarity::Starter,
            Rarity::Evolved,
        ] {
            assert_eq!(rarity.as_str().parse::<Rarity>(), Ok(rarity));
        }
        assert!("shiny".parse::<Rarity>().is_err());
    }
}
