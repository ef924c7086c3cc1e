use pocketpet_game::capture::{BallKind, CaptureOutcome, resolve_roll_with_rng};
use pocketpet_game::map::{REGIONS, select_spawn_with_rng};
use pocketpet_game::species;
use pocketpet_game::state::PetState;
use pocketpet_game::{Rarity, SpawnConfig};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const SAMPLE_SIZE: usize = 5000;
const TOLERANCE: f64 = 0.025;

const TODAY: &str = "26/08/2026";

fn observed_catch_rate(ball: BallKind, seed: u64) -> f64 {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut caught = 0usize;
    for _ in 0..SAMPLE_SIZE {
        let mut state = PetState::default();
        let outcome = resolve_roll_with_rng(
            &mut state,
            ball,
            species::MAGIKARP,
            0.03,
            TODAY,
            &mut rng,
        );
        if matches!(outcome, CaptureOutcome::Caught { .. }) {
            caught += 1;
        }
    }
    f64::from(u32::try_from(caught).expect("count fits")) / f64::from(u32::try_from(SAMPLE_SIZE).expect("sample size fits"))
}

#[test]
fn poke_ball_rate_tracks_configured_odds() {
    let observed = observed_catch_rate(BallKind::Poke, 0xB0A7);
    let expected = f64::from(BallKind::Poke.catch_pct() - 1) / 100.0;
    assert!(
        (observed - expected).abs() <= TOLERANCE,
        "poke ball rate drifted: observed {observed:.4}"
    );
}

#[test]
fn ultra_ball_rate_tracks_configured_odds() {
    let observed = observed_catch_rate(BallKind::Ultra, 0xB0A8);
    let expected = f64::from(BallKind::Ultra.catch_pct() - 1) / 100.0;
    assert!(
        (observed - expected).abs() <= TOLERANCE,
        "ultra ball rate drifted: observed {observed:.4}"
    );
}

#[test]
fn master_ball_never_misses() {
    let observed = observed_catch_rate(BallKind::Master, 0xB0A9);
    assert!((observed - 1.0).abs() < f64::EPSILON);
}

#[test]
fn ultra_beats_poke_over_many_attempts() {
    let poke = observed_catch_rate(BallKind::Poke, 42);
    let ultra = observed_catch_rate(BallKind::Ultra, 42);
    assert!(ultra > poke + 0.2, "poke {poke:.4} ultra {ultra:.4}");
}

#[test]
fn forest_legendary_spawn_rate_is_about_five_percent() {
    let forest = &REGIONS[0];
    assert_eq!(forest.id, "forest");
    let mut rng = SmallRng::seed_from_u64(0xF0E5);
    let mut legendary = 0usize;
    for _ in 0..SAMPLE_SIZE {
        let spawn: &SpawnConfig =
            select_spawn_with_rng(forest.spawns, &mut rng).expect("table is not empty");
        if spawn.rarity == Rarity::Legendary {
            legendary += 1;
        }
    }
    let observed = f64::from(u32::try_from(legendary).expect("count fits"))
        / f64::from(u32::try_from(SAMPLE_SIZE).expect("sample size fits"));
    assert!(
        (observed - 0.05).abs() <= TOLERANCE,
        "legendary spawn rate drifted: observed {observed:.4}"
    );
}
