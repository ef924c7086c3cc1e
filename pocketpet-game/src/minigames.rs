//! Pass/fail rules for the capture minigames, the gesture triggers that
//! drive them, and the cooking/washing care flows. Everything here is pure
//! arithmetic against caller-sampled input; presentation and timing live in
//! the UI layer.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    BALANCE_EDGE_LIMIT, BALANCE_SURVIVAL_TICKS, BALANCE_TILT_GAIN, BLOW_AMPLITUDE_THRESHOLD,
    COOKING_BERRY_COUNT, COOLING_BLOW_STEP, DRY_SHAKE_DELTA_THRESHOLD, HATCH_TAP_TARGET,
    RAPID_TAP_TARGET, RAPID_TAP_WINDOW_TICKS, REACTION_WINDOW_MS, RING_ZONE_MAX_SCALE,
    RING_ZONE_MIN_SCALE, SCRUB_EDGE_STEP, SEASONING_OSCILLATION_STEP, SEASONING_ZONE_MAX,
    SEASONING_ZONE_MIN, SHAKE_G_FORCE_THRESHOLD, WASH_SCRUB_TARGET,
};

// --- Gesture triggers -----------------------------------------------------

/// Accelerometer magnitude (in g) crossing the shake threshold.
#[must_use]
pub fn shake_triggered(g_force: f32) -> bool {
    g_force > SHAKE_G_FORCE_THRESHOLD
}

/// Microphone amplitude crossing the blow threshold.
#[must_use]
pub const fn blow_triggered(amplitude: i32) -> bool {
    amplitude > BLOW_AMPLITUDE_THRESHOLD
}

/// Delta-rate shake used by the drying step (axis-sum delta scaled by the
/// sample interval).
#[must_use]
pub fn dry_shake_triggered(delta_rate: f32) -> bool {
    delta_rate > DRY_SHAKE_DELTA_THRESHOLD
}

// --- Catch minigames ------------------------------------------------------

/// The four capture minigames, one chosen uniformly per attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatchMinigame {
    ShrinkingRing,
    RapidTap,
    Reaction,
    TiltBalance,
}

impl CatchMinigame {
    pub const ALL: [Self; 4] = [
        Self::ShrinkingRing,
        Self::RapidTap,
        Self::Reaction,
        Self::TiltBalance,
    ];

    /// Pick one uniformly for a fresh capture attempt.
    pub fn pick(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShrinkingRing => "shrinking_ring",
            Self::RapidTap => "rapid_tap",
            Self::Reaction => "reaction",
            Self::TiltBalance => "tilt_balance",
        }
    }
}

impl fmt::Display for CatchMinigame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shrinking ring: the tap lands while the ring scale is inside the catch
/// zone.
#[must_use]
pub fn ring_zone_hit(scale: f32) -> bool {
    (RING_ZONE_MIN_SCALE..=RING_ZONE_MAX_SCALE).contains(&scale)
}

/// Rapid tap: enough taps before the window closes.
#[must_use]
pub const fn rapid_tap_passed(taps: u32, elapsed_ticks: u32) -> bool {
    taps >= RAPID_TAP_TARGET && elapsed_ticks <= RAPID_TAP_WINDOW_TICKS
}

/// Reaction: tapped within the cue window.
#[must_use]
pub const fn reaction_hit(reaction_ms: u64) -> bool {
    reaction_ms < REACTION_WINDOW_MS
}

/// Tilt balance: integrate one accelerometer sample into the ball position.
#[must_use]
pub fn balance_step(position: f32, tilt: f32) -> f32 {
    position - tilt * BALANCE_TILT_GAIN
}

/// Tilt balance: the ball fell off the bar.
#[must_use]
pub fn balance_fallen(position: f32) -> bool {
    position.abs() > BALANCE_EDGE_LIMIT
}

/// Tilt balance: survived the full timer.
#[must_use]
pub const fn balance_survived(elapsed_ticks: u32) -> bool {
    elapsed_ticks >= BALANCE_SURVIVAL_TICKS
}

/// Egg hatch: enough taps to crack the shell.
#[must_use]
pub const fn hatch_complete(taps: u32) -> bool {
    taps >= HATCH_TAP_TARGET
}

// --- Cooking flow (feeds the pet on completion) ---------------------------

/// Steps of the kitchen flow, in order. The terminal step is the cue for
/// the caller to invoke `feed()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookingStep {
    DropBerries,
    MixShake,
    Season,
    CleanEdges,
    CoolDown,
    Serve,
}

/// Deterministic kitchen step machine. Inputs arrive as discrete samples
/// from the UI (drags, taps, sensor readings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookingFlow {
    step: CookingStep,
    berries_dropped: usize,
    seasoning_progress: f32,
    seasoning_rising: bool,
    cleaning_progress: f32,
    cooling_progress: f32,
}

impl Default for CookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CookingFlow {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: CookingStep::DropBerries,
            berries_dropped: 0,
            seasoning_progress: 0.0,
            seasoning_rising: true,
            cleaning_progress: 0.0,
            cooling_progress: 0.0,
        }
    }

    #[must_use]
    pub const fn step(&self) -> CookingStep {
        self.step
    }

    #[must_use]
    pub const fn is_ready_to_serve(&self) -> bool {
        matches!(self.step, CookingStep::Serve)
    }

    /// A berry landed in the pot.
    pub fn drop_berry(&mut self) {
        if self.step != CookingStep::DropBerries {
            return;
        }
        self.berries_dropped += 1;
        if self.berries_dropped >= COOKING_BERRY_COUNT {
            self.step = CookingStep::MixShake;
        }
    }

    /// Shake sample while mixing.
    pub fn shake(&mut self, g_force: f32) {
        if self.step == CookingStep::MixShake && shake_triggered(g_force) {
            self.step = CookingStep::Season;
        }
    }

    /// One animation tick of the oscillating seasoning bar.
    pub fn seasoning_tick(&mut self) {
        if self.step != CookingStep::Season {
            return;
        }
        if self.seasoning_rising {
            self.seasoning_progress += SEASONING_OSCILLATION_STEP;
            if self.seasoning_progress >= 1.0 {
                self.seasoning_rising = false;
            }
        } else {
            self.seasoning_progress -= SEASONING_OSCILLATION_STEP;
            if self.seasoning_progress <= 0.0 {
                self.seasoning_rising = true;
            }
        }
    }

    /// Tap during seasoning; lands only inside the target zone.
    pub fn season_tap(&mut self) -> bool {
        if self.step != CookingStep::Season {
            return false;
        }
        let hit = (SEASONING_ZONE_MIN..=SEASONING_ZONE_MAX).contains(&self.seasoning_progress);
        if hit {
            self.step = CookingStep::CleanEdges;
        }
        hit
    }

    /// One drag sample scrubbing the plate edges.
    pub fn scrub_sample(&mut self) {
        if self.step != CookingStep::CleanEdges {
            return;
        }
        self.cleaning_progress += SCRUB_EDGE_STEP;
        if self.cleaning_progress >= 1.0 {
            self.step = CookingStep::CoolDown;
        }
    }

    /// One microphone sample cooling the dish; loud samples make progress.
    pub fn blow_sample(&mut self, amplitude: i32) {
        if self.step != CookingStep::CoolDown || !blow_triggered(amplitude) {
            return;
        }
        self.cooling_progress += COOLING_BLOW_STEP;
        if self.cooling_progress >= 1.0 {
            self.step = CookingStep::Serve;
        }
    }
}

// --- Washing flow (cleans the pet on completion) --------------------------

/// Steps of the bath flow. The terminal step is the cue for `clean()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WashingStep {
    Idle,
    WaterOn,
    ReadyToSoap,
    Soaped,
    Rinsing,
    ReadyToDry,
    Clean,
}

/// Deterministic bath step machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WashingFlow {
    step: WashingStep,
    scrub_progress: f32,
}

impl Default for WashingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl WashingFlow {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: WashingStep::Idle,
            scrub_progress: 0.0,
        }
    }

    #[must_use]
    pub const fn step(&self) -> WashingStep {
        self.step
    }

    #[must_use]
    pub const fn is_clean(&self) -> bool {
        matches!(self.step, WashingStep::Clean)
    }

    pub fn turn_water_on(&mut self) {
        if self.step == WashingStep::Idle {
            self.step = WashingStep::WaterOn;
        }
    }

    pub fn water_done(&mut self) {
        if self.step == WashingStep::WaterOn {
            self.step = WashingStep::ReadyToSoap;
        }
    }

    pub fn apply_soap(&mut self) {
        if self.step == WashingStep::ReadyToSoap {
            self.step = WashingStep::Soaped;
        }
    }

    /// One drag sample scrubbing; `distance` is the pointer travel.
    pub fn scrub_sample(&mut self, distance: f32) {
        if self.step != WashingStep::Soaped {
            return;
        }
        self.scrub_progress += distance.max(0.0);
        if self.scrub_progress >= WASH_SCRUB_TARGET {
            self.step = WashingStep::Rinsing;
        }
    }

    pub fn rinse_done(&mut self) {
        if self.step == WashingStep::Rinsing {
            self.step = WashingStep::ReadyToDry;
        }
    }

    /// Shake sample while drying, using the delta-rate form.
    pub fn dry_shake(&mut self, delta_rate: f32) {
        if self.step == WashingStep::ReadyToDry && dry_shake_triggered(delta_rate) {
            self.step = WashingStep::Clean;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::HashSet;

    #[test]
    fn ring_zone_boundaries() {
        assert!(!ring_zone_hit(0.79));
        assert!(ring_zone_hit(0.8));
        assert!(ring_zone_hit(1.0));
        assert!(ring_zone_hit(1.2));
        assert!(!ring_zone_hit(1.21));
    }

    #[test]
    fn rapid_tap_needs_twenty_in_window() {
        assert!(rapid_tap_passed(20, 40));
        assert!(rapid_tap_passed(25, 12));
        assert!(!rapid_tap_passed(19, 10));
        assert!(!rapid_tap_passed(20, 41));
    }

    #[test]
    fn reaction_window_is_strict() {
        assert!(reaction_hit(0));
        assert!(reaction_hit(649));
        assert!(!reaction_hit(650));
    }

    #[test]
    fn balance_survives_centered_run() {
        let mut position = 0.0;
        for tick in 0..BALANCE_SURVIVAL_TICKS {
            position = balance_step(position, if tick % 2 == 0 { 0.4 } else { -0.4 });
            assert!(!balance_fallen(position));
        }
        assert!(balance_survived(BALANCE_SURVIVAL_TICKS));
    }

    #[test]
    fn balance_falls_under_constant_tilt() {
        let mut position = 0.0;
        let mut fell = false;
        for _ in 0..200 {
            position = balance_step(position, 3.0);
            if balance_fallen(position) {
                fell = true;
                break;
            }
        }
        assert!(fell, "ball should fall off under constant tilt");
    }

    #[test]
    fn pick_covers_all_minigames() {
        let mut rng = SmallRng::seed_from_u64(0xBEEF);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(CatchMinigame::pick(&mut rng));
        }
        assert_eq!(seen.len(), CatchMinigame::ALL.len());
    }

    #[test]
    fn gesture_thresholds() {
        assert!(shake_triggered(2.61));
        assert!(!shake_triggered(2.6));
        assert!(blow_triggered(501));
        assert!(!blow_triggered(500));
        assert!(dry_shake_triggered(800.5));
        assert!(!dry_shake_triggered(799.0));
    }

    #[test]
    fn cooking_flow_runs_to_serve() {
        let mut flow = CookingFlow::new();
        for _ in 0..COOKING_BERRY_COUNT {
            flow.drop_berry();
        }
        assert_eq!(flow.step(), CookingStep::MixShake);

        flow.shake(1.0);
        assert_eq!(flow.step(), CookingStep::MixShake);
        flow.shake(3.0);
        assert_eq!(flow.step(), CookingStep::Season);

        // tap outside the zone misses, tap inside lands
        assert!(!flow.season_tap());
        while !(SEASONING_ZONE_MIN..=SEASONING_ZONE_MAX).contains(&flow.seasoning_progress) {
            flow.seasoning_tick();
        }
        assert!(flow.season_tap());
        assert_eq!(flow.step(), CookingStep::CleanEdges);

        for _ in 0..200 {
            flow.scrub_sample();
        }
        assert_eq!(flow.step(), CookingStep::CoolDown);

        for _ in 0..100 {
            flow.blow_sample(900);
        }
        assert!(flow.is_ready_to_serve());
    }

    #[test]
    fn cooking_quiet_samples_never_cool() {
        let mut flow = CookingFlow::new();
        for _ in 0..COOKING_BERRY_COUNT {
            flow.drop_berry();
        }
        flow.shake(3.0);
        while !flow.season_tap() {
            flow.seasoning_tick();
        }
        for _ in 0..200 {
            flow.scrub_sample();
        }
        for _ in 0..1_000 {
            flow.blow_sample(100);
        }
        assert_eq!(flow.step(), CookingStep::CoolDown);
    }

    #[test]
    fn washing_flow_runs_to_clean() {
        let mut flow = WashingFlow::new();
        flow.turn_water_on();
        flow.water_done();
        flow.apply_soap();
        assert_eq!(flow.step(), WashingStep::Soaped);

        let mut samples = 0;
        while flow.step() == WashingStep::Soaped {
            flow.scrub_sample(125.0);
            samples += 1;
            assert!(samples < 100, "scrub never completed");
        }
        assert_eq!(flow.step(), WashingStep::Rinsing);

        flow.rinse_done();
        flow.dry_shake(100.0);
        assert_eq!(flow.step(), WashingStep::ReadyToDry);
        flow.dry_shake(1_000.0);
        assert!(flow.is_clean());
    }

    #[test]
    fn washing_steps_ignore_out_of_order_input() {
        let mut flow = WashingFlow::new();
        flow.dry_shake(10_000.0);
        flow.scrub_sample(9_000.0);
        assert_eq!(flow.step(), WashingStep::Idle);
        assert!(!flow.is_clean());
    }

    #[test]
    fn hatch_needs_ten_taps() {
        assert!(!hatch_complete(9));
        assert!(hatch_complete(10));
    }
}
