//! Pre-race needle skill check
//!
//! A pointer sweeps around a dial at a seed-derived angular speed. The player
//! taps while it sweeps and then explicitly finishes; the first tap is scored
//! against the target arc. The result is binary and converts into a one-time
//! speed bonus for the race.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arc::TargetArc;
use crate::consts::*;
use crate::{clamp_finite, normalize_degrees};

/// Lifecycle of a skill check session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillCheckPhase {
    /// Not started yet
    Idle,
    /// Pointer sweeping, taps accepted
    Active,
    /// Evaluated; outcome cached
    Finished,
}

/// A recorded tap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tap {
    /// Seconds since the session started
    pub at: f32,
    /// Pointer angle at the moment of the tap (degrees)
    pub angle: f32,
}

/// Result of a finished skill check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillOutcome {
    /// 1 for a hit, 0 for a miss
    pub score: u8,
    /// Angle of the scored tap, `None` if nobody tapped
    pub tap_angle: Option<f32>,
}

impl SkillOutcome {
    pub fn miss() -> Self {
        Self {
            score: 0,
            tap_angle: None,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.score > 0
    }

    /// Score as a display percentage (0 or 100)
    pub fn percent(&self) -> u32 {
        u32::from(self.score) * 100
    }

    /// Initial player speed granted to the race
    pub fn speed_bonus(&self) -> f32 {
        BONUS_BASE + f32::from(self.score) * BONUS_SCALE
    }
}

/// Read-only view for the dial renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillCheckSnapshot {
    pub phase: SkillCheckPhase,
    pub pointer_angle: f32,
    pub target: TargetArc,
    pub tap_count: usize,
}

/// Needle skill check engine
#[derive(Debug, Clone)]
pub struct SkillCheck {
    rng: Pcg32,
    /// Seed drawn at the last `start`
    seed: u32,
    /// Current pointer angle (degrees, [0, 360))
    pointer_angle: f32,
    /// Degrees per second
    angular_speed: f32,
    target: TargetArc,
    taps: Vec<Tap>,
    /// Seconds of sweep since `start`
    elapsed: f32,
    phase: SkillCheckPhase,
    outcome: Option<SkillOutcome>,
}

impl SkillCheck {
    /// Create an idle skill check whose draws are derived from `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed: 0,
            pointer_angle: 0.0,
            angular_speed: POINTER_SPEED_BASE,
            target: TargetArc::default(),
            taps: Vec::new(),
            elapsed: 0.0,
            phase: SkillCheckPhase::Idle,
            outcome: None,
        }
    }

    /// Begin a fresh session: new seed, speed, starting angle; taps cleared
    pub fn start(&mut self) {
        self.seed = self.rng.random_range(0..SKILL_SEED_RANGE);
        self.angular_speed = POINTER_SPEED_BASE + (self.seed % POINTER_SPEED_SPREAD) as f32;
        self.pointer_angle = (self.seed % 360) as f32;
        self.taps.clear();
        self.elapsed = 0.0;
        self.outcome = None;
        self.phase = SkillCheckPhase::Active;
        log::info!(
            "Skill check started (seed {}, {:.0} deg/s)",
            self.seed,
            self.angular_speed
        );
    }

    /// Sweep the pointer by one frame
    ///
    /// `dt` is the true time since the previous frame in seconds. Negative or
    /// NaN deltas count as zero; long stalls are capped at `MAX_FRAME_DELTA`.
    pub fn advance(&mut self, dt: f32) {
        if self.phase != SkillCheckPhase::Active {
            return;
        }
        let dt = clamp_finite(dt, 0.0, MAX_FRAME_DELTA);
        self.elapsed += dt;
        self.pointer_angle = normalize_degrees(self.pointer_angle + self.angular_speed * dt);
    }

    /// Record a tap at the current pointer position
    pub fn register_tap(&mut self) {
        if self.phase != SkillCheckPhase::Active {
            log::debug!("Tap ignored: skill check not active");
            return;
        }
        self.taps.push(Tap {
            at: self.elapsed,
            angle: self.pointer_angle,
        });
    }

    /// Stop the sweep and score the first tap
    ///
    /// Evaluates once; later calls return the cached outcome. Returns `None`
    /// if the session was never started.
    pub fn finish(&mut self) -> Option<SkillOutcome> {
        match self.phase {
            SkillCheckPhase::Idle => None,
            SkillCheckPhase::Finished => self.outcome,
            SkillCheckPhase::Active => {
                let outcome = self.evaluate();
                self.phase = SkillCheckPhase::Finished;
                self.outcome = Some(outcome);
                log::info!("Skill check finished: score {}%", outcome.percent());
                self.outcome
            }
        }
    }

    fn evaluate(&self) -> SkillOutcome {
        match self.taps.first() {
            None => SkillOutcome::miss(),
            Some(tap) => SkillOutcome {
                score: u8::from(self.target.contains_angle(tap.angle)),
                tap_angle: Some(tap.angle),
            },
        }
    }

    pub fn phase(&self) -> SkillCheckPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == SkillCheckPhase::Active
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn pointer_angle(&self) -> f32 {
        self.pointer_angle
    }

    pub fn angular_speed(&self) -> f32 {
        self.angular_speed
    }

    pub fn target(&self) -> TargetArc {
        self.target
    }

    pub fn taps(&self) -> &[Tap] {
        &self.taps
    }

    pub fn outcome(&self) -> Option<SkillOutcome> {
        self.outcome
    }

    pub fn snapshot(&self) -> SkillCheckSnapshot {
        SkillCheckSnapshot {
            phase: self.phase,
            pointer_angle: self.pointer_angle,
            target: self.target,
            tap_count: self.taps.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_derives_parameters_from_seed() {
        let mut check = SkillCheck::new(42);
        assert_eq!(check.phase(), SkillCheckPhase::Idle);
        check.start();
        assert!(check.is_active());
        assert!(check.seed() < SKILL_SEED_RANGE);
        assert_eq!(
            check.angular_speed(),
            POINTER_SPEED_BASE + (check.seed() % POINTER_SPEED_SPREAD) as f32
        );
        assert_eq!(check.pointer_angle(), (check.seed() % 360) as f32);
        assert!(check.taps().is_empty());
    }

    #[test]
    fn test_same_seed_same_session() {
        let mut a = SkillCheck::new(7);
        let mut b = SkillCheck::new(7);
        a.start();
        b.start();
        assert_eq!(a.seed(), b.seed());
        for _ in 0..30 {
            a.advance(1.0 / 60.0);
            b.advance(1.0 / 60.0);
        }
        assert_eq!(a.pointer_angle(), b.pointer_angle());
    }

    #[test]
    fn test_advance_wraps_and_clamps() {
        let mut check = SkillCheck::new(1);
        check.start();
        check.pointer_angle = 350.0;
        check.angular_speed = 300.0;

        check.advance(0.05);
        assert!((check.pointer_angle() - 5.0).abs() < 1e-3);

        // A five second stall only moves the pointer by MAX_FRAME_DELTA worth
        let before = check.pointer_angle();
        check.advance(5.0);
        let moved = normalize_degrees(check.pointer_angle() - before);
        assert!((moved - 300.0 * MAX_FRAME_DELTA).abs() < 1e-3);

        // Negative and NaN deltas do nothing
        let before = check.pointer_angle();
        check.advance(-1.0);
        check.advance(f32::NAN);
        assert_eq!(check.pointer_angle(), before);
    }

    #[test]
    fn test_no_taps_is_a_miss() {
        let mut check = SkillCheck::new(3);
        check.start();
        check.advance(0.016);
        let outcome = check.finish().unwrap();
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.tap_angle, None);
        assert_eq!(outcome.speed_bonus(), BONUS_BASE);
    }

    #[test]
    fn test_first_tap_is_scored() {
        let mut check = SkillCheck::new(3);
        check.start();
        check.pointer_angle = 80.0;
        check.register_tap();
        check.pointer_angle = 200.0;
        check.register_tap();
        assert_eq!(check.taps().len(), 2);

        let outcome = check.finish().unwrap();
        assert!(outcome.is_hit());
        assert_eq!(outcome.percent(), 100);
        assert_eq!(outcome.tap_angle, Some(80.0));
        assert_eq!(outcome.speed_bonus(), BONUS_BASE + BONUS_SCALE);
    }

    #[test]
    fn test_first_tap_outside_arc_misses_even_if_later_hits() {
        let mut check = SkillCheck::new(3);
        check.start();
        check.pointer_angle = 10.0;
        check.register_tap();
        check.pointer_angle = 70.0;
        check.register_tap();
        assert_eq!(check.finish().unwrap().score, 0);
    }

    #[test]
    fn test_finish_is_idempotent() {
        let mut check = SkillCheck::new(9);
        check.start();
        check.pointer_angle = 75.0;
        check.register_tap();
        let first = check.finish();
        // Pointer frozen and taps ignored once finished
        check.advance(0.05);
        check.register_tap();
        assert_eq!(check.finish(), first);
        assert_eq!(check.taps().len(), 1);
    }

    #[test]
    fn test_finish_before_start() {
        let mut check = SkillCheck::new(9);
        check.register_tap();
        assert_eq!(check.finish(), None);
        assert!(check.taps().is_empty());
    }

    #[test]
    fn test_restart_clears_history() {
        let mut check = SkillCheck::new(11);
        check.start();
        check.register_tap();
        check.finish();
        check.start();
        assert!(check.is_active());
        assert!(check.taps().is_empty());
        assert_eq!(check.outcome(), None);
    }
}
