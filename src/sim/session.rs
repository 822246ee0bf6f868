//! Play session: skill check -> intermission -> race -> results
//!
//! Owns the token wallet for the lifetime of the session and drives the race
//! at its fixed tick rate from display-rate frames.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::race::{AiNoise, Race, RaceEvent, RacePhase, RaceResult, RaceSnapshot};
use super::skill_check::{SkillCheck, SkillCheckSnapshot, SkillOutcome};
use crate::clamp_finite;
use crate::consts::*;

/// How the session was entered from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionMode {
    #[default]
    Race,
    Practice,
}

/// Current screen of the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionPhase {
    Menu,
    SkillCheck,
    /// Showing the skill check result before the race
    Intermission { remaining: f32 },
    Racing,
    Results,
}

/// Running token total; lives as long as the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenWallet {
    total: u32,
}

impl TokenWallet {
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Add a race reward; returns the new total
    pub fn credit(&mut self, result: &RaceResult) -> u32 {
        self.total = self.total.saturating_add(result.reward);
        self.total
    }
}

/// Values shown on the race HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub rank: usize,
    pub field_size: usize,
    pub stamina: f32,
    pub tokens: u32,
    pub elapsed_secs: f32,
    pub neck_available: bool,
}

impl HudSnapshot {
    pub fn position_text(&self) -> String {
        format!("Pos: {} / {}", self.rank, self.field_size)
    }

    pub fn stamina_text(&self, precision: usize) -> String {
        format!("Stamina: {:.*}", precision, self.stamina)
    }

    pub fn tokens_text(&self) -> String {
        format!("Tokens: {}", self.tokens)
    }
}

/// Result banner text
pub fn result_text(result: &RaceResult) -> String {
    format!(
        "Race finished! Place: {} / {} - Tokens +{}",
        result.rank, result.field_size, result.reward
    )
}

/// A play session
#[derive(Debug, Clone)]
pub struct Session {
    /// Source of per-round seeds
    rng: Pcg32,
    ai_noise: AiNoise,
    mode: SessionMode,
    phase: SessionPhase,
    wallet: TokenWallet,
    skill_check: SkillCheck,
    race: Race,
    /// Player starting speed earned in the skill check
    speed_bonus: f32,
    /// Unsimulated time carried between frames (seconds)
    accumulator: f32,
    rounds: u32,
    events: Vec<RaceEvent>,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self::with_ai_noise(seed, AiNoise::default())
    }

    pub fn with_ai_noise(seed: u64, ai_noise: AiNoise) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let skill_check = SkillCheck::new(rng.random());
        let race = Race::with_noise(rng.random(), ai_noise);
        Self {
            rng,
            ai_noise,
            mode: SessionMode::Race,
            phase: SessionPhase::Menu,
            wallet: TokenWallet::default(),
            skill_check,
            race,
            speed_bonus: 0.0,
            accumulator: 0.0,
            rounds: 0,
            events: Vec::new(),
        }
    }

    /// Leave the menu and begin the skill check
    pub fn start(&mut self, mode: SessionMode) {
        if self.phase != SessionPhase::Menu {
            log::warn!("Session start ignored in {:?}", self.phase);
            return;
        }
        self.mode = mode;
        self.begin_round();
    }

    /// Play again from the results screen, keeping the token total
    pub fn replay(&mut self) {
        if self.phase != SessionPhase::Results {
            log::warn!("Replay ignored in {:?}", self.phase);
            return;
        }
        log::info!("Replay (tokens kept: {})", self.wallet.total());
        self.begin_round();
    }

    fn begin_round(&mut self) {
        self.rounds += 1;
        let held = self.race.held_throttle();
        self.skill_check = SkillCheck::new(self.rng.random());
        self.race = Race::with_noise(self.rng.random(), self.ai_noise);
        self.race.set_throttle(held);
        self.speed_bonus = 0.0;
        self.accumulator = 0.0;
        self.skill_check.start();
        self.phase = SessionPhase::SkillCheck;
    }

    pub fn tap(&mut self) {
        self.skill_check.register_tap();
    }

    /// Score the skill check and queue the race start
    pub fn finish_skill_check(&mut self) -> Option<SkillOutcome> {
        if self.phase != SessionPhase::SkillCheck {
            log::debug!("Finish ignored in {:?}", self.phase);
            return None;
        }
        let outcome = self.skill_check.finish()?;
        self.speed_bonus = outcome.speed_bonus();
        self.phase = SessionPhase::Intermission {
            remaining: INTERMISSION_SECS,
        };
        Some(outcome)
    }

    pub fn set_throttle(&mut self, value: f32) {
        self.race.set_throttle(value);
    }

    pub fn request_burst(&mut self) {
        if self.phase != SessionPhase::Racing {
            log::debug!("Burst ignored in {:?}", self.phase);
            return;
        }
        self.race.request_burst();
    }

    /// Advance by one display frame of `dt` seconds
    ///
    /// Returns the number of race ticks run during this frame.
    pub fn frame(&mut self, dt: f32) -> u32 {
        let dt = clamp_finite(dt, 0.0, MAX_FRAME_DELTA);
        match self.phase {
            SessionPhase::SkillCheck => {
                self.skill_check.advance(dt);
                0
            }
            SessionPhase::Intermission { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.begin_race();
                } else {
                    self.phase = SessionPhase::Intermission { remaining };
                }
                0
            }
            SessionPhase::Racing => {
                self.accumulator += dt;
                let mut ticks = 0;
                while self.accumulator >= TICK_DT && ticks < MAX_TICKS_PER_FRAME {
                    self.tick();
                    self.accumulator -= TICK_DT;
                    ticks += 1;
                    if self.phase != SessionPhase::Racing {
                        break;
                    }
                }
                ticks
            }
            SessionPhase::Menu | SessionPhase::Results => 0,
        }
    }

    fn begin_race(&mut self) {
        self.accumulator = 0.0;
        self.race.start(self.speed_bonus);
        self.phase = SessionPhase::Racing;
    }

    /// Run exactly one race tick (for callers with their own fixed timer)
    ///
    /// Credits the reward once when the race ends and stops further ticking.
    pub fn tick(&mut self) {
        if self.phase != SessionPhase::Racing {
            return;
        }
        let snapshot = self.race.tick();
        self.events.extend(self.race.drain_events());
        if snapshot.phase == RacePhase::Ended {
            if let Some(result) = snapshot.result {
                let total = self.wallet.credit(&result);
                log::info!("Tokens +{} (total {})", result.reward, total);
            }
            self.accumulator = 0.0;
            self.phase = SessionPhase::Results;
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn tokens(&self) -> u32 {
        self.wallet.total()
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn speed_bonus(&self) -> f32 {
        self.speed_bonus
    }

    pub fn result(&self) -> Option<RaceResult> {
        self.race.result()
    }

    pub fn skill_outcome(&self) -> Option<SkillOutcome> {
        self.skill_check.outcome()
    }

    pub fn skill_snapshot(&self) -> SkillCheckSnapshot {
        self.skill_check.snapshot()
    }

    pub fn race_snapshot(&self) -> RaceSnapshot {
        self.race.snapshot()
    }

    /// HUD values, once a race has started
    pub fn hud(&self) -> Option<HudSnapshot> {
        if !matches!(self.phase, SessionPhase::Racing | SessionPhase::Results) {
            return None;
        }
        let player = self.race.player();
        Some(HudSnapshot {
            rank: self.race.rank(),
            field_size: self.race.field_size(),
            stamina: player.stamina,
            tokens: self.wallet.total(),
            elapsed_secs: self.race.elapsed_secs(),
            neck_available: player.neck_available(),
        })
    }

    /// Take race events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<RaceEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_race(session: &mut Session, throttle: f32) {
        session.set_throttle(throttle);
        for _ in 0..20_000 {
            session.frame(TICK_DT);
            if session.phase() == SessionPhase::Results {
                return;
            }
        }
        panic!("race never finished");
    }

    fn skip_intermission(session: &mut Session) {
        while matches!(session.phase(), SessionPhase::Intermission { .. }) {
            session.frame(0.05);
        }
    }

    #[test]
    fn test_flow_menu_to_results() {
        let mut session = Session::with_ai_noise(1, AiNoise::Disabled);
        assert_eq!(session.phase(), SessionPhase::Menu);
        assert!(session.hud().is_none());

        session.start(SessionMode::Race);
        assert_eq!(session.phase(), SessionPhase::SkillCheck);
        session.frame(1.0 / 60.0);

        let outcome = session.finish_skill_check().unwrap();
        assert_eq!(outcome.score, 0);
        assert_eq!(session.speed_bonus(), BONUS_BASE);
        assert!(matches!(session.phase(), SessionPhase::Intermission { .. }));

        skip_intermission(&mut session);
        assert_eq!(session.phase(), SessionPhase::Racing);
        assert_eq!(session.race_snapshot().phase, RacePhase::Running);

        run_race(&mut session, 1.0);
        let result = session.result().unwrap();
        assert_eq!(result.rank, 1);
        assert_eq!(session.tokens(), 10);
        assert_eq!(session.hud().unwrap().tokens, 10);
    }

    #[test]
    fn test_intermission_duration() {
        let mut session = Session::new(2);
        session.start(SessionMode::Practice);
        session.finish_skill_check();
        session.frame(0.1);
        session.frame(0.1);
        session.frame(0.1);
        assert!(matches!(session.phase(), SessionPhase::Intermission { .. }));
        for _ in 0..5 {
            session.frame(0.1);
        }
        assert_eq!(session.phase(), SessionPhase::Racing);
        assert_eq!(session.mode(), SessionMode::Practice);
    }

    #[test]
    fn test_no_ticks_after_end() {
        let mut session = Session::with_ai_noise(3, AiNoise::Disabled);
        session.start(SessionMode::Race);
        session.finish_skill_check();
        skip_intermission(&mut session);
        run_race(&mut session, 1.0);

        let ticks = session.race_snapshot().tick;
        let tokens = session.tokens();
        for _ in 0..50 {
            assert_eq!(session.frame(MAX_FRAME_DELTA), 0);
            session.tick();
        }
        assert_eq!(session.race_snapshot().tick, ticks);
        assert_eq!(session.tokens(), tokens);
    }

    #[test]
    fn test_frame_runs_fixed_ticks() {
        let mut session = Session::new(4);
        session.start(SessionMode::Race);
        session.finish_skill_check();
        skip_intermission(&mut session);

        assert_eq!(session.frame(TICK_DT * 0.5), 0);
        assert_eq!(session.frame(TICK_DT * 0.5), 1);
        assert_eq!(session.race_snapshot().tick, 1);
    }

    #[test]
    fn test_throttle_held_through_intermission() {
        let mut session = Session::with_ai_noise(8, AiNoise::Disabled);
        session.start(SessionMode::Race);
        session.finish_skill_check();
        session.set_throttle(1.0);
        skip_intermission(&mut session);

        assert_eq!(session.frame(TICK_DT), 1);
        let hud = session.hud().unwrap();
        assert!((hud.stamina - (STAMINA_MAX - PLAYER_STAMINA_DRAIN)).abs() < 1e-5);
        let player = &session.race_snapshot().competitors[0];
        assert!(player.is_player);
        // (4 + bonus + accel) / 10 with full stamina
        let expected = (BASE_SPEED + BONUS_BASE + ACCEL) / TICK_DIVISOR;
        assert!((player.position - expected).abs() < 1e-5);
    }

    #[test]
    fn test_throttle_held_from_menu_and_across_replay() {
        let mut session = Session::with_ai_noise(9, AiNoise::Disabled);
        session.set_throttle(1.0);
        session.start(SessionMode::Race);
        assert_eq!(session.race.held_throttle(), 1.0);

        session.finish_skill_check();
        skip_intermission(&mut session);
        run_race(&mut session, 1.0);
        session.replay();
        assert_eq!(session.race.held_throttle(), 1.0);
    }

    #[test]
    fn test_replay_keeps_tokens() {
        let mut session = Session::with_ai_noise(5, AiNoise::Disabled);
        session.replay();
        assert_eq!(session.phase(), SessionPhase::Menu);

        session.start(SessionMode::Race);
        session.finish_skill_check();
        skip_intermission(&mut session);
        run_race(&mut session, 1.0);
        let after_first = session.tokens();

        session.replay();
        assert_eq!(session.phase(), SessionPhase::SkillCheck);
        assert_eq!(session.rounds(), 2);
        assert_eq!(session.tokens(), after_first);
        assert!(session.result().is_none());
        assert!(session.skill_outcome().is_none());

        session.finish_skill_check();
        skip_intermission(&mut session);
        run_race(&mut session, 1.0);
        assert_eq!(session.tokens(), after_first + 10);
    }

    #[test]
    fn test_burst_only_while_racing() {
        let mut session = Session::new(6);
        session.start(SessionMode::Race);
        session.request_burst();
        session.finish_skill_check();
        skip_intermission(&mut session);
        session.frame(TICK_DT);
        assert!(session.hud().unwrap().neck_available);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_hud_text() {
        let hud = HudSnapshot {
            rank: 2,
            field_size: 3,
            stamina: 41.6,
            tokens: 14,
            elapsed_secs: 3.2,
            neck_available: true,
        };
        assert_eq!(hud.position_text(), "Pos: 2 / 3");
        assert_eq!(hud.stamina_text(0), "Stamina: 42");
        assert_eq!(hud.tokens_text(), "Tokens: 14");
        let result = RaceResult {
            rank: 1,
            field_size: 3,
            reward: 10,
        };
        assert_eq!(result_text(&result), "Race finished! Place: 1 / 3 - Tokens +10");
    }

    #[test]
    fn test_wallet_credit() {
        let mut wallet = TokenWallet::default();
        let second = RaceResult {
            rank: 2,
            field_size: 3,
            reward: 4,
        };
        assert_eq!(wallet.credit(&second), 4);
        assert_eq!(wallet.credit(&second), 8);
        assert_eq!(wallet.total(), 8);
    }
}
