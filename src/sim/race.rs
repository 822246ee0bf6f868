//! Fixed-tick race simulation
//!
//! Advances the player and the AI roster at `TICK_HZ`, independent of the
//! display rate. Every tick applies, in order: player throttle and stamina,
//! each AI, burst resolution, and the finish check. Observers only see
//! snapshots taken after a complete tick.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::competitor::Competitor;
use super::input::{InputQueue, TickInput};
use crate::clamp_finite;
use crate::consts::*;

/// Race lifecycle: Idle -> Running -> Ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacePhase {
    Idle,
    Running,
    Ended,
}

/// Random jitter added to each AI's desired speed every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AiNoise {
    /// Uniform in [-amplitude, amplitude)
    Uniform(f32),
    /// No jitter (deterministic test harness)
    Disabled,
}

impl Default for AiNoise {
    fn default() -> Self {
        AiNoise::Uniform(AI_NOISE)
    }
}

impl AiNoise {
    fn sample(&self, rng: &mut Pcg32) -> f32 {
        match *self {
            AiNoise::Uniform(amplitude) if amplitude.is_finite() && amplitude > 0.0 => {
                rng.random_range(-amplitude..amplitude)
            }
            _ => 0.0,
        }
    }
}

/// Final placing of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    /// 1-indexed place among all competitors
    pub rank: usize,
    pub field_size: usize,
    /// Tokens earned for this placing
    pub reward: u32,
}

/// Tokens for a 1-indexed finishing place
pub fn reward_for_rank(rank: usize) -> u32 {
    match rank {
        1 => REWARD_TABLE[0],
        2 => REWARD_TABLE[1],
        _ => REWARD_TABLE[2],
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RaceEvent {
    /// Neck-bend landed; cosmetic slow-motion/blur effect
    PhotoFinish,
    /// Race ended with this result
    Finished(RaceResult),
}

/// One competitor as seen by the renderer/HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub id: u32,
    pub label: String,
    pub is_player: bool,
    pub position: f32,
    pub stamina: f32,
}

/// Immutable view of the race after a complete tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub phase: RacePhase,
    pub tick: u64,
    pub elapsed_secs: f32,
    /// Player's current 1-indexed place
    pub rank: usize,
    pub field_size: usize,
    pub player_stamina: f32,
    pub neck_available: bool,
    /// Competitors in lane order (player first)
    pub competitors: Vec<Standing>,
    pub result: Option<RaceResult>,
}

/// The race simulation
#[derive(Debug, Clone)]
pub struct Race {
    rng: Pcg32,
    noise: AiNoise,
    phase: RacePhase,
    player: Competitor,
    ais: Vec<Competitor>,
    input: InputQueue,
    ticks: u64,
    result: Option<RaceResult>,
    events: Vec<RaceEvent>,
}

impl Race {
    /// Create an idle race with default AI noise
    pub fn new(seed: u64) -> Self {
        Self::with_noise(seed, AiNoise::default())
    }

    pub fn with_noise(seed: u64, noise: AiNoise) -> Self {
        let ais = AI_SKILLS
            .iter()
            .enumerate()
            .map(|(i, &skill)| Competitor::ai(i as u32 + 1, format!("AI {}", i + 1), skill))
            .collect();
        Self {
            rng: Pcg32::seed_from_u64(seed),
            noise,
            phase: RacePhase::Idle,
            player: Competitor::player(0),
            ais,
            input: InputQueue::default(),
            ticks: 0,
            result: None,
            events: Vec::new(),
        }
    }

    /// Put everyone on the start line and begin running
    ///
    /// `speed_bonus` is the player's starting speed from the skill check.
    pub fn start(&mut self, speed_bonus: f32) {
        if self.phase != RacePhase::Idle {
            log::warn!("Race start ignored: already {:?}", self.phase);
            return;
        }
        for c in std::iter::once(&mut self.player).chain(self.ais.iter_mut()) {
            c.position = 0.0;
            c.speed = 0.0;
            c.stamina = STAMINA_MAX;
        }
        self.player.speed = clamp_finite(speed_bonus, 0.0, PLAYER_SPEED_CAP);
        self.ticks = 0;
        // Throttle held before the start carries over; stale bursts do not
        self.input.take();
        self.phase = RacePhase::Running;
        log::info!(
            "Race started: {} competitors, bonus speed {:.1}",
            self.field_size(),
            self.player.speed
        );
    }

    /// Latest throttle; applied (and clamped) on the next tick
    pub fn set_throttle(&mut self, value: f32) {
        self.input.set_throttle(value);
    }

    /// Throttle that the next tick will use
    pub fn held_throttle(&self) -> f32 {
        self.input.peek().throttle
    }

    /// Ask for the neck-bend; validated on the next tick, dropped if not usable
    pub fn request_burst(&mut self) {
        self.input.request_burst();
    }

    /// Advance one fixed step
    ///
    /// Does nothing unless the race is running. Returns the post-tick snapshot.
    pub fn tick(&mut self) -> RaceSnapshot {
        if self.phase != RacePhase::Running {
            return self.snapshot();
        }
        let input = self.input.take();
        self.ticks += 1;

        self.step_player(&input);
        self.step_ais();
        if input.burst {
            self.resolve_burst();
        }

        if self.player.has_finished() || self.ais.iter().any(Competitor::has_finished) {
            self.end();
        }

        self.snapshot()
    }

    fn step_player(&mut self, input: &TickInput) {
        let throttle = clamp_finite(input.throttle, -1.0, 1.0);
        let player = &mut self.player;

        player.speed = (player.speed + throttle * ACCEL).clamp(0.0, PLAYER_SPEED_CAP);
        player.advance();

        if throttle.abs() > THROTTLE_DEADZONE {
            player.change_stamina(-PLAYER_STAMINA_DRAIN);
        } else {
            player.change_stamina(PLAYER_STAMINA_REGEN);
        }
    }

    fn step_ais(&mut self) {
        for ai in self.ais.iter_mut() {
            let desired = ai.skill().unwrap_or(0.0) + self.noise.sample(&mut self.rng);
            ai.speed = (ai.speed + (desired - ai.speed) * AI_BLEND).clamp(0.0, AI_SPEED_CAP);
            ai.advance();
            if !ai.has_finished() {
                ai.change_stamina(-AI_STAMINA_DRAIN);
            }
        }
    }

    fn resolve_burst(&mut self) {
        let player = &mut self.player;
        if player.neck_available() && player.remaining() <= BURST_RANGE {
            player.position += BURST_DISTANCE;
            player.consume_neck();
            self.events.push(RaceEvent::PhotoFinish);
            log::info!("Neck bend at tick {}", self.ticks);
        } else {
            log::debug!(
                "Burst dropped (available: {}, remaining {:.1})",
                player.neck_available(),
                player.remaining()
            );
        }
    }

    /// Finalize placings and reward
    ///
    /// The first call on a running race settles it; later calls return the
    /// same result. `None` if the race never started.
    pub fn end(&mut self) -> Option<RaceResult> {
        match self.phase {
            RacePhase::Idle => None,
            RacePhase::Ended => self.result,
            RacePhase::Running => {
                let rank = self.rank();
                let result = RaceResult {
                    rank,
                    field_size: self.field_size(),
                    reward: reward_for_rank(rank),
                };
                self.phase = RacePhase::Ended;
                self.result = Some(result);
                self.events.push(RaceEvent::Finished(result));
                log::info!(
                    "Race finished after {} ticks: place {}/{} (+{} tokens)",
                    self.ticks,
                    result.rank,
                    result.field_size,
                    result.reward
                );
                self.result
            }
        }
    }

    /// All competitors by descending position; ties keep lane order
    pub fn standings(&self) -> Vec<&Competitor> {
        let mut order: Vec<&Competitor> = self.competitors().collect();
        // sort_by is stable, so equal positions stay in lane order
        order.sort_by(|a, b| {
            b.position
                .partial_cmp(&a.position)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order
    }

    /// Player's 1-indexed place
    pub fn rank(&self) -> usize {
        self.standings()
            .iter()
            .position(|c| c.is_player())
            .map_or(self.field_size(), |i| i + 1)
    }

    /// Player first, then AIs in lane order
    pub fn competitors(&self) -> impl Iterator<Item = &Competitor> {
        std::iter::once(&self.player).chain(self.ais.iter())
    }

    pub fn field_size(&self) -> usize {
        1 + self.ais.len()
    }

    pub fn player(&self) -> &Competitor {
        &self.player
    }

    pub fn ais(&self) -> &[Competitor] {
        &self.ais
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.ticks as f32 * TICK_DT
    }

    pub fn result(&self) -> Option<RaceResult> {
        self.result
    }

    /// Take events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<RaceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> RaceSnapshot {
        RaceSnapshot {
            phase: self.phase,
            tick: self.ticks,
            elapsed_secs: self.elapsed_secs(),
            rank: self.rank(),
            field_size: self.field_size(),
            player_stamina: self.player.stamina,
            neck_available: self.player.neck_available(),
            competitors: self
                .competitors()
                .map(|c| Standing {
                    id: c.id,
                    label: c.label.clone(),
                    is_player: c.is_player(),
                    position: c.position,
                    stamina: c.stamina,
                })
                .collect(),
            result: self.result,
        }
    }
}
