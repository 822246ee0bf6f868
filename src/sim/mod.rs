//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed race timestep only
//! - Seeded RNG only
//! - Stable iteration order (player first, then AI lanes)
//! - No rendering or platform dependencies

pub mod arc;
pub mod competitor;
pub mod input;
pub mod race;
pub mod session;
pub mod skill_check;

pub use arc::TargetArc;
pub use competitor::{Competitor, CompetitorKind};
pub use input::{InputQueue, ThrottleStick, TickInput};
pub use race::{
    AiNoise, Race, RaceEvent, RacePhase, RaceResult, RaceSnapshot, Standing, reward_for_rank,
};
pub use session::{HudSnapshot, Session, SessionMode, SessionPhase, TokenWallet, result_text};
pub use skill_check::{SkillCheck, SkillCheckPhase, SkillCheckSnapshot, SkillOutcome, Tap};
