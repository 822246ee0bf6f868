//! Race competitors
//!
//! The player and the AI horses share one movement model; only the way their
//! speed is chosen differs.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What drives a competitor's speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CompetitorKind {
    /// Throttle-controlled, with a single neck-bend burst
    Player { neck_available: bool },
    /// Scripted opponent easing toward `skill` (0, 1]
    Ai { skill: f32 },
}

/// A horse on the track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competitor {
    pub id: u32,
    pub label: String,
    pub kind: CompetitorKind,
    /// Distance travelled, never decreases
    pub position: f32,
    pub speed: f32,
    /// Always in [0, STAMINA_MAX]
    pub stamina: f32,
}

impl Competitor {
    pub fn player(id: u32) -> Self {
        Self {
            id,
            label: "You".to_string(),
            kind: CompetitorKind::Player {
                neck_available: true,
            },
            position: 0.0,
            speed: 0.0,
            stamina: STAMINA_MAX,
        }
    }

    pub fn ai(id: u32, label: impl Into<String>, skill: f32) -> Self {
        Self {
            id,
            label: label.into(),
            kind: CompetitorKind::Ai {
                skill: skill.clamp(f32::EPSILON, 1.0),
            },
            position: 0.0,
            speed: 0.0,
            stamina: STAMINA_MAX,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, CompetitorKind::Player { .. })
    }

    /// AI skill, `None` for the player
    pub fn skill(&self) -> Option<f32> {
        match self.kind {
            CompetitorKind::Ai { skill } => Some(skill),
            CompetitorKind::Player { .. } => None,
        }
    }

    /// Whether the neck-bend burst is still unused (always false for AI)
    pub fn neck_available(&self) -> bool {
        matches!(
            self.kind,
            CompetitorKind::Player {
                neck_available: true
            }
        )
    }

    /// Mark the burst as spent
    pub fn consume_neck(&mut self) {
        if let CompetitorKind::Player { neck_available } = &mut self.kind {
            *neck_available = false;
        }
    }

    /// Multiplier on forward progress, floored at MIN_STAMINA_FACTOR
    #[inline]
    pub fn stamina_factor(&self) -> f32 {
        (self.stamina / STAMINA_MAX).max(MIN_STAMINA_FACTOR)
    }

    /// Distance left to the finish line
    #[inline]
    pub fn remaining(&self) -> f32 {
        TRACK_LENGTH - self.position
    }

    pub fn has_finished(&self) -> bool {
        self.position >= TRACK_LENGTH
    }

    /// Move forward one tick using the current speed and stamina
    pub fn advance(&mut self) {
        let step = (BASE_SPEED + self.speed) * self.stamina_factor() / TICK_DIVISOR;
        // speed and stamina are clamped non-negative, so step >= 0
        self.position += step.max(0.0);
    }

    /// Add to stamina (negative drains), keeping it in range
    pub fn change_stamina(&mut self, delta: f32) {
        self.stamina = (self.stamina + delta).clamp(0.0, STAMINA_MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamina_factor_floor() {
        let mut c = Competitor::player(0);
        assert_eq!(c.stamina_factor(), 1.0);
        c.stamina = 50.0;
        assert_eq!(c.stamina_factor(), 0.5);
        c.stamina = 5.0;
        assert_eq!(c.stamina_factor(), MIN_STAMINA_FACTOR);
    }

    #[test]
    fn test_advance_formula() {
        let mut c = Competitor::player(0);
        c.speed = 6.0;
        c.stamina = 50.0;
        c.advance();
        // (4 + 6) * 0.5 / 10
        assert!((c.position - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_change_stamina_clamps() {
        let mut c = Competitor::ai(1, "AI 1", 0.8);
        c.change_stamina(50.0);
        assert_eq!(c.stamina, STAMINA_MAX);
        c.change_stamina(-500.0);
        assert_eq!(c.stamina, 0.0);
    }

    #[test]
    fn test_neck_only_for_player() {
        let mut player = Competitor::player(0);
        let mut ai = Competitor::ai(1, "AI 1", 0.8);
        assert!(player.neck_available());
        assert!(!ai.neck_available());
        player.consume_neck();
        ai.consume_neck();
        assert!(!player.neck_available());
        assert_eq!(ai.skill(), Some(0.8));
        assert_eq!(player.skill(), None);
    }
}
