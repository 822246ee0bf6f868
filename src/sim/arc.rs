//! Target arc geometry for the skill-check dial
//!
//! Angles are in degrees, counter-clockwise, normalized to [0, 360).
//! An arc is defined by:
//! - start: angle where the arc begins
//! - size: angular extent (0 < size < 360)

use serde::{Deserialize, Serialize};

use crate::consts::{TARGET_ARC_SIZE, TARGET_ARC_START};
use crate::{is_angle_inside, normalize_degrees};

/// An angular window on the dial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetArc {
    /// Start angle (degrees, normalized to [0, 360))
    pub start: f32,
    /// Angular size (degrees)
    pub size: f32,
}

impl Default for TargetArc {
    fn default() -> Self {
        Self::new(TARGET_ARC_START, TARGET_ARC_SIZE)
    }
}

impl TargetArc {
    pub fn new(start: f32, size: f32) -> Self {
        Self {
            start: normalize_degrees(start),
            size,
        }
    }

    /// End angle (degrees, normalized; may be below `start` when wrapping)
    #[inline]
    pub fn end(&self) -> f32 {
        normalize_degrees(self.start + self.size)
    }

    /// True if the arc crosses the 0°/360° boundary
    pub fn wraps(&self) -> bool {
        self.end() < self.start
    }

    /// Check if an angle is within the arc
    pub fn contains_angle(&self, angle: f32) -> bool {
        is_angle_inside(angle, self.start, self.size)
    }

    /// Mid-arc angle (for rendering the target marker)
    pub fn center(&self) -> f32 {
        normalize_degrees(self.start + self.size / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arc() {
        let arc = TargetArc::default();
        assert_eq!(arc.start, 60.0);
        assert_eq!(arc.end(), 100.0);
        assert!(!arc.wraps());
        assert!(arc.contains_angle(75.0));
        assert!(!arc.contains_angle(200.0));
        assert_eq!(arc.center(), 80.0);
    }

    #[test]
    fn test_arc_contains_angle_wraparound() {
        let arc = TargetArc::new(350.0, 20.0);
        assert!(arc.wraps());
        assert!(arc.contains_angle(355.0));
        assert!(arc.contains_angle(5.0));
        assert!(arc.contains_angle(365.0));
        assert!(!arc.contains_angle(180.0));
        assert_eq!(arc.center(), 0.0);
    }

    #[test]
    fn test_negative_start_is_normalized() {
        let arc = TargetArc::new(-10.0, 20.0);
        assert_eq!(arc.start, 350.0);
        assert!(arc.contains_angle(0.0));
    }
}
