//! Frame building for the race track and the skill-check dial
//!
//! Views consume snapshots only and produce vertex lists plus text labels for
//! whatever backend draws them. Nothing here can change the simulation.

pub mod shapes;
pub mod vertex;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Settings;
use crate::consts::{PHOTO_FINISH_SECS, TRACK_LENGTH};
use crate::sim::{RaceEvent, RaceSnapshot, SkillCheckSnapshot};
use vertex::{Vertex, colors};

/// Lane centre lines (pixels from the top)
pub const LANE_Y: [f32; 3] = [60.0, 140.0, 220.0];
/// Gap between lanes past the third
pub const LANE_SPACING: f32 = 80.0;

/// Text to draw at a screen position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub pos: (f32, f32),
    pub color: [f32; 4],
}

/// Post-process filter applied to the whole race canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameFilter {
    pub blur_px: f32,
    pub saturate: f32,
}

/// One rendered frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub vertices: Vec<Vertex>,
    pub labels: Vec<Label>,
    pub filter: Option<FrameFilter>,
}

impl Frame {
    /// Raw vertex bytes for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Side-on race track view
#[derive(Debug, Clone)]
pub struct RaceView {
    pub width: f32,
    pub height: f32,
    settings: Settings,
    /// Seconds left on the photo-finish flash
    photo_finish: f32,
}

impl RaceView {
    pub fn new(width: f32, height: f32, settings: Settings) -> Self {
        Self {
            width,
            height,
            settings,
            photo_finish: 0.0,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn finish_x(&self) -> f32 {
        self.width - 80.0
    }

    /// Horizontal screen position for a track distance
    pub fn track_x(&self, position: f32) -> f32 {
        let t = (position / TRACK_LENGTH).clamp(0.0, 1.0);
        40.0 + t * (self.finish_x() - 60.0)
    }

    pub fn lane_y(lane: usize) -> f32 {
        LANE_Y
            .get(lane)
            .copied()
            .unwrap_or_else(|| LANE_Y[2] + LANE_SPACING * (lane - 2) as f32)
    }

    /// React to cosmetic race events
    pub fn observe(&mut self, events: &[RaceEvent]) {
        if self.settings.effective_photo_finish()
            && events.iter().any(|e| matches!(e, RaceEvent::PhotoFinish))
        {
            self.photo_finish = PHOTO_FINISH_SECS;
        }
    }

    pub fn render(&mut self, snapshot: &RaceSnapshot, dt: f32) -> Frame {
        let mut frame = Frame::default();
        let (w, h) = (self.width, self.height);

        frame
            .vertices
            .extend(shapes::rect(Vec2::ZERO, Vec2::new(w, h), colors::BACKGROUND));
        frame.vertices.extend(shapes::rect(
            Vec2::new(self.finish_x(), 20.0),
            Vec2::new(6.0, h - 40.0),
            colors::FINISH_LINE,
        ));

        let mut ai_lane = 0;
        for (lane, standing) in snapshot.competitors.iter().enumerate() {
            let color = if standing.is_player {
                self.lane_color(None)
            } else {
                ai_lane += 1;
                self.lane_color(Some(ai_lane - 1))
            };
            let px = self.track_x(standing.position);
            let py = Self::lane_y(lane);

            frame.vertices.extend(shapes::rect(
                Vec2::new(px - 12.0, py - 18.0),
                Vec2::new(24.0, 36.0),
                color,
            ));
            frame.labels.push(Label {
                text: standing.label.clone(),
                pos: (px - 10.0, py - 24.0),
                color: colors::LABEL,
            });
        }

        if self.settings.show_elapsed {
            frame.labels.push(Label {
                text: format!("{:.1}s", snapshot.elapsed_secs),
                pos: (20.0, h - 8.0),
                color: colors::LABEL,
            });
        }

        if self.photo_finish > 0.0 {
            frame.filter = Some(FrameFilter {
                blur_px: 1.0,
                saturate: 1.2,
            });
            self.photo_finish = (self.photo_finish - dt.max(0.0)).max(0.0);
        }

        frame
    }

    fn lane_color(&self, ai_index: Option<usize>) -> [f32; 4] {
        match (ai_index, self.settings.high_contrast) {
            (None, false) => colors::PLAYER,
            (None, true) => colors::HC_PLAYER,
            (Some(_), true) => colors::HC_AI,
            (Some(i), false) => colors::AI_LANES[i % colors::AI_LANES.len()],
        }
    }
}

/// Skill-check dial view
#[derive(Debug, Clone)]
pub struct DialView {
    pub width: f32,
    pub height: f32,
    settings: Settings,
}

impl DialView {
    pub const TARGET_RADIUS: f32 = 140.0;
    pub const RING_RADIUS: f32 = 150.0;
    pub const NEEDLE_LENGTH: f32 = 120.0;

    pub fn new(width: f32, height: f32, settings: Settings) -> Self {
        Self {
            width,
            height,
            settings,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn render(&self, snapshot: &SkillCheckSnapshot) -> Frame {
        let center = self.center();
        let mut frame = Frame::default();

        let arc_color = if self.settings.high_contrast {
            colors::HC_TARGET_ARC
        } else {
            colors::TARGET_ARC
        };
        frame.vertices.extend(shapes::wedge(
            center,
            Self::TARGET_RADIUS,
            snapshot.target.start,
            snapshot.target.size,
            16,
            arc_color,
        ));
        frame.vertices.extend(shapes::ring(
            center,
            Self::RING_RADIUS,
            6.0,
            64,
            colors::DIAL_RING,
        ));
        frame.vertices.extend(shapes::needle(
            center,
            snapshot.pointer_angle,
            Self::NEEDLE_LENGTH,
            6.0,
            colors::NEEDLE,
        ));

        frame
    }
}
