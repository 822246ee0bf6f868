//! Horse Rush - A needle skill-check followed by a three-horse sprint
//!
//! Core modules:
//! - `sim`: Deterministic simulation (skill check, race, session flow)
//! - `renderer`: Frame building from simulation snapshots
//! - `settings`: Presentation preferences
//! - `error`: Configuration errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Race ticks per second (10 Hz, server-like cadence)
    pub const TICK_HZ: u32 = 10;
    /// Fixed race timestep in seconds
    pub const TICK_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum race ticks per rendered frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 8;
    /// Largest frame delta accepted by the frame driver (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Track
    pub const TRACK_LENGTH: f32 = 300.0;

    /// Movement: position += (BASE_SPEED + speed) * stamina_factor / TICK_DIVISOR
    pub const BASE_SPEED: f32 = 4.0;
    pub const TICK_DIVISOR: f32 = 10.0;
    /// Player speed change per tick at full throttle
    pub const ACCEL: f32 = 0.4;
    pub const PLAYER_SPEED_CAP: f32 = 12.0;
    pub const AI_SPEED_CAP: f32 = 11.0;

    /// Stamina
    pub const STAMINA_MAX: f32 = 100.0;
    pub const MIN_STAMINA_FACTOR: f32 = 0.2;
    /// Throttle magnitude above which the player burns stamina
    pub const THROTTLE_DEADZONE: f32 = 0.2;
    pub const PLAYER_STAMINA_DRAIN: f32 = 0.6;
    pub const PLAYER_STAMINA_REGEN: f32 = 0.2;
    pub const AI_STAMINA_DRAIN: f32 = 0.1;

    /// AI decision noise amplitude (desired speed +/- this)
    pub const AI_NOISE: f32 = 0.1;
    /// Exponential smoothing factor toward the AI's desired speed
    pub const AI_BLEND: f32 = 0.2;
    /// AI roster skills, in lane order
    pub const AI_SKILLS: [f32; 2] = [0.8, 0.6];

    /// Neck-bend burst
    pub const BURST_RANGE: f32 = 6.0;
    pub const BURST_DISTANCE: f32 = 6.0;

    /// Tokens awarded for 1st, 2nd, and any other place
    pub const REWARD_TABLE: [u32; 3] = [10, 4, 1];

    /// Skill check seed is drawn from 0..SKILL_SEED_RANGE
    pub const SKILL_SEED_RANGE: u32 = 100_000;
    /// Pointer angular speed = BASE + seed % SPREAD (degrees/sec)
    pub const POINTER_SPEED_BASE: f32 = 220.0;
    pub const POINTER_SPEED_SPREAD: u32 = 200;
    /// Target arc (degrees)
    pub const TARGET_ARC_START: f32 = 60.0;
    pub const TARGET_ARC_SIZE: f32 = 40.0;
    /// Speed bonus = BASE + score * SCALE
    pub const BONUS_BASE: f32 = 0.5;
    pub const BONUS_SCALE: f32 = 1.5;

    /// Pause between the skill check result and the race start (seconds)
    pub const INTERMISSION_SECS: f32 = 0.7;
    /// Joystick travel in pixels for full throttle
    pub const STICK_MAX_DISPLACEMENT: f32 = 38.0;
    /// Photo-finish filter duration (seconds)
    pub const PHOTO_FINISH_SECS: f32 = 0.5;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Check whether `angle` lies on the arc starting at `start` and spanning `size` degrees
///
/// All three values are normalized first, so the arc may cross 0°/360°.
/// Both ends of the arc are inclusive.
pub fn is_angle_inside(angle: f32, start: f32, size: f32) -> bool {
    let a = normalize_degrees(angle);
    let s = normalize_degrees(start);
    let e = normalize_degrees(s + size);

    if s <= e {
        a >= s && a <= e
    } else {
        // Wraparound case (e.g., start=350°, end=10°)
        a >= s || a <= e
    }
}

/// Clamp that maps NaN to `min` instead of propagating it
#[inline]
pub fn clamp_finite(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}
