//! SSL Sim - A two-team robot soccer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, entities, kinematics, commands, scoring)
//! - `policy`: Scripted baseline decision makers
//! - `settings`: Run configuration
//! - `runner`: Headless match loop

pub mod policy;
pub mod runner;
pub mod settings;
pub mod sim;

pub use policy::{Policy, PolicyKind};
pub use settings::{CommandMode, Settings, SettingsError};

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Distance (mm) a robot or a kicked ball can travel in one second
    pub const MAX_ROBOT_SPEED: f32 = 1000.0;

    /// Kick range for destination-based commands
    pub const DISCRETE_KICK_RANGE: f32 = 10.0;
    /// Kick range for orientation + speed commands
    pub const CONTINUOUS_KICK_RANGE: f32 = 50.0;

    /// Entity footprints
    pub const ROBOT_SIZE: f32 = 180.0;
    pub const BALL_SIZE: f32 = 43.0;

    /// Division B field layout
    pub const FIELD_WIDTH: f32 = 9000.0;
    pub const FIELD_HEIGHT: f32 = 6000.0;
    pub const GOALKEEPER_AREA_WIDTH: f32 = 1000.0;
    pub const GOALKEEPER_AREA_HEIGHT: f32 = 1000.0;
    pub const GOAL_DEPTH: f32 = 1000.0;
    pub const GOAL_WIDTH: f32 = 2000.0;

    /// Robots per team (one goalkeeper + five field robots)
    pub const ROBOTS_PER_TEAM: usize = 6;
}

/// Unit direction for a heading in degrees (0° = +x, counter-clockwise)
#[inline]
pub fn heading_to_direction(degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians())
}

/// Heading in degrees [0, 360) of a vector, 0 for the zero vector
#[inline]
pub fn direction_to_heading(v: Vec2) -> f32 {
    if v == Vec2::ZERO {
        return 0.0;
    }
    v.y.atan2(v.x).to_degrees().rem_euclid(360.0)
}

/// Scale `v` so its length equals `factor`.
///
/// The zero vector (and anything non-finite) maps to the zero vector, so an
/// entity already on its target stays put instead of producing NaN.
#[inline]
pub fn scaled_to_length(v: Vec2, factor: f32) -> Vec2 {
    v.normalize_or_zero() * factor
}
