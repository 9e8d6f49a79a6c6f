//! Deterministic simulation module
//!
//! All match logic lives here. This module must be pure and deterministic:
//! - Caller-supplied `dt` only, no clocks or sleeping
//! - No RNG
//! - Stable iteration order (Blue then Yellow, roster order within a team)
//! - No rendering or platform dependencies

pub mod command;
pub mod entity;
pub mod geometry;
pub mod kinematics;
pub mod terrain;
pub mod tick;

pub use command::{ApplyOutcome, Command, DriveCommand, RobotCommand, apply_drive_command, execute_command};
pub use entity::{Ball, Entity, PerTeam, Robot, Team, TeamColor};
pub use geometry::{Area, Position, Size, distance};
pub use kinematics::{arrive, drive};
pub use terrain::{MatchEvent, Terrain, TerrainConfig, TerrainError};
pub use tick::{TickInput, TickReport, tick};
