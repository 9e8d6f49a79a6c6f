//! Per-robot, per-tick instructions
//!
//! Two command semantics, one per kinematics strategy:
//! - `Command`: discrete destination-based orders, backed by `arrive`
//! - `DriveCommand`: heading + speed fraction + kick flag, backed by `drive`
//!
//! Numeric input is sanitized here, before it can reach entity positions.
//! Bad input only ever affects the command that carried it.

use serde::{Deserialize, Serialize};

use super::entity::TeamColor;
use super::geometry::{Position, distance};
use super::kinematics::{arrive, drive};
use super::terrain::Terrain;
use crate::consts::{CONTINUOUS_KICK_RANGE, DISCRETE_KICK_RANGE};

/// Result of applying one command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyOutcome {
    /// Nothing moved (wait, or a kick with the ball out of range)
    NoEffect,
    /// The robot moved, the ball did not
    RobotMoved,
    /// The ball moved
    BallKicked,
    /// Unknown robot index, unusable numbers, or a step that would overflow; the command was dropped
    Rejected,
}

/// Anything that can be applied to one robot for one tick
pub trait RobotCommand {
    fn apply(&self, terrain: &mut Terrain, color: TeamColor, index: usize, dt: f32) -> ApplyOutcome;
}

/// Discrete destination-based command
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Command {
    #[default]
    Wait,
    /// Move the robot toward `destination`
    MoveTo { destination: Position },
    /// Send the ball toward `destination` if it is within kick range; the robot stays put
    KickTo { destination: Position },
}

impl Command {
    fn destination(&self) -> Option<Position> {
        match self {
            Command::Wait => None,
            Command::MoveTo { destination } | Command::KickTo { destination } => Some(*destination),
        }
    }
}

impl RobotCommand for Command {
    fn apply(&self, terrain: &mut Terrain, color: TeamColor, index: usize, dt: f32) -> ApplyOutcome {
        execute_command(terrain, color, index, self, dt)
    }
}

/// Apply a discrete command to robot `index` of team `color`
pub fn execute_command(
    terrain: &mut Terrain,
    color: TeamColor,
    index: usize,
    command: &Command,
    dt: f32,
) -> ApplyOutcome {
    let Some(body) = terrain.teams[color].body_mut(index) else {
        log::warn!("{} robot {} does not exist, command ignored", color.as_str(), index);
        return ApplyOutcome::Rejected;
    };
    if command.destination().is_some_and(|d| !d.is_finite()) {
        log::warn!("{} robot {}: non-finite destination, command ignored", color.as_str(), index);
        return ApplyOutcome::Rejected;
    }
    let dt = sanitize_dt(dt);

    match *command {
        Command::Wait => ApplyOutcome::NoEffect,
        Command::MoveTo { destination } => {
            if !arrive(body, destination, dt) {
                log::warn!("{} robot {}: move overflows with dt {dt}, command ignored", color.as_str(), index);
                return ApplyOutcome::Rejected;
            }
            ApplyOutcome::RobotMoved
        }
        Command::KickTo { destination } => {
            if distance(terrain.ball.pos(), body.pos) >= DISCRETE_KICK_RANGE {
                return ApplyOutcome::NoEffect;
            }
            if !arrive(&mut terrain.ball.body, destination, dt) {
                log::warn!("{} robot {}: kick overflows with dt {dt}, command ignored", color.as_str(), index);
                return ApplyOutcome::Rejected;
            }
            log::debug!("{} robot {} kicked toward {}", color.as_str(), index, destination);
            ApplyOutcome::BallKicked
        }
    }
}

/// Continuous heading + speed command
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DriveCommand {
    /// Heading in degrees, [0, 360]
    pub orientation: f32,
    /// Fraction of max speed, [0, 1]
    pub speed: f32,
    /// Also push the ball along the same heading and speed when in range
    pub kick: bool,
}

impl DriveCommand {
    pub fn new(orientation: f32, speed: f32, kick: bool) -> Self {
        Self {
            orientation,
            speed,
            kick,
        }
    }

    /// A command that leaves the robot in place
    pub fn idle() -> Self {
        Self::default()
    }

    /// Clamp heading and speed into their domains; non-finite values become 0
    pub fn sanitized(&self) -> Self {
        Self {
            orientation: clamp_finite(self.orientation, 0.0, 360.0),
            speed: clamp_finite(self.speed, 0.0, 1.0),
            kick: self.kick,
        }
    }
}

impl RobotCommand for DriveCommand {
    fn apply(&self, terrain: &mut Terrain, color: TeamColor, index: usize, dt: f32) -> ApplyOutcome {
        apply_drive_command(terrain, color, index, self, dt)
    }
}

/// Apply a continuous command to robot `index` of team `color`.
///
/// The robot moves first; a kick then pushes the ball with the robot's own
/// heading and speed if the ball is within range of the robot's new position.
pub fn apply_drive_command(
    terrain: &mut Terrain,
    color: TeamColor,
    index: usize,
    command: &DriveCommand,
    dt: f32,
) -> ApplyOutcome {
    let Some(body) = terrain.teams[color].body_mut(index) else {
        log::warn!("{} robot {} does not exist, command ignored", color.as_str(), index);
        return ApplyOutcome::Rejected;
    };

    let cmd = command.sanitized();
    if cmd != *command {
        log::warn!(
            "{} robot {}: out-of-range command {:?} clamped to {:?}",
            color.as_str(),
            index,
            command,
            cmd
        );
    }
    let dt = sanitize_dt(dt);

    if !drive(body, cmd.orientation, cmd.speed, dt) {
        log::warn!("{} robot {}: move overflows with dt {dt}, command ignored", color.as_str(), index);
        return ApplyOutcome::Rejected;
    }

    if cmd.kick && distance(terrain.ball.pos(), body.pos) < CONTINUOUS_KICK_RANGE {
        if !drive(&mut terrain.ball.body, cmd.orientation, cmd.speed, dt) {
            log::warn!("{} robot {}: kick overflows with dt {dt}, ball left in place", color.as_str(), index);
            return ApplyOutcome::RobotMoved;
        }
        log::debug!("{} robot {} kicked at {:.1} deg", color.as_str(), index, cmd.orientation);
        return ApplyOutcome::BallKicked;
    }

    if cmd.speed > 0.0 && dt > 0.0 {
        ApplyOutcome::RobotMoved
    } else {
        ApplyOutcome::NoEffect
    }
}

fn clamp_finite(value: f32, min: f32, max: f32) -> f32 {
    if value.is_finite() { value.clamp(min, max) } else { 0.0 }
}

/// Negative or non-finite tick durations become 0
fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("Invalid tick duration {dt}, treating as 0");
        0.0
    }
}
