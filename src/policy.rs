//! Scripted decision makers
//!
//! Baselines for driving a match without a learned agent: an opponent for
//! training, or both sides in the headless runner. Each episode builds its
//! policies fresh from a `PolicyKind`; nothing is shared between resets.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{CONTINUOUS_KICK_RANGE, DISCRETE_KICK_RANGE, MAX_ROBOT_SPEED};
use crate::direction_to_heading;
use crate::sim::{Command, DriveCommand, Robot, TeamColor, Terrain};

/// Decides one command per robot of a team for the next tick
pub trait Policy {
    fn decide_discrete(&mut self, terrain: &Terrain, color: TeamColor) -> Vec<Command>;
    fn decide_continuous(&mut self, terrain: &Terrain, color: TeamColor, dt: f32) -> Vec<DriveCommand>;
}

/// Which scripted policy to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Every robot stands still
    #[default]
    Wait,
    /// Every robot runs toward the opponent's baseline
    Advance,
    /// Uniformly sampled commands from a seeded RNG
    Random,
    /// Every robot goes for the ball and kicks it at the opponent's goal
    Chase,
}

impl PolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Wait => "wait",
            PolicyKind::Advance => "advance",
            PolicyKind::Random => "random",
            PolicyKind::Chase => "chase",
        }
    }

    /// Build a fresh policy instance
    pub fn build(self, seed: u64) -> ScriptedPolicy {
        match self {
            PolicyKind::Wait => ScriptedPolicy::Wait,
            PolicyKind::Advance => ScriptedPolicy::Advance,
            PolicyKind::Random => ScriptedPolicy::Random(Pcg32::seed_from_u64(seed)),
            PolicyKind::Chase => ScriptedPolicy::Chase,
        }
    }
}

/// A scripted policy with its own state
#[derive(Debug, Clone)]
pub enum ScriptedPolicy {
    Wait,
    Advance,
    Random(Pcg32),
    Chase,
}

/// Unit vector from `color`'s side toward the opponent's goal
fn attack_direction(terrain: &Terrain, color: TeamColor) -> Vec2 {
    let own = terrain.goals[color].center();
    let target = terrain.goals[color.opponent()].center();
    Vec2::new((target.x - own.x).signum(), 0.0)
}

/// Speed fraction that covers `dist` in one tick, capped at full speed
fn speed_to_cover(dist: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return 0.0;
    }
    (dist / (MAX_ROBOT_SPEED * dt)).min(1.0)
}

fn chase_drive(terrain: &Terrain, color: TeamColor, robot: &Robot, dt: f32) -> DriveCommand {
    let ball = terrain.ball.pos();
    let to_ball = ball - robot.pos();

    if to_ball.length() < CONTINUOUS_KICK_RANGE / 2.0 {
        // Push through the ball toward goal; the step stays short enough to remain in range
        let goal = terrain.goals[color.opponent()].center();
        let heading = direction_to_heading(goal - ball);
        let speed = speed_to_cover(CONTINUOUS_KICK_RANGE / 2.0, dt);
        return DriveCommand::new(heading, speed, true);
    }

    let speed = speed_to_cover(to_ball.length(), dt);
    DriveCommand::new(direction_to_heading(to_ball), speed, false)
}

impl Policy for ScriptedPolicy {
    fn decide_discrete(&mut self, terrain: &Terrain, color: TeamColor) -> Vec<Command> {
        let robots = terrain.teams[color].robots();
        match self {
            ScriptedPolicy::Wait => vec![Command::Wait; robots.len()],
            ScriptedPolicy::Advance => {
                let step = attack_direction(terrain, color) * 10_000.0;
                robots
                    .iter()
                    .map(|r| Command::MoveTo {
                        destination: r.pos() + step,
                    })
                    .collect()
            }
            ScriptedPolicy::Random(rng) => {
                let max = terrain.size.as_vec2();
                robots
                    .iter()
                    .map(|_| {
                        let destination = Vec2::new(rng.random::<f32>() * max.x, rng.random::<f32>() * max.y);
                        match rng.random_range(0..3) {
                            0 => Command::Wait,
                            1 => Command::MoveTo { destination },
                            _ => Command::KickTo { destination },
                        }
                    })
                    .collect()
            }
            ScriptedPolicy::Chase => {
                let ball = terrain.ball.pos();
                let goal = terrain.goals[color.opponent()].center();
                robots
                    .iter()
                    .map(|r| {
                        if r.pos().distance(ball) < DISCRETE_KICK_RANGE {
                            Command::KickTo { destination: goal }
                        } else {
                            Command::MoveTo { destination: ball }
                        }
                    })
                    .collect()
            }
        }
    }

    fn decide_continuous(&mut self, terrain: &Terrain, color: TeamColor, dt: f32) -> Vec<DriveCommand> {
        let robots = terrain.teams[color].robots();
        match self {
            ScriptedPolicy::Wait => vec![DriveCommand::idle(); robots.len()],
            ScriptedPolicy::Advance => {
                let heading = direction_to_heading(attack_direction(terrain, color));
                vec![DriveCommand::new(heading, 1.0, false); robots.len()]
            }
            ScriptedPolicy::Random(rng) => robots
                .iter()
                .map(|_| {
                    DriveCommand::new(
                        rng.random_range(0.0..360.0),
                        rng.random::<f32>(),
                        rng.random_bool(0.5),
                    )
                })
                .collect(),
            ScriptedPolicy::Chase => robots.iter().map(|r| chase_drive(terrain, color, r, dt)).collect(),
        }
    }
}
