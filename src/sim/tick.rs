//! One simulation step
//!
//! Applies every robot's command (Blue roster, then Yellow roster, each in
//! roster order), then resolves goals and boundary correction once.
//! The ball is the only entity several commands can touch in a tick; kicks
//! land sequentially in that order, each starting from where the previous one
//! left the ball.

use serde::{Deserialize, Serialize};

use super::command::{ApplyOutcome, RobotCommand};
use super::entity::{PerTeam, TeamColor};
use super::terrain::{MatchEvent, Terrain};

/// Commands for a single tick, one list per team in roster order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickInput<C> {
    pub commands: PerTeam<Vec<C>>,
}

impl<C> TickInput<C> {
    pub fn new(blue: Vec<C>, yellow: Vec<C>) -> Self {
        Self {
            commands: PerTeam::new(blue, yellow),
        }
    }
}

impl<C: Clone + Default> TickInput<C> {
    /// Every robot gets the default (idle) command
    pub fn idle(roster_size: usize) -> Self {
        Self::new(vec![C::default(); roster_size], vec![C::default(); roster_size])
    }
}

/// What happened during a tick
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickReport {
    /// Outcome of each submitted command, same order as the input
    pub outcomes: PerTeam<Vec<ApplyOutcome>>,
    pub event: Option<MatchEvent>,
}

impl TickReport {
    /// Number of commands that moved the ball
    pub fn kicks(&self) -> usize {
        self.outcomes
            .iter()
            .flat_map(|(_, o)| o.iter())
            .filter(|o| **o == ApplyOutcome::BallKicked)
            .count()
    }

    pub fn rejected(&self) -> usize {
        self.outcomes
            .iter()
            .flat_map(|(_, o)| o.iter())
            .filter(|o| **o == ApplyOutcome::Rejected)
            .count()
    }
}

/// Advance the terrain by one step of `dt` seconds.
///
/// A team list shorter than the roster leaves the remaining robots idle;
/// entries past the roster are rejected individually.
pub fn tick<C: RobotCommand>(terrain: &mut Terrain, input: &TickInput<C>, dt: f32) -> TickReport {
    let mut report = TickReport::default();

    for color in TeamColor::ALL {
        let commands = input.commands.get(color);
        if commands.len() != terrain.roster_size() {
            log::debug!(
                "{} submitted {} commands for {} robots",
                color.as_str(),
                commands.len(),
                terrain.roster_size()
            );
        }
        report.outcomes[color] = commands
            .iter()
            .enumerate()
            .map(|(index, command)| command.apply(terrain, color, index, dt))
            .collect();
    }

    report.event = terrain.update_game_state();
    report
}
