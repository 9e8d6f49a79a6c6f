//! Robots, ball and team rosters

use std::ops::{Index, IndexMut};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Position, Size};
use super::terrain::TerrainError;
use crate::consts::{BALL_SIZE, ROBOT_SIZE};

/// The two competing sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamColor {
    Yellow,
    Blue,
}

impl TeamColor {
    /// Fixed processing order for a tick
    pub const ALL: [TeamColor; 2] = [TeamColor::Blue, TeamColor::Yellow];

    pub fn opponent(self) -> Self {
        match self {
            TeamColor::Yellow => TeamColor::Blue,
            TeamColor::Blue => TeamColor::Yellow,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamColor::Yellow => "Yellow",
            TeamColor::Blue => "Blue",
        }
    }
}

/// One value per team, indexable by color
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerTeam<T> {
    pub blue: T,
    pub yellow: T,
}

impl<T> PerTeam<T> {
    pub fn new(blue: T, yellow: T) -> Self {
        Self { blue, yellow }
    }

    pub fn get(&self, color: TeamColor) -> &T {
        match color {
            TeamColor::Blue => &self.blue,
            TeamColor::Yellow => &self.yellow,
        }
    }

    pub fn get_mut(&mut self, color: TeamColor) -> &mut T {
        match color {
            TeamColor::Blue => &mut self.blue,
            TeamColor::Yellow => &mut self.yellow,
        }
    }

    /// Entries in processing order (Blue, then Yellow)
    pub fn iter(&self) -> impl Iterator<Item = (TeamColor, &T)> {
        TeamColor::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl<T> Index<TeamColor> for PerTeam<T> {
    type Output = T;

    fn index(&self, color: TeamColor) -> &T {
        self.get(color)
    }
}

impl<T> IndexMut<TeamColor> for PerTeam<T> {
    fn index_mut(&mut self, color: TeamColor) -> &mut T {
        self.get_mut(color)
    }
}

/// Anything with a footprint and a position on the field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub size: Size,
    pub pos: Position,
}

impl Entity {
    pub fn new(size: Size, pos: Position) -> Self {
        Self { size, pos }
    }
}

/// A robot, owned by its team. Identity is fixed at roster construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Robot {
    id: usize,
    team: TeamColor,
    pub body: Entity,
}

impl Robot {
    pub(crate) fn new(id: usize, team: TeamColor, pos: Position) -> Self {
        Self {
            id,
            team,
            body: Entity::new(Size::new(ROBOT_SIZE, ROBOT_SIZE), pos),
        }
    }

    /// Roster index, unique within the team
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub fn team(&self) -> TeamColor {
        self.team
    }

    #[inline]
    pub fn pos(&self) -> Position {
        self.body.pos
    }
}

/// The match ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub body: Entity,
}

impl Ball {
    pub fn new(pos: Position) -> Self {
        Self {
            body: Entity::new(Size::new(BALL_SIZE, BALL_SIZE), pos),
        }
    }

    #[inline]
    pub fn pos(&self) -> Position {
        self.body.pos
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

/// A fixed-length roster of robots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TeamSnapshot")]
pub struct Team {
    pub color: TeamColor,
    robots: Vec<Robot>,
}

impl Team {
    /// Build a roster from starting positions; ids follow roster order from 0
    pub fn new(color: TeamColor, starting_positions: &[Position]) -> Self {
        let robots = starting_positions
            .iter()
            .enumerate()
            .map(|(id, &pos)| Robot::new(id, color, pos))
            .collect();
        Self { color, robots }
    }

    /// Robots in roster order. The slice length never changes after construction.
    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn len(&self) -> usize {
        self.robots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }

    pub fn robot(&self, index: usize) -> Option<&Robot> {
        self.robots.get(index)
    }

    /// Mutable access to one robot's footprint and position; id and team stay fixed
    pub fn body_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.robots.get_mut(index).map(|robot| &mut robot.body)
    }
}

/// Untrusted serialized form of a `Team`
#[derive(Deserialize)]
struct TeamSnapshot {
    color: TeamColor,
    robots: Vec<Robot>,
}

impl TryFrom<TeamSnapshot> for Team {
    type Error = TerrainError;

    fn try_from(raw: TeamSnapshot) -> Result<Self, Self::Error> {
        let color = raw.color;
        for (index, robot) in raw.robots.iter().enumerate() {
            if robot.id != index || robot.team != color {
                return Err(TerrainError::CorruptRoster {
                    team: color,
                    index,
                    id: robot.id,
                    owner: robot.team,
                });
            }
        }
        Ok(Self {
            color,
            robots: raw.robots,
        })
    }
}
