//! Terrain: the aggregate root for one match
//!
//! Owns the field areas, both teams, the ball and the scores. Built once per
//! episode and replaced wholesale on reset.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::{Ball, Entity, PerTeam, Robot, Team, TeamColor};
use super::geometry::{Area, Position, Size};
use crate::consts::*;

/// Construction-time configuration errors, also raised when loading a snapshot
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TerrainError {
    #[error("Roster size mismatch: blue has {blue} robots, yellow has {yellow}")]
    RosterMismatch { blue: usize, yellow: usize },

    #[error("Teams must have at least one robot")]
    EmptyRoster,

    #[error("{what} size must be positive, got {width}x{height}")]
    NonPositiveSize {
        what: &'static str,
        width: f32,
        height: f32,
    },

    #[error("{team:?} roster slot {index} holds robot {id} of team {owner:?}")]
    CorruptRoster {
        team: TeamColor,
        index: usize,
        id: usize,
        owner: TeamColor,
    },

    #[error("{slot:?} slot holds the {found:?} team")]
    TeamSlotMismatch { slot: TeamColor, found: TeamColor },
}

/// What `update_game_state` did with the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// Ball entered a goal; `scorer` was credited and the ball recentered
    Goal { scorer: TeamColor },
    /// Ball left the field outside any goal and was recentered
    BallOutOfBounds,
}

/// Field layout and starting rosters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    pub field: Size,
    pub goalkeeper_area: Size,
    /// Goal depth (x) by mouth width (y)
    pub goal: Size,
    pub blue_start: Vec<Position>,
    pub yellow_start: Vec<Position>,
}

impl TerrainConfig {
    /// Division B layout: 9000x6000 field, one goalkeeper + five field robots a side
    pub fn division_b() -> Self {
        let blue_start = std::iter::once(Vec2::new(500.0, 3000.0))
            .chain((0..5).map(|i| Vec2::new(2225.0, 500.0 + 1000.0 * i as f32)))
            .collect();
        let yellow_start = std::iter::once(Vec2::new(8500.0, 3000.0))
            .chain((0..5).map(|i| Vec2::new(6725.0, 500.0 + 1000.0 * i as f32)))
            .collect();

        Self {
            field: Size::new(FIELD_WIDTH, FIELD_HEIGHT),
            goalkeeper_area: Size::new(GOALKEEPER_AREA_WIDTH, GOALKEEPER_AREA_HEIGHT),
            goal: Size::new(GOAL_DEPTH, GOAL_WIDTH),
            blue_start,
            yellow_start,
        }
    }

    fn validate(&self) -> Result<(), TerrainError> {
        check_sizes([
            ("Field", self.field),
            ("Goalkeeper area", self.goalkeeper_area),
            ("Goal", self.goal),
        ])?;
        check_rosters(self.blue_start.len(), self.yellow_start.len())
    }
}

fn check_sizes<const N: usize>(sizes: [(&'static str, Size); N]) -> Result<(), TerrainError> {
    for (what, size) in sizes {
        if !size.is_positive() {
            return Err(TerrainError::NonPositiveSize {
                what,
                width: size.width,
                height: size.height,
            });
        }
    }
    Ok(())
}

fn check_rosters(blue: usize, yellow: usize) -> Result<(), TerrainError> {
    if blue != yellow {
        return Err(TerrainError::RosterMismatch { blue, yellow });
    }
    if blue == 0 {
        return Err(TerrainError::EmptyRoster);
    }
    Ok(())
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self::division_b()
    }
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TerrainSnapshot")]
pub struct Terrain {
    pub size: Size,
    /// Playable field, origin (0, 0)
    pub area: Area,
    /// Goalkeeper zone on each team's defended baseline
    pub goalkeeper_areas: PerTeam<Area>,
    /// Goal each team defends, outside the playable field
    pub goals: PerTeam<Area>,
    pub ball: Ball,
    pub teams: PerTeam<Team>,
    scores: PerTeam<u32>,
}

/// Untrusted serialized form of a `Terrain`
#[derive(Deserialize)]
struct TerrainSnapshot {
    size: Size,
    area: Area,
    goalkeeper_areas: PerTeam<Area>,
    goals: PerTeam<Area>,
    ball: Ball,
    teams: PerTeam<Team>,
    scores: PerTeam<u32>,
}

impl TryFrom<TerrainSnapshot> for Terrain {
    type Error = TerrainError;

    /// Re-check what `Terrain::new` guarantees; each `Team` has already
    /// verified its own ids and robot colors.
    fn try_from(raw: TerrainSnapshot) -> Result<Self, Self::Error> {
        check_sizes([
            ("Field", raw.size),
            ("Playable area", raw.area.size),
            ("Goalkeeper area", raw.goalkeeper_areas.blue.size),
            ("Goalkeeper area", raw.goalkeeper_areas.yellow.size),
            ("Goal", raw.goals.blue.size),
            ("Goal", raw.goals.yellow.size),
        ])?;
        for (slot, team) in raw.teams.iter() {
            if team.color != slot {
                return Err(TerrainError::TeamSlotMismatch { slot, found: team.color });
            }
        }
        check_rosters(raw.teams.blue.len(), raw.teams.yellow.len())?;

        Ok(Self {
            size: raw.size,
            area: raw.area,
            goalkeeper_areas: raw.goalkeeper_areas,
            goals: raw.goals,
            ball: raw.ball,
            teams: raw.teams,
            scores: raw.scores,
        })
    }
}

impl Terrain {
    /// Build a terrain from a layout. Fails on mismatched rosters or degenerate sizes.
    pub fn new(config: &TerrainConfig) -> Result<Self, TerrainError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// The Division B terrain
    pub fn division_b() -> Self {
        Self::build(&TerrainConfig::division_b())
    }

    fn build(config: &TerrainConfig) -> Self {
        let field = config.field;
        let gk = config.goalkeeper_area;
        let goal = config.goal;
        let gk_y = field.height / 2.0 - gk.height / 2.0;
        let goal_y = field.height / 2.0 - goal.height / 2.0;

        let terrain = Self {
            size: field,
            area: Area::new(Vec2::ZERO, field),
            goalkeeper_areas: PerTeam::new(
                Area::new(Vec2::new(0.0, gk_y), gk),
                Area::new(Vec2::new(field.width - gk.width, gk_y), gk),
            ),
            goals: PerTeam::new(
                Area::new(Vec2::new(-goal.width, goal_y), goal),
                Area::new(Vec2::new(field.width, goal_y), goal),
            ),
            ball: Ball::new(field.center()),
            teams: PerTeam::new(
                Team::new(TeamColor::Blue, &config.blue_start),
                Team::new(TeamColor::Yellow, &config.yellow_start),
            ),
            scores: PerTeam::default(),
        };

        log::debug!(
            "Terrain built: field {}x{}, {} robots per team",
            field.width,
            field.height,
            terrain.roster_size()
        );
        terrain
    }

    /// Robots per team (identical for both teams)
    pub fn roster_size(&self) -> usize {
        self.teams.blue.len()
    }

    pub fn robot(&self, color: TeamColor, index: usize) -> Option<&Robot> {
        self.teams[color].robot(index)
    }

    /// Reposition a robot; its id and team cannot be changed
    pub fn robot_body_mut(&mut self, color: TeamColor, index: usize) -> Option<&mut Entity> {
        self.teams[color].body_mut(index)
    }

    pub fn score(&self, color: TeamColor) -> u32 {
        self.scores[color]
    }

    pub fn scores(&self) -> &PerTeam<u32> {
        &self.scores
    }

    /// Put the ball back on the center spot
    pub fn reset_ball(&mut self) {
        self.ball.body.pos = self.area.center();
    }

    /// Distance from the ball to the center of the goal `color` defends
    pub fn ball_distance_to_goal(&self, color: TeamColor) -> f32 {
        self.ball.pos().distance(self.goals[color].center())
    }

    /// Resolve goals and boundary correction after a tick's commands.
    ///
    /// A ball inside the goal `C` defends scores one point for `C`'s opponent.
    /// The boundary check always runs afterwards; the ball is also recentered
    /// after any goal, so one entry can never be counted twice. Goal mouths
    /// share the baseline with the field and containment is inclusive, so a
    /// ball exactly on the goal line is both in the field and in the goal.
    pub fn update_game_state(&mut self) -> Option<MatchEvent> {
        let ball = self.ball.pos();

        let scorer = if self.goals.blue.contains(ball) {
            Some(TeamColor::Yellow)
        } else if self.goals.yellow.contains(ball) {
            Some(TeamColor::Blue)
        } else {
            None
        };

        if let Some(scorer) = scorer {
            self.scores[scorer] += 1;
            log::info!(
                "Goal for {} (Blue {} - Yellow {})",
                scorer.as_str(),
                self.scores.blue,
                self.scores.yellow
            );
        }

        let out_of_bounds = !self.area.contains(ball);
        if scorer.is_some() || out_of_bounds {
            self.reset_ball();
        }

        match scorer {
            Some(scorer) => Some(MatchEvent::Goal { scorer }),
            None if out_of_bounds => {
                log::debug!("Ball out of bounds at ({:.1}, {:.1}), recentered", ball.x, ball.y);
                Some(MatchEvent::BallOutOfBounds)
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_b_layout() {
        let t = Terrain::division_b();
        assert_eq!(t.size, Size::new(9000.0, 6000.0));
        assert_eq!(t.area.origin, Vec2::ZERO);
        assert_eq!(t.ball.pos(), Vec2::new(4500.0, 3000.0));
        assert_eq!(t.score(TeamColor::Blue), 0);
        assert_eq!(t.score(TeamColor::Yellow), 0);

        assert_eq!(t.goals.blue, Area::new(Vec2::new(-1000.0, 2000.0), Size::new(1000.0, 2000.0)));
        assert_eq!(t.goals.yellow, Area::new(Vec2::new(9000.0, 2000.0), Size::new(1000.0, 2000.0)));
        assert_eq!(t.goalkeeper_areas.blue.origin, Vec2::new(0.0, 2500.0));
        assert_eq!(t.goalkeeper_areas.yellow.origin, Vec2::new(8000.0, 2500.0));
    }

    #[test]
    fn test_division_b_rosters() {
        let t = Terrain::division_b();
        for (color, team) in t.teams.iter() {
            assert_eq!(team.color, color);
            assert_eq!(team.len(), ROBOTS_PER_TEAM);
            let ids: Vec<usize> = team.robots().iter().map(|r| r.id()).collect();
            assert_eq!(ids, (0..ROBOTS_PER_TEAM).collect::<Vec<_>>());
        }
        // Goalkeepers first, mirrored
        assert_eq!(t.teams.blue.robots()[0].pos(), Vec2::new(500.0, 3000.0));
        assert_eq!(t.teams.yellow.robots()[0].pos(), Vec2::new(8500.0, 3000.0));
        assert_eq!(t.teams.blue.robots()[5].pos(), Vec2::new(2225.0, 4500.0));
        assert_eq!(t.teams.yellow.robots()[5].pos(), Vec2::new(6725.0, 4500.0));
    }

    #[test]
    fn test_division_b_config_is_valid() {
        assert!(Terrain::new(&TerrainConfig::division_b()).is_ok());
    }

    #[test]
    fn test_goals_do_not_overlap() {
        let t = Terrain::division_b();
        assert!(!t.goals.blue.intersects(&t.goals.yellow));
    }

    #[test]
    fn test_roster_mismatch_rejected() {
        let mut config = TerrainConfig::division_b();
        config.yellow_start.pop();
        assert_eq!(
            Terrain::new(&config).unwrap_err(),
            TerrainError::RosterMismatch { blue: 6, yellow: 5 }
        );
    }

    #[test]
    fn test_empty_roster_rejected() {
        let mut config = TerrainConfig::division_b();
        config.blue_start.clear();
        config.yellow_start.clear();
        assert_eq!(Terrain::new(&config).unwrap_err(), TerrainError::EmptyRoster);
    }

    #[test]
    fn test_non_positive_sizes_rejected() {
        let mut config = TerrainConfig::division_b();
        config.field = Size::new(0.0, 6000.0);
        assert!(matches!(
            Terrain::new(&config),
            Err(TerrainError::NonPositiveSize { what: "Field", .. })
        ));

        let mut config = TerrainConfig::division_b();
        config.goal = Size::new(1000.0, -1.0);
        assert!(matches!(
            Terrain::new(&config),
            Err(TerrainError::NonPositiveSize { what: "Goal", .. })
        ));
    }

    #[test]
    fn test_goal_in_blue_goal_scores_for_yellow() {
        let mut t = Terrain::division_b();
        t.ball.body.pos = Vec2::new(-500.0, 3000.0);

        let event = t.update_game_state();
        assert_eq!(event, Some(MatchEvent::Goal { scorer: TeamColor::Yellow }));
        assert_eq!(t.score(TeamColor::Yellow), 1);
        assert_eq!(t.score(TeamColor::Blue), 0);
        assert_eq!(t.ball.pos(), t.area.center());
    }

    #[test]
    fn test_goal_in_yellow_goal_scores_for_blue() {
        let mut t = Terrain::division_b();
        t.ball.body.pos = Vec2::new(9500.0, 2500.0);

        assert_eq!(t.update_game_state(), Some(MatchEvent::Goal { scorer: TeamColor::Blue }));
        assert_eq!(t.score(TeamColor::Blue), 1);
        assert_eq!(t.ball.pos(), t.area.center());
    }

    #[test]
    fn test_no_double_count() {
        let mut t = Terrain::division_b();
        t.ball.body.pos = Vec2::new(-200.0, 3500.0);
        t.update_game_state();
        assert_eq!(t.update_game_state(), None);
        assert_eq!(t.score(TeamColor::Yellow), 1);
        assert_eq!(t.score(TeamColor::Blue), 0);
    }

    #[test]
    fn test_goal_mouth_edge_counts() {
        // Inclusive containment: exactly on the goal line, inside the mouth
        let mut t = Terrain::division_b();
        t.ball.body.pos = Vec2::new(0.0, 2000.0);

        assert_eq!(t.update_game_state(), Some(MatchEvent::Goal { scorer: TeamColor::Yellow }));
        assert_eq!(t.ball.pos(), t.area.center());
        assert_eq!(t.update_game_state(), None);
        assert_eq!(t.score(TeamColor::Yellow), 1);
    }

    #[test]
    fn test_out_of_bounds_recenters_without_scoring() {
        let mut t = Terrain::division_b();
        t.ball.body.pos = Vec2::new(-500.0, 500.0); // beside the blue goal

        assert_eq!(t.update_game_state(), Some(MatchEvent::BallOutOfBounds));
        assert_eq!(t.ball.pos(), t.area.center());
        assert_eq!(t.scores(), &PerTeam::new(0, 0));
    }

    #[test]
    fn test_in_play_is_untouched() {
        let mut t = Terrain::division_b();
        t.ball.body.pos = Vec2::new(9000.0, 6000.0); // field corner, inclusive
        assert_eq!(t.update_game_state(), None);
        assert_eq!(t.ball.pos(), Vec2::new(9000.0, 6000.0));
    }

    #[test]
    fn test_robot_accessors() {
        let mut t = Terrain::division_b();
        let spot = Vec2::new(4000.0, 2800.0);
        if let Some(body) = t.robot_body_mut(TeamColor::Yellow, 3) {
            body.pos = spot;
        }

        let robot = t.robot(TeamColor::Yellow, 3).unwrap();
        assert_eq!(robot.pos(), spot);
        assert_eq!(robot.id(), 3);
        assert_eq!(robot.team(), TeamColor::Yellow);
        assert_eq!(t.teams.yellow.robots()[3].pos(), spot);

        assert!(t.robot(TeamColor::Blue, ROBOTS_PER_TEAM).is_none());
        assert!(t.robot_body_mut(TeamColor::Blue, ROBOTS_PER_TEAM).is_none());
    }

    #[test]
    fn test_snapshot_round_trip_keeps_state() {
        let mut t = Terrain::division_b();
        t.ball.body.pos = Vec2::new(-500.0, 3000.0);
        t.update_game_state();

        let json = serde_json::to_string(&t).unwrap();
        let restored: Terrain = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.score(TeamColor::Yellow), 1);
        assert_eq!(restored.teams, t.teams);
        assert_eq!(restored.ball, t.ball);
    }

    #[test]
    fn test_tampered_snapshot_rejected() {
        let json = serde_json::to_value(Terrain::division_b()).unwrap();

        let mut truncated = json.clone();
        if let Some(robots) = truncated["teams"]["yellow"]["robots"].as_array_mut() {
            robots.truncate(2);
        }
        let err = serde_json::from_value::<Terrain>(truncated).unwrap_err();
        assert!(err.to_string().contains("Roster size mismatch"), "{err}");

        let mut duplicate_id = json.clone();
        duplicate_id["teams"]["blue"]["robots"][3]["id"] = serde_json::json!(0);
        assert!(serde_json::from_value::<Terrain>(duplicate_id).is_err());

        let mut swapped = json.clone();
        swapped["teams"]["blue"]["color"] = serde_json::json!("Yellow");
        assert!(serde_json::from_value::<Terrain>(swapped).is_err());

        let mut flat_goal = json;
        flat_goal["goals"]["yellow"]["size"]["width"] = serde_json::json!(0.0);
        assert!(serde_json::from_value::<Terrain>(flat_goal).is_err());
    }

    #[test]
    fn test_ball_distance_to_goal() {
        let t = Terrain::division_b();
        // Center spot to yellow goal center (9500, 3000)
        assert!((t.ball_distance_to_goal(TeamColor::Yellow) - 5000.0).abs() < 1e-3);
    }
}
