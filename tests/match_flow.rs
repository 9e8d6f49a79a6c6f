use glam::Vec2;
use proptest::prelude::*;
use ssl_sim::consts::ROBOTS_PER_TEAM;
use ssl_sim::sim::*;

/// Yellow robot 1 dribbles the ball into the blue goal with discrete commands
#[test]
fn discrete_kicks_score_and_recenter_in_one_update() {
    let mut terrain = Terrain::division_b();
    let center = terrain.area.center();
    assert_eq!(terrain.ball.pos(), center);
    let target = terrain.goals[TeamColor::Blue].center();

    let mut scored_at = None;
    for step in 0..40 {
        let robot = terrain.teams.yellow.robots()[1].pos();
        let ball = terrain.ball.pos();
        let mut yellow = vec![Command::Wait; ROBOTS_PER_TEAM];
        yellow[1] = if robot.distance(ball) < ssl_sim::consts::DISCRETE_KICK_RANGE {
            Command::KickTo { destination: target }
        } else {
            Command::MoveTo { destination: ball }
        };

        let report = tick(
            &mut terrain,
            &TickInput::new(vec![Command::Wait; ROBOTS_PER_TEAM], yellow),
            1.0,
        );
        if let Some(event) = report.event {
            assert_eq!(event, MatchEvent::Goal { scorer: TeamColor::Yellow });
            scored_at = Some(step);
            break;
        }
        assert_eq!(terrain.score(TeamColor::Yellow), 0);
    }

    assert!(scored_at.is_some(), "ball never reached the blue goal");
    assert_eq!(terrain.score(TeamColor::Yellow), 1);
    assert_eq!(terrain.score(TeamColor::Blue), 0);
    assert_eq!(terrain.ball.pos(), center);

    // No intervening movement: the second update changes nothing
    assert_eq!(terrain.update_game_state(), None);
    assert_eq!(terrain.score(TeamColor::Yellow), 1);
}

/// Blue robot 0 pushes the ball into the yellow goal with drive commands
#[test]
fn continuous_kicks_score_for_blue() {
    let mut terrain = Terrain::division_b();
    let start = terrain.ball.pos() - Vec2::new(40.0, 0.0);
    terrain.robot_body_mut(TeamColor::Blue, 0).unwrap().pos = start;

    let mut blue = vec![DriveCommand::idle(); ROBOTS_PER_TEAM];
    blue[0] = DriveCommand::new(0.0, 0.04, true); // 40 per tick, ball stays in range
    let input = TickInput::new(blue, vec![DriveCommand::idle(); ROBOTS_PER_TEAM]);

    let mut goal = None;
    for _ in 0..200 {
        let report = tick(&mut terrain, &input, 1.0);
        if report.event.is_some() {
            goal = report.event;
            break;
        }
        assert_eq!(report.kicks(), 1);
    }

    assert_eq!(goal, Some(MatchEvent::Goal { scorer: TeamColor::Blue }));
    assert_eq!(terrain.score(TeamColor::Blue), 1);
    assert_eq!(terrain.ball.pos(), terrain.area.center());
}

#[test]
fn rosters_are_fixed_and_unique() {
    let mut terrain = Terrain::division_b();
    let input = TickInput::new(
        vec![DriveCommand::new(45.0, 1.0, true); ROBOTS_PER_TEAM + 2],
        vec![DriveCommand::new(225.0, 1.0, true); ROBOTS_PER_TEAM],
    );
    for _ in 0..10 {
        tick(&mut terrain, &input, 0.5);
    }

    for (_, team) in terrain.teams.iter() {
        let mut ids: Vec<usize> = team.robots().iter().map(|r| r.id()).collect();
        ids.dedup();
        assert_eq!(ids, (0..ROBOTS_PER_TEAM).collect::<Vec<_>>());
    }
}

fn drive_command() -> impl Strategy<Value = DriveCommand> {
    (-90.0f32..450.0, -0.5f32..1.5, any::<bool>()).prop_map(|(o, s, k)| DriveCommand::new(o, s, k))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// After every tick the ball is inside the field and scores only step by one
    #[test]
    fn prop_ball_in_field_after_every_tick(
        steps in prop::collection::vec(
            (prop::collection::vec(drive_command(), ROBOTS_PER_TEAM),
             prop::collection::vec(drive_command(), ROBOTS_PER_TEAM)),
            1..40,
        ),
        dt in 0.0f32..3.0,
    ) {
        let mut terrain = Terrain::division_b();
        for (blue, yellow) in steps {
            let before = *terrain.scores();
            tick(&mut terrain, &TickInput::new(blue, yellow), dt);
            let after = *terrain.scores();

            prop_assert!(terrain.area.contains(terrain.ball.pos()));
            prop_assert!(terrain.ball.pos().is_finite());
            let gained = (after.blue - before.blue) + (after.yellow - before.yellow);
            prop_assert!(gained <= 1);
        }
    }

    /// A kick-flagged command moves the ball only when the robot ends within range
    #[test]
    fn prop_kick_moves_ball_iff_in_range(
        offset_x in -120.0f32..120.0, offset_y in -120.0f32..120.0,
        heading in 0.0f32..360.0, speed in 0.0f32..=0.05,
    ) {
        let mut terrain = Terrain::division_b();
        let ball = terrain.ball.pos();
        terrain.robot_body_mut(TeamColor::Yellow, 2).unwrap().pos = ball + Vec2::new(offset_x, offset_y);

        let cmd = DriveCommand::new(heading, speed, true);
        apply_drive_command(&mut terrain, TeamColor::Yellow, 2, &cmd, 1.0);
        let robot = terrain.teams.yellow.robots()[2].pos();

        let in_range = robot.distance(ball) < ssl_sim::consts::CONTINUOUS_KICK_RANGE;
        if in_range {
            let expected = ball + ssl_sim::heading_to_direction(heading) * speed * 1000.0;
            prop_assert!(terrain.ball.pos().distance(expected) < 1e-2);
        } else {
            prop_assert_eq!(terrain.ball.pos(), ball);
        }
    }
}
