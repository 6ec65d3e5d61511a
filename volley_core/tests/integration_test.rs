use glam::Vec2;
use volley_core::*;

const FRAME: f32 = 1.0 / 60.0;

fn human_match(server: Side) -> MatchState {
    let config = Config {
        first_server: Some(server),
        ..Config::new()
    };
    MatchState::new(config, Controller::Human, Controller::Human, 7).unwrap()
}

fn hold_serve(state: &mut MatchState, side: Side, held: bool) {
    state.input.push(
        side,
        PlayerIntent {
            serve: held,
            ..PlayerIntent::default()
        },
    );
}

/// Charge for `frames` frames, release, and return the launched ball
fn serve_after(frames: usize) -> Ball {
    let mut state = human_match(Side::Left);
    hold_serve(&mut state, Side::Left, true);
    for _ in 0..frames {
        step(&mut state, FRAME).unwrap();
    }
    hold_serve(&mut state, Side::Left, false);
    step(&mut state, FRAME).unwrap();
    assert_eq!(state.phase, Phase::Rally);
    state.ball().unwrap()
}

/// Drop the ball onto the floor of `side` during a live rally
fn drop_ball_on(state: &mut MatchState, side: Side) {
    let x = match side {
        Side::Left => 100.0,
        Side::Right => 700.0,
    };
    if let Some(mut ball) = state.ball_mut() {
        ball.pos = Vec2::new(x, 500.0);
        ball.prev_pos = ball.pos;
        ball.vel = Vec2::new(0.0, 300.0);
    }
    step(state, FRAME).unwrap();
}

fn start_rally(state: &mut MatchState) {
    let server = state.serve.map(|s| s.server).unwrap();
    hold_serve(state, server, true);
    step(state, FRAME).unwrap();
    hold_serve(state, server, false);
    step(state, FRAME).unwrap();
    assert_eq!(state.phase, Phase::Rally);
}

#[test]
fn test_idle_match_stays_at_rest() {
    let mut state = human_match(Side::Left);
    let before = state.snapshot().unwrap();

    for _ in 0..120 {
        step(&mut state, FRAME).unwrap();
    }

    let after = state.snapshot().unwrap();
    assert_eq!(after.players, before.players);
    assert_eq!(after.ball, before.ball, "Ball hangs at the serve spot until served");
    assert_eq!(after.phase, Phase::Serving);
    assert!(after.tick > before.tick);
}

#[test]
fn test_serve_speed_grows_with_charge() {
    let soft = serve_after(5);
    let hard = serve_after(40);
    assert!(soft.vel.x > 0.0 && hard.vel.x > 0.0, "Left serves toward the right");
    assert!(hard.vel.length() > soft.vel.length());
}

#[test]
fn test_serve_emits_events() {
    let mut state = human_match(Side::Right);
    hold_serve(&mut state, Side::Right, true);
    step(&mut state, FRAME).unwrap();
    assert!(state
        .events()
        .contains(&GameEvent::ServeCharging { server: Side::Right }));

    hold_serve(&mut state, Side::Right, false);
    step(&mut state, FRAME).unwrap();
    assert!(state
        .events()
        .iter()
        .any(|e| matches!(e, GameEvent::ServeReleased { server: Side::Right, .. })));
    assert!(state.serve.is_none());
}

#[test]
fn test_floor_contact_scores_for_opponent_and_resets_serve() {
    let mut state = human_match(Side::Left);
    start_rally(&mut state);

    drop_ball_on(&mut state, Side::Right);

    assert_eq!(state.score.left, 1);
    assert_eq!(state.score.right, 0);
    assert_eq!(state.events().scorer(), Some(Side::Left));
    let serve = state.serve.expect("Next serve is prepared");
    assert_eq!(serve.server, Side::Left);
    assert_eq!(serve.stage, ServeStage::Idle);
    assert!(matches!(state.phase, Phase::PointPause { .. }));

    let ball = state.ball().unwrap();
    assert_eq!(ball.pos, state.court.serve_spot(Side::Left));
    assert_eq!(ball.vel, Vec2::ZERO);
}

#[test]
fn test_point_pause_leads_to_next_serve() {
    let mut state = human_match(Side::Left);
    start_rally(&mut state);
    drop_ball_on(&mut state, Side::Left);
    assert_eq!(state.serve.map(|s| s.server), Some(Side::Right));

    // Serve input during the pause is ignored
    hold_serve(&mut state, Side::Right, true);
    step(&mut state, FRAME).unwrap();
    assert_eq!(state.serve.map(|s| s.stage), Some(ServeStage::Idle));

    let frames = (state.config.point_pause / FRAME).ceil() as usize + 1;
    for _ in 0..frames {
        step(&mut state, FRAME).unwrap();
    }
    assert!(!matches!(state.phase, Phase::PointPause { .. }));
    assert!(state.serve.unwrap().charging(), "Held button charges once serving");
}

#[test]
fn test_match_ends_and_freezes() {
    let config = Config {
        win_score: 1,
        first_server: Some(Side::Right),
        ..Config::new()
    };
    let mut state = MatchState::new(config, Controller::Human, Controller::Human, 1).unwrap();
    start_rally(&mut state);
    drop_ball_on(&mut state, Side::Left);

    assert_eq!(state.phase, Phase::MatchOver { winner: Side::Right });
    assert!(state.events().contains(&GameEvent::MatchOver { winner: Side::Right }));
    assert!(state.serve.is_none());

    let frozen = state.snapshot().unwrap();
    state.input.push(Side::Left, PlayerIntent::moving(1.0));
    for _ in 0..60 {
        step(&mut state, FRAME).unwrap();
    }
    let after = state.snapshot().unwrap();
    assert_eq!(after.score, frozen.score);
    assert_eq!(after.players, frozen.players);
    assert_eq!(after.tick, frozen.tick);
    assert!(after.events.is_empty());
}

#[test]
fn test_winning_point_past_the_wall_ends_cleanly() {
    let config = Config {
        win_score: 1,
        first_server: Some(Side::Left),
        ..Config::new()
    };
    let mut state = MatchState::new(config, Controller::Human, Controller::Human, 1).unwrap();
    start_rally(&mut state);

    // Fast enough to cross the right wall during the tick it lands
    if let Some(mut ball) = state.ball_mut() {
        ball.pos = Vec2::new(784.0, 500.0);
        ball.prev_pos = ball.pos;
        ball.vel = Vec2::new(1500.0, 600.0);
    }
    step(&mut state, FRAME).unwrap();

    assert_eq!(state.phase, Phase::MatchOver { winner: Side::Left });
    let ball = state.ball().unwrap();
    assert!(ball.pos.x <= state.court.width - ball.radius);
}

#[test]
fn test_one_tick_per_frame() {
    let mut state = human_match(Side::Left);
    step(&mut state, FRAME).unwrap();
    assert_eq!(state.tick, 1);

    // A frame that ran a hair long still counts as one tick
    step(&mut state, FRAME * 1.0001).unwrap();
    assert_eq!(state.tick, 2);

    step(&mut state, FRAME * 3.0).unwrap();
    assert_eq!(state.tick, 5);
}

#[test]
fn test_low_ground_config_rejected_before_play() {
    let mut config = Config::new();
    config.court.ground_y = 150.0;
    config.court.net_height = 60.0;
    config.physics.player_height = 60.0;
    let result = MatchState::new(config, Controller::Human, Controller::Human, 0);
    assert!(matches!(
        result,
        Err(CoreError::Config(ConfigError::Invalid { field: "court.ground_y", .. }))
    ));
}

#[test]
fn test_move_intents_are_clamped() {
    let mut state = human_match(Side::Left);
    state.input.push(Side::Left, PlayerIntent::moving(25.0));
    for _ in 0..60 {
        step(&mut state, FRAME).unwrap();
    }
    let player = state.player(Side::Left).unwrap();
    assert!(player.vel.x <= state.config.physics.max_player_speed + 1e-3);

    let mut state = human_match(Side::Left);
    let start = state.player(Side::Right).unwrap();
    state.input.push(Side::Right, PlayerIntent::moving(f32::NAN));
    for _ in 0..30 {
        step(&mut state, FRAME).unwrap();
    }
    assert_eq!(state.player(Side::Right).unwrap(), start);
}

#[test]
fn test_players_cannot_cross_the_net() {
    let mut state = human_match(Side::Left);
    state.input.push(Side::Left, PlayerIntent::moving(1.0));
    state.input.push(Side::Right, PlayerIntent::moving(-1.0));
    for _ in 0..300 {
        step(&mut state, FRAME).unwrap();
    }

    let net = state.court.net_bounds();
    let width = state.config.physics.player_width;
    let left = state.player(Side::Left).unwrap().bounds(width, 80.0);
    let right = state.player(Side::Right).unwrap().bounds(width, 80.0);
    assert!(left.max.x <= net.min.x + 1e-3);
    assert!(right.min.x >= net.max.x - 1e-3);
}

#[test]
fn test_invalid_delta_is_rejected() {
    let mut state = human_match(Side::Left);
    for dt in [0.0, -0.5, f32::NAN, f32::INFINITY] {
        assert!(matches!(step(&mut state, dt), Err(CoreError::InvalidDelta(_))));
    }
    assert_eq!(state.tick, 0);
}

#[test]
fn test_large_delta_is_clamped() {
    let mut state = human_match(Side::Left);
    step(&mut state, 10.0).unwrap();
    assert!((state.time.now - state.config.max_dt).abs() < 1e-6);
}

#[test]
fn test_invalid_toml_config_is_rejected() {
    let err = Config::from_toml_str("[physics]\ngravity = -5.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "physics.gravity", .. }));

    let err = Config::from_toml_str("win_score = \"five\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_ai_match_reaches_a_winner() {
    let config = Config {
        win_score: 3,
        ..Config::new()
    };
    let mut state = MatchState::new(
        config,
        Controller::Ai(Difficulty::Normal.config()),
        Controller::Ai(Difficulty::Hard.config()),
        2024,
    )
    .unwrap();

    // Thirty simulated minutes is far more than any match needs
    let mut points = 0;
    for _ in 0..(60 * 60 * 30) {
        step(&mut state, FRAME).unwrap();
        if state.events().scorer().is_some() {
            points += 1;
        }
        if state.phase.is_over() {
            break;
        }
    }

    assert!(state.phase.is_over(), "AI match should finish");
    assert!(state.score.winner().is_some());
    assert_eq!(points, (state.score.left + state.score.right) as usize);
}

#[test]
fn test_same_seed_replays_identically() {
    let run = || {
        let mut state = MatchState::new(
            Config::new(),
            Controller::Ai(AiConfig::default()),
            Controller::Ai(AiConfig::default()),
            77,
        )
        .unwrap();
        for _ in 0..1200 {
            step(&mut state, FRAME).unwrap();
        }
        state.snapshot().unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut state = human_match(Side::Left);
    hold_serve(&mut state, Side::Left, true);
    step(&mut state, FRAME).unwrap();

    let snapshot = state.snapshot().unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"phase\":\"serving\""));
    assert!(json.contains("\"kind\":\"serve_charging\""));

    let back: MatchSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}
