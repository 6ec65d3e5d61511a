use hecs::World;

use crate::{
    Ball, Config, Court, Events, GameEvent, Phase, Score, ServeRule, ServeState, Side,
};

/// Pick who serves the next point
pub fn next_server(rule: ServeRule, scorer: Side, last_server: Side) -> Side {
    match rule {
        ServeRule::Winner => scorer,
        ServeRule::Loser => scorer.opponent(),
        ServeRule::Alternate => last_server.opponent(),
    }
}

/// Award a point against the side whose floor the ball touched, then either
/// end the match or set up the next serve.
#[allow(clippy::too_many_arguments)]
pub fn award_point(
    world: &mut World,
    court: &Court,
    config: &Config,
    conceded: Side,
    score: &mut Score,
    phase: &mut Phase,
    serve: &mut Option<ServeState>,
    last_server: &mut Side,
    events: &mut Events,
) {
    if phase.is_over() {
        return;
    }

    let scorer = conceded.opponent();
    score.increment(scorer);
    events.push(GameEvent::PointScored {
        scorer,
        left: score.left,
        right: score.right,
    });
    tracing::debug!(?scorer, left = score.left, right = score.right, "Point scored");

    if let Some(winner) = score.winner() {
        *phase = Phase::MatchOver { winner };
        *serve = None;
        events.push(GameEvent::MatchOver { winner });
        tracing::info!(?winner, left = score.left, right = score.right, "Match over");
        return;
    }

    let server = next_server(config.serve_rule, scorer, *last_server);
    *last_server = server;
    *serve = Some(ServeState::new(server));

    // Park the ball over the next server
    let spot = court.serve_spot(server);
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.reset(spot);
    }

    *phase = if config.point_pause > 0.0 {
        Phase::PointPause {
            remaining: config.point_pause,
        }
    } else {
        Phase::Serving
    };
}
