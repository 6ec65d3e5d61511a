use glam::Vec2;
use hecs::World;

use crate::error::CoreError;
use crate::{Aabb, Ball, Config, Court, Phase, Player, ServeState};

// Slack for float rounding at clamped edges
const EPSILON: f32 = 1e-3;

/// Verify the world is still physically sane after a tick
pub fn check_invariants(
    world: &World,
    court: &Court,
    config: &Config,
    phase: &Phase,
    serve: &Option<ServeState>,
) -> Result<(), CoreError> {
    let arena = Aabb::new(
        Vec2::splat(-EPSILON),
        Vec2::new(court.width + EPSILON, court.ground_y + EPSILON),
    );

    for (_entity, ball) in world.query::<&Ball>().iter() {
        if !ball.pos.is_finite() || !ball.vel.is_finite() {
            return Err(CoreError::Invariant(format!(
                "ball state is not finite: pos {} vel {}",
                ball.pos, ball.vel
            )));
        }
        if !arena.contains(ball.pos) {
            return Err(CoreError::Invariant(format!(
                "ball left the court at {}",
                ball.pos
            )));
        }
    }

    for (_entity, player) in world.query::<&Player>().iter() {
        if !player.pos.is_finite() || !player.vel.is_finite() {
            return Err(CoreError::Invariant(format!(
                "{:?} player state is not finite",
                player.side
            )));
        }
        let (min_x, max_x) =
            court.player_range(player.side, config.player_bounds, config.physics.player_width);
        if player.pos.x < min_x - EPSILON || player.pos.x > max_x + EPSILON {
            return Err(CoreError::Invariant(format!(
                "{:?} player x {} outside [{min_x}, {max_x}]",
                player.side, player.pos.x
            )));
        }
        if player.pos.y > court.ground_y + EPSILON {
            return Err(CoreError::Invariant(format!(
                "{:?} player sank below the ground",
                player.side
            )));
        }
    }

    match (phase, serve) {
        (Phase::Serving, None) => Err(CoreError::Invariant(
            "serving without a serve state".to_string(),
        )),
        (Phase::Rally, Some(_)) => Err(CoreError::Invariant(
            "serve state left over during a rally".to_string(),
        )),
        _ => Ok(()),
    }
}
