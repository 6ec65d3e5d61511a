use hecs::World;

use crate::{
    Ball, Config, Court, Events, GameEvent, Params, Phase, PhysicsConfig, Player, PlayerIntent,
    Time,
};

/// Apply player movement, jumping, gravity and bounds based on intents
pub fn move_players(
    world: &mut World,
    time: &Time,
    court: &Court,
    config: &Config,
    phase: &Phase,
    events: &mut Events,
) {
    let physics = &config.physics;
    let dt = time.dt;

    for (_entity, (player, intent)) in world.query_mut::<(&mut Player, &PlayerIntent)>() {
        // Blend horizontal speed toward the intended speed for momentum
        let target = intent.move_dir * physics.max_player_speed;
        let blend = 1.0 - (-physics.player_accel_rate * dt).exp();
        player.vel.x += (target - player.vel.x) * blend;
        if intent.move_dir == 0.0 && player.vel.x.abs() < Params::PLAYER_STOP_SPEED {
            player.vel.x = 0.0;
        }

        // Jumping is only possible from the ground during a rally
        if intent.jump && player.grounded && phase.is_rally() {
            player.vel.y = -physics.jump_impulse;
            player.grounded = false;
            events.push(GameEvent::PlayerJumped { side: player.side });
        }

        if !player.grounded {
            player.vel.y = apply_gravity(player.vel.y, physics, dt);
        }

        player.pos += player.vel * dt;

        // Clamp to the side's range
        let (min_x, max_x) =
            court.player_range(player.side, config.player_bounds, physics.player_width);
        if player.pos.x <= min_x {
            player.pos.x = min_x;
            player.vel.x = player.vel.x.max(0.0);
        } else if player.pos.x >= max_x {
            player.pos.x = max_x;
            player.vel.x = player.vel.x.min(0.0);
        }

        // Land on the ground
        if player.pos.y >= court.ground_y {
            player.pos.y = court.ground_y;
            player.vel.y = 0.0;
            player.grounded = true;
        }
    }
}

/// Move ball based on velocity and gravity
pub fn move_ball(world: &mut World, time: &Time, config: &Config) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.prev_pos = ball.pos;
        ball.vel.y = apply_gravity(ball.vel.y, &config.physics, time.dt);
        ball.pos += ball.vel * time.dt;
    }
}

fn apply_gravity(vel_y: f32, physics: &PhysicsConfig, dt: f32) -> f32 {
    let vel_y = vel_y + physics.gravity * dt;
    if physics.terminal_velocity > 0.0 {
        vel_y.min(physics.terminal_velocity)
    } else {
        vel_y
    }
}
