use glam::Vec2;
use hecs::World;
use rand::Rng;

use crate::systems::intent_of;
use crate::{
    Ball, Config, Events, GameEvent, GameRng, Phase, ServeConfig, ServeStage, ServeState, Side,
    Time,
};

/// Ball velocity for a serve released at `power` (0..=1). Always aimed at the
/// opponent's half; more power means a faster, higher serve.
pub fn launch_velocity(server: Side, power: f32, serve: &ServeConfig) -> Vec2 {
    let factor = 0.5 + power.clamp(0.0, 1.0);
    Vec2::new(
        server.toward_opponent() * serve.speed_x * factor,
        -serve.lift * factor,
    )
}

/// Drive the power meter from the server's serve button: idle, then charging
/// while held. Letting go launches the ball and clears the serve state.
#[allow(clippy::too_many_arguments)]
pub fn update_serve(
    world: &mut World,
    config: &Config,
    serve: &mut Option<ServeState>,
    phase: &mut Phase,
    time: &Time,
    rng: &mut GameRng,
    events: &mut Events,
) {
    if *phase != Phase::Serving {
        return;
    }
    let Some(state) = serve.as_mut() else {
        return;
    };
    let held = intent_of(world, state.server).serve;

    match state.stage {
        ServeStage::Idle => {
            if held {
                state.stage = ServeStage::Charging;
                state.power = 0.0;
                state.held_for = 0.0;
                events.push(GameEvent::ServeCharging {
                    server: state.server,
                });
            }
        }
        ServeStage::Charging if held => {
            state.held_for += time.dt;
            let progress = state.held_for / config.serve.charge_time;
            state.power = config.serve.curve.apply(progress).min(1.0);
        }
        ServeStage::Charging => {
            let server = state.server;
            let power = state.power;

            let mut vel = launch_velocity(server, power, &config.serve);
            let jitter = config.serve.jitter;
            if jitter > 0.0 {
                vel += Vec2::new(
                    rng.0.gen_range(-jitter..=jitter),
                    rng.0.gen_range(-jitter..=jitter),
                );
            }
            for (_entity, ball) in world.query_mut::<&mut Ball>() {
                ball.vel = vel;
                ball.prev_pos = ball.pos;
            }

            *serve = None;
            *phase = Phase::Rally;
            events.push(GameEvent::ServeReleased { server, power });
            tracing::debug!(?server, power, "Serve released");
        }
    }
}
