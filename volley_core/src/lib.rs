pub mod ai;
pub mod components;
pub mod config;
pub mod error;
pub mod map;
pub mod params;
pub mod resources;
pub mod snapshot;
pub mod state;
pub mod systems;

pub use ai::*;
pub use components::*;
pub use config::*;
pub use error::*;
pub use map::*;
pub use params::*;
pub use resources::*;
pub use snapshot::*;
pub use state::*;

use hecs::World;
use systems::*;

/// Advance the match by `dt` seconds of wall time.
///
/// `dt` is clamped to `max_dt` and split into `fixed_dt` ticks. Events from
/// the previous call are cleared first. Once the match is over this is a
/// no-op.
pub fn step(state: &mut MatchState, dt: f32) -> Result<(), CoreError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(CoreError::InvalidDelta(dt));
    }

    state.events.clear();
    if state.phase.is_over() {
        state.input.clear();
        return Ok(());
    }

    // Clamp dt to prevent large jumps
    let clamped_dt = dt.min(state.config.max_dt);

    // Fixed micro-steps for stable physics
    let mut remaining_dt = clamped_dt;
    while remaining_dt > 0.0 {
        let mut step_dt = remaining_dt.min(state.config.fixed_dt);
        // Fold a float-rounding sliver into this tick instead of running another
        if remaining_dt - step_dt < state.config.fixed_dt * 1e-3 {
            step_dt = remaining_dt;
        }
        remaining_dt -= step_dt;

        let step_time = Time {
            dt: step_dt,
            now: state.time.now + (clamped_dt - remaining_dt),
        };
        tick(state, &step_time)?;

        if state.phase.is_over() {
            break;
        }
    }

    state.time.now += clamped_dt;
    Ok(())
}

fn tick(state: &mut MatchState, time: &Time) -> Result<(), CoreError> {
    // 1. AI picks intents from the state as it stood before this tick
    if !state.controllers.is_empty() {
        let snapshot = state.snapshot()?;
        for (side, ai) in state.controllers.iter_mut() {
            let intent = ai.decide(&snapshot, &state.court, &state.config.physics, *side, time.dt);
            set_intent(&mut state.world, *side, intent);
        }
    }

    // 2. Ingest queued human intents
    ingest_inputs(&mut state.world, &mut state.input);

    // 3. Count down the break between points
    tick_point_pause(&mut state.phase, time);

    // 4. Move players
    if state.phase.players_active() {
        move_players(
            &mut state.world,
            time,
            &state.court,
            &state.config,
            &state.phase,
            &mut state.events,
        );
    }

    // 5. Ball flight, contacts and scoring only while the rally is live
    if state.phase.is_rally() {
        move_ball(&mut state.world, time, &state.config);

        if let Some(conceded) = check_collisions(
            &mut state.world,
            &state.court,
            &state.config,
            &mut state.events,
        ) {
            award_point(
                &mut state.world,
                &state.court,
                &state.config,
                conceded,
                &mut state.score,
                &mut state.phase,
                &mut state.serve,
                &mut state.last_server,
                &mut state.events,
            );
        }
    }

    // 6. Power meter and serve release
    update_serve(
        &mut state.world,
        &state.config,
        &mut state.serve,
        &mut state.phase,
        time,
        &mut state.rng,
        &mut state.events,
    );

    check_invariants(
        &state.world,
        &state.court,
        &state.config,
        &state.phase,
        &state.serve,
    )?;
    state.tick += 1;
    Ok(())
}

/// Helper to create a player entity
pub fn create_player(world: &mut World, player: Player) -> hecs::Entity {
    world.spawn((player, PlayerIntent::new()))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, ball: Ball) -> hecs::Entity {
    world.spawn((ball,))
}
