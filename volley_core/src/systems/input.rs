use hecs::World;

use crate::components::*;
use crate::resources::*;

/// Ingest queued human intents into the matching player's intent component
pub fn ingest_inputs(world: &mut World, queue: &mut InputQueue) {
    for (side, intent) in queue.pop_inputs() {
        for (_entity, (player, current)) in world.query_mut::<(&Player, &mut PlayerIntent)>() {
            // AI sides are driven by their controller only
            if player.side == side && !player.is_ai {
                *current = intent.sanitized();
            }
        }
    }
}

/// Overwrite a side's intent, used by the AI controller
pub fn set_intent(world: &mut World, side: Side, intent: PlayerIntent) {
    for (_entity, (player, current)) in world.query_mut::<(&Player, &mut PlayerIntent)>() {
        if player.side == side {
            *current = intent.sanitized();
        }
    }
}

/// Current intent of a side, neutral if the side has no player
pub fn intent_of(world: &World, side: Side) -> PlayerIntent {
    world
        .query::<(&Player, &PlayerIntent)>()
        .iter()
        .find(|(_e, (player, _))| player.side == side)
        .map(|(_e, (_, intent))| *intent)
        .unwrap_or_default()
}
