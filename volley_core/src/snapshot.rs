use serde::{Deserialize, Serialize};

use crate::components::{Ball, Player, Side};
use crate::resources::{GameEvent, Phase, Score, ServeState};

/// Read-only copy of the match after a step, for renderers and the AI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub tick: u64,
    pub time: f32,
    pub phase: Phase,
    /// Left player first
    pub players: [Player; 2],
    pub ball: Ball,
    pub score: Score,
    pub serve: Option<ServeState>,
    pub events: Vec<GameEvent>,
}

impl MatchSnapshot {
    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Left => &self.players[0],
            Side::Right => &self.players[1],
        }
    }
}
