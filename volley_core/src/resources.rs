use serde::{Deserialize, Serialize};

use crate::components::{PlayerIntent, Side};
use crate::params::Params;

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Time {
    pub dt: f32,  // Delta time for this step
    pub now: f32, // Total elapsed time
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt: Params::FIXED_DT,
            now: 0.0,
        }
    }
}

/// Game score tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u8,
    pub right: u8,
    pub win_threshold: u8,
}

impl Score {
    pub fn new(win_threshold: u8) -> Self {
        Self {
            left: 0,
            right: 0,
            win_threshold,
        }
    }

    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left = self.left.saturating_add(1),
            Side::Right => self.right = self.right.saturating_add(1),
        }
    }

    pub fn winner(&self) -> Option<Side> {
        if self.left >= self.win_threshold {
            Some(Side::Left)
        } else if self.right >= self.win_threshold {
            Some(Side::Right)
        } else {
            None
        }
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::new(Params::WIN_SCORE)
    }
}

/// Random number generator
#[derive(Debug)]
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Something a renderer or sound collaborator may react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    PlayerJumped { side: Side },
    BallHitPlayer { side: Side },
    BallHitNet,
    BallHitWall,
    ServeCharging { server: Side },
    ServeReleased { server: Side, power: f32 },
    PointScored { scorer: Side, left: u8, right: u8 },
    MatchOver { winner: Side },
}

/// Events that occurred during the last step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Events {
    pub list: Vec<GameEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    pub fn push(&mut self, event: GameEvent) {
        self.list.push(event);
    }

    pub fn contains(&self, event: &GameEvent) -> bool {
        self.list.contains(event)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.list.iter()
    }

    /// Side that scored during the step, if any
    pub fn scorer(&self) -> Option<Side> {
        self.list.iter().find_map(|e| match e {
            GameEvent::PointScored { scorer, .. } => Some(*scorer),
            _ => None,
        })
    }
}

/// Queue of human intents waiting for the next tick
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pub inputs: Vec<(Side, PlayerIntent)>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.inputs.clear();
    }

    pub fn push(&mut self, side: Side, intent: PlayerIntent) {
        self.inputs.push((side, intent));
    }

    pub fn pop_inputs(&mut self) -> Vec<(Side, PlayerIntent)> {
        std::mem::take(&mut self.inputs)
    }
}

/// Power meter stage; releasing the serve clears the whole `ServeState`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServeStage {
    #[default]
    Idle,
    Charging,
}

/// Serve in preparation; exists only until the ball is released
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServeState {
    pub server: Side,
    pub stage: ServeStage,
    pub power: f32,    // 0..=1
    pub held_for: f32, // Seconds the serve button has been held
}

impl ServeState {
    pub fn new(server: Side) -> Self {
        Self {
            server,
            stage: ServeStage::Idle,
            power: 0.0,
            held_for: 0.0,
        }
    }

    pub fn charging(&self) -> bool {
        self.stage == ServeStage::Charging
    }
}

/// Match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Ball parked at the serve spot, server charging
    Serving,
    /// Ball in play
    Rally,
    /// Short break after a point before the next serve
    PointPause { remaining: f32 },
    MatchOver { winner: Side },
}

impl Phase {
    pub fn is_rally(&self) -> bool {
        matches!(self, Phase::Rally)
    }

    /// Players may move while serving or rallying
    pub fn players_active(&self) -> bool {
        matches!(self, Phase::Serving | Phase::Rally)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, Phase::MatchOver { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_increment() {
        let mut score = Score::new(5);
        score.increment(Side::Left);
        score.increment(Side::Left);
        score.increment(Side::Right);
        assert_eq!(score.left, 2);
        assert_eq!(score.right, 1);
        assert_eq!(score.get(Side::Left), 2);
        assert_eq!(score.get(Side::Right), 1);
    }

    #[test]
    fn test_score_winner_at_threshold() {
        let mut score = Score::new(3);
        for _ in 0..2 {
            score.increment(Side::Right);
        }
        assert_eq!(score.winner(), None, "No winner below threshold");
        score.increment(Side::Right);
        assert_eq!(score.winner(), Some(Side::Right));
    }

    #[test]
    fn test_events_scorer() {
        let mut events = Events::new();
        events.push(GameEvent::BallHitNet);
        assert_eq!(events.scorer(), None);
        events.push(GameEvent::PointScored {
            scorer: Side::Left,
            left: 1,
            right: 0,
        });
        assert_eq!(events.scorer(), Some(Side::Left));
        events.clear();
        assert!(events.list.is_empty());
    }

    #[test]
    fn test_input_queue_pop_drains() {
        let mut queue = InputQueue::new();
        queue.push(Side::Left, PlayerIntent::moving(-1.0));
        queue.push(Side::Right, PlayerIntent::moving(1.0));

        let inputs = queue.pop_inputs();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].0, Side::Left);
        assert!(queue.inputs.is_empty());
    }

    #[test]
    fn test_serve_state_starts_idle() {
        let serve = ServeState::new(Side::Right);
        assert_eq!(serve.stage, ServeStage::Idle);
        assert!(!serve.charging());
        assert_eq!(serve.power, 0.0);
    }

    #[test]
    fn test_phase_predicates() {
        assert!(Phase::Rally.is_rally());
        assert!(Phase::Serving.players_active());
        assert!(!Phase::PointPause { remaining: 1.0 }.players_active());
        assert!(Phase::MatchOver { winner: Side::Left }.is_over());
    }
}
