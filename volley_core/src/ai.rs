use glam::Vec2;
use rand::Rng;

use crate::config::{AiConfig, PhysicsConfig};
use crate::map::Court;
use crate::resources::{GameRng, Phase, ServeState};
use crate::snapshot::MatchSnapshot;
use crate::{Player, PlayerIntent, Side};

/// Movement intent magnitude when repositioning rather than chasing
const WALK_SPEED: f32 = 0.5;

/// Computer opponent for one side.
///
/// Decides from the last snapshot only. Its memory (jump cooldown, reaction
/// timer, chosen serve power) lives here, and its RNG is seeded per match so
/// AI-vs-AI games replay exactly.
#[derive(Debug)]
pub struct AiController {
    config: AiConfig,
    rng: GameRng,
    jump_cooldown: f32,
    since_observed: f32,
    perceived_ball: Option<Vec2>,
    serve_target: Option<f32>,
}

impl AiController {
    pub fn new(config: AiConfig, seed: u64) -> Self {
        Self {
            config,
            rng: GameRng::new(seed),
            jump_cooldown: 0.0,
            since_observed: 0.0,
            perceived_ball: None,
            serve_target: None,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Pick this tick's intent for `side`
    pub fn decide(
        &mut self,
        snapshot: &MatchSnapshot,
        court: &Court,
        physics: &PhysicsConfig,
        side: Side,
        dt: f32,
    ) -> PlayerIntent {
        self.jump_cooldown = (self.jump_cooldown - dt).max(0.0);
        let me = snapshot.player(side);

        match snapshot.phase {
            Phase::Serving => {
                self.perceived_ball = None;
                match snapshot.serve {
                    Some(serve) if serve.server == side => self.serve(me, &serve, court),
                    _ => self.go_home(me, court),
                }
            }
            Phase::Rally => {
                self.serve_target = None;
                let ball = self.observe(snapshot.ball.pos, dt);
                if court.side_of(ball.x) == side {
                    self.track(me, ball, snapshot.ball.radius, physics)
                } else {
                    self.go_home(me, court)
                }
            }
            Phase::PointPause { .. } | Phase::MatchOver { .. } => {
                self.perceived_ball = None;
                self.serve_target = None;
                PlayerIntent::new()
            }
        }
    }

    /// Ball position as the AI currently believes it to be
    fn observe(&mut self, actual: Vec2, dt: f32) -> Vec2 {
        self.since_observed += dt;
        match self.perceived_ball {
            Some(seen) if self.since_observed < self.config.reaction_time => seen,
            _ => {
                self.since_observed = 0.0;
                self.perceived_ball = Some(actual);
                actual
            }
        }
    }

    fn serve(&mut self, me: &Player, serve: &ServeState, court: &Court) -> PlayerIntent {
        if !serve.charging() {
            let walk = self.go_home(me, court);
            if walk.move_dir != 0.0 {
                return walk;
            }
        }

        let (min, max) = (self.config.serve_power_min, self.config.serve_power_max);
        let rng = &mut self.rng;
        let target = *self
            .serve_target
            .get_or_insert_with(|| rng.0.gen_range(min..=max));

        PlayerIntent {
            serve: !serve.charging() || serve.power < target,
            ..PlayerIntent::default()
        }
    }

    fn track(
        &mut self,
        me: &Player,
        ball: Vec2,
        radius: f32,
        physics: &PhysicsConfig,
    ) -> PlayerIntent {
        let dx = ball.x - me.pos.x;
        let move_dir = if dx.abs() > self.config.track_deadzone {
            dx.signum() * self.config.speed_scale
        } else {
            0.0
        };

        let trigger_y = me.top(physics.player_height) + self.config.jump_trigger_height;
        let ball_high = ball.y + radius < trigger_y;
        let jump = me.grounded
            && self.jump_cooldown <= 0.0
            && ball_high
            && dx.abs() < self.config.jump_trigger_range;
        if jump {
            self.jump_cooldown = self.config.jump_cooldown;
        }

        PlayerIntent {
            move_dir,
            jump,
            serve: false,
        }
    }

    fn go_home(&self, me: &Player, court: &Court) -> PlayerIntent {
        let dx = court.home_x(me.side) - me.pos.x;
        if dx.abs() > self.config.home_tolerance {
            PlayerIntent::moving(dx.signum() * WALK_SPEED)
        } else {
            PlayerIntent::new()
        }
    }
}
