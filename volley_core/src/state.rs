use hecs::{Entity, RefMut, World};
use rand::Rng;

use crate::ai::AiController;
use crate::config::{validate_ai, AiConfig, Config};
use crate::error::CoreError;
use crate::map::Court;
use crate::resources::{Events, GameRng, InputQueue, Phase, Score, ServeState, Time};
use crate::snapshot::MatchSnapshot;
use crate::{create_ball, create_player, Ball, Player, Side};

/// Who drives a side
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Controller {
    /// Intents arrive through `MatchState::input`
    Human,
    Ai(AiConfig),
}

impl Controller {
    pub fn is_ai(&self) -> bool {
        matches!(self, Controller::Ai(_))
    }
}

/// Everything one match owns. Passed by `&mut` into [`crate::step`].
pub struct MatchState {
    pub(crate) world: World,
    pub time: Time,
    pub court: Court,
    pub config: Config,
    pub score: Score,
    pub events: Events,
    pub input: InputQueue,
    pub rng: GameRng,
    pub serve: Option<ServeState>,
    pub phase: Phase,
    pub tick: u64,
    pub(crate) last_server: Side,
    pub(crate) controllers: Vec<(Side, AiController)>,
    players: [Entity; 2],
    ball: Entity,
    sides: [Controller; 2],
    seed: u64,
}

impl MatchState {
    /// Validate the configuration and set up a match ready for the first serve
    pub fn new(
        config: Config,
        left: Controller,
        right: Controller,
        seed: u64,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        for controller in [left, right] {
            if let Controller::Ai(ai) = controller {
                validate_ai("ai", &ai)?;
            }
        }
        Ok(Self::build(config, [left, right], seed))
    }

    fn build(config: Config, sides: [Controller; 2], seed: u64) -> Self {
        let court = Court::new(&config.court);
        let mut rng = GameRng::new(seed);
        let mut world = World::new();

        let players = Side::BOTH.map(|side| {
            let is_ai = sides[side_index(side)].is_ai();
            create_player(&mut world, Player::new(side, court.spawn_pos(side), is_ai))
        });

        let server = config.first_server.unwrap_or_else(|| {
            if rng.0.gen_bool(0.5) {
                Side::Left
            } else {
                Side::Right
            }
        });
        let ball = create_ball(
            &mut world,
            Ball::new(court.serve_spot(server), glam::Vec2::ZERO, config.physics.ball_radius),
        );

        let controllers = Side::BOTH
            .into_iter()
            .zip(sides)
            .zip(1u64..)
            .filter_map(|((side, controller), salt)| match controller {
                Controller::Ai(ai) => Some((side, AiController::new(ai, seed.wrapping_add(salt)))),
                Controller::Human => None,
            })
            .collect();

        tracing::info!(?server, seed, win_score = config.win_score, "Match started");

        Self {
            world,
            time: Time::new(config.fixed_dt, 0.0),
            court,
            score: Score::new(config.win_score),
            events: Events::new(),
            input: InputQueue::new(),
            rng,
            serve: Some(ServeState::new(server)),
            phase: Phase::Serving,
            tick: 0,
            last_server: server,
            controllers,
            players,
            ball,
            sides,
            seed,
            config,
        }
    }

    /// Start over with the same configuration, controllers and seed
    pub fn reset_match(&mut self) {
        *self = Self::build(self.config.clone(), self.sides, self.seed);
    }

    pub fn controller(&self, side: Side) -> Controller {
        self.sides[side_index(side)]
    }

    pub fn player(&self, side: Side) -> Option<Player> {
        let entity = self.players[side_index(side)];
        self.world.get::<&Player>(entity).ok().map(|p| *p)
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world.get::<&Ball>(self.ball).ok().map(|b| *b)
    }

    /// Direct access for scenario setup and editors
    pub fn player_mut(&mut self, side: Side) -> Option<RefMut<'_, Player>> {
        let entity = self.players[side_index(side)];
        self.world.get::<&mut Player>(entity).ok()
    }

    pub fn ball_mut(&mut self) -> Option<RefMut<'_, Ball>> {
        self.world.get::<&mut Ball>(self.ball).ok()
    }

    /// Events emitted during the last `step`
    pub fn events(&self) -> &Events {
        &self.events
    }

    /// Owned copy of the match for renderers and AI
    pub fn snapshot(&self) -> Result<MatchSnapshot, CoreError> {
        let missing = |what: &str| CoreError::Invariant(format!("{what} entity is missing"));
        let left = self.player(Side::Left).ok_or_else(|| missing("left player"))?;
        let right = self.player(Side::Right).ok_or_else(|| missing("right player"))?;
        let ball = self.ball().ok_or_else(|| missing("ball"))?;

        Ok(MatchSnapshot {
            tick: self.tick,
            time: self.time.now,
            phase: self.phase,
            players: [left, right],
            ball,
            score: self.score,
            serve: self.serve,
            events: self.events.list.clone(),
        })
    }
}

fn side_index(side: Side) -> usize {
    match side {
        Side::Left => 0,
        Side::Right => 1,
    }
}
