use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::Side;
use crate::error::ConfigError;
use crate::params::Params;

/// How far a player may roam horizontally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerBounds {
    /// Own half only, stopping at the net face
    #[default]
    Half,
    /// Anywhere between the outer walls
    FullCourt,
}

/// Who serves after a point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServeRule {
    /// The side that won the point
    #[default]
    Winner,
    /// The side that lost the point
    Loser,
    /// Serve alternates every point
    Alternate,
}

/// Power meter response to charge time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerCurve {
    #[default]
    Linear,
    /// Slow start, fast finish
    Quadratic,
}

impl PowerCurve {
    /// Map charge progress in [0, 1] to power in [0, 1]
    pub fn apply(self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            PowerCurve::Linear => t,
            PowerCurve::Quadratic => t * t,
        }
    }
}

/// AI opponent strength preset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn config(self) -> AiConfig {
        let base = AiConfig::default();
        match self {
            Difficulty::Easy => AiConfig {
                difficulty: self,
                speed_scale: 0.6,
                track_deadzone: 40.0,
                jump_trigger_range: 70.0,
                jump_cooldown: 1.0,
                reaction_time: 0.2,
                ..base
            },
            Difficulty::Normal => base,
            Difficulty::Hard => AiConfig {
                difficulty: self,
                speed_scale: 1.0,
                track_deadzone: 12.0,
                jump_trigger_range: 130.0,
                jump_cooldown: 0.4,
                reaction_time: 0.0,
                serve_power_min: 0.75,
                serve_power_max: 1.0,
                ..base
            },
        }
    }
}

/// Court geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtConfig {
    pub width: f32,
    pub height: f32,
    pub ground_y: f32,
    pub net_width: f32,
    pub net_height: f32,
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            width: Params::COURT_WIDTH,
            height: Params::COURT_HEIGHT,
            ground_y: Params::GROUND_Y,
            net_width: Params::NET_WIDTH,
            net_height: Params::NET_HEIGHT,
        }
    }
}

/// Kinematics and contact response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    /// Cap on downward speed; 0 disables the cap
    pub terminal_velocity: f32,
    pub max_player_speed: f32,
    pub player_accel_rate: f32,
    pub jump_impulse: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub ball_radius: f32,
    pub wall_restitution: f32,
    pub net_restitution: f32,
    /// Horizontal ball speed from hitting the very edge of a player
    pub hit_spread: f32,
    /// Fraction of player horizontal speed passed to the ball
    pub momentum_transfer: f32,
    pub hit_lift: f32,
    pub jump_hit_lift: f32,
    /// Fraction of a rising player's vertical speed added to the lift
    pub jump_lift_transfer: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Params::GRAVITY,
            terminal_velocity: Params::TERMINAL_VELOCITY,
            max_player_speed: Params::MAX_PLAYER_SPEED,
            player_accel_rate: Params::PLAYER_ACCEL_RATE,
            jump_impulse: Params::JUMP_IMPULSE,
            player_width: Params::PLAYER_WIDTH,
            player_height: Params::PLAYER_HEIGHT,
            ball_radius: Params::BALL_RADIUS,
            wall_restitution: Params::WALL_RESTITUTION,
            net_restitution: Params::NET_RESTITUTION,
            hit_spread: Params::HIT_SPREAD,
            momentum_transfer: Params::MOMENTUM_TRANSFER,
            hit_lift: Params::HIT_LIFT,
            jump_hit_lift: Params::JUMP_HIT_LIFT,
            jump_lift_transfer: Params::JUMP_LIFT_TRANSFER,
        }
    }
}

/// Power meter and launch velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Seconds of holding needed to reach full power
    pub charge_time: f32,
    pub curve: PowerCurve,
    pub speed_x: f32,
    pub lift: f32,
    /// Max random velocity offset per axis on release
    pub jitter: f32,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            charge_time: Params::SERVE_CHARGE_TIME,
            curve: PowerCurve::Linear,
            speed_x: Params::SERVE_SPEED_X,
            lift: Params::SERVE_LIFT,
            jitter: 0.0,
        }
    }
}

/// AI reaction and decision tuning.
///
/// In TOML the `difficulty` preset supplies every value not given explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "AiSection")]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// Movement intent magnitude while tracking the ball
    pub speed_scale: f32,
    /// Horizontal distance to the ball below which the AI stops chasing
    pub track_deadzone: f32,
    /// Jump when the ball is lower than this far below the AI's head
    pub jump_trigger_height: f32,
    pub jump_trigger_range: f32,
    pub jump_cooldown: f32,
    /// Seconds between ball observations; 0 observes every tick
    pub reaction_time: f32,
    pub home_tolerance: f32,
    pub serve_power_min: f32,
    pub serve_power_max: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            speed_scale: 0.8,
            track_deadzone: 24.0,
            jump_trigger_height: 50.0,
            jump_trigger_range: 100.0,
            jump_cooldown: 0.75,
            reaction_time: 0.1,
            home_tolerance: 10.0,
            serve_power_min: 0.6,
            serve_power_max: 0.9,
        }
    }
}

/// `[ai]` as written in TOML: a preset plus optional per-field overrides
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AiSection {
    difficulty: Difficulty,
    speed_scale: Option<f32>,
    track_deadzone: Option<f32>,
    jump_trigger_height: Option<f32>,
    jump_trigger_range: Option<f32>,
    jump_cooldown: Option<f32>,
    reaction_time: Option<f32>,
    home_tolerance: Option<f32>,
    serve_power_min: Option<f32>,
    serve_power_max: Option<f32>,
}

impl From<AiSection> for AiConfig {
    fn from(section: AiSection) -> Self {
        let preset = section.difficulty.config();
        Self {
            difficulty: section.difficulty,
            speed_scale: section.speed_scale.unwrap_or(preset.speed_scale),
            track_deadzone: section.track_deadzone.unwrap_or(preset.track_deadzone),
            jump_trigger_height: section
                .jump_trigger_height
                .unwrap_or(preset.jump_trigger_height),
            jump_trigger_range: section.jump_trigger_range.unwrap_or(preset.jump_trigger_range),
            jump_cooldown: section.jump_cooldown.unwrap_or(preset.jump_cooldown),
            reaction_time: section.reaction_time.unwrap_or(preset.reaction_time),
            home_tolerance: section.home_tolerance.unwrap_or(preset.home_tolerance),
            serve_power_min: section.serve_power_min.unwrap_or(preset.serve_power_min),
            serve_power_max: section.serve_power_max.unwrap_or(preset.serve_power_max),
        }
    }
}

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub win_score: u8,
    /// Opening server; picked at random when unset
    pub first_server: Option<Side>,
    pub serve_rule: ServeRule,
    /// Seconds between a point and the next serve
    pub point_pause: f32,
    pub fixed_dt: f32,
    pub max_dt: f32,
    pub player_bounds: PlayerBounds,
    pub court: CourtConfig,
    pub physics: PhysicsConfig,
    pub serve: ServeConfig,
    pub ai: AiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            win_score: Params::WIN_SCORE,
            first_server: None,
            serve_rule: ServeRule::Winner,
            point_pause: Params::POINT_PAUSE,
            fixed_dt: Params::FIXED_DT,
            max_dt: Params::MAX_DT,
            player_bounds: PlayerBounds::Half,
            court: CourtConfig::default(),
            physics: PhysicsConfig::default(),
            serve: ServeConfig::default(),
            ai: AiConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from `$VOLLEY_CONFIG` or `config/volley.toml`, falling back
    /// to defaults if the file is missing or rejected.
    pub fn load() -> Self {
        let path = std::env::var("VOLLEY_CONFIG")
            .unwrap_or_else(|_| "config/volley.toml".to_string());
        if !Path::new(&path).exists() {
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load {path}: {e}, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a TOML document; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_score == 0 {
            return Err(ConfigError::invalid("win_score", "must be at least 1"));
        }
        positive("fixed_dt", self.fixed_dt)?;
        positive("max_dt", self.max_dt)?;
        if self.max_dt < self.fixed_dt {
            return Err(ConfigError::invalid("max_dt", "must not be below fixed_dt"));
        }
        non_negative("point_pause", self.point_pause)?;

        let court = &self.court;
        positive("court.width", court.width)?;
        positive("court.height", court.height)?;
        positive("court.ground_y", court.ground_y)?;
        positive("court.net_width", court.net_width)?;
        positive("court.net_height", court.net_height)?;
        if court.ground_y > court.height {
            return Err(ConfigError::invalid("court.ground_y", "ground lies below the court"));
        }
        if court.net_height >= court.ground_y {
            return Err(ConfigError::invalid("court.net_height", "net reaches the ceiling"));
        }
        if court.net_width >= court.width {
            return Err(ConfigError::invalid("court.net_width", "net wider than the court"));
        }

        let physics = &self.physics;
        positive("physics.gravity", physics.gravity)?;
        non_negative("physics.terminal_velocity", physics.terminal_velocity)?;
        positive("physics.max_player_speed", physics.max_player_speed)?;
        positive("physics.player_accel_rate", physics.player_accel_rate)?;
        positive("physics.jump_impulse", physics.jump_impulse)?;
        positive("physics.player_width", physics.player_width)?;
        positive("physics.player_height", physics.player_height)?;
        positive("physics.ball_radius", physics.ball_radius)?;
        unit("physics.wall_restitution", physics.wall_restitution)?;
        unit("physics.net_restitution", physics.net_restitution)?;
        non_negative("physics.hit_spread", physics.hit_spread)?;
        non_negative("physics.momentum_transfer", physics.momentum_transfer)?;
        positive("physics.hit_lift", physics.hit_lift)?;
        positive("physics.jump_hit_lift", physics.jump_hit_lift)?;
        non_negative("physics.jump_lift_transfer", physics.jump_lift_transfer)?;
        let half_court = (court.width - court.net_width) / 2.0;
        if physics.player_width >= half_court {
            return Err(ConfigError::invalid(
                "physics.player_width",
                "player does not fit its half",
            ));
        }
        if physics.player_height >= court.ground_y {
            return Err(ConfigError::invalid(
                "physics.player_height",
                "player taller than the court",
            ));
        }
        if physics.ball_radius * 2.0 >= court.ground_y {
            return Err(ConfigError::invalid(
                "physics.ball_radius",
                "ball does not fit above the ground",
            ));
        }
        // The ball hangs at a third of the court height before each serve
        if court.height / 3.0 + physics.ball_radius >= court.ground_y {
            return Err(ConfigError::invalid(
                "court.ground_y",
                "serve spot must sit above the ground",
            ));
        }

        let serve = &self.serve;
        positive("serve.charge_time", serve.charge_time)?;
        positive("serve.speed_x", serve.speed_x)?;
        positive("serve.lift", serve.lift)?;
        non_negative("serve.jitter", serve.jitter)?;

        validate_ai("ai", &self.ai)
    }
}

pub(crate) fn validate_ai(field: &'static str, ai: &AiConfig) -> Result<(), ConfigError> {
    let checks: [(&'static str, f32); 6] = [
        ("speed_scale", ai.speed_scale),
        ("track_deadzone", ai.track_deadzone),
        ("jump_trigger_range", ai.jump_trigger_range),
        ("jump_cooldown", ai.jump_cooldown),
        ("reaction_time", ai.reaction_time),
        ("home_tolerance", ai.home_tolerance),
    ];
    for (name, value) in checks {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::invalid(
                field,
                format!("{name} must be a non-negative number, got {value}"),
            ));
        }
    }
    if !ai.jump_trigger_height.is_finite() {
        return Err(ConfigError::invalid(field, "jump_trigger_height must be finite"));
    }
    if !(0.0..=1.0).contains(&ai.serve_power_min)
        || !(0.0..=1.0).contains(&ai.serve_power_max)
        || ai.serve_power_min > ai.serve_power_max
    {
        return Err(ConfigError::invalid(
            field,
            format!(
                "serve power range {}..{} must be ordered within [0, 1]",
                ai.serve_power_min, ai.serve_power_max
            ),
        ));
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must not be negative, got {value}")))
    }
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be within [0, 1], got {value}")))
    }
}
