/// Game tuning parameters for volleyball.
///
/// Distances are screen pixels (y grows downward), times are seconds.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Court
    pub const COURT_WIDTH: f32 = 800.0;
    pub const COURT_HEIGHT: f32 = 600.0;
    pub const GROUND_Y: f32 = 520.0;
    pub const NET_WIDTH: f32 = 10.0;
    pub const NET_HEIGHT: f32 = 150.0;

    // Player
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    pub const MAX_PLAYER_SPEED: f32 = 480.0;
    pub const PLAYER_ACCEL_RATE: f32 = 10.0; // 1/s, exponential blend toward target speed
    pub const PLAYER_STOP_SPEED: f32 = 1.0; // below this with no input the player stops
    pub const JUMP_IMPULSE: f32 = 720.0;

    // Ball
    pub const BALL_RADIUS: f32 = 15.0;
    pub const GRAVITY: f32 = 1800.0;
    pub const TERMINAL_VELOCITY: f32 = 0.0; // 0 = uncapped
    pub const WALL_RESTITUTION: f32 = 0.9;
    pub const NET_RESTITUTION: f32 = 0.9;

    // Hits
    pub const HIT_SPREAD: f32 = 420.0;
    pub const MOMENTUM_TRANSFER: f32 = 0.6;
    pub const HIT_LIFT: f32 = 540.0;
    pub const JUMP_HIT_LIFT: f32 = 660.0;
    pub const JUMP_LIFT_TRANSFER: f32 = 0.3;

    // Serve
    pub const SERVE_CHARGE_TIME: f32 = 0.8333; // 50 frames at 60 Hz
    pub const SERVE_SPEED_X: f32 = 240.0;
    pub const SERVE_LIFT: f32 = 420.0;

    // Score
    pub const WIN_SCORE: u8 = 5; // First to 5 wins
    pub const POINT_PAUSE: f32 = 1.0;

    // Physics
    pub const FIXED_DT: f32 = 1.0 / 60.0; // 60 Hz
    pub const MAX_DT: f32 = 0.1; // Clamp to prevent large jumps
}
