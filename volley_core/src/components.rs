use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::map::Aabb;

/// Court half a player defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Unit x direction pointing at the opponent's half
    pub fn toward_opponent(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Player component - one dog per side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub side: Side,
    pub pos: Vec2, // Feet: x = horizontal center, y = bottom edge
    pub vel: Vec2,
    pub grounded: bool,
    pub is_ai: bool,
}

impl Player {
    pub fn new(side: Side, pos: Vec2, is_ai: bool) -> Self {
        Self {
            side,
            pos,
            vel: Vec2::ZERO,
            grounded: true,
            is_ai,
        }
    }

    /// Bounding box rising from the feet
    pub fn bounds(&self, width: f32, height: f32) -> Aabb {
        Aabb::new(
            Vec2::new(self.pos.x - width / 2.0, self.pos.y - height),
            Vec2::new(self.pos.x + width / 2.0, self.pos.y),
        )
    }

    pub fn top(&self, height: f32) -> f32 {
        self.pos.y - height
    }
}

/// Ball component - the volleyball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub prev_pos: Vec2, // Position before the last integration
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            prev_pos: pos,
            radius,
        }
    }

    /// Park the ball at a serve spot with no velocity
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.prev_pos = pos;
        self.vel = Vec2::ZERO;
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Per-tick control intent for a player
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerIntent {
    pub move_dir: f32, // -1 = left, 0 = stop, 1 = right
    pub jump: bool,
    pub serve: bool, // Serve button held
}

impl PlayerIntent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moving(move_dir: f32) -> Self {
        Self {
            move_dir,
            ..Self::default()
        }
    }

    /// Clamp movement into [-1, 1]; non-finite input means no movement
    pub fn sanitized(self) -> Self {
        let move_dir = if self.move_dir.is_finite() {
            self.move_dir.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        Self { move_dir, ..self }
    }
}
