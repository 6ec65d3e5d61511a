use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::Side;
use crate::config::{CourtConfig, PlayerBounds};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if circle intersects AABB
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = Vec2::new(
            center.x.clamp(self.min.x, self.max.x),
            center.y.clamp(self.min.y, self.max.y),
        );
        (center - closest).length_squared() <= radius * radius
    }
}

/// Immutable court geometry, built once per match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub width: f32,
    pub height: f32,
    pub ground_y: f32,
    pub net_x: f32, // Net center line
    pub net_width: f32,
    pub net_height: f32,
}

impl Court {
    pub fn new(config: &CourtConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            ground_y: config.ground_y,
            net_x: config.width / 2.0,
            net_width: config.net_width,
            net_height: config.net_height,
        }
    }

    pub fn net_top(&self) -> f32 {
        self.ground_y - self.net_height
    }

    pub fn net_bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.net_x - self.net_width / 2.0, self.net_top()),
            Vec2::new(self.net_x + self.net_width / 2.0, self.ground_y),
        )
    }

    /// Which half an x coordinate belongs to (the net line counts as right)
    pub fn side_of(&self, x: f32) -> Side {
        if x < self.net_x {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Allowed range for a player's center x
    pub fn player_range(&self, side: Side, bounds: PlayerBounds, player_width: f32) -> (f32, f32) {
        let half = player_width / 2.0;
        match (bounds, side) {
            (PlayerBounds::FullCourt, _) => (half, self.width - half),
            (PlayerBounds::Half, Side::Left) => (half, self.net_x - self.net_width / 2.0 - half),
            (PlayerBounds::Half, Side::Right) => {
                (self.net_x + self.net_width / 2.0 + half, self.width - half)
            }
        }
    }

    /// Center of a side's half, used for spawning and as the AI home spot
    pub fn home_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.width / 4.0,
            Side::Right => self.width * 3.0 / 4.0,
        }
    }

    /// Player feet position at the start of a match
    pub fn spawn_pos(&self, side: Side) -> Vec2 {
        Vec2::new(self.home_x(side), self.ground_y)
    }

    /// Where the ball hangs before a serve
    pub fn serve_spot(&self, server: Side) -> Vec2 {
        Vec2::new(self.home_x(server), self.height / 3.0)
    }
}

impl Default for Court {
    fn default() -> Self {
        Self::new(&CourtConfig::default())
    }
}
