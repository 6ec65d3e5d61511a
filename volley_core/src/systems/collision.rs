use glam::Vec2;
use hecs::World;

use crate::{Ball, Config, Court, Events, GameEvent, Player, Side};

/// Resolve ball contacts in fixed order: net, players (left then right),
/// floor, walls. Returns the side whose floor the ball touched; once that
/// happens the wall check is skipped for this tick.
pub fn check_collisions(
    world: &mut World,
    court: &Court,
    config: &Config,
    events: &mut Events,
) -> Option<Side> {
    // Collect ball and player data without holding borrows
    let ball_data = {
        let mut ball_query = world.query::<&Ball>();
        ball_query.iter().next().map(|(e, ball)| (e, *ball))
    };
    let (ball_entity, mut ball) = ball_data?;

    let mut players: Vec<Player> = world.query::<&Player>().iter().map(|(_e, p)| *p).collect();
    players.sort_by_key(|p| p.side == Side::Right);

    if check_net(&mut ball, court, config) {
        events.push(GameEvent::BallHitNet);
    }

    for player in &players {
        if check_player(&mut ball, player, config) {
            events.push(GameEvent::BallHitPlayer { side: player.side });
            break;
        }
    }

    let conceded = check_floor(&mut ball, court);
    if conceded.is_none() && check_walls(&mut ball, court, config) {
        events.push(GameEvent::BallHitWall);
    }

    if let Ok(mut stored) = world.get::<&mut Ball>(ball_entity) {
        *stored = ball;
    }

    conceded
}

/// Bounce the ball off the net. A ball passing fully above the net top is
/// left alone; the point never ends on a net touch.
fn check_net(ball: &mut Ball, court: &Court, config: &Config) -> bool {
    let net = court.net_bounds();
    let radius = ball.radius;
    let came_from = court.side_of(ball.prev_pos.x);

    let touching = net.intersects_circle(ball.pos, radius);
    // Fast balls can skip the thin net between two ticks
    let tunnelled = came_from != court.side_of(ball.pos.x) && ball.bottom() > net.min.y;
    if !touching && !tunnelled {
        return false;
    }

    let overlap_x = (ball.pos.x + radius - net.min.x).min(net.max.x - (ball.pos.x - radius));
    let overlap_y = (ball.pos.y + radius - net.min.y).min(net.max.y - (ball.pos.y - radius));
    let restitution = config.physics.net_restitution;

    if !tunnelled && ball.pos.y < net.min.y && overlap_y <= overlap_x {
        // Landed on the net top
        ball.vel.y = -ball.vel.y.abs() * restitution;
        ball.pos.y = net.min.y - radius;
    } else {
        // Hit the net face, bounce back toward where the ball came from
        let speed = ball.vel.x.abs() * restitution;
        match came_from {
            Side::Left => {
                ball.vel.x = -speed;
                ball.pos.x = net.min.x - radius;
            }
            Side::Right => {
                ball.vel.x = speed;
                ball.pos.x = net.max.x + radius;
            }
        }
    }
    true
}

/// Redirect the ball off a player. Where it lands on the player steers it
/// sideways; the player's motion adds momentum and a jump adds lift.
fn check_player(ball: &mut Ball, player: &Player, config: &Config) -> bool {
    let physics = &config.physics;
    let bounds = player.bounds(physics.player_width, physics.player_height);
    if !bounds.intersects_circle(ball.pos, ball.radius) {
        return false;
    }

    let half_width = physics.player_width / 2.0;
    let hit = ((ball.pos.x - player.pos.x) / half_width).clamp(-1.0, 1.0);
    let vx = hit * physics.hit_spread + player.vel.x * physics.momentum_transfer;
    let vy = if player.vel.y < 0.0 {
        -(physics.jump_hit_lift + player.vel.y.abs() * physics.jump_lift_transfer)
    } else {
        -physics.hit_lift
    };
    ball.vel = Vec2::new(vx, vy);

    // Lift the ball clear of the player's head
    ball.pos.y = bounds.min.y - ball.radius - 1.0;
    true
}

/// Floor contact ends the point against the side the ball landed on. The wall
/// check is skipped after this, so the ball is also kept between the walls.
fn check_floor(ball: &mut Ball, court: &Court) -> Option<Side> {
    if ball.bottom() < court.ground_y {
        return None;
    }
    ball.pos.x = ball.pos.x.clamp(ball.radius, court.width - ball.radius);
    ball.pos.y = court.ground_y - ball.radius;
    ball.vel.y = 0.0;
    Some(court.side_of(ball.pos.x))
}

/// Bounce off the outer walls and the ceiling
fn check_walls(ball: &mut Ball, court: &Court, config: &Config) -> bool {
    let radius = ball.radius;
    let restitution = config.physics.wall_restitution;
    let mut hit = false;

    if ball.pos.x - radius <= 0.0 {
        ball.pos.x = radius;
        ball.vel.x = ball.vel.x.abs() * restitution;
        hit = true;
    } else if ball.pos.x + radius >= court.width {
        ball.pos.x = court.width - radius;
        ball.vel.x = -ball.vel.x.abs() * restitution;
        hit = true;
    }

    if ball.pos.y - radius <= 0.0 {
        ball.pos.y = radius;
        ball.vel.y = ball.vel.y.abs() * restitution;
        hit = true;
    }

    hit
}
