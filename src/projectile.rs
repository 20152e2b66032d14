//! Projectile value records and the pool that owns them after emission.
//!
//! The controller only ever *produces* projectiles; once absorbed by the
//! [`ProjectilePool`] it never touches them again. The pool owns steering,
//! integration, ageing and removal, so nothing mutates a collection it is
//! iterating over.

use glam::DVec2;
use serde::Serialize;
use std::f64::consts::TAU;

use crate::geometry::{bearing, wrap_angle, Rect};

/// What fired the projectile; the renderer picks sprites off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProjectileKind {
    /// Aimed spread bullet from a phase A salvo.
    Volley,
    /// Slow ring bullet fired during the phase B windup.
    Ring,
    /// Homing shot from phase C.
    Homing,
    /// Scatter burst bullet from the end of a phase B dash.
    Scatter,
}

/// A single shot emitted by the boss.
///
/// Value-like: the controller constructs one, hands it off, and retains no
/// ownership. Position advances along `angle` at `speed` units per tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projectile {
    /// Sprite/behaviour class of the shot.
    pub kind: ProjectileKind,
    /// World-space position.
    pub position: DVec2,
    /// Heading in radians (`atan2` convention).
    pub angle: f64,
    /// Distance travelled per tick.
    pub speed: f64,
    /// Homing turn strength; `None` for straight-flying shots.
    pub homing_strength: Option<f64>,
    /// Remaining lifetime in ticks; `None` lives until it leaves the field.
    pub lifetime: Option<u32>,
}

impl Projectile {
    /// Creates a straight-flying shot.
    #[must_use]
    pub const fn straight(kind: ProjectileKind, position: DVec2, angle: f64, speed: f64) -> Self {
        Self {
            kind,
            position,
            angle,
            speed,
            homing_strength: None,
            lifetime: None,
        }
    }

    /// Creates a homing shot that steers towards the player each tick.
    #[must_use]
    pub const fn homing(position: DVec2, angle: f64, speed: f64, strength: f64) -> Self {
        Self {
            kind: ProjectileKind::Homing,
            position,
            angle,
            speed,
            homing_strength: Some(strength),
            lifetime: None,
        }
    }

    /// Gives the shot a bounded lifetime in ticks.
    #[must_use]
    pub const fn with_lifetime(mut self, ticks: u32) -> Self {
        self.lifetime = Some(ticks);
        self
    }

    /// Current velocity vector.
    #[must_use]
    pub fn velocity(&self) -> DVec2 {
        DVec2::new(self.angle.cos(), self.angle.sin()) * self.speed
    }

    /// Steers the heading towards `target` without teleporting.
    ///
    /// The correction is proportional to the bearing error scaled by the
    /// homing strength, then clamped to `strength * 2π * dt` radians so a
    /// stronger shot turns faster but never snaps onto the target.
    pub fn steer_towards(&mut self, target: DVec2, dt_seconds: f64) {
        let Some(strength) = self.homing_strength else {
            return;
        };
        let error = wrap_angle(bearing(self.position, target) - self.angle);
        let max_turn = strength * TAU * dt_seconds;
        let turn = (error * strength).clamp(-max_turn, max_turn);
        self.angle = wrap_angle(self.angle + turn);
    }

    /// Advances one tick: integrates position and ages the lifetime.
    /// Returns `false` once the lifetime is spent.
    fn advance(&mut self) -> bool {
        self.position += self.velocity();
        match self.lifetime.as_mut() {
            Some(0) => false,
            Some(remaining) => {
                *remaining -= 1;
                *remaining > 0
            }
            None => true,
        }
    }
}

/// Owns emitted projectiles: steering, integration, ageing and culling.
#[derive(Debug, Default)]
pub struct ProjectilePool {
    shots: Vec<Projectile>,
}

impl ProjectilePool {
    /// Takes ownership of every shot the controller emitted this tick.
    pub fn absorb(&mut self, emitted: &mut Vec<Projectile>) {
        self.shots.append(emitted);
    }

    /// Advances every live shot one tick and culls the dead ones.
    ///
    /// Homing shots steer towards the player centre when a hitbox is
    /// available and fly straight otherwise. Shots are removed when their
    /// lifetime expires or they leave `bounds`.
    pub fn tick(&mut self, player: Option<Rect>, bounds: Rect, dt_seconds: f64) {
        let target = player.map(|hitbox| hitbox.center());
        self.shots.retain_mut(|shot| {
            if let Some(target) = target {
                shot.steer_towards(target, dt_seconds);
            }
            shot.advance() && bounds.contains(shot.position)
        });
    }

    /// Live shots, in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.shots.iter()
    }

    /// Number of live shots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shots.len()
    }

    /// Whether the pool holds no live shots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }
}
