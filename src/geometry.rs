//! Rectangle and bearing helpers shared by the encounter core.
//! Small glam-backed utilities for aiming and playfield clamping.

use glam::DVec2;
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Aim angle used when no player hitbox is available: straight down the
/// screen (y grows downward, so this is +π/2).
pub const AIM_STRAIGHT_DOWN: f64 = FRAC_PI_2;

/// Axis-aligned rectangle in playfield coordinates.
///
/// Used both for the boss body and for the player hitbox handed in by the
/// host loop each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Centre point of the rectangle.
    #[must_use]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether `point` lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Clamps the top-left corner of a `width` × `height` body so the body
    /// lies fully inside this rectangle.
    ///
    /// Bodies larger than the rectangle collapse onto its origin;
    /// configuration validation rejects those before they reach the
    /// controller.
    #[must_use]
    pub fn clamp_body(&self, top_left: DVec2, width: f64, height: f64) -> DVec2 {
        DVec2::new(
            top_left.x.clamp(self.x, (self.right() - width).max(self.x)),
            top_left.y.clamp(self.y, (self.bottom() - height).max(self.y)),
        )
    }
}

/// Normalises an angle into the half-open interval `(-π, π]`.
///
/// # Examples
///
/// ```
/// use bossfight::geometry::wrap_angle;
/// use std::f64::consts::PI;
/// let wrapped = wrap_angle(3.0 * PI);
/// assert!((wrapped - PI).abs() < 1e-12);
/// ```
#[must_use]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Bearing from `from` to `to`, measured like `atan2`: 0 along +x, positive
/// towards +y (downward on screen).
///
/// Returns [`AIM_STRAIGHT_DOWN`] when the points coincide so callers never
/// see a NaN bearing.
#[must_use]
pub fn bearing(from: DVec2, to: DVec2) -> f64 {
    let delta = to - from;
    if delta == DVec2::ZERO {
        return AIM_STRAIGHT_DOWN;
    }
    delta.y.atan2(delta.x)
}
