//! Escort ring orbiting the boss centre.
//!
//! Escorts share one orbit angle and are spaced evenly around the circle, so
//! the formation stays balanced as escorts are destroyed. The slot layout is
//! recomputed from the live count every tick.

use glam::DVec2;
use std::f64::consts::TAU;

/// Evenly spaces a variable number of escorts on a circle around a centre
/// point.
#[derive(Debug, Clone)]
pub struct EscortRing {
    radius: f64,
    angular_speed: f64,
    angle_offset: f64,
}

impl EscortRing {
    /// Creates a ring with a fixed orbit radius and angular speed in radians
    /// per tick.
    #[must_use]
    pub const fn new(radius: f64, angular_speed: f64) -> Self {
        Self {
            radius,
            angular_speed,
            angle_offset: 0.0,
        }
    }

    /// Advances the shared orbit angle by one tick.
    pub fn advance(&mut self) {
        self.angle_offset = (self.angle_offset + self.angular_speed) % TAU;
    }

    /// Current shared orbit angle.
    #[must_use]
    pub const fn angle_offset(&self) -> f64 {
        self.angle_offset
    }

    /// Orbit positions for `count` escorts around `centre`.
    ///
    /// Returns an empty vector for a count of zero; the spacing step is only
    /// computed for a live formation.
    #[expect(
        clippy::cast_precision_loss,
        reason = "Escort counts are tiny; f64 represents them exactly."
    )]
    #[must_use]
    pub fn slots(&self, centre: DVec2, count: usize) -> Vec<DVec2> {
        if count == 0 {
            return Vec::new();
        }
        let step = TAU / count as f64;
        (0..count)
            .map(|slot| {
                let angle = self.angle_offset + slot as f64 * step;
                centre + DVec2::from_angle(angle) * self.radius
            })
            .collect()
    }
}
