//! Playfield and boss tuning configuration.
//!
//! Tuning is authored as ratios of the playfield size and durations in
//! seconds. The ratios live in [`BossTuning`], are resolved exactly once
//! against a [`PlayfieldConfig`], and the controller only ever sees absolute
//! units and whole tick counts. Phase timing therefore stays correct at any
//! tick rate, which the difficulty curve depends on.

use glam::DVec2;
use serde::Serialize;
use thiserror::Error;

use crate::numeric::ticks_from_secs;

/// Dimensions and tick rate of the simulation space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayfieldConfig {
    /// Playfield width in world units.
    pub width: f64,
    /// Playfield height in world units.
    pub height: f64,
    /// Simulation ticks per second.
    pub tick_rate: u32,
}

impl PlayfieldConfig {
    /// The 800×600, 60 tick/s playfield the tuning ratios were authored
    /// against.
    #[must_use]
    pub const fn reference() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            tick_rate: 60,
        }
    }
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self::reference()
    }
}

/// Error raised when a configuration cannot be resolved into absolute units.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Playfield width or height was zero or negative.
    #[error("playfield dimensions must be positive, got {width}x{height}")]
    InvalidPlayfield {
        /// Offending width.
        width: f64,
        /// Offending height.
        height: f64,
    },
    /// A zero tick rate would make every duration infinite.
    #[error("tick rate must be non-zero")]
    ZeroTickRate,
    /// The boss body cannot move inside the playfield at all.
    #[error("boss body {width}x{height} does not fit the playfield")]
    BossTooLarge {
        /// Resolved boss width.
        width: f64,
        /// Resolved boss height.
        height: f64,
    },
}

/// Ratio-based boss tuning.
///
/// Distances are fractions of playfield width or height, durations are
/// seconds, and angular speeds are radians per tick. `Default` carries the
/// values the encounter shipped with.
#[derive(Debug, Clone, Serialize)]
pub struct BossTuning {
    /// Boss body size as (width fraction of W, height fraction of H).
    pub body_size_ratio: (f64, f64),
    /// Spawn height as a fraction of H; the boss spawns centred horizontally.
    pub spawn_y_ratio: f64,
    /// Hit points at full health.
    pub max_health: f64,
    /// Patrol speed, fraction of W per tick.
    pub patrol_speed_ratio: f64,
    /// Horizontal patrol margin, fraction of W.
    pub boundary_margin_ratio: f64,
    /// Vertical bob amplitude, fraction of H.
    pub bob_amplitude_ratio: f64,
    /// Vertical bob angular speed, radians per tick.
    pub bob_speed: f64,
    /// Vertical clamp margin for the bob, fraction of H.
    pub vertical_margin_ratio: f64,
    /// Muzzle offset above the body's bottom edge, fraction of H.
    pub muzzle_offset_ratio: f64,

    /// Phase A: seconds between volleys.
    pub volley_interval_secs: f64,
    /// Phase A: seconds of breather after each volley.
    pub volley_delay_secs: f64,
    /// Phase A: salvos fired before escalating to phase B.
    pub salvos_per_round: u32,
    /// Phase A: volley bullet speed, fraction of W per tick.
    pub volley_speed_ratio: f64,

    /// Phase B: windup duration in seconds.
    pub windup_secs: f64,
    /// Phase B: seconds between windup rings.
    pub ring_interval_secs: f64,
    /// Phase B: bullets per windup ring.
    pub ring_bullet_count: u32,
    /// Phase B: ring bullet speed, fraction of W per tick.
    pub ring_speed_ratio: f64,
    /// Phase B: dash speed, fraction of W per tick.
    pub dash_speed_ratio: f64,
    /// Phase B: lowest point a dash may reach, fraction of H.
    pub dash_floor_ratio: f64,
    /// Phase B: fallback dash target depth above the floor, fraction of H.
    pub dash_fallback_depth_ratio: f64,
    /// Phase B: scatter burst size.
    pub scatter_count: u32,
    /// Phase B: scatter bullet speed, fraction of W per tick.
    pub scatter_speed_ratio: f64,
    /// Phase B: scatter bullet lifetime in seconds.
    pub scatter_lifetime_secs: f64,
    /// Phase B: dashes performed before escalating to phase C.
    pub dashes_per_cycle: u32,
    /// Phase B: post-scatter cooldown in seconds.
    pub dash_cooldown_secs: f64,

    /// Phase C: seconds between homing shots.
    pub homing_interval_secs: f64,
    /// Phase C: homing shots fired before cycling back to phase A.
    pub shots_per_cycle: u32,
    /// Phase C: homing turn strength (fraction of a full turn per second).
    pub homing_strength: f64,
    /// Phase C: homing bullet speed, fraction of W per tick.
    pub homing_speed_ratio: f64,
    /// Phase C: seconds between lateral drift reversals.
    pub drift_flip_secs: f64,

    /// Seconds a phase transition telegraph lasts.
    pub transition_secs: f64,
    /// Seconds the hit flash stays lit after taking damage.
    pub flash_secs: f64,

    /// Health fraction at or below which the boss enrages.
    pub enrage_threshold: f64,
    /// Enraged shoot-interval multiplier (below one fires faster).
    pub enrage_interval_mult: f64,
    /// Enraged dash-speed multiplier.
    pub enrage_dash_mult: f64,
    /// Enraged homing-bullet-speed multiplier.
    pub enrage_speed_mult: f64,
    /// Enraged homing-strength multiplier.
    pub enrage_strength_mult: f64,

    /// Escort orbit radius, fraction of W.
    pub escort_radius_ratio: f64,
    /// Escort orbit angular speed, radians per tick.
    pub escort_speed: f64,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            body_size_ratio: (0.15, 0.1667),
            spawn_y_ratio: 0.0833,
            max_health: 300.0,
            patrol_speed_ratio: 0.001_875,
            boundary_margin_ratio: 0.025,
            bob_amplitude_ratio: 0.0166,
            bob_speed: 0.03,
            vertical_margin_ratio: 0.0166,
            muzzle_offset_ratio: 0.0166,
            volley_interval_secs: 1.5,
            volley_delay_secs: 0.5,
            salvos_per_round: 2,
            volley_speed_ratio: 0.005,
            windup_secs: 0.7,
            ring_interval_secs: 0.5,
            ring_bullet_count: 8,
            ring_speed_ratio: 0.003_125,
            dash_speed_ratio: 0.01,
            dash_floor_ratio: 0.95,
            dash_fallback_depth_ratio: 0.0833,
            scatter_count: 4,
            scatter_speed_ratio: 0.005,
            scatter_lifetime_secs: 2.5,
            dashes_per_cycle: 2,
            dash_cooldown_secs: 1.0,
            homing_interval_secs: 1.0,
            shots_per_cycle: 3,
            homing_strength: 0.025,
            homing_speed_ratio: 0.0035,
            drift_flip_secs: 1.5,
            transition_secs: 0.5,
            flash_secs: 0.133,
            enrage_threshold: 0.5,
            enrage_interval_mult: 0.7,
            enrage_dash_mult: 1.25,
            enrage_speed_mult: 1.2,
            enrage_strength_mult: 1.2,
            escort_radius_ratio: 0.1,
            escort_speed: 0.02,
        }
    }
}

/// Fully resolved encounter parameters.
///
/// Every distance is in world units, every speed in units per tick, and
/// every duration a whole tick count. Built once via
/// [`EncounterParams::resolve`] and then treated as read-only by the
/// controller.
#[derive(Debug, Clone, Serialize)]
pub struct EncounterParams {
    /// The playfield this configuration was resolved against.
    pub playfield: PlayfieldConfig,
    /// Boss body width.
    pub boss_width: f64,
    /// Boss body height.
    pub boss_height: f64,
    /// Spawn position (top-left corner).
    pub spawn_position: DVec2,
    /// Hit points at full health.
    pub max_health: f64,
    /// Patrol speed per tick.
    pub patrol_speed: f64,
    /// Horizontal patrol margin.
    pub boundary_margin: f64,
    /// Vertical bob amplitude.
    pub bob_amplitude: f64,
    /// Vertical bob angular speed, radians per tick.
    pub bob_speed: f64,
    /// Vertical clamp margin for the bob.
    pub vertical_margin: f64,
    /// Muzzle offset above the body's bottom edge.
    pub muzzle_offset: f64,
    /// Phase A: ticks between volleys.
    pub volley_interval_ticks: u32,
    /// Phase A: breather ticks after each volley.
    pub volley_delay_ticks: u32,
    /// Phase A: salvos fired before escalating to phase B.
    pub salvos_per_round: u32,
    /// Phase A: volley bullet speed per tick.
    pub volley_speed: f64,
    /// Phase B: windup duration in ticks.
    pub windup_ticks: u32,
    /// Phase B: ticks between windup rings.
    pub ring_interval_ticks: u32,
    /// Phase B: bullets per windup ring.
    pub ring_bullet_count: u32,
    /// Phase B: ring bullet speed per tick.
    pub ring_speed: f64,
    /// Phase B: base dash speed per tick.
    pub dash_speed: f64,
    /// Phase B: lowest point a dash may reach.
    pub dash_floor_y: f64,
    /// Phase B: dash target used when no player hitbox is available.
    pub dash_fallback_target: DVec2,
    /// Phase B: scatter burst size.
    pub scatter_count: u32,
    /// Phase B: scatter bullet speed per tick.
    pub scatter_speed: f64,
    /// Phase B: scatter bullet lifetime in ticks.
    pub scatter_lifetime_ticks: u32,
    /// Phase B: dashes performed before escalating to phase C.
    pub dashes_per_cycle: u32,
    /// Phase B: post-scatter cooldown in ticks.
    pub dash_cooldown_ticks: u32,
    /// Phase C: ticks between homing shots.
    pub homing_interval_ticks: u32,
    /// Phase C: homing shots fired before cycling back to phase A.
    pub shots_per_cycle: u32,
    /// Phase C: base homing turn strength.
    pub homing_strength: f64,
    /// Phase C: base homing bullet speed per tick.
    pub homing_speed: f64,
    /// Phase C: ticks between lateral drift reversals.
    pub drift_flip_ticks: u32,
    /// Ticks a phase transition telegraph lasts.
    pub transition_ticks: u32,
    /// Ticks the hit flash stays lit.
    pub flash_ticks: u32,
    /// Health fraction at or below which the boss enrages.
    pub enrage_threshold: f64,
    /// Enraged shoot-interval multiplier.
    pub enrage_interval_mult: f64,
    /// Enraged dash-speed multiplier.
    pub enrage_dash_mult: f64,
    /// Enraged homing-bullet-speed multiplier.
    pub enrage_speed_mult: f64,
    /// Enraged homing-strength multiplier.
    pub enrage_strength_mult: f64,
    /// Escort orbit radius.
    pub escort_radius: f64,
    /// Escort orbit angular speed, radians per tick.
    pub escort_speed: f64,
}

impl EncounterParams {
    /// Resolves ratios and second-based durations into absolute units.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the playfield dimensions are not
    /// positive, the tick rate is zero, or the resolved boss body cannot fit
    /// inside the playfield.
    pub fn resolve(playfield: &PlayfieldConfig, tuning: &BossTuning) -> Result<Self, ConfigError> {
        if playfield.width <= 0.0 || playfield.height <= 0.0 {
            return Err(ConfigError::InvalidPlayfield {
                width: playfield.width,
                height: playfield.height,
            });
        }
        if playfield.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        let width = playfield.width;
        let height = playfield.height;
        let rate = playfield.tick_rate;

        let boss_width = width * tuning.body_size_ratio.0;
        let boss_height = height * tuning.body_size_ratio.1;
        if boss_width > width || boss_height > height {
            return Err(ConfigError::BossTooLarge {
                width: boss_width,
                height: boss_height,
            });
        }

        Ok(Self {
            playfield: *playfield,
            boss_width,
            boss_height,
            spawn_position: DVec2::new(
                (width - boss_width) / 2.0,
                height * tuning.spawn_y_ratio,
            ),
            max_health: tuning.max_health,
            patrol_speed: width * tuning.patrol_speed_ratio,
            boundary_margin: width * tuning.boundary_margin_ratio,
            bob_amplitude: height * tuning.bob_amplitude_ratio,
            bob_speed: tuning.bob_speed,
            vertical_margin: height * tuning.vertical_margin_ratio,
            muzzle_offset: height * tuning.muzzle_offset_ratio,
            volley_interval_ticks: ticks_from_secs(rate, tuning.volley_interval_secs),
            volley_delay_ticks: ticks_from_secs(rate, tuning.volley_delay_secs),
            salvos_per_round: tuning.salvos_per_round,
            volley_speed: width * tuning.volley_speed_ratio,
            windup_ticks: ticks_from_secs(rate, tuning.windup_secs),
            ring_interval_ticks: ticks_from_secs(rate, tuning.ring_interval_secs),
            ring_bullet_count: tuning.ring_bullet_count,
            ring_speed: width * tuning.ring_speed_ratio,
            dash_speed: width * tuning.dash_speed_ratio,
            dash_floor_y: height * tuning.dash_floor_ratio,
            dash_fallback_target: DVec2::new(
                width / 2.0,
                height - height * tuning.dash_fallback_depth_ratio,
            ),
            scatter_count: tuning.scatter_count,
            scatter_speed: width * tuning.scatter_speed_ratio,
            scatter_lifetime_ticks: ticks_from_secs(rate, tuning.scatter_lifetime_secs),
            dashes_per_cycle: tuning.dashes_per_cycle,
            dash_cooldown_ticks: ticks_from_secs(rate, tuning.dash_cooldown_secs),
            homing_interval_ticks: ticks_from_secs(rate, tuning.homing_interval_secs),
            shots_per_cycle: tuning.shots_per_cycle,
            homing_strength: tuning.homing_strength,
            homing_speed: width * tuning.homing_speed_ratio,
            drift_flip_ticks: ticks_from_secs(rate, tuning.drift_flip_secs),
            transition_ticks: ticks_from_secs(rate, tuning.transition_secs),
            flash_ticks: ticks_from_secs(rate, tuning.flash_secs),
            enrage_threshold: tuning.enrage_threshold,
            enrage_interval_mult: tuning.enrage_interval_mult,
            enrage_dash_mult: tuning.enrage_dash_mult,
            enrage_speed_mult: tuning.enrage_speed_mult,
            enrage_strength_mult: tuning.enrage_strength_mult,
            escort_radius: width * tuning.escort_radius_ratio,
            escort_speed: tuning.escort_speed,
        })
    }

    /// Duration of one tick in seconds.
    #[must_use]
    pub fn tick_seconds(&self) -> f64 {
        1.0 / f64::from(self.playfield.tick_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_params() -> EncounterParams {
        match EncounterParams::resolve(&PlayfieldConfig::reference(), &BossTuning::default()) {
            Ok(params) => params,
            Err(err) => panic!("reference configuration must resolve: {err}"),
        }
    }

    #[test]
    fn reference_durations_resolve_to_ticks() {
        let params = reference_params();
        assert_eq!(params.volley_interval_ticks, 90);
        assert_eq!(params.volley_delay_ticks, 30);
        assert_eq!(params.windup_ticks, 42);
        assert_eq!(params.dash_cooldown_ticks, 60);
        assert_eq!(params.homing_interval_ticks, 60);
        assert_eq!(params.transition_ticks, 30);
        assert_eq!(params.scatter_lifetime_ticks, 150);
    }

    #[test]
    fn reference_distances_resolve_to_absolute_units() {
        let params = reference_params();
        assert_relative_eq!(params.patrol_speed, 1.5);
        assert_relative_eq!(params.dash_speed, 8.0);
        assert_relative_eq!(params.volley_speed, 4.0);
        assert_relative_eq!(params.homing_speed, 2.8);
        assert_relative_eq!(params.boundary_margin, 20.0);
        assert_relative_eq!(params.escort_radius, 80.0);
        assert_relative_eq!(params.dash_floor_y, 570.0);
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let playfield = PlayfieldConfig {
            tick_rate: 0,
            ..PlayfieldConfig::reference()
        };
        let result = EncounterParams::resolve(&playfield, &BossTuning::default());
        assert_eq!(result.err(), Some(ConfigError::ZeroTickRate));
    }

    #[test]
    fn degenerate_playfield_is_rejected() {
        let playfield = PlayfieldConfig {
            width: 0.0,
            height: -10.0,
            tick_rate: 60,
        };
        let result = EncounterParams::resolve(&playfield, &BossTuning::default());
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPlayfield { .. })
        ));
    }

    #[test]
    fn oversized_boss_is_rejected() {
        let tuning = BossTuning {
            body_size_ratio: (1.5, 0.2),
            ..BossTuning::default()
        };
        let result = EncounterParams::resolve(&PlayfieldConfig::reference(), &tuning);
        assert!(matches!(result, Err(ConfigError::BossTooLarge { .. })));
    }
}
