//! Frame events emitted by the encounter controller.
//!
//! The controller queues events as it mutates state; the host loop drains
//! them once per frame and reacts (score, audio cues, particle bursts)
//! without the controller knowing any of those systems exist.

use glam::DVec2;
use serde::Serialize;

use crate::phase::MainPhase;

/// Something observable happened during a tick or a damage call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FrameEvent {
    /// The boss took damage. `impact` is the hit location when the damage
    /// source knows it, for cosmetic feedback at the right spot.
    Damaged {
        /// Amount of health removed (after flooring at zero).
        amount: f64,
        /// Health remaining after the hit.
        remaining: f64,
        /// Where the hit landed, if known.
        impact: Option<DVec2>,
    },
    /// Health crossed the enrage threshold; raised exactly once per fight.
    Enraged,
    /// Health reached zero.
    Defeated,
    /// A phase transition completed and the new theme is active.
    PhaseChanged {
        /// Phase that was active before the transition.
        from: MainPhase,
        /// Phase that is active now.
        to: MainPhase,
    },
    /// The windup finished and the boss committed to a dash target.
    DashStarted {
        /// World-space point the dash is heading for.
        target: DVec2,
    },
}
