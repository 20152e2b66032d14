//! Library crate providing the boss encounter simulation core.
//!
//! The controller is a single-threaded per-tick state transformer: the host
//! game loop calls [`BossEncounter::tick`] once per frame, absorbs the
//! emitted [`Projectile`] records into a [`ProjectilePool`], routes damage
//! through [`BossEncounter::take_damage`], and renders from
//! [`BossEncounter::render_state`]. All distances and durations resolve once
//! from ratio-based tuning via [`EncounterParams::resolve`].

pub mod boss;
pub mod config;
pub mod escort;
pub mod events;
pub mod geometry;
pub mod logging;
pub mod numeric;
pub mod phase;
pub mod projectile;

pub use boss::{BossEncounter, RenderState};
pub use config::{BossTuning, ConfigError, EncounterParams, PlayfieldConfig};
pub use escort::EscortRing;
pub use events::FrameEvent;
pub use geometry::{bearing, wrap_angle, Rect, AIM_STRAIGHT_DOWN};
pub use logging::init as init_logging;
pub use phase::{BattleState, MainPhase};
pub use projectile::{Projectile, ProjectileKind, ProjectilePool};

pub mod prelude {
    //! Prelude exports for host loops and tests.
    //!
    //! ```rust,no_run
    //! use bossfight::prelude::*;
    //! ```

    pub use crate::boss::BossEncounter;
    pub use crate::config::{BossTuning, EncounterParams, PlayfieldConfig};
    pub use crate::events::FrameEvent;
    pub use crate::geometry::Rect;
    pub use crate::phase::{BattleState, MainPhase};
    pub use crate::projectile::{Projectile, ProjectilePool};
}
