//! Main-phase and battle-state enums for the encounter state machine.
//!
//! Closed enums make illegal states unrepresentable and give the controller
//! a single dispatch point per tick.

use serde::Serialize;

/// Attack theme the boss is currently cycling through.
///
/// The active phase selects the movement style and attack pattern, and the
/// renderer keys its sprite tint off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MainPhase {
    /// Volley phase: aimed five-bullet spreads from a patrol line.
    A,
    /// Dash phase: windup rings, a dash at the player, then a scatter burst.
    B,
    /// Homing phase: single homing shots with a slow lateral drift.
    C,
}

impl MainPhase {
    /// First battle state entered once a transition into this phase
    /// completes.
    #[must_use]
    pub const fn entry_state(self) -> BattleState {
        match self {
            Self::A => BattleState::VolleyShoot,
            Self::B => BattleState::Windup,
            Self::C => BattleState::HomingShoot,
        }
    }

    /// Next phase in the fixed A → B → C → A cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::C,
            Self::C => Self::A,
        }
    }
}

/// Fine-grained sub-state driving the per-tick behaviour dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BattleState {
    /// Fight just began; hands over to a transition on the first tick.
    Entering,
    /// Telegraphing a phase change; completes after the transition duration.
    Transition {
        /// Phase that becomes active when the transition finishes.
        target: MainPhase,
    },
    /// Phase A: waiting out the shoot interval before the next spread.
    VolleyShoot,
    /// Phase A: short breather after a salvo.
    VolleyDelay,
    /// Phase B: shaking in place, firing slow rings, picking a dash target.
    Windup,
    /// Phase B: moving toward the dash target at dash speed.
    Dashing,
    /// Phase B: emitting the four-way scatter burst where the dash ended.
    Scatter,
    /// Phase B: cooldown before the next windup.
    DashCooldown,
    /// Phase C: firing homing shots while drifting laterally.
    HomingShoot,
}

impl BattleState {
    /// Whether this state is legal while `phase` is the active main phase.
    ///
    /// [`BattleState::Entering`] and [`BattleState::Transition`] are
    /// phase-neutral; every other state belongs to exactly one phase.
    #[must_use]
    pub fn belongs_to(self, phase: MainPhase) -> bool {
        match self {
            Self::Entering | Self::Transition { .. } => true,
            Self::VolleyShoot | Self::VolleyDelay => phase == MainPhase::A,
            Self::Windup | Self::Dashing | Self::Scatter | Self::DashCooldown => {
                phase == MainPhase::B
            }
            Self::HomingShoot => phase == MainPhase::C,
        }
    }

    /// True while the dash choreography owns horizontal movement and the
    /// standard side-to-side patrol must not run.
    #[must_use]
    pub const fn suppresses_patrol(self) -> bool {
        matches!(self, Self::Windup | Self::Dashing | Self::Scatter)
    }
}
