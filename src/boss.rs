//! The boss encounter controller: a pure per-tick state transformer.
//!
//! One [`BossEncounter`] is live per fight. The host loop calls
//! [`BossEncounter::tick`] exactly once per simulation frame while health is
//! above zero, handing in the player hitbox and two output vectors for the
//! shots fired this tick. The collision system feeds damage back through
//! [`BossEncounter::take_damage`]; the renderer reads
//! [`BossEncounter::render_state`] and writes nothing back.
//!
//! The fight cycles A → B → C → A forever until external defeat:
//! phase A fires aimed five-bullet spreads, phase B alternates windup rings
//! with dashes that end in scatter bursts, and phase C fires homing shots
//! while drifting laterally. Dropping to half health enrages the boss once,
//! permanently scaling its combat parameters.

use glam::DVec2;
use log::{debug, info};
use serde::Serialize;

use crate::config::EncounterParams;
use crate::escort::EscortRing;
use crate::events::FrameEvent;
use crate::geometry::{bearing, Rect, AIM_STRAIGHT_DOWN};
use crate::numeric::scale_ticks;
use crate::phase::{BattleState, MainPhase};
use crate::projectile::{Projectile, ProjectileKind};

/// Spread offsets for a phase A volley, degrees either side of the aim line.
const VOLLEY_SPREAD_DEG: [f64; 5] = [0.0, -15.0, 15.0, -30.0, 30.0];

/// Scatter burst directions: an X pattern at 45/135/225/315 degrees.
const SCATTER_ANGLES: [f64; 4] = [
    std::f64::consts::FRAC_PI_4,
    3.0 * std::f64::consts::FRAC_PI_4,
    5.0 * std::f64::consts::FRAC_PI_4,
    7.0 * std::f64::consts::FRAC_PI_4,
];

/// Render-facing snapshot of the encounter.
///
/// Everything the renderer needs to pick a sprite, tint and offset; it never
/// writes back into the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderState {
    /// Top-left corner of the boss body.
    pub position: DVec2,
    /// Body width.
    pub width: f64,
    /// Body height.
    pub height: f64,
    /// Active theme, selects the sprite tint.
    pub main_phase: MainPhase,
    /// Fine-grained state, selects special poses.
    pub battle_state: BattleState,
    /// Permanent difficulty escalation flag.
    pub enraged: bool,
    /// Hit flash is currently lit.
    pub flashing: bool,
    /// Sprite should jitter (windup or transition telegraph).
    pub shaking: bool,
    /// Health fraction in `[0, 1]` for the health bar.
    pub health_fraction: f64,
}

/// Owns a boss's position, health and attack behaviour for one fight.
#[derive(Debug)]
pub struct BossEncounter {
    params: EncounterParams,
    position: DVec2,
    initial_y: f64,
    health: f64,
    enraged: bool,
    main_phase: MainPhase,
    battle_state: BattleState,
    phase_timer: u32,
    salvos_done: u32,
    dashes_done: u32,
    shots_fired: u32,
    windup_shot_timer: u32,
    dash_target: DVec2,
    patrol_direction: f64,
    drift_direction: f64,
    drift_timer: u32,
    bob_timer: f64,
    flash_timer: u32,
    escorts: EscortRing,
    events: Vec<FrameEvent>,
}

impl BossEncounter {
    /// Creates a fresh encounter at the configured spawn position.
    #[must_use]
    pub fn new(params: EncounterParams) -> Self {
        let spawn = params.spawn_position;
        let escorts = EscortRing::new(params.escort_radius, params.escort_speed);
        let health = params.max_health;
        Self {
            params,
            position: spawn,
            initial_y: spawn.y,
            health,
            enraged: false,
            main_phase: MainPhase::A,
            battle_state: BattleState::Entering,
            phase_timer: 0,
            salvos_done: 0,
            dashes_done: 0,
            shots_fired: 0,
            windup_shot_timer: 0,
            dash_target: DVec2::ZERO,
            patrol_direction: 1.0,
            drift_direction: 1.0,
            drift_timer: 0,
            bob_timer: 0.0,
            flash_timer: 0,
            escorts,
            events: Vec::new(),
        }
    }

    /// Advances the encounter by exactly one simulation tick.
    ///
    /// Shots fired this tick are pushed into `volley_out` (aimed, ring and
    /// homing bullets) and `scatter_out` (scatter bursts); ownership of the
    /// records passes to the caller's projectile pool. A missing player
    /// hitbox falls back to policy defaults (aim straight down, dash to the
    /// screen-bottom centre). No-op once health has reached zero.
    pub fn tick(
        &mut self,
        player: Option<Rect>,
        volley_out: &mut Vec<Projectile>,
        scatter_out: &mut Vec<Projectile>,
    ) {
        if self.health <= 0.0 {
            return;
        }

        self.update_enrage();
        self.phase_timer += 1;

        if !self.battle_state.suppresses_patrol() {
            self.patrol();
        }
        self.bob();
        self.escorts.advance();

        match self.battle_state {
            BattleState::Entering => self.begin_transition(MainPhase::A),
            BattleState::Transition { target } => self.tick_transition(target),
            BattleState::VolleyShoot => self.tick_volley_shoot(player, volley_out),
            BattleState::VolleyDelay => self.tick_volley_delay(),
            BattleState::Windup => self.tick_windup(player, volley_out),
            BattleState::Dashing => self.tick_dash(),
            BattleState::Scatter => self.tick_scatter(scatter_out),
            BattleState::DashCooldown => self.tick_dash_cooldown(),
            BattleState::HomingShoot => self.tick_homing(player, volley_out),
        }

        self.flash_timer = self.flash_timer.saturating_sub(1);
    }

    /// Applies damage from an external collision system.
    ///
    /// Health is floored at zero. Returns `true` iff health is zero after
    /// the call, so the first defeating hit and every later (idempotent)
    /// call both report defeat. Arms the hit flash and re-checks the enrage
    /// threshold immediately rather than waiting for the next tick.
    pub fn take_damage(&mut self, amount: f64, impact_point: Option<DVec2>) -> bool {
        if self.health <= 0.0 {
            return true;
        }
        let applied = amount.min(self.health);
        self.health -= applied;
        self.flash_timer = self.params.flash_ticks;
        self.events.push(FrameEvent::Damaged {
            amount: applied,
            remaining: self.health,
            impact: impact_point,
        });
        self.update_enrage();
        if self.health <= 0.0 {
            info!("boss defeated");
            self.events.push(FrameEvent::Defeated);
            return true;
        }
        false
    }

    /// Restores the encounter for a fresh fight.
    ///
    /// Health, phase, battle state, counters and the enrage flag all return
    /// to their initial values and the boss re-centres horizontally at its
    /// spawn height.
    pub fn reset_for_new_fight(&mut self) {
        self.health = self.params.max_health;
        self.enraged = false;
        self.main_phase = MainPhase::A;
        self.battle_state = BattleState::Entering;
        self.phase_timer = 0;
        self.salvos_done = 0;
        self.dashes_done = 0;
        self.shots_fired = 0;
        self.windup_shot_timer = 0;
        self.drift_direction = 1.0;
        self.drift_timer = 0;
        self.patrol_direction = 1.0;
        self.flash_timer = 0;
        self.position = DVec2::new(
            (self.params.playfield.width - self.params.boss_width) / 2.0,
            self.initial_y,
        );
        self.events.clear();
        debug!("encounter reset for a new fight");
    }

    /// Drains the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot for the renderer.
    #[must_use]
    pub fn render_state(&self) -> RenderState {
        RenderState {
            position: self.position,
            width: self.params.boss_width,
            height: self.params.boss_height,
            main_phase: self.main_phase,
            battle_state: self.battle_state,
            enraged: self.enraged,
            flashing: self.flash_timer > 0,
            shaking: matches!(
                self.battle_state,
                BattleState::Windup | BattleState::Transition { .. }
            ),
            health_fraction: if self.params.max_health > 0.0 {
                self.health / self.params.max_health
            } else {
                0.0
            },
        }
    }

    /// Orbit positions for `count` live escorts; empty when none remain.
    #[must_use]
    pub fn escort_slots(&self, count: usize) -> Vec<DVec2> {
        self.escorts.slots(self.body_rect().center(), count)
    }

    /// The boss body as a playfield rectangle.
    #[must_use]
    pub fn body_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.params.boss_width,
            self.params.boss_height,
        )
    }

    /// Current top-left position.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Remaining health.
    #[must_use]
    pub const fn health(&self) -> f64 {
        self.health
    }

    /// Health at the start of the fight.
    #[must_use]
    pub const fn max_health(&self) -> f64 {
        self.params.max_health
    }

    /// Whether the one-way enrage escalation has triggered.
    #[must_use]
    pub const fn is_enraged(&self) -> bool {
        self.enraged
    }

    /// Active main phase.
    #[must_use]
    pub const fn main_phase(&self) -> MainPhase {
        self.main_phase
    }

    /// Active battle state.
    #[must_use]
    pub const fn battle_state(&self) -> BattleState {
        self.battle_state
    }

    /// Salvos completed in the current phase A round.
    #[must_use]
    pub const fn salvos_done(&self) -> u32 {
        self.salvos_done
    }

    /// Dashes completed in the current phase B cycle.
    #[must_use]
    pub const fn dashes_done(&self) -> u32 {
        self.dashes_done
    }

    /// Homing shots fired in the current phase C cycle.
    #[must_use]
    pub const fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    /// Whether the hit flash is currently lit.
    #[must_use]
    pub const fn is_flashing(&self) -> bool {
        self.flash_timer > 0
    }

    /// Resolved parameters this encounter runs on.
    #[must_use]
    pub const fn params(&self) -> &EncounterParams {
        &self.params
    }

    /// Dash speed with the enrage multiplier applied when active.
    #[must_use]
    pub fn current_dash_speed(&self) -> f64 {
        self.scaled(self.params.dash_speed, self.params.enrage_dash_mult)
    }

    /// Homing bullet speed with the enrage multiplier applied when active.
    #[must_use]
    pub fn current_homing_speed(&self) -> f64 {
        self.scaled(self.params.homing_speed, self.params.enrage_speed_mult)
    }

    /// Homing turn strength with the enrage multiplier applied when active.
    #[must_use]
    pub fn current_homing_strength(&self) -> f64 {
        self.scaled(self.params.homing_strength, self.params.enrage_strength_mult)
    }

    /// Phase A shoot interval in ticks, shortened while enraged.
    #[must_use]
    pub fn current_volley_interval(&self) -> u32 {
        self.scaled_interval(self.params.volley_interval_ticks)
    }

    /// Phase C shoot interval in ticks, shortened while enraged.
    #[must_use]
    pub fn current_homing_interval(&self) -> u32 {
        self.scaled_interval(self.params.homing_interval_ticks)
    }

    // Current combat parameters always derive from the base value and the
    // multiplier; nothing is ever rescaled from an already-scaled value.
    fn scaled(&self, base: f64, multiplier: f64) -> f64 {
        if self.enraged {
            base * multiplier
        } else {
            base
        }
    }

    fn scaled_interval(&self, ticks: u32) -> u32 {
        if self.enraged {
            scale_ticks(ticks, self.params.enrage_interval_mult)
        } else {
            ticks
        }
    }

    fn update_enrage(&mut self) {
        if !self.enraged && self.health <= self.params.max_health * self.params.enrage_threshold {
            self.enraged = true;
            info!("boss enraged at {:.0} hp", self.health);
            self.events.push(FrameEvent::Enraged);
        }
    }

    fn patrol(&mut self) {
        self.position.x += self.params.patrol_speed * self.patrol_direction;
        self.clamp_patrol_x();
    }

    fn clamp_patrol_x(&mut self) {
        let min_x = self.params.boundary_margin;
        let max_x =
            self.params.playfield.width - self.params.boss_width - self.params.boundary_margin;
        if self.position.x > max_x {
            self.position.x = max_x;
            self.patrol_direction = -1.0;
        } else if self.position.x < min_x {
            self.position.x = min_x;
            self.patrol_direction = 1.0;
        }
    }

    // The bob timer runs continuously; the vertical offset is only applied
    // while the dash choreography does not own the y coordinate.
    fn bob(&mut self) {
        self.bob_timer += self.params.bob_speed;
        if self.battle_state == BattleState::Dashing {
            return;
        }
        let offset = self.bob_timer.sin() * self.params.bob_amplitude;
        let min_y = self.params.vertical_margin;
        let max_y = self.params.playfield.height
            - self.params.boss_height
            - self.params.vertical_margin;
        self.position.y = (self.initial_y + offset).clamp(min_y, max_y);
    }

    fn muzzle(&self) -> DVec2 {
        let body = self.body_rect();
        DVec2::new(body.center().x, body.bottom() - self.params.muzzle_offset)
    }

    /// Aim from the muzzle to the player centre; straight down when no
    /// player hitbox is available.
    fn aim_angle(&self, player: Option<Rect>) -> f64 {
        player.map_or(AIM_STRAIGHT_DOWN, |hitbox| {
            bearing(self.muzzle(), hitbox.center())
        })
    }

    fn begin_transition(&mut self, target: MainPhase) {
        debug!("phase transition {:?} -> {:?}", self.main_phase, target);
        self.battle_state = BattleState::Transition { target };
        self.phase_timer = 0;
    }

    fn tick_transition(&mut self, target: MainPhase) {
        if self.phase_timer < self.params.transition_ticks {
            return;
        }
        self.events.push(FrameEvent::PhaseChanged {
            from: self.main_phase,
            to: target,
        });
        self.main_phase = target;
        match target {
            MainPhase::A => self.salvos_done = 0,
            MainPhase::B => self.dashes_done = 0,
            MainPhase::C => self.shots_fired = 0,
        }
        self.battle_state = target.entry_state();
        self.phase_timer = 0;
        self.windup_shot_timer = 0;
        debug!("entered {:?}", self.battle_state);
    }

    fn tick_volley_shoot(&mut self, player: Option<Rect>, volley_out: &mut Vec<Projectile>) {
        if self.phase_timer < self.current_volley_interval() {
            return;
        }
        let aim = self.aim_angle(player);
        let muzzle = self.muzzle();
        for offset_deg in VOLLEY_SPREAD_DEG {
            volley_out.push(Projectile::straight(
                ProjectileKind::Volley,
                muzzle,
                aim + offset_deg.to_radians(),
                self.params.volley_speed,
            ));
        }
        self.phase_timer = 0;
        self.battle_state = BattleState::VolleyDelay;
    }

    fn tick_volley_delay(&mut self) {
        if self.phase_timer < self.params.volley_delay_ticks {
            return;
        }
        self.salvos_done += 1;
        self.phase_timer = 0;
        if self.salvos_done >= self.params.salvos_per_round {
            self.begin_transition(MainPhase::B);
        } else {
            self.battle_state = BattleState::VolleyShoot;
        }
    }

    fn tick_windup(&mut self, player: Option<Rect>, volley_out: &mut Vec<Projectile>) {
        self.windup_shot_timer += 1;
        if self.windup_shot_timer >= self.params.ring_interval_ticks {
            self.windup_shot_timer = 0;
            self.fire_ring(volley_out);
        }

        if self.phase_timer < self.params.windup_ticks {
            return;
        }
        self.dash_target = player.map_or(self.params.dash_fallback_target, |hitbox| {
            let centre = hitbox.center();
            DVec2::new(centre.x, centre.y + hitbox.height)
        });
        self.events.push(FrameEvent::DashStarted {
            target: self.dash_target,
        });
        self.battle_state = BattleState::Dashing;
        self.phase_timer = 0;
        self.windup_shot_timer = 0;
    }

    fn fire_ring(&self, volley_out: &mut Vec<Projectile>) {
        let count = self.params.ring_bullet_count;
        if count == 0 {
            return;
        }
        let step = std::f64::consts::TAU / f64::from(count);
        let muzzle = self.muzzle();
        for slot in 0..count {
            volley_out.push(Projectile::straight(
                ProjectileKind::Ring,
                muzzle,
                f64::from(slot) * step,
                self.params.ring_speed,
            ));
        }
    }

    fn tick_dash(&mut self) {
        let speed = self.current_dash_speed();
        let to_target = self.dash_target - self.body_rect().center();
        let distance = to_target.length();
        if distance > speed {
            self.position += to_target / distance * speed;
        } else {
            // Close enough to cover in one step: the dash has arrived.
            self.end_dash();
            return;
        }

        let body = self.body_rect();
        let out_of_bounds = body.x < 0.0
            || body.right() > self.params.playfield.width
            || body.y < 0.0
            || body.bottom() > self.params.dash_floor_y;
        if out_of_bounds {
            // A dash that would leave the accessible playfield is clamped to
            // the boundary and treated as having reached its target.
            let field = Rect::new(
                0.0,
                0.0,
                self.params.playfield.width,
                self.params.playfield.height,
            );
            self.position =
                field.clamp_body(self.position, self.params.boss_width, self.params.boss_height);
            self.end_dash();
        }
    }

    fn end_dash(&mut self) {
        self.battle_state = BattleState::Scatter;
        self.phase_timer = 0;
    }

    fn tick_scatter(&mut self, scatter_out: &mut Vec<Projectile>) {
        let centre = self.body_rect().center();
        for angle in SCATTER_ANGLES.into_iter().take(self.params.scatter_count as usize) {
            scatter_out.push(
                Projectile::straight(
                    ProjectileKind::Scatter,
                    centre,
                    angle,
                    self.params.scatter_speed,
                )
                .with_lifetime(self.params.scatter_lifetime_ticks),
            );
        }
        self.dashes_done += 1;
        self.phase_timer = 0;
        if self.dashes_done >= self.params.dashes_per_cycle {
            self.begin_transition(MainPhase::C);
        } else {
            self.battle_state = BattleState::DashCooldown;
        }
    }

    fn tick_dash_cooldown(&mut self) {
        if self.phase_timer < self.params.dash_cooldown_ticks {
            return;
        }
        self.battle_state = BattleState::Windup;
        self.phase_timer = 0;
        self.windup_shot_timer = 0;
    }

    fn tick_homing(&mut self, player: Option<Rect>, volley_out: &mut Vec<Projectile>) {
        if self.phase_timer >= self.current_homing_interval() {
            let aim = self.aim_angle(player);
            volley_out.push(Projectile::homing(
                self.muzzle(),
                aim,
                self.current_homing_speed(),
                self.current_homing_strength(),
            ));
            self.shots_fired += 1;
            self.phase_timer = 0;
            if self.shots_fired >= self.params.shots_per_cycle {
                self.begin_transition(MainPhase::A);
            }
        }

        // Lateral drift at half patrol speed, reversing on a fixed cadence,
        // layered on top of the standard patrol.
        self.drift_timer += 1;
        if self.drift_timer >= self.params.drift_flip_ticks {
            self.drift_direction = -self.drift_direction;
            self.drift_timer = 0;
        }
        self.position.x += self.drift_direction * self.params.patrol_speed * 0.5;
        let min_x = self.params.boundary_margin;
        let max_x =
            self.params.playfield.width - self.params.boss_width - self.params.boundary_margin;
        self.position.x = self.position.x.clamp(min_x, max_x);
    }
}
