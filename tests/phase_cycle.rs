//! Integration tests for the fixed A → B → C phase cycle.
//! Walks whole fights tick by tick and checks the transition bookkeeping.

use bossfight::prelude::*;
use bossfight::ProjectileKind;

const TICK_CAP: u32 = 20_000;

fn encounter() -> BossEncounter {
    let params =
        match EncounterParams::resolve(&PlayfieldConfig::reference(), &BossTuning::default()) {
            Ok(params) => params,
            Err(err) => panic!("reference configuration must resolve: {err}"),
        };
    BossEncounter::new(params)
}

fn player() -> Rect {
    Rect::new(375.0, 530.0, 50.0, 50.0)
}

/// One tick with fresh output buffers; returns what was emitted.
fn step(boss: &mut BossEncounter, player: Option<Rect>) -> (Vec<Projectile>, Vec<Projectile>) {
    let mut volley = Vec::new();
    let mut scatter = Vec::new();
    boss.tick(player, &mut volley, &mut scatter);
    (volley, scatter)
}

/// Ticks until the predicate holds, asserting state/phase legality on every
/// tick along the way. Panics when the cap is reached.
fn run_until(
    boss: &mut BossEncounter,
    player: Option<Rect>,
    mut done: impl FnMut(&BossEncounter, &[Projectile], &[Projectile]) -> bool,
) -> u32 {
    for tick in 0..TICK_CAP {
        let (volley, scatter) = step(boss, player);
        assert!(
            boss.battle_state().belongs_to(boss.main_phase()),
            "illegal pairing at tick {tick}: {:?} in {:?}",
            boss.battle_state(),
            boss.main_phase()
        );
        if done(boss, &volley, &scatter) {
            return tick;
        }
    }
    panic!("tick cap reached before the expected condition");
}

#[test]
fn entering_hands_over_to_phase_a() {
    let mut boss = encounter();
    step(&mut boss, Some(player()));
    assert_eq!(
        boss.battle_state(),
        BattleState::Transition {
            target: MainPhase::A
        }
    );
    run_until(&mut boss, Some(player()), |boss, _, _| {
        boss.battle_state() == BattleState::VolleyShoot
    });
    assert_eq!(boss.main_phase(), MainPhase::A);
}

#[test]
fn phase_a_exits_after_exactly_two_salvos() {
    let mut boss = encounter();
    let mut salvos = 0;
    run_until(&mut boss, Some(player()), |boss, volley, _| {
        if volley.iter().any(|shot| shot.kind == ProjectileKind::Volley) {
            salvos += 1;
        }
        boss.battle_state()
            == BattleState::Transition {
                target: MainPhase::B,
            }
    });
    assert_eq!(salvos, 2);
}

#[test]
fn volley_spread_is_five_bullets_around_the_aim_line() {
    let mut boss = encounter();
    let mut spread = Vec::new();
    run_until(&mut boss, None, |_, volley, _| {
        if !volley.is_empty() {
            spread = volley.to_vec();
        }
        !spread.is_empty()
    });
    assert_eq!(spread.len(), 5);
    // Without a player hitbox the aim line defaults to straight down.
    let aim = spread[0].angle;
    assert!((aim - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    let offsets: Vec<f64> = spread
        .iter()
        .map(|shot| (shot.angle - aim).to_degrees())
        .collect();
    for (observed, expected) in offsets.iter().zip([0.0, -15.0, 15.0, -30.0, 30.0]) {
        assert!(
            (observed - expected).abs() < 1e-9,
            "unexpected spread offsets: {offsets:?}"
        );
    }
}

#[test]
fn windup_fires_eight_bullet_rings() {
    let mut boss = encounter();
    let mut ring_size = 0;
    run_until(&mut boss, Some(player()), |_, volley, _| {
        let rings = volley
            .iter()
            .filter(|shot| shot.kind == ProjectileKind::Ring)
            .count();
        if rings > 0 {
            ring_size = rings;
        }
        ring_size > 0
    });
    assert_eq!(ring_size, 8);
}

#[test]
fn phase_b_reaches_c_with_homing_counter_cleared() {
    let mut boss = encounter();
    let mut scatters = 0;
    run_until(&mut boss, Some(player()), |boss, _, scatter| {
        if !scatter.is_empty() {
            assert_eq!(scatter.len(), 4, "scatter burst must be an X of four");
            assert!(scatter
                .iter()
                .all(|shot| shot.kind == ProjectileKind::Scatter && shot.lifetime.is_some()));
            scatters += 1;
        }
        boss.main_phase() == MainPhase::C
    });
    // The instant phase C begins: two scatter bursts behind us, no homing
    // shots fired yet.
    assert_eq!(scatters, 2);
    assert_eq!(boss.shots_fired(), 0);
    assert_eq!(boss.battle_state(), BattleState::HomingShoot);
}

#[test]
fn phase_c_cycles_back_to_a_after_three_homing_shots() {
    let mut boss = encounter();
    run_until(&mut boss, Some(player()), |boss, _, _| {
        boss.main_phase() == MainPhase::C
    });
    let mut homing_shots = 0;
    run_until(&mut boss, Some(player()), |boss, volley, _| {
        homing_shots += volley
            .iter()
            .filter(|shot| shot.kind == ProjectileKind::Homing)
            .count();
        boss.battle_state()
            == BattleState::Transition {
                target: MainPhase::A,
            }
    });
    assert_eq!(homing_shots, 3);
}

#[test]
fn fight_without_a_player_still_cycles() {
    // No hitbox at all: aiming and dash targeting fall back to policy
    // defaults and the cycle must still complete a full loop.
    let mut boss = encounter();
    run_until(&mut boss, None, |boss, _, _| {
        boss.main_phase() == MainPhase::C
    });
    run_until(&mut boss, None, |boss, _, _| {
        boss.main_phase() == MainPhase::A && boss.battle_state() == BattleState::VolleyShoot
    });
}

#[test]
fn body_never_leaves_the_playfield() {
    // Dashes aim below the accessible floor (the player hugs the screen
    // bottom), so this exercises the clamp-and-scatter edge case too.
    let mut boss = encounter();
    for _ in 0..6_000 {
        step(&mut boss, Some(player()));
        let body = boss.body_rect();
        assert!(body.x >= 0.0 && body.right() <= 800.0, "x out of bounds");
        assert!(body.y >= 0.0 && body.bottom() <= 600.0, "y out of bounds");
    }
}

#[test]
fn phase_changes_are_announced_as_events() {
    let mut boss = encounter();
    run_until(&mut boss, Some(player()), |boss, _, _| {
        boss.battle_state() == BattleState::Dashing
    });
    let events = boss.drain_events();
    assert!(events.contains(&FrameEvent::PhaseChanged {
        from: MainPhase::A,
        to: MainPhase::B,
    }));
    assert!(events
        .iter()
        .any(|event| matches!(event, FrameEvent::DashStarted { .. })));
}
