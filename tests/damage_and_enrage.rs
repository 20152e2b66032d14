//! Integration tests for damage application, the one-way enrage escalation,
//! and fight resets.

use approx::assert_relative_eq;
use bossfight::prelude::*;
use glam::DVec2;
use rstest::rstest;

fn encounter_with_health(max_health: f64) -> BossEncounter {
    let tuning = BossTuning {
        max_health,
        ..BossTuning::default()
    };
    let params = match EncounterParams::resolve(&PlayfieldConfig::reference(), &tuning) {
        Ok(params) => params,
        Err(err) => panic!("configuration must resolve: {err}"),
    };
    BossEncounter::new(params)
}

fn encounter() -> BossEncounter {
    encounter_with_health(300.0)
}

fn step(boss: &mut BossEncounter, player: Option<Rect>) {
    let mut volley = Vec::new();
    let mut scatter = Vec::new();
    boss.tick(player, &mut volley, &mut scatter);
}

#[test]
fn lethal_damage_floors_health_and_reports_defeat() {
    let mut boss = encounter_with_health(5.0);
    assert!(boss.take_damage(5.0, None));
    assert_relative_eq!(boss.health(), 0.0);
    // Idempotent after defeat: still reports defeat, health stays at zero.
    assert!(boss.take_damage(1.0, None));
    assert_relative_eq!(boss.health(), 0.0);
}

#[test]
fn overkill_damage_is_floored_at_zero() {
    let mut boss = encounter_with_health(10.0);
    assert!(boss.take_damage(1000.0, None));
    assert_relative_eq!(boss.health(), 0.0);
}

#[rstest]
#[case::above_threshold(149.0, false)]
#[case::exactly_at_threshold(150.0, true)]
#[case::below_threshold(151.0, true)]
fn enrage_triggers_at_half_health(#[case] damage: f64, #[case] expect_enraged: bool) {
    let mut boss = encounter();
    boss.take_damage(damage, None);
    assert_eq!(boss.is_enraged(), expect_enraged);
}

#[test]
fn enrage_fires_exactly_once_and_never_reverts() {
    let mut boss = encounter();
    boss.take_damage(151.0, None);
    assert!(boss.is_enraged());
    boss.take_damage(50.0, None);
    step(&mut boss, None);
    assert!(boss.is_enraged());
    let enrage_events = boss
        .drain_events()
        .into_iter()
        .filter(|event| *event == FrameEvent::Enraged)
        .count();
    assert_eq!(enrage_events, 1);
}

#[test]
fn enraged_parameters_derive_from_base_times_multiplier() {
    let mut boss = encounter();
    let base_dash = boss.current_dash_speed();
    let base_homing_speed = boss.current_homing_speed();
    let base_strength = boss.current_homing_strength();
    assert_eq!(boss.current_volley_interval(), 90);
    assert_eq!(boss.current_homing_interval(), 60);

    boss.take_damage(151.0, None);

    assert_relative_eq!(boss.current_dash_speed(), base_dash * 1.25);
    assert_relative_eq!(boss.current_homing_speed(), base_homing_speed * 1.2);
    assert_relative_eq!(boss.current_homing_strength(), base_strength * 1.2);
    assert_eq!(boss.current_volley_interval(), 63);
    assert_eq!(boss.current_homing_interval(), 42);
}

#[test]
fn damage_arms_the_hit_flash_which_decays_over_ticks() {
    let mut boss = encounter();
    assert!(!boss.is_flashing());
    boss.take_damage(10.0, Some(DVec2::new(400.0, 120.0)));
    assert!(boss.is_flashing());
    for _ in 0..8 {
        step(&mut boss, None);
    }
    assert!(!boss.is_flashing());
}

#[test]
fn damaged_event_carries_the_impact_point() {
    let mut boss = encounter();
    let impact = DVec2::new(410.0, 95.0);
    boss.take_damage(12.0, Some(impact));
    let events = boss.drain_events();
    assert!(events.contains(&FrameEvent::Damaged {
        amount: 12.0,
        remaining: 288.0,
        impact: Some(impact),
    }));
}

#[test]
fn defeat_emits_a_single_defeated_event() {
    let mut boss = encounter_with_health(20.0);
    boss.take_damage(20.0, None);
    boss.take_damage(5.0, None);
    let defeats = boss
        .drain_events()
        .into_iter()
        .filter(|event| *event == FrameEvent::Defeated)
        .count();
    assert_eq!(defeats, 1);
}

#[test]
fn reset_restores_the_initial_fight_state() {
    let mut boss = encounter();
    // Progress the fight a little, enrage it, then kill it.
    for _ in 0..500 {
        step(&mut boss, None);
    }
    boss.take_damage(300.0, None);
    assert!(boss.is_enraged());

    boss.reset_for_new_fight();

    assert_relative_eq!(boss.health(), boss.max_health());
    assert_eq!(boss.battle_state(), BattleState::Entering);
    assert_eq!(boss.main_phase(), MainPhase::A);
    assert!(!boss.is_enraged());
    assert!(!boss.is_flashing());
    assert_eq!(boss.salvos_done(), 0);
    assert_eq!(boss.dashes_done(), 0);
    assert_eq!(boss.shots_fired(), 0);
    // Back to base parameters as well.
    assert_eq!(boss.current_volley_interval(), 90);

    // And the machine runs again from the top.
    step(&mut boss, None);
    assert_eq!(
        boss.battle_state(),
        BattleState::Transition {
            target: MainPhase::A
        }
    );
}
