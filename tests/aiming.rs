//! Integration tests for the aiming rule and its no-player fallback.

use bossfight::prelude::*;
use bossfight::{ProjectileKind, AIM_STRAIGHT_DOWN};

const TICK_CAP: u32 = 20_000;

fn encounter() -> BossEncounter {
    let params =
        match EncounterParams::resolve(&PlayfieldConfig::reference(), &BossTuning::default()) {
            Ok(params) => params,
            Err(err) => panic!("reference configuration must resolve: {err}"),
        };
    BossEncounter::new(params)
}

fn first_shot_of_kind(
    boss: &mut BossEncounter,
    player: Option<Rect>,
    kind: ProjectileKind,
) -> Projectile {
    for _ in 0..TICK_CAP {
        let mut volley = Vec::new();
        let mut scatter = Vec::new();
        boss.tick(player, &mut volley, &mut scatter);
        if let Some(shot) = volley.into_iter().find(|shot| shot.kind == kind) {
            return shot;
        }
    }
    panic!("no {kind:?} shot fired within the tick cap");
}

#[test]
fn volley_aim_defaults_to_straight_down_without_a_player() {
    let mut boss = encounter();
    let shot = first_shot_of_kind(&mut boss, None, ProjectileKind::Volley);
    assert!((shot.angle - AIM_STRAIGHT_DOWN).abs() < 1e-12);
}

#[test]
fn homing_aim_defaults_to_straight_down_without_a_player() {
    let mut boss = encounter();
    let shot = first_shot_of_kind(&mut boss, None, ProjectileKind::Homing);
    assert!((shot.angle - AIM_STRAIGHT_DOWN).abs() < 1e-12);
    assert_eq!(shot.homing_strength, Some(0.025));
}

#[test]
fn volley_aims_down_towards_a_player_off_to_the_side() {
    let mut boss = encounter();
    // Player low and far to the right: the aim line must point down-right,
    // i.e. strictly between 0 and π/2.
    let player = Rect::new(700.0, 520.0, 50.0, 50.0);
    let shot = first_shot_of_kind(&mut boss, Some(player), ProjectileKind::Volley);
    assert!(
        shot.angle > 0.0 && shot.angle < AIM_STRAIGHT_DOWN,
        "aim angle {} not down-right",
        shot.angle
    );
}
