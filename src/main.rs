//! Headless encounter driver.
//!
//! Runs the boss fight against a scripted player hitbox without a renderer,
//! logging frame events as they happen and a JSON snapshot at the end.
//! Useful for eyeballing the phase cadence and the enrage timing:
//!
//! ```text
//! RUST_LOG=debug cargo run -- --ticks 3600 --damage 2.5
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;

use bossfight::{
    init_logging, BossEncounter, BossTuning, EncounterParams, PlayfieldConfig, ProjectilePool,
    Rect,
};

/// Headless boss encounter simulation.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Ticks to simulate (one minute at the reference tick rate).
    #[arg(long, default_value_t = 3600)]
    ticks: u32,

    /// Damage dealt to the boss every half second.
    #[arg(long, default_value_t = 2.5)]
    damage: f64,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let playfield = PlayfieldConfig::reference();
    let params = EncounterParams::resolve(&playfield, &BossTuning::default())?;
    let dt = params.tick_seconds();
    let damage_interval = playfield.tick_rate / 2;

    let mut boss = BossEncounter::new(params);
    let mut pool = ProjectilePool::default();
    let mut volley = Vec::new();
    let mut scatter = Vec::new();

    let bounds = Rect::new(0.0, 0.0, playfield.width, playfield.height);
    let player = Rect::new(
        playfield.width / 2.0 - 25.0,
        playfield.height - 70.0,
        50.0,
        50.0,
    );

    for tick in 0..args.ticks {
        boss.tick(Some(player), &mut volley, &mut scatter);
        pool.absorb(&mut volley);
        pool.absorb(&mut scatter);
        pool.tick(Some(player), bounds, dt);

        let defeated = damage_interval > 0
            && tick % damage_interval == damage_interval - 1
            && boss.take_damage(args.damage, None);

        for event in boss.drain_events() {
            info!("tick {tick}: {event:?}");
        }

        if defeated {
            info!("boss defeated after {tick} ticks with {} live shots", pool.len());
            break;
        }
    }

    let snapshot = serde_json::to_string_pretty(&boss.render_state())?;
    info!("final render state:\n{snapshot}");
    Ok(())
}
