//! shuttle: smallest runnable example for the rust_rail game core.
//!
//! One train runs between an iron mine and a factory over a signalled line.
//! Pass a JSON `GameConfig` path as the only argument to override the
//! defaults.

use std::time::Instant;

use anyhow::{Context, Result};
use log::LevelFilter;

use rr_core::{CargoKind, EventKind, GameConfig, Position, Rail, Tick, TrainId};
use rr_grid::LevelUp;
use rr_sim::{WorldBuilder, WorldObserver};
use rr_train::DestroyReason;

// ── Constants ─────────────────────────────────────────────────────────────────

const DT:         f32   = 0.25;
const SIM_TICKS:  usize = 400; // 100 s of game time
const LINE_Y:     i32   = 2;
const WEST_X:     i32   = 2;
const EAST_X:     i32   = 10;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct LoggingObserver {
    deliveries: u32,
    destroyed:  u32,
}

impl WorldObserver for LoggingObserver {
    fn on_delivery(&mut self, train: TrainId, amount: u32) {
        self.deliveries += amount;
        log::info!("{train} delivered {amount}");
    }

    fn on_train_destroyed(&mut self, train: TrainId, reason: DestroyReason) {
        self.destroyed += 1;
        log::warn!("{train} destroyed: {reason}");
    }

    fn on_level_up(&mut self, level: u32, result: &LevelUp) {
        log::info!("level {level}: {} new building(s)", result.created.len());
    }

    fn on_tick_end(&mut self, tick: Tick, live_trains: usize) {
        if tick.0 % 100 == 0 {
            log::debug!("tick {}: {live_trains} train(s)", tick.0);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::builder().filter(None, LevelFilter::Info).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str::<GameConfig>(&text).with_context(|| format!("parsing {path}"))?
        }
        None => GameConfig::default(),
    };

    // 1. Fixed map: mine below the west end, factory below the east end.
    let west = Position::new(WEST_X, LINE_Y);
    let east = Position::new(EAST_X, LINE_Y);
    let mut world = WorldBuilder::new(config)
        .starting_buildings(false)
        .mine(west.offset(0, 1), CargoKind::Iron)
        .factory(east.offset(0, 1))
        .build()?;
    let sub = world.subscribe(&[EventKind::SignalColorChanged, EventKind::TrainDestroyed]);

    // 2. Track, stations and a signal halfway.
    let line: Vec<Position> = (WEST_X..=EAST_X).map(|x| Position::new(x, LINE_Y)).collect();
    let a = world.build_station(&[west], None)?;
    let b = world.build_station(&[east], None)?;
    world.build_rails(&Rail::path(&line))?;
    let mid = Position::new((WEST_X + EAST_X) / 2, LINE_Y);
    world.create_signal(mid, Rail::new(mid, mid.offset(1, 0)))?;
    log::info!("{} rails, {} stations", world.grid().rail_count(), world.grid().stations().count());

    // 3. Run.
    let train = world.create_train(a, b)?;
    let mut obs = LoggingObserver::default();
    let t0 = Instant::now();
    let mut color_changes = 0usize;
    for _ in 0..SIM_TICKS {
        world.tick(DT, &mut obs);
        color_changes += world.drain_events(sub).len();
    }
    let elapsed = t0.elapsed();

    // 4. Summary.
    let (min, sec) = world.clock().elapsed_min_sec();
    let summary = serde_json::json!({
        "ticks":            world.clock().current_tick.0,
        "game_time":        format!("{min}:{sec:02}"),
        "wall_time_ms":     elapsed.as_secs_f64() * 1e3,
        "score":            world.player().score(),
        "level":            world.player().level(),
        "deliveries":       obs.deliveries,
        "trains_destroyed": obs.destroyed,
        "notifications":    color_changes,
        "train":            world.train(train).map(|t| serde_json::json!({
            "position": t.position(),
            "cargo":    t.cargo(),
            "state":    t.state(),
        })),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
