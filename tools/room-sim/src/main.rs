//! room-sim: headless runner for museum rooms.
//!
//! Usage:
//!   room-sim run --map gallery.json --player 5,7 --crouch --frames 300
//!   room-sim demo --crouch

use std::cell::Cell;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;

use glam::Vec2;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use heist_core::constants::DT;
use heist_core::enums::Direction;
use heist_core::events::RoomEvent;
use heist_core::state::RoomSnapshot;
use heist_core::types::PlayerSnapshot;
use heist_guard_ai::{Guard, GuardSpec};
use heist_sim::{RoomSimulation, SimConfig};
use heist_tiles::CollisionGrid;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "demo" => cmd_demo(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("heist=info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn print_usage() {
    eprintln!(
        "room-sim: museum heist guard simulation runner\n\
         \n\
         Commands:\n\
         \n\
         run       Simulate a room exported from the map editor\n\
         \n\
           --map <path>       Room JSON file\n\
           --player <x,y>     Player tile (optional, default: no player)\n\
           --crouch           Player is crouching\n\
           --frames <N>       Frames to simulate (default: 300)\n\
           --seed <N>         RNG seed (default: from config, else 42)\n\
           --config <path>    Simulation config JSON (seed and guard tuning)\n\
           --json             Print the final snapshot as JSON\n\
         \n\
         demo      Built-in gallery with a player walking past two guards\n\
         \n\
           --crouch           Player sneaks instead of walking upright\n\
           --frames <N>       Frames to simulate (default: 600)\n\
           --seed <N>         RNG seed\n\
         \n\
         Set RUST_LOG (e.g. heist=debug) for state-machine tracing.\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].as_str());
        }
    }
    None
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn parse_tile(args: &[String]) -> Option<(i32, i32)> {
    let value = flag_value(args, "--player")?;
    let (x, y) = value.split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn parse_count(args: &[String], flag: &str, default: u64) -> u64 {
    match flag_value(args, flag) {
        Some(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Error: {flag} expects a number, got {v:?}");
                process::exit(1);
            }
        },
        None => default,
    }
}

fn load_config(args: &[String]) -> SimConfig {
    let mut config = match flag_value(args, "--config") {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: cannot load config {path}: {e}");
                process::exit(1);
            }
        },
        None => SimConfig::default(),
    };
    config.seed = parse_count(args, "--seed", config.seed);
    config
}

fn print_event(snapshot: &RoomSnapshot, event: &RoomEvent) {
    let t = snapshot.time.elapsed_secs;
    match event {
        RoomEvent::GuardStateChanged { guard_id, from, to } => {
            println!("[{t:7.2}s] guard {} {from:?} -> {to:?}", guard_id.0);
        }
        RoomEvent::GuardAlerted { guard_id, position } => {
            println!(
                "[{t:7.2}s] guard {} spotted the player from ({:.2}, {:.2})",
                guard_id.0, position.x, position.y
            );
        }
        RoomEvent::PlayerCaught { guard_id } => {
            println!("[{t:7.2}s] player caught by guard {}", guard_id.0);
        }
    }
}

/// Step the room, printing events. Stops on the frame the capture fires.
fn drive(
    sim: &mut RoomSimulation,
    frames: u64,
    mut player_at: impl FnMut(u64) -> Option<PlayerSnapshot>,
) -> RoomSnapshot {
    let caught = Rc::new(Cell::new(false));
    let flag = Rc::clone(&caught);
    sim.set_capture_callback(move || flag.set(true));

    let mut snapshot = RoomSnapshot::default();
    for frame in 0..frames {
        sim.set_player(player_at(frame));
        snapshot = sim.tick(DT);
        for event in &snapshot.events {
            print_event(&snapshot, event);
        }
        if caught.get() {
            break;
        }
    }
    snapshot
}

fn print_summary(snapshot: &RoomSnapshot) {
    println!(
        "{} frames, {:.2}s simulated, player {}",
        snapshot.time.frame,
        snapshot.time.elapsed_secs,
        if snapshot.player_caught { "caught" } else { "undetected" }
    );
    for guard in &snapshot.guards {
        println!(
            "  guard {:>2} {:?} {:?} at ({:.2}, {:.2}) facing {:?}",
            guard.guard_id.0,
            guard.kind,
            guard.state,
            guard.position.x,
            guard.position.y,
            guard.direction
        );
    }
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let map_path = match flag_value(args, "--map") {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("Error: --map <path> is required");
            process::exit(1);
        }
    };
    let config = load_config(args);
    let frames = parse_count(args, "--frames", 300);
    let crouching = has_flag(args, "--crouch");
    let player = parse_tile(args).map(|(x, y)| PlayerSnapshot::at_tile(x, y, crouching));

    let json = match std::fs::read_to_string(&map_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: cannot read {}: {e}", map_path.display());
            process::exit(1);
        }
    };
    let mut sim = match RoomSimulation::from_map_json(&json, config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    info!(map = %map_path.display(), guards = sim.guard_count(), "Simulating room");

    let snapshot = drive(&mut sim, frames, |_| player);
    print_summary(&snapshot);

    if has_flag(args, "--json") {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }
}

// --- Demo command ---

const DEMO_GALLERY: [&str; 10] = [
    "##############",
    "#............#",
    "#............#",
    "#.....##.....#",
    "#............#",
    "#............#",
    "#............#",
    "#............#",
    "#............#",
    "##############",
];

/// Player tiles per second in the demo.
const DEMO_WALK_SPEED: f32 = 1.5;

fn cmd_demo(args: &[String]) {
    let config = load_config(args);
    let frames = parse_count(args, "--frames", 600);
    let crouching = has_flag(args, "--crouch");
    let tuning = config.tuning;

    let mut sim = RoomSimulation::new(config);
    sim.set_collision(Some(CollisionGrid::from_ascii(&DEMO_GALLERY)));

    // Watches the left half of the room, favoring the south wall
    sim.spawn_guard(Guard::stationary(
        GuardSpec::at(3.0, 2.0, Direction::Down),
        Direction::Down,
        tuning,
    ));
    // Walks the east side behind the sculpture plinth
    sim.spawn_guard(Guard::patrol(
        GuardSpec::at(10.0, 2.0, Direction::Down),
        vec![
            Vec2::new(10.0, 2.0),
            Vec2::new(10.0, 7.0),
            Vec2::new(8.0, 7.0),
            Vec2::new(8.0, 2.0),
        ],
        tuning,
    ));
    info!(crouching, "Demo gallery ready");

    // The player crosses the room along row 7, west to east, then waits
    let start = Vec2::new(1.0, 7.0);
    let end_x = 12.0;
    let snapshot = drive(&mut sim, frames, |frame| {
        let walked = frame as f32 * DT * DEMO_WALK_SPEED;
        let tile = Vec2::new((start.x + walked).min(end_x), start.y);
        let canvas = tile * heist_core::constants::TILE_SIZE - Vec2::new(0.0, 16.0);
        Some(PlayerSnapshot::from_canvas(canvas, crouching))
    });
    print_summary(&snapshot);
}
