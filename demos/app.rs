use mark_location_core::config::Config;
use mark_location_core::display::LogDisplaySink;
use mark_location_core::notification::LogNotificationSink;
use mark_location_core::replay::{GpxReplay, LocationSource};
use mark_location_core::session::{self, MarkSession};
use mark_location_core::{display, logs};
use std::env;

// usage: app <track.gpx> [config.json]
//
// Replays the track, marking the location at the first fix, and logs every
// distance update and notification.
pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: {} <track.gpx> [config.json]", args[0]);
        std::process::exit(1);
    }

    let config = match args.get(2) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    logs::init(".", config.level_filter()?)?;

    let session = MarkSession::new(
        &config,
        Box::new(LogNotificationSink),
        Box::new(LogDisplaySink),
    )?;
    let (tx, handle) = session::spawn(session);

    let mut replay = GpxReplay::open(&args[1])?.mark_after(1);
    println!("replaying {} fixes from {}", replay.len(), args[1]);
    replay.start(&tx)?;
    drop(tx);

    let session = handle
        .join()
        .map_err(|_| "session thread panicked".to_string())?;
    println!("final state: {}", session.arrival_state());
    if let Some(distance) = session.last_distance() {
        println!("{}", display::format_distance(distance));
    }
    Ok(())
}
