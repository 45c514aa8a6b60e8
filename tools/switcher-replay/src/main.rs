//! App Switcher Scenario Replay
//!
//! Runs a JSON scenario against the in-memory window system and prints
//! the resulting indicator state as JSON.

mod scenario;

use std::{env, fs, process};

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use scenario::Scenario;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    let path = match args.iter().find(|a| !a.starts_with('-')) {
        Some(path) => path.clone(),
        None => {
            eprintln!("Usage: switcher-replay [--verbose] <scenario.json>");
            eprintln!();
            eprintln!("Replays a window-system scenario and prints the final indicator state.");
            process::exit(1);
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if verbose { Level::TRACE } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error: failed to install logger: {}", e);
        process::exit(1);
    }

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", path, e);
            process::exit(1);
        }
    };
    let scenario = match Scenario::from_json(&text) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Error: invalid scenario {}: {}", path, e);
            process::exit(1);
        }
    };

    info!(path = %path, steps = scenario.steps.len(), "replaying scenario");
    let report = scenario.run();

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: cannot encode report: {}", e);
            process::exit(1);
        }
    }
}
