//! Route a handful of units across a random battlefield and print the map.
//!
//! Run: cargo run --bin skirmish -- [seed]

use std::io;

use skirmish_demo::Skirmish;

const DEFAULT_SEED: u64 = 42;

fn main() {
    let seed = match std::env::args().nth(1) {
        None => DEFAULT_SEED,
        Some(arg) => match arg.parse() {
            Ok(seed) => seed,
            Err(e) => {
                eprintln!("Error: invalid seed {arg:?}: {e}");
                std::process::exit(1);
            }
        },
    };

    let skirmish = Skirmish::generate(seed);
    let routes = skirmish.route_all();
    let mut stdout = io::stdout().lock();
    if let Err(e) = skirmish.render(&routes, &mut stdout) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
