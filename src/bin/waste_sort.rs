//! Replays a hand landmark recording through a round of the waste sorting game.
//!
//! Usage: `waste_sort <recording> [out.png]`
//!
//! Logs the round summary and writes a rendering of the final scene to `out.png` (default:
//! `scene.png`).

use std::path::PathBuf;

use anyhow::Context;
use gestura::{
    image::{Color, Image},
    session::{self, Outcome},
    sorting::{SortingGame, SortingOptions},
    source::Recording,
};

fn main() -> anyhow::Result<()> {
    gestura::init_logger!();

    let mut args = std::env::args_os().skip(1);
    let recording = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("usage: waste_sort <recording> [out.png]");
            std::process::exit(1);
        }
    };
    let out = args
        .next()
        .map_or_else(|| PathBuf::from("scene.png"), PathBuf::from);

    let source = Recording::open(&recording)?;
    let mut game = SortingGame::new(SortingOptions::from_env()?);

    match session::run(source, &mut game)? {
        Outcome::Finished(summary) => println!("Game over: {summary}"),
        Outcome::Quit => println!("Game aborted: {}", game.summary()),
        Outcome::SourceExhausted => println!("Recording ended early: {}", game.summary()),
    }

    let mut image = Image::filled(game.options().screen_resolution(), Color::BLACK);
    game.draw(&mut image);
    image
        .save(&out)
        .with_context(|| format!("failed to write '{}'", out.display()))?;
    log::info!("wrote {}", out.display());

    Ok(())
}
