//! Replays a hand landmark recording through a finger painting session.
//!
//! Usage: `finger_paint <recording> [out-dir]`
//!
//! Writes `composite.png` (the last displayed frame: hand skeletons, canvas and palette) and
//! `canvas.png` (the raw painting) to `out-dir`, which defaults to the current directory.

use std::path::PathBuf;

use anyhow::Context;
use gestura::{
    image::{Color, Image},
    paint::{PaintOptions, PaintSession},
    session::{self, Outcome},
    source::Recording,
};

fn main() -> anyhow::Result<()> {
    gestura::init_logger!();

    let mut args = std::env::args_os().skip(1);
    let recording = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("usage: finger_paint <recording> [out-dir]");
            std::process::exit(1);
        }
    };
    let out_dir = args.next().map_or_else(|| PathBuf::from("."), PathBuf::from);

    let source = Recording::open(&recording)?;
    let mut paint = PaintSession::new(PaintOptions::from_env()?);

    // there is no camera image, so the hand skeletons stand in for it
    let mut display = Image::new(0, 0);
    let outcome = session::run_with(source, &mut paint, |paint, frame| {
        let mut camera = Image::filled(frame.resolution(), Color::GRAY);
        for hand in frame.hands() {
            hand.draw(&mut camera);
        }
        paint.overlay_palette(&mut camera);
        display = paint.compose(&camera);
        Ok(())
    })?;
    match outcome {
        Outcome::Quit => log::info!("painting ended by user"),
        Outcome::SourceExhausted => log::info!("end of recording"),
        Outcome::Finished(never) => match never {},
    }

    let composite = out_dir.join("composite.png");
    display
        .save(&composite)
        .with_context(|| format!("failed to write '{}'", composite.display()))?;
    let canvas = out_dir.join("canvas.png");
    paint
        .canvas()
        .save(&canvas)
        .with_context(|| format!("failed to write '{}'", canvas.display()))?;
    log::info!("wrote {} and {}", composite.display(), canvas.display());

    Ok(())
}
