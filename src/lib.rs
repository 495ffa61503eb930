//! Hand gesture interaction on top of hand landmark streams.
//!
//! This crate turns the per-frame output of a hand landmark detector (21 normalized keypoints per
//! hand) into two interactive applications:
//!
//! - [`paint::PaintSession`]: finger painting on a persistent canvas, with a color palette and an
//!   open-palm eraser.
//! - [`sorting::SortingGame`]: a waste sorting game where pieces of waste are grabbed with a fist
//!   and dropped into bins.
//!
//! Camera capture and landmark inference are external. Landmarks are fed in through a
//! [`source::LandmarkSource`], and [`session::run`] drives the frame loop.
//!
//! # Coordinates
//!
//! Landmark coordinates are normalized to the input frame: X points to the right, Y points *down*,
//! both in range 0.0 to 1.0. Pixel coordinates use the same orientation with the origin in the
//! top-left corner.
//!
//! # Environment Variables
//!
//! Some options can be overridden by setting environment variables, see [`config`].

use log::LevelFilter;

pub mod config;
pub mod filter;
pub mod hand;
pub mod image;
pub mod paint;
pub mod resolution;
pub mod session;
pub mod sorting;
pub mod source;
pub mod timer;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_CRATE_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and this library will log at *debug* level. `RUST_LOG` can be used to
/// override that.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
