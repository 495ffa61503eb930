//! Synthetic hands and recordings shared by the integration tests.

#![allow(dead_code)]

use gestura::{
    hand::{Hand, Landmark, LandmarkIdx, NUM_LANDMARKS},
    resolution::Resolution,
};
use itertools::Itertools;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Index finger extended, everything else curled.
    Point,
    /// All fingers curled, thumb tucked in.
    Fist,
    /// All fingers extended, thumb spread.
    Palm,
}

const FINGERS: [(LandmarkIdx, LandmarkIdx); 3] = [
    (LandmarkIdx::MiddleFingerTip, LandmarkIdx::MiddleFingerPip),
    (LandmarkIdx::RingFingerTip, LandmarkIdx::RingFingerPip),
    (LandmarkIdx::PinkyTip, LandmarkIdx::PinkyPip),
];

/// Normalized coordinate of the center of pixel `px` in a `size` pixel wide axis.
pub fn norm(px: i32, size: u32) -> f32 {
    (px as f32 + 0.5) / size as f32
}

/// Builds a hand from normalized positions of the index fingertip and the palm center.
pub fn hand(gesture: Gesture, tip: (f32, f32), palm: (f32, f32)) -> Hand {
    let (px, py) = palm;
    let (tx, ty) = tip;
    let extended = |g: Gesture| g != Gesture::Fist;

    let mut hand = Hand::new([Landmark::new(px, py, 0.0); NUM_LANDMARKS]);
    for (tip_idx, pip_idx) in FINGERS {
        let pip_y = py - 0.1;
        let tip_y = if gesture == Gesture::Palm {
            pip_y - 0.05
        } else {
            pip_y + 0.05
        };
        hand = hand
            .with_landmark(pip_idx, Landmark::new(px, pip_y, 0.0))
            .with_landmark(tip_idx, Landmark::new(px, tip_y, 0.0));
    }

    let index_pip_y = if extended(gesture) { ty + 0.02 } else { ty - 0.02 };
    let thumb_tip_x = if gesture == Gesture::Fist { px + 0.01 } else { px - 0.01 };
    hand.with_landmark(LandmarkIdx::IndexFingerTip, Landmark::new(tx, ty, 0.0))
        .with_landmark(LandmarkIdx::IndexFingerPip, Landmark::new(tx, index_pip_y, 0.0))
        .with_landmark(LandmarkIdx::ThumbTip, Landmark::new(thumb_tip_x, py, 0.0))
}

/// A hand whose index fingertip is on pixel `(x, y)` of a frame of resolution `res`.
///
/// The palm center is 100 pixels below the fingertip.
pub fn at_pixel(gesture: Gesture, x: i32, y: i32, res: Resolution) -> Hand {
    let tip = (norm(x, res.width()), norm(y, res.height()));
    let palm = (tip.0, norm(y + 100, res.height()));
    hand(gesture, tip, palm)
}

/// A hand whose mirrored palm center is on screen pixel `(x, y)`.
pub fn palm_at_mirrored_pixel(gesture: Gesture, x: i32, y: i32, res: Resolution) -> Hand {
    let palm = (1.0 - norm(x, res.width()), norm(y, res.height()));
    hand(gesture, (palm.0, palm.1 - 0.2), palm)
}

/// Formats `frames` in the landmark recording format.
///
/// `None` entries become `quit` lines.
pub fn recording(res: Resolution, frames: &[Option<Vec<Hand>>]) -> String {
    let mut out = format!("# synthetic\n{} {}\n", res.width(), res.height());
    for frame in frames {
        match frame {
            Some(hands) => {
                let line = hands
                    .iter()
                    .map(|hand| {
                        hand.landmarks()
                            .iter()
                            .map(|lm| format!("{} {} {}", lm.x(), lm.y(), lm.z()))
                            .join(" ")
                    })
                    .join(" | ");
                out.push_str(&line);
            }
            None => out.push_str("quit"),
        }
        out.push('\n');
    }
    out
}
