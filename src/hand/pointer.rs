//! Mapping hands to pixel positions.

use nalgebra::Point2;

use crate::resolution::Resolution;

use super::{Hand, LandmarkIdx};

/// A pointer position in integer pixel coordinates of a frame or screen.
pub type Pointer = Point2<i32>;

/// Extracts a [`Pointer`] from a [`Hand`] by scaling one of its landmarks to a target resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerExtractor {
    landmark: LandmarkIdx,
    mirror: bool,
}

impl PointerExtractor {
    /// Points with the tip of the index finger. Used for drawing and color selection.
    pub const fn index_fingertip() -> Self {
        Self {
            landmark: LandmarkIdx::IndexFingerTip,
            mirror: false,
        }
    }

    /// Points with the center of the palm. Used for dragging items around.
    pub const fn palm_center() -> Self {
        Self {
            landmark: LandmarkIdx::PALM_CENTER,
            mirror: false,
        }
    }

    /// Sets whether the X coordinate is mirrored (`x' = 1 - x`) before scaling.
    ///
    /// This is needed when the landmarks were computed on an unmirrored camera image, but the
    /// pointer is used on a mirrored display. Off by default.
    #[must_use]
    pub const fn mirrored(self, mirror: bool) -> Self {
        Self { mirror, ..self }
    }

    #[inline]
    pub fn landmark(&self) -> LandmarkIdx {
        self.landmark
    }

    #[inline]
    pub fn is_mirrored(&self) -> bool {
        self.mirror
    }

    /// Computes the pointer position of `hand` in a frame of resolution `res`.
    ///
    /// Coordinates are truncated towards zero. Landmarks outside the normalized range produce
    /// pointers outside the frame.
    pub fn extract(&self, hand: &Hand, res: Resolution) -> Pointer {
        let lm = hand.landmark(self.landmark);
        let x = if self.mirror { 1.0 - lm.x() } else { lm.x() };
        Pointer::new(
            (x * res.width() as f32) as i32,
            (lm.y() * res.height() as f32) as i32,
        )
    }
}
