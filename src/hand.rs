//! Hands as reported by a hand landmark detector, and everything derived from them.
//!
//! A [`Hand`] is the fixed set of 21 [`Landmark`]s the detector produces for every hand it finds
//! in a frame. The submodules derive the two inputs the interaction controllers work with:
//!
//! - [`pose`] classifies the hand shape ([`Pose`], [`FistDetector`]).
//! - [`pointer`] turns one landmark into a pixel position ([`PointerExtractor`]).
//!
//! [`Pose`]: pose::Pose
//! [`FistDetector`]: pose::FistDetector
//! [`PointerExtractor`]: pointer::PointerExtractor

pub mod landmark;
pub mod pointer;
pub mod pose;

use anyhow::bail;

use crate::image::{draw_line, draw_marker, Color, Image};

pub use landmark::{Landmark, LandmarkIdx, NUM_LANDMARKS};

/// The landmarks of a single detected hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    landmarks: [Landmark; NUM_LANDMARKS],
}

impl Hand {
    pub fn new(landmarks: [Landmark; NUM_LANDMARKS]) -> Self {
        Self { landmarks }
    }

    /// Creates a [`Hand`] from a sequence of landmarks in detector order.
    ///
    /// Returns an error if `landmarks` does not yield exactly [`NUM_LANDMARKS`] items.
    pub fn from_landmarks<I>(landmarks: I) -> anyhow::Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Landmark>,
    {
        let mut out = [Landmark::default(); NUM_LANDMARKS];
        let mut count = 0;
        for lm in landmarks {
            if count == NUM_LANDMARKS {
                bail!("expected {NUM_LANDMARKS} hand landmarks, got more");
            }
            out[count] = lm.into();
            count += 1;
        }
        if count != NUM_LANDMARKS {
            bail!("expected {NUM_LANDMARKS} hand landmarks, got {count}");
        }
        Ok(Self::new(out))
    }

    /// Returns a copy of `self` with the landmark at `idx` replaced.
    #[must_use]
    pub fn with_landmark(mut self, idx: LandmarkIdx, landmark: Landmark) -> Self {
        self.landmarks[idx as usize] = landmark;
        self
    }

    #[inline]
    pub fn landmark(&self, idx: LandmarkIdx) -> Landmark {
        self.landmarks[idx as usize]
    }

    #[inline]
    pub fn landmarks(&self) -> &[Landmark; NUM_LANDMARKS] {
        &self.landmarks
    }

    /// Draws the hand skeleton onto `target`, scaling the normalized landmarks to its size.
    pub fn draw(&self, target: &mut Image) {
        let (w, h) = (target.width() as f32, target.height() as f32);
        let px = |lm: Landmark| ((lm.x() * w) as i32, (lm.y() * h) as i32);

        for (a, b) in landmark::CONNECTIVITY {
            let (ax, ay) = px(self.landmark(*a));
            let (bx, by) = px(self.landmark(*b));
            draw_line(target, ax, ay, bx, by).color(Color::GREEN);
        }
        for lm in self.landmarks {
            let (x, y) = px(lm);
            draw_marker(target, x, y);
        }
    }
}
