//! Coarse hand pose classification.
//!
//! All classifiers in here compare landmark coordinates of a single frame against each other. They
//! keep no state, so noisy landmarks can make the result flicker between frames. Use
//! [`Debounce`][crate::filter::Debounce] if that is a problem.

use std::{fmt, str::FromStr};

use anyhow::bail;

use super::{Hand, LandmarkIdx};

/// Fingertip and PIP joint of the four non-thumb fingers.
const FINGERS: [(LandmarkIdx, LandmarkIdx); 4] = {
    use LandmarkIdx::*;
    [
        (IndexFingerTip, IndexFingerPip),
        (MiddleFingerTip, MiddleFingerPip),
        (RingFingerTip, RingFingerPip),
        (PinkyTip, PinkyPip),
    ]
};

/// Coarse shape of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pose {
    /// All four fingers are extended (fingertips above their PIP joints).
    Open,
    /// All four fingers are curled (fingertips below their PIP joints).
    Closed,
    /// Anything in between, for example a pointing index finger.
    Neutral,
}

impl Pose {
    /// Classifies a hand by comparing the height of each fingertip to its PIP joint.
    ///
    /// The thumb is not taken into account. Image Y coordinates grow downwards, so a curled finger
    /// has a *larger* Y coordinate at the tip than at the PIP joint.
    pub fn classify(hand: &Hand) -> Self {
        let curled = FINGERS.map(|(tip, pip)| hand.landmark(tip).y() > hand.landmark(pip).y());
        let extended = FINGERS.map(|(tip, pip)| hand.landmark(tip).y() < hand.landmark(pip).y());

        if curled.iter().all(|c| *c) {
            Pose::Closed
        } else if extended.iter().all(|e| *e) {
            Pose::Open
        } else {
            Pose::Neutral
        }
    }
}

/// Decides whether a hand is balled into a fist.
///
/// The painting canvas and the sorting game historically used different rules for this, and both
/// are kept selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FistDetector {
    /// A fist is a [`Pose::Closed`] hand: all four fingers curled.
    #[default]
    Strict,
    /// A fist is a hand whose index finger is not extended and whose thumb tip is not left of the
    /// thumb IP joint.
    ///
    /// This is cheaper and more forgiving than [`FistDetector::Strict`], but the thumb test
    /// depends on which hand is used and whether the image is mirrored.
    Light,
}

impl FistDetector {
    pub fn is_fist(&self, hand: &Hand) -> bool {
        match self {
            FistDetector::Strict => Pose::classify(hand) == Pose::Closed,
            FistDetector::Light => {
                let index_open = hand.landmark(LandmarkIdx::IndexFingerTip).y()
                    < hand.landmark(LandmarkIdx::IndexFingerPip).y();
                let thumb_open = hand.landmark(LandmarkIdx::ThumbTip).x()
                    < hand.landmark(LandmarkIdx::ThumbIp).x();
                !(index_open || thumb_open)
            }
        }
    }
}

impl FromStr for FistDetector {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "light" => Ok(Self::Light),
            _ => bail!("invalid fist detector '{s}' (expected `strict` or `light`)"),
        }
    }
}

impl fmt::Display for FistDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FistDetector::Strict => "strict",
            FistDetector::Light => "light",
        })
    }
}
