//! Landmark sources: where the per-frame hand landmarks come from.
//!
//! Camera capture and landmark inference are not part of this crate. Anything that can produce
//! [`Hand`]s per frame can drive the interaction controllers by implementing [`LandmarkSource`].
//! This module provides two sources that need no camera:
//!
//! - [`Recording`] replays landmarks from a text recording.
//! - [`ScriptedSource`] plays back a list of [`Input`]s held in memory.
//!
//! # Recording Format
//!
//! Recordings are line-based text files:
//!
//! - Empty lines before the header and lines starting with `#` are ignored.
//! - The first remaining line is the header `<width> <height>`, the resolution of the recorded
//!   frames.
//! - Every following line is one frame. Hands are separated by `|`, and every hand consists of 63
//!   whitespace-separated numbers: `x y z` of each of the 21 landmarks, in detector order.
//! - An empty line is a frame in which no hand was detected.
//! - A line containing only `quit` or `esc` is the exit signal (as if the user pressed *Escape*).

use std::{
    collections::VecDeque,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{bail, Context};
use itertools::Itertools;

use crate::{
    hand::{Hand, NUM_LANDMARKS},
    resolution::Resolution,
};

/// Confidence thresholds handed to an external hand landmark detector.
///
/// These are not interpreted by this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorThresholds {
    /// Minimum confidence for a new hand to be detected.
    pub detection: f32,
    /// Minimum confidence for a hand to keep being tracked across frames.
    pub tracking: f32,
}

impl Default for DetectorThresholds {
    fn default() -> Self {
        Self {
            detection: 0.7,
            tracking: 0.7,
        }
    }
}

/// The hands detected in a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    resolution: Resolution,
    hands: Vec<Hand>,
}

impl Frame {
    pub fn new(resolution: Resolution, hands: Vec<Hand>) -> Self {
        Self { resolution, hands }
    }

    /// Creates a frame in which no hand was detected.
    pub fn empty(resolution: Resolution) -> Self {
        Self::new(resolution, Vec::new())
    }

    /// Returns the resolution of the camera frame the landmarks were computed on.
    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Returns the detected hands, in detector order.
    #[inline]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }
}

/// Per-iteration input of the frame loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// A new frame was captured and processed by the landmark detector.
    Frame(Frame),
    /// The user asked to quit (pressed *Escape* or closed the window).
    Quit,
}

/// A source of per-frame hand landmarks.
pub trait LandmarkSource {
    /// Blocks until the next input is available and returns it.
    ///
    /// Returns `Ok(None)` when no more frames can be obtained (for example because the camera
    /// failed to deliver a frame, or a recording has ended). This ends the session normally.
    fn next_input(&mut self) -> anyhow::Result<Option<Input>>;
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for &mut S {
    fn next_input(&mut self) -> anyhow::Result<Option<Input>> {
        (**self).next_input()
    }
}

/// A [`LandmarkSource`] that plays back a fixed list of [`Input`]s.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    inputs: VecDeque<Input>,
}

impl ScriptedSource {
    pub fn new<I: IntoIterator<Item = Input>>(inputs: I) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
        }
    }

    /// Creates a source that yields one frame per entry of `frames`, all at resolution `res`.
    pub fn from_frames<I>(res: Resolution, frames: I) -> Self
    where
        I: IntoIterator<Item = Vec<Hand>>,
    {
        Self::new(
            frames
                .into_iter()
                .map(|hands| Input::Frame(Frame::new(res, hands))),
        )
    }

    /// Appends an input to the end of the script.
    pub fn push(&mut self, input: Input) {
        self.inputs.push_back(input);
    }

    /// Returns the number of inputs that have not been consumed yet.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl LandmarkSource for ScriptedSource {
    fn next_input(&mut self) -> anyhow::Result<Option<Input>> {
        Ok(self.inputs.pop_front())
    }
}

/// A [`LandmarkSource`] replaying a landmark recording.
///
/// See the [module documentation](self) for the file format.
pub struct Recording<R> {
    reader: R,
    resolution: Resolution,
    line_no: usize,
    line: String,
}

impl Recording<BufReader<File>> {
    /// Opens a recording file.
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open recording '{}'", path.display()))?;
        let recording = Self::new(BufReader::new(file))
            .with_context(|| format!("invalid recording '{}'", path.display()))?;
        log::debug!(
            "opened recording '{}' ({})",
            path.display(),
            recording.resolution
        );
        Ok(recording)
    }
}

impl<R: BufRead> Recording<R> {
    /// Creates a recording from a reader, reading the header line.
    pub fn new(reader: R) -> anyhow::Result<Self> {
        let mut this = Self {
            reader,
            resolution: Resolution::new(0, 0),
            line_no: 0,
            line: String::new(),
        };

        loop {
            if !this.read_line()? {
                bail!("recording is empty (missing `<width> <height>` header)");
            }
            let line = this.line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((width, height)) = line.split_whitespace().collect_tuple() else {
                bail!("line {}: expected `<width> <height>` header, got '{line}'", this.line_no);
            };
            let width: u32 = width
                .parse()
                .with_context(|| format!("line {}: invalid width '{width}'", this.line_no))?;
            let height: u32 = height
                .parse()
                .with_context(|| format!("line {}: invalid height '{height}'", this.line_no))?;
            this.resolution = Resolution::new(width, height);
            return Ok(this);
        }
    }

    /// Returns the frame resolution declared in the recording's header.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Reads the next line into `self.line`, returning `false` at the end of input.
    fn read_line(&mut self) -> anyhow::Result<bool> {
        self.line.clear();
        let n = self
            .reader
            .read_line(&mut self.line)
            .with_context(|| format!("failed to read line {}", self.line_no + 1))?;
        if n == 0 {
            return Ok(false);
        }
        self.line_no += 1;
        Ok(true)
    }

    fn parse_hand(&self, text: &str) -> anyhow::Result<Hand> {
        let values = text
            .split_whitespace()
            .map(|v| {
                v.parse::<f32>()
                    .with_context(|| format!("line {}: invalid coordinate '{v}'", self.line_no))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        if values.len() != NUM_LANDMARKS * 3 {
            bail!(
                "line {}: expected {} coordinates per hand, got {}",
                self.line_no,
                NUM_LANDMARKS * 3,
                values.len()
            );
        }
        Hand::from_landmarks(values.into_iter().tuples().map(|(x, y, z)| [x, y, z]))
    }
}

impl<R: BufRead> LandmarkSource for Recording<R> {
    fn next_input(&mut self) -> anyhow::Result<Option<Input>> {
        loop {
            if !self.read_line()? {
                return Ok(None);
            }
            let line = self.line.trim();
            if line.starts_with('#') {
                continue;
            }
            if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("esc") {
                return Ok(Some(Input::Quit));
            }
            if line.is_empty() {
                return Ok(Some(Input::Frame(Frame::empty(self.resolution))));
            }

            let hands = line
                .split('|')
                .map(|hand| self.parse_hand(hand))
                .collect::<anyhow::Result<Vec<_>>>()?;
            return Ok(Some(Input::Frame(Frame::new(self.resolution, hands))));
        }
    }
}
