//! Finger painting on a persistent canvas.
//!
//! Each detected hand is a brush. Its pose decides what it does:
//!
//! - [`Pose::Neutral`] (e.g. a pointing index finger) draws with the tip of the index finger.
//! - [`Pose::Open`] erases a disk of the canvas around the palm.
//! - [`Pose::Closed`] lifts the brush.
//!
//! Independent of the pose, moving the index fingertip onto one of the [`Palette`] swatches selects
//! that swatch's color for all following strokes.

use std::{convert::Infallible, env::VarError, ops::ControlFlow};

use crate::{
    config::Overrides,
    filter::{Debounce, Filter},
    hand::{
        pointer::{Pointer, PointerExtractor},
        pose::Pose,
        Hand,
    },
    image::{draw_circle, draw_line, BlendMode, Color, Image},
    resolution::Resolution,
    session::FrameHandler,
    source::{DetectorThresholds, Frame},
};

/// A circular region of the screen that selects a brush color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub color: Color,
    pub center: Pointer,
}

/// The set of selectable brush colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    swatches: Vec<Swatch>,
    radius: u32,
}

impl Palette {
    /// Creates a palette whose swatches are all circles of the given `radius`.
    pub fn new(swatches: Vec<Swatch>, radius: u32) -> Self {
        Self { swatches, radius }
    }

    #[inline]
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Returns the color of the swatch under `pointer`, if any.
    ///
    /// The swatch edge itself does not count as a hit. If swatches overlap, the first one wins.
    pub fn hit(&self, pointer: Pointer) -> Option<Color> {
        let r = i64::from(self.radius);
        self.swatches
            .iter()
            .find(|swatch| {
                let dx = i64::from(pointer.x) - i64::from(swatch.center.x);
                let dy = i64::from(pointer.y) - i64::from(swatch.center.y);
                dx * dx + dy * dy < r * r
            })
            .map(|swatch| swatch.color)
    }

    /// Draws all swatches onto `target` and highlights the one matching `selected` with a ring.
    pub fn draw(&self, target: &mut Image, selected: Color) {
        for swatch in &self.swatches {
            draw_circle(target, swatch.center.x, swatch.center.y, self.radius).color(swatch.color);
            if swatch.color == selected {
                draw_circle(target, swatch.center.x, swatch.center.y, self.radius + 5)
                    .color(Color::WHITE)
                    .stroke_width(2);
            }
        }
    }
}

/// A row of six swatches along the top of the screen: red, green, blue, yellow, white and black.
impl Default for Palette {
    fn default() -> Self {
        let colors = [
            Color::RED,
            Color::GREEN,
            Color::BLUE,
            Color::YELLOW,
            Color::WHITE,
            Color::BLACK,
        ];
        let swatches = colors
            .into_iter()
            .zip((50..).step_by(100))
            .map(|(color, x)| Swatch {
                color,
                center: Pointer::new(x, 50),
            })
            .collect();
        Self::new(swatches, 20)
    }
}

/// Configuration of a [`PaintSession`].
#[derive(Debug, Clone)]
pub struct PaintOptions {
    palette: Palette,
    initial_color: Color,
    brush_width: u32,
    eraser_radius: u32,
    canvas_opacity: f32,
    debounce: u32,
    reset_on_hand_loss: bool,
    thresholds: DetectorThresholds,
}

impl Default for PaintOptions {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            initial_color: Color::BLUE,
            brush_width: 5,
            eraser_radius: 50,
            canvas_opacity: 0.5,
            debounce: 1,
            reset_on_hand_loss: false,
            thresholds: DetectorThresholds::default(),
        }
    }
}

impl PaintOptions {
    /// Creates the default options, with overrides from the environment applied.
    ///
    /// See [`crate::config`] for the supported variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_overrides(&Overrides::from_env())
    }

    fn from_overrides<F>(overrides: &Overrides<F>) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let mut options = Self::default();
        if let Some(window) = overrides.debounce_window()? {
            options = options.debounce(window);
        }
        Ok(options)
    }

    /// Sets the palette to select colors from.
    #[inline]
    pub fn palette(self, palette: Palette) -> Self {
        Self { palette, ..self }
    }

    /// Sets the brush color used before any swatch is selected. Defaults to blue.
    #[inline]
    pub fn initial_color(self, initial_color: Color) -> Self {
        Self {
            initial_color,
            ..self
        }
    }

    /// Sets the width of drawn strokes, in pixels. Defaults to 5.
    #[inline]
    pub fn brush_width(self, brush_width: u32) -> Self {
        Self {
            brush_width,
            ..self
        }
    }

    /// Sets the radius of the disk erased by an open palm, in pixels. Defaults to 50.
    #[inline]
    pub fn eraser_radius(self, eraser_radius: u32) -> Self {
        Self {
            eraser_radius,
            ..self
        }
    }

    /// Sets the weight of the canvas when it is composited onto the camera image.
    ///
    /// Defaults to 0.5 (an even mix of canvas and camera image).
    ///
    /// # Panics
    ///
    /// Panics if `canvas_opacity` is not between 0.0 and 1.0.
    pub fn canvas_opacity(self, canvas_opacity: f32) -> Self {
        assert!((0.0..=1.0).contains(&canvas_opacity));
        Self {
            canvas_opacity,
            ..self
        }
    }

    /// Sets how many consecutive frames a new pose must be seen for before it takes effect.
    ///
    /// Defaults to 1, which acts on every pose change immediately.
    ///
    /// # Panics
    ///
    /// Panics if `frames` is 0.
    pub fn debounce(self, frames: u32) -> Self {
        assert!(frames > 0, "debounce window must be at least 1");
        Self {
            debounce: frames,
            ..self
        }
    }

    /// Sets whether a stroke is ended when its hand is not detected in a frame.
    ///
    /// By default, only a [`Pose::Closed`] or [`Pose::Open`] hand ends a stroke, and a hand that
    /// briefly leaves the frame continues its stroke when it comes back.
    #[inline]
    pub fn reset_on_hand_loss(self, reset_on_hand_loss: bool) -> Self {
        Self {
            reset_on_hand_loss,
            ..self
        }
    }

    /// Sets the confidence thresholds the landmark detector should be configured with.
    #[inline]
    pub fn thresholds(self, thresholds: DetectorThresholds) -> Self {
        Self { thresholds, ..self }
    }

    #[inline]
    pub fn detector_thresholds(&self) -> DetectorThresholds {
        self.thresholds
    }
}

/// Something that happened on the canvas during a [`PaintSession::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintEvent {
    /// A stroke segment was drawn.
    Segment {
        from: Pointer,
        to: Pointer,
        color: Color,
    },
    /// A disk around `center` was erased.
    Erase { center: Pointer },
    /// The brush color was changed by touching a swatch.
    ColorSelected(Color),
}

/// Brush state of one hand.
///
/// Tracks are identified by the position of their hand in the detector output.
#[derive(Debug)]
struct Track {
    /// Index fingertip position of the previous frame, if that frame drew.
    previous: Option<Pointer>,
    pose: Debounce<Pose>,
}

impl Track {
    fn new(debounce: u32) -> Self {
        Self {
            previous: None,
            pose: Debounce::new(debounce),
        }
    }

    /// Called for frames in which the track's hand is missing.
    ///
    /// The pose history is always dropped, so a hand that reappears starts out with its own pose.
    fn lose_hand(&mut self, end_stroke: bool) {
        self.pose.reset();
        if end_stroke {
            self.previous = None;
        }
    }
}

/// State of a finger painting session: the canvas, the brush color and one track per hand.
pub struct PaintSession {
    options: PaintOptions,
    canvas: Image,
    color: Color,
    tracks: Vec<Track>,
    events: Vec<PaintEvent>,
}

impl PaintSession {
    /// Creates a new session.
    ///
    /// The canvas is created with the resolution of the first frame passed to
    /// [`PaintSession::update`].
    pub fn new(options: PaintOptions) -> Self {
        log::debug!("starting paint session with {:?}", options);
        Self {
            color: options.initial_color,
            options,
            canvas: Image::new(0, 0),
            tracks: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Returns the persistent drawing canvas.
    #[inline]
    pub fn canvas(&self) -> &Image {
        &self.canvas
    }

    /// Returns the current brush color.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn options(&self) -> &PaintOptions {
        &self.options
    }

    /// Returns the last drawn position of the hand at `slot`, or `None` if it is not drawing.
    pub fn previous_pointer(&self, slot: usize) -> Option<Pointer> {
        self.tracks.get(slot).and_then(|track| track.previous)
    }

    /// Processes the hands of one frame and returns what happened on the canvas.
    ///
    /// Hands are processed in detector order. If the frame resolution differs from the canvas
    /// resolution, the canvas is replaced with a new, black one.
    pub fn update(&mut self, frame: &Frame) -> &[PaintEvent] {
        self.events.clear();
        self.ensure_canvas(frame.resolution());

        let hands = frame.hands();
        while self.tracks.len() < hands.len() {
            self.tracks.push(Track::new(self.options.debounce));
        }
        for track in &mut self.tracks[hands.len()..] {
            track.lose_hand(self.options.reset_on_hand_loss);
        }

        for (slot, hand) in hands.iter().enumerate() {
            self.update_hand(slot, hand, frame.resolution());
        }

        &self.events
    }

    fn ensure_canvas(&mut self, res: Resolution) {
        if self.canvas.resolution() != res {
            log::debug!("creating {} canvas", res);
            self.canvas = Image::filled(res, Color::BLACK);
        }
    }

    fn update_hand(&mut self, slot: usize, hand: &Hand, res: Resolution) {
        let pointer = PointerExtractor::index_fingertip().extract(hand, res);
        let track = &mut self.tracks[slot];
        let pose = track.pose.push(Pose::classify(hand));

        let drawing = match pose {
            Pose::Closed => false,
            Pose::Open => {
                let palm = PointerExtractor::palm_center().extract(hand, res);
                log::trace!("hand {slot} erasing at {},{}", palm.x, palm.y);
                draw_circle(&mut self.canvas, palm.x, palm.y, self.options.eraser_radius)
                    .color(Color::BLACK);
                self.events.push(PaintEvent::Erase { center: palm });
                false
            }
            Pose::Neutral => true,
        };

        if let Some(color) = self.options.palette.hit(pointer) {
            if color != self.color {
                log::debug!("hand {slot} selected color {:?}", color);
                self.color = color;
                self.events.push(PaintEvent::ColorSelected(color));
            }
        }

        if !drawing {
            track.previous = None;
            return;
        }

        if let Some(prev) = track.previous {
            draw_line(&mut self.canvas, prev.x, prev.y, pointer.x, pointer.y)
                .color(self.color)
                .stroke_width(self.options.brush_width);
            self.events.push(PaintEvent::Segment {
                from: prev,
                to: pointer,
                color: self.color,
            });
        }
        track.previous = Some(pointer);
    }

    /// Composites the canvas onto a camera image for display.
    ///
    /// The canvas is stretched to the size of `camera` if necessary and mixed in with the
    /// configured opacity. The palette is meant to be drawn onto `camera` with
    /// [`PaintSession::overlay_palette`] beforehand, so that it ends up behind the strokes.
    pub fn compose(&self, camera: &Image) -> Image {
        let mut out = camera.clone();
        out.blend_from(&self.canvas)
            .mode(BlendMode::Weighted(self.options.canvas_opacity));
        out
    }

    /// Draws the palette onto `target`, highlighting the current brush color.
    pub fn overlay_palette(&self, target: &mut Image) {
        self.options.palette.draw(target, self.color);
    }
}

impl FrameHandler for PaintSession {
    type Summary = Infallible;

    fn handle_frame(&mut self, frame: &Frame) -> ControlFlow<Infallible> {
        self.update(frame);
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use crate::hand::{Landmark, LandmarkIdx, NUM_LANDMARKS};

    use super::*;

    const RES: Resolution = Resolution::new(1000, 1000);

    /// A hand in the given pose, with its index fingertip at pixel `(x, y)` of [`RES`] and its
    /// palm 100 pixels below that.
    fn hand(pose: Pose, x: i32, y: i32) -> Hand {
        let (nx, ny) = (x as f32 / 1000.0 + 0.0001, y as f32 / 1000.0 + 0.0001);
        let tip_offset = match pose {
            Pose::Closed => 0.01,
            Pose::Open | Pose::Neutral => -0.01,
        };
        let mut hand = Hand::new([Landmark::new(nx, ny + 0.05, 0.0); NUM_LANDMARKS])
            .with_landmark(LandmarkIdx::MiddleFingerMcp, Landmark::new(nx, ny + 0.1, 0.0));
        for (tip, pip) in [
            (LandmarkIdx::MiddleFingerTip, LandmarkIdx::MiddleFingerPip),
            (LandmarkIdx::RingFingerTip, LandmarkIdx::RingFingerPip),
            (LandmarkIdx::PinkyTip, LandmarkIdx::PinkyPip),
        ] {
            let pip_y = hand.landmark(pip).y();
            hand = hand.with_landmark(tip, Landmark::new(nx, pip_y + tip_offset, 0.0));
        }
        let index_pip = match pose {
            Pose::Open | Pose::Neutral => ny + 0.01,
            Pose::Closed => ny - 0.01,
        };
        hand = hand
            .with_landmark(LandmarkIdx::IndexFingerTip, Landmark::new(nx, ny, 0.0))
            .with_landmark(LandmarkIdx::IndexFingerPip, Landmark::new(nx, index_pip, 0.0));
        if pose == Pose::Neutral {
            // curl the pinky so that not all fingers are extended
            let pip_y = hand.landmark(LandmarkIdx::PinkyPip).y();
            hand = hand.with_landmark(LandmarkIdx::PinkyTip, Landmark::new(nx, pip_y + 0.01, 0.0));
        }
        assert_eq!(Pose::classify(&hand), pose);
        hand
    }

    fn frame(hands: Vec<Hand>) -> Frame {
        Frame::new(RES, hands)
    }

    fn segments(events: &[PaintEvent]) -> Vec<(Pointer, Pointer)> {
        events
            .iter()
            .filter_map(|ev| match ev {
                PaintEvent::Segment { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn stroke_breaks_on_closed_hand() {
        let mut session = PaintSession::new(PaintOptions::default());
        let mut all = Vec::new();
        for hand in [
            hand(Pose::Neutral, 300, 300),
            hand(Pose::Neutral, 400, 300),
            hand(Pose::Closed, 500, 300),
            hand(Pose::Neutral, 600, 300),
        ] {
            all.extend(segments(session.update(&frame(vec![hand]))));
        }
        assert_eq!(all, [(Pointer::new(300, 300), Pointer::new(400, 300))]);
        assert_eq!(session.previous_pointer(0), Some(Pointer::new(600, 300)));

        let canvas = session.canvas();
        assert_eq!(canvas.get(350, 300), Color::BLUE);
        assert_eq!(canvas.get(350, 301), Color::BLUE);
        assert_eq!(canvas.get(550, 300), Color::BLACK);
    }

    #[test]
    fn first_drawing_frame_draws_nothing() {
        let mut session = PaintSession::new(PaintOptions::default());
        let events = session.update(&frame(vec![hand(Pose::Neutral, 300, 300)]));
        assert!(events.is_empty());
        assert!(session.canvas().pixels().all(|c| c == Color::BLACK));
    }

    #[test]
    fn swatch_selects_color_mid_stroke() {
        let mut session = PaintSession::new(PaintOptions::default());
        session.update(&frame(vec![hand(Pose::Neutral, 150, 200)]));
        let events = session
            .update(&frame(vec![hand(Pose::Neutral, 155, 45)]))
            .to_vec();
        assert_eq!(session.color(), Color::GREEN);
        assert!(events.contains(&PaintEvent::ColorSelected(Color::GREEN)));
        assert!(events.contains(&PaintEvent::Segment {
            from: Pointer::new(150, 200),
            to: Pointer::new(155, 45),
            color: Color::GREEN,
        }));

        // selecting the same color again is not reported
        let events = session.update(&frame(vec![hand(Pose::Neutral, 150, 50)]));
        assert!(!events.contains(&PaintEvent::ColorSelected(Color::GREEN)));
    }

    #[test]
    fn swatch_edge_is_not_a_hit() {
        let palette = Palette::default();
        assert_eq!(palette.hit(Pointer::new(150, 50)), Some(Color::GREEN));
        assert_eq!(palette.hit(Pointer::new(169, 50)), Some(Color::GREEN));
        assert_eq!(palette.hit(Pointer::new(170, 50)), None);
        assert_eq!(palette.hit(Pointer::new(165, 65)), None);
        assert_eq!(palette.hit(Pointer::new(550, 31)), Some(Color::BLACK));
        assert_eq!(palette.hit(Pointer::new(100, 50)), None);
    }

    #[test]
    fn color_selection_works_while_not_drawing() {
        let mut session = PaintSession::new(PaintOptions::default());
        session.update(&frame(vec![hand(Pose::Closed, 350, 50)]));
        assert_eq!(session.color(), Color::YELLOW);
        assert_eq!(session.previous_pointer(0), None);
    }

    #[test]
    fn open_palm_erases() {
        let mut session = PaintSession::new(PaintOptions::default().initial_color(Color::WHITE));
        session.update(&frame(vec![hand(Pose::Neutral, 200, 500)]));
        session.update(&frame(vec![hand(Pose::Neutral, 800, 500)]));
        assert_eq!(session.canvas().get(500, 500), Color::WHITE);
        assert_eq!(session.canvas().get(700, 500), Color::WHITE);

        // palm is 100 px below the fingertip
        let events = session.update(&frame(vec![hand(Pose::Open, 500, 400)]));
        assert_eq!(
            events,
            [PaintEvent::Erase {
                center: Pointer::new(500, 500)
            }]
        );
        assert_eq!(session.previous_pointer(0), None);
        assert_eq!(session.canvas().get(500, 500), Color::BLACK);
        assert_eq!(session.canvas().get(540, 500), Color::BLACK);
        assert_eq!(session.canvas().get(700, 500), Color::WHITE);
    }

    #[test]
    fn hands_have_separate_tracks() {
        let mut session = PaintSession::new(PaintOptions::default());
        session.update(&frame(vec![
            hand(Pose::Neutral, 100, 500),
            hand(Pose::Neutral, 900, 500),
        ]));
        let events = session.update(&frame(vec![
            hand(Pose::Neutral, 100, 600),
            hand(Pose::Neutral, 900, 600),
        ]));
        assert_eq!(
            segments(events),
            [
                (Pointer::new(100, 500), Pointer::new(100, 600)),
                (Pointer::new(900, 500), Pointer::new(900, 600)),
            ]
        );
    }

    #[test]
    fn hand_loss_keeps_stroke_by_default() {
        let mut session = PaintSession::new(PaintOptions::default());
        session.update(&frame(vec![hand(Pose::Neutral, 300, 300)]));
        session.update(&frame(vec![]));
        let events = session.update(&frame(vec![hand(Pose::Neutral, 400, 300)]));
        assert_eq!(
            segments(events),
            [(Pointer::new(300, 300), Pointer::new(400, 300))]
        );

        let mut session = PaintSession::new(PaintOptions::default().reset_on_hand_loss(true));
        session.update(&frame(vec![hand(Pose::Neutral, 300, 300)]));
        session.update(&frame(vec![]));
        assert_eq!(session.previous_pointer(0), None);
        let events = session.update(&frame(vec![hand(Pose::Neutral, 400, 300)]));
        assert!(segments(events).is_empty());
    }

    #[test]
    fn debounce_ignores_single_frame_fist() {
        let mut session = PaintSession::new(PaintOptions::default().debounce(2));
        let mut all = Vec::new();
        for hand in [
            hand(Pose::Neutral, 300, 300),
            hand(Pose::Closed, 350, 300),
            hand(Pose::Neutral, 400, 300),
        ] {
            all.extend(segments(session.update(&frame(vec![hand]))));
        }
        assert_eq!(
            all,
            [
                (Pointer::new(300, 300), Pointer::new(350, 300)),
                (Pointer::new(350, 300), Pointer::new(400, 300)),
            ]
        );
    }

    #[test]
    fn returning_hand_does_not_inherit_pose() {
        let mut session = PaintSession::new(PaintOptions::default().debounce(3));
        session.update(&frame(vec![hand(Pose::Closed, 300, 300)]));
        session.update(&frame(vec![]));
        session.update(&frame(vec![hand(Pose::Neutral, 400, 300)]));
        assert_eq!(session.previous_pointer(0), Some(Pointer::new(400, 300)));
        let events = session.update(&frame(vec![hand(Pose::Neutral, 500, 300)]));
        assert_eq!(
            segments(events),
            [(Pointer::new(400, 300), Pointer::new(500, 300))]
        );
    }

    #[test]
    fn options_from_overrides() {
        use crate::config::{tests::vars, ENV_VAR_DEBOUNCE};

        let options = PaintOptions::from_overrides(&vars(&[(ENV_VAR_DEBOUNCE, "3")])).unwrap();
        assert_eq!(options.debounce, 3);
        let options = PaintOptions::from_overrides(&vars(&[])).unwrap();
        assert_eq!(options.debounce, 1);
        assert!(PaintOptions::from_overrides(&vars(&[(ENV_VAR_DEBOUNCE, "0")])).is_err());
    }

    #[test]
    fn canvas_follows_frame_resolution() {
        let mut session = PaintSession::new(PaintOptions::default());
        assert_eq!(session.canvas().resolution(), Resolution::new(0, 0));
        session.update(&Frame::empty(Resolution::RES_480P));
        assert_eq!(session.canvas().resolution(), Resolution::RES_480P);
        session.update(&Frame::empty(Resolution::new(320, 240)));
        assert_eq!(session.canvas().resolution(), Resolution::new(320, 240));
    }

    #[test]
    fn compose_mixes_canvas_and_camera() {
        let mut session = PaintSession::new(PaintOptions::default().initial_color(Color::WHITE));
        session.update(&Frame::empty(Resolution::new(4, 4)));
        let camera = Image::filled(Resolution::new(4, 4), Color::from_rgb8(100, 100, 100));
        let out = session.compose(&camera);
        assert_eq!(out.get(0, 0), Color::from_rgb8(50, 50, 50));
    }

    #[test]
    fn palette_overlay_marks_selection() {
        let session = PaintSession::new(PaintOptions::default());
        let mut target = Image::filled(Resolution::RES_480P, Color::GRAY);
        session.overlay_palette(&mut target);
        assert_eq!(target.get(50, 50), Color::RED);
        assert_eq!(target.get(250, 50), Color::BLUE);
        // ring around the selected (blue) swatch, but not around red
        assert_eq!(target.get(250, 25), Color::WHITE);
        assert_eq!(target.get(50, 25), Color::GRAY);
    }
}
