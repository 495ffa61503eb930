//! A waste sorting game controlled by hand gestures.
//!
//! Pieces of waste spawn near the top of the screen. The player grabs one by making a fist close
//! to it, drags it over a bin, and drops it by opening the hand. Dropping a piece into its matching
//! bin classifies it, dropping it into any other bin sends it back to the top of the screen. The
//! round ends once every piece is classified.

use std::{env::VarError, fmt, ops::ControlFlow};

use crate::{
    config::{self, Overrides},
    filter::{Debounce, Filter},
    hand::{
        pointer::{Pointer, PointerExtractor},
        pose::FistDetector,
    },
    image::{draw_rect, Color, Image, Rect},
    resolution::Resolution,
    session::FrameHandler,
    source::{DetectorThresholds, Frame},
};

/// The kinds of waste that have their own bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WasteKind {
    Plastic,
    Metal,
    Paper,
}

impl WasteKind {
    /// Color the bins of this kind are painted in.
    pub fn color(&self) -> Color {
        match self {
            WasteKind::Plastic => Color::RED,
            WasteKind::Metal => Color::YELLOW,
            WasteKind::Paper => Color::BLUE,
        }
    }
}

impl fmt::Display for WasteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WasteKind::Plastic => "plastico",
            WasteKind::Metal => "metal",
            WasteKind::Paper => "papel",
        })
    }
}

/// A static drop target accepting one [`WasteKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bin {
    pub kind: WasteKind,
    pub rect: Rect,
}

/// Description of a piece of waste to spawn at the start of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub name: String,
    pub target: WasteKind,
}

impl ItemSpec {
    pub fn new<N: Into<String>>(name: N, target: WasteKind) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }
}

/// A piece of waste in play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovableItem {
    name: String,
    target: WasteKind,
    /// Top-left corner of the sprite.
    position: Pointer,
    held_by: Option<usize>,
    classified: bool,
    correctly_classified: bool,
}

impl MovableItem {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the kind of bin this item belongs in.
    #[inline]
    pub fn target(&self) -> WasteKind {
        self.target
    }

    /// Returns the position of the item's sprite (its top-left corner).
    #[inline]
    pub fn position(&self) -> Pointer {
        self.position
    }

    /// Returns whether a hand holds this item.
    ///
    /// An item is only released when its hand opens within grab distance of it. A hand that opens
    /// farther away keeps holding it, and the item jumps to the hand when that hand closes again.
    #[inline]
    pub fn held_in_hand(&self) -> bool {
        self.held_by.is_some()
    }

    /// Returns the slot of the hand holding this item, if any.
    #[inline]
    pub fn held_by(&self) -> Option<usize> {
        self.held_by
    }

    /// Returns whether the item has been dropped into a bin for good.
    ///
    /// Classified items are removed from play and no longer change.
    #[inline]
    pub fn classified(&self) -> bool {
        self.classified
    }

    #[inline]
    pub fn correctly_classified(&self) -> bool {
        self.correctly_classified
    }

    /// Returns whether `pointer` is close enough to grab or drop this item.
    ///
    /// That is the case when it lies strictly within `half_width` pixels of the item position on
    /// both axes.
    fn is_near(&self, pointer: Pointer, half_width: i32) -> bool {
        let (dx, dy) = (pointer.x - self.position.x, pointer.y - self.position.y);
        dx.abs() < half_width && dy.abs() < half_width
    }
}

/// Configuration of a [`SortingGame`].
#[derive(Debug, Clone)]
pub struct SortingOptions {
    screen: Resolution,
    margin: i32,
    sprite_size: u32,
    grab_distance: i32,
    mirror: bool,
    fist: FistDetector,
    center_sprite: bool,
    debounce: u32,
    bins: Vec<Bin>,
    items: Vec<ItemSpec>,
    thresholds: DetectorThresholds,
}

impl Default for SortingOptions {
    fn default() -> Self {
        let screen = Resolution::RES_720P;
        let bin_y = screen.height() as i32 - 200;
        Self {
            screen,
            margin: 50,
            sprite_size: 80,
            grab_distance: 50,
            mirror: true,
            fist: FistDetector::Light,
            center_sprite: false,
            debounce: 1,
            bins: vec![
                Bin {
                    kind: WasteKind::Plastic,
                    rect: Rect::from_top_left(200, bin_y, 150, 150),
                },
                Bin {
                    kind: WasteKind::Metal,
                    rect: Rect::from_top_left(600, bin_y, 150, 150),
                },
                Bin {
                    kind: WasteKind::Paper,
                    rect: Rect::from_top_left(1000, bin_y, 150, 150),
                },
            ],
            items: vec![
                ItemSpec::new("bottle", WasteKind::Plastic),
                ItemSpec::new("can", WasteKind::Metal),
                ItemSpec::new("paper", WasteKind::Paper),
            ],
            thresholds: DetectorThresholds::default(),
        }
    }
}

impl SortingOptions {
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
        if let Some(mirror) = overrides.flag(config::ENV_VAR_MIRROR)? {
            options = options.mirror(mirror);
        }
        if let Some(fist) = overrides.parse(config::ENV_VAR_FIST)? {
            options = options.fist_detector(fist);
        }
        if let Some(window) = overrides.debounce_window()? {
            options = options.debounce(window);
        }
        Ok(options)
    }

    /// Sets the screen resolution the game is played on. Defaults to 1280x720.
    ///
    /// This does not move the bins. Use [`SortingOptions::bins`] to place them.
    #[inline]
    pub fn screen(self, screen: Resolution) -> Self {
        Self { screen, ..self }
    }

    /// Sets the distance between the screen edges and the spawn area. Defaults to 50.
    #[inline]
    pub fn margin(self, margin: i32) -> Self {
        Self { margin, ..self }
    }

    /// Sets the width and height of the item sprites. Defaults to 80.
    #[inline]
    pub fn sprite_size(self, sprite_size: u32) -> Self {
        Self {
            sprite_size,
            ..self
        }
    }

    /// Sets how close (on each axis) the pointer has to be to an item to grab it. Defaults to 50.
    #[inline]
    pub fn grab_distance(self, grab_distance: i32) -> Self {
        Self {
            grab_distance,
            ..self
        }
    }

    /// Sets whether the pointer is mirrored horizontally.
    ///
    /// The default is `true`, for landmarks computed on an unmirrored camera image that is shown
    /// mirrored.
    #[inline]
    pub fn mirror(self, mirror: bool) -> Self {
        Self { mirror, ..self }
    }

    /// Sets the rule deciding whether a hand is grabbing. Defaults to [`FistDetector::Light`].
    #[inline]
    pub fn fist_detector(self, fist: FistDetector) -> Self {
        Self { fist, ..self }
    }

    /// Sets whether dragged items are centered under the pointer.
    ///
    /// By default, the item's top-left corner follows the pointer.
    #[inline]
    pub fn center_sprite(self, center_sprite: bool) -> Self {
        Self {
            center_sprite,
            ..self
        }
    }

    /// Sets how many consecutive frames a fist has to be made or released before it counts.
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

    pub fn bins(self, bins: Vec<Bin>) -> Self {
        Self { bins, ..self }
    }

    /// Sets the pieces of waste spawned at the start of the round.
    pub fn items(self, items: Vec<ItemSpec>) -> Self {
        Self { items, ..self }
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

    #[inline]
    pub fn screen_resolution(&self) -> Resolution {
        self.screen
    }
}

/// Result of a completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundSummary {
    /// Number of items that ended up in their matching bin.
    pub correct: usize,
    /// Number of items that did not.
    pub incorrect: usize,
    /// Number of times an item was dropped into a wrong bin and respawned.
    pub misses: usize,
}

impl fmt::Display for RoundSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} correct, {} incorrect, {} wrong drops",
            self.correct, self.incorrect, self.misses
        )
    }
}

/// A visible item, as reported by [`SortingGame::scene`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub name: String,
    pub rect: Rect,
    pub held: bool,
}

/// Snapshot of everything that should be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub bins: Vec<Bin>,
    /// Unclassified items, in spawn order.
    pub sprites: Vec<Sprite>,
}

/// State of one round of the sorting game.
pub struct SortingGame {
    options: SortingOptions,
    items: Vec<MovableItem>,
    fists: Vec<Debounce<bool>>,
    rng: fastrand::Rng,
    misses: usize,
    frame_claims: Vec<bool>,
}

impl SortingGame {
    /// Starts a new round, spawning all items at random positions.
    pub fn new(options: SortingOptions) -> Self {
        Self::with_rng(options, fastrand::Rng::new())
    }

    /// Starts a new round, using `rng` to spawn items.
    pub fn with_rng(options: SortingOptions, rng: fastrand::Rng) -> Self {
        log::debug!("starting sorting round with {:?}", options);
        let mut this = Self {
            items: Vec::with_capacity(options.items.len()),
            frame_claims: Vec::with_capacity(options.items.len()),
            options,
            fists: Vec::new(),
            rng,
            misses: 0,
        };
        for spec in &this.options.items {
            let position = spawn_position(&mut this.rng, &this.options);
            log::trace!("spawned {} at {},{}", spec.name, position.x, position.y);
            this.items.push(MovableItem {
                name: spec.name.clone(),
                target: spec.target,
                position,
                held_by: None,
                classified: false,
                correctly_classified: false,
            });
        }
        this
    }

    #[inline]
    pub fn items(&self) -> &[MovableItem] {
        &self.items
    }

    /// Moves the item at `index` to `position`, unless it is already classified.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn place_item(&mut self, index: usize, position: Pointer) {
        let item = &mut self.items[index];
        if !item.classified {
            item.position = position;
        }
    }

    #[inline]
    pub fn options(&self) -> &SortingOptions {
        &self.options
    }

    /// Returns whether every item has been classified.
    pub fn is_finished(&self) -> bool {
        self.items.iter().all(|item| item.classified)
    }

    /// Returns the current counts of correctly and incorrectly classified items.
    pub fn summary(&self) -> RoundSummary {
        let correct = self
            .items
            .iter()
            .filter(|item| item.correctly_classified)
            .count();
        RoundSummary {
            correct,
            incorrect: self.items.len() - correct,
            misses: self.misses,
        }
    }

    /// Processes the hands of one frame.
    ///
    /// Hands are processed in detector order. Once an item was grabbed or dropped by a hand, later
    /// hands in the same frame leave it alone.
    pub fn update(&mut self, frame: &Frame) {
        while self.fists.len() < frame.hands().len() {
            self.fists.push(Debounce::new(self.options.debounce));
        }
        for fist in &mut self.fists[frame.hands().len()..] {
            fist.reset();
        }
        self.frame_claims.clear();
        self.frame_claims.resize(self.items.len(), false);

        let extractor = PointerExtractor::palm_center().mirrored(self.options.mirror);
        for (slot, hand) in frame.hands().iter().enumerate() {
            let pointer = extractor.extract(hand, self.options.screen);
            let closed = self.fists[slot].push(self.options.fist.is_fist(hand));
            self.update_hand(slot, pointer, closed, frame.hands().len());
        }
    }

    fn update_hand(&mut self, slot: usize, pointer: Pointer, closed: bool, num_hands: usize) {
        let half_width = self.options.grab_distance;
        for index in 0..self.items.len() {
            let item = &self.items[index];
            if item.classified || self.frame_claims[index] {
                continue;
            }
            // items stay with their hand while it is in view
            if matches!(item.held_by, Some(other) if other != slot && other < num_hands) {
                continue;
            }
            if !item.is_near(pointer, half_width) {
                continue;
            }

            if closed {
                if item.held_by != Some(slot) {
                    log::debug!("hand {slot} grabbed {}", item.name);
                }
                self.items[index].held_by = Some(slot);
                self.frame_claims[index] = true;
            } else if item.held_by == Some(slot) {
                self.frame_claims[index] = true;
                self.drop_item(index, pointer);
            }
        }

        if closed {
            let position = if self.options.center_sprite {
                let offset = (self.options.sprite_size / 2) as i32;
                Pointer::new(pointer.x - offset, pointer.y - offset)
            } else {
                pointer
            };
            for item in &mut self.items {
                if item.held_by == Some(slot) && !item.classified {
                    item.position = position;
                }
            }
        }
    }

    fn drop_item(&mut self, index: usize, pointer: Pointer) {
        let bin = self
            .options
            .bins
            .iter()
            .find(|bin| bin.rect.contains(pointer.x, pointer.y))
            .map(|bin| bin.kind);
        let item = &mut self.items[index];
        item.held_by = None;

        match bin {
            Some(kind) if kind == item.target => {
                log::info!("correct: {} belongs in {}", item.name, kind);
                item.classified = true;
                item.correctly_classified = true;
            }
            Some(kind) => {
                log::info!(
                    "incorrect: {} does not belong in {}, try again",
                    item.name,
                    kind
                );
                item.position = spawn_position(&mut self.rng, &self.options);
                self.misses += 1;
            }
            None => log::debug!("dropped {} outside of all bins", item.name),
        }
    }

    /// Returns a snapshot of the bins and all items still in play.
    pub fn scene(&self) -> Scene {
        let size = self.options.sprite_size;
        Scene {
            bins: self.options.bins.clone(),
            sprites: self
                .items
                .iter()
                .filter(|item| !item.classified)
                .map(|item| Sprite {
                    name: item.name.clone(),
                    rect: Rect::from_top_left(item.position.x, item.position.y, size, size),
                    held: item.held_in_hand(),
                })
                .collect(),
        }
    }

    /// Draws bins and items as colored boxes onto `target`.
    ///
    /// Coordinates are screen coordinates, so `target` should have the screen resolution.
    pub fn draw(&self, target: &mut Image) {
        for bin in &self.options.bins {
            draw_rect(target, bin.rect)
                .color(bin.kind.color())
                .stroke_width(4);
        }
        let size = self.options.sprite_size;
        for item in self.items.iter().filter(|item| !item.classified) {
            let color = if item.held_in_hand() {
                Color::WHITE
            } else {
                item.target.color()
            };
            draw_rect(
                target,
                Rect::from_top_left(item.position.x, item.position.y, size, size),
            )
            .color(color)
            .stroke_width(2);
        }
    }
}

impl FrameHandler for SortingGame {
    type Summary = RoundSummary;

    fn handle_frame(&mut self, frame: &Frame) -> ControlFlow<RoundSummary> {
        self.update(frame);
        if self.is_finished() {
            let summary = self.summary();
            log::info!("round over: {summary}");
            ControlFlow::Break(summary)
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Picks a random sprite position in the spawn area along the top of the screen.
fn spawn_position(rng: &mut fastrand::Rng, options: &SortingOptions) -> Pointer {
    let min = options.margin;
    let max_x = options.screen.width() as i32 - options.sprite_size as i32 - options.margin;
    let max_y = 100;
    Pointer::new(rng.i32(min..=max_x.max(min)), rng.i32(min..=max_y.max(min)))
}

#[cfg(test)]
mod tests {
    use crate::hand::{Hand, Landmark, LandmarkIdx, NUM_LANDMARKS};

    use super::*;

    const SCREEN: Resolution = Resolution::RES_720P;

    /// A hand whose mirrored palm center lands on screen pixel `(x, y)`.
    fn hand(fist: bool, x: i32, y: i32) -> Hand {
        let nx = 1.0 - (x as f32 + 0.5) / SCREEN.width() as f32;
        let ny = (y as f32 + 0.5) / SCREEN.height() as f32;
        let (index_tip_y, thumb_tip_x) = if fist { (0.6, 0.6) } else { (0.4, 0.4) };
        Hand::new([Landmark::new(0.5, 0.5, 0.0); NUM_LANDMARKS])
            .with_landmark(LandmarkIdx::MiddleFingerMcp, Landmark::new(nx, ny, 0.0))
            .with_landmark(LandmarkIdx::IndexFingerTip, Landmark::new(0.5, index_tip_y, 0.0))
            .with_landmark(LandmarkIdx::ThumbTip, Landmark::new(thumb_tip_x, 0.5, 0.0))
    }

    fn frame(hands: Vec<Hand>) -> Frame {
        Frame::new(SCREEN, hands)
    }

    fn single_item_game(target: WasteKind) -> SortingGame {
        let options = SortingOptions::default().items(vec![ItemSpec::new("item", target)]);
        let mut game = SortingGame::with_rng(options, fastrand::Rng::with_seed(7));
        game.place_item(0, Pointer::new(300, 80));
        game
    }

    fn in_spawn_area(p: Pointer) -> bool {
        (50..=1280 - 80 - 50).contains(&p.x) && (50..=100).contains(&p.y)
    }

    #[test]
    fn test_hand_helper() {
        let extractor = PointerExtractor::palm_center().mirrored(true);
        let h = hand(true, 320, 90);
        assert_eq!(extractor.extract(&h, SCREEN), Pointer::new(320, 90));
        assert!(FistDetector::Light.is_fist(&h));
        assert!(!FistDetector::Light.is_fist(&hand(false, 320, 90)));
    }

    #[test]
    fn default_scene() {
        let game = SortingGame::with_rng(SortingOptions::default(), fastrand::Rng::with_seed(1));
        let scene = game.scene();
        assert_eq!(
            scene.bins.iter().map(|bin| bin.kind.to_string()).collect::<Vec<_>>(),
            ["plastico", "metal", "papel"]
        );
        assert_eq!(scene.bins[1].rect, Rect::from_top_left(600, 520, 150, 150));
        assert_eq!(scene.sprites.len(), 3);
        for item in game.items() {
            assert!(in_spawn_area(item.position()), "{:?}", item);
            assert!(!item.held_in_hand());
        }
    }

    #[test]
    fn grab_drag_and_classify() {
        let mut game = single_item_game(WasteKind::Metal);

        game.update(&frame(vec![hand(true, 320, 90)]));
        assert!(game.items()[0].held_in_hand());
        assert_eq!(game.items()[0].position(), Pointer::new(320, 90));

        game.update(&frame(vec![hand(true, 500, 300)]));
        assert_eq!(game.items()[0].position(), Pointer::new(500, 300));
        game.update(&frame(vec![hand(true, 650, 580)]));
        assert_eq!(game.items()[0].position(), Pointer::new(650, 580));

        let flow = game.handle_frame(&frame(vec![hand(false, 655, 585)]));
        let item = &game.items()[0];
        assert!(item.classified());
        assert!(item.correctly_classified());
        assert!(!item.held_in_hand());
        assert_eq!(
            flow,
            ControlFlow::Break(RoundSummary {
                correct: 1,
                incorrect: 0,
                misses: 0
            })
        );
        assert!(game.scene().sprites.is_empty());

        // classified items no longer react
        game.update(&frame(vec![hand(true, 655, 585)]));
        game.update(&frame(vec![hand(true, 100, 100)]));
        assert_eq!(game.items()[0].position(), Pointer::new(650, 580));
        assert!(!game.items()[0].held_in_hand());
    }

    #[test]
    fn wrong_bin_respawns() {
        let mut game = single_item_game(WasteKind::Plastic);
        game.update(&frame(vec![hand(true, 320, 90)]));
        game.update(&frame(vec![hand(true, 650, 580)]));
        let flow = game.handle_frame(&frame(vec![hand(false, 650, 580)]));
        assert_eq!(flow, ControlFlow::Continue(()));

        let item = &game.items()[0];
        assert!(!item.classified());
        assert!(!item.held_in_hand());
        assert!(in_spawn_area(item.position()), "{:?}", item);
        assert_eq!(game.summary().misses, 1);
    }

    #[test]
    fn drop_outside_bins_leaves_item() {
        let mut game = single_item_game(WasteKind::Paper);
        game.update(&frame(vec![hand(true, 320, 90)]));
        game.update(&frame(vec![hand(true, 640, 300)]));
        game.update(&frame(vec![hand(false, 640, 300)]));
        let item = &game.items()[0];
        assert!(!item.held_in_hand());
        assert!(!item.classified());
        assert_eq!(item.position(), Pointer::new(640, 300));

        // and it can be picked up again
        game.update(&frame(vec![hand(true, 660, 320)]));
        assert!(game.items()[0].held_in_hand());
    }

    #[test]
    fn grab_needs_proximity() {
        let mut game = single_item_game(WasteKind::Metal);
        // exactly 50 px away is outside the grab area
        game.update(&frame(vec![hand(true, 350, 80)]));
        assert!(!game.items()[0].held_in_hand());
        game.update(&frame(vec![hand(true, 349, 31)]));
        assert!(game.items()[0].held_in_hand());
    }

    #[test]
    fn open_hand_over_bin_without_holding_does_nothing() {
        let mut game = single_item_game(WasteKind::Metal);
        game.place_item(0, Pointer::new(650, 580));
        game.update(&frame(vec![hand(false, 650, 580)]));
        assert!(!game.items()[0].classified());
    }

    #[test]
    fn first_hand_wins() {
        let mut game = single_item_game(WasteKind::Metal);
        game.update(&frame(vec![hand(true, 310, 90), hand(true, 290, 70)]));
        let item = &game.items()[0];
        assert_eq!(item.held_by(), Some(0));
        assert_eq!(item.position(), Pointer::new(310, 90));

        // the second hand cannot take it while the first one is in view
        game.update(&frame(vec![hand(true, 320, 100), hand(true, 330, 110)]));
        assert_eq!(game.items()[0].held_by(), Some(0));
        assert_eq!(game.items()[0].position(), Pointer::new(320, 100));
    }

    #[test]
    fn center_sprite_offsets_position() {
        let options = SortingOptions::default()
            .items(vec![ItemSpec::new("can", WasteKind::Metal)])
            .center_sprite(true);
        let mut game = SortingGame::with_rng(options, fastrand::Rng::with_seed(3));
        game.place_item(0, Pointer::new(300, 80));
        game.update(&frame(vec![hand(true, 320, 90)]));
        assert_eq!(game.items()[0].position(), Pointer::new(280, 50));
    }

    #[test]
    fn unmirrored_pointer() {
        let options = SortingOptions::default()
            .items(vec![ItemSpec::new("can", WasteKind::Metal)])
            .mirror(false);
        let mut game = SortingGame::with_rng(options, fastrand::Rng::with_seed(3));
        // mirrored x=320 is unmirrored x=1280-321
        game.place_item(0, Pointer::new(959, 90));
        game.update(&frame(vec![hand(true, 320, 90)]));
        assert!(game.items()[0].held_in_hand());
    }

    #[test]
    fn summary_counts_every_item() {
        let game = SortingGame::with_rng(SortingOptions::default(), fastrand::Rng::with_seed(5));
        let summary = game.summary();
        assert_eq!(summary.correct + summary.incorrect, 3);
        assert!(!game.is_finished());
    }

    /// A fist that also satisfies [`FistDetector::Strict`].
    fn full_fist(x: i32, y: i32) -> Hand {
        let mut hand = hand(true, x, y);
        for tip in [
            LandmarkIdx::MiddleFingerTip,
            LandmarkIdx::RingFingerTip,
            LandmarkIdx::PinkyTip,
        ] {
            hand = hand.with_landmark(tip, Landmark::new(0.5, 0.6, 0.0));
        }
        hand
    }

    #[test]
    fn strict_detector_needs_all_fingers_curled() {
        let options = SortingOptions::default()
            .items(vec![ItemSpec::new("can", WasteKind::Metal)])
            .fist_detector(FistDetector::Strict);
        let mut game = SortingGame::with_rng(options, fastrand::Rng::with_seed(3));
        game.place_item(0, Pointer::new(300, 80));

        game.update(&frame(vec![hand(true, 320, 90)]));
        assert!(!game.items()[0].held_in_hand());
        game.update(&frame(vec![full_fist(320, 90)]));
        assert!(game.items()[0].held_in_hand());
    }

    #[test]
    fn debounce_keeps_grip_through_flicker() {
        let options = SortingOptions::default()
            .items(vec![ItemSpec::new("can", WasteKind::Metal)])
            .debounce(2);
        let mut game = SortingGame::with_rng(options, fastrand::Rng::with_seed(3));
        game.place_item(0, Pointer::new(300, 80));

        game.update(&frame(vec![hand(true, 320, 90)]));
        // a single open frame is not a release
        game.update(&frame(vec![hand(false, 330, 100)]));
        assert!(game.items()[0].held_in_hand());
        assert_eq!(game.items()[0].position(), Pointer::new(330, 100));

        game.update(&frame(vec![hand(false, 330, 100)]));
        game.update(&frame(vec![hand(false, 330, 100)]));
        assert!(!game.items()[0].held_in_hand());
    }

    #[test]
    fn returning_hand_does_not_inherit_fist() {
        let options = SortingOptions::default()
            .items(vec![
                ItemSpec::new("can", WasteKind::Metal),
                ItemSpec::new("paper", WasteKind::Paper),
            ])
            .debounce(3);
        let mut game = SortingGame::with_rng(options, fastrand::Rng::with_seed(3));
        game.place_item(0, Pointer::new(300, 80));
        game.place_item(1, Pointer::new(900, 80));

        game.update(&frame(vec![hand(true, 310, 90)]));
        game.update(&frame(vec![hand(true, 640, 300)]));
        assert_eq!(game.items()[0].position(), Pointer::new(640, 300));
        game.update(&frame(vec![]));
        game.update(&frame(vec![]));

        game.update(&frame(vec![hand(false, 910, 90)]));
        assert!(!game.items()[1].held_in_hand());
        assert_eq!(game.items()[1].position(), Pointer::new(900, 80));
        assert_eq!(game.items()[0].position(), Pointer::new(640, 300));
    }

    #[test]
    fn options_from_overrides() {
        use crate::config::{tests::vars, ENV_VAR_DEBOUNCE, ENV_VAR_FIST, ENV_VAR_MIRROR};

        let options = SortingOptions::from_overrides(&vars(&[])).unwrap();
        assert!(options.mirror);
        assert_eq!(options.fist, FistDetector::Light);

        let options = SortingOptions::from_overrides(&vars(&[
            (ENV_VAR_MIRROR, "off"),
            (ENV_VAR_FIST, "strict"),
            (ENV_VAR_DEBOUNCE, "2"),
        ]))
        .unwrap();
        assert!(!options.mirror);
        assert_eq!(options.fist, FistDetector::Strict);
        assert_eq!(options.debounce, 2);

        assert!(SortingOptions::from_overrides(&vars(&[(ENV_VAR_FIST, "tight")])).is_err());
        assert!(SortingOptions::from_overrides(&vars(&[(ENV_VAR_DEBOUNCE, "0")])).is_err());
    }

    #[test]
    fn draw_marks_bins() {
        let game = SortingGame::with_rng(SortingOptions::default(), fastrand::Rng::with_seed(5));
        let mut image = Image::filled(SCREEN, Color::BLACK);
        game.draw(&mut image);
        assert_eq!(image.get(601, 521), Color::YELLOW);
        assert_eq!(image.get(675, 595), Color::BLACK);
    }
}
