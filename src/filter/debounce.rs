//! Debouncing of discrete values.

use super::Filter;

/// Suppresses short-lived changes of a discrete value, like a hand [`Pose`] that flickers because
/// of landmark noise.
///
/// The output only switches to a new value once that value has been pushed `window` times in a row.
/// The very first value is passed through immediately.
///
/// [`Pose`]: crate::hand::pose::Pose
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    window: u32,
    stable: Option<T>,
    candidate: Option<(T, u32)>,
}

impl<T> Debounce<T> {
    /// Creates a debounce filter that requires `window` consecutive identical values to switch.
    ///
    /// A `window` of 1 makes the filter pass every value through unchanged.
    ///
    /// # Panics
    ///
    /// This method will panic if `window` is 0.
    pub fn new(window: u32) -> Self {
        assert!(window > 0, "debounce window must be at least 1");
        Self {
            window,
            stable: None,
            candidate: None,
        }
    }

    pub fn window(&self) -> u32 {
        self.window
    }
}

impl<T: Copy + PartialEq> Filter<T> for Debounce<T> {
    fn push(&mut self, value: T) -> T {
        let stable = match self.stable {
            None => {
                self.stable = Some(value);
                return value;
            }
            Some(stable) => stable,
        };

        if value == stable {
            self.candidate = None;
            return stable;
        }

        let count = match self.candidate {
            Some((candidate, count)) if candidate == value => count + 1,
            _ => 1,
        };
        if count >= self.window {
            self.stable = Some(value);
            self.candidate = None;
            value
        } else {
            self.candidate = Some((value, count));
            stable
        }
    }

    fn reset(&mut self) {
        self.stable = None;
        self.candidate = None;
    }
}
