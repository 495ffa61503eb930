use super::{Color, Image};

/// Describes how to blend pixels together in a [`Blend`] operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlendMode {
    /// All destination pixels will be overwritten with the corresponding source pixel.
    Overwrite,

    /// Mixes source and destination channels with a fixed weight, ignoring their alpha.
    ///
    /// A weight of `0.0` keeps the destination, `1.0` replaces it with the source. The result is
    /// always opaque.
    Weighted(f32),
}

/// A blending operation between two images.
///
/// Returned by [`Image::blend_from`]. The operation is performed when this guard is dropped.
pub struct Blend<'a> {
    dest: &'a mut Image,
    src: &'a Image,
    mode: BlendMode,
}

impl<'a> Blend<'a> {
    pub(super) fn new(dest: &'a mut Image, src: &'a Image) -> Self {
        Self {
            dest,
            src,
            mode: BlendMode::Overwrite,
        }
    }

    /// Sets the blend mode to use.
    ///
    /// # Panics
    ///
    /// Panics if a [`BlendMode::Weighted`] weight is outside of `0.0..=1.0`.
    pub fn mode(&mut self, mode: BlendMode) -> &mut Self {
        if let BlendMode::Weighted(weight) = mode {
            assert!(
                (0.0..=1.0).contains(&weight),
                "blend weight must be between 0.0 and 1.0, got {weight}"
            );
        }
        self.mode = mode;
        self
    }
}

impl Drop for Blend<'_> {
    fn drop(&mut self) {
        if self.src.width() == 0 || self.src.height() == 0 {
            return;
        }

        for dest_y in 0..self.dest.height() {
            for dest_x in 0..self.dest.width() {
                let src_x = ((dest_x as f32 + 0.5) / self.dest.width() as f32
                    * self.src.width() as f32) as u32;
                let src_y = ((dest_y as f32 + 0.5) / self.dest.height() as f32
                    * self.src.height() as f32) as u32;

                let src_pix = self.src.get(src_x, src_y);
                let dest_pix = self.dest.get(dest_x, dest_y);
                let result = match self.mode {
                    BlendMode::Overwrite => src_pix,
                    BlendMode::Weighted(weight) => blend_weighted(dest_pix, src_pix, weight),
                };
                self.dest.set(dest_x, dest_y, result);
            }
        }
    }
}

fn blend_weighted(dest: Color, src: Color, weight: f32) -> Color {
    let mix = |d: u8, s: u8| (f32::from(d) * (1.0 - weight) + f32::from(s) * weight).round() as u8;
    Color::from_rgb8(
        mix(dest.r(), src.r()),
        mix(dest.g(), src.g()),
        mix(dest.b(), src.b()),
    )
}
