//! Letterbox geometry: fitting a source size inside a target box and centering it.

use std::fmt;

/// A width/height pair in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when both axes are no larger than `other`
    #[must_use]
    pub fn fits_within(self, other: Dimensions) -> bool {
        self.width <= other.width && self.height <= other.height
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Compute the size a source image is scaled to so that it fits inside `target`.
///
/// Width is clamped first, then height, both using the original aspect ratio.
/// A source that already fits is returned unchanged; images are never scaled up.
/// Fractional results are truncated, with each axis kept at least 1 pixel.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "scaled values are positive and bounded by the u32 target"
)]
pub fn compute_scaled_size(source: Dimensions, target: Dimensions) -> Dimensions {
    let ratio = f64::from(source.width) / f64::from(source.height);
    let mut width = f64::from(source.width);
    let mut height = f64::from(source.height);

    if width > f64::from(target.width) {
        width = f64::from(target.width);
        height = width / ratio;
    }
    if height > f64::from(target.height) {
        height = f64::from(target.height);
        width = height * ratio;
    }

    Dimensions {
        width: (width.trunc() as u32).max(1),
        height: (height.trunc() as u32).max(1),
    }
}

/// Top-left corner at which `scaled` must be placed to sit centered in `target`
#[must_use]
pub fn compute_paste_offset(scaled: Dimensions, target: Dimensions) -> (u32, u32) {
    let left = target.width.saturating_sub(scaled.width) / 2;
    let top = target.height.saturating_sub(scaled.height) / 2;
    (left, top)
}
