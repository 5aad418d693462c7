//! Geometry engine: sampled amounts + source shape -> concrete pixel geometry.
//!
//! Everything here is pure integer/float arithmetic. Degenerate results are
//! clamped so every output side keeps at least one pixel; clamping is logged
//! at `warn` level instead of failing.

use crate::parameters::Position;
use crate::sampler::Drawn;
use tracing::warn;

/// Concrete per-side pixel amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sides {
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
    pub left: usize,
}

impl Sides {
    pub const fn new(top: usize, right: usize, bottom: usize, left: usize) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0 && self.right == 0 && self.bottom == 0 && self.left == 0
    }

    pub fn vertical(&self) -> usize {
        self.top.saturating_add(self.bottom)
    }

    pub fn horizontal(&self) -> usize {
        self.left.saturating_add(self.right)
    }
}

fn side_px(drawn: Drawn, extent: usize, round: fn(f64) -> f64) -> usize {
    match drawn {
        Drawn::Px(v) => v.max(0) as usize,
        Drawn::Fraction(f) => round(f * extent as f64).max(0.0) as usize,
        Drawn::Keep | Drawn::KeepAspectRatio => 0,
    }
}

// ============================================================================
// Pad / Crop amounts
// ============================================================================

/// Pixel amounts for `Pad`. Fractions are floored: padding a 4 px side by
/// `1.0` adds exactly 4 px.
pub fn pad_amounts(drawn: [Drawn; 4], src_h: usize, src_w: usize) -> Sides {
    let [top, right, bottom, left] = drawn;
    Sides {
        top: side_px(top, src_h, f64::floor),
        right: side_px(right, src_w, f64::floor),
        bottom: side_px(bottom, src_h, f64::floor),
        left: side_px(left, src_w, f64::floor),
    }
}

/// Pixel amounts for `Crop`. Fractions round half-to-even and are capped at
/// the side length.
///
/// Amounts are reduced so one row/column survives: the bottom amount is
/// reduced before the top, the right amount before the left.
pub fn crop_amounts(drawn: [Drawn; 4], src_h: usize, src_w: usize) -> Sides {
    let [top, right, bottom, left] = drawn;
    let crop_px = |drawn, extent: usize| side_px(drawn, extent, f64::round_ties_even).min(extent);
    let (top, bottom) = keep_one(crop_px(top, src_h), crop_px(bottom, src_h), src_h);
    let (left, right) = keep_one(crop_px(left, src_w), crop_px(right, src_w), src_w);
    Sides {
        top,
        right,
        bottom,
        left,
    }
}

fn keep_one(before: usize, after: usize, extent: usize) -> (usize, usize) {
    let removable = extent.saturating_sub(1);
    let excess = before.saturating_add(after).saturating_sub(removable);
    if excess == 0 {
        return (before, after);
    }
    warn!(before, after, extent, "crop would empty the image, reducing amounts");
    let from_after = excess.min(after);
    let from_before = excess - from_after;
    (before - from_before, after - from_after)
}

// ============================================================================
// Scale
// ============================================================================

/// Target `(height, width)` for `Scale`.
///
/// - `Px(v)`: absolute size
/// - `Fraction(f)`: `floor(src * f)`
/// - `Keep`: unchanged side
/// - `KeepAspectRatio`: derived from the other, already resolved side
///
/// Results are clamped to >= 1.
pub fn compute_scale(src_h: usize, src_w: usize, h: Drawn, w: Drawn) -> (usize, usize) {
    let axis = |drawn: Drawn, src: usize| -> Option<usize> {
        match drawn {
            Drawn::Px(v) => Some(clamp_side(v, "height/width")),
            Drawn::Fraction(f) => Some(clamp_side((src as f64 * f).floor() as i64, "height/width")),
            Drawn::Keep => Some(src),
            Drawn::KeepAspectRatio => None,
        }
    };
    match (axis(h, src_h), axis(w, src_w)) {
        (Some(dst_h), Some(dst_w)) => (dst_h, dst_w),
        (None, Some(dst_w)) => {
            let dst_h = (dst_w as f64 * src_h as f64 / src_w as f64).floor() as i64;
            (clamp_side(dst_h, "height"), dst_w)
        }
        (Some(dst_h), None) => {
            let dst_w = (dst_h as f64 * src_w as f64 / src_h as f64).floor() as i64;
            (dst_h, clamp_side(dst_w, "width"))
        }
        // rejected at build time; keep the source shape if it slips through
        (None, None) => (src_h, src_w),
    }
}

fn clamp_side(value: i64, side: &str) -> usize {
    if value < 1 {
        warn!(value, side, "degenerate target size, clamping to 1 px");
        1
    } else {
        value as usize
    }
}

// ============================================================================
// Fixed-size placement
// ============================================================================

/// Splits `slack` into `(min_side, max_side)` with `floor(slack * frac)` on
/// the min side.
pub fn split_slack(slack: usize, frac: f64) -> (usize, usize) {
    let before = ((slack as f64 * frac).floor() as usize).min(slack);
    (before, slack - before)
}

/// `(top, left)` offsets for placing a `src` shape inside / taking a `dst`
/// window out of it. Works for both directions on each axis.
pub fn compute_offsets(
    src_h: usize,
    src_w: usize,
    dst_h: usize,
    dst_w: usize,
    position: Position,
) -> (usize, usize) {
    let (top, _) = split_slack(src_h.abs_diff(dst_h), position.y);
    let (left, _) = split_slack(src_w.abs_diff(dst_w), position.x);
    (top, left)
}

/// Padding needed to reach at least `(dst_h, dst_w)`. Axes already large
/// enough get zero.
pub fn fixed_pad_sides(
    src_h: usize,
    src_w: usize,
    dst_h: usize,
    dst_w: usize,
    position: Position,
) -> Sides {
    let (top, bottom) = split_slack(dst_h.saturating_sub(src_h), position.y);
    let (left, right) = split_slack(dst_w.saturating_sub(src_w), position.x);
    Sides {
        top,
        right,
        bottom,
        left,
    }
}

/// Cropping needed to reach at most `(dst_h, dst_w)`. Axes already small
/// enough get zero.
pub fn fixed_crop_sides(
    src_h: usize,
    src_w: usize,
    dst_h: usize,
    dst_w: usize,
    position: Position,
) -> Sides {
    let (top, bottom) = split_slack(src_h.saturating_sub(dst_h), position.y);
    let (left, right) = split_slack(src_w.saturating_sub(dst_w), position.x);
    Sides {
        top,
        right,
        bottom,
        left,
    }
}

// ============================================================================
// Heatmap projection
// ============================================================================

/// Image-space size projected onto an array axis: `max(1, round(dst * arr / img))`.
pub fn project_size(dst_img: usize, img: usize, arr: usize) -> usize {
    if img == arr {
        return dst_img.max(1);
    }
    ((dst_img as f64 * arr as f64 / img as f64).round_ties_even() as usize).max(1)
}

fn project_axis(before: usize, after: usize, img: usize, arr: usize, grow: bool) -> (usize, usize) {
    if img == arr {
        return (before, after);
    }
    let dst_img = if grow {
        img.saturating_add(before).saturating_add(after)
    } else {
        img.saturating_sub(before.saturating_add(after))
    };
    let total = project_size(dst_img, img, arr).abs_diff(arr);
    let before = ((before as f64 * arr as f64 / img as f64).round_ties_even() as usize).min(total);
    (before, total - before)
}

/// Projects image-space pad amounts onto a heatmap array of shape `arr`.
pub fn project_pad(sides: &Sides, img: (usize, usize), arr: (usize, usize)) -> Sides {
    let (top, bottom) = project_axis(sides.top, sides.bottom, img.0, arr.0, true);
    let (left, right) = project_axis(sides.left, sides.right, img.1, arr.1, true);
    Sides::new(top, right, bottom, left)
}

/// Projects image-space crop amounts onto a heatmap array of shape `arr`.
/// At least one array row/column always remains.
pub fn project_crop(sides: &Sides, img: (usize, usize), arr: (usize, usize)) -> Sides {
    let (top, bottom) = project_axis(sides.top, sides.bottom, img.0, arr.0, false);
    let (left, right) = project_axis(sides.left, sides.right, img.1, arr.1, false);
    let (top, bottom) = keep_one(top, bottom, arr.0);
    let (left, right) = keep_one(left, right, arr.1);
    Sides::new(top, right, bottom, left)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fractions(f: f64) -> [Drawn; 4] {
        [Drawn::Fraction(f); 4]
    }

    #[test]
    fn test_pad_percent_floors() {
        assert_eq!(pad_amounts(fractions(1.0), 4, 4), Sides::new(4, 4, 4, 4));
        assert_eq!(pad_amounts(fractions(0.3), 5, 10), Sides::new(1, 3, 1, 3));
        assert_eq!(pad_amounts(fractions(0.0), 5, 10), Sides::default());
    }

    #[test]
    fn test_crop_percent_rounds_half_to_even() {
        // 0.25 * 10 = 2.5 -> 2, 0.25 * 6 = 1.5 -> 2
        assert_eq!(crop_amounts(fractions(0.25), 10, 6), Sides::new(2, 2, 2, 2));
    }

    #[test]
    fn test_crop_never_empties() {
        let sides = crop_amounts([Drawn::Px(3), Drawn::Px(0), Drawn::Px(3), Drawn::Px(9)], 4, 4);
        assert_eq!(sides.vertical(), 3);
        // bottom is reduced first
        assert_eq!((sides.top, sides.bottom), (3, 0));
        assert_eq!((sides.left, sides.right), (3, 0));
    }

    #[test]
    fn test_oversized_crop_amounts_stay_total() {
        let sides = crop_amounts(fractions(1e30), 4, 4);
        assert_eq!(sides, Sides::new(3, 0, 0, 3));
        let sides = crop_amounts([Drawn::Px(i64::MAX); 4], 4, 6);
        assert_eq!(sides, Sides::new(3, 0, 0, 5));
    }

    #[test]
    fn test_scale_keep_aspect_ratio() {
        assert_eq!(compute_scale(20, 40, Drawn::Px(10), Drawn::KeepAspectRatio), (10, 20));
        assert_eq!(compute_scale(20, 40, Drawn::KeepAspectRatio, Drawn::Px(10)), (5, 10));
        assert_eq!(compute_scale(20, 40, Drawn::Keep, Drawn::Fraction(0.5)), (20, 20));
    }

    #[test]
    fn test_scale_clamps_to_one_pixel() {
        assert_eq!(compute_scale(4, 4, Drawn::Fraction(0.1), Drawn::Px(0)), (1, 1));
        assert_eq!(compute_scale(2, 100, Drawn::KeepAspectRatio, Drawn::Px(10)), (1, 10));
    }

    #[test]
    fn test_position_edges_are_flush() {
        let flush_min = Position { x: 0.0, y: 0.0 };
        let flush_max = Position { x: 1.0, y: 1.0 };
        assert_eq!(fixed_pad_sides(2, 3, 7, 8, flush_min), Sides::new(0, 5, 5, 0));
        assert_eq!(fixed_pad_sides(2, 3, 7, 8, flush_max), Sides::new(5, 0, 0, 5));
        assert_eq!(fixed_crop_sides(7, 8, 2, 3, Position::CENTER), Sides::new(2, 3, 3, 2));
        assert_eq!(compute_offsets(4, 4, 8, 8, Position::CENTER), (2, 2));
    }

    #[test]
    fn test_fixed_sides_ignore_satisfied_axes() {
        assert!(fixed_pad_sides(10, 10, 4, 4, Position::CENTER).is_zero());
        assert!(fixed_crop_sides(4, 4, 10, 10, Position::CENTER).is_zero());
    }

    #[test]
    fn test_heatmap_projection_half_resolution() {
        let sides = project_pad(&Sides::new(2, 0, 4, 1), (8, 8), (4, 4));
        assert_eq!(sides, Sides::new(1, 0, 2, 0));
        let sides = project_crop(&Sides::new(2, 2, 2, 2), (8, 8), (4, 4));
        assert_eq!(sides, Sides::new(1, 1, 1, 1));
    }
}
