use super::border::{pad, PadMode};
use crate::augmentables::Element;
use crate::geometry::Sides;
use crate::transforms::Transform;
use anyhow::{ensure, Result};
use ndarray::{s, Array3};

/// Removes `sides` from `img` by slicing. No interpolation takes place.
///
/// Callers guarantee at least one row and column remain.
pub fn crop<T: Element>(img: &Array3<T>, sides: &Sides) -> Array3<T> {
    if sides.is_zero() {
        return img.clone();
    }
    let (h, w, _) = img.dim();
    img.slice(s![sides.top..h - sides.bottom, sides.left..w - sides.right, ..])
        .to_owned()
}

// ============================================================================
// PadBorder
// ============================================================================

/// Pads an image by fixed per-side amounts.
///
/// # Examples
/// ``` ignore
/// let sides = Sides::new(1, 0, 1, 0);
/// let padded = PadBorder::new(sides, PadMode::Edge, 0.0).apply(img)?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PadBorder {
    sides: Sides,
    mode: PadMode,
    cval: f64,
}

impl PadBorder {
    pub fn new(sides: Sides, mode: PadMode, cval: f64) -> Self {
        Self { sides, mode, cval }
    }
}

impl<T: Element> Transform<Array3<T>, Array3<T>> for PadBorder {
    fn apply(&self, img: Array3<T>) -> Result<Array3<T>> {
        ensure!(!img.is_empty(), "Cannot pad an empty image {:?}", img.dim());
        Ok(pad(&img, &self.sides, self.mode, self.cval))
    }
}

// ============================================================================
// CropBorder
// ============================================================================

/// Crops fixed per-side amounts off an image.
#[derive(Debug, Clone, Copy)]
pub struct CropBorder {
    sides: Sides,
}

impl CropBorder {
    pub fn new(sides: Sides) -> Self {
        Self { sides }
    }
}

impl<T: Element> Transform<Array3<T>, Array3<T>> for CropBorder {
    fn apply(&self, img: Array3<T>) -> Result<Array3<T>> {
        let (h, w, _) = img.dim();
        ensure!(
            self.sides.top + self.sides.bottom < h && self.sides.left + self.sides.right < w,
            "Crop of {:?} would leave nothing of a {}x{} image",
            self.sides,
            h,
            w
        );
        Ok(crop(&img, &self.sides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(h: usize, w: usize) -> Array3<u8> {
        Array3::from_shape_fn((h, w, 1), |(y, x, _)| (y * w + x) as u8)
    }

    #[test]
    fn test_crop_slices_exact_window() {
        let img = ramp(4, 5);
        let cropped = crop(&img, &Sides::new(1, 2, 0, 1));
        assert_eq!(cropped.dim(), (3, 2, 1));
        let values: Vec<u8> = cropped.iter().copied().collect();
        assert_eq!(values, [6, 7, 11, 12, 16, 17]);
    }

    #[test]
    fn test_pad_then_crop_is_identity() -> Result<()> {
        let sides = Sides::new(2, 1, 0, 3);
        let pipeline = PadBorder::new(sides, PadMode::Reflect, 0.0).then(CropBorder::new(sides));
        let img = ramp(3, 3);
        let restored: Array3<u8> = pipeline.apply(img.clone())?;
        assert_eq!(restored, img);
        Ok(())
    }

    #[test]
    fn test_crop_border_rejects_emptying() {
        let err = CropBorder::new(Sides::new(2, 0, 2, 0)).apply(ramp(4, 4)).unwrap_err();
        assert!(err.to_string().contains("would leave nothing"));
    }
}
