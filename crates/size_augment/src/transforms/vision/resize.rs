use crate::augmentables::Element;
use crate::parameters::Categorical;
use crate::transforms::Transform;
use anyhow::{ensure, Result};
use image::{imageops::FilterType, ImageBuffer, Luma};
use ndarray::{Array3, Axis};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Interpolation
// ============================================================================

/// Resampling method used by `Scale` and by the keep-size step of pad/crop.
///
/// `Nearest` indexes the source array directly. The other methods map onto
/// an `image` filter:
/// - `Nearest`: nearest neighbour, fastest, keeps the exact input values
/// - `Linear`: bilinear (`Triangle`)
/// - `Cubic`: bicubic (`CatmullRom`)
/// - `Lanczos`: Lanczos with window 3, highest quality but slowest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interpolation {
    Nearest,
    Linear,
    Cubic,
    Lanczos,
}

impl Interpolation {
    pub fn name(self) -> &'static str {
        match self {
            Interpolation::Nearest => "nearest",
            Interpolation::Linear => "linear",
            Interpolation::Cubic => "cubic",
            Interpolation::Lanczos => "lanczos",
        }
    }

    pub fn filter(self) -> FilterType {
        match self {
            Interpolation::Nearest => FilterType::Nearest,
            Interpolation::Linear => FilterType::Triangle,
            Interpolation::Cubic => FilterType::CatmullRom,
            Interpolation::Lanczos => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interpolation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Interpolation::ALL
            .iter()
            .copied()
            .find(|method| method.name() == s)
            .ok_or_else(|| format!("unknown interpolation \"{s}\""))
    }
}

impl Categorical for Interpolation {
    const OPTION: &'static str = "interpolation";
    const ALL: &'static [Self] = &[
        Interpolation::Nearest,
        Interpolation::Linear,
        Interpolation::Cubic,
        Interpolation::Lanczos,
    ];
    const NAMES: &'static [&'static str] = &["nearest", "linear", "cubic", "lanczos"];
}

// ============================================================================
// Resampling
// ============================================================================

/// Resamples every channel of `img` to `(height, width)`.
///
/// `Nearest` copies source values by index. The filtered methods go through
/// `image`'s float resampling, which works on `[0, 1]` `f32` data: each
/// channel is normalized by its own min/max before the resize and mapped back
/// after. Constant channels stay constant. `i32` channels spanning more than
/// 2^24 values lose precision on that path. Both target sides must be >= 1.
pub fn resize<T: Element>(
    img: &Array3<T>,
    height: usize,
    width: usize,
    interpolation: Interpolation,
) -> Array3<T> {
    let (src_h, src_w, channels) = img.dim();
    if (src_h, src_w) == (height, width) {
        return img.clone();
    }
    if interpolation == Interpolation::Nearest {
        return resize_nearest(img, height, width);
    }

    let mut out = Array3::<T>::default((height, width, channels));
    for (c, plane) in img.axis_iter(Axis(2)).enumerate() {
        let (lo, hi) = plane.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            let v = v.to_f64();
            (lo.min(v), hi.max(v))
        });
        let mut out_plane = out.index_axis_mut(Axis(2), c);
        if hi <= lo {
            out_plane.fill(T::from_f64(lo));
            continue;
        }

        let range = hi - lo;
        let normalized = ImageBuffer::from_fn(src_w as u32, src_h as u32, |x, y| {
            Luma([((plane[[y as usize, x as usize]].to_f64() - lo) / range) as f32])
        });
        let resized: ImageBuffer<Luma<f32>, Vec<f32>> = image::imageops::resize(
            &normalized,
            width as u32,
            height as u32,
            interpolation.filter(),
        );
        for ((y, x), v) in out_plane.indexed_iter_mut() {
            let unit = f64::from(resized.get_pixel(x as u32, y as u32).0[0]).clamp(0.0, 1.0);
            *v = T::from_f64(lo + unit * range);
        }
    }
    out
}

/// Source index sampled by output index `dst` (pixel centers aligned).
fn nearest_index(dst: usize, src_len: usize, dst_len: usize) -> usize {
    let center = (dst as f64 + 0.5) * src_len as f64 / dst_len as f64;
    (center.floor() as usize).min(src_len - 1)
}

fn resize_nearest<T: Element>(img: &Array3<T>, height: usize, width: usize) -> Array3<T> {
    let (src_h, src_w, channels) = img.dim();
    let rows: Vec<usize> = (0..height).map(|y| nearest_index(y, src_h, height)).collect();
    let cols: Vec<usize> = (0..width).map(|x| nearest_index(x, src_w, width)).collect();
    Array3::from_shape_fn((height, width, channels), |(y, x, c)| img[[rows[y], cols[x], c]])
}

// ============================================================================
// Resize
// ============================================================================

/// Resizes an image array to a fixed `(height, width)`.
///
/// # Examples
/// ``` ignore
/// let resize = Resize::new(64, 64, Interpolation::Linear)?;
/// let resized = resize.apply(img)?;
/// assert_eq!(resized.dim().0, 64);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Resize {
    height: usize,
    width: usize,
    interpolation: Interpolation,
}

impl Resize {
    pub fn new(height: usize, width: usize, interpolation: Interpolation) -> Result<Self> {
        ensure!(
            height > 0 && width > 0,
            "Image dimensions must be positive after resizing (got {}x{})",
            height,
            width
        );
        Ok(Self {
            height,
            width,
            interpolation,
        })
    }
}

impl<T: Element> Transform<Array3<T>, Array3<T>> for Resize {
    fn apply(&self, img: Array3<T>) -> Result<Array3<T>> {
        ensure!(!img.is_empty(), "Cannot resize an empty image {:?}", img.dim());
        Ok(resize(&img, self.height, self.width, self.interpolation))
    }
}
