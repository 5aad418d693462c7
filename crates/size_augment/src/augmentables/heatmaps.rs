use crate::error::{ensure_input, Result};
use ndarray::Array3;

/// Probability maps attached to an image.
///
/// Values are stored normalized to `[0, 1]` in an array of shape
/// `(arr_height, arr_width, n_maps)`, which may be smaller or larger than
/// the image it belongs to. `min_value`/`max_value` remember the original
/// value range so [`get_arr`](Self::get_arr) can restore it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapsOnImage {
    arr_0to1: Array3<f32>,
    shape: (usize, usize),
    min_value: f32,
    max_value: f32,
}

impl HeatmapsOnImage {
    /// Wraps `arr`, whose values must lie within `[min_value, max_value]`.
    pub fn new(arr: Array3<f32>, shape: (usize, usize), min_value: f32, max_value: f32) -> Result<Self> {
        ensure_input!(
            min_value < max_value,
            "heatmap min_value ({min_value}) must be below max_value ({max_value})"
        );
        const EPS: f32 = 1e-4;
        ensure_input!(
            arr.iter().all(|&v| v >= min_value - EPS && v <= max_value + EPS),
            "heatmap values must lie within [{min_value}, {max_value}]"
        );
        let range = max_value - min_value;
        let arr_0to1 = arr.mapv(|v| ((v - min_value) / range).clamp(0.0, 1.0));
        Self::from_0to1(arr_0to1, shape, min_value, max_value)
    }

    /// Wraps an already normalized array.
    pub fn from_0to1(
        arr_0to1: Array3<f32>,
        shape: (usize, usize),
        min_value: f32,
        max_value: f32,
    ) -> Result<Self> {
        let heatmaps = Self {
            arr_0to1,
            shape,
            min_value,
            max_value,
        };
        heatmaps.validate()?;
        Ok(heatmaps)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure_input!(
            !self.arr_0to1.is_empty(),
            "heatmap array has zero extent {:?}",
            self.arr_0to1.dim()
        );
        ensure_input!(
            self.shape.0 > 0 && self.shape.1 > 0,
            "heatmaps were recorded on a degenerate image shape {:?}",
            self.shape
        );
        Ok(())
    }

    pub fn arr_0to1(&self) -> &Array3<f32> {
        &self.arr_0to1
    }

    /// Heatmap values in the original `[min_value, max_value]` range.
    pub fn get_arr(&self) -> Array3<f32> {
        let range = self.max_value - self.min_value;
        self.arr_0to1.mapv(|v| self.min_value + v * range)
    }

    /// Shape `(height, width)` of the image the heatmaps belong to.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// `(height, width)` of the heatmap array itself.
    pub fn arr_shape(&self) -> (usize, usize) {
        let (h, w, _) = self.arr_0to1.dim();
        (h, w)
    }

    pub fn min_value(&self) -> f32 {
        self.min_value
    }

    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    /// Same value range, new array and image shape.
    pub(crate) fn with_arr(&self, arr_0to1: Array3<f32>, shape: (usize, usize)) -> Self {
        Self {
            arr_0to1,
            shape,
            min_value: self.min_value,
            max_value: self.max_value,
        }
    }
}
