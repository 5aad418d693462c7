use super::{Element, HeatmapsOnImage, KeypointsOnImage};
use crate::error::{ensure_input, Result};
use ndarray::Array3;

/// Images and their annotations, augmented together.
///
/// Item `i` of every present view belongs to the same image and receives
/// the same sampled geometry. Absent views are `None` and stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<T: Element> {
    pub images: Option<Vec<Array3<T>>>,
    pub keypoints: Option<Vec<KeypointsOnImage>>,
    pub heatmaps: Option<Vec<HeatmapsOnImage>>,
}

impl<T: Element> Default for Batch<T> {
    fn default() -> Self {
        Self {
            images: None,
            keypoints: None,
            heatmaps: None,
        }
    }
}

impl<T: Element> Batch<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_images(mut self, images: Vec<Array3<T>>) -> Self {
        self.images = Some(images);
        self
    }

    pub fn with_keypoints(mut self, keypoints: Vec<KeypointsOnImage>) -> Self {
        self.keypoints = Some(keypoints);
        self
    }

    pub fn with_heatmaps(mut self, heatmaps: Vec<HeatmapsOnImage>) -> Self {
        self.heatmaps = Some(heatmaps);
        self
    }

    /// Number of items, taken from the first present view.
    pub fn len(&self) -> usize {
        self.lengths().first().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lengths(&self) -> Vec<usize> {
        [
            self.images.as_ref().map(Vec::len),
            self.keypoints.as_ref().map(Vec::len),
            self.heatmaps.as_ref().map(Vec::len),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Checks that every present view has the same number of items.
    pub(crate) fn validate(&self) -> Result<usize> {
        let lengths = self.lengths();
        let n = lengths.first().copied().unwrap_or(0);
        ensure_input!(
            lengths.iter().all(|&len| len == n),
            "batch views have different lengths {lengths:?}"
        );
        Ok(n)
    }
}
