use crate::error::{ensure_input, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Keypoints of one image together with that image's `(height, width)`.
///
/// The recorded shape follows every geometric change so that keypoints can
/// be projected onto resized versions of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct KeypointsOnImage {
    pub keypoints: Vec<Keypoint>,
    shape: (usize, usize),
}

impl KeypointsOnImage {
    pub fn new(keypoints: Vec<Keypoint>, shape: (usize, usize)) -> Self {
        Self { keypoints, shape }
    }

    /// Builds keypoints from `(x, y)` pairs.
    pub fn from_xy(coords: &[(f32, f32)], shape: (usize, usize)) -> Self {
        let keypoints = coords.iter().map(|&(x, y)| Keypoint::new(x, y)).collect();
        Self::new(keypoints, shape)
    }

    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn height(&self) -> usize {
        self.shape.0
    }

    pub fn width(&self) -> usize {
        self.shape.1
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    pub fn to_xy(&self) -> Vec<(f32, f32)> {
        self.keypoints.iter().map(|kp| (kp.x, kp.y)).collect()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure_input!(
            self.shape.0 > 0 && self.shape.1 > 0,
            "keypoints were recorded on a degenerate image shape {:?}",
            self.shape
        );
        Ok(())
    }

    /// Moves every keypoint by `(dx, dy)` and records `shape` as the new image shape.
    pub fn shift(&self, dx: f32, dy: f32, shape: (usize, usize)) -> Self {
        let keypoints = self
            .keypoints
            .iter()
            .map(|kp| Keypoint::new(kp.x + dx, kp.y + dy))
            .collect();
        Self::new(keypoints, shape)
    }

    /// Rescales keypoints from the recorded shape onto an image of shape `to`.
    pub fn project(&self, to: (usize, usize)) -> Self {
        if to == self.shape {
            return self.clone();
        }
        let sy = to.0 as f32 / self.shape.0 as f32;
        let sx = to.1 as f32 / self.shape.1 as f32;
        let keypoints = self
            .keypoints
            .iter()
            .map(|kp| Keypoint::new(kp.x * sx, kp.y * sy))
            .collect();
        Self::new(keypoints, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_updates_shape() {
        let kps = KeypointsOnImage::from_xy(&[(1.0, 2.0)], (4, 4));
        let shifted = kps.shift(3.0, -1.0, (6, 8));
        assert_eq!(shifted.to_xy(), [(4.0, 1.0)]);
        assert_eq!(shifted.shape(), (6, 8));
    }

    #[test]
    fn test_project_scales_per_axis() {
        let kps = KeypointsOnImage::from_xy(&[(2.0, 3.0)], (10, 20));
        let projected = kps.project((20, 10));
        assert_eq!(projected.to_xy(), [(1.0, 6.0)]);
    }

    #[test]
    fn test_degenerate_shape_is_input_error() {
        let kps = KeypointsOnImage::from_xy(&[], (0, 4));
        assert!(!kps.validate().unwrap_err().is_config());
    }
}
