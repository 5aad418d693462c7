#![allow(dead_code)]

use ndarray::{Array2, Array3, Axis};
use size_augment::{AugmentConfig, HeatmapsOnImage, KeypointsOnImage};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Installs a test-writer subscriber once per test binary. `RUST_LOG`
/// controls verbosity (e.g. `RUST_LOG=size_augment=trace`).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn seeded(seed: u64) -> AugmentConfig {
    AugmentConfig::builder().seed(seed).build()
}

/// Single-channel image from rows.
pub fn gray(rows: &[&[u8]]) -> Array3<u8> {
    let h = rows.len();
    let w = rows[0].len();
    let flat: Vec<u8> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    Array2::from_shape_vec((h, w), flat)
        .expect("rows must have equal length")
        .insert_axis(Axis(2))
}

/// Rows of the first channel.
pub fn rows<T: Copy>(img: &Array3<T>) -> Vec<Vec<T>> {
    img.index_axis(Axis(2), 0)
        .outer_iter()
        .map(|row| row.to_vec())
        .collect()
}

/// `h x w` image whose pixel value encodes its position (`y * w + x`).
pub fn ramp(h: usize, w: usize) -> Array3<u8> {
    Array3::from_shape_fn((h, w, 1), |(y, x, _)| (y * w + x) as u8)
}

pub fn keypoints(coords: &[(f32, f32)], shape: (usize, usize)) -> KeypointsOnImage {
    KeypointsOnImage::from_xy(coords, shape)
}

/// Heatmap with a single hot pixel at `(y, x)` on an array the size of the image.
pub fn hot_pixel(shape: (usize, usize), y: usize, x: usize) -> HeatmapsOnImage {
    let mut arr = Array3::<f32>::zeros((shape.0, shape.1, 1));
    arr[[y, x, 0]] = 1.0;
    HeatmapsOnImage::new(arr, shape, 0.0, 1.0).expect("valid heatmap")
}
