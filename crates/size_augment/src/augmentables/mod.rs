//! Data views that size augmenters transform.
//!
//! ```text
//! augmentables/
//! ├── element.rs    → Element: pixel types (u8, u16, i32, f32, f64)
//! ├── keypoints.rs  → Keypoint / KeypointsOnImage
//! ├── heatmaps.rs   → HeatmapsOnImage
//! └── batch.rs      → Batch: images + keypoints + heatmaps of the same items
//! ```

pub mod batch;
pub mod element;
pub mod heatmaps;
pub mod keypoints;

pub use batch::Batch;
pub use element::Element;
pub use heatmaps::HeatmapsOnImage;
pub use keypoints::{Keypoint, KeypointsOnImage};
