//! Size-changing image augmentation: `Scale`, `Pad`, `Crop`,
//! `PadToFixedSize` and `CropToFixedSize`, applied consistently to images,
//! keypoints and heatmaps.
//!
//! ```ignore
//! use size_augment::prelude::*;
//!
//! let pad = Pad::builder().px((0, 4)).pad_mode("edge").build()?.to_deterministic();
//! let images = pad.augment_images(images)?;
//! let keypoints = pad.augment_keypoints(keypoints)?; // same geometry as the images
//! ```

pub mod augmentables;
pub mod augmenters;
pub mod config;
pub mod error;
pub mod geometry;
pub mod parallel;
pub mod parameters;
pub mod random;
pub mod sampler;
pub mod transforms;

pub use augmentables::{Batch, Element, HeatmapsOnImage, Keypoint, KeypointsOnImage};
pub use augmenters::{Augmenter, Crop, CropToFixedSize, Pad, PadToFixedSize, Scale};
pub use config::AugmentConfig;
pub use error::{AugmentError, Result};
pub use parameters::{Position, PositionSpec, SpecInput};
pub use transforms::vision::{Interpolation, PadMode};
pub use transforms::{Chain, Transform};

pub mod prelude {
    pub use crate::augmentables::{Batch, HeatmapsOnImage, Keypoint, KeypointsOnImage};
    pub use crate::augmenters::{Augmenter, Crop, CropToFixedSize, Pad, PadToFixedSize, Scale};
    pub use crate::config::AugmentConfig;
    pub use crate::parameters::{
        Choice, Deterministic, DiscreteUniform, Position, PositionSpec, SpecInput, Uniform,
    };
    pub use crate::transforms::Transform;
}
