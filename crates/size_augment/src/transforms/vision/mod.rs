//! src/transforms/vision/mod.rs
//!
//! Raster primitives shared by all size augmenters.
//!
//! ```text
//! transforms/vision/
//! ├── border.rs     → PadMode and border padding (constant, edge, reflect, ...)
//! ├── geometric.rs  → crop by slicing, PadBorder / CropBorder transforms
//! └── resize.rs     → Interpolation and per-channel resampling
//! ```
//!
//! All functions operate on `ndarray::Array3<T>` laid out as
//! `(height, width, channels)`.

pub mod border;
pub mod geometric;
pub mod resize;

pub use border::{pad, PadMode};
pub use geometric::{crop, CropBorder, PadBorder};
pub use resize::{resize, Interpolation, Resize};
