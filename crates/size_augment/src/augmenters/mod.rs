//! Size augmenters: `Scale`, `Pad`, `Crop`, `PadToFixedSize`, `CropToFixedSize`.
//!
//! Every augmenter follows the same flow per call:
//!
//! ```text
//! random state ──► draw_samples(n)      (all draws up front, on the caller thread)
//!                       │
//!                       ▼
//!        per item: sample + item shape ──► geometry ──► apply_{image,keypoints,heatmaps}
//!                                                        (optionally on worker threads)
//! ```
//!
//! A sample holds shape-independent draws (`Drawn` amounts, pad mode, fill
//! value, position, interpolation). Geometry is derived from the shape each
//! data view records, so one sample keeps an image, its keypoints and its
//! heatmaps in correspondence even when they are submitted separately to a
//! deterministic augmenter.

pub mod crop_pad;
pub mod fixed_size;
pub mod scale;

pub use crop_pad::{Crop, CropBuilder, CropSample, Pad, PadBuilder, PadSample};
pub use fixed_size::{
    CropToFixedSize, CropToFixedSizeBuilder, FixedPadSample, PadToFixedSize, PadToFixedSizeBuilder,
};
pub use scale::{Scale, ScaleBuilder, ScaleSample};

use crate::augmentables::{Batch, Element, HeatmapsOnImage, KeypointsOnImage};
use crate::config::AugmentConfig;
use crate::error::{ensure_input, AugmentError, Result};
use crate::parallel::WorkerPool;
use crate::parameters::{PerSideSpec, SizeSpec};
use crate::random::RandomState;
use crate::transforms::vision::{resize, Interpolation};
use ndarray::Array3;
use rand::rngs::StdRng;
use std::fmt;
use tracing::debug;

pub trait Augmenter: Clone + Send + Sync + Sized {
    /// Per-item random decision.
    type Sample: Clone + Send + Sync + fmt::Debug;

    fn name(&self) -> &'static str;

    fn config(&self) -> &AugmentConfig;

    fn random_state(&self) -> &RandomState;

    fn with_random_state(self, state: RandomState) -> Self;

    /// Draws the decisions for `n_items` items from `rng`.
    fn draw_samples(&self, n_items: usize, rng: &mut StdRng) -> Vec<Self::Sample>;

    fn apply_image<T: Element>(&self, img: Array3<T>, sample: &Self::Sample) -> Result<Array3<T>>;

    fn apply_keypoints(
        &self,
        keypoints: KeypointsOnImage,
        sample: &Self::Sample,
    ) -> Result<KeypointsOnImage>;

    fn apply_heatmaps(
        &self,
        heatmaps: HeatmapsOnImage,
        sample: &Self::Sample,
    ) -> Result<HeatmapsOnImage>;

    // ------------------------------------------------------------------------
    // Provided
    // ------------------------------------------------------------------------

    fn is_deterministic(&self) -> bool {
        self.random_state().is_deterministic()
    }

    /// Copy that replays one frozen decision stream on every call.
    ///
    /// `self` keeps drawing fresh samples; calling this twice yields two
    /// copies with different frozen streams.
    fn to_deterministic(&self) -> Self {
        let seed = self.random_state().snapshot();
        debug!(augmenter = self.name(), seed, "frozen into deterministic copy");
        self.clone().with_random_state(RandomState::deterministic(seed))
    }

    /// Samples for one call.
    fn samples_for_call(&self, n_items: usize) -> Vec<Self::Sample> {
        let mut rng = self.random_state().call_rng();
        self.draw_samples(n_items, &mut rng)
    }

    fn augment_images<T: Element>(&self, images: Vec<Array3<T>>) -> Result<Vec<Array3<T>>> {
        for img in &images {
            check_image(img)?;
        }
        let samples = self.samples_for_call(images.len());
        self.apply_all(images, samples, |img, sample| self.apply_image(img, sample))
    }

    fn augment_image<T: Element>(&self, image: Array3<T>) -> Result<Array3<T>> {
        self.augment_images(vec![image])?
            .pop()
            .ok_or_else(|| AugmentError::Worker("augmentation returned no image".to_string()))
    }

    fn augment_keypoints(&self, keypoints: Vec<KeypointsOnImage>) -> Result<Vec<KeypointsOnImage>> {
        for kps in &keypoints {
            kps.validate()?;
        }
        let samples = self.samples_for_call(keypoints.len());
        self.apply_all(keypoints, samples, |kps, sample| self.apply_keypoints(kps, sample))
    }

    fn augment_heatmaps(&self, heatmaps: Vec<HeatmapsOnImage>) -> Result<Vec<HeatmapsOnImage>> {
        for hm in &heatmaps {
            hm.validate()?;
        }
        let samples = self.samples_for_call(heatmaps.len());
        self.apply_all(heatmaps, samples, |hm, sample| self.apply_heatmaps(hm, sample))
    }

    /// Augments every present view of `batch` with one shared set of samples.
    fn augment_batch<T: Element>(&self, batch: Batch<T>) -> Result<Batch<T>> {
        let n_items = batch.validate()?;
        let Batch {
            images,
            keypoints,
            heatmaps,
        } = batch;
        for img in images.iter().flatten() {
            check_image(img)?;
        }
        for kps in keypoints.iter().flatten() {
            kps.validate()?;
        }
        for hm in heatmaps.iter().flatten() {
            hm.validate()?;
        }

        let samples = self.samples_for_call(n_items);
        let images = images
            .map(|images| {
                self.apply_all(images, samples.clone(), |img, s| self.apply_image(img, s))
            })
            .transpose()?;
        let keypoints = keypoints
            .map(|kps| self.apply_all(kps, samples.clone(), |k, s| self.apply_keypoints(k, s)))
            .transpose()?;
        let heatmaps = heatmaps
            .map(|hms| self.apply_all(hms, samples, |h, s| self.apply_heatmaps(h, s)))
            .transpose()?;
        Ok(Batch {
            images,
            keypoints,
            heatmaps,
        })
    }

    #[doc(hidden)]
    fn apply_all<D, F>(&self, items: Vec<D>, samples: Vec<Self::Sample>, apply: F) -> Result<Vec<D>>
    where
        D: Send,
        F: Fn(D, &Self::Sample) -> Result<D> + Sync,
    {
        let tasks: Vec<(D, Self::Sample)> = items.into_iter().zip(samples).collect();
        WorkerPool::new(self.config().num_workers).map(tasks, |(item, sample)| apply(item, &sample))
    }
}

/// Implements `Transform` for single images and for batches.
macro_rules! impl_transform {
    ($($augmenter:ty),* $(,)?) => {
        $(
            impl<T: $crate::augmentables::Element>
                $crate::transforms::Transform<ndarray::Array3<T>, ndarray::Array3<T>> for $augmenter
            {
                fn apply(&self, img: ndarray::Array3<T>) -> anyhow::Result<ndarray::Array3<T>> {
                    Ok($crate::augmenters::Augmenter::augment_image(self, img)?)
                }
            }

            impl<T: $crate::augmentables::Element>
                $crate::transforms::Transform<
                    $crate::augmentables::Batch<T>,
                    $crate::augmentables::Batch<T>,
                > for $augmenter
            {
                fn apply(
                    &self,
                    batch: $crate::augmentables::Batch<T>,
                ) -> anyhow::Result<$crate::augmentables::Batch<T>> {
                    Ok($crate::augmenters::Augmenter::augment_batch(self, batch)?)
                }
            }
        )*
    };
}

impl_transform!(Scale, Pad, Crop, PadToFixedSize, CropToFixedSize);

// ============================================================================
// Shared helpers
// ============================================================================

fn check_image<T: Element>(img: &Array3<T>) -> Result<()> {
    let (h, w, c) = img.dim();
    ensure_input!(
        h > 0 && w > 0 && c > 0,
        "image has zero extent (height={h}, width={w}, channels={c})"
    );
    Ok(())
}

/// Cubic resize of a normalized heatmap array, clipped to `[0, 1]`.
fn resize_heatmap(arr: &Array3<f32>, height: usize, width: usize) -> Array3<f32> {
    resize(arr, height, width, Interpolation::Cubic).mapv(|v| v.clamp(0.0, 1.0))
}

/// Rejects literal negative amounts for pad/crop.
fn ensure_non_negative(spec: &PerSideSpec, name: &str) -> Result<()> {
    let specs: &[SizeSpec] = match spec {
        PerSideSpec::Uniform(spec) => std::slice::from_ref(spec),
        PerSideSpec::Sides(sides) => sides,
    };
    let negative = specs.iter().any(|spec| match spec {
        SizeSpec::FixedInt(v) => *v < 0,
        SizeSpec::IntRange(lo, _) => *lo < 0,
        SizeSpec::IntList(vs) => vs.iter().any(|v| *v < 0),
        SizeSpec::FixedFloat(v) => *v < 0.0,
        SizeSpec::FloatRange(lo, _) => *lo < 0.0,
        SizeSpec::FloatList(vs) => vs.iter().any(|v| *v < 0.0),
        SizeSpec::Keep | SizeSpec::KeepAspectRatio | SizeSpec::External(_) => false,
    });
    if negative {
        return Err(AugmentError::expected(
            format!("{name} amounts to be >= 0"),
            format!("{spec:?}"),
        ));
    }
    Ok(())
}
