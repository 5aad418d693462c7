use super::{check_image, resize_heatmap, Augmenter};
use crate::augmentables::{Element, HeatmapsOnImage, KeypointsOnImage};
use crate::config::AugmentConfig;
use crate::error::{AugmentError, Result};
use crate::geometry::{compute_scale, project_size};
use crate::parameters::{resolve_choice, resolve_scale, ChoiceSpec, ScaleSpec, SpecInput};
use crate::random::RandomState;
use crate::sampler::{Drawn, Sampler};
use crate::transforms::vision::{resize, Interpolation};
use ndarray::Array3;
use rand::rngs::StdRng;
use tracing::{debug, trace};

// ============================================================================
// Scale
// ============================================================================

/// Resizes images to a sampled target size.
///
/// # Size specs
/// - `32`: 32x32 px
/// - `0.5`: half the input size (a float is a factor)
/// - `(16, 32)` / `(0.5, 1.5)`: uniform in the inclusive range, one draw
///   shared by height and width
/// - `vec![16, 32]`: one of the listed values
/// - `SpecInput::map([("height", 32), ("width", "keep-aspect-ratio")])`:
///   per-axis specs; a missing axis keeps its size
/// - `"keep"` / `vec![]`: unchanged
///
/// # Examples
/// ``` ignore
/// let scale = Scale::builder()
///     .size(SpecInput::map([("height", SpecInput::from(64)), ("width", "keep-aspect-ratio".into())]))
///     .interpolation("linear")
///     .build()?;
/// let resized = scale.augment_image(img)?;
/// ```
#[derive(Debug, Clone)]
pub struct Scale {
    size: ScaleSpec,
    interpolation: ChoiceSpec<Interpolation>,
    config: AugmentConfig,
    random_state: RandomState,
}

pub struct ScaleBuilder {
    size: Option<SpecInput>,
    interpolation: SpecInput,
    config: AugmentConfig,
}

impl Default for ScaleBuilder {
    fn default() -> Self {
        Self {
            size: None,
            interpolation: "cubic".into(),
            config: AugmentConfig::default(),
        }
    }
}

impl ScaleBuilder {
    pub fn size(mut self, size: impl Into<SpecInput>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// A name, a list of names (uniform choice per image) or `"ALL"`.
    pub fn interpolation(mut self, interpolation: impl Into<SpecInput>) -> Self {
        self.interpolation = interpolation.into();
        self
    }

    pub fn config(mut self, config: AugmentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Scale> {
        let size = self
            .size
            .as_ref()
            .ok_or_else(|| AugmentError::expected("size to be set", "nothing"))
            .and_then(resolve_scale)?;
        let interpolation = resolve_choice(&self.interpolation)?;
        debug!(?size, ?interpolation, "built Scale");
        Ok(Scale {
            size,
            interpolation,
            config: self.config,
            random_state: RandomState::new(self.config.seed),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ScaleSample {
    pub height: Drawn,
    pub width: Drawn,
    pub interpolation: Interpolation,
}

impl Scale {
    pub fn builder() -> ScaleBuilder {
        ScaleBuilder::default()
    }

    /// Shorthand for `Scale::builder().size(size).build()`.
    pub fn new(size: impl Into<SpecInput>) -> Result<Self> {
        Self::builder().size(size).build()
    }

    /// Resolved size and interpolation specs.
    pub fn parameters(&self) -> (&ScaleSpec, &ChoiceSpec<Interpolation>) {
        (&self.size, &self.interpolation)
    }

    fn target(&self, shape: (usize, usize), sample: &ScaleSample) -> (usize, usize) {
        let target = compute_scale(shape.0, shape.1, sample.height, sample.width);
        trace!(from = ?shape, to = ?target, "scale");
        target
    }
}

impl Augmenter for Scale {
    type Sample = ScaleSample;

    fn name(&self) -> &'static str {
        "Scale"
    }

    fn config(&self) -> &AugmentConfig {
        &self.config
    }

    fn random_state(&self) -> &RandomState {
        &self.random_state
    }

    fn with_random_state(mut self, state: RandomState) -> Self {
        self.random_state = state;
        self
    }

    fn draw_samples(&self, n_items: usize, rng: &mut StdRng) -> Vec<ScaleSample> {
        let sampler = Sampler::new(self.config.independent);
        let sizes = sampler.sizes(&self.size, n_items, rng);
        let methods = sampler.choices(&self.interpolation, n_items, rng);
        sizes
            .into_iter()
            .zip(methods)
            .map(|((height, width), interpolation)| ScaleSample {
                height,
                width,
                interpolation,
            })
            .collect()
    }

    fn apply_image<T: Element>(&self, img: Array3<T>, sample: &ScaleSample) -> Result<Array3<T>> {
        check_image(&img)?;
        let (h, w, _) = img.dim();
        let (dst_h, dst_w) = self.target((h, w), sample);
        Ok(resize(&img, dst_h, dst_w, sample.interpolation))
    }

    fn apply_keypoints(
        &self,
        keypoints: KeypointsOnImage,
        sample: &ScaleSample,
    ) -> Result<KeypointsOnImage> {
        let target = self.target(keypoints.shape(), sample);
        Ok(keypoints.project(target))
    }

    fn apply_heatmaps(
        &self,
        heatmaps: HeatmapsOnImage,
        sample: &ScaleSample,
    ) -> Result<HeatmapsOnImage> {
        let (h, w) = heatmaps.shape();
        let (dst_h, dst_w) = self.target((h, w), sample);
        let (arr_h, arr_w) = heatmaps.arr_shape();
        let arr = resize_heatmap(
            heatmaps.arr_0to1(),
            project_size(dst_h, h, arr_h),
            project_size(dst_w, w, arr_w),
        );
        Ok(heatmaps.with_arr(arr, (dst_h, dst_w)))
    }
}
