//! `PadToFixedSize` / `CropToFixedSize`: bring images to at least / at most
//! a fixed `(height, width)`.
//!
//! Axes that already satisfy the target are left untouched, so the two can
//! be chained to produce exactly `(height, width)`:
//!
//! ```ignore
//! let exact = Transform::<Array3<u8>, Array3<u8>>::then(
//!     PadToFixedSize::new(32, 32)?,
//!     CropToFixedSize::new(32, 32)?,
//! );
//! ```
//!
//! `position` decides where the slack goes. Its fractions are the share of
//! the slack placed on the top/left side, so `(0.0, 0.0)` keeps the image
//! flush top-left and `(1.0, 1.0)` flush bottom-right. The default draws a
//! uniformly random position per item.

use super::Augmenter;
use crate::augmentables::{Element, HeatmapsOnImage, KeypointsOnImage};
use crate::config::AugmentConfig;
use crate::error::{AugmentError, Result};
use crate::geometry::{fixed_crop_sides, fixed_pad_sides, project_crop, project_pad, Sides};
use crate::parameters::{
    resolve, resolve_choice, ChoiceSpec, NumericKind, Position, PositionSpec, SizeSpec,
    SpecContext, SpecInput,
};
use crate::random::RandomState;
use crate::sampler::Sampler;
use crate::transforms::vision::{crop, pad, PadMode};
use ndarray::Array3;
use rand::rngs::StdRng;
use tracing::{debug, trace};

const PAD_CVAL: SpecContext = SpecContext::new("pad_cval", NumericKind::Any);

fn check_target(height: usize, width: usize) -> Result<()> {
    for (name, value) in [("height", height), ("width", width)] {
        if value < 1 {
            return Err(AugmentError::expected(
                format!("{name} to be an int >= 1"),
                value.to_string(),
            ));
        }
    }
    Ok(())
}

// ============================================================================
// PadToFixedSize
// ============================================================================

pub struct PadToFixedSizeBuilder {
    height: usize,
    width: usize,
    position: PositionSpec,
    pad_mode: SpecInput,
    pad_cval: SpecInput,
    config: AugmentConfig,
}

impl PadToFixedSizeBuilder {
    pub fn height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn position(mut self, position: impl Into<PositionSpec>) -> Self {
        self.position = position.into();
        self
    }

    pub fn pad_mode(mut self, pad_mode: impl Into<SpecInput>) -> Self {
        self.pad_mode = pad_mode.into();
        self
    }

    pub fn pad_cval(mut self, pad_cval: impl Into<SpecInput>) -> Self {
        self.pad_cval = pad_cval.into();
        self
    }

    pub fn config(mut self, config: AugmentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<PadToFixedSize> {
        check_target(self.height, self.width)?;
        let pad_mode = resolve_choice::<PadMode>(&self.pad_mode)?;
        let pad_cval = resolve(&self.pad_cval, &PAD_CVAL)?;
        debug!(
            height = self.height,
            width = self.width,
            position = ?self.position,
            ?pad_mode,
            "built PadToFixedSize"
        );
        Ok(PadToFixedSize {
            height: self.height,
            width: self.width,
            position: self.position,
            pad_mode,
            pad_cval,
            config: self.config,
            random_state: RandomState::new(self.config.seed),
        })
    }
}

/// Pads images smaller than `(height, width)` up to that size.
#[derive(Debug, Clone)]
pub struct PadToFixedSize {
    height: usize,
    width: usize,
    position: PositionSpec,
    pad_mode: ChoiceSpec<PadMode>,
    pad_cval: SizeSpec,
    config: AugmentConfig,
    random_state: RandomState,
}

#[derive(Debug, Clone)]
pub struct FixedPadSample {
    pub position: Position,
    pub pad_mode: PadMode,
    pub pad_cval: f64,
}

impl PadToFixedSize {
    pub fn builder() -> PadToFixedSizeBuilder {
        PadToFixedSizeBuilder {
            height: 0,
            width: 0,
            position: PositionSpec::default(),
            pad_mode: "constant".into(),
            pad_cval: 0.into(),
            config: AugmentConfig::default(),
        }
    }

    /// Constant zero padding at a random position.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        Self::builder().height(height).width(width).build()
    }

    pub fn size(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn position(&self) -> PositionSpec {
        self.position
    }

    /// Same augmenter with a different position; the random state is kept.
    pub fn with_position(mut self, position: impl Into<PositionSpec>) -> Self {
        self.position = position.into();
        self
    }

    fn sides(&self, shape: (usize, usize), position: Position) -> Sides {
        let sides = fixed_pad_sides(shape.0, shape.1, self.height, self.width, position);
        trace!(from = ?shape, ?position, ?sides, "pad to fixed size");
        sides
    }
}

impl Augmenter for PadToFixedSize {
    type Sample = FixedPadSample;

    fn name(&self) -> &'static str {
        "PadToFixedSize"
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

    fn draw_samples(&self, n_items: usize, rng: &mut StdRng) -> Vec<FixedPadSample> {
        let sampler = Sampler::new(self.config.independent);
        let positions = sampler.positions(&self.position, n_items, rng);
        let modes = sampler.choices(&self.pad_mode, n_items, rng);
        let cvals = sampler.values(&self.pad_cval, NumericKind::Any, n_items, rng);
        positions
            .into_iter()
            .zip(modes)
            .zip(cvals)
            .map(|((position, pad_mode), pad_cval)| FixedPadSample {
                position,
                pad_mode,
                pad_cval,
            })
            .collect()
    }

    fn apply_image<T: Element>(&self, img: Array3<T>, sample: &FixedPadSample) -> Result<Array3<T>> {
        let (h, w, _) = img.dim();
        let sides = self.sides((h, w), sample.position);
        Ok(pad(&img, &sides, sample.pad_mode, sample.pad_cval))
    }

    fn apply_keypoints(
        &self,
        keypoints: KeypointsOnImage,
        sample: &FixedPadSample,
    ) -> Result<KeypointsOnImage> {
        let (h, w) = keypoints.shape();
        let sides = self.sides((h, w), sample.position);
        Ok(keypoints.shift(
            sides.left as f32,
            sides.top as f32,
            (h + sides.vertical(), w + sides.horizontal()),
        ))
    }

    fn apply_heatmaps(
        &self,
        heatmaps: HeatmapsOnImage,
        sample: &FixedPadSample,
    ) -> Result<HeatmapsOnImage> {
        let (h, w) = heatmaps.shape();
        let sides = self.sides((h, w), sample.position);
        let arr_sides = project_pad(&sides, (h, w), heatmaps.arr_shape());
        let padded = pad(heatmaps.arr_0to1(), &arr_sides, PadMode::Constant, 0.0);
        Ok(heatmaps.with_arr(padded, (h + sides.vertical(), w + sides.horizontal())))
    }
}

// ============================================================================
// CropToFixedSize
// ============================================================================

pub struct CropToFixedSizeBuilder {
    height: usize,
    width: usize,
    position: PositionSpec,
    config: AugmentConfig,
}

impl CropToFixedSizeBuilder {
    pub fn height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn position(mut self, position: impl Into<PositionSpec>) -> Self {
        self.position = position.into();
        self
    }

    pub fn config(mut self, config: AugmentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<CropToFixedSize> {
        check_target(self.height, self.width)?;
        debug!(
            height = self.height,
            width = self.width,
            position = ?self.position,
            "built CropToFixedSize"
        );
        Ok(CropToFixedSize {
            height: self.height,
            width: self.width,
            position: self.position,
            config: self.config,
            random_state: RandomState::new(self.config.seed),
        })
    }
}

/// Crops images larger than `(height, width)` down to that size.
#[derive(Debug, Clone)]
pub struct CropToFixedSize {
    height: usize,
    width: usize,
    position: PositionSpec,
    config: AugmentConfig,
    random_state: RandomState,
}

impl CropToFixedSize {
    pub fn builder() -> CropToFixedSizeBuilder {
        CropToFixedSizeBuilder {
            height: 0,
            width: 0,
            position: PositionSpec::default(),
            config: AugmentConfig::default(),
        }
    }

    pub fn new(height: usize, width: usize) -> Result<Self> {
        Self::builder().height(height).width(width).build()
    }

    pub fn size(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn position(&self) -> PositionSpec {
        self.position
    }

    /// Same augmenter with a different position; the random state is kept.
    pub fn with_position(mut self, position: impl Into<PositionSpec>) -> Self {
        self.position = position.into();
        self
    }

    fn sides(&self, shape: (usize, usize), position: Position) -> Sides {
        let sides = fixed_crop_sides(shape.0, shape.1, self.height, self.width, position);
        trace!(from = ?shape, ?position, ?sides, "crop to fixed size");
        sides
    }
}

impl Augmenter for CropToFixedSize {
    type Sample = Position;

    fn name(&self) -> &'static str {
        "CropToFixedSize"
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

    fn draw_samples(&self, n_items: usize, rng: &mut StdRng) -> Vec<Position> {
        Sampler::new(self.config.independent).positions(&self.position, n_items, rng)
    }

    fn apply_image<T: Element>(&self, img: Array3<T>, position: &Position) -> Result<Array3<T>> {
        let (h, w, _) = img.dim();
        let sides = self.sides((h, w), *position);
        Ok(crop(&img, &sides))
    }

    fn apply_keypoints(
        &self,
        keypoints: KeypointsOnImage,
        position: &Position,
    ) -> Result<KeypointsOnImage> {
        let (h, w) = keypoints.shape();
        let sides = self.sides((h, w), *position);
        Ok(keypoints.shift(
            -(sides.left as f32),
            -(sides.top as f32),
            (h - sides.vertical(), w - sides.horizontal()),
        ))
    }

    fn apply_heatmaps(
        &self,
        heatmaps: HeatmapsOnImage,
        position: &Position,
    ) -> Result<HeatmapsOnImage> {
        let (h, w) = heatmaps.shape();
        let sides = self.sides((h, w), *position);
        let arr_sides = project_crop(&sides, (h, w), heatmaps.arr_shape());
        let cropped = crop(heatmaps.arr_0to1(), &arr_sides);
        Ok(heatmaps.with_arr(cropped, (h - sides.vertical(), w - sides.horizontal())))
    }
}
