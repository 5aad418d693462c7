//! `Pad` and `Crop`: add or remove per-side amounts given in pixels or as
//! fractions of the image side.
//!
//! ```ignore
//! // 0 to 4 px on each side, drawn independently, edge or reflect border
//! let pad = Pad::builder()
//!     .px((0, 4))
//!     .pad_mode(vec!["edge", "reflect"])
//!     .keep_size(false)
//!     .build()?;
//!
//! // crop 10% from the top only
//! let crop = Crop::builder().percent((0.1, 0.0, 0.0, 0.0)).build()?;
//! ```
//!
//! With `keep_size` (the default) the padded/cropped result is resized back
//! to the input shape; keypoints and heatmaps follow the same resize.

use super::{check_image, ensure_non_negative, resize_heatmap, Augmenter};
use crate::augmentables::{Element, HeatmapsOnImage, KeypointsOnImage};
use crate::config::AugmentConfig;
use crate::error::{AugmentError, Result};
use crate::geometry::{crop_amounts, pad_amounts, project_crop, project_pad, Sides};
use crate::parameters::{
    resolve, resolve_choice, resolve_per_side, ChoiceSpec, NumericKind, PerSideSpec, SizeSpec,
    SpecContext, SpecInput,
};
use crate::random::RandomState;
use crate::sampler::{Drawn, Sampler};
use crate::transforms::vision::{crop, pad, resize, Interpolation, PadMode};
use ndarray::Array3;
use rand::rngs::StdRng;
use tracing::{debug, trace};

const PX: SpecContext = SpecContext::new("px", NumericKind::Pixels);
const PERCENT: SpecContext = SpecContext::new("percent", NumericKind::Fraction);
const PAD_CVAL: SpecContext = SpecContext::new("pad_cval", NumericKind::Any);

/// Options common to both builders.
struct SideOptions {
    px: Option<SpecInput>,
    percent: Option<SpecInput>,
    keep_size: bool,
    sample_independently: bool,
    interpolation: SpecInput,
    config: AugmentConfig,
}

impl Default for SideOptions {
    fn default() -> Self {
        Self {
            px: None,
            percent: None,
            keep_size: true,
            sample_independently: true,
            interpolation: "cubic".into(),
            config: AugmentConfig::default(),
        }
    }
}

/// Resolved side amounts plus the options shared by `Pad` and `Crop`.
#[derive(Debug, Clone)]
struct SideParams {
    amounts: PerSideSpec,
    kind: NumericKind,
    keep_size: bool,
    interpolation: ChoiceSpec<Interpolation>,
    config: AugmentConfig,
}

impl SideOptions {
    fn resolve(self, name: &str) -> Result<SideParams> {
        let (amounts, kind) = match (&self.px, &self.percent) {
            (Some(px), None) => (
                resolve_per_side(px, &PX, self.sample_independently)?,
                NumericKind::Pixels,
            ),
            (None, Some(percent)) => (
                resolve_per_side(percent, &PERCENT, self.sample_independently)?,
                NumericKind::Fraction,
            ),
            (Some(_), Some(_)) => {
                return Err(AugmentError::expected(
                    format!("exactly one of px/percent for {name}"),
                    "both",
                ))
            }
            (None, None) => {
                return Err(AugmentError::expected(
                    format!("exactly one of px/percent for {name}"),
                    "neither",
                ))
            }
        };
        ensure_non_negative(&amounts, if kind == NumericKind::Pixels { "px" } else { "percent" })?;
        Ok(SideParams {
            amounts,
            kind,
            keep_size: self.keep_size,
            interpolation: resolve_choice(&self.interpolation)?,
            config: self.config,
        })
    }
}

macro_rules! side_option_setters {
    () => {
        /// Amounts in pixels: int, `(lo, hi)`, list, parameter or `(top, right, bottom, left)`.
        pub fn px(mut self, px: impl Into<SpecInput>) -> Self {
            self.sides.px = Some(px.into());
            self
        }

        /// Amounts as fractions of the image height (top/bottom) or width (left/right).
        pub fn percent(mut self, percent: impl Into<SpecInput>) -> Self {
            self.sides.percent = Some(percent.into());
            self
        }

        /// Resize the result back to the input shape (default `true`).
        pub fn keep_size(mut self, keep_size: bool) -> Self {
            self.sides.keep_size = keep_size;
            self
        }

        /// `false`: a single non-tuple spec is drawn once per item and used for
        /// all four sides. Default `true`.
        pub fn sample_independently(mut self, independently: bool) -> Self {
            self.sides.sample_independently = independently;
            self
        }

        /// Interpolation of the keep-size resize: a name, a list of names or `"ALL"`.
        pub fn interpolation(mut self, interpolation: impl Into<SpecInput>) -> Self {
            self.sides.interpolation = interpolation.into();
            self
        }

        pub fn config(mut self, config: AugmentConfig) -> Self {
            self.sides.config = config;
            self
        }
    };
}

fn sides_after(shape: (usize, usize), sides: &Sides, grow: bool) -> (usize, usize) {
    if grow {
        (
            shape.0.saturating_add(sides.vertical()),
            shape.1.saturating_add(sides.horizontal()),
        )
    } else {
        (
            shape.0.saturating_sub(sides.vertical()),
            shape.1.saturating_sub(sides.horizontal()),
        )
    }
}

// ============================================================================
// Pad
// ============================================================================

pub struct PadBuilder {
    sides: SideOptions,
    pad_mode: SpecInput,
    pad_cval: SpecInput,
}

impl Default for PadBuilder {
    fn default() -> Self {
        Self {
            sides: SideOptions::default(),
            pad_mode: "constant".into(),
            pad_cval: 0.into(),
        }
    }
}

impl PadBuilder {
    side_option_setters!();

    /// Border mode: a name, a list of names (uniform choice) or `"ALL"`.
    pub fn pad_mode(mut self, pad_mode: impl Into<SpecInput>) -> Self {
        self.pad_mode = pad_mode.into();
        self
    }

    /// Fill value for `constant` (and end value of `linear_ramp`).
    pub fn pad_cval(mut self, pad_cval: impl Into<SpecInput>) -> Self {
        self.pad_cval = pad_cval.into();
        self
    }

    pub fn build(self) -> Result<Pad> {
        let params = self.sides.resolve("Pad")?;
        let pad_mode = resolve_choice::<PadMode>(&self.pad_mode)?;
        let pad_cval = resolve(&self.pad_cval, &PAD_CVAL)?;
        debug!(
            amounts = ?params.amounts,
            ?pad_mode,
            ?pad_cval,
            keep_size = params.keep_size,
            "built Pad"
        );
        Ok(Pad {
            random_state: RandomState::new(params.config.seed),
            params,
            pad_mode,
            pad_cval,
        })
    }
}

/// Pads images by per-side amounts.
#[derive(Debug, Clone)]
pub struct Pad {
    params: SideParams,
    pad_mode: ChoiceSpec<PadMode>,
    pad_cval: SizeSpec,
    random_state: RandomState,
}

#[derive(Debug, Clone)]
pub struct PadSample {
    pub sides: [Drawn; 4],
    pub pad_mode: PadMode,
    pub pad_cval: f64,
    pub interpolation: Interpolation,
}

impl Pad {
    pub fn builder() -> PadBuilder {
        PadBuilder::default()
    }

    pub fn keep_size(&self) -> bool {
        self.params.keep_size
    }
}

impl Augmenter for Pad {
    type Sample = PadSample;

    fn name(&self) -> &'static str {
        "Pad"
    }

    fn config(&self) -> &AugmentConfig {
        &self.params.config
    }

    fn random_state(&self) -> &RandomState {
        &self.random_state
    }

    fn with_random_state(mut self, state: RandomState) -> Self {
        self.random_state = state;
        self
    }

    fn draw_samples(&self, n_items: usize, rng: &mut StdRng) -> Vec<PadSample> {
        let sampler = Sampler::new(self.params.config.independent);
        let sides = sampler.sides(&self.params.amounts, self.params.kind, n_items, rng);
        let modes = sampler.choices(&self.pad_mode, n_items, rng);
        let cvals = sampler.values(&self.pad_cval, NumericKind::Any, n_items, rng);
        let methods = sampler.choices(&self.params.interpolation, n_items, rng);
        sides
            .into_iter()
            .zip(modes)
            .zip(cvals)
            .zip(methods)
            .map(|(((sides, pad_mode), pad_cval), interpolation)| PadSample {
                sides,
                pad_mode,
                pad_cval,
                interpolation,
            })
            .collect()
    }

    fn apply_image<T: Element>(&self, img: Array3<T>, sample: &PadSample) -> Result<Array3<T>> {
        check_image(&img)?;
        let (h, w, _) = img.dim();
        let sides = pad_amounts(sample.sides, h, w);
        trace!(?sides, mode = %sample.pad_mode, cval = sample.pad_cval, "pad image");
        let padded = pad(&img, &sides, sample.pad_mode, sample.pad_cval);
        if self.params.keep_size && !sides.is_zero() {
            return Ok(resize(&padded, h, w, sample.interpolation));
        }
        Ok(padded)
    }

    fn apply_keypoints(
        &self,
        keypoints: KeypointsOnImage,
        sample: &PadSample,
    ) -> Result<KeypointsOnImage> {
        let (h, w) = keypoints.shape();
        let sides = pad_amounts(sample.sides, h, w);
        trace!(?sides, "pad keypoints");
        let shifted = keypoints.shift(
            sides.left as f32,
            sides.top as f32,
            sides_after((h, w), &sides, true),
        );
        Ok(if self.params.keep_size {
            shifted.project((h, w))
        } else {
            shifted
        })
    }

    fn apply_heatmaps(
        &self,
        heatmaps: HeatmapsOnImage,
        sample: &PadSample,
    ) -> Result<HeatmapsOnImage> {
        let (h, w) = heatmaps.shape();
        let sides = pad_amounts(sample.sides, h, w);
        let arr_sides = project_pad(&sides, (h, w), heatmaps.arr_shape());
        trace!(?sides, ?arr_sides, "pad heatmaps");
        let padded = pad(heatmaps.arr_0to1(), &arr_sides, PadMode::Constant, 0.0);
        if self.params.keep_size {
            let (arr_h, arr_w) = heatmaps.arr_shape();
            return Ok(heatmaps.with_arr(resize_heatmap(&padded, arr_h, arr_w), (h, w)));
        }
        Ok(heatmaps.with_arr(padded, sides_after((h, w), &sides, true)))
    }
}

// ============================================================================
// Crop
// ============================================================================

#[derive(Default)]
pub struct CropBuilder {
    sides: SideOptions,
}

impl CropBuilder {
    side_option_setters!();

    pub fn build(self) -> Result<Crop> {
        let params = self.sides.resolve("Crop")?;
        debug!(amounts = ?params.amounts, keep_size = params.keep_size, "built Crop");
        Ok(Crop {
            random_state: RandomState::new(params.config.seed),
            params,
        })
    }
}

/// Crops per-side amounts off images. At least one row and column always
/// remain.
#[derive(Debug, Clone)]
pub struct Crop {
    params: SideParams,
    random_state: RandomState,
}

#[derive(Debug, Clone)]
pub struct CropSample {
    pub sides: [Drawn; 4],
    pub interpolation: Interpolation,
}

impl Crop {
    pub fn builder() -> CropBuilder {
        CropBuilder::default()
    }

    pub fn keep_size(&self) -> bool {
        self.params.keep_size
    }
}

impl Augmenter for Crop {
    type Sample = CropSample;

    fn name(&self) -> &'static str {
        "Crop"
    }

    fn config(&self) -> &AugmentConfig {
        &self.params.config
    }

    fn random_state(&self) -> &RandomState {
        &self.random_state
    }

    fn with_random_state(mut self, state: RandomState) -> Self {
        self.random_state = state;
        self
    }

    fn draw_samples(&self, n_items: usize, rng: &mut StdRng) -> Vec<CropSample> {
        let sampler = Sampler::new(self.params.config.independent);
        let sides = sampler.sides(&self.params.amounts, self.params.kind, n_items, rng);
        let methods = sampler.choices(&self.params.interpolation, n_items, rng);
        sides
            .into_iter()
            .zip(methods)
            .map(|(sides, interpolation)| CropSample {
                sides,
                interpolation,
            })
            .collect()
    }

    fn apply_image<T: Element>(&self, img: Array3<T>, sample: &CropSample) -> Result<Array3<T>> {
        check_image(&img)?;
        let (h, w, _) = img.dim();
        let sides = crop_amounts(sample.sides, h, w);
        trace!(?sides, "crop image");
        let cropped = crop(&img, &sides);
        if self.params.keep_size && !sides.is_zero() {
            return Ok(resize(&cropped, h, w, sample.interpolation));
        }
        Ok(cropped)
    }

    fn apply_keypoints(
        &self,
        keypoints: KeypointsOnImage,
        sample: &CropSample,
    ) -> Result<KeypointsOnImage> {
        let (h, w) = keypoints.shape();
        let sides = crop_amounts(sample.sides, h, w);
        trace!(?sides, "crop keypoints");
        let shifted = keypoints.shift(
            -(sides.left as f32),
            -(sides.top as f32),
            sides_after((h, w), &sides, false),
        );
        Ok(if self.params.keep_size {
            shifted.project((h, w))
        } else {
            shifted
        })
    }

    fn apply_heatmaps(
        &self,
        heatmaps: HeatmapsOnImage,
        sample: &CropSample,
    ) -> Result<HeatmapsOnImage> {
        let (h, w) = heatmaps.shape();
        let sides = crop_amounts(sample.sides, h, w);
        let arr_sides = project_crop(&sides, (h, w), heatmaps.arr_shape());
        trace!(?sides, ?arr_sides, "crop heatmaps");
        let cropped = crop(heatmaps.arr_0to1(), &arr_sides);
        if self.params.keep_size {
            let (arr_h, arr_w) = heatmaps.arr_shape();
            return Ok(heatmaps.with_arr(resize_heatmap(&cropped, arr_h, arr_w), (h, w)));
        }
        Ok(heatmaps.with_arr(cropped, sides_after((h, w), &sides, false)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{Choice, Deterministic};
    use ndarray::Array3;

    fn seeded(seed: u64) -> AugmentConfig {
        AugmentConfig::builder().seed(seed).build()
    }

    #[test]
    fn test_px_and_percent_are_exclusive() {
        let err = Pad::builder().px(1).percent(0.1).build().unwrap_err();
        assert!(err.to_string().starts_with("Expected exactly one of px/percent"));
        assert!(Crop::builder().build().is_err());
    }

    #[test]
    fn test_invalid_pad_mode_message() {
        let err = Pad::builder().px(1).pad_mode("foo").build().unwrap_err();
        assert!(err.to_string().starts_with("Expected pad_mode to be "));
        let err = Pad::builder().px(1).pad_mode(vec!["edge", "foo"]).build().unwrap_err();
        assert!(err.to_string().starts_with("Expected pad_mode to be "));
    }

    #[test]
    fn test_invalid_pad_cval_message() {
        let err = Pad::builder().px(1).pad_cval("test").build().unwrap_err();
        assert!(err.to_string().starts_with("Expected "));
    }

    #[test]
    fn test_negative_amounts_rejected() {
        assert!(Pad::builder().px(-1).build().is_err());
        assert!(Crop::builder().percent((-0.1, 0.2)).build().is_err());
    }

    #[test]
    fn test_pad_cval_range_draws_within_bounds() {
        let pad = Pad::builder()
            .px((1, 0, 0, 0))
            .pad_cval((10, 20))
            .keep_size(false)
            .config(seeded(1))
            .build()
            .unwrap();
        let images = vec![Array3::<u8>::zeros((2, 2, 1)); 50];
        for out in pad.augment_images(images).unwrap() {
            let fill = out[[0, 0, 0]];
            assert!((10..=20).contains(&fill));
            // one sampled value per image
            assert!(out.slice(ndarray::s![0, .., ..]).iter().all(|&v| v == fill));
        }
    }

    #[test]
    fn test_external_parameter_per_side() {
        let crop = Crop::builder()
            .px((
                SpecInput::param(Choice::new([1, 2]).unwrap()),
                0,
                SpecInput::param(Deterministic::int(1)),
                0,
            ))
            .keep_size(false)
            .config(seeded(4))
            .build()
            .unwrap();
        for out in crop.augment_images(vec![Array3::<u8>::zeros((8, 4, 1)); 30]).unwrap() {
            let (h, w, _) = out.dim();
            assert!(h == 6 || h == 5);
            assert_eq!(w, 4);
        }
    }

    #[test]
    fn test_keep_size_restores_shape_and_keypoints() {
        let pad = Pad::builder().px((0, 0, 0, 4)).config(seeded(0)).build().unwrap();
        let out = pad.augment_image(Array3::<u8>::from_elem((4, 4, 3), 9)).unwrap();
        assert_eq!(out.dim(), (4, 4, 3));

        let kps = KeypointsOnImage::from_xy(&[(2.0, 2.0)], (4, 4));
        let out = pad.augment_keypoints(vec![kps]).unwrap();
        // shifted to x=6 on an 8 px wide image, then scaled by 4/8
        assert_eq!(out[0].to_xy(), [(3.0, 2.0)]);
        assert_eq!(out[0].shape(), (4, 4));
    }
}
