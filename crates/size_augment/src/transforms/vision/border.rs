use crate::augmentables::Element;
use crate::geometry::Sides;
use crate::parameters::Categorical;
use ndarray::{Array3, ArrayView1, ArrayViewMut1, Axis};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// PadMode
// ============================================================================

/// How newly added border pixels are filled.
///
/// Semantics follow the usual array-padding conventions:
/// - `Constant`: the sampled `pad_cval`
/// - `Edge`: repeat the outermost row/column
/// - `LinearRamp`: ramp from the edge value to `pad_cval` at the outer border
/// - `Maximum`/`Median`/`Minimum`: statistic of the whole row/column
/// - `Reflect`: mirror without repeating the edge (`3 2 | 1 2 3 | 2 1`)
/// - `Symmetric`: mirror including the edge (`2 1 | 1 2 3 | 3 2`)
/// - `Wrap`: periodic continuation from the opposite side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadMode {
    Constant,
    Edge,
    LinearRamp,
    Maximum,
    Median,
    Minimum,
    Reflect,
    Symmetric,
    Wrap,
}

impl PadMode {
    pub fn name(self) -> &'static str {
        match self {
            PadMode::Constant => "constant",
            PadMode::Edge => "edge",
            PadMode::LinearRamp => "linear_ramp",
            PadMode::Maximum => "maximum",
            PadMode::Median => "median",
            PadMode::Minimum => "minimum",
            PadMode::Reflect => "reflect",
            PadMode::Symmetric => "symmetric",
            PadMode::Wrap => "wrap",
        }
    }
}

impl fmt::Display for PadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PadMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| format!("unknown pad mode \"{s}\""))
    }
}

impl Categorical for PadMode {
    const OPTION: &'static str = "pad_mode";
    const ALL: &'static [Self] = &[
        PadMode::Constant,
        PadMode::Edge,
        PadMode::LinearRamp,
        PadMode::Maximum,
        PadMode::Median,
        PadMode::Minimum,
        PadMode::Reflect,
        PadMode::Symmetric,
        PadMode::Wrap,
    ];
    const NAMES: &'static [&'static str] = &[
        "constant",
        "edge",
        "linear_ramp",
        "maximum",
        "median",
        "minimum",
        "reflect",
        "symmetric",
        "wrap",
    ];
}

// ============================================================================
// Border padding
// ============================================================================

/// Pads `img` (height, width, channels) by `sides` using `mode`.
///
/// Height is padded first, then width, so corner pixels of non-constant
/// modes are derived from the already height-padded columns.
/// `cval` is used by `Constant` (fill) and `LinearRamp` (end value).
pub fn pad<T: Element>(img: &Array3<T>, sides: &Sides, mode: PadMode, cval: f64) -> Array3<T> {
    if sides.is_zero() {
        return img.clone();
    }
    let work = img.mapv(Element::to_f64);
    let work = pad_axis(&work, Axis(0), sides.top, sides.bottom, mode, cval);
    let work = pad_axis(&work, Axis(1), sides.left, sides.right, mode, cval);
    work.mapv(T::from_f64)
}

fn pad_axis(
    arr: &Array3<f64>,
    axis: Axis,
    before: usize,
    after: usize,
    mode: PadMode,
    cval: f64,
) -> Array3<f64> {
    if before == 0 && after == 0 {
        return arr.clone();
    }
    let mut shape = arr.raw_dim();
    shape[axis.index()] += before + after;
    let mut out = Array3::<f64>::zeros(shape);
    for (src, dst) in arr.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        pad_lane(src, dst, before, after, mode, cval);
    }
    out
}

fn pad_lane(
    src: ArrayView1<f64>,
    mut dst: ArrayViewMut1<f64>,
    before: usize,
    after: usize,
    mode: PadMode,
    cval: f64,
) {
    let n = src.len();
    dst.slice_mut(ndarray::s![before..before + n]).assign(&src);

    match mode {
        PadMode::Constant => {
            dst.slice_mut(ndarray::s![..before]).fill(cval);
            dst.slice_mut(ndarray::s![before + n..]).fill(cval);
        }
        PadMode::LinearRamp => {
            let (first, last) = (src[0], src[n - 1]);
            for j in 0..before {
                dst[j] = cval + (first - cval) * j as f64 / before as f64;
            }
            for k in 0..after {
                dst[before + n + k] = cval + (last - cval) * (after - 1 - k) as f64 / after as f64;
            }
        }
        PadMode::Maximum | PadMode::Minimum | PadMode::Median => {
            let value = lane_statistic(&src, mode);
            dst.slice_mut(ndarray::s![..before]).fill(value);
            dst.slice_mut(ndarray::s![before + n..]).fill(value);
        }
        PadMode::Edge | PadMode::Reflect | PadMode::Symmetric | PadMode::Wrap => {
            let positions = (0..before).chain(before + n..before + n + after);
            for i in positions {
                let offset = i as isize - before as isize;
                dst[i] = src[source_index(offset, n, mode)];
            }
        }
    }
}

fn lane_statistic(src: &ArrayView1<f64>, mode: PadMode) -> f64 {
    match mode {
        PadMode::Maximum => src.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        PadMode::Minimum => src.iter().copied().fold(f64::INFINITY, f64::min),
        _ => {
            let mut values = src.to_vec();
            values.sort_by(f64::total_cmp);
            let mid = values.len() / 2;
            if values.len() % 2 == 0 {
                (values[mid - 1] + values[mid]) / 2.0
            } else {
                values[mid]
            }
        }
    }
}

/// Maps an out-of-range offset to the source index it copies from.
fn source_index(offset: isize, n: usize, mode: PadMode) -> usize {
    let n_i = n as isize;
    match mode {
        PadMode::Edge => offset.clamp(0, n_i - 1) as usize,
        PadMode::Wrap => offset.rem_euclid(n_i) as usize,
        PadMode::Symmetric => {
            let m = offset.rem_euclid(2 * n_i);
            (if m >= n_i { 2 * n_i - 1 - m } else { m }) as usize
        }
        PadMode::Reflect if n == 1 => 0,
        PadMode::Reflect => {
            let period = 2 * (n_i - 1);
            let m = offset.rem_euclid(period);
            (if m >= n_i { period - m } else { m }) as usize
        }
        _ => unreachable!("{mode} does not copy source pixels"),
    }
}
