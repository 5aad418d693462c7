//! Resolution of raw [`SpecInput`] values into typed, sampleable specs.
//!
//! Every function here is pure and runs at construction time, so invalid
//! configurations fail in `build()` rather than during augmentation.

use super::input::SpecInput;
use super::stochastic::Parameter;
use crate::error::{AugmentError, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// How drawn numbers are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// Absolute pixel amounts. Only integers are accepted.
    Pixels,
    /// Fractions of the image side. Integers are widened to floats.
    Fraction,
    /// Integers are pixels, floats are fractions/factors (`Scale`, `pad_cval`).
    Any,
}

/// A resolved, sampleable size specification.
#[derive(Clone)]
pub enum SizeSpec {
    FixedInt(i64),
    IntRange(i64, i64),
    IntList(Vec<i64>),
    FixedFloat(f64),
    FloatRange(f64, f64),
    FloatList(Vec<f64>),
    Keep,
    KeepAspectRatio,
    External(Arc<dyn Parameter>),
}

impl fmt::Debug for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeSpec::FixedInt(v) => write!(f, "FixedInt({v})"),
            SizeSpec::IntRange(lo, hi) => write!(f, "IntRange({lo}, {hi})"),
            SizeSpec::IntList(vs) => write!(f, "IntList({vs:?})"),
            SizeSpec::FixedFloat(v) => write!(f, "FixedFloat({v})"),
            SizeSpec::FloatRange(lo, hi) => write!(f, "FloatRange({lo}, {hi})"),
            SizeSpec::FloatList(vs) => write!(f, "FloatList({vs:?})"),
            SizeSpec::Keep => write!(f, "Keep"),
            SizeSpec::KeepAspectRatio => write!(f, "KeepAspectRatio"),
            SizeSpec::External(p) => write!(f, "External({p:?})"),
        }
    }
}

/// Where a spec is being resolved; drives accepted shapes and error text.
#[derive(Debug, Clone, Copy)]
pub struct SpecContext {
    pub name: &'static str,
    pub kind: NumericKind,
    pub allow_keep: bool,
    pub allow_keep_aspect_ratio: bool,
    pub per_side: bool,
}

impl SpecContext {
    pub const fn new(name: &'static str, kind: NumericKind) -> Self {
        Self {
            name,
            kind,
            allow_keep: false,
            allow_keep_aspect_ratio: false,
            per_side: false,
        }
    }

    pub const fn with_keep(mut self) -> Self {
        self.allow_keep = true;
        self
    }

    pub const fn with_keep_aspect_ratio(mut self) -> Self {
        self.allow_keep_aspect_ratio = true;
        self
    }

    pub const fn per_side(mut self) -> Self {
        self.per_side = true;
        self
    }

    fn accepted(&self) -> String {
        let (one, two, many) = match self.kind {
            NumericKind::Pixels => ("an int", "two ints", "ints"),
            NumericKind::Fraction => ("a float", "two floats", "floats"),
            NumericKind::Any => ("a number", "two numbers", "numbers"),
        };
        let mut text = format!(
            "{} to be {one}, a tuple of {two}, a non-empty list of {many}, a stochastic parameter",
            self.name
        );
        if self.per_side {
            text.push_str(", a tuple of four such values (top, right, bottom, left)");
        }
        let mut literals = Vec::new();
        if self.allow_keep {
            literals.push("\"keep\"");
        }
        if self.allow_keep_aspect_ratio {
            literals.push("\"keep-aspect-ratio\"");
        }
        if !literals.is_empty() {
            text.push_str(&format!(" or one of the strings {}", literals.join(", ")));
        }
        text
    }

    fn reject(&self, input: &SpecInput) -> AugmentError {
        AugmentError::expected(self.accepted(), input.describe())
    }
}

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

fn number(input: &SpecInput, ctx: &SpecContext) -> Result<Number> {
    match (input, ctx.kind) {
        (SpecInput::Int(v), NumericKind::Fraction) => Ok(Number::Float(*v as f64)),
        (SpecInput::Int(v), _) => Ok(Number::Int(*v)),
        (SpecInput::Float(v), NumericKind::Fraction | NumericKind::Any) if v.is_finite() => {
            Ok(Number::Float(*v))
        }
        _ => Err(ctx.reject(input)),
    }
}

/// Resolves a scalar-position input (not a mapping, not a per-side tuple).
pub fn resolve(input: &SpecInput, ctx: &SpecContext) -> Result<SizeSpec> {
    match input {
        SpecInput::Int(_) | SpecInput::Float(_) => Ok(match number(input, ctx)? {
            Number::Int(v) => SizeSpec::FixedInt(v),
            Number::Float(v) => SizeSpec::FixedFloat(v),
        }),
        SpecInput::Tuple(bounds) if bounds.len() == 2 => {
            let lo = number(&bounds[0], ctx)?;
            let hi = number(&bounds[1], ctx)?;
            let spec = match (lo, hi) {
                (Number::Int(lo), Number::Int(hi)) => {
                    (lo <= hi).then_some(SizeSpec::IntRange(lo, hi))
                }
                (lo, hi) => {
                    let (lo, hi) = (as_float(lo), as_float(hi));
                    (lo <= hi).then_some(SizeSpec::FloatRange(lo, hi))
                }
            };
            spec.ok_or_else(|| {
                AugmentError::expected(
                    format!("{} range to satisfy lower bound <= upper bound", ctx.name),
                    format!("{input:?}"),
                )
            })
        }
        SpecInput::List(items) if items.is_empty() && ctx.allow_keep => Ok(SizeSpec::Keep),
        SpecInput::List(items) if !items.is_empty() => {
            let numbers = items
                .iter()
                .map(|item| number(item, ctx))
                .collect::<Result<Vec<_>>>()?;
            if numbers.iter().all(|n| matches!(n, Number::Int(_))) {
                Ok(SizeSpec::IntList(
                    numbers
                        .into_iter()
                        .map(|n| match n {
                            Number::Int(v) => v,
                            Number::Float(v) => v as i64,
                        })
                        .collect(),
                ))
            } else {
                Ok(SizeSpec::FloatList(numbers.into_iter().map(as_float).collect()))
            }
        }
        SpecInput::Str(s) if s == "keep" && ctx.allow_keep => Ok(SizeSpec::Keep),
        SpecInput::Str(s) if s == "keep-aspect-ratio" && ctx.allow_keep_aspect_ratio => {
            Ok(SizeSpec::KeepAspectRatio)
        }
        SpecInput::Param(p) => Ok(SizeSpec::External(Arc::clone(p))),
        _ => Err(ctx.reject(input)),
    }
}

fn as_float(n: Number) -> f64 {
    match n {
        Number::Int(v) => v as f64,
        Number::Float(v) => v,
    }
}

// ============================================================================
// Per-side specs (Pad / Crop)
// ============================================================================

/// Amounts for the four sides in `(top, right, bottom, left)` order.
#[derive(Debug, Clone)]
pub enum PerSideSpec {
    /// One draw per item, reused for all four sides.
    Uniform(SizeSpec),
    /// One independent draw per side.
    Sides([SizeSpec; 4]),
}

impl PerSideSpec {
    pub fn uniform(spec: SizeSpec) -> Self {
        PerSideSpec::Uniform(spec)
    }

    pub fn broadcast(spec: SizeSpec) -> Self {
        PerSideSpec::Sides([spec.clone(), spec.clone(), spec.clone(), spec])
    }
}

/// Resolves `px`/`percent` input for pad and crop.
///
/// A 4-tuple is read as `(top, right, bottom, left)`; anything else is a
/// single spec that either drives all sides with one draw
/// (`sample_independently == false`) or is broadcast to four independent
/// draws.
pub fn resolve_per_side(
    input: &SpecInput,
    ctx: &SpecContext,
    sample_independently: bool,
) -> Result<PerSideSpec> {
    let ctx = ctx.per_side();
    match input {
        SpecInput::Tuple(items) if items.len() == 4 => {
            let [top, right, bottom, left] = [
                resolve(&items[0], &ctx)?,
                resolve(&items[1], &ctx)?,
                resolve(&items[2], &ctx)?,
                resolve(&items[3], &ctx)?,
            ];
            Ok(PerSideSpec::Sides([top, right, bottom, left]))
        }
        _ => {
            let spec = resolve(input, &ctx)?;
            Ok(if sample_independently {
                PerSideSpec::broadcast(spec)
            } else {
                PerSideSpec::uniform(spec)
            })
        }
    }
}

// ============================================================================
// Scale specs
// ============================================================================

/// Target size for `Scale`.
#[derive(Debug, Clone)]
pub enum ScaleSpec {
    /// One draw per item, used for both height and width.
    Shared(SizeSpec),
    /// Independent draws for height and width.
    PerAxis { height: SizeSpec, width: SizeSpec },
}

const SCALE_SHARED: SpecContext = SpecContext::new("size", NumericKind::Any).with_keep();
const SCALE_AXIS: SpecContext = SpecContext::new("size", NumericKind::Any)
    .with_keep()
    .with_keep_aspect_ratio();

pub fn resolve_scale(input: &SpecInput) -> Result<ScaleSpec> {
    let SpecInput::Map(entries) = input else {
        return match resolve(input, &SCALE_SHARED) {
            Ok(spec) => Ok(ScaleSpec::Shared(spec)),
            Err(_) => Err(AugmentError::expected(
                format!(
                    "{} or a mapping with keys \"height\"/\"width\"",
                    SCALE_SHARED.accepted()
                ),
                input.describe(),
            )),
        };
    };

    let mut height = SizeSpec::Keep;
    let mut width = SizeSpec::Keep;
    for (key, value) in entries {
        let target = match key.as_str() {
            "height" => &mut height,
            "width" => &mut width,
            other => {
                return Err(AugmentError::expected(
                    "size mapping keys to be \"height\" and/or \"width\"",
                    format!("key \"{other}\""),
                ))
            }
        };
        *target = resolve(value, &SCALE_AXIS)?;
    }

    if matches!(height, SizeSpec::KeepAspectRatio) && matches!(width, SizeSpec::KeepAspectRatio) {
        return Err(AugmentError::expected(
            "at most one of height/width to be \"keep-aspect-ratio\"",
            "both",
        ));
    }
    Ok(ScaleSpec::PerAxis { height, width })
}

// ============================================================================
// Categorical specs (pad_mode, interpolation)
// ============================================================================

/// A categorical option: one fixed value or a uniform choice among several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceSpec<T> {
    Fixed(T),
    Choice(Vec<T>),
}

impl<T: Copy> ChoiceSpec<T> {
    pub fn values(&self) -> Vec<T> {
        match self {
            ChoiceSpec::Fixed(v) => vec![*v],
            ChoiceSpec::Choice(vs) => vs.clone(),
        }
    }
}

/// Categorical values that can be parsed from a name and offer an "ALL" set.
pub trait Categorical: Copy + FromStr + fmt::Debug + 'static {
    const OPTION: &'static str;
    const ALL: &'static [Self];
    const NAMES: &'static [&'static str];
}

pub fn resolve_choice<T: Categorical>(input: &SpecInput) -> Result<ChoiceSpec<T>> {
    let reject = || {
        AugmentError::Config(format!(
            "Expected {} to be \"ALL\", one of the strings [{}] or a non-empty list of such strings, got {}.",
            T::OPTION,
            T::NAMES.join(", "),
            input.describe()
        ))
    };
    let parse = |item: &SpecInput| match item {
        SpecInput::Str(s) => s.parse::<T>().map_err(|_| reject()),
        _ => Err(reject()),
    };
    match input {
        SpecInput::Str(s) if s == "ALL" => Ok(ChoiceSpec::Choice(T::ALL.to_vec())),
        SpecInput::Str(_) => Ok(ChoiceSpec::Fixed(parse(input)?)),
        SpecInput::List(items) if !items.is_empty() => Ok(ChoiceSpec::Choice(
            items.iter().map(parse).collect::<Result<Vec<_>>>()?,
        )),
        _ => Err(reject()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::stochastic::Choice;

    const PX: SpecContext = SpecContext::new("px", NumericKind::Pixels);
    const PERCENT: SpecContext = SpecContext::new("percent", NumericKind::Fraction);

    #[test]
    fn test_resolve_scalar_and_range() {
        assert!(matches!(resolve(&3.into(), &PX).unwrap(), SizeSpec::FixedInt(3)));
        assert!(matches!(
            resolve(&(0, 2).into(), &PX).unwrap(),
            SizeSpec::IntRange(0, 2)
        ));
        assert!(matches!(
            resolve(&(0, 1.0).into(), &PERCENT).unwrap(),
            SizeSpec::FloatRange(lo, hi) if lo == 0.0 && hi == 1.0
        ));
    }

    #[test]
    fn test_resolve_rejects_bad_arity_and_strings() {
        let err = resolve(&(1, 2, 3).into(), &PX).unwrap_err();
        assert!(err.to_string().starts_with("Expected px to be "));
        assert!(err.to_string().contains("tuple of length 3"));

        let err = resolve(&"test".into(), &PERCENT).unwrap_err();
        assert!(err.to_string().starts_with("Expected "));
        assert!(err.to_string().contains("\"test\""));
    }

    #[test]
    fn test_resolve_rejects_reversed_range() {
        let err = resolve(&(4, 1).into(), &PX).unwrap_err();
        assert!(err.to_string().contains("lower bound <= upper bound"));
    }

    #[test]
    fn test_pixels_reject_floats() {
        assert!(resolve(&1.5.into(), &PX).is_err());
    }

    #[test]
    fn test_per_side_tuple_and_broadcast() {
        let spec = resolve_per_side(&((0, 2), 0, 0, 0).into(), &PX, true).unwrap();
        let PerSideSpec::Sides(sides) = spec else {
            panic!("expected per-side spec");
        };
        assert!(matches!(sides[0], SizeSpec::IntRange(0, 2)));
        assert!(matches!(sides[3], SizeSpec::FixedInt(0)));

        let spec = resolve_per_side(&(1.0, 2.0).into(), &PERCENT, false).unwrap();
        assert!(matches!(spec, PerSideSpec::Uniform(SizeSpec::FloatRange(..))));
    }

    #[test]
    fn test_scale_mapping() {
        let spec =
            resolve_scale(&SpecInput::map([("height", SpecInput::from(12)), ("width", "keep-aspect-ratio".into())]))
                .unwrap();
        let ScaleSpec::PerAxis { height, width } = spec else {
            panic!("expected per-axis spec");
        };
        assert!(matches!(height, SizeSpec::FixedInt(12)));
        assert!(matches!(width, SizeSpec::KeepAspectRatio));
    }

    #[test]
    fn test_scale_empty_inputs_keep() {
        assert!(matches!(
            resolve_scale(&Vec::<i64>::new().into()).unwrap(),
            ScaleSpec::Shared(SizeSpec::Keep)
        ));
        let spec = resolve_scale(&SpecInput::Map(Vec::new())).unwrap();
        assert!(matches!(
            spec,
            ScaleSpec::PerAxis {
                height: SizeSpec::Keep,
                width: SizeSpec::Keep
            }
        ));
    }

    #[test]
    fn test_scale_rejects_unknown_literal() {
        let err = resolve_scale(&"foo".into()).unwrap_err();
        assert!(err.to_string().starts_with("Expected "));
        assert!(resolve_scale(&"keep-aspect-ratio".into()).is_err());
    }

    #[test]
    fn test_external_parameter_passes_through() {
        let input = SpecInput::param(Choice::new([12_i64, 14]).unwrap());
        assert!(matches!(resolve(&input, &PX).unwrap(), SizeSpec::External(_)));
    }
}
