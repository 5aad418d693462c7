use crate::parameters::{
    ChoiceSpec, NumericKind, PerSideSpec, Position, PositionSpec, ScaleSpec, SizeSpec, Value,
};
use rand::{rngs::StdRng, Rng};

/// A value drawn from a [`SizeSpec`], before it meets an image shape.
///
/// `Keep` and `KeepAspectRatio` are sentinels resolved by the geometry step,
/// because they depend on the source shape and on the other axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drawn {
    Px(i64),
    Fraction(f64),
    Keep,
    KeepAspectRatio,
}

impl Drawn {
    /// Numeric value, with sentinels read as zero.
    pub fn as_f64(self) -> f64 {
        match self {
            Drawn::Px(v) => v as f64,
            Drawn::Fraction(v) => v,
            Drawn::Keep | Drawn::KeepAspectRatio => 0.0,
        }
    }
}

/// Draws one value from `spec`.
///
/// Ranges are inclusive on both ends and use integer or continuous
/// granularity matching the spec. External parameters are asked once per
/// call; their result is coerced to `kind`.
pub fn draw(spec: &SizeSpec, kind: NumericKind, rng: &mut StdRng) -> Drawn {
    match spec {
        SizeSpec::FixedInt(v) => Drawn::Px(*v),
        SizeSpec::IntRange(lo, hi) => Drawn::Px(rng.random_range(*lo..=*hi)),
        SizeSpec::IntList(values) => Drawn::Px(values[rng.random_range(0..values.len())]),
        SizeSpec::FixedFloat(v) => Drawn::Fraction(*v),
        SizeSpec::FloatRange(lo, hi) => Drawn::Fraction(rng.random_range(*lo..=*hi)),
        SizeSpec::FloatList(values) => {
            Drawn::Fraction(values[rng.random_range(0..values.len())])
        }
        SizeSpec::Keep => Drawn::Keep,
        SizeSpec::KeepAspectRatio => Drawn::KeepAspectRatio,
        SizeSpec::External(param) => match (kind, param.draw(rng)) {
            (NumericKind::Pixels, value) => Drawn::Px(value.round_to_int()),
            (NumericKind::Fraction, value) => Drawn::Fraction(value.as_f64()),
            (NumericKind::Any, Value::Int(v)) => Drawn::Px(v),
            (NumericKind::Any, Value::Float(v)) => Drawn::Fraction(v),
        },
    }
}

// ============================================================================

/// Draws per-item decisions for a batch.
///
/// # Independence
/// - `independent == true`: every item gets its own draw(s).
/// - `independent == false`: one draw is made per call and shared by all
///   items of that call.
///
/// # Draw order
/// Draws happen item by item; within an item, pad/crop sides are drawn in
/// `(top, right, bottom, left)` order and scale sizes as `(height, width)`.
/// Given the same generator state and item count the produced sequence is
/// identical, which is what deterministic augmenters rely on to replay a
/// decision across separate image / keypoint / heatmap calls.
///
/// All draws for a call are taken up front, so applying them can be fanned
/// out to worker threads without sharing the generator.
///
/// # Example
/// ```ignore
/// let mut rng = StdRng::seed_from_u64(42);
/// let sides = Sampler::new(true).sides(&spec, NumericKind::Pixels, 8, &mut rng);
/// assert_eq!(sides.len(), 8);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    independent: bool,
}

impl Sampler {
    pub fn new(independent: bool) -> Self {
        Self { independent }
    }

    fn per_item<T, F>(&self, n_items: usize, rng: &mut StdRng, mut draw_one: F) -> Vec<T>
    where
        T: Clone,
        F: FnMut(&mut StdRng) -> T,
    {
        if n_items == 0 {
            return Vec::new();
        }
        if self.independent {
            (0..n_items).map(|_| draw_one(rng)).collect()
        } else {
            vec![draw_one(rng); n_items]
        }
    }

    /// Pad/crop amounts per item, `(top, right, bottom, left)`.
    pub fn sides(
        &self,
        spec: &PerSideSpec,
        kind: NumericKind,
        n_items: usize,
        rng: &mut StdRng,
    ) -> Vec<[Drawn; 4]> {
        self.per_item(n_items, rng, |rng| match spec {
            PerSideSpec::Uniform(spec) => [draw(spec, kind, rng); 4],
            PerSideSpec::Sides(sides) => [
                draw(&sides[0], kind, rng),
                draw(&sides[1], kind, rng),
                draw(&sides[2], kind, rng),
                draw(&sides[3], kind, rng),
            ],
        })
    }

    /// Target `(height, width)` per item for `Scale`.
    pub fn sizes(&self, spec: &ScaleSpec, n_items: usize, rng: &mut StdRng) -> Vec<(Drawn, Drawn)> {
        self.per_item(n_items, rng, |rng| match spec {
            ScaleSpec::Shared(spec) => {
                let value = draw(spec, NumericKind::Any, rng);
                (value, value)
            }
            ScaleSpec::PerAxis { height, width } => {
                let h = draw(height, NumericKind::Any, rng);
                let w = draw(width, NumericKind::Any, rng);
                (h, w)
            }
        })
    }

    /// Plain numeric values per item (e.g. `pad_cval`).
    pub fn values(
        &self,
        spec: &SizeSpec,
        kind: NumericKind,
        n_items: usize,
        rng: &mut StdRng,
    ) -> Vec<f64> {
        self.per_item(n_items, rng, |rng| draw(spec, kind, rng).as_f64())
    }

    /// Categorical values per item (pad modes, interpolation methods).
    pub fn choices<T: Copy>(&self, spec: &ChoiceSpec<T>, n_items: usize, rng: &mut StdRng) -> Vec<T> {
        self.per_item(n_items, rng, |rng| match spec {
            ChoiceSpec::Fixed(value) => *value,
            ChoiceSpec::Choice(values) => values[rng.random_range(0..values.len())],
        })
    }

    pub fn positions(&self, spec: &PositionSpec, n_items: usize, rng: &mut StdRng) -> Vec<Position> {
        self.per_item(n_items, rng, |rng| spec.sample(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::Choice;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_fixed_specs_ignore_rng() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(draw(&SizeSpec::FixedInt(3), NumericKind::Pixels, &mut rng), Drawn::Px(3));
        assert_eq!(
            draw(&SizeSpec::FixedFloat(0.25), NumericKind::Fraction, &mut rng),
            Drawn::Fraction(0.25)
        );
    }

    #[test]
    fn test_int_range_is_inclusive() {
        let mut rng = StdRng::seed_from_u64(1);
        let seen: HashSet<i64> = (0..200)
            .map(|_| match draw(&SizeSpec::IntRange(0, 2), NumericKind::Pixels, &mut rng) {
                Drawn::Px(v) => v,
                other => panic!("unexpected draw {other:?}"),
            })
            .collect();
        assert_eq!(seen, HashSet::from([0, 1, 2]));
    }

    #[test]
    fn test_external_float_rounds_in_pixel_context() {
        let param = Arc::new(Choice::new([2.6]).unwrap());
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            draw(&SizeSpec::External(param), NumericKind::Pixels, &mut rng),
            Drawn::Px(3)
        );
    }

    #[test]
    fn test_shared_draw_is_reused_across_items() {
        let spec = PerSideSpec::broadcast(SizeSpec::IntRange(0, 100));
        let mut rng = StdRng::seed_from_u64(5);
        let draws = Sampler::new(false).sides(&spec, NumericKind::Pixels, 6, &mut rng);
        assert_eq!(draws.len(), 6);
        assert!(draws.iter().all(|d| *d == draws[0]));
    }

    #[test]
    fn test_uniform_per_side_spec_uses_one_value() {
        let spec = PerSideSpec::uniform(SizeSpec::IntRange(0, 100));
        let mut rng = StdRng::seed_from_u64(9);
        for sides in Sampler::new(true).sides(&spec, NumericKind::Pixels, 20, &mut rng) {
            assert!(sides.iter().all(|s| *s == sides[0]));
        }
    }

    #[test]
    fn test_same_state_same_sequence() {
        let spec = PerSideSpec::broadcast(SizeSpec::IntRange(0, 10));
        let sampler = Sampler::new(true);
        let a = sampler.sides(&spec, NumericKind::Pixels, 4, &mut StdRng::seed_from_u64(11));
        let b = sampler.sides(&spec, NumericKind::Pixels, 4, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }
}
