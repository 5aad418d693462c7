use anyhow::{Context, Result};
use std::marker::PhantomData;

/// Composable, fallible conversion of `I` into `O`.
///
/// Raster primitives ([`Resize`](super::vision::Resize),
/// [`PadBorder`](super::vision::PadBorder), ...) and every size augmenter
/// implement it, so a preprocessing pipeline can be assembled with
/// `.then(...)`:
///
/// ```ignore
/// let pipeline = PadBorder::new(Sides::new(4, 4, 4, 4), PadMode::Reflect, 0.0)
///     .then(Resize::new(32, 32, Interpolation::Linear)?);
/// let out: Array3<u8> = pipeline.apply(img)?;
/// ```
///
/// `then()` requires aligned types (`self: Transform<I, O>`,
/// `next: Transform<O, M>`), a sized receiver and `Send` intermediates.
pub trait Transform<I, O>: Send + Sync {
    fn apply(&self, input: I) -> Result<O>;

    #[inline]
    fn then<T, M>(self, next: T) -> Chain<Self, T, O>
    where
        Self: Sized,
        T: Transform<O, M>,
        O: Send,
        M: Send,
    {
        Chain {
            first: self,
            second: next,
            _marker: PhantomData,
        }
    }
}

/// Two transforms applied back to back (`A` -> `B`).
/// `M` is the intermediate type.
#[derive(Debug)]
pub struct Chain<A, B, M> {
    first: A,
    second: B,
    _marker: PhantomData<fn() -> M>,
}

impl<A, B, M> Chain<A, B, M> {
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<I, M, O, A, B> Transform<I, O> for Chain<A, B, M>
where
    A: Transform<I, M>,
    B: Transform<M, O>,
    M: Send,
{
    fn apply(&self, input: I) -> Result<O> {
        let mid = self
            .first
            .apply(input)
            .with_context(|| format!("{} failed", std::any::type_name::<A>()))?;
        self.second.apply(mid).with_context(|| {
            format!(
                "{} failed on the output of {}",
                std::any::type_name::<B>(),
                std::any::type_name::<A>()
            )
        })
    }
}
