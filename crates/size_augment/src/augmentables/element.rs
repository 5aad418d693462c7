use std::fmt::Debug;

/// Pixel element types accepted by raster augmentation.
///
/// Arithmetic (ramps, medians, resampling) is done in `f64`; `from_f64`
/// converts back, rounding half-to-even and saturating for integer types so
/// the output dtype always equals the input dtype.
pub trait Element: Copy + Default + PartialOrd + Send + Sync + Debug + 'static {
    fn to_f64(self) -> f64;
    fn from_f64(v: f64) -> Self;
}

macro_rules! impl_int_element {
    ($($t:ty),*) => {
        $(impl Element for $t {
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                // `as` saturates at the type bounds and maps NaN to 0
                v.round_ties_even() as $t
            }
        })*
    };
}

impl_int_element!(u8, u16, i32);

impl Element for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

impl Element for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }
}
