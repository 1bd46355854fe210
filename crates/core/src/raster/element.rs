//! Raster element trait for generic cell values

use num_traits::{NumCast, ToPrimitive, Zero};
use std::fmt::Debug;

/// Trait for types that can be stored in a raster or cube cell.
///
/// Raw hyperspectral cubes are often encoded as narrow integers (e.g. `u16`
/// digital numbers), so every element must convert to `f64` before any
/// index arithmetic happens.
pub trait RasterElement:
    Copy + Clone + Debug + PartialOrd + PartialEq + NumCast + Zero + Send + Sync + 'static
{
    /// Whether this type is a floating point type
    fn is_float() -> bool;

    /// Whether this value is finite (always true for integers)
    fn is_finite_value(self) -> bool;

    /// Widen to `f64`.
    fn as_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(0.0)
    }
}

macro_rules! impl_raster_element_int {
    ($t:ty) => {
        impl RasterElement for $t {
            fn is_float() -> bool {
                false
            }

            fn is_finite_value(self) -> bool {
                true
            }
        }
    };
}

macro_rules! impl_raster_element_float {
    ($t:ty) => {
        impl RasterElement for $t {
            fn is_float() -> bool {
                true
            }

            fn is_finite_value(self) -> bool {
                self.is_finite()
            }

            fn as_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_raster_element_int!(i8);
impl_raster_element_int!(i16);
impl_raster_element_int!(i32);
impl_raster_element_int!(i64);
impl_raster_element_int!(u8);
impl_raster_element_int!(u16);
impl_raster_element_int!(u32);
impl_raster_element_int!(u64);
impl_raster_element_float!(f32);
impl_raster_element_float!(f64);
