use std::fmt::Debug;

use geo_traits::CoordTrait;
use num_traits::{Bounded, Num, NumCast, Signed, ToPrimitive};

/// A trait for types that can be used for indexed coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Only signed primitives are
/// allowed, because per-axis differences between two points must carry a sign to decide which side
/// of a splitting plane a query falls on.
pub trait IndexableNum:
    private::Sealed
    + Num
    + NumCast
    + ToPrimitive
    + Signed
    + PartialOrd
    + Copy
    + Debug
    + Send
    + Sync
    + Bounded
{
    /// The type that per-axis differences and squared distances are computed in.
    ///
    /// It is wide enough to hold the difference of any two coordinates: `i32` widens to `i64`,
    /// `i64` to `i128` and `f32` to `f64`. `f64` stays `f64`.
    type Distance: DistanceNum;

    /// Convert this coordinate into the distance type without loss.
    fn to_distance(self) -> Self::Distance;

    /// Returns `false` for NaN and infinite values. Always `true` for integers.
    #[inline]
    fn is_finite_coord(self) -> bool {
        self.to_f64().is_some_and(f64::is_finite)
    }
}

impl IndexableNum for i32 {
    type Distance = i64;

    #[inline]
    fn to_distance(self) -> i64 {
        self.into()
    }
}

impl IndexableNum for i64 {
    type Distance = i128;

    #[inline]
    fn to_distance(self) -> i128 {
        self.into()
    }
}

impl IndexableNum for f32 {
    type Distance = f64;

    #[inline]
    fn to_distance(self) -> f64 {
        self.into()
    }
}

impl IndexableNum for f64 {
    type Distance = f64;

    #[inline]
    fn to_distance(self) -> f64 {
        self
    }
}

/// A signed number that distances are computed in. See [`IndexableNum::Distance`].
///
/// Squaring and summing saturate instead of overflowing: integers stop at their largest value,
/// floats at infinity. A saturated distance still compares `>=` every exact one, so it can only
/// tie with other saturated distances.
pub trait DistanceNum:
    private::Sealed + Signed + PartialOrd + Copy + Debug + Send + Sync + Bounded
{
    /// `self * self`, saturating.
    fn saturating_square(self) -> Self;

    /// `self + other`, saturating.
    fn saturating_sum(self, other: Self) -> Self;

    /// Whether this value has reached the top of the type's range, losing its order against
    /// other saturated values.
    fn is_saturated(self) -> bool;
}

macro_rules! impl_int_distance {
    ($($t:ty),*) => {
        $(
            impl DistanceNum for $t {
                #[inline]
                fn saturating_square(self) -> Self {
                    self.checked_mul(self).unwrap_or(<$t>::MAX)
                }

                #[inline]
                fn saturating_sum(self, other: Self) -> Self {
                    self.saturating_add(other)
                }

                #[inline]
                fn is_saturated(self) -> bool {
                    self == <$t>::MAX
                }
            }
        )*
    };
}

impl_int_distance!(i64, i128);

impl DistanceNum for f64 {
    #[inline]
    fn saturating_square(self) -> Self {
        self * self
    }

    #[inline]
    fn saturating_sum(self, other: Self) -> Self {
        self + other
    }

    #[inline]
    fn is_saturated(self) -> bool {
        self.is_infinite()
    }
}

/// A single 2D coordinate.
///
/// Bridges [`geo_traits`] coordinates into the index: it implements both [`CoordTrait`] and
/// [`KdPoint`][crate::KdPoint].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord<N: IndexableNum> {
    /// x value
    pub x: N,
    /// y value
    pub y: N,
}

impl<N: IndexableNum> Coord<N> {
    /// Create a new coordinate.
    pub fn new(x: N, y: N) -> Self {
        Self { x, y }
    }

    /// Copy the x and y values out of any [`CoordTrait`] implementation.
    pub fn from_coord(coord: &impl CoordTrait<T = N>) -> Self {
        Self {
            x: coord.x(),
            y: coord.y(),
        }
    }
}

impl<N: IndexableNum> CoordTrait for Coord<N> {
    type T = N;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.x
    }

    fn y(&self) -> Self::T {
        self.y
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.x,
            1 => self.y,
            _ => panic!("Invalid index of coord"),
        }
    }
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for i128 {}
}
