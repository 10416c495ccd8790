//! The geometry adapter between caller-owned points and the tree.

use num_traits::Zero;

use crate::r#type::{Coord, DistanceNum, IndexableNum};

/// The type distances between points of type `P` are measured in.
pub type Distance<P> = <<P as KdPoint>::Scalar as IndexableNum>::Distance;

/// A point with a fixed number of dimensions that can be stored in a [`KdTree`][crate::KdTree].
///
/// Only [`coord`][KdPoint::coord] is required. The two distance primitives have defaults that
/// implement squared Euclidean distance, which is what the pruning logic of every query assumes:
/// the squared [`axis_delta`][KdPoint::axis_delta] to a splitting plane must be a lower bound of the
/// [`comparable_distance`][KdPoint::comparable_distance] to any point beyond that plane. Overrides
/// must keep that relationship.
///
/// Both are computed in the scalar's wider [`Distance`][IndexableNum::Distance] type, so an `i32`
/// point measures distances in `i64`. A squared distance too large even for that type saturates;
/// [`KdTree::build`][crate::KdTree::build] rejects point sets whose bounding box would.
///
/// ```
/// use kdnearest::KdPoint;
///
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 6.0, 3.0];
/// assert_eq!(a.axis_delta(&b, 1), -4.0);
/// assert_eq!(a.comparable_distance(&b), 25.0);
/// ```
pub trait KdPoint {
    /// The coordinate scalar.
    type Scalar: IndexableNum;

    /// The number of dimensions. Must be at least 1.
    const DIMS: usize;

    /// The coordinate at `axis`.
    ///
    /// Panics if `axis >= Self::DIMS`.
    fn coord(&self, axis: usize) -> Self::Scalar;

    /// Signed difference `self - other` along `axis`.
    #[inline]
    fn axis_delta(&self, other: &Self, axis: usize) -> <Self::Scalar as IndexableNum>::Distance {
        self.coord(axis).to_distance() - other.coord(axis).to_distance()
    }

    /// A distance that orders like the true distance but skips the square root.
    #[inline]
    fn comparable_distance(&self, other: &Self) -> <Self::Scalar as IndexableNum>::Distance {
        let zero = <Self::Scalar as IndexableNum>::Distance::zero();
        (0..Self::DIMS).fold(zero, |acc, axis| {
            acc.saturating_sum(self.axis_delta(other, axis).saturating_square())
        })
    }
}

impl<N: IndexableNum, const D: usize> KdPoint for [N; D] {
    type Scalar = N;
    const DIMS: usize = D;

    #[inline]
    fn coord(&self, axis: usize) -> N {
        assert!(axis < D, "Invalid axis {} for a {}-dimensional point", axis, D);
        self[axis]
    }
}

impl<N: IndexableNum> KdPoint for (N, N) {
    type Scalar = N;
    const DIMS: usize = 2;

    #[inline]
    fn coord(&self, axis: usize) -> N {
        match axis {
            0 => self.0,
            1 => self.1,
            _ => panic!("Invalid axis {} for a 2-dimensional point", axis),
        }
    }
}

impl<N: IndexableNum> KdPoint for (N, N, N) {
    type Scalar = N;
    const DIMS: usize = 3;

    #[inline]
    fn coord(&self, axis: usize) -> N {
        match axis {
            0 => self.0,
            1 => self.1,
            2 => self.2,
            _ => panic!("Invalid axis {} for a 3-dimensional point", axis),
        }
    }
}

impl<N: IndexableNum> KdPoint for Coord<N> {
    type Scalar = N;
    const DIMS: usize = 2;

    #[inline]
    fn coord(&self, axis: usize) -> N {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => panic!("Invalid axis {} for a 2-dimensional point", axis),
        }
    }
}
