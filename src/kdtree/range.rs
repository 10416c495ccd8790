//! Range queries: everything within a radius or inside an axis-aligned box.

use num_traits::Zero;
use tinyvec::TinyVec;

use crate::kdtree::index::KdTree;
use crate::point::{Distance, KdPoint};
use crate::r#type::{DistanceNum, IndexableNum};

impl<'a, P: KdPoint, T> KdTree<'a, P, T> {
    /// Search the tree for items within a given radius of `query`.
    ///
    /// An item is included if its comparable distance to `query` is `<= radius * radius`. A
    /// negative radius matches nothing.
    ///
    /// Returns the data of found items, in traversal order.
    pub fn within(&self, query: &P, radius: P::Scalar) -> Vec<&'a T> {
        if radius < P::Scalar::zero() {
            return vec![];
        }

        let radius = radius.to_distance();
        let r2 = radius.saturating_square();
        self.search_stack(|point, axis| {
            let dx = query.axis_delta(point, axis);
            let hit = query.comparable_distance(point) <= r2;
            (hit, dx <= radius, -dx <= radius)
        })
    }

    /// Search the tree for items inside the box spanned by `min` and `max`, inclusive on every
    /// axis.
    ///
    /// Returns the data of found items, in traversal order.
    pub fn range(&self, min: &P, max: &P) -> Vec<&'a T> {
        let zero = Distance::<P>::zero();
        self.search_stack(|point, axis| {
            let hit = (0..P::DIMS).all(|a| {
                point.axis_delta(min, a) >= zero && max.axis_delta(point, a) >= zero
            });
            // min <= split: the left half may intersect; max >= split: the right half may
            let lte = point.axis_delta(min, axis) >= zero;
            let gte = max.axis_delta(point, axis) >= zero;
            (hit, lte, gte)
        })
    }

    /// Walk the kd-sorted items with an explicit stack.
    ///
    /// `visit(point, axis)` returns whether the point matches and whether the left and right
    /// halves below it need to be searched.
    fn search_stack<F>(&self, mut visit: F) -> Vec<&'a T>
    where
        F: FnMut(&P, usize) -> (bool, bool, bool),
    {
        let items = self.items();
        let mut result = vec![];
        if items.is_empty() {
            return result;
        }

        // Use TinyVec to avoid heap allocations
        let mut stack: TinyVec<[usize; 33]> = TinyVec::new();
        stack.push(0);
        stack.push(items.len());
        stack.push(0);

        while !stack.is_empty() {
            let axis = stack.pop().unwrap_or(0);
            let end = stack.pop().unwrap_or(0);
            let start = stack.pop().unwrap_or(0);

            if start >= end {
                continue;
            }

            // the node of this subrange
            let m = start + ((end - start) >> 1);
            let (point, data) = items[m];

            let (hit, lte, gte) = visit(point, axis);
            if hit {
                result.push(data);
            }

            let next_axis = (axis + 1) % P::DIMS;

            // Note: the right half is pushed last so the left half is popped last
            if lte {
                stack.push(start);
                stack.push(m);
                stack.push(next_axis);
            }
            if gte {
                stack.push(m + 1);
                stack.push(end);
                stack.push(next_axis);
            }
        }

        result
    }
}
