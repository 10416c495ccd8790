use std::cmp;

use num_traits::Zero;

use crate::error::{KdIndexError, Result};
use crate::point::{Distance, KdPoint};
use crate::r#type::{DistanceNum, IndexableNum};

/// A staged `(point, data)` pair.
pub(crate) type Item<'a, P, T> = (&'a P, &'a T);

/// Check that every point can be ordered along every axis, and that the squared distance between
/// any two of them fits the distance type.
pub(crate) fn validate<P: KdPoint, T>(items: &[Item<'_, P, T>]) -> Result<()> {
    if P::DIMS == 0 {
        return Err(KdIndexError::General(
            "Point type must have at least one dimension.".to_string(),
        ));
    }

    for (item, (point, _)) in items.iter().enumerate() {
        for axis in 0..P::DIMS {
            if !point.coord(axis).is_finite_coord() {
                return Err(KdIndexError::NonFiniteCoordinate { item, axis });
            }
        }
    }

    if span_overflows(items) {
        return Err(KdIndexError::CoordinateSpanOverflow);
    }

    Ok(())
}

/// Whether the squared diagonal of the bounding box of `items` saturates.
///
/// No two points in the box are further apart than its diagonal, so when this is `false` every
/// distance between stored points, or from a query inside the box, is exact.
fn span_overflows<P: KdPoint, T>(items: &[Item<'_, P, T>]) -> bool {
    let Some((first, _)) = items.first() else {
        return false;
    };

    let mut diagonal = Distance::<P>::zero();
    for axis in 0..P::DIMS {
        let mut min = first.coord(axis);
        let mut max = min;
        for (point, _) in items {
            let c = point.coord(axis);
            if c < min {
                min = c;
            }
            if c > max {
                max = c;
            }
        }
        let span = max.to_distance() - min.to_distance();
        diagonal = diagonal.saturating_sum(span.saturating_square());
    }
    diagonal.is_saturated()
}

/// kd-sort `items` in place.
///
/// Afterwards the middle element of every subrange (`len / 2`) is the node for that subrange, with
/// everything before it `<=` and everything after it `>=` on the node's axis. The two halves are
/// sorted the same way on the next axis.
pub(crate) fn sort<P: KdPoint, T>(items: &mut [Item<'_, P, T>], axis: usize) {
    if items.len() <= 1 {
        return;
    }

    // middle index
    let m = items.len() >> 1;

    select(items, m, 0, items.len() - 1, axis);

    let next_axis = (axis + 1) % P::DIMS;
    let (left, rest) = items.split_at_mut(m);
    sort(left, next_axis);
    sort(&mut rest[1..], next_axis);
}

/// Custom Floyd-Rivest selection algorithm: reorder items so that [left..k-1] items are not greater
/// than the k-th item and [k+1..right] items are not smaller, along `axis`.
#[inline]
fn select<P: KdPoint, T>(
    items: &mut [Item<'_, P, T>],
    k: usize,
    mut left: usize,
    mut right: usize,
    axis: usize,
) {
    let zero = Distance::<P>::zero();

    while right > left {
        if right - left > 600 {
            let n = (right - left + 1) as f64;
            let m = (k - left + 1) as f64;
            let z = f64::ln(n);
            let s = 0.5 * f64::exp((2.0 * z) / 3.0);
            let sd = 0.5
                * f64::sqrt((z * s * (n - s)) / n)
                * (if m - n / 2.0 < 0.0 { -1.0 } else { 1.0 });
            let new_left = cmp::max(left, f64::floor(k as f64 - (m * s) / n + sd) as usize);
            let new_right = cmp::min(
                right,
                f64::floor(k as f64 + ((n - m) * s) / n + sd) as usize,
            );
            select(items, k, new_left, new_right, axis);
        }

        let t = items[k].0;
        let mut i = left;
        let mut j = right;

        items.swap(left, k);
        if items[right].0.axis_delta(t, axis) > zero {
            items.swap(left, right);
        }

        while i < j {
            items.swap(i, j);
            i += 1;
            j -= 1;
            while items[i].0.axis_delta(t, axis) < zero {
                i += 1;
            }
            while items[j].0.axis_delta(t, axis) > zero {
                j -= 1;
            }
        }

        if items[left].0.axis_delta(t, axis) == zero {
            items.swap(left, j);
        } else {
            j += 1;
            items.swap(j, right);
        }

        if j <= k {
            left = j + 1;
        }
        if k <= j {
            right = j - 1;
        }
    }
}
