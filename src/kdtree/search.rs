//! Nearest and k-nearest neighbor queries.
//!
//! All three searches share the same pruning rule: after the subtree on the query's side of a
//! splitting plane is searched, the other subtree is only visited if the squared distance from the
//! query to the plane is smaller than the distance to the current best (or current k-th best).

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use num_traits::Zero;

use crate::kdtree::index::KdTree;
use crate::kdtree::traversal::Node;
use crate::point::{Distance, KdPoint};
use crate::r#type::DistanceNum;

/// A value keyed by a distance, for use in the priority queues.
///
/// `BinaryHeap<HeapEntry<_, _>>` keeps the largest distance on top; wrap entries in [`Reverse`]
/// to keep the smallest on top.
#[derive(Debug)]
struct HeapEntry<N, V> {
    dist: N,
    value: V,
}

impl<N: PartialOrd, V> PartialEq for HeapEntry<N, V> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N: PartialOrd, V> Eq for HeapEntry<N, V> {}

impl<N: PartialOrd, V> Ord for HeapEntry<N, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Stored coordinates are finite, so only a NaN query can get here without an order.
        self.dist
            .partial_cmp(&other.dist)
            .unwrap_or(Ordering::Equal)
    }
}

impl<N: PartialOrd, V> PartialOrd for HeapEntry<N, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The closest item found so far.
struct Best<'a, T, N> {
    data: &'a T,
    dist: N,
}

impl<'a, T, N: PartialOrd + Copy> Best<'a, T, N> {
    /// Keep `data` if nothing was found yet or it is strictly closer than the current best.
    fn offer(best: &mut Option<Self>, data: &'a T, dist: N) {
        if best.as_ref().map_or(true, |b| dist < b.dist) {
            *best = Some(Self { data, dist });
        }
    }

    /// Whether everything at least `bound` away can be skipped.
    fn excludes(best: &Option<Self>, bound: N) -> bool {
        best.as_ref().is_some_and(|b| bound >= b.dist)
    }
}

impl<'a, P: KdPoint, T> KdTree<'a, P, T> {
    /// Find the data of the point nearest to `query` with a recursive depth-first search.
    ///
    /// Returns `None` if the tree is empty. When several points are equally near, the first one
    /// visited wins.
    pub fn nearest_recursive(&self, query: &P) -> Option<&'a T> {
        self.nearest_recursive_with_distance(query)
            .map(|(data, _)| data)
    }

    /// Like [`nearest_recursive`][Self::nearest_recursive], also returning the comparable
    /// distance between `query` and the found point.
    pub fn nearest_recursive_with_distance(&self, query: &P) -> Option<(&'a T, Distance<P>)> {
        let root = self.root()?;
        let mut best: Option<Best<'a, T, Distance<P>>> = None;

        nearest(query, root, &mut best);

        best.map(|b| (b.data, b.dist))
    }

    /// Find the data of the point nearest to `query` with a best-first search driven by a
    /// priority queue instead of recursion.
    ///
    /// Returns `None` if the tree is empty. Agrees with
    /// [`nearest_recursive`][Self::nearest_recursive] except, possibly, on which of several
    /// equally near points is returned.
    pub fn nearest_iterative(&self, query: &P) -> Option<&'a T> {
        self.nearest_iterative_with_distance(query)
            .map(|(data, _)| data)
    }

    /// Like [`nearest_iterative`][Self::nearest_iterative], also returning the comparable
    /// distance between `query` and the found point.
    pub fn nearest_iterative_with_distance(&self, query: &P) -> Option<(&'a T, Distance<P>)> {
        let root = self.root()?;
        let mut best: Option<Best<'a, T, Distance<P>>> = None;

        // The priority of a queued subtree is a lower bound of the distance to any of its points.
        let mut queue = BinaryHeap::new();
        queue.push(Reverse(HeapEntry {
            dist: Distance::<P>::zero(),
            value: root,
        }));

        while let Some(Reverse(entry)) = queue.pop() {
            if Best::excludes(&best, entry.dist) {
                // Nothing left in the queue can be closer.
                break;
            }

            let node = entry.value;
            let point = node.point();
            let d = query.comparable_distance(point);
            let dx = query.axis_delta(point, node.axis());

            Best::offer(&mut best, node.data(), d);

            let (near, far) = node.near_far(dx);
            if let Some(far) = far {
                queue.push(Reverse(HeapEntry {
                    dist: dx.saturating_square(),
                    value: far,
                }));
            }
            if let Some(near) = near {
                queue.push(Reverse(HeapEntry {
                    dist: Distance::<P>::zero(),
                    value: near,
                }));
            }
        }

        best.map(|b| (b.data, b.dist))
    }

    /// Find the data of the `k` points nearest to `query`, nearest first.
    ///
    /// Returns `min(k, self.len())` items. An empty tree or `k == 0` returns an empty vector.
    pub fn knearest(&self, query: &P, k: usize) -> Vec<&'a T> {
        self.knearest_with_distance(query, k)
            .into_iter()
            .map(|(data, _)| data)
            .collect()
    }

    /// Like [`knearest`][Self::knearest], also returning the comparable distance of each item.
    pub fn knearest_with_distance(&self, query: &P, k: usize) -> Vec<(&'a T, Distance<P>)> {
        let root = match self.root() {
            Some(root) if k >= 1 => root,
            _ => return vec![],
        };

        // Bounded max-heap: the top is the worst of the k best candidates so far.
        let mut result = BinaryHeap::with_capacity(k.min(self.len()) + 1);
        knearest(query, root, k, &mut result);

        result
            .into_sorted_vec()
            .into_iter()
            .map(|entry| (entry.value, entry.dist))
            .collect()
    }
}

fn nearest<'a, P: KdPoint, T>(
    query: &P,
    node: Node<'_, 'a, P, T>,
    best: &mut Option<Best<'a, T, Distance<P>>>,
) {
    let point = node.point();
    let d = query.comparable_distance(point);
    let dx = query.axis_delta(point, node.axis());

    Best::offer(best, node.data(), d);

    let (near, far) = node.near_far(dx);

    if let Some(near) = near {
        nearest(query, near, best);
    }

    if Best::excludes(best, dx.saturating_square()) {
        return;
    }

    if let Some(far) = far {
        nearest(query, far, best);
    }
}

fn knearest<'a, P: KdPoint, T>(
    query: &P,
    node: Node<'_, 'a, P, T>,
    k: usize,
    result: &mut BinaryHeap<HeapEntry<Distance<P>, &'a T>>,
) {
    let point = node.point();
    let d = query.comparable_distance(point);
    let dx = query.axis_delta(point, node.axis());

    let admit = match result.peek() {
        Some(worst) if result.len() >= k => d <= worst.dist,
        _ => true,
    };
    if admit {
        result.push(HeapEntry {
            dist: d,
            value: node.data(),
        });
        if result.len() > k {
            result.pop();
        }
    }

    let (near, far) = node.near_far(dx);

    if let Some(near) = near {
        knearest(query, near, k, result);
    }

    // Until k candidates are held there is no bound to prune against.
    if let Some(worst) = result.peek() {
        if result.len() >= k && dx.saturating_square() >= worst.dist {
            return;
        }
    }

    if let Some(far) = far {
        knearest(query, far, k, result);
    }
}
