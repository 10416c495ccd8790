use crate::error::Result;
use crate::kdtree::builder::{sort, validate, Item};
use crate::kdtree::traversal::Node;
use crate::point::KdPoint;

/// A build-once k-d tree over borrowed points and their associated data.
///
/// Pairs are staged with [`add`][Self::add] and turned into a balanced tree by
/// [`build`][Self::build]. Points and data are only referenced, so both must outlive the tree.
///
/// ```
/// use kdnearest::KdTree;
///
/// let points = [(0.0, 0.0), (5.0, 5.0), (1.0, 1.0), (9.0, 0.0)];
/// let names = ["A", "B", "C", "D"];
///
/// let mut tree = KdTree::new();
/// for (point, name) in points.iter().zip(names.iter()) {
///     tree.add(point, name);
/// }
/// tree.build().unwrap();
///
/// assert_eq!(tree.nearest_recursive(&(0.9, 0.9)), Some(&"C"));
/// assert_eq!(tree.nearest_iterative(&(0.9, 0.9)), Some(&"C"));
/// assert_eq!(tree.knearest(&(0.9, 0.9), 2), vec![&"C", &"A"]);
/// ```
#[derive(Debug)]
pub struct KdTree<'a, P: KdPoint, T> {
    /// pairs added since the last build
    staged: Vec<Item<'a, P, T>>,

    /// kd-sorted pairs: the root is the middle element, and each half is a subtree.
    items: Vec<Item<'a, P, T>>,
}

impl<'a, P: KdPoint, T> KdTree<'a, P, T> {
    /// Create a new, empty tree.
    pub fn new() -> Self {
        Self {
            staged: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Create a new, empty tree with room to stage `num_items` pairs without reallocating.
    pub fn with_capacity(num_items: usize) -> Self {
        Self {
            staged: Vec::with_capacity(num_items),
            items: Vec::new(),
        }
    }

    /// Stage a point and its data for the next [`build`][Self::build].
    pub fn add(&mut self, point: &'a P, data: &'a T) {
        self.staged.push((point, data));
    }

    /// Perform the k-d sort of every staged pair, making them available to queries.
    ///
    /// Staged pairs are merged with the pairs of any previous build and the whole tree is built
    /// again from scratch. With nothing staged this is a no-op.
    ///
    /// Fails if the point type has no dimensions, a staged coordinate is NaN or infinite, or the
    /// points spread so far apart that their squared distances would not fit the distance type
    /// (see [`IndexableNum::Distance`][crate::IndexableNum::Distance]). In that case the staged
    /// pairs are discarded and the previously built tree is left unchanged.
    pub fn build(&mut self) -> Result<()> {
        if self.staged.is_empty() {
            return Ok(());
        }

        let staged = std::mem::take(&mut self.staged);
        validate(&staged)?;

        self.items.extend(staged);
        sort(&mut self.items, 0);
        Ok(())
    }

    /// Drop the tree and any staged pairs.
    pub fn clear(&mut self) {
        self.staged.clear();
        self.items.clear();
    }

    /// The number of items in the built tree.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the built tree has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The number of pairs waiting for the next [`build`][Self::build].
    pub fn num_staged(&self) -> usize {
        self.staged.len()
    }

    /// The number of levels of the tree, `ceil(log2(len + 1))`.
    pub fn height(&self) -> usize {
        (usize::BITS - self.items.len().leading_zeros()) as usize
    }

    /// Iterate over the built `(point, data)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a P, &'a T)> + '_ {
        self.items.iter().copied()
    }

    /// Access the root node of the tree for manual traversal.
    pub fn root(&self) -> Option<Node<'_, 'a, P, T>> {
        Node::from_items(&self.items, 0)
    }

    pub(crate) fn items(&self) -> &[Item<'a, P, T>] {
        &self.items
    }
}

impl<P: KdPoint, T> Default for KdTree<'_, P, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, P: KdPoint, T> Extend<(&'a P, &'a T)> for KdTree<'a, P, T> {
    fn extend<I: IntoIterator<Item = (&'a P, &'a T)>>(&mut self, iter: I) {
        self.staged.extend(iter);
    }
}
