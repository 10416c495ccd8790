//! A build-once k-d tree over borrowed points with exact nearest neighbor queries.

#![warn(missing_docs)]

mod builder;
mod index;
mod range;
mod search;
mod traversal;

pub use index::KdTree;
pub use traversal::Node;
