#![doc = include_str!("../README.md")]

mod error;
pub mod kdtree;
mod point;
mod r#type;

pub use error::{KdIndexError, Result};
pub use kdtree::KdTree;
pub use point::{Distance, KdPoint};
pub use r#type::{Coord, DistanceNum, IndexableNum};

#[cfg(test)]
pub(crate) mod test;
