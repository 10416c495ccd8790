use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum KdIndexError {
    #[error("General error: {0}")]
    General(String),

    #[error("Non-finite coordinate on axis {axis} of staged item {item}.")]
    NonFiniteCoordinate { item: usize, axis: usize },

    #[error("Squared diagonal of the points' bounding box overflows the distance type.")]
    CoordinateSpanOverflow,
}

pub type Result<T> = std::result::Result<T, KdIndexError>;
