// Error type shared by the vector, tree and force modules.

use thiserror::Error;

use crate::vector::Vector3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("vector component index {index} is out of range 0..3")]
    IndexOutOfRange { index: usize },

    #[error("inserting a body at {position} would exceed the maximum tree depth of {max_depth}")]
    DegenerateInsertion { position: Vector3, max_depth: usize },

    #[error("pairwise interaction at zero separation with zero softening")]
    SingularInteraction,

    #[error("body at {position} lies outside the root cube at {center} with half-size {half_size}")]
    OutOfBounds {
        position: Vector3,
        center: Vector3,
        half_size: f64,
    },

    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
