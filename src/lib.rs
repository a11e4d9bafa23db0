pub mod error;
pub mod force;
pub mod octree;
pub mod shared;
pub mod vector;

pub use error::{Error, Result};
pub use octree::{Octree, OctreeNode, Slot};
pub use shared::{Body, Bounds, ForceSettings, PointMass};
pub use vector::Vector3;
