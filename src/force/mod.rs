mod brute_force;
mod pairwise;
mod tree;

pub use brute_force::*;
pub use pairwise::*;
pub use tree::TraversalStats;
