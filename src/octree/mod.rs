// Barnes–Hut octree.
//
// The tree borrows its bodies and follows a strict protocol: insert every
// body, call `Octree::aggregate` once, then run any number of read-only
// force queries. Inserting after aggregation invalidates the aggregate
// values until `aggregate` is called again; querying a tree in that state
// is a caller error.

mod aggregate;
mod iter;
mod node;

pub use iter::{Bodies, Nodes};
pub use node::{OctreeNode, Slot};

use crate::error::{Error, Result};
use crate::shared::{Body, Bounds};
use crate::vector::Vector3;

/// Deepest level a nested node may sit at before an insertion is refused.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Clone, Debug)]
pub struct Octree<'a, B> {
    root: OctreeNode<'a, B>,
    max_depth: usize,
    len: usize,
    aggregated: bool,
}

impl<'a, B> Octree<'a, B> {
    /// Empty tree over `bounds`. The cube needs a finite center and a
    /// finite, positive half-size.
    pub fn new(bounds: Bounds) -> Result<Self> {
        if !bounds.half_size.is_finite() || bounds.half_size <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "root half-size",
                value: bounds.half_size,
            });
        }
        if let Some(bad) = bounds.center.iter().find(|c| !c.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "root center",
                value: bad,
            });
        }
        Ok(Self {
            root: OctreeNode::new(bounds),
            max_depth: DEFAULT_MAX_DEPTH,
            len: 0,
            aggregated: false,
        })
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn root(&self) -> &OctreeNode<'a, B> {
        &self.root
    }

    pub fn bounds(&self) -> &Bounds {
        &self.root.bounds
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of bodies inserted so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_aggregated(&self) -> bool {
        self.aggregated
    }

    pub fn nodes(&self) -> Nodes<'_, 'a, B> {
        Nodes::new(&self.root)
    }

    pub fn bodies(&self) -> Bodies<'_, 'a, B> {
        Bodies::new(&self.root)
    }

    /// Depth of the deepest node, the root being 0.
    pub fn depth(&self) -> usize {
        self.nodes().map(|(depth, _)| depth).max().unwrap_or(0)
    }
}

impl<'a, B: Body> Octree<'a, B> {
    /// Builds an unaggregated tree over `bodies` inside the cube
    /// `root_center ± root_half_size`.
    pub fn build(bodies: &'a [B], root_center: Vector3, root_half_size: f64) -> Result<Self> {
        let mut tree = Octree::new(Bounds::new(root_center, root_half_size))?;
        tree.extend(bodies)?;
        Ok(tree)
    }

    /// Builds over the origin-centered power-of-two cube that encloses
    /// every body.
    pub fn build_enclosing(bodies: &'a [B]) -> Result<Self> {
        let bounds = Bounds::enclosing(bodies)?;
        Self::build(bodies, bounds.center, bounds.half_size)
    }

    pub fn insert(&mut self, body: &'a B) -> Result<()> {
        let bounds = self.root.bounds;
        if !body.position().is_finite() || !bounds.contains(body.position()) {
            return Err(Error::OutOfBounds {
                position: *body.position(),
                center: bounds.center,
                half_size: bounds.half_size,
            });
        }

        self.root.insert(body, 0, self.max_depth)?;
        self.len += 1;
        self.aggregated = false;
        Ok(())
    }

    pub fn extend(&mut self, bodies: &'a [B]) -> Result<()> {
        for body in bodies {
            self.insert(body)?;
        }
        log::debug!(
            "octree holds {} bodies, depth {} (half-size {})",
            self.len,
            self.depth(),
            self.root.bounds.half_size
        );
        Ok(())
    }

    /// Fills in mass and center of mass on every node. Must run after the
    /// last insertion and before any force query.
    pub fn aggregate(&mut self) {
        self.root.aggregate();
        self.aggregated = true;
        log::debug!(
            "aggregated {} bodies, total mass {}",
            self.root.body_count,
            self.root.mass
        );
    }
}
