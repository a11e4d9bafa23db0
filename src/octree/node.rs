use crate::error::{Error, Result};
use crate::shared::{Body, Bounds};
use crate::vector::Vector3;

use super::iter::Bodies;

/// Content of one octant of a node.
#[derive(Clone, Debug)]
pub enum Slot<'a, B> {
    Empty,
    Body(&'a B),
    Node(Box<OctreeNode<'a, B>>),
}

impl<B> Slot<'_, B> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

#[derive(Clone, Debug)]
pub struct OctreeNode<'a, B> {
    pub(crate) bounds: Bounds,
    pub(crate) mass: f64,
    pub(crate) center_of_mass: Vector3,
    pub(crate) body_count: usize,
    pub(crate) children: [Slot<'a, B>; 8],
}

impl<'a, B> OctreeNode<'a, B> {
    pub(crate) fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            mass: 0.0,
            center_of_mass: Vector3::zeros(),
            body_count: 0,
            children: std::array::from_fn(|_| Slot::Empty),
        }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn center(&self) -> Vector3 {
        self.bounds.center
    }

    pub fn half_size(&self) -> f64 {
        self.bounds.half_size
    }

    /// Total mass below this node. Zero until the tree is aggregated.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn center_of_mass(&self) -> Vector3 {
        self.center_of_mass
    }

    pub fn body_count(&self) -> usize {
        self.body_count
    }

    pub fn children(&self) -> &[Slot<'a, B>; 8] {
        &self.children
    }

    /// Every body stored in this subtree, depth-first.
    pub fn bodies(&self) -> Bodies<'_, 'a, B> {
        Bodies::new(self)
    }
}

impl<'a, B: Body> OctreeNode<'a, B> {
    pub(crate) fn insert(&mut self, body: &'a B, depth: usize, max_depth: usize) -> Result<()> {
        let octant = self.bounds.get_octant(body.position());
        match self.children[octant] {
            Slot::Empty => {
                self.children[octant] = Slot::Body(body);
                Ok(())
            }
            Slot::Body(existing) => {
                let child_bounds = self.bounds.create_octant(octant);
                // refuse before touching the slot so a failure leaves the tree intact
                check_separation(child_bounds, existing, body, depth + 1, max_depth)?;

                log::trace!(
                    "subdividing octant {} at depth {} (half-size {})",
                    octant,
                    depth,
                    child_bounds.half_size
                );
                let mut child = OctreeNode::new(child_bounds);
                child.insert(existing, depth + 1, max_depth)?;
                child.insert(body, depth + 1, max_depth)?;
                self.children[octant] = Slot::Node(Box::new(child));
                Ok(())
            }
            Slot::Node(ref mut child) => child.insert(body, depth + 1, max_depth),
        }
    }
}

/// Walks the chain of nodes two colliding bodies would create and fails if
/// they are still together below `max_depth`.
fn check_separation<B: Body>(
    mut bounds: Bounds,
    existing: &B,
    incoming: &B,
    mut depth: usize,
    max_depth: usize,
) -> Result<()> {
    loop {
        if depth > max_depth {
            return Err(Error::DegenerateInsertion {
                position: *incoming.position(),
                max_depth,
            });
        }
        let octant = bounds.get_octant(existing.position());
        if octant != bounds.get_octant(incoming.position()) {
            return Ok(());
        }
        bounds = bounds.create_octant(octant);
        depth += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::PointMass;

    fn node<'a>(half_size: f64) -> OctreeNode<'a, PointMass> {
        OctreeNode::new(Bounds::new(Vector3::zeros(), half_size))
    }

    #[test]
    fn empty_slot_takes_body() {
        let b = PointMass::new(Vector3::new(1.0, -1.0, 1.0), 1.0);
        let mut root = node(10.0);
        root.insert(&b, 0, 8).unwrap();

        assert!(matches!(root.children[0b101], Slot::Body(_)));
        assert_eq!(root.children.iter().filter(|s| !s.is_empty()).count(), 1);
    }

    #[test]
    fn collision_creates_half_size_child() {
        let a = PointMass::new(Vector3::new(2.0, 2.0, 2.0), 1.0);
        let b = PointMass::new(Vector3::new(8.0, 8.0, 8.0), 1.0);
        let mut root = node(10.0);
        root.insert(&a, 0, 8).unwrap();
        root.insert(&b, 0, 8).unwrap();

        let Slot::Node(child) = &root.children[7] else {
            panic!("expected a nested node in octant 7");
        };
        assert_eq!(child.half_size(), 5.0);
        assert_eq!(child.center(), Vector3::new(5.0, 5.0, 5.0));
        assert!(matches!(child.children[0], Slot::Body(_)));
        assert!(matches!(child.children[7], Slot::Body(_)));
    }

    #[test]
    fn deeper_collision_keeps_subdividing() {
        let a = PointMass::new(Vector3::new(1.0, 1.0, 1.0), 1.0);
        let b = PointMass::new(Vector3::new(2.0, 2.0, 2.0), 1.0);
        let mut root = node(10.0);
        root.insert(&a, 0, 16).unwrap();
        root.insert(&b, 0, 16).unwrap();

        // 10 -> 5 -> 2.5 -> 1.25: the bodies only split around x = 1.25
        let mut current = &root;
        let mut depth = 0;
        while let Some(next) = current.children.iter().find_map(|s| match s {
            Slot::Node(n) => Some(n.as_ref()),
            _ => None,
        }) {
            current = next;
            depth += 1;
        }
        assert_eq!(depth, 3);
        assert_eq!(current.half_size(), 1.25);
        assert_eq!(current.bodies().count(), 2);
    }

    #[test]
    fn coincident_bodies_fail_without_mutation() {
        let a = PointMass::new(Vector3::new(3.0, 3.0, 3.0), 1.0);
        let b = PointMass::new(Vector3::new(3.0, 3.0, 3.0), 2.0);
        let mut root = node(10.0);
        root.insert(&a, 0, 12).unwrap();

        let err = root.insert(&b, 0, 12).unwrap_err();
        assert_eq!(
            err,
            Error::DegenerateInsertion {
                position: Vector3::new(3.0, 3.0, 3.0),
                max_depth: 12,
            }
        );
        assert!(matches!(root.children[7], Slot::Body(_)));
    }
}
