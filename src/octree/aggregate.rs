// Bottom-up mass and center-of-mass pass.

use crate::shared::Body;
use crate::vector::Vector3;

use super::node::{OctreeNode, Slot};

impl<B: Body> OctreeNode<'_, B> {
    /// Recomputes `mass`, `center_of_mass` and `body_count` for this node
    /// and everything below it, children first.
    ///
    /// A node with no mass keeps a zero center of mass and is skipped as a
    /// force source.
    pub(crate) fn aggregate(&mut self) {
        let mut mass = 0.0;
        let mut weighted = Vector3::zeros();
        let mut body_count = 0;

        for child in self.children.iter_mut() {
            match child {
                Slot::Empty => {}
                Slot::Body(body) => {
                    mass += body.get_mass();
                    weighted += *body.position() * body.get_mass();
                    body_count += 1;
                }
                Slot::Node(node) => {
                    node.aggregate();
                    mass += node.mass;
                    weighted += node.center_of_mass * node.mass;
                    body_count += node.body_count;
                }
            }
        }

        self.mass = mass;
        self.body_count = body_count;
        self.center_of_mass = if mass > 0.0 {
            weighted / mass
        } else {
            Vector3::zeros()
        };
    }
}
