// Tree-approximated accelerations.

use rayon::prelude::*;

use crate::error::Result;
use crate::octree::{Octree, OctreeNode, Slot};
use crate::shared::{Body, ForceSettings, same_body};
use crate::vector::Vector3;

use super::pairwise::pairwise_acceleration;

/// Work done by a single tree walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Nodes that failed the opening test and were descended into.
    pub opened: usize,
    /// Nodes accepted as a single point mass.
    pub approximated: usize,
    /// Body-to-body kernel evaluations.
    pub direct: usize,
}

impl<B: Body> OctreeNode<'_, B> {
    pub fn acceleration_on<T: Body>(&self, target: &T, settings: &ForceSettings) -> Result<Vector3> {
        self.walk(target, settings, &mut TraversalStats::default())
    }

    fn walk<T: Body>(
        &self,
        target: &T,
        settings: &ForceSettings,
        stats: &mut TraversalStats,
    ) -> Result<Vector3> {
        if self.mass == 0.0 {
            return Ok(Vector3::zeros());
        }

        // a node holding only the target sits at distance 0 and is always opened
        let distance = (*target.position() - self.center_of_mass).magnitude();
        if self.bounds.width() > settings.tolerance() * distance {
            stats.opened += 1;
            let mut acc = Vector3::zeros();
            for child in &self.children {
                acc += match child {
                    Slot::Empty => continue,
                    Slot::Body(body) => body_acceleration(*body, target, settings, stats)?,
                    Slot::Node(node) => node.walk(target, settings, stats)?,
                };
            }
            Ok(acc)
        } else {
            stats.approximated += 1;
            pairwise_acceleration(
                &self.center_of_mass,
                self.mass,
                target.position(),
                settings.softening(),
            )
        }
    }
}

fn body_acceleration<B: Body, T: Body>(
    source: &B,
    target: &T,
    settings: &ForceSettings,
    stats: &mut TraversalStats,
) -> Result<Vector3> {
    if source.get_mass() == 0.0 || same_body(source, target) {
        return Ok(Vector3::zeros());
    }
    stats.direct += 1;
    pairwise_acceleration(
        source.position(),
        source.get_mass(),
        target.position(),
        settings.softening(),
    )
}

impl<B: Body> Octree<'_, B> {
    /// Approximate acceleration on `target` from every body in the tree.
    ///
    /// `target` does not need to be stored in the tree; if it is, its own
    /// slot contributes nothing.
    pub fn acceleration_on<T: Body>(&self, target: &T, settings: &ForceSettings) -> Result<Vector3> {
        debug_assert!(self.is_aggregated(), "octree queried before aggregation");
        self.root().acceleration_on(target, settings)
    }

    pub fn acceleration_on_with_stats<T: Body>(
        &self,
        target: &T,
        settings: &ForceSettings,
    ) -> Result<(Vector3, TraversalStats)> {
        debug_assert!(self.is_aggregated(), "octree queried before aggregation");
        let mut stats = TraversalStats::default();
        let acc = self.root().walk(target, settings, &mut stats)?;
        Ok((acc, stats))
    }

    /// Accelerations of `targets`, in order.
    pub fn accelerations<T: Body>(
        &self,
        targets: &[T],
        settings: &ForceSettings,
    ) -> Result<Vec<Vector3>> {
        targets
            .iter()
            .map(|t| self.acceleration_on(t, settings))
            .collect()
    }

    /// Same as [`Octree::accelerations`], spread over the rayon pool. The
    /// tree is only read, so no locking is involved.
    pub fn par_accelerations<T: Body + Sync>(
        &self,
        targets: &[T],
        settings: &ForceSettings,
    ) -> Result<Vec<Vector3>>
    where
        B: Sync,
    {
        targets
            .par_iter()
            .map(|t| self.acceleration_on(t, settings))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::shared::PointMass;

    fn settings(tolerance: f64, softening: f64) -> ForceSettings {
        ForceSettings::new(tolerance, softening).unwrap()
    }

    #[test]
    fn body_exerts_no_force_on_itself() {
        let bodies = [PointMass::new(Vector3::new(0.5, 0.5, 0.5), 3.0)];
        let mut tree = Octree::build(&bodies, Vector3::zeros(), 1.0).unwrap();
        tree.aggregate();

        let acc = tree.acceleration_on(&bodies[0], &settings(0.5, 0.0)).unwrap();
        assert_eq!(acc, Vector3::zeros());

        // an equal copy is treated as the same body
        let copy = bodies[0];
        let acc = tree.acceleration_on(&copy, &settings(1e6, 0.0)).unwrap();
        assert_eq!(acc, Vector3::zeros());
    }

    #[test]
    fn opened_node_sums_every_child() {
        let bodies = [
            PointMass::new(Vector3::new(-1.0, 0.0, 0.0), 1.0),
            PointMass::new(Vector3::new(1.0, 0.0, 0.0), 1.0),
            PointMass::new(Vector3::new(0.0, 1.0, 0.0), 1.0),
        ];
        let mut tree = Octree::build(&bodies, Vector3::zeros(), 2.0).unwrap();
        tree.aggregate();

        let target = PointMass::new(Vector3::new(0.0, -1.0, 0.0), 1.0);
        let (acc, stats) = tree
            .acceleration_on_with_stats(&target, &settings(0.0, 0.0))
            .unwrap();

        let expected = bodies
            .iter()
            .map(|b| pairwise_acceleration(&b.position, b.mass, &target.position, 0.0).unwrap())
            .sum::<Vector3>();
        for i in 0..3 {
            assert_relative_eq!(acc.get(i).unwrap(), expected.get(i).unwrap(), epsilon = 1e-15);
        }
        assert_eq!(stats.direct, 3);
        assert_eq!(stats.approximated, 0);
    }

    #[test]
    fn distant_tree_is_one_point_mass() {
        let bodies = [
            PointMass::new(Vector3::new(-0.5, 0.2, 0.1), 1.0),
            PointMass::new(Vector3::new(0.5, -0.2, 0.3), 2.0),
        ];
        let mut tree = Octree::build(&bodies, Vector3::zeros(), 1.0).unwrap();
        tree.aggregate();

        let target = PointMass::new(Vector3::new(100.0, 0.0, 0.0), 1.0);
        let (acc, stats) = tree
            .acceleration_on_with_stats(&target, &settings(0.5, 0.0))
            .unwrap();
        let expected = pairwise_acceleration(
            &tree.root().center_of_mass(),
            3.0,
            &target.position,
            0.0,
        )
        .unwrap();

        assert_eq!(acc, expected);
        assert_eq!(
            stats,
            TraversalStats {
                opened: 0,
                approximated: 1,
                direct: 0,
            }
        );
    }

    #[test]
    fn massless_bodies_are_ignored() {
        let bodies = [
            PointMass::new(Vector3::new(0.5, 0.5, 0.5), 0.0),
            PointMass::new(Vector3::new(-0.5, -0.5, -0.5), 0.0),
        ];
        let mut tree = Octree::build(&bodies, Vector3::zeros(), 1.0).unwrap();
        tree.aggregate();

        // the target sits on the zero center of mass of a massless tree
        let target = PointMass::new(Vector3::zeros(), 1.0);
        let acc = tree.acceleration_on(&target, &settings(0.5, 0.0)).unwrap();
        assert_eq!(acc, Vector3::zeros());
    }

    #[test]
    fn parallel_matches_sequential() {
        let bodies: Vec<PointMass> = (0..64)
            .map(|i| {
                let t = i as f64;
                PointMass::new(
                    Vector3::new((t * 0.37).sin(), (t * 0.13).cos(), (t * 0.07).sin()),
                    1.0 + 0.01 * t,
                )
            })
            .collect();
        let mut tree = Octree::build_enclosing(&bodies).unwrap();
        tree.aggregate();

        let s = settings(0.7, 0.01);
        let seq = tree.accelerations(&bodies, &s).unwrap();
        let par = tree.par_accelerations(&bodies, &s).unwrap();
        assert_eq!(seq, par);
    }
}
