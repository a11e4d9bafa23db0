// Direct O(n²) sums over a body list, for exact answers and for checking
// the tree.

use crate::error::Result;
use crate::shared::{Body, same_body};
use crate::vector::Vector3;

use super::pairwise::{pairwise_acceleration, pairwise_potential};

/// Acceleration on `target` from every other body in `bodies`.
pub fn direct_acceleration<B: Body, T: Body>(
    bodies: &[B],
    target: &T,
    softening: f64,
) -> Result<Vector3> {
    let mut acc = Vector3::zeros();
    for other in bodies.iter().filter(|b| !same_body(*b, target)) {
        acc += pairwise_acceleration(
            other.position(),
            other.get_mass(),
            target.position(),
            softening,
        )?;
    }
    Ok(acc)
}

/// Accelerations of every body in `bodies` against all the others.
pub fn direct_accelerations<B: Body>(bodies: &[B], softening: f64) -> Result<Vec<Vector3>> {
    let mut acc = vec![Vector3::zeros(); bodies.len()];
    for i in 0..bodies.len() {
        for j in 0..i {
            let (bi, bj) = (&bodies[i], &bodies[j]);
            acc[i] += pairwise_acceleration(bj.position(), bj.get_mass(), bi.position(), softening)?;
            acc[j] += pairwise_acceleration(bi.position(), bi.get_mass(), bj.position(), softening)?;
        }
    }
    Ok(acc)
}

/// Potential energy of `target` against every other body.
pub fn potential_energy_of<B: Body, T: Body>(
    target: &T,
    bodies: &[B],
    softening: f64,
) -> Result<f64> {
    bodies
        .iter()
        .filter(|b| !same_body(*b, target))
        .map(|other| {
            pairwise_potential(
                target.get_mass(),
                other.get_mass(),
                target.position(),
                other.position(),
                softening,
            )
        })
        .sum()
}

/// Total potential energy of the system, each pair counted once.
pub fn total_potential_energy<B: Body>(bodies: &[B], softening: f64) -> Result<f64> {
    let mut energy = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            energy += pairwise_potential(
                a.get_mass(),
                b.get_mass(),
                a.position(),
                b.position(),
                softening,
            )?;
        }
    }
    Ok(energy)
}
