use crate::error::{Error, Result};
use crate::vector::Vector3;

/// Softened inverse-square acceleration that a point mass at
/// `source_position` exerts on `target_position`, pointing from the target
/// towards the source.
pub fn pairwise_acceleration(
    source_position: &Vector3,
    source_mass: f64,
    target_position: &Vector3,
    softening: f64,
) -> Result<Vector3> {
    let r = *source_position - *target_position;
    let r2 = r.magnitude_squared() + softening * softening;
    if r2 == 0.0 {
        return Err(Error::SingularInteraction);
    }
    Ok(r * (source_mass / (r2 * r2.sqrt())))
}

/// Softened potential energy of a pair, `-m_a m_b / sqrt(r² + ε²)`.
pub fn pairwise_potential(
    mass_a: f64,
    mass_b: f64,
    position_a: &Vector3,
    position_b: &Vector3,
    softening: f64,
) -> Result<f64> {
    let r2 = (*position_a - *position_b).magnitude_squared() + softening * softening;
    if r2 == 0.0 {
        return Err(Error::SingularInteraction);
    }
    Ok(-mass_a * mass_b / r2.sqrt())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn unit_masses_two_apart() {
        let a = Vector3::new(-1.0, 0.0, 0.0);
        let b = Vector3::new(1.0, 0.0, 0.0);

        let acc = pairwise_acceleration(&b, 1.0, &a, 0.0).unwrap();
        assert_relative_eq!(acc.x(), 0.25);
        assert_eq!(acc.y(), 0.0);
        assert_eq!(acc.z(), 0.0);

        assert_relative_eq!(pairwise_potential(1.0, 1.0, &a, &b, 0.0).unwrap(), -0.5);
    }

    #[test]
    fn equal_masses_obey_third_law() {
        let a = Vector3::new(0.3, -1.2, 2.0);
        let b = Vector3::new(-0.7, 0.4, 1.1);

        let on_a = pairwise_acceleration(&b, 2.5, &a, 0.1).unwrap();
        let on_b = pairwise_acceleration(&a, 2.5, &b, 0.1).unwrap();
        let sum = on_a + on_b;
        assert!(sum.magnitude() < 1e-14, "net acceleration {}", sum);
        assert_relative_eq!(on_a.magnitude(), on_b.magnitude());
    }

    #[test]
    fn softening_caps_close_encounters() {
        let a = Vector3::zeros();
        let b = Vector3::new(1e-9, 0.0, 0.0);

        let hard = pairwise_acceleration(&b, 1.0, &a, 0.0).unwrap();
        let soft = pairwise_acceleration(&b, 1.0, &a, 0.1).unwrap();
        assert!(soft.magnitude() < 1e-5);
        assert!(hard.magnitude() > 1e15);
    }

    #[test]
    fn coincident_points_without_softening_are_singular() {
        let p = Vector3::new(1.0, 1.0, 1.0);
        assert_eq!(
            pairwise_acceleration(&p, 1.0, &p, 0.0),
            Err(Error::SingularInteraction)
        );
        assert_eq!(
            pairwise_potential(1.0, 1.0, &p, &p, 0.0),
            Err(Error::SingularInteraction)
        );
        // any softening removes the singularity
        assert_eq!(
            pairwise_acceleration(&p, 1.0, &p, 0.5).unwrap(),
            Vector3::zeros()
        );
        assert_relative_eq!(pairwise_potential(1.0, 1.0, &p, &p, 0.5).unwrap(), -2.0);
    }
}
