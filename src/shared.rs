// This file defines the types shared by the octree and the force evaluators.

use crate::error::{Error, Result};
use crate::vector::Vector3;

/// Anything the tree can hold: a position and a scalar mass.
///
/// The tree only reads these two values and never mutates a body.
pub trait Body {
    fn position(&self) -> &Vector3;
    fn get_mass(&self) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointMass {
    pub position: Vector3,
    pub mass: f64,
}

impl PointMass {
    pub fn new(position: Vector3, mass: f64) -> Self {
        Self { position, mass }
    }
}

impl Body for PointMass {
    fn position(&self) -> &Vector3 {
        &self.position
    }

    fn get_mass(&self) -> f64 {
        self.mass
    }
}

/// Whether `a` and `b` denote the same body, either the same reference or
/// an identical position and mass.
pub fn same_body<A: Body, B: Body>(a: &A, b: &B) -> bool {
    std::ptr::addr_eq(a, b) || (a.position() == b.position() && a.get_mass() == b.get_mass())
}

/// An axis-aligned cube, `center ± half_size` on every axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub center: Vector3,
    pub half_size: f64,
}

impl Bounds {
    pub fn new(center: Vector3, half_size: f64) -> Self {
        Self { center, half_size }
    }

    /// Origin-centered cube whose half-size is the smallest power of two
    /// (at least one) that covers every coordinate of every body.
    pub fn enclosing<B: Body>(bodies: &[B]) -> Result<Bounds> {
        if let Some(bad) = bodies.iter().find(|b| !b.position().is_finite()) {
            return Err(Error::InvalidParameter {
                name: "body position",
                value: bad.position().magnitude(),
            });
        }

        let extent = bodies
            .iter()
            .map(|b| b.position().abs().max())
            .fold(0.0, f64::max);
        let mut half_size = 1.0;
        while extent > half_size {
            half_size *= 2.0;
        }
        Ok(Bounds::new(Vector3::zeros(), half_size))
    }

    pub fn width(&self) -> f64 {
        2.0 * self.half_size
    }

    pub fn min(&self) -> Vector3 {
        self.center.map(|c| c - self.half_size)
    }

    pub fn max(&self) -> Vector3 {
        self.center.map(|c| c + self.half_size)
    }

    pub fn contains(&self, point: &Vector3) -> bool {
        // NaN compares false, so a NaN coordinate is never contained
        (*point - self.center)
            .abs()
            .iter()
            .all(|d| d <= self.half_size)
    }

    /// Three-bit octant code of `point`: bit 2 for x, bit 1 for y, bit 0 for
    /// z, set when the coordinate is strictly greater than the center's.
    pub fn get_octant(&self, point: &Vector3) -> usize {
        let mut octant = 0;
        if point.x() > self.center.x() {
            octant |= 4;
        }
        if point.y() > self.center.y() {
            octant |= 2;
        }
        if point.z() > self.center.z() {
            octant |= 1;
        }
        octant
    }

    /// Inverse of [`Bounds::get_octant`]: ±1 per axis.
    pub fn octant_offset(octant: usize) -> Vector3 {
        let sign = |bit: usize| if octant & bit != 0 { 1.0 } else { -1.0 };
        Vector3::new(sign(4), sign(2), sign(1))
    }

    pub fn create_octant(&self, octant: usize) -> Bounds {
        let half_size = self.half_size / 2.0;
        Bounds {
            center: self.center + Self::octant_offset(octant) * half_size,
            half_size,
        }
    }
}

/// Per-query parameters of the tree walk.
///
/// `tolerance` is the opening angle: a node of width `w` at distance `d` is
/// opened while `w > tolerance * d`. `softening` is the Plummer length added
/// in quadrature to every separation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceSettings {
    tolerance: f64,
    softening: f64,
}

impl ForceSettings {
    pub const DEFAULT_TOLERANCE: f64 = 0.5;

    pub fn new(tolerance: f64, softening: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(Error::InvalidParameter {
                name: "tolerance",
                value: tolerance,
            });
        }
        if !softening.is_finite() || softening < 0.0 {
            return Err(Error::InvalidParameter {
                name: "softening",
                value: softening,
            });
        }
        Ok(Self {
            tolerance,
            softening,
        })
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn softening(&self) -> f64 {
        self.softening
    }
}

impl Default for ForceSettings {
    fn default() -> Self {
        Self {
            tolerance: Self::DEFAULT_TOLERANCE,
            softening: 0.0,
        }
    }
}
