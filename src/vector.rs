// Fixed-size 3D vector used for positions, centers and accelerations.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Range, Sub, SubAssign};

use nalgebra::Vector3 as NVec3;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector3(NVec3<f64>);

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3(NVec3::new(x, y, z))
    }

    pub fn zeros() -> Self {
        Vector3(NVec3::zeros())
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Component at `index`, failing for anything outside `0..3`.
    pub fn get(&self, index: usize) -> Result<f64> {
        self.0
            .as_slice()
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange { index })
    }

    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        let component = self
            .0
            .as_mut_slice()
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index })?;
        *component = value;
        Ok(())
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.0.dot(&other.0)
    }

    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3(self.0.cross(&other.0))
    }

    pub fn magnitude(&self) -> f64 {
        self.0.norm()
    }

    pub fn magnitude_squared(&self) -> f64 {
        self.0.norm_squared()
    }

    /// Component-wise absolute value.
    pub fn abs(&self) -> Vector3 {
        self.map(f64::abs)
    }

    pub fn map<F: FnMut(f64) -> f64>(&self, f: F) -> Vector3 {
        Vector3(self.0.map(f))
    }

    pub fn map_in_place<F: FnMut(f64) -> f64>(&mut self, mut f: F) {
        for component in self.0.iter_mut() {
            *component = f(*component);
        }
    }

    pub fn min(&self) -> f64 {
        self.0.x.min(self.0.y).min(self.0.z)
    }

    pub fn max(&self) -> f64 {
        self.0.x.max(self.0.y).max(self.0.z)
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn indices(&self) -> Range<usize> {
        0..3
    }

    pub fn is_finite(&self) -> bool {
        self.iter().all(f64::is_finite)
    }
}

impl Default for Vector3 {
    fn default() -> Self {
        Vector3::zeros()
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(v: [f64; 3]) -> Self {
        Vector3::new(v[0], v[1], v[2])
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        [v.x(), v.y(), v.z()]
    }
}

impl From<NVec3<f64>> for Vector3 {
    fn from(v: NVec3<f64>) -> Self {
        Vector3(v)
    }
}

impl From<Vector3> for NVec3<f64> {
    fn from(v: Vector3) -> Self {
        v.0
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    fn add(self, other: Vector3) -> Vector3 {
        Vector3(self.0 + other.0)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, other: Vector3) {
        self.0 += other.0;
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    fn sub(self, other: Vector3) -> Vector3 {
        Vector3(self.0 - other.0)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, other: Vector3) {
        self.0 -= other.0;
    }
}

impl Neg for Vector3 {
    type Output = Vector3;
    fn neg(self) -> Vector3 {
        Vector3(-self.0)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;
    fn mul(self, scalar: f64) -> Vector3 {
        Vector3(self.0 * scalar)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;
    fn mul(self, v: Vector3) -> Vector3 {
        Vector3(v.0 * self)
    }
}

// vector * vector is the inner product
impl Mul for Vector3 {
    type Output = f64;
    fn mul(self, other: Vector3) -> f64 {
        self.dot(&other)
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;
    fn div(self, scalar: f64) -> Vector3 {
        Vector3(self.0 / scalar)
    }
}

impl Sum for Vector3 {
    fn sum<I: Iterator<Item = Vector3>>(iter: I) -> Vector3 {
        iter.fold(Vector3::zeros(), |acc, v| acc + v)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x(), self.y(), self.z())
    }
}
