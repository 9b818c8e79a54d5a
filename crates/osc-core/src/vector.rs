//! Immutable fixed-dimension numeric vector.
//!
//! Every operation returns a new `Vector`; there is no way to mutate the
//! components of an existing one.

use std::ops::Index;

use crate::error::{OscError, OscResult};
use crate::numeric::Real;

/// Ordered, fixed-length sequence of reals with dimension >= 1.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Real>", into = "Vec<Real>")
)]
pub struct Vector {
    components: Box<[Real]>,
}

impl Vector {
    /// Build a vector from its components. Fails on an empty input.
    pub fn new(components: impl Into<Vec<Real>>) -> OscResult<Self> {
        let components = components.into();
        if components.is_empty() {
            return Err(OscError::InvalidDimension);
        }
        Ok(Self {
            components: components.into_boxed_slice(),
        })
    }

    /// One-dimensional vector; cannot fail.
    pub fn scalar(component: Real) -> Self {
        Self {
            components: Box::new([component]),
        }
    }

    pub fn dim(&self) -> usize {
        self.components.len()
    }

    /// Component-wise sum.
    pub fn add(&self, other: &Vector) -> OscResult<Vector> {
        if self.dim() != other.dim() {
            return Err(OscError::DimensionMismatch {
                left: self.dim(),
                right: other.dim(),
            });
        }
        let components = self
            .components
            .iter()
            .zip(other.components.iter())
            .map(|(a, b)| a + b)
            .collect::<Vec<_>>();
        Ok(Self {
            components: components.into_boxed_slice(),
        })
    }

    /// Component-wise product with a scalar. Non-finite scalars are accepted.
    pub fn scale(&self, scalar: Real) -> Vector {
        self.map(|c| c * scalar)
    }

    /// Apply `f` to every component, keeping the dimension.
    pub fn map(&self, f: impl Fn(Real) -> Real) -> Vector {
        Self {
            components: self.components.iter().map(|&c| f(c)).collect(),
        }
    }

    pub fn get(&self, index: usize) -> Option<Real> {
        self.components.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Real] {
        &self.components
    }

    pub fn to_vec(&self) -> Vec<Real> {
        self.components.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = Real> + '_ {
        self.components.iter().copied()
    }
}

impl Index<usize> for Vector {
    type Output = Real;

    fn index(&self, index: usize) -> &Real {
        &self.components[index]
    }
}

impl TryFrom<Vec<Real>> for Vector {
    type Error = OscError;

    fn try_from(components: Vec<Real>) -> OscResult<Self> {
        Self::new(components)
    }
}

impl From<Vector> for Vec<Real> {
    fn from(v: Vector) -> Self {
        v.components.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_vector_is_rejected() {
        assert_eq!(Vector::new(Vec::<Real>::new()), Err(OscError::InvalidDimension));
    }

    #[test]
    fn scalar_is_one_dimensional() {
        let v = Vector::scalar(-1.0);
        assert_eq!(v.dim(), 1);
        assert_eq!(v, Vector::new([-1.0]).unwrap());
    }

    #[test]
    fn construction_copies_components() {
        let mut raw = vec![1.0, 2.0, 3.0];
        let v = Vector::new(raw.clone()).unwrap();
        raw[0] = 99.0;
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(v.dim(), 3);
    }

    #[test]
    fn to_vec_does_not_alias_storage() {
        let v = Vector::new([4.0, 5.0]).unwrap();
        let mut copy = v.to_vec();
        copy[1] = -1.0;
        assert_eq!(v[1], 5.0);
    }

    #[test]
    fn add_mismatched_dimensions_fails() {
        let a = Vector::new([1.0, 2.0]).unwrap();
        let b = Vector::new([1.0]).unwrap();
        assert_eq!(
            a.add(&b),
            Err(OscError::DimensionMismatch { left: 2, right: 1 })
        );
    }

    #[test]
    fn add_and_scale_componentwise() {
        let a = Vector::new([1.0, -2.0]).unwrap();
        let b = Vector::new([0.5, 4.0]).unwrap();
        assert_eq!(a.add(&b).unwrap().as_slice(), &[1.5, 2.0]);
        assert_eq!(a.scale(3.0).as_slice(), &[3.0, -6.0]);
    }

    #[test]
    fn scale_propagates_non_finite() {
        let a = Vector::new([1.0, 0.0]).unwrap();
        let s = a.scale(Real::INFINITY);
        assert_eq!(s[0], Real::INFINITY);
        assert!(s[1].is_nan());
    }

    #[test]
    fn get_out_of_range_is_none() {
        let a = Vector::new([1.0]).unwrap();
        assert_eq!(a.get(0), Some(1.0));
        assert_eq!(a.get(1), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_rejects_empty_sequence() {
        let v: Vector = serde_json::from_str("[1.0, 2.0]").unwrap();
        assert_eq!(v.as_slice(), &[1.0, 2.0]);
        assert!(serde_json::from_str::<Vector>("[]").is_err());
        assert_eq!(serde_json::to_string(&v).unwrap(), "[1.0,2.0]");
    }
}
