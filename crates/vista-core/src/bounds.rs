//! Axis-aligned bounding boxes.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VistaError};

/// Quad faces of a box in +X, -X, +Y, -Y, +Z, -Z order, wound outward.
///
/// Indices refer to [`Bounds::corners`]: corner `i` has its x/y/z coordinate
/// at the max bound when bit 0/1/2 of `i` is set.
pub const BOX_FACES: [[u32; 4]; 6] = [
    [1, 3, 7, 5],
    [0, 4, 6, 2],
    [2, 6, 7, 3],
    [0, 1, 5, 4],
    [4, 5, 7, 6],
    [0, 2, 3, 1],
];

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Bounds {
    /// Creates bounds from two corners, without checking their order.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Computes the bounds of a set of points.
    ///
    /// Returns `None` if there are no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    /// Creates bounds from `(x_min, x_max, y_min, y_max, z_min, z_max)`.
    ///
    /// Fails if any value is not finite or any minimum exceeds its maximum.
    pub fn from_array(bounds: [f32; 6]) -> Result<Self> {
        if let Some(v) = bounds.iter().find(|v| !v.is_finite()) {
            return Err(VistaError::Validation(format!("bounds must be finite, got {v}")));
        }
        let [x_min, x_max, y_min, y_max, z_min, z_max] = bounds;
        for (axis, lo, hi) in [("x", x_min, x_max), ("y", y_min, y_max), ("z", z_min, z_max)] {
            if !(lo <= hi) {
                return Err(VistaError::Validation(format!(
                    "bounds {axis}_min ({lo}) must not exceed {axis}_max ({hi})"
                )));
            }
        }
        Ok(Self {
            min: Vec3::new(x_min, y_min, z_min),
            max: Vec3::new(x_max, y_max, z_max),
        })
    }

    /// Returns the bounds as `(x_min, x_max, y_min, y_max, z_min, z_max)`.
    #[must_use]
    pub fn to_array(&self) -> [f32; 6] {
        [
            self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z,
        ]
    }

    /// Edge length along each axis.
    #[must_use]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Length of the box diagonal.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.extent().length()
    }

    /// Smallest box containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// The eight corners, indexed as described on [`BOX_FACES`].
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }

    /// Returns true if the point lies inside or on the box.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x0, x1, y0, y1, z0, z1] = self.to_array();
        write!(f, "({x0}, {x1}, {y0}, {y1}, {z0}, {z1})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let pts = [Vec3::new(1.0, -2.0, 0.5), Vec3::new(-1.0, 3.0, 0.0)];
        let b = Bounds::from_points(&pts).unwrap();
        assert_eq!(b.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(b.max, Vec3::new(1.0, 3.0, 0.5));
        assert_eq!(b.center(), Vec3::new(0.0, 0.5, 0.25));
    }

    #[test]
    fn test_from_points_empty() {
        assert!(Bounds::from_points(&Vec::<Vec3>::new()).is_none());
    }

    #[test]
    fn test_array_round_trip_order() {
        let b = Bounds::from_array([-1.0, 1.0, -2.0, 2.0, -3.0, 3.0]).unwrap();
        assert_eq!(b.extent(), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(b.to_array(), [-1.0, 1.0, -2.0, 2.0, -3.0, 3.0]);
    }

    #[test]
    fn test_from_array_rejects_inverted_axis() {
        assert!(Bounds::from_array([1.0, -1.0, 0.0, 1.0, 0.0, 1.0]).is_err());
        assert!(Bounds::from_array([0.0, f32::INFINITY, 0.0, 1.0, 0.0, 1.0]).is_err());
    }

    #[test]
    fn test_corners_follow_bit_order() {
        let b = Bounds::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        let c = b.corners();
        assert_eq!(c[0], Vec3::ZERO);
        assert_eq!(c[1], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(c[6], Vec3::new(0.0, 2.0, 3.0));
        assert_eq!(c[7], b.max);
    }

    #[test]
    fn test_union_and_contains() {
        let a = Bounds::new(Vec3::ZERO, Vec3::ONE);
        let b = Bounds::new(Vec3::splat(-1.0), Vec3::splat(0.5));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::splat(-1.0));
        assert_eq!(u.max, Vec3::ONE);
        assert!(u.contains(Vec3::splat(0.75)));
        assert!(!a.contains(Vec3::splat(-0.5)));
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        fn point() -> impl Strategy<Value = Vec3> {
            (-1e3f32..1e3, -1e3f32..1e3, -1e3f32..1e3).prop_map(Vec3::from)
        }

        proptest! {
            #[test]
            fn from_points_is_tight(points in prop::collection::vec(point(), 1..32)) {
                let b = Bounds::from_points(&points).unwrap();
                prop_assert!(points.iter().all(|&p| b.contains(p)));
                for axis in 0..3 {
                    prop_assert!(points.iter().any(|p| p[axis] == b.min[axis]));
                    prop_assert!(points.iter().any(|p| p[axis] == b.max[axis]));
                }
                prop_assert!(b.corners().iter().all(|&c| b.contains(c)));
            }

            #[test]
            fn union_contains_both(a in point(), b in point(), c in point(), d in point()) {
                let first = Bounds::from_points(&[a, b]).unwrap();
                let second = Bounds::from_points(&[c, d]).unwrap();
                let u = first.union(&second);
                for p in [a, b, c, d] {
                    prop_assert!(u.contains(p));
                }
                prop_assert_eq!(Bounds::from_array(u.to_array()).unwrap(), u);
            }
        }
    }
}
