#![warn(missing_docs)]

//! Math types for the dexel stock grid.
//!
//! Thin wrappers around nalgebra providing the single-precision world
//! types used by the nail field: points, vectors, axis-aligned boxes,
//! and the tolerance constants of the border snapping search.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A point in 3D world space.
pub type Point3 = nalgebra::Point3<f32>;

/// A vector in 3D world space.
pub type Vec3 = Vector3<f32>;

/// One of the three coordinate axes of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl Axis {
    /// All axes in X, Y, Z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis (0, 1, 2).
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Bounds3 {
    /// Create a box from its two corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create a box from `[min_x, min_y, min_z, max_x, max_y, max_z]`.
    pub fn from_array(b: [f32; 6]) -> Self {
        Self {
            min: Point3::new(b[0], b[1], b[2]),
            max: Point3::new(b[3], b[4], b[5]),
        }
    }

    /// Box as `[min_x, min_y, min_z, max_x, max_y, max_z]`.
    pub fn to_array(&self) -> [f32; 6] {
        [
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z,
        ]
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Center point.
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Check whether a point lies inside the box (borders included).
    pub fn contains(&self, p: &Point3) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    /// True if all components are finite and `max >= min` on every axis.
    pub fn is_valid(&self) -> bool {
        (0..3).all(|i| {
            self.min[i].is_finite() && self.max[i].is_finite() && self.max[i] >= self.min[i]
        })
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Bounds3) -> Bounds3 {
        Bounds3 {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// Box grown by `margin` on every side.
    pub fn expanded(&self, margin: f32) -> Bounds3 {
        let m = Vec3::repeat(margin);
        Bounds3 {
            min: self.min - m,
            max: self.max + m,
        }
    }
}

/// Tolerances of the border snapping search.
///
/// These are empirical values; changing them changes which grids
/// the snapping search produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapTolerance {
    /// Distance the interior nails are pulled inside each border.
    pub shrink: f32,
    /// Amount the spacing is reduced after each rejected attempt.
    pub step: f32,
    /// Maximum number of attempts.
    pub max_tries: u32,
}

impl SnapTolerance {
    /// Default snapping tolerances (1e-6 shrink, 5e-7 step, 10 tries).
    pub const DEFAULT: Self = Self {
        shrink: 1e-6,
        step: 5e-7,
        max_tries: 10,
    };
}

impl Default for SnapTolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_index() {
        let indices: Vec<usize> = Axis::ALL.iter().map(|a| a.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_bounds_array_roundtrip() {
        let arr = [0.0, -1.0, 2.0, 10.0, 5.0, 8.0];
        let b = Bounds3::from_array(arr);
        assert_eq!(b.to_array(), arr);
        assert_eq!(b.min, Point3::new(0.0, -1.0, 2.0));
    }

    #[test]
    fn test_bounds_size_and_center() {
        let b = Bounds3::from_array([0.0, 0.0, 0.0, 100.0, 50.0, 20.0]);
        let s = b.size();
        assert_relative_eq!(s.x, 100.0);
        assert_relative_eq!(s.y, 50.0);
        assert_relative_eq!(s.z, 20.0);
        let c = b.center();
        assert_relative_eq!(c.x, 50.0);
        assert_relative_eq!(c.z, 10.0);
    }

    #[test]
    fn test_bounds_contains() {
        let b = Bounds3::from_array([0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert!(b.contains(&Point3::new(0.5, 0.5, 0.5)));
        assert!(b.contains(&Point3::new(1.0, 0.0, 1.0)));
        assert!(!b.contains(&Point3::new(1.5, 0.5, 0.5)));
    }

    #[test]
    fn test_bounds_validity() {
        assert!(Bounds3::from_array([0.0, 0.0, 0.0, 0.0, 1.0, 1.0]).is_valid());
        assert!(!Bounds3::from_array([0.0, 0.0, 0.0, -1.0, 1.0, 1.0]).is_valid());
        assert!(!Bounds3::from_array([0.0, f32::NAN, 0.0, 1.0, 1.0, 1.0]).is_valid());
        assert!(!Bounds3::from_array([0.0, 0.0, 0.0, f32::INFINITY, 1.0, 1.0]).is_valid());
    }

    #[test]
    fn test_bounds_union_and_expand() {
        let a = Bounds3::from_array([0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let b = Bounds3::from_array([-1.0, 0.5, 0.5, 0.5, 3.0, 0.75]);
        let u = a.union(&b);
        assert_eq!(u.to_array(), [-1.0, 0.0, 0.0, 1.0, 3.0, 1.0]);

        let e = a.expanded(0.5);
        assert_eq!(e.to_array(), [-0.5, -0.5, -0.5, 1.5, 1.5, 1.5]);
    }

    #[test]
    fn test_snap_tolerance_default() {
        let tol = SnapTolerance::default();
        assert_eq!(tol, SnapTolerance::DEFAULT);
        assert_eq!(tol.max_tries, 10);
        assert_relative_eq!(tol.shrink, 1e-6);
        assert_relative_eq!(tol.step, 5e-7);
    }
}
