//! Per-axis transformations of a three-dimensional nail grid.

use dexel_math::{Axis, Bounds3, Point3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FieldError, Result};
use crate::scaling::FieldCoordinateScaling;
use crate::settings::GridSettings;

/// Transformation objects for all three coordinate axes.
///
/// Together they describe the grid of internal sampling points of a stock model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformationInfo {
    /// X axis.
    pub x: FieldCoordinateScaling,
    /// Y axis.
    pub y: FieldCoordinateScaling,
    /// Z axis.
    pub z: FieldCoordinateScaling,
}

impl TransformationInfo {
    /// Combine three axes.
    pub fn new(
        x: FieldCoordinateScaling,
        y: FieldCoordinateScaling,
        z: FieldCoordinateScaling,
    ) -> Self {
        Self { x, y, z }
    }

    /// All three axes empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Size a grid over `bounds` using `settings`.
    pub fn from_bounds(bounds: &Bounds3, settings: &GridSettings) -> Result<Self> {
        settings.validate()?;
        if !bounds.is_valid() {
            return Err(FieldError::InvalidBounds(format!("{:?}", bounds.to_array())));
        }

        let size = bounds.size();
        if let Some(axis) = Axis::ALL.into_iter().find(|a| size[a.index()] <= 0.0) {
            return Err(FieldError::InvalidBounds(format!(
                "zero extent along {axis:?}: {:?}",
                bounds.to_array()
            )));
        }

        let info = Self {
            x: settings.build_axis(bounds.min.x, size.x)?,
            y: settings.build_axis(bounds.min.y, size.y)?,
            z: settings.build_axis(bounds.min.z, size.z)?,
        };

        debug!(
            nx = info.x.index_count(),
            ny = info.y.index_count(),
            nz = info.z.index_count(),
            policy = ?settings.policy,
            precision = settings.precision,
            "nail grid sized"
        );
        Ok(info)
    }

    /// Transformation of one axis.
    pub fn axis(&self, axis: Axis) -> &FieldCoordinateScaling {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// Nearest grid indices of a world point.
    pub fn world_to_index(&self, p: &Point3) -> [i32; 3] {
        [
            self.x.world_to_index(p.x),
            self.y.world_to_index(p.y),
            self.z.world_to_index(p.z),
        ]
    }

    /// Grid indices of a world point, rounded down on every axis.
    pub fn world_to_index_floor(&self, p: &Point3) -> [i32; 3] {
        [
            self.x.world_to_index_floor(p.x),
            self.y.world_to_index_floor(p.y),
            self.z.world_to_index_floor(p.z),
        ]
    }

    /// World position of a grid point.
    pub fn index_to_world(&self, index: [i32; 3]) -> Point3 {
        Point3::new(
            self.x.index_to_world(index[0]),
            self.y.index_to_world(index[1]),
            self.z.index_to_world(index[2]),
        )
    }

    /// Check that each component lies in the range of its axis.
    pub fn index_in_range(&self, index: [i32; 3]) -> bool {
        Axis::ALL
            .iter()
            .all(|&a| self.axis(a).index_in_range(index[a.index()]))
    }

    /// Total number of grid points, or `None` if it does not fit into a `u64`.
    pub fn nail_count(&self) -> Option<u64> {
        Axis::ALL.iter().try_fold(1u64, |acc, &a| {
            acc.checked_mul(self.axis(a).index_count().max(0) as u64)
        })
    }

    /// World box spanned by the first and last nails of each axis.
    pub fn world_bounds(&self) -> Bounds3 {
        Bounds3::new(
            Point3::new(self.x.origin(), self.y.origin(), self.z.origin()),
            Point3::new(self.x.world_end(), self.y.world_end(), self.z.world_end()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SizingPolicy;

    fn block() -> Bounds3 {
        Bounds3::from_array([0.0, -5.0, 2.0, 10.0, 5.0, 4.0])
    }

    #[test]
    fn test_from_bounds_exact_scaling() {
        let settings = GridSettings::new(0.5, SizingPolicy::ExactScaling);
        let info = TransformationInfo::from_bounds(&block(), &settings).unwrap();
        assert_eq!(info.x.index_count(), 21);
        assert_eq!(info.y.index_count(), 21);
        assert_eq!(info.z.index_count(), 5);
        assert_eq!(info.y.origin(), -5.0);
        assert_eq!(info.nail_count(), Some(21 * 21 * 5));
        assert_eq!(info.world_bounds(), block());
    }

    #[test]
    fn test_from_bounds_snapped_covers_box() {
        let settings = GridSettings::new(0.5, SizingPolicy::SnapToBorder);
        let info = TransformationInfo::from_bounds(&block(), &settings).unwrap();
        let bounds = block();
        for axis in Axis::ALL {
            let s = info.axis(axis);
            let i = axis.index();
            assert!(s.origin() <= bounds.min[i]);
            assert!(s.world_end() >= bounds.max[i]);
            assert!(s.index_to_world(1) >= bounds.min[i]);
            assert!(s.index_to_world(s.index_count() - 2) < bounds.max[i]);
        }
    }

    #[test]
    fn test_from_bounds_rejects_bad_input() {
        let settings = GridSettings::default();
        let inverted = Bounds3::from_array([1.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
        assert!(matches!(
            TransformationInfo::from_bounds(&inverted, &settings),
            Err(FieldError::InvalidBounds(_))
        ));

        let bad = GridSettings::new(0.0, SizingPolicy::ExactScaling);
        assert!(matches!(
            TransformationInfo::from_bounds(&block(), &bad),
            Err(FieldError::InvalidSettings(_))
        ));

        for policy in [
            SizingPolicy::ExactSizeWorld,
            SizingPolicy::ExactScaling,
            SizingPolicy::SnapToBorder,
        ] {
            let flat = Bounds3::from_array([0.0, 0.0, 0.0, 10.0, 10.0, 0.0]);
            let err = TransformationInfo::from_bounds(&flat, &GridSettings::new(0.5, policy))
                .unwrap_err();
            assert!(matches!(err, FieldError::InvalidBounds(_)));
            assert!(err.to_string().contains("Z"), "{err}");
        }

        let huge = Bounds3::from_array([0.0, 0.0, 0.0, 1.0e6, 1.0, 1.0]);
        let fine = GridSettings::new(1.0e-4, SizingPolicy::ExactScaling);
        assert!(matches!(
            TransformationInfo::from_bounds(&huge, &fine),
            Err(FieldError::TooManyNails { .. })
        ));
    }

    #[test]
    fn test_nail_count_beyond_u64() {
        let cube = Bounds3::from_array([0.0, 0.0, 0.0, 1000.0, 1000.0, 1000.0]);
        let settings = GridSettings::new(1.0e-4, SizingPolicy::ExactScaling);
        let info = TransformationInfo::from_bounds(&cube, &settings).unwrap();
        for axis in Axis::ALL {
            assert_eq!(info.axis(axis).index_count(), 10_000_001);
        }
        assert_eq!(info.nail_count(), None);
    }

    #[test]
    fn test_point_conversion() {
        let settings = GridSettings::new(0.5, SizingPolicy::ExactScaling);
        let info = TransformationInfo::from_bounds(&block(), &settings).unwrap();

        let index = info.world_to_index(&Point3::new(2.3, 0.1, 2.9));
        assert_eq!(index, [5, 10, 2]);
        assert_eq!(info.world_to_index_floor(&Point3::new(2.3, 0.1, 2.9)), [4, 10, 1]);
        assert_eq!(info.index_to_world([4, 10, 2]), Point3::new(2.0, 0.0, 3.0));
        assert!(info.index_in_range(index));
        assert!(!info.index_in_range([21, 0, 0]));
        assert!(!info.index_in_range([0, -1, 0]));
    }

    #[test]
    fn test_empty() {
        let info = TransformationInfo::empty();
        assert_eq!(info.nail_count(), Some(0));
        assert!(Axis::ALL.iter().all(|&a| info.axis(a).is_empty()));
        assert!(!info.index_in_range([0, 0, 0]));
    }
}
