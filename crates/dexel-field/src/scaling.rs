//! Mapping between world coordinates and nail indices along one axis.
//!
//! A nail field samples the stock with parallel rays ("nails") placed on a
//! regular grid. [`FieldCoordinateScaling`] describes that grid along a single
//! axis: how many nails there are, where the first one sits, and how far
//! apart they are.

use std::ops::RangeInclusive;

use dexel_math::SnapTolerance;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FieldError, Result};

/// Transformation between discrete nail indices and world coordinates on one axis.
///
/// Nail `i` sits at `origin + i * scaling`. The first and the last nail lie on
/// the borders of the covered span, so `size_world == scaling * (index_count - 1)`
/// for every instance built through the checked constructors.
///
/// Values are immutable once built. Equality compares all four fields exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldCoordinateScaling {
    index_count: i32,
    scaling: f32,
    size_world: f32,
    origin_world: f32,
}

impl Default for FieldCoordinateScaling {
    fn default() -> Self {
        Self::empty()
    }
}

impl FieldCoordinateScaling {
    /// Placeholder axis with no nails.
    ///
    /// This is a sentinel: it has `index_count == 0` and must not be used for
    /// index conversions. Check [`is_empty`](Self::is_empty) first.
    pub fn empty() -> Self {
        Self {
            index_count: 0,
            scaling: 1.0,
            size_world: 0.0,
            origin_world: 0.0,
        }
    }

    /// Cover exactly `size_world`, with a spacing as close to `scaling` as the
    /// integer nail count allows.
    ///
    /// The stored spacing is `size_world / (index_count - 1)`; the stored size
    /// is `size_world` verbatim.
    pub fn with_exact_size_world(origin: f32, size_world: f32, scaling: f32) -> Result<Self> {
        let index_count = Self::compute_number_of_nails(size_world, scaling)?;
        Ok(Self {
            index_count,
            scaling: size_world / (index_count - 1) as f32,
            size_world,
            origin_world: origin,
        })
    }

    /// Keep `scaling` exactly and derive the size from the nail count.
    ///
    /// The nail count is `floor(size_world / scaling) + 1`, so the resulting size
    /// is `scaling * (index_count - 1)` and lies within one spacing of the
    /// requested one.
    pub fn with_exact_scaling(origin: f32, size_world: f32, scaling: f32) -> Result<Self> {
        let index_count = Self::compute_number_of_nails(size_world, scaling)?;
        Ok(Self::with_exact_scaling_and_count(origin, scaling, index_count))
    }

    /// Take spacing and nail count verbatim; the size is derived.
    ///
    /// `index_count` must not be negative.
    pub fn with_exact_scaling_and_count(origin: f32, scaling: f32, index_count: i32) -> Self {
        debug_assert!(index_count >= 0, "negative nail count {index_count}");
        Self {
            index_count,
            scaling,
            size_world: scaling * index_count.saturating_sub(1) as f32,
            origin_world: origin,
        }
    }

    /// Store all four components as given, without any consistency check.
    ///
    /// The caller guarantees `size_world ≈ scaling * (index_count - 1)`.
    pub fn from_parts_unchecked(
        index_count: i32,
        origin: f32,
        size_world: f32,
        scaling: f32,
    ) -> Self {
        Self {
            index_count,
            scaling,
            size_world,
            origin_world: origin,
        }
    }

    /// Build a grid whose interior nails fit inside `[origin, origin + size_world]`.
    ///
    /// Uses [`SnapTolerance::DEFAULT`]. See [`snap_to_border_with`](Self::snap_to_border_with).
    pub fn snap_to_border(origin: f32, size_world: f32, scaling: f32) -> Result<Self> {
        Self::snap_to_border_with(origin, size_world, scaling, &SnapTolerance::DEFAULT)
    }

    /// Build a grid whose interior nails fit inside `[origin, origin + size_world]`.
    ///
    /// The grid gets one extra nail beyond each border. Nails `1` and
    /// `index_count - 2` lie inside the requested span, nails `0` and
    /// `index_count - 1` lie on or outside it, so sampling the grid never leaves
    /// a gap at the borders after rounding.
    ///
    /// The spacing starts slightly below the exact fit and shrinks by
    /// `tolerance.step` until the last interior nail lands inside the span.
    pub fn snap_to_border_with(
        origin: f32,
        size_world: f32,
        scaling: f32,
        tolerance: &SnapTolerance,
    ) -> Result<Self> {
        let border_count = Self::compute_number_of_nails(size_world, scaling)?;
        let index_count = border_count
            .checked_add(2)
            .ok_or(FieldError::TooManyNails {
                requested: i64::from(border_count) + 2,
                max: i32::MAX,
            })?;

        let far_border = origin + size_world;
        let adjusted_size = size_world - 2.0 * tolerance.shrink;
        // -1 because the outer interior nails sit on the borders
        let mut adjusted_scaling = adjusted_size / (border_count - 1) as f32;

        let snap_error = || FieldError::SnapToBorder {
            origin,
            size: size_world,
            scaling,
        };

        for attempt in 0..tolerance.max_tries {
            let shifted_origin = origin + tolerance.shrink - adjusted_scaling;
            let s =
                Self::with_exact_scaling_and_count(shifted_origin, adjusted_scaling, index_count);

            if s.origin_world > origin || s.world_end() < far_border {
                warn!(origin, size_world, scaling, "nail board does not cover borders");
                return Err(snap_error());
            }

            if s.index_to_world(s.index_count - 2) < far_border {
                return Ok(s);
            }

            debug!(
                attempt,
                scaling = adjusted_scaling,
                "last interior nail outside border, shrinking spacing"
            );
            adjusted_scaling -= tolerance.step;
        }

        warn!(
            origin,
            size_world,
            scaling,
            tries = tolerance.max_tries,
            "unable to snap nail board"
        );
        Err(snap_error())
    }

    /// Number of nails needed to cover `size_world` with spacing `scaling`.
    ///
    /// Returns `floor(size_world / scaling) + 1`, at least 2. A non-positive
    /// (or NaN) spacing yields the minimal grid of 2 nails. Fails when the
    /// count does not fit into an `i32` index.
    pub fn compute_number_of_nails(size_world: f32, scaling: f32) -> Result<i32> {
        // NaN spacing is treated as degenerate too
        if !(scaling > 0.0) {
            return Ok(2);
        }

        let nails = f64::from((size_world / scaling).floor()) + 1.0;
        if nails > f64::from(i32::MAX) {
            warn!(size_world, scaling, nails, "nail count exceeds index range");
            return Err(FieldError::TooManyNails {
                requested: nails as i64,
                max: i32::MAX,
            });
        }

        Ok((nails as i32).max(2))
    }

    /// World coordinate to index, rounding toward negative infinity.
    #[inline]
    pub fn world_to_index_floor(&self, world: f32) -> i32 {
        ((world - self.origin_world) / self.scaling).floor() as i32
    }

    /// World coordinate to index, rounding toward positive infinity.
    #[inline]
    pub fn world_to_index_ceil(&self, world: f32) -> i32 {
        ((world - self.origin_world) / self.scaling).ceil() as i32
    }

    /// World coordinate to the nearest index. Halfway values round up.
    #[inline]
    pub fn world_to_index(&self, world: f32) -> i32 {
        self.world_to_index_floor(world + self.scaling * 0.5)
    }

    /// Index to world coordinate: `origin + index * scaling`.
    #[inline]
    pub fn index_to_world(&self, index: i32) -> f32 {
        self.scaling * index as f32 + self.origin_world
    }

    /// Check if `index` lies in `[0, index_count)`.
    #[inline]
    pub fn index_in_range(&self, index: i32) -> bool {
        index >= 0 && index < self.index_count
    }

    /// Clamp an index into the valid range.
    pub fn clamp_index(&self, index: i32) -> i32 {
        index.clamp(0, self.index_count.saturating_sub(1).max(0))
    }

    /// Indices of the nails whose world coordinate lies in `[min_world, max_world]`.
    ///
    /// Returns `None` if no nail falls inside the interval.
    pub fn index_span(&self, min_world: f32, max_world: f32) -> Option<RangeInclusive<i32>> {
        if self.is_empty() || !(min_world <= max_world) {
            return None;
        }
        let lo = self.world_to_index_ceil(min_world).max(0);
        let hi = self
            .world_to_index_floor(max_world)
            .min(self.index_count.saturating_sub(1));
        (lo <= hi).then_some(lo..=hi)
    }

    /// World coordinates of all nails in index order.
    pub fn nail_positions(&self) -> impl Iterator<Item = f32> {
        let s = *self;
        (0..s.index_count.max(0)).map(move |i| s.index_to_world(i))
    }

    /// True for the [`empty`](Self::empty) sentinel.
    pub fn is_empty(&self) -> bool {
        self.index_count == 0
    }

    /// Size of the span occupied by all nails.
    pub fn world_size(&self) -> f32 {
        self.size_world
    }

    /// World coordinate of the far border (`origin + world_size`).
    pub fn world_end(&self) -> f32 {
        self.origin_world + self.size_world
    }

    /// Number of nails.
    pub fn index_count(&self) -> i32 {
        self.index_count
    }

    /// Distance between two neighbouring nails.
    #[inline]
    pub fn scaling(&self) -> f32 {
        self.scaling
    }

    /// Spacing recomputed as `world_size / (index_count - 1)` in double precision.
    #[inline]
    pub fn scaling_f64(&self) -> f64 {
        f64::from(self.size_world) / (f64::from(self.index_count) - 1.0)
    }

    /// Reciprocal spacing `(index_count - 1) / world_size` in double precision.
    #[inline]
    pub fn scaling_reciprocal_f64(&self) -> f64 {
        (f64::from(self.index_count) - 1.0) / f64::from(self.size_world)
    }

    /// World coordinate of the first nail, the origin of the local system.
    #[inline]
    pub fn origin(&self) -> f32 {
        self.origin_world
    }
}
