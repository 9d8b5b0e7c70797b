//! Grid settings: precision and how each axis is sized.

use dexel_math::SnapTolerance;
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};
use crate::scaling::FieldCoordinateScaling;

/// Which quantity is authoritative when an axis is sized from a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingPolicy {
    /// Cover the span exactly; the spacing adapts.
    ExactSizeWorld,
    /// Keep the spacing exactly; the covered size adapts.
    #[default]
    ExactScaling,
    /// Interior nails inside the span, one extra nail beyond each border.
    SnapToBorder,
}

/// Nail grid parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Requested distance between nails (world units per nail).
    pub precision: f32,
    /// Axis sizing policy.
    pub policy: SizingPolicy,
    /// Tolerances for [`SizingPolicy::SnapToBorder`].
    pub snap: SnapTolerance,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            precision: 0.1,
            policy: SizingPolicy::ExactScaling,
            snap: SnapTolerance::DEFAULT,
        }
    }
}

impl GridSettings {
    /// Settings with the given precision and policy.
    pub fn new(precision: f32, policy: SizingPolicy) -> Self {
        Self {
            precision,
            policy,
            ..Self::default()
        }
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !self.precision.is_finite() || self.precision <= 0.0 {
            return Err(FieldError::InvalidSettings(format!(
                "precision must be positive, got {}",
                self.precision
            )));
        }
        if !self.snap.shrink.is_finite() || self.snap.shrink <= 0.0 {
            return Err(FieldError::InvalidSettings(format!(
                "snap shrink must be positive, got {}",
                self.snap.shrink
            )));
        }
        if !self.snap.step.is_finite() || self.snap.step <= 0.0 {
            return Err(FieldError::InvalidSettings(format!(
                "snap step must be positive, got {}",
                self.snap.step
            )));
        }
        if self.snap.max_tries == 0 {
            return Err(FieldError::InvalidSettings(
                "snap max_tries must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate settings from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: GridSettings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Build one axis covering `[origin, origin + size_world]` with this policy.
    pub fn build_axis(&self, origin: f32, size_world: f32) -> Result<FieldCoordinateScaling> {
        match self.policy {
            SizingPolicy::ExactSizeWorld => {
                FieldCoordinateScaling::with_exact_size_world(origin, size_world, self.precision)
            }
            SizingPolicy::ExactScaling => {
                FieldCoordinateScaling::with_exact_scaling(origin, size_world, self.precision)
            }
            SizingPolicy::SnapToBorder => FieldCoordinateScaling::snap_to_border_with(
                origin,
                size_world,
                self.precision,
                &self.snap,
            ),
        }
    }
}
