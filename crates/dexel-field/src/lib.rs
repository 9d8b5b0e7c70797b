#![warn(missing_docs)]

//! Nail field coordinate scaling for dexel stock simulation.
//!
//! A dexel stock samples material with parallel rays ("nails") on a regular
//! grid. This crate sizes that grid from a stock box and a precision, and maps
//! between continuous world coordinates and discrete nail indices.
//!
//! # Features
//!
//! - Per-axis world/index conversion with floor, ceil and nearest rounding
//! - Nail count sizing guarded against index overflow
//! - Border snapping so interior nails never fall short of the stock box
//! - Three-axis transformation info built from bounds and [`GridSettings`]
//!
//! # Example
//!
//! ```
//! use dexel_field::FieldCoordinateScaling;
//!
//! let axis = FieldCoordinateScaling::with_exact_scaling(0.0, 10.0, 0.5)?;
//! assert_eq!(axis.index_count(), 21);
//! assert_eq!(axis.world_to_index(2.6), 5);
//! assert_eq!(axis.index_to_world(5), 2.5);
//! # Ok::<(), dexel_field::FieldError>(())
//! ```

pub mod error;
pub mod scaling;
pub mod settings;
pub mod transform;

pub use dexel_math::{Axis, Bounds3, Point3, SnapTolerance};
pub use error::{FieldError, Result};
pub use scaling::FieldCoordinateScaling;
pub use settings::{GridSettings, SizingPolicy};
pub use transform::TransformationInfo;
