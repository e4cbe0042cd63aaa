//! Virtual images of a point source seen through flat, two-sided mirrors.
//!
//! Given a [`Scene`] (a ball, an eye, and a set of finite mirror segments),
//! [`compute_reflections`] builds every reflection of the ball (and of its
//! reflections) that the eye can actually perceive, along with the points
//! where the corresponding light ray bounces on its way from the ball to the eye.
//!
//! The whole set is rebuilt from scratch on each call. A pass borrows the scene
//! immutably, so the scene can't be edited while one is running.

pub use nalgebra;

use nalgebra::{SVector, Unit};

mod builder;
mod config;
pub mod geometry;
mod image;
mod occlusion;
mod path;
mod scene;
mod visibility;

pub use builder::*;
pub use config::*;
pub use image::*;
pub use occlusion::*;
pub use path::*;
pub use scene::*;
pub use visibility::*;

pub type Float = f64;

/// A point, or a displacement, in the plane.
pub type Vector = SVector<Float, 2>;

pub type UnitVector = Unit<Vector>;
