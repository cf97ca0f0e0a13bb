//! Cell classification and characteristic line tracing for staggered-grid CFD solvers.
//!
//! The crate provides two things to a finite-difference Navier-Stokes solver:
//!
//! - a [`FlagField`](crate::flags::FlagField) classifying every cell of the ghost-extended
//!   domain (fluid, no-slip, free-slip, outflow, inflow, plus boundary neighbors and thermal
//!   and coupling modifiers), built from a geometry raster or for obstacle-free domains;
//! - particle tracers integrating massless particles through the staggered velocity field,
//!   producing streamlines, pathlines and streaklines.

pub extern crate nalgebra as na;

#[macro_use]
extern crate log;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

pub mod prelude {
    pub use crate::error::*;
    pub use crate::flags::*;
    pub use crate::geometry::*;
    pub use crate::math::*;
    pub use crate::scenario::*;
    pub use crate::tracing::*;
}

pub mod math {
    use na::{Point3, Vector3, U3};

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub type Real = f64;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub type Real = f32;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The dimension of the ambient space.
    pub type Dim = U3;

    /// The point type.
    pub type Point<N> = Point3<N>;

    /// The vector type.
    pub type Vector<N> = Vector3<N>;
}

pub mod error;
pub mod flags;
pub mod geometry;
pub mod scenario;
pub mod tracing;
pub mod utils;
