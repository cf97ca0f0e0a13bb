//! Error types.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid grid resolution, spacing or array layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid resolution {nx}x{ny}x{nz}: every cell count must be positive")]
    InvalidResolution { nx: usize, ny: usize, nz: usize },

    #[error("invalid cell spacing ({dx}, {dy}, {dz}): every spacing must be finite and positive")]
    InvalidSpacing { dx: f64, dy: f64, dz: f64 },

    #[error("array `{name}` has dimensions {found:?}, expected {expected:?}")]
    DimensionMismatch {
        name: &'static str,
        expected: [usize; 3],
        found: [usize; 3],
    },

    #[error("buffer of length {found} cannot back an array of dimensions {dims:?}")]
    BufferLength { dims: [usize; 3], found: usize },
}

/// Failure to obtain a usable geometry raster.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("couldn't read geometry file \"{path}\": {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed geometry raster: {0}")]
    Malformed(String),

    #[error("geometry raster has an empty resolution {width}x{height}")]
    Empty { width: usize, height: usize },

    #[error("unknown geometry marker {marker} at raster position ({x}, {y})")]
    UnknownMarker { marker: u8, x: usize, y: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("unknown scenario \"{0}\"")]
    UnknownScenario(String),

    #[error("unknown tracer kind \"{0}\"")]
    UnknownTracerKind(String),
}

/// Violation of the tracer seeding/stepping protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TracerError {
    #[error("the particle seeding locations were already set for this trace")]
    AlreadySeeded,

    #[error("the particle seeding locations must be set before tracing")]
    NotSeeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlagError {
    #[error("flag word {0:#06x} doesn't encode exactly one cell type")]
    InvalidCellType(u32),

    #[error("flag word {0:#06x} has bits set outside of the flag layout")]
    UnknownBits(u32),
}
