pub use self::face::Face;
pub use self::grid3::Grid3;
pub use self::grid_geometry::GridGeometry;
pub use self::raster::{GeometryMarker, GeometryRaster};
pub use self::resample::nearest_neighbor_resample;

mod face;
mod grid3;
mod grid_geometry;
mod raster;
mod resample;

/// Index offsets of the six face-adjacent neighbors, in the order of [`Face::ALL`].
const FACE_SHIFTS: [[isize; 3]; 6] = [
    [-1, 0, 0],
    [1, 0, 0],
    [0, -1, 0],
    [0, 1, 0],
    [0, 0, -1],
    [0, 0, 1],
];
