use crate::error::GeometryError;
use crate::math::{Point, Real, Vector, DIM};

/// Resolution, cell size and placement of the solver grid.
///
/// The `nx * ny * nz` interior cells have 1-based indices `i ∈ [1, nx]`, `j ∈ [1, ny]` and
/// `k ∈ [1, nz]`. Arrays held by the solver carry one additional ghost cell on every side,
/// see [`GridGeometry::ghost_dims`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GridGeometry {
    num_cells: [usize; 3],
    cell_size: Vector<Real>,
    origin: Point<Real>,
}

impl GridGeometry {
    pub fn new(
        num_cells: [usize; 3],
        cell_size: Vector<Real>,
        origin: Point<Real>,
    ) -> Result<Self, GeometryError> {
        if num_cells.iter().any(|n| *n == 0) {
            return Err(GeometryError::InvalidResolution {
                nx: num_cells[0],
                ny: num_cells[1],
                nz: num_cells[2],
            });
        }

        if cell_size.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(GeometryError::InvalidSpacing {
                dx: cell_size.x as f64,
                dy: cell_size.y as f64,
                dz: cell_size.z as f64,
            });
        }

        Ok(Self {
            num_cells,
            cell_size,
            origin,
        })
    }

    /// A grid of `num_cells` covering the box of dimensions `size` starting at `origin`.
    pub fn from_extent(
        num_cells: [usize; 3],
        origin: Point<Real>,
        size: Vector<Real>,
    ) -> Result<Self, GeometryError> {
        let mut cell_size = size;
        for a in 0..DIM {
            cell_size[a] /= num_cells[a] as Real;
        }

        Self::new(num_cells, cell_size, origin)
    }

    #[inline(always)]
    pub fn nx(&self) -> usize {
        self.num_cells[0]
    }

    #[inline(always)]
    pub fn ny(&self) -> usize {
        self.num_cells[1]
    }

    #[inline(always)]
    pub fn nz(&self) -> usize {
        self.num_cells[2]
    }

    pub fn num_cells(&self) -> [usize; 3] {
        self.num_cells
    }

    pub fn num_interior_cells(&self) -> usize {
        self.num_cells.iter().product()
    }

    /// The dimensions `(nx + 2, ny + 2, nz + 2)` of arrays including the ghost layer.
    pub fn ghost_dims(&self) -> [usize; 3] {
        [
            self.num_cells[0] + 2,
            self.num_cells[1] + 2,
            self.num_cells[2] + 2,
        ]
    }

    pub fn cell_size(&self) -> Vector<Real> {
        self.cell_size
    }

    pub fn origin(&self) -> Point<Real> {
        self.origin
    }

    /// The extent of the domain (without the ghost layer).
    pub fn size(&self) -> Vector<Real> {
        Vector::new(
            self.num_cells[0] as Real * self.cell_size.x,
            self.num_cells[1] as Real * self.cell_size.y,
            self.num_cells[2] as Real * self.cell_size.z,
        )
    }

    pub fn max_corner(&self) -> Point<Real> {
        self.origin + self.size()
    }

    /// Is `point` inside of the closed domain box?
    pub fn contains(&self, point: &Point<Real>) -> bool {
        let max = self.max_corner();
        (0..DIM).all(|a| point[a] >= self.origin[a] && point[a] <= max[a])
    }

    /// The 1-based index of the interior cell containing `point`.
    ///
    /// Points on the upper boundary are attributed to the last cell.
    pub fn cell_containing(&self, point: &Point<Real>) -> Option<[usize; 3]> {
        if !self.contains(point) {
            return None;
        }

        let mut ijk = [0; 3];
        for a in 0..DIM {
            let rel = (point[a] - self.origin[a]) / self.cell_size[a];
            ijk[a] = (rel.floor() as usize).min(self.num_cells[a] - 1) + 1;
        }

        Some(ijk)
    }

    /// The world-space center of the ghost-extended cell `(i, j, k)`.
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> Point<Real> {
        let ijk = [i, j, k];
        let mut center = self.origin;
        for a in 0..DIM {
            center[a] += (ijk[a] as Real - 0.5) * self.cell_size[a];
        }
        center
    }
}

#[cfg(test)]
mod tests {
    use super::GridGeometry;
    use crate::math::{Point, Vector};
    use approx::assert_relative_eq;

    fn unit_grid() -> GridGeometry {
        GridGeometry::from_extent([4, 2, 2], Point::origin(), Vector::new(2.0, 1.0, 1.0)).unwrap()
    }

    #[test]
    fn invalid_resolutions_are_rejected() {
        assert!(GridGeometry::new([0, 3, 3], Vector::repeat(1.0), Point::origin()).is_err());
        assert!(GridGeometry::new([3, 3, 3], Vector::new(1.0, 0.0, 1.0), Point::origin()).is_err());
        assert!(GridGeometry::new([3, 3, 3], Vector::new(1.0, -1.0, 1.0), Point::origin()).is_err());
    }

    #[test]
    fn extent_and_cell_size_agree() {
        let grid = unit_grid();
        assert_relative_eq!(grid.cell_size(), Vector::repeat(0.5));
        assert_relative_eq!(grid.max_corner(), Point::new(2.0, 1.0, 1.0));
        assert_eq!(grid.ghost_dims(), [6, 4, 4]);
        assert_eq!(grid.num_interior_cells(), 16);
    }

    #[test]
    fn cells_are_one_based() {
        let grid = unit_grid();
        assert_eq!(grid.cell_containing(&Point::new(0.1, 0.1, 0.1)), Some([1, 1, 1]));
        assert_eq!(grid.cell_containing(&Point::new(2.0, 1.0, 1.0)), Some([4, 2, 2]));
        assert_eq!(grid.cell_containing(&Point::new(2.1, 0.5, 0.5)), None);
        assert_relative_eq!(grid.cell_center(1, 1, 1), Point::new(0.25, 0.25, 0.25));
        assert_relative_eq!(grid.cell_center(0, 0, 0), Point::new(-0.25, -0.25, -0.25));
    }
}
