use crate::error::GeometryError;
use crate::geometry::{Grid3, GridGeometry};
use crate::math::{Point, Real, Vector, DIM};

/// Where the samples of a field sit inside of their cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Staggering {
    /// On the right face of the cell (`U`).
    FaceX,
    /// On the upper face of the cell (`V`).
    FaceY,
    /// On the front face of the cell (`W`).
    FaceZ,
    /// At the cell center (pressure, temperature).
    CellCenter,
}

impl Staggering {
    /// The array dimensions of a field with this staggering, ghost layer included.
    pub fn dims(self, geometry: &GridGeometry) -> [usize; 3] {
        let mut dims = geometry.ghost_dims();
        if let Some(axis) = self.axis() {
            dims[axis] -= 1;
        }
        dims
    }

    /// The offset converting cell-relative coordinates to fractional array indices.
    ///
    /// The sample `(i, j, k)` of a face-staggered field sits on the upper face of the
    /// ghost-extended cell `(i, j, k)` along its own axis, and at the cell center along the
    /// two others.
    pub fn index_offset(self) -> Vector<Real> {
        let mut offset = Vector::repeat(0.5);
        if let Some(axis) = self.axis() {
            offset[axis] = 0.0;
        }
        offset
    }

    fn axis(self) -> Option<usize> {
        match self {
            Staggering::FaceX => Some(0),
            Staggering::FaceY => Some(1),
            Staggering::FaceZ => Some(2),
            Staggering::CellCenter => None,
        }
    }
}

/// A read-only view of the solver's fields at one instant.
#[derive(Copy, Clone, Debug)]
pub struct FlowSnapshot<'a> {
    pub u: &'a Grid3<Real>,
    pub v: &'a Grid3<Real>,
    pub w: &'a Grid3<Real>,
    pub pressure: Option<&'a Grid3<Real>>,
    pub temperature: Option<&'a Grid3<Real>>,
}

impl<'a> FlowSnapshot<'a> {
    pub fn velocity(u: &'a Grid3<Real>, v: &'a Grid3<Real>, w: &'a Grid3<Real>) -> Self {
        Self {
            u,
            v,
            w,
            pressure: None,
            temperature: None,
        }
    }

    pub fn with_pressure(mut self, pressure: &'a Grid3<Real>) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn with_temperature(mut self, temperature: &'a Grid3<Real>) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Evaluates staggered fields at arbitrary world-space points by trilinear interpolation.
///
/// Points outside of the sampled range are clamped to the closest sample index: querying
/// on or beyond the domain boundary yields the boundary value.
#[derive(Copy, Clone, Debug)]
pub struct StaggeredFieldSampler<'a> {
    geometry: GridGeometry,
    inv_cell_size: Vector<Real>,
    snapshot: FlowSnapshot<'a>,
}

impl<'a> StaggeredFieldSampler<'a> {
    pub fn new(
        geometry: &GridGeometry,
        snapshot: FlowSnapshot<'a>,
    ) -> Result<Self, GeometryError> {
        check_dims("U", snapshot.u, Staggering::FaceX, geometry)?;
        check_dims("V", snapshot.v, Staggering::FaceY, geometry)?;
        check_dims("W", snapshot.w, Staggering::FaceZ, geometry)?;

        if let Some(pressure) = snapshot.pressure {
            check_dims("P", pressure, Staggering::CellCenter, geometry)?;
        }
        if let Some(temperature) = snapshot.temperature {
            check_dims("T", temperature, Staggering::CellCenter, geometry)?;
        }

        Ok(Self {
            geometry: *geometry,
            inv_cell_size: geometry.cell_size().map(|d| 1.0 / d),
            snapshot,
        })
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn snapshot(&self) -> &FlowSnapshot<'a> {
        &self.snapshot
    }

    pub fn velocity_at(&self, point: &Point<Real>) -> Vector<Real> {
        Vector::new(
            self.interpolate(self.snapshot.u, Staggering::FaceX, point),
            self.interpolate(self.snapshot.v, Staggering::FaceY, point),
            self.interpolate(self.snapshot.w, Staggering::FaceZ, point),
        )
    }

    pub fn velocity_magnitude_at(&self, point: &Point<Real>) -> Real {
        self.velocity_at(point).norm()
    }

    pub fn pressure_at(&self, point: &Point<Real>) -> Option<Real> {
        self.snapshot
            .pressure
            .map(|p| self.interpolate(p, Staggering::CellCenter, point))
    }

    pub fn temperature_at(&self, point: &Point<Real>) -> Option<Real> {
        self.snapshot
            .temperature
            .map(|t| self.interpolate(t, Staggering::CellCenter, point))
    }

    /// Trilinear interpolation of `values` (laid out with `staggering`) at `point`.
    pub fn interpolate(
        &self,
        values: &Grid3<Real>,
        staggering: Staggering,
        point: &Point<Real>,
    ) -> Real {
        let dims = values.dims();
        let rel = (point - self.geometry.origin()).component_mul(&self.inv_cell_size)
            + staggering.index_offset();

        let mut base = [0usize; DIM];
        let mut t = [0.0 as Real; DIM];

        for a in 0..DIM {
            if dims[a] < 2 {
                continue;
            }

            // NaN coordinates end up on the lower boundary.
            let f = rel[a].max(0.0).min((dims[a] - 1) as Real);
            base[a] = (f.floor() as usize).min(dims[a] - 2);
            t[a] = f - base[a] as Real;
        }

        let mut result = 0.0;

        for corner in 0..8 {
            let shift = [(corner >> 2) & 1, (corner >> 1) & 1, corner & 1];
            let mut weight = 1.0;

            for a in 0..DIM {
                weight *= if shift[a] == 1 { t[a] } else { 1.0 - t[a] };
            }

            if weight != 0.0 {
                result += weight
                    * values[(base[0] + shift[0], base[1] + shift[1], base[2] + shift[2])];
            }
        }

        result
    }
}

fn check_dims(
    name: &'static str,
    values: &Grid3<Real>,
    staggering: Staggering,
    geometry: &GridGeometry,
) -> Result<(), GeometryError> {
    let expected = staggering.dims(geometry);
    if values.dims() != expected {
        Err(GeometryError::DimensionMismatch {
            name,
            expected,
            found: values.dims(),
        })
    } else {
        Ok(())
    }
}
