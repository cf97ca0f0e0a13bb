use crate::error::RasterError;
use crate::flags::{BoundaryNeighbors, CellModifiers, Flag};
use crate::geometry::{Face, GeometryRaster, Grid3, GridGeometry};
use crate::math::{Point, Real};
use crate::scenario::Scenario;
use std::path::Path;

/// The classification of every cell of the ghost-extended domain.
///
/// The field has dimensions `(nx + 2, ny + 2, nz + 2)`; interior cells sit at
/// `i ∈ [1, nx]`, `j ∈ [1, ny]`, `k ∈ [1, nz]`. It is built once during setup and never
/// modified afterwards.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FlagField {
    geometry: GridGeometry,
    flags: Grid3<Flag>,
}

impl FlagField {
    /// Marks every interior cell as fluid and every ghost cell as no-slip.
    ///
    /// The thermal modifiers of the scenario walls are applied to the ghost layer.
    pub fn no_obstacles(scenario: Scenario, geometry: &GridGeometry) -> Self {
        let t0 = instant::now();
        let num_cells = geometry.num_cells();

        let field = Self::with_cell_types(geometry, |ijk| {
            if is_interior(ijk, num_cells) {
                Flag::fluid()
            } else {
                let modifiers = ghost_faces(ijk, num_cells)
                    .map(|face| scenario.wall_modifiers(face))
                    .fold(CellModifiers::NONE, |acc, m| acc | m);
                Flag::no_slip().with_modifiers(modifiers)
            }
        });

        info!(
            "Flag field initialization ({}, no obstacles): {}ms",
            scenario,
            instant::now() - t0
        );
        field
    }

    /// Builds the flags from a cross-section raster extruded along `z`.
    ///
    /// The raster is resampled to `nx x ny` if its resolution differs. The ghost layer gets the
    /// wall types of the scenario.
    pub fn from_raster(
        scenario: Scenario,
        geometry: &GridGeometry,
        raster: &GeometryRaster,
    ) -> Result<Self, RasterError> {
        let t0 = instant::now();
        let num_cells = geometry.num_cells();
        let (nx, ny) = (num_cells[0], num_cells[1]);

        // Validate the whole input, not only the cells that survive resampling.
        raster.markers()?;

        let resampled = if raster.width() != nx || raster.height() != ny {
            debug!(
                "Resampling the {}x{} geometry raster to {}x{}.",
                raster.width(),
                raster.height(),
                nx,
                ny
            );
            raster.resampled(nx, ny)?
        } else {
            raster.clone()
        };

        let cross_section: Vec<Flag> = resampled
            .markers()?
            .into_iter()
            .map(Flag::from_marker)
            .collect();

        let field = Self::with_cell_types(geometry, |ijk| {
            if is_interior(ijk, num_cells) {
                cross_section[(ijk[1] - 1) * nx + (ijk[0] - 1)]
            } else {
                scenario.wall_flag(ghost_faces(ijk, num_cells))
            }
        });

        info!(
            "Flag field initialization ({}, {} obstacle cells): {}ms",
            scenario,
            field.num_obstacle_cells(),
            instant::now() - t0
        );
        Ok(field)
    }

    /// Loads a PGM geometry raster and builds the flags from it.
    pub fn from_geometry_file(
        scenario: Scenario,
        geometry: &GridGeometry,
        path: impl AsRef<Path>,
    ) -> Result<Self, RasterError> {
        let raster = GeometryRaster::load_pgm(path)?;
        Self::from_raster(scenario, geometry, &raster)
    }

    /// Assigns the cell types first, then derives the boundary neighbors of every cell from
    /// the finished types.
    fn with_cell_types(
        geometry: &GridGeometry,
        cell_flag: impl Fn([usize; 3]) -> Flag + Sync,
    ) -> Self {
        let types = Grid3::from_par_fn(geometry.ghost_dims(), cell_flag);
        let flags = Grid3::from_par_fn(types.dims(), |ijk| {
            let mut flag = types[(ijk[0], ijk[1], ijk[2])];

            for face in Face::ALL.iter() {
                if let Some(nbh) = types.neighbor(ijk, *face) {
                    flag.neighbors
                        .set(BoundaryNeighbors::across(*face), !nbh.is_fluid());
                }
            }

            flag
        });

        Self {
            geometry: *geometry,
            flags,
        }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn flags(&self) -> &Grid3<Flag> {
        &self.flags
    }

    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<Flag> {
        self.flags.get(i, j, k).copied()
    }

    /// The flag of the interior cell containing `point`, if it is inside of the domain.
    pub fn flag_at(&self, point: &Point<Real>) -> Option<Flag> {
        let [i, j, k] = self.geometry.cell_containing(point)?;
        self.get(i, j, k)
    }

    /// The packed flag words in the solver layout, ghost layer included.
    pub fn packed(&self) -> Vec<u32> {
        self.flags.iter().map(|flag| flag.bits()).collect()
    }

    /// `1` for every fluid interior cell and `0` otherwise, `k` being the fastest index.
    pub fn fluid_mask(&self) -> Vec<u8> {
        let [nx, ny, nz] = self.geometry.num_cells();
        let mut mask = Vec::with_capacity(nx * ny * nz);

        for i in 1..=nx {
            for j in 1..=ny {
                for k in 1..=nz {
                    mask.push(self.flags[(i, j, k)].is_fluid() as u8);
                }
            }
        }

        mask
    }

    pub fn num_fluid_cells(&self) -> usize {
        self.flags.iter().filter(|flag| flag.is_fluid()).count()
    }

    /// The number of non-fluid interior cells.
    pub fn num_obstacle_cells(&self) -> usize {
        self.geometry.num_interior_cells() - self.num_fluid_cells()
    }
}

fn is_interior(ijk: [usize; 3], num_cells: [usize; 3]) -> bool {
    (0..3).all(|a| ijk[a] >= 1 && ijk[a] <= num_cells[a])
}

fn ghost_faces(ijk: [usize; 3], num_cells: [usize; 3]) -> impl Iterator<Item = Face> {
    Face::ALL
        .iter()
        .copied()
        .filter(move |face| face.contains_ghost_cell(ijk, num_cells))
}
