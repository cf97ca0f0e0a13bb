use crate::flags::FlagField;
use crate::geometry::GridGeometry;
use crate::math::{Point, Real};
use crate::scenario::Scenario;

/// How the seeds of a scenario are distributed over the domain.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SeedingRule {
    /// Evenly spaced along `y`, half a cell inside of the inflow face, at mid-depth.
    InflowLine,
    /// A regular 3D lattice over the whole domain.
    InteriorLattice,
    /// A regular 2D lattice over the `z` mid-plane.
    CentralPlane,
}

impl SeedingRule {
    /// Exactly `num_particles` seeds, all inside of the domain of `geometry`.
    pub fn seeding_locations(
        self,
        num_particles: usize,
        geometry: &GridGeometry,
    ) -> Vec<Point<Real>> {
        if num_particles == 0 {
            return Vec::new();
        }

        let origin = geometry.origin();
        let size = geometry.size();
        let mid_depth = origin.z + size.z * 0.5;

        match self {
            SeedingRule::InflowLine => {
                let x = origin.x + geometry.cell_size().x * 0.5;
                (0..num_particles)
                    .map(|n| {
                        let y = origin.y + (n as Real + 0.5) / num_particles as Real * size.y;
                        Point::new(x, y, mid_depth)
                    })
                    .collect()
            }
            SeedingRule::InteriorLattice => {
                let m = lattice_size(num_particles, 3);
                let mut seeds = Vec::with_capacity(m * m * m);
                for k in 0..m {
                    for j in 0..m {
                        for i in 0..m {
                            seeds.push(Point::new(
                                origin.x + lattice_coord(i, m) * size.x,
                                origin.y + lattice_coord(j, m) * size.y,
                                origin.z + lattice_coord(k, m) * size.z,
                            ));
                        }
                    }
                }
                seeds.truncate(num_particles);
                seeds
            }
            SeedingRule::CentralPlane => {
                let m = lattice_size(num_particles, 2);
                let mut seeds = Vec::with_capacity(m * m);
                for j in 0..m {
                    for i in 0..m {
                        seeds.push(Point::new(
                            origin.x + lattice_coord(i, m) * size.x,
                            origin.y + lattice_coord(j, m) * size.y,
                            mid_depth,
                        ));
                    }
                }
                seeds.truncate(num_particles);
                seeds
            }
        }
    }
}

// The smallest `m` with `m^dim >= n`.
fn lattice_size(n: usize, dim: u32) -> usize {
    let mut m = (n as f64).powf(1.0 / dim as f64).ceil() as usize;
    while m > 1 && (m - 1).pow(dim) >= n {
        m -= 1;
    }
    while m.pow(dim) < n {
        m += 1;
    }
    m
}

#[inline(always)]
fn lattice_coord(i: usize, m: usize) -> Real {
    (i as Real + 0.5) / m as Real
}

/// The seeds of `scenario`, following its [`Scenario::seeding_rule`].
pub fn seeding_locations_for_scenario(
    scenario: Scenario,
    num_particles: usize,
    geometry: &GridGeometry,
) -> Vec<Point<Real>> {
    scenario
        .seeding_rule()
        .seeding_locations(num_particles, geometry)
}

/// The seeds of `scenario` that lie in fluid cells of `flags`.
///
/// Seeds inside of obstacles are dropped, so this may return less than `num_particles` seeds.
pub fn seeding_locations_in_fluid(
    scenario: Scenario,
    num_particles: usize,
    flags: &FlagField,
) -> Vec<Point<Real>> {
    let seeds = seeding_locations_for_scenario(scenario, num_particles, flags.geometry());
    let fluid_seeds: Vec<_> = seeds
        .iter()
        .copied()
        .filter(|p| flags.flag_at(p).map(|f| f.is_fluid()).unwrap_or(false))
        .collect();

    if fluid_seeds.len() < seeds.len() {
        warn!(
            "Dropped {} of {} seeds located inside of obstacles.",
            seeds.len() - fluid_seeds.len(),
            seeds.len()
        );
    }

    fluid_seeds
}

#[cfg(test)]
mod tests {
    use super::{
        lattice_size, seeding_locations_for_scenario, seeding_locations_in_fluid, SeedingRule,
    };
    use crate::flags::FlagField;
    use crate::geometry::{GeometryMarker, GeometryRaster, GridGeometry};
    use crate::math::{Point, Real, Vector};
    use crate::scenario::Scenario;
    use approx::assert_relative_eq;

    fn geometry() -> GridGeometry {
        GridGeometry::from_extent(
            [10, 4, 6],
            Point::new(-1.0, 0.0, 2.0),
            Vector::new(5.0, 1.0, 3.0),
        )
        .unwrap()
    }

    #[test]
    fn lattice_sizes() {
        assert_eq!(lattice_size(1, 3), 1);
        assert_eq!(lattice_size(8, 3), 2);
        assert_eq!(lattice_size(9, 3), 3);
        assert_eq!(lattice_size(27, 3), 3);
        assert_eq!(lattice_size(64, 3), 4);
        assert_eq!(lattice_size(16, 2), 4);
        assert_eq!(lattice_size(17, 2), 5);
    }

    #[test]
    fn exact_number_of_seeds_inside_the_domain() {
        let geometry = geometry();
        let rules = [
            SeedingRule::InflowLine,
            SeedingRule::InteriorLattice,
            SeedingRule::CentralPlane,
        ];

        for rule in rules.iter() {
            assert!(rule.seeding_locations(0, &geometry).is_empty());

            for n in [1, 2, 7, 8, 30, 100, 1000].iter() {
                let seeds = rule.seeding_locations(*n, &geometry);
                assert_eq!(seeds.len(), *n);
                assert!(seeds.iter().all(|p| geometry.contains(p)));
            }
        }
    }

    #[test]
    fn inflow_line() {
        let geometry = geometry();
        let seeds = SeedingRule::InflowLine.seeding_locations(4, &geometry);
        for (n, p) in seeds.iter().enumerate() {
            assert_relative_eq!(p.x, -0.75);
            assert_relative_eq!(p.y, 0.125 + 0.25 * n as Real);
            assert_relative_eq!(p.z, 3.5);
        }
    }

    #[test]
    fn lattices_are_x_fastest() {
        let geometry = geometry();
        let seeds = SeedingRule::InteriorLattice.seeding_locations(8, &geometry);
        assert_relative_eq!(seeds[0], Point::new(0.25, 0.25, 2.75));
        assert_relative_eq!(seeds[1], Point::new(2.75, 0.25, 2.75));
        assert_relative_eq!(seeds[2], Point::new(0.25, 0.75, 2.75));
        assert_relative_eq!(seeds[7], Point::new(2.75, 0.75, 4.25));

        let seeds = SeedingRule::CentralPlane.seeding_locations(3, &geometry);
        assert_relative_eq!(seeds[0], Point::new(0.25, 0.25, 3.5));
        assert_relative_eq!(seeds[1], Point::new(2.75, 0.25, 3.5));
        assert_relative_eq!(seeds[2], Point::new(0.25, 0.75, 3.5));
    }

    #[test]
    fn scenarios_follow_their_rule() {
        let geometry = geometry();
        for scenario in Scenario::ALL.iter() {
            assert_eq!(
                seeding_locations_for_scenario(*scenario, 12, &geometry),
                scenario.seeding_rule().seeding_locations(12, &geometry)
            );
        }
    }

    #[test]
    fn seeds_in_obstacles_are_dropped() {
        let geometry =
            GridGeometry::from_extent([4, 4, 2], Point::origin(), Vector::new(4.0, 4.0, 2.0))
                .unwrap();
        // The lower half of the domain is solid.
        let raster = GeometryRaster::from_fn(4, 4, |_, y| {
            if y < 2 {
                GeometryMarker::NoSlip
            } else {
                GeometryMarker::Fluid
            }
        })
        .unwrap();
        let flags = FlagField::from_raster(Scenario::FlowOverStep, &geometry, &raster).unwrap();

        let seeds = seeding_locations_in_fluid(Scenario::FlowOverStep, 8, &flags);
        assert_eq!(seeds.len(), 4);
        assert!(seeds.iter().all(|p| p.y > 2.0));
    }
}
