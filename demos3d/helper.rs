use cfdtrace3d::geometry::{Grid3, GridGeometry};
use cfdtrace3d::math::{Point, Real, Vector};
use cfdtrace3d::scenario::Scenario;
use cfdtrace3d::tracing::{FlowSnapshot, Staggering};
use na::{point, vector};
use std::f32::consts::PI;

/// The default grid of every scenario.
pub fn scenario_geometry(scenario: Scenario) -> anyhow::Result<GridGeometry> {
    let (num_cells, size) = match scenario {
        Scenario::DrivenCavity => ([16, 16, 16], vector![1.0, 1.0, 1.0]),
        Scenario::FlowOverStep => ([40, 10, 4], vector![4.0, 1.0, 0.4]),
        Scenario::KarmanVortexStreet => ([48, 12, 4], vector![4.0, 1.0, 0.4]),
        Scenario::NaturalConvection | Scenario::RayleighBenardConvection => {
            ([24, 12, 6], vector![2.0, 1.0, 0.5])
        }
        Scenario::SingleTower => ([32, 16, 8], vector![4.0, 2.0, 1.0]),
    };

    Ok(GridGeometry::from_extent(num_cells, point![0.0, 0.0, 0.0], size)?)
}

/// Analytic stand-in for the solver output of one time step.
pub struct FlowFields {
    pub u: Grid3<Real>,
    pub v: Grid3<Real>,
    pub w: Grid3<Real>,
    pub pressure: Grid3<Real>,
    pub temperature: Grid3<Real>,
}

impl FlowFields {
    pub fn new(scenario: Scenario, geometry: &GridGeometry, t: Real) -> Self {
        let velocity = |p: Point<Real>| synthetic_velocity(scenario, geometry, &p, t);

        Self {
            u: sample(geometry, Staggering::FaceX, |p| velocity(p).x),
            v: sample(geometry, Staggering::FaceY, |p| velocity(p).y),
            w: sample(geometry, Staggering::FaceZ, |p| velocity(p).z),
            pressure: sample(geometry, Staggering::CellCenter, |p| {
                1.0 - 0.5 * velocity(p).norm_squared()
            }),
            temperature: sample(geometry, Staggering::CellCenter, |p| {
                let rel = relative(geometry, &p);
                match scenario {
                    Scenario::NaturalConvection => 1.0 - rel.x,
                    Scenario::RayleighBenardConvection => 1.0 - rel.y,
                    _ => 0.0,
                }
            }),
        }
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot::velocity(&self.u, &self.v, &self.w)
            .with_pressure(&self.pressure)
            .with_temperature(&self.temperature)
    }
}

// Coordinates of `p` relative to the domain box, in `[0, 1]` inside of it.
fn relative(geometry: &GridGeometry, p: &Point<Real>) -> Vector<Real> {
    (p - geometry.origin()).component_div(&geometry.size())
}

fn synthetic_velocity(
    scenario: Scenario,
    geometry: &GridGeometry,
    p: &Point<Real>,
    t: Real,
) -> Vector<Real> {
    let rel = relative(geometry, p);
    let (x, y) = (rel.x as f32, rel.y as f32);
    let t = t as f32;

    let vel = match scenario {
        // One recirculation cell, slowly pulsating.
        Scenario::DrivenCavity => {
            let s = 1.0 + 0.2 * t.sin();
            vector![
                PI * (PI * x).sin() * (PI * y).cos() * s,
                -PI * (PI * x).cos() * (PI * y).sin() * s,
                0.0
            ]
        }
        // Two counter-rotating rolls.
        Scenario::NaturalConvection | Scenario::RayleighBenardConvection => vector![
            PI * (2.0 * PI * x).sin() * (PI * y).cos(),
            -2.0 * PI * (2.0 * PI * x).cos() * (PI * y).sin(),
            0.0
        ],
        // Main stream with a travelling transverse wave.
        Scenario::FlowOverStep | Scenario::KarmanVortexStreet | Scenario::SingleTower => vector![
            1.0,
            0.2 * (4.0 * PI * x - 3.0 * t).sin() * (PI * y).sin(),
            0.0
        ],
    };

    vel.map(|c| c as Real)
}

fn sample(
    geometry: &GridGeometry,
    staggering: Staggering,
    f: impl Fn(Point<Real>) -> Real,
) -> Grid3<Real> {
    let offset = staggering.index_offset();
    let origin = geometry.origin();
    let cell_size = geometry.cell_size();

    Grid3::from_fn(staggering.dims(geometry), |i, j, k| {
        let ijk = vector![i as Real, j as Real, k as Real];
        f(origin + (ijk - offset).component_mul(&cell_size))
    })
}
