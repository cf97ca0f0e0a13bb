use super::{Particle, StaggeredFieldSampler, Termination, TracerParameters, Trajectories, Trajectory};
use crate::math::{Point, Real};
use rayon::prelude::*;

/// Traces streamlines through one frozen velocity snapshot.
#[derive(Copy, Clone, Debug, Default)]
pub struct SteadyFlowTracer {
    pub params: TracerParameters,
}

impl SteadyFlowTracer {
    pub fn new(params: TracerParameters) -> Self {
        Self { params }
    }

    /// One streamline per seed, in the order of `seeds`, integrated with the step
    /// `params.streamline_dt`.
    pub fn trace(&self, seeds: &[Point<Real>], sampler: &StaggeredFieldSampler) -> Trajectories {
        let t0 = instant::now();
        let trajectories: Trajectories = seeds
            .par_iter()
            .map(|seed| self.trace_one(*seed, sampler))
            .collect();

        info!(
            "Traced {} streamlines ({} points): {}ms",
            trajectories.len(),
            trajectories.iter().map(|t| t.len()).sum::<usize>(),
            instant::now() - t0
        );

        trajectories
    }

    fn trace_one(&self, seed: Point<Real>, sampler: &StaggeredFieldSampler) -> Trajectory {
        let dt = self.params.streamline_dt;
        let mut particle = Particle::seeded(seed, sampler.geometry());
        let mut trajectory = Trajectory::new(seed);

        // One field evaluation per step, shared by the stagnation test and the integrator.
        while particle.is_active() {
            let velocity = sampler.velocity_at(&particle.position);
            if velocity.norm() < self.params.stagnation_speed {
                particle.terminate(Termination::Stagnated);
                break;
            }

            if let Some(position) =
                particle.advance_with_velocity(&velocity, dt, sampler.geometry(), &self.params)
            {
                trajectory.push(position);
            }
        }

        trajectory
    }
}

#[cfg(test)]
mod tests {
    use super::SteadyFlowTracer;
    use crate::geometry::{Grid3, GridGeometry};
    use crate::math::{Point, Real, Vector};
    use crate::tracing::{FlowSnapshot, StaggeredFieldSampler, Staggering, TracerParameters};
    use approx::assert_relative_eq;

    struct UniformFlow {
        geometry: GridGeometry,
        u: Grid3<Real>,
        v: Grid3<Real>,
        w: Grid3<Real>,
    }

    impl UniformFlow {
        fn new(velocity: Vector<Real>) -> Self {
            let geometry =
                GridGeometry::from_extent([8, 4, 4], Point::origin(), Vector::new(2.0, 1.0, 1.0))
                    .unwrap();
            Self {
                u: Grid3::from_elem(Staggering::FaceX.dims(&geometry), velocity.x),
                v: Grid3::from_elem(Staggering::FaceY.dims(&geometry), velocity.y),
                w: Grid3::from_elem(Staggering::FaceZ.dims(&geometry), velocity.z),
                geometry,
            }
        }

        fn sampler(&self) -> StaggeredFieldSampler {
            StaggeredFieldSampler::new(
                &self.geometry,
                FlowSnapshot::velocity(&self.u, &self.v, &self.w),
            )
            .unwrap()
        }
    }

    fn params() -> TracerParameters {
        TracerParameters {
            streamline_dt: 0.1,
            ..TracerParameters::default()
        }
    }

    #[test]
    fn streamline_of_uniform_flow_is_a_straight_line() {
        let flow = UniformFlow::new(Vector::x());
        let seed = Point::new(0.05, 0.5, 0.5);
        let trajectories = SteadyFlowTracer::new(params()).trace(&[seed], &flow.sampler());

        assert_eq!(trajectories.len(), 1);
        let line = &trajectories[0];
        // 0.05, 0.15, ..., 1.95. The exit at 2.05 isn't recorded.
        assert_eq!(line.len(), 20);
        assert_eq!(line.seed(), Some(&seed));
        for (n, p) in line.positions().iter().enumerate() {
            assert_relative_eq!(p.x, 0.05 + 0.1 * n as Real, epsilon = 1.0e-4);
            assert_relative_eq!(p.y, 0.5);
            assert_relative_eq!(p.z, 0.5);
        }
        assert_relative_eq!(line.arc_length(), 1.9, epsilon = 1.0e-4);
    }

    #[test]
    fn step_limit_bounds_streamlines() {
        let flow = UniformFlow::new(Vector::x());
        let params = TracerParameters {
            max_steps: 5,
            ..params()
        };
        let trajectories =
            SteadyFlowTracer::new(params).trace(&[Point::new(0.05, 0.5, 0.5)], &flow.sampler());
        assert_eq!(trajectories[0].len(), 6);

        // 0.35 / 0.1 allows three whole steps.
        let params = TracerParameters {
            max_time: 0.35,
            ..TracerParameters::default()
        };
        let trajectories =
            SteadyFlowTracer::new(params).trace(&[Point::new(0.05, 0.5, 0.5)], &flow.sampler());
        assert_eq!(trajectories[0].len(), 4);
    }

    #[test]
    fn stagnated_and_outside_seeds_yield_the_seed_only() {
        let still = UniformFlow::new(Vector::zeros());
        let trajectories =
            SteadyFlowTracer::new(params()).trace(&[Point::new(1.0, 0.5, 0.5)], &still.sampler());
        assert_eq!(trajectories[0].len(), 1);

        let flow = UniformFlow::new(Vector::x());
        let outside = Point::new(3.0, 0.5, 0.5);
        let trajectories = SteadyFlowTracer::new(params()).trace(&[outside], &flow.sampler());
        assert_eq!(trajectories[0].positions(), &[outside]);
    }

    #[test]
    fn trajectories_follow_seed_order() {
        let flow = UniformFlow::new(Vector::new(0.0, 0.0, 1.0));
        let seeds: Vec<_> = (0..16)
            .map(|n| Point::new(0.1 + 0.1 * n as Real, 0.5, 0.05))
            .collect();
        let trajectories = SteadyFlowTracer::new(params()).trace(&seeds, &flow.sampler());

        assert_eq!(trajectories.len(), seeds.len());
        for (seed, trajectory) in seeds.iter().zip(trajectories.iter()) {
            assert_eq!(trajectory.seed(), Some(seed));
            assert_eq!(trajectory.len(), 10);
            assert_relative_eq!(trajectory.last().unwrap().x, seed.x);
        }
    }
}
