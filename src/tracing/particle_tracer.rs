use super::{
    StaggeredFieldSampler, SteadyFlowTracer, TimeVaryingMode, TimeVaryingTracer,
    TracerParameters, Trajectories,
};
use crate::error::{ScenarioError, TracerError};
use crate::geometry::GridGeometry;
use crate::math::{Point, Real};
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TracerKind {
    Streamlines,
    Pathlines,
    Streaklines,
}

impl TracerKind {
    pub const ALL: [TracerKind; 3] = [
        TracerKind::Streamlines,
        TracerKind::Pathlines,
        TracerKind::Streaklines,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TracerKind::Streamlines => "streamlines",
            TracerKind::Pathlines => "pathlines",
            TracerKind::Streaklines => "streaklines",
        }
    }
}

impl fmt::Display for TracerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TracerKind {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TracerKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ScenarioError::UnknownTracerKind(s.to_string()))
    }
}

/// Any kind of characteristic line tracer behind the seed, step, retrieve protocol.
#[derive(Clone, Debug)]
pub enum ParticleTracer {
    /// Streamlines are traced at retrieval, through the snapshot given at that point.
    Steady {
        tracer: SteadyFlowTracer,
        seeds: Option<Vec<Point<Real>>>,
    },
    TimeVarying(TimeVaryingTracer),
}

impl ParticleTracer {
    pub fn new(kind: TracerKind, params: TracerParameters) -> Self {
        match kind {
            TracerKind::Streamlines => ParticleTracer::Steady {
                tracer: SteadyFlowTracer::new(params),
                seeds: None,
            },
            TracerKind::Pathlines => ParticleTracer::TimeVarying(TimeVaryingTracer::new(
                TimeVaryingMode::Pathlines,
                params,
            )),
            TracerKind::Streaklines => ParticleTracer::TimeVarying(TimeVaryingTracer::new(
                TimeVaryingMode::Streaklines,
                params,
            )),
        }
    }

    pub fn kind(&self) -> TracerKind {
        match self {
            ParticleTracer::Steady { .. } => TracerKind::Streamlines,
            ParticleTracer::TimeVarying(tracer) => match tracer.mode() {
                TimeVaryingMode::Pathlines => TracerKind::Pathlines,
                TimeVaryingMode::Streaklines => TracerKind::Streaklines,
            },
        }
    }

    pub fn params(&self) -> &TracerParameters {
        match self {
            ParticleTracer::Steady { tracer, .. } => &tracer.params,
            ParticleTracer::TimeVarying(tracer) => &tracer.params,
        }
    }

    pub fn set_seeding_locations(
        &mut self,
        geometry: &GridGeometry,
        seeds: &[Point<Real>],
    ) -> Result<(), TracerError> {
        match self {
            ParticleTracer::Steady { seeds: current, .. } => {
                if current.is_some() {
                    return Err(TracerError::AlreadySeeded);
                }
                let num_outside = seeds.iter().filter(|p| !geometry.contains(p)).count();
                if num_outside > 0 {
                    warn!(
                        "{} of {} seeds are outside of the domain.",
                        num_outside,
                        seeds.len()
                    );
                }
                *current = Some(seeds.to_vec());
                Ok(())
            }
            ParticleTracer::TimeVarying(tracer) => tracer.set_seeding_locations(geometry, seeds),
        }
    }

    /// Advances the tracer by one solver time step. Streamlines don't depend on time so this
    /// only checks the tracer was seeded.
    pub fn time_step(
        &mut self,
        t: Real,
        dt: Real,
        sampler: &StaggeredFieldSampler,
    ) -> Result<(), TracerError> {
        match self {
            ParticleTracer::Steady { seeds, .. } => match seeds {
                Some(_) => Ok(()),
                None => Err(TracerError::NotSeeded),
            },
            ParticleTracer::TimeVarying(tracer) => tracer.time_step(t, dt, sampler),
        }
    }

    /// The trajectories of all seeds, in seeding order.
    ///
    /// Attributes are sampled from `sampler` if `params.record_attributes` is set.
    pub fn trajectories(
        &self,
        sampler: &StaggeredFieldSampler,
    ) -> Result<Trajectories, TracerError> {
        let record_attributes = self.params().record_attributes;

        match self {
            ParticleTracer::Steady { tracer, seeds } => {
                let seeds = seeds.as_ref().ok_or(TracerError::NotSeeded)?;
                let mut trajectories = tracer.trace(seeds, sampler);
                if record_attributes {
                    trajectories
                        .par_iter_mut()
                        .for_each(|trajectory| trajectory.sample_attributes(sampler));
                }
                Ok(trajectories)
            }
            ParticleTracer::TimeVarying(tracer) => {
                if !tracer.is_seeded() {
                    return Err(TracerError::NotSeeded);
                }

                if record_attributes {
                    Ok(tracer.trajectories_with_attributes(sampler))
                } else {
                    Ok(tracer.trajectories())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ParticleTracer, TracerKind};
    use crate::error::TracerError;
    use crate::geometry::{Grid3, GridGeometry};
    use crate::math::{Point, Real, Vector};
    use crate::tracing::{FlowSnapshot, StaggeredFieldSampler, Staggering, TracerParameters};

    #[test]
    fn tracer_kind_names() {
        for kind in TracerKind::ALL.iter() {
            assert_eq!(kind.to_string().parse::<TracerKind>().unwrap(), *kind);
        }
        assert!("timelines".parse::<TracerKind>().is_err());
    }

    #[test]
    fn common_protocol_for_every_kind() {
        let geometry =
            GridGeometry::from_extent([4, 4, 4], Point::origin(), Vector::repeat(1.0)).unwrap();
        let u: Grid3<Real> = Grid3::from_elem(Staggering::FaceX.dims(&geometry), 0.5);
        let v = Grid3::from_elem(Staggering::FaceY.dims(&geometry), 0.0);
        let w = Grid3::from_elem(Staggering::FaceZ.dims(&geometry), 0.0);
        let sampler =
            StaggeredFieldSampler::new(&geometry, FlowSnapshot::velocity(&u, &v, &w)).unwrap();
        let seeds = [Point::new(0.12, 0.5, 0.5), Point::new(0.12, 0.2, 0.7)];

        for kind in TracerKind::ALL.iter() {
            let mut tracer = ParticleTracer::new(*kind, TracerParameters::default());
            assert_eq!(tracer.kind(), *kind);
            assert_eq!(
                tracer.trajectories(&sampler).unwrap_err(),
                TracerError::NotSeeded
            );
            assert_eq!(
                tracer.time_step(0.0, 0.1, &sampler),
                Err(TracerError::NotSeeded)
            );

            tracer.set_seeding_locations(&geometry, &seeds).unwrap();
            assert_eq!(
                tracer.set_seeding_locations(&geometry, &seeds),
                Err(TracerError::AlreadySeeded)
            );

            for n in 0..4 {
                tracer.time_step(n as Real * 0.1, 0.1, &sampler).unwrap();
            }

            let trajectories = tracer.trajectories(&sampler).unwrap();
            assert_eq!(trajectories.len(), seeds.len());
            for (seed, trajectory) in seeds.iter().zip(trajectories.iter()) {
                assert_eq!(trajectory.seed(), Some(seed));
                let attributes = trajectory.attributes().unwrap();
                assert_eq!(attributes.velocity_magnitude.len(), trajectory.len());
            }

            match kind {
                // 0.12 + 0.05 * 17 is the last position inside.
                TracerKind::Streamlines => assert_eq!(trajectories[0].len(), 18),
                TracerKind::Pathlines | TracerKind::Streaklines => {
                    assert_eq!(trajectories[0].len(), 5)
                }
            }
        }
    }
}
