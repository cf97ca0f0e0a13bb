use super::{Particle, StaggeredFieldSampler, TracerParameters, Trajectories, Trajectory};
use crate::error::TracerError;
use crate::geometry::GridGeometry;
use crate::math::{Point, Real};
use rayon::prelude::*;

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimeVaryingMode {
    /// Follow one particle per seed.
    Pathlines,
    /// Release one particle per seed and per time step.
    Streaklines,
}

#[derive(Clone, Debug)]
enum TracerState {
    Unseeded,
    Pathlines {
        particles: Vec<Particle>,
        trajectories: Trajectories,
    },
    Streaklines {
        // Release points. Seeds outside of the domain never release anything.
        seeds: Vec<Particle>,
        // The live particles of every seed, oldest first.
        streaks: Vec<Vec<Particle>>,
    },
}

/// Traces pathlines or streaklines through a sequence of velocity snapshots.
///
/// Seeding happens exactly once, then the tracer is stepped forward once per solver time
/// step with the snapshot of that time step.
#[derive(Clone, Debug)]
pub struct TimeVaryingTracer {
    pub params: TracerParameters,
    mode: TimeVaryingMode,
    state: TracerState,
    num_steps: usize,
}

impl TimeVaryingTracer {
    pub fn new(mode: TimeVaryingMode, params: TracerParameters) -> Self {
        Self {
            params,
            mode,
            state: TracerState::Unseeded,
            num_steps: 0,
        }
    }

    pub fn mode(&self) -> TimeVaryingMode {
        self.mode
    }

    pub fn is_seeded(&self) -> bool {
        !matches!(self.state, TracerState::Unseeded)
    }

    /// The number of successful calls to [`Self::time_step`].
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    pub fn set_seeding_locations(
        &mut self,
        geometry: &GridGeometry,
        seeds: &[Point<Real>],
    ) -> Result<(), TracerError> {
        if self.is_seeded() {
            return Err(TracerError::AlreadySeeded);
        }

        let particles: Vec<_> = seeds
            .iter()
            .map(|seed| Particle::seeded(*seed, geometry))
            .collect();
        let num_outside = particles.iter().filter(|p| !p.is_active()).count();
        if num_outside > 0 {
            warn!(
                "{} of {} seeds are outside of the domain.",
                num_outside,
                seeds.len()
            );
        }

        self.state = match self.mode {
            TimeVaryingMode::Pathlines => TracerState::Pathlines {
                trajectories: seeds.iter().map(|seed| Trajectory::new(*seed)).collect(),
                particles,
            },
            TimeVaryingMode::Streaklines => TracerState::Streaklines {
                streaks: vec![Vec::new(); particles.len()],
                seeds: particles,
            },
        };

        Ok(())
    }

    /// Advances every live particle from time `t` to `t + dt` through the velocity field of
    /// `sampler`.
    pub fn time_step(
        &mut self,
        t: Real,
        dt: Real,
        sampler: &StaggeredFieldSampler,
    ) -> Result<(), TracerError> {
        let t0 = instant::now();
        let params = &self.params;

        match &mut self.state {
            TracerState::Unseeded => return Err(TracerError::NotSeeded),
            TracerState::Pathlines {
                particles,
                trajectories,
            } => {
                particles
                    .par_iter_mut()
                    .zip(trajectories.par_iter_mut())
                    .for_each(|(particle, trajectory)| {
                        if let Some(position) = particle.advance(dt, sampler, params) {
                            trajectory.push(position);
                        }
                    });
            }
            TracerState::Streaklines { seeds, streaks } => {
                seeds
                    .par_iter()
                    .zip(streaks.par_iter_mut())
                    .for_each(|(seed, streak)| {
                        if seed.is_active() {
                            streak.push(*seed);
                        }

                        streak.retain_mut(|particle| {
                            particle.advance(dt, sampler, params).is_some()
                        });
                    });
            }
        }

        self.num_steps += 1;
        debug!(
            "Particle step at t = {} (dt = {}): {}ms",
            t,
            dt,
            instant::now() - t0
        );

        Ok(())
    }

    /// The current trajectory of every seed, in seeding order.
    ///
    /// A streakline starts at its release point and continues with its particles from the
    /// youngest to the oldest. Returns no trajectory before seeding.
    pub fn trajectories(&self) -> Trajectories {
        match &self.state {
            TracerState::Unseeded => Vec::new(),
            TracerState::Pathlines { trajectories, .. } => trajectories.clone(),
            TracerState::Streaklines { seeds, streaks } => seeds
                .iter()
                .zip(streaks.iter())
                .map(|(seed, streak)| {
                    let positions = std::iter::once(seed.position)
                        .chain(streak.iter().rev().map(|p| p.position))
                        .collect();
                    Trajectory::from_positions(positions)
                })
                .collect(),
        }
    }

    /// Same as [`Self::trajectories`], with the scalar attributes sampled from `sampler`.
    pub fn trajectories_with_attributes(&self, sampler: &StaggeredFieldSampler) -> Trajectories {
        let mut trajectories = self.trajectories();
        trajectories
            .par_iter_mut()
            .for_each(|trajectory| trajectory.sample_attributes(sampler));
        trajectories
    }

    /// The live particles, e.g., for rendering them as points.
    pub fn particles(&self) -> Vec<Particle> {
        match &self.state {
            TracerState::Unseeded => Vec::new(),
            TracerState::Pathlines { particles, .. } => {
                particles.iter().filter(|p| p.is_active()).copied().collect()
            }
            TracerState::Streaklines { streaks, .. } => streaks.iter().flatten().copied().collect(),
        }
    }
}
