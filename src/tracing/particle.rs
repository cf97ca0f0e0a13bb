use super::{StaggeredFieldSampler, StepOutcome, TracerParameters};
use crate::geometry::GridGeometry;
use crate::math::{Point, Real, Vector};

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    LeftDomain,
    StepLimit,
    Stagnated,
}

/// `Active` particles keep being integrated. `Terminated` is final.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParticleState {
    Active,
    Terminated(Termination),
}

/// A massless tracer particle.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Point<Real>,
    pub state: ParticleState,
    pub num_steps: u32,
    pub elapsed_time: Real,
}

impl Particle {
    /// A particle seeded at `position`. Seeds outside of the domain are terminated right away.
    pub fn seeded(position: Point<Real>, geometry: &GridGeometry) -> Self {
        let state = if geometry.contains(&position) {
            ParticleState::Active
        } else {
            ParticleState::Terminated(Termination::LeftDomain)
        };

        Self {
            position,
            state,
            num_steps: 0,
            elapsed_time: 0.0,
        }
    }

    #[inline(always)]
    pub fn is_active(&self) -> bool {
        self.state == ParticleState::Active
    }

    pub fn terminate(&mut self, reason: Termination) {
        if self.is_active() {
            self.state = ParticleState::Terminated(reason);
        }
    }

    /// Integrates this particle over `dt`.
    ///
    /// Returns the new position if the particle is still active afterwards.
    pub fn advance(
        &mut self,
        dt: Real,
        sampler: &StaggeredFieldSampler,
        params: &TracerParameters,
    ) -> Option<Point<Real>> {
        if !self.within_limits(dt, params) {
            return None;
        }

        let velocity = sampler.velocity_at(&self.position);
        let outcome = params
            .integration_scheme
            .step(&self.position, &velocity, dt, sampler.geometry());
        self.apply(outcome, dt)
    }

    /// Same as [`Self::advance`], with the velocity at the current position already known.
    pub fn advance_with_velocity(
        &mut self,
        velocity: &Vector<Real>,
        dt: Real,
        geometry: &GridGeometry,
        params: &TracerParameters,
    ) -> Option<Point<Real>> {
        if !self.within_limits(dt, params) {
            return None;
        }

        let outcome = params
            .integration_scheme
            .step(&self.position, velocity, dt, geometry);
        self.apply(outcome, dt)
    }

    // Terminates the particle if one more step of `dt` would exceed its limits.
    fn within_limits(&mut self, dt: Real, params: &TracerParameters) -> bool {
        if !self.is_active() {
            return false;
        }

        if self.num_steps >= params.max_steps || self.elapsed_time + dt > params.max_time {
            self.terminate(Termination::StepLimit);
            return false;
        }

        true
    }

    fn apply(&mut self, outcome: StepOutcome, dt: Real) -> Option<Point<Real>> {
        match outcome {
            StepOutcome::InDomain(position) => {
                self.position = position;
                self.num_steps += 1;
                self.elapsed_time += dt;
                Some(position)
            }
            StepOutcome::LeftDomain(_) => {
                self.terminate(Termination::LeftDomain);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Particle, ParticleState, Termination};
    use crate::geometry::GridGeometry;
    use crate::math::{Point, Vector};
    use crate::tracing::TracerParameters;
    use approx::assert_relative_eq;

    #[test]
    fn advance_with_known_velocity() {
        let geometry =
            GridGeometry::from_extent([4, 4, 4], Point::origin(), Vector::repeat(1.0)).unwrap();
        let params = TracerParameters {
            max_steps: 2,
            ..TracerParameters::default()
        };
        let mut particle = Particle::seeded(Point::new(0.5, 0.5, 0.5), &geometry);
        let velocity = Vector::new(1.0, -1.0, 0.0);

        let p = particle
            .advance_with_velocity(&velocity, 0.1, &geometry, &params)
            .unwrap();
        assert_relative_eq!(p, Point::new(0.6, 0.4, 0.5), epsilon = 1.0e-5);
        assert_eq!(particle.num_steps, 1);
        assert!(particle
            .advance_with_velocity(&velocity, 0.1, &geometry, &params)
            .is_some());

        assert!(particle
            .advance_with_velocity(&velocity, 0.1, &geometry, &params)
            .is_none());
        assert_eq!(
            particle.state,
            ParticleState::Terminated(Termination::StepLimit)
        );

        let mut leaving = Particle::seeded(Point::new(0.95, 0.5, 0.5), &geometry);
        assert!(leaving
            .advance_with_velocity(&Vector::x(), 0.1, &geometry, &params)
            .is_none());
        assert_eq!(
            leaving.state,
            ParticleState::Terminated(Termination::LeftDomain)
        );
        assert_relative_eq!(leaving.position, Point::new(0.95, 0.5, 0.5));
    }
}
