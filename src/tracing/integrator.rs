use super::StaggeredFieldSampler;
use crate::geometry::GridGeometry;
use crate::math::{Point, Real, Vector};

/// The result of integrating one particle over one time step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StepOutcome {
    InDomain(Point<Real>),
    /// The integrated position is outside of the domain. It isn't clamped.
    LeftDomain(Point<Real>),
}

impl StepOutcome {
    pub fn position(&self) -> Point<Real> {
        match self {
            StepOutcome::InDomain(p) | StepOutcome::LeftDomain(p) => *p,
        }
    }
}

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IntegrationScheme {
    /// `x(t + dt) = x(t) + dt * v(x(t))`, one field evaluation per step.
    ExplicitEuler,
}

impl Default for IntegrationScheme {
    fn default() -> Self {
        IntegrationScheme::ExplicitEuler
    }
}

impl IntegrationScheme {
    pub fn integrate(
        self,
        position: &Point<Real>,
        dt: Real,
        sampler: &StaggeredFieldSampler,
    ) -> StepOutcome {
        let velocity = sampler.velocity_at(position);
        self.step(position, &velocity, dt, sampler.geometry())
    }

    /// Integrates from `position` with the velocity already sampled there.
    pub fn step(
        self,
        position: &Point<Real>,
        velocity: &Vector<Real>,
        dt: Real,
        geometry: &GridGeometry,
    ) -> StepOutcome {
        let next = match self {
            IntegrationScheme::ExplicitEuler => position + velocity * dt,
        };

        if geometry.contains(&next) {
            StepOutcome::InDomain(next)
        } else {
            StepOutcome::LeftDomain(next)
        }
    }
}
