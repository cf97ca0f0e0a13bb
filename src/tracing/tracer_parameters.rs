use super::IntegrationScheme;
use crate::math::Real;

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TracerParameters {
    pub integration_scheme: IntegrationScheme,
    /// Integration step of streamlines traced by a [`ParticleTracer`](super::ParticleTracer).
    pub streamline_dt: Real,
    /// A particle terminates after this many integration steps.
    pub max_steps: u32,
    /// A particle terminates once its integrated time would exceed this value.
    pub max_time: Real,
    /// Streamlines terminate where the velocity magnitude drops below this value.
    pub stagnation_speed: Real,
    /// Sample velocity magnitude, pressure and temperature along the retrieved trajectories.
    pub record_attributes: bool,
}

impl Default for TracerParameters {
    fn default() -> Self {
        TracerParameters {
            integration_scheme: IntegrationScheme::ExplicitEuler,
            streamline_dt: 0.1,
            max_steps: 10_000,
            max_time: Real::MAX,
            stagnation_speed: 1.0e-6,
            record_attributes: true,
        }
    }
}
