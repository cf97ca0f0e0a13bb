//! Characteristic lines of the flow.
//!
//! Characteristic lines are tangential to the flow: a massless particle seeded at `x_0`
//! follows `dx(t)/dt = v(x(t), t)`, `x(0) = x_0`.
//!
//! - Streamlines follow particles through one frozen velocity snapshot.
//! - Pathlines follow particles through time and space.
//! - Streaklines connect the particles continuously released at a fixed position.
//!
//! If the flow is steady, all three kinds of lines coincide.

pub use self::integrator::{IntegrationScheme, StepOutcome};
pub use self::particle::{Particle, ParticleState, Termination};
pub use self::particle_tracer::{ParticleTracer, TracerKind};
pub use self::sampler::{FlowSnapshot, StaggeredFieldSampler, Staggering};
pub use self::seeding::{seeding_locations_for_scenario, seeding_locations_in_fluid, SeedingRule};
pub use self::steady_flow_tracer::SteadyFlowTracer;
pub use self::time_varying_tracer::{TimeVaryingMode, TimeVaryingTracer};
pub use self::tracer_parameters::TracerParameters;
pub use self::trajectory::{Trajectories, Trajectory, TrajectoryAttributes};

mod integrator;
mod particle;
mod particle_tracer;
mod sampler;
mod seeding;
mod steady_flow_tracer;
mod time_varying_tracer;
mod tracer_parameters;
mod trajectory;
