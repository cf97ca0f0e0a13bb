#![allow(dead_code)]

extern crate nalgebra as na;
#[macro_use]
extern crate log;

mod helper;

use anyhow::Context;
use cfdtrace3d::flags::FlagField;
use cfdtrace3d::math::Real;
use cfdtrace3d::scenario::Scenario;
use cfdtrace3d::tracing::{
    seeding_locations_in_fluid, ParticleTracer, StaggeredFieldSampler, TracerKind,
    TracerParameters, Trajectories,
};
use cfdtrace3d::utils::cell_centered_velocity;
use inflector::Inflector;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::str::FromStr;

fn arg_from_command_line(name: &str) -> Option<String> {
    let mut args = std::env::args();

    while let Some(arg) = args.next() {
        if &arg[..] == name {
            return args.next();
        }
    }

    None
}

fn parsed_arg<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match arg_from_command_line(name) {
        Some(value) => value
            .parse()
            .with_context(|| format!("invalid value `{}` for {}", value, name)),
        None => Ok(default),
    }
}

#[derive(Serialize)]
struct TraceOutput<'a> {
    scenario: Scenario,
    tracer: TracerKind,
    num_steps: usize,
    dt: Real,
    trajectories: &'a Trajectories,
}

pub fn main() -> anyhow::Result<()> {
    env_logger::init();

    let scenario: Scenario = arg_from_command_line("--scenario")
        .unwrap_or_else(|| Scenario::DrivenCavity.to_string())
        .to_snake_case()
        .parse()?;
    let kind: TracerKind = arg_from_command_line("--tracer")
        .unwrap_or_else(|| TracerKind::Streamlines.to_string())
        .to_lowercase()
        .parse()?;
    let num_particles: usize = parsed_arg("--particles", 64)?;
    let num_steps: usize = parsed_arg("--steps", 200)?;
    let dt: Real = parsed_arg("--dt", 0.01)?;

    let geometry = helper::scenario_geometry(scenario)?;
    let flags = match arg_from_command_line("--geometry") {
        Some(path) => FlagField::from_geometry_file(scenario, &geometry, &path)?,
        None => FlagField::no_obstacles(scenario, &geometry),
    };
    info!(
        "{}: {:?} cells, {} fluid.",
        scenario,
        geometry.num_cells(),
        flags.num_fluid_cells()
    );

    let seeds = seeding_locations_in_fluid(scenario, num_particles, &flags);
    let params = TracerParameters {
        streamline_dt: dt,
        ..TracerParameters::default()
    };
    let mut tracer = ParticleTracer::new(kind, params);
    tracer.set_seeding_locations(&geometry, &seeds)?;

    let mut t = 0.0;
    for _ in 0..num_steps {
        let fields = helper::FlowFields::new(scenario, &geometry, t);
        let sampler = StaggeredFieldSampler::new(&geometry, fields.snapshot())?;
        tracer.time_step(t, dt, &sampler)?;
        t += dt;
    }

    let fields = helper::FlowFields::new(scenario, &geometry, t);
    let sampler = StaggeredFieldSampler::new(&geometry, fields.snapshot())?;
    let trajectories = tracer.trajectories(&sampler)?;

    let [uc, vc, wc] = cell_centered_velocity(&sampler);
    let max_speed = uc
        .iter()
        .zip(vc.iter())
        .zip(wc.iter())
        .map(|((u, v), w)| (u * u + v * v + w * w).sqrt())
        .fold(0.0, Real::max);

    info!(
        "{} {} at t = {}: {} points, max cell speed {}.",
        trajectories.len(),
        kind,
        t,
        trajectories.iter().map(|tr| tr.len()).sum::<usize>(),
        max_speed
    );

    if let Some(path) = arg_from_command_line("--output") {
        let file = File::create(&path).with_context(|| format!("cannot create {}", path))?;
        let output = TraceOutput {
            scenario,
            tracer: kind,
            num_steps,
            dt,
            trajectories: &trajectories,
        };
        serde_json::to_writer_pretty(BufWriter::new(file), &output)?;
        info!("Trajectories written to {}.", path);
    }

    Ok(())
}
