use super::StaggeredFieldSampler;
use crate::math::{Point, Real};

/// Scalars sampled at every point of a trajectory.
///
/// `pressure` and `temperature` are empty when the snapshot doesn't carry these fields.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TrajectoryAttributes {
    pub velocity_magnitude: Vec<Real>,
    pub pressure: Vec<Real>,
    pub temperature: Vec<Real>,
}

/// The ordered, append-only sequence of positions of one traced particle.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    positions: Vec<Point<Real>>,
    attributes: Option<TrajectoryAttributes>,
}

/// One trajectory per seeded particle, in seeding order.
pub type Trajectories = Vec<Trajectory>;

impl Trajectory {
    pub fn new(seed: Point<Real>) -> Self {
        Self {
            positions: vec![seed],
            attributes: None,
        }
    }

    pub(crate) fn from_positions(positions: Vec<Point<Real>>) -> Self {
        Self {
            positions,
            attributes: None,
        }
    }

    pub fn push(&mut self, position: Point<Real>) {
        self.positions.push(position);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Point<Real>] {
        &self.positions
    }

    pub fn seed(&self) -> Option<&Point<Real>> {
        self.positions.first()
    }

    pub fn last(&self) -> Option<&Point<Real>> {
        self.positions.last()
    }

    pub fn attributes(&self) -> Option<&TrajectoryAttributes> {
        self.attributes.as_ref()
    }

    /// The length of the polyline through all positions.
    pub fn arc_length(&self) -> Real {
        self.positions
            .windows(2)
            .map(|w| na::distance(&w[0], &w[1]))
            .sum()
    }

    /// Samples the scalar attributes of every position from `sampler`.
    pub fn sample_attributes(&mut self, sampler: &StaggeredFieldSampler) {
        let mut attributes = TrajectoryAttributes::default();

        for position in &self.positions {
            attributes
                .velocity_magnitude
                .push(sampler.velocity_magnitude_at(position));

            if let Some(p) = sampler.pressure_at(position) {
                attributes.pressure.push(p);
            }
            if let Some(t) = sampler.temperature_at(position) {
                attributes.temperature.push(t);
            }
        }

        self.attributes = Some(attributes);
    }
}
