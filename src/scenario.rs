//! The closed set of simulation scenarios known to the classification and seeding logic.

use crate::error::ScenarioError;
use crate::flags::{CellModifiers, CellType, Flag};
use crate::geometry::Face;
use crate::tracing::SeedingRule;
use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Scenario {
    DrivenCavity,
    FlowOverStep,
    KarmanVortexStreet,
    NaturalConvection,
    RayleighBenardConvection,
    SingleTower,
}

impl Scenario {
    pub const ALL: [Scenario; 6] = [
        Scenario::DrivenCavity,
        Scenario::FlowOverStep,
        Scenario::KarmanVortexStreet,
        Scenario::NaturalConvection,
        Scenario::RayleighBenardConvection,
        Scenario::SingleTower,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::DrivenCavity => "driven_cavity",
            Scenario::FlowOverStep => "flow_over_step",
            Scenario::KarmanVortexStreet => "karman_vortex_street",
            Scenario::NaturalConvection => "natural_convection",
            Scenario::RayleighBenardConvection => "rayleigh_benard_convection",
            Scenario::SingleTower => "single_tower",
        }
    }

    /// The type of the ghost cells on the given domain face when the interior comes from a
    /// geometry raster.
    pub fn wall_type(self, face: Face) -> CellType {
        match (self, face) {
            (Scenario::FlowOverStep, Face::Left)
            | (Scenario::KarmanVortexStreet, Face::Left)
            | (Scenario::SingleTower, Face::Left) => CellType::Inflow,
            (Scenario::FlowOverStep, Face::Right)
            | (Scenario::KarmanVortexStreet, Face::Right)
            | (Scenario::SingleTower, Face::Right) => CellType::Outflow,
            (Scenario::KarmanVortexStreet, _) => CellType::FreeSlip,
            (Scenario::SingleTower, Face::Down) => CellType::NoSlip,
            (Scenario::SingleTower, _) => CellType::FreeSlip,
            _ => CellType::NoSlip,
        }
    }

    /// The thermal modifiers of the walls on the given domain face.
    pub fn wall_modifiers(self, face: Face) -> CellModifiers {
        match (self, face) {
            (Scenario::NaturalConvection, Face::Left) => CellModifiers::HOT,
            (Scenario::NaturalConvection, Face::Right) => CellModifiers::COLD,
            (Scenario::RayleighBenardConvection, Face::Down) => CellModifiers::HOT,
            (Scenario::RayleighBenardConvection, Face::Up) => CellModifiers::COLD,
            _ => CellModifiers::NONE,
        }
    }

    /// The flag of a ghost cell touching the given domain faces.
    ///
    /// Edges and corners belong to several faces: obstacle walls take precedence over
    /// outflow, which takes precedence over inflow. The thermal modifiers of every face are
    /// combined.
    pub fn wall_flag(self, faces: impl IntoIterator<Item = Face>) -> Flag {
        let mut flag: Option<Flag> = None;

        for face in faces {
            let candidate = Flag::new(self.wall_type(face));
            let modifiers = self.wall_modifiers(face);

            flag = Some(match flag {
                None => candidate.with_modifiers(modifiers),
                Some(current) => {
                    let winner = if wall_precedence(candidate.cell_type)
                        > wall_precedence(current.cell_type)
                    {
                        candidate.with_modifiers(current.modifiers)
                    } else {
                        current
                    };
                    winner.with_modifiers(modifiers)
                }
            });
        }

        flag.unwrap_or_else(Flag::no_slip)
    }

    /// How particles are seeded when tracing this scenario.
    pub fn seeding_rule(self) -> SeedingRule {
        match self {
            Scenario::FlowOverStep | Scenario::KarmanVortexStreet | Scenario::SingleTower => {
                SeedingRule::InflowLine
            }
            Scenario::DrivenCavity => SeedingRule::InteriorLattice,
            Scenario::NaturalConvection | Scenario::RayleighBenardConvection => {
                SeedingRule::CentralPlane
            }
        }
    }
}

fn wall_precedence(cell_type: CellType) -> u32 {
    match cell_type {
        CellType::NoSlip => 4,
        CellType::FreeSlip => 3,
        CellType::Outflow => 2,
        CellType::Inflow => 1,
        CellType::Fluid => 0,
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .iter()
            .copied()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| ScenarioError::UnknownScenario(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Scenario;
    use crate::flags::CellType;
    use crate::geometry::Face;

    #[test]
    fn names_round_trip() {
        for scenario in Scenario::ALL.iter() {
            assert_eq!(scenario.to_string().parse::<Scenario>(), Ok(*scenario));
        }
        assert!("lid_driven_cavity".parse::<Scenario>().is_err());
    }

    #[test]
    fn channel_corners_are_walls() {
        let corner = Scenario::FlowOverStep.wall_flag(vec![Face::Left, Face::Down]);
        assert_eq!(corner.cell_type, CellType::NoSlip);

        let inflow = Scenario::FlowOverStep.wall_flag(vec![Face::Left]);
        assert!(inflow.is_inflow());

        let outflow = Scenario::KarmanVortexStreet.wall_flag(vec![Face::Right, Face::Front]);
        assert!(outflow.is_free_slip());
    }

    #[test]
    fn convection_walls_carry_temperatures() {
        let left = Scenario::NaturalConvection.wall_flag(vec![Face::Left, Face::Up]);
        assert!(left.is_no_slip() && left.is_hot() && !left.is_cold());

        let bottom = Scenario::RayleighBenardConvection.wall_flag(vec![Face::Down]);
        let top = Scenario::RayleighBenardConvection.wall_flag(vec![Face::Up]);
        assert!(bottom.is_hot() && top.is_cold());
    }
}
