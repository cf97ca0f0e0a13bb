use crate::error::FlagError;
use crate::geometry::{Face, GeometryMarker};

const TYPE_MASK: u32 = 0b1_1111;
const NEIGHBORS_SHIFT: u32 = 5;
const MODIFIERS_SHIFT: u32 = 11;
const LAYOUT_MASK: u32 = (1 << 14) - 1;

/// The boundary-condition type of a cell. Exactly one holds for every cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(u32)]
pub enum CellType {
    Fluid = 0,
    NoSlip = 1,
    FreeSlip = 2,
    Outflow = 3,
    Inflow = 4,
}

impl CellType {
    pub const ALL: [CellType; 5] = [
        CellType::Fluid,
        CellType::NoSlip,
        CellType::FreeSlip,
        CellType::Outflow,
        CellType::Inflow,
    ];

    /// The bit of this type in the packed flag word.
    #[inline(always)]
    pub fn bit(self) -> u32 {
        1 << self as u32
    }

    pub fn is_fluid(self) -> bool {
        self == CellType::Fluid
    }
}

bitflags::bitflags! {
    /// Which face-adjacent neighbors of a cell are boundary (non-fluid) cells.
    ///
    /// The six bits are independent: a cell in a corner has several of them set at once.
    #[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
    pub struct BoundaryNeighbors: u32 {
        const NONE = 0;
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const DOWN = 1 << 2;
        const UP = 1 << 3;
        const BACK = 1 << 4;
        const FRONT = 1 << 5;
    }
}

impl BoundaryNeighbors {
    pub fn across(face: Face) -> Self {
        Self::from_bits_truncate(1 << face as u32)
    }
}

bitflags::bitflags! {
    /// Properties of a cell independent of its type.
    #[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
    pub struct CellModifiers: u32 {
        const NONE = 0;
        const HOT = 1 << 0;
        const COLD = 1 << 1;
        const COUPLING = 1 << 2;
    }
}

/// The classification of one grid cell.
///
/// Packs into the solver's flag word with [`Flag::bits`]:
///
/// | Bits  | Meaning                                                           |
/// |-------|-------------------------------------------------------------------|
/// | 0–4   | fluid, no-slip, free-slip, outflow, inflow (exactly one set)      |
/// | 5–10  | left/right/down/up/back/front neighbor is a boundary cell         |
/// | 11–13 | hot, cold, coupling                                               |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Flag {
    pub cell_type: CellType,
    pub neighbors: BoundaryNeighbors,
    pub modifiers: CellModifiers,
}

impl Flag {
    pub fn new(cell_type: CellType) -> Self {
        Self {
            cell_type,
            neighbors: BoundaryNeighbors::NONE,
            modifiers: CellModifiers::NONE,
        }
    }

    pub fn fluid() -> Self {
        Self::new(CellType::Fluid)
    }

    pub fn no_slip() -> Self {
        Self::new(CellType::NoSlip)
    }

    pub fn with_modifiers(mut self, modifiers: CellModifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    pub fn from_marker(marker: GeometryMarker) -> Self {
        match marker {
            GeometryMarker::NoSlip => Self::new(CellType::NoSlip),
            GeometryMarker::FreeSlip => Self::new(CellType::FreeSlip),
            GeometryMarker::Outflow => Self::new(CellType::Outflow),
            GeometryMarker::Inflow => Self::new(CellType::Inflow),
            GeometryMarker::Fluid => Self::new(CellType::Fluid),
            GeometryMarker::NoSlipHot => Self::no_slip().with_modifiers(CellModifiers::HOT),
            GeometryMarker::NoSlipCold => Self::no_slip().with_modifiers(CellModifiers::COLD),
            GeometryMarker::NoSlipCoupling => {
                Self::no_slip().with_modifiers(CellModifiers::COUPLING)
            }
        }
    }

    /// The packed flag word exchanged with the solver.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.cell_type.bit()
            | (self.neighbors.bits() << NEIGHBORS_SHIFT)
            | (self.modifiers.bits() << MODIFIERS_SHIFT)
    }

    /// Unpacks a flag word, rejecting words that don't encode exactly one cell type.
    pub fn from_bits(bits: u32) -> Result<Self, FlagError> {
        if bits & !LAYOUT_MASK != 0 {
            return Err(FlagError::UnknownBits(bits));
        }

        let type_bits = bits & TYPE_MASK;
        if type_bits.count_ones() != 1 {
            return Err(FlagError::InvalidCellType(bits));
        }

        let cell_type = CellType::ALL[type_bits.trailing_zeros() as usize];

        Ok(Self {
            cell_type,
            neighbors: BoundaryNeighbors::from_bits_truncate(bits >> NEIGHBORS_SHIFT),
            modifiers: CellModifiers::from_bits_truncate(bits >> MODIFIERS_SHIFT),
        })
    }

    #[inline(always)]
    pub fn is_fluid(&self) -> bool {
        self.cell_type == CellType::Fluid
    }

    #[inline(always)]
    pub fn is_no_slip(&self) -> bool {
        self.cell_type == CellType::NoSlip
    }

    #[inline(always)]
    pub fn is_free_slip(&self) -> bool {
        self.cell_type == CellType::FreeSlip
    }

    #[inline(always)]
    pub fn is_outflow(&self) -> bool {
        self.cell_type == CellType::Outflow
    }

    #[inline(always)]
    pub fn is_inflow(&self) -> bool {
        self.cell_type == CellType::Inflow
    }

    #[inline(always)]
    pub fn boundary_left(&self) -> bool {
        self.neighbors.contains(BoundaryNeighbors::LEFT)
    }

    #[inline(always)]
    pub fn boundary_right(&self) -> bool {
        self.neighbors.contains(BoundaryNeighbors::RIGHT)
    }

    #[inline(always)]
    pub fn boundary_down(&self) -> bool {
        self.neighbors.contains(BoundaryNeighbors::DOWN)
    }

    #[inline(always)]
    pub fn boundary_up(&self) -> bool {
        self.neighbors.contains(BoundaryNeighbors::UP)
    }

    #[inline(always)]
    pub fn boundary_back(&self) -> bool {
        self.neighbors.contains(BoundaryNeighbors::BACK)
    }

    #[inline(always)]
    pub fn boundary_front(&self) -> bool {
        self.neighbors.contains(BoundaryNeighbors::FRONT)
    }

    pub fn boundary_across(&self, face: Face) -> bool {
        self.neighbors.contains(BoundaryNeighbors::across(face))
    }

    #[inline(always)]
    pub fn is_hot(&self) -> bool {
        self.modifiers.contains(CellModifiers::HOT)
    }

    #[inline(always)]
    pub fn is_cold(&self) -> bool {
        self.modifiers.contains(CellModifiers::COLD)
    }

    #[inline(always)]
    pub fn is_coupling(&self) -> bool {
        self.modifiers.contains(CellModifiers::COUPLING)
    }
}

#[cfg(test)]
mod tests {
    use super::{BoundaryNeighbors, CellModifiers, CellType, Flag};
    use crate::error::FlagError;
    use crate::geometry::{Face, GeometryMarker};

    fn type_predicates(flag: &Flag) -> [bool; 5] {
        [
            flag.is_fluid(),
            flag.is_no_slip(),
            flag.is_free_slip(),
            flag.is_outflow(),
            flag.is_inflow(),
        ]
    }

    #[test]
    fn packed_layout() {
        assert_eq!(Flag::fluid().bits(), 1);
        assert_eq!(Flag::new(CellType::Inflow).bits(), 1 << 4);

        let mut flag = Flag::no_slip().with_modifiers(CellModifiers::HOT | CellModifiers::COUPLING);
        flag.neighbors = BoundaryNeighbors::LEFT | BoundaryNeighbors::FRONT;
        assert_eq!(flag.bits(), (1 << 1) | (1 << 5) | (1 << 10) | (1 << 11) | (1 << 13));
    }

    #[test]
    fn exactly_one_type_predicate_holds() {
        let mut rng = oorandom::Rand32::new(1234);

        for _ in 0..1000 {
            let cell_type = CellType::ALL[rng.rand_range(0..5) as usize];
            let flag = Flag {
                cell_type,
                neighbors: BoundaryNeighbors::from_bits_truncate(rng.rand_u32()),
                modifiers: CellModifiers::from_bits_truncate(rng.rand_u32()),
            };

            assert_eq!(type_predicates(&flag).iter().filter(|p| **p).count(), 1);
            assert_eq!(Flag::from_bits(flag.bits()), Ok(flag));
        }
    }

    #[test]
    fn obstacle_markers_with_modifiers() {
        let hot = Flag::from_marker(GeometryMarker::NoSlipHot);
        let cold = Flag::from_marker(GeometryMarker::NoSlipCold);
        let coupling = Flag::from_marker(GeometryMarker::NoSlipCoupling);

        for flag in [hot, cold, coupling].iter() {
            assert!(flag.is_no_slip());
            assert!(flag.neighbors.is_empty());
            assert_eq!(Flag::from_bits(flag.bits()), Ok(*flag));
        }
        assert_eq!(hot.modifiers, CellModifiers::HOT);
        assert_eq!(cold.modifiers, CellModifiers::COLD);
        assert_eq!(coupling.modifiers, CellModifiers::COUPLING);
        assert!(coupling.is_coupling() && !coupling.is_hot() && !coupling.is_cold());
        assert_eq!(coupling.bits(), (1 << 1) | (1 << 13));
    }

    #[test]
    fn invalid_words_are_rejected() {
        assert_eq!(Flag::from_bits(0), Err(FlagError::InvalidCellType(0)));
        assert_eq!(Flag::from_bits(0b11), Err(FlagError::InvalidCellType(0b11)));
        assert_eq!(
            Flag::from_bits(1 | (1 << 14)),
            Err(FlagError::UnknownBits(1 | (1 << 14)))
        );
    }

    #[test]
    fn directional_bits_are_independent() {
        let mut flag = Flag::fluid();
        flag.neighbors = BoundaryNeighbors::LEFT | BoundaryNeighbors::DOWN | BoundaryNeighbors::BACK;

        assert!(flag.boundary_left() && flag.boundary_down() && flag.boundary_back());
        assert!(!flag.boundary_right() && !flag.boundary_up() && !flag.boundary_front());

        for face in Face::ALL.iter() {
            assert_eq!(
                flag.boundary_across(*face),
                match face {
                    Face::Left | Face::Down | Face::Back => true,
                    _ => false,
                }
            );
        }
    }
}
