pub use self::flag::{BoundaryNeighbors, CellModifiers, CellType, Flag};
pub use self::flag_field::FlagField;

mod flag;
mod flag_field;
