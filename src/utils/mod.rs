pub use self::cell_centered::*;

mod cell_centered;
