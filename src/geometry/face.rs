use super::FACE_SHIFTS;

/// One of the six faces of a cell, or of the whole domain.
///
/// Left/right follow the `x` axis (index `i`), down/up the `y` axis (index `j`) and
/// back/front the `z` axis (index `k`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Face {
    Left,
    Right,
    Down,
    Up,
    Back,
    Front,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Left,
        Face::Right,
        Face::Down,
        Face::Up,
        Face::Back,
        Face::Front,
    ];

    /// The index offset leading to the neighbor across this face.
    #[inline(always)]
    pub fn shift(self) -> [isize; 3] {
        FACE_SHIFTS[self as usize]
    }

    /// The axis this face is orthogonal to.
    #[inline(always)]
    pub fn axis(self) -> usize {
        self as usize / 2
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::Left => Face::Right,
            Face::Right => Face::Left,
            Face::Down => Face::Up,
            Face::Up => Face::Down,
            Face::Back => Face::Front,
            Face::Front => Face::Back,
        }
    }

    /// Does the ghost-extended cell `(i, j, k)` lie on the ghost layer of this face?
    pub fn contains_ghost_cell(self, ijk: [usize; 3], num_cells: [usize; 3]) -> bool {
        let axis = self.axis();
        if self.shift()[axis] < 0 {
            ijk[axis] == 0
        } else {
            ijk[axis] == num_cells[axis] + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Face;

    #[test]
    fn shifts_point_across_their_face() {
        for face in Face::ALL.iter() {
            let shift = face.shift();
            let opposite = face.opposite().shift();
            assert_eq!(shift.iter().map(|e| e.abs()).sum::<isize>(), 1);
            assert_ne!(shift[face.axis()], 0);
            for a in 0..3 {
                assert_eq!(shift[a], -opposite[a]);
            }
        }
    }

    #[test]
    fn ghost_cells_of_each_face() {
        let n = [3, 4, 5];
        assert!(Face::Left.contains_ghost_cell([0, 2, 2], n));
        assert!(Face::Right.contains_ghost_cell([4, 2, 2], n));
        assert!(Face::Up.contains_ghost_cell([1, 5, 1], n));
        assert!(Face::Front.contains_ghost_cell([1, 1, 6], n));
        assert!(!Face::Back.contains_ghost_cell([1, 1, 1], n));
    }
}
