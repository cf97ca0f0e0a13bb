use super::Face;
use crate::error::GeometryError;
use rayon::prelude::*;
use std::ops::{Index, IndexMut};

/// A dense 3D array backed by a single flat buffer.
///
/// Elements are addressed by `(i, j, k)` with `k` being the fastest changing index, i.e.,
/// the element `(i, j, k)` lives at `i * sy * sz + j * sz + k`. This is the memory layout the
/// solver uses for its ghost-extended arrays, so the flat buffer can be handed over as-is.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Grid3<T> {
    dims: [usize; 3],
    data: Vec<T>,
}

impl<T: Clone> Grid3<T> {
    pub fn from_elem(dims: [usize; 3], value: T) -> Self {
        Self {
            dims,
            data: vec![value; dims[0] * dims[1] * dims[2]],
        }
    }
}

impl<T> Grid3<T> {
    /// Wraps an existing flat buffer laid out with `k` as the fastest index.
    pub fn from_vec(dims: [usize; 3], data: Vec<T>) -> Result<Self, GeometryError> {
        if data.len() != dims[0] * dims[1] * dims[2] {
            return Err(GeometryError::BufferLength {
                dims,
                found: data.len(),
            });
        }

        Ok(Self { dims, data })
    }

    pub fn from_fn(dims: [usize; 3], mut f: impl FnMut(usize, usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(dims[0] * dims[1] * dims[2]);

        for i in 0..dims[0] {
            for j in 0..dims[1] {
                for k in 0..dims[2] {
                    data.push(f(i, j, k));
                }
            }
        }

        Self { dims, data }
    }

    /// Evaluates `f` on every `(i, j, k)` index in parallel.
    pub fn from_par_fn(dims: [usize; 3], f: impl Fn([usize; 3]) -> T + Sync) -> Self
    where
        T: Send,
    {
        let plane = dims[1] * dims[2];
        let data = (0..dims[0] * plane)
            .into_par_iter()
            .map(|id| f([id / plane, (id % plane) / dims[2], id % dims[2]]))
            .collect();

        Self { dims, data }
    }

    #[inline(always)]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[inline(always)]
    pub fn linear_index(&self, i: usize, j: usize, k: usize) -> Option<usize> {
        if i < self.dims[0] && j < self.dims[1] && k < self.dims[2] {
            Some(i * self.dims[1] * self.dims[2] + j * self.dims[2] + k)
        } else {
            None
        }
    }

    /// The `(i, j, k)` index of the element at `linear_index` in the flat buffer.
    #[inline(always)]
    pub fn unravel(&self, linear_index: usize) -> [usize; 3] {
        let plane = self.dims[1] * self.dims[2];
        [
            linear_index / plane,
            (linear_index % plane) / self.dims[2],
            linear_index % self.dims[2],
        ]
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<&T> {
        self.linear_index(i, j, k).map(|id| &self.data[id])
    }

    #[inline]
    pub fn get_mut(&mut self, i: usize, j: usize, k: usize) -> Option<&mut T> {
        match self.linear_index(i, j, k) {
            Some(id) => Some(&mut self.data[id]),
            None => None,
        }
    }

    /// The element across the given face of `(i, j, k)`, if it exists.
    pub fn neighbor(&self, ijk: [usize; 3], face: Face) -> Option<&T> {
        let shift = face.shift();
        let mut nbh = [0; 3];

        for a in 0..3 {
            let id = ijk[a] as isize + shift[a];
            if id < 0 {
                return None;
            }
            nbh[a] = id as usize;
        }

        self.get(nbh[0], nbh[1], nbh[2])
    }
}

impl<T> Index<(usize, usize, usize)> for Grid3<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j, k): (usize, usize, usize)) -> &T {
        match self.linear_index(i, j, k) {
            Some(id) => &self.data[id],
            None => panic!(
                "index ({}, {}, {}) out of bounds for a grid of dimensions {:?}",
                i, j, k, self.dims
            ),
        }
    }
}

impl<T> IndexMut<(usize, usize, usize)> for Grid3<T> {
    #[inline]
    fn index_mut(&mut self, (i, j, k): (usize, usize, usize)) -> &mut T {
        let dims = self.dims;
        match self.linear_index(i, j, k) {
            Some(id) => &mut self.data[id],
            None => panic!(
                "index ({}, {}, {}) out of bounds for a grid of dimensions {:?}",
                i, j, k, dims
            ),
        }
    }
}
