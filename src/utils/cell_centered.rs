use crate::math::Real;
use crate::tracing::StaggeredFieldSampler;
use rayon::prelude::*;

/// The velocity components at the centers of the interior cells.
///
/// Each component is the mean of the two faces bounding the cell along its axis. The three
/// arrays hold `nx * ny * nz` values each, `k` being the fastest index.
pub fn cell_centered_velocity(sampler: &StaggeredFieldSampler) -> [Vec<Real>; 3] {
    let [nx, ny, nz] = sampler.geometry().num_cells();
    let snapshot = sampler.snapshot();
    let (u, v, w) = (snapshot.u, snapshot.v, snapshot.w);

    let centered: Vec<[Real; 3]> = (0..nx * ny * nz)
        .into_par_iter()
        .map(|id| {
            let i = id / (ny * nz) + 1;
            let j = (id / nz) % ny + 1;
            let k = id % nz + 1;

            [
                0.5 * (u[(i - 1, j, k)] + u[(i, j, k)]),
                0.5 * (v[(i, j - 1, k)] + v[(i, j, k)]),
                0.5 * (w[(i, j, k - 1)] + w[(i, j, k)]),
            ]
        })
        .collect();

    let mut result = [
        Vec::with_capacity(centered.len()),
        Vec::with_capacity(centered.len()),
        Vec::with_capacity(centered.len()),
    ];
    for vel in centered {
        for a in 0..3 {
            result[a].push(vel[a]);
        }
    }

    result
}
