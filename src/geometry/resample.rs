use rayon::prelude::*;

/// Resamples a row-major 2D raster to another resolution by nearest-neighbor sampling.
///
/// The output cell `(x, y)` takes the value of the input cell
/// `(floor(x * width_in / width_out), floor(y * height_in / height_out))`. This handles both
/// magnification and minification. Values are never blended: markers are categorical.
///
/// The result always has `width_out * height_out` elements.
///
/// # Panics
/// If `values_in` doesn't hold `width_in * height_in` elements, or if it is empty while the
/// output isn't.
pub fn nearest_neighbor_resample<T: Copy + Send + Sync>(
    values_in: &[T],
    width_in: usize,
    height_in: usize,
    width_out: usize,
    height_out: usize,
) -> Vec<T> {
    assert_eq!(
        values_in.len(),
        width_in * height_in,
        "the input raster doesn't match its resolution"
    );

    let num_out = width_out * height_out;
    if num_out == 0 {
        return vec![];
    }

    assert!(
        width_in > 0 && height_in > 0,
        "cannot resample an empty raster"
    );

    if width_in == width_out && height_in == height_out {
        return values_in.to_vec();
    }

    (0..num_out)
        .into_par_iter()
        .map(|id| {
            let (x_out, y_out) = (id % width_out, id / width_out);
            let x_in = (x_out * width_in / width_out).min(width_in - 1);
            let y_in = (y_out * height_in / height_out).min(height_in - 1);
            values_in[y_in * width_in + x_in]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::nearest_neighbor_resample;

    #[test]
    fn same_resolution_is_identity() {
        let values: Vec<u32> = (0..12).collect();
        assert_eq!(nearest_neighbor_resample(&values, 4, 3, 4, 3), values);
    }

    #[test]
    fn upsampling_replicates_cells() {
        let values = [1u32, 2, 3, 4];
        let out = nearest_neighbor_resample(&values, 2, 2, 4, 4);
        assert_eq!(out.len(), 16);
        assert_eq!(
            out,
            vec![1, 1, 2, 2, 1, 1, 2, 2, 3, 3, 4, 4, 3, 3, 4, 4]
        );
    }

    #[test]
    fn downsampling_picks_cells() {
        let values: Vec<u32> = (0..16).collect();
        let out = nearest_neighbor_resample(&values, 4, 4, 2, 2);
        assert_eq!(out, vec![0, 2, 8, 10]);
    }

    #[test]
    fn output_size_is_independent_of_input_size() {
        let mut rng = oorandom::Rand32::new(42);

        for _ in 0..50 {
            let (wi, hi) = (1 + rng.rand_range(0..9) as usize, 1 + rng.rand_range(0..9) as usize);
            let (wo, ho) = (1 + rng.rand_range(0..9) as usize, 1 + rng.rand_range(0..9) as usize);
            let values: Vec<u8> = (0..wi * hi).map(|_| rng.rand_range(0..8) as u8).collect();
            let out = nearest_neighbor_resample(&values, wi, hi, wo, ho);
            assert_eq!(out.len(), wo * ho);
            assert!(out.iter().all(|v| values.contains(v)));
        }
    }

    #[test]
    fn mixed_magnification_and_minification() {
        // 3 wide, 1 high -> 1 wide, 2 high.
        let out = nearest_neighbor_resample(&[7u8, 8, 9], 3, 1, 1, 2);
        assert_eq!(out, vec![7, 7]);
    }
}
