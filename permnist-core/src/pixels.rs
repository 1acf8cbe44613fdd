// src/pixels.rs

use crate::error::PermnistError;
use crate::permutation::Permutation;
use num_traits::Float;

/// Largest intensity an 8-bit grayscale pixel can take.
pub const MAX_INTENSITY: u8 = u8::MAX;

/// Scales raw 8-bit intensities into `[0, 1]`.
pub fn normalize<F>(pixels: &[u8]) -> Vec<F>
where
    F: Float + From<u8>,
{
    let max = <F as From<u8>>::from(MAX_INTENSITY);
    pixels
        .iter()
        .map(|&p| <F as From<u8>>::from(p) / max)
        .collect()
}

/// Flattened image reordered by `permutation`, then scaled into `[0, 1]`.
///
/// This is the whole per-image transformation of a permuted dataset.
///
/// # Errors
///
/// Returns `PermnistError::PermutationLengthMismatch` if the permutation does
/// not have one entry per pixel.
pub fn permute_normalize<F>(pixels: &[u8], permutation: &Permutation) -> Result<Vec<F>, PermnistError>
where
    F: Float + From<u8>,
{
    permutation.check_len(pixels.len())?;
    let max = <F as From<u8>>::from(MAX_INTENSITY);
    Ok(permutation
        .as_slice()
        .iter()
        .map(|&src| <F as From<u8>>::from(pixels[src]) / max)
        .collect())
}

/// Maps normalized values back to 8-bit intensities, rounding to nearest.
///
/// Values outside `[0, 1]` saturate; NaN maps to 0.
pub fn denormalize<F: Float>(values: &[F]) -> Vec<u8> {
    let max = F::from(MAX_INTENSITY).unwrap_or_else(F::one);
    values
        .iter()
        .map(|&v| {
            (v * max)
                .round()
                .max(F::zero())
                .min(max)
                .to_u8()
                .unwrap_or(0)
        })
        .collect()
}

#[cfg(test)]
#[path = "pixels_test.rs"]
mod tests;
