//! The minimal view of a base image dataset that the permuted variant needs.
//!
//! Anything that can report its size and hand out raw images and labels by
//! index can be permuted: the real MNIST files ([`MnistDataset`]) or the
//! synthetic [`InMemoryImages`] fixture.
//!
//! [`MnistDataset`]: crate::datasets::MnistDataset

use super::mnist::MnistSplit;
use permnist_core::PermnistError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// An indexed collection of 8-bit grayscale images with class labels.
pub trait LabeledImages {
    /// Number of (image, label) pairs.
    fn num_images(&self) -> usize;

    /// Image dimensions as `(rows, cols)`.
    fn image_dims(&self) -> (usize, usize);

    /// Row-major pixels of image `index`, or `None` past the end.
    fn pixels(&self, index: usize) -> Option<&[u8]>;

    /// Label of image `index`, or `None` past the end.
    fn label(&self, index: usize) -> Option<u8>;

    /// Which split the images belong to.
    fn split(&self) -> MnistSplit;

    /// Number of pixels in one image.
    fn pixel_count(&self) -> usize {
        let (rows, cols) = self.image_dims();
        rows * cols
    }
}

/// Images and labels held directly in memory.
///
/// Mostly useful as a stand-in for MNIST in tests and experiments that must
/// not touch the network.
#[derive(Debug, Clone)]
pub struct InMemoryImages {
    images: Vec<Vec<u8>>,
    labels: Vec<u8>,
    rows: usize,
    cols: usize,
    split: MnistSplit,
}

impl InMemoryImages {
    /// Wraps the given images and labels.
    ///
    /// # Errors
    ///
    /// * `PermnistError::CountMismatch` if there are not as many labels as images.
    /// * `PermnistError::ImageSizeMismatch` if an image is not `rows * cols` long.
    pub fn new(
        images: Vec<Vec<u8>>,
        labels: Vec<u8>,
        rows: usize,
        cols: usize,
        split: MnistSplit,
    ) -> Result<Self, PermnistError> {
        if images.len() != labels.len() {
            return Err(PermnistError::CountMismatch {
                images: images.len(),
                labels: labels.len(),
            });
        }
        let expected = rows * cols;
        if let Some((index, image)) = images
            .iter()
            .enumerate()
            .find(|(_, image)| image.len() != expected)
        {
            return Err(PermnistError::ImageSizeMismatch {
                index,
                expected,
                actual: image.len(),
            });
        }
        Ok(Self {
            images,
            labels,
            rows,
            cols,
            split,
        })
    }

    /// Generates `n` random `rows x cols` images with labels in `0..10`,
    /// reproducibly from `seed`.
    pub fn synthetic(n: usize, rows: usize, cols: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut images = Vec::with_capacity(n);
        let mut labels = Vec::with_capacity(n);
        for _ in 0..n {
            let mut img = vec![0u8; rows * cols];
            rng.fill(img.as_mut_slice());
            images.push(img);
            labels.push(rng.gen_range(0..10u8));
        }
        Self {
            images,
            labels,
            rows,
            cols,
            split: MnistSplit::Train,
        }
    }

    /// Same images, tagged with another split.
    pub fn with_split(mut self, split: MnistSplit) -> Self {
        self.split = split;
        self
    }
}

impl LabeledImages for InMemoryImages {
    fn num_images(&self) -> usize {
        self.images.len()
    }

    fn image_dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn pixels(&self, index: usize) -> Option<&[u8]> {
        self.images.get(index).map(Vec::as_slice)
    }

    fn label(&self, index: usize) -> Option<u8> {
        self.labels.get(index).copied()
    }

    fn split(&self) -> MnistSplit {
        self.split
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
