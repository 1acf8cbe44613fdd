// MNIST dataset loader
//
// The MNIST database consists of 4 files:
//   - train-images-idx3-ubyte  (60,000  28x28 images)
//   - train-labels-idx1-ubyte  (60,000  labels 0-9)
//   - t10k-images-idx3-ubyte   (10,000  28x28 images)
//   - t10k-labels-idx1-ubyte   (10,000  labels 0-9)
//
// Files may be stored plain or gzip-compressed (`.gz`); the plain file wins
// when both exist.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use log::{debug, info};
use permnist_core::PermnistError;

use super::idx;
use super::source::LabeledImages;
use super::traits::Dataset;

/// Which split of MNIST to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MnistSplit {
    #[default]
    Train,
    Test,
}

impl MnistSplit {
    /// Maps a `train` flag onto a split.
    pub fn from_train_flag(train: bool) -> Self {
        if train {
            MnistSplit::Train
        } else {
            MnistSplit::Test
        }
    }

    pub fn is_train(self) -> bool {
        self == MnistSplit::Train
    }

    /// Base names of the (images, labels) files for this split.
    pub fn file_names(self) -> (&'static str, &'static str) {
        match self {
            MnistSplit::Train => ("train-images-idx3-ubyte", "train-labels-idx1-ubyte"),
            MnistSplit::Test => ("t10k-images-idx3-ubyte", "t10k-labels-idx1-ubyte"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MnistSplit::Train => "MNIST-train",
            MnistSplit::Test => "MNIST-test",
        }
    }
}

/// A loaded MNIST split stored entirely in memory.
///
/// Images are stored as raw `u8` intensities (28x28 = 784 bytes each).
#[derive(Debug, Clone)]
pub struct MnistDataset {
    images: Vec<Vec<u8>>,
    labels: Vec<u8>,
    rows: usize,
    cols: usize,
    split: MnistSplit,
}

impl MnistDataset {
    /// Loads one split from `dir`, which must already hold the files.
    ///
    /// # Errors
    ///
    /// `MissingFile` when neither the plain nor the `.gz` file exists, plus
    /// any parse error from the IDX decoder.
    pub fn load(dir: impl AsRef<Path>, split: MnistSplit) -> Result<Self, PermnistError> {
        let dir = dir.as_ref();
        let (img_name, lbl_name) = split.file_names();

        let img_bytes = read_maybe_gz(dir, img_name)?;
        let lbl_bytes = read_maybe_gz(dir, lbl_name)?;

        let ds = Self::from_raw(&img_bytes, &lbl_bytes, split)?;
        info!(
            "Loaded {} ({} images of {}x{}) from {}",
            split.name(),
            ds.num_samples(),
            ds.rows,
            ds.cols,
            dir.display()
        );
        Ok(ds)
    }

    /// Loads one split, downloading the files into `dir` first if they are
    /// missing and `download` is set.
    pub fn fetch(
        dir: impl AsRef<Path>,
        split: MnistSplit,
        download: bool,
    ) -> Result<Self, PermnistError> {
        let dir = dir.as_ref();
        if download && !files_present(dir, split) {
            crate::download::download_mnist(dir)?;
        }
        Self::load(dir, split)
    }

    /// Decodes a split from in-memory IDX bytes.
    pub fn from_raw(
        image_bytes: &[u8],
        label_bytes: &[u8],
        split: MnistSplit,
    ) -> Result<Self, PermnistError> {
        let parsed = idx::parse_images(image_bytes)?;
        let labels = idx::parse_labels(label_bytes)?;

        if parsed.images.len() != labels.len() {
            return Err(PermnistError::CountMismatch {
                images: parsed.images.len(),
                labels: labels.len(),
            });
        }

        Ok(Self {
            images: parsed.images,
            labels,
            rows: parsed.rows,
            cols: parsed.cols,
            split,
        })
    }

    /// Total number of samples.
    pub fn num_samples(&self) -> usize {
        self.images.len()
    }

    /// Keeps only the first `n` samples (useful for quick experiments).
    pub fn take(mut self, n: usize) -> Self {
        let n = n.min(self.images.len());
        self.images.truncate(n);
        self.labels.truncate(n);
        self
    }
}

impl LabeledImages for MnistDataset {
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

impl Dataset for MnistDataset {
    type Item = (Vec<u8>, u8);

    fn get(&self, index: usize) -> Result<Self::Item, PermnistError> {
        match (self.images.get(index), self.labels.get(index)) {
            (Some(img), Some(&label)) => Ok((img.clone(), label)),
            _ => Err(PermnistError::IndexOutOfBounds {
                index,
                len: self.images.len(),
            }),
        }
    }

    fn len(&self) -> usize {
        self.images.len()
    }
}

/// Whether both files of `split` exist under `dir`, plain or compressed.
pub fn files_present(dir: &Path, split: MnistSplit) -> bool {
    let (img_name, lbl_name) = split.file_names();
    [img_name, lbl_name]
        .iter()
        .all(|name| dir.join(name).exists() || gz_path(dir, name).exists())
}

fn gz_path(dir: &Path, base_name: &str) -> PathBuf {
    dir.join(format!("{base_name}.gz"))
}

/// Reads a file, trying plain first then the `.gz` variant.
fn read_maybe_gz(dir: &Path, base_name: &str) -> Result<Vec<u8>, PermnistError> {
    let plain = dir.join(base_name);
    let gz = gz_path(dir, base_name);

    if plain.exists() {
        debug!("Reading {}", plain.display());
        fs::read(&plain).map_err(|e| PermnistError::io(&plain, e))
    } else if gz.exists() {
        debug!("Decompressing {}", gz.display());
        let compressed = fs::read(&gz).map_err(|e| PermnistError::io(&gz, e))?;
        let mut out = Vec::new();
        GzDecoder::new(compressed.as_slice())
            .read_to_end(&mut out)
            .map_err(|e| PermnistError::Decompression {
                path: gz.clone(),
                message: e.to_string(),
            })?;
        Ok(out)
    } else {
        Err(PermnistError::MissingFile(plain))
    }
}

#[cfg(test)]
#[path = "mnist_test.rs"]
mod tests;
