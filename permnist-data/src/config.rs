// permnist-data/src/config.rs

use crate::datasets::MnistSplit;
use log::debug;
use permnist_core::{PermnistError, Permutation};
use std::path::PathBuf;

/// Overrides the storage root when set.
pub const DATA_DIR_ENV: &str = "PERMNIST_DATA_DIR";
/// Overrides the seed when set; must parse as `u64`.
pub const SEED_ENV: &str = "PERMNIST_SEED";
/// Where MNIST is cached when nothing else is configured.
pub const DEFAULT_ROOT: &str = "data/mnist";

/// Everything needed to build a [`PermutedMnist`].
///
/// [`PermutedMnist`]: crate::datasets::PermutedMnist
#[derive(Debug, Clone, PartialEq)]
pub struct PermutedMnistConfig {
    /// Directory holding (or receiving) the MNIST files.
    pub root: PathBuf,
    /// Which split to load.
    pub split: MnistSplit,
    /// Explicit permutation; drawn at random when `None`.
    pub permutation: Option<Permutation>,
    /// Seed for drawing the permutation and for sampling.
    pub seed: Option<u64>,
    /// Download the files when they are missing under `root`.
    pub download: bool,
}

impl Default for PermutedMnistConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            split: MnistSplit::Train,
            permutation: None,
            seed: None,
            download: true,
        }
    }
}

impl PermutedMnistConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Default configuration with `PERMNIST_DATA_DIR` and `PERMNIST_SEED`
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns `PermnistError::InvalidConfig` if the seed variable is not a `u64`.
    pub fn from_env() -> Result<Self, PermnistError> {
        Self::default().with_overrides(
            std::env::var(DATA_DIR_ENV).ok(),
            std::env::var(SEED_ENV).ok(),
        )
    }

    /// Applies raw override values the way `from_env` does.
    pub fn with_overrides(
        mut self,
        data_dir: Option<String>,
        seed: Option<String>,
    ) -> Result<Self, PermnistError> {
        if let Some(dir) = data_dir.filter(|d| !d.trim().is_empty()) {
            debug!("PermutedMnistConfig: root overridden to {}", dir);
            self.root = PathBuf::from(dir);
        }
        if let Some(raw) = seed {
            let parsed = raw.trim().parse::<u64>().map_err(|e| {
                PermnistError::InvalidConfig(format!("{SEED_ENV}={raw:?} is not a valid seed: {e}"))
            })?;
            debug!("PermutedMnistConfig: seed overridden to {}", parsed);
            self.seed = Some(parsed);
        }
        Ok(self)
    }

    pub fn with_split(mut self, split: MnistSplit) -> Self {
        self.split = split;
        self
    }

    pub fn with_train(self, train: bool) -> Self {
        self.with_split(MnistSplit::from_train_flag(train))
    }

    pub fn with_permutation(mut self, permutation: Permutation) -> Self {
        self.permutation = Some(permutation);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_download(mut self, download: bool) -> Self {
        self.download = download;
        self
    }

    /// Checks what can be checked before any file is read.
    ///
    /// The permutation length against the image size is checked at
    /// construction, once the images are known.
    pub fn validate(&self) -> Result<(), PermnistError> {
        if self.root.as_os_str().is_empty() {
            return Err(PermnistError::InvalidConfig(
                "storage root must not be empty".to_string(),
            ));
        }
        if self.permutation.as_ref().is_some_and(Permutation::is_empty) {
            return Err(PermnistError::InvalidConfig(
                "an explicit permutation must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
