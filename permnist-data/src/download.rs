//! Fetching the MNIST archives into the local cache directory.
//!
//! With the `download` feature (on by default) the `mnist` crate's downloader
//! fetches and extracts the four IDX files so that a file like
//! `<root>/train-images-idx3-ubyte` is available afterwards. Without the
//! feature nothing is fetched and loading reports the missing file.

use std::path::Path;

use permnist_core::PermnistError;

/// Downloads and extracts MNIST into `dir`, creating it if needed.
///
/// The downloader reports failures by panicking. The panic is caught and
/// returned as `PermnistError::DownloadFailed`, but the process panic hook
/// still runs first, so the default hook prints the panic message to stderr
/// before the error reaches the caller.
#[cfg(feature = "download")]
pub fn download_mnist(dir: &Path) -> Result<(), PermnistError> {
    use log::info;
    use mnist::MnistBuilder;

    std::fs::create_dir_all(dir).map_err(|e| PermnistError::io(dir, e))?;

    // The downloader concatenates this prefix with file names.
    let base_path = format!("{}/", dir.to_string_lossy().trim_end_matches('/'));
    info!("Downloading MNIST into {}", base_path);

    // The downloader reports failures by panicking; turn that into an error.
    std::panic::catch_unwind(|| {
        // We drop the returned data; only the files left on disk matter.
        let _ = MnistBuilder::new()
            .base_path(&base_path)
            .download_and_extract()
            .finalize();
    })
    .map_err(|payload| PermnistError::DownloadFailed(panic_message(&*payload)))?;

    info!("MNIST download into {} finished", base_path);
    Ok(())
}

/// Text of a caught panic payload.
#[cfg(feature = "download")]
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "downloader panicked".to_string())
}

/// Built without the `download` feature: nothing to fetch.
#[cfg(not(feature = "download"))]
pub fn download_mnist(dir: &Path) -> Result<(), PermnistError> {
    log::warn!(
        "permnist-data was built without the `download` feature; not fetching MNIST into {}",
        dir.display()
    );
    Ok(())
}

#[cfg(all(test, feature = "download"))]
#[path = "download_test.rs"]
mod tests;
