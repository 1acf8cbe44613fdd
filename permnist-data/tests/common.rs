use permnist_data::datasets::idx;
use permnist_data::{InMemoryImages, LabeledImages, MnistSplit};
use std::fs;
use tempfile::TempDir;

// Each test binary that includes this module uses a different subset of it.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Writes `source` as the IDX files of `split` into a fresh scratch directory.
/// The directory is removed when the returned guard drops.
#[allow(dead_code)]
pub fn write_mnist_dir(name: &str, source: &InMemoryImages, split: MnistSplit) -> TempDir {
    let dir = tempfile::Builder::new()
        .prefix(&format!("permnist-it-{name}-"))
        .tempdir()
        .expect("create scratch dir");

    let (rows, cols) = source.image_dims();
    let images: Vec<&[u8]> = (0..source.num_images())
        .map(|i| source.pixels(i).expect("fixture image"))
        .collect();
    let labels: Vec<u8> = (0..source.num_images())
        .map(|i| source.label(i).expect("fixture label"))
        .collect();

    let (img_name, lbl_name) = split.file_names();
    fs::write(dir.path().join(img_name), idx::encode_images(&images, rows as u32, cols as u32))
        .expect("write images");
    fs::write(dir.path().join(lbl_name), idx::encode_labels(&labels)).expect("write labels");
    dir
}
