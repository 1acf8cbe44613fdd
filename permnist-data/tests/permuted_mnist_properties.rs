use permnist_data::{
    Dataset, InMemoryImages, LabeledImages, MnistSplit, PermnistError, PermutedMnist,
    PermutedMnistConfig, Permutation,
};
use std::collections::HashSet;

mod common;
use common::{init_logger, write_mnist_dir};

const N: usize = 12;

#[test]
fn test_new_loads_split_and_permutes() {
    init_logger();
    let base = InMemoryImages::synthetic(N, 28, 28, 1).with_split(MnistSplit::Test);
    let dir = write_mnist_dir("new", &base, MnistSplit::Test);

    let p = Permutation::seeded(784, 5);
    let ds = PermutedMnist::new(dir.path(), false, Some(p.clone())).unwrap();
    assert_eq!(ds.len(), N);
    assert_eq!(ds.split(), MnistSplit::Test);
    for i in 0..N {
        let (image, label) = ds.get(i).unwrap();
        assert_eq!(Some(label), base.label(i));
        let expected: Vec<f32> = permnist_core::permute_normalize(base.pixels(i).unwrap(), &p).unwrap();
        assert_eq!(image, expected);
    }
}

#[test]
fn test_every_image_shares_one_permutation() {
    init_logger();
    let base = InMemoryImages::synthetic(N, 28, 28, 2);
    let dir = write_mnist_dir("shared", &base, MnistSplit::Train);
    let config = PermutedMnistConfig::new(dir.path()).with_seed(77).with_download(false);
    let ds = PermutedMnist::from_config(&config).unwrap();

    let inverse = ds.permutation().inverse();
    for i in 0..N {
        let restored = inverse.apply(ds.image(i).unwrap()).unwrap();
        let original: Vec<f32> = permnist_core::normalize(base.pixels(i).unwrap());
        assert_eq!(restored, original, "image {i} was not moved by the shared permutation");
    }
}

#[test]
fn test_ten_entry_permutation_is_rejected() {
    init_logger();
    let base = InMemoryImages::synthetic(2, 28, 28, 3);
    let dir = write_mnist_dir("short-perm", &base, MnistSplit::Train);
    let err = PermutedMnist::new(dir.path(), true, Some(Permutation::identity(10))).unwrap_err();
    assert_eq!(
        err,
        PermnistError::PermutationLengthMismatch {
            expected: 784,
            actual: 10
        }
    );
}

#[test]
fn test_missing_split_without_download() {
    let base = InMemoryImages::synthetic(2, 28, 28, 4);
    // Only the training files exist.
    let dir = write_mnist_dir("no-test-split", &base, MnistSplit::Train);
    let config = PermutedMnistConfig::new(dir.path())
        .with_train(false)
        .with_download(false);
    assert!(matches!(
        PermutedMnist::from_config(&config),
        Err(PermnistError::MissingFile(_))
    ));
}

#[test]
fn test_sampling_whole_dataset_and_beyond() {
    let base = InMemoryImages::synthetic(N, 28, 28, 5);
    let mut ds = PermutedMnist::from_source(&base, None, Some(6)).unwrap();

    let sample = ds.get_sample(N).unwrap();
    assert_eq!(sample.len(), N);
    let distinct: HashSet<Vec<u32>> = sample
        .iter()
        .map(|img| img.iter().map(|v| v.to_bits()).collect())
        .collect();
    assert_eq!(distinct.len(), N);

    assert!(matches!(
        ds.get_sample(N + 1),
        Err(PermnistError::SampleSizeTooLarge { requested, available }) if requested == N + 1 && available == N
    ));
}

#[test]
fn test_all_values_in_unit_interval() {
    let base = InMemoryImages::synthetic(N, 28, 28, 7);
    let ds = PermutedMnist::from_source(&base, None, None).unwrap();
    for i in 0..ds.len() {
        let (image, _) = ds.get(i).unwrap();
        assert!(image.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }
}

#[test]
fn test_fixture_dir_removed_even_when_loading_fails() {
    let base = InMemoryImages::synthetic(2, 28, 28, 8);
    let dir = write_mnist_dir("cleanup", &base, MnistSplit::Train);
    let path = dir.path().to_path_buf();

    let outcome = std::panic::catch_unwind(|| {
        let ds = PermutedMnist::new(&path, true, None).unwrap();
        assert_eq!(ds.len(), 3, "fixture holds two images");
    });
    assert!(outcome.is_err());
    assert!(path.exists());

    drop(dir);
    assert!(!path.exists());
}
