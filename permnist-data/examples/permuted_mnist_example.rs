//! Builds a three-task permuted MNIST sequence and batches the first task.
//!
//! Downloads MNIST into `PERMNIST_DATA_DIR` (default `data/mnist`) on first
//! run. Run with `RUST_LOG=info` to see loading progress.

use permnist_data::{
    DataLoader, Dataset, MnistDataset, MnistSplit, PermutedMnistConfig, PermutedTasks,
    RandomSampler,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = PermutedMnistConfig::from_env()?;
    let seed = config.seed.unwrap_or(0);
    let train = MnistDataset::fetch(&config.root, MnistSplit::Train, config.download)?;
    let test = MnistDataset::fetch(&config.root, MnistSplit::Test, config.download)?;

    let tasks = PermutedTasks::new(3, 28 * 28, seed).with_identity_first(true);
    for task in 0..tasks.len() {
        let mut train_ds = tasks.build(task, &train, Some(seed))?;
        let test_ds = tasks.build(task, &test, Some(seed))?;
        let preview = train_ds.get_sample(4)?;
        println!(
            "task {task}: {} train / {} test images, sample of {} drawn",
            train_ds.len(),
            test_ds.len(),
            preview.len()
        );
    }

    let first = tasks.build(0, &train, Some(seed))?;
    let sampler = RandomSampler::new(false, None).with_seed(seed);
    let loader = DataLoader::new(first, 128, sampler, true, None)?;
    println!("task 0: {} batches of 128", loader.num_batches());
    for (i, batch) in loader.take(3).enumerate() {
        let batch = batch?;
        let labels: Vec<u8> = batch.iter().map(|(_, label)| *label).collect();
        println!("  batch {i}: first labels {:?}", &labels[..8]);
    }
    Ok(())
}
