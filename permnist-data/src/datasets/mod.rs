pub mod idx;
pub mod mnist;
pub mod permuted_mnist;
pub mod source;
pub mod tasks;
pub mod traits;

pub use mnist::{MnistDataset, MnistSplit};
pub use permuted_mnist::PermutedMnist;
pub use source::{InMemoryImages, LabeledImages};
pub use tasks::PermutedTasks;
pub use traits::Dataset;
