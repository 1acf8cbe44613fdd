//! Core building blocks for permuted MNIST: the shared error type, pixel
//! permutations and intensity normalization. No I/O happens here.

pub mod error;
pub mod permutation;
pub mod pixels;

pub use error::PermnistError;
pub use permutation::Permutation;
pub use pixels::{denormalize, normalize, permute_normalize, MAX_INTENSITY};
