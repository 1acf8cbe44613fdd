// permnist-core/src/permutation_test.rs

use super::*;
use std::collections::HashSet;

#[test]
fn test_new_accepts_bijection() {
    let p = Permutation::new(vec![2, 0, 1]).unwrap();
    assert_eq!(p.len(), 3);
    assert_eq!(p.as_slice(), &[2, 0, 1]);
    assert!(!p.is_identity());
}

#[test]
fn test_new_rejects_out_of_range() {
    match Permutation::new(vec![0, 3, 1]) {
        Err(PermnistError::InvalidPermutation { index, len, .. }) => {
            assert_eq!(index, 1);
            assert_eq!(len, 3);
        }
        other => panic!("Expected InvalidPermutation, got {:?}", other),
    }
}

#[test]
fn test_new_rejects_duplicates() {
    match Permutation::new(vec![1, 0, 1]) {
        Err(PermnistError::InvalidPermutation { index, .. }) => assert_eq!(index, 2),
        other => panic!("Expected InvalidPermutation, got {:?}", other),
    }
}

#[test]
fn test_empty_permutation_is_valid() {
    let p = Permutation::new(Vec::new()).unwrap();
    assert!(p.is_empty());
    assert!(p.is_identity());
}

#[test]
fn test_identity() {
    let p = Permutation::identity(5);
    assert!(p.is_identity());
    assert_eq!(p.apply(&[10, 20, 30, 40, 50]).unwrap(), vec![10, 20, 30, 40, 50]);
}

#[test]
fn test_random_is_bijection() {
    let mut rng = StdRng::seed_from_u64(7);
    let p = Permutation::random(784, &mut rng);
    assert_eq!(p.len(), 784);
    let unique: HashSet<usize> = p.as_slice().iter().copied().collect();
    assert_eq!(unique.len(), 784);
    assert!(p.as_slice().iter().all(|&i| i < 784));
    // Re-validating through the checked constructor must succeed.
    assert!(Permutation::new(p.clone().into_inner()).is_ok());
}

#[test]
fn test_seeded_is_reproducible() {
    let a = Permutation::seeded(784, 42);
    let b = Permutation::seeded(784, 42);
    let c = Permutation::seeded(784, 43);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_check_len() {
    let p = Permutation::identity(10);
    assert!(p.check_len(10).is_ok());
    assert_eq!(
        p.check_len(784),
        Err(PermnistError::PermutationLengthMismatch {
            expected: 784,
            actual: 10
        })
    );
}

#[test]
fn test_apply_gathers_from_source() {
    let p = Permutation::new(vec![2, 0, 1]).unwrap();
    assert_eq!(p.apply(&['a', 'b', 'c']).unwrap(), vec!['c', 'a', 'b']);
}

#[test]
fn test_apply_wrong_length() {
    let p = Permutation::identity(3);
    assert!(matches!(
        p.apply(&[1u8, 2]),
        Err(PermnistError::PermutationLengthMismatch { expected: 2, actual: 3 })
    ));
}

#[test]
fn test_inverse_restores_original() {
    let p = Permutation::seeded(100, 3);
    let src: Vec<u32> = (0..100).map(|x| x * 7 + 1).collect();
    let permuted = p.apply(&src).unwrap();
    let restored = p.inverse().apply(&permuted).unwrap();
    assert_eq!(restored, src);
}

#[test]
fn test_inverse_of_inverse() {
    let p = Permutation::seeded(50, 11);
    assert_eq!(p.inverse().inverse(), p);
}

#[test]
fn test_then_matches_sequential_application() {
    let p = Permutation::seeded(20, 1);
    let q = Permutation::seeded(20, 2);
    let src: Vec<usize> = (100..120).collect();
    let sequential = q.apply(&p.apply(&src).unwrap()).unwrap();
    let composed = p.then(&q).unwrap().apply(&src).unwrap();
    assert_eq!(composed, sequential);
}

#[test]
fn test_then_with_inverse_is_identity() {
    let p = Permutation::seeded(30, 9);
    assert!(p.then(&p.inverse()).unwrap().is_identity());
}

#[test]
fn test_then_length_mismatch() {
    let p = Permutation::identity(4);
    let q = Permutation::identity(5);
    assert!(p.then(&q).is_err());
}

#[test]
fn test_try_from_vec() {
    let p: Permutation = vec![1, 0].try_into().unwrap();
    assert_eq!(p.as_ref(), &[1, 0]);
    let bad: Result<Permutation, _> = vec![0, 0].try_into();
    assert!(bad.is_err());
}
