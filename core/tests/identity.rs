//! Identity pool sizing and collision handling.

use std::collections::HashSet;
use subgen_core::{
    config::GeneratorConfig,
    error::GenError,
    generator::Generator,
    identity::{IdentityPool, ID_CAPACITY},
    rng::GenRng,
};

#[test]
fn pool_has_exactly_the_requested_unique_ids() {
    let mut rng = GenRng::new(42);
    let pool = IdentityPool::generate(40_000, &mut rng).unwrap();
    assert_eq!(pool.len(), 40_000);
    let unique: HashSet<_> = pool.ids().iter().collect();
    assert_eq!(unique.len(), 40_000);
}

#[test]
fn oversized_pool_fails_instead_of_looping() {
    let mut rng = GenRng::new(42);
    let err = IdentityPool::generate(ID_CAPACITY + 1, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        GenError::IdentitySpaceExhausted { requested, capacity }
            if requested == ID_CAPACITY + 1 && capacity == ID_CAPACITY
    ));
}

#[test]
fn oversized_pool_is_rejected_before_generation() {
    let config = GeneratorConfig {
        user_pool_size: ID_CAPACITY * 2,
        ..GeneratorConfig::default_test("unused.csv")
    };
    assert!(matches!(
        Generator::with_builtin_catalog(config),
        Err(GenError::IdentitySpaceExhausted { .. })
    ));
}

#[test]
fn same_seed_same_pool() {
    let a = IdentityPool::generate(1_000, &mut GenRng::new(5)).unwrap();
    let b = IdentityPool::generate(1_000, &mut GenRng::new(5)).unwrap();
    assert_eq!(a.ids(), b.ids());
}
