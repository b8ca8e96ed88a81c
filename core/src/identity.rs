//! Identity pool and per-user country bindings.
//!
//! Ids are drawn once up front and reused across records, so one user
//! can own several subscriptions (renewals). The first record drawn for
//! a user fixes that user's country for the rest of the run.

use crate::{
    catalog::Catalog,
    error::{GenError, GenResult},
    rng::GenRng,
    types::{CountryName, UserId},
};
use std::collections::{HashMap, HashSet};

/// Smallest numeric part of a user id.
pub const ID_MIN: u64 = 100_000;
/// Largest numeric part of a user id.
pub const ID_MAX: u64 = 999_999;
/// Number of distinct ids the `U-NNNNNN` format can represent.
pub const ID_CAPACITY: usize = (ID_MAX - ID_MIN + 1) as usize;
/// Retry budget per requested id before giving up.
pub const MAX_DRAWS_PER_ID: u64 = 64;

pub fn format_user_id(n: u64) -> UserId {
    format!("U-{n}")
}

#[derive(Debug)]
pub struct IdentityPool {
    ids: Vec<UserId>,
}

impl IdentityPool {
    /// Draw `count` distinct ids. Collisions are retried; asking for more
    /// ids than the format holds fails immediately instead of looping.
    pub fn generate(count: usize, rng: &mut GenRng) -> GenResult<Self> {
        if count > ID_CAPACITY {
            return Err(GenError::IdentitySpaceExhausted {
                requested: count,
                capacity: ID_CAPACITY,
            });
        }

        let budget = (count as u64).saturating_mul(MAX_DRAWS_PER_ID).max(MAX_DRAWS_PER_ID);
        let span = ID_MAX - ID_MIN + 1;
        let mut seen = HashSet::with_capacity(count);
        let mut ids = Vec::with_capacity(count);
        let mut draws = 0u64;

        while ids.len() < count {
            if draws >= budget {
                return Err(GenError::IdentityDrawsExhausted {
                    requested: count,
                    generated: ids.len(),
                    draws,
                });
            }
            draws += 1;
            let n = ID_MIN + rng.next_u64_below(span);
            if seen.insert(n) {
                ids.push(format_user_id(n));
            }
        }

        let collisions = draws - count as u64;
        if count > 0 && collisions > count as u64 {
            log::warn!("identity pool: {collisions} collisions drawing {count} ids");
        } else {
            log::debug!("identity pool: {count} ids, {collisions} collisions");
        }
        Ok(Self { ids })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[UserId] {
        &self.ids
    }

    /// Uniform pick of one id.
    pub fn pick<'a>(&'a self, rng: &mut GenRng) -> GenResult<&'a UserId> {
        rng.pick(&self.ids)
            .ok_or_else(|| GenError::InvalidConfig("identity pool is empty".into()))
    }
}

/// First-use country for each user. Read-modify-write per call; owned
/// by a single synthesizer.
#[derive(Debug, Default)]
pub struct CountryBindings {
    bound: HashMap<UserId, CountryName>,
}

impl CountryBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Country for `user_id`, sampling one from the country weights the
    /// first time the user is seen.
    pub fn bind_country(
        &mut self,
        user_id: &str,
        catalog: &Catalog,
        rng: &mut GenRng,
    ) -> GenResult<&str> {
        if !self.bound.contains_key(user_id) {
            let countries = catalog.countries();
            let idx = rng
                .weighted_index(countries.iter().map(|c| c.weight))
                .ok_or_else(|| GenError::InvalidConfig("no weighted countries".into()))?;
            self.bound
                .insert(user_id.to_string(), countries[idx].name.clone());
        }
        Ok(self.bound[user_id].as_str())
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_use_six_digit_format() {
        let mut rng = GenRng::new(1);
        let pool = IdentityPool::generate(200, &mut rng).unwrap();
        for id in pool.ids() {
            let digits = id.strip_prefix("U-").expect("U- prefix");
            assert_eq!(digits.len(), 6, "{id}");
            let n: u64 = digits.parse().unwrap();
            assert!((ID_MIN..=ID_MAX).contains(&n));
        }
    }

    #[test]
    fn zero_ids_is_an_empty_pool() {
        let mut rng = GenRng::new(1);
        let pool = IdentityPool::generate(0, &mut rng).unwrap();
        assert!(pool.is_empty());
        assert!(pool.pick(&mut rng).is_err());
    }

    #[test]
    fn binding_is_sticky() {
        let catalog = Catalog::builtin();
        let mut rng = GenRng::new(8);
        let mut bindings = CountryBindings::new();
        let first = bindings.bind_country("U-123456", &catalog, &mut rng).unwrap().to_string();
        for _ in 0..50 {
            assert_eq!(bindings.bind_country("U-123456", &catalog, &mut rng).unwrap(), first);
        }
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn rebinding_does_not_consume_randomness() {
        let catalog = Catalog::builtin();
        let mut a = GenRng::new(21);
        let mut b = GenRng::new(21);
        let mut bindings = CountryBindings::new();
        bindings.bind_country("U-111111", &catalog, &mut a).unwrap();
        bindings.bind_country("U-111111", &catalog, &mut a).unwrap();
        CountryBindings::new().bind_country("U-111111", &catalog, &mut b).unwrap();
        assert_eq!(a.next_u64_below(1 << 40), b.next_u64_below(1 << 40));
    }
}
