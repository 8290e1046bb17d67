/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The group registry: one [`IpGroup`] per integer key.
//!
//! A registry is built once per simulation run (either generated or from the
//! configuration file) and then handed to the scheduler by `&mut` for every
//! pass.  There is no process-wide instance.

use std::collections::btree_map::{self, BTreeMap};

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::group::{IpGroup, DEFAULT_IDENTIFIER_COUNT};

/// Number of groups in the default registry (keys `0..100`).
pub const DEFAULT_GROUP_COUNT: u32 = 100;

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors raised while building a [`GroupRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A group is already registered under `key`.
    #[error("group key {key} is already registered")]
    DuplicateKey { key: i64 },

    /// Poll rates must be non-negative.
    #[error("group {key} has negative poll rate {poll_rate}")]
    NegativePollRate { key: i64, poll_rate: i64 },
}

// ── GroupRegistry ─────────────────────────────────────────────────────────────

/// Mapping from group key to [`IpGroup`].
///
/// `BTreeMap` (not `HashMap`) so iteration is always in ascending key order,
/// which makes every scheduler pass deterministic for a given registry.
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    groups: BTreeMap<i64, IpGroup>,
}

impl GroupRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate `count` groups with keys `0..count`.
    ///
    /// The group at key `i` polls at rate `i` and carries
    /// `identifiers_per_group` random identifiers.  Key `0` therefore has
    /// poll rate `0` and always lands in bucket `0`.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        count: u32,
        identifiers_per_group: usize,
    ) -> Self {
        let groups: BTreeMap<i64, IpGroup> = (0..i64::from(count))
            .map(|key| {
                let group = IpGroup::with_random_identifiers(rng, identifiers_per_group, key);
                (key, group)
            })
            .collect();

        info!(
            group_count = groups.len(),
            identifiers_per_group, "Generated group registry"
        );

        Self { groups }
    }

    /// The reference setup: 100 groups, two identifiers each.
    pub fn generate_default<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::generate(rng, DEFAULT_GROUP_COUNT, DEFAULT_IDENTIFIER_COUNT)
    }

    /// Register `group` under `key`.
    ///
    /// # Errors
    /// * [`RegistryError::DuplicateKey`] – `key` is already taken; the
    ///   existing group is left untouched.
    /// * [`RegistryError::NegativePollRate`] – the group's poll rate is `< 0`.
    pub fn insert(&mut self, key: i64, group: IpGroup) -> Result<(), RegistryError> {
        if group.poll_rate() < 0 {
            return Err(RegistryError::NegativePollRate {
                key,
                poll_rate: group.poll_rate(),
            });
        }

        match self.groups.entry(key) {
            btree_map::Entry::Occupied(_) => Err(RegistryError::DuplicateKey { key }),
            btree_map::Entry::Vacant(slot) => {
                debug!(key, poll_rate = group.poll_rate(), "Registered group");
                slot.insert(group);
                Ok(())
            }
        }
    }

    pub fn get(&self, key: i64) -> Option<&IpGroup> {
        self.groups.get(&key)
    }

    pub fn contains(&self, key: i64) -> bool {
        self.groups.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate `(key, group)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &IpGroup)> + '_ {
        self.groups.iter().map(|(k, g)| (*k, g))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (i64, &mut IpGroup)> + '_ {
        self.groups.iter_mut().map(|(k, g)| (*k, g))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::Identifier;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    // ── generate ──────────────────────────────────────────────────────────────

    #[test]
    fn default_registry_has_100_groups_with_rate_equal_to_key() {
        let reg = GroupRegistry::generate_default(&mut rng());
        assert_eq!(reg.len(), 100);
        for (key, group) in reg.iter() {
            assert_eq!(group.poll_rate(), key);
            assert_eq!(group.tick(), 0);
            assert_eq!(group.identifiers.len(), 2);
        }
    }

    #[test]
    fn default_registry_keeps_zero_rate_group() {
        let reg = GroupRegistry::generate_default(&mut rng());
        assert_eq!(reg.get(0).unwrap().poll_rate(), 0);
        assert!(!reg.contains(100));
    }

    #[test]
    fn generate_honours_count_and_identifier_length() {
        let reg = GroupRegistry::generate(&mut rng(), 7, 4);
        assert_eq!(reg.len(), 7);
        assert!(reg.iter().all(|(_, g)| g.identifiers.len() == 4));
        let keys: Vec<i64> = reg.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn generate_zero_groups_gives_empty_registry() {
        let reg = GroupRegistry::generate(&mut rng(), 0, 2);
        assert!(reg.is_empty());
    }

    // ── insert ────────────────────────────────────────────────────────────────

    #[test]
    fn insert_rejects_duplicate_key() {
        let mut reg = GroupRegistry::new();
        reg.insert(3, IpGroup::new(vec![], 3)).unwrap();
        let err = reg.insert(3, IpGroup::new(vec![], 9)).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateKey { key: 3 });
        // Original group untouched
        assert_eq!(reg.get(3).unwrap().poll_rate(), 3);
    }

    #[test]
    fn insert_rejects_negative_poll_rate() {
        let mut reg = GroupRegistry::new();
        let err = reg.insert(1, IpGroup::new(vec![], -2)).unwrap_err();
        assert_eq!(
            err,
            RegistryError::NegativePollRate {
                key: 1,
                poll_rate: -2
            }
        );
        assert!(reg.is_empty());
    }

    #[test]
    fn keys_are_arbitrary_and_iterate_in_ascending_order() {
        let mut reg = GroupRegistry::new();
        reg.insert(42, IpGroup::new(vec![Identifier::default()], 1)).unwrap();
        reg.insert(-5, IpGroup::new(vec![], 2)).unwrap();
        reg.insert(7, IpGroup::new(vec![], 3)).unwrap();
        let keys: Vec<i64> = reg.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![-5, 7, 42]);
    }
}
