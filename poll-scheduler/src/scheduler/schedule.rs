/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The output of one scheduler pass.

use std::fmt;

use indexmap::IndexMap;

/// Mapping from quantized tick to the poll rates due at that tick.
///
/// Buckets are kept in the order their tick was first produced during the
/// pass; poll rates inside a bucket follow registry iteration order.  A bucket
/// only exists once a poll rate has been pushed into it, so no bucket is ever
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    buckets: IndexMap<i64, Vec<i64>>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `poll_rate` to the bucket at `tick`, creating the bucket on
    /// first use.
    pub fn push(&mut self, tick: i64, poll_rate: i64) {
        self.buckets.entry(tick).or_default().push(poll_rate);
    }

    /// Poll rates due at `tick`, or `None` if nothing lands there.
    pub fn get(&self, tick: i64) -> Option<&[i64]> {
        self.buckets.get(&tick).map(Vec::as_slice)
    }

    /// `(tick, poll_rates)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &[i64])> + '_ {
        self.buckets.iter().map(|(t, rates)| (*t, rates.as_slice()))
    }

    /// Bucket ticks in insertion order.
    pub fn ticks(&self) -> impl Iterator<Item = i64> + '_ {
        self.buckets.keys().copied()
    }

    /// Number of distinct buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of poll-rate entries across all buckets.
    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Tick of the first bucket (in insertion order) containing `poll_rate`.
    ///
    /// Poll rates are labels, not keys: when several groups share a rate this
    /// only reports the earliest bucket holding it.  Look up groups by key in
    /// the registry when an exact placement is needed.
    pub fn tick_of(&self, poll_rate: i64) -> Option<i64> {
        self.buckets
            .iter()
            .find(|(_, rates)| rates.contains(&poll_rate))
            .map(|(t, _)| *t)
    }
}

/// One line per bucket: `<tick> [<rate>, <rate>, ...]`.
impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (tick, rates) in &self.buckets {
            writeln!(f, "{tick} {rates:?}")?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
