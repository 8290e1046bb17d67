/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core group data structures for the poll scheduler.
//!
//! ```text
//! GroupRegistry  ──(key → IpGroup)──►  PollScheduler  ──►  Schedule
//!                   ↑ mutated: tick += 1 per pass        ↑ quantized tick → poll rates
//! ```
//!
//! # Ownership model
//! An [`IpGroup`] is **owned** by the [`GroupRegistry`] for the lifetime of a
//! simulation run.  The only mutation after construction is the tick advance
//! performed by the scheduler, which is why `tick` and `poll_rate` are private
//! and only readable through accessors.
//!
//! [`GroupRegistry`]: crate::registry::GroupRegistry

use std::fmt;
use std::str::FromStr;

use rand::Rng;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Width of an [`Identifier`] in bytes.
pub const IDENTIFIER_LEN: usize = 8;

/// Number of identifiers generated per group when nothing else is requested.
pub const DEFAULT_IDENTIFIER_COUNT: usize = 2;

// ── Identifier ────────────────────────────────────────────────────────────────

/// Opaque 8-byte identifier attached to a group.
///
/// Stands in for an IP address.  The bytes are never interpreted, compared for
/// scheduling purposes, or parsed; they only travel with the group and show up
/// in log output as 16 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Identifier([u8; IDENTIFIER_LEN]);

impl Identifier {
    pub fn from_bytes(bytes: [u8; IDENTIFIER_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; IDENTIFIER_LEN] {
        &self.0
    }

    /// Draw a fresh identifier from `rng`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Errors produced when parsing an [`Identifier`] from its hex form.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IdentifierParseError {
    #[error("identifier is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("identifier must be 8 bytes, got {0}")]
    WrongLength(usize),
}

impl FromStr for Identifier {
    type Err = IdentifierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim())?;
        let bytes: [u8; IDENTIFIER_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| IdentifierParseError::WrongLength(bytes.len()))?;
        Ok(Self(bytes))
    }
}

/// Generate `length` random identifiers from `rng`.
///
/// The values are purely illustrative; callers that need reproducible output
/// pass a seeded RNG.
pub fn random_identifiers<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Vec<Identifier> {
    (0..length).map(|_| Identifier::random(rng)).collect()
}

// ── IpGroup ───────────────────────────────────────────────────────────────────

/// A set of identifiers polled together at a fixed rate.
///
/// # Lifecycle
/// Created with `tick == 0`.  Every scheduler pass advances `tick` by exactly
/// one; `poll_rate` never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpGroup {
    /// Payload carried with the group.  Never inspected by the scheduler.
    pub identifiers: Vec<Identifier>,

    poll_rate: i64,

    tick: i64,
}

impl IpGroup {
    /// Create a group that has not been scheduled yet (`tick == 0`).
    pub fn new(identifiers: Vec<Identifier>, poll_rate: i64) -> Self {
        Self {
            identifiers,
            poll_rate,
            tick: 0,
        }
    }

    /// Create a group with `length` random identifiers.
    pub fn with_random_identifiers<R: Rng + ?Sized>(
        rng: &mut R,
        length: usize,
        poll_rate: i64,
    ) -> Self {
        Self::new(random_identifiers(rng, length), poll_rate)
    }

    pub fn poll_rate(&self) -> i64 {
        self.poll_rate
    }

    /// Number of scheduler passes this group has been through.
    pub fn tick(&self) -> i64 {
        self.tick
    }

    /// Overwrite the tick.  Only the scheduler commits ticks, after a pass has
    /// been fully computed.
    pub(crate) fn set_tick(&mut self, tick: i64) {
        self.tick = tick;
    }
}

impl fmt::Display for IpGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ips = [")?;
        for (i, id) in self.identifiers.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}")?;
        }
        write!(f, "] pollRate = {} tick = {}", self.poll_rate, self.tick)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
