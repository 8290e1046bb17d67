/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Next-poll scheduling for a [`GroupRegistry`].
//!
//! [`PollScheduler::schedule`] runs one pass over the registry.  For each
//! group, in ascending key order:
//!
//! 1. `tick += 1`
//! 2. `interval = tick * poll_rate`
//! 3. `next = interval` rounded up to the next multiple of the window
//! 4. `poll_rate` is appended to the bucket for `next`
//!
//! The tick advance is a deliberate side effect on the registry: a second
//! pass over the same registry never moves a group to an earlier bucket, and
//! groups whose interval crosses a window boundary move to a later one.
//!
//! # Design decisions
//!
//! | Topic | Choice |
//! |---|---|
//! | State | Stateless scheduler — the only mutable state is the registry passed in by `&mut` |
//! | Iteration order | `BTreeMap` keys — deterministic bucket contents |
//! | Arithmetic | `checked_*` — overflow is a typed error, never a wrapped bucket |
//! | Atomicity | A pass is computed in full before any tick is committed |
//! | Thread safety | `Send + Sync`; exclusive access to the registry is enforced by the borrow |

pub mod error;
pub mod schedule;
pub mod window;

pub use error::ScheduleError;
pub use schedule::Schedule;
pub use window::{Window, DEFAULT_WINDOW};

use tracing::{debug, info};

use crate::registry::GroupRegistry;

/// One group's placement, computed before the pass is committed.
struct Placement {
    tick: i64,
    next_poll: i64,
    poll_rate: i64,
}

// ── PollScheduler ─────────────────────────────────────────────────────────────

/// Quantizing next-poll scheduler.
///
/// Holds only the window; all per-pass state lives inside
/// [`schedule`](Self::schedule).
#[derive(Debug, Clone, Copy, Default)]
pub struct PollScheduler {
    window: Window,
}

impl PollScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    pub fn window(&self) -> Window {
        self.window
    }

    // ── Public entry points ───────────────────────────────────────────────────

    /// Advance every group in `registry` by one tick and bucket it by its
    /// quantized next-poll tick.
    ///
    /// # Errors
    /// Returns [`ScheduleError`] on arithmetic overflow.  In that case the
    /// registry is left exactly as it was: no tick is advanced.
    pub fn schedule(&self, registry: &mut GroupRegistry) -> Result<Schedule, ScheduleError> {
        let placements = registry
            .iter()
            .map(|(key, group)| self.place(key, group.tick(), group.poll_rate()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut schedule = Schedule::new();
        for ((key, group), placement) in registry.iter_mut().zip(placements) {
            group.set_tick(placement.tick);
            debug!(
                key,
                tick = placement.tick,
                poll_rate = placement.poll_rate,
                next_poll = placement.next_poll,
                "Placed group"
            );
            schedule.push(placement.next_poll, placement.poll_rate);
        }

        info!(
            window = self.window.get(),
            group_count = registry.len(),
            bucket_count = schedule.len(),
            "Scheduling pass complete"
        );

        Ok(schedule)
    }

    /// Run `passes` consecutive passes and return their schedules in order.
    ///
    /// Stops at the first failing pass; passes completed before it keep their
    /// tick advances.
    pub fn run(
        &self,
        registry: &mut GroupRegistry,
        passes: usize,
    ) -> Result<Vec<Schedule>, ScheduleError> {
        (0..passes).map(|_| self.schedule(registry)).collect()
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn place(&self, key: i64, tick: i64, poll_rate: i64) -> Result<Placement, ScheduleError> {
        let tick = tick
            .checked_add(1)
            .ok_or(ScheduleError::TickOverflow { key, tick })?;

        let interval = tick
            .checked_mul(poll_rate)
            .ok_or(ScheduleError::IntervalOverflow {
                key,
                tick,
                poll_rate,
            })?;

        Ok(Placement {
            tick,
            next_poll: self.window.quantize(interval)?,
            poll_rate,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
