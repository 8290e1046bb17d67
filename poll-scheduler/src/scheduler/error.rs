/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the poll scheduler.
//!
//! Every variant carries the operands involved so the caller can emit a
//! fully-qualified `tracing` event without further parsing.
//!
//! **Do not** replace these with `anyhow::Error` inside the library — the CLI
//! wraps them with context at the application boundary.

use thiserror::Error;

/// Error type returned by [`PollScheduler`](super::PollScheduler) and
/// [`Window`](super::Window).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The quantization window must be strictly positive.
    #[error("quantization window must be > 0, got {window}")]
    InvalidWindow { window: i64 },

    /// Advancing the tick of group `key` would overflow `i64`.
    #[error("tick overflow for group {key} (tick {tick})")]
    TickOverflow { key: i64, tick: i64 },

    /// `tick * poll_rate` overflowed `i64` for group `key`.
    #[error("interval overflow for group {key}: {tick} * {poll_rate}")]
    IntervalOverflow { key: i64, tick: i64, poll_rate: i64 },

    /// Rounding `interval` up to the next window multiple overflowed `i64`.
    #[error("rounding {interval} up to a multiple of {window} overflows")]
    QuantizeOverflow { interval: i64, window: i64 },
}
