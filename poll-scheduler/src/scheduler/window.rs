/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Quantization window arithmetic.
//!
//! Pure helpers kept free of any registry state so they can be tested on
//! their own, including for negative intervals.

use super::ScheduleError;

/// Default quantization window.
pub const DEFAULT_WINDOW: i64 = 5;

/// A strictly positive quantization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window(i64);

impl Window {
    /// # Errors
    /// [`ScheduleError::InvalidWindow`] if `window <= 0`.
    pub fn new(window: i64) -> Result<Self, ScheduleError> {
        if window <= 0 {
            return Err(ScheduleError::InvalidWindow { window });
        }
        Ok(Self(window))
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// Round `interval` up to the nearest multiple of this window.
    ///
    /// Already-aligned values are returned unchanged.  The distance to the
    /// next multiple is `(-interval) mod window` with a floored modulo, so the
    /// result is correct for negative intervals too (`-7` → `-5` for a window
    /// of 5, not `-10`).
    pub fn quantize(self, interval: i64) -> Result<i64, ScheduleError> {
        // Equals (-interval).rem_euclid(window) without negating i64::MIN
        let gap = (self.0 - interval.rem_euclid(self.0)) % self.0;

        if gap == 0 {
            return Ok(interval);
        }
        interval
            .checked_add(gap)
            .ok_or(ScheduleError::QuantizeOverflow {
                interval,
                window: self.0,
            })
    }
}

impl Default for Window {
    fn default() -> Self {
        Self(DEFAULT_WINDOW)
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
