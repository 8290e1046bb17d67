/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! poll-scheduler – quantized next-poll scheduling for polling groups
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── group        – Identifier / IpGroup records
//! ├── registry     – key → IpGroup map, group generator
//! ├── scheduler/   – PollScheduler, window rounding, Schedule result
//! └── config/      – YAML simulation configuration
//! ```

pub mod config;
pub mod group;
pub mod registry;
pub mod scheduler;
