/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Simulation configuration loading.
//!
//! Every field is optional; anything missing falls back to the reference
//! setup (window 5, one pass, 100 generated groups with two identifiers each).
//!
//! The expected YAML structure is:
//! ```yaml
//! window: 5
//! passes: 1
//! group_count: 100
//! identifiers_per_group: 2
//! groups:
//!   7:
//!     poll_rate: 30
//!     identifiers: ["0a0b0c0d0e0f1011"]
//! ```
//!
//! When `groups` is present and non-empty it replaces the generated groups
//! entirely; `group_count` is then ignored.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rand::Rng;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::group::{Identifier, IpGroup, DEFAULT_IDENTIFIER_COUNT};
use crate::registry::{GroupRegistry, DEFAULT_GROUP_COUNT};
use crate::scheduler::Window;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SimulationConfigFile {
    window: Option<i64>,
    passes: Option<usize>,
    group_count: Option<u32>,
    identifiers_per_group: Option<usize>,
    #[serde(default)]
    groups: BTreeMap<i64, Option<GroupEntry>>,
}

/// Per-group fields as they appear in the YAML file.  A bare key (`7:`)
/// deserializes to `None` and means "rate = key, random identifiers".
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupEntry {
    poll_rate: Option<i64>,
    identifiers: Option<Vec<String>>,
}

// ── Public data structures ────────────────────────────────────────────────────

/// One explicitly configured group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec {
    pub key: i64,
    pub poll_rate: i64,
    /// `None` → draw `identifiers_per_group` random identifiers.
    pub identifiers: Option<Vec<Identifier>>,
}

/// Fully resolved simulation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub window: Window,
    pub passes: usize,
    pub group_count: u32,
    pub identifiers_per_group: usize,
    /// Explicit groups; empty means "generate `group_count` groups".
    pub groups: Vec<GroupSpec>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            window: Window::default(),
            passes: 1,
            group_count: DEFAULT_GROUP_COUNT,
            identifiers_per_group: DEFAULT_IDENTIFIER_COUNT,
            groups: Vec::new(),
        }
    }
}

impl SimulationConfig {
    /// Parses the YAML file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the YAML is structurally
    /// invalid, or a value fails validation (window ≤ 0, zero passes,
    /// malformed identifier, negative poll rate).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading simulation configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid configuration file: {}", path.display()))
    }

    /// Parses configuration from an in-memory YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // An empty document is a valid "all defaults" config
        let file: SimulationConfigFile = if content.trim().is_empty() {
            SimulationConfigFile::default()
        } else {
            serde_yaml::from_str(content).context("Failed to parse YAML")?
        };

        let defaults = Self::default();

        let window = match file.window {
            Some(w) => Window::new(w).context("Invalid `window`")?,
            None => defaults.window,
        };

        let passes = file.passes.unwrap_or(defaults.passes);
        if passes == 0 {
            bail!("`passes` must be at least 1");
        }

        let mut groups = Vec::with_capacity(file.groups.len());
        for (key, entry) in file.groups {
            let entry = entry.unwrap_or_default();
            let poll_rate = entry.poll_rate.unwrap_or(key);
            if poll_rate < 0 {
                bail!("group {key}: poll_rate must be >= 0, got {poll_rate}");
            }

            let identifiers = entry
                .identifiers
                .map(|ids| {
                    ids.iter()
                        .enumerate()
                        .map(|(i, s)| {
                            s.parse::<Identifier>()
                                .with_context(|| format!("group {key}: identifier #{i} ('{s}')"))
                        })
                        .collect::<Result<Vec<_>>>()
                })
                .transpose()?;

            debug!(key, poll_rate, explicit_ids = identifiers.is_some(), "  Group entry");
            groups.push(GroupSpec {
                key,
                poll_rate,
                identifiers,
            });
        }

        let config = Self {
            window,
            passes,
            group_count: file.group_count.unwrap_or(defaults.group_count),
            identifiers_per_group: file
                .identifiers_per_group
                .unwrap_or(defaults.identifiers_per_group),
            groups,
        };

        if !config.groups.is_empty() && file.group_count.is_some() {
            warn!("Both `groups` and `group_count` are set; `group_count` is ignored");
        }

        info!(
            window = config.window.get(),
            passes = config.passes,
            group_count = config.group_count,
            explicit_groups = config.groups.len(),
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Build the registry described by this configuration.
    ///
    /// Random identifiers are drawn from `rng` for every group that does not
    /// list its own.
    pub fn build_registry<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GroupRegistry> {
        if self.groups.is_empty() {
            return Ok(GroupRegistry::generate(
                rng,
                self.group_count,
                self.identifiers_per_group,
            ));
        }

        let mut registry = GroupRegistry::new();
        for spec in &self.groups {
            let group = match &spec.identifiers {
                Some(ids) => IpGroup::new(ids.clone(), spec.poll_rate),
                None => IpGroup::with_random_identifiers(
                    rng,
                    self.identifiers_per_group,
                    spec.poll_rate,
                ),
            };
            registry
                .insert(spec.key, group)
                .with_context(|| format!("Cannot register group {}", spec.key))?;
        }

        info!(group_count = registry.len(), "Built registry from explicit groups");
        Ok(registry)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: write a YAML string to a temp file and return it.
    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    // ── defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn default_config_matches_reference_setup() {
        let cfg = SimulationConfig::default();
        assert_eq!(cfg.window.get(), 5);
        assert_eq!(cfg.passes, 1);
        assert_eq!(cfg.group_count, 100);
        assert_eq!(cfg.identifiers_per_group, 2);
        assert!(cfg.groups.is_empty());
    }

    #[test]
    fn empty_file_gives_defaults() {
        let f = yaml_tempfile("");
        let cfg = SimulationConfig::load_from_file(f.path()).unwrap();
        assert_eq!(cfg, SimulationConfig::default());
    }

    // ── load_from_file ────────────────────────────────────────────────────────

    #[test]
    fn load_full_yaml() {
        let yaml = r#"
window: 10
passes: 3
group_count: 20
identifiers_per_group: 4
"#;
        let f = yaml_tempfile(yaml);
        let cfg = SimulationConfig::load_from_file(f.path()).unwrap();
        assert_eq!(cfg.window.get(), 10);
        assert_eq!(cfg.passes, 3);
        assert_eq!(cfg.group_count, 20);
        assert_eq!(cfg.identifiers_per_group, 4);

        let reg = cfg.build_registry(&mut rng()).unwrap();
        assert_eq!(reg.len(), 20);
        assert!(reg.iter().all(|(_, g)| g.identifiers.len() == 4));
    }

    #[test]
    fn explicit_groups_replace_generated_ones() {
        let yaml = r#"
groups:
  7:
    poll_rate: 30
    identifiers: ["0a0b0c0d0e0f1011", "ffffffffffffffff"]
  12:
  40:
    poll_rate: 4
"#;
        let cfg = SimulationConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.groups.len(), 3);

        let reg = cfg.build_registry(&mut rng()).unwrap();
        assert_eq!(reg.len(), 3);

        let g7 = reg.get(7).unwrap();
        assert_eq!(g7.poll_rate(), 30);
        assert_eq!(g7.identifiers[0].to_string(), "0a0b0c0d0e0f1011");
        assert_eq!(g7.identifiers.len(), 2);

        // Bare key: rate defaults to the key, identifiers are random
        let g12 = reg.get(12).unwrap();
        assert_eq!(g12.poll_rate(), 12);
        assert_eq!(g12.identifiers.len(), 2);

        assert_eq!(reg.get(40).unwrap().poll_rate(), 4);
    }

    #[test]
    fn missing_file_returns_error() {
        let result = SimulationConfig::load_from_file(Path::new("/nonexistent/path/sim.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        assert!(SimulationConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn unknown_field_returns_error() {
        assert!(SimulationConfig::from_yaml_str("windw: 5\n").is_err());
    }

    // ── validation ────────────────────────────────────────────────────────────

    #[test]
    fn zero_window_is_rejected() {
        let err = SimulationConfig::from_yaml_str("window: 0\n").unwrap_err();
        assert!(format!("{err:#}").contains("window"));
    }

    #[test]
    fn zero_passes_is_rejected() {
        assert!(SimulationConfig::from_yaml_str("passes: 0\n").is_err());
    }

    #[test]
    fn negative_poll_rate_is_rejected() {
        let yaml = "groups:\n  1:\n    poll_rate: -1\n";
        let err = SimulationConfig::from_yaml_str(yaml).unwrap_err();
        assert!(format!("{err:#}").contains("poll_rate"));
    }

    #[test]
    fn bad_identifier_is_rejected() {
        let yaml = "groups:\n  1:\n    identifiers: [\"abc\"]\n";
        let err = SimulationConfig::from_yaml_str(yaml).unwrap_err();
        assert!(format!("{err:#}").contains("identifier #0"));
    }
}
