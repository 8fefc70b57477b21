// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Import configuration loaded from environment variables.

use std::path::PathBuf;

/// Import configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Directory holding `*.json` entity definitions.
    pub entity_dir: PathBuf,
    /// Seed for brush colours; `None` draws a fresh seed per map.
    pub colour_seed: Option<u64>,
    /// Reconstruct faces of different entities in parallel.
    pub parallel: bool,
}

impl ImportConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            entity_dir: std::env::var("LEVELKIT_ENTITY_DIR")
                .unwrap_or_else(|_| "Entities".into())
                .into(),
            colour_seed: std::env::var("LEVELKIT_COLOUR_SEED")
                .ok()
                .and_then(|seed| seed.trim().parse().ok()),
            parallel: std::env::var("LEVELKIT_PARALLEL")
                .map(|v| parse_flag(&v).unwrap_or(true))
                .unwrap_or(true),
        }
    }

    pub fn with_entity_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.entity_dir = dir.into();
        self
    }

    pub fn with_colour_seed(mut self, seed: u64) -> Self {
        self.colour_seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
