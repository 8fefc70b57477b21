// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity definition feed and catalog loading.

use std::path::{Path, PathBuf};

use levelkit_core::gamedata::{GameData, GameDataBuilder, RawDefinition};

use crate::config::ImportConfig;
use crate::error::{Error, Result};
use crate::provider::has_extension;

/// Read every `*.json` definition in `dir`, sorted by file name.
///
/// A missing directory yields an empty feed; a malformed file is an error.
pub fn load_definition_feed(dir: &Path) -> Result<Vec<RawDefinition>> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "Entity definition directory not found");
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_extension(path, "json"))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    files.iter().map(|path| parse_definition_file(path)).collect()
}

fn parse_definition_file(path: &Path) -> Result<RawDefinition> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the catalog from the built-ins plus the configured definition feed
pub fn load_game_data(config: &ImportConfig) -> Result<GameData> {
    let feed = load_definition_feed(&config.entity_dir)?;
    let mut builder = GameDataBuilder::with_builtins();
    builder.add_feed(&feed);

    for skipped in builder.skipped() {
        tracing::warn!(
            definition = %skipped.definition,
            property = %skipped.property,
            type_tag = %skipped.type_tag,
            "Skipping property with unrecognized type"
        );
    }

    let catalog = builder.build()?;
    tracing::info!(
        definitions = catalog.len(),
        fed = feed.len(),
        skipped = catalog.skipped_properties().len(),
        "Loaded game data"
    );
    Ok(catalog)
}
