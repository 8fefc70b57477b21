// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Map provider contract shared by every on-disk format.

use std::io::{Read, Write};
use std::path::Path;

use levelkit_geometry::Map;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::error::Result;

/// Scene-graph elements a map format can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MapFeature {
    Worldspawn,
    Solids,
    Entities,
    Groups,
    Displacements,
    CordonBounds,
}

/// Reads and writes maps in one file format.
pub trait MapProvider: Send + Sync {
    /// Short format name for logs
    fn name(&self) -> &str;

    fn is_valid_for(&self, path: &Path) -> bool;

    fn read_from_stream(&self, reader: &mut dyn Read) -> Result<Map>;

    /// Read-only formats return `UnsupportedOperation`
    fn write_to_stream(&self, writer: &mut dyn Write, map: &Map) -> Result<()>;

    fn features(&self) -> FxHashSet<MapFeature>;
}

/// Case-insensitive file extension check
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
