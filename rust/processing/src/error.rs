// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for map import and catalog loading.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] levelkit_core::Error),

    #[error(transparent)]
    Geometry(#[from] levelkit_geometry::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid definition file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No map provider for {0}")]
    NoProvider(PathBuf),
}

impl Error {
    /// Write (or read) attempted on a format that does not support it
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Error::Core(levelkit_core::Error::UnsupportedOperation(_))
        )
    }
}
