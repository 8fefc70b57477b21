// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Provider lookup by file name.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use levelkit_geometry::Map;

use crate::config::ImportConfig;
use crate::error::{Error, Result};
use crate::msl::MslProvider;
use crate::provider::MapProvider;

/// Ordered set of map providers; the first one accepting a path wins.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn MapProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in provider
    pub fn with_defaults(config: &ImportConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(MslProvider::new(config.clone())));
        registry
    }

    pub fn register(&mut self, provider: Box<dyn MapProvider>) -> &mut Self {
        self.providers.push(provider);
        self
    }

    pub fn providers(&self) -> impl Iterator<Item = &dyn MapProvider> + '_ {
        self.providers.iter().map(|p| p.as_ref())
    }

    pub fn provider_for(&self, path: &Path) -> Option<&dyn MapProvider> {
        self.providers().find(|p| p.is_valid_for(path))
    }

    pub fn read_map_from_file(&self, path: &Path) -> Result<Map> {
        let provider = self
            .provider_for(path)
            .ok_or_else(|| Error::NoProvider(path.to_path_buf()))?;
        tracing::info!(path = %path.display(), provider = provider.name(), "Reading map");
        let mut reader = BufReader::new(File::open(path)?);
        provider.read_from_stream(&mut reader)
    }

    /// Serialize in memory first so a failed write leaves no file behind
    pub fn write_map_to_file(&self, path: &Path, map: &Map) -> Result<()> {
        let provider = self
            .provider_for(path)
            .ok_or_else(|| Error::NoProvider(path.to_path_buf()))?;
        let mut buffer: Vec<u8> = Vec::new();
        provider.write_to_stream(&mut buffer, map)?;
        std::fs::write(path, buffer)?;
        tracing::info!(path = %path.display(), provider = provider.name(), "Wrote map");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MapFeature;
    use rustc_hash::FxHashSet;
    use std::io::{Read, Write};

    struct EmptyProvider;

    impl MapProvider for EmptyProvider {
        fn name(&self) -> &str {
            "empty"
        }

        fn is_valid_for(&self, path: &Path) -> bool {
            crate::provider::has_extension(path, "map")
        }

        fn read_from_stream(&self, _reader: &mut dyn Read) -> Result<Map> {
            Ok(Map::with_seed(0))
        }

        fn write_to_stream(&self, _writer: &mut dyn Write, _map: &Map) -> Result<()> {
            Ok(())
        }

        fn features(&self) -> FxHashSet<MapFeature> {
            [MapFeature::Worldspawn].into_iter().collect()
        }
    }

    fn registry() -> ProviderRegistry {
        let config = ImportConfig::from_env().with_colour_seed(1);
        let mut registry = ProviderRegistry::with_defaults(&config);
        registry.register(Box::new(EmptyProvider));
        registry
    }

    #[test]
    fn test_provider_lookup() {
        let registry = registry();
        assert_eq!(registry.providers().count(), 2);
        assert_eq!(registry.provider_for(Path::new("a.msl")).unwrap().name(), "msl");
        assert_eq!(registry.provider_for(Path::new("a.MAP")).unwrap().name(), "empty");
        assert!(registry.provider_for(Path::new("a.rmf")).is_none());
    }

    #[test]
    fn test_unknown_format() {
        let err = registry()
            .read_map_from_file(Path::new("missing.rmf"))
            .unwrap_err();
        assert!(matches!(err, Error::NoProvider(ref p) if p == Path::new("missing.rmf")));
    }

    #[test]
    fn test_read_only_write_creates_no_file() {
        let path = std::env::temp_dir().join(format!("levelkit-{}-ro.msl", std::process::id()));
        let err = registry()
            .write_map_to_file(&path, &Map::with_seed(0))
            .unwrap_err();
        assert!(err.is_unsupported());
        assert!(!path.exists());
    }
}
