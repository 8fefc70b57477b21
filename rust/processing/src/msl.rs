// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MSL map reader.
//!
//! An `.msl` file is a flat sequence of little-endian floats, memblock meshes
//! and newline-terminated strings:
//!
//! ```text
//! f32 unknown
//! f32 entity count + 2
//! per entity:
//!     f32 mesh count
//!     per mesh: f32 unknown, memblock
//!     f32 is brush
//!     brush:     memblock (ignored), 25 × f32, per mesh: texture line + 10 × f32
//!     non-brush: 35 × f32, class line, icon line, f32 property count − 1,
//!                per property: name line, value line
//! ```
//!
//! The faces of every mesh of an entity form one solid. The file is read
//! sequentially, faces are reconstructed (optionally in parallel), then
//! solids and entities are attached in file order so IDs are stable.

use std::io::{Read, Write};
use std::path::Path;
use std::time::Instant;

use levelkit_core::stream::{read_count, read_f32, read_flag, read_line, skip_f32s};
use levelkit_core::{read_memblock_mesh, DecodedMesh};
use levelkit_geometry::{assemble_solid, reconstruct_faces, BoundingBox, FacePolygon, Map};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::config::ImportConfig;
use crate::error::Result;
use crate::provider::{has_extension, MapFeature, MapProvider};

/// Half-size of the MSL editing volume on every axis
pub const MSL_CORDON_EXTENT: f64 = 16384.0;

const BRUSH_SKIPPED_FLOATS: usize = 25;
const BRUSH_TEXTURE_SKIPPED_FLOATS: usize = 10;
const ENTITY_SKIPPED_FLOATS: usize = 35;

/// What follows the meshes of an entity record
#[derive(Debug, Clone, PartialEq)]
enum RecordKind {
    Brush {
        textures: Vec<String>,
    },
    Point {
        class_name: String,
        icon: String,
        properties: Vec<(String, String)>,
    },
}

/// One entity record as stored in the file
#[derive(Debug, Clone, PartialEq)]
struct EntityRecord {
    meshes: Vec<DecodedMesh>,
    kind: RecordKind,
}

/// Counts gathered while importing one map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub entity_records: usize,
    pub meshes: usize,
    pub solids: usize,
    pub point_entities: usize,
    pub degenerate_faces: usize,
}

/// Provider for `.msl` maps (read-only).
#[derive(Debug, Clone)]
pub struct MslProvider {
    config: ImportConfig,
}

impl MslProvider {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Read a map and report what was imported
    pub fn read_with_stats(&self, reader: &mut dyn Read) -> Result<(Map, ImportStats)> {
        let start = Instant::now();
        tracing::info!(parallel = self.config.parallel, "Starting MSL import");

        let records = read_records(reader)?;
        let meshes = records.iter().map(|r| r.meshes.len()).sum();
        tracing::debug!(records = records.len(), meshes, "Read phase complete");

        let faces = self.reconstruct(&records);

        let mut map = match self.config.colour_seed {
            Some(seed) => Map::with_seed(seed),
            None => Map::new(),
        };
        map.set_cordon_bounds(BoundingBox::cube(MSL_CORDON_EXTENT));

        let mut stats = ImportStats {
            entity_records: records.len(),
            meshes,
            ..Default::default()
        };

        for (index, (record, polygons)) in records.into_iter().zip(faces).enumerate() {
            let degenerate = polygons.iter().filter(|f| f.is_degenerate()).count();
            if degenerate > 0 {
                tracing::debug!(entity = index, degenerate, "Faces with fewer than 3 vertices");
            }
            stats.degenerate_faces += degenerate;

            if let Some(id) = assemble_solid(&mut map, polygons) {
                tracing::debug!(entity = index, solid = id.0, "Assembled solid");
                stats.solids += 1;
            }

            match record.kind {
                RecordKind::Point {
                    class_name,
                    icon,
                    properties,
                } => {
                    tracing::debug!(
                        entity = index,
                        class = %class_name,
                        properties = properties.len(),
                        "Point entity"
                    );
                    map.add_entity(class_name, icon, properties);
                    stats.point_entities += 1;
                }
                RecordKind::Brush { textures } => {
                    tracing::debug!(entity = index, ?textures, "Brush textures");
                }
            }
        }

        tracing::info!(
            entities = stats.entity_records,
            solids = stats.solids,
            point_entities = stats.point_entities,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "MSL import complete"
        );
        Ok((map, stats))
    }

    /// Faces for every record, in record order
    fn reconstruct(&self, records: &[EntityRecord]) -> Vec<Vec<FacePolygon>> {
        let faces_of = |record: &EntityRecord| -> Vec<FacePolygon> {
            record.meshes.iter().flat_map(reconstruct_faces).collect()
        };
        if self.config.parallel {
            records.par_iter().map(faces_of).collect()
        } else {
            records.iter().map(faces_of).collect()
        }
    }
}

impl Default for MslProvider {
    fn default() -> Self {
        Self::new(ImportConfig::default())
    }
}

impl MapProvider for MslProvider {
    fn name(&self) -> &str {
        "msl"
    }

    fn is_valid_for(&self, path: &Path) -> bool {
        has_extension(path, "msl")
    }

    fn read_from_stream(&self, reader: &mut dyn Read) -> Result<Map> {
        Ok(self.read_with_stats(reader)?.0)
    }

    fn write_to_stream(&self, _writer: &mut dyn Write, _map: &Map) -> Result<()> {
        Err(levelkit_core::Error::unsupported("MSL maps are read-only").into())
    }

    fn features(&self) -> FxHashSet<MapFeature> {
        [MapFeature::Worldspawn, MapFeature::Solids, MapFeature::Entities]
            .into_iter()
            .collect()
    }
}

fn read_records(reader: &mut dyn Read) -> Result<Vec<EntityRecord>> {
    let unknown = read_f32(reader, "header")?;
    let entity_count = read_count(reader, "entity count")?.saturating_sub(2).max(0);
    tracing::debug!(unknown, entity_count, "MSL header");

    let mut records = Vec::new();
    for _ in 0..entity_count {
        records.push(read_record(reader)?);
    }
    Ok(records)
}

fn read_record(reader: &mut dyn Read) -> Result<EntityRecord> {
    let mesh_count = read_count(reader, "mesh count")?.max(0);
    let mut meshes = Vec::new();
    for _ in 0..mesh_count {
        read_f32(reader, "mesh header")?;
        meshes.push(read_memblock_mesh(reader)?);
    }

    let kind = if read_flag(reader, "brush flag")? {
        read_memblock_mesh(reader)?;
        skip_f32s(reader, BRUSH_SKIPPED_FLOATS, "brush attributes")?;
        let mut textures = Vec::new();
        for _ in 0..mesh_count {
            textures.push(read_line(reader, "texture name")?);
            skip_f32s(reader, BRUSH_TEXTURE_SKIPPED_FLOATS, "texture attributes")?;
        }
        RecordKind::Brush { textures }
    } else {
        skip_f32s(reader, ENTITY_SKIPPED_FLOATS, "entity attributes")?;
        let class_name = read_line(reader, "entity class")?;
        let icon = read_line(reader, "entity icon")?;
        let property_count = read_count(reader, "property count")?.saturating_add(1).max(0);
        let mut properties = Vec::new();
        for _ in 0..property_count {
            let name = read_line(reader, "property name")?;
            let value = read_line(reader, "property value")?;
            properties.push((name, value));
        }
        RecordKind::Point {
            class_name,
            icon,
            properties,
        }
    };

    Ok(EntityRecord { meshes, kind })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn float(out: &mut Vec<u8>, value: f32) {
        out.extend_from_slice(&value.to_le_bytes());
    }

    fn empty_memblock(out: &mut Vec<u8>) {
        out.extend_from_slice(&12u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&24u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
    }

    fn point_entity(out: &mut Vec<u8>, class: &str, properties: &[(&str, &str)]) {
        float(out, 0.0); // no meshes
        float(out, 0.0); // not a brush
        for _ in 0..ENTITY_SKIPPED_FLOATS {
            float(out, 1.0);
        }
        out.extend_from_slice(format!("{class}\r\n{class}.png\n").as_bytes());
        float(out, properties.len() as f32 - 1.0);
        for (name, value) in properties {
            out.extend_from_slice(format!("{name}\n{value}\n").as_bytes());
        }
    }

    fn provider() -> MslProvider {
        MslProvider::new(ImportConfig::from_env().with_colour_seed(5).with_parallel(false))
    }

    #[test]
    fn test_point_entity_record() {
        let mut data = Vec::new();
        float(&mut data, 3.0);
        float(&mut data, 3.0);
        point_entity(&mut data, "light", &[("range", "1000"), ("intensity", "0.8")]);

        let (map, stats) = provider().read_with_stats(&mut Cursor::new(data)).unwrap();

        assert_eq!(stats.entity_records, 1);
        assert_eq!(stats.solids, 0);
        let entity = map.entities().next().unwrap();
        assert_eq!(entity.class_name, "light");
        assert_eq!(entity.icon, "light.png");
        assert_eq!(entity.property("intensity"), Some("0.8"));
        assert_eq!(*map.cordon_bounds(), BoundingBox::cube(MSL_CORDON_EXTENT));
    }

    #[test]
    fn test_brush_record_consumes_trailer() {
        let mut data = Vec::new();
        float(&mut data, 0.0);
        float(&mut data, 4.0);
        // brush with one empty mesh
        float(&mut data, 1.0);
        float(&mut data, 0.0);
        empty_memblock(&mut data);
        float(&mut data, 1.0);
        empty_memblock(&mut data);
        for _ in 0..BRUSH_SKIPPED_FLOATS {
            float(&mut data, 2.0);
        }
        data.extend_from_slice(b"brick\n");
        for _ in 0..BRUSH_TEXTURE_SKIPPED_FLOATS {
            float(&mut data, 2.0);
        }
        point_entity(&mut data, "waypoint", &[("name", "a")]);

        let (map, stats) = provider().read_with_stats(&mut Cursor::new(data)).unwrap();

        assert_eq!(stats.entity_records, 2);
        assert_eq!(stats.meshes, 1);
        assert_eq!(stats.solids, 0);
        assert_eq!(map.entities().next().unwrap().class_name, "waypoint");
    }

    #[test]
    fn test_negative_counts_read_nothing() {
        let mut data = Vec::new();
        float(&mut data, 0.0);
        float(&mut data, 1.0);
        let (map, stats) = provider().read_with_stats(&mut Cursor::new(data)).unwrap();
        assert_eq!(stats.entity_records, 0);
        assert!(map.world().is_empty());
    }

    fn is_truncated(err: &crate::Error) -> bool {
        matches!(err, crate::Error::Core(levelkit_core::Error::TruncatedInput { .. }))
    }

    #[test]
    fn test_non_finite_entity_counts() {
        for count in [f32::NEG_INFINITY, f32::NAN, -1e30] {
            let mut data = Vec::new();
            float(&mut data, 0.0);
            float(&mut data, count);
            let (_, stats) = provider().read_with_stats(&mut Cursor::new(data)).unwrap();
            assert_eq!(stats.entity_records, 0, "count {count}");
        }

        for count in [f32::INFINITY, 1e30] {
            let mut data = Vec::new();
            float(&mut data, 0.0);
            float(&mut data, count);
            let err = provider().read_from_stream(&mut Cursor::new(data)).unwrap_err();
            assert!(is_truncated(&err), "count {count}");
        }
    }

    #[test]
    fn test_non_finite_property_counts() {
        let record = |count: f32| {
            let mut data = Vec::new();
            float(&mut data, 0.0);
            float(&mut data, 3.0);
            float(&mut data, 0.0);
            float(&mut data, 0.0);
            for _ in 0..ENTITY_SKIPPED_FLOATS {
                float(&mut data, 0.0);
            }
            data.extend_from_slice(b"model\nmodel.png\n");
            float(&mut data, count);
            data.extend_from_slice(b"file\nbarrel.x\n");
            data
        };

        let (map, _) = provider()
            .read_with_stats(&mut Cursor::new(record(f32::NEG_INFINITY)))
            .unwrap();
        assert!(map.entities().next().unwrap().properties.is_empty());

        for count in [f32::INFINITY, 1e30] {
            let err = provider()
                .read_from_stream(&mut Cursor::new(record(count)))
                .unwrap_err();
            assert!(is_truncated(&err), "count {count}");
        }
    }

    #[test]
    fn test_stats_serialize_to_json() {
        let mut data = Vec::new();
        float(&mut data, 0.0);
        float(&mut data, 3.0);
        point_entity(&mut data, "waypoint", &[("name", "start")]);
        let (_, stats) = provider().read_with_stats(&mut Cursor::new(data)).unwrap();

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["entity_records"], 1);
        assert_eq!(json["point_entities"], 1);
        assert_eq!(json["solids"], 0);

        let features: Vec<MapFeature> = vec![MapFeature::Worldspawn, MapFeature::Entities];
        assert_eq!(
            serde_json::to_string(&features).unwrap(),
            r#"["Worldspawn","Entities"]"#
        );
    }

    #[test]
    fn test_truncated_record_fails_whole_import() {
        let mut data = Vec::new();
        float(&mut data, 0.0);
        float(&mut data, 3.0);
        float(&mut data, 0.0);
        float(&mut data, 0.0);
        float(&mut data, 1.0);

        let err = provider().read_from_stream(&mut Cursor::new(data)).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Core(levelkit_core::Error::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_write_is_unsupported() {
        let provider = provider();
        let err = provider
            .write_to_stream(&mut Vec::<u8>::new(), &Map::with_seed(0))
            .unwrap_err();
        assert!(err.is_unsupported());
        assert!(provider.is_valid_for(Path::new("level.MSL")));
        assert!(!provider.is_valid_for(Path::new("level.vmf")));
        assert_eq!(provider.features().len(), 3);
        assert!(provider.features().contains(&MapFeature::Entities));
    }
}
