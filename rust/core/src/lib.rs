// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # levelkit Core
//!
//! Map ingestion primitives shared by the geometry and processing crates.
//!
//! ## Overview
//!
//! - **Memblock decoding**: length-prefixed fixed-vertex-format blocks
//!   (position + normal + ignored fields) into flat vertex/normal buffers
//! - **Stream helpers**: float-encoded counts, flags and newline-terminated
//!   strings used by the map container format
//! - **Game data**: built-in and fed entity-type definitions, resolved through
//!   multiple inheritance into a duplicate-free catalog
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use levelkit_core::{read_memblock_mesh, GameDataBuilder};
//!
//! let mesh = read_memblock_mesh(&mut reader)?;
//! println!("{} vertices", mesh.vertex_count());
//!
//! let catalog = GameDataBuilder::with_builtins().build()?;
//! assert!(catalog.get("spotlight").is_some());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for decoded meshes and definitions

pub mod decoder;
pub mod error;
pub mod gamedata;
pub mod stream;

pub use decoder::{decode_block, read_memblock_mesh, vertex_stride, DecodedMesh, VERTEX_PREFIX_SIZE};
pub use error::{Error, Result};
pub use gamedata::{
    Behaviour, ClassType, GameData, GameDataBuilder, GameDataObject, Property, RawDefinition,
    RawProperty, SkippedProperty, VariableType,
};
