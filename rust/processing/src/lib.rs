// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Map import pipeline shared by editor front ends.
//!
//! Wires the decoders and geometry together behind the [`MapProvider`]
//! contract, and loads the entity-type catalog from built-ins plus a
//! directory of JSON definitions. Logging goes through `tracing`; installing
//! a subscriber is left to the application.

pub mod catalog;
pub mod config;
pub mod error;
pub mod msl;
pub mod provider;
pub mod registry;

pub use catalog::{load_definition_feed, load_game_data};
pub use config::ImportConfig;
pub use error::{Error, Result};
pub use msl::{ImportStats, MslProvider, MSL_CORDON_EXTENT};
pub use provider::{has_extension, MapFeature, MapProvider};
pub use registry::ProviderRegistry;
