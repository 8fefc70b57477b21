// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity-type catalog
//!
//! [`GameDataBuilder`] collects definitions (built-ins first, then the external
//! feed) and [`GameDataBuilder::build`] turns them into an immutable
//! [`GameData`] catalog:
//!
//! 1. append a `position` property to every non-solid definition
//! 2. resolve inheritance ([`resolve_dependencies`])
//! 3. drop later definitions whose name collides with an earlier one
//!
//! ```
//! use levelkit_core::gamedata::{GameDataBuilder, RawDefinition};
//!
//! let mut builder = GameDataBuilder::with_builtins();
//! builder.add_raw(&RawDefinition { name: "crate".into(), ..Default::default() });
//! let catalog = builder.build().unwrap();
//! assert!(catalog.get("LIGHT").is_some());
//! assert!(catalog.get("crate").unwrap().property("position").is_some());
//! ```

pub mod builtin;
pub mod feed;
pub mod resolver;
pub mod types;

pub use builtin::builtin_definitions;
pub use feed::{RawDefinition, RawProperty, SkippedProperty};
pub use resolver::{build_name_index, dependency_waves, resolve_dependencies, NameIndex};
pub use types::{Behaviour, ClassType, GameDataObject, Property, SizeBounds, VariableType};

use crate::error::Result;
use rustc_hash::FxHashSet;

/// Default lower map bound on every axis
pub const MAP_SIZE_LOW: i32 = -16384;
/// Default upper map bound on every axis
pub const MAP_SIZE_HIGH: i32 = 16384;

/// The property every non-solid entity gets
pub fn position_property() -> Property {
    Property::new("position", VariableType::Vector)
        .with_description("Position")
        .with_default("0 0 0")
}

/// Collects definitions in load order before resolution
#[derive(Debug, Clone)]
pub struct GameDataBuilder {
    classes: Vec<GameDataObject>,
    skipped: Vec<SkippedProperty>,
    map_size_low: i32,
    map_size_high: i32,
}

impl GameDataBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
            skipped: Vec::new(),
            map_size_low: MAP_SIZE_LOW,
            map_size_high: MAP_SIZE_HIGH,
        }
    }

    /// Create a builder preloaded with the built-in definitions
    pub fn with_builtins() -> Self {
        let mut builder = Self::new();
        builder.add_builtins();
        builder
    }

    /// Override the map bounds reported by the catalog
    pub fn map_size(mut self, low: i32, high: i32) -> Self {
        self.map_size_low = low;
        self.map_size_high = high;
        self
    }

    pub fn add_builtins(&mut self) -> &mut Self {
        self.classes.extend(builtin_definitions());
        self
    }

    pub fn add(&mut self, class: GameDataObject) -> &mut Self {
        self.classes.push(class);
        self
    }

    /// Add one fed definition, recording any dropped properties
    pub fn add_raw(&mut self, raw: &RawDefinition) -> &mut Self {
        let (class, skipped) = raw.to_definition();
        self.classes.push(class);
        self.skipped.extend(skipped);
        self
    }

    pub fn add_feed<'a, I>(&mut self, feed: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a RawDefinition>,
    {
        for raw in feed {
            self.add_raw(raw);
        }
        self
    }

    /// Definitions collected so far, in load order
    pub fn classes(&self) -> &[GameDataObject] {
        &self.classes
    }

    /// Properties dropped so far because of unrecognized type tags
    pub fn skipped(&self) -> &[SkippedProperty] {
        &self.skipped
    }

    /// Resolve and freeze the catalog.
    ///
    /// Fails if inheritance cannot be resolved; nothing is returned in that case.
    pub fn build(self) -> Result<GameData> {
        let mut classes = self.classes;
        add_position_properties(&mut classes);
        let resolved = resolve_dependencies(&classes)?;
        let classes = remove_duplicates(resolved);
        let index = build_name_index(&classes);

        Ok(GameData {
            map_size_low: self.map_size_low,
            map_size_high: self.map_size_high,
            classes,
            skipped_properties: self.skipped,
            index,
        })
    }
}

impl Default for GameDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Append the `position` property to every non-solid definition that lacks one
pub fn add_position_properties(classes: &mut [GameDataObject]) {
    for class in classes
        .iter_mut()
        .filter(|c| c.class_type != ClassType::Solid)
    {
        if class.property("position").is_none() {
            class.properties.push(position_property());
        }
    }
}

/// Keep only the first non-base definition of each case-insensitive name
pub fn remove_duplicates(classes: Vec<GameDataObject>) -> Vec<GameDataObject> {
    let mut seen = FxHashSet::default();
    classes
        .into_iter()
        .filter(|c| c.class_type == ClassType::Base || seen.insert(c.name.to_ascii_lowercase()))
        .collect()
}

/// Resolved, duplicate-free entity-type catalog
#[derive(Debug, Clone)]
pub struct GameData {
    map_size_low: i32,
    map_size_high: i32,
    classes: Vec<GameDataObject>,
    skipped_properties: Vec<SkippedProperty>,
    index: NameIndex,
}

impl GameData {
    /// Look up a definition by case-insensitive name
    pub fn get(&self, name: &str) -> Option<&GameDataObject> {
        self.index
            .get(&name.to_ascii_lowercase())
            .map(|&i| &self.classes[i])
    }

    /// All definitions in load order
    pub fn classes(&self) -> &[GameDataObject] {
        &self.classes
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameDataObject> {
        self.classes.iter()
    }

    /// Definitions of one class type
    pub fn of_type(&self, class_type: ClassType) -> impl Iterator<Item = &GameDataObject> {
        self.classes.iter().filter(move |c| c.class_type == class_type)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Properties dropped while loading because of unrecognized type tags
    pub fn skipped_properties(&self) -> &[SkippedProperty] {
        &self.skipped_properties
    }

    pub fn map_size_low(&self) -> i32 {
        self.map_size_low
    }

    pub fn map_size_high(&self) -> i32 {
        self.map_size_high
    }
}
