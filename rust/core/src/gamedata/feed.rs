// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw definition records fed in from external definition files

use super::types::{Behaviour, ClassType, GameDataObject, Property, VariableType};

/// Property record as written in a definition file
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase", default))]
pub struct RawProperty {
    pub name: String,
    /// Type tag, matched against [`VariableType`] names
    #[cfg_attr(feature = "serde", serde(rename = "Type"))]
    pub type_tag: String,
    pub default_value: Option<String>,
    pub short_description: String,
}

/// Entity definition as written in a definition file
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase", default))]
pub struct RawDefinition {
    pub name: String,
    pub description: String,
    pub sprite: Option<String>,
    pub properties: Vec<RawProperty>,
}

/// A property dropped because its type tag is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedProperty {
    pub definition: String,
    pub property: String,
    pub type_tag: String,
}

impl RawDefinition {
    /// Convert to a point-class definition.
    ///
    /// Properties with an unrecognized type tag are left out and returned
    /// alongside the definition.
    pub fn to_definition(&self) -> (GameDataObject, Vec<SkippedProperty>) {
        let mut class = GameDataObject::new(&self.name, &self.description, ClassType::Point);
        let mut skipped = Vec::new();

        for raw in &self.properties {
            match raw.type_tag.parse::<VariableType>() {
                Ok(variable_type) => {
                    let mut property = Property::new(&raw.name, variable_type)
                        .with_description(&raw.short_description);
                    property.default_value = raw.default_value.clone();
                    class.properties.push(property);
                }
                Err(_) => skipped.push(SkippedProperty {
                    definition: self.name.clone(),
                    property: raw.name.clone(),
                    type_tag: raw.type_tag.clone(),
                }),
            }
        }

        if let Some(sprite) = self.sprite.as_deref().filter(|s| !s.is_empty()) {
            class.behaviours.push(Behaviour::new("sprite", sprite));
        }

        (class, skipped)
    }
}
