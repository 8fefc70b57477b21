// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity-type definition records
//!
//! Fast type checking using enums instead of string comparison.

use crate::error::Error;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Kind of entity a definition describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassType {
    /// Abstract definition only used as a base class
    Base,
    /// Entity placed at a single point
    Point,
    /// Entity attached to brush geometry
    Solid,
}

/// Declared type of a definition property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableType {
    Axis,
    Angle,
    AngleNegativePitch,
    Bool,
    Choices,
    Color1,
    Color255,
    Decal,
    Filterclass,
    Flags,
    Float,
    Integer,
    Material,
    NodeDest,
    NodeId,
    Origin,
    Scale,
    Sidelist,
    Sound,
    Sprite,
    String,
    StudioModel,
    TargetDestination,
    TargetNameOrClass,
    TargetSource,
    Vector,
    Void,
}

impl VariableType {
    /// Every variant, in declaration order
    pub const ALL: [VariableType; 27] = [
        Self::Axis,
        Self::Angle,
        Self::AngleNegativePitch,
        Self::Bool,
        Self::Choices,
        Self::Color1,
        Self::Color255,
        Self::Decal,
        Self::Filterclass,
        Self::Flags,
        Self::Float,
        Self::Integer,
        Self::Material,
        Self::NodeDest,
        Self::NodeId,
        Self::Origin,
        Self::Scale,
        Self::Sidelist,
        Self::Sound,
        Self::Sprite,
        Self::String,
        Self::StudioModel,
        Self::TargetDestination,
        Self::TargetNameOrClass,
        Self::TargetSource,
        Self::Vector,
        Self::Void,
    ];

    /// Type tag as written in definition files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Axis => "Axis",
            Self::Angle => "Angle",
            Self::AngleNegativePitch => "AngleNegativePitch",
            Self::Bool => "Bool",
            Self::Choices => "Choices",
            Self::Color1 => "Color1",
            Self::Color255 => "Color255",
            Self::Decal => "Decal",
            Self::Filterclass => "Filterclass",
            Self::Flags => "Flags",
            Self::Float => "Float",
            Self::Integer => "Integer",
            Self::Material => "Material",
            Self::NodeDest => "NodeDest",
            Self::NodeId => "NodeID",
            Self::Origin => "Origin",
            Self::Scale => "Scale",
            Self::Sidelist => "Sidelist",
            Self::Sound => "Sound",
            Self::Sprite => "Sprite",
            Self::String => "String",
            Self::StudioModel => "StudioModel",
            Self::TargetDestination => "TargetDestination",
            Self::TargetNameOrClass => "TargetNameOrClass",
            Self::TargetSource => "TargetSource",
            Self::Vector => "Vector",
            Self::Void => "Void",
        }
    }
}

impl FromStr for VariableType {
    type Err = Error;

    /// Exact, case-sensitive match on the type tag.
    ///
    /// Unknown tags are reported as `UnrecognizedPropertyType` so callers can
    /// drop the property instead of guessing a type.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| Error::UnrecognizedPropertyType(tag.to_string()))
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed key/value slot of an entity definition
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Property {
    pub name: String,
    pub variable_type: VariableType,
    pub default_value: Option<String>,
    pub short_description: String,
}

impl Property {
    pub fn new(name: impl Into<String>, variable_type: VariableType) -> Self {
        Self {
            name: name.into(),
            variable_type,
            default_value: None,
            short_description: String::new(),
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.short_description = description.into();
        self
    }
}

/// Editor directive such as `sprite("sprites/lightbulb.spr")`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Behaviour {
    pub name: String,
    pub argument: String,
}

impl Behaviour {
    pub fn new(name: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: argument.into(),
        }
    }
}

/// Default bounding size of a point entity, relative to its origin
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeBounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

/// One entity-type definition
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameDataObject {
    pub name: String,
    pub description: String,
    pub class_type: ClassType,
    pub properties: Vec<Property>,
    pub behaviours: Vec<Behaviour>,
    /// Names of base definitions, unresolved until the catalog is built
    pub base_classes: SmallVec<[String; 2]>,
    pub size: Option<SizeBounds>,
}

impl GameDataObject {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        class_type: ClassType,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            class_type,
            properties: Vec::new(),
            behaviours: Vec::new(),
            base_classes: SmallVec::new(),
            size: None,
        }
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_behaviour(mut self, behaviour: Behaviour) -> Self {
        self.behaviours.push(behaviour);
        self
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base_classes.push(base.into());
        self
    }

    pub fn with_size(mut self, size: SizeBounds) -> Self {
        self.size = Some(size);
        self
    }

    /// Find a property by exact name
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Find a behaviour by exact name
    pub fn behaviour(&self, name: &str) -> Option<&Behaviour> {
        self.behaviours.iter().find(|b| b.name == name)
    }

    /// Sprite path from the `sprite` behaviour, if any
    pub fn sprite(&self) -> Option<&str> {
        self.behaviour("sprite").map(|b| b.argument.as_str())
    }

    /// Case-insensitive name comparison used throughout the catalog
    #[inline]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Produce a new definition with `bases` merged in, in the order given.
    ///
    /// Inherited properties and behaviours of the first base come first, then
    /// those of the next base, then the definition's own. A name that is
    /// already present (own or from an earlier base) is not repeated. Size
    /// bounds are inherited only when the definition declares none.
    pub fn inherit<'a, I>(&self, bases: I) -> GameDataObject
    where
        I: IntoIterator<Item = &'a GameDataObject>,
    {
        let bases: Vec<&GameDataObject> = bases.into_iter().collect();

        let mut properties: Vec<Property> = Vec::new();
        let mut behaviours: Vec<Behaviour> = Vec::new();
        for base in &bases {
            for prop in &base.properties {
                if self.property(&prop.name).is_none()
                    && !properties.iter().any(|p| p.name == prop.name)
                {
                    properties.push(prop.clone());
                }
            }
            for behaviour in &base.behaviours {
                if self.behaviour(&behaviour.name).is_none()
                    && !behaviours.iter().any(|b| b.name == behaviour.name)
                {
                    behaviours.push(behaviour.clone());
                }
            }
        }
        properties.extend(self.properties.iter().cloned());
        behaviours.extend(self.behaviours.iter().cloned());

        GameDataObject {
            name: self.name.clone(),
            description: self.description.clone(),
            class_type: self.class_type,
            properties,
            behaviours,
            base_classes: self.base_classes.clone(),
            size: self.size.or_else(|| bases.iter().find_map(|b| b.size)),
        }
    }
}
