// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hand-authored entity definitions shipped with the editor

use super::types::{Behaviour, ClassType, GameDataObject, Property, VariableType};

fn prop(name: &str, variable_type: VariableType, description: &str, default: &str) -> Property {
    Property::new(name, variable_type)
        .with_description(description)
        .with_default(default)
}

/// Light properties shared by `light` and `spotlight`
fn light_properties(class: GameDataObject) -> GameDataObject {
    class
        .with_property(prop("color", VariableType::Color255, "Color", "255 255 255"))
        .with_property(prop("intensity", VariableType::Float, "Intensity", "1.0"))
        .with_property(prop("range", VariableType::Float, "Range", "1.0"))
        .with_property(prop("hassprite", VariableType::Bool, "Has sprite", "Yes"))
}

/// Built-in definitions in load order
pub fn builtin_definitions() -> Vec<GameDataObject> {
    let light = light_properties(GameDataObject::new(
        "light",
        "Point light source.",
        ClassType::Point,
    ))
    .with_behaviour(Behaviour::new("sprite", "sprites/lightbulb.spr"));

    let spotlight = light_properties(GameDataObject::new(
        "spotlight",
        "Self-explanatory.",
        ClassType::Point,
    ))
    .with_property(prop("innerconeangle", VariableType::Float, "Inner cone angle", "45"))
    .with_property(prop("outerconeangle", VariableType::Float, "Outer cone angle", "90"))
    .with_property(prop("angles", VariableType::Vector, "Rotation", "0 0 0"));

    let waypoint = GameDataObject::new("waypoint", "AI waypoint.", ClassType::Point)
        .with_behaviour(Behaviour::new("sprite", "sprites/waypoint"));

    let sound_emitter = GameDataObject::new("soundemitter", "Self-explanatory.", ClassType::Point)
        .with_property(prop("sound", VariableType::Integer, "Ambience index", "1"))
        .with_behaviour(Behaviour::new("sprite", "sprites/speaker.spr"));

    let model = GameDataObject::new("model", "Self-explanatory.", ClassType::Point)
        .with_property(prop("file", VariableType::String, "File", ""))
        .with_property(prop("angles", VariableType::Vector, "Rotation", "0 0 0"))
        .with_property(prop("scale", VariableType::Vector, "Scale", "1 1 1"));

    let screen = GameDataObject::new("screen", "Savescreen.", ClassType::Point)
        .with_property(prop("imgpath", VariableType::String, "Image Path", ""))
        .with_behaviour(Behaviour::new("sprite", "sprites/screen"));

    let no_shadow = GameDataObject::new(
        "noshadow",
        "Disables shadow casting for this brush.",
        ClassType::Solid,
    );

    vec![light, spotlight, waypoint, sound_emitter, model, screen, no_shadow]
}
