// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inheritance resolution for entity-type definitions
//!
//! Definitions are resolved in waves: a wave contains every definition whose
//! base classes are all resolved already. A wave that makes no progress while
//! definitions remain means the rest form one or more cycles.

use super::types::GameDataObject;
use crate::error::{Error, Result};
use rustc_hash::FxHashMap;

/// Case-insensitive name → index of the first definition with that name
pub type NameIndex = FxHashMap<String, usize>;

/// Index definitions by lowercase name; the first loaded definition wins
pub fn build_name_index(classes: &[GameDataObject]) -> NameIndex {
    let mut index = FxHashMap::with_capacity_and_hasher(classes.len(), Default::default());
    for (i, class) in classes.iter().enumerate() {
        index.entry(class.name.to_ascii_lowercase()).or_insert(i);
    }
    index
}

/// Order definitions topologically by inheritance.
///
/// Returns the waves as lists of indices into `classes`; indices within a wave
/// are in load order. A base name that matches no definition never resolves,
/// so its dependents end up in the `CyclicDependency` error together with any
/// real cycles; the error names every unresolved definition in load order.
pub fn dependency_waves(classes: &[GameDataObject]) -> Result<Vec<Vec<usize>>> {
    let index = build_name_index(classes);

    // `None` marks a base missing from the catalog
    let bases: Vec<Vec<Option<usize>>> = classes
        .iter()
        .map(|class| {
            class
                .base_classes
                .iter()
                .map(|base| index.get(&base.to_ascii_lowercase()).copied())
                .collect()
        })
        .collect();

    let mut resolved = vec![false; classes.len()];
    let mut unresolved: Vec<usize> = (0..classes.len()).collect();
    let mut waves = Vec::new();

    while !unresolved.is_empty() {
        let wave: Vec<usize> = unresolved
            .iter()
            .copied()
            .filter(|&i| bases[i].iter().all(|b| b.is_some_and(|b| resolved[b])))
            .collect();

        if wave.is_empty() {
            return Err(Error::CyclicDependency(
                unresolved.iter().map(|&i| classes[i].name.clone()).collect(),
            ));
        }

        for &i in &wave {
            resolved[i] = true;
        }
        unresolved.retain(|&i| !resolved[i]);
        waves.push(wave);
    }

    Ok(waves)
}

/// Resolve every definition against its bases.
///
/// Produces new, fully merged definitions in the original load order; the
/// input is not modified. Within a wave each definition only reads from
/// definitions resolved in earlier waves.
pub fn resolve_dependencies(classes: &[GameDataObject]) -> Result<Vec<GameDataObject>> {
    let waves = dependency_waves(classes)?;
    let index = build_name_index(classes);

    let mut resolved: Vec<Option<GameDataObject>> = vec![None; classes.len()];
    for wave in waves {
        let merged: Vec<(usize, GameDataObject)> = wave
            .into_iter()
            .map(|i| {
                let class = &classes[i];
                let bases = class
                    .base_classes
                    .iter()
                    .filter_map(|b| index.get(&b.to_ascii_lowercase()))
                    .filter_map(|&b| resolved[b].as_ref());
                (i, class.inherit(bases))
            })
            .collect();

        for (i, class) in merged {
            resolved[i] = Some(class);
        }
    }

    Ok(resolved.into_iter().flatten().collect())
}
