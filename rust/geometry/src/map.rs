// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Map scene graph
//!
//! A [`Map`] owns its world spawn root, every object under it and the ID
//! generator that numbers them. Ownership runs strictly downward
//! (map → world → solid → face → vertex); upward links are plain IDs.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::bounds::BoundingBox;
use crate::face::FaceId;
use crate::solid::Solid;

/// Default cordon half-size for new maps
pub const DEFAULT_CORDON_EXTENT: f64 = 1024.0;

/// Scene-graph object identifier, unique within one map
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u64);

/// Strictly increasing object and face IDs, both starting at 1
#[derive(Debug, Clone)]
pub struct IdGenerator {
    last_object: u64,
    last_face: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            last_object: 0,
            last_face: 0,
        }
    }

    pub fn next_object_id(&mut self) -> ObjectId {
        self.last_object += 1;
        ObjectId(self.last_object)
    }

    pub fn next_face_id(&mut self) -> FaceId {
        self.last_face += 1;
        FaceId(self.last_face)
    }

    /// Most recently allocated object ID, if any
    pub fn last_object_id(&self) -> Option<ObjectId> {
        (self.last_object > 0).then_some(ObjectId(self.last_object))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Point entity with ordered key/value properties
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: ObjectId,
    pub class_name: String,
    pub icon: String,
    pub properties: Vec<(String, String)>,
    pub parent: Option<ObjectId>,
}

impl Entity {
    /// Value of the first property with this name (case-insensitive)
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Child of the world spawn node
#[derive(Debug, Clone, PartialEq)]
pub enum MapObject {
    Solid(Solid),
    Entity(Entity),
}

impl MapObject {
    pub fn id(&self) -> ObjectId {
        match self {
            MapObject::Solid(solid) => solid.id(),
            MapObject::Entity(entity) => entity.id,
        }
    }

    fn set_parent(&mut self, parent: ObjectId) {
        match self {
            MapObject::Solid(solid) => solid.set_parent(Some(parent)),
            MapObject::Entity(entity) => entity.parent = Some(parent),
        }
    }
}

/// Root scene-graph node holding static geometry and entities
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    id: ObjectId,
    children: Vec<MapObject>,
}

impl World {
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn children(&self) -> &[MapObject] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn add_child(&mut self, mut child: MapObject) {
        child.set_parent(self.id);
        self.children.push(child);
    }
}

/// Imported level map
#[derive(Debug, Clone)]
pub struct Map {
    world: World,
    ids: IdGenerator,
    cordon_bounds: BoundingBox,
    rng: ChaCha8Rng,
}

impl Map {
    /// Empty map with brush colours seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Empty map with reproducible brush colours
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        let mut ids = IdGenerator::new();
        let world = World {
            id: ids.next_object_id(),
            children: Vec::new(),
        };
        Self {
            world,
            ids,
            cordon_bounds: BoundingBox::cube(DEFAULT_CORDON_EXTENT),
            rng,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn cordon_bounds(&self) -> &BoundingBox {
        &self.cordon_bounds
    }

    pub fn set_cordon_bounds(&mut self, bounds: BoundingBox) {
        self.cordon_bounds = bounds;
    }

    /// Attach a solid under world spawn
    pub fn add_solid(&mut self, solid: Solid) -> ObjectId {
        let id = solid.id();
        self.world.add_child(MapObject::Solid(solid));
        id
    }

    /// Create a point entity under world spawn
    pub fn add_entity(
        &mut self,
        class_name: impl Into<String>,
        icon: impl Into<String>,
        properties: Vec<(String, String)>,
    ) -> ObjectId {
        let id = self.ids.next_object_id();
        self.world.add_child(MapObject::Entity(Entity {
            id,
            class_name: class_name.into(),
            icon: icon.into(),
            properties,
            parent: None,
        }));
        id
    }

    pub fn solids(&self) -> impl Iterator<Item = &Solid> + '_ {
        self.world.children.iter().filter_map(|child| match child {
            MapObject::Solid(solid) => Some(solid),
            MapObject::Entity(_) => None,
        })
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.world.children.iter().filter_map(|child| match child {
            MapObject::Entity(entity) => Some(entity),
            MapObject::Solid(_) => None,
        })
    }

    /// Find a direct child of world spawn by ID
    pub fn find(&self, id: ObjectId) -> Option<&MapObject> {
        self.world.children.iter().find(|child| child.id() == id)
    }
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}
