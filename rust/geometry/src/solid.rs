// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solids and their assembly from reconstructed faces

use crate::bounds::BoundingBox;
use crate::colour::Colour;
use crate::face::{Face, FacePolygon};
use crate::map::{Map, ObjectId};
use crate::transform::{UnitScale, UnitTransformation};

/// Brush made of planar faces
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    id: ObjectId,
    faces: Vec<Face>,
    bounding_box: BoundingBox,
    colour: Colour,
    parent: Option<ObjectId>,
}

impl Solid {
    /// Take ownership of `faces`; `None` when there are none
    pub fn new(id: ObjectId, mut faces: Vec<Face>, colour: Colour) -> Option<Self> {
        let bounding_box = BoundingBox::union(faces.iter().map(Face::bounding_box))?;
        for face in &mut faces {
            face.set_parent(Some(id));
        }
        Some(Self {
            id,
            faces,
            bounding_box,
            colour,
            parent: None,
        })
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<ObjectId>) {
        self.parent = parent;
    }

    pub fn update_bounding_box(&mut self) {
        if let Some(bbox) = BoundingBox::union(self.faces.iter().map(Face::bounding_box)) {
            self.bounding_box = bbox;
        }
    }

    /// Transform every face, then rebuild the bounding box
    pub fn transform(&mut self, transform: &dyn UnitTransformation) {
        for face in &mut self.faces {
            face.transform(transform);
        }
        self.update_bounding_box();
    }
}

/// Build a solid from one entity's faces and attach it to world spawn.
///
/// Face IDs are allocated in face order, then the solid's object ID. Returns
/// `None` without touching the map when `polygons` is empty.
pub fn assemble_solid(map: &mut Map, polygons: Vec<FacePolygon>) -> Option<ObjectId> {
    if polygons.is_empty() {
        return None;
    }

    let faces: Vec<Face> = polygons
        .into_iter()
        .map(|polygon| Face::from_polygon(map.ids_mut().next_face_id(), polygon))
        .collect();
    let id = map.ids_mut().next_object_id();
    let colour = Colour::random_brush(map.rng_mut());

    let mut solid = Solid::new(id, faces, colour)?;
    let centering = UnitScale::uniform(1.0, solid.bounding_box().center());
    solid.transform(&centering);

    Some(map.add_solid(solid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::Coordinate;
    use crate::face::FaceId;
    use crate::plane::Plane;

    fn polygon(z: f64, normal: Coordinate) -> FacePolygon {
        let vertices = vec![
            Coordinate::new(0.0, 0.0, z),
            Coordinate::new(0.0, 2.0, z),
            Coordinate::new(2.0, 2.0, z),
            Coordinate::new(2.0, 0.0, z),
        ];
        FacePolygon {
            plane: Plane::new(normal, vertices[0]),
            bounding_box: BoundingBox::from_points(&vertices).unwrap(),
            vertices,
        }
    }

    #[test]
    fn test_empty_face_list_creates_nothing() {
        let mut map = Map::with_seed(3);
        assert_eq!(assemble_solid(&mut map, Vec::new()), None);
        assert!(map.world().is_empty());
        assert_eq!(map.ids_mut().last_object_id(), Some(ObjectId(1)));
    }

    #[test]
    fn test_assembled_solid_is_attached_and_bounded() {
        let mut map = Map::with_seed(3);
        let id = assemble_solid(
            &mut map,
            vec![polygon(0.0, -Coordinate::z()), polygon(4.0, Coordinate::z())],
        )
        .unwrap();
        assert_eq!(id, ObjectId(2));

        let solid = map.solids().next().unwrap();
        assert_eq!(solid.parent(), Some(map.world().id()));
        assert_eq!(solid.faces().len(), 2);
        assert_eq!(solid.faces()[0].id(), FaceId(1));
        assert_eq!(solid.faces()[1].id(), FaceId(2));
        assert!(solid.faces().iter().all(|f| f.parent() == Some(id)));
        // unit scale about the center leaves geometry in place
        assert_eq!(solid.bounding_box().start, Coordinate::zeros());
        assert_eq!(solid.bounding_box().end, Coordinate::new(2.0, 2.0, 4.0));
        assert!(solid.colour().r >= 128);
    }

    #[test]
    fn test_ids_increase_across_solids() {
        let mut map = Map::with_seed(3);
        let a = assemble_solid(&mut map, vec![polygon(0.0, Coordinate::z())]).unwrap();
        let b = assemble_solid(&mut map, vec![polygon(1.0, Coordinate::z())]).unwrap();
        assert!(b > a);
        let faces: Vec<FaceId> = map
            .solids()
            .flat_map(|s| s.faces().iter().map(Face::id))
            .collect();
        assert_eq!(faces, vec![FaceId(1), FaceId(2)]);
    }

    #[test]
    fn test_same_seed_same_colours() {
        let colours = |seed| {
            let mut map = Map::with_seed(seed);
            for z in 0..4 {
                assemble_solid(&mut map, vec![polygon(z as f64, Coordinate::z())]);
            }
            map.solids().map(Solid::colour).collect::<Vec<_>>()
        };
        assert_eq!(colours(11), colours(11));
    }
}
