// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Faces: planar polygons owned by a solid

use crate::bounds::BoundingBox;
use crate::coordinate::Coordinate;
use crate::map::ObjectId;
use crate::plane::Plane;
use crate::transform::UnitTransformation;

/// Face identifier, unique within one map
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceId(pub u64);

/// Polygon vertex with a back-reference to its face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub location: Coordinate,
    pub face: FaceId,
}

/// Reconstructed polygon not yet attached to a map
#[derive(Debug, Clone, PartialEq)]
pub struct FacePolygon {
    /// Vertex locations in winding order
    pub vertices: Vec<Coordinate>,
    pub plane: Plane,
    pub bounding_box: BoundingBox,
}

impl FacePolygon {
    /// Fewer than three vertices
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }
}

/// Face of a solid
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    id: FaceId,
    vertices: Vec<Vertex>,
    plane: Plane,
    bounding_box: BoundingBox,
    parent: Option<ObjectId>,
}

impl Face {
    /// Attach a reconstructed polygon under a freshly allocated ID
    pub fn from_polygon(id: FaceId, polygon: FacePolygon) -> Self {
        let vertices = polygon
            .vertices
            .into_iter()
            .map(|location| Vertex { location, face: id })
            .collect();
        Self {
            id,
            vertices,
            plane: polygon.plane,
            bounding_box: polygon.bounding_box,
            parent: None,
        }
    }

    pub fn id(&self) -> FaceId {
        self.id
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<ObjectId>) {
        self.parent = parent;
    }

    /// Recompute the box from the current vertex locations
    pub fn update_bounding_box(&mut self) {
        if let Some(bbox) = BoundingBox::from_points(self.vertices.iter().map(|v| &v.location)) {
            self.bounding_box = bbox;
        }
    }

    /// Move every vertex, then rebuild the plane and the bounding box
    pub fn transform(&mut self, transform: &dyn UnitTransformation) {
        for vertex in &mut self.vertices {
            vertex.location = transform.transform(&vertex.location);
        }
        self.plane = self.plane.transformed(transform);
        self.update_bounding_box();
    }
}
