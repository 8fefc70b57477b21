//! levelkit Geometry
//!
//! Face reconstruction and solid assembly for imported level maps, using
//! nalgebra for coordinates and transformations.

pub mod bounds;
pub mod colour;
pub mod coordinate;
pub mod error;
pub mod face;
pub mod map;
pub mod plane;
pub mod reconstruct;
pub mod solid;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix3x4, Vector3};

pub use bounds::BoundingBox;
pub use colour::Colour;
pub use coordinate::{normals_match, Coordinate, CoordinateF, NORMAL_MATCH_THRESHOLD};
pub use error::{Error, Result};
pub use face::{Face, FaceId, FacePolygon, Vertex};
pub use map::{Entity, IdGenerator, Map, MapObject, ObjectId, World};
pub use plane::{Plane, PlaneSide};
pub use reconstruct::{read_faces, reconstruct_faces, reconstruct_faces_from, sort_winding};
pub use solid::{assemble_solid, Solid};
pub use transform::{TransformMatrix, UnitMatrixMult, UnitScale, UnitTransformation, UnitTranslate};
