// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face reconstruction from decoded vertex streams
//!
//! Memblock meshes carry no topology, only positions and per-vertex normals.
//! Faces are recovered by grouping vertices with near-parallel normals,
//! dropping coincident vertices and sorting the rest into winding order.
//!
//! Grouping is first-seen-wins: each normal is compared only against the
//! representatives chosen so far, so the result depends on stream order.

use std::cmp::Ordering;
use std::io::Read;

use levelkit_core::{read_memblock_mesh, DecodedMesh};
use smallvec::SmallVec;

use crate::bounds::BoundingBox;
use crate::coordinate::{coordinate_f, normals_match, to_coordinate, Coordinate, CoordinateF};
use crate::error::Result;
use crate::face::FacePolygon;
use crate::plane::Plane;

/// Representatives shorter than this (squared) are noise, not faces
pub const MIN_NORMAL_LENGTH_SQUARED: f32 = 0.01;

/// Vertices closer than this (squared) to an earlier one are dropped
pub const COINCIDENT_DISTANCE_SQUARED: f64 = 0.001;

/// Closed solids rarely have more than a handful of face directions
type Representatives = SmallVec<[CoordinateF; 8]>;

/// Representative normal of every group, in order of first appearance.
///
/// Degenerate representatives are already removed.
pub fn normal_groups(normals: &[CoordinateF]) -> Representatives {
    let mut representatives = Representatives::new();
    for normal in normals {
        if !representatives.iter().any(|r| normals_match(r, normal)) {
            representatives.push(*normal);
        }
    }
    representatives.retain(|r| r.norm_squared() >= MIN_NORMAL_LENGTH_SQUARED);
    representatives
}

/// Rebuild faces from a decoded memblock
pub fn reconstruct_faces(mesh: &DecodedMesh) -> Vec<FacePolygon> {
    let (positions, normals): (Vec<_>, Vec<_>) = mesh
        .vertices()
        .map(|(p, n)| (coordinate_f(p), coordinate_f(n)))
        .unzip();
    reconstruct_faces_from(&positions, &normals)
}

/// Rebuild faces from parallel position and unit normal arrays
pub fn reconstruct_faces_from(
    positions: &[CoordinateF],
    normals: &[CoordinateF],
) -> Vec<FacePolygon> {
    let mut faces = Vec::new();

    for representative in normal_groups(normals) {
        let mut vertices: Vec<Coordinate> = Vec::new();
        for (position, normal) in positions.iter().zip(normals) {
            if !normals_match(&representative, normal) {
                continue;
            }
            let location = to_coordinate(position);
            let coincident = vertices
                .iter()
                .any(|v| (v - location).norm_squared() < COINCIDENT_DISTANCE_SQUARED);
            if !coincident {
                vertices.push(location);
            }
        }

        let Some(&first) = vertices.first() else {
            continue;
        };
        let plane = Plane::new(to_coordinate(&representative), first);
        sort_winding(&mut vertices, &plane.normal);

        let Some(bounding_box) = BoundingBox::from_points(&vertices) else {
            continue;
        };
        faces.push(FacePolygon {
            vertices,
            plane,
            bounding_box,
        });
    }

    faces
}

/// Read one memblock and rebuild its faces
pub fn read_faces<R: Read + ?Sized>(reader: &mut R) -> Result<Vec<FacePolygon>> {
    let mesh = read_memblock_mesh(reader)?;
    Ok(reconstruct_faces(&mesh))
}

/// Order vertices around the first one (the pivot), which stays at index 0.
///
/// `a` goes before `b` when `normal · ((a − pivot) × (b − pivot))` is negative.
/// That relation is not a total order for arbitrary polygons, so a stable
/// insertion sort is used instead of `sort_by`: it never panics and gives the
/// same output for the same input.
pub fn sort_winding(vertices: &mut [Coordinate], normal: &Coordinate) {
    let Some((pivot, rest)) = vertices.split_first_mut() else {
        return;
    };
    let pivot = *pivot;

    let compare = |a: &Coordinate, b: &Coordinate| {
        let turn = normal.dot(&(a - pivot).cross(&(b - pivot)));
        turn.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
    };

    for i in 1..rest.len() {
        let mut j = i;
        while j > 0 && compare(&rest[j], &rest[j - 1]) == Ordering::Less {
            rest.swap(j, j - 1);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    fn memblock(vertices: &[([f32; 3], [f32; 3])]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&0u32.to_le_bytes());
        body.extend_from_slice(&32u32.to_le_bytes());
        body.extend_from_slice(&(vertices.len() as u32).to_le_bytes());
        for (p, n) in vertices {
            for v in p.iter().chain(n.iter()).chain([0.0f32, 0.0].iter()) {
                body.extend_from_slice(&v.to_le_bytes());
            }
        }
        let mut out = (body.len() as u32).to_le_bytes().to_vec();
        out.extend(body);
        out
    }

    #[test]
    fn test_two_opposite_quads() {
        let data = memblock(&[
            ([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 0.0, 1.0], [0.0, 0.0, -1.0]),
            ([1.0, 0.0, 1.0], [0.0, 0.0, -1.0]),
        ]);
        let faces = read_faces(&mut Cursor::new(&data)).unwrap();

        assert_eq!(faces.len(), 2);
        assert!(faces.iter().all(|f| f.vertices.len() == 2 && f.is_degenerate()));
        assert_relative_eq!(faces[0].plane.normal, Coordinate::z());
        assert_relative_eq!(faces[1].plane.normal, -Coordinate::z());
        assert_relative_eq!(faces[0].plane.distance_from_origin, 0.0);
        assert_relative_eq!(faces[1].plane.distance_from_origin, -1.0);
        assert_eq!(faces[1].bounding_box.start, Coordinate::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_square_winding() {
        let expected = vec![
            Coordinate::new(0.0, 0.0, 0.0),
            Coordinate::new(0.0, 1.0, 0.0),
            Coordinate::new(1.0, 1.0, 0.0),
            Coordinate::new(1.0, 0.0, 0.0),
        ];

        let mut in_order = expected.clone();
        sort_winding(&mut in_order, &Coordinate::z());
        assert_eq!(in_order, expected);

        let mut shuffled = vec![expected[0], expected[3], expected[2], expected[1]];
        sort_winding(&mut shuffled, &Coordinate::z());
        assert_eq!(shuffled, expected);
    }

    #[test]
    fn test_winding_is_deterministic_and_stable() {
        let normal = Coordinate::z();
        let input = vec![
            Coordinate::new(0.0, 0.0, 0.0),
            Coordinate::new(2.0, 0.0, 0.0),
            Coordinate::new(1.0, 0.0, 0.0),
            Coordinate::new(2.0, 2.0, 0.0),
            Coordinate::new(0.0, 2.0, 0.0),
        ];
        let mut first = input.clone();
        sort_winding(&mut first, &normal);
        for _ in 0..5 {
            let mut again = input.clone();
            sort_winding(&mut again, &normal);
            assert_eq!(again, first);
        }
        // collinear with the pivot: ties keep their input order
        let x2 = first.iter().position(|v| *v == input[1]).unwrap();
        let x1 = first.iter().position(|v| *v == input[2]).unwrap();
        assert!(x2 < x1);
        assert_eq!(first[0], input[0]);

        let mut empty: Vec<Coordinate> = Vec::new();
        sort_winding(&mut empty, &normal);
    }

    #[test]
    fn test_group_membership_and_dedup() {
        let tilt = |deg: f32| CoordinateF::new(deg.to_radians().sin(), 0.0, deg.to_radians().cos());
        let normals = vec![
            tilt(0.0),
            tilt(20.0),
            tilt(40.0),
            tilt(0.0),
            CoordinateF::zeros(),
            tilt(180.0),
        ];
        let positions = vec![
            CoordinateF::new(0.0, 0.0, 0.0),
            CoordinateF::new(1.0, 0.0, 0.0),
            CoordinateF::new(2.0, 0.0, 0.0),
            CoordinateF::new(0.01, 0.0, 0.0),
            CoordinateF::new(5.0, 5.0, 5.0),
            CoordinateF::new(3.0, 0.0, 0.0),
        ];

        // 0° and 20° share a group, 40° starts its own, the zero normal is dropped
        assert_eq!(normal_groups(&normals).len(), 3);

        let faces = reconstruct_faces_from(&positions, &normals);
        assert_eq!(faces.len(), 3);
        for face in &faces {
            let face_normal = face.plane.normal;
            for v in &face.vertices {
                let i = positions
                    .iter()
                    .position(|p| to_coordinate(p) == *v)
                    .unwrap();
                assert!(normals[i].cast::<f64>().dot(&face_normal) >= 0.9 - 1e-6);
            }
            for (a, va) in face.vertices.iter().enumerate() {
                for vb in &face.vertices[a + 1..] {
                    assert!((va - vb).norm_squared() >= COINCIDENT_DISTANCE_SQUARED);
                }
            }
        }
        // (0.01, 0, 0) is coincident with the origin
        assert_eq!(faces[0].vertices.len(), 2);
        assert!(faces.iter().all(|f| !f.vertices.contains(&Coordinate::new(5.0, 5.0, 5.0))));
    }

    #[test]
    fn test_empty_mesh_has_no_faces() {
        assert!(reconstruct_faces(&DecodedMesh::default()).is_empty());
    }
}
