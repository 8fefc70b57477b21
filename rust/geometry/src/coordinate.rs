// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinate types
//!
//! Map geometry is stored in double precision; decoded vertex data and normal
//! matching work in single precision.

use nalgebra::Vector3;

/// Double precision map coordinate (exact per-component equality)
pub type Coordinate = Vector3<f64>;

/// Single precision coordinate as decoded from memblocks
pub type CoordinateF = Vector3<f32>;

/// Minimum dot product for two unit normals to count as the same direction (≈25.8°)
pub const NORMAL_MATCH_THRESHOLD: f32 = 0.9;

/// Approximate normal equality used when grouping vertices into faces
#[inline]
pub fn normals_match(a: &CoordinateF, b: &CoordinateF) -> bool {
    a.dot(b) >= NORMAL_MATCH_THRESHOLD
}

#[inline]
pub fn coordinate_f(v: [f32; 3]) -> CoordinateF {
    CoordinateF::new(v[0], v[1], v[2])
}

/// Widen to double precision
#[inline]
pub fn to_coordinate(c: &CoordinateF) -> Coordinate {
    c.map(|v| v as f64)
}

/// Narrow to single precision
#[inline]
pub fn to_coordinate_f(c: &Coordinate) -> CoordinateF {
    c.map(|v| v as f32)
}
