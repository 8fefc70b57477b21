// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face planes

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::transform::UnitTransformation;

/// Side of a plane a point lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    Front,
    Back,
    OnPlane,
}

/// Plane definition: unit normal + a point on the plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector (normalized unless constructed from a zero vector)
    pub normal: Coordinate,
    /// Point on the plane
    pub point_on_plane: Coordinate,
    /// `normal · point_on_plane`
    pub distance_from_origin: f64,
}

impl Plane {
    /// Create a new plane
    pub fn new(normal: Coordinate, point_on_plane: Coordinate) -> Self {
        let normal = normal.try_normalize(f64::EPSILON).unwrap_or(normal);
        Self {
            normal,
            point_on_plane,
            distance_from_origin: normal.dot(&point_on_plane),
        }
    }

    /// Plane through three points, facing the side from which they appear clockwise
    pub fn from_points(p1: Coordinate, p2: Coordinate, p3: Coordinate) -> Result<Self> {
        let normal = (p3 - p1).cross(&(p2 - p1));
        let normal = normal.try_normalize(1e-12).ok_or_else(|| {
            Error::DegeneratePlane(format!("collinear points {p1:?}, {p2:?}, {p3:?}"))
        })?;
        Ok(Self::new(normal, p1))
    }

    /// Calculate signed distance from point to plane
    /// Positive = in front, Negative = behind
    #[inline]
    pub fn signed_distance(&self, point: &Coordinate) -> f64 {
        self.normal.dot(point) - self.distance_from_origin
    }

    /// Classify a point with tolerance `epsilon`
    pub fn side_of(&self, point: &Coordinate, epsilon: f64) -> PlaneSide {
        let d = self.signed_distance(point);
        if d > epsilon {
            PlaneSide::Front
        } else if d < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Same plane facing the other way
    pub fn flipped(&self) -> Self {
        Self::new(-self.normal, self.point_on_plane)
    }

    /// Map the plane through a transformation.
    ///
    /// The point on the plane and the tip of its normal are transformed, which
    /// is exact for translations, rotations and uniform scales.
    pub fn transformed(&self, transform: &dyn UnitTransformation) -> Self {
        let point = transform.transform(&self.point_on_plane);
        let tip = transform.transform(&(self.point_on_plane + self.normal));
        Self::new(tip - point, point)
    }
}
