// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit transformations applied to faces and solids
//!
//! Every transformation maps a single coordinate; objects apply them to
//! each of their vertices and rebuild derived state (planes, bounds).

use crate::coordinate::{to_coordinate, to_coordinate_f, Coordinate, CoordinateF};
use nalgebra::{Matrix3x4, Matrix4, Vector4};

/// Coordinate mapping shared by all transformation kinds
pub trait UnitTransformation: Send + Sync {
    /// Transform a double precision coordinate
    fn transform(&self, c: &Coordinate) -> Coordinate;

    /// Transform a single precision coordinate
    fn transform_f(&self, c: &CoordinateF) -> CoordinateF {
        to_coordinate_f(&self.transform(&to_coordinate(c)))
    }
}

/// Immutable 3×4 affine matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMatrix(Matrix3x4<f64>);

impl TransformMatrix {
    /// Build from 12 coefficients in row-major order
    pub fn new(coefficients: [f64; 12]) -> Self {
        Self(Matrix3x4::from_row_slice(&coefficients))
    }

    pub fn identity() -> Self {
        Self(Matrix3x4::identity())
    }

    pub fn translation(offset: Coordinate) -> Self {
        Self::new([
            1.0, 0.0, 0.0, offset.x, //
            0.0, 1.0, 0.0, offset.y, //
            0.0, 0.0, 1.0, offset.z,
        ])
    }

    pub fn scale(factors: Coordinate) -> Self {
        Self::new([
            factors.x, 0.0, 0.0, 0.0, //
            0.0, factors.y, 0.0, 0.0, //
            0.0, 0.0, factors.z, 0.0,
        ])
    }

    /// Coefficients in row-major order
    pub fn coefficients(&self) -> [f64; 12] {
        let mut out = [0.0; 12];
        for row in 0..3 {
            for col in 0..4 {
                out[row * 4 + col] = self.0[(row, col)];
            }
        }
        out
    }

    /// Apply to a point with an explicit homogeneous `w`
    /// (`w = 0` ignores the translation column)
    pub fn transform_w(&self, c: &Coordinate, w: f64) -> Coordinate {
        self.0 * Vector4::new(c.x, c.y, c.z, w)
    }

    /// Matrix applying `self` first, then `next`
    pub fn then(&self, next: &TransformMatrix) -> Self {
        let product = next.to_homogeneous() * self.to_homogeneous();
        Self(product.fixed_view::<3, 4>(0, 0).into_owned())
    }

    fn to_homogeneous(self) -> Matrix4<f64> {
        let mut m = Matrix4::identity();
        m.fixed_view_mut::<3, 4>(0, 0).copy_from(&self.0);
        m
    }
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

/// Multiply by an affine matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitMatrixMult {
    pub matrix: TransformMatrix,
}

impl UnitMatrixMult {
    pub fn new(matrix: TransformMatrix) -> Self {
        Self { matrix }
    }
}

impl UnitTransformation for UnitMatrixMult {
    fn transform(&self, c: &Coordinate) -> Coordinate {
        self.matrix.transform_w(c, 1.0)
    }
}

/// Per-axis scale about an origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScale {
    pub scalar: Coordinate,
    pub origin: Coordinate,
}

impl UnitScale {
    pub fn new(scalar: Coordinate, origin: Coordinate) -> Self {
        Self { scalar, origin }
    }

    /// Same factor on every axis
    pub fn uniform(factor: f64, origin: Coordinate) -> Self {
        Self::new(Coordinate::repeat(factor), origin)
    }
}

impl UnitTransformation for UnitScale {
    fn transform(&self, c: &Coordinate) -> Coordinate {
        (c - self.origin).component_mul(&self.scalar) + self.origin
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitTranslate {
    pub translation: Coordinate,
}

impl UnitTranslate {
    pub fn new(translation: Coordinate) -> Self {
        Self { translation }
    }
}

impl UnitTransformation for UnitTranslate {
    fn transform(&self, c: &Coordinate) -> Coordinate {
        c + self.translation
    }
}
