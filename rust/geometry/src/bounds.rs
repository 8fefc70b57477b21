// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding boxes

use crate::coordinate::Coordinate;

/// Axis-aligned box in f64 precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner
    pub start: Coordinate,
    /// Maximum corner
    pub end: Coordinate,
}

impl BoundingBox {
    /// Box spanning two corners given in any order
    pub fn new(a: Coordinate, b: Coordinate) -> Self {
        Self {
            start: a.inf(&b),
            end: a.sup(&b),
        }
    }

    /// Cube of half-size `extent` centered on the origin
    pub fn cube(extent: f64) -> Self {
        Self::new(Coordinate::repeat(-extent), Coordinate::repeat(extent))
    }

    /// Smallest box containing every point; `None` for no points
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(Self { start: first, end: first }, |b, p| Self {
            start: b.start.inf(p),
            end: b.end.sup(p),
        }))
    }

    /// Smallest box containing every box; `None` for no boxes
    pub fn union<'a, I>(boxes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a BoundingBox>,
    {
        boxes.into_iter().fold(None, |acc: Option<Self>, b| {
            Some(match acc {
                Some(a) => Self {
                    start: a.start.inf(&b.start),
                    end: a.end.sup(&b.end),
                },
                None => *b,
            })
        })
    }

    /// Get center of the box
    #[inline]
    pub fn center(&self) -> Coordinate {
        (self.start + self.end) / 2.0
    }

    /// Width, length and height
    #[inline]
    pub fn dimensions(&self) -> Coordinate {
        self.end - self.start
    }

    /// Check if the point lies inside or on the boundary
    pub fn contains(&self, point: &Coordinate) -> bool {
        (0..3).all(|i| point[i] >= self.start[i] && point[i] <= self.end[i])
    }

    /// Check if another box lies completely inside this one
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        self.contains(&other.start) && self.contains(&other.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let points = [
            Coordinate::new(1.0, -2.0, 3.0),
            Coordinate::new(-1.0, 4.0, 0.0),
            Coordinate::new(0.5, 0.0, 7.0),
        ];
        let bbox = BoundingBox::from_points(&points).unwrap();
        assert_eq!(bbox.start, Coordinate::new(-1.0, -2.0, 0.0));
        assert_eq!(bbox.end, Coordinate::new(1.0, 4.0, 7.0));
        assert_eq!(bbox.center(), Coordinate::new(0.0, 1.0, 3.5));
        assert_eq!(bbox.dimensions(), Coordinate::new(2.0, 6.0, 7.0));
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_union_and_containment() {
        let a = BoundingBox::new(Coordinate::zeros(), Coordinate::repeat(1.0));
        let b = BoundingBox::new(Coordinate::repeat(3.0), Coordinate::repeat(2.0));
        let u = BoundingBox::union([&a, &b]).unwrap();
        assert_eq!(u, BoundingBox::new(Coordinate::zeros(), Coordinate::repeat(3.0)));
        assert!(u.contains_box(&a) && u.contains_box(&b));
        assert!(BoundingBox::cube(16384.0).contains_box(&u));
        assert!(!a.contains(&Coordinate::repeat(1.5)));
        assert!(BoundingBox::union(std::iter::empty()).is_none());
    }
}
