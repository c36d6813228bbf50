// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Path points tagged with the edge that produced them

use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// How a path point was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    MoveTo,
    LineTo,
    ClosePath,
}

/// Point of a path: coordinates plus the tag of its incoming edge
///
/// The tag is only bookkeeping for path construction; equality compares
/// coordinates alone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathPoint {
    pub position: Point3<f64>,
    pub kind: EdgeKind,
}

impl PathPoint {
    pub fn new(x: f64, y: f64, z: f64, kind: EdgeKind) -> Self {
        Self {
            position: Point3::new(x, y, z),
            kind,
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Projection onto the drawing plane
    pub fn xy(&self) -> Point2<f64> {
        Point2::new(self.position.x, self.position.y)
    }

    pub fn with_kind(mut self, kind: EdgeKind) -> Self {
        self.kind = kind;
        self
    }
}

impl PartialEq for PathPoint {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

/// Component-wise sum; the result carries the right operand's tag,
/// so `current + displacement` is tagged like the displacement.
impl Add for PathPoint {
    type Output = PathPoint;

    fn add(self, other: PathPoint) -> PathPoint {
        PathPoint {
            position: Point3::from(self.position.coords + other.position.coords),
            kind: other.kind,
        }
    }
}

/// Offsets every axis by the scalar
impl Add<f64> for PathPoint {
    type Output = PathPoint;

    fn add(self, offset: f64) -> PathPoint {
        PathPoint {
            position: self.position.map(|c| c + offset),
            kind: self.kind,
        }
    }
}

impl Mul<f64> for PathPoint {
    type Output = PathPoint;

    fn mul(self, factor: f64) -> PathPoint {
        PathPoint {
            position: Point3::from(self.position.coords * factor),
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_points_takes_right_tag() {
        let current = PathPoint::new(10.0, 10.0, 0.0, EdgeKind::MoveTo);
        let delta = PathPoint::new(5.0, 0.0, 0.0, EdgeKind::LineTo);
        let sum = current + delta;
        assert_eq!(sum.position, Point3::new(15.0, 10.0, 0.0));
        assert_eq!(sum.kind, EdgeKind::LineTo);
    }

    #[test]
    fn test_scalar_arithmetic() {
        let p = PathPoint::new(1.0, 2.0, 3.0, EdgeKind::LineTo);
        assert_eq!((p + 1.0).position, Point3::new(2.0, 3.0, 4.0));
        assert_eq!((p * 2.0).position, Point3::new(2.0, 4.0, 6.0));
        assert_eq!((p * 2.0).kind, EdgeKind::LineTo);
    }

    #[test]
    fn test_equality_ignores_tag() {
        let a = PathPoint::new(1.0, 1.0, 0.0, EdgeKind::MoveTo);
        let b = PathPoint::new(1.0, 1.0, 0.0, EdgeKind::ClosePath);
        assert_eq!(a, b);
    }
}
