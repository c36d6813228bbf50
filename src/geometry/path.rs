// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Current path and its construction operators
//!
//! Only one subpath is tracked: `moveto` always starts over.

use super::{EdgeKind, PathPoint};
use crate::error::{Ps3dError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    points: Vec<PathPoint>,
}

impl Path {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the last point was added by `closepath`
    pub fn is_closed(&self) -> bool {
        matches!(self.points.last(), Some(p) if p.kind == EdgeKind::ClosePath)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn current_point(&self, operator: &'static str) -> Result<PathPoint> {
        self.points
            .last()
            .copied()
            .ok_or(Ps3dError::NoCurrentPoint(operator))
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.points.clear();
        self.points.push(PathPoint::new(x, y, 0.0, EdgeKind::MoveTo));
    }

    pub fn rmove_to(&mut self, dx: f64, dy: f64) -> Result<()> {
        let current = self.current_point("rmoveto")?;
        let target = current + PathPoint::new(dx, dy, 0.0, EdgeKind::MoveTo);
        self.move_to(target.x(), target.y());
        Ok(())
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.current_point("lineto")?;
        self.points.push(PathPoint::new(x, y, 0.0, EdgeKind::LineTo));
        Ok(())
    }

    pub fn rline_to(&mut self, dx: f64, dy: f64) -> Result<()> {
        let current = self.current_point("rlineto")?;
        self.points
            .push(current + PathPoint::new(dx, dy, 0.0, EdgeKind::LineTo));
        Ok(())
    }

    /// Append a copy of the first point tagged `closepath`
    ///
    /// No-op on an empty or already closed path.
    pub fn close(&mut self) {
        if self.is_closed() {
            return;
        }
        if let Some(first) = self.points.first().copied() {
            self.points.push(first.with_kind(EdgeKind::ClosePath));
        }
    }
}
