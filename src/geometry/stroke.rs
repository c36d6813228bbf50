// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Stroke: extrude the current path into a square tube

use super::join::miter_all;
use super::{Face, Mesh, Path, SegmentBox};
use crate::error::{Ps3dError, Result};
use serde::Serialize;

/// Physical constraints on extruded geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintLimits {
    /// Factor from input units to output units
    pub unit_scale: f64,
    /// Thinnest printable wall, in output units
    pub min_thickness: f64,
}

impl Default for PrintLimits {
    fn default() -> Self {
        Self {
            unit_scale: 1.0,
            min_thickness: 0.0,
        }
    }
}

impl PrintLimits {
    pub fn check(&self, width: f64) -> Result<()> {
        let thickness = width * self.unit_scale;
        if !(thickness > 0.0) || thickness < self.min_thickness {
            return Err(Ps3dError::DegenerateGeometry(format!(
                "line width {} is {} output units, below the printable minimum {}",
                width, thickness, self.min_thickness
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StrokeReport {
    pub segments: usize,
    pub faces: usize,
}

/// Extrude `path` with the given line width into `mesh`
///
/// Open paths get a start cap and an end cap; closed paths are joined
/// last-to-first instead.
pub fn stroke(
    path: &Path,
    width: f64,
    material: usize,
    limits: &PrintLimits,
    mesh: &mut Mesh,
) -> Result<StrokeReport> {
    limits.check(width)?;

    let points = path.points();
    if points.len() < 2 {
        log::debug!("stroke: path has {} point(s), nothing to draw", points.len());
        return Ok(StrokeReport::default());
    }
    let closed = path.is_closed();

    let mut boxes = Vec::with_capacity(points.len() - 1);
    for pair in points.windows(2) {
        let (start, end) = (pair[0].xy(), pair[1].xy());
        if start == end {
            log::warn!("stroke: skipping zero-length segment at ({}, {})", start.x, start.y);
            continue;
        }
        let segment = SegmentBox::new(start, end, width);
        log::debug!(
            "stroking between ({}, {}) and ({}, {}), heading {} degrees",
            start.x,
            start.y,
            end.x,
            end.y,
            segment.heading
        );
        boxes.push(segment);
    }
    if boxes.is_empty() {
        return Ok(StrokeReport::default());
    }

    miter_all(&mut boxes, closed)?;

    let faces_before = mesh.face_count();
    let registered: Vec<_> = boxes.iter().map(|segment| segment.register(mesh)).collect();
    for faces in &registered {
        for face in faces.sides(material) {
            mesh.add_face(face);
        }
    }
    if !closed {
        if let (Some(first), Some(last)) = (registered.first(), registered.last()) {
            mesh.add_face(Face::new(first.start_cap.clone(), material));
            mesh.add_face(Face::new(last.end_cap.clone(), material));
        }
    }

    Ok(StrokeReport {
        segments: boxes.len(),
        faces: mesh.face_count() - faces_before,
    })
}
