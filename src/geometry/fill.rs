// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Fill: extrude a closed path into a flat slab

use super::{Face, Mesh, Path, PrintLimits};
use crate::error::{Ps3dError, Result};
use crate::utils::math::signed_area;
use nalgebra::{Point2, Point3};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FillReport {
    /// Distinct corners of the outline
    pub corners: usize,
    pub faces: usize,
}

/// Extrude the area enclosed by a closed `path` to height `width`
///
/// The outline is reoriented counterclockwise first, so the caps and
/// sides point outward whichever way the path was drawn.
pub fn fill(
    path: &Path,
    width: f64,
    material: usize,
    limits: &PrintLimits,
    mesh: &mut Mesh,
) -> Result<FillReport> {
    if !path.is_closed() {
        return Err(Ps3dError::InvalidPath(
            "fill requires a path ending in closepath".to_string(),
        ));
    }
    limits.check(width)?;

    let points = path.points();
    let mut outline: Vec<Point2<f64>> = Vec::with_capacity(points.len());
    for point in &points[..points.len() - 1] {
        let xy = point.xy();
        if outline.last() != Some(&xy) {
            outline.push(xy);
        }
    }
    while outline.len() > 1 && outline.first() == outline.last() {
        outline.pop();
    }
    if outline.len() < 3 {
        return Err(Ps3dError::DegenerateGeometry(format!(
            "fill outline has {} distinct corner(s)",
            outline.len()
        )));
    }

    let area = signed_area(&outline);
    if area == 0.0 {
        return Err(Ps3dError::DegenerateGeometry(
            "fill outline encloses no area".to_string(),
        ));
    }
    if area < 0.0 {
        outline.reverse();
    }

    let deck: Vec<usize> = outline
        .iter()
        .map(|p| mesh.add_vertex(Point3::new(p.x, p.y, width)))
        .collect();
    let hull: Vec<usize> = outline
        .iter()
        .map(|p| mesh.add_vertex(Point3::new(p.x, p.y, 0.0)))
        .collect();

    let faces_before = mesh.face_count();
    mesh.add_face(Face::new(deck.clone(), material));
    mesh.add_face(Face::new(hull.iter().rev().copied().collect(), material));
    let n = outline.len();
    for i in 0..n {
        let j = (i + 1) % n;
        mesh.add_face(Face::new(vec![hull[i], hull[j], deck[j], deck[i]], material));
    }

    log::debug!("fill: {} corners, area {}", n, area.abs());
    Ok(FillReport {
        corners: n,
        faces: mesh.face_count() - faces_before,
    })
}
