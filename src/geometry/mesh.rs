// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polygon mesh: a vertex pool plus an ordered face list

use super::{BoundingBox, VertexPool};
use ahash::AHashMap;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Polygon given as 0-based vertex pool indices, wound CCW seen from outside
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub indices: Vec<usize>,
    pub material: usize,
}

impl Face {
    pub fn new(indices: Vec<usize>, material: usize) -> Self {
        Self { indices, material }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Directed edges in winding order, closing back to the first vertex
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| (self.indices[i], self.indices[(i + 1) % n]))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub pool: VertexPool,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a point and return its pool index
    pub fn add_vertex(&mut self, point: Point3<f64>) -> usize {
        self.pool.get_vertex(point)
    }

    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn vertex(&self, index: usize) -> Option<&Point3<f64>> {
        self.pool.get(index)
    }

    pub fn vertex_count(&self) -> usize {
        self.pool.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.pool.vertices())
    }

    /// Area-weighted normal of a face (Newell's method)
    ///
    /// Points away from the viewer for whom the face winds CCW.
    pub fn face_normal(&self, face: &Face) -> Vector3<f64> {
        let mut normal = Vector3::zeros();
        for (a, b) in face.edges() {
            let (Some(p), Some(q)) = (self.pool.get(a), self.pool.get(b)) else {
                continue;
            };
            normal.x += (p.y - q.y) * (p.z + q.z);
            normal.y += (p.z - q.z) * (p.x + q.x);
            normal.z += (p.x - q.x) * (p.y + q.y);
        }
        normal / 2.0
    }

    /// Directed edges that are not matched by exactly one opposite edge
    ///
    /// Zero for a closed, consistently wound surface.
    pub fn unmatched_edges(&self) -> usize {
        let mut counts: AHashMap<(usize, usize), i64> = AHashMap::new();
        for face in &self.faces {
            for edge in face.edges() {
                *counts.entry(edge).or_insert(0) += 1;
            }
        }
        counts
            .iter()
            .filter(|(&(a, b), &count)| count != 1 || counts.get(&(b, a)) != Some(&1))
            .count()
    }

    /// Signed volume enclosed by the faces (positive for outward winding)
    pub fn signed_volume(&self) -> f64 {
        let mut volume = 0.0;
        for face in &self.faces {
            let Some(first) = face.indices.first().and_then(|&i| self.pool.get(i)) else {
                continue;
            };
            // Fan triangulation from the first vertex
            for window in face.indices[1..].windows(2) {
                let (Some(b), Some(c)) = (self.pool.get(window[0]), self.pool.get(window[1])) else {
                    continue;
                };
                volume += first.coords.dot(&b.coords.cross(&c.coords)) / 6.0;
            }
        }
        volume
    }
}
