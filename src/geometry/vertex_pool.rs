// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Deduplicated vertex store

use ahash::AHashMap;
use nalgebra::Point3;

/// Ordered set of unique 3D points
///
/// Indices are 0-based here and stay valid for the lifetime of the pool.
/// Faces refer to them 1-based only when written out.
#[derive(Debug, Clone, Default)]
pub struct VertexPool {
    vertices: Vec<Point3<f64>>,
    lookup: AHashMap<[u64; 3], usize>,
}

fn key(point: &Point3<f64>) -> [u64; 3] {
    // -0.0 == 0.0 must hash the same
    let bits = |c: f64| if c == 0.0 { 0.0f64.to_bits() } else { c.to_bits() };
    [bits(point.x), bits(point.y), bits(point.z)]
}

impl VertexPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `point`, inserting it on first sight
    pub fn get_vertex(&mut self, point: Point3<f64>) -> usize {
        let key = key(&point);
        if let Some(&index) = self.lookup.get(&key) {
            return index;
        }
        let index = self.vertices.len();
        self.vertices.push(point);
        self.lookup.insert(key, index);
        index
    }

    /// Index of `point` if already stored
    pub fn find(&self, point: &Point3<f64>) -> Option<usize> {
        self.lookup.get(&key(point)).copied()
    }

    pub fn get(&self, index: usize) -> Option<&Point3<f64>> {
        self.vertices.get(index)
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
