// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - paths, vertex pool, and extrusion into meshes

mod bbox;
mod fill;
mod join;
mod material;
mod mesh;
mod path;
mod point;
mod segment;
mod stroke;
mod vertex_pool;

pub use bbox::BoundingBox;
pub use fill::{fill, FillReport};
pub use join::{miter, miter_all, Intersection, RailLine};
pub use material::{Color, Material, MaterialRegistry};
pub use mesh::{Face, Mesh};
pub use path::Path;
pub use point::{EdgeKind, PathPoint};
pub use segment::{SegmentBox, SegmentFaces};
pub use stroke::{stroke, PrintLimits, StrokeReport};
pub use vertex_pool::VertexPool;
