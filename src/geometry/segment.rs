// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Box swept by one stroked path edge
//!
//! Corners are named like a boat travelling from `start` to `end`: port is
//! left of the heading, starboard right, aft at the start and fore at the
//! end. The deck sits at `z = width`, the hull at `z = 0`.

use super::join::RailLine;
use super::{Face, Mesh};
use crate::utils::math::{cos_deg, heading_degrees, sin_deg};
use nalgebra::{Point2, Point3};

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentBox {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
    /// Heading in degrees, `[0, 360)`
    pub heading: f64,
    pub height: f64,
    pub port_aft: Point2<f64>,
    pub starboard_aft: Point2<f64>,
    pub starboard_fore: Point2<f64>,
    pub port_fore: Point2<f64>,
    /// Lines through the unmitered rails; joins move corners, never these
    pub port_rail: RailLine,
    pub starboard_rail: RailLine,
}

/// Pool indices of the six faces of a registered segment box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentFaces {
    pub top: Vec<usize>,
    pub bottom: Vec<usize>,
    pub left: Vec<usize>,
    pub right: Vec<usize>,
    pub start_cap: Vec<usize>,
    pub end_cap: Vec<usize>,
}

impl SegmentBox {
    pub fn new(start: Point2<f64>, end: Point2<f64>, width: f64) -> Self {
        let heading = heading_degrees(&start, &end);
        let half_width = width / 2.0;
        let sin_offset = sin_deg(heading) * half_width;
        let cos_offset = cos_deg(heading) * half_width;

        let port = |p: &Point2<f64>| Point2::new(p.x - sin_offset, p.y + cos_offset);
        let starboard = |p: &Point2<f64>| Point2::new(p.x + sin_offset, p.y - cos_offset);

        let (port_aft, port_fore) = (port(&start), port(&end));
        let (starboard_aft, starboard_fore) = (starboard(&start), starboard(&end));

        Self {
            start,
            end,
            heading,
            height: width,
            port_aft,
            starboard_aft,
            starboard_fore,
            port_fore,
            port_rail: RailLine::through(&port_aft, &port_fore),
            starboard_rail: RailLine::through(&starboard_aft, &starboard_fore),
        }
    }

    /// Deck outline, CCW seen from above
    pub fn outline(&self) -> [Point2<f64>; 4] {
        [
            self.port_aft,
            self.starboard_aft,
            self.starboard_fore,
            self.port_fore,
        ]
    }

    /// Add the eight corners to the pool and wire up the faces
    pub fn register(&self, mesh: &mut Mesh) -> SegmentFaces {
        let outline = self.outline();
        let deck = outline.map(|p| mesh.add_vertex(Point3::new(p.x, p.y, self.height)));
        let hull = outline.map(|p| mesh.add_vertex(Point3::new(p.x, p.y, 0.0)));
        let [d_pa, d_sa, d_sf, d_pf] = deck;
        let [h_pa, h_sa, h_sf, h_pf] = hull;

        SegmentFaces {
            top: vec![d_pa, d_sa, d_sf, d_pf],
            bottom: vec![h_pa, h_pf, h_sf, h_sa],
            left: vec![h_pa, d_pa, d_pf, h_pf],
            right: vec![h_sa, h_sf, d_sf, d_sa],
            start_cap: vec![h_sa, d_sa, d_pa, h_pa],
            end_cap: vec![h_pf, d_pf, d_sf, h_sf],
        }
    }
}

impl SegmentFaces {
    /// Faces along the length of the segment, in emission order
    pub fn sides(&self, material: usize) -> [Face; 4] {
        [
            Face::new(self.top.clone(), material),
            Face::new(self.left.clone(), material),
            Face::new(self.bottom.clone(), material),
            Face::new(self.right.clone(), material),
        ]
    }
}
