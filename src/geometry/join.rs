// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Miter joins between adjacent segment boxes
//!
//! Each box has a port and a starboard rail. Where two boxes meet, the
//! fore corner of the leading box and the aft corner of the trailing box
//! are both moved to the intersection of their rails, so the boxes share
//! one edge instead of overlapping or leaving a wedge-shaped gap.

use super::SegmentBox;
use crate::error::{Ps3dError, Result};
use crate::utils::math::approx_eq_rel;
use nalgebra::Point2;

/// Relative tolerance for treating two slopes or intercepts as equal
const PARALLEL_TOLERANCE: f64 = 1e-9;

/// Infinite line through a rail
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RailLine {
    /// `y = m * x + c`
    Sloped { m: f64, c: f64 },
    /// `x = c`
    Vertical { c: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    Point(Point2<f64>),
    /// Same line, every point is shared
    Coincident,
    /// Distinct parallel lines
    Parallel,
}

impl RailLine {
    pub fn through(a: &Point2<f64>, b: &Point2<f64>) -> Self {
        let dx = b.x - a.x;
        if dx == 0.0 {
            return RailLine::Vertical { c: a.x };
        }
        let m = (b.y - a.y) / dx;
        RailLine::Sloped { m, c: a.y - m * a.x }
    }

    pub fn intersect(&self, other: &RailLine) -> Intersection {
        match (*self, *other) {
            (RailLine::Sloped { m: m0, c: c0 }, RailLine::Sloped { m: m1, c: c1 }) => {
                if approx_eq_rel(m0, m1, PARALLEL_TOLERANCE) {
                    if approx_eq_rel(c0, c1, PARALLEL_TOLERANCE) {
                        Intersection::Coincident
                    } else {
                        Intersection::Parallel
                    }
                } else {
                    let x = (c1 - c0) / (m0 - m1);
                    Intersection::Point(Point2::new(x, m0 * x + c0))
                }
            }
            (RailLine::Vertical { c: x }, RailLine::Sloped { m, c })
            | (RailLine::Sloped { m, c }, RailLine::Vertical { c: x }) => {
                Intersection::Point(Point2::new(x, m * x + c))
            }
            (RailLine::Vertical { c: x0 }, RailLine::Vertical { c: x1 }) => {
                if approx_eq_rel(x0, x1, PARALLEL_TOLERANCE) {
                    Intersection::Coincident
                } else {
                    Intersection::Parallel
                }
            }
        }
    }
}

/// Where the fore corner of `leading` and the aft corner of `trailing` meet
fn rail_joint(
    leading: &RailLine,
    trailing: &RailLine,
    corner: &Point2<f64>,
    side: &str,
) -> Result<Point2<f64>> {
    match leading.intersect(trailing) {
        Intersection::Point(p) => Ok(p),
        // straight continuation: the corners already coincide
        Intersection::Coincident => Ok(*corner),
        Intersection::Parallel => Err(Ps3dError::DegenerateGeometry(format!(
            "{} rails at ({}, {}) are parallel and cannot be joined",
            side, corner.x, corner.y
        ))),
    }
}

/// Miter `leading` into `trailing` on both rails
///
/// Intersects the rails as laid out by [`SegmentBox::new`], so earlier
/// joins on either box do not skew this one.
pub fn miter(leading: &mut SegmentBox, trailing: &mut SegmentBox) -> Result<()> {
    let port = rail_joint(
        &leading.port_rail,
        &trailing.port_rail,
        &leading.port_fore,
        "port",
    )?;
    let starboard = rail_joint(
        &leading.starboard_rail,
        &trailing.starboard_rail,
        &leading.starboard_fore,
        "starboard",
    )?;

    log::debug!(
        "join at ({}, {}): port ({}, {}), starboard ({}, {})",
        leading.end.x,
        leading.end.y,
        port.x,
        port.y,
        starboard.x,
        starboard.y
    );

    leading.port_fore = port;
    trailing.port_aft = port;
    leading.starboard_fore = starboard;
    trailing.starboard_aft = starboard;
    Ok(())
}

/// Miter every adjacent pair, plus last into first when `closed`
pub fn miter_all(boxes: &mut [SegmentBox], closed: bool) -> Result<()> {
    for i in 1..boxes.len() {
        let (head, tail) = boxes.split_at_mut(i);
        miter(&mut head[i - 1], &mut tail[0])?;
    }
    if closed && boxes.len() > 1 {
        let (head, tail) = boxes.split_at_mut(boxes.len() - 1);
        miter(&mut tail[0], &mut head[0])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sloped_lines_intersect() {
        let a = RailLine::through(&Point2::new(0.0, 0.0), &Point2::new(1.0, 1.0));
        let b = RailLine::through(&Point2::new(0.0, 2.0), &Point2::new(1.0, 1.0));
        match a.intersect(&b) {
            Intersection::Point(p) => assert_relative_eq!(p, Point2::new(1.0, 1.0)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_vertical_line_substitutes_x() {
        let v = RailLine::through(&Point2::new(3.0, 0.0), &Point2::new(3.0, 5.0));
        assert_eq!(v, RailLine::Vertical { c: 3.0 });
        let s = RailLine::through(&Point2::new(0.0, 1.0), &Point2::new(1.0, 3.0));
        assert_eq!(v.intersect(&s), Intersection::Point(Point2::new(3.0, 7.0)));
        assert_eq!(s.intersect(&v), Intersection::Point(Point2::new(3.0, 7.0)));
    }

    #[test]
    fn test_parallel_and_coincident() {
        let a = RailLine::through(&Point2::new(0.0, 0.0), &Point2::new(1.0, 0.0));
        let b = RailLine::through(&Point2::new(5.0, 0.0), &Point2::new(7.0, 0.0));
        let c = RailLine::through(&Point2::new(0.0, 1.0), &Point2::new(1.0, 1.0));
        assert_eq!(a.intersect(&b), Intersection::Coincident);
        assert_eq!(a.intersect(&c), Intersection::Parallel);
    }

    #[test]
    fn test_right_angle_miter() {
        let mut east = SegmentBox::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), 2.0);
        let mut north = SegmentBox::new(Point2::new(10.0, 0.0), Point2::new(10.0, 10.0), 2.0);
        miter(&mut east, &mut north).unwrap();

        // Left turn: port corner pulled in, starboard corner pushed out
        assert_relative_eq!(east.port_fore, Point2::new(9.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(east.starboard_fore, Point2::new(11.0, -1.0), epsilon = 1e-12);
        assert_eq!(east.port_fore, north.port_aft);
        assert_eq!(east.starboard_fore, north.starboard_aft);
    }

    #[test]
    fn test_reversal_is_degenerate() {
        let mut out = SegmentBox::new(Point2::new(0.0, 0.0), Point2::new(5.0, 0.0), 1.0);
        let mut back = SegmentBox::new(Point2::new(5.0, 0.0), Point2::new(0.0, 0.0), 1.0);
        let err = miter(&mut out, &mut back).unwrap_err();
        assert!(matches!(err, Ps3dError::DegenerateGeometry(_)));
    }

    #[test]
    fn test_closed_loop_joins_last_to_first() {
        let corners = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)];
        let mut boxes: Vec<_> = corners
            .windows(2)
            .map(|w| SegmentBox::new(Point2::new(w[0].0, w[0].1), Point2::new(w[1].0, w[1].1), 1.0))
            .collect();
        miter_all(&mut boxes, true).unwrap();
        assert_eq!(boxes[3].port_fore, boxes[0].port_aft);
        assert_relative_eq!(boxes[0].port_aft, Point2::new(0.5, 0.5), epsilon = 1e-12);
        assert_relative_eq!(boxes[0].starboard_aft, Point2::new(-0.5, -0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_short_segment_between_turns_uses_original_rails() {
        // Middle segment so short that its first join nearly meets its far end
        let l = 1.0 - std::f64::consts::FRAC_1_SQRT_2 + 1e-12;
        let corners = [(0.0, 0.0), (10.0, 0.0), (10.0 + l, l), (10.0 + l, 20.0)];
        let mut boxes: Vec<_> = corners
            .windows(2)
            .map(|w| SegmentBox::new(Point2::new(w[0].0, w[0].1), Point2::new(w[1].0, w[1].1), 2.0))
            .collect();
        miter_all(&mut boxes, false).unwrap();

        // Diagonal port rail y = x - 10 + sqrt(2) against vertical port rail x = 9 + l
        let expected = Point2::new(9.0 + l, l - 1.0 + std::f64::consts::SQRT_2);
        assert_relative_eq!(boxes[1].port_fore, expected, epsilon = 1e-9);
        assert_eq!(boxes[1].port_fore, boxes[2].port_aft);
    }
}
