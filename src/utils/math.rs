// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::Point2;

/// Heading in degrees from `from` to `to`, normalized to `[0, 360)`
pub fn heading_degrees(from: &Point2<f64>, to: &Point2<f64>) -> f64 {
    let theta = rad_to_deg((to.y - from.y).atan2(to.x - from.x));
    let normalized = theta.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative angles
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Sine of an angle given in degrees
pub fn sin_deg(theta: f64) -> f64 {
    deg_to_rad(theta).sin()
}

/// Cosine of an angle given in degrees
pub fn cos_deg(theta: f64) -> f64 {
    deg_to_rad(theta).cos()
}

/// Check if two floats are equal within a tolerance scaled by their magnitude
pub fn approx_eq_rel(a: f64, b: f64, tolerance: f64) -> bool {
    let scale = 1.0_f64.max(a.abs()).max(b.abs());
    (a - b).abs() <= tolerance * scale
}

/// Signed area of a closed polygon in the xy plane (positive when CCW)
pub fn signed_area(points: &[Point2<f64>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        twice_area += p.x * q.y - q.x * p.y;
    }
    twice_area / 2.0
}

/// Convert degrees to radians
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

/// Convert radians to degrees
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / std::f64::consts::PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_heading_quadrants() {
        let origin = Point2::new(0.0, 0.0);
        assert_relative_eq!(heading_degrees(&origin, &Point2::new(1.0, 0.0)), 0.0);
        assert_relative_eq!(heading_degrees(&origin, &Point2::new(0.0, 1.0)), 90.0);
        assert_relative_eq!(heading_degrees(&origin, &Point2::new(-1.0, 0.0)), 180.0);
        assert_relative_eq!(heading_degrees(&origin, &Point2::new(0.0, -1.0)), 270.0);
        assert_relative_eq!(heading_degrees(&origin, &Point2::new(1.0, -1.0)), 315.0);
    }

    #[test]
    fn test_approx_eq_rel() {
        assert!(approx_eq_rel(1.0, 1.0 + 1e-12, 1e-9));
        assert!(approx_eq_rel(1e9, 1e9 + 0.5, 1e-9));
        assert!(!approx_eq_rel(1.0, 1.1, 1e-9));
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert_relative_eq!(signed_area(&ccw), 4.0);
        let cw: Vec<_> = ccw.iter().rev().cloned().collect();
        assert_relative_eq!(signed_area(&cw), -4.0);
    }

    #[test]
    fn test_angle_conversion() {
        let rad = deg_to_rad(180.0);
        assert_relative_eq!(rad, std::f64::consts::PI);
        assert_relative_eq!(rad_to_deg(rad), 180.0);
        assert_relative_eq!(sin_deg(90.0), 1.0);
        assert_relative_eq!(cos_deg(180.0), -1.0);
    }
}
