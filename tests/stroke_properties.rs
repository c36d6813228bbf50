// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Randomized checks of stroke face counts, vertex pool and miter joins

use approx::assert_relative_eq;
use nalgebra::Point3;
use ps3d::geometry::{stroke, Mesh, Path, PrintLimits, VertexPool};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_path(rng: &mut StdRng, points: usize, closed: bool) -> Path {
    let mut path = Path::new();
    path.move_to(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
    for _ in 1..points {
        path.line_to(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0))
            .unwrap();
    }
    if closed {
        path.close();
    }
    path
}

#[test]
fn test_open_path_face_count() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let n = rng.gen_range(2..12);
        let path = random_path(&mut rng, n, false);
        let mut mesh = Mesh::new();
        let report = stroke(&path, 1.5, 0, &PrintLimits::default(), &mut mesh).unwrap();

        assert_eq!(report.segments, n - 1);
        assert_eq!(report.faces, 4 * (n - 1) + 2);
        assert_eq!(mesh.face_count(), 4 * (n - 1) + 2);
    }
}

#[test]
fn test_closed_path_face_count() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let corners = rng.gen_range(3..10);
        let path = random_path(&mut rng, corners, true);
        let n = path.len();
        let mut mesh = Mesh::new();
        let report = stroke(&path, 1.0, 0, &PrintLimits::default(), &mut mesh).unwrap();

        assert_eq!(n, corners + 1);
        assert_eq!(report.segments, n - 1);
        assert_eq!(report.faces, 4 * (n - 1));
    }
}

#[test]
fn test_vertex_pool_idempotent_and_monotonic() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut pool = VertexPool::new();
    let mut seen: Vec<(Point3<f64>, usize)> = Vec::new();

    for _ in 0..500 {
        // Small grid so repeats are common
        let point = Point3::new(
            rng.gen_range(0..6) as f64,
            rng.gen_range(0..6) as f64,
            rng.gen_range(0..2) as f64,
        );
        let before = pool.len();
        let index = pool.get_vertex(point);

        match seen.iter().find(|(p, _)| *p == point) {
            Some(&(_, existing)) => {
                assert_eq!(index, existing);
                assert_eq!(pool.len(), before);
            }
            None => {
                assert!(seen.iter().all(|&(_, i)| index > i));
                assert_eq!(index, before);
                seen.push((point, index));
            }
        }
    }
}

#[test]
fn test_joined_segments_share_top_corners() {
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..50 {
        let path = random_path(&mut rng, 3, false);
        let mut mesh = Mesh::new();
        stroke(&path, 2.0, 0, &PrintLimits::default(), &mut mesh).unwrap();

        // Per segment: top, left, bottom, right
        let first_top = &mesh.faces[0].indices;
        let second_top = &mesh.faces[4].indices;
        let shared = first_top
            .iter()
            .filter(|index| second_top.contains(index))
            .count();
        assert_eq!(shared, 2);
    }
}

#[test]
fn test_stroked_square_is_watertight() {
    let mut path = Path::new();
    path.move_to(0.0, 0.0);
    path.line_to(20.0, 0.0).unwrap();
    path.line_to(20.0, 20.0).unwrap();
    path.line_to(0.0, 20.0).unwrap();
    path.close();

    let mut mesh = Mesh::new();
    let report = stroke(&path, 2.0, 0, &PrintLimits::default(), &mut mesh).unwrap();

    assert_eq!(report.faces, 16);
    assert_eq!(mesh.vertex_count(), 16);
    assert_eq!(mesh.unmatched_edges(), 0);
    // Frame 22 x 22 minus hole 18 x 18, two units tall
    assert_relative_eq!(mesh.signed_volume(), (484.0 - 324.0) * 2.0, epsilon = 1e-6);
}
