use std::collections::HashSet;

use isopleth::{isobands, isolines};
use proptest::proptest;

fn axis(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

/// A deterministic bumpy field with several separate contours at mid
/// levels. Stored with element (r, c) at offset r + c * nrow.
fn bumpy(nrow: usize, ncol: usize) -> Vec<f64> {
    let mut z = vec![0.0; nrow * ncol];
    for c in 0..ncol {
        for r in 0..nrow {
            z[r + c * nrow] = ((r * 3 + c * 5) % 7) as f64;
        }
    }
    z
}

/// Round a coordinate pair for set comparisons.
fn key(x: f64, y: f64) -> (i64, i64) {
    ((x * 1e9).round() as i64, (y * 1e9).round() as i64)
}

#[test]
fn test_ids_are_dense_and_start_at_one() {
    let z = bumpy(6, 7);
    let lines = isolines(&axis(7), &axis(6), &z, 6, 7, &[2.5]).unwrap();
    let bands = isobands(&axis(7), &axis(6), &z, 6, 7, &[1.5], &[4.5]).unwrap();

    for paths in lines.iter().chain(bands.iter()) {
        assert!(!paths.is_empty());
        let ids: Vec<i32> = paths.paths().map(|p| p.id).collect();
        let expected: Vec<i32> = (1..=ids.len() as i32).collect();
        assert_eq!(ids, expected, "ids must count up from 1 without gaps");
    }
}

#[test]
fn test_interpolated_vertices_sit_on_lattice_lines() {
    let nrow = 6;
    let ncol = 7;
    let z = bumpy(nrow, ncol);
    let x = axis(ncol);
    let y = axis(nrow);

    let results = isolines(&x, &y, &z, nrow, ncol, &[0.5, 2.5, 4.5]).unwrap();
    for paths in &results {
        for (&px, &py) in paths.x.iter().zip(&paths.y) {
            let on_column = x.iter().any(|&gx| gx == px);
            let on_row = y.iter().any(|&gy| gy == py);
            assert!(
                on_column || on_row,
                "({px}, {py}) is not on a grid edge"
            );
            assert!(px >= x[0] && px <= x[ncol - 1]);
            assert!(py >= y[0] && py <= y[nrow - 1]);
        }
    }
}

#[test]
fn test_band_rings_never_repeat_a_directed_edge() {
    let z = bumpy(6, 7);
    let results = isobands(&axis(7), &axis(6), &z, 6, 7, &[1.5], &[4.5]).unwrap();

    let mut edges = HashSet::new();
    for path in results[0].paths() {
        let n = path.x.len();
        for i in 0..n {
            let j = (i + 1) % n;
            let edge = (key(path.x[i], path.y[i]), key(path.x[j], path.y[j]));
            assert!(
                edges.insert(edge),
                "directed edge {edge:?} appears twice; shared edges failed to cancel"
            );
        }
    }
}

#[test]
fn test_isoline_matches_isoband_boundary() {
    // The isoline at v is the boundary between the regions below and
    // at-or-above v, so it must trace the same points as the ring of the
    // band [v, +inf) as long as the band stays inside the grid
    let z = bumpy(6, 7);
    let v = 2.5;

    let lines = isolines(&axis(7), &axis(6), &z, 6, 7, &[v]).unwrap();
    let bands = isobands(&axis(7), &axis(6), &z, 6, 7, &[v], &[f64::INFINITY]).unwrap();

    let line_points: HashSet<_> = lines[0]
        .x
        .iter()
        .zip(&lines[0].y)
        .map(|(&x, &y)| key(x, y))
        .collect();
    let band_points: HashSet<_> = bands[0]
        .x
        .iter()
        .zip(&bands[0].y)
        .map(|(&x, &y)| key(x, y))
        .collect();

    // Band rings additionally run along the grid boundary where the region
    // is clipped; every isoline point must be on the band outline
    assert!(!line_points.is_empty());
    assert!(
        line_points.is_subset(&band_points),
        "isoline points missing from the band outline"
    );
}

#[test]
fn test_band_of_everything_against_line_of_nothing() {
    let z = bumpy(4, 4);
    let lines = isolines(&axis(4), &axis(4), &z, 4, 4, &[-1.0]).unwrap();
    let bands = isobands(&axis(4), &axis(4), &z, 4, 4, &[-1.0], &[f64::INFINITY]).unwrap();

    // Below all samples, the isoline vanishes while the band becomes the
    // full grid outline
    assert!(lines[0].is_empty());
    assert_eq!(bands[0].path_count(), 1);
}

proptest! {
    #[test]
    fn test_translation_shifts_output(dx in -50.0..50.0f64, dy in -50.0..50.0f64) {
        let z = bumpy(5, 5);
        let x0 = axis(5);
        let y0 = axis(5);
        let x1: Vec<f64> = x0.iter().map(|&v| v + dx).collect();
        let y1: Vec<f64> = y0.iter().map(|&v| v + dy).collect();

        let base = isolines(&x0, &y0, &z, 5, 5, &[2.5]).unwrap();
        let moved = isolines(&x1, &y1, &z, 5, 5, &[2.5]).unwrap();

        assert_eq!(base[0].len(), moved[0].len());
        assert_eq!(base[0].id, moved[0].id);
        for i in 0..base[0].len() {
            assert!((moved[0].x[i] - (base[0].x[i] + dx)).abs() < 1e-9);
            assert!((moved[0].y[i] - (base[0].y[i] + dy)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_scaling_field_and_level_together_is_a_no_op(k in 0.001..1000.0f64) {
        let z = bumpy(5, 5);
        let scaled: Vec<f64> = z.iter().map(|&v| v * k).collect();
        let x = axis(5);
        let y = axis(5);

        let base = isolines(&x, &y, &z, 5, 5, &[2.5]).unwrap();
        let same = isolines(&x, &y, &scaled, 5, 5, &[2.5 * k]).unwrap();

        assert_eq!(base[0].len(), same[0].len());
        assert_eq!(base[0].id, same[0].id);
        for i in 0..base[0].len() {
            assert!((base[0].x[i] - same[0].x[i]).abs() < 1e-6);
            assert!((base[0].y[i] - same[0].y[i]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_every_band_level_pair_collects_cleanly(
        lo in -1.0..7.0f64,
        width in 0.0..4.0f64,
    ) {
        // Any level pair over the bumpy field must stitch into rings that
        // close; collection failing to terminate would error out
        let z = bumpy(6, 7);
        let results = isobands(&axis(7), &axis(6), &z, 6, 7, &[lo], &[lo + width]).unwrap();
        for path in results[0].paths() {
            assert!(path.x.len() >= 3, "band ring with fewer than 3 vertices");
        }
    }
}
