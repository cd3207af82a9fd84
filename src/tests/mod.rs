//! End-to-end tests driving `decompose` directly, one per seed scenario
//! in the raster-to-rectangles write-up this crate implements, plus the
//! three boundary behaviors and a property-based area/round-trip check.

use crate::geom::{Rect, Winding};
use crate::raster::{DenseRaster, Raster};
use crate::{decompose, Decomposition};

fn grid(rows: usize, cols: usize, bits: &[u8]) -> DenseRaster {
  DenseRaster::new(rows, cols, bits.iter().map(|&b| b != 0).collect())
}

fn foreground_count<R: Raster>(r: &R) -> usize {
  let (rows, cols) = r.shape();
  (0..rows)
    .flat_map(|row| (0..cols).map(move |col| (row, col)))
    .filter(|&(row, col)| r.get(row, col))
    .count()
}

fn rect_area(r: &Rect) -> i64 {
  (r.x_max - r.x_min) * (r.y_max - r.y_min)
}

/// Rasterize `rects` back onto a `rows x cols` grid and compare against
/// `raster` cell by cell -- the round-trip law from section 8.
fn assert_round_trips<R: Raster>(raster: &R, rects: &[Rect]) {
  let (rows, cols) = raster.shape();
  for row in 0..rows {
    for col in 0..cols {
      let (x, y) = (col as i64, row as i64);
      let covered = rects
        .iter()
        .any(|r| x >= r.x_min && x < r.x_max && y >= r.y_min && y < r.y_max);
      assert_eq!(
        covered,
        raster.get(row, col),
        "mismatch at (row={row}, col={col})"
      );
    }
  }
}

fn assert_disjoint_interiors(rects: &[Rect]) {
  for (i, a) in rects.iter().enumerate() {
    for b in &rects[i + 1..] {
      let x_overlap = a.x_min.max(b.x_min) < a.x_max.min(b.x_max);
      let y_overlap = a.y_min.max(b.y_min) < a.y_max.min(b.y_max);
      assert!(!(x_overlap && y_overlap), "rectangles {:?} and {:?} overlap", a, b);
    }
  }
}

fn assert_sound(raster: &DenseRaster, d: &Decomposition) {
  assert_eq!(d.loops.len(), d.rectangles.len());
  let area: i64 = d.rectangles.iter().map(rect_area).sum();
  assert_eq!(area as usize, foreground_count(raster));
  assert_disjoint_interiors(&d.rectangles);
  assert_round_trips(raster, &d.rectangles);
}

#[test]
fn empty_raster_yields_nothing() {
  let r = DenseRaster::filled(0, 0, false);
  let d = decompose(&r).unwrap();
  assert!(d.loops.is_empty());
  assert!(d.rectangles.is_empty());
}

#[test]
fn all_background_raster_yields_nothing() {
  let r = grid(3, 4, &[0; 12]);
  let d = decompose(&r).unwrap();
  assert!(d.loops.is_empty());
  assert!(d.rectangles.is_empty());
}

#[test]
fn fully_filled_raster_is_one_rectangle() {
  let r = DenseRaster::filled(3, 5, true);
  let d = decompose(&r).unwrap();
  assert_eq!(d.rectangles, vec![Rect::new(0, 0, 5, 3)]);
  assert_eq!(d.loops.len(), 1);
  assert_eq!(d.loops[0].winding, Winding::CounterClockWise);
  assert_sound(&r, &d);
}

#[test]
fn single_pixel_is_one_unit_rectangle() {
  let r = grid(4, 4, &[
    0, 0, 0, 0,
    0, 0, 1, 0,
    0, 0, 0, 0,
    0, 0, 0, 0,
  ]);
  let d = decompose(&r).unwrap();
  assert_eq!(d.rectangles, vec![Rect::new(2, 1, 3, 2)]);
  assert_sound(&r, &d);
}

/// Seed scenario 1: two diagonal foreground pixels never touch, so they
/// stay two fully separate loops and rectangles -- nothing to resolve.
#[test]
fn two_diagonal_pixels_stay_two_separate_rectangles() {
  let r = grid(2, 2, &[1, 0, 0, 1]);
  let d = decompose(&r).unwrap();
  assert_eq!(d.loops.len(), 2);
  let mut rects = d.rectangles.clone();
  rects.sort_by_key(|r| (r.x_min, r.y_min));
  assert_eq!(rects, vec![Rect::new(0, 0, 1, 1), Rect::new(1, 1, 2, 2)]);
  assert_sound(&r, &d);
}

/// Seed scenario 2: a 3x3 donut. The hole's own four corners come out
/// concave (stitch.rs's `framed_hole_stitches_into_two_loops_with_four_concave_corners`
/// pins that down in isolation); `resolve_all` ray-casts each one out to
/// the frame in turn, stitching the hole into the outer loop and
/// leaving a ring of rectangles behind.
#[test]
fn donut_resolves_into_a_ring_of_rectangles() {
  let r = grid(3, 3, &[
    1, 1, 1,
    1, 0, 1,
    1, 1, 1,
  ]);
  let d = decompose(&r).unwrap();
  assert!(d.rectangles.len() >= 2);
  assert_sound(&r, &d);
}

/// Seed scenario 3: two diagonal single-pixel holes inside a 4x4 block.
#[test]
fn two_diagonal_holes_resolve_into_rectangles() {
  let r = grid(4, 4, &[
    1, 1, 1, 1,
    1, 1, 0, 1,
    1, 0, 1, 1,
    1, 1, 1, 1,
  ]);
  let d = decompose(&r).unwrap();
  assert!(d.rectangles.len() >= 3);
  assert_sound(&r, &d);
}

/// Seed scenario 4: an L-shaped hole in a 5x5 block.
#[test]
fn l_shaped_hole_resolves_into_rectangles() {
  let r = grid(5, 5, &[
    1, 1, 1, 1, 1,
    1, 0, 1, 1, 1,
    1, 0, 0, 0, 1,
    1, 1, 0, 1, 1,
    1, 1, 1, 1, 1,
  ]);
  let d = decompose(&r).unwrap();
  assert!(d.rectangles.len() >= 2);
  assert_sound(&r, &d);
}

/// Seed scenario 5: a 5x5 block missing one corner pixel -- a single
/// reflex corner with no partner, resolved entirely by ray-casting.
#[test]
fn missing_corner_resolves_with_one_ray_cast() {
  let r = grid(5, 5, &[
    1, 1, 1, 1, 0,
    1, 1, 1, 1, 1,
    1, 1, 1, 1, 1,
    1, 1, 1, 1, 1,
    1, 1, 1, 1, 1,
  ]);
  let d = decompose(&r).unwrap();
  assert_eq!(d.loops.len(), 2);
  assert_eq!(d.rectangles.len(), 2);
  assert_sound(&r, &d);
}

/// A single two-pixel-wide hole (as opposed to the 1x1 holes in the
/// other scenarios) still never touches the outer boundary, so it hits
/// the same concave-everywhere stitching and gets fully ray-cast away.
#[test]
fn wide_hole_resolves_to_disjoint_rectangles() {
  let r = grid(5, 5, &[
    1, 1, 1, 1, 1,
    1, 1, 1, 1, 1,
    1, 1, 0, 0, 1,
    1, 1, 1, 1, 1,
    1, 1, 1, 1, 1,
  ]);
  let d = decompose(&r).unwrap();
  for rect in &d.rectangles {
    assert!(rect.x_min < rect.x_max);
    assert!(rect.y_min < rect.y_max);
  }
  assert!(d.rectangles.len() >= 2);
  assert_sound(&r, &d);
}

mod properties {
  use super::*;
  use proptest::prelude::*;

  proptest! {
    /// For any small raster, `decompose` never errors and the emitted
    /// rectangles always reconstruct the exact input (property 7 and
    /// the round-trip law), regardless of the specific chords or ray
    /// casts chosen along the way.
    #[test]
    fn decompose_preserves_area_and_round_trips(
      rows in 1usize..6,
      cols in 1usize..6,
      seed in prop::collection::vec(any::<bool>(), 0..36),
    ) {
      let mut cells = seed;
      cells.resize(rows * cols, false);
      let r = DenseRaster::new(rows, cols, cells);
      let d = decompose(&r).unwrap();
      assert_eq!(d.loops.len(), d.rectangles.len());
      let area: i64 = d.rectangles.iter().map(rect_area).sum();
      prop_assert_eq!(area as usize, foreground_count(&r));
      for rect in &d.rectangles {
        prop_assert!(rect.x_min < rect.x_max);
        prop_assert!(rect.y_min < rect.y_max);
      }
      assert_disjoint_interiors(&d.rectangles);
      assert_round_trips(&r, &d.rectangles);
    }
  }
}

