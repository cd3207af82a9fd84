//! Section 4.B: two raster passes emitting axis-parallel boundary
//! segments with canonical direction.
//!
//! Both passes share one shape: walk "walls" between adjacent
//! columns (vertical pass) or rows (horizontal pass), including the
//! synthetic walls before index 0 and after the last index, where the
//! out-of-bounds side reads as background. Along each wall, merge
//! consecutive positions with the same "which side is filled" state
//! into a single segment, oriented so the foreground always lies to
//! the segment's left when walking from `start` to `end`.

use crate::geom::{Axis, Direction, Point};
use crate::raster::Raster;

/// A boundary segment before vertices have been attached (section 4.C
/// attaches them). `start`/`end` are raw points, not `VertexId`s yet.
#[derive(Debug, Clone, Copy)]
pub struct RawSegment {
  pub orientation: Axis,
  pub start: Point,
  pub end: Point,
}

pub fn scan<R: Raster>(raster: &R) -> (Vec<RawSegment>, Vec<RawSegment>) {
  let (rows, cols) = raster.shape();
  (
    scan_vertical(raster, rows, cols),
    scan_horizontal(raster, rows, cols),
  )
}

/// At grid column `x - 1` / `x`, whether the side just declared is
/// filled and which one it is, expressed as `(left, right)`.
fn scan_vertical<R: Raster>(raster: &R, rows: usize, cols: usize) -> Vec<RawSegment> {
  let at = |row: usize, col: usize| -> bool {
    if row >= rows {
      false
    } else {
      raster.get(row, col)
    }
  };
  let left_of = |row: usize, x: usize| -> bool {
    if x == 0 {
      false
    } else {
      at(row, x - 1)
    }
  };
  let right_of = |row: usize, x: usize| -> bool {
    if x >= cols {
      false
    } else {
      at(row, x)
    }
  };

  let mut out = Vec::new();
  for x in 0..=cols {
    let mut prev = (false, false);
    let mut run_start: usize = 0;
    for row in 0..=rows {
      let cur = (left_of(row, x), right_of(row, x));
      if cur != prev {
        if prev.0 != prev.1 {
          let x = x as i64;
          let (run_start, row) = (run_start as i64, row as i64);
          if prev.0 {
            // left filled, right empty: foreground to the left when
            // walking toward increasing y.
            out.push(RawSegment {
              orientation: Axis::Vertical,
              start: Point::new(x, run_start),
              end: Point::new(x, row),
            });
          } else {
            out.push(RawSegment {
              orientation: Axis::Vertical,
              start: Point::new(x, row),
              end: Point::new(x, run_start),
            });
          }
        }
        if cur.0 != cur.1 {
          run_start = row;
        }
        prev = cur;
      }
    }
  }
  out
}

fn scan_horizontal<R: Raster>(raster: &R, rows: usize, cols: usize) -> Vec<RawSegment> {
  let at = |row: usize, col: usize| -> bool {
    if col >= cols {
      false
    } else {
      raster.get(row, col)
    }
  };
  let above_of = |y: usize, col: usize| -> bool {
    if y == 0 {
      false
    } else {
      at(y - 1, col)
    }
  };
  let below_of = |y: usize, col: usize| -> bool {
    if y >= rows {
      false
    } else {
      at(y, col)
    }
  };

  let mut out = Vec::new();
  for y in 0..=rows {
    let mut prev = (false, false);
    let mut run_start: usize = 0;
    for col in 0..=cols {
      let cur = (above_of(y, col), below_of(y, col));
      if cur != prev {
        if prev.0 != prev.1 {
          let y = y as i64;
          let (run_start, col) = (run_start as i64, col as i64);
          if prev.1 {
            // below filled, above empty: foreground to the left when
            // walking toward increasing x.
            out.push(RawSegment {
              orientation: Axis::Horizontal,
              start: Point::new(run_start, y),
              end: Point::new(col, y),
            });
          } else {
            out.push(RawSegment {
              orientation: Axis::Horizontal,
              start: Point::new(col, y),
              end: Point::new(run_start, y),
            });
          }
        }
        if cur.0 != cur.1 {
          run_start = col;
        }
        prev = cur;
      }
    }
  }
  out
}

pub fn direction_of(seg: &RawSegment) -> Direction {
  match seg.orientation {
    Axis::Vertical => Direction::of(seg.end.y - seg.start.y),
    Axis::Horizontal => Direction::of(seg.end.x - seg.start.x),
  }
}
