//! Section 4.H: walk the segment loops and emit either boundary
//! loops or, after full concave resolution, rectangles.

use crate::arena::{Arenas, SegmentId};
use crate::geom::{Loop, Point, Rect};
use crate::{Error, InternalInvariantReason};

/// Follow `next` from every unvisited segment, marking visited,
/// collecting one `Point` per segment (its `start`) until the walk
/// returns to its origin.
pub fn walk_loops(arenas: &mut Arenas) -> Result<Vec<Loop>, Error> {
  arenas.clear_visited();
  let mut loops = Vec::new();
  let n = arenas.segments.len();
  for i in 0..n {
    let start_id = SegmentId(i as u32);
    if arenas.segment(start_id).visited || arenas.segment(start_id).removed {
      continue;
    }
    let mut points = Vec::new();
    let mut cur = start_id;
    let mut steps = 0;
    loop {
      if arenas.segment(cur).visited {
        return Err(Error::InternalInvariant {
          detail: InternalInvariantReason::LoopDidNotClose,
        });
      }
      arenas.segment_mut(cur).visited = true;
      points.push(arenas.start_point(cur));
      cur = arenas.segment(cur).next;
      steps += 1;
      if steps > n + 1 {
        return Err(Error::InternalInvariant {
          detail: InternalInvariantReason::LoopDidNotClose,
        });
      }
      if cur == start_id {
        break;
      }
    }
    let winding = Loop::winding_of(&points);
    loops.push(Loop { points, winding });
  }
  Ok(loops)
}

/// Walk the loops after concave resolution and emit each as a
/// rectangle. Every loop must have exactly four convex corners.
///
/// Resolving a reflex vertex always extends a chord collinear with its
/// incoming edge (section 4.G), so the point where `resolve` cuts the
/// struck segment in two is a straight 180-degree pass-through, not a
/// corner -- the segment count around such a loop can run higher than
/// four even though the shape it traces is a rectangle. `points` is
/// collected per segment and then collapsed to genuine turns before the
/// four-corner check.
pub fn walk_rectangles(arenas: &mut Arenas) -> Result<Vec<Rect>, Error> {
  arenas.clear_visited();
  let mut rects = Vec::new();
  let n = arenas.segments.len();
  for i in 0..n {
    let start_id = SegmentId(i as u32);
    if arenas.segment(start_id).visited || arenas.segment(start_id).removed {
      continue;
    }
    let mut points: Vec<Point> = Vec::new();
    let mut cur = start_id;
    let mut steps = 0;
    loop {
      if arenas.segment(cur).visited {
        return Err(Error::InternalInvariant {
          detail: InternalInvariantReason::LoopDidNotClose,
        });
      }
      arenas.segment_mut(cur).visited = true;
      let start_vertex = arenas.segment(cur).start;
      if arenas.vertex(start_vertex).concave {
        return Err(Error::InternalInvariant {
          detail: InternalInvariantReason::ResolvedLoopStillConcave,
        });
      }
      points.push(arenas.point_of(start_vertex));
      cur = arenas.segment(cur).next;
      steps += 1;
      if steps > n + 1 {
        return Err(Error::InternalInvariant {
          detail: InternalInvariantReason::LoopDidNotClose,
        });
      }
      if cur == start_id {
        break;
      }
    }
    let corners = collapse_collinear(&points);
    if corners.len() != 4 {
      return Err(Error::InternalInvariant {
        detail: InternalInvariantReason::ResolvedLoopWrongCornerCount,
      });
    }
    let xs: Vec<i64> = corners.iter().map(|p| p.x).collect();
    let ys: Vec<i64> = corners.iter().map(|p| p.y).collect();
    let x_min = *xs.iter().min().unwrap();
    let x_max = *xs.iter().max().unwrap();
    let y_min = *ys.iter().min().unwrap();
    let y_max = *ys.iter().max().unwrap();
    rects.push(Rect::new(x_min, y_min, x_max, y_max));
  }
  Ok(rects)
}

/// Drop every point of a closed cyclic polygon whose incoming and
/// outgoing edge don't actually turn -- i.e. the cross product of the
/// two edge vectors is zero. Leaves the winding and the shape traced
/// out unchanged, just without redundant degree-2 vertices.
fn collapse_collinear(points: &[Point]) -> Vec<Point> {
  let n = points.len();
  (0..n)
    .filter(|&i| {
      let prev = points[(i + n - 1) % n];
      let cur = points[i];
      let next = points[(i + 1) % n];
      let d1 = (cur.x - prev.x, cur.y - prev.y);
      let d2 = (next.x - cur.x, next.y - cur.y);
      d1.0 * d2.1 - d1.1 * d2.0 != 0
    })
    .map(|i| points[i])
    .collect()
}
