//! Section 4.G: resolve whatever concave vertices survive chord
//! splitting by ray-casting from each one to the nearest opposite-axis
//! segment and splicing in a Steiner chord.
//!
//! The ray direction follows the same "foreground on the left of
//! travel" convention the scanner uses (`scanner.rs`): rotating the
//! outgoing segment's direction vector 90 degrees (`(dx, dy) -> (-dy,
//! dx)`) always points into the interior. For a vertical outgoing
//! segment that flips the sign of its own direction on the
//! perpendicular axis; for a horizontal one it keeps it.

use std::collections::BTreeMap;

use crate::arena::{Arenas, Segment, SegmentId, Vertex, VertexId};
use crate::diagonals::{build_axis_tree, Chord};
use crate::geom::{Axis, Direction, Point};
use crate::interval_tree::Step;
use crate::splitter::split_chord;
use crate::stitch::ConcaveCorner;
use crate::{Error, InternalInvariantReason};

/// Resolve every remaining concave vertex, rebuilding the relevant
/// interval tree before each strike (section 9's documented
/// inefficiency). Terminates when no concave vertex remains.
pub fn resolve_all(arenas: &mut Arenas) -> Result<(), Error> {
  let budget = arenas.vertices.len() + 1;
  for _ in 0..budget {
    let corners = remaining_concave_corners(arenas);
    let Some((point, h, v)) = corners.into_iter().next() else {
      return Ok(());
    };
    resolve_one(arenas, point, h, v)?;
  }
  Err(Error::InternalInvariant {
    detail: InternalInvariantReason::ResolverDidNotTerminate,
  })
}

fn remaining_concave_corners(arenas: &Arenas) -> Vec<(Point, VertexId, VertexId)> {
  let mut by_point: BTreeMap<Point, Vec<VertexId>> = BTreeMap::new();
  for (i, v) in arenas.vertices.iter().enumerate() {
    if v.concave {
      by_point.entry(v.pos).or_default().push(VertexId(i as u32));
    }
  }
  by_point
    .into_iter()
    .filter_map(|(p, ids)| match ids.as_slice() {
      [a, b] => Some((p, *a, *b)),
      _ => None,
    })
    .collect()
}

fn resolve_one(arenas: &mut Arenas, point: Point, h: VertexId, v: VertexId) -> Result<(), Error> {
  let outgoing = if arenas.vertex(h).role == crate::geom::VertexRole::Outgoing {
    h
  } else {
    v
  };
  let outgoing_seg = arenas.segment(arenas.vertex(outgoing).segment).clone();

  let (ray_axis, ray_dir) = match outgoing_seg.orientation {
    Axis::Vertical => (
      Axis::Horizontal,
      match outgoing_seg.direction {
        Direction::Positive => Direction::Negative,
        Direction::Negative => Direction::Positive,
      },
    ),
    Axis::Horizontal => (Axis::Vertical, outgoing_seg.direction),
  };
  let target_axis = outgoing_seg.orientation;

  let along = match ray_axis {
    Axis::Horizontal => point.x,
    Axis::Vertical => point.y,
  };
  let fixed = match ray_axis {
    Axis::Horizontal => point.y,
    Axis::Vertical => point.x,
  };

  let tree = build_axis_tree(arenas, target_axis);
  let mut best: Option<(i64, SegmentId)> = None;
  tree.stab::<()>(fixed, &mut |seg_id| {
    let seg = arenas.segment(seg_id);
    let candidate = seg.fixed_coord(arenas);
    let forward = match ray_dir {
      Direction::Positive => candidate > along,
      Direction::Negative => candidate < along,
    };
    if forward {
      let dist = (candidate - along).abs();
      if best.map_or(true, |(d, _)| dist < d) {
        best = Some((dist, seg_id));
      }
    }
    Step::Continue
  });

  let Some((_, struck)) = best else {
    return Err(Error::InternalInvariant {
      detail: InternalInvariantReason::NoResolverIntersection,
    });
  };

  let hit = match ray_axis {
    Axis::Horizontal => Point::new(arenas.segment(struck).fixed_coord(arenas), point.y),
    Axis::Vertical => Point::new(point.x, arenas.segment(struck).fixed_coord(arenas)),
  };

  let b_corner = split_struck_segment(arenas, struck, hit);
  let a_corner = ConcaveCorner {
    point,
    h_vertex: h,
    v_vertex: v,
  };

  let (a, b) = match ray_axis {
    Axis::Horizontal if point.x <= hit.x => (a_corner, b_corner),
    Axis::Horizontal => (b_corner, a_corner),
    Axis::Vertical if point.y <= hit.y => (a_corner, b_corner),
    Axis::Vertical => (b_corner, a_corner),
  };
  let chord = Chord {
    orientation: ray_axis,
    a,
    b,
  };
  split_chord(arenas, &chord);
  Ok(())
}

/// Split `struck` into two collinear pieces at `hit`, creating the
/// Incoming/Outgoing vertex pair the splitter needs at that point.
/// `struck` itself is spliced out of the ring and tombstoned
/// (`removed = true`) rather than dropped from the arena, since every
/// other id stays stable; callers must skip removed segments when
/// choosing walk starts or rebuilding interval trees over it.
fn split_struck_segment(arenas: &mut Arenas, struck: SegmentId, hit: Point) -> ConcaveCorner {
  let old = arenas.segment(struck).clone();
  let old_start = old.start;
  let old_end = old.end;

  let (lo1, hi1, lo2, hi2) = match old.direction {
    Direction::Positive => (old.lo, along_of(old.orientation, hit), along_of(old.orientation, hit), old.hi),
    Direction::Negative => (along_of(old.orientation, hit), old.hi, old.lo, along_of(old.orientation, hit)),
  };

  let piece1 = arenas.push_segment(Segment {
    orientation: old.orientation,
    start: old_start,
    end: VertexId(u32::MAX),
    direction: old.direction,
    lo: lo1,
    hi: hi1,
    next: SegmentId(u32::MAX),
    prev: old.prev,
    visited: false,
    removed: false,
  });
  let piece2 = arenas.push_segment(Segment {
    orientation: old.orientation,
    start: VertexId(u32::MAX),
    end: old_end,
    direction: old.direction,
    lo: lo2,
    hi: hi2,
    next: old.next,
    prev: SegmentId(u32::MAX),
    visited: false,
    removed: false,
  });

  let v_end1 = arenas.push_vertex(Vertex {
    pos: hit,
    segment: piece1,
    role: crate::geom::VertexRole::Incoming,
    direction: old.direction,
    concave: false,
  });
  let v_start2 = arenas.push_vertex(Vertex {
    pos: hit,
    segment: piece2,
    role: crate::geom::VertexRole::Outgoing,
    direction: old.direction,
    concave: false,
  });
  arenas.segment_mut(piece1).end = v_end1;
  arenas.segment_mut(piece2).start = v_start2;

  arenas.vertex_mut(old_start).segment = piece1;
  arenas.vertex_mut(old_end).segment = piece2;

  let prev_of_old = old.prev;
  let next_of_old = old.next;
  arenas.segment_mut(prev_of_old).next = piece1;
  arenas.segment_mut(next_of_old).prev = piece2;
  arenas.segment_mut(struck).removed = true;

  match old.direction {
    Direction::Positive => ConcaveCorner {
      point: hit,
      h_vertex: v_end1,
      v_vertex: v_start2,
    },
    Direction::Negative => ConcaveCorner {
      point: hit,
      h_vertex: v_start2,
      v_vertex: v_end1,
    },
  }
}

fn along_of(orientation: Axis, p: Point) -> i64 {
  match orientation {
    Axis::Horizontal => p.x,
    Axis::Vertical => p.y,
  }
}
