//! Section 4.D: for each axis, pair up collinear concave vertices into
//! chord candidates that don't cross any existing opposite-orientation
//! boundary segment.

use crate::arena::{Arenas, SegmentId};
use crate::geom::{Axis, Point};
use crate::interval_tree::{IntervalTree, Step};
use crate::stitch::ConcaveCorner;

/// A candidate diagonal between two concave vertices, `a` always the
/// lesser endpoint along the chord's own axis.
#[derive(Debug, Clone, Copy)]
pub struct Chord {
  pub orientation: Axis,
  pub a: ConcaveCorner,
  pub b: ConcaveCorner,
}

impl Chord {
  /// The coordinate shared by both endpoints.
  pub fn fixed(&self) -> i64 {
    match self.orientation {
      Axis::Horizontal => self.a.point.y,
      Axis::Vertical => self.a.point.x,
    }
  }

  /// `(lo, hi)` along the chord's own axis.
  pub fn extent(&self) -> (i64, i64) {
    match self.orientation {
      Axis::Horizontal => (self.a.point.x, self.b.point.x),
      Axis::Vertical => (self.a.point.y, self.b.point.y),
    }
  }
}

/// Build an interval tree over every live segment of `axis`'s
/// orientation, keyed by the segment's own `lo..hi` extent -- exactly
/// what's needed to test whether such a segment crosses a chord of the
/// opposite axis. Segments tombstoned by `resolve::split_struck_segment`
/// are excluded; their replacement pieces are already in the arena.
pub fn build_axis_tree(arenas: &Arenas, axis: Axis) -> IntervalTree<SegmentId> {
  let intervals: Vec<_> = arenas
    .segments
    .iter()
    .enumerate()
    .filter(|(_, s)| s.orientation == axis && !s.removed)
    .map(|(i, s)| (s.lo, s.hi, SegmentId(i as u32)))
    .collect();
  IntervalTree::build(&intervals)
}

/// Find every non-crossing chord candidate running along `axis`,
/// given the concave corners and an interval tree over the *opposite*
/// orientation's segments.
pub fn find_diagonals(
  arenas: &Arenas,
  axis: Axis,
  concave: &[ConcaveCorner],
  opposite_tree: &IntervalTree<SegmentId>,
) -> Vec<Chord> {
  let mut sorted: Vec<ConcaveCorner> = concave.to_vec();
  sorted.sort_by_key(|c| match axis {
    Axis::Horizontal => (c.point.y, c.point.x),
    Axis::Vertical => (c.point.x, c.point.y),
  });

  let mut chords = Vec::new();
  for pair in sorted.windows(2) {
    let (p, q) = (pair[0], pair[1]);
    let shared_other = match axis {
      Axis::Horizontal => p.point.y == q.point.y,
      Axis::Vertical => p.point.x == q.point.x,
    };
    if !shared_other {
      continue;
    }
    let (a, b) = match axis {
      Axis::Horizontal if p.point.x <= q.point.x => (p, q),
      Axis::Horizontal => (q, p),
      Axis::Vertical if p.point.y <= q.point.y => (p, q),
      Axis::Vertical => (q, p),
    };
    if a.point == b.point {
      continue;
    }
    if is_degenerate(arenas, axis, &a, &b) {
      continue;
    }
    let (lo, hi) = match axis {
      Axis::Horizontal => (a.point.x, b.point.x),
      Axis::Vertical => (a.point.y, b.point.y),
    };
    let shared = match axis {
      Axis::Horizontal => a.point.y,
      Axis::Vertical => a.point.x,
    };
    let crosses = opposite_tree
      .stab(shared, &mut |seg_id| {
        let seg = arenas.segment(seg_id);
        let fixed = seg.fixed_coord(arenas);
        if fixed > lo && fixed < hi {
          Step::Stop(())
        } else {
          Step::Continue
        }
      })
      .is_some();
    if crosses {
      continue;
    }
    chords.push(Chord {
      orientation: axis,
      a,
      b,
    });
  }
  chords
}

/// The two guards from section 9: skip a would-be chord when its
/// endpoints are already directly joined by a single boundary edge of
/// the same orientation -- either because that edge's far endpoint is
/// the other corner, or because the edge immediately preceding it
/// starts there.
fn is_degenerate(arenas: &Arenas, axis: Axis, a: &ConcaveCorner, b: &ConcaveCorner) -> bool {
  let seg_of = |corner: &ConcaveCorner| match axis {
    Axis::Horizontal => corner.h_vertex,
    Axis::Vertical => corner.v_vertex,
  };
  let sa = arenas.vertex(seg_of(a)).segment;
  let sb = arenas.vertex(seg_of(b)).segment;

  let endpoint_matches = |seg, target: Point| -> bool {
    arenas.start_point(seg) == target || arenas.end_point(seg) == target
  };
  if endpoint_matches(sa, b.point) || endpoint_matches(sb, a.point) {
    return true;
  }
  let prev_a = arenas.segment(sa).prev;
  let prev_b = arenas.segment(sb).prev;
  arenas.start_point(prev_a) == b.point || arenas.start_point(prev_b) == a.point
}
