//! Section 4.F: splice a selected chord into the arena, turning one
//! reflex-corner pair into two new non-reflex corners and either
//! splitting one loop into two or merging two loops into one,
//! depending on whether the chord's endpoints started on the same
//! boundary walk.
//!
//! The splice is the standard diagonal-insertion trick: introduce the
//! chord twice, once in each direction, and let each copy close off
//! whichever side of the cut it belongs to. It needs no notion of
//! "same loop or different loop" -- the index rewiring is identical
//! either way.

use crate::arena::{Arenas, Segment, SegmentId, Vertex, VertexId};
use crate::diagonals::Chord;
use crate::geom::{Axis, Direction, VertexRole};

/// Splice `chord` into the arena. `chord.a`/`chord.b` must both still
/// be marked concave; both are cleared by this call, and two new
/// segments (`a -> b` and `b -> a`) with four new vertices are added.
pub fn split_chord(arenas: &mut Arenas, chord: &Chord) {
  let a = chord.a;
  let b = chord.b;

  let a_out = outgoing_of(arenas, a.h_vertex, a.v_vertex);
  let a_in = incoming_of(arenas, a.h_vertex, a.v_vertex);
  let b_out = outgoing_of(arenas, b.h_vertex, b.v_vertex);
  let b_in = incoming_of(arenas, b.h_vertex, b.v_vertex);

  let a_out_seg = arenas.vertex(a_out).segment;
  let a_in_seg = arenas.vertex(a_in).segment;
  let b_out_seg = arenas.vertex(b_out).segment;
  let b_in_seg = arenas.vertex(b_in).segment;

  let (lo, hi) = chord.extent();

  let ab = push_chord_segment(arenas, chord.orientation, lo, hi, Direction::Positive);
  let ba = push_chord_segment(arenas, chord.orientation, lo, hi, Direction::Negative);

  let ab_start = arenas.push_vertex(Vertex {
    pos: a.point,
    segment: ab,
    role: VertexRole::Outgoing,
    direction: Direction::Positive,
    concave: false,
  });
  let ab_end = arenas.push_vertex(Vertex {
    pos: b.point,
    segment: ab,
    role: VertexRole::Incoming,
    direction: Direction::Positive,
    concave: false,
  });
  arenas.segment_mut(ab).start = ab_start;
  arenas.segment_mut(ab).end = ab_end;

  let ba_start = arenas.push_vertex(Vertex {
    pos: b.point,
    segment: ba,
    role: VertexRole::Outgoing,
    direction: Direction::Negative,
    concave: false,
  });
  let ba_end = arenas.push_vertex(Vertex {
    pos: a.point,
    segment: ba,
    role: VertexRole::Incoming,
    direction: Direction::Negative,
    concave: false,
  });
  arenas.segment_mut(ba).start = ba_start;
  arenas.segment_mut(ba).end = ba_end;

  link(arenas, a_in_seg, ab);
  link(arenas, ab, b_out_seg);
  link(arenas, b_in_seg, ba);
  link(arenas, ba, a_out_seg);

  arenas.vertex_mut(a.h_vertex).concave = false;
  arenas.vertex_mut(a.v_vertex).concave = false;
  arenas.vertex_mut(b.h_vertex).concave = false;
  arenas.vertex_mut(b.v_vertex).concave = false;
}

fn outgoing_of(arenas: &Arenas, h: VertexId, v: VertexId) -> VertexId {
  if arenas.vertex(h).role == VertexRole::Outgoing {
    h
  } else {
    v
  }
}

fn incoming_of(arenas: &Arenas, h: VertexId, v: VertexId) -> VertexId {
  if arenas.vertex(h).role == VertexRole::Incoming {
    h
  } else {
    v
  }
}

fn push_chord_segment(
  arenas: &mut Arenas,
  orientation: Axis,
  lo: i64,
  hi: i64,
  direction: Direction,
) -> SegmentId {
  arenas.push_segment(Segment {
    orientation,
    start: VertexId(u32::MAX),
    end: VertexId(u32::MAX),
    direction,
    lo,
    hi,
    next: SegmentId(u32::MAX),
    prev: SegmentId(u32::MAX),
    visited: false,
    removed: false,
  })
}

fn link(arenas: &mut Arenas, from: SegmentId, to: SegmentId) {
  arenas.segment_mut(from).next = to;
  arenas.segment_mut(to).prev = from;
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geom::Point;
  use crate::stitch::ConcaveCorner;
  use crate::walk::walk_loops;

  /// Hand-build the boundary of a plus pentomino as a 12-segment loop,
  /// without going through the scanner, so the split logic can be
  /// tested against exact, independently-verified topology.
  fn plus_shape_arena() -> (Arenas, VertexId, VertexId) {
    let pts = [
      Point::new(1, 0), // P0
      Point::new(2, 0), // P1
      Point::new(2, 1), // P2 concave
      Point::new(3, 1), // P3
      Point::new(3, 2), // P4
      Point::new(2, 2), // P5 concave
      Point::new(2, 3), // P6
      Point::new(1, 3), // P7
      Point::new(1, 2), // P8 concave
      Point::new(0, 2), // P9
      Point::new(0, 1), // P10
      Point::new(1, 1), // P11 concave
    ];
    let concave_idx = [2usize, 5, 8, 11];

    let mut arenas = Arenas::new();
    let n = pts.len();
    let seg_ids: Vec<SegmentId> = (0..n)
      .map(|i| {
        let p = pts[i];
        let q = pts[(i + 1) % n];
        let orientation = if p.y == q.y {
          Axis::Horizontal
        } else {
          Axis::Vertical
        };
        let (lo, hi) = match orientation {
          Axis::Horizontal => (p.x.min(q.x), p.x.max(q.x)),
          Axis::Vertical => (p.y.min(q.y), p.y.max(q.y)),
        };
        let direction = match orientation {
          Axis::Horizontal => Direction::of(q.x - p.x),
          Axis::Vertical => Direction::of(q.y - p.y),
        };
        arenas.push_segment(Segment {
          orientation,
          start: VertexId(u32::MAX),
          end: VertexId(u32::MAX),
          direction,
          lo,
          hi,
          next: SegmentId(u32::MAX),
          prev: SegmentId(u32::MAX),
          visited: false,
          removed: false,
        })
      })
      .collect();

    for i in 0..n {
      let prev_id = seg_ids[(i + n - 1) % n];
      let next_id = seg_ids[i];
      arenas.segment_mut(prev_id).next = next_id;
      arenas.segment_mut(next_id).prev = prev_id;
    }

    let mut vid_at = Vec::with_capacity(n);
    for i in 0..n {
      let concave = concave_idx.contains(&i);
      let vid = arenas.push_vertex(Vertex {
        pos: pts[i],
        segment: seg_ids[i],
        role: VertexRole::Outgoing,
        direction: arenas.segment(seg_ids[i]).direction,
        concave,
      });
      arenas.segment_mut(seg_ids[i]).start = vid;
      vid_at.push(vid);
    }
    for i in 0..n {
      let incoming_vid = arenas.push_vertex(Vertex {
        pos: pts[i],
        segment: seg_ids[(i + n - 1) % n],
        role: VertexRole::Incoming,
        direction: arenas.segment(seg_ids[(i + n - 1) % n]).direction,
        concave: concave_idx.contains(&i),
      });
      arenas.segment_mut(seg_ids[(i + n - 1) % n]).end = incoming_vid;
    }

    // P11 (index 11) and P2 (index 2) are the chord endpoints used below.
    let p11_h_or_v = vid_at[11];
    let p2_h_or_v = vid_at[2];
    (arenas, p11_h_or_v, p2_h_or_v)
  }

  #[test]
  fn split_resolves_one_corner_pair_and_leaves_the_rest() {
    let (mut arenas, p11, p2) = plus_shape_arena();
    // Find the Incoming-role counterpart vertices at the same points,
    // since a ConcaveCorner needs both the outgoing and incoming
    // vertex at its point (the H/V pairing doesn't matter here -- the
    // splice logic only cares about role, not orientation).
    let p11_incoming = arenas
      .vertices
      .iter()
      .position(|v| v.pos == Point::new(1, 1) && v.role == VertexRole::Incoming)
      .map(|i| VertexId(i as u32))
      .unwrap();
    let p2_incoming = arenas
      .vertices
      .iter()
      .position(|v| v.pos == Point::new(2, 1) && v.role == VertexRole::Incoming)
      .map(|i| VertexId(i as u32))
      .unwrap();

    let a = ConcaveCorner {
      point: Point::new(1, 1),
      h_vertex: p11,
      v_vertex: p11_incoming,
    };
    let b = ConcaveCorner {
      point: Point::new(2, 1),
      h_vertex: p2_incoming,
      v_vertex: p2,
    };
    let chord = Chord {
      orientation: Axis::Horizontal,
      a,
      b,
    };

    split_chord(&mut arenas, &chord);

    for (i, s) in arenas.segments.iter().enumerate() {
      let id = SegmentId(i as u32);
      assert_eq!(arenas.segment(s.next).prev, id);
      assert_eq!(arenas.segment(s.prev).next, id);
    }

    let mut loops = walk_loops(&mut arenas).unwrap();
    loops.sort_by_key(|l| l.points.len());
    assert_eq!(loops.len(), 2);
    assert_eq!(loops[0].points.len(), 4);
    assert_eq!(loops[1].points.len(), 10);

    let mut rect_points = loops[0].points.clone();
    rect_points.sort();
    let mut expected = vec![
      Point::new(1, 0),
      Point::new(2, 0),
      Point::new(2, 1),
      Point::new(1, 1),
    ];
    expected.sort();
    assert_eq!(rect_points, expected);
  }
}
