//! Section 4.C: attach vertices to raw segments and glue H/V half-edges
//! into closed, doubly-linked loops, marking concave corners.

use crate::arena::{Arenas, Segment, SegmentId, Vertex, VertexId};
use crate::geom::{Axis, Direction, Point, VertexRole};
use crate::scanner::{direction_of, RawSegment};
use crate::{Error, MalformedGeometryReason};

fn dir_key(d: Direction) -> i64 {
  match d {
    Direction::Positive => 1,
    Direction::Negative => -1,
  }
}

/// A concave corner, referenced by its two incident vertices (one on
/// the horizontal segment that meets there, one on the vertical one).
#[derive(Debug, Clone, Copy)]
pub struct ConcaveCorner {
  pub point: Point,
  pub h_vertex: VertexId,
  pub v_vertex: VertexId,
}

/// One endpoint of a not-yet-linked segment, carrying enough to sort
/// and pair it against its opposite-orientation counterpart.
struct Endpoint {
  point: Point,
  direction: Direction,
  role: VertexRole,
  segment: SegmentId,
}

/// Build the arena of segments/vertices from the two raw segment
/// lists and stitch them into closed loops. Returns the arena and the
/// list of vertices marked concave.
pub fn stitch(
  h_raw: Vec<RawSegment>,
  v_raw: Vec<RawSegment>,
) -> Result<(Arenas, Vec<ConcaveCorner>), Error> {
  let mut arenas = Arenas::new();
  let mut h_endpoints = Vec::with_capacity(h_raw.len() * 2);
  let mut v_endpoints = Vec::with_capacity(v_raw.len() * 2);

  for raw in h_raw {
    push_segment(&mut arenas, &mut h_endpoints, raw);
  }
  for raw in v_raw {
    push_segment(&mut arenas, &mut v_endpoints, raw);
  }

  if h_endpoints.len() != v_endpoints.len() {
    return Err(Error::MalformedGeometry {
      detail: MalformedGeometryReason::UnequalEndpointCounts,
    });
  }

  h_endpoints.sort_by_key(|e| (e.point.x, e.point.y, dir_key(e.direction)));
  v_endpoints.sort_by_key(|e| {
    let signed = match e.role {
      VertexRole::Outgoing => dir_key(e.direction),
      VertexRole::Incoming => -dir_key(e.direction),
    };
    (e.point.x, e.point.y, signed)
  });

  let mut concave = Vec::new();
  for (h, v) in h_endpoints.iter().zip(v_endpoints.iter()) {
    if h.point != v.point {
      return Err(Error::MalformedGeometry {
        detail: MalformedGeometryReason::NonCoincidentPair,
      });
    }
    let h_vid = arenas.push_vertex(Vertex {
      pos: h.point,
      segment: h.segment,
      role: h.role,
      direction: h.direction,
      concave: false,
    });
    let v_vid = arenas.push_vertex(Vertex {
      pos: v.point,
      segment: v.segment,
      role: v.role,
      direction: v.direction,
      concave: false,
    });

    let is_concave = match h.role {
      VertexRole::Outgoing => {
        arenas.segment_mut(h.segment).prev = v.segment;
        arenas.segment_mut(v.segment).next = h.segment;
        h.direction == v.direction
      }
      VertexRole::Incoming => {
        arenas.segment_mut(h.segment).next = v.segment;
        arenas.segment_mut(v.segment).prev = h.segment;
        h.direction != v.direction
      }
    };
    arenas.vertex_mut(h_vid).concave = is_concave;
    arenas.vertex_mut(v_vid).concave = is_concave;
    attach_vertex(&mut arenas, h.segment, h.role, h_vid);
    attach_vertex(&mut arenas, v.segment, v.role, v_vid);
    if is_concave {
      concave.push(ConcaveCorner {
        point: h.point,
        h_vertex: h_vid,
        v_vertex: v_vid,
      });
    }
  }

  Ok((arenas, concave))
}

fn push_segment(arenas: &mut Arenas, endpoints: &mut Vec<Endpoint>, raw: RawSegment) {
  let direction = direction_of(&raw);
  let (lo, hi) = match raw.orientation {
    Axis::Horizontal => (raw.start.x.min(raw.end.x), raw.start.x.max(raw.end.x)),
    Axis::Vertical => (raw.start.y.min(raw.end.y), raw.start.y.max(raw.end.y)),
  };
  let id = arenas.push_segment(Segment {
    orientation: raw.orientation,
    start: VertexId(u32::MAX),
    end: VertexId(u32::MAX),
    direction,
    lo,
    hi,
    next: SegmentId(u32::MAX),
    prev: SegmentId(u32::MAX),
    visited: false,
    removed: false,
  });
  endpoints.push(Endpoint {
    point: raw.start,
    direction,
    role: VertexRole::Outgoing,
    segment: id,
  });
  endpoints.push(Endpoint {
    point: raw.end,
    direction,
    role: VertexRole::Incoming,
    segment: id,
  });
}

fn attach_vertex(arenas: &mut Arenas, segment: SegmentId, role: VertexRole, vid: VertexId) {
  match role {
    VertexRole::Outgoing => arenas.segment_mut(segment).start = vid,
    VertexRole::Incoming => arenas.segment_mut(segment).end = vid,
  }
}
