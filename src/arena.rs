//! Arena-indexed segment/vertex graph.
//!
//! Instead of an `Rc<RefCell<..>>` cyclic object graph, `next`/`prev`/
//! `start`/`end` are plain indices into two flat `Vec`s owned by a
//! single [`Arenas`]. This mirrors `VertexList`'s `links: Vec<Link>`
//! representation: splitting a loop becomes "push a new element, rewire
//! a handful of indices" rather than any pointer surgery.

use crate::geom::{Axis, Direction, Point, VertexRole};

/// Index into `Arenas::segments`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(pub u32);

impl std::fmt::Debug for SegmentId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "S{}", self.0)
  }
}

/// Index into `Arenas::vertices`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub u32);

impl std::fmt::Debug for VertexId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "V{}", self.0)
  }
}

/// A directed axis-aligned boundary edge (or chord).
#[derive(Debug, Clone, Copy)]
pub struct Segment {
  pub orientation: Axis,
  pub start: VertexId,
  pub end: VertexId,
  pub direction: Direction,
  /// Canonical `min(start, end)..max(start, end)` along the segment's axis.
  pub lo: i64,
  pub hi: i64,
  pub next: SegmentId,
  pub prev: SegmentId,
  pub visited: bool,
  /// Set once this segment has been cut into two pieces by
  /// `resolve::split_struck_segment` and spliced out of the `next`/`prev`
  /// ring. A removed segment is never reachable by following links from
  /// a live one, but it still occupies its arena slot, so every walk and
  /// every interval-tree rebuild must skip it explicitly.
  pub removed: bool,
}

impl Segment {
  /// The coordinate shared by both endpoints, on the axis the segment
  /// does *not* run along (e.g. the constant `x` of a vertical segment).
  pub fn fixed_coord(&self, arenas: &Arenas) -> i64 {
    let p = arenas.point_of(self.start);
    match self.orientation {
      Axis::Horizontal => p.y,
      Axis::Vertical => p.x,
    }
  }
}

/// A corner of the polygon, incident to exactly one segment as either
/// its `start` (outgoing) or `end` (incoming).
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
  pub pos: Point,
  pub segment: SegmentId,
  pub role: VertexRole,
  pub direction: Direction,
  pub concave: bool,
}

/// Owns every `Segment` and `Vertex` created during one `decompose()`
/// call. Nothing here outlives the call.
#[derive(Debug, Default)]
pub struct Arenas {
  pub segments: Vec<Segment>,
  pub vertices: Vec<Vertex>,
}

impl Arenas {
  pub fn new() -> Arenas {
    Arenas::default()
  }

  pub fn push_segment(&mut self, seg: Segment) -> SegmentId {
    let id = SegmentId(self.segments.len() as u32);
    self.segments.push(seg);
    id
  }

  pub fn push_vertex(&mut self, v: Vertex) -> VertexId {
    let id = VertexId(self.vertices.len() as u32);
    self.vertices.push(v);
    id
  }

  pub fn segment(&self, id: SegmentId) -> &Segment {
    &self.segments[id.0 as usize]
  }

  pub fn segment_mut(&mut self, id: SegmentId) -> &mut Segment {
    &mut self.segments[id.0 as usize]
  }

  pub fn vertex(&self, id: VertexId) -> &Vertex {
    &self.vertices[id.0 as usize]
  }

  pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
    &mut self.vertices[id.0 as usize]
  }

  pub fn point_of(&self, v: VertexId) -> Point {
    self.vertex(v).pos
  }

  pub fn start_point(&self, s: SegmentId) -> Point {
    self.point_of(self.segment(s).start)
  }

  pub fn end_point(&self, s: SegmentId) -> Point {
    self.point_of(self.segment(s).end)
  }

  /// All live segment ids with the given orientation, in arena order.
  pub fn segments_of(&self, axis: Axis) -> Vec<SegmentId> {
    self
      .segments
      .iter()
      .enumerate()
      .filter(|(_, s)| s.orientation == axis && !s.removed)
      .map(|(i, _)| SegmentId(i as u32))
      .collect()
  }

  pub fn clear_visited(&mut self) {
    for s in &mut self.segments {
      s.visited = false;
    }
  }
}
