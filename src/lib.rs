//! Decompose a binary raster into its boundary loops and a minimal
//! cover of axis-aligned rectangles.
//!
//! The pipeline is a fixed sequence of stages, each its own module:
//! scan the raster into raw wall segments (`scanner`), stitch them
//! into closed arena-indexed loops (`stitch`), find candidate chords
//! between concave corners (`diagonals`), pick the largest
//! non-crossing subset via bipartite matching (`bipartite`), splice
//! the winners in (`splitter`), resolve whatever concave vertices are
//! left by ray-casting (`resolve`), then walk the final loops
//! (`walk`). `decompose` is the only entry point; everything else is
//! `pub` for whitebox testing but not meant to be assembled any other
//! way.

pub mod arena;
pub mod bipartite;
pub mod diagonals;
pub mod geom;
pub mod interval_tree;
pub mod raster;
pub mod resolve;
pub mod scanner;
pub mod splitter;
pub mod stitch;
pub mod walk;

#[cfg(test)]
mod tests;

use arena::Arenas;
use geom::{Axis, Loop, Rect};
use raster::Raster;

/// Everything gone wrong in one failure value. No variant wraps an
/// external error type, so this stays a plain `Copy` enum rather than
/// going through `thiserror`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// The raster itself is malformed (ragged rows, out-of-range cell).
  InvalidInput { detail: InvalidInputReason },
  /// Scanning produced boundary data that doesn't form valid loops.
  /// Indicates a bug in scanning, or a pathological input the core
  /// does not support.
  MalformedGeometry { detail: MalformedGeometryReason },
  /// An internal invariant failed mid-pipeline. Fatal, never
  /// recoverable -- always a bug in this crate, not the caller.
  InternalInvariant { detail: InternalInvariantReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputReason {
  RaggedRows,
  NonBinaryCell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedGeometryReason {
  UnequalEndpointCounts,
  NonCoincidentPair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalInvariantReason {
  LoopDidNotClose,
  ResolvedLoopStillConcave,
  ResolvedLoopWrongCornerCount,
  NoResolverIntersection,
  ResolverDidNotTerminate,
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Error::InvalidInput { detail } => write!(f, "invalid raster input: {:?}", detail),
      Error::MalformedGeometry { detail } => write!(f, "malformed boundary geometry: {:?}", detail),
      Error::InternalInvariant { detail } => write!(f, "internal invariant violated: {:?}", detail),
    }
  }
}

impl std::error::Error for Error {}

/// Both output representations of a decomposed raster: the closed
/// boundary loops (with winding) and the final rectangle cover. Once
/// concave resolution has run these describe the same geometry, just
/// in two shapes -- every loop here has exactly four corners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
  pub loops: Vec<Loop>,
  pub rectangles: Vec<Rect>,
}

/// Run the full pipeline: scan, stitch, find and select chords, split,
/// resolve remaining concave vertices, then walk the result.
pub fn decompose<R: Raster>(raster: &R) -> Result<Decomposition, Error> {
  let shape = raster.shape();
  log::debug!("decompose: raster shape = {:?}", shape);

  let (v_raw, h_raw) = scanner::scan(raster);
  log::trace!(
    "scanned {} vertical, {} horizontal raw segments",
    v_raw.len(),
    h_raw.len()
  );

  let (mut arenas, concave) = stitch::stitch(h_raw, v_raw)?;
  log::trace!(
    "stitched into {} segments, {} concave corners",
    arenas.segments.len(),
    concave.len()
  );

  split_chords(&mut arenas, &concave)?;
  resolve::resolve_all(&mut arenas)?;

  let loops = walk::walk_loops(&mut arenas)?;
  let rectangles = walk::walk_rectangles(&mut arenas)?;
  log::debug!("decomposed into {} rectangles", rectangles.len());

  Ok(Decomposition { loops, rectangles })
}

fn split_chords(arenas: &mut Arenas, concave: &[stitch::ConcaveCorner]) -> Result<(), Error> {
  let v_tree = diagonals::build_axis_tree(arenas, Axis::Vertical);
  let h_tree = diagonals::build_axis_tree(arenas, Axis::Horizontal);
  let h_chords = diagonals::find_diagonals(arenas, Axis::Horizontal, concave, &v_tree);
  let v_chords = diagonals::find_diagonals(arenas, Axis::Vertical, concave, &h_tree);
  log::trace!(
    "found {} horizontal, {} vertical chord candidates",
    h_chords.len(),
    v_chords.len()
  );

  let (selected_h, selected_v) = bipartite::select_chords(h_chords, v_chords);
  log::trace!(
    "selected {} non-crossing chords",
    selected_h.len() + selected_v.len()
  );
  for chord in selected_h.iter().chain(selected_v.iter()) {
    splitter::split_chord(arenas, chord);
  }
  Ok(())
}
