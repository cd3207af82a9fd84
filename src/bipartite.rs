//! Section 4.E: the bipartite crossing graph between H-chords and
//! V-chords, and König's theorem (maximum matching -> minimum vertex
//! cover -> maximum independent set) to pick the largest non-crossing
//! chord set.
//!
//! The matcher below is the "simpler Hungarian-style augmenting-path"
//! alternative section 9 explicitly allows in place of Hopcroft-Karp:
//! one DFS augmenting attempt per left vertex, `O(V * E)`.

use crate::diagonals::Chord;
use crate::interval_tree::{IntervalTree, Step};

/// `(h_index, v_index)` pairs whose chords cross.
pub fn find_crossing_edges(h_chords: &[Chord], v_chords: &[Chord]) -> Vec<(usize, usize)> {
  let intervals: Vec<(i64, i64, usize)> = h_chords
    .iter()
    .enumerate()
    .map(|(i, c)| {
      let (lo, hi) = c.extent();
      (lo, hi, i)
    })
    .collect();
  let tree: IntervalTree<usize> = IntervalTree::build(&intervals);

  let mut edges = Vec::new();
  for (vi, v) in v_chords.iter().enumerate() {
    let vx = v.fixed();
    let (v_lo, v_hi) = v.extent();
    tree.stab::<()>(vx, &mut |hi| {
      let h = &h_chords[hi];
      let hy = h.fixed();
      if hy > v_lo && hy < v_hi {
        edges.push((hi, vi));
      }
      Step::Continue
    });
  }
  edges
}

struct Matching {
  match_left: Vec<Option<usize>>,
  match_right: Vec<Option<usize>>,
}

fn max_bipartite_matching(n_left: usize, n_right: usize, adj: &[Vec<usize>]) -> Matching {
  let mut match_left = vec![None; n_left];
  let mut match_right = vec![None; n_right];
  for u in 0..n_left {
    let mut visited = vec![false; n_right];
    try_augment(u, adj, &mut visited, &mut match_left, &mut match_right);
  }
  Matching {
    match_left,
    match_right,
  }
}

fn try_augment(
  u: usize,
  adj: &[Vec<usize>],
  visited: &mut [bool],
  match_left: &mut [Option<usize>],
  match_right: &mut [Option<usize>],
) -> bool {
  for &v in &adj[u] {
    if visited[v] {
      continue;
    }
    visited[v] = true;
    let augments = match match_right[v] {
      None => true,
      Some(owner) => try_augment(owner, adj, visited, match_left, match_right),
    };
    if augments {
      match_left[u] = Some(v);
      match_right[v] = Some(u);
      return true;
    }
  }
  false
}

/// König's alternating-reachability construction: starting from every
/// unmatched left vertex, alternate non-matching (left-to-right) and
/// matching (right-to-left) edges. `Z` is everything reached.
fn alternating_reachable(
  n_left: usize,
  adj: &[Vec<usize>],
  matching: &Matching,
) -> (Vec<bool>, Vec<bool>) {
  let mut in_left = vec![false; n_left];
  let mut in_right = vec![false; matching.match_right.len()];
  let mut stack = Vec::new();
  for u in 0..n_left {
    if matching.match_left[u].is_none() {
      in_left[u] = true;
      stack.push(u);
    }
  }
  while let Some(u) = stack.pop() {
    for &v in &adj[u] {
      if matching.match_left[u] == Some(v) {
        continue; // only non-matching edges leave the left side
      }
      if !in_right[v] {
        in_right[v] = true;
        if let Some(owner) = matching.match_right[v] {
          if !in_left[owner] {
            in_left[owner] = true;
            stack.push(owner);
          }
        }
      }
    }
  }
  (in_left, in_right)
}

/// Maximum independent set of the bipartite graph `adj` (left -> right
/// adjacency). Returns a boolean mask per side: `true` means the node
/// survives in the independent set.
pub fn max_independent_set(n_left: usize, n_right: usize, adj: &[Vec<usize>]) -> (Vec<bool>, Vec<bool>) {
  let matching = max_bipartite_matching(n_left, n_right, adj);
  let (z_left, z_right) = alternating_reachable(n_left, adj, &matching);
  // Minimum vertex cover = (left \ Z) u (right n Z); MIS is its complement.
  let mis_left = z_left;
  let mis_right: Vec<bool> = z_right.into_iter().map(|b| !b).collect();
  (mis_left, mis_right)
}

/// Select the maximum set of mutually non-crossing chords.
pub fn select_chords(h_chords: Vec<Chord>, v_chords: Vec<Chord>) -> (Vec<Chord>, Vec<Chord>) {
  let edges = find_crossing_edges(&h_chords, &v_chords);
  let mut adj = vec![Vec::new(); h_chords.len()];
  for (h, v) in edges {
    adj[h].push(v);
  }
  let (keep_h, keep_v) = max_independent_set(h_chords.len(), v_chords.len(), &adj);

  let selected_h = h_chords
    .into_iter()
    .zip(keep_h)
    .filter_map(|(c, keep)| keep.then_some(c))
    .collect();
  let selected_v = v_chords
    .into_iter()
    .zip(keep_v)
    .filter_map(|(c, keep)| keep.then_some(c))
    .collect();
  (selected_h, selected_v)
}
