//! A static, center-balanced interval tree over closed `i64` intervals
//! (section 4.A). Each interval carries an arbitrary `Copy` payload --
//! a `SegmentId` when indexing boundary segments, a plain chord index
//! when indexing chord candidates (section 4.E). Construction is
//! `O(n log n)`; `stab` is `O(log n + k)` for `k` matches.
//!
//! The tree is immutable once built and is cheap enough to rebuild
//! wholesale after each round of chord splitting (section 9's "known
//! inefficiency"); nothing here attempts incremental maintenance.

/// What a `stab` visitor should do after seeing one more match.
pub enum Step<R> {
  Continue,
  Stop(R),
}

#[derive(Clone, Copy, Debug)]
struct Interval<Id> {
  lo: i64,
  hi: i64,
  id: Id,
}

struct Node<Id> {
  mid: i64,
  left: Option<Box<Node<Id>>>,
  right: Option<Box<Node<Id>>>,
  /// Straddling intervals, sorted by `lo` ascending.
  by_lo: Vec<Interval<Id>>,
  /// Straddling intervals, sorted by `hi` ascending.
  by_hi: Vec<Interval<Id>>,
}

/// An immutable stabbing-query structure over `[lo, hi]` (closed)
/// intervals, each carrying an `Id` payload.
pub struct IntervalTree<Id> {
  root: Option<Box<Node<Id>>>,
}

impl<Id: Copy> IntervalTree<Id> {
  /// Build a tree from `(lo, hi, id)` triples. `lo <= hi` for every
  /// triple; duplicates are preserved.
  pub fn build(intervals: &[(i64, i64, Id)]) -> IntervalTree<Id> {
    let intervals: Vec<Interval<Id>> = intervals
      .iter()
      .map(|&(lo, hi, id)| Interval { lo, hi, id })
      .collect();
    IntervalTree {
      root: Self::build_node(intervals),
    }
  }

  fn build_node(intervals: Vec<Interval<Id>>) -> Option<Box<Node<Id>>> {
    if intervals.is_empty() {
      return None;
    }
    let mut endpoints: Vec<i64> = Vec::with_capacity(intervals.len() * 2);
    for iv in &intervals {
      endpoints.push(iv.lo);
      endpoints.push(iv.hi);
    }
    endpoints.sort_unstable();
    let mid = endpoints[endpoints.len() / 2];

    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut straddling = Vec::new();
    for iv in intervals {
      if iv.hi < mid {
        left.push(iv);
      } else if iv.lo > mid {
        right.push(iv);
      } else {
        straddling.push(iv);
      }
    }

    let mut by_lo = straddling.clone();
    by_lo.sort_by_key(|iv| iv.lo);
    let mut by_hi = straddling;
    by_hi.sort_by_key(|iv| iv.hi);

    Some(Box::new(Node {
      mid,
      left: Self::build_node(left),
      right: Self::build_node(right),
      by_lo,
      by_hi,
    }))
  }

  /// Visit every interval containing `x` (closed: `x == lo` and
  /// `x == hi` both count). The visitor may return `Step::Stop(r)` to
  /// short-circuit; that `r` is then returned from `stab`.
  pub fn stab<R>(&self, x: i64, visitor: &mut impl FnMut(Id) -> Step<R>) -> Option<R> {
    Self::stab_node(self.root.as_deref(), x, visitor)
  }

  fn stab_node<R>(
    node: Option<&Node<Id>>,
    x: i64,
    visitor: &mut impl FnMut(Id) -> Step<R>,
  ) -> Option<R> {
    let node = node?;
    use std::cmp::Ordering::*;
    match x.cmp(&node.mid) {
      Less => {
        if let Some(r) = Self::stab_node(node.left.as_deref(), x, visitor) {
          return Some(r);
        }
        for iv in &node.by_lo {
          if iv.lo > x {
            break;
          }
          if let Step::Stop(r) = visitor(iv.id) {
            return Some(r);
          }
        }
        None
      }
      Greater => {
        if let Some(r) = Self::stab_node(node.right.as_deref(), x, visitor) {
          return Some(r);
        }
        for iv in node.by_hi.iter().rev() {
          if iv.hi < x {
            break;
          }
          if let Step::Stop(r) = visitor(iv.id) {
            return Some(r);
          }
        }
        None
      }
      Equal => {
        for iv in &node.by_lo {
          if let Step::Stop(r) = visitor(iv.id) {
            return Some(r);
          }
        }
        None
      }
    }
  }
}
