//! The raster accessor and a concrete dense backing store.
//!
//! The decomposition core never owns its input: it only requires a
//! `Raster` that can report its shape and answer point queries. This
//! keeps the raster *source* out of scope (spec section 1) while still
//! giving the crate something concrete to test against.

use crate::{Error, InvalidInputReason};

/// A read-only `rows x cols` grid of foreground/background pixels.
pub trait Raster {
  /// `(rows, cols)`.
  fn shape(&self) -> (usize, usize);
  /// `true` means foreground, `false` means background.
  fn get(&self, row: usize, col: usize) -> bool;
}

/// A flat, owned `rows x cols` raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseRaster {
  rows: usize,
  cols: usize,
  cells: Vec<bool>,
}

impl DenseRaster {
  pub fn new(rows: usize, cols: usize, cells: Vec<bool>) -> DenseRaster {
    assert_eq!(rows * cols, cells.len());
    DenseRaster { rows, cols, cells }
  }

  pub fn filled(rows: usize, cols: usize, value: bool) -> DenseRaster {
    DenseRaster {
      rows,
      cols,
      cells: vec![value; rows * cols],
    }
  }
}

impl Raster for DenseRaster {
  fn shape(&self) -> (usize, usize) {
    (self.rows, self.cols)
  }

  fn get(&self, row: usize, col: usize) -> bool {
    self.cells[row * self.cols + col]
  }
}

impl TryFrom<Vec<Vec<u8>>> for DenseRaster {
  type Error = Error;

  fn try_from(grid: Vec<Vec<u8>>) -> Result<DenseRaster, Error> {
    let rows = grid.len();
    if rows == 0 {
      return Ok(DenseRaster::new(0, 0, vec![]));
    }
    let cols = grid[0].len();
    let mut cells = Vec::with_capacity(rows * cols);
    for row in &grid {
      if row.len() != cols {
        return Err(Error::InvalidInput {
          detail: InvalidInputReason::RaggedRows,
        });
      }
      for &cell in row {
        if cell > 1 {
          return Err(Error::InvalidInput {
            detail: InvalidInputReason::NonBinaryCell,
          });
        }
        cells.push(cell != 0);
      }
    }
    Ok(DenseRaster::new(rows, cols, cells))
  }
}
