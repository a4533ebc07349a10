use crate::bitvec::*;
use std::{fmt, ops::Index};

/// A matrix of bits, represented as a vector of blocks of bits
///
/// The matrix is stored in row-major order, each row occupying `col_blocks` consecutive
/// [`BitBlock`]s. When the number of columns is not a multiple of `BLOCKSIZE`, the tail of the
/// last block in every row is kept at 0, so whole-row operations can work block by block.
#[derive(Clone, Debug)]
pub struct BitMatrix {
    /// the number of logical rows in the matrix
    rows: usize,

    /// the number of logical columns in the matrix
    cols: usize,

    /// the number of [`BitBlock`]s used to store each row
    col_blocks: usize,

    /// row-major storage
    data: BitVec,
}

/// Elementary row operations.
pub trait RowOps {
    fn add_row(&mut self, from: usize, to: usize);
}

impl BitMatrix {
    #[inline]
    pub fn bit(&self, i: usize, j: usize) -> bool {
        self.data.bit(self.col_blocks * BLOCKSIZE * i + j)
    }

    #[inline]
    pub fn set_bit(&mut self, i: usize, j: usize, b: bool) {
        self.data.set_bit(self.col_blocks * BLOCKSIZE * i + j, b);
    }

    /// Flips entry `(i, j)` if `b` is true.
    #[inline]
    pub fn xor_bit(&mut self, i: usize, j: usize, b: bool) {
        self.data.xor_bit(self.col_blocks * BLOCKSIZE * i + j, b);
    }

    pub fn build(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut m = Self::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                if f(i, j) {
                    m.set_bit(i, j, true);
                }
            }
        }
        m
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        let col_blocks = min_blocks(cols);
        BitMatrix {
            rows,
            cols,
            col_blocks,
            data: BitVec::zeros(rows * col_blocks),
        }
    }

    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size, size);
        for i in 0..size {
            m.set_bit(i, i, true);
        }
        m
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn row(&self, row: usize) -> &BitRange {
        &self.data[row * self.col_blocks..(row + 1) * self.col_blocks]
    }

    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut BitRange {
        &mut self.data[row * self.col_blocks..(row + 1) * self.col_blocks]
    }

    /// Overwrites row `to` with a copy of row `from`.
    #[inline]
    pub fn copy_row(&mut self, from: usize, to: usize) {
        self.data.copy_range(
            from * self.col_blocks,
            to * self.col_blocks,
            self.col_blocks,
        );
    }

    #[inline]
    pub fn zero_row(&mut self, row: usize) {
        self.data.zero_range(row * self.col_blocks, self.col_blocks);
    }

    /// Swaps columns `a` and `b` in every row.
    pub fn swap_cols(&mut self, a: usize, b: usize) {
        for i in 0..self.rows {
            let bit_a = self.bit(i, a);
            let bit_b = self.bit(i, b);
            if bit_a != bit_b {
                self.set_bit(i, a, bit_b);
                self.set_bit(i, b, bit_a);
            }
        }
    }

    /// The entries of column `col` in the first `rows` rows.
    pub fn col_bits(&self, col: usize, rows: usize) -> Vec<bool> {
        (0..rows).map(|i| self.bit(i, col)).collect()
    }
}

/// Two matrices are equal if they have the same shape and the same logical entries.
impl PartialEq for BitMatrix {
    fn eq(&self, other: &Self) -> bool {
        if self.rows() != other.rows() || self.cols() != other.cols() {
            return false;
        }
        (0..self.rows()).all(|i| self.row(i) == other.row(i))
    }
}

impl Eq for BitMatrix {}

impl RowOps for BitMatrix {
    #[inline]
    fn add_row(&mut self, from: usize, to: usize) {
        self.data.xor_range(
            from * self.col_blocks,
            to * self.col_blocks,
            self.col_blocks,
        );
    }
}

impl Index<(usize, usize)> for BitMatrix {
    type Output = bool;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        if self.bit(index.0, index.1) {
            &true
        } else {
            &false
        }
    }
}

impl fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.rows {
            for j in 0..self.cols {
                write!(f, " {} ", if self[(i, j)] { 1 } else { 0 })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
