//! Dense row-major matrices over a field.

use std::ops::{Index, IndexMut};

use turris_rings::traits::{Field, Ring};

/// A dense matrix with entries in a field `F`, stored row-major.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DenseMatrix<F> {
    num_rows: usize,
    num_cols: usize,
    data: Vec<F>,
}

impl<F: Field> DenseMatrix<F> {
    /// Creates a zero matrix of the given shape.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            num_rows,
            num_cols,
            data: vec![F::zero(); num_rows * num_cols],
        }
    }

    /// Creates a matrix from rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows have unequal lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<F>>) -> Self {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|r| r.len() == num_cols),
            "rows must have equal lengths"
        );

        Self {
            num_rows,
            num_cols,
            data: rows.into_iter().flatten().collect(),
        }
    }

    /// Creates a matrix from columns.
    ///
    /// # Panics
    ///
    /// Panics if the columns have unequal lengths.
    #[must_use]
    pub fn from_cols(cols: Vec<Vec<F>>) -> Self {
        Self::from_rows(cols).transpose()
    }

    /// Creates the n-by-n identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = F::one();
        }
        m
    }

    /// Number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns true for a square matrix.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Returns a row as a slice.
    #[must_use]
    pub fn row(&self, row: usize) -> &[F] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Returns a column as an owned vector.
    #[must_use]
    pub fn col(&self, col: usize) -> Vec<F> {
        (0..self.num_rows).map(|r| self[(r, col)].clone()).collect()
    }

    /// Matrix-vector product.
    ///
    /// # Panics
    ///
    /// Panics if the vector length does not match the column count.
    #[must_use]
    pub fn mv(&self, x: &[F]) -> Vec<F> {
        assert_eq!(x.len(), self.num_cols);
        (0..self.num_rows)
            .map(|r| {
                self.row(r)
                    .iter()
                    .zip(x)
                    .fold(F::zero(), |acc, (a, b)| acc + a.clone() * b.clone())
            })
            .collect()
    }

    /// Matrix-matrix product.
    ///
    /// # Panics
    ///
    /// Panics on a shape mismatch.
    #[must_use]
    pub fn mm(&self, other: &Self) -> Self {
        assert_eq!(self.num_cols, other.num_rows);
        let mut out = Self::zeros(self.num_rows, other.num_cols);
        for i in 0..self.num_rows {
            for k in 0..self.num_cols {
                let a = self[(i, k)].clone();
                if a.is_zero() {
                    continue;
                }
                for j in 0..other.num_cols {
                    out[(i, j)] = out[(i, j)].clone() + a.clone() * other[(k, j)].clone();
                }
            }
        }
        out
    }

    /// Returns the transpose.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.num_cols, self.num_rows);
        for i in 0..self.num_rows {
            for j in 0..self.num_cols {
                out[(j, i)] = self[(i, j)].clone();
            }
        }
        out
    }

    /// Sum of the diagonal entries.
    ///
    /// # Panics
    ///
    /// Panics unless the matrix is square.
    #[must_use]
    pub fn trace(&self) -> F {
        assert!(self.is_square());
        (0..self.num_rows).fold(F::zero(), |acc, i| acc + self[(i, i)].clone())
    }

    fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        for col in 0..self.num_cols {
            self.data
                .swap(i * self.num_cols + col, j * self.num_cols + col);
        }
    }

    fn scale_row(&mut self, row: usize, scale: &F) {
        for col in 0..self.num_cols {
            self[(row, col)] = self[(row, col)].clone() * scale.clone();
        }
    }

    fn add_scaled_row(&mut self, target: usize, source: usize, scale: &F) {
        for col in 0..self.num_cols {
            let delta = self[(source, col)].clone() * scale.clone();
            self[(target, col)] = self[(target, col)].clone() + delta;
        }
    }

    /// Gauss-Jordan elimination to reduced row echelon form.
    ///
    /// Returns the reduced matrix and its rank.
    #[must_use]
    pub fn rref(&self) -> (Self, usize) {
        self.rref_within(self.num_cols)
    }

    /// Row reduction that only selects pivots from the first
    /// `pivot_cols` columns. The remaining columns still take part in
    /// the row operations, which is what solving against an augmented
    /// block needs: pivots in the augment would mask inconsistency.
    fn rref_within(&self, pivot_cols: usize) -> (Self, usize) {
        let mut m = self.clone();
        let mut pivot_row = 0;

        for pivot_col in 0..pivot_cols {
            if pivot_row == m.num_rows {
                break;
            }

            let Some(found) =
                (pivot_row..m.num_rows).find(|&r| !m[(r, pivot_col)].is_zero())
            else {
                continue;
            };
            m.swap_rows(pivot_row, found);

            let inv = m[(pivot_row, pivot_col)]
                .inv()
                .expect("pivot is non-zero");
            m.scale_row(pivot_row, &inv);

            for row in 0..m.num_rows {
                if row != pivot_row && !m[(row, pivot_col)].is_zero() {
                    let factor = -m[(row, pivot_col)].clone();
                    m.add_scaled_row(row, pivot_row, &factor);
                }
            }

            pivot_row += 1;
        }

        (m, pivot_row)
    }

    /// Solves Ax = b, returning `None` when the system is inconsistent.
    ///
    /// # Panics
    ///
    /// Panics if the vector length does not match the row count.
    #[must_use]
    pub fn solve(&self, b: &[F]) -> Option<Vec<F>> {
        assert_eq!(b.len(), self.num_rows);

        let mut aug = Self::zeros(self.num_rows, self.num_cols + 1);
        for i in 0..self.num_rows {
            for j in 0..self.num_cols {
                aug[(i, j)] = self[(i, j)].clone();
            }
            aug[(i, self.num_cols)] = b[i].clone();
        }

        let (rref, rank) = aug.rref_within(self.num_cols);

        for row in rank..self.num_rows {
            if !rref[(row, self.num_cols)].is_zero() {
                return None;
            }
        }

        let mut x = vec![F::zero(); self.num_cols];
        for row in 0..rank {
            let pivot_col = (0..self.num_cols).find(|&c| !rref[(row, c)].is_zero());
            if let Some(col) = pivot_col {
                x[col] = rref[(row, self.num_cols)].clone();
            }
        }
        Some(x)
    }

    /// Computes the determinant by fraction-bearing Gaussian elimination.
    ///
    /// # Panics
    ///
    /// Panics unless the matrix is square.
    #[must_use]
    pub fn det(&self) -> F {
        assert!(self.is_square());
        let n = self.num_rows;
        if n == 0 {
            return F::one();
        }

        let mut m = self.clone();
        let mut det = F::one();

        for col in 0..n {
            let Some(pivot_row) = (col..n).find(|&r| !m[(r, col)].is_zero()) else {
                return F::zero();
            };
            if pivot_row != col {
                m.swap_rows(col, pivot_row);
                det = -det;
            }

            let pivot = m[(col, col)].clone();
            det = det * pivot.clone();
            let inv = pivot.inv().expect("pivot is non-zero");

            for row in col + 1..n {
                if !m[(row, col)].is_zero() {
                    let factor = -(m[(row, col)].clone() * inv.clone());
                    m.add_scaled_row(row, col, &factor);
                }
            }
        }

        det
    }

    /// Computes the inverse, or `None` for a singular matrix.
    ///
    /// # Panics
    ///
    /// Panics unless the matrix is square.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        assert!(self.is_square());
        let n = self.num_rows;

        let mut aug = Self::zeros(n, 2 * n);
        for i in 0..n {
            for j in 0..n {
                aug[(i, j)] = self[(i, j)].clone();
            }
            aug[(i, n + i)] = F::one();
        }

        let (rref, rank) = aug.rref_within(n);
        if rank != n {
            return None;
        }

        let mut inv = Self::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                inv[(i, j)] = rref[(i, n + j)].clone();
            }
        }
        Some(inv)
    }
}

impl<F> Index<(usize, usize)> for DenseMatrix<F> {
    type Output = F;

    fn index(&self, (row, col): (usize, usize)) -> &F {
        &self.data[row * self.num_cols + col]
    }
}

impl<F> IndexMut<(usize, usize)> for DenseMatrix<F> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut F {
        &mut self.data[row * self.num_cols + col]
    }
}
