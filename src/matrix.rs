//! Fixed-size, row-major matrix helpers for the 2×2 and 3×3 systems of the controller.
//!
//! Every operation works on stack arrays and has a compile-time bounded cost.

use core::ops::{Add, Mul, Sub};
use num_traits::{One, Zero};

/// A row-major `R`×`C` matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Matrix<T, const R: usize, const C: usize> {
    data: [[T; C]; R],
}

/// A 2×2 matrix.
pub type Matrix2<T> = Matrix<T, 2, 2>;

/// A 3×3 matrix.
pub type Matrix3<T> = Matrix<T, 3, 3>;

/// A 2×1 column vector.
pub type ColumnVector2<T> = Matrix<T, 2, 1>;

/// A 3×1 column vector.
pub type ColumnVector3<T> = Matrix<T, 3, 1>;

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Initializes a new [`Matrix`] from its rows.
    #[inline(always)]
    pub const fn from_rows(data: [[T; C]; R]) -> Self {
        Self { data }
    }

    /// Returns the rows of the matrix.
    #[inline(always)]
    pub const fn rows(&self) -> &[[T; C]; R] {
        &self.data
    }

    /// Gets the element at the specified row and column.
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> T
    where
        T: Copy,
    {
        self.data[row][col]
    }

    /// Sets the element at the specified row and column.
    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row][col] = value;
    }

    /// Returns a matrix of zeros.
    pub fn zero() -> Self
    where
        T: Copy + Zero,
    {
        Self {
            data: [[T::zero(); C]; R],
        }
    }

    /// Returns the transposed matrix.
    pub fn transpose(&self) -> Matrix<T, C, R>
    where
        T: Copy + Zero,
    {
        let mut result = Matrix::<T, C, R>::zero();
        for r in 0..R {
            for c in 0..C {
                result.data[c][r] = self.data[r][c];
            }
        }
        result
    }

    /// Returns the matrix multiplied by a scalar.
    pub fn scaled(&self, factor: T) -> Self
    where
        T: Copy + Mul<T, Output = T>,
    {
        let mut result = *self;
        for row in result.data.iter_mut() {
            for value in row.iter_mut() {
                *value = *value * factor;
            }
        }
        result
    }
}

impl<T, const N: usize> Matrix<T, N, N> {
    /// Returns the identity matrix.
    pub fn identity() -> Self
    where
        T: Copy + Zero + One,
    {
        let mut result = Self::zero();
        for i in 0..N {
            result.data[i][i] = T::one();
        }
        result
    }

    /// Returns a diagonal matrix with the specified diagonal elements.
    pub fn diagonal(values: [T; N]) -> Self
    where
        T: Copy + Zero,
    {
        let mut result = Self::zero();
        for (i, value) in values.into_iter().enumerate() {
            result.data[i][i] = value;
        }
        result
    }
}

impl<T, const N: usize> Matrix<T, N, 1> {
    /// Initializes a new column vector.
    pub fn column(values: [T; N]) -> Self
    where
        T: Copy + Zero,
    {
        let mut result = Self::zero();
        for (i, value) in values.into_iter().enumerate() {
            result.data[i][0] = value;
        }
        result
    }

    /// Gets the element at the specified row of the column vector.
    #[inline(always)]
    pub fn get_row(&self, row: usize) -> T
    where
        T: Copy,
    {
        self.data[row][0]
    }

    /// Sets the element at the specified row of the column vector.
    #[inline(always)]
    pub fn set_row(&mut self, row: usize, value: T) {
        self.data[row][0] = value;
    }
}

impl<T, const R: usize, const C: usize> Add for Matrix<T, R, C>
where
    T: Copy + Add<T, Output = T>,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut result = self;
        for r in 0..R {
            for c in 0..C {
                result.data[r][c] = self.data[r][c] + rhs.data[r][c];
            }
        }
        result
    }
}

impl<T, const R: usize, const C: usize> Sub for Matrix<T, R, C>
where
    T: Copy + Sub<T, Output = T>,
{
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut result = self;
        for r in 0..R {
            for c in 0..C {
                result.data[r][c] = self.data[r][c] - rhs.data[r][c];
            }
        }
        result
    }
}

impl<T, const R: usize, const K: usize, const C: usize> Mul<Matrix<T, K, C>> for Matrix<T, R, K>
where
    T: Copy + Zero + Add<T, Output = T> + Mul<T, Output = T>,
{
    type Output = Matrix<T, R, C>;

    fn mul(self, rhs: Matrix<T, K, C>) -> Self::Output {
        let mut result = Matrix::<T, R, C>::zero();
        for r in 0..R {
            for c in 0..C {
                let mut sum = T::zero();
                for k in 0..K {
                    sum = sum + self.data[r][k] * rhs.data[k][c];
                }
                result.data[r][c] = sum;
            }
        }
        result
    }
}
