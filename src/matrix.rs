use std::fmt;
use std::ops::{ Index, IndexMut };
use std::convert::From;

use crate::feq;
use crate::error::{ Error, Result };
use crate::tuple::Tuple4D;

/// A general `rows` x `cols` matrix of `f64`, stored row-major.
///
/// Transformations in the ray caster are always 4x4, but the algebra here
/// works on any shape. Operations that only make sense for certain shapes
/// (multiplication, determinants, inversion) check their operands and return
/// an `Error` instead of silently truncating or padding.
///
/// # Examples
///
/// Creating an identity matrix:
///
/// ```
/// # use ray_caster::matrix::Matrix;
/// let mat = Matrix::identity(4);
/// assert_eq!(mat.determinant().unwrap(), 1.0);
/// ```
///
/// Inverting a transformation:
///
/// ```
/// # use ray_caster::tuple::Tuple4D;
/// # use ray_caster::matrix::Matrix;
/// let inv = Matrix::translation(5.0, -3.0, 2.0).inverse().unwrap();
/// let p = inv.mul_tuple(Tuple4D::point(-3.0, 4.0, 5.0)).unwrap();
/// assert_eq!(p, Tuple4D::point(-8.0, 7.0, 3.0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Determines whether two `Matrix`s are equal.
///
/// Shapes must match exactly; elements are compared with `feq`.
impl PartialEq for Matrix {
    fn eq(&self, other: &Matrix) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
    }
}

impl Matrix {
    /// Creates a new `rows` x `cols` matrix. All elements are `0.0`.
    pub fn new(rows: usize, cols: usize) -> Matrix {
        Matrix { rows, cols, data: vec![0.0; rows * cols] }
    }

    /// Instantiates an `n` x `n` identity matrix.
    pub fn identity(n: usize) -> Matrix {
        let mut ident = Matrix::new(n, n);
        for i in 0..n {
            ident[(i, i)] = 1.0;
        }

        ident
    }

    /// Builds a matrix from row-major data.
    ///
    /// Fails if `data` doesn't hold exactly `rows * cols` elements.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Matrix> {
        if data.len() != rows * cols {
            return Err(Error::BadLength {
                expected: rows * cols,
                actual: data.len(),
            });
        }

        Ok(Matrix { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Reads an element, or `None` if the index is out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Approximate equality with an explicit tolerance.
    ///
    /// `PartialEq` uses the crate-wide epsilon; products of inverses pick up
    /// more rounding than that, so they compare through this instead.
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.data.iter().zip(other.data.iter())
                .all(|(x, y)| (x - y).abs() < tolerance)
    }

    /// Standard matrix product `self * other`.
    ///
    /// Fails unless the width of `self` equals the height of `other`.
    pub fn mul_matrix(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(Error::DimensionMismatch(
                self.rows, self.cols, other.rows, other.cols
            ));
        }

        let mut res = Matrix::new(self.rows, other.cols);
        for r in 0..self.rows {
            for c in 0..other.cols {
                res[(r, c)] = (0..self.cols)
                    .map(|i| self[(r, i)] * other[(i, c)])
                    .sum();
            }
        }

        Ok(res)
    }

    /// Multiplies a tuple, treated as a 4x1 column, by this matrix.
    ///
    /// Fails if the matrix isn't 4x4.
    ///
    /// ```
    /// # use ray_caster::tuple::Tuple4D;
    /// # use ray_caster::matrix::Matrix;
    /// let v = Tuple4D::vector(1.0, 4.0, 5.0);
    /// let m = Matrix::scaling(2.0, 2.0, 2.0);
    /// assert_eq!(m.mul_tuple(v).unwrap(), Tuple4D::vector(2.0, 8.0, 10.0));
    /// ```
    pub fn mul_tuple(&self, t: Tuple4D) -> Result<Tuple4D> {
        let column: Matrix = [[t.x], [t.y], [t.z], [t.w]].into();
        let res = self.mul_matrix(&column)?;
        if res.rows != 4 {
            return Err(Error::DimensionMismatch(self.rows, self.cols, 4, 1));
        }

        Ok(Tuple4D::tuple(res[(0, 0)], res[(1, 0)], res[(2, 0)], res[(3, 0)]))
    }

    /// Multiplies every element by a scalar.
    pub fn mul_scalar(&self, s: f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|x| x * s).collect(),
        }
    }

    /// Divides every element by a scalar. Dividing by zero is rejected.
    pub fn div_scalar(&self, s: f64) -> Result<Matrix> {
        if s == 0.0 {
            return Err(Error::DivideByZero);
        }

        Ok(self.mul_scalar(1.0 / s))
    }

    /// Produces the transpose of a matrix, returning a new matrix.
    ///
    /// Element `(r, c)` of the result is element `(c, r)` of `self`. Fails
    /// for a matrix with no rows or no columns.
    pub fn transpose(&self) -> Result<Matrix> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::EmptyMatrix);
        }

        let mut res = Matrix::new(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                res[(c, r)] = self[(r, c)];
            }
        }

        Ok(res)
    }

    /// Returns the submatrix of a `Matrix`.
    ///
    /// A submatrix "eliminates" a row and column of a larger matrix. For
    /// example, given the following 3x3 matrix:
    ///
    /// ```text
    /// [
    ///     1.0, 0.0, 2.0,
    ///     3.0, 1.0, 0.0,
    ///     1.0, 1.0, 1.0
    /// ]
    /// ```
    ///
    /// The submatrix for `row == 1`, `col == 2` is the 2x2 matrix:
    ///
    /// ```text
    /// [
    ///     1.0, 0.0,
    ///     1.0, 1.0
    /// ]
    /// ```
    pub fn submatrix(&self, row: usize, col: usize) -> Result<Matrix> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::IndexOutOfRange(row, col, self.rows, self.cols));
        }

        let data = (0..self.rows)
            .filter(|&r| r != row)
            .flat_map(|r| (0..self.cols)
                .filter(move |&c| c != col)
                .map(move |c| (r, c)))
            .map(|idx| self[idx])
            .collect();

        Ok(Matrix { rows: self.rows - 1, cols: self.cols - 1, data })
    }

    /// Returns the minor of a `Matrix` at row and column.
    ///
    /// The "minor" is the determinant of the submatrix at `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> Result<f64> {
        let sub = self.submatrix(row, col)?;
        if !sub.is_square() {
            return Err(Error::NotSquare(self.rows, self.cols));
        }

        sub.expand()
    }

    /// Returns the cofactor of a `Matrix` at row and column.
    ///
    /// The cofactor is the minor, negated when `row + col` is odd.
    pub fn cofactor(&self, row: usize, col: usize) -> Result<f64> {
        let m = self.minor(row, col)?;
        Ok(if (row + col) % 2 == 0 { m } else { -m })
    }

    /// Calculates the determinant by cofactor expansion along row 0.
    ///
    /// Fails for non-square matrices and for anything smaller than 2x2.
    pub fn determinant(&self) -> Result<f64> {
        if !self.is_square() {
            return Err(Error::NotSquare(self.rows, self.cols));
        }
        if self.rows < 2 {
            return Err(Error::TooSmall(self.rows));
        }

        self.expand()
    }

    /// Cofactor expansion on a matrix already known to be square.
    ///
    /// A 1x1 matrix only shows up here as the submatrix of a 2x2 (when
    /// computing its cofactors), so its "determinant" is the lone element.
    fn expand(&self) -> Result<f64> {
        match self.rows {
            0 => Ok(1.0),
            1 => Ok(self.data[0]),
            2 => Ok(self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]),
            n => (0..n)
                .map(|c| -> Result<f64> {
                    Ok(self[(0, c)] * self.cofactor(0, c)?)
                })
                .sum(),
        }
    }

    /// Whether the matrix has an inverse.
    ///
    /// The determinant is compared against exactly `0.0`; a tiny nonzero
    /// determinant still counts as invertible.
    pub fn is_invertible(&self) -> Result<bool> {
        let det = self.determinant()?;
        Ok(det != 0.0 && det.is_finite())
    }

    /// Calculates the inverse of a `Matrix`.
    ///
    /// Builds the adjugate (the transposed cofactor matrix) and divides it by
    /// the determinant. Fails with `Error::Singular` if the determinant is
    /// zero.
    pub fn inverse(&self) -> Result<Matrix> {
        let det = self.determinant()?;
        if det == 0.0 || !det.is_finite() {
            return Err(Error::Singular);
        }

        let mut inv = Matrix::new(self.rows, self.cols);
        for r in 0..self.rows {
            for c in 0..self.cols {
                inv[(c, r)] = self.cofactor(r, c)? / det;
            }
        }

        Ok(inv)
    }

    /// Instantiates a 4x4 translation matrix.
    ///
    /// This matrix offsets a point by `x`, `y` and `z`. Vectors are left
    /// alone, since their `w` of `0.0` cancels out the offset column.
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix {
        let mut trans = Self::identity(4);
        trans[(0, 3)] = x;
        trans[(1, 3)] = y;
        trans[(2, 3)] = z;

        trans
    }

    /// Instantiates a 4x4 scaling matrix.
    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix {
        let mut scale = Self::identity(4);
        scale[(0, 0)] = x;
        scale[(1, 1)] = y;
        scale[(2, 2)] = z;

        scale
    }

    /// Instantiates a 4x4 rotation matrix, rotating about the X axis.
    ///
    /// Assumes that parameter `r` is in radians.
    ///
    /// ```
    /// # use ray_caster::tuple::Tuple4D;
    /// # use ray_caster::matrix::Matrix;
    /// let point = Tuple4D::point(0.0, 1.0, 0.0);
    /// let m = Matrix::rotation_x(std::f64::consts::PI / 2.0);
    /// assert_eq!(m.mul_tuple(point).unwrap(), Tuple4D::point(0.0, 0.0, 1.0));
    /// ```
    pub fn rotation_x(r: f64) -> Matrix {
        let mut rotate = Self::identity(4);
        rotate[(1, 1)] =  r.cos();
        rotate[(1, 2)] = -r.sin();
        rotate[(2, 1)] =  r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Instantiates a 4x4 rotation matrix, rotating about the Y axis.
    pub fn rotation_y(r: f64) -> Matrix {
        let mut rotate = Self::identity(4);
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 2)] =  r.sin();
        rotate[(2, 0)] = -r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Instantiates a 4x4 rotation matrix, rotating about the Z axis.
    pub fn rotation_z(r: f64) -> Matrix {
        let mut rotate = Self::identity(4);
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 1)] = -r.sin();
        rotate[(1, 0)] =  r.sin();
        rotate[(1, 1)] =  r.cos();

        rotate
    }

    /// Instantiates a 4x4 shearing matrix.
    ///
    /// Each parameter moves one axis in proportion to another; `xy` moves `x`
    /// in proportion to `y`, and so on.
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Matrix {
        let mut shear = Self::identity(4);
        shear[(0, 1)] = xy;
        shear[(0, 2)] = xz;
        shear[(1, 0)] = yx;
        shear[(1, 2)] = yz;
        shear[(2, 0)] = zx;
        shear[(2, 1)] = zy;

        shear
    }
}

impl<const R: usize, const C: usize> From<[[f64; C]; R]> for Matrix {
    fn from(rows: [[f64; C]; R]) -> Matrix {
        Matrix {
            rows: R,
            cols: C,
            data: rows.iter().flat_map(|row| row.iter().copied()).collect(),
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        assert!(index.0 < self.rows && index.1 < self.cols,
            "index {:?} out of range for {}x{} matrix",
            index, self.rows, self.cols);
        &self.data[(index.0 * self.cols) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        assert!(index.0 < self.rows && index.1 < self.cols,
            "index {:?} out of range for {}x{} matrix",
            index, self.rows, self.cols);
        &mut self.data[(index.0 * self.cols) + index.1]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            write!(f, "|")?;
            for c in 0..self.cols {
                write!(f, " {} |", self[(r, c)])?;
            }

            // Don't put a newline on the final row (allow the user to do that)
            if r + 1 != self.rows {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
fn worked_example() -> Matrix {
    [ [ -5.0,  2.0,  6.0, -8.0 ],
      [  1.0, -5.0,  1.0,  8.0 ],
      [  7.0,  7.0, -6.0, -7.0 ],
      [  1.0, -3.0,  7.0,  4.0 ] ].into()
}

#[test]
fn construct_and_index() {
    let m: Matrix = [ [  1.0,  2.0,  3.0,  4.0 ],
                      [  5.5,  6.5,  7.5,  8.5 ],
                      [  9.0, 10.0, 11.0, 12.0 ],
                      [ 13.5, 14.5, 15.5, 16.5 ] ].into();

    assert_eq!(m.rows(), 4);
    assert_eq!(m.cols(), 4);
    assert_eq!(m[(0, 3)], 4.0);
    assert_eq!(m[(1, 2)], 7.5);
    assert_eq!(m[(3, 2)], 15.5);
    assert_eq!(m.get(4, 0), None);
}

#[test]
fn new_is_zero_filled() {
    let m = Matrix::new(2, 3);

    assert_eq!(m.rows(), 2);
    assert_eq!(m.cols(), 3);
    assert_eq!(m, [[0.0, 0.0, 0.0], [0.0, 0.0, 0.0]].into());
}

#[test]
fn from_vec_checks_length() {
    assert!(Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).is_ok());
    assert!(matches!(Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0]),
        Err(Error::BadLength { expected: 4, actual: 3 })));
}

#[test]
fn identity() {
    let i = Matrix::identity(4);
    let a: Matrix = [ [ 0.0, 1.0,  2.0,  4.0 ],
                      [ 1.0, 2.0,  4.0,  8.0 ],
                      [ 2.0, 4.0,  8.0, 16.0 ],
                      [ 4.0, 8.0, 16.0, 32.0 ] ].into();

    assert_eq!(i.mul_matrix(&a).unwrap(), a);
    assert_eq!(a.mul_matrix(&i).unwrap(), a);
}

#[test]
fn identity_non_square() {
    let a: Matrix = [ [ 1.0, 2.0, 3.0 ],
                      [ 4.0, 5.0, 6.0 ] ].into();

    assert_eq!(Matrix::identity(2).mul_matrix(&a).unwrap(), a);
    assert_eq!(a.mul_matrix(&Matrix::identity(3)).unwrap(), a);
}

#[test]
fn multiply() {
    let a: Matrix = [ [ 1.0, 2.0, 3.0, 4.0 ],
                      [ 5.0, 6.0, 7.0, 8.0 ],
                      [ 9.0, 8.0, 7.0, 6.0 ],
                      [ 5.0, 4.0, 3.0, 2.0 ] ].into();
    let b: Matrix = [ [ -2.0, 1.0, 2.0,  3.0 ],
                      [  3.0, 2.0, 1.0, -1.0 ],
                      [  4.0, 3.0, 6.0,  5.0 ],
                      [  1.0, 2.0, 7.0,  8.0 ] ].into();
    let c: Matrix = [ [ 20.0, 22.0,  50.0,  48.0 ],
                      [ 44.0, 54.0, 114.0, 108.0 ],
                      [ 40.0, 58.0, 110.0, 102.0 ],
                      [ 16.0, 26.0,  46.0,  42.0 ] ].into();

    assert_eq!(a.mul_matrix(&b).unwrap(), c);
}

#[test]
fn multiply_rectangular() {
    let a: Matrix = [ [ 1.0, 2.0, 3.0 ],
                      [ 4.0, 5.0, 6.0 ] ].into();
    let b: Matrix = [ [ 7.0 ], [ 8.0 ], [ 9.0 ] ].into();

    assert_eq!(a.mul_matrix(&b).unwrap(), [[50.0], [122.0]].into());
}

#[test]
fn multiply_mismatched() {
    let a = Matrix::new(2, 3);
    let b = Matrix::new(2, 3);

    assert!(matches!(a.mul_matrix(&b),
        Err(Error::DimensionMismatch(2, 3, 2, 3))));
}

#[test]
fn multiply_tuple() {
    let a: Matrix = [ [ 1.0, 2.0, 3.0, 4.0 ],
                      [ 2.0, 4.0, 4.0, 2.0 ],
                      [ 8.0, 6.0, 4.0, 1.0 ],
                      [ 0.0, 0.0, 0.0, 1.0 ] ].into();
    let b = Tuple4D::tuple(1.0, 2.0, 3.0, 1.0);

    assert_eq!(a.mul_tuple(b).unwrap(), Tuple4D::tuple(18.0, 24.0, 33.0, 1.0));
}

#[test]
fn multiply_tuple_wrong_shape() {
    assert!(Matrix::identity(3).mul_tuple(Tuple4D::point(1.0, 2.0, 3.0)).is_err());
    assert!(Matrix::new(3, 4).mul_tuple(Tuple4D::point(1.0, 2.0, 3.0)).is_err());
}

#[test]
fn scalar_ops() {
    let a: Matrix = [ [ 1.0, -2.0 ], [ 3.0, 4.0 ] ].into();

    assert_eq!(a.mul_scalar(2.0), [[2.0, -4.0], [6.0, 8.0]].into());
    assert_eq!(a.div_scalar(2.0).unwrap(), [[0.5, -1.0], [1.5, 2.0]].into());
    assert!(matches!(a.div_scalar(0.0), Err(Error::DivideByZero)));
}

#[test]
fn transpose() {
    let a: Matrix = [ [ 0.0, 9.0, 3.0, 0.0 ],
                      [ 9.0, 8.0, 0.0, 8.0 ],
                      [ 1.0, 8.0, 5.0, 3.0 ],
                      [ 0.0, 0.0, 5.0, 8.0 ] ].into();
    let t: Matrix = [ [ 0.0, 9.0, 1.0, 0.0 ],
                      [ 9.0, 8.0, 8.0, 0.0 ],
                      [ 3.0, 0.0, 5.0, 5.0 ],
                      [ 0.0, 8.0, 3.0, 8.0 ] ].into();

    assert_eq!(a.transpose().unwrap(), t);
    assert_eq!(t.transpose().unwrap(), a);
}

#[test]
fn transpose_identity_and_rectangular() {
    let i = Matrix::identity(4);
    assert_eq!(i.transpose().unwrap(), i);

    let a: Matrix = [ [ 1.0, 2.0, 3.0 ] ].into();
    assert_eq!(a.transpose().unwrap(), [[1.0], [2.0], [3.0]].into());
}

#[test]
fn transpose_empty() {
    assert!(matches!(Matrix::new(0, 3).transpose(), Err(Error::EmptyMatrix)));
}

#[test]
fn mat2_determinant() {
    let a: Matrix = [ [ 1.0, 5.0 ], [ -3.0, 2.0 ] ].into();

    assert_eq!(a.determinant().unwrap(), 17.0);
}

#[test]
fn determinant_rejects_bad_shapes() {
    assert!(matches!(Matrix::new(2, 3).determinant(), Err(Error::NotSquare(2, 3))));
    assert!(matches!(Matrix::identity(1).determinant(), Err(Error::TooSmall(1))));
}

#[test]
fn mat3_submatrix() {
    let a: Matrix = [ [  1.0, 5.0,  0.0 ],
                      [ -3.0, 2.0,  7.0 ],
                      [  0.0, 6.0, -3.0 ] ].into();

    assert_eq!(a.submatrix(0, 2).unwrap(), [[-3.0, 2.0], [0.0, 6.0]].into());
}

#[test]
fn mat4_submatrix() {
    let a: Matrix = [ [ -6.0, 1.0,  1.0, 6.0 ],
                      [ -8.0, 5.0,  8.0, 6.0 ],
                      [ -1.0, 0.0,  8.0, 2.0 ],
                      [ -7.0, 1.0, -1.0, 1.0 ] ].into();
    let s: Matrix = [ [ -6.0,  1.0, 6.0 ],
                      [ -8.0,  8.0, 6.0 ],
                      [ -7.0, -1.0, 1.0 ] ].into();

    assert_eq!(a.submatrix(2, 1).unwrap(), s);
}

#[test]
fn submatrix_out_of_range() {
    assert!(matches!(Matrix::identity(3).submatrix(3, 0),
        Err(Error::IndexOutOfRange(3, 0, 3, 3))));
}

#[test]
fn mat3_minor_and_cofactor() {
    let a: Matrix = [ [ 3.0,  5.0,  0.0 ],
                      [ 2.0, -1.0, -7.0 ],
                      [ 6.0, -1.0,  5.0 ] ].into();

    assert_eq!(a.submatrix(1, 0).unwrap().determinant().unwrap(), 25.0);
    assert_eq!(a.minor(0, 0).unwrap(), -12.0);
    assert_eq!(a.cofactor(0, 0).unwrap(), -12.0);
    assert_eq!(a.minor(1, 0).unwrap(), 25.0);
    assert_eq!(a.cofactor(1, 0).unwrap(), -25.0);
}

#[test]
fn mat3_determinant() {
    let a: Matrix = [ [  1.0, 2.0,  6.0 ],
                      [ -5.0, 8.0, -4.0 ],
                      [  2.0, 6.0,  4.0 ] ].into();

    assert_eq!(a.cofactor(0, 0).unwrap(), 56.0);
    assert_eq!(a.cofactor(0, 1).unwrap(), 12.0);
    assert_eq!(a.cofactor(0, 2).unwrap(), -46.0);
    assert_eq!(a.determinant().unwrap(), -196.0);
}

#[test]
fn mat4_determinant() {
    let a: Matrix = [ [ -2.0, -8.0,  3.0,  5.0 ],
                      [ -3.0,  1.0,  7.0,  3.0 ],
                      [  1.0,  2.0, -9.0,  6.0 ],
                      [ -6.0,  7.0,  7.0, -9.0 ] ].into();

    assert_eq!(a.cofactor(0, 0).unwrap(), 690.0);
    assert_eq!(a.cofactor(0, 1).unwrap(), 447.0);
    assert_eq!(a.cofactor(0, 2).unwrap(), 210.0);
    assert_eq!(a.cofactor(0, 3).unwrap(), 51.0);
    assert_eq!(a.determinant().unwrap(), -4071.0);
}

#[test]
fn invertibility() {
    let a: Matrix = [ [ 6.0,  4.0, 4.0,  4.0 ],
                      [ 5.0,  5.0, 7.0,  6.0 ],
                      [ 4.0, -9.0, 3.0, -7.0 ],
                      [ 9.0,  1.0, 7.0, -6.0 ] ].into();
    let b: Matrix = [ [ -4.0,  2.0, -2.0, -3.0 ],
                      [  9.0,  6.0,  2.0,  6.0 ],
                      [  0.0, -5.0,  1.0, -5.0 ],
                      [  0.0,  0.0,  0.0,  0.0 ] ].into();

    assert_eq!(a.determinant().unwrap(), -2120.0);
    assert!(a.is_invertible().unwrap());
    assert_eq!(b.determinant().unwrap(), 0.0);
    assert!(!b.is_invertible().unwrap());
    assert!(matches!(b.inverse(), Err(Error::Singular)));
}

#[test]
fn worked_example_inverse() {
    let a = worked_example();
    let b = a.inverse().unwrap();

    assert_eq!(a.determinant().unwrap(), 532.0);
    assert_eq!(a.cofactor(2, 3).unwrap(), -160.0);
    assert_eq!(b[(3, 2)], -160.0 / 532.0);
    assert_eq!(a.cofactor(3, 2).unwrap(), 105.0);
    assert_eq!(b[(2, 3)], 105.0 / 532.0);

    let expected: Matrix = [ [  0.21805,  0.45113,  0.24060, -0.04511 ],
                             [ -0.80827, -1.45677, -0.44361,  0.52068 ],
                             [ -0.07895, -0.22368, -0.05263,  0.19737 ],
                             [ -0.52256, -0.81391, -0.30075,  0.30639 ] ].into();
    assert!(b.approx_eq(&expected, 1e-4));
}

#[test]
fn mat2_inverse() {
    let a: Matrix = [ [ 4.0, 7.0 ], [ 2.0, 6.0 ] ].into();
    let inv = a.inverse().unwrap();

    assert_eq!(inv, [[0.6, -0.7], [-0.2, 0.4]].into());
}

#[test]
fn inverse_times_self_is_identity() {
    let a: Matrix = [ [  8.0, -5.0,  9.0,  2.0 ],
                      [  7.0,  5.0,  6.0,  1.0 ],
                      [ -6.0,  0.0,  9.0,  6.0 ],
                      [ -3.0,  0.0, -9.0, -4.0 ] ].into();

    let product = a.mul_matrix(&a.inverse().unwrap()).unwrap();
    assert!(product.approx_eq(&Matrix::identity(4), 1e-4));

    let w = worked_example();
    let product = w.mul_matrix(&w.inverse().unwrap()).unwrap();
    assert!(product.approx_eq(&Matrix::identity(4), 1e-4));
}

#[test]
fn product_times_inverse() {
    let a: Matrix = [ [  3.0, -9.0,  7.0,  3.0 ],
                      [  3.0,  8.0,  2.0, -9.0 ],
                      [ -4.0,  4.0,  4.0,  1.0 ],
                      [ -6.0,  5.0, -1.0,  1.0 ] ].into();
    let b: Matrix = [ [ 8.0,  2.0, 2.0, 2.0 ],
                      [ 3.0, -1.0, 7.0, 0.0 ],
                      [ 7.0,  0.0, 5.0, 4.0 ],
                      [ 6.0, -2.0, 0.0, 5.0 ] ].into();

    let c = a.mul_matrix(&b).unwrap();
    let back = c.mul_matrix(&b.inverse().unwrap()).unwrap();

    assert!(back.approx_eq(&a, 1e-4));
}

#[test]
fn translation() {
    let transform = Matrix::translation(5.0, -3.0, 2.0);
    let point = Tuple4D::point(-3.0, 4.0, 5.0);

    assert_eq!(transform.mul_tuple(point).unwrap(), Tuple4D::point(2.0, 1.0, 7.0));
}

#[test]
fn translation_ignores_vectors() {
    let transform = Matrix::translation(5.0, -3.0, 2.0);
    let vector = Tuple4D::vector(-3.0, 4.0, 5.0);

    assert_eq!(transform.mul_tuple(vector).unwrap(), vector);
}

#[test]
fn scaling_and_inverse() {
    let transform = Matrix::scaling(2.0, 3.0, 4.0);
    let vector = Tuple4D::vector(-4.0, 6.0, 8.0);

    assert_eq!(transform.mul_tuple(vector).unwrap(),
        Tuple4D::vector(-8.0, 18.0, 32.0));
    assert_eq!(transform.inverse().unwrap().mul_tuple(vector).unwrap(),
        Tuple4D::vector(-2.0, 2.0, 2.0));
}

#[test]
fn scaling_reflection() {
    let transform = Matrix::scaling(-1.0, 1.0, 1.0);
    let point = Tuple4D::point(2.0, 3.0, 4.0);

    assert_eq!(transform.mul_tuple(point).unwrap(), Tuple4D::point(-2.0, 3.0, 4.0));
}

#[test]
fn rotations() {
    use std::f64::consts::FRAC_PI_2;
    let h = 2.0f64.sqrt() / 2.0;

    let x = Matrix::rotation_x(FRAC_PI_2 / 2.0);
    assert_eq!(x.mul_tuple(Tuple4D::point(0.0, 1.0, 0.0)).unwrap(),
        Tuple4D::point(0.0, h, h));

    let y = Matrix::rotation_y(FRAC_PI_2);
    assert_eq!(y.mul_tuple(Tuple4D::point(0.0, 0.0, 1.0)).unwrap(),
        Tuple4D::point(1.0, 0.0, 0.0));

    let z = Matrix::rotation_z(FRAC_PI_2);
    assert_eq!(z.mul_tuple(Tuple4D::point(0.0, 1.0, 0.0)).unwrap(),
        Tuple4D::point(-1.0, 0.0, 0.0));
}

#[test]
fn shearing() {
    let point = Tuple4D::point(2.0, 3.0, 4.0);
    let cases = [
        (Matrix::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0), Tuple4D::point(5.0, 3.0, 4.0)),
        (Matrix::shearing(0.0, 1.0, 0.0, 0.0, 0.0, 0.0), Tuple4D::point(6.0, 3.0, 4.0)),
        (Matrix::shearing(0.0, 0.0, 1.0, 0.0, 0.0, 0.0), Tuple4D::point(2.0, 5.0, 4.0)),
        (Matrix::shearing(0.0, 0.0, 0.0, 1.0, 0.0, 0.0), Tuple4D::point(2.0, 7.0, 4.0)),
        (Matrix::shearing(0.0, 0.0, 0.0, 0.0, 1.0, 0.0), Tuple4D::point(2.0, 3.0, 6.0)),
        (Matrix::shearing(0.0, 0.0, 0.0, 0.0, 0.0, 1.0), Tuple4D::point(2.0, 3.0, 7.0)),
    ];

    for (m, expected) in cases.iter() {
        assert_eq!(m.mul_tuple(point).unwrap(), *expected);
    }
}

#[test]
fn display() {
    let a: Matrix = [ [ 1.0, 2.0 ], [ 3.0, 4.0 ] ].into();

    assert_eq!(a.to_string(), "| 1 | 2 |\n| 3 | 4 |");
}
