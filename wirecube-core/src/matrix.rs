/// Dense single-precision matrix with shape-checked operations
use std::fmt;

use nalgebra::{DMatrix, Point3};

use crate::error::{Error, Operation, Result, Shape};

/// A 3x3 transform or a 1x3 point, told apart only by shape.
///
/// Points are row vectors, so a point is transformed with
/// `point.dot(&transform)`. Operations never modify their operands.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: DMatrix<f32>,
}

impl Matrix {
    /// Build a matrix from rows. Every row must have the same, non-zero length.
    pub fn new(rows: Vec<Vec<f32>>) -> Result<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(Error::Empty);
        }
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(Error::RaggedRows {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
        }

        let flat: Vec<f32> = rows.iter().flatten().copied().collect();
        Ok(Self {
            data: DMatrix::from_row_slice(rows.len(), cols, &flat),
        })
    }

    /// Build a 3x3 transform from a row-major array
    pub fn transform(rows: [[f32; 3]; 3]) -> Self {
        let flat: Vec<f32> = rows.iter().flatten().copied().collect();
        Self {
            data: DMatrix::from_row_slice(3, 3, &flat),
        }
    }

    /// Build a 1x3 point
    pub fn point(x: f32, y: f32, z: f32) -> Self {
        Self {
            data: DMatrix::from_row_slice(1, 3, &[x, y, z]),
        }
    }

    pub fn identity(n: usize) -> Self {
        Self {
            data: DMatrix::identity(n, n),
        }
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows(), self.cols())
    }

    pub fn is_point(&self) -> bool {
        self.rows() == 1 && self.cols() == 3
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.data.get((row, col)).copied()
    }

    /// Matrix product `self * rhs`
    pub fn dot(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols() != rhs.rows() {
            return Err(Error::DimensionMismatch {
                op: Operation::Dot,
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }
        Ok(Self {
            data: &self.data * &rhs.data,
        })
    }

    /// Elementwise sum
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.shape() != rhs.shape() {
            return Err(Error::DimensionMismatch {
                op: Operation::Add,
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }
        Ok(Self {
            data: &self.data + &rhs.data,
        })
    }

    pub fn x(&self) -> Result<f32> {
        self.component(0)
    }

    pub fn y(&self) -> Result<f32> {
        self.component(1)
    }

    pub fn z(&self) -> Result<f32> {
        self.component(2)
    }

    fn component(&self, index: usize) -> Result<f32> {
        if !self.is_point() {
            return Err(Error::ShapeError(self.shape()));
        }
        Ok(self.data[(0, index)])
    }

    /// Interpret a 1x3 matrix as a position
    pub fn to_point3(&self) -> Result<Point3<f32>> {
        Ok(Point3::new(self.x()?, self.y()?, self.z()?))
    }

    /// Same shape and every element within `epsilon`
    pub fn approx_eq(&self, other: &Matrix, epsilon: f32) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.row_iter() {
            let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::transform([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.5]])
    }

    #[test]
    fn test_new_rejects_bad_shapes() {
        assert_eq!(Matrix::new(vec![]), Err(Error::Empty));
        assert_eq!(Matrix::new(vec![vec![]]), Err(Error::Empty));
        assert_eq!(
            Matrix::new(vec![vec![1.0, 2.0], vec![3.0]]),
            Err(Error::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_new_is_row_major() {
        let m = Matrix::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.shape(), Shape::new(2, 3));
        assert_eq!(m.get(0, 2), Some(3.0));
        assert_eq!(m.get(1, 0), Some(4.0));
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn test_identity_is_neutral() {
        let a = sample();
        let identity = Matrix::identity(3);
        assert!(a.dot(&identity).unwrap().approx_eq(&a, 1e-6));
        assert!(identity.dot(&a).unwrap().approx_eq(&a, 1e-6));
    }

    #[test]
    fn test_dot_product() {
        let a = Matrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Matrix::new(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
        let expected = Matrix::new(vec![vec![19.0, 22.0], vec![43.0, 50.0]]).unwrap();
        assert!(a.dot(&b).unwrap().approx_eq(&expected, 1e-6));

        let p = Matrix::point(1.0, 1.0, 1.0).dot(&sample()).unwrap();
        assert!(p.is_point());
        assert!(p.approx_eq(&Matrix::point(12.0, 15.0, 18.5), 1e-6));
    }

    #[test]
    fn test_add_commutes() {
        let a = sample();
        let b = Matrix::transform([[0.5, -1.0, 2.0], [0.0, 3.0, -4.0], [1.5, 1.5, 1.5]]);
        assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
    }

    #[test]
    fn test_mismatched_shapes() {
        let a = sample();
        let p = Matrix::point(1.0, 2.0, 3.0);
        let a_before = a.clone();
        let p_before = p.clone();

        assert_eq!(
            a.dot(&p),
            Err(Error::DimensionMismatch {
                op: Operation::Dot,
                lhs: Shape::new(3, 3),
                rhs: Shape::new(1, 3),
            })
        );
        assert!(matches!(
            p.add(&a),
            Err(Error::DimensionMismatch {
                op: Operation::Add,
                ..
            })
        ));
        assert_eq!(a, a_before);
        assert_eq!(p, p_before);
    }

    #[test]
    fn test_point_accessors() {
        let p = Matrix::point(1.0, -2.0, 3.5);
        assert_eq!(p.x(), Ok(1.0));
        assert_eq!(p.y(), Ok(-2.0));
        assert_eq!(p.z(), Ok(3.5));
        assert_eq!(p.to_point3(), Ok(Point3::new(1.0, -2.0, 3.5)));

        assert_eq!(sample().x(), Err(Error::ShapeError(Shape::new(3, 3))));
        let column = Matrix::new(vec![vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        assert!(column.z().is_err());
    }

    #[test]
    fn test_display_prints_rows() {
        let m = Matrix::new(vec![vec![1.0, 2.0], vec![3.5, 4.0]]).unwrap();
        assert_eq!(m.to_string(), "1 2\n3.5 4\n");
    }
}
