/// Errors raised by matrix operations and scene setup
use std::fmt;

use thiserror::Error;

/// Matrix operation that rejected its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Dot,
    Add,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Dot => f.write_str("dot"),
            Operation::Add => f.write_str("add"),
        }
    }
}

/// Row and column count of a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("dimension mismatch in {op}: {lhs} with {rhs}")]
    DimensionMismatch { op: Operation, lhs: Shape, rhs: Shape },

    #[error("expected a 1x3 point, got a {0} matrix")]
    ShapeError(Shape),

    #[error("matrix must have at least one row and one column")]
    Empty,

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("step size must be positive and finite, got {0}")]
    InvalidStep(f32),
}

pub type Result<T> = std::result::Result<T, Error>;
