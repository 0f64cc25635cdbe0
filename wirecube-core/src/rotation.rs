/// Per-axis rotation matrices (angles in degrees)
///
/// All matrices act on row-vector points: `point.dot(&rotation_z(a))`.
use std::fmt;
use std::str::FromStr;

use crate::matrix::Matrix;

pub fn rotation_x(degrees: f32) -> Matrix {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Matrix::transform([[1.0, 0.0, 0.0], [0.0, cos, sin], [0.0, -sin, cos]])
}

pub fn rotation_y(degrees: f32) -> Matrix {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Matrix::transform([[cos, 0.0, -sin], [0.0, 1.0, 0.0], [sin, 0.0, cos]])
}

/// Y "rotation" with `-cos` in the (0, 2) slot.
///
/// This is not a rotation: it shears and scales the cube. It exists only to
/// reproduce the look of the first version of this animation and is never
/// picked unless asked for by name.
pub fn rotation_y_observed(degrees: f32) -> Matrix {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Matrix::transform([[cos, 0.0, -cos], [0.0, 1.0, 0.0], [sin, 0.0, cos]])
}

pub fn rotation_z(degrees: f32) -> Matrix {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Matrix::transform([[cos, sin, 0.0], [-sin, cos, 0.0], [0.0, 0.0, 1.0]])
}

/// Axis the display rotation spins around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    X,
    Y,
    YObserved,
    #[default]
    Z,
}

impl Axis {
    pub fn rotation(self, degrees: f32) -> Matrix {
        match self {
            Axis::X => rotation_x(degrees),
            Axis::Y => rotation_y(degrees),
            Axis::YObserved => rotation_y_observed(degrees),
            Axis::Z => rotation_z(degrees),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::YObserved => "y-observed",
            Axis::Z => "z",
        })
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "y-observed" => Ok(Axis::YObserved),
            "z" => Ok(Axis::Z),
            other => Err(format!(
                "unknown axis '{}', expected one of x, y, y-observed, z",
                other
            )),
        }
    }
}
