/// Frame-by-frame convergence of points toward their targets
use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Per-axis increment used by the reference scene (units per frame)
pub const DEFAULT_STEP: f32 = 0.01;

/// A point that slides from where it starts toward a fixed target
#[derive(Debug, Clone, PartialEq)]
pub struct Tracked {
    pub current: Matrix,
    pub target: Matrix,
}

impl Tracked {
    pub fn new(current: Matrix, target: Matrix) -> Self {
        Self { current, target }
    }

    /// Largest per-axis distance between current and target
    pub fn deviation(&self) -> Result<f32> {
        Ok((self.current.x()? - self.target.x()?)
            .abs()
            .max((self.current.y()? - self.target.y()?).abs())
            .max((self.current.z()? - self.target.z()?).abs()))
    }

    /// True once every axis has moved past its target
    pub fn is_settled(&self) -> Result<bool> {
        Ok(self.current.x()? > self.target.x()?
            && self.current.y()? > self.target.y()?
            && self.current.z()? > self.target.z()?)
    }
}

/// Advances tracked points by one step per axis per frame.
///
/// An axis moves while `current <= target`. Nothing is clamped, so an axis
/// that stops can sit up to one step past its target.
#[derive(Debug, Clone)]
pub struct Stepper {
    step: f32,
    basis: Matrix,
    units: [Matrix; 3],
}

impl Stepper {
    pub fn new(step: f32, basis: Matrix) -> Result<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(Error::InvalidStep(step));
        }
        Ok(Self {
            step,
            basis,
            units: [
                Matrix::point(step, 0.0, 0.0),
                Matrix::point(0.0, step, 0.0),
                Matrix::point(0.0, 0.0, step),
            ],
        })
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn basis(&self) -> &Matrix {
        &self.basis
    }

    /// Move one point a single frame. The point is left untouched on error.
    pub fn step_point(&self, point: &mut Tracked) -> Result<()> {
        let mut next = point.current.clone();
        for (axis, unit) in self.units.iter().enumerate() {
            let (now, goal) = match axis {
                0 => (next.x()?, point.target.x()?),
                1 => (next.y()?, point.target.y()?),
                _ => (next.z()?, point.target.z()?),
            };
            if now <= goal {
                next = next.dot(&self.basis)?.add(unit)?;
            }
        }
        point.current = next;
        Ok(())
    }

    /// Move every point a single frame. On error no point is changed.
    pub fn advance(&self, points: &mut [Tracked]) -> Result<()> {
        let mut next = points.to_vec();
        for point in next.iter_mut() {
            self.step_point(point)?;
        }
        points.clone_from_slice(&next);
        Ok(())
    }
}

/// Display rotation angle in degrees, shared by the whole scene
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationAngle {
    degrees: f32,
}

impl RotationAngle {
    pub const FULL_TURN: f32 = 360.0;

    pub fn new(degrees: f32) -> Self {
        Self { degrees }
    }

    pub fn degrees(&self) -> f32 {
        self.degrees
    }

    /// Reset to zero once a full turn is reached. Returns whether it wrapped.
    pub fn check_wrap(&mut self) -> bool {
        if self.degrees >= Self::FULL_TURN {
            self.degrees = 0.0;
            true
        } else {
            false
        }
    }

    pub fn increment(&mut self) {
        self.degrees += 1.0;
    }

    /// One frame: wrap check first, then increment
    pub fn tick(&mut self) {
        self.check_wrap();
        self.increment();
    }
}
