use std::fmt;

use measurements::Length;
use ordered_float::NotNan;

use crate::error::{Error, Result};
use crate::tank::Tank;

const AXES: [char; 3] = ['x', 'y', 'z'];

/// An axis-aligned box spanning two corner points, with the z axis pointing up.
///
/// Two tanks are equal if all six coordinates are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CuboidTank {
  bottom_left: [NotNan<f64>; 3],
  top_right: [NotNan<f64>; 3],
}

impl CuboidTank {
  pub fn new(bottom_left: [f64; 3], top_right: [f64; 3]) -> Result<Self> {
    let mut lower = [NotNan::default(); 3];
    let mut upper = [NotNan::default(); 3];

    for i in 0..3 {
      if !bottom_left[i].is_finite() || !top_right[i].is_finite() {
        return Err(Error::InvalidTank(format!("{}-coordinate is not finite", AXES[i])))
      }

      if bottom_left[i] > top_right[i] {
        return Err(Error::InvalidTank(format!("edge along the {}-axis is negative", AXES[i])))
      }

      lower[i] = NotNan::new(bottom_left[i])?;
      upper[i] = NotNan::new(top_right[i])?;
    }

    let tank = Self { bottom_left: lower, top_right: upper };

    if !tank.base_area().is_finite() {
      return Err(Error::InvalidTank("base area is not finite".into()))
    }

    Ok(tank)
  }

  pub fn from_lengths(bottom_left: [Length; 3], top_right: [Length; 3]) -> Result<Self> {
    Self::new(bottom_left.map(|l| l.as_meters()), top_right.map(|l| l.as_meters()))
  }

  pub fn bottom_left(&self) -> [f64; 3] {
    self.bottom_left.map(NotNan::into_inner)
  }

  pub fn top_right(&self) -> [f64; 3] {
    self.top_right.map(NotNan::into_inner)
  }

  pub fn length(&self) -> f64 {
    self.extent(0)
  }

  pub fn width(&self) -> f64 {
    self.extent(1)
  }

  fn extent(&self, axis: usize) -> f64 {
    self.top_right[axis].into_inner() - self.bottom_left[axis].into_inner()
  }
}

impl Tank for CuboidTank {
  fn bottom(&self) -> f64 {
    self.bottom_left[2].into_inner()
  }

  fn top(&self) -> f64 {
    self.top_right[2].into_inner()
  }

  fn base_area(&self) -> f64 {
    self.length() * self.width()
  }
}

impl fmt::Display for CuboidTank {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Tank: {:?} to {:?}", self.bottom_left(), self.top_right())
  }
}
