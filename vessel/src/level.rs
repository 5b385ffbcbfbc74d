use measurements::{Length, Volume};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
  pub(crate) filled_height: Length,
  pub(crate) volume: Volume,
  pub(crate) percentage: f64,
}

impl Level {
  pub fn filled_height(&self) -> Length {
    self.filled_height
  }

  pub fn volume(&self) -> Volume {
    self.volume
  }

  /// Fill fraction in `[0, 1]`.
  pub fn percentage(&self) -> f64 {
    self.percentage
  }
}

impl From<Level> for f64 {
  fn from(level: Level) -> Self {
    level.percentage
  }
}

impl From<Level> for Volume {
  fn from(level: Level) -> Self {
    level.volume
  }
}

impl From<Level> for Length {
  fn from(level: Level) -> Self {
    level.filled_height
  }
}
