use measurements::{Length, Volume};

use crate::level::Level;

/// A vessel with a constant horizontal cross-section between `bottom` and `top`.
///
/// Coordinates are taken to be meters wherever they are converted into `measurements` units.
pub trait Tank {
  fn bottom(&self) -> f64;
  fn top(&self) -> f64;
  fn base_area(&self) -> f64;

  fn height(&self) -> f64 {
    self.top() - self.bottom()
  }

  fn volume(&self) -> Volume {
    Volume::from_cubic_meters(self.base_area() * self.height())
  }

  /// Height of the water column inside this tank when the system is filled up to `water_height`.
  fn filled_height(&self, water_height: f64) -> f64 {
    (self.top().min(water_height) - self.bottom()).max(0.0)
  }

  fn level(&self, water_height: f64) -> Level {
    let filled_height = self.filled_height(water_height);

    let percentage = if self.height() > 0.0 {
      filled_height / self.height()
    } else if water_height >= self.top() {
      1.0
    } else {
      0.0
    };

    Level {
      filled_height: Length::from_meters(filled_height),
      volume: Volume::from_cubic_meters(self.base_area() * filled_height),
      percentage,
    }
  }
}
