use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::{json, Value};
use vessel::{CuboidTank, Level, Tank};

fn round(value: f64) -> f64 {
  (value * 10.0).round() / 10.0
}

fn by_position(a: &CuboidTank, b: &CuboidTank) -> Ordering {
  let key = |tank: &CuboidTank| [tank.bottom(), tank.top()].into_iter().chain(tank.bottom_left()).chain(tank.top_right());

  key(a).zip(key(b)).map(|(x, y)| x.total_cmp(&y)).find(|o| o.is_ne()).unwrap_or(Ordering::Equal)
}

/// Renders the fill state of a water system, tanks ordered from the bottom up.
pub fn report(height: f64, volume: f64, capacity: f64, levels: &HashMap<CuboidTank, Level>) -> Value {
  let mut tanks: Vec<_> = levels.iter().collect();
  tanks.sort_by(|(a, _), (b, _)| by_position(a, b));

  let percentage = if capacity > 0.0 { volume / capacity * 100.0 } else { 0.0 };

  json!({
    "height": height,
    "volume": volume,
    "capacity": capacity,
    "percentage": round(percentage),
    "tanks": tanks.into_iter().map(|(tank, level)| json!({
      "bottom": tank.bottom(),
      "top": tank.top(),
      "fill_height": round(level.filled_height().as_centimeters()),
      "volume": round(level.volume().as_liters()),
      "percentage": round(level.percentage() * 100.0),
    })).collect::<Vec<_>>(),
  })
}
